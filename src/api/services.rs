use crate::api::catalog::CatalogClient;
use crate::api::error::ApiError;
use crate::api::library::{MovieLibraryClient, ShowLibraryClient};
use crate::api::models::{AddOutcome, MediaItem, MediaKind};
use crate::api::reconcile::PresenceSet;
use crate::config::AppConfig;

/// Every client the UI talks to, built once from the startup configuration
/// and shared through the Dioxus context.
#[derive(Debug, Clone, PartialEq)]
pub struct MediaServices {
    pub catalog: CatalogClient,
    pub movies: MovieLibraryClient,
    pub shows: ShowLibraryClient,
}

impl MediaServices {
    pub fn new(config: &AppConfig) -> Self {
        Self {
            catalog: CatalogClient::new(&config.catalog),
            movies: MovieLibraryClient::new(&config.movie_library),
            shows: ShowLibraryClient::new(&config.show_library),
        }
    }

    pub async fn presence_set(&self, kind: MediaKind) -> Result<PresenceSet, ApiError> {
        match kind {
            MediaKind::Movie => self.movies.presence_set().await,
            MediaKind::Show => self.shows.presence_set().await,
        }
    }

    pub async fn library(&self, kind: MediaKind) -> Result<Vec<MediaItem>, ApiError> {
        match kind {
            MediaKind::Movie => self.movies.list_all().await,
            MediaKind::Show => self.shows.list_all().await,
        }
    }

    pub async fn add_to_library(&self, item: &MediaItem) -> Result<AddOutcome, ApiError> {
        match item.kind {
            MediaKind::Movie => self.movies.add(item.catalog_id(), &item.title).await,
            MediaKind::Show => {
                self.shows
                    .add(item.catalog_id(), &item.title, item.secondary_id)
                    .await
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::models::{CatalogId, Poster};
    use crate::config::LibraryConfig;
    use serde_json::json;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn show(id: u64) -> MediaItem {
        MediaItem {
            id: CatalogId(id),
            title: "Lost Pilot".into(),
            poster: Poster::Placeholder,
            overview: String::new(),
            release_date: String::new(),
            vote_average: 0.0,
            secondary_id: None,
            in_library: false,
            kind: MediaKind::Show,
        }
    }

    #[tokio::test]
    async fn show_add_fails_without_lookup_match_and_skips_create() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/v3/series/lookup"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
            .expect(1)
            .mount(&server)
            .await;
        Mock::given(method("POST"))
            .and(path("/api/v3/series"))
            .respond_with(ResponseTemplate::new(201))
            .expect(0)
            .mount(&server)
            .await;

        let mut config = AppConfig::default();
        config.show_library = LibraryConfig {
            url: Some(server.uri()),
            api_key: Some("key".into()),
            root_folder: Some("/tv".into()),
            ..LibraryConfig::default()
        };
        let services = MediaServices::new(&config);

        let err = services.add_to_library(&show(77)).await.unwrap_err();
        assert!(matches!(err, ApiError::SeriesNotFound(CatalogId(77))));
    }

    #[tokio::test]
    async fn presence_dispatches_by_kind() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/v3/series"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([
                {"title": "Lost", "tmdbId": 4607, "tvdbId": 73739}
            ])))
            .expect(1)
            .mount(&server)
            .await;

        let mut config = AppConfig::default();
        config.show_library.url = Some(server.uri());
        config.show_library.api_key = Some("key".into());
        let services = MediaServices::new(&config);

        let presence = services.presence_set(MediaKind::Show).await.unwrap();
        assert!(presence.contains(CatalogId(4607)));

        let movie_err = services.presence_set(MediaKind::Movie).await.unwrap_err();
        assert!(movie_err.is_configuration());
    }
}
