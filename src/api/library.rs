// Radarr (movies) and Sonarr (shows) v3 clients: presence listing, lookup and add.
use super::{decode_response, HTTP_CLIENT};
use crate::api::error::{ApiError, Operation};
use crate::api::models::*;
use crate::api::reconcile::PresenceSet;
use crate::config::LibraryConfig;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct LibraryImage {
    #[serde(default)]
    cover_type: String,
    #[serde(default)]
    url: Option<String>,
    #[serde(default)]
    remote_url: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
struct RatingValue {
    #[serde(default)]
    value: Option<f64>,
}

#[derive(Debug, Clone, Default, Deserialize)]
struct MovieRatings {
    #[serde(default)]
    tmdb: Option<RatingValue>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
struct LibraryMovie {
    #[serde(default)]
    title: String,
    #[serde(default)]
    tmdb_id: u64,
    #[serde(default)]
    overview: Option<String>,
    #[serde(default)]
    images: Vec<LibraryImage>,
    #[serde(default)]
    release_date: Option<String>,
    #[serde(default)]
    ratings: MovieRatings,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
struct LibrarySeries {
    #[serde(default)]
    title: String,
    #[serde(default)]
    tmdb_id: u64,
    #[serde(default)]
    tvdb_id: u64,
    #[serde(default)]
    overview: Option<String>,
    #[serde(default)]
    images: Vec<LibraryImage>,
    #[serde(default)]
    first_aired: Option<String>,
    #[serde(default)]
    ratings: RatingValue,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
struct RootFolder {
    path: String,
    #[serde(default = "default_accessible")]
    accessible: bool,
}

fn default_accessible() -> bool {
    true
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct AddMovieOptions {
    search_for_movie: bool,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct AddMovieRequest<'a> {
    title: &'a str,
    quality_profile_id: u32,
    root_folder_path: &'a str,
    tmdb_id: u64,
    monitored: bool,
    add_options: AddMovieOptions,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct AddSeriesOptions {
    search_for_missing_episodes: bool,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct AddSeriesRequest<'a> {
    title: &'a str,
    quality_profile_id: u32,
    root_folder_path: &'a str,
    tmdb_id: u64,
    tvdb_id: u64,
    monitored: bool,
    add_options: AddSeriesOptions,
}

/// Picks the poster image, preferring the copy served by the library itself.
fn poster_from_images(base_url: &str, images: &[LibraryImage]) -> Poster {
    let Some(poster) = images.iter().find(|img| img.cover_type == "poster") else {
        return Poster::Placeholder;
    };
    match Poster::resolve(base_url, poster.url.as_deref()) {
        Poster::Placeholder => Poster::resolve(base_url, poster.remote_url.as_deref()),
        resolved => resolved,
    }
}

fn media_from_movie(base_url: &str, raw: LibraryMovie) -> MediaItem {
    MediaItem {
        id: CatalogId(raw.tmdb_id),
        poster: poster_from_images(base_url, &raw.images),
        title: raw.title,
        overview: raw.overview.unwrap_or_default(),
        release_date: normalize_release_date(raw.release_date.as_deref()),
        vote_average: raw.ratings.tmdb.and_then(|r| r.value).unwrap_or(0.0),
        secondary_id: None,
        in_library: true,
        kind: MediaKind::Movie,
    }
}

fn media_from_series(base_url: &str, raw: LibrarySeries) -> MediaItem {
    MediaItem {
        id: CatalogId(raw.tmdb_id),
        poster: poster_from_images(base_url, &raw.images),
        title: raw.title,
        overview: raw.overview.unwrap_or_default(),
        release_date: normalize_release_date(raw.first_aired.as_deref()),
        vote_average: raw.ratings.value.unwrap_or(0.0),
        secondary_id: (raw.tvdb_id != 0).then_some(raw.tvdb_id),
        in_library: true,
        kind: MediaKind::Show,
    }
}

/// Collects the catalog ids of a library snapshot. Entries without a catalog
/// id (0) never match anything and are skipped.
pub fn ids_of(items: &[MediaItem]) -> PresenceSet {
    items
        .iter()
        .map(MediaItem::catalog_id)
        .filter(|id| id.0 != 0)
        .collect()
}

#[derive(Debug, Clone, PartialEq)]
struct LibraryBase {
    service: &'static str,
    config: LibraryConfig,
}

/// Validated connection details, only available once URL and key are set.
struct Connection<'a> {
    base_url: &'a str,
    api_key: &'a str,
}

impl LibraryBase {
    fn new(service: &'static str, config: &LibraryConfig) -> Self {
        Self {
            service,
            config: config.clone(),
        }
    }

    fn connection(&self) -> Result<Connection<'_>, ApiError> {
        let base_url = self.config.url.as_deref().ok_or(ApiError::NotConfigured {
            service: self.service,
            missing: "base URL",
        })?;
        let api_key = self
            .config
            .api_key
            .as_deref()
            .ok_or(ApiError::NotConfigured {
                service: self.service,
                missing: "API key",
            })?;
        Ok(Connection { base_url, api_key })
    }

    async fn get<T>(
        &self,
        path: &str,
        params: &[(&str, &str)],
        operation: Operation,
    ) -> Result<T, ApiError>
    where
        T: serde::de::DeserializeOwned,
    {
        let conn = self.connection()?;
        let url = format!("{}/api/v3{}", conn.base_url, path);
        debug!(service = self.service, %url, "library request");
        let response = HTTP_CLIENT
            .get(&url)
            .query(params)
            .header("X-Api-Key", conn.api_key)
            .send()
            .await
            .map_err(ApiError::transport(operation))?;
        decode_response(response, operation).await
    }

    async fn post<B>(&self, path: &str, body: &B) -> Result<(), ApiError>
    where
        B: Serialize,
    {
        let operation = Operation::AddToLibrary;
        let conn = self.connection()?;
        let url = format!("{}/api/v3{}", conn.base_url, path);
        debug!(service = self.service, %url, "library add");
        let response = HTTP_CLIENT
            .post(&url)
            .header("X-Api-Key", conn.api_key)
            .json(body)
            .send()
            .await
            .map_err(ApiError::transport(operation))?;
        if response.status().is_success() {
            return Ok(());
        }
        decode_response::<serde_json::Value>(response, operation)
            .await
            .map(|_| ())
    }

    fn base_url(&self) -> &str {
        self.config.url.as_deref().unwrap_or_default()
    }

    async fn root_folders(&self) -> Result<Vec<RootFolder>, ApiError> {
        self.get("/rootfolder", &[], Operation::RootFolders).await
    }

    /// The configured root folder, or the first accessible one the service
    /// reports.
    async fn root_folder_path(&self) -> Result<String, ApiError> {
        if let Some(path) = &self.config.root_folder {
            return Ok(path.clone());
        }
        self.root_folders()
            .await?
            .into_iter()
            .find(|folder| folder.accessible)
            .map(|folder| folder.path)
            .ok_or(ApiError::NoRootFolder {
                service: self.service,
            })
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct MovieLibraryClient(LibraryBase);

impl MovieLibraryClient {
    pub fn new(config: &LibraryConfig) -> Self {
        Self(LibraryBase::new("Radarr", config))
    }

    pub async fn list_all(&self) -> Result<Vec<MediaItem>, ApiError> {
        let movies: Vec<LibraryMovie> = self.0.get("/movie", &[], Operation::LibraryList).await?;
        let base_url = self.0.base_url();
        Ok(movies
            .into_iter()
            .map(|movie| media_from_movie(base_url, movie))
            .collect())
    }

    pub async fn presence_set(&self) -> Result<PresenceSet, ApiError> {
        Ok(ids_of(&self.list_all().await?))
    }

    pub async fn find(&self, catalog_id: CatalogId) -> Result<Option<MediaItem>, ApiError> {
        let tmdb_id = catalog_id.to_string();
        let movies: Vec<LibraryMovie> = self
            .0
            .get("/movie", &[("tmdbId", &tmdb_id)], Operation::MovieLookup)
            .await?;
        let base_url = self.0.base_url();
        Ok(movies
            .into_iter()
            .map(|movie| media_from_movie(base_url, movie))
            .find(|movie| movie.catalog_id() == catalog_id))
    }

    pub async fn add(&self, catalog_id: CatalogId, title: &str) -> Result<AddOutcome, ApiError> {
        let root_folder_path = self.0.root_folder_path().await?;
        let request = AddMovieRequest {
            title,
            quality_profile_id: self.0.config.quality_profile_id,
            root_folder_path: &root_folder_path,
            tmdb_id: catalog_id.0,
            monitored: true,
            add_options: AddMovieOptions {
                search_for_movie: true,
            },
        };

        match self.0.post("/movie", &request).await {
            Ok(()) => {
                info!(%catalog_id, title, "movie added to library");
                Ok(AddOutcome::Added)
            }
            // Radarr rejects duplicates with a validation error; confirm that is
            // what happened before reporting success.
            Err(err) if matches!(err.status_code(), Some(400..=499)) => {
                match self.find(catalog_id).await {
                    Ok(Some(_)) => {
                        info!(%catalog_id, title, "movie was already in the library");
                        Ok(AddOutcome::AlreadyPresent)
                    }
                    _ => Err(err),
                }
            }
            Err(err) => Err(err),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ShowLibraryClient(LibraryBase);

impl ShowLibraryClient {
    pub fn new(config: &LibraryConfig) -> Self {
        Self(LibraryBase::new("Sonarr", config))
    }

    pub async fn list_all(&self) -> Result<Vec<MediaItem>, ApiError> {
        let series: Vec<LibrarySeries> =
            self.0.get("/series", &[], Operation::LibraryList).await?;
        let base_url = self.0.base_url();
        Ok(series
            .into_iter()
            .map(|show| media_from_series(base_url, show))
            .collect())
    }

    pub async fn presence_set(&self) -> Result<PresenceSet, ApiError> {
        Ok(ids_of(&self.list_all().await?))
    }

    /// Sonarr's own search, keyed by catalog id. Each match carries the TVDB
    /// id Sonarr needs to create the series.
    pub async fn lookup(&self, catalog_id: CatalogId) -> Result<Vec<MediaItem>, ApiError> {
        let term = format!("Tmdb:{catalog_id}");
        let series: Vec<LibrarySeries> = self
            .0
            .get("/series/lookup", &[("term", &term)], Operation::SeriesLookup)
            .await?;
        let base_url = self.0.base_url();
        Ok(series
            .into_iter()
            .map(|show| {
                let mut item = media_from_series(base_url, show);
                item.in_library = false;
                item
            })
            .collect())
    }

    /// Adds a series. Without a known TVDB id the lookup runs first and the
    /// create request is only sent once it produced a match.
    pub async fn add(
        &self,
        catalog_id: CatalogId,
        title: &str,
        secondary_id: Option<u64>,
    ) -> Result<AddOutcome, ApiError> {
        let tvdb_id = match secondary_id.filter(|id| *id != 0) {
            Some(id) => id,
            None => self
                .lookup(catalog_id)
                .await?
                .first()
                .and_then(|show| show.secondary_id)
                .ok_or(ApiError::SeriesNotFound(catalog_id))?,
        };

        let root_folder_path = self.0.root_folder_path().await?;
        let request = AddSeriesRequest {
            title,
            quality_profile_id: self.0.config.quality_profile_id,
            root_folder_path: &root_folder_path,
            tmdb_id: catalog_id.0,
            tvdb_id,
            monitored: true,
            add_options: AddSeriesOptions {
                search_for_missing_episodes: true,
            },
        };

        match self.0.post("/series", &request).await {
            Ok(()) => {
                info!(%catalog_id, tvdb_id, title, "series added to library");
                Ok(AddOutcome::Added)
            }
            // Sonarr answers a duplicate with a validation error as well.
            Err(err) if matches!(err.status_code(), Some(400..=499)) => {
                match self.presence_set().await {
                    Ok(presence) if presence.contains(catalog_id) => {
                        info!(%catalog_id, title, "series was already in the library");
                        Ok(AddOutcome::AlreadyPresent)
                    }
                    _ => Err(err),
                }
            }
            Err(err) => Err(err),
        }
    }
}
