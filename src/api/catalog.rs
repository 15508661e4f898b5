// Browse and search against the TMDB v3 catalog.
use super::{decode_response, HTTP_CLIENT};
use crate::api::error::{ApiError, Operation};
use crate::api::models::*;
use crate::config::CatalogConfig;
use serde::Deserialize;
use tracing::debug;

const MOVIE_POSTER_BASE: &str = "https://image.tmdb.org/t/p/w500";
const SHOW_POSTER_BASE: &str = "https://media.themoviedb.org/t/p/w220_and_h330_face";

#[derive(Debug, Deserialize)]
struct CatalogPageResponse {
    #[serde(default)]
    page: u32,
    #[serde(default)]
    results: Vec<CatalogResult>,
    #[serde(default)]
    total_pages: u32,
}

#[derive(Debug, Deserialize)]
struct CatalogResult {
    id: u64,
    #[serde(default)]
    title: Option<String>,
    #[serde(default)]
    name: Option<String>,
    #[serde(default)]
    poster_path: Option<String>,
    #[serde(default)]
    overview: Option<String>,
    #[serde(default)]
    release_date: Option<String>,
    #[serde(default)]
    first_air_date: Option<String>,
    #[serde(default)]
    vote_average: Option<f64>,
}

fn poster_base(kind: MediaKind) -> &'static str {
    match kind {
        MediaKind::Movie => MOVIE_POSTER_BASE,
        MediaKind::Show => SHOW_POSTER_BASE,
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

fn media_from_catalog(raw: CatalogResult, kind: MediaKind) -> MediaItem {
    let title = match kind {
        MediaKind::Movie => non_blank(raw.title).or(non_blank(raw.name)),
        MediaKind::Show => non_blank(raw.name).or(non_blank(raw.title)),
    };
    let release = non_blank(raw.release_date).or(non_blank(raw.first_air_date));

    MediaItem {
        id: CatalogId(raw.id),
        title: title.unwrap_or_default(),
        poster: Poster::resolve(poster_base(kind), raw.poster_path.as_deref()),
        overview: raw.overview.unwrap_or_default(),
        release_date: normalize_release_date(release.as_deref()),
        vote_average: raw.vote_average.unwrap_or(0.0),
        secondary_id: None,
        in_library: false,
        kind,
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct CatalogClient {
    config: CatalogConfig,
}

impl CatalogClient {
    pub fn new(config: &CatalogConfig) -> Self {
        Self {
            config: config.clone(),
        }
    }

    fn api_key(&self) -> Result<&str, ApiError> {
        self.config
            .api_key
            .as_deref()
            .ok_or(ApiError::NotConfigured {
                service: "TMDB",
                missing: "API key",
            })
    }

    fn build_url(&self, endpoint: &str, api_key: &str, params: &[(&str, &str)]) -> String {
        let mut url = format!(
            "{}/{}?api_key={}&language={}",
            self.config.base_url,
            endpoint,
            urlencoding::encode(api_key),
            urlencoding::encode(&self.config.language)
        );

        for (key, value) in params {
            url.push_str(&format!("&{}={}", key, urlencoding::encode(value)));
        }

        url
    }

    async fn fetch_page(
        &self,
        kind: MediaKind,
        endpoint: &str,
        params: &[(&str, &str)],
        page: u32,
        operation: Operation,
    ) -> Result<CatalogPage, ApiError> {
        let api_key = self.api_key()?;
        let page_param = page.to_string();
        let mut all_params = params.to_vec();
        all_params.push(("page", &page_param));
        let url = self.build_url(endpoint, api_key, &all_params);
        debug!(
            url = %url.replace(api_key, "***"),
            "catalog request"
        );

        let response = HTTP_CLIENT
            .get(&url)
            .send()
            .await
            .map_err(ApiError::transport(operation))?;
        let body: CatalogPageResponse = decode_response(response, operation).await?;

        let current = if body.page == 0 { page } else { body.page };
        Ok(CatalogPage {
            has_more: current < body.total_pages,
            items: body
                .results
                .into_iter()
                .map(|raw| media_from_catalog(raw, kind))
                .collect(),
        })
    }

    pub async fn browse(
        &self,
        kind: MediaKind,
        page: u32,
        category: &CatalogCategory,
    ) -> Result<CatalogPage, ApiError> {
        let endpoint = category.endpoint(kind);
        match category {
            CatalogCategory::Provider(code) => {
                let filter = match kind {
                    MediaKind::Movie => "with_watch_providers",
                    MediaKind::Show => "with_networks",
                };
                let params = [
                    ("watch_region", self.config.watch_region.as_str()),
                    (filter, code.as_str()),
                ];
                self.fetch_page(kind, &endpoint, &params, page, Operation::CatalogBrowse)
                    .await
            }
            _ => {
                self.fetch_page(kind, &endpoint, &[], page, Operation::CatalogBrowse)
                    .await
            }
        }
    }

    pub async fn search(
        &self,
        kind: MediaKind,
        query: &str,
        page: u32,
    ) -> Result<CatalogPage, ApiError> {
        let endpoint = format!("search/{}", kind.catalog_segment());
        self.fetch_page(
            kind,
            &endpoint,
            &[("query", query.trim())],
            page,
            Operation::CatalogSearch,
        )
        .await
    }
}
