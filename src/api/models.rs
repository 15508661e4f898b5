use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Identifier shared by the catalog and both library services (a TMDB id).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CatalogId(pub u64);

impl fmt::Display for CatalogId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MediaKind {
    Movie,
    Show,
}

impl MediaKind {
    /// Path segment the catalog uses for this kind.
    pub fn catalog_segment(self) -> &'static str {
        match self {
            Self::Movie => "movie",
            Self::Show => "tv",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Movie => "Movie",
            Self::Show => "TV Show",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Poster {
    Remote(String),
    Placeholder,
}

impl Poster {
    /// Joins `base` and a service-relative `fragment`. Absolute fragments are
    /// kept as they are; blank ones become the placeholder.
    pub fn resolve(base: &str, fragment: Option<&str>) -> Self {
        let Some(fragment) = fragment.map(str::trim).filter(|f| !f.is_empty()) else {
            return Self::Placeholder;
        };
        if fragment.starts_with("http://") || fragment.starts_with("https://") {
            return Self::Remote(fragment.to_string());
        }
        let base = base.trim_end_matches('/');
        if fragment.starts_with('/') {
            Self::Remote(format!("{base}{fragment}"))
        } else {
            Self::Remote(format!("{base}/{fragment}"))
        }
    }

    pub fn url(&self) -> Option<&str> {
        match self {
            Self::Remote(url) => Some(url),
            Self::Placeholder => None,
        }
    }
}

/// The one record shape every client normalizes into.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MediaItem {
    pub id: CatalogId,
    pub title: String,
    pub poster: Poster,
    pub overview: String,
    /// `YYYY-MM-DD`, empty when unknown.
    pub release_date: String,
    pub vote_average: f64,
    /// TVDB id; only show adds need it.
    pub secondary_id: Option<u64>,
    pub in_library: bool,
    pub kind: MediaKind,
}

impl MediaItem {
    pub fn catalog_id(&self) -> CatalogId {
        self.id
    }

    /// Presence only ever moves from absent to present.
    pub fn mark_in_library(&mut self) {
        self.in_library = true;
    }

    pub fn release_year(&self) -> Option<i32> {
        use chrono::Datelike;
        let date = self.release_date.get(..10).unwrap_or(self.release_date.as_str());
        NaiveDate::parse_from_str(date, "%Y-%m-%d")
            .ok()
            .map(|d| d.year())
    }
}

/// Trims library-style timestamps (`2020-01-01T00:00:00Z`) down to the date.
pub fn normalize_release_date(raw: Option<&str>) -> String {
    let raw = raw.map(str::trim).unwrap_or_default();
    match raw.get(..10) {
        Some(date) if NaiveDate::parse_from_str(date, "%Y-%m-%d").is_ok() => date.to_string(),
        _ => raw.to_string(),
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct CatalogPage {
    pub items: Vec<MediaItem>,
    pub has_more: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum CatalogCategory {
    Popular,
    TopRated,
    /// Now playing for movies, on the air for TV.
    Current,
    /// Discovery filtered by an opaque, pipe-separated provider code.
    Provider(String),
}

impl CatalogCategory {
    /// Catalog endpoint, relative to the API root.
    pub fn endpoint(&self, kind: MediaKind) -> String {
        let segment = match (self, kind) {
            (Self::Provider(_), _) => return format!("discover/{}", kind.catalog_segment()),
            (Self::Popular, _) => "popular",
            (Self::TopRated, _) => "top_rated",
            (Self::Current, MediaKind::Movie) => "now_playing",
            (Self::Current, MediaKind::Show) => "on_the_air",
        };
        format!("{}/{}", kind.catalog_segment(), segment)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AddOutcome {
    Added,
    AlreadyPresent,
}

pub const MOVIE_STREAMING_PROVIDERS: &str = "2|8|15|384|12|49|55|531|337|453|2739|213|1024|4353";

/// Filter tabs offered per kind, in display order.
pub fn category_tabs(kind: MediaKind) -> Vec<(&'static str, CatalogCategory)> {
    match kind {
        MediaKind::Movie => vec![
            ("Popular", CatalogCategory::Popular),
            ("Now Playing", CatalogCategory::Current),
            ("Top Rated", CatalogCategory::TopRated),
            (
                "Streaming",
                CatalogCategory::Provider(MOVIE_STREAMING_PROVIDERS.to_string()),
            ),
        ],
        MediaKind::Show => {
            let mut tabs = vec![
                ("Popular", CatalogCategory::Popular),
                ("On The Air", CatalogCategory::Current),
                ("Top Rated", CatalogCategory::TopRated),
            ];
            for (label, network) in [
                ("Netflix", "213"),
                ("Apple TV+", "2552"),
                ("HBO", "49"),
                ("Hulu", "453"),
                ("Disney+", "2739"),
                ("Prime Video", "1024"),
                ("Discovery+", "4353"),
                ("Cinemax", "359"),
            ] {
                tabs.push((label, CatalogCategory::Provider(network.to_string())));
            }
            tabs
        }
    }
}
