use crate::api::models::CatalogId;
use std::fmt;
use thiserror::Error;

/// The collaborator call that failed, used to pick the user-facing message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    CatalogBrowse,
    CatalogSearch,
    LibraryList,
    MovieLookup,
    SeriesLookup,
    RootFolders,
    AddToLibrary,
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::CatalogBrowse => "catalog fetch",
            Self::CatalogSearch => "catalog search",
            Self::LibraryList => "library listing",
            Self::MovieLookup => "movie lookup",
            Self::SeriesLookup => "series lookup",
            Self::RootFolders => "root folder listing",
            Self::AddToLibrary => "add to library",
        };
        f.write_str(label)
    }
}

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("{service} is not configured: missing {missing}")]
    NotConfigured {
        service: &'static str,
        missing: &'static str,
    },

    #[error("{operation} failed: {source}")]
    Transport {
        operation: Operation,
        #[source]
        source: reqwest::Error,
    },

    #[error("{operation} failed with HTTP {status}{}", detail_suffix(.message))]
    Status {
        operation: Operation,
        status: u16,
        message: Option<String>,
    },

    #[error("no matching series found for catalog id {0}")]
    SeriesNotFound(CatalogId),

    #[error("{service} reports no root folder to add into")]
    NoRootFolder { service: &'static str },
}

fn detail_suffix(message: &Option<String>) -> String {
    message
        .as_deref()
        .map(|m| format!(": {m}"))
        .unwrap_or_default()
}

impl ApiError {
    pub fn transport(operation: Operation) -> impl FnOnce(reqwest::Error) -> Self {
        move |source| Self::Transport { operation, source }
    }

    pub fn is_configuration(&self) -> bool {
        matches!(self, Self::NotConfigured { .. })
    }

    pub fn status_code(&self) -> Option<u16> {
        match self {
            Self::Status { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Text shown to the user. Configuration problems name the missing
    /// setting; transport failures collapse to one line per operation.
    pub fn user_message(&self) -> String {
        match self {
            Self::NotConfigured { service, missing } => {
                format!("{service} is not configured ({missing} missing)")
            }
            Self::SeriesNotFound(_) => "No matching series found".to_string(),
            Self::NoRootFolder { service } => format!("{service} has no root folder"),
            Self::Transport { operation, .. } | Self::Status { operation, .. } => {
                match operation {
                    Operation::CatalogBrowse => "Failed to fetch titles",
                    Operation::CatalogSearch => "Failed to search",
                    Operation::LibraryList | Operation::MovieLookup => "Failed to load library",
                    Operation::SeriesLookup
                    | Operation::RootFolders
                    | Operation::AddToLibrary => "Failed to add to library",
                }
                .to_string()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_errors_include_service_message() {
        let err = ApiError::Status {
            operation: Operation::AddToLibrary,
            status: 400,
            message: Some("This movie has already been added".into()),
        };
        assert_eq!(
            err.to_string(),
            "add to library failed with HTTP 400: This movie has already been added"
        );
        assert_eq!(err.user_message(), "Failed to add to library");
        assert_eq!(err.status_code(), Some(400));
    }

    #[test]
    fn configuration_errors_are_distinct() {
        let err = ApiError::NotConfigured {
            service: "Radarr",
            missing: "API key",
        };
        assert!(err.is_configuration());
        assert_eq!(err.user_message(), "Radarr is not configured (API key missing)");
        assert!(!ApiError::SeriesNotFound(CatalogId(1)).is_configuration());
    }

    #[test]
    fn not_found_reads_differently_from_transport() {
        assert_eq!(
            ApiError::SeriesNotFound(CatalogId(1399)).user_message(),
            "No matching series found"
        );
        let browse = ApiError::Status {
            operation: Operation::CatalogBrowse,
            status: 500,
            message: None,
        };
        assert_eq!(browse.user_message(), "Failed to fetch titles");
        assert_eq!(browse.to_string(), "catalog fetch failed with HTTP 500");
    }
}
