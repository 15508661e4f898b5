use crate::api::{ApiError, MediaServices};
use crate::diagnostics::{log_perf, perf_start};
use crate::paging::controller::{LoadedPage, PageRequest, ScopeSource};
use tracing::warn;

/// Fetches the catalog page for `request` and, when asked, the presence set
/// of the matching library. A catalog failure fails the page; a presence
/// failure only leaves `presence` empty so browsing keeps working without a
/// configured library.
pub async fn load_page(
    services: &MediaServices,
    request: &PageRequest,
) -> Result<LoadedPage, ApiError> {
    let started_at = perf_start();
    let kind = request.scope.kind;

    let page = match &request.scope.source {
        ScopeSource::Browse(category) => {
            services.catalog.browse(kind, request.page, category).await?
        }
        ScopeSource::Search(query) => services.catalog.search(kind, query, request.page).await?,
    };

    let presence = if request.fetch_presence {
        match services.presence_set(kind).await {
            Ok(set) => Some(set),
            Err(err) if err.is_configuration() => {
                warn!(%err, "library not configured; presence flags unavailable");
                None
            }
            Err(err) => {
                warn!(%err, "presence fetch failed; will retry on next page");
                None
            }
        }
    } else {
        None
    };

    log_perf(
        "paging.load_page",
        started_at,
        &format!(
            "kind={} page={} items={}",
            kind.label(),
            request.page,
            page.items.len()
        ),
    );

    Ok(LoadedPage {
        items: page.items,
        has_more: page.has_more,
        presence,
    })
}
