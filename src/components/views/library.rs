use crate::api::*;
use crate::components::{Icon, MediaCard};
use crate::diagnostics::{log_perf, perf_start};
use dioxus::prelude::*;
use futures_util::future::join;
use tracing::warn;

type SectionResult = Result<Vec<MediaItem>, String>;

fn section_result(kind: MediaKind, outcome: Result<Vec<MediaItem>, ApiError>) -> SectionResult {
    outcome.map_err(|err| {
        warn!(kind = kind.label(), %err, "library listing failed");
        err.user_message()
    })
}

#[component]
pub fn LibraryView() -> Element {
    let services = use_context::<MediaServices>();

    let libraries = use_resource(move || {
        let services = services.clone();
        async move {
            let started_at = perf_start();
            let (movies, shows) = join(
                services.library(MediaKind::Movie),
                services.library(MediaKind::Show),
            )
            .await;
            log_perf("library.load", started_at, "");
            (
                section_result(MediaKind::Movie, movies),
                section_result(MediaKind::Show, shows),
            )
        }
    });

    rsx! {
        div { class: "space-y-10",
            header { class: "page-header gap-4",
                h1 { class: "page-title", "Library" }
            }
            {match libraries() {
                Some((movies, shows)) => rsx! {
                    LibrarySection { title: "Movies".to_string(), icon: "film".to_string(), result: movies }
                    LibrarySection { title: "TV Shows".to_string(), icon: "tv".to_string(), result: shows }
                },
                None => rsx! {
                    div { class: "flex items-center justify-center py-20",
                        Icon { name: "loader".to_string(), class: "w-8 h-8 text-zinc-500".to_string() }
                    }
                },
            }}
        }
    }
}

#[component]
fn LibrarySection(title: String, icon: String, result: SectionResult) -> Element {
    let count = result.as_ref().map(Vec::len).unwrap_or(0);

    rsx! {
        section { class: "space-y-4",
            div { class: "flex items-center gap-3",
                Icon { name: icon.clone(), class: "w-5 h-5 text-emerald-400".to_string() }
                h2 { class: "text-xl font-semibold text-white", "{title}" }
                if count > 0 {
                    span { class: "text-sm text-zinc-500", "{count}" }
                }
            }
            {match result {
                Err(message) => rsx! {
                    div { class: "flex items-center gap-3 p-4 rounded-xl bg-red-500/10 border border-red-500/30",
                        Icon { name: "alert".to_string(), class: "w-5 h-5 text-red-400".to_string() }
                        p { class: "text-sm text-red-300", "{message}" }
                    }
                },
                Ok(items) if items.is_empty() => rsx! {
                    div { class: "flex flex-col items-center justify-center py-12",
                        Icon { name: icon.clone(), class: "w-12 h-12 text-zinc-600 mb-3".to_string() }
                        p { class: "text-zinc-400", "Nothing here yet" }
                    }
                },
                Ok(items) => rsx! {
                    div { class: "grid grid-cols-2 sm:grid-cols-3 md:grid-cols-4 lg:grid-cols-5 xl:grid-cols-6 gap-4",
                        for (index, item) in items.into_iter().enumerate() {
                            MediaCard {
                                key: "{index}",
                                item: item,
                                on_added: move |_| {},
                            }
                        }
                    }
                },
            }}
        }
    }
}
