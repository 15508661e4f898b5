use crate::components::{AppView, Icon};
use dioxus::prelude::*;

const ENTRY_CLASS: &str = "group flex flex-col items-center justify-center gap-4 p-8 rounded-2xl bg-zinc-900 border border-zinc-800/60 hover:border-emerald-500/40 hover:bg-zinc-800/60 transition-colors";

#[component]
pub fn HomeView() -> Element {
    rsx! {
        div { class: "space-y-10",
            header { class: "page-header gap-2",
                h1 { class: "page-title", "What do you want to watch?" }
                p { class: "text-zinc-400",
                    "Browse the catalog and send titles straight to Radarr or Sonarr."
                }
            }
            div { class: "grid grid-cols-1 sm:grid-cols-3 gap-4",
                Link { to: AppView::MoviesView {}, class: "{ENTRY_CLASS}",
                    Icon {
                        name: "film".to_string(),
                        class: "w-12 h-12 text-zinc-500 group-hover:text-emerald-400".to_string(),
                    }
                    span { class: "text-lg font-medium text-white", "Movies" }
                }
                Link { to: AppView::ShowsView {}, class: "{ENTRY_CLASS}",
                    Icon {
                        name: "tv".to_string(),
                        class: "w-12 h-12 text-zinc-500 group-hover:text-emerald-400".to_string(),
                    }
                    span { class: "text-lg font-medium text-white", "TV Shows" }
                }
                Link { to: AppView::LibraryView {}, class: "{ENTRY_CLASS}",
                    Icon {
                        name: "library".to_string(),
                        class: "w-12 h-12 text-zinc-500 group-hover:text-emerald-400".to_string(),
                    }
                    span { class: "text-lg font-medium text-white", "My Library" }
                }
            }
        }
    }
}
