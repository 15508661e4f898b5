use crate::components::{AppView, Icon};
use dioxus::prelude::*;

#[component]
pub fn NotFoundView(segments: Vec<String>) -> Element {
    let path = format!("/{}", segments.join("/"));

    rsx! {
        div { class: "flex flex-col items-center justify-center py-20 gap-4 text-center",
            Icon { name: "alert".to_string(), class: "w-16 h-16 text-zinc-600".to_string() }
            p { class: "text-zinc-300", "Nothing lives at {path}" }
            Link {
                to: AppView::HomeView {},
                class: "px-4 py-2 rounded-full bg-emerald-500/20 text-emerald-400 text-sm font-medium",
                "Back home"
            }
        }
    }
}
