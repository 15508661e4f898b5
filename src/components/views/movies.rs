use crate::api::MediaKind;
use crate::components::views::MediaBrowser;
use dioxus::prelude::*;

#[component]
pub fn MoviesView() -> Element {
    rsx! {
        MediaBrowser { kind: MediaKind::Movie }
    }
}
