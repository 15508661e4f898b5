use crate::api::MediaKind;
use crate::components::views::MediaBrowser;
use dioxus::prelude::*;

#[component]
pub fn ShowsView() -> Element {
    rsx! {
        MediaBrowser { kind: MediaKind::Show }
    }
}
