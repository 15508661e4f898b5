//! Routes of the application. Every page renders inside [`AppShell`].

use crate::components::views::*;
use crate::components::AppShell;
use dioxus::prelude::*;

#[derive(Clone, Debug, PartialEq, Routable)]
#[rustfmt::skip]
pub enum AppView {
    #[layout(AppShell)]
        #[route("/")]
        HomeView {},
        #[route("/movies")]
        MoviesView {},
        #[route("/tv")]
        ShowsView {},
        #[route("/library")]
        LibraryView {},
        #[route("/:..segments")]
        NotFoundView { segments: Vec<String> },
}

pub fn view_label(view: &AppView) -> &'static str {
    match view {
        AppView::HomeView {} => "Home",
        AppView::MoviesView {} => "Movies",
        AppView::ShowsView {} => "TV",
        AppView::LibraryView {} => "Library",
        AppView::NotFoundView { .. } => "Not found",
    }
}

/// Header navigation entries, in display order.
pub fn nav_entries() -> Vec<(AppView, &'static str)> {
    vec![
        (AppView::HomeView {}, "home"),
        (AppView::MoviesView {}, "film"),
        (AppView::ShowsView {}, "tv"),
        (AppView::LibraryView {}, "library"),
    ]
}
