use dioxus::prelude::*;

mod api;
mod components;
mod config;
mod diagnostics;
mod paging;

use api::MediaServices;
use components::AppView;
use config::AppConfig;

const FAVICON: Asset = asset!("/assets/favicon.svg");
const APP_CSS: Asset = asset!("/assets/styling/app.css");
const TAILWIND_CSS: Asset = asset!("/assets/tailwind.css");

fn main() {
    let (config, config_error) = match AppConfig::from_env() {
        Ok(config) => (config, None),
        Err(err) => (AppConfig::default(), Some(err)),
    };

    if let Err(err) = dioxus::logger::init(config.log_level) {
        eprintln!("logger already initialized: {err}");
    }
    if let Some(err) = config_error {
        tracing::error!(%err, "invalid configuration; falling back to defaults");
    }
    tracing::info!(
        catalog = %config.catalog.base_url,
        radarr = config.movie_library.url.is_some(),
        sonarr = config.show_library.url.is_some(),
        "starting"
    );

    let services = MediaServices::new(&config);
    dioxus::LaunchBuilder::new()
        .with_context(services)
        .launch(App);
}

#[component]
fn App() -> Element {
    rsx! {
        document::Link { rel: "icon", r#type: "image/svg+xml", href: FAVICON }
        document::Meta { name: "theme-color", content: "#09090b" }
        document::Title { "Scoutarr" }
        document::Stylesheet { href: TAILWIND_CSS }
        document::Stylesheet { href: APP_CSS }

        Router::<AppView> {}
    }
}
