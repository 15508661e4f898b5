use crate::api::*;
use crate::components::{Icon, ToastController};
use dioxus::core::spawn_forever;
use dioxus::prelude::*;
use tracing::warn;

fn kind_badge(kind: MediaKind) -> &'static str {
    match kind {
        MediaKind::Movie => "Movie",
        MediaKind::Show => "TV",
    }
}

fn success_message(item: &MediaItem, outcome: AddOutcome) -> String {
    match outcome {
        AddOutcome::Added => format!("Added \"{}\" to {}", item.title, library_name(item.kind)),
        AddOutcome::AlreadyPresent => {
            format!("\"{}\" is already in {}", item.title, library_name(item.kind))
        }
    }
}

/// Toast text for a finished add, plus the id to report back to the list
/// when the add went through.
fn add_feedback(
    item: &MediaItem,
    result: Result<AddOutcome, ApiError>,
) -> (Result<String, String>, Option<CatalogId>) {
    match result {
        Ok(outcome) => (Ok(success_message(item, outcome)), Some(item.catalog_id())),
        Err(err) => {
            warn!(id = %item.catalog_id(), %err, "add to library failed");
            (Err(err.user_message()), None)
        }
    }
}

fn library_name(kind: MediaKind) -> &'static str {
    match kind {
        MediaKind::Movie => "Radarr",
        MediaKind::Show => "Sonarr",
    }
}

#[component]
pub fn MediaCard(item: MediaItem, on_added: EventHandler<CatalogId>) -> Element {
    let services = use_context::<MediaServices>();
    let toasts = use_context::<ToastController>();
    let mut adding = use_signal(|| false);

    let on_add = {
        let item = item.clone();
        move |evt: MouseEvent| {
            evt.stop_propagation();
            if adding() || item.in_library {
                return;
            }
            adding.set(true);

            let services = services.clone();
            let item = item.clone();
            let mut toasts = toasts;
            // Scrolling or switching tabs can unmount the card mid-request;
            // the add and its toast still have to finish.
            let _ = spawn_forever(async move {
                let result = services.add_to_library(&item).await;
                let (message, added) = add_feedback(&item, result);
                match message {
                    Ok(message) => toasts.success(message),
                    Err(message) => toasts.error(message),
                }

                // The list that handed out `on_added` outlives this card, so a
                // card that is still mounted can report back safely.
                let card_mounted = adding.try_write().map(|mut flag| *flag = false).is_ok();
                if let (true, Some(id)) = (card_mounted, added) {
                    on_added.call(id);
                }
            });
        }
    };

    let year = item
        .release_year()
        .map(|year| year.to_string())
        .unwrap_or_default();
    let rating = format!("{:.1}", item.vote_average);
    let badge = kind_badge(item.kind);
    let library = library_name(item.kind);

    rsx! {
        div { class: "group text-left w-full overflow-hidden relative",
            div { class: "aspect-[2/3] rounded-xl bg-zinc-800 mb-3 overflow-hidden relative shadow-lg group-hover:shadow-xl transition-shadow",
                {
                    match item.poster.url() {
                        Some(url) => rsx! {
                            img {
                                class: "w-full h-full object-cover",
                                src: "{url}",
                                alt: "{item.title}",
                                loading: "lazy",
                            }
                        },
                        None => rsx! {
                            div { class: "w-full h-full flex items-center justify-center bg-gradient-to-br from-zinc-700 to-zinc-800",
                                Icon {
                                    name: "film".to_string(),
                                    class: "w-12 h-12 text-zinc-500".to_string(),
                                }
                            }
                        },
                    }
                }
                span { class: "absolute top-2 left-2 px-2 py-0.5 rounded-full bg-black/60 text-xs font-medium text-zinc-200",
                    "{badge}"
                }
                if item.in_library {
                    span { class: "absolute top-2 right-2 p-1 rounded-full bg-emerald-500 text-white",
                        title: "In library",
                        Icon { name: "check".to_string(), class: "w-3 h-3".to_string() }
                    }
                }
            }
            p { class: "font-medium text-white text-sm truncate", title: "{item.title}", "{item.title}" }
            div { class: "flex items-center gap-2 text-xs text-zinc-400 mt-1",
                if !year.is_empty() {
                    span { "{year}" }
                }
                span { class: "flex items-center gap-1",
                    Icon { name: "star".to_string(), class: "w-3 h-3 text-amber-400".to_string() }
                    "{rating}"
                }
            }
            if item.in_library {
                button {
                    class: "mt-2 w-full px-3 py-1.5 rounded-lg bg-zinc-800/50 text-zinc-500 text-xs font-medium cursor-default",
                    disabled: true,
                    "In library"
                }
            } else {
                button {
                    class: if adding() {
                        "mt-2 w-full px-3 py-1.5 rounded-lg bg-emerald-500/10 text-emerald-600 text-xs font-medium flex items-center justify-center gap-1 cursor-wait"
                    } else {
                        "mt-2 w-full px-3 py-1.5 rounded-lg bg-emerald-500/20 text-emerald-400 hover:bg-emerald-500/30 text-xs font-medium flex items-center justify-center gap-1 transition-colors"
                    },
                    disabled: adding(),
                    onclick: on_add,
                    if adding() {
                        Icon { name: "loader".to_string(), class: "w-3 h-3".to_string() }
                        "Adding"
                    } else {
                        Icon { name: "plus".to_string(), class: "w-3 h-3".to_string() }
                        "Add to {library}"
                    }
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item(kind: MediaKind) -> MediaItem {
        MediaItem {
            id: CatalogId(1),
            title: "Heat".into(),
            poster: Poster::Placeholder,
            overview: String::new(),
            release_date: "1995-12-15".into(),
            vote_average: 7.9,
            secondary_id: None,
            in_library: false,
            kind,
        }
    }

    #[test]
    fn success_messages_name_the_library() {
        assert_eq!(
            success_message(&item(MediaKind::Movie), AddOutcome::Added),
            "Added \"Heat\" to Radarr"
        );
        assert_eq!(
            success_message(&item(MediaKind::Show), AddOutcome::AlreadyPresent),
            "\"Heat\" is already in Sonarr"
        );
    }

    #[test]
    fn only_successful_adds_report_an_id() {
        let movie = item(MediaKind::Movie);

        let (message, added) = add_feedback(&movie, Ok(AddOutcome::AlreadyPresent));
        assert_eq!(message, Ok("\"Heat\" is already in Radarr".to_string()));
        assert_eq!(added, Some(CatalogId(1)));

        let failure = ApiError::Status {
            operation: Operation::AddToLibrary,
            status: 500,
            message: None,
        };
        let expected = failure.user_message();
        let (message, added) = add_feedback(&movie, Err(failure));
        assert_eq!(message, Err(expected));
        assert_eq!(added, None);
    }
}
