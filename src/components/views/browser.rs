use crate::api::*;
use crate::components::{Icon, MediaCard};
use crate::paging::{load_page, BrowseScope, ListState, PagedListController, Resolution};
use dioxus::prelude::*;
use tracing::{debug, warn};

const SEARCH_DEBOUNCE_MS: u64 = 300;

#[cfg(not(target_arch = "wasm32"))]
async fn search_delay_ms(ms: u64) {
    tokio::time::sleep(std::time::Duration::from_millis(ms)).await;
}

#[cfg(target_arch = "wasm32")]
async fn search_delay_ms(ms: u64) {
    gloo_timers::future::TimeoutFuture::new(ms as u32).await;
}

fn page_title(kind: MediaKind) -> &'static str {
    match kind {
        MediaKind::Movie => "Movies",
        MediaKind::Show => "TV Shows",
    }
}

const TAB_ACTIVE_CLASS: &str =
    "px-4 py-2 rounded-full bg-emerald-500/20 text-emerald-400 text-sm font-medium whitespace-nowrap";
const TAB_IDLE_CLASS: &str = "px-4 py-2 rounded-full bg-zinc-800/50 text-zinc-400 hover:text-white text-sm font-medium whitespace-nowrap transition-colors";

/// Tabbed, searchable, infinitely scrolling grid for one media kind.
#[component]
pub fn MediaBrowser(kind: MediaKind) -> Element {
    let services = use_context::<MediaServices>();
    let tabs = category_tabs(kind);
    let initial_category = tabs
        .first()
        .map(|(_, category)| category.clone())
        .unwrap_or(CatalogCategory::Popular);

    let mut category = use_signal(|| initial_category.clone());
    let mut search_input = use_signal(String::new);
    let mut debounced_query = use_signal(String::new);
    let debounce_generation = use_signal(|| 0u64);
    let mut controller =
        use_signal(|| PagedListController::new(BrowseScope::browse(kind, initial_category)));

    // Typing settles before a new search scope starts.
    {
        let mut debounce_generation = debounce_generation.clone();
        use_effect(move || {
            let query = search_input().trim().to_string();
            debounce_generation.with_mut(|value| *value = value.saturating_add(1));
            let generation = *debounce_generation.peek();

            if query.is_empty() {
                if !debounced_query.peek().is_empty() {
                    debounced_query.set(String::new());
                }
                return;
            }

            spawn(async move {
                search_delay_ms(SEARCH_DEBOUNCE_MS).await;
                if *debounce_generation.peek() != generation {
                    return;
                }
                if *debounced_query.peek() != query {
                    debounced_query.set(query);
                }
            });
        });
    }

    let load_next = use_callback(move |_: ()| {
        // Scroll events arrive continuously; only take a write guard when a
        // page can actually be requested.
        if !controller.peek().accepts_trigger() {
            return;
        }
        let Some(request) = controller.write().trigger() else {
            return;
        };
        let services = services.clone();
        spawn(async move {
            let outcome = load_page(&services, &request).await;
            if let Err(err) = &outcome {
                warn!(page = request.page, %err, "page load failed");
            }
            match controller.write().resolve(&request, outcome) {
                Resolution::Stale => {
                    debug!(page = request.page, "discarded page from a previous selection")
                }
                Resolution::Appended(count) => debug!(page = request.page, count, "page appended"),
                Resolution::Exhausted | Resolution::Failed => {}
            }
        });
    });

    // A new tab or query starts over from page 1.
    use_effect(move || {
        let scope = BrowseScope::from_selection(kind, category(), &debounced_query());
        let unchanged = {
            let current = controller.peek();
            current.scope() == &scope && *current.state() != ListState::Idle
        };
        if unchanged {
            return;
        }
        controller.write().reset(scope);
        load_next.call(());
    });

    #[cfg(target_arch = "wasm32")]
    {
        // Detached when the browser unmounts and the hook value is dropped.
        let _scroll_listener = use_hook(move || {
            std::rc::Rc::new(crate::paging::WindowScrollListener::attach(load_next))
        });
    }

    // Desktop renders in a webview without web-sys; scroll positions come
    // back over an eval channel instead.
    #[cfg(not(target_arch = "wasm32"))]
    use_future(move || crate::paging::watch_document_scroll(load_next));

    let (items, state) = {
        let list = controller.read();
        (list.items().to_vec(), list.state().clone())
    };
    let active_category = category();
    let tab_entries: Vec<(&'static str, CatalogCategory, &'static str)> = tabs
        .into_iter()
        .map(|(label, tab)| {
            let class = if tab == active_category && search_input().trim().is_empty() {
                TAB_ACTIVE_CLASS
            } else {
                TAB_IDLE_CLASS
            };
            (label, tab, class)
        })
        .collect();
    let title = page_title(kind);
    let placeholder = format!("Search {}", title.to_lowercase());
    let has_items = !items.is_empty();
    // Catalog pages can repeat a title, so the position is part of the key.
    let cards: Vec<(String, MediaItem)> = items
        .into_iter()
        .enumerate()
        .map(|(index, item)| (format!("{index}-{}", item.id), item))
        .collect();

    rsx! {
        div { class: "space-y-8",
            header { class: "page-header gap-4",
                h1 { class: "page-title", "{title}" }

                div { class: "flex flex-col gap-3 md:flex-row md:items-center md:justify-between",
                    div { class: "flex gap-2 overflow-x-auto pb-1",
                        for (label, tab, class) in tab_entries {
                            button {
                                key: "{label}",
                                class: "{class}",
                                onclick: move |_| {
                                    search_input.set(String::new());
                                    debounced_query.set(String::new());
                                    category.set(tab.clone());
                                },
                                "{label}"
                            }
                        }
                    }
                    div { class: "relative w-full md:max-w-xs",
                        Icon {
                            name: "search".to_string(),
                            class: "absolute left-3 top-1/2 -translate-y-1/2 w-4 h-4 text-zinc-500".to_string(),
                        }
                        input {
                            class: "w-full pl-10 pr-4 py-2.5 bg-zinc-800/50 border border-zinc-700/50 rounded-xl text-sm text-white placeholder:text-zinc-500 focus:outline-none focus:border-emerald-500/50 focus:ring-2 focus:ring-emerald-500/20",
                            placeholder: "{placeholder}",
                            value: search_input,
                            oninput: move |e| search_input.set(e.value()),
                        }
                    }
                }
            }

            if has_items {
                div { class: "grid grid-cols-2 sm:grid-cols-3 md:grid-cols-4 lg:grid-cols-5 xl:grid-cols-6 gap-4",
                    for (card_key, item) in cards {
                        MediaCard {
                            key: "{card_key}",
                            item: item,
                            on_added: move |id: CatalogId| {
                                controller.write().mark_added(id);
                            },
                        }
                    }
                }
            }

            {match state {
                ListState::Loading => rsx! {
                    div { class: "flex items-center justify-center py-12",
                        Icon { name: "loader".to_string(), class: "w-8 h-8 text-zinc-500".to_string() }
                    }
                },
                ListState::Failed(message) => rsx! {
                    div { class: "flex flex-col items-center justify-center gap-3 py-12 text-center",
                        Icon { name: "alert".to_string(), class: "w-10 h-10 text-red-400".to_string() }
                        p { class: "text-red-300", "{message}" }
                        button {
                            class: "px-4 py-2 rounded-full bg-zinc-800/50 text-zinc-300 hover:text-white text-sm font-medium transition-colors",
                            onclick: move |_| {
                                let scope = controller.peek().scope().clone();
                                controller.write().reset(scope);
                                load_next.call(());
                            },
                            "Try again"
                        }
                    }
                },
                ListState::Exhausted if has_items => rsx! {
                    p { class: "py-8 text-center text-sm text-zinc-500", "No more titles" }
                },
                ListState::Exhausted => rsx! {
                    div { class: "flex flex-col items-center justify-center py-20",
                        Icon { name: "film".to_string(), class: "w-16 h-16 text-zinc-600 mb-4".to_string() }
                        p { class: "text-zinc-400", "No titles found" }
                    }
                },
                ListState::Ready => rsx! {
                    div { class: "flex justify-center py-8",
                        button {
                            class: "px-6 py-2.5 rounded-full bg-zinc-800/50 text-zinc-300 hover:text-white hover:bg-zinc-800 text-sm font-medium transition-colors",
                            onclick: move |_| load_next.call(()),
                            "Load more"
                        }
                    }
                },
                ListState::Idle => rsx! {},
            }}
        }
    }
}
