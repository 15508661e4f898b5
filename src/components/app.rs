use crate::components::{nav_entries, view_label, AppView, Icon, ToastController, ToastHost};
use dioxus::prelude::*;

const NAV_ACTIVE_CLASS: &str =
    "flex items-center gap-2 px-3 py-2 rounded-lg bg-emerald-500/20 text-emerald-400 text-sm font-medium";
const NAV_IDLE_CLASS: &str = "flex items-center gap-2 px-3 py-2 rounded-lg text-zinc-400 hover:text-white hover:bg-zinc-800/50 text-sm font-medium transition-colors";

#[component]
pub fn AppShell() -> Element {
    let current_view = use_route::<AppView>();
    let toast_current = use_signal(|| None);
    let toast_ids = use_signal(|| 0u64);
    let toasts = ToastController::new(toast_current, toast_ids);

    use_context_provider(|| toasts);

    let entries: Vec<(AppView, &'static str, &'static str, &'static str)> = nav_entries()
        .into_iter()
        .map(|(view, icon)| {
            let label = view_label(&view);
            let class = if current_view == view {
                NAV_ACTIVE_CLASS
            } else {
                NAV_IDLE_CLASS
            };
            (view, icon, label, class)
        })
        .collect();

    rsx! {
        div { class: "min-h-screen bg-zinc-950 text-zinc-100",
            header { class: "sticky top-0 z-40 border-b border-zinc-800/60 bg-zinc-950/80 backdrop-blur",
                nav { class: "max-w-7xl mx-auto flex items-center gap-2 px-4 py-3 overflow-x-auto",
                    Link {
                        to: AppView::HomeView {},
                        class: "mr-4 text-lg font-semibold text-white whitespace-nowrap",
                        "Scoutarr"
                    }
                    for (view, icon, label, class) in entries {
                        Link {
                            key: "{label}",
                            to: view,
                            class: "{class}",
                            Icon { name: icon.to_string(), class: "w-4 h-4".to_string() }
                            "{label}"
                        }
                    }
                }
            }
            main { class: "max-w-7xl mx-auto px-4 py-8", Outlet::<AppView> {} }
            ToastHost {}
        }
    }
}
