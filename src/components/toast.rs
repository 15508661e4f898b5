use crate::components::Icon;
use dioxus::core::spawn_forever;
use dioxus::prelude::*;

const TOAST_AUTO_HIDE_MS: u64 = 6_000;

#[cfg(not(target_arch = "wasm32"))]
async fn toast_delay_ms(ms: u64) {
    tokio::time::sleep(std::time::Duration::from_millis(ms)).await;
}

#[cfg(target_arch = "wasm32")]
async fn toast_delay_ms(ms: u64) {
    gloo_timers::future::TimeoutFuture::new(ms as u32).await;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToastSeverity {
    Success,
    Error,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Toast {
    pub id: u64,
    pub message: String,
    pub severity: ToastSeverity,
}

/// Shared handle for the single visible notification. A newer toast replaces
/// the current one and restarts the hide timer.
#[derive(Clone, Copy, PartialEq)]
pub struct ToastController {
    pub current: Signal<Option<Toast>>,
    next_id: Signal<u64>,
}

impl ToastController {
    pub fn new(current: Signal<Option<Toast>>, next_id: Signal<u64>) -> Self {
        Self { current, next_id }
    }

    pub fn success(&mut self, message: impl Into<String>) {
        self.show(message.into(), ToastSeverity::Success);
    }

    pub fn error(&mut self, message: impl Into<String>) {
        self.show(message.into(), ToastSeverity::Error);
    }

    fn show(&mut self, message: String, severity: ToastSeverity) {
        self.next_id.with_mut(|value| *value = value.saturating_add(1));
        let id = *self.next_id.peek();
        self.current.set(Some(Toast {
            id,
            message,
            severity,
        }));

        // The timer outlives the component that raised the toast.
        let mut current = self.current;
        let _ = spawn_forever(async move {
            toast_delay_ms(TOAST_AUTO_HIDE_MS).await;
            let still_showing = current.peek().as_ref().map(|toast| toast.id) == Some(id);
            if still_showing {
                current.set(None);
            }
        });
    }

    pub fn dismiss(&mut self) {
        self.current.set(None);
    }
}

#[component]
pub fn ToastHost() -> Element {
    let mut toasts = use_context::<ToastController>();
    let Some(toast) = (toasts.current)() else {
        return rsx! {};
    };

    let (tone, icon) = match toast.severity {
        ToastSeverity::Success => ("bg-emerald-500/15 border-emerald-500/40 text-emerald-300", "check"),
        ToastSeverity::Error => ("bg-red-500/15 border-red-500/40 text-red-300", "x"),
    };

    rsx! {
        div { class: "fixed bottom-6 left-1/2 -translate-x-1/2 z-50 px-4 w-full max-w-md",
            div {
                class: "flex items-center gap-3 px-4 py-3 rounded-xl border shadow-xl backdrop-blur {tone}",
                role: "status",
                Icon { name: icon.to_string(), class: "w-5 h-5 shrink-0".to_string() }
                p { class: "flex-1 text-sm", "{toast.message}" }
                button {
                    class: "text-zinc-400 hover:text-white transition-colors",
                    aria_label: "Dismiss",
                    onclick: move |_| toasts.dismiss(),
                    Icon { name: "x".to_string(), class: "w-4 h-4".to_string() }
                }
            }
        }
    }
}
