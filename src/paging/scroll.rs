/// Distance from the bottom of the document, in CSS pixels, at which the next
/// page is requested.
pub const NEAR_BOTTOM_THRESHOLD: f64 = 100.0;

pub fn near_bottom(viewport_height: f64, scroll_top: f64, document_height: f64) -> bool {
    if !(viewport_height.is_finite() && scroll_top.is_finite() && document_height.is_finite()) {
        return false;
    }
    viewport_height + scroll_top >= document_height - NEAR_BOTTOM_THRESHOLD
}

#[cfg(target_arch = "wasm32")]
pub use web::WindowScrollListener;

#[cfg(not(target_arch = "wasm32"))]
pub use native::watch_document_scroll;

#[cfg(not(target_arch = "wasm32"))]
mod native {
    use super::near_bottom;
    use dioxus::prelude::*;
    use tracing::debug;

    // Replaces any handler left behind by an earlier browser so only the
    // mounted one is fed.
    const SCROLL_BRIDGE_JS: &str = r#"
        if (window.__scoutarrScroll) {
            window.removeEventListener('scroll', window.__scoutarrScroll);
        }
        window.__scoutarrScroll = () => dioxus.send([
            window.innerHeight,
            window.scrollY,
            document.documentElement.scrollHeight,
        ]);
        window.addEventListener('scroll', window.__scoutarrScroll, { passive: true });
        await new Promise(() => {});
    "#;

    /// Feeds webview scroll positions through `near_bottom` until the eval
    /// channel closes. Meant to run as a component-scoped future.
    pub async fn watch_document_scroll(on_near_bottom: Callback<()>) {
        let mut eval = document::eval(SCROLL_BRIDGE_JS);
        while let Ok((viewport, scroll_top, document_height)) =
            eval.recv::<(f64, f64, f64)>().await
        {
            if near_bottom(viewport, scroll_top, document_height) {
                on_near_bottom.call(());
            }
        }
        debug!("scroll bridge closed");
    }

}

#[cfg(target_arch = "wasm32")]
mod web {
    use super::near_bottom;
    use dioxus::core::{Runtime, RuntimeGuard};
    use dioxus::prelude::*;
    use wasm_bindgen::closure::Closure;
    use wasm_bindgen::JsCast;
    use web_sys::window;

    /// Calls `on_near_bottom` whenever a window scroll lands within the
    /// threshold. The listener is detached when this value is dropped.
    pub struct WindowScrollListener {
        callback: Closure<dyn FnMut()>,
    }

    impl WindowScrollListener {
        pub fn attach(on_near_bottom: Callback<()>) -> Option<Self> {
            let win = window()?;
            let runtime = Runtime::current();

            let callback = Closure::wrap(Box::new(move || {
                let _guard = RuntimeGuard::new(runtime.clone());
                let Some(win) = window() else {
                    return;
                };
                let viewport = win
                    .inner_height()
                    .ok()
                    .and_then(|v| v.as_f64())
                    .unwrap_or(0.0);
                let scroll_top = win.scroll_y().unwrap_or(0.0);
                let document_height = win
                    .document()
                    .and_then(|doc| doc.document_element())
                    .map(|el| el.scroll_height() as f64)
                    .unwrap_or(0.0);

                if near_bottom(viewport, scroll_top, document_height) {
                    on_near_bottom.call(());
                }
            }) as Box<dyn FnMut()>);

            win.add_event_listener_with_callback("scroll", callback.as_ref().unchecked_ref())
                .ok()?;
            Some(Self { callback })
        }
    }

    impl Drop for WindowScrollListener {
        fn drop(&mut self) {
            if let Some(win) = window() {
                let _ = win.remove_event_listener_with_callback(
                    "scroll",
                    self.callback.as_ref().unchecked_ref(),
                );
            }
        }
    }
}
