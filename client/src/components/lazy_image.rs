//! Image whose signed URL is fetched the first time it scrolls into view.
//!
//! DESIGN
//! ======
//! One `IntersectionObserver` per instance with a 10% threshold. The first
//! crossing moves [`LoadState`] to `Loading`, disconnects the observer and
//! issues exactly one `get_img_signed_url` request. A failed request leaves
//! the placeholder in place; there is no retry.

use leptos::prelude::*;

use crate::util::lazy_image::LoadState;

#[component]
pub fn LazyImage(image_id: i64, #[prop(into, optional)] alt: String) -> impl IntoView {
    let state = RwSignal::new(LoadState::default());
    let host = NodeRef::<leptos::html::Div>::new();

    #[cfg(feature = "hydrate")]
    observe(host, state, image_id);
    #[cfg(not(feature = "hydrate"))]
    let _ = image_id;

    view! {
        <div class="lazy-image" node_ref=host>
            <img
                class="lazy-image__img"
                class:lazy-image__img--loading=move || matches!(state.get(), LoadState::Loading)
                src=move || state.with(|s| s.src().to_owned())
                alt=alt
            />
        </div>
    }
}

#[cfg(feature = "hydrate")]
type ObserverCallback = wasm_bindgen::closure::Closure<dyn FnMut(js_sys::Array, web_sys::IntersectionObserver)>;

#[cfg(feature = "hydrate")]
fn observe(host: NodeRef<leptos::html::Div>, state: RwSignal<LoadState>, image_id: i64) {
    use wasm_bindgen::JsCast;
    use wasm_bindgen::closure::Closure;

    use crate::util::lazy_image::VISIBILITY_THRESHOLD;
    use crate::util::lifetime::CancelToken;

    let token = CancelToken::for_owner();
    let slot = StoredValue::new_local(None::<(web_sys::IntersectionObserver, ObserverCallback)>);

    Effect::new(move || {
        let Some(element) = host.get() else {
            return;
        };
        if slot.with_value(Option::is_some) || !state.get_untracked().should_observe() {
            return;
        }
        let token = token.clone();
        let callback: ObserverCallback = Closure::new(
            move |entries: js_sys::Array, observer: web_sys::IntersectionObserver| {
                let ratio = entries
                    .iter()
                    .filter_map(|entry| entry.dyn_into::<web_sys::IntersectionObserverEntry>().ok())
                    .map(|entry| entry.intersection_ratio())
                    .fold(0.0, f64::max);
                let mut fire = false;
                state.update(|s| fire = s.on_visibility(ratio));
                if !fire {
                    return;
                }
                observer.disconnect();
                let token = token.clone();
                leptos::task::spawn_local(async move {
                    let url = match crate::net::api::image_signed_url(image_id).await {
                        Ok(url) => Some(url),
                        Err(e) => {
                            log::warn!("signed url for image {image_id} failed: {e}");
                            None
                        }
                    };
                    if token.is_live() {
                        state.update(|s| s.finish(url));
                    }
                });
            },
        );
        let init = web_sys::IntersectionObserverInit::new();
        init.set_threshold(&wasm_bindgen::JsValue::from_f64(VISIBILITY_THRESHOLD));
        match web_sys::IntersectionObserver::new_with_options(callback.as_ref().unchecked_ref(), &init) {
            Ok(observer) => {
                observer.observe(&element);
                slot.set_value(Some((observer, callback)));
            }
            Err(_) => log::warn!("IntersectionObserver unavailable; image {image_id} stays a placeholder"),
        }
    });

    on_cleanup(move || {
        if let Some(Some((observer, _callback))) = slot.try_update_value(Option::take) {
            observer.disconnect();
        }
    });
}
