//! Browser PDF viewer with a snip overlay.
//!
//! SYSTEM CONTEXT
//! ==============
//! The page is shown by the browser's built-in viewer through an `<object>`
//! element addressed with `#page=N&zoom=P`. Pointer events over an `<object>`
//! never reach the page, so while snip mode is armed a transparent overlay
//! covers the viewer and captures the gesture.

use leptos::prelude::*;

use crate::state::workspace::WorkspaceState;
use crate::util::snip::{SnipRect, ViewerGeometry};

#[component]
pub fn PdfViewer(workspace: RwSignal<WorkspaceState>, on_snipped: Callback<Option<i64>>) -> impl IntoView {
    let viewer = NodeRef::<leptos::html::Div>::new();
    let live = RwSignal::new(None::<SnipRect>);

    let geometry = move || -> Option<ViewerGeometry> {
        #[cfg(feature = "hydrate")]
        {
            viewer.get_untracked().map(|el| measure(&el))
        }
        #[cfg(not(feature = "hydrate"))]
        {
            None
        }
    };

    let on_mouse_down = move |ev: leptos::ev::MouseEvent| {
        let Some(geometry) = geometry() else {
            return;
        };
        let (x, y) = (f64::from(ev.client_x()), f64::from(ev.client_y()));
        let started = workspace.try_update(|w| w.snip.press(&geometry, x, y)).unwrap_or(false);
        if started {
            ev.prevent_default();
            live.set(workspace.with_untracked(|w| w.snip.live_rect()));
        }
    };
    let on_mouse_move = move |ev: leptos::ev::MouseEvent| {
        if !workspace.with_untracked(|w| w.snip.is_dragging()) {
            return;
        }
        let Some(geometry) = geometry() else {
            return;
        };
        let (x, y) = (f64::from(ev.client_x()), f64::from(ev.client_y()));
        live.set(workspace.try_update(|w| w.snip.drag(&geometry, x, y)).flatten());
    };
    let on_mouse_up = move |ev: leptos::ev::MouseEvent| {
        if !workspace.with_untracked(|w| w.snip.is_dragging()) {
            return;
        }
        let Some(geometry) = geometry() else {
            return;
        };
        let (x, y) = (f64::from(ev.client_x()), f64::from(ev.client_y()));
        live.set(None);
        let added = workspace
            .try_update(|w| w.snip.release(&geometry, x, y).and_then(|rect| w.add_snip(rect)))
            .flatten();
        on_snipped.run(added);
    };

    let src = move || {
        workspace.with(|w| {
            w.pdf_url
                .as_ref()
                .map(|url| format!("{url}#page={}&zoom={}", w.current_page, w.zoom_percent()))
        })
    };

    view! {
        <div
            class="pdf-viewer"
            class:pdf-viewer--snipping=move || workspace.with(|w| w.snip.is_armed())
            node_ref=viewer
        >
            {move || match src() {
                Some(data) => {
                    view! {
                        <object class="pdf-viewer__object" data=data type="application/pdf">
                            <p>"This browser cannot display PDFs inline."</p>
                        </object>
                    }
                        .into_any()
                }
                None => view! { <p class="pdf-viewer__empty">"No PDF loaded."</p> }.into_any(),
            }}
            <Show when=move || workspace.with(|w| w.snip.is_armed())>
                <div
                    class="pdf-viewer__overlay"
                    on:mousedown=on_mouse_down
                    on:mousemove=on_mouse_move
                    on:mouseup=on_mouse_up
                >
                    {move || {
                        live.get()
                            .map(|rect| {
                                view! {
                                    <div
                                        class="pdf-viewer__snip"
                                        style:left=format!("{}px", rect.x)
                                        style:top=format!("{}px", rect.y)
                                        style:width=format!("{}px", rect.width)
                                        style:height=format!("{}px", rect.height)
                                    ></div>
                                }
                            })
                    }}
                </div>
            </Show>
        </div>
    }
}

#[cfg(feature = "hydrate")]
fn measure(element: &web_sys::HtmlDivElement) -> ViewerGeometry {
    let rect = element.get_bounding_client_rect();
    ViewerGeometry {
        left: rect.left(),
        top: rect.top(),
        width: rect.width(),
        height: rect.height(),
        scroll_left: f64::from(element.scroll_left()),
        scroll_top: f64::from(element.scroll_top()),
        client_width: f64::from(element.client_width()),
        client_height: f64::from(element.client_height()),
    }
}
