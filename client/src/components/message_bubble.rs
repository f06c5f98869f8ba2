//! One chat message, rendered as markdown, reporting its height upward.
//!
//! The bubble measures its own box after every mount; the virtual list keys
//! rows by message id and content, so a content change remounts the bubble
//! and produces a fresh measurement.

use leptos::prelude::*;

use crate::components::image_carousel::ImageCarousel;
use crate::net::types::{Message, Sender};
use crate::util::markdown::render_html;
use crate::util::time_format::format_time;

#[component]
pub fn MessageBubble(
    message: Message,
    index: usize,
    on_height: Callback<(usize, f64)>,
    on_copy: Option<Callback<String>>,
    on_save_note: Option<Callback<String>>,
) -> impl IntoView {
    let node = NodeRef::<leptos::html::Div>::new();

    Effect::new(move || {
        let Some(element) = node.get() else {
            return;
        };
        #[cfg(feature = "hydrate")]
        {
            let height = element.get_bounding_client_rect().height();
            on_height.run((index, height));
        }
        #[cfg(not(feature = "hydrate"))]
        let _ = (element, index, on_height);
    });

    let is_ai = message.sender == Sender::Ai;
    let html = render_html(&message.content);
    let time = format_time(&message.timestamp);
    let images = message.images_ids.clone();
    let content = message.content.clone();
    let id = message.id.clone();

    view! {
        <div
            class="bubble"
            class:bubble--ai=is_ai
            class:bubble--user=!is_ai
            node_ref=node
        >
            <div class="bubble__body" inner_html=html></div>
            {(!images.is_empty()).then(|| view! { <ImageCarousel image_ids=images/> })}
            <div class="bubble__meta">
                <span class="bubble__time">{time}</span>
                {is_ai
                    .then(|| {
                        view! {
                            <span class="bubble__actions">
                                {on_copy
                                    .map(|cb| {
                                        let content = content.clone();
                                        view! {
                                            <button class="bubble__action" on:click=move |_| cb.run(content.clone())>
                                                "Copy"
                                            </button>
                                        }
                                    })}
                                {on_save_note
                                    .map(|cb| {
                                        let id = id.clone();
                                        view! {
                                            <button class="bubble__action" on:click=move |_| cb.run(id.clone())>
                                                "Save as note"
                                            </button>
                                        }
                                    })}
                            </span>
                        }
                    })}
            </div>
        </div>
    }
}
