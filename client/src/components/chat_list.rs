//! Virtualized chat transcript.
//!
//! SYSTEM CONTEXT
//! ==============
//! Geometry lives in [`VirtualList`]; this component feeds it the message
//! sequence, scroll position and bubble measurements, and positions the
//! visible rows absolutely inside a spacer of the total height.
//!
//! DESIGN
//! ======
//! The viewport height is read from the container on mount, on every scroll
//! and on window resize, so a pane taller than the content renders every row.
//! A strictly longer message sequence scrolls to the end after
//! [`AUTO_SCROLL_DELAY_MS`], giving the new row one layout pass. Any other
//! change only invalidates the affected heights.

use leptos::prelude::*;

use crate::components::message_bubble::MessageBubble;
use crate::net::types::Message;
use crate::util::lifetime::CancelToken;
use crate::util::virtual_list::{AUTO_SCROLL_DELAY_MS, RowKey, VirtualList};

#[component]
pub fn ChatList(
    messages: Signal<Vec<Message>>,
    #[prop(optional)] on_copy: Option<Callback<String>>,
    #[prop(optional)] on_save_note: Option<Callback<String>>,
) -> impl IntoView {
    let list = RwSignal::new(VirtualList::default());
    let scroll_top = RwSignal::new(0.0_f64);
    let container = NodeRef::<leptos::html::Div>::new();
    let token = CancelToken::for_owner();

    let on_height = Callback::new(move |(index, height): (usize, f64)| {
        list.update(|l| {
            l.report_height(index, height);
        });
    });

    Effect::new(move || {
        if container.get().is_some() {
            measure_viewport(container, list);
        }
    });
    #[cfg(feature = "hydrate")]
    {
        let resize = window_event_listener(leptos::ev::resize, move |_| measure_viewport(container, list));
        on_cleanup(move || resize.remove());
    }

    Effect::new(move || {
        let outcome = messages.with(|m| list.try_update(|l| l.sync_messages(m)));
        let Some(outcome) = outcome else {
            return;
        };
        if outcome.should_auto_scroll() {
            schedule_scroll_to_end(container, list, token.clone());
        }
    });

    let on_scroll = move |_| {
        let Some(element) = container.get_untracked() else {
            return;
        };
        #[cfg(feature = "hydrate")]
        {
            let top = f64::from(element.scroll_top());
            let viewport = f64::from(element.client_height());
            scroll_top.set(top);
            list.update(|l| {
                l.set_viewport_height(viewport);
                l.on_scroll(top);
            });
        }
        #[cfg(not(feature = "hydrate"))]
        let _ = element;
    };

    let rows = move || {
        let range = list.with(|l| l.rendered_range(scroll_top.get()));
        messages.with(|all| {
            range
                .filter_map(|index| all.get(index).map(|message| (index, message.clone())))
                .collect::<Vec<_>>()
        })
    };

    view! {
        <div class="chat-list" node_ref=container on:scroll=on_scroll>
            <div
                class="chat-list__spacer"
                style:height=move || format!("{}px", list.with(VirtualList::total_height))
            >
                <For
                    each=rows
                    key=|(index, message)| (*index, RowKey::of(message).content_hash, message.id.clone())
                    children=move |(index, message)| {
                        view! {
                            <div
                                class="chat-list__row"
                                style:top=move || format!("{}px", list.with(|l| l.offset_of(index)))
                            >
                                <MessageBubble
                                    message=message
                                    index=index
                                    on_height=on_height
                                    on_copy=on_copy
                                    on_save_note=on_save_note
                                />
                            </div>
                        }
                    }
                />
            </div>
        </div>
    }
}

fn schedule_scroll_to_end(container: NodeRef<leptos::html::Div>, list: RwSignal<VirtualList>, token: CancelToken) {
    #[cfg(feature = "hydrate")]
    {
        gloo_timers::callback::Timeout::new(AUTO_SCROLL_DELAY_MS, move || {
            if !token.is_live() {
                return;
            }
            let Some(element) = container.get_untracked() else {
                return;
            };
            let viewport = f64::from(element.client_height());
            let target = list
                .try_update(|l| {
                    l.set_viewport_height(viewport);
                    l.scroll_to_end_offset(l.viewport_height())
                })
                .unwrap_or_default();
            #[allow(clippy::cast_possible_truncation)]
            element.set_scroll_top(target.ceil() as i32);
        })
        .forget();
    }
    #[cfg(not(feature = "hydrate"))]
    let _ = (container, list, token, AUTO_SCROLL_DELAY_MS);
}

fn measure_viewport(container: NodeRef<leptos::html::Div>, list: RwSignal<VirtualList>) {
    #[cfg(feature = "hydrate")]
    {
        let Some(element) = container.get_untracked() else {
            return;
        };
        let viewport = f64::from(element.client_height());
        if list.with_untracked(|l| (l.viewport_height() - viewport).abs() >= 0.5) {
            list.update(|l| {
                l.set_viewport_height(viewport);
            });
        }
    }
    #[cfg(not(feature = "hydrate"))]
    let _ = (container, list);
}
