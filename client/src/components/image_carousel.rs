//! Carousel over the images attached to an AI answer.

use leptos::prelude::*;

use crate::util::carousel::{Carousel, FetchTicket};
use crate::util::lazy_image::PLACEHOLDER_SRC;
use crate::util::lifetime::CancelToken;

#[component]
pub fn ImageCarousel(image_ids: Vec<i64>) -> impl IntoView {
    let carousel = RwSignal::new(Carousel::new(image_ids));
    let token = CancelToken::for_owner();

    let fetch = move |ticket: Option<FetchTicket>| {
        let Some(ticket) = ticket else {
            return;
        };
        let token = token.clone();
        #[cfg(feature = "hydrate")]
        leptos::task::spawn_local(async move {
            let url = match crate::net::api::image_signed_url(ticket.image_id).await {
                Ok(url) => Some(url),
                Err(e) => {
                    log::warn!("carousel image {} failed: {e}", ticket.image_id);
                    None
                }
            };
            if token.is_live() {
                carousel.update(|c| {
                    c.resolve(ticket, url);
                });
            }
        });
        #[cfg(not(feature = "hydrate"))]
        let _ = (ticket, token);
    };

    let initial = fetch.clone();
    Effect::new(move || {
        let ticket = carousel.try_update(Carousel::load_current).flatten();
        initial(ticket);
    });

    let on_prev = {
        let fetch = fetch.clone();
        move |_| fetch(carousel.try_update(Carousel::prev).flatten())
    };
    let on_next = {
        let fetch = fetch.clone();
        move |_| fetch(carousel.try_update(Carousel::next).flatten())
    };

    let count = carousel.with_untracked(Carousel::len);

    view! {
        <Show when=move || !carousel.with(Carousel::is_empty)>
            <div class="carousel">
                <div class="carousel__frame">
                    <img
                        class="carousel__img"
                        class:carousel__img--loading=move || carousel.with(Carousel::is_loading)
                        src=move || carousel.with(|c| c.url().unwrap_or(PLACEHOLDER_SRC).to_owned())
                        alt="Manual illustration"
                    />
                </div>
                {
                    let on_prev = on_prev.clone();
                    let on_next = on_next.clone();
                    let fetch = fetch.clone();
                    view! {
                <Show when=move || { count > 1 }>
                    <div class="carousel__controls">
                        <button class="carousel__btn" on:click=on_prev.clone()>"‹"</button>
                        <span class="carousel__counter">
                            {move || format!("{} / {count}", carousel.with(Carousel::index) + 1)}
                        </span>
                        <button class="carousel__btn" on:click=on_next.clone()>"›"</button>
                    </div>
                    <div class="carousel__dots">
                        {(0..count)
                            .map(|i| {
                                let fetch = fetch.clone();
                                view! {
                                    <button
                                        class="carousel__dot"
                                        class:carousel__dot--active=move || carousel.with(Carousel::index) == i
                                        on:click=move |_| fetch(carousel.try_update(|c| c.select(i)).flatten())
                                    ></button>
                                }
                            })
                            .collect_view()}
                    </div>
                </Show>
                    }
                }
            </div>
        </Show>
    }
}
