//! Saved notes of the current conversation.

use leptos::prelude::*;

use crate::net::types::Note;
use crate::util::markdown::render_html;

#[component]
pub fn NotesPanel(notes: Signal<Vec<Note>>, on_delete: Callback<i64>) -> impl IntoView {
    view! {
        <aside class="notes">
            <h2 class="notes__title">"Notes"</h2>
            <Show
                when=move || notes.with(|n| !n.is_empty())
                fallback=|| view! { <p class="notes__empty">"No saved notes yet."</p> }
            >
                <ul class="notes__list">
                    <For
                        each=move || notes.get()
                        key=|note| note.id
                        children=move |note| {
                            let id = note.id;
                            view! {
                                <li class="notes__item">
                                    <div class="notes__item-head">
                                        <strong>{note.title.clone()}</strong>
                                        <button class="notes__delete" on:click=move |_| on_delete.run(id)>
                                            "Delete"
                                        </button>
                                    </div>
                                    <div class="notes__body" inner_html=render_html(&note.content)></div>
                                </li>
                            }
                        }
                    />
                </ul>
            </Show>
        </aside>
    }
}
