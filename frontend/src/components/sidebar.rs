use leptos::prelude::*;

use crate::state::AppState;

/// Sidebar with branding and the mode selector.
#[component]
pub fn Sidebar() -> impl IntoView {
    let state = expect_context::<AppState>();

    view! {
        <aside class="sidebar" class:open=move || state.sidebar_open.get()>
            <div class="sidebar-header">
                <div class="brand-mark">"🤖"</div>
                <div>
                    <h1>"BizG"</h1>
                    <p class="brand-tagline">"Enterprise Assistant"</p>
                </div>
                <button class="close-btn" on:click=move |_| state.set_sidebar_open.set(false)>
                    "✕"
                </button>
            </div>
            <nav class="mode-list">
                <For
                    each=move || state.modes.get()
                    key=|m| m.id
                    let:mode
                >
                    {
                        let id = mode.id;
                        view! {
                            <button
                                class="mode-item"
                                class:active=move || state.current_mode.get() == id
                                on:click=move |_| state.select_mode(id)
                            >
                                <span class="mode-icon">{mode.icon.glyph()}</span>
                                <span>{mode.label.clone()}</span>
                            </button>
                        }
                    }
                </For>
            </nav>
            <div class="sidebar-footer">
                <p>"Powered by Google Gemini"</p>
            </div>
        </aside>
    }
}
