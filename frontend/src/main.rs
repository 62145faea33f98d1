mod analysis;
mod api;
mod chart;
mod components;
mod conversation;
mod files;
mod models;
mod state;

use leptos::mount::mount_to_body;
use leptos::prelude::*;

use components::analysis::AnalysisView;
use components::chat::ChatArea;
use components::sidebar::Sidebar;
use state::AppState;

/// Root application component.
#[component]
fn App() -> impl IntoView {
    let state = AppState::provide();

    // Load the mode registry on mount
    state.load_modes();

    view! {
        <div class="app-container">
            <Show when=move || state.sidebar_open.get()>
                <div class="overlay" on:click=move |_| state.set_sidebar_open.set(false)></div>
            </Show>
            <Sidebar />
            <main class="main-area">
                // Mobile header
                <header class="mobile-header">
                    <button class="menu-btn" on:click=move |_| state.set_sidebar_open.set(true)>
                        "☰"
                    </button>
                    <span>{move || state.current_config().map(|c| c.label).unwrap_or_default()}</span>
                </header>

                // Error banner
                {move || {
                    state.error.get().map(|err| {
                        view! {
                            <div class="error-banner">{err}</div>
                        }
                    })
                }}

                <ModeHeader />

                <div class="view-container">
                    {move || {
                        if state.current_mode.get().is_analysis() {
                            view! { <AnalysisView /> }.into_any()
                        } else {
                            view! { <ChatArea /> }.into_any()
                        }
                    }}
                </div>
            </main>
        </div>
    }
}

/// Glyph, label and description of the active mode.
#[component]
fn ModeHeader() -> impl IntoView {
    let state = expect_context::<AppState>();

    move || {
        state.current_config().map(|config| {
            view! {
                <div class="mode-header">
                    <div class="mode-header-icon">{config.icon.glyph()}</div>
                    <div>
                        <h2>{config.label}</h2>
                        <p>{config.description}</p>
                    </div>
                </div>
            }
        })
    }
}

fn main() {
    console_log::init_with_level(log::Level::Debug).expect("Failed to init logger");
    mount_to_body(App);
}
