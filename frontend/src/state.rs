use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::analysis::AnalysisState;
use crate::api;
use crate::conversation::Conversation;
use crate::models::{Mode, ModeConfig, Rating};

/// Shared application state, provided via Leptos context.
#[derive(Clone, Copy)]
pub struct AppState {
    // --- Read signals (for components to subscribe to) ---
    pub modes: ReadSignal<Vec<ModeConfig>>,
    pub current_mode: ReadSignal<Mode>,
    pub sidebar_open: ReadSignal<bool>,
    pub conversation: ReadSignal<Conversation>,
    pub analysis: ReadSignal<AnalysisState>,
    pub error: ReadSignal<Option<String>>,

    // --- Write signals (for mutating state) ---
    pub set_modes: WriteSignal<Vec<ModeConfig>>,
    pub set_current_mode: WriteSignal<Mode>,
    pub set_sidebar_open: WriteSignal<bool>,
    pub set_conversation: WriteSignal<Conversation>,
    pub set_analysis: WriteSignal<AnalysisState>,
    pub set_error: WriteSignal<Option<String>>,
}

impl AppState {
    /// Create a new `AppState` and provide it in the current Leptos context.
    pub fn provide() -> Self {
        let initial_mode = Mode::default();
        let (modes, set_modes) = signal(Vec::<ModeConfig>::new());
        let (current_mode, set_current_mode) = signal(initial_mode);
        let (sidebar_open, set_sidebar_open) = signal(false);
        let (conversation, set_conversation) = signal(Conversation::new(initial_mode));
        let (analysis, set_analysis) = signal(AnalysisState::default());
        let (error, set_error) = signal(None::<String>);

        let state = Self {
            modes,
            current_mode,
            sidebar_open,
            conversation,
            analysis,
            error,
            set_modes,
            set_current_mode,
            set_sidebar_open,
            set_conversation,
            set_analysis,
            set_error,
        };

        provide_context(state);
        state
    }

    /// Load the mode registry from the backend.
    pub fn load_modes(&self) {
        let state = *self;
        spawn_local(async move {
            match api::fetch_modes().await {
                Ok(modes) => {
                    state.set_modes.set(modes);
                    state.set_error.set(None);
                }
                Err(e) => {
                    log::error!("Failed to fetch modes: {e}");
                    state.set_error.set(Some(e.to_string()));
                }
            }
        });
    }

    /// Configuration of the active mode, once the registry has loaded.
    pub fn current_config(&self) -> Option<ModeConfig> {
        let mode = self.current_mode.get();
        self.modes.with(|modes| modes.iter().find(|m| m.id == mode).cloned())
    }

    /// Switch to `mode`. Picking the active mode again only closes the sidebar.
    pub fn select_mode(&self, mode: Mode) {
        self.set_sidebar_open.set(false);
        if self.current_mode.get_untracked() == mode {
            return;
        }
        log::debug!("Switching to mode {mode:?}");
        self.set_current_mode.set(mode);
        self.set_conversation.update(|c| c.switch_mode(mode));
        self.set_analysis.update(|a| a.reset());
    }

    pub fn set_draft(&self, text: String) {
        self.set_conversation.update(|c| c.set_draft(text));
    }

    pub fn attach_image(&self, data_url: String) {
        self.set_conversation.update(|c| c.stage_image(data_url));
    }

    pub fn remove_image(&self) {
        self.set_conversation.update(|c| c.clear_image());
    }

    /// Send the current draft (and staged image) and append the reply when it
    /// arrives.
    pub fn send_message(&self) {
        let mut request = None;
        self.set_conversation.update(|c| request = c.submit());
        let Some(request) = request else {
            return;
        };

        let set_conversation = self.set_conversation;
        spawn_local(async move {
            let text = api::generate_reply(&request).await;
            set_conversation.update(move |c| {
                if !c.receive_reply(request.ticket, text) {
                    log::debug!("Discarding reply for a conversation that was reset");
                }
            });
        });
    }

    pub fn rate(&self, message_id: String, rating: Rating) {
        self.set_conversation.update(|c| {
            if let Err(e) = c.rate(&message_id, rating) {
                log::warn!("Rating rejected: {e}");
            }
        });
    }

    pub fn comment(&self, message_id: String, comment: String) {
        self.set_conversation.update(|c| {
            if let Err(e) = c.set_comment(&message_id, &comment) {
                log::warn!("Comment rejected: {e}");
            }
        });
    }

    pub fn set_analysis_input(&self, text: String) {
        self.set_analysis.update(|a| a.set_input(text));
    }

    /// Analyse the pasted data and replace the displayed report.
    pub fn run_analysis(&self) {
        let mut started = None;
        self.set_analysis.update(|a| started = a.start());
        let Some((ticket, data)) = started else {
            return;
        };

        let set_analysis = self.set_analysis;
        spawn_local(async move {
            let result = api::analyze_data(data).await;
            set_analysis.update(move |a| {
                if !a.finish(ticket, result) {
                    log::debug!("Discarding analysis for a view that was reset");
                }
            });
        });
    }
}
