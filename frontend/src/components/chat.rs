use leptos::ev;
use leptos::html;
use leptos::prelude::*;
use web_sys::{HtmlInputElement, ScrollBehavior, ScrollIntoViewOptions};

use crate::files;
use crate::models::{ChatMessage, Rating, Role};
use crate::state::AppState;

/// Chat for the active mode: welcome state, message history and input.
#[component]
pub fn ChatArea() -> impl IntoView {
    let state = expect_context::<AppState>();
    let scroll_anchor: NodeRef<html::Div> = NodeRef::new();

    // Memos keep typing and feedback from rebuilding the list below.
    let message_ids = Memo::new(move |_| state.conversation.with(|c| c.message_ids()));
    let has_messages = Memo::new(move |_| message_ids.with(|ids| !ids.is_empty()));
    let awaiting = Memo::new(move |_| state.conversation.with(|c| c.is_awaiting()));
    let activity = Memo::new(move |_| state.conversation.with(|c| c.activity()));

    Effect::new(move |_| {
        activity.track();
        if let Some(anchor) = scroll_anchor.get() {
            let options = ScrollIntoViewOptions::new();
            options.set_behavior(ScrollBehavior::Smooth);
            anchor.scroll_into_view_with_scroll_into_view_options(&options);
        }
    });

    view! {
        <div class="chat-panel">
            {move || {
                if has_messages.get() {
                    view! {
                        <div class="messages-container">
                            <For each=move || message_ids.get() key=|id| id.clone() let:id>
                                <MessageBubble message_id=id />
                            </For>
                            <Show when=move || awaiting.get()>
                                <div class="message assistant">
                                    <div class="avatar">"🤖"</div>
                                    <div class="bubble thinking">"BizG is thinking..."</div>
                                </div>
                            </Show>
                            <div class="scroll-anchor" node_ref=scroll_anchor></div>
                        </div>
                    }
                        .into_any()
                } else {
                    let config = state.current_config();
                    let label = config.as_ref().map(|c| c.label.clone()).unwrap_or_default();
                    let description = config.map(|c| c.description).unwrap_or_default();
                    view! {
                        <div class="empty-state">
                            <div class="empty-icon">"✨"</div>
                            <h3>{format!("How can I help with {label}?")}</h3>
                            <p>{description}</p>
                        </div>
                    }
                        .into_any()
                }
            }}

            <ChatInput />
        </div>
    }
}

/// A single chat message bubble, with feedback controls on assistant replies.
/// Content is fixed once appended, so it is read without subscribing.
#[component]
fn MessageBubble(message_id: String) -> impl IntoView {
    let state = expect_context::<AppState>();
    let message = state.conversation.with_untracked(|c| c.message(&message_id).cloned());

    message.map(|message: ChatMessage| {
        let is_bot = message.role == Role::Assistant;
        let css_class = if is_bot { "message assistant" } else { "message user" };

        view! {
            <div class=css_class>
                <div class="avatar">{if is_bot { "🤖" } else { "🙂" }}</div>
                <div class="message-body">
                    <div class="bubble">
                        {message.image.map(|src| view! {
                            <img class="message-image" src=src alt="Uploaded content" />
                        })}
                        <div class="message-text">{message.content}</div>
                    </div>
                    {is_bot.then(|| view! { <FeedbackControls message_id=message.id /> })}
                </div>
            </div>
        }
    })
}

/// Thumbs up/down plus an optional comment once the reply has been rated.
#[component]
fn FeedbackControls(message_id: String) -> impl IntoView {
    let state = expect_context::<AppState>();

    let feedback = {
        let id = message_id.clone();
        Memo::new(move |_| state.conversation.with(|c| c.feedback_for(&id)))
    };
    let rating = move || feedback.get().map(|f| f.rating);
    let saved_comment = move || feedback.get().and_then(|f| f.comment);

    let (show_input, set_show_input) = signal(false);
    let (comment_text, set_comment_text) = signal(String::new());

    let rate = {
        let id = message_id.clone();
        move |value: Rating| {
            let had_comment = saved_comment().is_some();
            state.rate(id.clone(), value);
            if !had_comment {
                set_show_input.set(true);
            }
        }
    };
    let rate_up = rate.clone();
    let rate_down = rate;

    let submit_comment = {
        let id = message_id;
        move || {
            if feedback.get_untracked().is_none() {
                return;
            }
            let text = comment_text.get_untracked();
            if text.trim().is_empty() {
                set_show_input.set(false);
            }
            state.comment(id.clone(), text);
        }
    };
    let submit_on_enter = submit_comment.clone();

    let toggle_input = move |_: ev::MouseEvent| {
        if !show_input.get_untracked() {
            set_comment_text.set(saved_comment().unwrap_or_default());
        }
        set_show_input.update(|open| *open = !*open);
    };

    view! {
        <div class="feedback">
            <div class="feedback-row">
                <button
                    class="rate-btn"
                    class:positive=move || rating() == Some(Rating::Positive)
                    title="Helpful"
                    on:click=move |_| rate_up(Rating::Positive)
                >
                    "👍"
                </button>
                <button
                    class="rate-btn"
                    class:negative=move || rating() == Some(Rating::Negative)
                    title="Not helpful"
                    on:click=move |_| rate_down(Rating::Negative)
                >
                    "👎"
                </button>
                {move || {
                    rating().is_some().then(|| {
                        let label = if saved_comment().is_some() { "Edit comment" } else { "Add comment" };
                        view! {
                            <button class="comment-toggle" on:click=toggle_input>
                                {label}
                            </button>
                        }
                    })
                }}
            </div>

            <Show when=move || show_input.get() && rating().is_some()>
                <input
                    class="comment-input"
                    type="text"
                    placeholder="Provide additional feedback (optional)..."
                    prop:value=move || comment_text.get()
                    on:input=move |ev| set_comment_text.set(event_target_value(&ev))
                    on:blur={
                        let submit = submit_comment.clone();
                        move |_| submit()
                    }
                    on:keydown={
                        let submit = submit_on_enter.clone();
                        move |ev: ev::KeyboardEvent| {
                            if ev.key() == "Enter" {
                                submit();
                            }
                        }
                    }
                />
            </Show>

            {move || {
                if show_input.get() {
                    return None;
                }
                saved_comment().map(|comment| {
                    view! { <div class="saved-comment">{format!("\"{comment}\"")}</div> }
                })
            }}
        </div>
    }
}

/// Input row: image attach/preview, textarea and send button.
#[component]
fn ChatInput() -> impl IntoView {
    let state = expect_context::<AppState>();
    let file_input: NodeRef<html::Input> = NodeRef::new();

    let can_send = move || state.conversation.with(|c| c.can_submit());
    let placeholder = move || state.current_config().map(|c| c.placeholder).unwrap_or_default();

    let on_keydown = move |ev: ev::KeyboardEvent| {
        if ev.key() == "Enter" && !ev.shift_key() {
            ev.prevent_default();
            state.send_message();
        }
    };

    let on_file_change = move |ev: ev::Event| {
        let input = event_target::<HtmlInputElement>(&ev);
        if let Some(file) = input.files().and_then(|files| files.get(0)) {
            if let Err(e) = files::read_as_data_url(&file, move |data_url| state.attach_image(data_url)) {
                log::error!("{e}");
            }
        }
        // Allow picking the same file again.
        input.set_value("");
    };

    view! {
        <div class="input-area">
            {move || {
                state.conversation.with(|c| c.staged_image().map(str::to_string)).map(|src| {
                    view! {
                        <div class="image-preview">
                            <img src=src alt="Preview" />
                            <button class="remove-image" on:click=move |_| state.remove_image()>
                                "✕"
                            </button>
                        </div>
                    }
                })
            }}

            <div class="input-row">
                <input
                    type="file"
                    accept="image/*"
                    class="hidden"
                    node_ref=file_input
                    on:change=on_file_change
                />
                <button
                    class="attach-btn"
                    title="Upload image"
                    on:click=move |_| {
                        if let Some(input) = file_input.get() {
                            input.click();
                        }
                    }
                >
                    "🖼"
                </button>
                <textarea
                    rows="1"
                    placeholder=placeholder
                    prop:value=move || state.conversation.with(|c| c.draft().to_string())
                    on:input=move |ev| state.set_draft(event_target_value(&ev))
                    on:keydown=on_keydown
                />
                <button
                    class="send-btn"
                    on:click=move |_| state.send_message()
                    disabled=move || !can_send()
                >
                    {move || {
                        if state.conversation.with(|c| c.is_awaiting()) { "Sending…" } else { "Send" }
                    }}
                </button>
            </div>
            <p class="disclaimer">"BizG can make mistakes. Please verify important information."</p>
        </div>
    }
}
