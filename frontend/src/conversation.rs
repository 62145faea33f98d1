//! Chat state for the active mode.
//!
//! Pure state transitions only; the caller dispatches the [`ReplyRequest`]
//! returned by [`Conversation::submit`] and feeds the answer back through
//! [`Conversation::receive_reply`].

use chrono::Utc;
use thiserror::Error;

use crate::models::{ChatMessage, Feedback, Mode, Rating, Role};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FeedbackError {
    #[error("no message with id '{0}'")]
    UnknownMessage(String),
    #[error("message '{0}' was not written by the assistant")]
    NotAssistant(String),
    #[error("message '{0}' must be rated before it can be commented on")]
    NotRated(String),
}

/// Binds a reply to the conversation it was requested from. Tickets issued
/// before a mode switch no longer match.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReplyTicket {
    epoch: u64,
}

/// Everything needed to ask the server for the assistant's reply.
#[derive(Debug, Clone, PartialEq)]
pub struct ReplyRequest {
    pub ticket: ReplyTicket,
    pub mode: Mode,
    pub prompt: String,
    pub image: Option<String>,
}

/// What the bottom of the chat shows. Typing and feedback leave it unchanged;
/// new messages, the thinking indicator and a staged image change it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Activity {
    messages: usize,
    awaiting: bool,
    image_staged: bool,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Conversation {
    mode: Mode,
    messages: Vec<ChatMessage>,
    draft: String,
    staged_image: Option<String>,
    awaiting: bool,
    epoch: u64,
    next_seq: u64,
}

impl Conversation {
    pub fn new(mode: Mode) -> Self {
        Self { mode, ..Self::default() }
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    pub fn messages(&self) -> &[ChatMessage] {
        &self.messages
    }

    pub fn draft(&self) -> &str {
        &self.draft
    }

    pub fn staged_image(&self) -> Option<&str> {
        self.staged_image.as_deref()
    }

    pub fn is_awaiting(&self) -> bool {
        self.awaiting
    }

    /// Whether [`submit`](Self::submit) would send anything right now.
    pub fn can_submit(&self) -> bool {
        !self.awaiting && (!self.draft.trim().is_empty() || self.staged_image.is_some())
    }

    pub fn feedback_for(&self, id: &str) -> Option<Feedback> {
        self.message(id).and_then(|m| m.feedback.clone())
    }

    pub fn message(&self, id: &str) -> Option<&ChatMessage> {
        self.messages.iter().find(|m| m.id == id)
    }

    /// Ids in display order. Only submits, replies and mode switches change it.
    pub fn message_ids(&self) -> Vec<String> {
        self.messages.iter().map(|m| m.id.clone()).collect()
    }

    pub fn activity(&self) -> Activity {
        Activity {
            messages: self.messages.len(),
            awaiting: self.awaiting,
            image_staged: self.staged_image.is_some(),
        }
    }

    pub fn set_draft(&mut self, text: impl Into<String>) {
        self.draft = text.into();
    }

    /// Replaces any previously staged image.
    pub fn stage_image(&mut self, data_url: String) {
        self.staged_image = Some(data_url);
    }

    pub fn clear_image(&mut self) {
        self.staged_image = None;
    }

    /// Starts over for `mode`: history, draft and staged image are dropped and
    /// any reply still in flight will be discarded on arrival.
    pub fn switch_mode(&mut self, mode: Mode) {
        self.mode = mode;
        self.messages.clear();
        self.draft.clear();
        self.staged_image = None;
        self.awaiting = false;
        self.epoch += 1;
    }

    /// Appends the user's message, clears the input and enters the awaiting
    /// state. Returns `None` when there is nothing to send or a reply is
    /// still outstanding.
    pub fn submit(&mut self) -> Option<ReplyRequest> {
        if !self.can_submit() {
            return None;
        }

        let prompt = std::mem::take(&mut self.draft);
        let image = self.staged_image.take();
        self.push_message(Role::User, prompt.clone(), image.clone());
        self.awaiting = true;

        Some(ReplyRequest {
            ticket: ReplyTicket { epoch: self.epoch },
            mode: self.mode,
            prompt,
            image,
        })
    }

    /// Appends the assistant's reply. Returns `false` and changes nothing when
    /// the ticket predates the last mode switch.
    pub fn receive_reply(&mut self, ticket: ReplyTicket, text: String) -> bool {
        if ticket.epoch != self.epoch {
            return false;
        }
        self.push_message(Role::Assistant, text, None);
        self.awaiting = false;
        true
    }

    /// Sets or changes the rating, keeping an existing comment.
    pub fn rate(&mut self, id: &str, rating: Rating) -> Result<(), FeedbackError> {
        let message = self.assistant_message_mut(id)?;
        let comment = message.feedback.take().and_then(|f| f.comment);
        message.feedback = Some(Feedback { rating, comment });
        Ok(())
    }

    /// Overwrites the comment on an already rated message. A blank comment
    /// clears it.
    pub fn set_comment(&mut self, id: &str, comment: &str) -> Result<(), FeedbackError> {
        let message = self.assistant_message_mut(id)?;
        let feedback = message
            .feedback
            .as_mut()
            .ok_or_else(|| FeedbackError::NotRated(id.to_string()))?;
        feedback.comment = if comment.trim().is_empty() { None } else { Some(comment.to_string()) };
        Ok(())
    }

    fn assistant_message_mut(&mut self, id: &str) -> Result<&mut ChatMessage, FeedbackError> {
        let message = self
            .messages
            .iter_mut()
            .find(|m| m.id == id)
            .ok_or_else(|| FeedbackError::UnknownMessage(id.to_string()))?;
        if message.role != Role::Assistant {
            return Err(FeedbackError::NotAssistant(id.to_string()));
        }
        Ok(message)
    }

    fn push_message(&mut self, role: Role, content: String, image: Option<String>) {
        // Sequence numbers survive mode switches, so ids stay unique per session.
        self.next_seq += 1;
        self.messages.push(ChatMessage {
            id: format!("msg-{}", self.next_seq),
            role,
            content,
            image,
            created_at: Utc::now(),
            feedback: None,
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const FALLBACK: &str = "I couldn't generate a response. Please try again.";

    /// A conversation with one completed exchange; returns the assistant id.
    fn answered(prompt: &str, reply: &str) -> (Conversation, String) {
        let mut conversation = Conversation::new(Mode::Support);
        conversation.set_draft(prompt);
        let request = conversation.submit().unwrap();
        assert!(conversation.receive_reply(request.ticket, reply.to_string()));
        let id = conversation.messages().last().unwrap().id.clone();
        (conversation, id)
    }

    #[test]
    fn empty_submit_is_a_no_op() {
        let mut conversation = Conversation::new(Mode::Support);
        conversation.set_draft("   \n");

        assert_eq!(conversation.submit(), None);
        assert!(conversation.messages().is_empty());
        assert!(!conversation.is_awaiting());
        assert_eq!(conversation.draft(), "   \n");
    }

    #[test]
    fn submit_appends_user_then_assistant() {
        let mut conversation = Conversation::new(Mode::Marketing);
        conversation.set_draft("Hello");

        let request = conversation.submit().unwrap();
        assert_eq!(request.prompt, "Hello");
        assert_eq!(request.mode, Mode::Marketing);
        assert_eq!(conversation.messages().len(), 1);
        assert_eq!(conversation.draft(), "");
        assert!(conversation.is_awaiting());

        assert!(conversation.receive_reply(request.ticket, "Hi there".into()));
        let messages = conversation.messages();
        assert_eq!(messages.len(), 2);
        assert_eq!(messages[0].role, Role::User);
        assert_eq!(messages[0].content, "Hello");
        assert_eq!(messages[1].role, Role::Assistant);
        assert_eq!(messages[1].content, "Hi there");
        assert!(messages[0].created_at <= messages[1].created_at);
        assert_ne!(messages[0].id, messages[1].id);
        assert!(!conversation.is_awaiting());
    }

    #[test]
    fn image_only_submit_is_sent_and_cleared() {
        let mut conversation = Conversation::new(Mode::Support);
        conversation.stage_image("data:image/png;base64,AAAA".into());

        let request = conversation.submit().unwrap();

        assert_eq!(request.prompt, "");
        assert_eq!(request.image.as_deref(), Some("data:image/png;base64,AAAA"));
        assert_eq!(conversation.staged_image(), None);
        assert_eq!(conversation.messages()[0].image, request.image);
    }

    #[test]
    fn prompt_is_sent_untrimmed() {
        let mut conversation = Conversation::new(Mode::Support);
        conversation.set_draft("  indented\n");
        assert_eq!(conversation.submit().unwrap().prompt, "  indented\n");
    }

    #[test]
    fn double_submit_while_awaiting_is_ignored() {
        let mut conversation = Conversation::new(Mode::Support);
        conversation.set_draft("first");
        let first = conversation.submit().unwrap();

        conversation.set_draft("second");
        assert!(!conversation.can_submit());
        assert_eq!(conversation.submit(), None);
        assert_eq!(conversation.messages().len(), 1);
        assert_eq!(conversation.draft(), "second");

        conversation.receive_reply(first.ticket, "ok".into());
        let second = conversation.submit().unwrap();
        assert_eq!(second.prompt, "second");
        assert_eq!(conversation.messages().len(), 3);
    }

    #[test]
    fn fallback_reply_becomes_the_assistant_message() {
        let (conversation, _) = answered("Hello", FALLBACK);
        assert_eq!(conversation.messages()[1].content, FALLBACK);
    }

    #[test]
    fn switch_mode_resets_everything() {
        let (mut conversation, _) = answered("Hello", "Hi");
        conversation.set_draft("unsent");
        conversation.stage_image("data:image/png;base64,AAAA".into());

        conversation.switch_mode(Mode::Ops);

        assert_eq!(conversation.mode(), Mode::Ops);
        assert!(conversation.messages().is_empty());
        assert_eq!(conversation.draft(), "");
        assert_eq!(conversation.staged_image(), None);
        assert!(!conversation.is_awaiting());
    }

    #[test]
    fn switch_mode_on_an_empty_conversation_is_still_a_reset() {
        let mut conversation = Conversation::new(Mode::Support);
        conversation.switch_mode(Mode::Support);
        assert!(conversation.messages().is_empty());
    }

    #[test]
    fn reply_after_mode_switch_is_discarded() {
        let mut conversation = Conversation::new(Mode::Support);
        conversation.set_draft("Where is my order?");
        let stale = conversation.submit().unwrap();

        conversation.switch_mode(Mode::Marketing);
        conversation.set_draft("New post");
        assert!(conversation.can_submit());

        assert!(!conversation.receive_reply(stale.ticket, "Late answer".into()));
        assert!(conversation.messages().is_empty());
    }

    #[test]
    fn message_ids_stay_unique_across_mode_switches() {
        let (mut conversation, first_id) = answered("a", "b");
        conversation.switch_mode(Mode::Ops);
        conversation.set_draft("c");
        conversation.submit().unwrap();
        assert_ne!(conversation.messages()[0].id, first_id);
    }

    #[test]
    fn rerating_overwrites_rating_and_keeps_comment() {
        let (mut conversation, id) = answered("Hello", "Hi");

        conversation.rate(&id, Rating::Positive).unwrap();
        conversation.set_comment(&id, "Friendly").unwrap();
        conversation.rate(&id, Rating::Negative).unwrap();

        assert_eq!(
            conversation.feedback_for(&id),
            Some(Feedback { rating: Rating::Negative, comment: Some("Friendly".into()) })
        );
    }

    #[test]
    fn rating_is_idempotent() {
        let (mut conversation, id) = answered("Hello", "Hi");
        conversation.rate(&id, Rating::Positive).unwrap();
        let before = conversation.clone();

        conversation.rate(&id, Rating::Positive).unwrap();

        assert_eq!(conversation, before);
    }

    #[test]
    fn comment_requires_a_rating() {
        let (mut conversation, id) = answered("Hello", "Hi");

        let err = conversation.set_comment(&id, "Too long").unwrap_err();

        assert_eq!(err, FeedbackError::NotRated(id.clone()));
        assert_eq!(conversation.feedback_for(&id), None);
    }

    #[test]
    fn blank_comment_clears_it() {
        let (mut conversation, id) = answered("Hello", "Hi");
        conversation.rate(&id, Rating::Positive).unwrap();
        conversation.set_comment(&id, "Nice").unwrap();

        conversation.set_comment(&id, "  ").unwrap();

        assert_eq!(
            conversation.feedback_for(&id),
            Some(Feedback { rating: Rating::Positive, comment: None })
        );
    }

    #[test]
    fn feedback_targets_assistant_messages_only() {
        let (mut conversation, _) = answered("Hello", "Hi");
        let user_id = conversation.messages()[0].id.clone();

        assert_eq!(
            conversation.rate(&user_id, Rating::Positive),
            Err(FeedbackError::NotAssistant(user_id.clone()))
        );
        assert_eq!(
            conversation.rate("msg-404", Rating::Positive),
            Err(FeedbackError::UnknownMessage("msg-404".into()))
        );
        assert!(conversation.messages().iter().all(|m| m.feedback.is_none()));
    }

    #[test]
    fn typing_and_feedback_keep_the_message_list() {
        let (mut conversation, id) = answered("Hello", "Hi");
        let ids = conversation.message_ids();
        let activity = conversation.activity();

        conversation.set_draft("next question");
        conversation.rate(&id, Rating::Positive).unwrap();
        conversation.set_comment(&id, "Clear").unwrap();

        assert_eq!(conversation.message_ids(), ids);
        assert_eq!(conversation.activity(), activity);
        assert_eq!(conversation.message(&id).map(|m| m.content.as_str()), Some("Hi"));
    }

    #[test]
    fn activity_follows_the_bottom_of_the_chat() {
        let mut conversation = Conversation::new(Mode::Support);
        let idle = conversation.activity();

        conversation.stage_image("data:image/png;base64,AAAA".into());
        let staged = conversation.activity();
        assert_ne!(staged, idle);

        let request = conversation.submit().unwrap();
        let awaiting = conversation.activity();
        assert_ne!(awaiting, staged);

        conversation.receive_reply(request.ticket, "Looks fine".into());
        assert_ne!(conversation.activity(), awaiting);
        assert_eq!(conversation.message_ids().len(), 2);
    }
}
