//! Conversation state — the single state object behind one chat widget.
//!
//! All mutation goes through the transition functions here. The typing flag
//! moves Idle -> Typing on a valid submit and back to Idle when the matching
//! bot reply is delivered; while Typing, submissions are refused.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use tracing::{debug, warn};

use crate::types::{BotReply, Message, PendingReply, QuickAction, Sender, TypingState};

/// Source of message timestamps.
pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<Utc>;
}

#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

pub struct ChatSession {
    messages: Vec<Message>,
    input: String,
    typing: TypingState,
    pending: Option<PendingReply>,
    open: bool,
    minimized: bool,
    next_id: u64,
    next_ticket: u64,
    clock: Arc<dyn Clock>,
}

impl ChatSession {
    /// New session seeded with the bot's greeting.
    pub fn new(greeting: &str) -> Self {
        Self::with_clock(greeting, Arc::new(SystemClock))
    }

    pub fn with_clock(greeting: &str, clock: Arc<dyn Clock>) -> Self {
        let mut session = Self {
            messages: Vec::new(),
            input: String::new(),
            typing: TypingState::Idle,
            pending: None,
            open: false,
            minimized: false,
            next_id: 1,
            next_ticket: 1,
            clock,
        };
        session.append(Sender::Bot, greeting.to_string());
        session
    }

    // ── Read access for the view ──

    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    pub fn input(&self) -> &str {
        &self.input
    }

    pub fn typing(&self) -> TypingState {
        self.typing
    }

    pub fn is_typing(&self) -> bool {
        self.typing == TypingState::Typing
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    pub fn is_minimized(&self) -> bool {
        self.minimized
    }

    // ── Input buffer ──

    pub fn push_input(&mut self, c: char) {
        self.input.push(c);
    }

    pub fn pop_input(&mut self) {
        self.input.pop();
    }

    // ── Transitions ──

    /// Append the user's message and start typing.
    ///
    /// Returns the reply to schedule, or `None` when the text is blank or a
    /// reply is already outstanding. Refused submissions change nothing.
    pub fn submit(&mut self, text: &str) -> Option<PendingReply> {
        let text = text.trim();
        if text.is_empty() {
            debug!("ignoring blank submission");
            return None;
        }
        if self.is_typing() {
            debug!("ignoring submission while a reply is pending");
            return None;
        }

        self.append(Sender::User, text.to_string());
        self.input.clear();
        self.typing = TypingState::Typing;

        let pending = PendingReply {
            ticket: self.next_ticket,
            query: text.to_string(),
        };
        self.next_ticket += 1;
        self.pending = Some(pending.clone());
        Some(pending)
    }

    /// Submit whatever is in the input buffer.
    pub fn submit_input(&mut self) -> Option<PendingReply> {
        let text = self.input.clone();
        self.submit(&text)
    }

    pub fn quick_action(&mut self, action: &QuickAction) -> Option<PendingReply> {
        self.submit(&action.query)
    }

    /// Append the bot reply for the outstanding ticket and stop typing.
    pub fn complete_reply(&mut self, reply: BotReply) -> Option<&Message> {
        match &self.pending {
            Some(p) if p.ticket == reply.ticket => {}
            _ => {
                warn!(ticket = reply.ticket, "dropping reply with no matching pending ticket");
                return None;
            }
        }

        self.pending = None;
        self.typing = TypingState::Idle;
        self.append(Sender::Bot, reply.text);
        self.messages.last()
    }

    /// Open or close the widget. Opening always shows the full window.
    pub fn toggle_open(&mut self) {
        self.open = !self.open;
        if self.open {
            self.minimized = false;
        }
    }

    /// Collapse or expand an open widget.
    pub fn toggle_minimize(&mut self) {
        if self.open {
            self.minimized = !self.minimized;
        }
    }

    fn append(&mut self, sender: Sender, text: String) {
        let message = Message {
            id: self.next_id,
            text,
            sender,
            timestamp: self.clock.now(),
        };
        self.next_id += 1;
        self.messages.push(message);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    struct FixedClock(DateTime<Utc>);

    impl Clock for FixedClock {
        fn now(&self) -> DateTime<Utc> {
            self.0
        }
    }

    fn session() -> ChatSession {
        ChatSession::new("Hi! How can I help?")
    }

    fn type_text(s: &mut ChatSession, text: &str) {
        text.chars().for_each(|c| s.push_input(c));
    }

    #[test]
    fn test_initial_state() {
        let s = session();
        assert_eq!(s.messages().len(), 1);
        assert_eq!(s.messages()[0].sender, Sender::Bot);
        assert_eq!(s.messages()[0].text, "Hi! How can I help?");
        assert_eq!(s.typing(), TypingState::Idle);
        assert!(s.input().is_empty());
        assert!(!s.is_open());
        assert!(!s.is_minimized());
    }

    #[test]
    fn test_blank_submissions_are_noops() {
        let mut s = session();
        for blank in ["", " ", "\t\n", "   \r\n  "] {
            assert!(s.submit(blank).is_none());
        }
        assert_eq!(s.messages().len(), 1);
        assert_eq!(s.typing(), TypingState::Idle);
        assert!(s.pending.is_none());
    }

    #[test]
    fn test_submit_appends_user_message_and_types() {
        let mut s = session();
        type_text(&mut s, "hello");
        let pending = s.submit_input().unwrap();

        assert_eq!(pending.query, "hello");
        assert_eq!(s.messages().len(), 2);
        let last = s.messages().last().unwrap();
        assert_eq!(last.sender, Sender::User);
        assert_eq!(last.text, "hello");
        assert!(s.input().is_empty());
        assert!(s.is_typing());
    }

    #[test]
    fn test_submit_blocked_while_typing() {
        let mut s = session();
        s.submit("first").unwrap();
        type_text(&mut s, "second");
        assert!(s.submit_input().is_none());
        assert_eq!(s.messages().len(), 2);
        // Buffer is kept when the submission is refused
        assert_eq!(s.input(), "second");
    }

    #[test]
    fn test_complete_reply_returns_to_idle() {
        let mut s = session();
        let pending = s.submit("hello").unwrap();
        let msg = s
            .complete_reply(BotReply {
                ticket: pending.ticket,
                text: "Hello back".to_string(),
            })
            .unwrap();
        assert_eq!(msg.sender, Sender::Bot);
        assert_eq!(msg.text, "Hello back");
        assert_eq!(s.typing(), TypingState::Idle);
        assert!(s.submit("again").is_some());
    }

    #[test]
    fn test_stale_reply_is_dropped() {
        let mut s = session();
        let pending = s.submit("hello").unwrap();
        let stale = BotReply {
            ticket: pending.ticket + 10,
            text: "nope".to_string(),
        };
        assert!(s.complete_reply(stale).is_none());
        assert_eq!(s.messages().len(), 2);
        assert!(s.is_typing());
    }

    #[test]
    fn test_ids_are_monotonic() {
        let mut s = session();
        for i in 0..3 {
            let p = s.submit(&format!("msg {}", i)).unwrap();
            s.complete_reply(BotReply {
                ticket: p.ticket,
                text: "ok".to_string(),
            });
        }
        let ids: Vec<u64> = s.messages().iter().map(|m| m.id).collect();
        assert_eq!(ids, vec![1, 2, 3, 4, 5, 6, 7]);
    }

    #[test]
    fn test_timestamps_come_from_clock() {
        let at = Utc.with_ymd_and_hms(2024, 5, 1, 12, 30, 0).unwrap();
        let mut s = ChatSession::with_clock("hi", Arc::new(FixedClock(at)));
        s.submit("hello").unwrap();
        assert!(s.messages().iter().all(|m| m.timestamp == at));
    }

    #[test]
    fn test_quick_action_is_submit() {
        let mut s = session();
        let action = QuickAction::new("Returns", "How do I return an item?");
        let pending = s.quick_action(&action).unwrap();
        assert_eq!(pending.query, "How do I return an item?");
        assert_eq!(s.messages().last().unwrap().text, "How do I return an item?");
    }

    #[test]
    fn test_open_and_minimize() {
        let mut s = session();
        s.toggle_minimize();
        assert!(!s.is_minimized(), "minimize is ignored while closed");

        s.toggle_open();
        assert!(s.is_open());
        s.toggle_minimize();
        assert!(s.is_minimized());

        s.toggle_open();
        assert!(!s.is_open());
        s.toggle_open();
        assert!(s.is_open());
        assert!(!s.is_minimized());
    }

    #[test]
    fn test_input_editing() {
        let mut s = session();
        s.push_input('h');
        s.push_input('i');
        assert_eq!(s.input(), "hi");
        s.pop_input();
        assert_eq!(s.input(), "h");
    }
}
