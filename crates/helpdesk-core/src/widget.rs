//! The chat widget — one skin's session, resolver and reply scheduler,
//! with events broadcast to whoever renders it.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::broadcast;
use tracing::info;

use crate::events::ChatEvent;
use crate::resolver::Resolver;
use crate::scheduler::ReplyScheduler;
use crate::session::{ChatSession, Clock, SystemClock};
use crate::skins::SkinProfile;
use crate::types::{BotReply, Message, PendingReply, Sender, Skin, TypingState};

pub struct ChatWidget {
    profile: SkinProfile,
    session: ChatSession,
    scheduler: ReplyScheduler,
    event_tx: broadcast::Sender<ChatEvent>,
}

impl ChatWidget {
    /// Widget for a skin using its built-in rule table.
    pub fn new(skin: Skin, delay: Duration) -> Self {
        Self::with_resolver(Resolver::for_skin(skin), delay)
    }

    pub fn with_resolver(resolver: Resolver, delay: Duration) -> Self {
        Self::with_clock(resolver, delay, Arc::new(SystemClock))
    }

    pub fn with_clock(resolver: Resolver, delay: Duration, clock: Arc<dyn Clock>) -> Self {
        let profile = SkinProfile::for_skin(resolver.skin());
        let session = ChatSession::with_clock(&profile.greeting, clock);
        let (event_tx, _) = broadcast::channel(256);

        info!(
            skin = %profile.skin,
            rules = resolver.table().len(),
            ?delay,
            "chat widget ready"
        );

        Self {
            profile,
            session,
            scheduler: ReplyScheduler::new(Arc::new(resolver), delay),
            event_tx,
        }
    }

    pub fn subscribe(&self) -> broadcast::Receiver<ChatEvent> {
        self.event_tx.subscribe()
    }

    pub fn profile(&self) -> &SkinProfile {
        &self.profile
    }

    pub fn session(&self) -> &ChatSession {
        &self.session
    }

    pub fn messages(&self) -> &[Message] {
        self.session.messages()
    }

    pub fn is_typing(&self) -> bool {
        self.session.is_typing()
    }

    fn broadcast(&self, event: ChatEvent) {
        let _ = self.event_tx.send(event);
    }

    // ── Input buffer ──

    pub fn push_input(&mut self, c: char) {
        self.session.push_input(c);
    }

    pub fn pop_input(&mut self) {
        self.session.pop_input();
    }

    // ── Transitions ──

    /// Submit `text`. Returns false when the submission was refused.
    pub fn submit(&mut self, text: &str) -> bool {
        let pending = self.session.submit(text);
        self.start_reply(pending)
    }

    /// Submit the current input buffer.
    pub fn submit_input(&mut self) -> bool {
        let pending = self.session.submit_input();
        self.start_reply(pending)
    }

    /// Fire the quick action at `index`; out-of-range indexes are ignored.
    pub fn quick_action(&mut self, index: usize) -> bool {
        let Some(action) = self.profile.quick_actions.get(index).cloned() else {
            return false;
        };
        info!(skin = %self.profile.skin, label = %action.label, "quick action");
        let pending = self.session.quick_action(&action);
        self.start_reply(pending)
    }

    pub fn toggle_open(&mut self) {
        self.session.toggle_open();
        self.broadcast_visibility();
    }

    pub fn toggle_minimize(&mut self) {
        self.session.toggle_minimize();
        self.broadcast_visibility();
    }

    /// Apply every reply whose delay has elapsed. Returns how many were applied.
    pub fn pump(&mut self) -> usize {
        let mut applied = 0;
        while let Some(reply) = self.scheduler.try_next() {
            if self.deliver(reply) {
                applied += 1;
            }
        }
        applied
    }

    /// Wait for the outstanding reply and apply it. Returns false when none is pending.
    pub async fn wait_reply(&mut self) -> bool {
        if !self.session.is_typing() {
            return false;
        }
        match self.scheduler.next().await {
            Some(reply) => self.deliver(reply),
            None => false,
        }
    }

    fn start_reply(&mut self, pending: Option<PendingReply>) -> bool {
        let Some(pending) = pending else {
            return false;
        };
        if let Some(msg) = self.session.messages().last() {
            debug_assert_eq!(msg.sender, Sender::User);
            self.broadcast(ChatEvent::Message(msg.clone()));
        }
        self.broadcast(ChatEvent::Typing(TypingState::Typing));
        self.scheduler.schedule(pending);
        true
    }

    fn deliver(&mut self, reply: BotReply) -> bool {
        let Some(msg) = self.session.complete_reply(reply).cloned() else {
            return false;
        };
        self.broadcast(ChatEvent::Message(msg));
        self.broadcast(ChatEvent::Typing(TypingState::Idle));
        true
    }

    fn broadcast_visibility(&self) {
        self.broadcast(ChatEvent::Visibility {
            open: self.session.is_open(),
            minimized: self.session.is_minimized(),
        });
    }
}
