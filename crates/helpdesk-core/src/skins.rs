//! Per-skin presentation constants — title, greeting, quick actions.

use crate::types::{QuickAction, Skin};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkinProfile {
    pub skin: Skin,
    pub title: String,
    pub greeting: String,
    pub placeholder: String,
    pub quick_actions: Vec<QuickAction>,
}

impl SkinProfile {
    pub fn for_skin(skin: Skin) -> Self {
        match skin {
            Skin::Support => Self {
                skin,
                title: "Customer Support".to_string(),
                greeting: "Hi! I'm your support assistant. How can I help you today?".to_string(),
                placeholder: "Type your message...".to_string(),
                quick_actions: vec![
                    QuickAction::new("Track order", "How do I track my order?"),
                    QuickAction::new("Returns", "How do I return an item?"),
                    QuickAction::new("Refunds", "When will I get my refund?"),
                    QuickAction::new("Talk to a human", "I want to talk to a human"),
                ],
            },
            Skin::Nibbly => Self {
                skin,
                title: "Nibbly".to_string(),
                greeting: "Hey there! I'm Nibbly's delivery assistant. Send me your order code (like N001) and I'll find your drone."
                    .to_string(),
                placeholder: "Ask about your delivery...".to_string(),
                quick_actions: vec![
                    QuickAction::new("Track N001", "Track order N001"),
                    QuickAction::new("Delivery ETA", "How long until my delivery arrives?"),
                    QuickAction::new("Delivery area", "What area do you deliver to?"),
                    QuickAction::new("Refunds", "Can I get a refund?"),
                ],
            },
        }
    }
}
