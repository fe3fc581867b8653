//! Canned reply tables — ordered trigger phrases and the fallback keyword
//! checks that run after them.
//!
//! Matching is plain substring containment on lowercased input. Table order
//! is the precedence order, so tables are kept as `Vec`s, never maps.

use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::error::RuleFileError;
use crate::types::Skin;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rule {
    pub trigger: String,
    pub reply: String,
}

/// Ordered (trigger, reply) pairs. First trigger contained in the input wins.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuleTable {
    rules: Vec<Rule>,
}

#[derive(Deserialize)]
struct RuleFile {
    #[serde(default)]
    rules: Vec<Rule>,
}

impl RuleTable {
    /// Build a table from ordered pairs. Triggers are stored lowercase.
    pub fn new<I, T, R>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (T, R)>,
        T: Into<String>,
        R: Into<String>,
    {
        let rules = pairs
            .into_iter()
            .map(|(t, r)| Rule {
                trigger: t.into().to_lowercase(),
                reply: r.into(),
            })
            .collect();
        Self { rules }
    }

    /// The built-in table for a skin.
    pub fn builtin(skin: Skin) -> Self {
        match skin {
            Skin::Support => Self::new(SUPPORT_RULES.iter().copied()),
            Skin::Nibbly => Self::new(NIBBLY_RULES.iter().copied()),
        }
    }

    /// Load a table from a YAML file of the form `rules: [{trigger, reply}, ...]`.
    pub fn load(path: &Path) -> Result<Self, RuleFileError> {
        let content = std::fs::read_to_string(path).map_err(|source| RuleFileError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let file: RuleFile =
            serde_yaml::from_str(&content).map_err(|source| RuleFileError::Parse {
                path: path.to_path_buf(),
                source,
            })?;

        if file.rules.is_empty() {
            return Err(RuleFileError::Empty(path.to_path_buf()));
        }
        for (index, rule) in file.rules.iter().enumerate() {
            if rule.trigger.trim().is_empty() {
                return Err(RuleFileError::BlankField {
                    index,
                    field: "trigger",
                });
            }
            if rule.reply.trim().is_empty() {
                return Err(RuleFileError::BlankField {
                    index,
                    field: "reply",
                });
            }
        }

        info!("Loaded {} rules from {}", file.rules.len(), path.display());
        Ok(Self::new(
            file.rules
                .into_iter()
                .map(|r| (r.trigger.trim().to_string(), r.reply)),
        ))
    }

    /// First rule whose trigger is a substring of `normalized` (already lowercase).
    pub fn first_match(&self, normalized: &str) -> Option<&Rule> {
        self.rules
            .iter()
            .find(|rule| normalized.contains(rule.trigger.as_str()))
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}

// ── Fallback keyword checks ──

/// A hard-coded check run after the table: every `all` keyword must be
/// present, and at least one `any` keyword when `any` is non-empty.
#[derive(Debug, Clone, Copy)]
pub struct CompoundRule {
    pub all: &'static [&'static str],
    pub any: &'static [&'static str],
    pub reply: &'static str,
}

impl CompoundRule {
    pub fn matches(&self, normalized: &str) -> bool {
        self.all.iter().all(|k| normalized.contains(k))
            && (self.any.is_empty() || self.any.iter().any(|k| normalized.contains(k)))
    }
}

pub fn compound_rules(skin: Skin) -> &'static [CompoundRule] {
    match skin {
        Skin::Support => SUPPORT_COMPOUND,
        Skin::Nibbly => NIBBLY_COMPOUND,
    }
}

pub fn default_reply(skin: Skin) -> &'static str {
    match skin {
        Skin::Support => {
            "I'm not sure I understood that. Could you give me a bit more detail about what you need help with?"
        }
        Skin::Nibbly => {
            "I didn't quite catch that. Could you tell me a bit more? If it's about a delivery, include your order code (like N001)."
        }
    }
}

// ── Built-in tables ──

pub const SUPPORT_RULES: &[(&str, &str)] = &[
    (
        "hello",
        "Hello! Welcome to Customer Support. How can I help you today?",
    ),
    ("hey", "Hey there! What can I help you with today?"),
    (
        "refund",
        "Refunds go back to your original payment method within 5-7 business days after we receive the returned item. Would you like me to start a refund request?",
    ),
    (
        "return",
        "You can return most items within 30 days of delivery. Go to Orders > Return Item, print the prepaid label, and drop the package at any carrier location.",
    ),
    (
        "shipping",
        "Standard shipping takes 3-5 business days and express shipping takes 1-2 business days. Orders over $50 ship free.",
    ),
    (
        "track",
        "You can track your package from the Orders page. Open the order and select Track Package to see live carrier updates.",
    ),
    (
        "payment",
        "We accept Visa, Mastercard, American Express, PayPal and Apple Pay. All payments are processed securely.",
    ),
    (
        "billing",
        "For billing questions, check Account > Billing for invoices and charges. If something looks wrong, tell me the charge date and amount.",
    ),
    (
        "password",
        "To reset your password, click 'Forgot password' on the sign-in page and follow the link we email you. The link expires after 24 hours.",
    ),
    (
        "account",
        "You can update your name, email and address under Account > Settings. Is there something specific about your account I can help with?",
    ),
    (
        "hours",
        "Our support team is available Monday to Friday, 9am to 6pm, and Saturday, 10am to 4pm.",
    ),
    (
        "human",
        "I'll connect you with a human agent. The typical wait is under 5 minutes, or you can email support@example.com.",
    ),
    (
        "help",
        "I can help with orders, shipping, returns, refunds, payments and account questions. What do you need?",
    ),
];

pub const NIBBLY_RULES: &[(&str, &str)] = &[
    (
        "hello",
        "Hi! I'm Nibbly's delivery assistant. Ask me about your drone delivery, or send your order code (like N001) to track it.",
    ),
    ("hey", "Hey! Ready when you are. What can I do for you?"),
    (
        "track",
        "To track a delivery, send me your order code. It looks like N001 and it's in your confirmation email.",
    ),
    (
        "weather",
        "Our drones fly in light rain and in winds up to 35 km/h. During storms we pause flights and your ETA updates automatically.",
    ),
    (
        "refund",
        "If your order arrives damaged, or more than 20 minutes late, you get a full refund. Just share your order code.",
    ),
    (
        "menu",
        "Nibbly delivers snacks, drinks and small groceries from partner stores within 5 km. You can browse the full menu in the app.",
    ),
    (
        "area",
        "We deliver within 5 km of every Nibbly Hub. Enter your address in the app to check coverage.",
    ),
    (
        "price",
        "Delivery costs $2.99 per order, and it's free for Nibbly Plus members.",
    ),
    (
        "payment",
        "We accept all major cards, PayPal and Nibbly credits.",
    ),
    (
        "landing",
        "Drones lower your package on a tether to your drop spot. Please keep the area clear of people and pets.",
    ),
    (
        "help",
        "I can track orders, explain delivery areas and prices, or help with refunds. What do you need?",
    ),
];

const THANKS: CompoundRule = CompoundRule {
    all: &["thank"],
    any: &[],
    reply: "You're welcome! Is there anything else I can help you with?",
};

const SUPPORT_COMPOUND: &[CompoundRule] = &[
    CompoundRule {
        all: &["order", "status"],
        any: &[],
        reply: "To check your order status, open Orders in your account. Each order shows its current status and tracking details.",
    },
    CompoundRule {
        all: &["cancel"],
        any: &[],
        reply: "Orders can be cancelled within 1 hour of purchase from the Orders page. After that, you can return the item once it arrives.",
    },
    THANKS,
    CompoundRule {
        all: &[],
        any: &["bye", "goodbye"],
        reply: "Thanks for chatting with Customer Support. Have a great day!",
    },
];

const NIBBLY_COMPOUND: &[CompoundRule] = &[
    CompoundRule {
        all: &["order", "status"],
        any: &[],
        reply: "Send me your order code (like N001) and I'll pull up its live status.",
    },
    CompoundRule {
        all: &["cancel"],
        any: &[],
        reply: "Orders can be cancelled until the drone takes off. Once it's airborne we can't recall it, but you can refuse the delivery for a refund.",
    },
    THANKS,
    CompoundRule {
        all: &[],
        any: &["bye", "goodbye"],
        reply: "Thanks for flying with Nibbly. Enjoy your snacks!",
    },
    CompoundRule {
        all: &["drone"],
        any: &["where", "late"],
        reply: "Drones sometimes reroute around weather or no-fly zones. Send me your order code and I'll check exactly where yours is.",
    },
    CompoundRule {
        all: &[],
        any: &["eta", "how long", "when will"],
        reply: "Most Nibbly deliveries arrive within 15 minutes of takeoff. For an exact ETA, send me your order code.",
    },
];
