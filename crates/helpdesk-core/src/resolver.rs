//! Response resolver — maps free text to a canned reply.
//!
//! Precedence, first hit wins:
//! 1. order code lookup (skins with a tracking book only)
//! 2. the ordered rule table
//! 3. the skin's compound keyword checks
//! 4. the default "tell me more" reply

use tracing::debug;

use crate::rules::{compound_rules, default_reply, CompoundRule, RuleTable};
use crate::tracking::{self, TrackingBook};
use crate::types::Skin;

#[derive(Debug, Clone)]
pub struct Resolver {
    skin: Skin,
    table: RuleTable,
    tracking: Option<TrackingBook>,
    compound: &'static [CompoundRule],
    fallback: &'static str,
}

impl Resolver {
    /// Resolver with the skin's built-in table.
    pub fn for_skin(skin: Skin) -> Self {
        Self::with_table(skin, RuleTable::builtin(skin))
    }

    /// Resolver for a skin with a replacement rule table.
    pub fn with_table(skin: Skin, table: RuleTable) -> Self {
        let tracking = match skin {
            Skin::Nibbly => Some(TrackingBook::nibbly()),
            Skin::Support => None,
        };
        Self {
            skin,
            table,
            tracking,
            compound: compound_rules(skin),
            fallback: default_reply(skin),
        }
    }

    pub fn skin(&self) -> Skin {
        self.skin
    }

    pub fn table(&self) -> &RuleTable {
        &self.table
    }

    /// Produce the reply for `input`. Never fails.
    pub fn resolve(&self, input: &str) -> String {
        let normalized = input.to_lowercase();

        if let Some(book) = &self.tracking {
            if let Some(code) = tracking::find_order_code(&normalized) {
                debug!(skin = %self.skin, %code, "order code lookup");
                return match book.get(&code) {
                    Some(record) => tracking::found_reply(&code, record),
                    None => tracking::not_found_reply(&code),
                };
            }
        }

        if let Some(rule) = self.table.first_match(&normalized) {
            debug!(skin = %self.skin, trigger = %rule.trigger, "rule table hit");
            return rule.reply.clone();
        }

        if let Some(rule) = self.compound.iter().find(|r| r.matches(&normalized)) {
            debug!(skin = %self.skin, keywords = ?rule.all, "compound rule hit");
            return rule.reply.to_string();
        }

        debug!(skin = %self.skin, "no rule matched, using default reply");
        self.fallback.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rules::{NIBBLY_RULES, SUPPORT_RULES};

    fn table_reply(rules: &[(&str, &'static str)], trigger: &str) -> &'static str {
        rules
            .iter()
            .find(|(t, _)| *t == trigger)
            .map(|(_, r)| *r)
            .unwrap()
    }

    #[test]
    fn test_hello_matches_table() {
        let resolver = Resolver::for_skin(Skin::Support);
        assert_eq!(resolver.resolve("hello"), table_reply(SUPPORT_RULES, "hello"));
        assert_eq!(resolver.resolve("HeLLo!!"), table_reply(SUPPORT_RULES, "hello"));
    }

    #[test]
    fn test_resolve_is_deterministic() {
        let resolver = Resolver::for_skin(Skin::Nibbly);
        for input in ["hello", "track N001", "xyzzy", ""] {
            assert_eq!(resolver.resolve(input), resolver.resolve(input));
        }
    }

    #[test]
    fn test_order_code_beats_table() {
        let resolver = Resolver::for_skin(Skin::Nibbly);
        let reply = resolver.resolve("please track N001 now");
        let book = TrackingBook::nibbly();
        assert_eq!(reply, tracking::found_reply("N001", book.get("N001").unwrap()));
        assert_ne!(reply, table_reply(NIBBLY_RULES, "track"));
    }

    #[test]
    fn test_order_code_beats_help() {
        let resolver = Resolver::for_skin(Skin::Nibbly);
        let reply = resolver.resolve("help me with n002");
        assert!(reply.starts_with("Order N002"));
    }

    #[test]
    fn test_unknown_order_code() {
        let resolver = Resolver::for_skin(Skin::Nibbly);
        let reply = resolver.resolve("status of N999");
        assert_eq!(reply, tracking::not_found_reply("N999"));
        assert_ne!(reply, default_reply(Skin::Nibbly));
    }

    #[test]
    fn test_support_skin_ignores_order_codes() {
        let resolver = Resolver::for_skin(Skin::Support);
        assert_eq!(
            resolver.resolve("please track N001 now"),
            table_reply(SUPPORT_RULES, "track")
        );
    }

    #[test]
    fn test_first_match_wins_by_table_order() {
        let resolver = Resolver::for_skin(Skin::Support);
        // "help" comes first in the text, "refund" first in the table
        assert_eq!(
            resolver.resolve("I need help with a refund"),
            table_reply(SUPPORT_RULES, "refund")
        );
    }

    #[test]
    fn test_no_negation_handling() {
        let resolver = Resolver::for_skin(Skin::Support);
        assert_eq!(
            resolver.resolve("I don't want a refund"),
            table_reply(SUPPORT_RULES, "refund")
        );
    }

    #[test]
    fn test_default_reply() {
        for skin in Skin::ALL {
            let resolver = Resolver::for_skin(skin);
            assert_eq!(
                resolver.resolve("xyzzy completely unrelated text"),
                default_reply(skin)
            );
        }
    }

    #[test]
    fn test_compound_rules_in_order() {
        let resolver = Resolver::for_skin(Skin::Support);
        assert!(resolver.resolve("what's my order status?").contains("order status"));
        assert!(resolver.resolve("cancel it").contains("cancelled"));
        assert!(resolver.resolve("thanks!").starts_with("You're welcome"));
        assert!(resolver.resolve("ok bye").contains("great day"));
        // "cancel" is checked before "thank"
        assert!(resolver.resolve("thanks, cancel it").contains("cancelled"));
    }

    #[test]
    fn test_nibbly_drone_and_eta() {
        let resolver = Resolver::for_skin(Skin::Nibbly);
        assert!(resolver.resolve("where is my drone?").contains("reroute"));
        assert!(resolver.resolve("How long will it take?").contains("15 minutes"));
        assert!(resolver.resolve("when will it arrive").contains("15 minutes"));
    }

    #[test]
    fn test_custom_table() {
        let resolver = Resolver::with_table(Skin::Support, RuleTable::new([("pizza", "No pizza.")]));
        assert_eq!(resolver.resolve("Pizza please"), "No pizza.");
        // Compound checks still apply after a custom table
        assert!(resolver.resolve("thank you").starts_with("You're welcome"));
    }
}
