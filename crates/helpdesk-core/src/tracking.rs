//! Drone-delivery tracking — order code extraction and the static record book.

use std::collections::HashMap;
use std::sync::LazyLock;

use regex_lite::Regex;

use crate::types::{DeliveryStatus, TrackingRecord};

/// "N" followed by three digits, anywhere in the text.
static ORDER_CODE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)n\d{3}").expect("order code pattern is valid"));

/// Find the first order code in `text`, uppercased (e.g. `"n001"` -> `"N001"`).
pub fn find_order_code(text: &str) -> Option<String> {
    ORDER_CODE.find(text).map(|m| m.as_str().to_uppercase())
}

/// Static order-code -> tracking record lookup.
#[derive(Debug, Clone, Default)]
pub struct TrackingBook {
    records: HashMap<String, TrackingRecord>,
}

impl TrackingBook {
    fn new() -> Self {
        Self::default()
    }

    pub fn with_record(mut self, code: &str, record: TrackingRecord) -> Self {
        self.records.insert(code.to_uppercase(), record);
        self
    }

    /// The demo orders shipped with the Nibbly skin.
    pub fn nibbly() -> Self {
        Self::new()
            .with_record(
                "N001",
                TrackingRecord {
                    location: "over Maple Street, 0.8 km from you".to_string(),
                    eta_minutes: 4,
                    status: DeliveryStatus::InFlight,
                },
            )
            .with_record(
                "N002",
                TrackingRecord {
                    location: "loading at Nibbly Hub Central".to_string(),
                    eta_minutes: 18,
                    status: DeliveryStatus::Preparing,
                },
            )
            .with_record(
                "N003",
                TrackingRecord {
                    location: "holding near Riverside Park while winds settle".to_string(),
                    eta_minutes: 12,
                    status: DeliveryStatus::Delayed,
                },
            )
            .with_record(
                "N004",
                TrackingRecord {
                    location: "at your drop spot".to_string(),
                    eta_minutes: 0,
                    status: DeliveryStatus::Delivered,
                },
            )
    }

    pub fn get(&self, code: &str) -> Option<&TrackingRecord> {
        self.records.get(code)
    }
}

pub fn found_reply(code: &str, record: &TrackingRecord) -> String {
    let eta = match record.status {
        DeliveryStatus::Delivered => "already arrived".to_string(),
        _ if record.eta_minutes == 1 => "about 1 minute".to_string(),
        _ => format!("about {} minutes", record.eta_minutes),
    };
    format!(
        "Order {}: {}. Your drone is {}. ETA: {}.",
        code, record.status, record.location, eta
    )
}

pub fn not_found_reply(code: &str) -> String {
    format!(
        "I couldn't find an order with code {}. Please double-check the code in your confirmation email and try again.",
        code
    )
}
