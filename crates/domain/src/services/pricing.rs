//! Publishing fee table.
//!
//! Fees are flat amounts in INR. Payment itself is handled out of band
//! (UPI transfer confirmed manually); this module only answers "what
//! does this action cost", for quote display and the admin pricing page.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::models::registration::PublishDuration;

/// Paid actions on a registration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PaymentAction {
    Publish,
    Extend,
    Pause,
    Resume,
}

/// Fee in INR to publish for the given duration.
pub fn publish_fee(duration: PublishDuration) -> u32 {
    match duration {
        PublishDuration::OneDay => 49,
        PublishDuration::ThreeDays => 99,
        PublishDuration::FiveDays => 149,
        PublishDuration::SevenDays => 199,
        PublishDuration::FifteenDays => 349,
        PublishDuration::ThirtyDays => 599,
    }
}

/// Fee in INR to extend by the given duration.
///
/// Extensions are quoted for short durations only; there is no matching
/// lifecycle transition yet, so this is quote-only.
pub fn extend_fee(duration: PublishDuration) -> Option<u32> {
    match duration {
        PublishDuration::OneDay => Some(39),
        PublishDuration::ThreeDays => Some(79),
        PublishDuration::FiveDays => Some(119),
        PublishDuration::SevenDays => Some(159),
        PublishDuration::FifteenDays | PublishDuration::ThirtyDays => None,
    }
}

/// Flat fee in INR to pause an active registration.
pub const PAUSE_FEE: u32 = 29;

/// Flat fee in INR to resume a paused registration.
pub const RESUME_FEE: u32 = 29;

/// The full fee table, as served by the pricing endpoint.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct PriceList {
    pub currency: &'static str,
    pub publish: BTreeMap<String, u32>,
    pub extend: BTreeMap<String, u32>,
    pub pause: u32,
    pub resume: u32,
}

/// Builds the current fee table.
pub fn price_list() -> PriceList {
    let durations = [
        PublishDuration::OneDay,
        PublishDuration::ThreeDays,
        PublishDuration::FiveDays,
        PublishDuration::SevenDays,
        PublishDuration::FifteenDays,
        PublishDuration::ThirtyDays,
    ];

    let publish = durations
        .iter()
        .map(|d| (d.as_str().to_string(), publish_fee(*d)))
        .collect();

    let extend = durations
        .iter()
        .filter_map(|d| extend_fee(*d).map(|fee| (d.as_str().to_string(), fee)))
        .collect();

    PriceList {
        currency: "INR",
        publish,
        extend,
        pause: PAUSE_FEE,
        resume: RESUME_FEE,
    }
}
