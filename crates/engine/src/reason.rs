//! Match reason generation.
//!
//! Produces the short Japanese phrase shown next to each recommendation.
//! This stage has no failure mode: it always returns at least the
//! fallback phrase.

use crate::profile::PreferenceProfile;
use catalog::Sake;

/// Categories known for a fragrant, premium aroma
pub const FRAGRANT_CATEGORIES: &[&str] = &["daiginjo", "junmai_daiginjo"];

/// The rice-forward category with pronounced umami
pub const RICE_FORWARD_CATEGORY: &str = "junmai";

/// Build the match reason for one candidate.
///
/// ## Algorithm
/// 1. If the sweetness fit is close (within 1), add a descriptor for the
///    candidate's sweetness band (dry / sweet / balanced)
/// 2. Add a category descriptor for fragrant or rice-forward categories
/// 3. Fall back to a generic phrase if nothing else applied
///
/// Descriptors are joined with "、".
pub fn generate_match_reason(sake: &Sake, profile: &PreferenceProfile) -> String {
    let mut reasons: Vec<&str> = Vec::new();

    // Taste descriptor, only when the sweetness fit is close
    if profile.sweetness.abs_diff(sake.sweetness) <= 1 {
        if sake.sweetness <= 2 {
            reasons.push("辛口でスッキリ");
        } else if sake.sweetness >= 4 {
            reasons.push("甘口でまろやか");
        } else {
            reasons.push("バランスの良い味わい");
        }
    }

    // Category descriptor
    let category = sake.category.as_str();
    if FRAGRANT_CATEGORIES.contains(&category) {
        reasons.push("華やかな香り");
    } else if category == RICE_FORWARD_CATEGORY {
        reasons.push("お米の旨味");
    }

    // Guarantee a non-empty reason
    if reasons.is_empty() {
        reasons.push("おすすめの一本");
    }

    reasons.join("、")
}
