//! Workout name validation and default-name generation.
//!
//! Names compare case-insensitively after trimming, across the saved
//! workouts and the draft.

use std::collections::HashSet;

use super::Workout;

pub const BASE_NAME: &str = "New Workout";

pub fn normalize_name(name: &str) -> String {
    name.trim().to_lowercase()
}

pub fn is_valid_name(name: &str) -> bool {
    !name.trim().is_empty()
}

/// `exclude_id` lets a workout keep its own name when renamed.
pub fn is_name_unique(
    name: &str,
    saved: &[Workout],
    draft: Option<&Workout>,
    exclude_id: Option<&str>,
) -> bool {
    let normalized = normalize_name(name);
    if normalized.is_empty() {
        return false;
    }
    !saved
        .iter()
        .chain(draft)
        .any(|w| Some(w.id.as_str()) != exclude_id && normalize_name(&w.name) == normalized)
}

/// "New Workout", then "New Workout 2", "New Workout 3", ... one past the
/// highest numeral in use. A bare "New Workout" counts as 1.
pub fn generate_unique_name(saved: &[Workout], draft: Option<&Workout>) -> String {
    let base = BASE_NAME.to_lowercase();
    let used: HashSet<u64> = saved
        .iter()
        .chain(draft)
        .filter_map(|w| default_name_number(&normalize_name(&w.name), &base))
        .collect();

    let Some(&highest) = used.iter().max() else {
        return BASE_NAME.to_string();
    };
    // A numeral at u64::MAX has no successor; take the lowest free one.
    let next = highest
        .checked_add(1)
        .or_else(|| (2..).find(|n| !used.contains(n)))
        .unwrap_or(2);
    format!("{BASE_NAME} {next}")
}

fn default_name_number(normalized: &str, base: &str) -> Option<u64> {
    let rest = normalized.strip_prefix(base)?;
    if rest.is_empty() {
        return Some(1);
    }
    let digits = rest.strip_prefix(' ')?;
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    digits.parse().ok()
}
