//! Participant tallies per slot and the display order of categories.

use std::cmp::Ordering;
use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};

use crate::models::booking::Participant;
use crate::settings::CategoryExclusions;

pub const UNKNOWN_CATEGORY: &str = "Unknown";

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParticipantTally {
    pub by_category: BTreeMap<String, u32>,
    pub total: u32,
}

/// Category label used for aggregation; blank or missing labels become "Unknown".
pub fn category_label(participant: &Participant) -> &str {
    match participant.category.as_deref().map(str::trim) {
        Some(label) if !label.is_empty() => label,
        _ => UNKNOWN_CATEGORY,
    }
}

pub struct ParticipantAggregator<'a> {
    exclusions: &'a CategoryExclusions,
}

impl<'a> ParticipantAggregator<'a> {
    pub fn new(exclusions: &'a CategoryExclusions) -> Self {
        Self { exclusions }
    }

    /// Adds `participants` booked on `resource_id` into `tally`.
    /// Missing quantities count as one; excluded categories count as nothing.
    /// Counts saturate at `u32::MAX`.
    pub fn contribute(&self, resource_id: &str, participants: &[Participant], tally: &mut ParticipantTally) {
        for participant in participants {
            let label = category_label(participant);
            if self.exclusions.is_excluded(resource_id, label) {
                continue;
            }
            let quantity = participant.quantity.unwrap_or(1);
            let count = tally.by_category.entry(label.to_string()).or_insert(0);
            *count = count.saturating_add(quantity);
            tally.total = tally.total.saturating_add(quantity);
        }
    }

    pub fn tally(&self, resource_id: &str, participants: &[Participant]) -> ParticipantTally {
        let mut tally = ParticipantTally::default();
        self.contribute(resource_id, participants, &mut tally);
        tally
    }
}

#[derive(Debug, PartialEq, Eq, PartialOrd, Ord)]
enum CategoryRank {
    Adult,
    Numbered(std::cmp::Reverse<u64>),
    Other,
}

fn rank(label: &str) -> CategoryRank {
    if label.to_lowercase().contains("adult") {
        return CategoryRank::Adult;
    }
    match first_number(label) {
        Some(n) => CategoryRank::Numbered(std::cmp::Reverse(n)),
        None => CategoryRank::Other,
    }
}

/// First run of ASCII digits in `label`, e.g. 6 for "6 a 12 años".
fn first_number(label: &str) -> Option<u64> {
    let start = label.find(|c: char| c.is_ascii_digit())?;
    let digits: &str = &label[start..];
    let end = digits
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(digits.len());
    digits[..end].parse().ok()
}

fn compare_categories(a: &str, b: &str) -> Ordering {
    rank(a).cmp(&rank(b)).then_with(|| a.cmp(b))
}

/// Display order for a whole result set: adult categories first, then
/// categories carrying a number from highest to lowest, then the rest
/// alphabetically.
pub fn category_order<'a>(labels: impl IntoIterator<Item = &'a str>) -> Vec<String> {
    let unique: BTreeSet<&str> = labels.into_iter().collect();
    let mut ordered: Vec<&str> = unique.into_iter().collect();
    ordered.sort_by(|a, b| compare_categories(a, b));
    ordered.into_iter().map(str::to_string).collect()
}
