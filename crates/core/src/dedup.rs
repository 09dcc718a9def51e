use std::collections::HashMap;

use tracing::debug;

use crate::models::booking::Booking;

/// Collapses booking revisions to the latest one per logical booking.
#[derive(Debug, Clone, Default)]
pub struct BookingDeduplicator {
    prefixes: Vec<String>,
}

impl BookingDeduplicator {
    /// `prefixes` are reseller prefixes stripped from booking ids before
    /// grouping, so `TTG-100` and `100` are the same booking.
    pub fn new(prefixes: impl IntoIterator<Item = impl Into<String>>) -> Self {
        Self {
            prefixes: prefixes.into_iter().map(Into::into).collect(),
        }
    }

    pub fn logical_id<'a>(&self, booking_id: &'a str) -> &'a str {
        let booking_id = booking_id.trim();
        self.prefixes
            .iter()
            .find_map(|prefix| booking_id.strip_prefix(prefix.as_str()))
            .unwrap_or(booking_id)
    }

    /// Keeps the row with the greatest `created_at` for each logical id.
    ///
    /// Output follows the order in which each logical id was first seen.
    /// On a `created_at` tie the earlier row wins.
    pub fn dedup(&self, bookings: impl IntoIterator<Item = Booking>) -> Vec<Booking> {
        let mut positions: HashMap<String, usize> = HashMap::new();
        let mut kept: Vec<Booking> = Vec::new();
        let mut revisions = 0usize;

        for booking in bookings {
            let identity = self.logical_id(&booking.booking_id).to_string();
            match positions.get(&identity) {
                Some(&pos) => {
                    revisions += 1;
                    if booking.created_at > kept[pos].created_at {
                        kept[pos] = booking;
                    }
                }
                None => {
                    positions.insert(identity, kept.len());
                    kept.push(booking);
                }
            }
        }

        debug!(kept = kept.len(), revisions, "Deduplicated booking revisions");
        kept
    }
}
