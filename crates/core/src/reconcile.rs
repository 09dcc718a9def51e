//! Folds availability, booking and assignment rows into one [`Slot`] per
//! [`TimeKey`].
//!
//! Availability rows seed the slots. Bookings without a matching availability
//! row get a synthesized slot with zeroed capacity and
//! [`SlotStatus::NoAvailabilityRecord`], so orphans stay visible. Rows whose
//! key fields are missing are skipped and counted in [`ReconcileWarnings`];
//! they never fail the batch.

use std::collections::{BTreeMap, HashMap};

use tracing::{debug, warn};

use crate::dedup::BookingDeduplicator;
use crate::models::{
    assignment::{AssignedStaff, Assignment},
    availability::Availability,
    booking::Booking,
    calendar::CalendarRows,
    slot::{ReconcileWarnings, Reconciliation, ReservationMarker, Slot, SlotStatus},
};
use crate::participants::{category_order, ParticipantAggregator, ParticipantTally};
use crate::settings::EngineSettings;
use crate::time_key::{split_timestamp, TimeKey};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ReconcileOptions {
    pub include_cancelled: bool,
}

pub struct SlotReconciler<'a> {
    settings: &'a EngineSettings,
}

impl<'a> SlotReconciler<'a> {
    pub fn new(settings: &'a EngineSettings) -> Self {
        Self { settings }
    }

    /// Runs the full pipeline: dedup, seed, fold bookings, attach assignments,
    /// then sort by date, time and activity title.
    pub fn reconcile(&self, rows: CalendarRows, options: ReconcileOptions) -> Reconciliation {
        let CalendarRows {
            availabilities,
            bookings,
            assignments,
        } = rows;

        let mut warnings = ReconcileWarnings::default();

        // Revisions without a slot key never replace an earlier valid revision
        let bookings = bookings.into_iter().filter(|booking| {
            let keyed = booking_key(booking).is_some();
            if !keyed {
                warnings.malformed_bookings += 1;
            }
            keyed
        });

        let deduplicator = BookingDeduplicator::new(&self.settings.booking_id_prefixes);
        let bookings: Vec<Booking> = deduplicator
            .dedup(bookings)
            .into_iter()
            .filter(|booking| {
                let keep = options.include_cancelled || !booking.status.is_cancelled();
                if !keep {
                    warnings.cancelled_excluded += 1;
                }
                keep
            })
            .collect();

        let mut slots = seed_slots(&availabilities, &mut warnings);
        self.fold_bookings(&mut slots, bookings, &mut warnings);
        attach_assignments(&mut slots, &assignments, &mut warnings);

        let mut slots: Vec<Slot> = slots.into_values().collect();
        slots.sort_by(|a, b| {
            a.key
                .date()
                .cmp(b.key.date())
                .then_with(|| a.key.time().cmp(b.key.time()))
                .then_with(|| a.activity_title.cmp(&b.activity_title))
                .then_with(|| a.key.resource_id().cmp(b.key.resource_id()))
        });

        let category_order = category_order(
            slots
                .iter()
                .flat_map(|slot| slot.participants.keys().map(String::as_str)),
        );

        if warnings.is_empty() {
            debug!(slots = slots.len(), "Reconciled calendar");
        } else {
            warn!(
                slots = slots.len(),
                malformed_bookings = warnings.malformed_bookings,
                malformed_availability = warnings.malformed_availability,
                duplicate_availability = warnings.duplicate_availability,
                unmatched_assignments = warnings.unmatched_assignments,
                cancelled_excluded = warnings.cancelled_excluded,
                "Reconciled calendar with skipped records"
            );
        }

        Reconciliation {
            slots,
            category_order,
            warnings,
        }
    }

    fn fold_bookings(
        &self,
        slots: &mut HashMap<TimeKey, Slot>,
        bookings: Vec<Booking>,
        warnings: &mut ReconcileWarnings,
    ) {
        let aggregator = ParticipantAggregator::new(&self.settings.category_exclusions);

        for booking in bookings {
            let Some(key) = booking_key(&booking) else {
                warnings.malformed_bookings += 1;
                continue;
            };

            let slot = slots
                .entry(key)
                .or_insert_with_key(|key| orphan_slot(key, &booking.activity_title));

            let mut tally = ParticipantTally {
                by_category: std::mem::take(&mut slot.participants),
                total: slot.total_participants,
            };
            aggregator.contribute(slot.key.resource_id(), &booking.participants, &mut tally);
            slot.participants = tally.by_category;
            slot.total_participants = tally.total;

            slot.booking_count += 1;
            slot.total_amount += booking.total_price;
            track_reservations(slot, &booking);
            slot.bookings.push(booking);
        }
    }
}

fn seed_slots(availabilities: &[Availability], warnings: &mut ReconcileWarnings) -> HashMap<TimeKey, Slot> {
    let mut slots = HashMap::with_capacity(availabilities.len());

    for availability in availabilities {
        if !availability.is_well_formed() {
            warnings.malformed_availability += 1;
            continue;
        }

        let key = availability.time_key();
        if slots.contains_key(&key) {
            warnings.duplicate_availability += 1;
            continue;
        }

        slots.insert(
            key.clone(),
            Slot {
                key,
                activity_title: availability.activity_title.clone(),
                status: availability.status.into(),
                vacancy_opening: availability.vacancy_opening,
                vacancy_sold: availability.vacancy_sold,
                vacancy_available: availability.vacancy_available,
                booking_count: 0,
                total_amount: 0.0,
                participants: BTreeMap::new(),
                total_participants: 0,
                bookings: Vec::new(),
                first_reservation: None,
                last_reservation: None,
                assignments: BTreeMap::new(),
            },
        );
    }

    slots
}

fn booking_key(booking: &Booking) -> Option<TimeKey> {
    if booking.activity_id.trim().is_empty() {
        return None;
    }
    let (date, time) = split_timestamp(&booking.start_date_time)?;
    Some(TimeKey::new(booking.activity_id.as_str(), date, time))
}

fn orphan_slot(key: &TimeKey, activity_title: &str) -> Slot {
    Slot {
        key: key.clone(),
        activity_title: activity_title.to_string(),
        status: SlotStatus::NoAvailabilityRecord,
        vacancy_opening: 0,
        vacancy_sold: 0,
        vacancy_available: 0,
        booking_count: 0,
        total_amount: 0.0,
        participants: BTreeMap::new(),
        total_participants: 0,
        bookings: Vec::new(),
        first_reservation: None,
        last_reservation: None,
        assignments: BTreeMap::new(),
    }
}

fn track_reservations(slot: &mut Slot, booking: &Booking) {
    let marker = || ReservationMarker {
        booking_id: booking.booking_id.clone(),
        created_at: booking.created_at,
    };

    match &slot.first_reservation {
        Some(first) if first.created_at <= booking.created_at => {}
        _ => slot.first_reservation = Some(marker()),
    }
    match &slot.last_reservation {
        Some(last) if last.created_at >= booking.created_at => {}
        _ => slot.last_reservation = Some(marker()),
    }
}

fn attach_assignments(
    slots: &mut HashMap<TimeKey, Slot>,
    assignments: &[Assignment],
    warnings: &mut ReconcileWarnings,
) {
    for assignment in assignments {
        let Some(slot) = slots.get_mut(&assignment.slot) else {
            warnings.unmatched_assignments += 1;
            continue;
        };

        let staff = slot.assignments.entry(assignment.role).or_default();
        if staff
            .iter()
            .any(|existing| existing.resource_id == assignment.resource_id)
        {
            continue;
        }
        staff.push(AssignedStaff {
            resource_id: assignment.resource_id.clone(),
            resource_name: assignment.resource_name.clone(),
        });
    }
}
