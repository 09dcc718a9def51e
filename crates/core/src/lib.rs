//! # TourDesk Core
//!
//! Slot reconciliation and resource-conflict engine for the tour operations
//! dashboard. Everything in this crate is synchronous and free of I/O: callers
//! fetch availability, booking and assignment rows for a date range, hand them
//! to [`reconcile::SlotReconciler`], and get back one [`models::slot::Slot`]
//! per activity/date/time.
//!
//! Pipeline:
//!
//! 1. [`dedup::BookingDeduplicator`] keeps the latest revision of each booking
//! 2. [`reconcile::SlotReconciler`] folds availability, bookings and
//!    assignments into slots keyed by [`time_key::TimeKey`]
//! 3. [`participants::ParticipantAggregator`] tallies participant categories
//! 4. [`conflict::ConflictDetector`] gates staff selection
//! 5. [`assignment_diff::diff`] computes the add/remove set to persist

pub mod assignment_diff;
pub mod conflict;
pub mod dedup;
pub mod errors;
pub mod models;
pub mod participants;
pub mod reconcile;
pub mod settings;
pub mod time_key;
