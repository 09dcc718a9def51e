//! Mock collaborators for handler and integration tests.

pub use crate::collaborators::{MockAssignmentStore, MockCalendarSource};
