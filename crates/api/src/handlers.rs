/// Assignment editor endpoints: candidates and submissions
pub mod assignments;
/// Reconciled calendar endpoint
pub mod calendar;
