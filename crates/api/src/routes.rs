pub mod assignments;
pub mod calendar;
pub mod health;
