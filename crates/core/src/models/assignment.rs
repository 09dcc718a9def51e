use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::errors::TourError;
use crate::time_key::TimeKey;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StaffRole {
    Guide,
    Escort,
    Headphone,
    Printing,
}

impl StaffRole {
    pub const ALL: [StaffRole; 4] = [
        StaffRole::Guide,
        StaffRole::Escort,
        StaffRole::Headphone,
        StaffRole::Printing,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            StaffRole::Guide => "guide",
            StaffRole::Escort => "escort",
            StaffRole::Headphone => "headphone",
            StaffRole::Printing => "printing",
        }
    }
}

impl fmt::Display for StaffRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for StaffRole {
    type Err = TourError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        StaffRole::ALL
            .into_iter()
            .find(|role| role.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| TourError::Validation(format!("Unknown staff role: {}", s)))
    }
}

/// A staff resource bound to a slot. Persisted by the caller; the engine only
/// reads these and computes which ones to add or remove.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Assignment {
    pub slot: TimeKey,
    pub resource_id: String,
    pub resource_name: String,
    pub role: StaffRole,
}

/// Assignment as listed on a reconciled slot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssignedStaff {
    pub resource_id: String,
    pub resource_name: String,
}

/// Directory entry for a person or piece of equipment that can be assigned.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StaffMember {
    pub id: String,
    pub name: String,
    pub role: StaffRole,
}
