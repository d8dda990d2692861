use crate::error::AppError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// One row of the task table. `timestamp` holds the creation time as a
/// plain `YYYY-MM-DD HH:mm:ss` string, exactly as it appears in the slot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    pub key: u64,
    pub task: String,
    pub priority: Priority,
    pub deadline: String,
    pub status: Status,
    pub timestamp: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Priority {
    #[default]
    Low,
    Medium,
    High,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Status {
    #[default]
    Incomplete,
    Complete,
}

impl Priority {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Low => "Low",
            Self::Medium => "Medium",
            Self::High => "High",
        }
    }
}

impl Status {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Incomplete => "Incomplete",
            Self::Complete => "Complete",
        }
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Priority {
    type Err = AppError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let trimmed = value.trim();
        if trimmed.eq_ignore_ascii_case("low") {
            Ok(Self::Low)
        } else if trimmed.eq_ignore_ascii_case("medium") {
            Ok(Self::Medium)
        } else if trimmed.eq_ignore_ascii_case("high") {
            Ok(Self::High)
        } else {
            Err(AppError::invalid_input(format!(
                "priority must be Low, Medium or High (got '{trimmed}')"
            )))
        }
    }
}

impl FromStr for Status {
    type Err = AppError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let trimmed = value.trim();
        if trimmed.eq_ignore_ascii_case("incomplete") {
            Ok(Self::Incomplete)
        } else if trimmed.eq_ignore_ascii_case("complete") {
            Ok(Self::Complete)
        } else {
            Err(AppError::invalid_input(format!(
                "status must be Incomplete or Complete (got '{trimmed}')"
            )))
        }
    }
}
