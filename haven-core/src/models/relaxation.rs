use std::fmt;

use serde::{Deserialize, Serialize};

/// The four ordered retrieval stages. Ordering follows looseness.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum RelaxationLevel {
    Permanent,
    Slight,
    Moderate,
    Significant,
}

impl RelaxationLevel {
    /// All levels in the order they are attempted.
    pub const ALL: [RelaxationLevel; 4] = [
        Self::Permanent,
        Self::Slight,
        Self::Moderate,
        Self::Significant,
    ];

    pub fn index(&self) -> usize {
        match self {
            Self::Permanent => 0,
            Self::Slight => 1,
            Self::Moderate => 2,
            Self::Significant => 3,
        }
    }

    /// The next looser level, or `None` after the last one.
    pub fn next(&self) -> Option<RelaxationLevel> {
        Self::ALL.get(self.index() + 1).copied()
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::Permanent => "permanent",
            Self::Slight => "slight",
            Self::Moderate => "moderate",
            Self::Significant => "significant",
        }
    }

    /// Description handed to the explanation step.
    pub fn description(&self) -> &'static str {
        match self {
            Self::Permanent => "All of your stated requirements were applied exactly.",
            Self::Slight => {
                "No exact matches, so the price range and search area were widened slightly."
            }
            Self::Moderate => {
                "No close matches, so the price range and area were widened and one fewer bedroom or bathroom was allowed."
            }
            Self::Significant => {
                "Few matches exist, so the price range and search area were widened significantly."
            }
        }
    }
}

impl fmt::Display for RelaxationLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
