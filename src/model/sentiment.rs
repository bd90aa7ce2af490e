use serde::{Deserialize, Serialize};
use std::fmt;

/// Averages strictly above this are positive
pub const POSITIVE_THRESHOLD: f64 = 0.3;

/// Averages strictly below this are negative
pub const NEGATIVE_THRESHOLD: f64 = -0.3;

/// Three-way sentiment label
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Sentiment {
    Positive,
    Neutral,
    Negative,
}

impl Sentiment {
    /// Numeric score: positive → 1, neutral → 0, negative → -1
    pub fn score(self) -> i8 {
        match self {
            Self::Positive => 1,
            Self::Neutral => 0,
            Self::Negative => -1,
        }
    }

    /// Maps an average score onto a label
    ///
    /// Both boundaries are exclusive, so exactly `0.3` and `-0.3` are neutral.
    pub fn from_average(average: f64) -> Self {
        if average > POSITIVE_THRESHOLD {
            Self::Positive
        } else if average < NEGATIVE_THRESHOLD {
            Self::Negative
        } else {
            Self::Neutral
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Positive => "positive",
            Self::Neutral => "neutral",
            Self::Negative => "negative",
        }
    }
}

impl fmt::Display for Sentiment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
