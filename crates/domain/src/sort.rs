//! Listing sort orders understood by the backend.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{DomainError, DomainResult};

/// Sort order for meal and recipe listings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortOption {
    /// Alphabetical.
    NameAsc,
    /// Reverse alphabetical.
    NameDesc,
    /// Best rated first.
    RatingHigh,
    /// Worst rated first.
    RatingLow,
    /// Most recent first.
    DateNewest,
    /// Oldest first.
    DateOldest,
}

impl SortOption {
    /// Returns the wire name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::NameAsc => "name_asc",
            Self::NameDesc => "name_desc",
            Self::RatingHigh => "rating_high",
            Self::RatingLow => "rating_low",
            Self::DateNewest => "date_newest",
            Self::DateOldest => "date_oldest",
        }
    }
}

impl fmt::Display for SortOption {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SortOption {
    type Err = DomainError;

    fn from_str(s: &str) -> DomainResult<Self> {
        match s {
            "name_asc" => Ok(Self::NameAsc),
            "name_desc" => Ok(Self::NameDesc),
            "rating_high" => Ok(Self::RatingHigh),
            "rating_low" => Ok(Self::RatingLow),
            "date_newest" => Ok(Self::DateNewest),
            "date_oldest" => Ok(Self::DateOldest),
            other => Err(DomainError::UnknownSortOption(other.to_string())),
        }
    }
}
