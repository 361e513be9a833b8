//! Sort options offered by the widget.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Field the service sorts by.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortField {
    Date,
    Rating,
    Helpfulness,
}

impl SortField {
    /// Query value for the `sort` parameter.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Date => "date",
            Self::Rating => "rating",
            Self::Helpfulness => "votes_up",
        }
    }
}

/// Sort direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortDirection {
    Asc,
    Desc,
}

impl SortDirection {
    /// Query value for the `direction` parameter.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Asc => "asc",
            Self::Desc => "desc",
        }
    }
}

/// The fixed set of (field, direction) pairs a shopper can pick.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SortOption {
    #[default]
    Newest,
    Oldest,
    HighestRated,
    LowestRated,
    MostHelpful,
}

impl SortOption {
    /// All options, in display order.
    pub const ALL: [SortOption; 5] = [
        Self::Newest,
        Self::Oldest,
        Self::HighestRated,
        Self::LowestRated,
        Self::MostHelpful,
    ];

    pub fn field(&self) -> SortField {
        match self {
            Self::Newest | Self::Oldest => SortField::Date,
            Self::HighestRated | Self::LowestRated => SortField::Rating,
            Self::MostHelpful => SortField::Helpfulness,
        }
    }

    pub fn direction(&self) -> SortDirection {
        match self {
            Self::Oldest | Self::LowestRated => SortDirection::Asc,
            Self::Newest | Self::HighestRated | Self::MostHelpful => SortDirection::Desc,
        }
    }

    /// Value used in the sort `<select>`.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Newest => "newest",
            Self::Oldest => "oldest",
            Self::HighestRated => "highest-rated",
            Self::LowestRated => "lowest-rated",
            Self::MostHelpful => "most-helpful",
        }
    }

    /// Human-readable label.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Newest => "Most Recent",
            Self::Oldest => "Oldest",
            Self::HighestRated => "Highest Rating",
            Self::LowestRated => "Lowest Rating",
            Self::MostHelpful => "Most Helpful",
        }
    }
}

impl fmt::Display for SortOption {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Unknown sort option value.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Unknown sort option: {0}")]
pub struct UnknownSortOption(pub String);

impl FromStr for SortOption {
    type Err = UnknownSortOption;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|opt| opt.as_str() == s)
            .ok_or_else(|| UnknownSortOption(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_query_encoding() {
        assert_eq!(SortOption::Newest.field().as_str(), "date");
        assert_eq!(SortOption::Newest.direction().as_str(), "desc");
        assert_eq!(SortOption::Oldest.direction().as_str(), "asc");
        assert_eq!(SortOption::LowestRated.field().as_str(), "rating");
        assert_eq!(SortOption::LowestRated.direction().as_str(), "asc");
        assert_eq!(SortOption::MostHelpful.field().as_str(), "votes_up");
        assert_eq!(SortOption::MostHelpful.direction().as_str(), "desc");
    }

    #[test]
    fn test_parse_every_option() {
        for opt in SortOption::ALL {
            assert_eq!(opt.as_str().parse::<SortOption>(), Ok(opt));
        }
        assert!("random".parse::<SortOption>().is_err());
    }

    #[test]
    fn test_default_is_newest() {
        assert_eq!(SortOption::default(), SortOption::Newest);
    }
}
