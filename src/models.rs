use crate::errors::AppError;
use std::fmt;
use std::str::FromStr;

/// Category of schedule data to download.
///
/// Parsing is exact-match only: the three lowercase wire tokens are the
/// complete accepted set, and anything else (case variants, padding) is
/// rejected before any network activity happens.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResourceType {
    Rooms,
    Teachers,
    Students,
}

impl ResourceType {
    /// Returns the lowercase token used in query strings and file names.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Rooms => "rooms",
            Self::Teachers => "teachers",
            Self::Students => "students",
        }
    }
}

impl FromStr for ResourceType {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "rooms" => Ok(Self::Rooms),
            "teachers" => Ok(Self::Teachers),
            "students" => Ok(Self::Students),
            other => Err(AppError::InvalidResourceType(other.to_string())),
        }
    }
}

impl fmt::Display for ResourceType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
