// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Acrostic-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Acrostic and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Day-of-week key for the daily puzzle rotation.
///
/// Serialized lowercase so it doubles as the `puzzles/<dow>.json` store key
/// and as a map key in player cross-references.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Dow {
    Monday,
    Tuesday,
    Wednesday,
    Thursday,
    Friday,
    Saturday,
    Sunday,
}

impl Dow {
    pub const ALL: [Dow; 7] = [
        Dow::Monday,
        Dow::Tuesday,
        Dow::Wednesday,
        Dow::Thursday,
        Dow::Friday,
        Dow::Saturday,
        Dow::Sunday,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Monday => "monday",
            Self::Tuesday => "tuesday",
            Self::Wednesday => "wednesday",
            Self::Thursday => "thursday",
            Self::Friday => "friday",
            Self::Saturday => "saturday",
            Self::Sunday => "sunday",
        }
    }
}

impl fmt::Display for Dow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseDowError {
    pub value: String,
}

impl fmt::Display for ParseDowError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "not a day of week: {:?}", self.value)
    }
}

impl std::error::Error for ParseDowError {}

impl FromStr for Dow {
    type Err = ParseDowError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|dow| dow.as_str() == s)
            .ok_or_else(|| ParseDowError {
                value: s.to_owned(),
            })
    }
}

#[cfg(test)]
mod tests {
    use super::Dow;

    #[test]
    fn dow_round_trips_through_str() {
        for dow in Dow::ALL {
            assert_eq!(dow.as_str().parse::<Dow>(), Ok(dow));
        }
    }

    #[test]
    fn dow_serializes_lowercase() {
        let json = serde_json::to_string(&Dow::Wednesday).expect("serialize");
        assert_eq!(json, "\"wednesday\"");
    }

    #[test]
    fn parse_rejects_unknown() {
        assert!("someday".parse::<Dow>().is_err());
    }
}
