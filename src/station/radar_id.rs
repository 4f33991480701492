use crate::errors::AuraDataErr;
use serde::{Deserialize, Serialize};
use std::{fmt::Display, str::FromStr};

/// New type wrapper for a numeric radar identifier.
///
/// The archive writes identifiers without leading zeros (`2`), the station table sometimes with
/// them (`002`). Both parse to the same value.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RadarId {
    num: u32,
}

impl From<u32> for RadarId {
    fn from(val: u32) -> Self {
        RadarId { num: val }
    }
}

impl From<RadarId> for u32 {
    fn from(id: RadarId) -> u32 {
        id.num
    }
}

impl Display for RadarId {
    fn fmt(&self, formatter: &mut std::fmt::Formatter) -> Result<(), std::fmt::Error> {
        write!(formatter, "{}", self.num)
    }
}

impl FromStr for RadarId {
    type Err = AuraDataErr;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if trimmed.is_empty() || !trimmed.bytes().all(|b| b.is_ascii_digit()) {
            return Err(AuraDataErr::InvalidRadarId(s.to_owned()));
        }

        trimmed
            .parse::<u32>()
            .map(RadarId::from)
            .map_err(|_| AuraDataErr::InvalidRadarId(s.to_owned()))
    }
}

impl RadarId {
    /// Create a new one.
    pub const fn new(num: u32) -> Self {
        RadarId { num }
    }

    /// The identifier as a plain number.
    pub const fn as_u32(self) -> u32 {
        self.num
    }
}

#[cfg(test)]
mod unit {
    use super::*;

    #[test]
    fn test_parse_with_and_without_leading_zeros() {
        assert_eq!(RadarId::from_str("2").unwrap(), RadarId::new(2));
        assert_eq!(RadarId::from_str("002").unwrap(), RadarId::new(2));
        assert_eq!(RadarId::from_str(" 71 ").unwrap(), RadarId::new(71));
    }

    #[test]
    fn test_parse_rejects_garbage() {
        for bad in &["", "x2", "-2", "+2", "2.0", "99999999999"] {
            match RadarId::from_str(bad) {
                Err(AuraDataErr::InvalidRadarId(_)) => {}
                other => panic!("{:?} parsed as {:?}", bad, other),
            }
        }
    }

    #[test]
    fn test_display_drops_leading_zeros() {
        assert_eq!(RadarId::from_str("002").unwrap().to_string(), "2");
    }
}
