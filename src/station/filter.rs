use std::str::FromStr;
use strum_macros::{EnumIter, EnumString, IntoStaticStr};

use super::{Band, State, StationRecord};
use crate::errors::AuraDataErr;

/// Attributes a station listing can be filtered on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumString, IntoStaticStr, EnumIter)]
#[allow(missing_docs)]
pub enum FilterKey {
    #[strum(to_string = "band")]
    Band,
    #[strum(to_string = "state")]
    State,
    #[strum(to_string = "dual_pol")]
    DualPol,
    #[strum(to_string = "doppler")]
    Doppler,
    #[strum(to_string = "radar_type")]
    RadarType,
    #[strum(to_string = "status")]
    Status,
}

impl FilterKey {
    /// Get a static string representation.
    pub fn as_static_str(self) -> &'static str {
        self.into()
    }
}

/// One condition on a station record.
#[derive(Debug, Clone, PartialEq)]
pub enum StationFilter {
    /// Transmits in this band.
    Band(Band),
    /// Located in this state or territory.
    State(State),
    /// Has, or lacks, dual polarization.
    DualPol(bool),
    /// Has, or lacks, Doppler capability.
    Doppler(bool),
    /// Radar model, compared ignoring case.
    RadarType(String),
    /// Operational status, compared ignoring case.
    Status(String),
}

impl StationFilter {
    /// Build a filter from a key and a textual value.
    pub fn parse(key: &str, value: &str) -> Result<Self, AuraDataErr> {
        let key = FilterKey::from_str(&key.trim().to_lowercase())
            .map_err(|_| AuraDataErr::InvalidFilter(format!("unknown key `{}`", key)))?;

        let bad_value = || {
            AuraDataErr::InvalidFilter(format!(
                "bad value `{}` for `{}`",
                value,
                key.as_static_str()
            ))
        };

        let filter = match key {
            FilterKey::Band => StationFilter::Band(Band::parse_loose(value).ok_or_else(bad_value)?),
            FilterKey::State => {
                StationFilter::State(State::parse_loose(value).ok_or_else(bad_value)?)
            }
            FilterKey::DualPol => StationFilter::DualPol(parse_flag(value).ok_or_else(bad_value)?),
            FilterKey::Doppler => StationFilter::Doppler(parse_flag(value).ok_or_else(bad_value)?),
            FilterKey::RadarType => StationFilter::RadarType(value.trim().to_owned()),
            FilterKey::Status => StationFilter::Status(value.trim().to_owned()),
        };

        Ok(filter)
    }

    /// The attribute this filter looks at.
    pub fn key(&self) -> FilterKey {
        match self {
            StationFilter::Band(_) => FilterKey::Band,
            StationFilter::State(_) => FilterKey::State,
            StationFilter::DualPol(_) => FilterKey::DualPol,
            StationFilter::Doppler(_) => FilterKey::Doppler,
            StationFilter::RadarType(_) => FilterKey::RadarType,
            StationFilter::Status(_) => FilterKey::Status,
        }
    }

    /// Test a record.
    pub fn matches(&self, rec: &StationRecord) -> bool {
        match self {
            StationFilter::Band(band) => rec.band == Some(*band),
            StationFilter::State(state) => rec.state == Some(*state),
            StationFilter::DualPol(flag) => rec.dual_pol == *flag,
            StationFilter::Doppler(flag) => rec.doppler == *flag,
            StationFilter::RadarType(kind) => rec.radar_type.eq_ignore_ascii_case(kind),
            StationFilter::Status(status) => rec.status.eq_ignore_ascii_case(status),
        }
    }
}

fn parse_flag(value: &str) -> Option<bool> {
    match value.trim().to_lowercase().as_str() {
        "true" | "yes" | "y" | "1" => Some(true),
        "false" | "no" | "n" | "0" => Some(false),
        _ => None,
    }
}
