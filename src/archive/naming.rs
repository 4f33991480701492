//! File naming conventions used inside the archive.
//!
//! Formatting and parsing are inverses: an entry name built by [`entry_name`] parses back to the
//! same radar and time.

use chrono::{DateTime, NaiveDate, NaiveDateTime, TimeZone, Utc};
use std::str::FromStr;

use crate::{errors::AuraDataErr, station::RadarId};

/// Extension of a daily container.
pub const CONTAINER_SUFFIX: &str = ".pvol.zip";

/// Extension of a volume inside a container.
pub const ENTRY_SUFFIX: &str = ".pvol.h5";

const DATE_FORMAT: &str = "%Y%m%d";
const DATETIME_FORMAT: &str = "%Y%m%d_%H%M%S";

/// Name of the container holding a radar's volumes for a day.
pub fn container_name(radar_id: RadarId, date: NaiveDate) -> String {
    format!(
        "{}_{}{}",
        radar_id,
        date.format(DATE_FORMAT),
        CONTAINER_SUFFIX
    )
}

/// Name of the entry for a radar's volume at a time.
pub fn entry_name(radar_id: RadarId, timestamp: DateTime<Utc>) -> String {
    format!(
        "{}_{}{}",
        radar_id,
        timestamp.format(DATETIME_FORMAT),
        ENTRY_SUFFIX
    )
}

/// Split a container name into radar and date, `None` if it does not follow the convention.
pub fn parse_container_name(name: &str) -> Option<(RadarId, NaiveDate)> {
    let stem = name.strip_suffix(CONTAINER_SUFFIX)?;

    let mut tokens = stem.split('_');
    let (id, date) = (tokens.next()?, tokens.next()?);
    if tokens.next().is_some() || !all_digits(date, 8) {
        return None;
    }

    let radar_id = RadarId::from_str(id).ok()?;
    let date = NaiveDate::parse_from_str(date, DATE_FORMAT).ok()?;

    Some((radar_id, date))
}

/// Split an entry name into radar and UTC scan time.
///
/// The archive stores naive clock times that are UTC by convention.
pub fn parse_entry_name(name: &str) -> Result<(RadarId, DateTime<Utc>), AuraDataErr> {
    let unrecognized = || AuraDataErr::UnrecognizedEntry(name.to_owned());

    let stem = name.strip_suffix(ENTRY_SUFFIX).ok_or_else(unrecognized)?;

    let tokens: Vec<&str> = stem.split('_').collect();
    if tokens.len() != 3 || !all_digits(tokens[1], 8) || !all_digits(tokens[2], 6) {
        return Err(unrecognized());
    }

    let radar_id = RadarId::from_str(tokens[0]).map_err(|_| unrecognized())?;
    let naive = NaiveDateTime::parse_from_str(&stem[tokens[0].len() + 1..], DATETIME_FORMAT)
        .map_err(|_| unrecognized())?;

    Ok((radar_id, Utc.from_utc_datetime(&naive)))
}

fn all_digits(token: &str, len: usize) -> bool {
    token.len() == len && token.bytes().all(|b| b.is_ascii_digit())
}

/*--------------------------------------------------------------------------------------------------
                                          Unit Tests
--------------------------------------------------------------------------------------------------*/
#[cfg(test)]
mod unit {
    use super::*;

    #[test]
    fn test_parse_entry_name() {
        let (radar_id, timestamp) = parse_entry_name("2_20251016_123456.pvol.h5").unwrap();

        assert_eq!(radar_id, RadarId::new(2));
        assert_eq!(
            timestamp,
            Utc.with_ymd_and_hms(2025, 10, 16, 12, 34, 56).unwrap()
        );
    }

    #[test]
    fn test_entry_names_round_trip() {
        let cases = &[
            (2, Utc.with_ymd_and_hms(2025, 10, 16, 0, 1, 23).unwrap()),
            (71, Utc.with_ymd_and_hms(1999, 2, 28, 23, 59, 59).unwrap()),
            (503, Utc.with_ymd_and_hms(2024, 2, 29, 12, 0, 0).unwrap()),
        ];

        for &(id, timestamp) in cases {
            let name = entry_name(RadarId::new(id), timestamp);
            assert_eq!(
                parse_entry_name(&name).unwrap(),
                (RadarId::new(id), timestamp)
            );
        }

        assert_eq!(
            entry_name(
                RadarId::new(2),
                Utc.with_ymd_and_hms(2025, 10, 16, 12, 30, 0).unwrap()
            ),
            "2_20251016_123000.pvol.h5"
        );
    }

    #[test]
    fn test_unrecognized_entry_names() {
        for bad in &[
            "invalid_filename.h5",
            "README.txt",
            "2_20251016_123456.pvol.h5.bak",
            "2_20251016_1234.pvol.h5",
            "2_2025101_123456.pvol.h5",
            "2_20251016_123456_extra.pvol.h5",
            "x_20251016_123456.pvol.h5",
            "2_20251332_123456.pvol.h5",
            "2_20251016_250000.pvol.h5",
            "2_+0251016_123456.pvol.h5",
            "sub/2_20251016_123456.pvol.h5",
        ] {
            match parse_entry_name(bad) {
                Err(AuraDataErr::UnrecognizedEntry(name)) => assert_eq!(&name, bad),
                other => panic!("{} parsed as {:?}", bad, other),
            }
        }
    }

    #[test]
    fn test_container_names() {
        let date = NaiveDate::from_ymd_opt(2025, 10, 1).unwrap();
        let name = container_name(RadarId::new(2), date);
        assert_eq!(name, "2_20251001.pvol.zip");
        assert_eq!(parse_container_name(&name), Some((RadarId::new(2), date)));

        assert_eq!(
            parse_container_name("002_20251001.pvol.zip"),
            Some((RadarId::new(2), date))
        );
        assert_eq!(parse_container_name("2_20251001.zip"), None);
        assert_eq!(parse_container_name("2_20251001_x.pvol.zip"), None);
        assert_eq!(parse_container_name("checksums.md5"), None);
    }
}
