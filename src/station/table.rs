//! Parsing the `radar_site_list.csv` station table.

use chrono::NaiveDate;
use serde::Deserialize;
use std::{io::Read, str::FromStr};

use super::{Band, RadarId, SiteLocation, State, StationRecord};
use crate::errors::AuraDataErr;

const TABLE_DATE_FORMAT: &str = "%d/%m/%Y";

// One row as it appears in the file. Only the identifying columns are required.
#[derive(Debug, Deserialize)]
struct SiteListRow {
    id: String,
    id_long: String,
    #[serde(rename = "WIGOS", default)]
    wigos: String,
    short_name: String,
    location: String,
    radar_type: String,
    #[serde(default)]
    postchange_start: String,
    #[serde(default)]
    prechange_end: String,
    #[serde(default)]
    site_lat: String,
    #[serde(default)]
    site_lon: String,
    #[serde(default)]
    ge_ground_altitude: String,
    #[serde(default)]
    site_alt: String,
    #[serde(default)]
    status: String,
    #[serde(default)]
    band: String,
    #[serde(default)]
    doppler: String,
    #[serde(default)]
    dp: String,
    #[serde(default)]
    beamwidth: String,
    #[serde(default)]
    state: String,
    #[serde(default)]
    notes: String,
}

/// Read every well formed row. Rows that cannot be understood are logged and skipped.
pub(super) fn read_site_list<R: Read>(rdr: R) -> Result<Vec<StationRecord>, AuraDataErr> {
    let mut rdr = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(rdr);

    let mut records = vec![];
    for (row_num, row) in rdr.deserialize::<SiteListRow>().enumerate() {
        let row = match row {
            Ok(row) => row,
            Err(err) if err.is_io_error() => return Err(err.into()),
            Err(err) => {
                log::warn!("skipping malformed row {} in radar site list: {}", row_num + 1, err);
                continue;
            }
        };

        match parse_row(row) {
            Ok(record) => records.push(record),
            Err(err) => log::warn!(
                "skipping malformed row {} in radar site list: {}",
                row_num + 1,
                err
            ),
        }
    }

    Ok(records)
}

fn parse_row(row: SiteListRow) -> Result<StationRecord, AuraDataErr> {
    let id = RadarId::from_str(&row.id)?;

    // The table lists the last day in service; records store the first day out of service.
    let valid_to = parse_date(&row.prechange_end).and_then(|last| last.succ_opt());

    Ok(StationRecord {
        id,
        id_long: row.id_long,
        wigos: row.wigos,
        short_name: row.short_name,
        location: row.location,
        radar_type: row.radar_type,
        valid_from: parse_date(&row.postchange_start),
        valid_to,
        site: SiteLocation {
            lat: parse_float(&row.site_lat, 0.0),
            lon: parse_float(&row.site_lon, 0.0),
            ground_altitude: parse_float(&row.ge_ground_altitude, 0.0),
            site_altitude: parse_float(&row.site_alt, 0.0),
        },
        status: row.status,
        band: Band::parse_loose(&row.band),
        doppler: parse_yes(&row.doppler),
        dual_pol: parse_yes(&row.dp),
        beamwidth: parse_float(&row.beamwidth, 1.0),
        state: State::parse_loose(&row.state),
        notes: row.notes,
    })
}

fn parse_date(value: &str) -> Option<NaiveDate> {
    if value.is_empty() || value == "-" {
        return None;
    }

    NaiveDate::parse_from_str(value, TABLE_DATE_FORMAT).ok()
}

fn parse_yes(value: &str) -> bool {
    value.eq_ignore_ascii_case("yes")
}

fn parse_float(value: &str, default: f64) -> f64 {
    value.parse().unwrap_or(default)
}
