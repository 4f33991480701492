//! Radar station metadata that changes over time.
//!
//! A radar keeps its identifier through hardware upgrades, so the station table holds one
//! [`StationRecord`] per configuration, each valid over a half-open interval of dates. The
//! [`StationDirectory`] groups them by radar and answers "what did radar N look like on date D".

use chrono::NaiveDate;
use std::{collections::BTreeMap, io::Read, path::Path};

use crate::errors::AuraDataErr;

pub use band::Band;
pub use filter::{FilterKey, StationFilter};
pub use radar_id::RadarId;
pub use state::State;

mod band;
mod filter;
mod radar_id;
mod state;
mod table;

/// One configuration of a radar site.
#[allow(missing_docs)]
#[derive(Debug, Clone, PartialEq)]
pub struct StationRecord {
    pub id: RadarId,
    /// Identifier with the configuration suffix, e.g. `002_3`.
    pub id_long: String,
    /// WMO Integrated Global Observing System identifier.
    pub wigos: String,
    pub short_name: String,
    /// Human readable place name.
    pub location: String,
    /// Radar model, e.g. `Meteor1500S`.
    pub radar_type: String,
    /// First day of this configuration, `None` if open ended.
    pub valid_from: Option<NaiveDate>,
    /// First day this configuration no longer applies, `None` while it is current.
    pub valid_to: Option<NaiveDate>,
    pub site: SiteLocation,
    pub status: String,
    pub band: Option<Band>,
    pub doppler: bool,
    pub dual_pol: bool,
    /// Antenna beamwidth in degrees.
    pub beamwidth: f64,
    pub state: Option<State>,
    pub notes: String,
}

/// Where the antenna is.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct SiteLocation {
    /// Decimal degrees.
    pub lat: f64,
    /// Decimal degrees.
    pub lon: f64,
    /// Ground elevation in meters.
    pub ground_altitude: f64,
    /// Antenna height in meters above sea level.
    pub site_altitude: f64,
}

impl StationRecord {
    /// Alias for the location.
    pub fn name(&self) -> &str {
        &self.location
    }

    /// Whether this configuration is still in service.
    pub fn is_current(&self) -> bool {
        self.valid_to.is_none()
    }

    /// Whether this is an S-band radar.
    pub fn is_s_band(&self) -> bool {
        self.band == Some(Band::S)
    }

    /// Whether this is a C-band radar.
    pub fn is_c_band(&self) -> bool {
        self.band == Some(Band::C)
    }

    /// Check if this configuration was in service on the given date.
    pub fn active_at(&self, date: NaiveDate) -> bool {
        self.valid_from.map_or(true, |from| from <= date)
            && self.valid_to.map_or(true, |to| date < to)
    }

    // True if the two validity intervals share at least one day. Assumes `self` starts first.
    fn overlaps_next(&self, next: &StationRecord) -> bool {
        match (self.valid_to, next.valid_from) {
            (None, _) | (_, None) => true,
            (Some(to), Some(from)) => from < to,
        }
    }
}

/// Every configuration of every radar, grouped by radar and sorted by start date.
///
/// Read-only once built. Load it again to pick up a changed table.
#[derive(Debug, Clone, Default)]
pub struct StationDirectory {
    by_radar: BTreeMap<RadarId, Vec<StationRecord>>,
}

impl StationDirectory {
    /// Load the station table from a csv file.
    pub fn load(path: &dyn AsRef<Path>) -> Result<Self, AuraDataErr> {
        let path = path.as_ref();
        let file = match std::fs::File::open(path) {
            Ok(file) => file,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
                return Err(AuraDataErr::StationTableNotFound(path.to_path_buf()))
            }
            Err(err) => return Err(AuraDataErr::file_io(path, err)),
        };

        // Failing to read the file names the file; bad content stays a csv error.
        let dir = Self::from_reader(file).map_err(|err| match err {
            AuraDataErr::Csv(cause) if cause.is_io_error() => {
                let io_err = match cause.into_kind() {
                    csv::ErrorKind::Io(io_err) => io_err,
                    kind => std::io::Error::new(std::io::ErrorKind::Other, format!("{:?}", kind)),
                };
                AuraDataErr::file_io(path, io_err)
            }
            other => other,
        })?;
        log::info!(
            "loaded {} radars from {}",
            dir.by_radar.len(),
            path.display()
        );
        Ok(dir)
    }

    /// Load the station table from any csv source.
    pub fn from_reader<R: Read>(rdr: R) -> Result<Self, AuraDataErr> {
        let records = table::read_site_list(rdr)?;
        Ok(Self::from_records(records))
    }

    /// Build a directory from already parsed records.
    pub fn from_records(records: impl IntoIterator<Item = StationRecord>) -> Self {
        let mut by_radar: BTreeMap<RadarId, Vec<StationRecord>> = BTreeMap::new();
        for record in records {
            by_radar.entry(record.id).or_default().push(record);
        }

        for (radar_id, configs) in by_radar.iter_mut() {
            configs.sort_by_key(|rec| rec.valid_from);

            for pair in configs.windows(2) {
                if pair[0].overlaps_next(&pair[1]) {
                    log::warn!(
                        "radar {}: configurations {} and {} overlap",
                        radar_id,
                        pair[0].id_long,
                        pair[1].id_long
                    );
                }
            }
        }

        StationDirectory { by_radar }
    }

    /// Configuration of a radar as of a date, or the current one when no date is given.
    ///
    /// Without a date this is the configuration with no end date, or failing that the one that
    /// started last.
    pub fn resolve(
        &self,
        radar_id: RadarId,
        as_of: Option<NaiveDate>,
    ) -> Result<&StationRecord, AuraDataErr> {
        let configs = self
            .by_radar
            .get(&radar_id)
            .filter(|configs| !configs.is_empty())
            .ok_or(AuraDataErr::UnknownRadar(radar_id))?;

        match as_of {
            Some(date) => configs
                .iter()
                .find(|rec| rec.active_at(date))
                .ok_or(AuraDataErr::NoConfigurationAtDate { radar_id, date }),
            None => configs
                .iter()
                .rev()
                .find(|rec| rec.is_current())
                .or_else(|| configs.last())
                .ok_or(AuraDataErr::UnknownRadar(radar_id)),
        }
    }

    /// The current configuration of a radar.
    pub fn current(&self, radar_id: RadarId) -> Result<&StationRecord, AuraDataErr> {
        self.resolve(radar_id, None)
    }

    /// Current configuration of every radar matching all of the `(key, value)` filters.
    ///
    /// Recognized keys are listed in [`FilterKey`]; anything else is an
    /// [`InvalidFilter`](AuraDataErr::InvalidFilter) error.
    pub fn list_all<'a, I>(&self, filters: I) -> Result<Vec<&StationRecord>, AuraDataErr>
    where
        I: IntoIterator<Item = (&'a str, &'a str)>,
    {
        let filters = filters
            .into_iter()
            .map(|(key, value)| StationFilter::parse(key, value))
            .collect::<Result<Vec<_>, _>>()?;

        Ok(self.list_matching(&filters))
    }

    /// Current configuration of every radar matching all of the filters.
    pub fn list_matching(&self, filters: &[StationFilter]) -> Vec<&StationRecord> {
        self.by_radar
            .keys()
            .filter_map(|&radar_id| self.current(radar_id).ok())
            .filter(|rec| filters.iter().all(|filter| filter.matches(rec)))
            .collect()
    }

    /// All configurations of one radar, oldest first. Empty for an unknown radar.
    pub fn configurations(&self, radar_id: RadarId) -> &[StationRecord] {
        self.by_radar
            .get(&radar_id)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Every configuration of every radar.
    pub fn records(&self) -> impl Iterator<Item = &StationRecord> {
        self.by_radar.values().flat_map(|configs| configs.iter())
    }

    /// Sorted list of radars in the table.
    pub fn radar_ids(&self) -> Vec<RadarId> {
        self.by_radar.keys().copied().collect()
    }
}

/*--------------------------------------------------------------------------------------------------
                                          Unit Tests
--------------------------------------------------------------------------------------------------*/
