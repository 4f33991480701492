//! Queries against the archive at the process-wide base path.
//!
//! Each call looks up [`base_path`](crate::config::base_path) again, so a call made after
//! [`set_base_path`](crate::config::set_base_path) sees the new location. Use an [`Archive`]
//! directly to work with a fixed root instead.

use chrono::{DateTime, Duration, NaiveDate, TimeZone};
use std::{
    path::PathBuf,
    sync::{Arc, RwLock},
};

use crate::{
    archive::{Archive, DateScope},
    errors::AuraDataErr,
    inventory::Inventory,
    station::{RadarId, StationDirectory, StationRecord},
    volume::{ReadOptions, VolumeList, VolumeReader, VolumeRef},
};

/// Every volume a radar scanned on one UTC day. See [`Archive::volumes_on`].
pub fn volumes_on(radar_id: RadarId, date: NaiveDate) -> Result<VolumeList, AuraDataErr> {
    Archive::from_config().volumes_on(radar_id, date)
}

/// Every volume a radar scanned over a range of days. See [`Archive::volumes_between`].
pub fn volumes_between(
    radar_id: RadarId,
    start: NaiveDate,
    end: NaiveDate,
) -> Result<VolumeList, AuraDataErr> {
    Archive::from_config().volumes_between(radar_id, start, end)
}

/// The volume nearest to a time. See [`Archive::volume_nearest`].
pub fn volume_nearest<Tz: TimeZone>(
    radar_id: RadarId,
    time: &DateTime<Tz>,
) -> Result<VolumeRef, AuraDataErr> {
    Archive::from_config().volume_nearest(radar_id, time)
}

/// The volume scanned exactly at a time. See [`Archive::volume_exact`].
pub fn volume_exact<Tz: TimeZone>(
    radar_id: RadarId,
    time: &DateTime<Tz>,
) -> Result<VolumeRef, AuraDataErr> {
    Archive::from_config().volume_exact(radar_id, time)
}

/// The nearest volume within a tolerance. See [`Archive::volume_within`].
pub fn volume_within<Tz: TimeZone>(
    radar_id: RadarId,
    time: &DateTime<Tz>,
    tolerance: Duration,
) -> Result<Option<VolumeRef>, AuraDataErr> {
    Archive::from_config().volume_within(radar_id, time, tolerance)
}

/// Find and decode the volume nearest to a time. See [`Archive::read_volume`].
pub fn read_volume<Tz, R>(
    radar_id: RadarId,
    time: &DateTime<Tz>,
    reader: &R,
    options: &ReadOptions,
) -> Result<R::Volume, AuraDataErr>
where
    Tz: TimeZone,
    R: VolumeReader + ?Sized,
{
    Archive::from_config().read_volume(radar_id, time, reader, options)
}

/// Years with data for a radar.
pub fn available_years(radar_id: RadarId) -> Result<Vec<i32>, AuraDataErr> {
    Archive::from_config().available_years(radar_id)
}

/// Days with data for a radar.
pub fn available_dates(radar_id: RadarId, scope: DateScope) -> Result<Vec<NaiveDate>, AuraDataErr> {
    Archive::from_config().available_dates(radar_id, scope)
}

/// Is there data for a radar on a day?
pub fn has_data(radar_id: RadarId, date: NaiveDate) -> bool {
    Archive::from_config().has_data(radar_id, date)
}

/// Summary of the data on disk for a radar.
pub fn inventory(radar_id: RadarId) -> Result<Inventory, AuraDataErr> {
    Archive::from_config().inventory(radar_id)
}

/*--------------------------------------------------------------------------------------------------
                                      Station table cache
--------------------------------------------------------------------------------------------------*/
// The directory last loaded, and the table it came from.
static STATIONS: RwLock<Option<(PathBuf, Arc<StationDirectory>)>> = RwLock::new(None);

/// The station table of the archive at the base path.
///
/// The table is loaded on first use and kept. It is loaded again if the base path has moved since,
/// or when [`reload_station_directory`] is called.
pub fn station_directory() -> Result<Arc<StationDirectory>, AuraDataErr> {
    let path = Archive::from_config().site_list_path();

    {
        let cache = STATIONS.read().unwrap_or_else(|poisoned| poisoned.into_inner());
        if let Some((ref cached_path, ref dir)) = *cache {
            if *cached_path == path {
                return Ok(Arc::clone(dir));
            }
        }
    }

    reload_station_directory()
}

/// Read the station table from disk again, replacing the cached one.
pub fn reload_station_directory() -> Result<Arc<StationDirectory>, AuraDataErr> {
    let path = Archive::from_config().site_list_path();
    let dir = Arc::new(StationDirectory::load(&path)?);

    let mut cache = STATIONS
        .write()
        .unwrap_or_else(|poisoned| poisoned.into_inner());
    *cache = Some((path, Arc::clone(&dir)));

    Ok(dir)
}

/// Configuration of a radar on a date, or its current one. See [`StationDirectory::resolve`].
pub fn get_radar(radar_id: RadarId, as_of: Option<NaiveDate>) -> Result<StationRecord, AuraDataErr> {
    station_directory()?.resolve(radar_id, as_of).map(Clone::clone)
}

/// Current configuration of every radar matching the `(key, value)` filters.
pub fn list_radars<'a, I>(filters: I) -> Result<Vec<StationRecord>, AuraDataErr>
where
    I: IntoIterator<Item = (&'a str, &'a str)>,
{
    let dir = station_directory()?;
    let found = dir.list_all(filters)?;

    Ok(found.into_iter().cloned().collect())
}

/// Every radar in the station table.
pub fn radar_ids() -> Result<Vec<RadarId>, AuraDataErr> {
    Ok(station_directory()?.radar_ids())
}

/*--------------------------------------------------------------------------------------------------
                                          Unit Tests
--------------------------------------------------------------------------------------------------*/
#[cfg(test)]
mod unit {
    use super::*;
    use crate::archive::unit::*; // test helpers.
    use crate::config::{self, unit::lock_global_path};

    use chrono::Utc;

    // Point the process at `arch` for the duration of `test`, then put things back.
    fn with_base_path<F: FnOnce()>(arch: &Archive, test: F) {
        let _guard = lock_global_path();
        let previous = config::unit::base_path_override();

        config::set_base_path(&arch.root());
        test();

        match previous {
            Some(prev) => config::set_base_path(&prev),
            None => config::reset_base_path(),
        }
    }

    #[test]
    fn test_queries_follow_base_path() {
        let TestArchive { tmp: _tmp, arch } = create_test_archive();
        fill_test_archive(&arch);

        with_base_path(&arch, || {
            let radar = RadarId::new(2);

            assert_eq!(volumes_on(radar, ymd(2025, 10, 16)).unwrap().len(), 144);
            assert_eq!(
                volumes_between(radar, ymd(2025, 10, 1), ymd(2025, 10, 3))
                    .unwrap()
                    .len(),
                6
            );
            assert!(has_data(radar, ymd(2025, 10, 17)));
            assert_eq!(available_years(radar).unwrap(), vec![2024, 2025]);
            assert_eq!(
                available_dates(radar, DateScope::Year(2024)).unwrap(),
                vec![ymd(2024, 12, 31)]
            );
            assert_eq!(inventory(radar).unwrap().days_with_data, 5);

            let time = Utc.with_ymd_and_hms(2025, 10, 16, 12, 31, 0).unwrap();
            assert_eq!(volume_nearest(radar, &time).unwrap().stem(), "2_20251016_123000");
            assert!(volume_exact(radar, &time).is_err());
            assert!(volume_within(radar, &time, Duration::seconds(90))
                .unwrap()
                .is_some());
        });
    }

    #[test]
    fn test_station_cache_follows_base_path() {
        let TestArchive { tmp: _tmp, arch } = create_test_archive();
        fill_test_archive(&arch);

        let TestArchive {
            tmp: _other_tmp,
            arch: other,
        } = create_test_archive();

        with_base_path(&arch, || {
            let melb = get_radar(RadarId::new(2), None).unwrap();
            assert_eq!(melb.id_long, "002_3");

            let first = station_directory().unwrap();
            let second = station_directory().unwrap();
            assert!(Arc::ptr_eq(&first, &second));

            let reloaded = reload_station_directory().unwrap();
            assert!(!Arc::ptr_eq(&first, &reloaded));

            assert_eq!(
                radar_ids().unwrap(),
                vec![RadarId::new(2), RadarId::new(3), RadarId::new(66)]
            );

            let queensland = list_radars(vec![("state", "QLD")]).unwrap();
            assert_eq!(queensland.len(), 1);
            assert_eq!(queensland[0].id, RadarId::new(66));

            assert!(matches!(
                list_radars(vec![("colour", "blue")]),
                Err(AuraDataErr::InvalidFilter(_))
            ));
        });

        // No table under the other root.
        with_base_path(&other, || {
            assert!(matches!(
                station_directory(),
                Err(AuraDataErr::StationTableNotFound(_))
            ));
        });
    }
}
