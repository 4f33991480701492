use chrono::{Datelike, NaiveDate};
use std::path::PathBuf;

use super::{naming, Archive};

use crate::{config, station::RadarId};

impl Archive {
    const VOL_DIR: &'static str = "vol";

    /// Directory holding every year of one radar.
    pub fn radar_dir(&self, radar_id: RadarId) -> PathBuf {
        self.root.join(radar_id.to_string())
    }

    /// Directory for one radar and year.
    pub fn year_dir(&self, radar_id: RadarId, year: i32) -> PathBuf {
        self.radar_dir(radar_id).join(year.to_string())
    }

    /// Directory holding the daily volume containers for one radar and year.
    pub fn vol_dir(&self, radar_id: RadarId, year: i32) -> PathBuf {
        self.year_dir(radar_id, year).join(Archive::VOL_DIR)
    }

    /// Where the container for a radar and day should be. Existence is not checked.
    pub fn container_path(&self, radar_id: RadarId, date: NaiveDate) -> PathBuf {
        self.vol_dir(radar_id, date.year())
            .join(naming::container_name(radar_id, date))
    }

    /// One `(date, container path)` pair for every calendar day from `start` to `end` inclusive.
    ///
    /// Days are listed whether or not a container exists. Empty if `start` is after `end`.
    pub fn containers_between(
        &self,
        radar_id: RadarId,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Vec<(NaiveDate, PathBuf)> {
        start
            .iter_days()
            .take_while(|day| *day <= end)
            .map(|day| (day, self.container_path(radar_id, day)))
            .collect()
    }

    /// Location of the station table.
    pub fn site_list_path(&self) -> PathBuf {
        self.root.join(config::SITE_LIST_FILE)
    }
}

#[cfg(test)]
mod unit {
    use crate::archive::unit::*; // test helpers.
    use crate::{Archive, RadarId};

    use std::path::PathBuf;

    #[test]
    fn test_container_path() {
        let arch = Archive::at(&"/data/odim_pvol");

        assert_eq!(
            arch.container_path(RadarId::new(2), ymd(2025, 10, 16)),
            PathBuf::from("/data/odim_pvol/2/2025/vol/2_20251016.pvol.zip")
        );
        assert_eq!(
            arch.container_path(RadarId::new(71), ymd(1999, 1, 2)),
            PathBuf::from("/data/odim_pvol/71/1999/vol/71_19990102.pvol.zip")
        );
        assert_eq!(
            arch.site_list_path(),
            PathBuf::from("/data/odim_pvol/radar_site_list.csv")
        );
    }

    #[test]
    fn test_containers_between() {
        let arch = Archive::at(&"/data/odim_pvol");
        let radar = RadarId::new(2);

        let days = arch.containers_between(radar, ymd(2024, 12, 30), ymd(2025, 1, 2));
        let dates: Vec<_> = days.iter().map(|(day, _)| *day).collect();
        assert_eq!(
            dates,
            vec![
                ymd(2024, 12, 30),
                ymd(2024, 12, 31),
                ymd(2025, 1, 1),
                ymd(2025, 1, 2)
            ]
        );
        assert_eq!(
            days[2].1,
            PathBuf::from("/data/odim_pvol/2/2025/vol/2_20250101.pvol.zip")
        );

        assert_eq!(
            arch.containers_between(radar, ymd(2025, 1, 1), ymd(2025, 1, 1))
                .len(),
            1
        );
        assert!(arch
            .containers_between(radar, ymd(2025, 1, 2), ymd(2025, 1, 1))
            .is_empty());
    }
}
