use chrono::{Datelike, NaiveDate};
use std::{fs, io::ErrorKind, path::Path};

use super::{naming, Archive};

use crate::{errors::AuraDataErr, inventory::Inventory, station::RadarId};

/// Which days to look at when listing what is on disk.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DateScope {
    /// Everything.
    All,
    /// One calendar year.
    Year(i32),
    /// From the first date to the second, both included.
    Between(NaiveDate, NaiveDate),
    /// On or after a date.
    From(NaiveDate),
    /// On or before a date.
    Until(NaiveDate),
}

impl DateScope {
    /// Does the scope include `date`?
    pub fn contains(&self, date: NaiveDate) -> bool {
        match *self {
            DateScope::All => true,
            DateScope::Year(year) => date.year() == year,
            DateScope::Between(start, end) => start <= date && date <= end,
            DateScope::From(start) => start <= date,
            DateScope::Until(end) => date <= end,
        }
    }

    /// Could any day of `year` be in the scope?
    fn touches_year(&self, year: i32) -> bool {
        match *self {
            DateScope::All => true,
            DateScope::Year(only) => only == year,
            DateScope::Between(start, end) => start.year() <= year && year <= end.year(),
            DateScope::From(start) => start.year() <= year,
            DateScope::Until(end) => year <= end.year(),
        }
    }
}

// Names of the entries in a directory, or nothing if there is no directory there.
fn dir_names(dir: &Path) -> Result<Vec<String>, AuraDataErr> {
    let read_dir = match fs::read_dir(dir) {
        Ok(read_dir) => read_dir,
        Err(err) if err.kind() == ErrorKind::NotFound || !dir.is_dir() => return Ok(vec![]),
        Err(err) => return Err(AuraDataErr::file_io(dir, err)),
    };

    let mut names = vec![];
    for entry in read_dir {
        let entry = entry.map_err(|err| AuraDataErr::file_io(dir, err))?;
        if let Some(name) = entry.file_name().to_str() {
            names.push(name.to_owned());
        }
    }

    Ok(names)
}

impl Archive {
    /// Years with a volume directory for this radar, in ascending order.
    ///
    /// Only directory names are looked at. An unknown radar has no years.
    pub fn available_years(&self, radar_id: RadarId) -> Result<Vec<i32>, AuraDataErr> {
        let mut years: Vec<i32> = dir_names(&self.radar_dir(radar_id))?
            .iter()
            .filter(|name| name.bytes().all(|b| b.is_ascii_digit()))
            .filter_map(|name| name.parse().ok())
            .filter(|&year| self.vol_dir(radar_id, year).is_dir())
            .collect();

        years.sort_unstable();
        Ok(years)
    }

    /// Days in `scope` with a container for this radar, in ascending order.
    ///
    /// Only container names are looked at; no container is opened.
    pub fn available_dates(
        &self,
        radar_id: RadarId,
        scope: DateScope,
    ) -> Result<Vec<NaiveDate>, AuraDataErr> {
        let mut dates = vec![];

        for year in self
            .available_years(radar_id)?
            .into_iter()
            .filter(|&year| scope.touches_year(year))
        {
            let names = dir_names(&self.vol_dir(radar_id, year))?;

            let in_year = names
                .iter()
                .filter_map(|name| naming::parse_container_name(name))
                .filter(|&(id, date)| id == radar_id && date.year() == year)
                .map(|(_, date)| date)
                .filter(|&date| scope.contains(date));

            dates.extend(in_year);
        }

        dates.sort_unstable();
        dates.dedup();
        Ok(dates)
    }

    /// Is there a container for this radar and day?
    pub fn has_data(&self, radar_id: RadarId, date: NaiveDate) -> bool {
        self.container_path(radar_id, date).is_file()
    }

    /// Summarize what is on disk for a radar.
    pub fn inventory(&self, radar_id: RadarId) -> Result<Inventory, AuraDataErr> {
        let dates = self.available_dates(radar_id, DateScope::All)?;
        Inventory::new(radar_id, dates)
    }
}

/*--------------------------------------------------------------------------------------------------
                                          Unit Tests
--------------------------------------------------------------------------------------------------*/
#[cfg(test)]
mod unit {
    use super::*;
    use crate::archive::unit::*; // test helpers.

    #[test]
    fn test_available_years() {
        let TestArchive { tmp: _tmp, arch } = create_test_archive();
        fill_test_archive(&arch);

        // 2019 exists, but has no vol directory. "notes" is not a year.
        assert_eq!(
            arch.available_years(RadarId::new(2)).unwrap(),
            vec![2024, 2025]
        );
        assert!(arch.available_years(RadarId::new(66)).unwrap().is_empty());
    }

    #[test]
    fn test_available_dates() {
        let TestArchive { tmp: _tmp, arch } = create_test_archive();
        fill_test_archive(&arch);

        let radar = RadarId::new(2);

        let all = arch.available_dates(radar, DateScope::All).unwrap();
        assert_eq!(
            all,
            vec![
                ymd(2024, 12, 31),
                ymd(2025, 10, 1),
                ymd(2025, 10, 3),
                ymd(2025, 10, 16),
                ymd(2025, 10, 17)
            ]
        );

        assert_eq!(
            arch.available_dates(radar, DateScope::Year(2024)).unwrap(),
            vec![ymd(2024, 12, 31)]
        );
        assert_eq!(
            arch.available_dates(radar, DateScope::Between(ymd(2025, 10, 2), ymd(2025, 10, 16)))
                .unwrap(),
            vec![ymd(2025, 10, 3), ymd(2025, 10, 16)]
        );
        assert_eq!(
            arch.available_dates(radar, DateScope::From(ymd(2025, 10, 17)))
                .unwrap(),
            vec![ymd(2025, 10, 17)]
        );
        assert_eq!(
            arch.available_dates(radar, DateScope::Until(ymd(2025, 10, 1)))
                .unwrap(),
            vec![ymd(2024, 12, 31), ymd(2025, 10, 1)]
        );
        assert!(arch
            .available_dates(radar, DateScope::Year(2019))
            .unwrap()
            .is_empty());
        assert!(arch
            .available_dates(RadarId::new(3), DateScope::All)
            .unwrap()
            .is_empty());
    }

    #[test]
    fn test_files_where_directories_belong() {
        let TestArchive { tmp: _tmp, arch } = create_test_archive();
        fill_test_archive(&arch);

        let radar = RadarId::new(2);
        std::fs::create_dir_all(arch.year_dir(radar, 2023)).unwrap();
        std::fs::write(arch.vol_dir(radar, 2023), b"stray file").unwrap();
        assert_eq!(arch.available_years(radar).unwrap(), vec![2024, 2025]);

        let radar = RadarId::new(66);
        std::fs::write(arch.radar_dir(radar), b"stray file").unwrap();
        assert!(arch.available_years(radar).unwrap().is_empty());
        assert!(arch
            .available_dates(radar, DateScope::All)
            .unwrap()
            .is_empty());
    }

    #[test]
    fn test_misplaced_container_ignored() {
        let TestArchive { tmp: _tmp, arch } = create_test_archive();
        fill_test_archive(&arch);

        let radar = RadarId::new(2);
        std::fs::write(arch.vol_dir(radar, 2024).join("2_20250101.pvol.zip"), b"").unwrap();
        std::fs::write(arch.vol_dir(radar, 2024).join("3_20240101.pvol.zip"), b"").unwrap();

        assert_eq!(
            arch.available_dates(radar, DateScope::Year(2024)).unwrap(),
            vec![ymd(2024, 12, 31)]
        );
    }

    #[test]
    fn test_has_data() {
        let TestArchive { tmp: _tmp, arch } = create_test_archive();
        fill_test_archive(&arch);

        let radar = RadarId::new(2);
        assert!(arch.has_data(radar, ymd(2025, 10, 1)));
        assert!(!arch.has_data(radar, ymd(2025, 10, 2)));
        assert!(!arch.has_data(RadarId::new(66), ymd(2025, 10, 1)));
    }

    #[test]
    fn test_inventory() {
        let TestArchive { tmp: _tmp, arch } = create_test_archive();
        fill_test_archive(&arch);

        let inv = arch.inventory(RadarId::new(2)).unwrap();
        assert_eq!(inv.first, ymd(2024, 12, 31));
        assert_eq!(inv.last, ymd(2025, 10, 17));
        assert_eq!(inv.days_with_data, 5);
        assert_eq!(inv.years, vec![2024, 2025]);
        assert!(!inv.missing.contains(&ymd(2025, 10, 16)));
        assert!(inv.missing.contains(&ymd(2025, 10, 2)));

        assert!(matches!(
            arch.inventory(RadarId::new(66)),
            Err(AuraDataErr::NotEnoughData(_))
        ));
    }

    #[test]
    fn test_scope_contains() {
        let scope = DateScope::Between(ymd(2020, 2, 28), ymd(2020, 3, 1));
        assert!(scope.contains(ymd(2020, 2, 29)));
        assert!(scope.contains(ymd(2020, 3, 1)));
        assert!(!scope.contains(ymd(2020, 3, 2)));
        assert!(DateScope::All.contains(ymd(1990, 1, 1)));
        assert!(!DateScope::Year(2021).contains(ymd(2020, 12, 31)));
    }
}
