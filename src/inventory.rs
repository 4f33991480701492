use chrono::{Datelike, NaiveDate};

use crate::{errors::AuraDataErr, station::RadarId};

/// Inventory lists the first & last days with data for a radar, the years they span, and the days
/// missing between the first and last.
#[allow(missing_docs)]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Inventory {
    pub radar_id: RadarId,
    pub first: NaiveDate,
    pub last: NaiveDate,
    pub years: Vec<i32>,
    pub days_with_data: usize,
    pub missing: Vec<NaiveDate>,
}

impl Inventory {
    /// Create a new inventory. Assume the provided dates are sorted from earliest to latest.
    pub fn new(
        radar_id: RadarId,
        dates: impl IntoIterator<Item = NaiveDate>,
    ) -> Result<Self, AuraDataErr> {
        let mut dates = dates.into_iter();

        let first = dates
            .by_ref()
            .next()
            .ok_or(AuraDataErr::NotEnoughData(radar_id))?;

        let mut years = vec![first.year()];
        let mut days_with_data = 1;
        let mut missing = vec![];

        let mut last = first;

        for date in dates {
            if date <= last {
                continue;
            }

            let mut next_date = last.succ_opt();
            while let Some(gap) = next_date.filter(|gap| *gap < date) {
                missing.push(gap);
                next_date = gap.succ_opt();
            }

            if date.year() != last.year() {
                years.push(date.year());
            }

            days_with_data += 1;
            last = date;
        }

        Ok(Inventory {
            radar_id,
            first,
            last,
            years,
            days_with_data,
            missing,
        })
    }

    /// Number of days from first to last, both included.
    pub fn span_days(&self) -> i64 {
        (self.last - self.first).num_days() + 1
    }
}

/*--------------------------------------------------------------------------------------------------
                                          Unit Tests
--------------------------------------------------------------------------------------------------*/
