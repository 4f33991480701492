use chrono::{DateTime, Duration, NaiveDate, TimeZone, Utc};

use super::Archive;

use crate::{
    errors::AuraDataErr,
    station::RadarId,
    volume::{ReadOptions, VolumeList, VolumeReader, VolumeRef},
};

impl Archive {
    /// Every volume a radar scanned on one UTC day.
    ///
    /// A missing container is an [`ArchiveNotFound`](AuraDataErr::ArchiveNotFound) error here; ask
    /// for a range if "no data" should just be empty.
    pub fn volumes_on(&self, radar_id: RadarId, date: NaiveDate) -> Result<VolumeList, AuraDataErr> {
        let list = self.manifest(radar_id, date)?.volumes(radar_id);
        log::debug!("radar {} on {}: {} volumes", radar_id, date, list.len());
        Ok(list)
    }

    /// Every volume a radar scanned from `start` to `end`, both days included.
    ///
    /// Days without a container contribute nothing. A corrupt container fails the whole query.
    pub fn volumes_between(
        &self,
        radar_id: RadarId,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<VolumeList, AuraDataErr> {
        let mut volumes: Vec<VolumeRef> = vec![];

        for (date, container) in self.containers_between(radar_id, start, end) {
            match self.volumes_on(radar_id, date) {
                Ok(list) => volumes.extend(list),
                Err(AuraDataErr::ArchiveNotFound { .. }) => {
                    log::debug!("no container for radar {} at {}", radar_id, container.display());
                }
                Err(err) => return Err(err),
            }
        }

        Ok(VolumeList::new(volumes))
    }

    /// The volumes of the UTC day containing `time`.
    fn volumes_around<Tz: TimeZone>(
        &self,
        radar_id: RadarId,
        time: &DateTime<Tz>,
    ) -> Result<(DateTime<Utc>, VolumeList), AuraDataErr> {
        let time = time.with_timezone(&Utc);
        let list = self.volumes_on(radar_id, time.date_naive())?;
        Ok((time, list))
    }

    /// The volume scanned closest to `time`, which may be in any time zone.
    ///
    /// Only the UTC day holding `time` is searched.
    pub fn volume_nearest<Tz: TimeZone>(
        &self,
        radar_id: RadarId,
        time: &DateTime<Tz>,
    ) -> Result<VolumeRef, AuraDataErr> {
        let (time, list) = self.volumes_around(radar_id, time)?;

        list.nearest_to(time).cloned().map_err(|_| {
            AuraDataErr::NotFound {
                radar_id: Some(radar_id),
                query: format!(
                    "nearest volume to {}, container has no volumes",
                    time.format("%Y-%m-%dT%H:%M:%SZ")
                ),
            }
        })
    }

    /// The volume scanned exactly at `time`.
    pub fn volume_exact<Tz: TimeZone>(
        &self,
        radar_id: RadarId,
        time: &DateTime<Tz>,
    ) -> Result<VolumeRef, AuraDataErr> {
        let (time, list) = self.volumes_around(radar_id, time)?;

        list.exact_at(time)
            .cloned()
            .map_err(|_| AuraDataErr::not_found_at(Some(radar_id), time.naive_utc()))
    }

    /// The nearest volume if it was scanned within `tolerance` of `time`.
    ///
    /// `Ok(None)` means the day has data, just nothing close enough.
    pub fn volume_within<Tz: TimeZone>(
        &self,
        radar_id: RadarId,
        time: &DateTime<Tz>,
        tolerance: Duration,
    ) -> Result<Option<VolumeRef>, AuraDataErr> {
        let (time, list) = self.volumes_around(radar_id, time)?;

        Ok(list.within(time, tolerance).cloned())
    }

    /// Find the volume nearest to `time` and decode it right away.
    pub fn read_volume<Tz, R>(
        &self,
        radar_id: RadarId,
        time: &DateTime<Tz>,
        reader: &R,
        options: &ReadOptions,
    ) -> Result<R::Volume, AuraDataErr>
    where
        Tz: TimeZone,
        R: VolumeReader + ?Sized,
    {
        self.volume_nearest(radar_id, time)?
            .force_read(reader, options)
    }
}

/*--------------------------------------------------------------------------------------------------
                                          Unit Tests
--------------------------------------------------------------------------------------------------*/
