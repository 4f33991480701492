//! An ordered, immutable collection of volume references.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use std::ops::{Index, Range};

use super::{ReadOptions, VolumeReader, VolumeRef};
use crate::{errors::AuraDataErr, station::RadarId};

/// Volume references sorted by scan time, earliest first.
///
/// Volumes with the same timestamp are all kept, in the order they were listed. Every query
/// returns a new list or a reference into this one; the list itself never changes after it is
/// built. It serializes as a plain sequence of references and is sorted again when read back.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(from = "Vec<VolumeRef>", into = "Vec<VolumeRef>")]
pub struct VolumeList {
    volumes: Vec<VolumeRef>,
}

impl VolumeList {
    /// Build a list, sorting by timestamp.
    pub fn new(volumes: impl IntoIterator<Item = VolumeRef>) -> Self {
        let mut volumes: Vec<VolumeRef> = volumes.into_iter().collect();
        volumes.sort_by_key(VolumeRef::timestamp); // stable, keeps duplicates in listing order

        VolumeList { volumes }
    }

    // Input already sorted.
    fn from_sorted(volumes: Vec<VolumeRef>) -> Self {
        debug_assert!(volumes
            .windows(2)
            .all(|pair| pair[0].timestamp() <= pair[1].timestamp()));
        VolumeList { volumes }
    }

    /// Number of volumes.
    pub fn len(&self) -> usize {
        self.volumes.len()
    }

    /// True if there are no volumes.
    pub fn is_empty(&self) -> bool {
        self.volumes.is_empty()
    }

    /// Volume at a position.
    pub fn get(&self, index: usize) -> Option<&VolumeRef> {
        self.volumes.get(index)
    }

    /// Earliest volume.
    pub fn first(&self) -> Option<&VolumeRef> {
        self.volumes.first()
    }

    /// Latest volume.
    pub fn last(&self) -> Option<&VolumeRef> {
        self.volumes.last()
    }

    /// Iterate in time order. Can be started again as often as needed.
    pub fn iter(&self) -> std::slice::Iter<'_, VolumeRef> {
        self.volumes.iter()
    }

    /// All the scan times, in order.
    pub fn timestamps(&self) -> Vec<DateTime<Utc>> {
        self.volumes.iter().map(VolumeRef::timestamp).collect()
    }

    /// Radar of the first volume, used to give errors some context.
    fn radar_id(&self) -> Option<RadarId> {
        self.first().map(VolumeRef::radar_id)
    }

    // Index of the first volume at or after `time`.
    fn lower_bound(&self, time: DateTime<Utc>) -> usize {
        self.volumes.partition_point(|vol| vol.timestamp() < time)
    }

    /// The volume scanned exactly at `time`.
    pub fn exact_at(&self, time: DateTime<Utc>) -> Result<&VolumeRef, AuraDataErr> {
        self.volumes
            .get(self.lower_bound(time))
            .filter(|vol| vol.timestamp() == time)
            .ok_or_else(|| AuraDataErr::not_found_at(self.radar_id(), time.naive_utc()))
    }

    /// The volume closest in time to `time`. When two are equally close, the earlier one wins.
    pub fn nearest_to(&self, time: DateTime<Utc>) -> Result<&VolumeRef, AuraDataErr> {
        let idx = self.lower_bound(time);

        let after = self.volumes.get(idx);
        let before = idx
            .checked_sub(1)
            .and_then(|i| self.volumes.get(i))
            // First of any run of duplicates.
            .and_then(|vol| self.volumes.get(self.lower_bound(vol.timestamp())));

        match (before, after) {
            (Some(before), Some(after)) => {
                if time - before.timestamp() <= after.timestamp() - time {
                    Ok(before)
                } else {
                    Ok(after)
                }
            }
            (Some(only), None) | (None, Some(only)) => Ok(only),
            (None, None) => Err(AuraDataErr::NotFound {
                radar_id: None,
                query: format!(
                    "nearest volume to {} in an empty list",
                    time.format("%Y-%m-%dT%H:%M:%SZ")
                ),
            }),
        }
    }

    /// The nearest volume if it is no further than `tolerance` from `time`.
    ///
    /// `None` just means nothing was scanned close enough to that time.
    pub fn within(&self, time: DateTime<Utc>, tolerance: Duration) -> Option<&VolumeRef> {
        self.nearest_to(time).ok().filter(|vol| {
            let gap = vol.timestamp() - time;
            gap <= tolerance && -gap <= tolerance
        })
    }

    /// Volumes scanned from `start` to `end`, both inclusive.
    pub fn range(&self, start: DateTime<Utc>, end: DateTime<Utc>) -> VolumeList {
        let lo = self.lower_bound(start);
        let hi = self.volumes.partition_point(|vol| vol.timestamp() <= end);

        if lo >= hi {
            return VolumeList::default();
        }

        Self::from_sorted(self.volumes[lo..hi].to_vec())
    }

    /// Volumes for which `predicate` holds, in order.
    pub fn filter<P>(&self, mut predicate: P) -> VolumeList
    where
        P: FnMut(&VolumeRef) -> bool,
    {
        Self::from_sorted(
            self.volumes
                .iter()
                .filter(|vol| predicate(vol))
                .cloned()
                .collect(),
        )
    }

    /// A copy of the volumes at the positions in `range`, clamped to the list.
    pub fn slice(&self, range: Range<usize>) -> VolumeList {
        let end = range.end.min(self.len());
        let start = range.start.min(end);

        Self::from_sorted(self.volumes[start..end].to_vec())
    }

    /// Both lists merged in time order. On equal timestamps volumes from `self` come first.
    pub fn concat(&self, other: &VolumeList) -> VolumeList {
        VolumeList::new(self.volumes.iter().chain(other.volumes.iter()).cloned())
    }

    /// Decode each volume in turn, only as the iterator is advanced.
    pub fn iter_read<'a, R>(
        &'a self,
        reader: &'a R,
        options: &'a ReadOptions,
    ) -> impl Iterator<Item = Result<R::Volume, AuraDataErr>> + 'a
    where
        R: VolumeReader + ?Sized,
    {
        self.volumes
            .iter()
            .map(move |vol| vol.force_read(reader, options))
    }

    /// Take the references.
    pub fn into_vec(self) -> Vec<VolumeRef> {
        self.volumes
    }
}

impl Index<usize> for VolumeList {
    type Output = VolumeRef;

    fn index(&self, index: usize) -> &VolumeRef {
        &self.volumes[index]
    }
}

impl IntoIterator for VolumeList {
    type Item = VolumeRef;
    type IntoIter = std::vec::IntoIter<VolumeRef>;

    fn into_iter(self) -> Self::IntoIter {
        self.volumes.into_iter()
    }
}

impl<'a> IntoIterator for &'a VolumeList {
    type Item = &'a VolumeRef;
    type IntoIter = std::slice::Iter<'a, VolumeRef>;

    fn into_iter(self) -> Self::IntoIter {
        self.volumes.iter()
    }
}

impl From<Vec<VolumeRef>> for VolumeList {
    fn from(volumes: Vec<VolumeRef>) -> Self {
        VolumeList::new(volumes)
    }
}

impl From<VolumeList> for Vec<VolumeRef> {
    fn from(list: VolumeList) -> Self {
        list.volumes
    }
}

impl std::iter::FromIterator<VolumeRef> for VolumeList {
    fn from_iter<I: IntoIterator<Item = VolumeRef>>(iter: I) -> Self {
        VolumeList::new(iter)
    }
}

/*--------------------------------------------------------------------------------------------------
                                          Unit Tests
--------------------------------------------------------------------------------------------------*/
