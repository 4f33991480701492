use chrono::NaiveDate;
use std::{
    fs::File,
    io::ErrorKind,
    path::{Path, PathBuf},
};

use super::Archive;
use crate::{
    errors::AuraDataErr,
    station::RadarId,
    volume::{ArchiveEntry, VolumeList, VolumeRef},
};

/// The list of entry names inside one daily container.
///
/// Only the zip central directory is read. No volume is decompressed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Manifest {
    container: PathBuf,
    names: Vec<String>,
}

impl Manifest {
    /// List the entries of the container at `container`.
    ///
    /// Anything that keeps the container from existing, a missing directory or a file where a
    /// directory should be, is [`ArchiveNotFound`](AuraDataErr::ArchiveNotFound).
    pub fn read(container: &Path) -> Result<Self, AuraDataErr> {
        let file = File::open(container).map_err(|err| {
            if err.kind() == ErrorKind::NotFound || !container.exists() {
                AuraDataErr::ArchiveNotFound {
                    path: container.to_path_buf(),
                }
            } else {
                AuraDataErr::file_io(container, err)
            }
        })?;

        let corrupt = |cause| AuraDataErr::ArchiveCorrupt {
            path: container.to_path_buf(),
            cause,
        };

        let mut zip = zip::ZipArchive::new(file).map_err(corrupt)?;

        // Central directory order, without decompressing anything.
        let names = (0..zip.len())
            .map(|idx| zip.by_index_raw(idx).map(|entry| entry.name().to_owned()))
            .collect::<Result<Vec<String>, _>>()
            .map_err(corrupt)?;
        log::debug!("listed {} entries in {}", names.len(), container.display());

        Ok(Manifest {
            container: container.to_path_buf(),
            names,
        })
    }

    /// The container that was listed.
    pub fn container(&self) -> &Path {
        &self.container
    }

    /// Every entry name, whatever it looks like.
    pub fn names(&self) -> &[String] {
        &self.names
    }

    /// Every entry parsed as a volume, with an error for names that are not volumes.
    pub fn entries(&self) -> impl Iterator<Item = Result<ArchiveEntry, AuraDataErr>> + '_ {
        self.names
            .iter()
            .map(move |name| ArchiveEntry::from_entry_name(&self.container, name))
    }

    /// The volumes of `radar_id` in this container, in time order.
    ///
    /// Entries that are not volumes of this radar are logged and left out.
    pub fn volumes(&self, radar_id: RadarId) -> VolumeList {
        self.entries()
            .filter_map(|entry| match entry {
                Ok(entry) if entry.radar_id == radar_id => Some(VolumeRef::from(entry)),
                Ok(entry) => {
                    log::warn!(
                        "skipping {} in {}: belongs to radar {}",
                        entry.entry_name,
                        self.container.display(),
                        entry.radar_id
                    );
                    None
                }
                Err(err) => {
                    log::warn!("skipping entry in {}: {}", self.container.display(), err);
                    None
                }
            })
            .collect()
    }
}

impl Archive {
    /// List the container for a radar and day.
    pub fn manifest(&self, radar_id: RadarId, date: NaiveDate) -> Result<Manifest, AuraDataErr> {
        Manifest::read(&self.container_path(radar_id, date))
    }
}

/*--------------------------------------------------------------------------------------------------
                                          Unit Tests
--------------------------------------------------------------------------------------------------*/
