//! Lazy references to volumes inside the archive.
//!
//! A [`VolumeRef`] is only a name: the container path, the entry name, the radar and the scan
//! time. Building one never touches the disk, and it holds no open file, so it can be cloned,
//! serialized and handed to other threads or processes freely. Data is read when
//! [`force_read`](VolumeRef::force_read), [`force_raw_read`](VolumeRef::force_raw_read) or
//! [`extract_to`](VolumeRef::extract_to) is called, every time it is called.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::{
    fmt::Display,
    fs::File,
    io::{BufWriter, Write},
    path::{Path, PathBuf},
};

use crate::{
    archive::naming,
    errors::{AuraDataErr, Cause},
    station::RadarId,
};

pub use list::VolumeList;
pub use options::{OptionValue, ReadOptions, VolumeReader};
pub use raw::{open_raw, RawVolume};

mod list;
mod options;
mod raw;

/// One volume entry inside a daily container.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ArchiveEntry {
    /// Radar that scanned the volume.
    pub radar_id: RadarId,
    /// Scan time.
    pub timestamp: DateTime<Utc>,
    /// Container the entry lives in.
    pub container: PathBuf,
    /// Name of the entry inside the container.
    pub entry_name: String,
}

impl ArchiveEntry {
    /// Parse an entry name found in a container.
    pub fn from_entry_name(
        container: &dyn AsRef<Path>,
        entry_name: &str,
    ) -> Result<Self, AuraDataErr> {
        let (radar_id, timestamp) = naming::parse_entry_name(entry_name)?;

        Ok(ArchiveEntry {
            radar_id,
            timestamp,
            container: container.as_ref().to_path_buf(),
            entry_name: entry_name.to_owned(),
        })
    }
}

/// A lazy reference to a radar volume file inside a zip container.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct VolumeRef {
    entry: ArchiveEntry,
}

impl From<ArchiveEntry> for VolumeRef {
    fn from(entry: ArchiveEntry) -> Self {
        VolumeRef { entry }
    }
}

impl VolumeRef {
    /// Reference an entry by container path and entry name.
    pub fn from_entry_name(
        container: &dyn AsRef<Path>,
        entry_name: &str,
    ) -> Result<Self, AuraDataErr> {
        ArchiveEntry::from_entry_name(container, entry_name).map(VolumeRef::from)
    }

    /// The archive record behind this reference.
    pub fn entry(&self) -> &ArchiveEntry {
        &self.entry
    }

    /// Radar that scanned the volume.
    pub fn radar_id(&self) -> RadarId {
        self.entry.radar_id
    }

    /// Scan time.
    pub fn timestamp(&self) -> DateTime<Utc> {
        self.entry.timestamp
    }

    /// Container holding the volume.
    pub fn container(&self) -> &Path {
        &self.entry.container
    }

    /// Name of the volume inside its container.
    pub fn entry_name(&self) -> &str {
        &self.entry.entry_name
    }

    /// Entry name without its extension.
    pub fn stem(&self) -> &str {
        self.entry_name()
            .strip_suffix(naming::ENTRY_SUFFIX)
            .unwrap_or_else(|| self.entry_name())
    }

    /// Decode the volume with `reader`, passing `options` through untouched.
    ///
    /// Failures come back as [`ReadFailed`](AuraDataErr::ReadFailed) naming this entry. There are
    /// no retries, and nothing is cached.
    pub fn force_read<R>(&self, reader: &R, options: &ReadOptions) -> Result<R::Volume, AuraDataErr>
    where
        R: VolumeReader + ?Sized,
    {
        reader
            .decode(self.container(), self.entry_name(), options)
            .map_err(|cause| AuraDataErr::ReadFailed {
                container: self.container().to_path_buf(),
                entry: self.entry_name().to_owned(),
                cause,
            })
    }

    /// The undecoded bytes of the volume.
    pub fn force_raw_read(&self) -> Result<RawVolume, AuraDataErr> {
        open_raw(self.container(), self.entry_name())
    }

    /// Copy just this volume out of its container into `directory`, returning the new file's path.
    ///
    /// The directory is created if needed. The container is opened again here, so an entry that
    /// disappeared since it was listed is reported as [`ExtractionFailed`](AuraDataErr::ExtractionFailed).
    pub fn extract_to(&self, directory: &dyn AsRef<Path>) -> Result<PathBuf, AuraDataErr> {
        let directory = directory.as_ref();
        let failed = |cause: Cause| AuraDataErr::ExtractionFailed {
            container: self.container().to_path_buf(),
            entry: self.entry_name().to_owned(),
            destination: directory.to_path_buf(),
            cause,
        };

        // Only a bare file name may land in the destination.
        let file_name = Path::new(self.entry_name())
            .file_name()
            .filter(|name| *name == self.entry_name())
            .ok_or_else(|| failed("entry name is not a plain file name".into()))?;

        std::fs::create_dir_all(directory).map_err(|err| failed(err.into()))?;

        let container = File::open(self.container()).map_err(|err| failed(err.into()))?;
        let mut zip = zip::ZipArchive::new(container).map_err(|err| failed(err.into()))?;
        let mut entry = zip
            .by_name(self.entry_name())
            .map_err(|err| failed(err.into()))?;

        let output_path = directory.join(file_name);
        let output = File::create(&output_path).map_err(|err| failed(err.into()))?;
        let mut output = BufWriter::new(output);

        let copied = std::io::copy(&mut entry, &mut output).and_then(|_| output.flush());
        if let Err(err) = copied {
            // Never leave a truncated volume behind.
            drop(output);
            if let Err(rm_err) = std::fs::remove_file(&output_path) {
                log::warn!("could not remove {}: {}", output_path.display(), rm_err);
            }
            return Err(failed(err.into()));
        }

        Ok(output_path)
    }
}

impl Display for VolumeRef {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> Result<(), std::fmt::Error> {
        write!(
            f,
            "{} @ {}",
            self.entry_name(),
            self.timestamp().format("%Y-%m-%dT%H:%M:%SZ")
        )
    }
}

/*--------------------------------------------------------------------------------------------------
                                          Unit Tests
--------------------------------------------------------------------------------------------------*/
