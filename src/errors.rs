//! Module for errors.
use crate::station::RadarId;
use chrono::{NaiveDate, NaiveDateTime};
use std::{error::Error, fmt::Display, path::PathBuf};

/// Boxed cause handed back by an external collaborator.
pub type Cause = Box<dyn Error + Send + Sync + 'static>;

/// Error from the archive interface.
#[derive(Debug)]
pub enum AuraDataErr {
    // Inherited errors from std
    /// Error forwarded from std
    IO(::std::io::Error),
    /// Error forwarded from std while accessing a known file or directory.
    FileIO {
        /// The file or directory being accessed.
        path: PathBuf,
        /// What std reported.
        cause: ::std::io::Error,
    },

    // Other forwarded errors
    /// Error forwarded from the csv crate while loading the station table.
    Csv(::csv::Error),

    // My own errors from this crate
    /// The container for a radar/day does not exist.
    ArchiveNotFound {
        /// Where the container was expected.
        path: PathBuf,
    },
    /// The container exists, but its index could not be read.
    ArchiveCorrupt {
        /// The unreadable container.
        path: PathBuf,
        /// What the zip reader reported.
        cause: ::zip::result::ZipError,
    },
    /// An entry name did not follow the `<id>_<YYYYMMDD>_<HHMMSS>.pvol.h5` convention.
    UnrecognizedEntry(String),
    /// A query over a valid index matched nothing.
    NotFound {
        /// The radar that was queried, if known.
        radar_id: Option<RadarId>,
        /// Description of the query, e.g. the requested time.
        query: String,
    },
    /// The volume reader failed to produce a result for an entry.
    ReadFailed {
        /// Container holding the entry.
        container: PathBuf,
        /// Name of the entry inside the container.
        entry: String,
        /// The underlying failure.
        cause: Cause,
    },
    /// Copying an entry out of its container failed.
    ExtractionFailed {
        /// Container holding the entry.
        container: PathBuf,
        /// Name of the entry inside the container.
        entry: String,
        /// Destination directory.
        destination: PathBuf,
        /// The underlying failure.
        cause: Cause,
    },
    /// The station table has no record at all for this radar.
    UnknownRadar(RadarId),
    /// The radar is known, but no configuration covers the date.
    NoConfigurationAtDate {
        /// The radar that was queried.
        radar_id: RadarId,
        /// The requested date.
        date: NaiveDate,
    },
    /// Filter key or value not understood by the station directory.
    InvalidFilter(String),
    /// Not a valid radar identifier.
    InvalidRadarId(String),
    /// No station table at the expected location.
    StationTableNotFound(PathBuf),
    /// Not enough data to complete the task.
    NotEnoughData(RadarId),
}

impl AuraDataErr {
    pub(crate) fn file_io(path: &std::path::Path, cause: ::std::io::Error) -> Self {
        AuraDataErr::FileIO {
            path: path.to_path_buf(),
            cause,
        }
    }

    pub(crate) fn not_found_at(radar_id: Option<RadarId>, time: NaiveDateTime) -> Self {
        AuraDataErr::NotFound {
            radar_id,
            query: format!("volume at {}", time.format("%Y-%m-%dT%H:%M:%SZ")),
        }
    }

    /// True when this error only says a container is missing, which usually means "no data that
    /// day" rather than a real failure.
    pub fn is_missing_archive(&self) -> bool {
        matches!(self, AuraDataErr::ArchiveNotFound { .. })
    }
}

impl Display for AuraDataErr {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> Result<(), std::fmt::Error> {
        use crate::errors::AuraDataErr::*;

        match self {
            IO(err) => write!(f, "std lib io error: {}", err),
            FileIO { path, cause } => write!(f, "io error at {}: {}", path.display(), cause),
            Csv(err) => write!(f, "error reading station table: {}", err),

            ArchiveNotFound { path } => write!(f, "no archive at {}", path.display()),
            ArchiveCorrupt { path, cause } => {
                write!(f, "unreadable archive {}: {}", path.display(), cause)
            }
            UnrecognizedEntry(name) => write!(f, "unrecognized archive entry: {}", name),
            NotFound {
                radar_id: Some(radar_id),
                query,
            } => write!(f, "no match for radar {}: {}", radar_id, query),
            NotFound {
                radar_id: None,
                query,
            } => write!(f, "no match: {}", query),
            ReadFailed {
                container,
                entry,
                cause,
            } => write!(
                f,
                "failed reading {} from {}: {}",
                entry,
                container.display(),
                cause
            ),
            ExtractionFailed {
                container,
                entry,
                destination,
                cause,
            } => write!(
                f,
                "failed extracting {} from {} to {}: {}",
                entry,
                container.display(),
                destination.display(),
                cause
            ),
            UnknownRadar(radar_id) => write!(f, "unknown radar: {}", radar_id),
            NoConfigurationAtDate { radar_id, date } => write!(
                f,
                "radar {} has no configuration valid on {}",
                radar_id, date
            ),
            InvalidFilter(msg) => write!(f, "invalid filter: {}", msg),
            InvalidRadarId(id) => write!(f, "invalid radar id: {}", id),
            StationTableNotFound(path) => {
                write!(f, "radar site list not found at {}", path.display())
            }
            NotEnoughData(radar_id) => {
                write!(f, "not enough data for radar {} to complete task", radar_id)
            }
        }
    }
}

impl Error for AuraDataErr {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        use crate::errors::AuraDataErr::*;

        match self {
            IO(err) => Some(err),
            FileIO { cause, .. } => Some(cause),
            Csv(err) => Some(err),
            ArchiveCorrupt { cause, .. } => Some(cause),
            ReadFailed { cause, .. } | ExtractionFailed { cause, .. } => Some(cause.as_ref()),
            _ => None,
        }
    }
}

impl From<::std::io::Error> for AuraDataErr {
    fn from(err: ::std::io::Error) -> AuraDataErr {
        AuraDataErr::IO(err)
    }
}

impl From<::csv::Error> for AuraDataErr {
    fn from(err: ::csv::Error) -> AuraDataErr {
        AuraDataErr::Csv(err)
    }
}
