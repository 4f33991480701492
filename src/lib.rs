#![deny(missing_docs)]
//! Package to index and interface with an archive of ODIM radar volumes.
//!
//! The archive keeps one zip container per radar per day. Queries list the containers they need,
//! parse the entry names, and hand back [`VolumeRef`]s that read nothing until asked to. Decoding
//! a volume is left to a [`VolumeReader`] supplied by the caller.
//!
//! Station metadata comes from the site list at the top of the archive and is resolved by date
//! through a [`StationDirectory`].

//
// Public API
//
pub use api::{
    available_dates, available_years, get_radar, has_data, inventory, list_radars, radar_ids,
    read_volume, reload_station_directory, station_directory, volume_exact, volume_nearest,
    volume_within, volumes_between, volumes_on,
};
pub use archive::{
    naming::{container_name, entry_name, parse_container_name, parse_entry_name},
    Archive, DateScope, Manifest,
};
pub use config::{base_path, reset_base_path, set_base_path, BASE_PATH_ENV, DEFAULT_BASE_PATH};
pub use errors::{AuraDataErr, Cause};
pub use inventory::Inventory;
pub use station::{
    Band, FilterKey, RadarId, SiteLocation, State, StationDirectory, StationFilter, StationRecord,
};
pub use volume::{
    open_raw, ArchiveEntry, OptionValue, RawVolume, ReadOptions, VolumeList, VolumeReader,
    VolumeRef,
};

//
// Implementation only
//
mod api;
mod archive;
mod config;
mod errors;
mod inventory;
mod station;
mod volume;
