//! Process-wide location of the archive.
//!
//! The archive normally lives at a fixed mount point. It can be moved for the whole process with
//! [`set_base_path`], or through the `AURA_BASE_PATH` environment variable when no override is
//! set. The value is looked up on every call, so an override is seen by the next query. Paths
//! already captured inside a [`VolumeRef`](crate::VolumeRef) are never rewritten.
//!
//! Changes are not coordinated with queries running on other threads; callers that move the
//! archive while queries are in flight must serialize that themselves.

use std::{
    path::{Path, PathBuf},
    sync::RwLock,
};

/// Mount point of the operational radar archive.
pub const DEFAULT_BASE_PATH: &str = "/g/data/rq0/level_1/odim_pvol";

/// Environment variable consulted when no override has been set.
pub const BASE_PATH_ENV: &str = "AURA_BASE_PATH";

/// Name of the station table at the top of the archive.
pub const SITE_LIST_FILE: &str = "radar_site_list.csv";

static BASE_PATH: RwLock<Option<PathBuf>> = RwLock::new(None);

/// The root of the archive as of right now.
pub fn base_path() -> PathBuf {
    let guard = BASE_PATH.read().unwrap_or_else(|poisoned| poisoned.into_inner());
    if let Some(ref path) = *guard {
        return path.clone();
    }

    match std::env::var_os(BASE_PATH_ENV) {
        Some(val) if !val.is_empty() => PathBuf::from(val),
        _ => PathBuf::from(DEFAULT_BASE_PATH),
    }
}

/// Override the root of the archive for the whole process.
pub fn set_base_path(path: &dyn AsRef<Path>) {
    let mut guard = BASE_PATH
        .write()
        .unwrap_or_else(|poisoned| poisoned.into_inner());
    *guard = Some(path.as_ref().to_path_buf());
}

/// Drop any override, going back to the environment or the default mount point.
pub fn reset_base_path() {
    let mut guard = BASE_PATH
        .write()
        .unwrap_or_else(|poisoned| poisoned.into_inner());
    *guard = None;
}

/*--------------------------------------------------------------------------------------------------
                                          Unit Tests
--------------------------------------------------------------------------------------------------*/
#[cfg(test)]
pub(crate) mod unit {
    use super::*;

    use std::sync::{Mutex, MutexGuard};

    // Every test that touches the process-wide path holds this lock.
    static GLOBAL_PATH_LOCK: Mutex<()> = Mutex::new(());

    pub(crate) fn lock_global_path() -> MutexGuard<'static, ()> {
        GLOBAL_PATH_LOCK
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    // The override currently in effect, if any.
    pub(crate) fn base_path_override() -> Option<PathBuf> {
        BASE_PATH
            .read()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone()
    }

    #[test]
    fn test_set_and_reset_base_path() {
        let _guard = lock_global_path();
        let previous = base_path_override();

        set_base_path(&"/tmp/some/other/mount");
        assert_eq!(base_path(), PathBuf::from("/tmp/some/other/mount"));
        assert_eq!(
            base_path_override(),
            Some(PathBuf::from("/tmp/some/other/mount"))
        );

        reset_base_path();
        assert!(base_path_override().is_none());

        if let Some(prev) = previous {
            set_base_path(&prev);
        }
    }

    #[test]
    fn test_environment_fallback() {
        let _guard = lock_global_path();
        let previous = base_path_override();
        let previous_env = std::env::var_os(BASE_PATH_ENV);

        // An override wins over the environment.
        std::env::set_var(BASE_PATH_ENV, "/from/the/environment");
        set_base_path(&"/from/an/override");
        assert_eq!(base_path(), PathBuf::from("/from/an/override"));

        reset_base_path();
        assert_eq!(base_path(), PathBuf::from("/from/the/environment"));

        std::env::set_var(BASE_PATH_ENV, "");
        assert_eq!(base_path(), PathBuf::from(DEFAULT_BASE_PATH));

        std::env::remove_var(BASE_PATH_ENV);
        assert_eq!(base_path(), PathBuf::from(DEFAULT_BASE_PATH));

        if let Some(val) = previous_env {
            std::env::set_var(BASE_PATH_ENV, val);
        }
        if let Some(prev) = previous {
            set_base_path(&prev);
        }
    }
}
