use std::{
    fs::File,
    io::{Cursor, Read},
    path::Path,
};

use crate::errors::{AuraDataErr, Cause};

/// The undecoded bytes of one volume, read from its container into memory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawVolume {
    bytes: Vec<u8>,
}

impl RawVolume {
    /// The payload.
    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// Size of the payload in bytes.
    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    /// True for an empty payload.
    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    /// A seekable reader over the payload, for HDF5 libraries that want a file-like object.
    pub fn reader(&self) -> Cursor<&[u8]> {
        Cursor::new(self.bytes.as_slice())
    }

    /// Take the payload.
    pub fn into_bytes(self) -> Vec<u8> {
        self.bytes
    }
}

impl AsRef<[u8]> for RawVolume {
    fn as_ref(&self) -> &[u8] {
        &self.bytes
    }
}

/// Read one entry of a container into memory without decoding it.
///
/// Any failure, a missing container or entry included, is a
/// [`ReadFailed`](AuraDataErr::ReadFailed) naming the entry.
pub fn open_raw(container: &Path, entry: &str) -> Result<RawVolume, AuraDataErr> {
    read_entry(container, entry).map_err(|cause| AuraDataErr::ReadFailed {
        container: container.to_path_buf(),
        entry: entry.to_owned(),
        cause,
    })
}

const MAX_PREALLOCATE: u64 = 64 * 1024 * 1024;

fn read_entry(container: &Path, entry: &str) -> Result<RawVolume, Cause> {
    let file = File::open(container)?;
    let mut zip = zip::ZipArchive::new(file)?;
    let mut zipped = zip.by_name(entry)?;

    // The size in the header is only a hint, and a corrupt one can be huge.
    let mut bytes = Vec::with_capacity(zipped.size().min(MAX_PREALLOCATE) as usize);
    zipped.read_to_end(&mut bytes)?;

    Ok(RawVolume { bytes })
}

#[cfg(test)]
mod unit {
    use super::*;
    use crate::archive::unit::*; // test helpers.
    use crate::RadarId;

    #[test]
    fn test_open_raw() {
        let TestArchive { tmp: _tmp, arch } = create_test_archive();
        fill_test_archive(&arch);

        let container = arch.container_path(RadarId::new(2), ymd(2024, 12, 31));
        let raw = open_raw(&container, "2_20241231_235500.pvol.h5").unwrap();

        let expected = payload_for("2_20241231_235500.pvol.h5");
        assert_eq!(raw.len(), expected.len());
        assert!(!raw.is_empty());

        let mut via_reader = vec![];
        raw.reader().read_to_end(&mut via_reader).unwrap();
        assert_eq!(via_reader, expected);
        assert_eq!(raw.into_bytes(), expected);
    }

    #[test]
    fn test_open_raw_oversized_header() {
        let TestArchive { tmp: _tmp, arch } = create_test_archive();

        let name = "2_20250101_000000.pvol.h5".to_owned();
        let container =
            write_container(&arch, RadarId::new(2), ymd(2025, 1, 1), &[name.clone()]);

        // Claim an uncompressed size of almost 4 GiB in the central directory.
        let mut zipped = std::fs::read(&container).unwrap();
        let central = zipped
            .windows(4)
            .position(|sig| sig == b"PK\x01\x02")
            .unwrap();
        zipped[central + 24..central + 28].copy_from_slice(&0xFFFF_FFF0u32.to_le_bytes());
        std::fs::write(&container, &zipped).unwrap();

        let raw = open_raw(&container, &name).unwrap();
        assert_eq!(raw.into_bytes(), payload_for(&name));
    }

    #[test]
    fn test_open_raw_missing_container() {
        let TestArchive { tmp, arch: _arch } = create_test_archive();
        let container = tmp.path().join("nope.pvol.zip");

        match open_raw(&container, "2_20241231_235500.pvol.h5") {
            Err(AuraDataErr::ReadFailed {
                container: failed_container,
                entry,
                ..
            }) => {
                assert_eq!(failed_container, container);
                assert_eq!(entry, "2_20241231_235500.pvol.h5");
            }
            other => panic!("Expected ReadFailed, got {:?}", other),
        }
    }
}
