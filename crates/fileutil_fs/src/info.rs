//! File metadata records and typed stat accessors.

use std::fs::{self, Metadata};
use std::path::{Path, PathBuf};
use std::time::SystemTime;

use filetime::FileTime;

use crate::spec::{EnumFileKind, FsError};
use crate::util::{
    file_identity, file_kind, file_time_to_system_time, file_time_unix_nano, mode_bits,
};

/// Snapshot of one filesystem entry, taken by a single stat call.
///
/// The record is never refreshed; re-stat the path to observe later changes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpecFileInfo {
    /// Path the entry was looked up as.
    pub path: PathBuf,
    /// Last path segment.
    pub name: String,
    /// Size in bytes.
    pub size: u64,
    /// Last modification time.
    pub mtime: FileTime,
    /// Platform mode bits (type + permission).
    pub mode: u32,
    pub kind: EnumFileKind,
    /// `(device, inode)` on unix.
    pub identity: Option<(u64, u64)>,
}

impl SpecFileInfo {
    pub fn from_metadata(path: &Path, meta: &Metadata) -> Self {
        let name = path
            .file_name()
            .map(|v| v.to_string_lossy().to_string())
            .unwrap_or_else(|| path.to_string_lossy().to_string());
        Self {
            path: path.to_path_buf(),
            name,
            size: meta.len(),
            mtime: FileTime::from_last_modification_time(meta),
            mode: mode_bits(meta),
            kind: file_kind(meta.file_type()),
            identity: file_identity(meta),
        }
    }

    pub fn is_regular(&self) -> bool {
        self.kind == EnumFileKind::File
    }

    pub fn is_dir(&self) -> bool {
        self.kind == EnumFileKind::Dir
    }

    /// Permission bits only (`mode & 0o777`).
    pub fn perm(&self) -> u32 {
        self.mode & 0o777
    }

    pub fn modified(&self) -> SystemTime {
        file_time_to_system_time(self.mtime)
    }

    pub fn mod_time_unix(&self) -> i64 {
        self.mtime.unix_seconds()
    }

    pub fn mod_time_unix_nano(&self) -> i64 {
        file_time_unix_nano(self.mtime)
    }
}

fn stat(path: &Path) -> Result<Metadata, FsError> {
    fs::metadata(path).map_err(|e| FsError::from_io(path, e))
}

/// Stat `path` (following symlinks) into a [`SpecFileInfo`].
pub fn get_file_info<P: AsRef<Path>>(path: P) -> Result<SpecFileInfo, FsError> {
    let path = path.as_ref();
    let meta = stat(path)?;
    Ok(SpecFileInfo::from_metadata(path, &meta))
}

/// `Ok(false)` only when the path has no entry; other lookup failures are
/// returned as errors since the entry may exist but be inaccessible.
pub fn exists<P: AsRef<Path>>(path: P) -> Result<bool, FsError> {
    match stat(path.as_ref()) {
        Ok(_) => Ok(true),
        Err(FsError::NotFound { .. }) => Ok(false),
        Err(e) => Err(e),
    }
}

pub fn size<P: AsRef<Path>>(path: P) -> Result<u64, FsError> {
    Ok(stat(path.as_ref())?.len())
}

pub fn mod_time<P: AsRef<Path>>(path: P) -> Result<SystemTime, FsError> {
    Ok(get_file_info(path)?.modified())
}

/// Whole seconds since the Unix epoch.
pub fn mod_time_unix<P: AsRef<Path>>(path: P) -> Result<i64, FsError> {
    Ok(get_file_info(path)?.mod_time_unix())
}

/// Nanoseconds since the Unix epoch.
pub fn mod_time_unix_nano<P: AsRef<Path>>(path: P) -> Result<i64, FsError> {
    Ok(get_file_info(path)?.mod_time_unix_nano())
}

pub fn mode<P: AsRef<Path>>(path: P) -> Result<u32, FsError> {
    Ok(mode_bits(&stat(path.as_ref())?))
}

pub fn perm<P: AsRef<Path>>(path: P) -> Result<u32, FsError> {
    Ok(mode(path)? & 0o777)
}

#[cfg(test)]
mod tests {
    use filetime::{FileTime, set_file_times};

    use super::{exists, get_file_info, mod_time_unix, mod_time_unix_nano, perm, size};
    use crate::spec::{EnumFileKind, FsError};

    #[test]
    fn exists_distinguishes_present_and_missing() {
        let tmp = tempfile::tempdir().expect("create temp dir");
        let path_file = tmp.path().join("a.txt");
        std::fs::write(&path_file, "hello").expect("write");

        assert!(exists(&path_file).expect("lookup"));
        assert!(exists(tmp.path()).expect("lookup dir"));
        assert!(!exists(tmp.path().join("dummy.dummy")).expect("lookup missing"));
    }

    #[test]
    fn size_matches_content_length() {
        let tmp = tempfile::tempdir().expect("create temp dir");
        let path_file = tmp.path().join("a.txt");
        std::fs::write(&path_file, "hello").expect("write");
        assert_eq!(size(&path_file).expect("size"), 5);

        let path_empty = tmp.path().join("empty.txt");
        std::fs::write(&path_empty, "").expect("write");
        assert_eq!(size(&path_empty).expect("size"), 0);
    }

    #[test]
    fn missing_path_reports_not_found() {
        let tmp = tempfile::tempdir().expect("create temp dir");
        let err = size(tmp.path().join("dummy.dummy")).expect_err("must fail");
        assert!(matches!(err, FsError::NotFound { .. }));
    }

    #[test]
    fn file_info_reflects_stat() {
        let tmp = tempfile::tempdir().expect("create temp dir");
        let path_file = tmp.path().join("a.txt");
        std::fs::write(&path_file, "hello").expect("write");
        set_file_times(
            &path_file,
            FileTime::from_unix_time(1_700_000_010, 0),
            FileTime::from_unix_time(1_700_000_020, 0),
        )
        .expect("set times");

        let spec_info = get_file_info(&path_file).expect("stat");
        assert_eq!(spec_info.name, "a.txt");
        assert_eq!(spec_info.size, 5);
        assert_eq!(spec_info.kind, EnumFileKind::File);
        assert!(spec_info.is_regular());
        assert_eq!(spec_info.mod_time_unix(), 1_700_000_020);
        assert_eq!(mod_time_unix(&path_file).expect("mtime"), 1_700_000_020);
        assert_eq!(
            mod_time_unix_nano(&path_file).expect("mtime nano"),
            1_700_000_020_000_000_000
        );

        let spec_info_dir = get_file_info(tmp.path()).expect("stat dir");
        assert!(spec_info_dir.is_dir());
        assert!(!spec_info_dir.is_regular());
    }

    #[cfg(unix)]
    #[test]
    fn file_info_follows_symlinks() {
        let tmp = tempfile::tempdir().expect("create temp dir");
        let path_file = tmp.path().join("a.txt");
        let path_link_file = tmp.path().join("link.txt");
        let path_link_dir = tmp.path().join("link_dir");
        std::fs::write(&path_file, "hello").expect("write");
        std::os::unix::fs::symlink(&path_file, &path_link_file).expect("symlink file");
        std::os::unix::fs::symlink(tmp.path(), &path_link_dir).expect("symlink dir");

        let spec_info = get_file_info(&path_link_file).expect("stat link");
        assert_eq!(spec_info.kind, EnumFileKind::File);
        assert_eq!(spec_info.name, "link.txt");
        assert_eq!(spec_info.size, 5);
        assert_eq!(
            get_file_info(&path_link_dir).expect("stat dir link").kind,
            EnumFileKind::Dir
        );

        std::fs::remove_file(&path_file).expect("remove target");
        assert!(!exists(&path_link_file).expect("dangling link"));
    }

    #[cfg(unix)]
    #[test]
    fn perm_strips_file_type_bits() {
        use std::os::unix::fs::PermissionsExt;

        let tmp = tempfile::tempdir().expect("create temp dir");
        let path_file = tmp.path().join("a.txt");
        std::fs::write(&path_file, "hello").expect("write");
        std::fs::set_permissions(&path_file, std::fs::Permissions::from_mode(0o640))
            .expect("set permissions");

        assert_eq!(perm(&path_file).expect("perm"), 0o640);
        let spec_info = get_file_info(&path_file).expect("stat");
        assert_eq!(spec_info.mode & 0o170000, 0o100000);
        assert_eq!(spec_info.perm(), 0o640);
    }
}
