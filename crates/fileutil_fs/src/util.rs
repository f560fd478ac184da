use std::fs::{self, File, FileType, Metadata, OpenOptions};
use std::io::{self, Write};
use std::path::Path;
use std::time::{Duration, SystemTime, UNIX_EPOCH};

use filetime::FileTime;

use crate::spec::{EnumFileKind, FsError};

////////////////////////////////////////////////////////////////////////////////
// #region Writes

/// Push `buf` into `writer` until it is exhausted or the writer stops accepting
/// bytes. Returns the number of bytes accepted, which may be short.
pub(crate) fn write_fully<W: Write>(writer: &mut W, buf: &[u8]) -> io::Result<usize> {
    let mut n_written = 0;
    while n_written < buf.len() {
        match writer.write(&buf[n_written..]) {
            Ok(0) => break,
            Ok(n) => n_written += n,
            Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
            Err(e) => return Err(e),
        }
    }
    Ok(n_written)
}

/// Write `buf` and fail with [`FsError::ShortWrite`] if any byte was refused.
pub(crate) fn write_checked<W: Write>(
    writer: &mut W,
    buf: &[u8],
    path: &Path,
) -> Result<(), FsError> {
    let n_written = write_fully(writer, buf).map_err(|e| FsError::from_io(path, e))?;
    if n_written < buf.len() {
        return Err(FsError::ShortWrite {
            path: path.to_path_buf(),
            n_written: n_written as u64,
            n_expected: buf.len() as u64,
        });
    }
    Ok(())
}

pub(crate) fn open_for_write(
    path: &Path,
    perm_new_file: u32,
    if_append: bool,
) -> io::Result<File> {
    let mut opts = OpenOptions::new();
    opts.write(true).create(true);
    if if_append {
        opts.append(true);
    } else {
        opts.truncate(true);
    }
    #[cfg(unix)]
    {
        use std::os::unix::fs::OpenOptionsExt;
        opts.mode(perm_new_file);
    }
    #[cfg(not(unix))]
    {
        let _ = perm_new_file;
    }
    opts.open(path)
}

pub(crate) fn sync_file(file: &File, path: &Path) -> Result<(), FsError> {
    file.sync_all().map_err(|e| FsError::SyncFailed {
        path: path.to_path_buf(),
        source: e,
    })
}

// #endregion
////////////////////////////////////////////////////////////////////////////////
// #region MetadataHelpers

pub(crate) fn file_kind(file_type: FileType) -> EnumFileKind {
    if file_type.is_file() {
        EnumFileKind::File
    } else if file_type.is_dir() {
        EnumFileKind::Dir
    } else {
        EnumFileKind::Other
    }
}

#[cfg(unix)]
pub(crate) fn mode_bits(meta: &Metadata) -> u32 {
    use std::os::unix::fs::MetadataExt;
    meta.mode()
}

#[cfg(not(unix))]
pub(crate) fn mode_bits(meta: &Metadata) -> u32 {
    let n_type = if meta.is_dir() { 0o040000 } else { 0o100000 };
    let n_perm = match (meta.is_dir(), meta.permissions().readonly()) {
        (true, _) => 0o755,
        (false, true) => 0o444,
        (false, false) => 0o644,
    };
    n_type | n_perm
}

/// `(device, inode)` pair identifying the underlying file.
#[cfg(unix)]
pub(crate) fn file_identity(meta: &Metadata) -> Option<(u64, u64)> {
    use std::os::unix::fs::MetadataExt;
    Some((meta.dev(), meta.ino()))
}

#[cfg(not(unix))]
pub(crate) fn file_identity(_meta: &Metadata) -> Option<(u64, u64)> {
    None
}

/// True when both paths name the same underlying file.
pub(crate) fn is_same_file(
    path_a: &Path,
    meta_a: &Metadata,
    path_b: &Path,
    meta_b: &Metadata,
) -> bool {
    match (file_identity(meta_a), file_identity(meta_b)) {
        (Some(id_a), Some(id_b)) => id_a == id_b,
        _ => match (fs::canonicalize(path_a), fs::canonicalize(path_b)) {
            (Ok(a), Ok(b)) => a == b,
            _ => false,
        },
    }
}

pub(crate) fn file_time_to_system_time(file_time: FileTime) -> SystemTime {
    let n_secs = file_time.unix_seconds();
    let nanos = Duration::from_nanos(u64::from(file_time.nanoseconds()));
    if n_secs >= 0 {
        UNIX_EPOCH + Duration::from_secs(n_secs as u64) + nanos
    } else {
        UNIX_EPOCH - Duration::from_secs(n_secs.unsigned_abs()) + nanos
    }
}

/// Nanoseconds since the epoch, saturating at the `i64` range.
pub(crate) fn file_time_unix_nano(file_time: FileTime) -> i64 {
    file_time
        .unix_seconds()
        .checked_mul(1_000_000_000)
        .and_then(|n| n.checked_add(i64::from(file_time.nanoseconds())))
        .unwrap_or(if file_time.unix_seconds() < 0 {
            i64::MIN
        } else {
            i64::MAX
        })
}

// #endregion
////////////////////////////////////////////////////////////////////////////////
// #region MetadataPreservation

/// Carry permissions, timestamps and (Linux) extended attributes of the source
/// onto `path_file_dst`.
pub(crate) fn apply_metadata(
    stat_src: &Metadata,
    path_file_src: &Path,
    path_file_dst: &Path,
) -> io::Result<()> {
    use filetime::set_file_times;

    fs::set_permissions(path_file_dst, stat_src.permissions())?;

    let file_time_access = FileTime::from_last_access_time(stat_src);
    let file_time_modify = FileTime::from_last_modification_time(stat_src);
    set_file_times(path_file_dst, file_time_access, file_time_modify)?;

    #[cfg(target_os = "linux")]
    {
        copy_xattrs_linux(path_file_src, path_file_dst);
    }
    #[cfg(not(target_os = "linux"))]
    {
        let _ = path_file_src;
    }
    Ok(())
}

#[cfg(target_os = "linux")]
fn copy_xattrs_linux(path_file_src: &Path, path_file_dst: &Path) {
    let iter_xattr_names = match xattr::list(path_file_src) {
        Ok(v) => v,
        Err(e) => {
            log::debug!("[copy] xattrs unavailable on {} ({e})", path_file_src.display());
            return;
        }
    };

    for name in iter_xattr_names {
        let Some(raw_value) = xattr::get(path_file_src, &name).ok().flatten() else {
            continue;
        };
        if let Err(e) = xattr::set(path_file_dst, &name, &raw_value) {
            log::debug!(
                "[copy] failed to set xattr {:?} on {} ({e})",
                name,
                path_file_dst.display()
            );
        }
    }
}

// #endregion
////////////////////////////////////////////////////////////////////////////////
