//! Sentinel-valued accessors.
//!
//! Same lookups as [`crate::info`], with failures folded into a fixed value:
//! `false`, `-1`, [`UNIX_EPOCH`] or `0`. A sentinel cannot be told apart from a
//! legitimate value of the same shape; prefer the typed accessors when the
//! difference matters.

use std::path::Path;
use std::time::{SystemTime, UNIX_EPOCH};

use log::trace;

use crate::info;
use crate::spec::FsError;

fn or_sentinel<T>(path: &Path, res: Result<T, FsError>, value_sentinel: T) -> T {
    res.unwrap_or_else(|e| {
        trace!("[sentinel] {} -> sentinel ({e})", path.display());
        value_sentinel
    })
}

/// `false` only when the path has no entry. Any other lookup failure reports
/// `true`: the entry is assumed present but inaccessible.
pub fn exists<P: AsRef<Path>>(path: P) -> bool {
    let path = path.as_ref();
    or_sentinel(path, info::exists(path), true)
}

/// Size in bytes, or `-1`.
pub fn size<P: AsRef<Path>>(path: P) -> i64 {
    let path = path.as_ref();
    let res = info::size(path).map(|n| i64::try_from(n).unwrap_or(i64::MAX));
    or_sentinel(path, res, -1)
}

/// Modification time, or the Unix epoch.
pub fn mod_time<P: AsRef<Path>>(path: P) -> SystemTime {
    let path = path.as_ref();
    or_sentinel(path, info::mod_time(path), UNIX_EPOCH)
}

/// Modification time in whole seconds, or `-1`.
pub fn mod_time_unix<P: AsRef<Path>>(path: P) -> i64 {
    let path = path.as_ref();
    or_sentinel(path, info::mod_time_unix(path), -1)
}

/// Modification time in nanoseconds, or `-1`.
pub fn mod_time_unix_nano<P: AsRef<Path>>(path: P) -> i64 {
    let path = path.as_ref();
    or_sentinel(path, info::mod_time_unix_nano(path), -1)
}

/// Mode bits, or `0`.
pub fn mode<P: AsRef<Path>>(path: P) -> u32 {
    let path = path.as_ref();
    or_sentinel(path, info::mode(path), 0)
}

/// Permission bits, or `0`.
pub fn perm<P: AsRef<Path>>(path: P) -> u32 {
    let path = path.as_ref();
    or_sentinel(path, info::perm(path), 0)
}
