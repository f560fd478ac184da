//! Enum/option models and the top-level error type.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Permission bits for files created by write/append (owner rw, group/other r).
pub const N_PERM_NEW_FILE: u32 = 0o644;

/// Chunk size of the streamed copy fallback.
pub const N_COPY_BUFFER_BYTES: usize = 64 * 1024;

////////////////////////////////////////////////////////////////////////////////
// #region EnumsInit

/// Kind of a filesystem entry as seen by stat (symlinks are followed).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EnumFileKind {
    /// Regular file.
    File,
    /// Directory.
    Dir,
    /// Device, socket, pipe or anything else.
    Other,
}

/// Key used by [`crate::SpecFileListing::sort`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EnumSortKey {
    /// Byte-wise comparison of the entry name.
    Name,
    /// Numeric comparison of the size in bytes.
    Size,
    /// Chronological comparison of the modification time.
    ModTime,
}

/// Sort direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EnumSortOrder {
    #[default]
    Ascending,
    /// Exact reverse of [`EnumSortOrder::Ascending`].
    Descending,
}

/// How `copy` tries to materialize the destination.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EnumCopyLinkStrategy {
    /// Try a hardlink first, stream bytes if linking fails.
    #[default]
    HardlinkFirst,
    /// Always stream bytes into an independent file.
    StreamOnly,
}

/// Which branch of `copy` produced the destination.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EnumCopyOutcome {
    /// Destination already was the same underlying file; nothing changed.
    SameFile,
    /// Destination is a new hardlink to the source.
    Linked,
    /// Bytes were streamed into the destination.
    Streamed,
}

impl EnumCopyOutcome {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::SameFile => "same_file",
            Self::Linked => "linked",
            Self::Streamed => "streamed",
        }
    }
}

/// Coarse error class of an [`FsError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EnumFsErrorKind {
    NotFound,
    InvalidArgument,
    PermissionOrPlatform,
    ShortWrite,
    SyncFailure,
}

// #endregion
////////////////////////////////////////////////////////////////////////////////
// #region Options

/// Options for `write_with` / `append_with`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpecWriteOptions {
    /// Mode applied when the target file is created (unix only, umask applies).
    pub perm_new_file: u32,
    /// Flush written bytes to stable storage before returning.
    pub if_sync: bool,
}

impl Default for SpecWriteOptions {
    fn default() -> Self {
        Self {
            perm_new_file: N_PERM_NEW_FILE,
            if_sync: false,
        }
    }
}

/// Options for `copy_with`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpecCopyOptions {
    /// Hardlink fast path or always stream.
    pub rule_link: EnumCopyLinkStrategy,
    /// Carry permissions, timestamps and (Linux) xattrs onto a streamed destination.
    pub if_preserve_metadata: bool,
    /// Sync the streamed destination before reporting success. `false` drops the
    /// durability guarantee: a successful copy may still be lost on power failure.
    pub if_sync: bool,
    /// Streaming chunk size; `0` means [`N_COPY_BUFFER_BYTES`].
    pub n_buffer_bytes: usize,
}

impl Default for SpecCopyOptions {
    fn default() -> Self {
        Self {
            rule_link: EnumCopyLinkStrategy::HardlinkFirst,
            if_preserve_metadata: false,
            if_sync: true,
            n_buffer_bytes: N_COPY_BUFFER_BYTES,
        }
    }
}

// #endregion
////////////////////////////////////////////////////////////////////////////////
// #region Errors

/// Error returned by every fallible operation of this crate.
#[derive(Debug, Error)]
pub enum FsError {
    /// Target path has no filesystem entry.
    #[error("Path not found: {}", path.display())]
    NotFound { path: PathBuf },
    /// Target exists but is not a regular file.
    #[error("Not a regular file: {}", path.display())]
    NotRegularFile { path: PathBuf },
    /// Malformed glob pattern.
    #[error("Invalid glob pattern `{pattern}`: {message}")]
    InvalidPattern { pattern: String, message: String },
    /// File content is not valid UTF-8.
    #[error("File content is not valid UTF-8: {}", path.display())]
    InvalidUtf8 { path: PathBuf },
    /// Fewer bytes were accepted than offered.
    #[error("Short write on {}: wrote {n_written} of {n_expected} bytes", path.display())]
    ShortWrite {
        path: PathBuf,
        n_written: u64,
        n_expected: u64,
    },
    /// Bytes were written but could not be flushed to stable storage.
    #[error("Failed to sync {} to stable storage: {source}", path.display())]
    SyncFailed {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    /// Any other OS-level failure.
    #[error("I/O error on {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

impl FsError {
    /// Wrap an I/O error, promoting `NotFound` to its own variant.
    pub fn from_io(path: impl Into<PathBuf>, source: io::Error) -> Self {
        let path = path.into();
        if source.kind() == io::ErrorKind::NotFound {
            return Self::NotFound { path };
        }
        Self::Io { path, source }
    }

    pub fn kind(&self) -> EnumFsErrorKind {
        match self {
            Self::NotFound { .. } => EnumFsErrorKind::NotFound,
            Self::NotRegularFile { .. }
            | Self::InvalidPattern { .. }
            | Self::InvalidUtf8 { .. } => EnumFsErrorKind::InvalidArgument,
            Self::ShortWrite { .. } => EnumFsErrorKind::ShortWrite,
            Self::SyncFailed { .. } => EnumFsErrorKind::SyncFailure,
            Self::Io { .. } => EnumFsErrorKind::PermissionOrPlatform,
        }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }
}

// #endregion
////////////////////////////////////////////////////////////////////////////////
