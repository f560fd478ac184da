//! `fileutil_fs` v1:
//! Rust-side filesystem convenience helpers.
//!
//! Architecture:
//! - `spec`     : enums/options/errors
//! - `info`     : stat records and typed metadata accessors
//! - `sentinel` : metadata accessors folding failures into sentinel values
//! - `content`  : whole-file read/write/append and temp files
//! - `copy`     : single-file copy (hardlink fast path, streamed fallback)
//! - `report`   : copy outcome model
//! - `find`     : glob discovery producing a listing
//! - `listing`  : in-place sortable listings
//! - `pathname` : basename/dirname/extname
//! - `util`     : shared helper functions

pub mod content;
pub mod copy;
pub mod find;
pub mod info;
pub mod listing;
pub mod pathname;
pub mod report;
pub mod sentinel;
pub mod spec;
mod util;

pub use content::{
    append, append_contents, append_string, append_with, get_contents, put_contents, read,
    read_string, temp_file, temp_name, write, write_string, write_with,
};
pub use copy::{copy, copy_with};
pub use find::{find, glob};
pub use info::{
    SpecFileInfo, exists, get_file_info, mod_time, mod_time_unix, mod_time_unix_nano, mode, perm,
    size,
};
pub use listing::{SpecFileListing, compare_files};
pub use pathname::{basename, dirname, extname};
pub use report::ReportCopy;
pub use spec::{
    EnumCopyLinkStrategy, EnumCopyOutcome, EnumFileKind, EnumFsErrorKind, EnumSortKey,
    EnumSortOrder, FsError, N_COPY_BUFFER_BYTES, N_PERM_NEW_FILE, SpecCopyOptions,
    SpecWriteOptions,
};
