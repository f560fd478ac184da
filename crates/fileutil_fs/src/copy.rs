//! Single-file copy engine: hardlink fast path, streamed fallback.

use std::fs::{self, File};
use std::io::{self, Read, Write};
use std::path::Path;

use log::debug;

use crate::report::ReportCopy;
use crate::spec::{
    EnumCopyLinkStrategy, EnumCopyOutcome, FsError, N_COPY_BUFFER_BYTES, SpecCopyOptions,
};
use crate::util::{apply_metadata, is_same_file, sync_file, write_fully};

/// Copy the regular file `source` to `destination` with default options.
///
/// See [`copy_with`].
pub fn copy<P, Q>(source: P, destination: Q) -> Result<ReportCopy, FsError>
where
    P: AsRef<Path>,
    Q: AsRef<Path>,
{
    copy_with(source, destination, &SpecCopyOptions::default())
}

/// Copy the regular file `source` to `destination`.
///
/// This function performs:
/// 1. Source lookup; the source must be a regular file.
/// 2. Destination lookup; an existing destination must be a regular file, and
///    if it already is the source file (same device and inode) nothing happens.
/// 3. Hardlink attempt (unless [`EnumCopyLinkStrategy::StreamOnly`]).
/// 4. On link failure, a streamed byte copy into a created/truncated destination,
///    checked for short writes, then synced to stable storage.
///
/// The returned [`ReportCopy`] tells which branch ran. The source is never
/// modified, and both file handles are closed before returning.
pub fn copy_with<P, Q>(
    source: P,
    destination: Q,
    spec_cp_options: &SpecCopyOptions,
) -> Result<ReportCopy, FsError>
where
    P: AsRef<Path>,
    Q: AsRef<Path>,
{
    let path_file_src = source.as_ref();
    let path_file_dst = destination.as_ref();

    let stat_src = fs::metadata(path_file_src).map_err(|e| FsError::from_io(path_file_src, e))?;
    if !stat_src.file_type().is_file() {
        return Err(FsError::NotRegularFile {
            path: path_file_src.to_path_buf(),
        });
    }

    match fs::metadata(path_file_dst) {
        Ok(stat_dst) => {
            if !stat_dst.file_type().is_file() {
                return Err(FsError::NotRegularFile {
                    path: path_file_dst.to_path_buf(),
                });
            }
            if is_same_file(path_file_src, &stat_src, path_file_dst, &stat_dst) {
                debug!(
                    "[copy] {} and {} are the same file",
                    path_file_src.display(),
                    path_file_dst.display()
                );
                return Ok(ReportCopy::same_file());
            }
        }
        Err(e) if e.kind() == io::ErrorKind::NotFound => {}
        Err(e) => return Err(FsError::from_io(path_file_dst, e)),
    }

    if spec_cp_options.rule_link == EnumCopyLinkStrategy::HardlinkFirst {
        match fs::hard_link(path_file_src, path_file_dst) {
            Ok(()) => {
                debug!(
                    "[copy] linked {} -> {}",
                    path_file_src.display(),
                    path_file_dst.display()
                );
                return Ok(ReportCopy::linked());
            }
            Err(e) => debug!(
                "[copy] hardlink {} -> {} failed ({e}); streaming",
                path_file_src.display(),
                path_file_dst.display()
            ),
        }
    }

    stream_file(path_file_src, path_file_dst, &stat_src, spec_cp_options)
}

fn stream_file(
    path_file_src: &Path,
    path_file_dst: &Path,
    stat_src: &fs::Metadata,
    spec_cp_options: &SpecCopyOptions,
) -> Result<ReportCopy, FsError> {
    let mut file_src = File::open(path_file_src).map_err(|e| FsError::from_io(path_file_src, e))?;
    let mut file_dst =
        File::create(path_file_dst).map_err(|e| FsError::from_io(path_file_dst, e))?;

    let n_bytes_copied = stream_bytes(
        &mut file_src,
        &mut file_dst,
        path_file_src,
        path_file_dst,
        spec_cp_options.n_buffer_bytes,
    )?;

    if spec_cp_options.if_preserve_metadata {
        apply_metadata(stat_src, path_file_src, path_file_dst)
            .map_err(|e| FsError::from_io(path_file_dst, e))?;
    }
    if spec_cp_options.if_sync {
        sync_file(&file_dst, path_file_dst)?;
    }

    debug!(
        "[copy] streamed {} -> {} ({n_bytes_copied} bytes)",
        path_file_src.display(),
        path_file_dst.display()
    );
    Ok(ReportCopy {
        outcome: EnumCopyOutcome::Streamed,
        n_bytes_copied,
        if_synced: spec_cp_options.if_sync,
        if_metadata_preserved: spec_cp_options.if_preserve_metadata,
    })
}

/// Move every byte of `reader` into `writer`.
///
/// Fails with [`FsError::ShortWrite`] as soon as the writer accepts fewer bytes
/// than were read, even if it reported no error.
pub(crate) fn stream_bytes<R: Read, W: Write>(
    reader: &mut R,
    writer: &mut W,
    path_file_src: &Path,
    path_file_dst: &Path,
    n_buffer_bytes: usize,
) -> Result<u64, FsError> {
    let n_buffer_bytes = if n_buffer_bytes == 0 {
        N_COPY_BUFFER_BYTES
    } else {
        n_buffer_bytes
    };
    let mut buf = vec![0_u8; n_buffer_bytes];
    let mut n_read_total: u64 = 0;
    let mut n_written_total: u64 = 0;

    loop {
        let n_read = match reader.read(&mut buf) {
            Ok(0) => break,
            Ok(n) => n,
            Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
            Err(e) => return Err(FsError::from_io(path_file_src, e)),
        };
        n_read_total += n_read as u64;

        let n_written =
            write_fully(writer, &buf[..n_read]).map_err(|e| FsError::from_io(path_file_dst, e))?;
        n_written_total += n_written as u64;
        if n_written < n_read {
            return Err(FsError::ShortWrite {
                path: path_file_dst.to_path_buf(),
                n_written: n_written_total,
                n_expected: n_read_total,
            });
        }
    }

    Ok(n_written_total)
}
