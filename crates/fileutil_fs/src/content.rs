//! Whole-file read/write/append helpers and temp files.

use std::fs::{self, File};
use std::path::{Path, PathBuf};

use crate::spec::{FsError, SpecWriteOptions};
use crate::util::{open_for_write, sync_file, write_checked};

pub fn read<P: AsRef<Path>>(path: P) -> Result<Vec<u8>, FsError> {
    let path = path.as_ref();
    fs::read(path).map_err(|e| FsError::from_io(path, e))
}

pub fn read_string<P: AsRef<Path>>(path: P) -> Result<String, FsError> {
    let path = path.as_ref();
    String::from_utf8(read(path)?).map_err(|_| FsError::InvalidUtf8 {
        path: path.to_path_buf(),
    })
}

/// Create or truncate `path` and write `content` with default options.
pub fn write<P: AsRef<Path>>(path: P, content: &[u8]) -> Result<(), FsError> {
    write_with(path, content, &SpecWriteOptions::default())
}

pub fn write_with<P: AsRef<Path>>(
    path: P,
    content: &[u8],
    spec_write_options: &SpecWriteOptions,
) -> Result<(), FsError> {
    let path = path.as_ref();
    let mut file = open_for_write(path, spec_write_options.perm_new_file, false)
        .map_err(|e| FsError::from_io(path, e))?;
    write_checked(&mut file, content, path)?;
    if spec_write_options.if_sync {
        sync_file(&file, path)?;
    }
    Ok(())
}

pub fn write_string<P: AsRef<Path>>(path: P, content: &str) -> Result<(), FsError> {
    write(path, content.as_bytes())
}

/// Append `content` to `path`, creating it if missing.
pub fn append<P: AsRef<Path>>(path: P, content: &[u8]) -> Result<(), FsError> {
    append_with(path, content, &SpecWriteOptions::default())
}

pub fn append_with<P: AsRef<Path>>(
    path: P,
    content: &[u8],
    spec_write_options: &SpecWriteOptions,
) -> Result<(), FsError> {
    let path = path.as_ref();
    let mut file = open_for_write(path, spec_write_options.perm_new_file, true)
        .map_err(|e| FsError::from_io(path, e))?;
    write_checked(&mut file, content, path)?;
    if spec_write_options.if_sync {
        sync_file(&file, path)?;
    }
    Ok(())
}

pub fn append_string<P: AsRef<Path>>(path: P, content: &str) -> Result<(), FsError> {
    append(path, content.as_bytes())
}

/// Same as [`read_string`].
pub fn get_contents<P: AsRef<Path>>(path: P) -> Result<String, FsError> {
    read_string(path)
}

/// Same as [`write_string`].
pub fn put_contents<P: AsRef<Path>>(path: P, content: &str) -> Result<(), FsError> {
    write_string(path, content)
}

/// Same as [`append_string`].
pub fn append_contents<P: AsRef<Path>>(path: P, content: &str) -> Result<(), FsError> {
    append_string(path, content)
}

/// Create a new file in the system temp directory, opened for reading and
/// writing. The file outlives the handle; the caller removes it.
pub fn temp_file() -> Result<(File, PathBuf), FsError> {
    let dir_temp = std::env::temp_dir();
    let named_file = tempfile::Builder::new()
        .tempfile_in(&dir_temp)
        .map_err(|e| FsError::from_io(&dir_temp, e))?;
    named_file.keep().map_err(|e| FsError::Io {
        path: e.file.path().to_path_buf(),
        source: e.error,
    })
}

/// Like [`temp_file`], returning only the created path.
pub fn temp_name() -> Result<PathBuf, FsError> {
    let (_file, path) = temp_file()?;
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::{
        append, append_contents, append_string, get_contents, put_contents, read, read_string,
        temp_file, temp_name, write, write_string, write_with,
    };
    use crate::spec::{FsError, SpecWriteOptions};

    #[test]
    fn write_then_read_round_trips() {
        let tmp = tempfile::tempdir().expect("create temp dir");
        let path_file = tmp.path().join("blob.bin");

        let content = [0_u8, 1, 2, 255, b'\n', 0];
        write(&path_file, &content).expect("write");
        assert_eq!(read(&path_file).expect("read"), content);

        write(&path_file, b"").expect("write empty");
        assert!(read(&path_file).expect("read empty").is_empty());
    }

    #[test]
    fn write_truncates_existing_content() {
        let tmp = tempfile::tempdir().expect("create temp dir");
        let path_file = tmp.path().join("a.txt");
        write_string(&path_file, "a much longer line").expect("write");
        write_string(&path_file, "short").expect("overwrite");
        assert_eq!(read_string(&path_file).expect("read"), "short");
    }

    #[test]
    fn append_creates_then_extends() {
        let tmp = tempfile::tempdir().expect("create temp dir");
        let path_file = tmp.path().join("log.txt");

        append_string(&path_file, "one\n").expect("append creates");
        append(&path_file, b"two\n").expect("append bytes");
        append_contents(&path_file, "three\n").expect("append alias");
        assert_eq!(get_contents(&path_file).expect("read"), "one\ntwo\nthree\n");
    }

    #[test]
    fn aliases_match_string_helpers() {
        let tmp = tempfile::tempdir().expect("create temp dir");
        let path_file = tmp.path().join("a.txt");
        put_contents(&path_file, "hello").expect("put");
        assert_eq!(read_string(&path_file).expect("read"), "hello");
        assert_eq!(get_contents(&path_file).expect("get"), "hello");
    }

    #[test]
    fn read_missing_file_is_not_found() {
        let tmp = tempfile::tempdir().expect("create temp dir");
        let err = read(tmp.path().join("dummy.dummy")).expect_err("must fail");
        assert!(err.is_not_found());
    }

    #[test]
    fn read_string_rejects_invalid_utf8() {
        let tmp = tempfile::tempdir().expect("create temp dir");
        let path_file = tmp.path().join("bad.txt");
        write(&path_file, &[0xff, 0xfe, 0xfd]).expect("write");
        let err = read_string(&path_file).expect_err("must fail");
        assert!(matches!(err, FsError::InvalidUtf8 { .. }));
    }

    #[test]
    fn write_into_missing_directory_is_not_found() {
        let tmp = tempfile::tempdir().expect("create temp dir");
        let err = write(tmp.path().join("missing/a.txt"), b"x").expect_err("must fail");
        assert!(err.is_not_found());
    }

    #[cfg(unix)]
    #[test]
    fn write_with_applies_creation_permission() {
        use std::os::unix::fs::PermissionsExt;

        let tmp = tempfile::tempdir().expect("create temp dir");
        let path_file = tmp.path().join("private.txt");
        let spec_write_options = SpecWriteOptions {
            perm_new_file: 0o600,
            if_sync: true,
        };
        write_with(&path_file, b"secret", &spec_write_options).expect("write");

        let n_mode = std::fs::metadata(&path_file)
            .expect("metadata")
            .permissions()
            .mode();
        assert_eq!(n_mode & 0o777, 0o600);
    }

    #[test]
    fn temp_name_creates_persistent_file() {
        let path_temp = temp_name().expect("temp name");
        assert!(path_temp.is_file());
        assert!(path_temp.starts_with(std::env::temp_dir()));
        std::fs::remove_file(&path_temp).expect("cleanup");

        let (_file, path_temp) = temp_file().expect("temp file");
        assert!(path_temp.is_file());
        std::fs::remove_file(&path_temp).expect("cleanup");
    }
}
