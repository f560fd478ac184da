use fileutil_fs::{
    EnumCopyLinkStrategy, EnumFileKind, EnumSortKey, EnumSortOrder, FsError, N_PERM_NEW_FILE,
    ReportCopy, SpecCopyOptions, SpecFileInfo, SpecFileListing, SpecWriteOptions,
};
use pyo3::exceptions::{PyFileNotFoundError, PyOSError, PyValueError};
use pyo3::prelude::*;
use pyo3::types::PyBytes;

const N_BRIDGE_ABI_VERSION: u64 = 1;
const C_BRIDGE_CONTRACT_VERSION: &str = "fileutil.fs.v1";
const C_BRIDGE_TRANSPORT: &str = "rust_native";

////////////////////////////////////////////////////////////////////////////////
// #region Classes

#[pyclass(name = "FileInfo")]
#[derive(Debug, Clone)]
struct PyFileInfo {
    #[pyo3(get)]
    path: String,
    #[pyo3(get)]
    name: String,
    #[pyo3(get)]
    size: u64,
    #[pyo3(get)]
    mode: u32,
    #[pyo3(get)]
    kind: String,
    #[pyo3(get)]
    mod_time_unix: i64,
    #[pyo3(get)]
    mod_time_unix_nano: i64,
}

impl From<&SpecFileInfo> for PyFileInfo {
    fn from(spec_info: &SpecFileInfo) -> Self {
        Self {
            path: spec_info.path.to_string_lossy().to_string(),
            name: spec_info.name.clone(),
            size: spec_info.size,
            mode: spec_info.mode,
            kind: match spec_info.kind {
                EnumFileKind::File => "file",
                EnumFileKind::Dir => "dir",
                EnumFileKind::Other => "other",
            }
            .to_string(),
            mod_time_unix: spec_info.mod_time_unix(),
            mod_time_unix_nano: spec_info.mod_time_unix_nano(),
        }
    }
}

#[pymethods]
impl PyFileInfo {
    #[getter]
    fn perm(&self) -> u32 {
        self.mode & 0o777
    }

    fn __repr__(&self) -> String {
        format!(
            "FileInfo(name={:?}, size={}, kind={:?})",
            self.name, self.size, self.kind
        )
    }
}

#[pyclass(name = "FileListing")]
#[derive(Debug, Clone, Default)]
struct PyFileListing {
    listing: SpecFileListing,
}

#[pymethods]
impl PyFileListing {
    #[getter]
    fn items(&self) -> Vec<PyFileInfo> {
        self.listing.iter().map(PyFileInfo::from).collect()
    }

    fn names(&self) -> Vec<String> {
        self.listing.iter().map(|v| v.name.clone()).collect()
    }

    fn __len__(&self) -> usize {
        self.listing.len()
    }

    #[pyo3(signature = (key = "name", reverse = false))]
    fn sort(&mut self, key: &str, reverse: bool) -> PyResult<()> {
        let order = if reverse {
            EnumSortOrder::Descending
        } else {
            EnumSortOrder::Ascending
        };
        self.listing.sort(parse_sort_key(key)?, order);
        Ok(())
    }

    fn sort_by_name(&mut self) {
        self.listing.sort_by_name();
    }

    fn sort_by_size(&mut self) {
        self.listing.sort_by_size();
    }

    fn sort_by_mod_time(&mut self) {
        self.listing.sort_by_mod_time();
    }

    fn sort_by_name_reverse(&mut self) {
        self.listing.sort_by_name_reverse();
    }

    fn sort_by_size_reverse(&mut self) {
        self.listing.sort_by_size_reverse();
    }

    fn sort_by_mod_time_reverse(&mut self) {
        self.listing.sort_by_mod_time_reverse();
    }
}

#[pyclass(name = "ReportCopy")]
#[derive(Debug, Clone)]
struct PyReportCopy {
    #[pyo3(get)]
    outcome: String,
    #[pyo3(get)]
    n_bytes_copied: u64,
    #[pyo3(get)]
    if_synced: bool,
    #[pyo3(get)]
    if_metadata_preserved: bool,
    summary: String,
}

impl From<ReportCopy> for PyReportCopy {
    fn from(report_copy: ReportCopy) -> Self {
        Self {
            outcome: report_copy.outcome.as_str().to_string(),
            n_bytes_copied: report_copy.n_bytes_copied,
            if_synced: report_copy.if_synced,
            if_metadata_preserved: report_copy.if_metadata_preserved,
            summary: report_copy.to_string(),
        }
    }
}

#[pymethods]
impl PyReportCopy {
    fn __str__(&self) -> String {
        self.summary.clone()
    }
}

// #endregion
////////////////////////////////////////////////////////////////////////////////
// #region Parsing

fn parse_sort_key(value: &str) -> PyResult<EnumSortKey> {
    match value {
        "name" => Ok(EnumSortKey::Name),
        "size" => Ok(EnumSortKey::Size),
        "mod_time" => Ok(EnumSortKey::ModTime),
        _ => Err(PyValueError::new_err(format!(
            "Invalid sort key: `{value}`. Expected one of: ['name', 'size', 'mod_time']"
        ))),
    }
}

fn parse_rule_link(value: &str) -> PyResult<EnumCopyLinkStrategy> {
    match value {
        "hardlink_first" => Ok(EnumCopyLinkStrategy::HardlinkFirst),
        "stream_only" => Ok(EnumCopyLinkStrategy::StreamOnly),
        _ => Err(PyValueError::new_err(format!(
            "Invalid link strategy: `{value}`. Expected one of: ['hardlink_first', 'stream_only']"
        ))),
    }
}

fn map_fs_error(exception: FsError) -> PyErr {
    match exception {
        FsError::NotFound { .. } => PyFileNotFoundError::new_err(exception.to_string()),
        FsError::NotRegularFile { .. }
        | FsError::InvalidPattern { .. }
        | FsError::InvalidUtf8 { .. } => PyValueError::new_err(exception.to_string()),
        FsError::ShortWrite { .. } | FsError::SyncFailed { .. } | FsError::Io { .. } => {
            PyOSError::new_err(exception.to_string())
        }
    }
}

// #endregion
////////////////////////////////////////////////////////////////////////////////
// #region Functions

#[pyfunction]
fn exists(py: Python<'_>, path: String) -> PyResult<bool> {
    py.allow_threads(|| fileutil_fs::exists(path)).map_err(map_fs_error)
}

#[pyfunction]
fn size(py: Python<'_>, path: String) -> PyResult<u64> {
    py.allow_threads(|| fileutil_fs::size(path)).map_err(map_fs_error)
}

#[pyfunction]
fn mod_time_unix(py: Python<'_>, path: String) -> PyResult<i64> {
    py.allow_threads(|| fileutil_fs::mod_time_unix(path)).map_err(map_fs_error)
}

#[pyfunction]
fn mod_time_unix_nano(py: Python<'_>, path: String) -> PyResult<i64> {
    py.allow_threads(|| fileutil_fs::mod_time_unix_nano(path)).map_err(map_fs_error)
}

#[pyfunction]
fn mode(py: Python<'_>, path: String) -> PyResult<u32> {
    py.allow_threads(|| fileutil_fs::mode(path)).map_err(map_fs_error)
}

#[pyfunction]
fn perm(py: Python<'_>, path: String) -> PyResult<u32> {
    py.allow_threads(|| fileutil_fs::perm(path)).map_err(map_fs_error)
}

#[pyfunction]
fn read<'py>(py: Python<'py>, path: String) -> PyResult<Bound<'py, PyBytes>> {
    let content = py
        .allow_threads(|| fileutil_fs::read(path))
        .map_err(map_fs_error)?;
    Ok(PyBytes::new(py, &content))
}

#[pyfunction]
fn read_string(py: Python<'_>, path: String) -> PyResult<String> {
    py.allow_threads(|| fileutil_fs::read_string(path)).map_err(map_fs_error)
}

#[pyfunction]
#[pyo3(signature = (path, content, perm_new_file = N_PERM_NEW_FILE, if_sync = false))]
fn write(
    py: Python<'_>,
    path: String,
    content: &[u8],
    perm_new_file: u32,
    if_sync: bool,
) -> PyResult<()> {
    let spec_write_options = SpecWriteOptions {
        perm_new_file,
        if_sync,
    };
    py.allow_threads(|| fileutil_fs::write_with(path, content, &spec_write_options))
        .map_err(map_fs_error)
}

#[pyfunction]
#[pyo3(signature = (path, content, perm_new_file = N_PERM_NEW_FILE, if_sync = false))]
fn write_string(
    py: Python<'_>,
    path: String,
    content: &str,
    perm_new_file: u32,
    if_sync: bool,
) -> PyResult<()> {
    write(py, path, content.as_bytes(), perm_new_file, if_sync)
}

#[pyfunction]
#[pyo3(signature = (path, content, perm_new_file = N_PERM_NEW_FILE, if_sync = false))]
fn append(
    py: Python<'_>,
    path: String,
    content: &[u8],
    perm_new_file: u32,
    if_sync: bool,
) -> PyResult<()> {
    let spec_write_options = SpecWriteOptions {
        perm_new_file,
        if_sync,
    };
    py.allow_threads(|| fileutil_fs::append_with(path, content, &spec_write_options))
        .map_err(map_fs_error)
}

#[pyfunction]
#[pyo3(signature = (path, content, perm_new_file = N_PERM_NEW_FILE, if_sync = false))]
fn append_string(
    py: Python<'_>,
    path: String,
    content: &str,
    perm_new_file: u32,
    if_sync: bool,
) -> PyResult<()> {
    append(py, path, content.as_bytes(), perm_new_file, if_sync)
}

#[pyfunction]
fn temp_name(py: Python<'_>) -> PyResult<String> {
    let path = py.allow_threads(fileutil_fs::temp_name).map_err(map_fs_error)?;
    Ok(path.to_string_lossy().to_string())
}

#[pyfunction(name = "copy")]
#[pyo3(signature = (
    source,
    destination,
    rule_link = "hardlink_first",
    if_preserve_metadata = false,
    if_sync = true
))]
fn copy_py(
    py: Python<'_>,
    source: String,
    destination: String,
    rule_link: &str,
    if_preserve_metadata: bool,
    if_sync: bool,
) -> PyResult<PyReportCopy> {
    let spec_cp_options = SpecCopyOptions {
        rule_link: parse_rule_link(rule_link)?,
        if_preserve_metadata,
        if_sync,
        ..SpecCopyOptions::default()
    };

    let report_copy =
        py.allow_threads(|| fileutil_fs::copy_with(source, destination, &spec_cp_options));
    let report_copy = report_copy.map_err(map_fs_error)?;
    Ok(PyReportCopy::from(report_copy))
}

#[pyfunction]
fn find(py: Python<'_>, pattern: String) -> PyResult<PyFileListing> {
    let listing = py
        .allow_threads(|| fileutil_fs::find(&pattern))
        .map_err(map_fs_error)?;
    Ok(PyFileListing { listing })
}

#[pyfunction]
fn basename(path: &str) -> String {
    fileutil_fs::basename(path)
}

#[pyfunction]
fn dirname(path: &str) -> String {
    fileutil_fs::dirname(path)
}

#[pyfunction]
fn extname(path: &str) -> String {
    fileutil_fs::extname(path)
}

// #endregion
////////////////////////////////////////////////////////////////////////////////

#[pymodule]
fn _fileutil_fs_rs(module: &Bound<'_, PyModule>) -> PyResult<()> {
    module.add_class::<PyFileInfo>()?;
    module.add_class::<PyFileListing>()?;
    module.add_class::<PyReportCopy>()?;
    module.add_function(wrap_pyfunction!(exists, module)?)?;
    module.add_function(wrap_pyfunction!(size, module)?)?;
    module.add_function(wrap_pyfunction!(mod_time_unix, module)?)?;
    module.add_function(wrap_pyfunction!(mod_time_unix_nano, module)?)?;
    module.add_function(wrap_pyfunction!(mode, module)?)?;
    module.add_function(wrap_pyfunction!(perm, module)?)?;
    module.add_function(wrap_pyfunction!(read, module)?)?;
    module.add_function(wrap_pyfunction!(read_string, module)?)?;
    module.add_function(wrap_pyfunction!(write, module)?)?;
    module.add_function(wrap_pyfunction!(write_string, module)?)?;
    module.add_function(wrap_pyfunction!(append, module)?)?;
    module.add_function(wrap_pyfunction!(append_string, module)?)?;
    module.add_function(wrap_pyfunction!(temp_name, module)?)?;
    module.add_function(wrap_pyfunction!(copy_py, module)?)?;
    module.add_function(wrap_pyfunction!(find, module)?)?;
    module.add_function(wrap_pyfunction!(basename, module)?)?;
    module.add_function(wrap_pyfunction!(dirname, module)?)?;
    module.add_function(wrap_pyfunction!(extname, module)?)?;
    module.add("__bridge_abi__", N_BRIDGE_ABI_VERSION)?;
    module.add("__bridge_contract__", C_BRIDGE_CONTRACT_VERSION)?;
    module.add("__bridge_transport__", C_BRIDGE_TRANSPORT)?;
    Ok(())
}
