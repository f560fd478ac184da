//! In-place sortable file listings.

use std::cmp::Ordering;
use std::ops::{Deref, DerefMut};

use crate::info::SpecFileInfo;
use crate::spec::{EnumSortKey, EnumSortOrder};

/// Ordered sequence of [`SpecFileInfo`]; duplicates are allowed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SpecFileListing {
    l_files: Vec<SpecFileInfo>,
}

/// Total order of two entries under `key`, reversed for descending order.
pub fn compare_files(
    a: &SpecFileInfo,
    b: &SpecFileInfo,
    key: EnumSortKey,
    order: EnumSortOrder,
) -> Ordering {
    let ord = match key {
        EnumSortKey::Name => a.name.as_bytes().cmp(b.name.as_bytes()),
        EnumSortKey::Size => a.size.cmp(&b.size),
        EnumSortKey::ModTime => a.mtime.cmp(&b.mtime),
    };
    match order {
        EnumSortOrder::Ascending => ord,
        EnumSortOrder::Descending => ord.reverse(),
    }
}

impl SpecFileListing {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(n_capacity: usize) -> Self {
        Self {
            l_files: Vec::with_capacity(n_capacity),
        }
    }

    pub fn push(&mut self, spec_info: SpecFileInfo) {
        self.l_files.push(spec_info);
    }

    pub fn into_inner(self) -> Vec<SpecFileInfo> {
        self.l_files
    }

    /// Reorder in place. Entries with equal keys end up in unspecified order.
    pub fn sort(&mut self, key: EnumSortKey, order: EnumSortOrder) {
        self.l_files.sort_unstable_by(|a, b| compare_files(a, b, key, order));
    }

    pub fn sort_by_name(&mut self) {
        self.sort(EnumSortKey::Name, EnumSortOrder::Ascending);
    }

    pub fn sort_by_size(&mut self) {
        self.sort(EnumSortKey::Size, EnumSortOrder::Ascending);
    }

    pub fn sort_by_mod_time(&mut self) {
        self.sort(EnumSortKey::ModTime, EnumSortOrder::Ascending);
    }

    pub fn sort_by_name_reverse(&mut self) {
        self.sort(EnumSortKey::Name, EnumSortOrder::Descending);
    }

    pub fn sort_by_size_reverse(&mut self) {
        self.sort(EnumSortKey::Size, EnumSortOrder::Descending);
    }

    pub fn sort_by_mod_time_reverse(&mut self) {
        self.sort(EnumSortKey::ModTime, EnumSortOrder::Descending);
    }
}

impl Deref for SpecFileListing {
    type Target = [SpecFileInfo];

    fn deref(&self) -> &Self::Target {
        &self.l_files
    }
}

impl DerefMut for SpecFileListing {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.l_files
    }
}

impl From<Vec<SpecFileInfo>> for SpecFileListing {
    fn from(l_files: Vec<SpecFileInfo>) -> Self {
        Self { l_files }
    }
}

impl FromIterator<SpecFileInfo> for SpecFileListing {
    fn from_iter<I: IntoIterator<Item = SpecFileInfo>>(iter: I) -> Self {
        Self {
            l_files: iter.into_iter().collect(),
        }
    }
}

impl IntoIterator for SpecFileListing {
    type Item = SpecFileInfo;
    type IntoIter = std::vec::IntoIter<SpecFileInfo>;

    fn into_iter(self) -> Self::IntoIter {
        self.l_files.into_iter()
    }
}

impl<'a> IntoIterator for &'a SpecFileListing {
    type Item = &'a SpecFileInfo;
    type IntoIter = std::slice::Iter<'a, SpecFileInfo>;

    fn into_iter(self) -> Self::IntoIter {
        self.l_files.iter()
    }
}
