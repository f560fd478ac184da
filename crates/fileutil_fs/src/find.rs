//! Glob-based file discovery.
//!
//! Patterns are matched one path segment at a time by the `glob` crate, so
//! wildcards never cross a separator and there is no recursive descent. Supported
//! syntax per segment: `*`, `?`, `[...]` classes negated by `!` or `^`, and (on
//! unix) `\` escapes. A run of `*` acts as a single `*`.

use std::fs;
use std::path::PathBuf;

use ::glob::{MatchOptions, glob_with};
use log::debug;

use crate::info::SpecFileInfo;
use crate::listing::SpecFileListing;
use crate::spec::FsError;

const OPTIONS_MATCH: MatchOptions = MatchOptions {
    case_sensitive: true,
    require_literal_separator: true,
    require_literal_leading_dot: false,
};

fn invalid_pattern(pattern: &str, message: impl Into<String>) -> FsError {
    FsError::InvalidPattern {
        pattern: pattern.to_string(),
        message: message.into(),
    }
}

/// Rewrite shell-style syntax into the dialect of `glob::Pattern`: `^`
/// negation becomes `!`, `*` runs collapse, and escapes become one-char classes.
fn translate_pattern(pattern: &str) -> Result<String, FsError> {
    let mut pattern_glob = String::with_capacity(pattern.len());
    let mut iter_chars = pattern.chars().peekable();
    // Chars seen inside the open class, `None` outside of one.
    let mut n_class_len: Option<usize> = None;
    let mut if_negated = false;

    while let Some(c) = iter_chars.next() {
        match (n_class_len, c) {
            (Some(0), '^' | '!') if !if_negated => {
                pattern_glob.push('!');
                if_negated = true;
            }
            (Some(n), ']') if n > 0 => {
                pattern_glob.push(']');
                n_class_len = None;
            }
            (Some(n), '\\') if cfg!(unix) => {
                let Some(c_escaped) = iter_chars.next() else {
                    return Err(invalid_pattern(pattern, "trailing backslash"));
                };
                pattern_glob.push(c_escaped);
                n_class_len = Some(n + 1);
            }
            (Some(n), _) => {
                pattern_glob.push(c);
                n_class_len = Some(n + 1);
            }
            (None, '[') => {
                pattern_glob.push('[');
                n_class_len = Some(0);
                if_negated = false;
            }
            (None, '*') => {
                pattern_glob.push('*');
                while iter_chars.next_if_eq(&'*').is_some() {}
            }
            (None, '\\') if cfg!(unix) => match iter_chars.next() {
                Some(c_escaped @ ('*' | '?' | '[' | ']')) => {
                    pattern_glob.push('[');
                    pattern_glob.push(c_escaped);
                    pattern_glob.push(']');
                }
                Some(c_escaped) => pattern_glob.push(c_escaped),
                None => return Err(invalid_pattern(pattern, "trailing backslash")),
            },
            (None, _) => pattern_glob.push(c),
        }
    }
    Ok(pattern_glob)
}

/// Paths matching `pattern`, name-ordered within each directory.
///
/// A pattern without meta characters yields itself if it exists. Returns an
/// empty list when nothing matches and [`FsError::InvalidPattern`] when any
/// segment is malformed. Unreadable directories contribute no matches.
pub fn glob(pattern: &str) -> Result<Vec<PathBuf>, FsError> {
    let pattern_glob = translate_pattern(pattern)?;
    let iter_paths = glob_with(&pattern_glob, OPTIONS_MATCH)
        .map_err(|e| invalid_pattern(pattern, e.to_string()))?;

    Ok(iter_paths
        .filter_map(|res| match res {
            Ok(path) => Some(path),
            Err(e) => {
                debug!("[find] skipping {} ({})", e.path().display(), e.error());
                None
            }
        })
        .collect())
}

/// Stat every path matching `pattern` into a listing.
///
/// Matches that disappear or cannot be stat'ed between globbing and stat are
/// left out.
pub fn find(pattern: &str) -> Result<SpecFileListing, FsError> {
    let l_paths = glob(pattern)?;
    let mut listing = SpecFileListing::with_capacity(l_paths.len());
    for path in l_paths {
        match fs::metadata(&path) {
            Ok(meta) => listing.push(SpecFileInfo::from_metadata(&path, &meta)),
            Err(e) => debug!("[find] dropping {} ({e})", path.display()),
        }
    }
    debug!("[find] {pattern} -> {} entries", listing.len());
    Ok(listing)
}
