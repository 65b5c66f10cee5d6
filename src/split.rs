//! Lexical path splitting into directory, stem and extension
//!
//! No normalization happens here: `..` and `.` segments are kept verbatim and
//! nothing touches the filesystem.
//!
//! ```text
//! /shots/sq010/comp.1001.exr -> ("/shots/sq010", "comp.1001", ".exr")
//! /shots/sq010/comp.1001     -> ("/shots/sq010", "comp.1001", "")
//! /shots/sq010/comp.####     -> ("/shots/sq010", "comp.####", "")
//! ```

use std::path::{MAIN_SEPARATOR, is_separator};

use crate::error::{Result, SequenceError};
use crate::token::is_bare_token;

/// Characters that only make sense inside a frame token, never in an extension.
pub(crate) const TOKEN_GLYPHS: &[char] = &['#', '@', '%', '<', '>'];

/// Result of splitting a path string.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SplitPath<'a> {
    pub dirname: &'a str,
    pub stem: &'a str,
    /// Leading-dot extension or empty.
    pub ext: &'a str,
    /// Separator seen before the file name (platform default if there was none).
    pub separator: char,
}

/// Split `path` into `(dirname, stem, ext)`.
///
/// The extension is the last `.`-suffix of the file name unless that suffix is
/// empty, purely numeric, or itself a frame token; in those cases it stays in
/// the stem for the token locator.
pub fn split_path(path: &str) -> Result<SplitPath<'_>> {
    if path.trim().is_empty() {
        return Err(SequenceError::InvalidPath("empty path".to_string()));
    }

    let (dirname, filename, separator) = match path.rfind(is_separator) {
        Some(idx) => {
            let separator = path[idx..].chars().next().unwrap_or(MAIN_SEPARATOR);
            let dirname = if idx == 0 { &path[..separator.len_utf8()] } else { &path[..idx] };
            (dirname, &path[idx + separator.len_utf8()..], separator)
        }
        None => ("", path, MAIN_SEPARATOR),
    };

    if filename.is_empty() || filename == "." || filename == ".." {
        return Err(SequenceError::InvalidPath(format!("no file name in {}", path)));
    }

    let (stem, ext) = match filename.rfind('.') {
        // A leading dot (".hidden") is part of the name, not an extension
        Some(dot) if dot > 0 => {
            let suffix = &filename[dot + 1..];
            if suffix.is_empty() || suffix.bytes().all(|b| b.is_ascii_digit()) || is_bare_token(suffix) {
                (filename, "")
            } else if suffix.contains(TOKEN_GLYPHS) {
                return Err(SequenceError::InvalidPath(format!("malformed extension in {}", path)));
            } else {
                (&filename[..dot], &filename[dot..])
            }
        }
        _ => (filename, ""),
    };

    Ok(SplitPath {
        dirname,
        stem,
        ext,
        separator,
    })
}

/// Join a directory and a file name the way `split_path` took them apart.
pub fn join_path(dirname: &str, separator: char, basename: &str) -> String {
    if dirname.is_empty() {
        return basename.to_string();
    }
    let mut out = String::with_capacity(dirname.len() + 1 + basename.len());
    out.push_str(dirname);
    if !dirname.ends_with(is_separator) {
        out.push(separator);
    }
    out.push_str(basename);
    out
}
