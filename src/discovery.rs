//! Finding the frames of a sequence on disk
//!
//! 1. Turn the template into a glob: `comp.####.exr` → `comp.*.exr`
//! 2. List matches in the sequence directory (the only filesystem access)
//! 3. Keep names whose frame part obeys the style's digit rule
//!    (`####` = exactly 4 digits, `%04d` = 4 or more)
//! 4. Parse the digits into frames
//!
//! The glob only narrows the listing; the digit rule is what decides, since
//! `*` cannot express a digit count.

use std::path::{Path, PathBuf};

use glob::{MatchOptions, Pattern};
use log::{debug, info};

use crate::config::SequenceConfig;
use crate::error::{Result, SequenceError};
use crate::frames::FrameSet;
use crate::padding::DigitRule;
use crate::sequence::ImageSequence;

/// Parse `path` and fill in the frames that exist next to it.
///
/// Accepts templates (`shot.####.exr`, `shot.%04d.exr`) as well as any single
/// frame (`shot.1001.exr`), whose style and width are inferred. No matching
/// files is not an error: the sequence comes back with empty frames. A path
/// without a frame token is returned as parsed, without listing.
///
/// # Examples
///
/// ```rust,no_run
/// # use image_sequence::find_sequence_on_disk;
/// let seq = find_sequence_on_disk("/renders/beauty.1001.exr")?;
/// for path in seq.get_paths(0)? {
///     println!("{}", path);
/// }
/// # Ok::<(), image_sequence::SequenceError>(())
/// ```
pub fn find_sequence_on_disk(path: &str) -> Result<ImageSequence> {
    find_sequence_on_disk_with(path, &SequenceConfig::default())
}

/// [`find_sequence_on_disk`] with explicit settings.
pub fn find_sequence_on_disk_with(path: &str, config: &SequenceConfig) -> Result<ImageSequence> {
    let mut seq = ImageSequence::with_config(path, config)?;
    if !seq.has_frame_token() {
        debug!("{} has no frame token, nothing to discover", path);
        return Ok(seq);
    }
    seq.find_frames_on_disk_with(config)?;
    Ok(seq)
}

/// Frames of `seq` present on disk.
pub(crate) fn scan_frames(seq: &ImageSequence, config: &SequenceConfig) -> Result<FrameSet> {
    let (prefix, tail) = seq
        .token_affixes()
        .ok_or_else(|| SequenceError::NoFrameToken(seq.path()))?;

    let dir = if seq.dirname().is_empty() {
        Path::new(".")
    } else {
        Path::new(seq.dirname())
    };
    let meta = std::fs::metadata(dir).map_err(|e| SequenceError::from_io(dir, e))?;
    if !meta.is_dir() {
        return Err(SequenceError::DirectoryNotFound(dir.to_path_buf()));
    }

    let pattern = discovery_glob(dir, &prefix, &tail);
    let rule = seq.padding_style().digit_rule(seq.padding());

    let mut frames = FrameSet::new();
    for path in glob_paths(&pattern, config.case_sensitive)? {
        let Some(file_name) = path.file_name().and_then(|s| s.to_str()) else {
            continue;
        };
        match match_frame(file_name, &prefix, &tail, rule, config.case_sensitive) {
            Some(frame) => {
                frames.insert(frame);
            }
            None => debug!("Skipping {}: frame part does not match {:?}", file_name, rule),
        }
    }

    info!(
        "Sequence {}: {} frames ({}), padding={}",
        seq.path(),
        frames.len(),
        frames,
        seq.padding()
    );
    Ok(frames)
}

/// Glob pattern `<dir>/<prefix>*<tail>` with every literal part escaped.
fn discovery_glob(dir: &Path, prefix: &str, tail: &str) -> String {
    let file_pattern = format!("{}*{}", Pattern::escape(prefix), Pattern::escape(tail));
    let dir_pattern = Pattern::escape(&dir.to_string_lossy());
    Path::new(&dir_pattern).join(file_pattern).to_string_lossy().to_string()
}

/// Expand a glob pattern into the regular files it matches.
fn glob_paths(pattern: &str, case_sensitive: bool) -> Result<Vec<PathBuf>> {
    let options = MatchOptions {
        case_sensitive,
        require_literal_separator: true,
        require_literal_leading_dot: false,
    };

    let entries = glob::glob_with(pattern, options).map_err(|source| SequenceError::Pattern {
        pattern: pattern.to_string(),
        source,
    })?;

    let mut paths = Vec::new();
    for entry in entries {
        match entry {
            Ok(path) if path.is_file() => paths.push(path),
            Ok(_) => {}
            Err(e) => {
                let path = e.path().to_path_buf();
                return Err(SequenceError::from_io(&path, e.into()));
            }
        }
    }
    paths.sort();
    Ok(paths)
}

/// Frame number of `file_name` if it reads `prefix` + digits + `tail`.
pub fn match_frame(file_name: &str, prefix: &str, tail: &str, rule: DigitRule, case_sensitive: bool) -> Option<u64> {
    if file_name.len() < prefix.len() + tail.len() {
        return None;
    }
    let head = file_name.get(..prefix.len())?;
    let digits = file_name.get(prefix.len()..file_name.len() - tail.len())?;
    let end = file_name.get(file_name.len() - tail.len()..)?;

    let same = |a: &str, b: &str| {
        if case_sensitive {
            a == b
        } else {
            a.eq_ignore_ascii_case(b)
        }
    };
    if !same(head, prefix) || !same(end, tail) || !rule.accepts(digits) {
        return None;
    }
    digits.parse().ok()
}
