//! Image sequence: one path template plus a set of frames
//!
//! **Why**: Renders and comps are stored as numbered files (`comp.1001.exr`,
//! `comp.1002.exr`...). Tools need to go from any one of those spellings to the
//! template (`comp.%04d.exr`, `comp.####.exr`) and back to concrete paths.
//!
//! **Used by**: Discovery (`find_sequence_on_disk`), callers building file lists
//!
//! # Anatomy
//!
//! ```text
//! /shots/sq010/comp.%04d_bake.exr
//! └─dirname──┘ └name┘│└tok┘└sfx┘└ext┘
//!                    separator
//! ```
//!
//! `path` and `basename` are rendered from the fields on every call; nothing
//! derived is cached, so every setter is immediately visible in `path()`.
//!
//! # Token-less paths
//!
//! A path without any frame indicator (`/tex/logo.png`) parses fine but has no
//! frame axis: `frames` stays empty and operations that need to render a frame
//! (`eval_at_frame`, `get_paths`, `format_with_padding_style`, `set_padding`,
//! `set_frames`) return [`SequenceError::NoFrameToken`].
//!
//! # Layout
//!
//! The file name is `{name}{frame}{ext}` unless [`ImageSequence::set_format`]
//! picks another order (see [`BasenameLayout`]). Serialized records keep the
//! default order in `path` and carry the layout next to it.

use std::fmt;
use std::path::{MAIN_SEPARATOR, is_separator};

use log::debug;
use serde::{Deserialize, Serialize};

use crate::config::SequenceConfig;
use crate::discovery;
use crate::error::{Result, SequenceError};
use crate::frames::{FrameSet, to_frame};
use crate::layout::{BasenameLayout, LayoutPart};
use crate::padding::{PaddingStyle, UDIM_WIDTH};
use crate::split::{TOKEN_GLYPHS, join_path, split_path};
use crate::token::{has_symbolic_token, locate};

/// Placeholder used by [`ImageSequence::abstract_path_representation`].
pub const ABSTRACT_FRAME_TOKEN: &str = "$FRAME";

/// Token position inside the file name.
#[derive(Debug, Clone, PartialEq, Eq)]
struct TokenSlot {
    /// Separator between name and token (`.`, `_`, `-` or empty).
    separator: String,
    /// Literal text rendered in place of the padding template.
    custom: Option<String>,
}

/// File sequence with a frame token at a fixed position in the file name.
///
/// # Examples
///
/// ```rust
/// # use image_sequence::{ImageSequence, PaddingStyle};
/// let mut seq = ImageSequence::new("/mock/path/file_name.1001.exr")?;
/// assert_eq!(seq.path(), "/mock/path/file_name.%04d.exr");
///
/// seq.set_padding_style(PaddingStyle::Hash);
/// assert_eq!(seq.path(), "/mock/path/file_name.####.exr");
/// assert_eq!(seq.eval_at_frame(12)?, "/mock/path/file_name.0012.exr");
/// # Ok::<(), image_sequence::SequenceError>(())
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(into = "SequenceRecord", try_from = "SequenceRecord")]
pub struct ImageSequence {
    dirname: String,
    dir_separator: char,
    name: String,
    suffix: String,
    ext: String,
    token: Option<TokenSlot>,
    padding_style: PaddingStyle,
    padding: u32,
    frames: FrameSet,
    layout: BasenameLayout,
}

impl ImageSequence {
    /// Parse a path with default settings (bare digits become `%0Nd`).
    pub fn new(path: &str) -> Result<Self> {
        Self::with_config(path, &SequenceConfig::default())
    }

    /// Parse a path and force a padding style.
    ///
    /// A `<UDIM>` token in the path stays UDIM regardless of `style`.
    pub fn with_padding_style(path: &str, style: PaddingStyle) -> Result<Self> {
        Self::parse(path, Some(style), &SequenceConfig::default())
    }

    /// Parse a path using `config` for anything the path does not decide.
    pub fn with_config(path: &str, config: &SequenceConfig) -> Result<Self> {
        Self::parse(path, None, config)
    }

    /// Build a sequence from explicit parts.
    ///
    /// The token goes right after `name`, joined with `.` unless `name` is empty.
    pub fn from_components(dirname: &str, name: &str, ext: &str, style: PaddingStyle, padding: u32) -> Result<Self> {
        validate_name(name, true)?;
        validate_ext(ext)?;
        let padding = style.effective_width(padding);
        if padding == 0 {
            return Err(SequenceError::InvalidPadding(padding));
        }

        Ok(Self {
            dirname: dirname.to_string(),
            dir_separator: dirname.chars().rev().find(|c| is_separator(*c)).unwrap_or(MAIN_SEPARATOR),
            name: name.to_string(),
            suffix: String::new(),
            ext: ext.to_string(),
            token: Some(TokenSlot {
                separator: if name.is_empty() { String::new() } else { ".".to_string() },
                custom: None,
            }),
            padding_style: style,
            padding,
            frames: FrameSet::new(),
            layout: BasenameLayout::default(),
        })
    }

    fn parse(path: &str, style_override: Option<PaddingStyle>, config: &SequenceConfig) -> Result<Self> {
        let split = split_path(path)?;

        let seq = match locate(split.stem)? {
            Some(token) => {
                let parts = token.split_stem(split.stem);
                let padding_style = match (token.style, style_override) {
                    (PaddingStyle::Udim, _) => PaddingStyle::Udim,
                    (_, Some(style)) => style,
                    (PaddingStyle::Literal, None) => config.padding_style,
                    (style, None) => style,
                };

                Self {
                    dirname: split.dirname.to_string(),
                    dir_separator: split.separator,
                    name: parts.name.to_string(),
                    suffix: parts.suffix.to_string(),
                    ext: split.ext.to_string(),
                    token: Some(TokenSlot {
                        separator: parts.separator.to_string(),
                        custom: None,
                    }),
                    padding_style,
                    padding: padding_style.effective_width(token.width),
                    frames: token.frame.into_iter().collect(),
                    layout: BasenameLayout::default(),
                }
            }
            None => Self {
                dirname: split.dirname.to_string(),
                dir_separator: split.separator,
                name: split.stem.to_string(),
                suffix: String::new(),
                ext: split.ext.to_string(),
                token: None,
                padding_style: style_override.unwrap_or(config.padding_style),
                padding: 0,
                frames: FrameSet::new(),
                layout: BasenameLayout::default(),
            },
        };

        debug!(
            "Parsed {} -> {} (style={}, padding={}, frames={})",
            path,
            seq.path(),
            seq.padding_style,
            seq.padding,
            seq.frames
        );
        Ok(seq)
    }

    // ------------------------------------------------------------------
    // Read-only / computed
    // ------------------------------------------------------------------

    pub fn dirname(&self) -> &str {
        &self.dirname
    }

    /// File name without directory, frame token rendered as its template.
    pub fn basename(&self) -> String {
        let token = self.token.as_ref().map(|slot| match &slot.custom {
            Some(custom) => custom.clone(),
            None => self.padding_style.render(self.padding, None),
        });
        self.compose_basename(token.as_deref())
    }

    /// Full template path.
    pub fn path(&self) -> String {
        join_path(&self.dirname, self.dir_separator, &self.basename())
    }

    /// True when the file name carries a frame token.
    pub fn has_frame_token(&self) -> bool {
        self.token.is_some()
    }

    /// First frame, `None` when there are no frames.
    pub fn start(&self) -> Option<u64> {
        self.frames.start()
    }

    /// Last frame, `None` when there are no frames.
    pub fn end(&self) -> Option<u64> {
        self.frames.end()
    }

    /// Number of frames.
    pub fn len(&self) -> usize {
        self.frames.len()
    }

    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }

    /// Text between the token and the extension (`_bake` in `comp.####_bake.exr`).
    pub fn suffix(&self) -> &str {
        &self.suffix
    }

    // ------------------------------------------------------------------
    // Mutable properties
    // ------------------------------------------------------------------

    /// File name without frame token, separator or extension.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Rejects names holding a path separator or anything that would read
    /// back as a frame token.
    pub fn set_name(&mut self, name: impl Into<String>) -> Result<()> {
        let name = name.into();
        validate_name(&name, self.token.is_some())?;
        self.name = name;
        Ok(())
    }

    /// Extension with leading dot, or empty.
    pub fn ext(&self) -> &str {
        &self.ext
    }

    pub fn set_ext(&mut self, ext: impl Into<String>) -> Result<()> {
        let ext = ext.into();
        validate_ext(&ext)?;
        self.ext = ext;
        Ok(())
    }

    /// Token width in digits, 0 when there is no token. Always 4 for UDIM.
    pub fn padding(&self) -> u32 {
        if self.token.is_some() {
            self.padding_style.effective_width(self.padding)
        } else {
            0
        }
    }

    /// Change the rendered width. Frame values are untouched.
    ///
    /// Replaces any custom frame token. UDIM tiles are always 4 digits, so a
    /// UDIM sequence only accepts 4.
    pub fn set_padding(&mut self, padding: u32) -> Result<()> {
        if padding == 0 || (self.padding_style == PaddingStyle::Udim && padding != UDIM_WIDTH) {
            return Err(SequenceError::InvalidPadding(padding));
        }
        let slot = self.token_slot_mut()?;
        slot.custom = None;
        self.padding = padding;
        Ok(())
    }

    pub fn padding_style(&self) -> PaddingStyle {
        self.padding_style
    }

    /// Change the token notation. Switching to UDIM pins the width to 4.
    ///
    /// Replaces any custom frame token.
    pub fn set_padding_style(&mut self, style: PaddingStyle) {
        self.padding_style = style;
        if let Some(slot) = self.token.as_mut() {
            slot.custom = None;
            if style == PaddingStyle::Udim {
                self.padding = style.effective_width(self.padding);
            }
        }
    }

    /// [`set_padding_style`](Self::set_padding_style) from a symbolic token
    /// (`%`, `#`, `@`, `<UDIM>`).
    pub fn set_padding_style_token(&mut self, token: &str) -> Result<()> {
        let style = PaddingStyle::from_token(token)?;
        self.set_padding_style(style);
        Ok(())
    }

    pub fn frames(&self) -> &FrameSet {
        &self.frames
    }

    /// Replace all frames. Duplicates collapse; negative frames are rejected.
    pub fn set_frames<I>(&mut self, frames: I) -> Result<()>
    where
        I: IntoIterator<Item = i64>,
    {
        self.require_token()?;
        self.frames = FrameSet::from_frames(frames)?;
        Ok(())
    }

    /// Replace all frames with an already validated set.
    pub fn set_frame_set(&mut self, frames: FrameSet) -> Result<()> {
        if frames.is_empty() {
            self.frames = frames;
            return Ok(());
        }
        self.require_token()?;
        self.frames = frames;
        Ok(())
    }

    // ------------------------------------------------------------------
    // Rendering
    // ------------------------------------------------------------------

    /// Path with the token rendered at `frame`, whether or not `frame` is in `frames`.
    pub fn eval_at_frame(&self, frame: i64) -> Result<String> {
        self.require_token()?;
        let frame = to_frame(frame)?;
        Ok(self.render_at(frame))
    }

    /// Template path as if `padding_style` (and `padding`, when given) were set.
    ///
    /// The current style and width give back `path()` unchanged, custom frame
    /// token included. Any other combination renders the padding template.
    ///
    /// ```rust
    /// # use image_sequence::{ImageSequence, PaddingStyle};
    /// let seq = ImageSequence::new("/mock/file.1001.exr")?;
    /// assert_eq!(seq.format_with_padding_style(PaddingStyle::Hash, None)?, "/mock/file.####.exr");
    /// assert_eq!(seq.format_with_padding_style(PaddingStyle::At, Some(2))?, "/mock/file.@@.exr");
    /// # Ok::<(), image_sequence::SequenceError>(())
    /// ```
    pub fn format_with_padding_style(&self, style: PaddingStyle, padding: Option<u32>) -> Result<String> {
        self.require_token()?;
        let width = match padding {
            Some(0) => return Err(SequenceError::InvalidPadding(0)),
            Some(width) => width,
            None => self.padding,
        };
        if style == self.padding_style && style.effective_width(width) == self.padding() {
            return Ok(self.path());
        }
        Ok(self.compose_path(Some(&style.render(width, None))))
    }

    /// Put `token` at the frame position, but only when there are frames.
    ///
    /// Handy when a path may or may not be a sequence: `$F` for Houdini,
    /// `<UDIM>` for texture lookups, and so on. Without frames the path is
    /// returned as-is.
    pub fn optional_frame_token_format(&self, token: &str) -> String {
        if self.frames.is_empty() || self.token.is_none() {
            return self.path();
        }
        self.compose_path(Some(token))
    }

    /// One path per frame, ascending, each frame shifted by `offset`.
    pub fn get_paths(&self, offset: i64) -> Result<Vec<String>> {
        Ok(self.iter_paths(offset)?.collect())
    }

    /// Lazy [`get_paths`](Self::get_paths).
    ///
    /// The shifted range is validated up front, so the iterator itself cannot fail.
    pub fn iter_paths(&self, offset: i64) -> Result<impl Iterator<Item = String> + '_> {
        self.require_token()?;
        for frame in [self.frames.start(), self.frames.end()].into_iter().flatten() {
            shift_frame(frame, offset)?;
        }
        Ok(self
            .frames
            .iter()
            .map(move |frame| self.render_at(frame.wrapping_add_signed(offset))))
    }

    /// Path with the token replaced by `$FRAME`; identifies the sequence
    /// independently of padding and style.
    pub fn abstract_path_representation(&self) -> String {
        match self.token {
            Some(_) => self.compose_path(Some(ABSTRACT_FRAME_TOKEN)),
            None => self.path(),
        }
    }

    // ------------------------------------------------------------------
    // Token manipulation
    // ------------------------------------------------------------------

    /// Render `token` verbatim in `path` until padding or style change.
    ///
    /// An empty token hides the token (and its separator) from `path`.
    pub fn set_custom_frame_token(&mut self, token: impl Into<String>) -> Result<()> {
        let token = token.into();
        self.token_slot_mut()?.custom = Some(token);
        Ok(())
    }

    /// Basename layout in effect.
    pub fn layout(&self) -> &BasenameLayout {
        &self.layout
    }

    /// Reorder the file name with a pattern of `{name}`, `{frame}` and `{ext}`.
    ///
    /// ```rust
    /// # use image_sequence::ImageSequence;
    /// let mut seq = ImageSequence::new("/mock/path/file_name.1001.exr")?;
    /// seq.set_format("{name}{ext}{frame}")?;
    /// assert_eq!(seq.basename(), "file_name.exr.%04d");
    /// # Ok::<(), image_sequence::SequenceError>(())
    /// ```
    pub fn set_format(&mut self, pattern: &str) -> Result<()> {
        self.layout = BasenameLayout::parse(pattern)?;
        debug!("Layout of {} set to {}", self.name, self.layout);
        Ok(())
    }

    /// Drop the frame axis: the token, its separator and all frames.
    pub fn clear_frame_token(&mut self) {
        self.token = None;
        self.padding = 0;
        self.frames.clear();
    }

    /// Union frames with `other` and keep the wider padding.
    pub fn merge(&mut self, other: &ImageSequence) -> Result<()> {
        if other.frames.is_empty() {
            return Ok(());
        }
        self.require_token()?;
        if other.padding() > self.padding {
            self.padding = other.padding();
        }
        self.frames.union_with(&other.frames);
        Ok(())
    }

    // ------------------------------------------------------------------
    // Discovery
    // ------------------------------------------------------------------

    /// Replace `frames` with the frames found next to this sequence on disk.
    ///
    /// Returns `true` when at least one frame was found. A missing directory
    /// is an error; an empty match is not.
    pub fn find_frames_on_disk(&mut self) -> Result<bool> {
        self.find_frames_on_disk_with(&SequenceConfig::default())
    }

    /// [`find_frames_on_disk`](Self::find_frames_on_disk) with explicit settings.
    pub fn find_frames_on_disk_with(&mut self, config: &SequenceConfig) -> Result<bool> {
        if self.token.is_none() {
            debug!("No frame token in {}, skipping discovery", self.path());
            return Ok(false);
        }
        let frames = discovery::scan_frames(self, config)?;
        self.frames = frames;
        Ok(!self.frames.is_empty())
    }

    /// Text before and after the token in the file name, `None` without a
    /// token. With the default layout that is `name + separator` and
    /// `suffix + ext`.
    pub(crate) fn token_affixes(&self) -> Option<(String, String)> {
        let slot = self.token.as_ref()?;
        let (before, after) = self.layout.around_frame();
        let mut prefix = String::new();
        self.push_parts(&mut prefix, before);
        prefix.push_str(&slot.separator);
        let mut tail = self.suffix.clone();
        self.push_parts(&mut tail, after);
        Some((prefix, tail))
    }

    // ------------------------------------------------------------------
    // Internals
    // ------------------------------------------------------------------

    fn require_token(&self) -> Result<()> {
        match self.token {
            Some(_) => Ok(()),
            None => Err(SequenceError::NoFrameToken(self.path())),
        }
    }

    fn token_slot_mut(&mut self) -> Result<&mut TokenSlot> {
        match self.token {
            Some(ref mut slot) => Ok(slot),
            None => Err(SequenceError::NoFrameToken(self.path())),
        }
    }

    fn render_at(&self, frame: u64) -> String {
        self.compose_path(Some(&self.padding_style.render(self.padding, Some(frame))))
    }

    /// File name with `token` at the frame position; `None` or empty drops it.
    fn compose_basename(&self, token: Option<&str>) -> String {
        let (before, after) = self.layout.around_frame();
        let mut out = String::with_capacity(self.name.len() + self.suffix.len() + self.ext.len() + 8);
        self.push_parts(&mut out, before);
        if let (Some(slot), Some(token)) = (&self.token, token) {
            if !token.is_empty() {
                out.push_str(&slot.separator);
                out.push_str(token);
            }
        }
        out.push_str(&self.suffix);
        self.push_parts(&mut out, after);
        out
    }

    fn push_parts(&self, out: &mut String, parts: &[LayoutPart]) {
        for part in parts {
            match part {
                LayoutPart::Name => out.push_str(&self.name),
                LayoutPart::Ext => out.push_str(&self.ext),
                LayoutPart::Literal(text) => out.push_str(text),
                LayoutPart::Frame => {}
            }
        }
    }

    fn compose_path(&self, token: Option<&str>) -> String {
        join_path(&self.dirname, self.dir_separator, &self.compose_basename(token))
    }
}

fn shift_frame(frame: u64, offset: i64) -> Result<u64> {
    frame
        .checked_add_signed(offset)
        .ok_or_else(|| SequenceError::InvalidFrame(format!("frame {} shifted by {} is out of range", frame, offset)))
}

/// A name must read back as the same name when `path()` is parsed again.
fn validate_name(name: &str, has_token: bool) -> Result<()> {
    if name.contains(is_separator) {
        return Err(SequenceError::InvalidPath(format!("name contains a path separator: {}", name)));
    }
    if has_symbolic_token(name) {
        return Err(SequenceError::InvalidPath(format!("name contains a frame token: {}", name)));
    }
    // Without a token of its own, any digit run in the name would become one
    if !has_token && locate(name)?.is_some() {
        return Err(SequenceError::InvalidPath(format!("name would parse as a frame token: {}", name)));
    }
    Ok(())
}

/// Empty, or `.` followed by one extension that `split_path` keeps as such.
fn validate_ext(ext: &str) -> Result<()> {
    if ext.is_empty() {
        return Ok(());
    }
    let valid = match ext.strip_prefix('.') {
        Some(rest) => {
            !rest.is_empty()
                && !rest.contains('.')
                && !rest.contains(is_separator)
                && !rest.contains(TOKEN_GLYPHS)
                && !rest.bytes().all(|b| b.is_ascii_digit())
        }
        None => false,
    };
    if !valid {
        return Err(SequenceError::InvalidPath(format!("not a file extension: {}", ext)));
    }
    Ok(())
}

/// Sequences are equal when they describe the same files, whatever the padding.
impl PartialEq for ImageSequence {
    fn eq(&self, other: &Self) -> bool {
        self.abstract_path_representation() == other.abstract_path_representation()
    }
}

impl Eq for ImageSequence {}

impl fmt::Display for ImageSequence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.path())
    }
}

/// Serialized form: canonical template path, style, frames and layout.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct SequenceRecord {
    /// Always in the default layout so it parses back.
    path: String,
    padding_style: PaddingStyle,
    #[serde(default)]
    frames: FrameSet,
    #[serde(default, skip_serializing_if = "BasenameLayout::is_default")]
    format: BasenameLayout,
}

impl From<ImageSequence> for SequenceRecord {
    fn from(mut seq: ImageSequence) -> Self {
        let format = std::mem::take(&mut seq.layout);
        // Custom tokens are not part of the record; store the padding template
        let path = match seq.token {
            Some(_) => seq.compose_path(Some(&seq.padding_style.render(seq.padding, None))),
            None => seq.path(),
        };
        Self {
            path,
            padding_style: seq.padding_style,
            frames: seq.frames,
            format,
        }
    }
}

impl TryFrom<SequenceRecord> for ImageSequence {
    type Error = SequenceError;

    fn try_from(record: SequenceRecord) -> Result<Self> {
        let mut seq = ImageSequence::with_padding_style(&record.path, record.padding_style)?;
        seq.set_frame_set(record.frames)?;
        seq.layout = record.format;
        Ok(seq)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn seq(path: &str) -> ImageSequence {
        ImageSequence::new(path).unwrap()
    }

    #[test]
    fn test_new_literal_digits() {
        let s = seq("/mock/path/file.1001.exr");
        assert_eq!(s.path(), "/mock/path/file.%04d.exr");
        assert_eq!(s.basename(), "file.%04d.exr");
        assert_eq!(s.dirname(), "/mock/path");
        assert_eq!(s.name(), "file");
        assert_eq!(s.ext(), ".exr");
        assert_eq!(s.padding(), 4);
        assert_eq!(s.padding_style(), PaddingStyle::Printf);
        assert_eq!(s.frames().to_vec(), vec![1001]);
    }

    #[test]
    fn test_roundtrip_symbolic_styles() {
        for path in [
            "/mock/path/file_name.%02d.exr",
            "/mock/path/file_name.###.exr",
            "/mock/path/file_name.@@@.exr",
            "/mock/path/file_name.<UDIM>.tx",
            "/mock/path/file_name.exr",
            "relative/shot_###_bake.exr",
            "/mock/####.exr",
        ] {
            assert_eq!(seq(path).path(), path);
        }
    }

    #[test]
    fn test_width_one_normalizes() {
        assert_eq!(seq("/p/file.1.exr").path(), seq("/p/file.%01d.exr").path());
    }

    #[test]
    fn test_padding_widths() {
        assert_eq!(seq("/mock/path/file_name.@@@.exr").padding(), 3);
        assert_eq!(seq("/mock/path/file_name.%02d.exr").padding(), 2);
        assert_eq!(seq("/mock/path/file_name.exr").padding(), 0);
    }

    #[test]
    fn test_set_padding() {
        let mut s = seq("/p/file.1001.exr");
        s.set_padding(3).unwrap();
        assert_eq!(s.path(), "/p/file.%03d.exr");
        assert_eq!(s.frames().to_vec(), vec![1001]);

        assert!(matches!(s.set_padding(0), Err(SequenceError::InvalidPadding(0))));
        assert_eq!(s.padding(), 3);
    }

    #[test]
    fn test_rightmost_digits_name() {
        let s = seq("/p/v2.file.0101.exr");
        assert_eq!(s.name(), "v2.file");
        assert_eq!(s.frames().to_vec(), vec![101]);
        assert_eq!(s.path(), "/p/v2.file.%04d.exr");
    }

    #[test]
    fn test_padding_style_override() {
        let s = ImageSequence::with_padding_style("/mock/file.4444.rat", PaddingStyle::Hash).unwrap();
        assert_eq!(s.path(), "/mock/file.####.rat");

        let s = ImageSequence::with_padding_style("/mock/path/file_name.#####.exr", PaddingStyle::Hash).unwrap();
        assert_eq!(s.padding(), 5);
        assert_eq!(s.eval_at_frame(1001).unwrap(), "/mock/path/file_name.01001.exr");

        // A UDIM token is never overridden
        let s = ImageSequence::with_padding_style("/mock/file.<UDIM>.tx", PaddingStyle::Hash).unwrap();
        assert_eq!(s.padding_style(), PaddingStyle::Udim);
    }

    #[test]
    fn test_udim() {
        let s = ImageSequence::with_padding_style("/p/file.1001.exr", PaddingStyle::Udim).unwrap();
        assert_eq!(s.path(), "/p/file.<UDIM>.exr");
        assert_eq!(s.padding(), 4);
        assert_eq!(s.eval_at_frame(1012).unwrap(), "/p/file.1012.exr");

        let mut s = seq("/p/file.%02d.exr");
        s.set_padding_style(PaddingStyle::Udim);
        assert_eq!(s.padding(), 4);
        assert_eq!(s.path(), "/p/file.<UDIM>.exr");
    }

    #[test]
    fn test_set_padding_style() {
        let mut s = seq("/mock/file.4444.rat");
        s.set_padding_style(PaddingStyle::Hash);
        assert_eq!(s.path(), "/mock/file.####.rat");

        s.set_padding_style_token("@").unwrap();
        assert_eq!(s.path(), "/mock/file.@@@@.rat");

        let err = s.set_padding_style_token("*").unwrap_err();
        assert!(matches!(err, SequenceError::UnsupportedPaddingStyle(_)));
        assert_eq!(s.padding_style(), PaddingStyle::At);
    }

    #[test]
    fn test_set_name_and_ext() {
        let mut s = seq("/mock/file_name.101.exr");
        s.set_name("new_file_name").unwrap();
        assert_eq!(s.name(), "new_file_name");
        assert_eq!(s.path(), "/mock/new_file_name.%03d.exr");

        s.set_ext(".jpg").unwrap();
        assert_eq!(s.path(), "/mock/new_file_name.%03d.jpg");
        s.set_ext("").unwrap();
        assert_eq!(s.path(), "/mock/new_file_name.%03d");

        assert!(matches!(s.set_ext("jpg"), Err(SequenceError::InvalidPath(_))));
        assert!(matches!(s.set_name("a/b"), Err(SequenceError::InvalidPath(_))));
        assert_eq!(s.name(), "new_file_name");
        assert_eq!(s.ext(), "");
    }

    #[test]
    fn test_mutation_isolation() {
        let mut s = seq("/p/file.###.exr");
        s.set_frames([3, 1, 2, 2]).unwrap();
        s.set_name("other").unwrap();
        s.set_ext(".png").unwrap();
        s.set_padding(5).unwrap();
        s.set_padding_style(PaddingStyle::At);
        assert_eq!(s.frames().to_vec(), vec![1, 2, 3]);

        let before = s.path();
        s.set_frames([9]).unwrap();
        assert_eq!(s.path(), before);
    }

    #[test]
    fn test_set_frames_validation() {
        let mut s = seq("/p/file.###.exr");
        s.set_frames([10, 20]).unwrap();
        assert!(matches!(s.set_frames([5, -1]), Err(SequenceError::InvalidFrame(_))));
        assert_eq!(s.frames().to_vec(), vec![10, 20]);
        assert_eq!((s.start(), s.end()), (Some(10), Some(20)));

        let mut still = seq("/p/logo.png");
        assert!(matches!(still.set_frames([1]), Err(SequenceError::NoFrameToken(_))));
        assert_eq!((still.start(), still.end()), (None, None));
    }

    #[test]
    fn test_eval_at_frame() {
        let s = seq("/mock/file_name.%04d.exr");
        assert_eq!(s.eval_at_frame(9999).unwrap(), "/mock/file_name.9999.exr");
        assert_eq!(s.eval_at_frame(123456).unwrap(), "/mock/file_name.123456.exr");
        assert!(matches!(s.eval_at_frame(-1), Err(SequenceError::InvalidFrame(_))));

        let still = seq("/mock/file_name.exr");
        assert!(matches!(still.eval_at_frame(9999), Err(SequenceError::NoFrameToken(_))));
    }

    #[test]
    fn test_format_with_padding_style() {
        let s = seq("/mock/file_name.101.exr");
        assert_eq!(s.format_with_padding_style(PaddingStyle::Hash, None).unwrap(), "/mock/file_name.###.exr");
        assert_eq!(s.format_with_padding_style(PaddingStyle::At, None).unwrap(), "/mock/file_name.@@@.exr");
        assert_eq!(s.format_with_padding_style(PaddingStyle::Hash, Some(1)).unwrap(), "/mock/file_name.#.exr");
        // Idempotent on own settings, never mutates
        assert_eq!(s.format_with_padding_style(s.padding_style(), None).unwrap(), s.path());
        assert_eq!(s.padding_style(), PaddingStyle::Printf);
        assert!(matches!(
            s.format_with_padding_style(PaddingStyle::Hash, Some(0)),
            Err(SequenceError::InvalidPadding(0))
        ));
    }

    #[test]
    fn test_optional_frame_token_format() {
        let s = seq("/mock/path/file.1001.exr");
        assert_eq!(s.optional_frame_token_format("$F"), "/mock/path/file.$F.exr");

        let still = seq("/mock/path/file.exr");
        assert_eq!(still.optional_frame_token_format("<UDIM>"), "/mock/path/file.exr");

        // Token but no frames: no substitution
        let empty = seq("/mock/path/file.####.exr");
        assert_eq!(empty.optional_frame_token_format("$F"), "/mock/path/file.####.exr");
    }

    #[test]
    fn test_get_paths() {
        let mut s = seq("file.###.exr");
        s.set_frames([40, 10, 30, 20]).unwrap();
        assert_eq!(
            s.get_paths(10).unwrap(),
            vec!["file.020.exr", "file.030.exr", "file.040.exr", "file.050.exr"]
        );
        // Restartable
        assert_eq!(s.get_paths(10).unwrap(), s.get_paths(10).unwrap());

        let mut s = seq("/mock/file_name.@@@.exr");
        s.set_frames([10, 20]).unwrap();
        assert_eq!(s.get_paths(0).unwrap(), vec!["/mock/file_name.010.exr", "/mock/file_name.020.exr"]);
        assert!(matches!(s.get_paths(-11), Err(SequenceError::InvalidFrame(_))));
        assert_eq!(s.get_paths(-10).unwrap()[0], "/mock/file_name.000.exr");
    }

    #[test]
    fn test_get_paths_edge_cases() {
        assert!(seq("/p/file.####.exr").get_paths(0).unwrap().is_empty());
        assert!(matches!(seq("/p/file.exr").get_paths(0), Err(SequenceError::NoFrameToken(_))));
    }

    #[test]
    fn test_custom_frame_token() {
        let mut s = seq("/mock/path/file.1001.exr");
        s.set_custom_frame_token("<UDIM>").unwrap();
        assert_eq!(s.path(), "/mock/path/file.<UDIM>.exr");
        // Concrete paths ignore the custom token
        assert_eq!(s.eval_at_frame(1002).unwrap(), "/mock/path/file.1002.exr");

        s.set_custom_frame_token("").unwrap();
        assert_eq!(s.path(), "/mock/path/file.exr");

        s.set_padding(4).unwrap();
        assert_eq!(s.path(), "/mock/path/file.%04d.exr");
    }

    #[test]
    fn test_clear_frame_token() {
        let mut s = seq("/mock/path/file_name.#####.exr");
        s.set_frames([1, 2]).unwrap();
        s.clear_frame_token();
        assert_eq!(s.path(), "/mock/path/file_name.exr");
        assert_eq!(s.padding(), 0);
        assert!(s.is_empty());
        assert!(!s.has_frame_token());
    }

    #[test]
    fn test_merge() {
        let mut a = seq("/mock/file_name.@@@.exr");
        a.set_frames([10, 20, 30]).unwrap();
        let mut b = seq("/mock/path/file_name.@@@@.exr");
        b.set_frames([30, 40, 50]).unwrap();

        a.merge(&b).unwrap();
        assert_eq!(a.frames().to_vec(), vec![10, 20, 30, 40, 50]);
        assert_eq!(a.padding(), 4);
    }

    #[test]
    fn test_equality() {
        assert_eq!(seq("/mock/path/file_name.101.exr"), seq("/mock/path/file_name.222.exr"));
        assert_ne!(seq("/mock/path/file_name.1101.exr"), seq("/mock/path/file_name.exr"));
        assert_ne!(seq("/mock/file_name.1001.exr"), seq("/mock/path/file_name.1001.exr"));
        assert_eq!(
            seq("/mock/file_name.101.exr").abstract_path_representation(),
            "/mock/file_name.$FRAME.exr"
        );
    }

    #[test]
    fn test_from_components() {
        let s = ImageSequence::from_components("/renders", "beauty", ".exr", PaddingStyle::Hash, 4).unwrap();
        assert_eq!(s.path(), "/renders/beauty.####.exr");
        assert!(s.is_empty());

        let s = ImageSequence::from_components("", "", ".png", PaddingStyle::Printf, 3).unwrap();
        assert_eq!(s.path(), "%03d.png");

        assert!(matches!(
            ImageSequence::from_components("/r", "b", ".exr", PaddingStyle::Hash, 0),
            Err(SequenceError::InvalidPadding(0))
        ));
        assert!(ImageSequence::from_components("/r", "b", "exr", PaddingStyle::Hash, 4).is_err());
    }

    #[test]
    fn test_config_default_style() {
        let config = SequenceConfig::default().with_padding_style(PaddingStyle::Hash);
        let s = ImageSequence::with_config("/p/file.1001.exr", &config).unwrap();
        assert_eq!(s.path(), "/p/file.####.exr");
        // Symbolic tokens in the path win over the configured default
        let s = ImageSequence::with_config("/p/file.@@.exr", &config).unwrap();
        assert_eq!(s.path(), "/p/file.@@.exr");
    }

    #[test]
    fn test_serde_record() {
        let mut s = seq("/mock/file.####.exr");
        s.set_frames([1001, 1002]).unwrap();
        s.set_custom_frame_token("$F").unwrap();

        let json = serde_json::to_string(&s).unwrap();
        assert_eq!(json, r#"{"path":"/mock/file.####.exr","padding_style":"hash","frames":[1001,1002]}"#);

        let back: ImageSequence = serde_json::from_str(&json).unwrap();
        assert_eq!(back.path(), "/mock/file.####.exr");
        assert_eq!(back.frames().to_vec(), vec![1001, 1002]);
    }

    #[test]
    fn test_set_name_rejects_frame_tokens() {
        let mut s = seq("/p/file.1001.exr");
        s.set_frames([1001, 1002]).unwrap();
        for bad in ["take#2", "me@home", "tex_<UDIM>", "shot_%03d"] {
            assert!(matches!(s.set_name(bad), Err(SequenceError::InvalidPath(_))), "{}", bad);
        }
        for bad in [".1001", ".", ".#", ".tar.gz", "exr"] {
            assert!(matches!(s.set_ext(bad), Err(SequenceError::InvalidPath(_))), "{}", bad);
        }
        assert_eq!((s.name(), s.ext()), ("file", ".exr"));

        // Digits are fine next to a token, and survive a round trip
        s.set_name("take_2").unwrap();
        let json = serde_json::to_string(&s).unwrap();
        let back: ImageSequence = serde_json::from_str(&json).unwrap();
        assert_eq!(back.name(), "take_2");
        assert_eq!(back.get_paths(0).unwrap(), s.get_paths(0).unwrap());
        assert_eq!(back.get_paths(0).unwrap()[1], "/p/take_2.1002.exr");

        // Without a token, digits in the name would become one
        let mut still = seq("/p/logo.png");
        assert!(matches!(still.set_name("logo2"), Err(SequenceError::InvalidPath(_))));
        assert_eq!(still.name(), "logo");

        assert!(matches!(
            ImageSequence::from_components("/r", "b#", ".exr", PaddingStyle::Hash, 4),
            Err(SequenceError::InvalidPath(_))
        ));
    }

    #[test]
    fn test_format_with_custom_token() {
        let mut s = seq("/p/file.####.exr");
        s.set_custom_frame_token("$F").unwrap();
        assert_eq!(s.format_with_padding_style(s.padding_style(), None).unwrap(), s.path());
        assert_eq!(s.format_with_padding_style(PaddingStyle::Hash, Some(4)).unwrap(), "/p/file.$F.exr");
        assert_eq!(s.format_with_padding_style(PaddingStyle::Hash, Some(3)).unwrap(), "/p/file.###.exr");
        assert_eq!(s.format_with_padding_style(PaddingStyle::Printf, None).unwrap(), "/p/file.%04d.exr");
    }

    #[test]
    fn test_udim_padding_is_fixed() {
        let mut s = seq("/p/file.<UDIM>.tx");
        assert!(matches!(s.set_padding(2), Err(SequenceError::InvalidPadding(2))));
        assert_eq!(s.padding(), 4);
        s.set_padding(4).unwrap();

        s.set_padding_style(PaddingStyle::Hash);
        assert_eq!(s.path(), "/p/file.####.tx");
    }

    #[test]
    fn test_set_format() {
        let mut s = seq("/mock/path/file_name.1001.exr");
        s.set_format("{name}{ext}{frame}").unwrap();
        assert_eq!(s.basename(), "file_name.exr.%04d");
        assert_eq!(s.path(), "/mock/path/file_name.exr.%04d");
        assert_eq!(s.eval_at_frame(1002).unwrap(), "/mock/path/file_name.exr.1002");
        assert_eq!(
            s.token_affixes(),
            Some(("file_name.exr.".to_string(), String::new()))
        );

        assert!(matches!(s.set_format("{name}{ext}"), Err(SequenceError::InvalidFormat(_))));
        assert_eq!(s.layout().to_string(), "{name}{ext}{frame}");

        s.set_format("{name}_v1{frame}{ext}").unwrap();
        assert_eq!(s.path(), "/mock/path/file_name_v1.%04d.exr");
    }

    #[test]
    fn test_serde_keeps_layout() {
        let mut s = seq("/mock/path/file_name.1001.exr");
        s.set_format("{name}{ext}{frame}").unwrap();

        let json = serde_json::to_string(&s).unwrap();
        assert_eq!(
            json,
            r#"{"path":"/mock/path/file_name.%04d.exr","padding_style":"printf","frames":[1001],"format":"{name}{ext}{frame}"}"#
        );
        let back: ImageSequence = serde_json::from_str(&json).unwrap();
        assert_eq!(back.path(), "/mock/path/file_name.exr.%04d");
        assert_eq!(back.frames().to_vec(), vec![1001]);

        let bad = r#"{"path":"/p/file.%04d.exr","padding_style":"printf","format":"{frame}"}"#;
        assert!(serde_json::from_str::<ImageSequence>(bad).is_err());
    }

    #[test]
    fn test_display() {
        assert_eq!(seq("/mock/file.0001.exr").to_string(), "/mock/file.%04d.exr");
    }
}
