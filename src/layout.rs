//! Order of name, frame token and extension in a file name
//!
//! A layout is a pattern with the placeholders `{name}`, `{frame}` and
//! `{ext}`, each exactly once, plus optional literal text:
//!
//! | Pattern               | Renders as             |
//! |-----------------------|------------------------|
//! | `{name}{frame}{ext}`  | `file_name.%04d.exr`   |
//! | `{name}{ext}{frame}`  | `file_name.exr.%04d`   |
//! | `{name}_v1{frame}{ext}` | `file_name_v1.%04d.exr` |
//!
//! `{frame}` covers the separator before the token and the suffix after it.

use std::fmt;
use std::path::is_separator;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{Result, SequenceError};
use crate::split::TOKEN_GLYPHS;

pub const DEFAULT_LAYOUT: &str = "{name}{frame}{ext}";

/// One piece of a layout pattern.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LayoutPart {
    Name,
    Frame,
    Ext,
    Literal(String),
}

/// Validated basename pattern.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(into = "String", try_from = "String")]
pub struct BasenameLayout {
    parts: Vec<LayoutPart>,
}

impl BasenameLayout {
    /// Parse a pattern such as `{name}{ext}{frame}`.
    pub fn parse(pattern: &str) -> Result<Self> {
        let invalid = |why: &str| SequenceError::InvalidFormat(format!("{}: {}", pattern, why));

        let mut parts = Vec::new();
        let mut literal = String::new();
        let mut rest = pattern;
        while let Some(c) = rest.chars().next() {
            if c == '{' {
                let close = rest.find('}').ok_or_else(|| invalid("unclosed '{'"))?;
                let part = match &rest[1..close] {
                    "name" => LayoutPart::Name,
                    "frame" => LayoutPart::Frame,
                    "ext" => LayoutPart::Ext,
                    other => return Err(invalid(&format!("unknown placeholder {{{}}}", other))),
                };
                if !literal.is_empty() {
                    parts.push(LayoutPart::Literal(std::mem::take(&mut literal)));
                }
                parts.push(part);
                rest = &rest[close + 1..];
                continue;
            }
            if c == '}' || is_separator(c) || TOKEN_GLYPHS.contains(&c) {
                return Err(invalid(&format!("character {:?} not allowed in literal text", c)));
            }
            literal.push(c);
            rest = &rest[c.len_utf8()..];
        }
        if !literal.is_empty() {
            parts.push(LayoutPart::Literal(literal));
        }

        for (placeholder, wanted) in [("{name}", LayoutPart::Name), ("{frame}", LayoutPart::Frame), ("{ext}", LayoutPart::Ext)] {
            let count = parts.iter().filter(|p| **p == wanted).count();
            if count != 1 {
                return Err(invalid(&format!("{} must appear exactly once", placeholder)));
            }
        }

        Ok(Self { parts })
    }

    pub fn parts(&self) -> &[LayoutPart] {
        &self.parts
    }

    pub fn is_default(&self) -> bool {
        *self == Self::default()
    }

    /// Parts before and after `{frame}`.
    pub(crate) fn around_frame(&self) -> (&[LayoutPart], &[LayoutPart]) {
        match self.parts.iter().position(|p| *p == LayoutPart::Frame) {
            Some(idx) => (&self.parts[..idx], &self.parts[idx + 1..]),
            None => (&self.parts[..], &[]),
        }
    }
}

impl Default for BasenameLayout {
    fn default() -> Self {
        Self {
            parts: vec![LayoutPart::Name, LayoutPart::Frame, LayoutPart::Ext],
        }
    }
}

impl fmt::Display for BasenameLayout {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for part in &self.parts {
            match part {
                LayoutPart::Name => f.write_str("{name}")?,
                LayoutPart::Frame => f.write_str("{frame}")?,
                LayoutPart::Ext => f.write_str("{ext}")?,
                LayoutPart::Literal(text) => f.write_str(text)?,
            }
        }
        Ok(())
    }
}

impl FromStr for BasenameLayout {
    type Err = SequenceError;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

impl From<BasenameLayout> for String {
    fn from(layout: BasenameLayout) -> Self {
        layout.to_string()
    }
}

impl TryFrom<String> for BasenameLayout {
    type Error = SequenceError;

    fn try_from(pattern: String) -> Result<Self> {
        Self::parse(&pattern)
    }
}
