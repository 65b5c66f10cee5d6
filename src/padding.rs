//! Padding styles: how a frame token is written in a path
//!
//! | Style     | Template   | At frame 7, width 4 |
//! |-----------|------------|---------------------|
//! | `Printf`  | `%04d`     | `0007`              |
//! | `Hash`    | `####`     | `0007`              |
//! | `At`      | `@@@@`     | `0007`              |
//! | `Udim`    | `<UDIM>`   | `0007`              |
//! | `Literal` | `%04d`     | `0007`              |
//!
//! Numbers wider than the padding are never truncated (printf semantics).
//! UDIM width is always 4.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{Result, SequenceError};

/// Token text for printf-style padding selection.
pub const PRINTF_TOKEN: &str = "%";
/// Token text for hash padding (`####`).
pub const HASH_TOKEN: &str = "#";
/// Token text for at-sign padding (`@@@@`).
pub const AT_TOKEN: &str = "@";
/// Literal UDIM token.
pub const UDIM_TOKEN: &str = "<UDIM>";

/// Fixed width of a UDIM tile number.
pub const UDIM_WIDTH: u32 = 4;
/// First UDIM tile (u=0, v=0).
pub const UDIM_START: u64 = 1001;

/// Notation used for the frame token.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PaddingStyle {
    /// `%0Nd`
    #[default]
    Printf,
    /// `N` x `#`
    Hash,
    /// `N` x `@`
    At,
    /// `<UDIM>`
    Udim,
    /// Bare digits, e.g. `1001`. Has no glyph of its own; templates as `%0Nd`.
    Literal,
}

impl PaddingStyle {
    /// Style for a symbolic token (`%`, `#`, `@`, `<UDIM>`) or style name.
    pub fn from_token(token: &str) -> Result<Self> {
        match token {
            PRINTF_TOKEN | "printf" => Ok(PaddingStyle::Printf),
            HASH_TOKEN | "hash" => Ok(PaddingStyle::Hash),
            AT_TOKEN | "at" => Ok(PaddingStyle::At),
            UDIM_TOKEN | "udim" => Ok(PaddingStyle::Udim),
            "literal" => Ok(PaddingStyle::Literal),
            other => Err(SequenceError::UnsupportedPaddingStyle(other.to_string())),
        }
    }

    /// Symbolic token of this style, `None` for `Literal`.
    pub fn token(self) -> Option<&'static str> {
        match self {
            PaddingStyle::Printf => Some(PRINTF_TOKEN),
            PaddingStyle::Hash => Some(HASH_TOKEN),
            PaddingStyle::At => Some(AT_TOKEN),
            PaddingStyle::Udim => Some(UDIM_TOKEN),
            PaddingStyle::Literal => None,
        }
    }

    /// Width actually used for rendering. UDIM ignores the requested width.
    pub fn effective_width(self, width: u32) -> u32 {
        match self {
            PaddingStyle::Udim => UDIM_WIDTH,
            _ => width,
        }
    }

    /// Render the token, either as a template (`frame == None`) or at a concrete frame.
    pub fn render(self, width: u32, frame: Option<u64>) -> String {
        let width = self.effective_width(width) as usize;
        match (self, frame) {
            (_, Some(frame)) => format!("{:0width$}", frame, width = width),
            (PaddingStyle::Printf | PaddingStyle::Literal, None) => format!("%0{}d", width),
            (PaddingStyle::Hash, None) => "#".repeat(width),
            (PaddingStyle::At, None) => "@".repeat(width),
            (PaddingStyle::Udim, None) => UDIM_TOKEN.to_string(),
        }
    }

    /// Digit-count rule used to accept candidate file names during discovery.
    pub fn digit_rule(self, width: u32) -> DigitRule {
        let width = self.effective_width(width).max(1) as usize;
        match self {
            PaddingStyle::Printf | PaddingStyle::Literal => DigitRule::AtLeast(width),
            PaddingStyle::Hash | PaddingStyle::At | PaddingStyle::Udim => DigitRule::Exactly(width),
        }
    }
}

impl fmt::Display for PaddingStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            PaddingStyle::Printf => "printf",
            PaddingStyle::Hash => "hash",
            PaddingStyle::At => "at",
            PaddingStyle::Udim => "udim",
            PaddingStyle::Literal => "literal",
        };
        f.write_str(name)
    }
}

impl FromStr for PaddingStyle {
    type Err = SequenceError;

    fn from_str(s: &str) -> Result<Self> {
        Self::from_token(s)
    }
}

/// How many digits a discovered frame token may have.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DigitRule {
    Exactly(usize),
    AtLeast(usize),
}

impl DigitRule {
    /// True when `text` is all ASCII digits and its length satisfies the rule.
    pub fn accepts(self, text: &str) -> bool {
        if text.is_empty() || !text.bytes().all(|b| b.is_ascii_digit()) {
            return false;
        }
        match self {
            DigitRule::Exactly(n) => text.len() == n,
            DigitRule::AtLeast(n) => text.len() >= n,
        }
    }
}

/// UDIM tile number for 0-based tile coordinates (`u` in 0..10).
pub fn udim_tile(u: u32, v: u32) -> Result<u64> {
    if u >= 10 {
        return Err(SequenceError::InvalidFrame(format!("UDIM u coordinate {} out of range 0..10", u)));
    }
    Ok(UDIM_START + u64::from(u) + 10 * u64::from(v))
}

/// Tile coordinates `(u, v)` of a UDIM tile number.
pub fn udim_coords(tile: u64) -> Result<(u32, u32)> {
    if tile < UDIM_START {
        return Err(SequenceError::InvalidFrame(format!("UDIM tile {} is below {}", tile, UDIM_START)));
    }
    let index = tile - UDIM_START;
    let v = u32::try_from(index / 10)
        .map_err(|_| SequenceError::InvalidFrame(format!("UDIM tile {} is out of range", tile)))?;
    Ok(((index % 10) as u32, v))
}
