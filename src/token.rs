//! Frame token discovery inside a file stem
//!
//! A stem holds at most one frame token. When several candidates are present
//! the first matching rule wins:
//!
//! 1. `<UDIM>` anywhere
//! 2. a run of `#`
//! 3. a run of `@`
//! 4. a `%0Nd` directive
//! 5. a run of ASCII digits
//!
//! Within a rule the rightmost candidate is the token. For digits this keeps
//! `v2` in `v2.comp.0101` as part of the name and picks `0101` as the frame.

use std::ops::Range;

use log::debug;
use once_cell::sync::Lazy;
use regex::Regex;

use crate::error::{Result, SequenceError};
use crate::padding::{PaddingStyle, UDIM_TOKEN, UDIM_WIDTH};

static HASH_RUN: Lazy<Regex> = Lazy::new(|| Regex::new(r"#+").expect("valid hash regex"));
static AT_RUN: Lazy<Regex> = Lazy::new(|| Regex::new(r"@+").expect("valid at regex"));
static PRINTF: Lazy<Regex> = Lazy::new(|| Regex::new(r"%0([1-9][0-9]*)d").expect("valid printf regex"));
static PRINTF_EXACT: Lazy<Regex> = Lazy::new(|| Regex::new(r"^%0[1-9][0-9]*d$").expect("valid printf regex"));
static DIGIT_RUN: Lazy<Regex> = Lazy::new(|| Regex::new(r"[0-9]+").expect("valid digit regex"));

/// Characters stripped from the name when they sit right before the token.
pub const TOKEN_SEPARATORS: &[char] = &['.', '_', '-'];

/// Located frame token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FrameToken {
    pub style: PaddingStyle,
    pub width: u32,
    /// Byte range of the token inside the stem.
    pub span: Range<usize>,
    /// Frame value when the token is a bare digit run.
    pub frame: Option<u64>,
}

/// Stem cut around a token: `name` + `separator` + token + `suffix`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StemParts<'a> {
    pub name: &'a str,
    pub separator: &'a str,
    pub suffix: &'a str,
}

impl FrameToken {
    /// Cut `stem` around this token, peeling one separator off the name.
    pub fn split_stem<'a>(&self, stem: &'a str) -> StemParts<'a> {
        let head = &stem[..self.span.start];
        let suffix = &stem[self.span.end..];
        match head.chars().last() {
            Some(c) if TOKEN_SEPARATORS.contains(&c) => {
                let cut = head.len() - c.len_utf8();
                StemParts {
                    name: &head[..cut],
                    separator: &head[cut..],
                    suffix,
                }
            }
            _ => StemParts {
                name: head,
                separator: "",
                suffix,
            },
        }
    }
}

/// Find the frame token in `stem`, if any.
///
/// Fails only when a token is present but its width or value does not fit
/// the numeric types (absurdly long digit runs).
pub fn locate(stem: &str) -> Result<Option<FrameToken>> {
    if let Some(start) = stem.rfind(UDIM_TOKEN) {
        return Ok(Some(FrameToken {
            style: PaddingStyle::Udim,
            width: UDIM_WIDTH,
            span: start..start + UDIM_TOKEN.len(),
            frame: None,
        }));
    }

    for (re, style) in [(&*HASH_RUN, PaddingStyle::Hash), (&*AT_RUN, PaddingStyle::At)] {
        if let Some(m) = re.find_iter(stem).last() {
            return Ok(Some(FrameToken {
                style,
                width: run_width(m.as_str())?,
                span: m.range(),
                frame: None,
            }));
        }
    }

    if let Some(caps) = PRINTF.captures_iter(stem).last() {
        let (whole, digits) = match (caps.get(0), caps.get(1)) {
            (Some(whole), Some(digits)) => (whole, digits),
            _ => return Ok(None),
        };
        let width = digits
            .as_str()
            .parse::<u32>()
            .map_err(|e| SequenceError::InvalidPath(format!("printf width in {}: {}", stem, e)))?;
        return Ok(Some(FrameToken {
            style: PaddingStyle::Printf,
            width,
            span: whole.range(),
            frame: None,
        }));
    }

    if let Some(m) = DIGIT_RUN.find_iter(stem).last() {
        let frame = m
            .as_str()
            .parse::<u64>()
            .map_err(|e| SequenceError::InvalidFrame(format!("{} in {}: {}", m.as_str(), stem, e)))?;
        return Ok(Some(FrameToken {
            style: PaddingStyle::Literal,
            width: run_width(m.as_str())?,
            span: m.range(),
            frame: Some(frame),
        }));
    }

    debug!("No frame token in {}", stem);
    Ok(None)
}

/// True when `text` is nothing but a symbolic frame token.
pub(crate) fn is_bare_token(text: &str) -> bool {
    text == UDIM_TOKEN
        || (!text.is_empty() && (text.bytes().all(|b| b == b'#') || text.bytes().all(|b| b == b'@')))
        || PRINTF_EXACT.is_match(text)
}

/// True when `text` contains something the locator would take for a
/// symbolic frame token (`#`, `@`, `<UDIM>`, `%0Nd`).
pub(crate) fn has_symbolic_token(text: &str) -> bool {
    text.contains(['#', '@']) || text.contains(UDIM_TOKEN) || PRINTF.is_match(text)
}

fn run_width(run: &str) -> Result<u32> {
    u32::try_from(run.len()).map_err(|_| SequenceError::InvalidPath(format!("token too wide: {} chars", run.len())))
}
