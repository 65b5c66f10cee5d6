//! Ordered, de-duplicated frame numbers

use std::collections::BTreeSet;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{Result, SequenceError};

/// Set of non-negative frame numbers, iterated in ascending order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FrameSet {
    frames: BTreeSet<u64>,
}

impl FrameSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build from signed input, rejecting negative frames.
    ///
    /// Duplicates collapse and order does not matter.
    pub fn from_frames<I>(frames: I) -> Result<Self>
    where
        I: IntoIterator<Item = i64>,
    {
        frames
            .into_iter()
            .map(to_frame)
            .collect::<Result<BTreeSet<u64>>>()
            .map(|frames| Self { frames })
    }

    pub fn insert(&mut self, frame: u64) -> bool {
        self.frames.insert(frame)
    }

    pub fn contains(&self, frame: u64) -> bool {
        self.frames.contains(&frame)
    }

    /// First frame, `None` when empty.
    pub fn start(&self) -> Option<u64> {
        self.frames.first().copied()
    }

    /// Last frame, `None` when empty.
    pub fn end(&self) -> Option<u64> {
        self.frames.last().copied()
    }

    pub fn len(&self) -> usize {
        self.frames.len()
    }

    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }

    pub fn clear(&mut self) {
        self.frames.clear();
    }

    /// Frames in ascending order.
    pub fn iter(&self) -> impl Iterator<Item = u64> + '_ {
        self.frames.iter().copied()
    }

    pub fn to_vec(&self) -> Vec<u64> {
        self.iter().collect()
    }

    /// Add every frame of `other`.
    pub fn union_with(&mut self, other: &FrameSet) {
        self.frames.extend(other.iter());
    }

    /// Contiguous runs as inclusive `(first, last)` pairs.
    ///
    /// `{1, 2, 3, 7, 9, 10}` -> `[(1, 3), (7, 7), (9, 10)]`
    pub fn ranges(&self) -> Vec<(u64, u64)> {
        let mut out: Vec<(u64, u64)> = Vec::new();
        for frame in self.iter() {
            match out.last_mut() {
                Some((_, last)) if *last + 1 == frame => *last = frame,
                _ => out.push((frame, frame)),
            }
        }
        out
    }
}

/// Validate a caller-supplied frame number.
pub(crate) fn to_frame(value: i64) -> Result<u64> {
    u64::try_from(value).map_err(|_| SequenceError::InvalidFrame(format!("negative frame {}", value)))
}

impl FromIterator<u64> for FrameSet {
    fn from_iter<I: IntoIterator<Item = u64>>(iter: I) -> Self {
        Self {
            frames: iter.into_iter().collect(),
        }
    }
}

impl Extend<u64> for FrameSet {
    fn extend<I: IntoIterator<Item = u64>>(&mut self, iter: I) {
        self.frames.extend(iter);
    }
}

impl<'a> IntoIterator for &'a FrameSet {
    type Item = u64;
    type IntoIter = std::iter::Copied<std::collections::btree_set::Iter<'a, u64>>;

    fn into_iter(self) -> Self::IntoIter {
        self.frames.iter().copied()
    }
}

/// Compact range notation: `1001-1003,1005`.
impl fmt::Display for FrameSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, (first, last)) in self.ranges().into_iter().enumerate() {
            if i > 0 {
                f.write_str(",")?;
            }
            if first == last {
                write!(f, "{}", first)?;
            } else {
                write!(f, "{}-{}", first, last)?;
            }
        }
        Ok(())
    }
}
