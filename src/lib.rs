//! image-sequence - numbered file sequences as values
//!
//! Parses any spelling of a frame sequence path (`comp.1001.exr`,
//! `comp.%04d.exr`, `comp.####.exr`, `comp.@@@@.exr`, `tex.<UDIM>.tx`) into an
//! [`ImageSequence`], renders it back as a template or at concrete frames, and
//! finds which frames exist on disk.
//!
//! ```rust
//! use image_sequence::{ImageSequence, PaddingStyle};
//!
//! let mut seq = ImageSequence::new("/renders/beauty.1001.exr")?;
//! seq.set_frames([1001, 1002, 1003])?;
//! seq.set_padding_style(PaddingStyle::Hash);
//!
//! assert_eq!(seq.path(), "/renders/beauty.####.exr");
//! assert_eq!(seq.get_paths(0)?[2], "/renders/beauty.1003.exr");
//! # Ok::<(), image_sequence::SequenceError>(())
//! ```

pub mod config;
pub mod discovery;
pub mod error;
pub mod frames;
pub mod layout;
pub mod padding;
pub mod sequence;
pub mod split;
pub mod token;

pub use config::SequenceConfig;
pub use discovery::{find_sequence_on_disk, find_sequence_on_disk_with};
pub use error::{Result, SequenceError};
pub use frames::FrameSet;
pub use layout::BasenameLayout;
pub use padding::{AT_TOKEN, HASH_TOKEN, PRINTF_TOKEN, PaddingStyle, UDIM_TOKEN};
pub use sequence::ImageSequence;
pub use token::FrameToken;
