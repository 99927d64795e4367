//! # aces-clip
//!
//! Reader and writer for ACESclip XML metadata.
//!
//! An ACESclip file travels next to a piece of footage and records how it
//! is meant to be viewed: which input transform (IDT) brings it into ACES,
//! which looks (LMTs) are layered on top, which rendering and output
//! transforms (RRT/ODT, or a combined RRTODT) display it, and an optional
//! ASC CDL grade applied in a working space.
//!
//! # Reading
//!
//! ```rust,no_run
//! use aces_clip::read_clip;
//! use std::path::Path;
//!
//! let clip = read_clip(Path::new("ACESclip.xml")).unwrap();
//! println!("{} (IDT {})", clip.clip_name, clip.idt.name);
//! ```
//!
//! # Writing
//!
//! See [`ClipWriter`].
//!
//! # Modules
//!
//! - [`reader`] - Section-by-section decoder
//! - [`writer`] - Builder-style encoder
//! - [`xml`] - Element tree over quick-xml
//! - [`text`] - Locale-free float and date helpers
//!
//! # Dependencies
//!
//! - [`quick-xml`] - XML tokenizing and serialization
//! - [`thiserror`] - Error handling
//! - [`chrono`] - Clip timestamps
//! - [`tracing`] - Diagnostics
//!
//! # Used By
//!
//! - `aces-clip-cli` - `acesclip` inspector

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

mod cdl;
mod descriptor;
mod error;
pub mod reader;
pub mod text;
mod transform;
pub mod writer;
pub mod xml;

pub use cdl::{AscCdl, BitDepth};
pub use descriptor::{ClipDescriptor, PreviewOutput};
pub use error::{ClipError, ClipResult};
pub use reader::{SUPPORTED_VERSION, decode, decode_into, parse_clip, read_clip};
pub use transform::{TransformRef, TransformStatus};
pub use writer::{ClipWriter, GradeRef};
pub use xml::XmlElement;
