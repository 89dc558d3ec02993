//! Photo files: decoding for annotation and compression on capture.
//!
//! - [`source`] - [`SourcePhoto`], a decoded photo at native resolution
//! - [`compress`] - Downscale and JPEG re-encode before a photo enters the audit

pub mod compress;
pub mod source;

pub use compress::{compress_photo, encode_jpeg};
pub use source::SourcePhoto;
