//! Photo annotation engine.
//!
//! Technicians mark hazards on a photo with four tools: ellipse ("circle"), rectangle
//! ("square"), freehand path ("draw") and translucent highlight block. This module holds
//! the parts of the engine that have no rendering or storage concerns.
//!
//! ## Module Structure
//!
//! - [`geometry`] - Display-space to canonical-space mapping, pointer normalization
//! - [`marks`] - The [`AnnotationMark`] sum type, palette and tools
//! - [`gesture`] - Press/drag/release state machine building one mark per gesture
//! - [`session`] - [`AnnotationSession`], the per-photo editing context
//!
//! Rendering lives in [`crate::render`]; persistence of committed sessions lives in
//! [`crate::store`].

pub mod geometry;
pub mod gesture;
pub mod marks;
pub mod session;

pub use geometry::{fit_into, PointerSample, SurfaceLayout};
pub use marks::{AnnotationMark, HexColor, MarkTool, Swatch, PALETTE};
pub use session::{AnnotationSession, PhotoKey, SessionCommit};
