//! Pull-based PCM sources.
//!
//! An [`AudioSource`] hands out interleaved `f32` frames on demand
//! and returns `Ok(0)` once it has nothing left.
//!
//! - [`MemorySource`] plays back a buffer
//! - [`Crop`] limits any source to an [`Interval`](crate::align::Interval)
//! - [`DecodedSource`] decodes a file (or bytes) with `symphonia`

mod source;
pub use source::{AudioSource,duration_to_frames};

mod memory;
pub use memory::MemorySource;

mod crop;
pub use crop::Crop;

mod decode;
pub use decode::DecodedSource;
