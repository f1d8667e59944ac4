//! General errors that can occur.
//!
//! Running out of audio and finding no alignment are _not_ errors,
//! they show up as `Ok(0)` reads and empty [`Match`](crate::align::Match) lists.

mod source;
pub use source::SourceError;

mod sink;
pub use sink::SinkError;

mod stretch;
pub use stretch::StretchError;

mod render;
pub use render::RenderError;
