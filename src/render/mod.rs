//! Variable-rate rendering.
//!
//! [`Varispeed`] wraps an [`AudioSource`](crate::source::AudioSource) and an
//! [`Elastic`](crate::stretch::Elastic) engine and hands out audio at a
//! playback rate that may change between any two reads.
//!
//! [`Driver`] walks a list of [`Match`](crate::align::Match)'s as
//! [`Segment`]'s, sets the rate each one needs and writes the result
//! to an [`AudioSink`](crate::sink::AudioSink).

mod state;
pub use state::State;

mod varispeed;
pub use varispeed::Varispeed;

mod segment;
pub use segment::Segment;

mod driver;
pub use driver::{Driver,Progress,Report};
