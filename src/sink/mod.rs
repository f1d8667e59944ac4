//! Where rendered audio goes.
//!
//! An [`AudioSink`] accepts interleaved frame spans in write order.
//! Closing it ([`AudioSink::finalize`]) is up to the caller.

mod sink;
pub use sink::AudioSink;

mod memory;
pub use memory::MemorySink;

mod wav;
pub use wav::WavSink;
