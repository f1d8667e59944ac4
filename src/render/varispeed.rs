//! The variable-rate streaming renderer.

//---------------------------------------------------------------------------------------------------- Use
use crate::{
	config::{
		Profile,
		StretchMode,
		SOURCE_CHUNK_DURATION,
		MIN_SUPPORTED_RATE,
		MAX_SUPPORTED_RATE,
		OUTPUT_BUFFER_FACTOR,
	},
	error::RenderError,
	macros::{debug2,info2,trace2,warn2},
	render::State,
	source::{AudioSource,duration_to_frames},
	stretch::{Elastic,Stretcher},
};

//---------------------------------------------------------------------------------------------------- Varispeed
/// Pull-based audio at a settable playback rate.
///
/// [`Varispeed::read`] fills the caller's buffer by pulling fixed
/// size chunks ([`SOURCE_CHUNK_DURATION`]) from the source into the
/// elastic engine and handing out what the engine produces.
///
/// The rate may change between any two reads:
/// - `0.0` is silence, the source and engine are left alone
/// - anything else is applied to the engine as a tempo or a speed,
///   depending on the [`Profile`]
///
/// Once the source has ended and the engine is empty, every
/// read returns `0` frames, that is the end of the stream.
///
/// ```rust
/// # use realign::{render::*, source::*, config::Profile};
/// let source = MemorySource::new(vec![0.5; 8_000], 8_000, 1).unwrap();
/// let mut v  = Varispeed::new(source, Profile::DEFAULT).unwrap();
///
/// let mut out = vec![0.0; 1_000];
/// v.set_rate(0.0);
/// assert_eq!(v.read(&mut out).unwrap(), 1_000);
/// assert!(out.iter().all(|s| *s == 0.0));
/// assert_eq!(v.state(), State::Idle);
/// ```
#[derive(Debug)]
pub struct Varispeed<S, E = Stretcher> {
	source:  S,
	engine:  E,
	profile: Profile,
	state:   State,

	rate:        f64,
	reposition:  bool, // clear the engine on the next non-silent read
	source_done: bool,

	channels:      usize,
	sample_rate:   u32,
	chunk_frames:  usize,
	output_frames: usize,
	chunk:         Vec<f32>, // source -> engine
	output:        Vec<f32>, // engine -> caller
}

impl<S: AudioSource> Varispeed<S, Stretcher> {
	/// Wrap `source` with a [`Stretcher`] configured by `profile`.
	///
	/// # Errors
	/// The source reports `0` channels or a `0` sample rate.
	pub fn new(source: S, profile: Profile) -> Result<Self, RenderError> {
		let engine = Stretcher::new(source.sample_rate(), source.channels())?;
		Self::with_elastic(source, engine, profile)
	}
}

impl<S: AudioSource, E: Elastic> Varispeed<S, E> {
	/// Wrap `source` with any [`Elastic`] engine.
	///
	/// The engine is set to the source's format and cleared.
	///
	/// # Errors
	/// The engine rejected the source's format.
	pub fn with_elastic(source: S, mut engine: E, profile: Profile) -> Result<Self, RenderError> {
		let channels    = source.channels();
		let sample_rate = source.sample_rate();

		engine.set_channels(channels)?;
		engine.set_sample_rate(sample_rate)?;
		engine.set_rate(1.0);
		engine.set_tempo(1.0);
		engine.set_use_antialiasing(profile.anti_alias);
		engine.set_use_quickseek(profile.quick_seek);
		engine.clear();

		let chunk_frames  = duration_to_frames(SOURCE_CHUNK_DURATION, sample_rate).max(1);
		let output_frames = chunk_frames * OUTPUT_BUFFER_FACTOR;

		debug2!("Varispeed - {sample_rate}hz, {channels} channels, chunk: {chunk_frames} frames, output: {output_frames} frames");

		Ok(Self {
			source,
			engine,
			profile,
			state: State::Streaming,
			rate: 1.0,
			reposition: false,
			source_done: false,
			channels,
			sample_rate,
			chunk_frames,
			output_frames,
			chunk: vec![0.0; chunk_frames * channels],
			output: vec![0.0; output_frames * channels],
		})
	}

	//------------------------------------------------------------------ Reads
	/// Fill `out` with up to `out.len() / channels` frames.
	///
	/// Returns how many frames were written. Less than requested
	/// means the stream is ending, `0` means it has ended.
	///
	/// At rate `0.0` all of `out` is filled with silence.
	///
	/// # Errors
	/// `out` is not a whole number of frames, or the source/engine failed.
	pub fn read(&mut self, out: &mut [f32]) -> Result<usize, RenderError> {
		if out.len() % self.channels != 0 {
			return Err(RenderError::Misaligned { len: out.len(), channels: self.channels });
		}
		let frames = out.len() / self.channels;

		if self.rate == 0.0 {
			out.fill(0.0);
			self.set_state(State::Idle);
			return Ok(frames);
		}

		if self.state == State::Idle {
			self.set_state(self.resumed_state());
		}

		if self.reposition {
			self.reposition = false;
			self.engine.clear();
			trace2!("Varispeed - engine cleared");
			if self.source_done {
				self.set_state(State::Exhausted);
			}
		}

		let c = self.channels;
		let mut written = 0;
		while written < frames {
			if self.engine.available() == 0 {
				if self.source_done {
					self.set_state(State::Exhausted);
					break;
				}
				self.pull()?;
				continue;
			}

			let want = (frames - written).min(self.output_frames);
			let got  = self.engine.receive(&mut self.output[..want * c]);
			out[written * c..(written + got) * c].copy_from_slice(&self.output[..got * c]);
			written += got;
		}

		Ok(written)
	}

	/// Move one chunk from the source into the engine,
	/// or flush the engine if the source has ended.
	fn pull(&mut self) -> Result<(), RenderError> {
		let read = self.source.read(&mut self.chunk)?;
		if read == 0 {
			self.source_done = true;
			self.engine.flush()?;
			self.set_state(State::Draining);
		} else {
			self.engine.put(&self.chunk[..read * self.channels])?;
		}
		Ok(())
	}

	/// The state to go back to after [`State::Idle`].
	fn resumed_state(&self) -> State {
		match (self.source_done, self.engine.available()) {
			(false, _) => State::Streaming,
			(true, 0)  => State::Exhausted,
			(true, _)  => State::Draining,
		}
	}

	fn set_state(&mut self, state: State) {
		if self.state != state {
			debug2!("Varispeed - {} -> {}", self.state, state);
			self.state = state;
		}
	}

	//------------------------------------------------------------------ Knobs
	/// Set the playback rate for the next read.
	///
	/// `0.0` is silence. Other values are clamped to
	/// [`MIN_SUPPORTED_RATE`]..=[`MAX_SUPPORTED_RATE`], negative
	/// and non-finite values are treated as `0.0`.
	pub fn set_rate(&mut self, rate: f64) {
		let rate = if !rate.is_finite() || rate <= 0.0 {
			if rate != 0.0 {
				warn2!("Varispeed - invalid rate {rate}, using 0.0");
			}
			0.0
		} else {
			rate.clamp(MIN_SUPPORTED_RATE, MAX_SUPPORTED_RATE)
		};

		self.rate = rate;
		if rate != 0.0 {
			self.apply(self.profile.mode());
		}
	}

	/// Put the current rate on the engine knob `mode` selects, `1.0` on the other one.
	fn apply(&mut self, mode: StretchMode) {
		match mode {
			StretchMode::Tempo => {
				self.engine.set_rate(1.0);
				self.engine.set_tempo(self.rate);
			},
			StretchMode::Speed => {
				self.engine.set_tempo(1.0);
				self.engine.set_rate(self.rate);
			},
		}
	}

	/// Drop whatever the engine holds on the next read.
	///
	/// Used when the caller jumps without the source position
	/// following along continuously.
	pub fn reposition(&mut self) {
		trace2!("Varispeed - reposition");
		self.reposition = true;
	}

	/// Switch [`Profile`].
	///
	/// If the stretch mode changes while the rate is not `1.0`, the
	/// current distortion is moved onto the new mode's knob (e.g. an
	/// active tempo stretch becomes the same speed change) so output
	/// stays continuous across the switch.
	pub fn set_profile(&mut self, profile: Profile) {
		let (old, new) = (self.profile.mode(), profile.mode());
		self.profile = profile;

		self.engine.set_use_antialiasing(profile.anti_alias);
		self.engine.set_use_quickseek(profile.quick_seek);

		if old != new {
			info2!("Varispeed - stretch mode {old} -> {new}");
			if self.rate != 0.0 && self.rate != 1.0 {
				self.apply(new);
			}
		}
	}

	//------------------------------------------------------------------ Getters
	#[inline]
	/// Current playback rate.
	pub const fn rate(&self) -> f64 {
		self.rate
	}

	#[inline]
	/// Current [`Profile`].
	pub const fn profile(&self) -> Profile {
		self.profile
	}

	#[inline]
	/// Current [`State`].
	pub const fn state(&self) -> State {
		self.state
	}

	#[inline]
	/// Samples per frame.
	pub const fn channels(&self) -> usize {
		self.channels
	}

	#[inline]
	/// Frames per second.
	pub const fn sample_rate(&self) -> u32 {
		self.sample_rate
	}

	#[inline]
	/// Frames pulled from the source at once.
	pub const fn chunk_frames(&self) -> usize {
		self.chunk_frames
	}

	#[inline]
	/// Frames the engine can hand out per receive.
	///
	/// Always at least `chunk_frames() / MIN_SUPPORTED_RATE`.
	pub const fn output_capacity(&self) -> usize {
		self.output_frames
	}

	#[inline]
	/// The elastic engine.
	pub const fn elastic(&self) -> &E {
		&self.engine
	}

	#[inline]
	/// Return the source.
	pub fn into_inner(self) -> S {
		self.source
	}
}

//---------------------------------------------------------------------------------------------------- TESTS
#[cfg(test)]
mod tests {
	use super::*;
	use crate::{
		config::MIN_SUPPORTED_RATE,
		source::MemorySource,
		stretch::Dummy,
		tests::ramp,
	};
	use pretty_assertions::assert_eq;

	fn dummy(frames: usize, channels: usize, profile: Profile) -> Varispeed<MemorySource, Dummy> {
		Varispeed::with_elastic(ramp(frames, 1_000, channels), Dummy::new(1, 1), profile).unwrap()
	}

	fn drain<S: AudioSource, E: Elastic>(v: &mut Varispeed<S, E>, chunk: usize) -> Vec<f32> {
		let mut all = Vec::new();
		let mut out = vec![0.0; chunk * v.channels()];
		loop {
			let n = v.read(&mut out).unwrap();
			all.extend_from_slice(&out[..n * v.channels()]);
			if n < chunk {
				return all;
			}
		}
	}

	#[test]
	fn engine_takes_source_format() {
		let v = dummy(10, 2, Profile::DEFAULT);
		assert_eq!(v.elastic().channels, 2);
		assert_eq!(v.elastic().sample_rate, 1_000);
		assert_eq!(v.chunk_frames(), 100);
		assert_eq!(v.output_capacity(), 1_000);
		assert!(v.output_capacity() as f64 >= v.chunk_frames() as f64 / MIN_SUPPORTED_RATE);
	}

	#[test]
	fn unity_passes_source_through() {
		let mut v = dummy(1_234, 2, Profile::DEFAULT);
		let out = drain(&mut v, 50);
		assert_eq!(out, ramp(1_234, 1_000, 2).into_inner());
		assert_eq!(v.state(), State::Exhausted);
	}

	#[test]
	fn silence_at_rate_zero() {
		let mut v = dummy(1_000, 2, Profile::DEFAULT);

		let mut out = vec![1.0; 64];
		assert_eq!(v.read(&mut out).unwrap(), 32);
		assert_ne!(out[2], 0.0);

		let puts = v.elastic().put;
		v.set_rate(0.0);
		for _ in 0..100 {
			out.fill(1.0);
			assert_eq!(v.read(&mut out).unwrap(), 32);
			assert!(out.iter().all(|s| *s == 0.0));
		}
		assert_eq!(v.state(), State::Idle);
		assert_eq!(v.elastic().put, puts);

		// Picks up where it left off.
		v.set_rate(1.0);
		assert_eq!(v.read(&mut out).unwrap(), 32);
		assert_eq!(out[0], 32.0);
		assert_eq!(v.state(), State::Streaming);
	}

	#[test]
	fn silence_even_when_exhausted() {
		let mut v = dummy(10, 1, Profile::DEFAULT);
		drain(&mut v, 4);
		assert_eq!(v.state(), State::Exhausted);

		v.set_rate(0.0);
		let mut out = [1.0; 8];
		assert_eq!(v.read(&mut out).unwrap(), 8);
		assert_eq!(out, [0.0; 8]);

		v.set_rate(1.0);
		assert_eq!(v.read(&mut out).unwrap(), 0);
		assert_eq!(v.state(), State::Exhausted);
	}

	#[test]
	fn termination_is_idempotent() {
		let mut v = dummy(250, 1, Profile::DEFAULT);
		let out = drain(&mut v, 64);
		assert_eq!(out.len(), 250);
		assert_eq!(v.elastic().flushes, 1);

		let mut buf = [0.0; 64];
		for _ in 0..10 {
			assert_eq!(v.read(&mut buf).unwrap(), 0);
			assert!(v.state().is_exhausted());
		}
		assert_eq!(v.elastic().flushes, 1);
	}

	#[test]
	fn tempo_profile_uses_tempo_knob() {
		let mut v = dummy(10, 1, Profile::DEFAULT);
		v.set_rate(2.0);
		assert_eq!(v.elastic().tempo, 2.0);
		assert_eq!(v.elastic().rate, 1.0);

		let mut v = dummy(10, 1, Profile::SPEED);
		v.set_rate(2.0);
		assert_eq!(v.elastic().tempo, 1.0);
		assert_eq!(v.elastic().rate, 2.0);
	}

	#[test]
	fn rate_changes_length() {
		let mut v = dummy(1_000, 1, Profile::DEFAULT);
		v.set_rate(2.0);
		assert_eq!(drain(&mut v, 100).len(), 500);

		let mut v = dummy(1_000, 1, Profile::SPEED);
		v.set_rate(0.5);
		assert_eq!(drain(&mut v, 100).len(), 2_000);
	}

	#[test]
	fn profile_switch_moves_the_distortion() {
		let mut v = dummy(10, 1, Profile::DEFAULT);
		v.set_rate(1.5);
		v.set_profile(Profile::SPEED);
		assert_eq!(v.elastic().tempo, 1.0);
		assert_eq!(v.elastic().rate, 1.5);

		v.set_profile(Profile::DEFAULT);
		assert_eq!(v.elastic().tempo, 1.5);
		assert_eq!(v.elastic().rate, 1.0);

		let profile = Profile { anti_alias: false, quick_seek: false, ..Profile::DEFAULT };
		v.set_profile(profile);
		assert!(!v.elastic().anti_alias);
		assert!(!v.elastic().quick_seek);
		assert_eq!(v.profile(), profile);
	}

	#[test]
	fn reposition_clears_on_next_read() {
		let mut v = dummy(1_000, 1, Profile::DEFAULT);
		let clears = v.elastic().clears;

		v.reposition();
		assert_eq!(v.elastic().clears, clears);

		// Not while silent.
		v.set_rate(0.0);
		v.read(&mut [0.0; 10]).unwrap();
		assert_eq!(v.elastic().clears, clears);

		v.set_rate(1.0);
		v.read(&mut [0.0; 10]).unwrap();
		assert_eq!(v.elastic().clears, clears + 1);

		v.read(&mut [0.0; 10]).unwrap();
		assert_eq!(v.elastic().clears, clears + 1);
	}

	#[test]
	fn reposition_drops_buffered_output() {
		let mut v = dummy(1_000, 1, Profile::DEFAULT);
		let mut out = [0.0; 10];
		v.read(&mut out).unwrap();
		assert_eq!(out[9], 9.0);

		// The engine held the rest of the first 100 frame chunk.
		v.reposition();
		v.read(&mut out).unwrap();
		assert_eq!(out[0], 100.0);
	}

	#[test]
	fn invalid_rates() {
		let mut v = dummy(10, 1, Profile::DEFAULT);
		v.set_rate(-1.0);
		assert_eq!(v.rate(), 0.0);
		v.set_rate(f64::NAN);
		assert_eq!(v.rate(), 0.0);
		v.set_rate(100.0);
		assert_eq!(v.rate(), MAX_SUPPORTED_RATE);
		v.set_rate(0.001);
		assert_eq!(v.rate(), MIN_SUPPORTED_RATE);
	}

	#[test]
	fn misaligned_buffer() {
		let mut v = dummy(10, 2, Profile::DEFAULT);
		assert!(matches!(v.read(&mut [0.0; 3]), Err(RenderError::Misaligned { len: 3, channels: 2 })));
	}

	#[test]
	fn stretcher_end_to_end() {
		let source = ramp(8_000, 8_000, 1);
		let mut v = Varispeed::new(source, Profile::DEFAULT).unwrap();
		v.set_rate(2.0);
		let out = drain(&mut v, 512);
		assert!((3_900..4_100).contains(&out.len()), "{}", out.len());
		assert_eq!(v.state(), State::Exhausted);
	}
}
