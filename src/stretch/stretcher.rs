//! The default [`Elastic`] engine.

//---------------------------------------------------------------------------------------------------- use
use std::collections::VecDeque;
use crate::{
	error::StretchError,
	stretch::{
		Elastic,
		tempo::Tempo,
		rate::Rate,
	},
};

//---------------------------------------------------------------------------------------------------- Stretcher
/// WSOLA tempo followed by a sinc resampled rate stage.
///
/// Samples pass through [`Elastic::put`] as:
/// ```text
/// input -> tempo (WSOLA) -> anti-alias low-pass -> rate (resampler) -> output
/// ```
/// Both stages hold some input back, roughly one WSOLA sequence
/// plus half a sinc length, so output trails input until
/// [`Elastic::flush`] is called.
///
/// ```rust
/// # use realign::stretch::*;
/// let mut s = Stretcher::new(8_000, 1).unwrap();
/// s.set_tempo(2.0);
/// s.put(&vec![0.0; 8_000]).unwrap();
/// s.flush().unwrap();
///
/// let mut out = vec![0.0; 8_000];
/// let frames = s.receive(&mut out);
/// assert!((3_900..4_100).contains(&frames));
/// ```
#[derive(Debug)]
pub struct Stretcher {
	sample_rate: u32,
	channels:    usize,
	rate_value:  f64,
	tempo_value: f64,
	anti_alias:  bool,
	quick_seek:  bool,

	tempo: Tempo,
	rate:  Rate,

	staging: Vec<f32>,       // tempo -> rate
	rated:   Vec<f32>,       // rate -> output
	output:  VecDeque<f32>,  // interleaved, ready for `receive()`
}

impl Stretcher {
	/// Create an engine for `channels` of audio at `sample_rate`.
	///
	/// # Errors
	/// Either argument is `0`, or the resampler could not be built.
	pub fn new(sample_rate: u32, channels: usize) -> Result<Self, StretchError> {
		if sample_rate == 0 {
			return Err(StretchError::SampleRate(sample_rate));
		}
		if channels == 0 {
			return Err(StretchError::Channels(channels));
		}

		Ok(Self {
			sample_rate,
			channels,
			rate_value: 1.0,
			tempo_value: 1.0,
			anti_alias: true,
			quick_seek: true,
			tempo: Tempo::new(sample_rate, channels),
			rate: Rate::new(channels)?,
			staging: Vec::new(),
			rated: Vec::new(),
			output: VecDeque::new(),
		})
	}

	#[inline]
	#[must_use]
	/// Current channel count.
	pub const fn channels(&self) -> usize {
		self.channels
	}

	#[inline]
	#[must_use]
	/// Current sample rate.
	pub const fn sample_rate(&self) -> u32 {
		self.sample_rate
	}

	#[inline]
	#[must_use]
	/// Current playback rate.
	pub const fn rate(&self) -> f64 {
		self.rate_value
	}

	#[inline]
	#[must_use]
	/// Current tempo.
	pub const fn tempo(&self) -> f64 {
		self.tempo_value
	}

	/// Build both stages again for the current format, keeping the knobs.
	fn rebuild(&mut self) -> Result<(), StretchError> {
		let mut tempo = Tempo::new(self.sample_rate, self.channels);
		tempo.set_tempo(self.tempo_value);
		tempo.set_quick_seek(self.quick_seek);

		let mut rate = Rate::new(self.channels)?;
		rate.set_anti_alias(self.anti_alias);
		rate.set_rate(self.rate_value);

		self.tempo = tempo;
		self.rate  = rate;
		self.staging.clear();
		self.rated.clear();
		self.output.clear();
		Ok(())
	}

	/// Move whatever the tempo stage produced through the rate stage.
	fn forward(&mut self) -> Result<(), StretchError> {
		self.rate.process(&mut self.staging, &mut self.rated)?;
		self.staging.clear();
		self.output.extend(self.rated.drain(..));
		Ok(())
	}
}

impl Elastic for Stretcher {
	fn put(&mut self, samples: &[f32]) -> Result<(), StretchError> {
		if samples.len() % self.channels != 0 {
			return Err(StretchError::Misaligned { len: samples.len(), channels: self.channels });
		}
		self.tempo.process(samples, &mut self.staging);
		self.forward()
	}

	fn flush(&mut self) -> Result<(), StretchError> {
		self.tempo.flush(&mut self.staging);
		self.forward()?;
		self.rate.flush(&mut self.rated)?;
		self.output.extend(self.rated.drain(..));
		Ok(())
	}

	fn receive(&mut self, out: &mut [f32]) -> usize {
		let frames = (out.len() / self.channels).min(self.available());
		let len    = frames * self.channels;
		for (o, s) in out[..len].iter_mut().zip(self.output.drain(..len)) {
			*o = s;
		}
		frames
	}

	fn available(&self) -> usize {
		self.output.len() / self.channels
	}

	fn set_rate(&mut self, rate: f64) {
		self.rate_value = rate;
		self.rate.set_rate(rate);
	}

	fn set_tempo(&mut self, tempo: f64) {
		self.tempo_value = tempo;
		self.tempo.set_tempo(tempo);
	}

	fn set_channels(&mut self, channels: usize) -> Result<(), StretchError> {
		if channels == 0 {
			return Err(StretchError::Channels(channels));
		}
		self.channels = channels;
		self.rebuild()
	}

	fn set_sample_rate(&mut self, sample_rate: u32) -> Result<(), StretchError> {
		if sample_rate == 0 {
			return Err(StretchError::SampleRate(sample_rate));
		}
		self.sample_rate = sample_rate;
		self.rebuild()
	}

	fn set_use_antialiasing(&mut self, enable: bool) {
		self.anti_alias = enable;
		self.rate.set_anti_alias(enable);
	}

	fn set_use_quickseek(&mut self, enable: bool) {
		self.quick_seek = enable;
		self.tempo.set_quick_seek(enable);
	}

	fn clear(&mut self) {
		self.tempo.clear();
		self.rate.clear();
		self.staging.clear();
		self.rated.clear();
		self.output.clear();
	}
}
