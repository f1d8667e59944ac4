// Rate stage
//
// Transposes audio (duration and pitch together) by resampling it
// with a variable ratio of `1 / rate`, then playing the result back
// at the original sample rate.
//
// The backend is `rubato`'s `SincFixedIn`, which takes fixed size
// planar chunks. Input is collected until a whole chunk is available.
//
// `SincFixedIn` delays its output by half the sinc length, that many
// output frames are dropped after every reset so output lines up
// with input. On flush, silence is pushed through to get the held
// back tail out, and output is cut once the tail (and nothing more)
// has come out.

//----------------------------------------------------------------------------------------------- use
use rubato::{
	Resampler,
	SincFixedIn,
	SincInterpolationParameters,
	SincInterpolationType,
	WindowFunction,
};
use crate::{
	config::{MIN_SUPPORTED_RATE,MAX_SUPPORTED_RATE},
	error::StretchError,
	stretch::filter::LowPass,
};

//----------------------------------------------------------------------------------------------- Constants
/// Frames per `rubato` chunk.
const CHUNK: usize = 1024;

/// Sinc length of the interpolation filter.
const SINC_LEN: usize = 128;

/// `rubato` parameters.
const PARAMETERS: SincInterpolationParameters = SincInterpolationParameters {
	sinc_len: SINC_LEN,
	f_cutoff: 0.95,
	interpolation: SincInterpolationType::Cubic,
	oversampling_factor: 128,
	window: WindowFunction::BlackmanHarris2,
};

/// Headroom over the supported ratio range.
const MAX_RELATIVE_RATIO: f64 = MAX_SUPPORTED_RATE * 1.1;

//----------------------------------------------------------------------------------------------- Rate
pub(super) struct Rate {
	channels:   usize,
	rate:       f64,
	anti_alias: bool,

	resampler: SincFixedIn<f32>,
	filter:    LowPass,

	input:   Vec<Vec<f32>>, // planar, less than `CHUNK` frames
	delay:   usize,         // output frames left to drop
	started: bool,          // a chunk went through since the last reset
}

impl std::fmt::Debug for Rate {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_struct("Rate")
			.field("channels", &self.channels)
			.field("rate", &self.rate)
			.field("anti_alias", &self.anti_alias)
			.field("delay", &self.delay)
			.field("started", &self.started)
			.finish_non_exhaustive()
	}
}

impl Rate {
	pub(super) fn new(channels: usize) -> Result<Self, StretchError> {
		let resampler = SincFixedIn::<f32>::new(
			1.0,
			MAX_RELATIVE_RATIO,
			PARAMETERS,
			CHUNK,
			channels,
		)?;

		Ok(Self {
			channels,
			rate: 1.0,
			anti_alias: true,
			resampler,
			filter: LowPass::new(channels),
			input: vec![Vec::with_capacity(CHUNK); channels],
			delay: SINC_LEN / 2,
			started: false,
		})
	}

	/// Output frames `frames` of input (plus the filter tail) are worth.
	fn worth(&self, frames: usize) -> usize {
		(frames as f64 * self.ratio()).round() as usize
	}

	/// `1 / rate`, what `rubato` calls the resample ratio.
	fn ratio(&self) -> f64 {
		1.0 / self.rate
	}

	pub(super) fn set_rate(&mut self, rate: f64) {
		let rate = rate.clamp(MIN_SUPPORTED_RATE, MAX_SUPPORTED_RATE);
		if rate == self.rate {
			return;
		}
		self.rate = rate;
		// Only fails outside `MAX_RELATIVE_RATIO`, which the clamp rules out.
		// Nothing to ramp from before the first chunk.
		let _ = self.resampler.set_resample_ratio_relative(self.ratio(), self.started);
		if !self.started {
			self.delay = self.worth(SINC_LEN / 2);
		}
		self.filter.set_rate(if self.anti_alias { rate } else { 1.0 });
	}

	pub(super) fn set_anti_alias(&mut self, anti_alias: bool) {
		self.anti_alias = anti_alias;
		self.filter.set_rate(if anti_alias { self.rate } else { 1.0 });
	}

	pub(super) fn clear(&mut self) {
		self.resampler.reset();
		// `reset()` restores the ratio the resampler was created with.
		let _ = self.resampler.set_resample_ratio_relative(self.ratio(), false);
		self.filter.clear();
		self.input.iter_mut().for_each(Vec::clear);
		self.delay   = self.worth(SINC_LEN / 2);
		self.started = false;
	}

	/// Take in interleaved `samples` and append whatever can be produced to `out`.
	pub(super) fn process(&mut self, samples: &mut [f32], out: &mut Vec<f32>) -> Result<(), StretchError> {
		if self.anti_alias {
			self.filter.process(samples);
		}

		for frame in samples.chunks_exact(self.channels) {
			for (ch, s) in frame.iter().enumerate() {
				self.input[ch].push(*s);
			}
			if self.input[0].len() == CHUNK {
				let planar = self.resampler.process(&self.input, None)?;
				self.input.iter_mut().for_each(Vec::clear);
				self.started = true;
				self.emit(&planar, usize::MAX, out);
			}
		}

		Ok(())
	}

	/// Push out everything still held.
	///
	/// What is left is the partial chunk plus the
	/// half-sinc tail still inside the resampler.
	pub(super) fn flush(&mut self, out: &mut Vec<f32>) -> Result<(), StretchError> {
		if !self.started && self.input[0].is_empty() {
			// Nothing went in, nothing is held.
			return Ok(());
		}
		let mut left = self.worth(self.input[0].len() + SINC_LEN / 2);

		if self.input[0].len() > 0 {
			let planar = self.resampler.process_partial(Some(self.input.as_slice()), None)?;
			self.input.iter_mut().for_each(Vec::clear);
			left -= self.emit(&planar, left, out);
		}

		// Silence until the delayed tail is out.
		while left > 0 {
			let planar = self.resampler.process_partial::<Vec<f32>>(None, None)?;
			let emitted = self.emit(&planar, left, out);
			if emitted == 0 && self.delay == 0 {
				break;
			}
			left -= emitted;
		}

		self.clear();
		Ok(())
	}

	/// Interleave at most `limit` frames of `planar` into `out`,
	/// after dropping what is left of the resampler delay.
	fn emit(&mut self, planar: &[Vec<f32>], limit: usize, out: &mut Vec<f32>) -> usize {
		let frames = planar.first().map_or(0, Vec::len);
		let skip   = self.delay.min(frames);
		self.delay -= skip;

		let take = (frames - skip).min(limit);
		out.reserve(take * self.channels);
		for i in skip..skip + take {
			for ch in planar {
				out.push(ch[i]);
			}
		}

		take
	}
}

//----------------------------------------------------------------------------------------------- TESTS
#[cfg(test)]
mod tests {
	use super::*;

	fn run(rate: f64, channels: usize) -> (usize, usize) {
		let mut r = Rate::new(channels).unwrap();
		r.set_rate(rate);

		let frames = 20_000;
		let mut input: Vec<f32> = (0..frames * channels).map(|i| ((i / channels) as f32 * 0.01).sin()).collect();
		let mut out = Vec::new();
		for chunk in input.chunks_mut(700 * channels) {
			r.process(chunk, &mut out).unwrap();
		}
		r.flush(&mut out).unwrap();
		(frames, out.len() / channels)
	}

	#[test]
	fn output_length_follows_rate() {
		for rate in [0.1, 0.5, 1.0, 1.5, 4.0, 10.0] {
			let (input, output) = run(rate, 2);
			let expected = input as f64 / rate;
			assert!((output as f64 - expected).abs() <= 3.0, "rate {rate}: {output} frames, expected ~{expected}");
		}
	}

	#[test]
	fn unity_rate_keeps_signal_aligned() {
		let mut r = Rate::new(1).unwrap();
		let mut input: Vec<f32> = (0..8_192).map(|i| (i as f32 * 0.01).sin()).collect();
		let original = input.clone();
		let mut out = Vec::new();
		r.process(&mut input, &mut out).unwrap();
		r.flush(&mut out).unwrap();

		assert!(out.len().abs_diff(original.len()) <= 2, "{}", out.len());
		// Away from the edges the resampled signal should sit on top of the input.
		let error: f32 = out[1_000..7_000]
			.iter()
			.zip(&original[1_000..7_000])
			.map(|(a, b)| (a - b).abs())
			.fold(0.0, f32::max);
		assert!(error < 0.05, "{error}");
	}

	#[test]
	fn clamps_rate() {
		let mut r = Rate::new(1).unwrap();
		r.set_rate(100.0);
		assert_eq!(r.rate, MAX_SUPPORTED_RATE);
		r.set_rate(0.0001);
		assert_eq!(r.rate, MIN_SUPPORTED_RATE);
	}
}
