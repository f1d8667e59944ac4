// Anti-alias low-pass
//
// A 2nd order (biquad) low-pass run before the rate stage
// transposes audio upwards, so content above the new Nyquist
// is attenuated instead of folding back down.

//----------------------------------------------------------------------------------------------- Constants
/// Cutoff relative to the post-transpose Nyquist.
const CUTOFF: f64 = 0.9;
/// Butterworth.
const Q: f64 = std::f64::consts::FRAC_1_SQRT_2;

//----------------------------------------------------------------------------------------------- LowPass
#[derive(Debug)]
pub(super) struct LowPass {
	channels: usize,
	// Normalized coefficients.
	b0: f32,
	b1: f32,
	b2: f32,
	a1: f32,
	a2: f32,
	// Per-channel state, `[x1, x2, y1, y2]`.
	state: Vec<[f32; 4]>,
}

impl LowPass {
	pub(super) fn new(channels: usize) -> Self {
		let mut this = Self {
			channels,
			b0: 1.0, b1: 0.0, b2: 0.0, a1: 0.0, a2: 0.0,
			state: vec![[0.0; 4]; channels],
		};
		this.set_rate(1.0);
		this
	}

	/// Retune for a playback rate, the filter is flat at `rate <= 1.0`.
	pub(super) fn set_rate(&mut self, rate: f64) {
		if rate <= 1.0 {
			(self.b0, self.b1, self.b2, self.a1, self.a2) = (1.0, 0.0, 0.0, 0.0, 0.0);
			return;
		}

		// RBJ cookbook low-pass, cutoff as a fraction of the sample rate.
		let cutoff = 0.5 * CUTOFF / rate;
		let w0     = 2.0 * std::f64::consts::PI * cutoff;
		let alpha  = w0.sin() / (2.0 * Q);
		let cos    = w0.cos();
		let a0     = 1.0 + alpha;

		self.b0 = (((1.0 - cos) / 2.0) / a0) as f32;
		self.b1 = ((1.0 - cos) / a0) as f32;
		self.b2 = self.b0;
		self.a1 = ((-2.0 * cos) / a0) as f32;
		self.a2 = ((1.0 - alpha) / a0) as f32;
	}

	pub(super) fn clear(&mut self) {
		self.state.iter_mut().for_each(|s| *s = [0.0; 4]);
	}

	/// Filter interleaved `samples` in place.
	pub(super) fn process(&mut self, samples: &mut [f32]) {
		for frame in samples.chunks_exact_mut(self.channels) {
			for (x, s) in frame.iter_mut().zip(self.state.iter_mut()) {
				let [x1, x2, y1, y2] = *s;
				let y = self.b0 * *x + self.b1 * x1 + self.b2 * x2 - self.a1 * y1 - self.a2 * y2;
				*s = [*x, x1, y, y1];
				*x = y;
			}
		}
	}
}
