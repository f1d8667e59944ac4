// WSOLA tempo stage
//
// Changes duration without changing pitch by cutting the input
// into overlapping sequences, picking where each sequence starts
// (within a small seek window) so it lines up best with the tail
// of the previous one, and cross-fading the two.
//
// Per iteration `sequence - overlap` frames come out and
// `tempo * (sequence - overlap)` frames of input are skipped,
// so output/input converges to `1 / tempo`.

//----------------------------------------------------------------------------------------------- Constants
/// Length of each sequence.
const SEQUENCE_MS: usize = 40;
/// Cross-fade between consecutive sequences.
const OVERLAP_MS: usize = 8;
/// How far ahead a sequence start is searched for.
const SEEK_MS: usize = 15;
/// Coarse step of the quick seek.
const QUICK_SEEK_STEP: usize = 4;

//----------------------------------------------------------------------------------------------- Tempo
#[derive(Debug)]
pub(super) struct Tempo {
	channels:   usize,
	tempo:      f64,
	quick_seek: bool,

	sequence: usize, // frames
	overlap:  usize, // frames
	seek:     usize, // frames

	input:      Vec<f32>, // pending interleaved input
	mid:        Vec<f32>, // tail of the previous sequence, `overlap` frames
	skip_fract: f64,      // fractional part of the input skip carried over
}

impl Tempo {
	pub(super) fn new(sample_rate: u32, channels: usize) -> Self {
		let ms = |ms: usize| (sample_rate as usize * ms / 1000).max(1);
		let overlap  = ms(OVERLAP_MS);
		let sequence = ms(SEQUENCE_MS).max(overlap * 2 + 1);

		Self {
			channels,
			tempo: 1.0,
			quick_seek: true,
			sequence,
			overlap,
			seek: ms(SEEK_MS),
			input: Vec::new(),
			mid: Vec::new(),
			skip_fract: 0.0,
		}
	}

	pub(super) fn set_tempo(&mut self, tempo: f64) {
		self.tempo = tempo;
	}

	pub(super) fn set_quick_seek(&mut self, quick_seek: bool) {
		self.quick_seek = quick_seek;
	}

	pub(super) fn clear(&mut self) {
		self.input.clear();
		self.mid.clear();
		self.skip_fract = 0.0;
	}

	fn frames(&self) -> usize {
		self.input.len() / self.channels
	}

	/// Take in `samples` and append whatever can be produced to `out`.
	pub(super) fn process(&mut self, samples: &[f32], out: &mut Vec<f32>) {
		self.input.extend_from_slice(samples);

		if self.tempo == 1.0 {
			self.bypass(out);
			return;
		}

		let c = self.channels;
		loop {
			let nominal = self.tempo * (self.sequence - self.overlap) as f64;
			let skip    = (self.skip_fract + nominal) as usize;
			let needed  = (self.seek + self.sequence).max(skip);
			if self.frames() < needed {
				break;
			}

			if self.mid.is_empty() {
				out.extend_from_slice(&self.input[..(self.sequence - self.overlap) * c]);
				self.keep_tail(0);
			} else {
				let offset = self.best_offset();
				self.cross_fade(offset, out);
				out.extend_from_slice(&self.input[(offset + self.overlap) * c..(offset + self.sequence - self.overlap) * c]);
				self.keep_tail(offset);
			}

			self.skip_fract = self.skip_fract + nominal - skip as f64;
			self.input.drain(..skip * c);
		}
	}

	/// Output everything still held.
	///
	/// The leftover input is shorter than one iteration,
	/// it is scaled by picking the nearest frames.
	pub(super) fn flush(&mut self, out: &mut Vec<f32>) {
		let c = self.channels;
		out.extend_from_slice(&self.mid);
		self.mid.clear();

		let frames = self.frames();
		let target = (frames as f64 / self.tempo).round() as usize;
		for i in 0..target {
			let src = ((i as f64 * self.tempo) as usize).min(frames.saturating_sub(1));
			out.extend_from_slice(&self.input[src * c..(src + 1) * c]);
		}

		self.input.clear();
		self.skip_fract = 0.0;
	}

	/// `tempo == 1.0`, pass input through.
	///
	/// A tail left over from a non-`1.0` tempo is
	/// faded into the input first to avoid a click.
	fn bypass(&mut self, out: &mut Vec<f32>) {
		if !self.mid.is_empty() {
			if self.frames() < self.overlap {
				return;
			}
			self.cross_fade(0, out);
			self.input.drain(..self.overlap * self.channels);
			self.mid.clear();
		}
		out.append(&mut self.input);
		self.skip_fract = 0.0;
	}

	/// Remember `input[offset + sequence - overlap..offset + sequence]`.
	fn keep_tail(&mut self, offset: usize) {
		let c = self.channels;
		let start = (offset + self.sequence - self.overlap) * c;
		self.mid.clear();
		self.mid.extend_from_slice(&self.input[start..start + self.overlap * c]);
	}

	/// Linear cross-fade from `mid` into `input[offset..offset + overlap]`.
	fn cross_fade(&self, offset: usize, out: &mut Vec<f32>) {
		let c = self.channels;
		for i in 0..self.overlap {
			let fade_in  = i as f32 / self.overlap as f32;
			let fade_out = 1.0 - fade_in;
			for ch in 0..c {
				let old = self.mid[i * c + ch];
				let new = self.input[(offset + i) * c + ch];
				out.push(old * fade_out + new * fade_in);
			}
		}
	}

	/// Where in `0..seek` the next sequence should start.
	fn best_offset(&self) -> usize {
		if !self.quick_seek {
			return self.search(0..self.seek, 1);
		}

		let coarse = self.search(0..self.seek, QUICK_SEEK_STEP);
		let from   = coarse.saturating_sub(QUICK_SEEK_STEP - 1);
		let to     = (coarse + QUICK_SEEK_STEP).min(self.seek);
		self.search(from..to, 1)
	}

	/// Offset with the highest normalized correlation against `mid`.
	fn search(&self, range: std::ops::Range<usize>, step: usize) -> usize {
		let c = self.channels;
		let len = self.overlap * c;

		let mut best = range.start;
		let mut best_score = f32::NEG_INFINITY;

		for offset in range.step_by(step) {
			let candidate = &self.input[offset * c..offset * c + len];

			let mut corr = 0.0;
			let mut norm = 0.0;
			for (m, x) in self.mid.iter().zip(candidate) {
				corr += m * x;
				norm += x * x;
			}

			let score = corr / (norm.sqrt() + 1e-9);
			if score > best_score {
				best_score = score;
				best = offset;
			}
		}

		best
	}
}
