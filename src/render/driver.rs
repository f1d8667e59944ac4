//! Render a match list.

//---------------------------------------------------------------------------------------------------- Use
use std::ops::ControlFlow;
use crate::{
	align::Match,
	config::{RenderConfig,MIN_SUPPORTED_RATE,MAX_SUPPORTED_RATE},
	error::RenderError,
	macros::{debug2,info2,trace2,warn2},
	render::{Segment,Varispeed},
	sink::AudioSink,
	source::{AudioSource,duration_to_frames},
	stretch::Elastic,
};

//---------------------------------------------------------------------------------------------------- Progress
#[derive(Copy,Clone,Debug,Default,PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
/// Handed to the progress callback after every segment.
pub struct Progress {
	/// Index of the segment just rendered
	pub segment: usize,
	/// Total segments (`matches.len() - 1`)
	pub segments: usize,
	/// Rate the segment was rendered at
	pub rate: f64,
	/// Frames written to the sink so far, including padding
	pub written: usize,
}

impl Progress {
	#[inline]
	#[must_use]
	/// `0.0..=1.0` of the segments done.
	pub fn fraction(&self) -> f64 {
		if self.segments == 0 {
			1.0
		} else {
			(self.segment + 1) as f64 / self.segments as f64
		}
	}
}

//---------------------------------------------------------------------------------------------------- Report
#[derive(Copy,Clone,Debug,Default,PartialEq,Eq,Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
/// What [`Driver::render`] did.
pub struct Report {
	/// Segments rendered
	pub segments: usize,
	/// Frames written to the sink, including padding
	pub frames: usize,
	/// Frames of leading silence
	pub padded: usize,
	/// Segments that got fewer frames than scheduled (the source ended)
	pub short_segments: usize,
	/// Segments whose rate was clamped
	pub clamped: usize,
	/// The progress callback stopped rendering early
	pub cancelled: bool,
}

//---------------------------------------------------------------------------------------------------- Driver
/// Turns a list of [`Match`]'s into rate changes and reads.
///
/// For every [`Segment`] the driver:
/// 1. works out how many output frames the segment spans
///    (`to.time2`, measured from the first match)
/// 2. works out the rate that makes the source land on `to.time1`
///    by the end of it, given how much source was consumed so far
/// 3. sets that rate, reads that many frames, writes them out
///
/// Rates are computed cumulatively, so rounding and clamping
/// in one segment are corrected for in the next.
///
/// The renderer's source is expected to start at the first
/// match's `time1` (see [`Crop`](crate::source::Crop)).
///
/// The matches must be in increasing `time2` order.
pub struct Driver<F> {
	config:   RenderConfig,
	progress: F,
}

impl<F> std::fmt::Debug for Driver<F> {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_struct("Driver")
			.field("config", &self.config)
			.finish_non_exhaustive()
	}
}

impl Driver<fn(&Progress) -> ControlFlow<()>> {
	#[must_use]
	/// A driver without a progress callback.
	pub fn new(config: RenderConfig) -> Self {
		Self {
			config,
			progress: |_| ControlFlow::Continue(()),
		}
	}
}

impl<F> Driver<F>
where
	F: FnMut(&Progress) -> ControlFlow<()>,
{
	#[must_use]
	/// Call `progress` after every segment.
	///
	/// Returning [`ControlFlow::Break`] stops rendering,
	/// [`Report::cancelled`] will be `true`.
	pub fn with_progress<G>(self, progress: G) -> Driver<G>
	where
		G: FnMut(&Progress) -> ControlFlow<()>,
	{
		Driver { config: self.config, progress }
	}

	#[inline]
	#[must_use]
	/// The [`RenderConfig`] in use.
	pub const fn config(&self) -> &RenderConfig {
		&self.config
	}

	/// Render `matches` from `renderer` into `sink`.
	///
	/// Fewer than 2 matches renders nothing. Segments after the
	/// source has ended are still walked but write nothing.
	///
	/// The sink is not finalized.
	///
	/// Rates are clamped to the config's `min_rate..=max_rate`,
	/// narrowed to [`MIN_SUPPORTED_RATE`]..=[`MAX_SUPPORTED_RATE`].
	///
	/// # Errors
	/// The renderer and sink disagree on format, the config's rate
	/// range is empty or not positive, or the source, engine or sink failed.
	pub fn render<S, E, K>(
		&mut self,
		matches: &[Match],
		renderer: &mut Varispeed<S, E>,
		sink: &mut K,
	) -> Result<Report, RenderError>
	where
		S: AudioSource,
		E: Elastic,
		K: AudioSink,
	{
		if renderer.channels() != sink.channels() {
			return Err(RenderError::Channels { renderer: renderer.channels(), sink: sink.channels() });
		}
		if renderer.sample_rate() != sink.sample_rate() {
			return Err(RenderError::SampleRate { renderer: renderer.sample_rate(), sink: sink.sample_rate() });
		}

		let (min_rate, max_rate) = (self.config.min_rate, self.config.max_rate);
		if !(min_rate > 0.0 && min_rate <= max_rate) {
			return Err(RenderError::RateRange { min: min_rate, max: max_rate });
		}
		// The renderer clamps to this range again, rates outside it are never played.
		let min_rate = min_rate.clamp(MIN_SUPPORTED_RATE, MAX_SUPPORTED_RATE);
		let max_rate = max_rate.clamp(MIN_SUPPORTED_RATE, MAX_SUPPORTED_RATE);

		let mut report = Report::default();
		let (Some(first), true) = (matches.first(), matches.len() >= 2) else {
			info2!("Driver - {} match(es), nothing to render", matches.len());
			return Ok(report);
		};

		let sample_rate = renderer.sample_rate();
		let frame_secs  = |frames: usize| frames as f64 / f64::from(sample_rate);
		let mut span = vec![0.0; renderer.chunk_frames() * renderer.channels()];

		renderer.set_profile(self.config.profile);
		renderer.reposition();

		if self.config.pad_start {
			let frames = duration_to_frames(first.time2, sample_rate);
			renderer.set_rate(0.0);
			report.padded = Self::pump(renderer, sink, frames, &mut span)?;
			report.frames = report.padded;
			debug2!("Driver - padded {frames} frames");
		}

		let segments = matches.len() - 1;
		let origin1  = first.time1.as_secs_f64();
		let mut scheduled = 0_usize; // output frames, since `first.time2`
		let mut consumed  = 0.0_f64; // source seconds, since `first.time1`

		info2!("Driver - rendering {segments} segments");

		for segment in Segment::pairs(matches) {
			let end    = duration_to_frames(segment.to.time2.saturating_sub(first.time2), sample_rate);
			let frames = end.saturating_sub(scheduled);
			scheduled  = scheduled.max(end);

			let mut rate = 0.0;
			if frames == 0 {
				trace2!("Driver - segment {} is empty", segment.index);
			} else {
				let out_secs = frame_secs(frames);
				let target   = segment.to.time1.as_secs_f64() - origin1;

				rate = if segment.offset_delta().abs() <= f64::from(f32::EPSILON)
					&& (consumed + out_secs - target).abs() <= frame_secs(1) / 2.0
				{
					1.0
				} else {
					(target - consumed) / out_secs
				};

				if !(min_rate..=max_rate).contains(&rate) {
					let clamped = rate.clamp(min_rate, max_rate);
					warn2!("Driver - segment {} needs rate {rate:.4}, clamped to {clamped:.4}", segment.index);
					report.clamped += 1;
					rate = clamped;
				}

				renderer.set_rate(rate);
				rate = renderer.rate();
				let written = Self::pump(renderer, sink, frames, &mut span)?;
				if written < frames {
					report.short_segments += 1;
				}

				consumed      += out_secs * rate;
				report.frames += written;
				debug2!("Driver - segment {}: {frames} frames at rate {rate:.6}, wrote {written}", segment.index);
			}

			report.segments += 1;

			let progress = Progress {
				segment: segment.index,
				segments,
				rate,
				written: report.frames,
			};
			if (self.progress)(&progress).is_break() {
				info2!("Driver - cancelled after segment {}", segment.index);
				report.cancelled = true;
				break;
			}
		}

		info2!("Driver - {report:?}");
		Ok(report)
	}

	/// Read up to `frames` from `renderer` into `sink`, `span` at a time.
	///
	/// Returns frames written, fewer than `frames` once the stream ends.
	fn pump<S, E, K>(
		renderer: &mut Varispeed<S, E>,
		sink: &mut K,
		frames: usize,
		span: &mut [f32],
	) -> Result<usize, RenderError>
	where
		S: AudioSource,
		E: Elastic,
		K: AudioSink,
	{
		let c = renderer.channels();
		let span_frames = span.len() / c;

		let mut written = 0;
		while written < frames {
			let want = (frames - written).min(span_frames);
			let read = renderer.read(&mut span[..want * c])?;
			if read == 0 {
				break;
			}
			sink.write(&span[..read * c])?;
			written += read;
		}

		Ok(written)
	}
}
