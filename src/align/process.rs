//! Alignment path → [`Match`]'s.
//!
//! The steps, in order:
//! 1. Cue trimming: drop the path ends that hug an interval edge
//! 2. Anchor selection: every `anchor_spacing`-th point, plus the last one
//! 3. Smoothing: replace interior anchor drift with the local median drift
//! 4. Similarity: score each anchor, or `1.0` if no function is given
//! 5. Shift everything back onto the uncropped timelines

//---------------------------------------------------------------------------------------------------- Use
use std::time::Duration;
use crate::{
	align::{
		AlignmentPath,CorrespondencePoint,Match,MatchSource,
		median,
		point::saturating_secs,
	},
	config::{PostProcess,SIMILARITY_WINDOW},
	macros::{debug2,trace2},
};

//---------------------------------------------------------------------------------------------------- Window
#[derive(Copy,Clone,Debug,Default,PartialEq,Eq,Hash)]
/// A span of a track handed to a similarity function.
///
/// `start` is absolute (uncropped) time.
pub struct Window {
	/// Start of the window
	pub start: Duration,
	/// Length of the window
	pub length: Duration,
}

impl Window {
	#[inline]
	/// A [`SIMILARITY_WINDOW`] long window centered on `time`, clipped at `0`.
	fn centered(time: Duration) -> Self {
		Self {
			start:  time.saturating_sub(SIMILARITY_WINDOW / 2),
			length: SIMILARITY_WINDOW,
		}
	}
}

//---------------------------------------------------------------------------------------------------- process
/// Turn a raw alignment path into an ordered list of [`Match`]'s.
///
/// `similarity` receives a window on track 1 (timeline A) and
/// the corresponding window on track 2 (timeline B) and should
/// return a value in `0.0..=1.0`. Without it, every match gets `1.0`.
///
/// An empty path (or one trimmed down to nothing) means
/// "no alignment found" and returns an empty [`Vec`].
///
/// The first and last emitted match are never smoothed.
///
/// ```rust
/// # use realign::{align::*, config::PostProcess};
/// # use std::time::Duration;
/// let points = (0..=10)
///     .map(|i| CorrespondencePoint::from_secs_f64(i as f64, i as f64 * 1.1))
///     .collect();
/// let path = AlignmentPath::from_points(points, Duration::ZERO, Duration::ZERO);
///
/// let config = PostProcess::DEFAULT.with_anchor_spacing(5);
/// let matches = process(&path, &config, None);
///
/// assert_eq!(matches.len(), 3);
/// assert_eq!(matches[0].offset(), 0.0);
/// ```
pub fn process(
	path: &AlignmentPath,
	config: &PostProcess,
	mut similarity: Option<&mut dyn FnMut(Window, Window) -> f32>,
) -> Vec<Match> {
	let points = trim(&path.points, path.a.length(), path.b.length(), config);
	if points.is_empty() {
		debug2!("process - {} path points, none left after trimming", path.points.len());
		return Vec::new();
	}

	let anchors = anchor_indices(points.len(), config.spacing());
	let last    = anchors.len() - 1;
	let width   = config.smoothing_width();

	debug2!(
		"process - {} path points, {} after trimming, {} anchors, smoothing width {}",
		path.points.len(),
		points.len(),
		anchors.len(),
		if config.smoothing { width } else { 0 },
	);

	let mut drifts = Vec::with_capacity(width);
	let mut matches = Vec::with_capacity(anchors.len());

	for (n, &index) in anchors.iter().enumerate() {
		let mut point = points[index];

		if config.smoothing && n != 0 && n != last {
			point = smooth(points, index, width, &mut drifts);
		}

		let time1 = path.a.from.saturating_add(point.a);
		let time2 = path.b.from.saturating_add(point.b);

		let score = match similarity.as_mut() {
			Some(f) => f(Window::centered(time1), Window::centered(time2)),
			None    => 1.0,
		};

		trace2!("process - anchor {n} at path index {index}: {time1:?} -> {time2:?}, similarity {score}");
		matches.push(Match::new(time1, time2, score, MatchSource::Path));
	}

	matches
}

//---------------------------------------------------------------------------------------------------- Steps
/// Drop the leading/trailing points within `search_width` of an interval edge.
///
/// A point is dropped from the start while _either_ coordinate is
/// within `search_width` of its interval start, and from the end
/// while _either_ coordinate is within `search_width` of its
/// interval end. Only a prefix and a suffix are ever removed.
fn trim<'p>(
	points: &'p [CorrespondencePoint],
	length_a: Duration,
	length_b: Duration,
	config: &PostProcess,
) -> &'p [CorrespondencePoint] {
	let width = config.search_width;

	let start = if config.cue_in {
		points
			.iter()
			.take_while(|p| p.a <= width || p.b <= width)
			.count()
	} else {
		0
	};

	let end = if config.cue_out {
		let trailing = points[start..]
			.iter()
			.rev()
			.take_while(|p| length_a.saturating_sub(p.a) <= width || length_b.saturating_sub(p.b) <= width)
			.count();
		points.len() - trailing
	} else {
		points.len()
	};

	&points[start..end]
}

/// Every `spacing`-th index of `0..len`, always ending on `len - 1`.
///
/// `len` and `spacing` must be non-zero.
fn anchor_indices(len: usize, spacing: usize) -> Vec<usize> {
	let mut indices: Vec<usize> = (0..len).step_by(spacing).collect();
	if indices.last() != Some(&(len - 1)) {
		indices.push(len - 1);
	}
	indices
}

/// `points[index]` with its `b` moved so the drift
/// equals the median drift of the surrounding window.
///
/// `drifts` is scratch space.
fn smooth(
	points: &[CorrespondencePoint],
	index: usize,
	width: usize,
	drifts: &mut Vec<f64>,
) -> CorrespondencePoint {
	let point = points[index];
	if width <= 1 {
		return point;
	}

	let start = index.saturating_sub(width / 2);
	let end   = (start + width).min(points.len());

	drifts.clear();
	drifts.extend(points[start..end].iter().map(CorrespondencePoint::drift));

	let drift = median(drifts);
	CorrespondencePoint::new(point.a, saturating_secs(point.a.as_secs_f64() + drift))
}

//---------------------------------------------------------------------------------------------------- TESTS
#[cfg(test)]
mod tests {
	use super::*;
	use crate::align::Interval;
	use crate::tests::{linear_path,secs};
	use pretty_assertions::assert_eq;
	use rand::{Rng,SeedableRng,rngs::StdRng};

	fn offsets(matches: &[Match]) -> Vec<f64> {
		matches.iter().map(Match::offset).collect()
	}

	#[test]
	fn empty_path() {
		let path = AlignmentPath::default();
		assert!(process(&path, &PostProcess::DEFAULT, None).is_empty());
	}

	#[test]
	fn anchors_every_spacing_plus_last() {
		assert_eq!(anchor_indices(10, 3), [0, 3, 6, 9]);
		assert_eq!(anchor_indices(11, 3), [0, 3, 6, 9, 10]);
		assert_eq!(anchor_indices(1, 100), [0]);
		assert_eq!(anchor_indices(5, 1), [0, 1, 2, 3, 4]);
	}

	#[test]
	fn anchor_spacing_in_path_index_terms() {
		for len in 1..50 {
			for spacing in 1..12 {
				let anchors = anchor_indices(len, spacing);
				assert_eq!(anchors[0], 0);
				assert_eq!(*anchors.last().unwrap(), len - 1);
				let (body, _) = anchors.split_at(anchors.len() - 1);
				for pair in body.windows(2) {
					assert_eq!(pair[1] - pair[0], spacing);
				}
			}
		}
	}

	#[test]
	fn cue_flags_off_keep_everything() {
		let path = linear_path(100, 10.0, 10.0);
		let config = PostProcess::DEFAULT.with_search_width(secs(5.0));
		let kept = trim(&path.points, path.a.length(), path.b.length(), &config);
		assert_eq!(kept.len(), path.len());
	}

	#[test]
	fn trimming_removes_only_boundary_points() {
		// 0.0, 0.1, .., 10.0
		let path  = linear_path(101, 10.0, 10.0);
		let width = secs(1.0);

		for (cue_in, cue_out) in [(true, false), (false, true), (true, true)] {
			let config = PostProcess::DEFAULT.with_search_width(width).with_cues(cue_in, cue_out);
			let kept = trim(&path.points, path.a.length(), path.b.length(), &config);

			for p in &path.points {
				let near_start = p.a <= width || p.b <= width;
				let near_end   = path.a.length() - p.a <= width || path.b.length() - p.b <= width;
				let survives   = !(cue_in && near_start) && !(cue_out && near_end);
				assert_eq!(kept.contains(p), survives, "{p:?} cue_in={cue_in} cue_out={cue_out}");
			}
		}
	}

	#[test]
	fn trimming_either_coordinate() {
		// B starts slow so `b` stays near the edge longer than `a`.
		let points = vec![
			CorrespondencePoint::from_secs_f64(0.0, 0.0),
			CorrespondencePoint::from_secs_f64(2.0, 0.5),
			CorrespondencePoint::from_secs_f64(3.0, 2.0),
			CorrespondencePoint::from_secs_f64(4.0, 4.0),
		];
		let path = AlignmentPath::from_points(points, Duration::ZERO, Duration::ZERO);
		let config = PostProcess::DEFAULT.with_search_width(secs(1.0)).with_cues(true, false);
		let kept = trim(&path.points, path.a.length(), path.b.length(), &config);
		assert_eq!(kept, &path.points[2..]);
	}

	#[test]
	fn trimmed_to_nothing_is_no_alignment() {
		let path = linear_path(11, 1.0, 1.0);
		let config = PostProcess::DEFAULT.with_search_width(secs(5.0)).with_cues(true, true);
		assert!(process(&path, &config, None).is_empty());
	}

	#[test]
	fn smoothing_uses_window_median() {
		// Drift is 0 everywhere except a spike at index 10.
		let mut path = linear_path(21, 20.0, 20.0);
		path.points[10].b += secs(3.0);

		let config = PostProcess::DEFAULT.with_anchor_spacing(10).with_smoothing(false);
		let raw = process(&path, &config, None);
		assert_eq!(offsets(&raw), [0.0, 3.0, 0.0]);

		// spacing 30 -> width 3, window 9..12 -> [0, 3, 0] -> 0
		let mut drifts = Vec::new();
		let p = smooth(&path.points, 10, 3, &mut drifts);
		assert_eq!(p.drift(), 0.0);
		// width 1 leaves the point alone
		let p = smooth(&path.points, 10, 1, &mut drifts);
		assert_eq!(p.drift(), 3.0);
	}

	#[test]
	fn smoothing_even_window_averages() {
		let points = [0.0, 1.0, 2.0, 10.0]
			.iter()
			.enumerate()
			.map(|(i, d)| CorrespondencePoint::from_secs_f64(i as f64 + 100.0, i as f64 + 100.0 + d))
			.collect::<Vec<_>>();
		let mut drifts = Vec::new();
		// index 2, width 4 -> start 0 -> [0, 1, 2, 10] -> 1.5
		let p = smooth(&points, 2, 4, &mut drifts);
		assert!((p.drift() - 1.5).abs() < 1e-9);
	}

	#[test]
	fn boundaries_never_smoothed() {
		let mut rng = StdRng::seed_from_u64(0);
		let points = (0..=500)
			.map(|i| {
				let a = i as f64 * 0.1;
				CorrespondencePoint::from_secs_f64(a, a + 0.5 + rng.gen_range(-0.2..0.2))
			})
			.collect::<Vec<_>>();
		let first = points[0];
		let last  = *points.last().unwrap();
		let path  = AlignmentPath::new(
			points,
			Interval::new(secs(7.0), secs(7.0) + last.a),
			Interval::new(secs(3.0), secs(3.0) + last.b),
		);

		for spacing in [1, 7, 50, 100, 499, 1000] {
			for smoothing in [true, false] {
				let config  = PostProcess::DEFAULT.with_anchor_spacing(spacing).with_smoothing(smoothing);
				let matches = process(&path, &config, None);
				let head = matches.first().unwrap();
				let tail = matches.last().unwrap();
				assert_eq!(head.time1, secs(7.0) + first.a);
				assert_eq!(head.time2, secs(3.0) + first.b);
				assert_eq!(tail.time1, secs(7.0) + last.a);
				assert_eq!(tail.time2, secs(3.0) + last.b);
			}
		}
	}

	#[test]
	fn similarity_windows() {
		let path = linear_path(11, 10.0, 10.0);
		let config = PostProcess::DEFAULT.with_anchor_spacing(5);

		let mut seen = Vec::new();
		let mut f = |a: Window, b: Window| {
			seen.push((a, b));
			0.25
		};
		let matches = process(&path, &config, Some(&mut f));

		assert!(matches.iter().all(|m| m.similarity == 0.25));
		assert_eq!(seen.len(), 3);
		// Clipped at 0.
		assert_eq!(seen[0].0, Window { start: Duration::ZERO, length: secs(1.0) });
		// Centered on 5s.
		assert_eq!(seen[1].1, Window { start: secs(4.5), length: secs(1.0) });

		let matches = process(&path, &config, None);
		assert!(matches.iter().all(|m| m.similarity == 1.0));
	}

	#[test]
	fn linear_drift_end_to_end() {
		// 1000 points, (0, 0) -> (100s, 102s).
		let path = linear_path(1000, 100.0, 102.0);
		let config = PostProcess::DEFAULT.with_anchor_spacing(100).with_cues(false, false);
		let matches = process(&path, &config, None);

		// 0, 100, .., 900, 999
		assert_eq!(matches.len(), 11);
		assert_eq!(matches[0].offset(), 0.0);
		assert!((matches[10].offset() - 2.0).abs() < 1e-9);

		for pair in matches.windows(2) {
			assert!(pair[1].offset() > pair[0].offset());
			assert!(pair[1].time2 > pair[0].time2);
		}
		for m in &matches[1..10] {
			let expected = m.time1.as_secs_f64() * 0.02;
			assert!((m.offset() - expected).abs() < 0.01, "{} vs {expected}", m.offset());
		}
	}
}
