//! End to end: alignment path -> matches -> stretched output.

use std::time::Duration;
use realign::{
	align::{self,AlignmentPath,CorrespondencePoint,Match},
	config::{PostProcess,Profile,RenderConfig},
	render::{Driver,Varispeed},
	sink::{AudioSink,MemorySink},
	source::MemorySource,
};

const SAMPLE_RATE: u32 = 8000;

/// `n` points from `(0, 0)` to `(len_a, len_b)`.
fn path(n: usize, len_a: f64, len_b: f64) -> AlignmentPath {
	let last = (n - 1) as f64;
	let points = (0..n)
		.map(|i| {
			let t = i as f64 / last;
			CorrespondencePoint::from_secs_f64(t * len_a, t * len_b)
		})
		.collect();
	AlignmentPath::from_points(points, Duration::ZERO, Duration::ZERO)
}

fn sine(secs: f64) -> MemorySource {
	let frames = (secs * f64::from(SAMPLE_RATE)) as usize;
	let samples = (0..frames)
		.map(|i| (i as f32 * 440.0 * std::f32::consts::TAU / SAMPLE_RATE as f32).sin() * 0.5)
		.collect();
	MemorySource::new(samples, SAMPLE_RATE, 1).unwrap()
}

fn render(matches: &[Match], profile: Profile) -> (MemorySink, realign::render::Report) {
	let mut renderer = Varispeed::new(sine(11.0), profile).unwrap();
	let mut sink = MemorySink::new(SAMPLE_RATE, 1).unwrap();

	let config = RenderConfig::DEFAULT.with_profile(profile);
	let report = Driver::new(config).render(matches, &mut renderer, &mut sink).unwrap();
	sink.finalize().unwrap();

	(sink, report)
}

#[test]
fn drifting_path() {
	let matches = align::process(&path(1000, 10.0, 10.2), &PostProcess::DEFAULT, None);

	assert!(matches.len() > 2);
	assert!((matches[0].offset()).abs() < 1e-6);
	assert!((matches.last().unwrap().offset() - 0.2).abs() < 1e-3);
	for pair in matches.windows(2) {
		assert!(pair[0].time2 < pair[1].time2);
		assert!(pair[0].offset() <= pair[1].offset() + 1e-9);
	}

	for profile in [Profile::DEFAULT, Profile::SPEED] {
		let (sink, report) = render(&matches, profile);

		// The source runs past the last match, so every segment is filled.
		assert_eq!(sink.frames(), 81_600, "{profile:?}");
		assert_eq!(report.short_segments, 0);

		assert_eq!(report.segments, matches.len() - 1);
		assert_eq!(report.frames, sink.frames());
		assert_eq!(report.padded, 0);
		assert_eq!(report.clamped, 0);
		assert!(!report.cancelled);

		// Stretched, not silent.
		assert!(sink.samples().iter().any(|s| s.abs() > 0.1));
	}
}

#[test]
fn nothing_to_render() {
	let matches = align::process(&path(1000, 10.0, 10.2), &PostProcess::DEFAULT, None);

	for matches in [&[][..], &matches[..1]] {
		let (sink, report) = render(matches, Profile::DEFAULT);
		assert_eq!(sink.frames(), 0);
		assert_eq!(report, realign::render::Report::default());
	}
}
