//! `realign` CLI binary.

//---------------------------------------------------------------------------------------------------- Use
use anyhow::{Context,Result};
use clap::Parser;
use env_logger::Env;
use log::info;
use std::{
	ops::ControlFlow,
	path::Path,
	time::Duration,
};
use realign::{
	align::{self,AlignmentPath,CorrespondencePoint,Match,MatchSource,TrackOffset,Window},
	config::{PostProcess,Profile,RenderConfig},
	render::{Driver,Progress,Varispeed},
	sink::{AudioSink,WavSink},
	source::{AudioSource,Crop,DecodedSource,MemorySource,duration_to_frames},
};

mod cli;
use cli::{Cli,Command,OffsetsCommand,WarpCommand};

//---------------------------------------------------------------------------------------------------- CSV rows
/// A point of an alignment path.
#[derive(serde::Deserialize,Debug)]
struct PathRow {
	time_a: f64,
	time_b: f64,
}

/// A fingerprint match.
#[derive(serde::Deserialize,Debug)]
struct MatchRow {
	time1: f64,
	time2: f64,
	ber:   f64,
}

/// A pairwise offset between two tracks.
#[derive(serde::Deserialize,Debug)]
struct OffsetRow {
	track_a: String,
	track_b: String,
	offset:  f64,
	ber:     f64,
}

fn read_csv<T: serde::de::DeserializeOwned>(path: &Path) -> Result<Vec<T>> {
	let mut reader = csv::ReaderBuilder::new()
		.trim(csv::Trim::All)
		.from_path(path)
		.with_context(|| format!("failed to open {}", path.display()))?;

	reader
		.deserialize()
		.collect::<Result<Vec<T>, csv::Error>>()
		.with_context(|| format!("failed to parse {}", path.display()))
}

//---------------------------------------------------------------------------------------------------- Main
fn main() -> Result<()> {
	env_logger::Builder::from_env(Env::default().default_filter_or("info")).init();

	match Cli::parse().command {
		Command::Warp(cmd)    => warp(cmd),
		Command::Offsets(cmd) => offsets(cmd),
	}
}

//---------------------------------------------------------------------------------------------------- Warp
fn warp(cmd: WarpCommand) -> Result<()> {
	let matches = if let Some(path) = cmd.alignment.path.as_deref() {
		matches_from_path(&cmd, path)?
	} else if let Some(path) = cmd.alignment.matches.as_deref() {
		matches_from_fingerprints(&cmd, path)?
	} else {
		unreachable!("clap requires one of --path/--matches");
	};

	let Some(first) = matches.first().copied() else {
		println!("no matches found");
		return Ok(());
	};
	info!("{} matches, first at {:?} -> {:?}", matches.len(), first.time1, first.time2);

	let warp = DecodedSource::open(&cmd.warp)
		.with_context(|| format!("failed to open {}", cmd.warp.display()))?;
	let source = Crop::starting_at(warp, first.time1);

	let profile = if cmd.speed { Profile::SPEED } else { Profile::DEFAULT };
	let mut renderer = Varispeed::new(source, profile)?;
	let mut sink = WavSink::create(&cmd.output, renderer.sample_rate(), renderer.channels())
		.with_context(|| format!("failed to create {}", cmd.output.display()))?;

	let config = RenderConfig::DEFAULT
		.with_profile(profile)
		.with_pad_start(!cmd.no_pad);

	let mut last_percent = 0;
	let report = Driver::new(config)
		.with_progress(|p: &Progress| {
			let percent = (p.fraction() * 100.0) as u32;
			if percent / 10 > last_percent / 10 {
				info!("{percent}% ({}/{} segments)", p.segment + 1, p.segments);
			}
			last_percent = percent;
			ControlFlow::Continue(())
		})
		.render(&matches, &mut renderer, &mut sink)?;
	sink.finalize()?;

	info!(
		"wrote {} frames ({:.2}s) to {}, {} segments, {} clamped, {} short",
		report.frames,
		report.frames as f64 / f64::from(renderer.sample_rate()),
		cmd.output.display(),
		report.segments,
		report.clamped,
		report.short_segments,
	);

	Ok(())
}

/// Post-process a dense alignment path.
fn matches_from_path(cmd: &WarpCommand, path: &Path) -> Result<Vec<Match>> {
	let points: Vec<CorrespondencePoint> = read_csv::<PathRow>(path)?
		.into_iter()
		.map(|row| CorrespondencePoint::from_secs_f64(row.time_a, row.time_b))
		.collect();
	let path = AlignmentPath::from_points(points, Duration::ZERO, Duration::ZERO);

	let config = PostProcess::DEFAULT
		.with_cues(cmd.cue_in, cmd.cue_out)
		.with_search_width(Duration::try_from_secs_f64(cmd.search_width).context("invalid --search-width")?)
		.with_anchor_spacing(cmd.anchor_spacing)
		.with_smoothing(!cmd.no_smoothing);

	if !cmd.similarity {
		return Ok(align::process(&path, &config, None));
	}

	let comparison = Mono::open(&cmd.comparison)?;
	let base       = Mono::open(&cmd.base)?;
	let mut correlate = |a: Window, b: Window| Mono::correlate(&comparison, a, &base, b);
	let score: &mut dyn FnMut(Window, Window) -> f32 = &mut correlate;
	Ok(align::process(&path, &config, Some(score)))
}

/// Filter and order sparse fingerprint matches.
fn matches_from_fingerprints(cmd: &WarpCommand, path: &Path) -> Result<Vec<Match>> {
	let rows  = read_csv::<MatchRow>(path)?;
	let total = rows.len();

	let matches: Vec<Match> = rows
		.into_iter()
		.filter(|row| row.ber <= cmd.ber_threshold)
		.map(|row| Match::new(
			Duration::try_from_secs_f64(row.time1).unwrap_or_default(),
			Duration::try_from_secs_f64(row.time2).unwrap_or_default(),
			(1.0 - row.ber) as f32,
			MatchSource::Fingerprint,
		))
		.collect();

	info!("{} of {total} fingerprint matches under BER {}", matches.len(), cmd.ber_threshold);
	Ok(align::refine(matches))
}

//---------------------------------------------------------------------------------------------------- Offsets
fn offsets(cmd: OffsetsCommand) -> Result<()> {
	let observations = read_csv::<OffsetRow>(&cmd.matches)?
		.into_iter()
		.filter(|row| row.ber <= cmd.ber_threshold)
		.map(|row| TrackOffset::new(row.track_a, row.track_b, row.offset));

	let Some(resolved) = align::resolve(observations) else {
		println!("no matches found");
		return Ok(());
	};

	info!("reference track: {}", resolved.reference);
	for (track, offset) in &resolved.offsets {
		println!("{track}\t{offset:.6}");
	}

	Ok(())
}

//---------------------------------------------------------------------------------------------------- Similarity
/// A decoded track mixed down to mono.
struct Mono {
	samples:     Vec<f32>,
	sample_rate: u32,
}

impl Mono {
	fn open(path: &Path) -> Result<Self> {
		let source = DecodedSource::open(path)
			.with_context(|| format!("failed to open {}", path.display()))?;
		let memory = MemorySource::collect(source)?;

		let channels = memory.channels();
		let samples  = memory
			.samples()
			.chunks_exact(channels)
			.map(|frame| frame.iter().sum::<f32>() / channels as f32)
			.collect();

		Ok(Self { samples, sample_rate: memory.sample_rate() })
	}

	fn window(&self, window: Window) -> &[f32] {
		let len   = self.samples.len();
		let start = duration_to_frames(window.start, self.sample_rate).min(len);
		let end   = (start + duration_to_frames(window.length, self.sample_rate)).min(len);
		&self.samples[start..end]
	}

	/// Zero-lag normalized cross-correlation of two windows, negative clamped to `0`.
	fn correlate(a: &Self, wa: Window, b: &Self, wb: Window) -> f32 {
		let (a, b) = (a.window(wa), b.window(wb));
		let len = a.len().min(b.len());
		if len == 0 {
			return 0.0;
		}

		let (a, b) = (&a[..len], &b[..len]);
		let mean_a = a.iter().sum::<f32>() / len as f32;
		let mean_b = b.iter().sum::<f32>() / len as f32;

		let (mut cov, mut var_a, mut var_b) = (0.0, 0.0, 0.0);
		for (x, y) in a.iter().zip(b) {
			let (x, y) = (x - mean_a, y - mean_b);
			cov   += x * y;
			var_a += x * x;
			var_b += y * y;
		}

		let norm = (var_a * var_b).sqrt();
		if norm <= f32::EPSILON {
			0.0
		} else {
			(cov / norm).clamp(0.0, 1.0)
		}
	}
}
