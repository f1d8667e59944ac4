//! Write 32-bit float WAV files with `hound`.

//---------------------------------------------------------------------------------------------------- use
use std::{
	fs::File,
	io::BufWriter,
	path::Path,
};
use hound::{SampleFormat,WavSpec,WavWriter};
use crate::{
	error::SinkError,
	sink::{AudioSink,sink::check_span},
};

//---------------------------------------------------------------------------------------------------- WavSink
/// A WAV file on disk, 32-bit float samples.
///
/// The header is patched with the final length on
/// [`AudioSink::finalize`]. Dropping the sink without
/// finalizing also closes it, but errors are lost.
pub struct WavSink {
	writer:      Option<WavWriter<BufWriter<File>>>,
	sample_rate: u32,
	channels:    usize,
}

impl std::fmt::Debug for WavSink {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_struct("WavSink")
			.field("sample_rate", &self.sample_rate)
			.field("channels", &self.channels)
			.field("finalized", &self.writer.is_none())
			.finish()
	}
}

impl WavSink {
	/// Create (or truncate) the file at `path`.
	///
	/// # Errors
	/// `sample_rate` is `0`, `channels` is `0` or over [`u16::MAX`],
	/// or the file could not be created.
	pub fn create(path: impl AsRef<Path>, sample_rate: u32, channels: usize) -> Result<Self, SinkError> {
		if sample_rate == 0 {
			return Err(SinkError::SampleRate(sample_rate));
		}
		let wav_channels = match u16::try_from(channels) {
			Ok(c) if c > 0 => c,
			_ => return Err(SinkError::Channels(channels)),
		};

		let spec = WavSpec {
			channels: wav_channels,
			sample_rate,
			bits_per_sample: 32,
			sample_format: SampleFormat::Float,
		};

		Ok(Self {
			writer: Some(WavWriter::create(path, spec)?),
			sample_rate,
			channels,
		})
	}
}

impl AudioSink for WavSink {
	fn sample_rate(&self) -> u32 {
		self.sample_rate
	}

	fn channels(&self) -> usize {
		self.channels
	}

	fn write(&mut self, samples: &[f32]) -> Result<(), SinkError> {
		check_span(samples.len(), self.channels)?;
		let Some(writer) = self.writer.as_mut() else {
			return Err(SinkError::Finalized);
		};
		for sample in samples {
			writer.write_sample(*sample)?;
		}
		Ok(())
	}

	fn finalize(&mut self) -> Result<(), SinkError> {
		match self.writer.take() {
			Some(writer) => Ok(writer.finalize()?),
			None => Err(SinkError::Finalized),
		}
	}
}
