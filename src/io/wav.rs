//! WAV loading and writing.
//!
//! Runs on the control thread only. Loading produces a [`SampleSource`] ready
//! to hand to [`EngineHandle::load_source`](crate::EngineHandle::load_source).

use std::io::{Read, Seek, Write};
use std::path::Path;

use hound::{SampleFormat, WavReader, WavSpec, WavWriter};
use log::debug;
use thiserror::Error;

use crate::player::SampleSource;

#[derive(Debug, Error)]
pub enum LoadError {
    #[error("failed to read wav: {0}")]
    Wav(#[from] hound::Error),
    #[error("unsupported wav format: {bits}-bit {format:?}")]
    UnsupportedFormat { bits: u16, format: SampleFormat },
    #[error("wav file contains no audio")]
    Empty,
}

/// Load a WAV file into an interleaved f32 source.
///
/// Integer formats are scaled to [-1, 1].
pub fn load(path: impl AsRef<Path>) -> Result<SampleSource, LoadError> {
    let path = path.as_ref();
    let reader = WavReader::open(path)?;
    let source = read(reader)?;
    debug!(
        "decoded {}: {} frames, {} ch, {} Hz",
        path.display(),
        source.frames(),
        source.channels(),
        source.sample_rate()
    );
    Ok(source)
}

/// Decode from any reader, e.g. an in-memory buffer.
pub fn read<R: Read>(reader: WavReader<R>) -> Result<SampleSource, LoadError> {
    let spec = reader.spec();

    let samples: Vec<f32> = match (spec.sample_format, spec.bits_per_sample) {
        (SampleFormat::Float, 32) => reader
            .into_samples::<f32>()
            .collect::<Result<_, _>>()?,
        (SampleFormat::Int, bits @ 8..=32) => {
            let scale = 1.0 / (1i64 << (bits - 1)) as f32;
            reader
                .into_samples::<i32>()
                .map(|s| s.map(|v| v as f32 * scale))
                .collect::<Result<_, _>>()?
        }
        (format, bits) => return Err(LoadError::UnsupportedFormat { bits, format }),
    };

    if samples.is_empty() {
        return Err(LoadError::Empty);
    }

    Ok(SampleSource::from_interleaved(
        samples,
        spec.channels as usize,
        spec.sample_rate as f32,
    ))
}

/// Interleaved audio read back from a WAV file, for offline processing.
#[derive(Debug, Clone)]
pub struct WavAudio {
    pub samples: Vec<f32>,
    pub channels: usize,
    pub sample_rate: u32,
}

/// Load a WAV file as plain interleaved samples.
pub fn load_audio(path: impl AsRef<Path>) -> Result<WavAudio, LoadError> {
    let source = load(path)?;
    Ok(WavAudio {
        channels: source.channels(),
        sample_rate: source.sample_rate() as u32,
        samples: source.samples().to_vec(),
    })
}

/// Write interleaved samples as 32-bit float WAV.
pub fn write(
    path: impl AsRef<Path>,
    samples: &[f32],
    channels: usize,
    sample_rate: u32,
) -> Result<(), hound::Error> {
    let writer = WavWriter::create(path, float_spec(channels, sample_rate))?;
    write_samples(writer, samples)
}

fn float_spec(channels: usize, sample_rate: u32) -> WavSpec {
    WavSpec {
        channels: channels.max(1) as u16,
        sample_rate,
        bits_per_sample: 32,
        sample_format: SampleFormat::Float,
    }
}

fn write_samples<W: Write + Seek>(mut writer: WavWriter<W>, samples: &[f32]) -> Result<(), hound::Error> {
    for &s in samples {
        writer.write_sample(s)?;
    }
    writer.finalize()
}
