//! # Media Probe
//!
//! Header-level inspection of input media. Nothing here decodes sample data
//! or pixels.
//!
//! Audio masters may be WAV, FLAC, AIFF or MP3. WAV is read with `hound`;
//! the other containers go through the `symphonia` demuxers. When a
//! container does not declare its frame count up front (a VBR MP3 without
//! a Xing header, say), packets are walked and their durations summed.

use std::fs::File;
use std::io;
use std::path::Path;

use symphonia::core::codecs::CODEC_TYPE_NULL;
use symphonia::core::errors::Error as ContainerError;
use symphonia::core::formats::{FormatOptions, FormatReader};
use symphonia::core::io::MediaSourceStream;
use symphonia::core::meta::MetadataOptions;
use symphonia::core::probe::Hint;

use crate::error::ProbeError;

/// Capability for reading media properties.
///
/// Pre-flight depends on this trait rather than on the decoders, so rules
/// can be exercised without real media files.
pub trait MediaProbe {
    /// Playback length of an audio file in seconds.
    fn audio_duration_secs(&self, path: &Path) -> Result<f64, ProbeError>;

    /// `(width, height)` of an image in pixels.
    fn image_dimensions(&self, path: &Path) -> Result<(u32, u32), ProbeError>;
}

/// Probe backed by the filesystem.
#[derive(Debug, Clone, Copy, Default)]
pub struct FileProbe;

impl MediaProbe for FileProbe {
    fn audio_duration_secs(&self, path: &Path) -> Result<f64, ProbeError> {
        let secs = if is_wav(path) {
            wav_duration_secs(path)?
        } else {
            container_duration_secs(path)?
        };
        tracing::debug!(path = %path.display(), secs, "probed audio");
        Ok(secs)
    }

    fn image_dimensions(&self, path: &Path) -> Result<(u32, u32), ProbeError> {
        let dims = image::image_dimensions(path).map_err(|source| ProbeError::Image {
            path: path.to_path_buf(),
            source,
        })?;
        tracing::debug!(path = %path.display(), width = dims.0, height = dims.1, "probed image");
        Ok(dims)
    }
}

fn is_wav(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("wav") || ext.eq_ignore_ascii_case("wave"))
}

fn wav_duration_secs(path: &Path) -> Result<f64, ProbeError> {
    let reader = hound::WavReader::open(path).map_err(|source| ProbeError::Wav {
        path: path.to_path_buf(),
        source,
    })?;
    let spec = reader.spec();
    if spec.sample_rate == 0 {
        return Err(ProbeError::ZeroSampleRate {
            path: path.to_path_buf(),
        });
    }
    // `duration` counts frames, i.e. samples per channel.
    Ok(f64::from(reader.duration()) / f64::from(spec.sample_rate))
}

fn container_duration_secs(path: &Path) -> Result<f64, ProbeError> {
    let container = |source: ContainerError| ProbeError::Container {
        path: path.to_path_buf(),
        source,
    };

    let file = File::open(path).map_err(|e| container(ContainerError::IoError(e)))?;
    let stream = MediaSourceStream::new(Box::new(file), Default::default());
    let mut hint = Hint::new();
    if let Some(ext) = path.extension().and_then(|ext| ext.to_str()) {
        hint.with_extension(ext);
    }
    let probed = symphonia::default::get_probe()
        .format(
            &hint,
            stream,
            &FormatOptions::default(),
            &MetadataOptions::default(),
        )
        .map_err(container)?;
    let mut format = probed.format;

    let (track_id, sample_rate, n_frames) = format
        .tracks()
        .iter()
        .find(|track| track.codec_params.codec != CODEC_TYPE_NULL)
        .map(|track| {
            (
                track.id,
                track.codec_params.sample_rate,
                track.codec_params.n_frames,
            )
        })
        .ok_or_else(|| ProbeError::NoAudioTrack {
            path: path.to_path_buf(),
        })?;

    let sample_rate = match sample_rate {
        Some(rate) if rate > 0 => rate,
        _ => {
            return Err(ProbeError::ZeroSampleRate {
                path: path.to_path_buf(),
            })
        }
    };
    let frames = match n_frames {
        Some(frames) => frames,
        None => count_frames(format.as_mut(), track_id).map_err(container)?,
    };
    Ok(frames as f64 / f64::from(sample_rate))
}

/// Sum packet durations for `track_id` until end of stream.
fn count_frames(format: &mut dyn FormatReader, track_id: u32) -> Result<u64, ContainerError> {
    let mut frames = 0u64;
    loop {
        match format.next_packet() {
            Ok(packet) if packet.track_id() == track_id => frames += packet.dur,
            Ok(_) => {}
            Err(ContainerError::IoError(e)) if e.kind() == io::ErrorKind::UnexpectedEof => {
                return Ok(frames)
            }
            Err(e) => return Err(e),
        }
    }
}
