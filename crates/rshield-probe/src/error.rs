//! Errors from reading media headers.

use std::path::PathBuf;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ProbeError {
    /// The `.wav` file is not a readable WAV stream.
    #[error("cannot read WAV audio {}: {source}", .path.display())]
    Wav {
        path: PathBuf,
        #[source]
        source: hound::Error,
    },

    /// The audio container (FLAC, AIFF, MP3) could not be opened or read.
    #[error("cannot read audio {}: {source}", .path.display())]
    Container {
        path: PathBuf,
        #[source]
        source: symphonia::core::errors::Error,
    },

    /// The container holds no audio track.
    #[error("audio {} has no audio track", .path.display())]
    NoAudioTrack { path: PathBuf },

    /// The audio header declares no sample rate, or zero.
    #[error("audio {} has no usable sample rate", .path.display())]
    ZeroSampleRate { path: PathBuf },

    /// The image is missing, unsupported, or its header is corrupt.
    #[error("cannot read image {}: {source}", .path.display())]
    Image {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },
}
