//! Mixer error types

use thiserror::Error;

/// Why a single track's audio source could not be loaded.
///
/// Recovered locally: the track is excluded and the session continues with
/// whatever did load.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceLoadError {
    #[error("audio source blocked by a cross-origin restriction")]
    CrossOriginBlocked,

    #[error("audio source not found")]
    NotFound,

    #[error("audio source did not become playable within the load timeout")]
    Timeout,

    #[error("audio source format is not supported")]
    Unsupported,
}

/// Load-error classification exposed to the UI.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum LoadErrorKind {
    #[default]
    None,
    CrossOriginBlocked,
    NotFound,
    Timeout,
    Unsupported,
}

impl From<SourceLoadError> for LoadErrorKind {
    fn from(e: SourceLoadError) -> Self {
        match e {
            SourceLoadError::CrossOriginBlocked => Self::CrossOriginBlocked,
            SourceLoadError::NotFound => Self::NotFound,
            SourceLoadError::Timeout => Self::Timeout,
            SourceLoadError::Unsupported => Self::Unsupported,
        }
    }
}

impl LoadErrorKind {
    /// Reduce the causes of a fully failed load to one remedy-oriented kind.
    ///
    /// Cross-origin wins over everything; a uniform timeout stays a timeout;
    /// otherwise an unsupported format beats a missing file.
    pub fn summarize(causes: &[SourceLoadError]) -> Self {
        if causes.is_empty() {
            Self::None
        } else if causes.contains(&SourceLoadError::CrossOriginBlocked) {
            Self::CrossOriginBlocked
        } else if causes.iter().all(|c| *c == SourceLoadError::Timeout) {
            Self::Timeout
        } else if causes.contains(&SourceLoadError::Unsupported) {
            Self::Unsupported
        } else {
            Self::NotFound
        }
    }
}

/// Session-level failures. Surfaced once, never retried.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EngineError {
    #[error("none of the {attempted} audio sources could be loaded ({cause:?})")]
    AllSourcesFailed {
        cause: LoadErrorKind,
        attempted: usize,
    },

    #[error("audio engine unavailable: {0}")]
    EngineInit(String),
}

// HTML MediaError codes
pub const MEDIA_ERR_DECODE: u16 = 3;
pub const MEDIA_ERR_SRC_NOT_SUPPORTED: u16 = 4;

/// Classify a media-element failure from its error code and message.
///
/// Browsers report a blocked cross-origin fetch and a 404 with the same
/// "source not supported" code, so the message is checked first.
pub fn classify_media_error(code: Option<u16>, message: &str) -> SourceLoadError {
    let msg = message.to_ascii_lowercase();
    if msg.contains("cors")
        || msg.contains("cross-origin")
        || msg.contains("networkerror")
        || msg.contains("securityerror")
    {
        return SourceLoadError::CrossOriginBlocked;
    }
    if msg.contains("timeout") {
        return SourceLoadError::Timeout;
    }
    match code {
        Some(MEDIA_ERR_DECODE) => SourceLoadError::Unsupported,
        Some(MEDIA_ERR_SRC_NOT_SUPPORTED)
            if msg.contains("format") || msg.contains("decode") || msg.contains("codec") =>
        {
            SourceLoadError::Unsupported
        }
        _ => SourceLoadError::NotFound,
    }
}
