//! Error taxonomy for parameter resolution and spec loading

use thiserror::Error;

use crate::window::WindowType;

/// Status code reported for a successful resolution
pub const STATUS_OK: i32 = 0;

/// Exit status for a malformed command line (sysexits `EX_USAGE`), kept clear of the resolver codes
pub const STATUS_USAGE: i32 = 64;

pub type Result<T> = std::result::Result<T, ParamError>;

#[derive(Error, Debug)]
pub enum ParamError {
    #[error("sample rate must be greater than zero")]
    InvalidSampleRate,

    #[error("resolution bandwidth must be a positive, finite number of Hz (got {0})")]
    InvalidRbw(f64),

    #[error("overlap must lie in [0, 1) (got {0})")]
    InvalidOverlap(f64),

    #[error("unknown window id {0}")]
    UnknownWindow(u8),

    #[error("unknown window name '{0}'")]
    UnknownWindowName(String),

    /// The provider had no entry for a window it was asked about
    #[error("no ENBW factor available for the {0} window")]
    MissingEnbw(WindowType),

    #[error("ENBW factor for the {window} window must be finite and >= 1 (got {factor})")]
    InvalidEnbw { window: WindowType, factor: f64 },

    #[error("required segment length {required} exceeds the largest supported FFT")]
    SegmentTooLarge { required: f64 },

    #[error("ring buffer of {0} bytes does not fit in memory on this platform")]
    RingTooLarge(u64),

    #[error("failed to read desired spec: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse desired spec: {0}")]
    Parse(#[from] serde_json::Error),
}

impl ParamError {
    /// Non-zero status code handed back to callers (and used as the CLI exit code)
    pub fn status_code(&self) -> i32 {
        match self {
            ParamError::InvalidSampleRate => 1,
            ParamError::InvalidRbw(_) => 2,
            ParamError::InvalidOverlap(_) => 3,
            ParamError::UnknownWindow(_)
            | ParamError::UnknownWindowName(_)
            | ParamError::MissingEnbw(_) => 4,
            ParamError::InvalidEnbw { .. } => 5,
            ParamError::SegmentTooLarge { .. } => 6,
            ParamError::RingTooLarge(_) => 7,
            ParamError::Io(_) => 8,
            ParamError::Parse(_) => 9,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_codes_are_nonzero() {
        let errors = [
            ParamError::InvalidSampleRate,
            ParamError::InvalidRbw(0.0),
            ParamError::InvalidOverlap(1.0),
            ParamError::UnknownWindow(42),
            ParamError::MissingEnbw(WindowType::Hann),
            ParamError::InvalidEnbw {
                window: WindowType::Hann,
                factor: 0.5,
            },
            ParamError::SegmentTooLarge { required: 1e12 },
            ParamError::RingTooLarge(u64::MAX),
        ];
        for e in errors {
            assert_ne!(e.status_code(), STATUS_OK, "{}", e);
            assert_ne!(e.status_code(), STATUS_USAGE, "{}", e);
        }
    }

    #[test]
    fn test_unknown_window_variants_share_a_code() {
        assert_eq!(
            ParamError::UnknownWindow(9).status_code(),
            ParamError::MissingEnbw(WindowType::FlatTop).status_code()
        );
    }
}
