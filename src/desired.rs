//! The user-level request the resolver starts from

use std::{fs, path::Path};

use serde::{Deserialize, Serialize};

use crate::{
    error::{ParamError, Result},
    window::{WindowRepr, WindowType},
};

pub const DEFAULT_OVERLAP: f64 = 0.5;
pub const DEFAULT_LNA_GAIN: i32 = 16;
pub const DEFAULT_VGA_GAIN: i32 = 20;

/// What the operator asked for. Nothing here is validated until it is resolved.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawDesiredSpec")]
pub struct DesiredSpec {
    pub window_type: WindowType,
    /// Hz
    pub sample_rate: u32,
    /// Resolution bandwidth in Hz
    pub rbw: f64,
    /// Hz
    pub center_freq: u64,
    /// Hz
    pub span: u64,
    /// Fraction of each segment shared with the next, in [0, 1)
    pub overlap: f64,
    pub amp_enabled: bool,
    /// dB
    pub lna_gain: i32,
    /// dB
    pub vga_gain: i32,
    pub ppm_error: i32,
}

/// A desired spec as written on disk, before defaults are filled in
#[derive(Deserialize)]
struct RawDesiredSpec {
    window_type: Option<WindowRepr>,
    sample_rate: u32,
    rbw: f64,
    center_freq: u64,
    span: Option<u64>,
    #[serde(default = "default_overlap")]
    overlap: f64,
    #[serde(default)]
    amp_enabled: bool,
    #[serde(default = "default_lna_gain")]
    lna_gain: i32,
    #[serde(default = "default_vga_gain")]
    vga_gain: i32,
    #[serde(default)]
    ppm_error: i32,
}

impl TryFrom<RawDesiredSpec> for DesiredSpec {
    type Error = ParamError;

    fn try_from(raw: RawDesiredSpec) -> std::result::Result<Self, Self::Error> {
        let window_type = match raw.window_type {
            Some(repr) => WindowType::try_from(repr)?,
            None => WindowType::default(),
        };
        Ok(Self {
            window_type,
            sample_rate: raw.sample_rate,
            rbw: raw.rbw,
            center_freq: raw.center_freq,
            span: raw.span.unwrap_or(raw.sample_rate as u64),
            overlap: raw.overlap,
            amp_enabled: raw.amp_enabled,
            lna_gain: raw.lna_gain,
            vga_gain: raw.vga_gain,
            ppm_error: raw.ppm_error,
        })
    }
}

fn default_overlap() -> f64 {
    DEFAULT_OVERLAP
}

fn default_lna_gain() -> i32 {
    DEFAULT_LNA_GAIN
}

fn default_vga_gain() -> i32 {
    DEFAULT_VGA_GAIN
}

impl DesiredSpec {
    /// Specify the tuning and bandwidth, everything else takes defaults and is set with builder functions.
    /// The span defaults to the full sample rate.
    pub fn new(center_freq: u64, sample_rate: u32, rbw: f64) -> Self {
        Self {
            window_type: WindowType::default(),
            sample_rate,
            rbw,
            center_freq,
            span: sample_rate as u64,
            overlap: DEFAULT_OVERLAP,
            amp_enabled: false,
            lna_gain: DEFAULT_LNA_GAIN,
            vga_gain: DEFAULT_VGA_GAIN,
            ppm_error: 0,
        }
    }

    pub fn with_window(mut self, window_type: WindowType) -> Self {
        self.window_type = window_type;
        self
    }

    pub fn with_span(mut self, span: u64) -> Self {
        self.span = span;
        self
    }

    pub fn with_overlap(mut self, overlap: f64) -> Self {
        self.overlap = overlap;
        self
    }

    pub fn with_amp(mut self, amp_enabled: bool) -> Self {
        self.amp_enabled = amp_enabled;
        self
    }

    pub fn with_gains(mut self, lna_gain: i32, vga_gain: i32) -> Self {
        self.lna_gain = lna_gain;
        self.vga_gain = vga_gain;
        self
    }

    pub fn with_ppm_error(mut self, ppm_error: i32) -> Self {
        self.ppm_error = ppm_error;
        self
    }

    /// Parse a JSON desired spec. Windows may be given by numeric id or name, and a
    /// missing span defaults to the sample rate.
    pub fn from_json_str(json: &str) -> Result<Self> {
        // Go through the raw form so a bad window keeps its own error rather than a JSON one
        let raw: RawDesiredSpec = serde_json::from_str(json)?;
        DesiredSpec::try_from(raw)
    }

    /// Load a desired spec from a JSON file on disk
    pub fn load(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path)?;
        Self::from_json_str(&contents)
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use tempfile::NamedTempFile;

    use super::*;

    #[test]
    fn test_builder_defaults() {
        let d = DesiredSpec::new(100_000_000, 2_000_000, 1_000.0);
        assert_eq!(d.span, 2_000_000);
        assert_eq!(d.window_type, WindowType::Hann);
        assert_eq!(d.overlap, 0.5);
        assert!(!d.amp_enabled);
        assert_eq!((d.lna_gain, d.vga_gain, d.ppm_error), (16, 20, 0));
    }

    #[test]
    fn test_json_fills_defaults() {
        let d = DesiredSpec::from_json_str(
            r#"{"sample_rate": 2000000, "rbw": 1000, "center_freq": 100000000, "span": 2000000}"#,
        )
        .unwrap();
        assert_eq!(d, DesiredSpec::new(100_000_000, 2_000_000, 1_000.0));
    }

    #[test]
    fn test_json_numeric_window_id() {
        let d = DesiredSpec::from_json_str(
            r#"{"window_type": 1, "sample_rate": 2000000, "rbw": 1000, "center_freq": 100000000, "span": 2000000}"#,
        )
        .unwrap();
        assert_eq!(d.window_type, WindowType::Hann);
    }

    #[test]
    fn test_json_window_alias() {
        let d = DesiredSpec::from_json_str(
            r#"{"window_type": "hanning", "sample_rate": 2000000, "rbw": 1000, "center_freq": 0, "span": 0}"#,
        )
        .unwrap();
        assert_eq!(d.window_type, WindowType::Hann);
    }

    #[test]
    fn test_json_unknown_window_id() {
        let err = DesiredSpec::from_json_str(
            r#"{"window_type": 17, "sample_rate": 2000000, "rbw": 1000, "center_freq": 0, "span": 0}"#,
        )
        .unwrap_err();
        assert!(matches!(err, ParamError::UnknownWindow(17)));
        assert_eq!(err.status_code(), 4);
    }

    #[test]
    fn test_json_unknown_window_name() {
        let err = DesiredSpec::from_json_str(
            r#"{"window_type": "kaiser", "sample_rate": 2000000, "rbw": 1000, "center_freq": 0, "span": 0}"#,
        )
        .unwrap_err();
        assert_eq!(err.status_code(), 4);
    }

    #[test]
    fn test_json_span_defaults_to_sample_rate() {
        let d = DesiredSpec::from_json_str(
            r#"{"sample_rate": 10000000, "rbw": 500, "center_freq": 915000000}"#,
        )
        .unwrap();
        assert_eq!(d.span, 10_000_000);
    }

    #[test]
    fn test_serde_deserialize_matches_loader() {
        let json = r#"{"window_type": 2, "sample_rate": 1000000, "rbw": 100, "center_freq": 0}"#;
        let via_serde: DesiredSpec = serde_json::from_str(json).unwrap();
        assert_eq!(via_serde, DesiredSpec::from_json_str(json).unwrap());
        assert_eq!(via_serde.window_type, WindowType::Hamming);
    }

    #[test]
    fn test_json_missing_required_field() {
        let err = DesiredSpec::from_json_str(r#"{"sample_rate": 2000000}"#).unwrap_err();
        assert!(matches!(err, ParamError::Parse(_)));
        assert_eq!(err.status_code(), 9);
    }

    #[test]
    fn test_load_from_file() {
        let mut file = NamedTempFile::new().unwrap();
        write!(
            file,
            r#"{{
                "window_type": "blackman",
                "sample_rate": 10000000,
                "rbw": 500.0,
                "center_freq": 915000000,
                "span": 8000000,
                "overlap": 0.25,
                "amp_enabled": true,
                "lna_gain": 32,
                "vga_gain": 30,
                "ppm_error": -3
            }}"#
        )
        .unwrap();
        file.flush().unwrap();

        let d = DesiredSpec::load(file.path()).unwrap();
        let expected = DesiredSpec::new(915_000_000, 10_000_000, 500.0)
            .with_window(WindowType::Blackman)
            .with_span(8_000_000)
            .with_overlap(0.25)
            .with_amp(true)
            .with_gains(32, 30)
            .with_ppm_error(-3);
        assert_eq!(d, expected);
    }

    #[test]
    fn test_load_missing_file() {
        let err = DesiredSpec::load(Path::new("/nonexistent/desired.json")).unwrap_err();
        assert!(matches!(err, ParamError::Io(_)));
    }
}
