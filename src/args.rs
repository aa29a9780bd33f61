//! Argument parsing for running from the command line

use std::path::PathBuf;

use clap::Parser;
use num_traits::ToPrimitive;

use crate::{
    desired::DesiredSpec,
    error::{Result, STATUS_OK, STATUS_USAGE},
    window::WindowType,
};

#[derive(Parser, Debug)]
#[clap(author, version, about, long_about = None)]
pub struct Args {
    /// JSON desired spec to start from. Any flag given alongside it overrides the file
    #[clap(long, value_parser)]
    pub spec: Option<PathBuf>,
    /// Center frequency in Hz (float notation like 100e6 is accepted)
    #[clap(short, long, value_parser = parse_hz, required_unless_present = "spec")]
    pub freq: Option<u64>,
    /// Sample rate in Hz
    #[clap(short = 's', long, value_parser = parse_rate, required_unless_present = "spec")]
    pub rate: Option<u32>,
    /// Desired resolution bandwidth in Hz
    #[clap(short = 'w', long, value_parser, required_unless_present = "spec")]
    pub rbw: Option<f64>,
    /// Span in Hz, defaults to the sample rate
    #[clap(long, value_parser = parse_hz)]
    pub span: Option<u64>,
    /// Fraction of each FFT segment overlapping the next, in [0, 1)
    #[clap(short, long, value_parser)]
    pub overlap: Option<f64>,
    /// Window function, by name (hann, blackman_harris, ...) or numeric id
    #[clap(long, value_parser = parse_window)]
    pub window: Option<WindowType>,
    /// Enable the front-end RF amplifier
    #[clap(short, long, action)]
    pub amp: bool,
    /// Disable the front-end RF amplifier, even if the spec file enables it
    #[clap(long, action, conflicts_with = "amp")]
    pub no_amp: bool,
    /// LNA (IF) gain in dB
    #[clap(short, long, value_parser)]
    pub lna_gain: Option<i32>,
    /// VGA (baseband) gain in dB
    #[clap(short = 'g', long, value_parser)]
    pub vga_gain: Option<i32>,
    /// Frequency correction in parts per million
    #[clap(long, value_parser, allow_hyphen_values = true)]
    pub ppm: Option<i32>,
    /// Print the resolved configurations as JSON
    #[clap(long, action)]
    pub json: bool,
    /// Also print the hackrf_transfer command line, capturing to this path ("-" for stdout)
    #[clap(long, value_parser)]
    pub hackrf_output: Option<String>,
    #[clap(flatten)]
    pub verbose: clap_verbosity_flag::Verbosity,
}

impl Args {
    /// Layer the flags over the spec file (if any) to get the final desired spec
    pub fn desired_spec(&self) -> Result<DesiredSpec> {
        let mut desired = match &self.spec {
            Some(path) => DesiredSpec::load(path)?,
            // clap guarantees these when there's no spec file, zeros fail validation later
            None => DesiredSpec::new(
                self.freq.unwrap_or_default(),
                self.rate.unwrap_or_default(),
                self.rbw.unwrap_or_default(),
            ),
        };
        if let Some(freq) = self.freq {
            desired.center_freq = freq;
        }
        if let Some(rate) = self.rate {
            desired.sample_rate = rate;
        }
        if let Some(rbw) = self.rbw {
            desired.rbw = rbw;
        }
        if let Some(span) = self.span {
            desired.span = span;
        }
        if let Some(overlap) = self.overlap {
            desired.overlap = overlap;
        }
        if let Some(window) = self.window {
            desired.window_type = window;
        }
        if self.amp {
            desired.amp_enabled = true;
        }
        if self.no_amp {
            desired.amp_enabled = false;
        }
        if let Some(lna) = self.lna_gain {
            desired.lna_gain = lna;
        }
        if let Some(vga) = self.vga_gain {
            desired.vga_gain = vga;
        }
        if let Some(ppm) = self.ppm {
            desired.ppm_error = ppm;
        }
        Ok(desired)
    }
}

/// Match verbosity filter with tracing subscriber log levels
pub fn convert_filter(filter: log::LevelFilter) -> tracing_subscriber::filter::LevelFilter {
    match filter {
        log::LevelFilter::Off => tracing_subscriber::filter::LevelFilter::OFF,
        log::LevelFilter::Error => tracing_subscriber::filter::LevelFilter::ERROR,
        log::LevelFilter::Warn => tracing_subscriber::filter::LevelFilter::WARN,
        log::LevelFilter::Info => tracing_subscriber::filter::LevelFilter::INFO,
        log::LevelFilter::Debug => tracing_subscriber::filter::LevelFilter::DEBUG,
        log::LevelFilter::Trace => tracing_subscriber::filter::LevelFilter::TRACE,
    }
}

/// Exit status for a command line clap rejected. Help and version requests are not failures.
pub fn usage_status(err: &clap::Error) -> i32 {
    if err.use_stderr() {
        STATUS_USAGE
    } else {
        STATUS_OK
    }
}

/// Whole, non-negative Hz, written either as an integer or in float notation
fn parse_hz(s: &str) -> std::result::Result<u64, String> {
    let hz: f64 = s
        .trim()
        .parse()
        .map_err(|_| format!("'{}' is not a number", s))?;
    if hz.fract() != 0.0 {
        return Err(format!("'{}' is not a whole number of Hz", s));
    }
    hz.to_u64()
        .ok_or_else(|| format!("'{}' is out of range for a frequency", s))
}

fn parse_rate(s: &str) -> std::result::Result<u32, String> {
    let hz = parse_hz(s)?;
    u32::try_from(hz).map_err(|_| format!("sample rate {} Hz is too large", hz))
}

fn parse_window(s: &str) -> std::result::Result<WindowType, String> {
    s.parse().map_err(|e: crate::error::ParamError| e.to_string())
}
