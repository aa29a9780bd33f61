//! The three configurations handed to downstream subsystems

use serde::{Deserialize, Serialize};

use crate::{
    complex::BYTES_PER_SAMPLE,
    desired::DesiredSpec,
    error::{ParamError, Result},
    window::WindowType,
};

/// Seconds of raw capture the ring holds: one being written, one of slack for the consumer
pub const RING_SECONDS: u64 = 2;

/// Front-end settings for the radio driver. Values are passed through untouched;
/// hardware-specific scaling is the driver's job.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RadioConfig {
    pub sample_rate: u32,
    pub center_freq: u64,
    pub amp_enabled: bool,
    pub lna_gain: i32,
    pub vga_gain: i32,
    pub ppm_error: i32,
}

impl From<&DesiredSpec> for RadioConfig {
    fn from(desired: &DesiredSpec) -> Self {
        Self {
            sample_rate: desired.sample_rate,
            center_freq: desired.center_freq,
            amp_enabled: desired.amp_enabled,
            lna_gain: desired.lna_gain,
            vga_gain: desired.vga_gain,
            ppm_error: desired.ppm_error,
        }
    }
}

impl RadioConfig {
    /// Arguments for a `hackrf_transfer` receive session writing raw I/Q to `output` ("-" for stdout).
    /// `hackrf_transfer` has no frequency correction flag, so `ppm_error` is left to the consumer.
    pub fn hackrf_transfer_args(&self, output: &str) -> Vec<String> {
        vec![
            "-r".to_owned(),
            output.to_owned(),
            "-f".to_owned(),
            self.center_freq.to_string(),
            "-s".to_owned(),
            self.sample_rate.to_string(),
            "-a".to_owned(),
            u8::from(self.amp_enabled).to_string(),
            "-l".to_owned(),
            self.lna_gain.to_string(),
            "-g".to_owned(),
            self.vga_gain.to_string(),
        ]
    }
}

/// Segmenting parameters for the Welch PSD engine
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PsdConfig {
    pub window_type: WindowType,
    pub sample_rate: u32,
    /// Samples per FFT segment, always a power of two
    pub nperseg: usize,
    /// Samples shared between consecutive segments, always < nperseg
    pub noverlap: usize,
}

impl PsdConfig {
    /// Samples between the starts of consecutive segments
    pub fn hop(&self) -> usize {
        self.nperseg - self.noverlap
    }

    /// The resolution bandwidth this segment length actually achieves (Hz)
    pub fn resolution_bandwidth(&self, enbw: f64) -> f64 {
        enbw * self.sample_rate as f64 / self.nperseg as f64
    }
}

/// Sizing for the raw sample ring between the radio and the PSD engine
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RingBufferConfig {
    /// Bytes in one second of raw capture
    pub total_bytes: u64,
    /// Ring capacity in bytes
    pub rb_size: u64,
}

impl RingBufferConfig {
    pub const fn for_sample_rate(sample_rate: u32) -> Self {
        let total_bytes = sample_rate as u64 * BYTES_PER_SAMPLE;
        Self {
            total_bytes,
            rb_size: total_bytes * RING_SECONDS,
        }
    }

    /// Ring capacity in raw samples
    pub fn capacity_samples(&self) -> u64 {
        self.rb_size / BYTES_PER_SAMPLE
    }

    /// Allocate the byte ring this config describes
    pub fn allocate(&self) -> Result<(rtrb::Producer<u8>, rtrb::Consumer<u8>)> {
        let capacity =
            usize::try_from(self.rb_size).map_err(|_| ParamError::RingTooLarge(self.rb_size))?;
        Ok(rtrb::RingBuffer::new(capacity))
    }
}
