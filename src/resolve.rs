//! Turn a [`DesiredSpec`] into the radio, PSD and ring buffer configurations.
//!
//! This is the only place numeric policy lives: how long an FFT segment has to
//! be to reach the requested resolution bandwidth, and how much raw sample
//! storage the ring needs. Everything is validated up front so no division
//! ever sees a zero or a NaN, and no partially filled output escapes on error.

use num_traits::ToPrimitive;
use serde::Serialize;
use tracing::{debug, warn};

use crate::{
    config::{PsdConfig, RadioConfig, RingBufferConfig},
    desired::DesiredSpec,
    error::{ParamError, Result},
    window::{EnbwProvider, StandardWindows},
};

/// Shortest segment the PSD engine accepts
pub const MIN_NPERSEG: usize = 2;
/// Longest segment we will ask the PSD engine for (2^30 points)
pub const MAX_NPERSEG: usize = 1 << 30;

/// Everything a successful resolution produces
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct Resolution {
    pub radio: RadioConfig,
    pub psd: PsdConfig,
    pub ring: RingBufferConfig,
    /// ENBW factor the provider reported for the chosen window
    pub enbw: f64,
}

impl Resolution {
    pub fn into_parts(self) -> (RadioConfig, PsdConfig, RingBufferConfig) {
        (self.radio, self.psd, self.ring)
    }

    /// Resolution bandwidth the chosen segment length delivers (Hz), never coarser than requested
    /// unless the segment was clamped to [`MIN_NPERSEG`]
    pub fn achieved_rbw(&self) -> f64 {
        self.psd.resolution_bandwidth(self.enbw)
    }
}

/// Resolve using the built-in window table
pub fn resolve_standard(desired: &DesiredSpec) -> Result<Resolution> {
    resolve(desired, &StandardWindows)
}

pub fn resolve<P>(desired: &DesiredSpec, provider: &P) -> Result<Resolution>
where
    P: EnbwProvider + ?Sized,
{
    validate(desired)?;

    let window = desired.window_type;
    let enbw = provider
        .enbw_factor(window)
        .ok_or(ParamError::MissingEnbw(window))?;
    if !enbw.is_finite() || enbw < 1.0 {
        return Err(ParamError::InvalidEnbw {
            window,
            factor: enbw,
        });
    }

    let required = enbw * desired.sample_rate as f64 / desired.rbw;
    let nperseg = segment_length(required)?;
    let noverlap = overlap_samples(nperseg, desired.overlap);

    let resolution = Resolution {
        radio: RadioConfig::from(desired),
        psd: PsdConfig {
            window_type: window,
            sample_rate: desired.sample_rate,
            nperseg,
            noverlap,
        },
        ring: RingBufferConfig::for_sample_rate(desired.sample_rate),
        enbw,
    };
    debug!(
        %window,
        enbw,
        required,
        nperseg,
        noverlap,
        rb_size = resolution.ring.rb_size,
        "Resolved acquisition parameters"
    );
    Ok(resolution)
}

fn validate(desired: &DesiredSpec) -> Result<()> {
    if desired.sample_rate == 0 {
        return Err(ParamError::InvalidSampleRate);
    }
    if !desired.rbw.is_finite() || desired.rbw <= 0.0 {
        return Err(ParamError::InvalidRbw(desired.rbw));
    }
    // NaN falls outside the range too
    if !(0.0..1.0).contains(&desired.overlap) {
        return Err(ParamError::InvalidOverlap(desired.overlap));
    }
    if desired.span > desired.sample_rate as u64 {
        warn!(
            requested_span = desired.span,
            sample_rate = desired.sample_rate,
            "Requested span is wider than the sample rate can capture"
        );
    }
    Ok(())
}

/// Smallest power of two no shorter than `required`, floored at [`MIN_NPERSEG`]
pub fn segment_length(required: f64) -> Result<usize> {
    if !required.is_finite() || required > MAX_NPERSEG as f64 {
        return Err(ParamError::SegmentTooLarge { required });
    }
    // Powers of two are whole, so rounding up first doesn't change the answer,
    // and an exact power of two maps to itself
    let whole = required
        .ceil()
        .to_usize()
        .ok_or(ParamError::SegmentTooLarge { required })?;
    if whole < MIN_NPERSEG {
        warn!(
            required,
            min = MIN_NPERSEG,
            "Requested RBW is coarser than one bin, using the minimum segment length"
        );
    }
    Ok(whole.next_power_of_two().max(MIN_NPERSEG))
}

/// `floor(nperseg * overlap)`, kept strictly below `nperseg` (zero for an empty segment)
pub fn overlap_samples(nperseg: usize, overlap: f64) -> usize {
    ((nperseg as f64 * overlap).floor() as usize).min(nperseg.saturating_sub(1))
}
