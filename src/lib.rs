//! Acquisition parameter resolution for an SDR spectrum sensor.
//!
//! A [`DesiredSpec`] (RBW, span, tuning, gains, overlap) goes in, and three
//! configurations come out: [`RadioConfig`] for the radio driver,
//! [`PsdConfig`] for the Welch PSD engine and [`RingBufferConfig`] for the
//! raw sample ring.
//!
//! ```
//! use sensor_params::{resolve_standard, DesiredSpec, WindowType};
//!
//! let desired = DesiredSpec::new(100_000_000, 2_000_000, 1_000.0).with_window(WindowType::Hann);
//! let (radio, psd, ring) = resolve_standard(&desired).unwrap().into_parts();
//! assert_eq!(psd.nperseg, 4096);
//! assert_eq!(psd.noverlap, 2048);
//! assert_eq!(radio.center_freq, 100_000_000);
//! assert_eq!(ring.rb_size, 8_000_000);
//! ```

pub mod args;
pub mod complex;
pub mod config;
pub mod desired;
pub mod error;
pub mod resolve;
pub mod window;

pub use config::{PsdConfig, RadioConfig, RingBufferConfig};
pub use desired::DesiredSpec;
pub use error::{ParamError, Result, STATUS_OK, STATUS_USAGE};
pub use resolve::{resolve, resolve_standard, Resolution};
pub use window::{EnbwProvider, StandardWindows, WindowType};
