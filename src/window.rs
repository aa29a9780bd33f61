//! Window identifiers and their equivalent noise bandwidth (ENBW)
//!
//! | id | Window         | ENBW (bins) |
//! |----|----------------|-------------|
//! | 0  | Rectangular    | 1.0000      |
//! | 1  | Hann           | 1.5000      |
//! | 2  | Hamming        | 1.3628      |
//! | 3  | Blackman       | 1.7268      |
//! | 4  | BlackmanHarris | 2.0044      |
//! | 5  | FlatTop        | 3.7702      |
//!
//! The resolver never reads this table directly, it asks an [`EnbwProvider`].
//! [`StandardWindows`] serves the table above, but any closure or
//! `HashMap<WindowType, f64>` can stand in for it.

use std::{collections::HashMap, fmt, str::FromStr};

use serde::{Deserialize, Serialize};

use crate::error::ParamError;

/// Window function applied by the PSD engine to each segment
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", try_from = "WindowRepr")]
pub enum WindowType {
    Rectangular,
    #[default]
    Hann,
    Hamming,
    Blackman,
    BlackmanHarris,
    FlatTop,
}

impl WindowType {
    pub const ALL: [WindowType; 6] = [
        WindowType::Rectangular,
        WindowType::Hann,
        WindowType::Hamming,
        WindowType::Blackman,
        WindowType::BlackmanHarris,
        WindowType::FlatTop,
    ];

    /// Stable numeric id shared with the PSD engine
    pub const fn id(self) -> u8 {
        match self {
            WindowType::Rectangular => 0,
            WindowType::Hann => 1,
            WindowType::Hamming => 2,
            WindowType::Blackman => 3,
            WindowType::BlackmanHarris => 4,
            WindowType::FlatTop => 5,
        }
    }

    pub const fn name(self) -> &'static str {
        match self {
            WindowType::Rectangular => "rectangular",
            WindowType::Hann => "hann",
            WindowType::Hamming => "hamming",
            WindowType::Blackman => "blackman",
            WindowType::BlackmanHarris => "blackman_harris",
            WindowType::FlatTop => "flat_top",
        }
    }

    /// Equivalent noise bandwidth in bins
    pub const fn enbw(self) -> f64 {
        match self {
            WindowType::Rectangular => 1.0,
            WindowType::Hann => 1.5,
            WindowType::Hamming => 1.3628,
            WindowType::Blackman => 1.7268,
            WindowType::BlackmanHarris => 2.0044,
            WindowType::FlatTop => 3.7702,
        }
    }
}

impl fmt::Display for WindowType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl TryFrom<u8> for WindowType {
    type Error = ParamError;

    fn try_from(id: u8) -> Result<Self, Self::Error> {
        WindowType::ALL
            .into_iter()
            .find(|w| w.id() == id)
            .ok_or(ParamError::UnknownWindow(id))
    }
}

impl FromStr for WindowType {
    type Err = ParamError;

    /// Accepts either the numeric id or the name ("hann", "hanning", "blackman-harris", ...)
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if let Ok(id) = s.parse::<u8>() {
            return WindowType::try_from(id);
        }
        let normalized = s.to_ascii_lowercase().replace(['-', ' '], "_");
        match normalized.as_str() {
            "hanning" => return Ok(WindowType::Hann),
            "rect" | "boxcar" => return Ok(WindowType::Rectangular),
            "flattop" => return Ok(WindowType::FlatTop),
            "blackmanharris" => return Ok(WindowType::BlackmanHarris),
            _ => {}
        }
        WindowType::ALL
            .into_iter()
            .find(|w| w.name() == normalized)
            .ok_or_else(|| ParamError::UnknownWindowName(s.to_owned()))
    }
}

/// How a window is written in a desired spec file: numeric id or any name [`FromStr`] accepts
#[derive(Clone, Debug, Deserialize)]
#[serde(untagged)]
pub(crate) enum WindowRepr {
    Id(u8),
    Name(String),
}

impl TryFrom<WindowRepr> for WindowType {
    type Error = ParamError;

    fn try_from(repr: WindowRepr) -> Result<Self, Self::Error> {
        match repr {
            WindowRepr::Id(id) => WindowType::try_from(id),
            WindowRepr::Name(name) => name.parse(),
        }
    }
}

/// Source of ENBW factors for the resolver
pub trait EnbwProvider {
    /// `None` when the provider has no entry for `window`
    fn enbw_factor(&self, window: WindowType) -> Option<f64>;
}

/// The built-in ENBW table
#[derive(Clone, Copy, Debug, Default)]
pub struct StandardWindows;

impl EnbwProvider for StandardWindows {
    fn enbw_factor(&self, window: WindowType) -> Option<f64> {
        Some(window.enbw())
    }
}

impl<F> EnbwProvider for F
where
    F: Fn(WindowType) -> Option<f64>,
{
    fn enbw_factor(&self, window: WindowType) -> Option<f64> {
        self(window)
    }
}

impl EnbwProvider for HashMap<WindowType, f64> {
    fn enbw_factor(&self, window: WindowType) -> Option<f64> {
        self.get(&window).copied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ids_round_trip() {
        for w in WindowType::ALL {
            assert_eq!(WindowType::try_from(w.id()).unwrap(), w);
        }
        assert!(matches!(
            WindowType::try_from(6),
            Err(ParamError::UnknownWindow(6))
        ));
    }

    #[test]
    fn test_hann_is_id_one() {
        assert_eq!(WindowType::try_from(1).unwrap(), WindowType::Hann);
        assert_eq!(StandardWindows.enbw_factor(WindowType::Hann), Some(1.5));
    }

    #[test]
    fn test_enbw_at_least_one() {
        for w in WindowType::ALL {
            assert!(w.enbw() >= 1.0, "{} has ENBW {}", w, w.enbw());
        }
    }

    #[test]
    fn test_parse_names_and_ids() {
        assert_eq!("hann".parse::<WindowType>().unwrap(), WindowType::Hann);
        assert_eq!("Hanning".parse::<WindowType>().unwrap(), WindowType::Hann);
        assert_eq!("3".parse::<WindowType>().unwrap(), WindowType::Blackman);
        assert_eq!(
            "blackman-harris".parse::<WindowType>().unwrap(),
            WindowType::BlackmanHarris
        );
        assert_eq!("flattop".parse::<WindowType>().unwrap(), WindowType::FlatTop);
        assert!(matches!(
            "kaiser".parse::<WindowType>(),
            Err(ParamError::UnknownWindowName(_))
        ));
        assert!(matches!(
            "17".parse::<WindowType>(),
            Err(ParamError::UnknownWindow(17))
        ));
    }

    #[test]
    fn test_closure_and_table_providers() {
        let only_rect = |w: WindowType| (w == WindowType::Rectangular).then_some(1.0);
        assert_eq!(only_rect.enbw_factor(WindowType::Rectangular), Some(1.0));
        assert_eq!(only_rect.enbw_factor(WindowType::Hann), None);

        let table = HashMap::from([(WindowType::Hamming, 1.36)]);
        assert_eq!(table.enbw_factor(WindowType::Hamming), Some(1.36));
        assert_eq!(table.enbw_factor(WindowType::Blackman), None);
    }

    #[test]
    fn test_serde_uses_snake_case_names() {
        let json = serde_json::to_string(&WindowType::BlackmanHarris).unwrap();
        assert_eq!(json, "\"blackman_harris\"");
        let w: WindowType = serde_json::from_str("\"flat_top\"").unwrap();
        assert_eq!(w, WindowType::FlatTop);
    }

    #[test]
    fn test_deserialize_ids_and_aliases() {
        let w: WindowType = serde_json::from_str("1").unwrap();
        assert_eq!(w, WindowType::Hann);
        let w: WindowType = serde_json::from_str("\"hanning\"").unwrap();
        assert_eq!(w, WindowType::Hann);
        assert!(serde_json::from_str::<WindowType>("17").is_err());
    }

    #[test]
    fn test_default_is_hann() {
        assert_eq!(WindowType::default(), WindowType::Hann);
    }
}
