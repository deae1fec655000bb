//! Severity scores and their canonical bands.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Upper bounds of the severity bands, in band order.
///
/// A score belongs to the first band whose bound it does not exceed, so `0.0`
/// is [`SeverityBand::None`], `(0, 2]` is `Low`, `(2, 5]` is `Medium`,
/// `(5, 7]` is `High` and `(7, 10]` is `Critical`.
pub const SEVERITY_BREAKPOINTS: [f64; 5] = [0.0, 2.0, 5.0, 7.0, 10.0];

/// Highest severity score.
pub const MAX_SEVERITY: f64 = 10.0;

/// Canonical severity band
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, JsonSchema,
)]
pub enum SeverityBand {
    None,
    Low,
    Medium,
    High,
    Critical,
}

impl SeverityBand {
    const ORDER: [Self; 5] = [
        Self::None,
        Self::Low,
        Self::Medium,
        Self::High,
        Self::Critical,
    ];

    /// Classify a score already clamped to `[0, 10]`.
    #[must_use]
    pub fn classify(score: f64) -> Self {
        SEVERITY_BREAKPOINTS
            .iter()
            .position(|bound| score <= *bound)
            .map_or(Self::Critical, |index| Self::ORDER[index])
    }

    /// Get display label
    #[must_use]
    pub const fn label(&self) -> &'static str {
        match self {
            Self::None => "None",
            Self::Low => "Low",
            Self::Medium => "Medium",
            Self::High => "High",
            Self::Critical => "Critical",
        }
    }
}

impl std::fmt::Display for SeverityBand {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// A severity score in `[0, 10]` together with its band.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct Severity {
    score: f64,
    band: SeverityBand,
}

impl Severity {
    /// Create a severity, clamping the score to `[0, 10]`.
    ///
    /// NaN is treated as `0`.
    #[must_use]
    pub fn new(score: f64) -> Self {
        let score = if score.is_nan() {
            0.0
        } else {
            score.clamp(0.0, MAX_SEVERITY)
        };
        Self {
            score,
            band: SeverityBand::classify(score),
        }
    }

    /// Create a severity from the protocol's tenths encoding (`75` is `7.5`).
    #[must_use]
    pub fn from_tenths(tenths: f64) -> Self {
        Self::new(tenths / 10.0)
    }

    #[must_use]
    pub const fn score(&self) -> f64 {
        self.score
    }

    #[must_use]
    pub const fn band(&self) -> SeverityBand {
        self.band
    }
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:.1} ({})", self.score, self.band)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_band_breakpoints() {
        assert_eq!(SeverityBand::classify(0.0), SeverityBand::None);
        assert_eq!(SeverityBand::classify(0.1), SeverityBand::Low);
        assert_eq!(SeverityBand::classify(2.0), SeverityBand::Low);
        assert_eq!(SeverityBand::classify(2.1), SeverityBand::Medium);
        assert_eq!(SeverityBand::classify(5.0), SeverityBand::Medium);
        assert_eq!(SeverityBand::classify(6.9), SeverityBand::High);
        assert_eq!(SeverityBand::classify(7.5), SeverityBand::Critical);
        assert_eq!(SeverityBand::classify(10.0), SeverityBand::Critical);
    }

    #[test]
    fn test_clamping() {
        assert_eq!(Severity::new(-1.0).score(), 0.0);
        assert_eq!(Severity::new(12.0).score(), 10.0);
        assert_eq!(Severity::new(f64::NAN).band(), SeverityBand::None);
        assert_eq!(Severity::from_tenths(75.0).score(), 7.5);
    }

    #[test]
    fn test_display() {
        assert_eq!(Severity::new(5.0).to_string(), "5.0 (Medium)");
    }
}
