//! CVSS base vector decomposition.
//!
//! Vectors starting with `CVSS:3` are read as CVSS v3.x
//! (`CVSS:3.1/AV:N/AC:L/PR:N/UI:N/S:U/C:H/I:H/A:H`), everything else as a
//! CVSS v2 base vector (`AV:N/AC:L/Au:N/C:P/I:P/A:P`, optionally wrapped in
//! parentheses). Unknown or missing metric codes leave the field `None`.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

const CVSS_V3_PREFIX: &str = "CVSS:3";

macro_rules! metric_enum {
    ($(#[$doc:meta])* $name:ident { $($variant:ident = $code:literal => $label:literal),+ $(,)? }) => {
        $(#[$doc])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
        pub enum $name {
            $($variant),+
        }

        impl $name {
            /// Map a single-letter metric code.
            #[must_use]
            pub fn from_code(code: &str) -> Option<Self> {
                match code {
                    $($code => Some(Self::$variant),)+
                    _ => None,
                }
            }

            /// Get display label
            #[must_use]
            pub const fn label(&self) -> &'static str {
                match self {
                    $(Self::$variant => $label),+
                }
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(self.label())
            }
        }
    };
}

metric_enum!(
    /// CVSS v3 attack vector
    AttackVector { Network = "N" => "Network", AdjacentNetwork = "A" => "Adjacent Network", Local = "L" => "Local", Physical = "P" => "Physical" }
);
metric_enum!(
    /// CVSS v2 access vector
    AccessVector { Local = "L" => "Local", AdjacentNetwork = "A" => "Adjacent Network", Network = "N" => "Network" }
);
metric_enum!(
    /// CVSS v3 attack complexity
    AttackComplexity { Low = "L" => "Low", High = "H" => "High" }
);
metric_enum!(
    /// CVSS v2 access complexity
    AccessComplexity { High = "H" => "High", Medium = "M" => "Medium", Low = "L" => "Low" }
);
metric_enum!(
    /// CVSS v2 authentication
    Authentication { Multiple = "M" => "Multiple", Single = "S" => "Single", None = "N" => "None" }
);
metric_enum!(
    /// CVSS v3 privileges required
    PrivilegesRequired { None = "N" => "None", Low = "L" => "Low", High = "H" => "High" }
);
metric_enum!(
    /// CVSS v3 user interaction
    UserInteraction { None = "N" => "None", Required = "R" => "Required" }
);
metric_enum!(
    /// CVSS v3 scope
    Scope { Unchanged = "U" => "Unchanged", Changed = "C" => "Changed" }
);
metric_enum!(
    /// CVSS v3 confidentiality, integrity and availability impact
    ImpactV3 { High = "H" => "High", Low = "L" => "Low", None = "N" => "None" }
);
metric_enum!(
    /// CVSS v2 confidentiality, integrity and availability impact
    ImpactV2 { None = "N" => "None", Partial = "P" => "Partial", Complete = "C" => "Complete" }
);

/// Decomposed CVSS v2 base metrics
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct CvssV2Metrics {
    pub access_vector: Option<AccessVector>,
    pub access_complexity: Option<AccessComplexity>,
    pub authentication: Option<Authentication>,
    pub confidentiality_impact: Option<ImpactV2>,
    pub integrity_impact: Option<ImpactV2>,
    pub availability_impact: Option<ImpactV2>,
    /// Base score, when every base metric is known
    pub base_score: Option<f64>,
}

/// Decomposed CVSS v3 base metrics
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct CvssV3Metrics {
    pub attack_vector: Option<AttackVector>,
    pub attack_complexity: Option<AttackComplexity>,
    pub privileges_required: Option<PrivilegesRequired>,
    pub user_interaction: Option<UserInteraction>,
    pub scope: Option<Scope>,
    pub confidentiality_impact: Option<ImpactV3>,
    pub integrity_impact: Option<ImpactV3>,
    pub availability_impact: Option<ImpactV3>,
    /// Base score (v3.1 formula), when every base metric is known
    pub base_score: Option<f64>,
}

/// Decomposed CVSS base vector
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(tag = "version", rename_all = "lowercase")]
pub enum CvssMetrics {
    V2(CvssV2Metrics),
    V3(CvssV3Metrics),
}

impl CvssMetrics {
    /// Base score if all base metrics were present.
    #[must_use]
    pub const fn base_score(&self) -> Option<f64> {
        match self {
            Self::V2(m) => m.base_score,
            Self::V3(m) => m.base_score,
        }
    }
}

/// Decompose a CVSS base vector string.
#[must_use]
pub fn parse_cvss_vector(vector: &str) -> CvssMetrics {
    let vector = vector.trim();
    if vector.starts_with(CVSS_V3_PREFIX) {
        CvssMetrics::V3(parse_v3(vector))
    } else {
        CvssMetrics::V2(parse_v2(vector.trim_start_matches('(').trim_end_matches(')')))
    }
}

/// Look up the code of a metric among the slash-separated segments.
fn metric<'a>(vector: &'a str, name: &str) -> Option<&'a str> {
    vector.split('/').find_map(|segment| {
        let (key, value) = segment.split_once(':')?;
        (key.trim() == name).then(|| value.trim())
    })
}

fn parse_v2(vector: &str) -> CvssV2Metrics {
    let mut metrics = CvssV2Metrics {
        access_vector: metric(vector, "AV").and_then(AccessVector::from_code),
        access_complexity: metric(vector, "AC").and_then(AccessComplexity::from_code),
        authentication: metric(vector, "Au").and_then(Authentication::from_code),
        confidentiality_impact: metric(vector, "C").and_then(ImpactV2::from_code),
        integrity_impact: metric(vector, "I").and_then(ImpactV2::from_code),
        availability_impact: metric(vector, "A").and_then(ImpactV2::from_code),
        base_score: None,
    };
    metrics.base_score = v2_base_score(&metrics);
    metrics
}

fn parse_v3(vector: &str) -> CvssV3Metrics {
    let mut metrics = CvssV3Metrics {
        attack_vector: metric(vector, "AV").and_then(AttackVector::from_code),
        attack_complexity: metric(vector, "AC").and_then(AttackComplexity::from_code),
        privileges_required: metric(vector, "PR").and_then(PrivilegesRequired::from_code),
        user_interaction: metric(vector, "UI").and_then(UserInteraction::from_code),
        scope: metric(vector, "S").and_then(Scope::from_code),
        confidentiality_impact: metric(vector, "C").and_then(ImpactV3::from_code),
        integrity_impact: metric(vector, "I").and_then(ImpactV3::from_code),
        availability_impact: metric(vector, "A").and_then(ImpactV3::from_code),
        base_score: None,
    };
    metrics.base_score = v3_base_score(&metrics);
    metrics
}

fn v2_base_score(m: &CvssV2Metrics) -> Option<f64> {
    let av: f64 = match m.access_vector? {
        AccessVector::Local => 0.395,
        AccessVector::AdjacentNetwork => 0.646,
        AccessVector::Network => 1.0,
    };
    let ac: f64 = match m.access_complexity? {
        AccessComplexity::High => 0.35,
        AccessComplexity::Medium => 0.61,
        AccessComplexity::Low => 0.71,
    };
    let au: f64 = match m.authentication? {
        Authentication::Multiple => 0.45,
        Authentication::Single => 0.56,
        Authentication::None => 0.704,
    };
    let impact_weight = |impact: ImpactV2| -> f64 {
        match impact {
            ImpactV2::None => 0.0,
            ImpactV2::Partial => 0.275,
            ImpactV2::Complete => 0.660,
        }
    };
    let c = impact_weight(m.confidentiality_impact?);
    let i = impact_weight(m.integrity_impact?);
    let a = impact_weight(m.availability_impact?);

    let impact = 10.41 * (1.0 - (1.0 - c) * (1.0 - i) * (1.0 - a));
    let exploitability = 20.0 * av * ac * au;
    let f_impact = if impact == 0.0 { 0.0 } else { 1.176 };
    let score = (0.6 * impact + 0.4 * exploitability - 1.5) * f_impact;
    Some((score * 10.0).round() / 10.0)
}

fn v3_base_score(m: &CvssV3Metrics) -> Option<f64> {
    let scope_changed = m.scope? == Scope::Changed;
    let av: f64 = match m.attack_vector? {
        AttackVector::Network => 0.85,
        AttackVector::AdjacentNetwork => 0.62,
        AttackVector::Local => 0.55,
        AttackVector::Physical => 0.2,
    };
    let ac: f64 = match m.attack_complexity? {
        AttackComplexity::Low => 0.77,
        AttackComplexity::High => 0.44,
    };
    let pr: f64 = match (m.privileges_required?, scope_changed) {
        (PrivilegesRequired::None, _) => 0.85,
        (PrivilegesRequired::Low, false) => 0.62,
        (PrivilegesRequired::Low, true) => 0.68,
        (PrivilegesRequired::High, false) => 0.27,
        (PrivilegesRequired::High, true) => 0.5,
    };
    let ui: f64 = match m.user_interaction? {
        UserInteraction::None => 0.85,
        UserInteraction::Required => 0.62,
    };
    let impact_weight = |impact: ImpactV3| -> f64 {
        match impact {
            ImpactV3::High => 0.56,
            ImpactV3::Low => 0.22,
            ImpactV3::None => 0.0,
        }
    };
    let c = impact_weight(m.confidentiality_impact?);
    let i = impact_weight(m.integrity_impact?);
    let a = impact_weight(m.availability_impact?);

    let iss = 1.0 - (1.0 - c) * (1.0 - i) * (1.0 - a);
    let impact = if scope_changed {
        7.52 * (iss - 0.029) - 3.25 * (iss - 0.02).powi(15)
    } else {
        6.42 * iss
    };
    if impact <= 0.0 {
        return Some(0.0);
    }
    let exploitability = 8.22 * av * ac * pr * ui;
    let score = if scope_changed {
        (1.08 * (impact + exploitability)).min(10.0)
    } else {
        (impact + exploitability).min(10.0)
    };
    Some(round_up(score))
}

/// CVSS v3.1 round-up to one decimal, robust against float noise.
fn round_up(value: f64) -> f64 {
    let int_input = (value * 100_000.0).round() as i64;
    if int_input % 10_000 == 0 {
        int_input as f64 / 100_000.0
    } else {
        ((int_input / 10_000) + 1) as f64 / 10.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_v3_full_network_vector() {
        let CvssMetrics::V3(m) = parse_cvss_vector("CVSS:3.1/AV:N/AC:L/PR:N/UI:N/S:U/C:H/I:H/A:H")
        else {
            panic!("expected v3 metrics");
        };
        assert_eq!(m.attack_vector, Some(AttackVector::Network));
        assert_eq!(m.attack_vector.map(|v| v.label()), Some("Network"));
        assert_eq!(m.attack_complexity, Some(AttackComplexity::Low));
        assert_eq!(m.confidentiality_impact, Some(ImpactV3::High));
        assert_eq!(m.integrity_impact, Some(ImpactV3::High));
        assert_eq!(m.availability_impact, Some(ImpactV3::High));
        assert_eq!(m.base_score, Some(9.8));
    }

    #[test]
    fn test_v3_scope_changed_score() {
        let metrics = parse_cvss_vector("CVSS:3.0/AV:N/AC:L/PR:L/UI:N/S:C/C:L/I:L/A:N");
        assert_eq!(metrics.base_score(), Some(6.4));
    }

    #[test]
    fn test_v2_vector() {
        let CvssMetrics::V2(m) = parse_cvss_vector("AV:N/AC:L/Au:N/C:P/I:P/A:P") else {
            panic!("expected v2 metrics");
        };
        assert_eq!(m.access_vector, Some(AccessVector::Network));
        assert_eq!(m.authentication, Some(Authentication::None));
        assert_eq!(m.integrity_impact, Some(ImpactV2::Partial));
        assert_eq!(m.base_score, Some(7.5));
    }

    #[test]
    fn test_v2_complete_impact_score() {
        let metrics = parse_cvss_vector("AV:N/AC:L/Au:N/C:C/I:C/A:C");
        assert_eq!(metrics.base_score(), Some(10.0));
    }

    #[test]
    fn test_v2_vector_in_parentheses() {
        let metrics = parse_cvss_vector("(AV:N/AC:M/Au:N/C:N/I:N/A:N)");
        assert_eq!(metrics.base_score(), Some(0.0));
    }

    #[test]
    fn test_unknown_codes_are_none() {
        let CvssMetrics::V3(m) = parse_cvss_vector("CVSS:3.1/AV:X/AC:L/PR:Q") else {
            panic!("expected v3 metrics");
        };
        assert_eq!(m.attack_vector, None);
        assert_eq!(m.attack_complexity, Some(AttackComplexity::Low));
        assert_eq!(m.privileges_required, None);
        assert_eq!(m.scope, None);
        assert_eq!(m.base_score, None);
    }

    #[test]
    fn test_garbage_is_empty_v2() {
        assert_eq!(
            parse_cvss_vector("not a vector"),
            CvssMetrics::V2(CvssV2Metrics::default())
        );
        assert_eq!(parse_cvss_vector(""), CvssMetrics::V2(CvssV2Metrics::default()));
    }
}
