use std::fmt;

use serde::{Deserialize, Serialize};

use riskscope_rules::{StatusScheme, StatusThresholds};

/// Qualitative risk status derived from a normalized score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum RiskStatus {
    #[serde(rename = "normal")]
    Normal,
    #[serde(rename = "risk")]
    Risk,
    #[serde(rename = "high risk")]
    HighRisk,
    #[serde(rename = "suspicious")]
    Suspicious,
}

impl RiskStatus {
    pub const ALL: [RiskStatus; 4] = [
        RiskStatus::Normal,
        RiskStatus::Risk,
        RiskStatus::HighRisk,
        RiskStatus::Suspicious,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            RiskStatus::Normal => "normal",
            RiskStatus::Risk => "risk",
            RiskStatus::HighRisk => "high risk",
            RiskStatus::Suspicious => "suspicious",
        }
    }
}

impl fmt::Display for RiskStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Classify a normalized score, highest band first.
///
/// Comparisons are strict: a score equal to a threshold stays in the band
/// below it (score 50 with `suspicious: 50` is high risk, 51 is suspicious).
pub fn classify(score: i64, thresholds: &StatusThresholds) -> RiskStatus {
    match thresholds.scheme {
        StatusScheme::Graded => {
            if score > thresholds.suspicious {
                RiskStatus::Suspicious
            } else if score > thresholds.high_risk {
                RiskStatus::HighRisk
            } else if score > thresholds.risk {
                RiskStatus::Risk
            } else {
                RiskStatus::Normal
            }
        }
        StatusScheme::Binary => {
            if score > thresholds.suspicious {
                RiskStatus::Suspicious
            } else {
                RiskStatus::Normal
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn boundary_scores() {
        let t = StatusThresholds::default();
        assert_eq!(classify(51, &t), RiskStatus::Suspicious);
        assert_eq!(classify(50, &t), RiskStatus::HighRisk);
        assert_eq!(classify(41, &t), RiskStatus::HighRisk);
        assert_eq!(classify(40, &t), RiskStatus::Risk);
        assert_eq!(classify(26, &t), RiskStatus::Risk);
        assert_eq!(classify(25, &t), RiskStatus::Normal);
        assert_eq!(classify(5, &t), RiskStatus::Normal);
    }

    #[test]
    fn total_and_monotone_over_range() {
        let t = StatusThresholds::default();
        let statuses: Vec<RiskStatus> = (5..=55).map(|s| classify(s, &t)).collect();
        assert!(statuses.windows(2).all(|w| w[0] <= w[1]));
        for status in RiskStatus::ALL {
            assert!(statuses.contains(&status), "{status} never assigned");
        }
    }

    #[test]
    fn binary_scheme() {
        let t = StatusThresholds {
            scheme: StatusScheme::Binary,
            ..Default::default()
        };
        assert_eq!(classify(51, &t), RiskStatus::Suspicious);
        assert_eq!(classify(50, &t), RiskStatus::Normal);
        assert_eq!(classify(45, &t), RiskStatus::Normal);
    }

    #[test]
    fn serializes_with_spaces() {
        assert_eq!(serde_json::to_string(&RiskStatus::HighRisk).unwrap(), "\"high risk\"");
        assert_eq!(RiskStatus::HighRisk.to_string(), "high risk");
        let parsed: RiskStatus = serde_json::from_str("\"suspicious\"").unwrap();
        assert_eq!(parsed, RiskStatus::Suspicious);
    }
}
