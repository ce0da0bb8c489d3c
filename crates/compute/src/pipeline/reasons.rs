//! Rule-based explanations derived from a record's raw feature values.

use std::fmt;

use serde::{Deserialize, Serialize};

use riskscope_core::schema::{
    FILES_ACCESSED, LOGIN_COUNT, NETWORK_ACTIVITY, REMOTE_LOGIN, UNAUTHORIZED_ACCESS, USB_USAGE,
};
use riskscope_core::Record;

/// Network volume above which usage is reported as high.
pub const HIGH_NETWORK_THRESHOLD: f64 = 1000.0;
/// File access count above which access is reported as high.
pub const HIGH_FILE_ACCESS_THRESHOLD: f64 = 50.0;
/// Login count above which logins are reported as excessive.
pub const EXCESSIVE_LOGIN_THRESHOLD: f64 = 25.0;

/// A human-readable reason attached to a scored record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Reason {
    #[serde(rename = "High network usage")]
    HighNetworkUsage,
    #[serde(rename = "USB device used")]
    UsbDeviceUsed,
    #[serde(rename = "Unauthorized access attempts")]
    UnauthorizedAccess,
    #[serde(rename = "High file access")]
    HighFileAccess,
    #[serde(rename = "Remote login detected")]
    RemoteLogin,
    #[serde(rename = "Excessive login attempts")]
    ExcessiveLogins,
}

/// What a reason is about; drives the recommended action.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ReasonCategory {
    Network,
    RemovableMedia,
    UnauthorizedAccess,
    FileAccess,
    Authentication,
}

impl Reason {
    pub fn label(&self) -> &'static str {
        match self {
            Reason::HighNetworkUsage => "High network usage",
            Reason::UsbDeviceUsed => "USB device used",
            Reason::UnauthorizedAccess => "Unauthorized access attempts",
            Reason::HighFileAccess => "High file access",
            Reason::RemoteLogin => "Remote login detected",
            Reason::ExcessiveLogins => "Excessive login attempts",
        }
    }

    pub fn category(&self) -> ReasonCategory {
        match self {
            Reason::HighNetworkUsage => ReasonCategory::Network,
            Reason::UsbDeviceUsed => ReasonCategory::RemovableMedia,
            Reason::UnauthorizedAccess => ReasonCategory::UnauthorizedAccess,
            Reason::HighFileAccess => ReasonCategory::FileAccess,
            Reason::RemoteLogin | Reason::ExcessiveLogins => ReasonCategory::Authentication,
        }
    }
}

impl fmt::Display for Reason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// One predicate over one raw feature value.
struct ReasonRule {
    reason: Reason,
    column: &'static str,
    holds: fn(f64) -> bool,
}

/// Evaluation order is output order.
const REASON_RULES: [ReasonRule; 6] = [
    ReasonRule {
        reason: Reason::HighNetworkUsage,
        column: NETWORK_ACTIVITY,
        holds: |v| v > HIGH_NETWORK_THRESHOLD,
    },
    ReasonRule {
        reason: Reason::UsbDeviceUsed,
        column: USB_USAGE,
        holds: |v| v >= 1.0,
    },
    ReasonRule {
        reason: Reason::UnauthorizedAccess,
        column: UNAUTHORIZED_ACCESS,
        holds: |v| v > 0.0,
    },
    ReasonRule {
        reason: Reason::HighFileAccess,
        column: FILES_ACCESSED,
        holds: |v| v > HIGH_FILE_ACCESS_THRESHOLD,
    },
    ReasonRule {
        reason: Reason::RemoteLogin,
        column: REMOTE_LOGIN,
        holds: |v| v >= 1.0,
    },
    ReasonRule {
        reason: Reason::ExcessiveLogins,
        column: LOGIN_COUNT,
        holds: |v| v > EXCESSIVE_LOGIN_THRESHOLD,
    },
];

/// Evaluate every rule against `record`, in fixed order.
///
/// Absent columns read as zero, so they never trigger a reason. Each rule
/// fires at most once, so a record never carries the same reason twice.
pub fn derive_reasons(record: &Record) -> Vec<Reason> {
    REASON_RULES
        .iter()
        .filter(|rule| (rule.holds)(record.value_or_zero(rule.column)))
        .map(|rule| rule.reason)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn all_four_core_reasons_in_order() {
        let record = Record::new("u1")
            .with(NETWORK_ACTIVITY, 5000.0)
            .with(USB_USAGE, 1.0)
            .with(UNAUTHORIZED_ACCESS, 2.0)
            .with(FILES_ACCESSED, 100.0);
        let labels: Vec<&str> = derive_reasons(&record).iter().map(Reason::label).collect();
        assert_eq!(
            labels,
            vec![
                "High network usage",
                "USB device used",
                "Unauthorized access attempts",
                "High file access",
            ]
        );
    }

    #[test]
    fn quiet_record_has_no_reasons() {
        let record = Record::new("u2")
            .with(NETWORK_ACTIVITY, 120.0)
            .with(USB_USAGE, 0.0)
            .with(UNAUTHORIZED_ACCESS, 0.0)
            .with(FILES_ACCESSED, 12.0)
            .with(REMOTE_LOGIN, 0.0)
            .with(LOGIN_COUNT, 3.0);
        assert!(derive_reasons(&record).is_empty());
    }

    #[test]
    fn thresholds_are_strict() {
        let record = Record::new("u3")
            .with(NETWORK_ACTIVITY, HIGH_NETWORK_THRESHOLD)
            .with(FILES_ACCESSED, HIGH_FILE_ACCESS_THRESHOLD)
            .with(LOGIN_COUNT, EXCESSIVE_LOGIN_THRESHOLD);
        assert!(derive_reasons(&record).is_empty());

        let record = Record::new("u4")
            .with(NETWORK_ACTIVITY, HIGH_NETWORK_THRESHOLD + 1.0)
            .with(LOGIN_COUNT, EXCESSIVE_LOGIN_THRESHOLD + 1.0);
        assert_eq!(
            derive_reasons(&record),
            vec![Reason::HighNetworkUsage, Reason::ExcessiveLogins]
        );
    }

    #[test]
    fn authentication_reasons_follow_core_reasons() {
        let record = Record::new("u5")
            .with(REMOTE_LOGIN, 1.0)
            .with(LOGIN_COUNT, 40.0)
            .with(USB_USAGE, 1.0);
        assert_eq!(
            derive_reasons(&record),
            vec![Reason::UsbDeviceUsed, Reason::RemoteLogin, Reason::ExcessiveLogins]
        );
    }

    #[test]
    fn serializes_as_label() {
        let json = serde_json::to_string(&[Reason::UsbDeviceUsed, Reason::RemoteLogin]).unwrap();
        assert_eq!(json, r#"["USB device used","Remote login detected"]"#);
    }
}
