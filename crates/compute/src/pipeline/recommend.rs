//! Mitigation actions for a record's reasons.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::reasons::{Reason, ReasonCategory};

/// A recommended mitigation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Action {
    #[serde(rename = "Limit external network access")]
    LimitNetworkAccess,
    #[serde(rename = "Disable USB ports")]
    DisableUsbPorts,
    #[serde(rename = "Reset credentials and review access rights")]
    ResetCredentials,
    #[serde(rename = "Audit file access permissions")]
    AuditFileAccess,
    /// Emitted alone when none of the reasons maps to an action.
    #[serde(rename = "No immediate action")]
    NoImmediateAction,
}

impl Action {
    pub fn label(&self) -> &'static str {
        match self {
            Action::LimitNetworkAccess => "Limit external network access",
            Action::DisableUsbPorts => "Disable USB ports",
            Action::ResetCredentials => "Reset credentials and review access rights",
            Action::AuditFileAccess => "Audit file access permissions",
            Action::NoImmediateAction => "No immediate action",
        }
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl ReasonCategory {
    /// Action for this category, if any.
    pub fn action(&self) -> Option<Action> {
        match self {
            ReasonCategory::Network => Some(Action::LimitNetworkAccess),
            ReasonCategory::RemovableMedia => Some(Action::DisableUsbPorts),
            ReasonCategory::UnauthorizedAccess => Some(Action::ResetCredentials),
            ReasonCategory::FileAccess => Some(Action::AuditFileAccess),
            ReasonCategory::Authentication => None,
        }
    }
}

/// Map reasons to actions, one per mapped reason, in reason order.
///
/// Never returns an empty list: with no mapped reason the result is
/// `[NoImmediateAction]`. Repeated actions are kept unless `dedupe` is set.
pub fn recommend(reasons: &[Reason], dedupe: bool) -> Vec<Action> {
    let mut actions: Vec<Action> = Vec::with_capacity(reasons.len());
    for action in reasons.iter().filter_map(|r| r.category().action()) {
        if dedupe && actions.contains(&action) {
            continue;
        }
        actions.push(action);
    }

    if actions.is_empty() {
        actions.push(Action::NoImmediateAction);
    }
    actions
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_reasons_yield_sentinel() {
        assert_eq!(recommend(&[], false), vec![Action::NoImmediateAction]);
        assert_eq!(Action::NoImmediateAction.label(), "No immediate action");
    }

    #[test]
    fn network_reason_limits_network() {
        let actions = recommend(&[Reason::HighNetworkUsage], false);
        assert_eq!(actions, vec![Action::LimitNetworkAccess]);
        assert_eq!(actions[0].to_string(), "Limit external network access");
    }

    #[test]
    fn actions_follow_reason_order() {
        let reasons = [
            Reason::HighNetworkUsage,
            Reason::UsbDeviceUsed,
            Reason::UnauthorizedAccess,
            Reason::HighFileAccess,
        ];
        assert_eq!(
            recommend(&reasons, false),
            vec![
                Action::LimitNetworkAccess,
                Action::DisableUsbPorts,
                Action::ResetCredentials,
                Action::AuditFileAccess,
            ]
        );
    }

    #[test]
    fn unmapped_reasons_only_yield_sentinel() {
        assert_eq!(
            recommend(&[Reason::RemoteLogin, Reason::ExcessiveLogins], false),
            vec![Action::NoImmediateAction]
        );
    }

    #[test]
    fn unmapped_reasons_are_skipped_alongside_mapped_ones() {
        assert_eq!(
            recommend(&[Reason::RemoteLogin, Reason::HighFileAccess], false),
            vec![Action::AuditFileAccess]
        );
    }

    #[test]
    fn duplicates_kept_unless_deduped() {
        let reasons = [Reason::HighNetworkUsage, Reason::HighNetworkUsage];
        assert_eq!(recommend(&reasons, false).len(), 2);
        assert_eq!(recommend(&reasons, true), vec![Action::LimitNetworkAccess]);
    }

    #[test]
    fn serializes_as_label() {
        let json = serde_json::to_string(&recommend(&[], false)).unwrap();
        assert_eq!(json, r#"["No immediate action"]"#);
    }
}
