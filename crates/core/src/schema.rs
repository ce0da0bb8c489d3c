//! Dataset column schema (v1).
//!
//! The order of [`FEATURE_COLUMNS`] is the order the scoring model sees the
//! features in. Changing it changes every fitted forest.

/// Dataset schema version, reported by the health endpoint.
pub const SCHEMA_VERSION: u32 = 1;

/// Identifier column. Unique and stable per monitored account.
pub const ID_COLUMN: &str = "user_id";

/// Optional address column, passed through to results when present.
pub const IP_COLUMN: &str = "ip_address";

pub const FILES_ACCESSED: &str = "files_accessed";
pub const LOGIN_COUNT: &str = "login_count";
pub const REMOTE_LOGIN: &str = "remote_login";
pub const USB_USAGE: &str = "usb_usage";
pub const NETWORK_ACTIVITY: &str = "network_activity";
pub const UNAUTHORIZED_ACCESS: &str = "unauthorized_access";

/// Behavioral feature columns, in model order.
pub const FEATURE_COLUMNS: [&str; 6] = [
    FILES_ACCESSED,
    LOGIN_COUNT,
    REMOTE_LOGIN,
    USB_USAGE,
    NETWORK_ACTIVITY,
    UNAUTHORIZED_ACCESS,
];

/// Columns that must be present in every dataset header.
pub fn required_columns() -> impl Iterator<Item = &'static str> {
    std::iter::once(ID_COLUMN).chain(FEATURE_COLUMNS)
}
