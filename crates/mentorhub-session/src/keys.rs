//! Session store key names.
//!
//! Centralising key names prevents typos and makes it easy to find every
//! key the client reads or writes.

/// Bearer credential attached to outgoing requests.
pub const ACCESS_TOKEN: &str = "ACCESS_TOKEN";

/// Credential exchanged for a new access token.
pub const REFRESH_TOKEN: &str = "REFRESH_TOKEN";

/// Identifier of the logged-in user.
pub const USER_ID: &str = "USER_ID";

/// Portal the logged-in user belongs to (`Admin`, `Mentor`, ...).
pub const USER_TYPE: &str = "USER_TYPE";

/// Keys removed when a session is torn down.
///
/// `USER_TYPE` is deliberately absent: the redirect decision made right
/// after a teardown still reads it.
pub const TEARDOWN_KEYS: [&str; 3] = [ACCESS_TOKEN, REFRESH_TOKEN, USER_ID];

/// Every key the client owns.
pub const ALL_KEYS: [&str; 4] = [ACCESS_TOKEN, REFRESH_TOKEN, USER_ID, USER_TYPE];

/// Whether a key holds a secret that must be masked for display.
pub fn is_secret(key: &str) -> bool {
    key == ACCESS_TOKEN || key == REFRESH_TOKEN
}
