//! The authenticated-state object handed to pages.

use serde::{Deserialize, Serialize};

use super::SessionUser;

/// An active session as seen by the client.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Session {
    pub user: SessionUser,
    /// RFC 3339 expiry timestamp.
    pub expires: String,
}
