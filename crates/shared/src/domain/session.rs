use serde::{Deserialize, Serialize};

/// Authenticated caller, placed in request extensions by the session middleware.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    pub user_id: i32,
    pub is_staff: bool,
}

impl Session {
    pub fn new(user_id: i32, is_staff: bool) -> Self {
        Self { user_id, is_staff }
    }

    /// Staff may act on anything; everyone else only on what they own.
    pub fn can_access(&self, owner_user_id: i32) -> bool {
        self.is_staff || self.user_id == owner_user_id
    }
}
