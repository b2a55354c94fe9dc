//! Claims carried by login tokens.

use crate::Id;
use serde::{Deserialize, Serialize};

/// Claims of a login token: who the bearer is and when the token stops
/// being accepted (`exp`, seconds since the Unix epoch).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    pub user_id: Id,
    pub email: String,
    pub exp: u64,
}
