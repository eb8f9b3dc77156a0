use serde::{Deserialize, Serialize};

/// Reputation badge shown next to a contractor's name.
///
/// Badges are computed elsewhere; the editor only displays them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserBadge {
    pub code: String,
    pub label: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icon_url: Option<String>,
}
