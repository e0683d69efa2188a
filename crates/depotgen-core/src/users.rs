use serde::{Deserialize, Serialize};

/// Profile of a signed-in user as exposed over the API.
///
/// `discord_id` is the identity asserted by the OAuth provider; `id` is the
/// local row id used for session ownership checks.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserProfile {
    pub id: i64,
    pub discord_id: String,
    pub username: String,
    pub avatar: Option<String>,
}
