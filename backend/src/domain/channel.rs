//! Linked external social accounts.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;
use zeroize::Zeroizing;

/// Permissions an Instagram business login must grant before a channel is
/// linked.
pub const INSTAGRAM_SCOPES: [&str; 4] = [
    "instagram_business_basic",
    "instagram_business_manage_messages",
    "instagram_business_manage_comments",
    "instagram_business_content_publish",
];

/// Social platforms a channel can be linked to.
///
/// Rows written by other integrations decode as [`Platform::Other`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum Platform {
    Instagram,
    #[serde(other)]
    Other,
}

/// Stored `channels` row, including its provider access token.
///
/// Never serialise this type into a response; use [`ChannelView`].
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Channel {
    pub id: Uuid,
    pub user_id: Uuid,
    pub platform: Platform,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub profile_url: Option<String>,
    #[serde(default)]
    pub access_token: Option<String>,
    #[serde(default)]
    pub connection_state: bool,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

/// Channel data sent to the data store on insert.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NewChannel {
    pub user_id: Uuid,
    pub platform: Platform,
    pub name: String,
    pub profile_url: Option<String>,
    pub connection_state: bool,
    #[serde(serialize_with = "serialize_secret")]
    pub access_token: Zeroizing<String>,
}

/// Fields rewritten when a channel token is refreshed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChannelTokenUpdate {
    #[serde(serialize_with = "serialize_secret")]
    pub access_token: Zeroizing<String>,
    pub profile_url: Option<String>,
    pub connection_state: bool,
}

fn serialize_secret<S>(value: &Zeroizing<String>, serializer: S) -> Result<S::Ok, S::Error>
where
    S: serde::Serializer,
{
    serializer.serialize_str(value.as_str())
}

/// Client-facing channel representation without the access token.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct ChannelView {
    #[schema(value_type = String, format = "uuid")]
    pub id: Uuid,
    #[schema(value_type = String, format = "uuid")]
    pub user_id: Uuid,
    pub platform: Platform,
    #[schema(example = "ada.codes")]
    pub name: Option<String>,
    pub profile_url: Option<String>,
    pub connection_state: bool,
    #[schema(value_type = Option<String>)]
    pub created_at: Option<DateTime<Utc>>,
}

impl From<Channel> for ChannelView {
    fn from(value: Channel) -> Self {
        Self {
            id: value.id,
            user_id: value.user_id,
            platform: value.platform,
            name: value.name,
            profile_url: value.profile_url,
            connection_state: value.connection_state,
            created_at: value.created_at,
        }
    }
}
