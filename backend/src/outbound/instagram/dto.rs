//! DTOs for decoding Instagram OAuth and Graph API responses.
//!
//! The token endpoints have answered in more than one shape over time, so
//! the DTOs accept both the `{"data": [...]}` wrapper and the flat object,
//! and `permissions` as either a comma-separated string or an array.

use serde::Deserialize;
use zeroize::Zeroizing;

use crate::domain::ports::{LongLivedToken, ShortLivedToken, SocialProfile};

#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub(super) enum ShortLivedResponseDto {
    Wrapped { data: Vec<ShortLivedTokenDto> },
    Flat(ShortLivedTokenDto),
}

#[derive(Debug, Deserialize)]
pub(super) struct ShortLivedTokenDto {
    access_token: String,
    user_id: UserIdDto,
    #[serde(default)]
    permissions: Option<PermissionsDto>,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum UserIdDto {
    Text(String),
    Number(u64),
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum PermissionsDto {
    Csv(String),
    List(Vec<String>),
}

impl PermissionsDto {
    fn into_scopes(self) -> Vec<String> {
        let scopes = match self {
            Self::Csv(csv) => csv.split(',').map(str::to_owned).collect(),
            Self::List(list) => list,
        };
        scopes
            .into_iter()
            .map(|scope| scope.trim().to_owned())
            .filter(|scope| !scope.is_empty())
            .collect()
    }
}

impl ShortLivedResponseDto {
    pub(super) fn into_domain(self) -> Result<ShortLivedToken, String> {
        let token = match self {
            Self::Wrapped { data } => data
                .into_iter()
                .next()
                .ok_or_else(|| "token response contained no entries".to_owned())?,
            Self::Flat(token) => token,
        };
        if token.access_token.is_empty() {
            return Err("token response is missing access_token".to_owned());
        }
        Ok(ShortLivedToken {
            access_token: Zeroizing::new(token.access_token),
            user_id: match token.user_id {
                UserIdDto::Text(id) => id,
                UserIdDto::Number(id) => id.to_string(),
            },
            permissions: token
                .permissions
                .map(PermissionsDto::into_scopes)
                .unwrap_or_default(),
        })
    }
}

#[derive(Debug, Deserialize)]
pub(super) struct LongLivedTokenDto {
    access_token: String,
    #[serde(default)]
    token_type: Option<String>,
    #[serde(default)]
    expires_in: Option<u64>,
}

impl LongLivedTokenDto {
    pub(super) fn into_domain(self) -> Result<LongLivedToken, String> {
        if self.access_token.is_empty() {
            return Err("token response is missing access_token".to_owned());
        }
        Ok(LongLivedToken {
            access_token: Zeroizing::new(self.access_token),
            token_type: self.token_type,
            expires_in: self.expires_in,
        })
    }
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub(super) enum ProfileResponseDto {
    Wrapped { data: SocialProfile },
    Flat(SocialProfile),
}

impl ProfileResponseDto {
    pub(super) fn into_domain(self) -> SocialProfile {
        match self {
            Self::Wrapped { data } | Self::Flat(data) => data,
        }
    }
}

/// Error bodies. `error_type`/`error_message` come from the OAuth host,
/// `error.message` from the Graph API.
#[derive(Debug, Default, Deserialize)]
pub(super) struct ErrorBodyDto {
    #[serde(default)]
    pub(super) error_type: Option<String>,
    #[serde(default)]
    pub(super) error_message: Option<String>,
    #[serde(default)]
    pub(super) error: Option<GraphErrorDto>,
}

#[derive(Debug, Deserialize)]
pub(super) struct GraphErrorDto {
    #[serde(default)]
    pub(super) message: Option<String>,
}

impl ErrorBodyDto {
    /// `error_message` when the body is an `OAuthException`.
    pub(super) fn oauth_exception(&self) -> Option<&str> {
        (self.error_type.as_deref() == Some("OAuthException"))
            .then_some(self.error_message.as_deref())
            .flatten()
    }

    /// `error.message` from a Graph API error.
    pub(super) fn graph_message(&self) -> Option<&str> {
        self.error.as_ref().and_then(|error| error.message.as_deref())
    }
}
