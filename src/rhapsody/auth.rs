//! Token endpoints.
//!
//! Access tokens expire after roughly 24 hours; the refresh grant mints a new
//! one from the refresh token without asking for the password again.

use super::RhapsodyApi;
use crate::{
    error::Result,
    types::{AccessToken, PasswordGrant, RefreshGrant},
};

impl RhapsodyApi {
    /// Exchanges username and password for a token pair and the catalog.
    ///
    /// `basic_auth` is the complete `Authorization` header value built from
    /// the app key and secret.
    pub async fn password_grant(
        &self,
        basic_auth: &str,
        grant: &PasswordGrant,
    ) -> Result<AccessToken> {
        self.post_json(&["oauth", "token"], Some(basic_auth), grant)
            .await
    }

    /// Exchanges a refresh token for a new token pair. The response carries
    /// no catalog.
    pub async fn refresh_grant(&self, grant: &RefreshGrant) -> Result<AccessToken> {
        self.post_json(&["oauth", "access_token"], None, grant).await
    }
}
