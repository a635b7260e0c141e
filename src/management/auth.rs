use tokio::sync::RwLock;
use tracing::{debug, error, info, warn};

use super::AuthorizationStore;
use crate::{
    error::{Result, SdkError},
    rhapsody::RhapsodyApi,
    types::{Credential, PasswordGrant, RefreshGrant},
    utils,
};

/// Owns the member's [`Credential`] and keeps the store in sync with it.
///
/// Every successful exchange replaces (authorize) or patches (refresh) the
/// credential and persists it while still holding the write lock, so the
/// stored record always matches the one in memory. Failed exchanges leave
/// both untouched.
pub struct TokenManager {
    api: RhapsodyApi,
    api_key: String,
    api_secret: String,
    store: Box<dyn AuthorizationStore>,
    credential: RwLock<Credential>,
}

impl TokenManager {
    /// Restores the credential from `store`.
    pub async fn load(
        api: RhapsodyApi,
        api_key: &str,
        api_secret: &str,
        store: Box<dyn AuthorizationStore>,
    ) -> Result<Self> {
        let credential = store.load().await?;
        if credential.is_authorized() {
            debug!("Restored stored authorization");
        }

        Ok(Self {
            api,
            api_key: api_key.to_string(),
            api_secret: api_secret.to_string(),
            store,
            credential: RwLock::new(credential),
        })
    }

    /// Runs the password grant and replaces the credential with its result.
    pub async fn authorize(&self, username: &str, password: &str) -> Result<()> {
        if username.trim().is_empty() || password.is_empty() {
            return Err(SdkError::InvalidInput(
                "username and password must not be empty".into(),
            ));
        }

        info!("Authorizing member");
        let basic = utils::basic_auth_header(&self.api_key, &self.api_secret);
        let grant = PasswordGrant::new(username, password);
        let token = self
            .api
            .password_grant(&basic, &grant)
            .await
            .inspect_err(|e| error!("Authorization failed: {}", e))?;

        let mut credential = self.credential.write().await;
        *credential = Credential::from_grant(token);
        self.persist(&credential).await;

        info!(
            "Authorized for catalog {}",
            credential.catalog.as_deref().unwrap_or("unknown")
        );
        Ok(())
    }

    /// Mints a new access token from the refresh token. The catalog is kept.
    ///
    /// The response is only applied if the credential still holds the
    /// refresh token the request was sent with; after a concurrent
    /// [`clear`](Self::clear) or [`authorize`](Self::authorize) it is dropped.
    pub async fn refresh(&self) -> Result<()> {
        let refresh_token = self.credential.read().await.refresh_token.clone();
        if refresh_token.is_none() {
            warn!("No refresh token held, the token refresh will be rejected");
        }

        info!("Refreshing access token");
        let grant = RefreshGrant::new(&self.api_key, &self.api_secret, refresh_token.clone());
        let token = self
            .api
            .refresh_grant(&grant)
            .await
            .inspect_err(|e| error!("Token refresh failed: {}", e))?;

        let mut credential = self.credential.write().await;
        // a logout or login that ran meanwhile wins over this response
        if credential.refresh_token != refresh_token {
            warn!("Authorization changed during the token refresh, dropping the refreshed token");
            return Ok(());
        }
        credential.apply_refresh(token);
        self.persist(&credential).await;

        info!("Access token refreshed");
        Ok(())
    }

    /// Forgets the credential in memory and in the store.
    pub async fn clear(&self) {
        let mut credential = self.credential.write().await;
        *credential = Credential::default();
        if let Err(e) = self.store.clear().await {
            warn!("Cannot clear stored authorization: {}", e);
        }
        info!("Authorization cleared");
    }

    /// The `Authorization` header value for member requests.
    pub async fn bearer_header(&self) -> Result<String> {
        self.credential
            .read()
            .await
            .access_token
            .as_ref()
            .map(|token| format!("Bearer {token}"))
            .ok_or(SdkError::NotAuthorized)
    }

    pub async fn catalog(&self) -> Option<String> {
        self.credential.read().await.catalog.clone()
    }

    pub async fn is_authorized(&self) -> bool {
        self.credential.read().await.is_authorized()
    }

    /// A snapshot of the current credential.
    pub async fn credential(&self) -> Credential {
        self.credential.read().await.clone()
    }

    // store failures are logged, never returned
    async fn persist(&self, credential: &Credential) {
        if let Err(e) = self.store.save(credential).await {
            warn!("Cannot persist authorization: {}", e);
        }
    }
}
