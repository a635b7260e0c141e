use crate::{
    RhapsodySdk, config, error, info, management::FileStore, success, warning,
};

use super::{fail, spinner};

pub async fn login(sdk: &RhapsodySdk, username: &str, password: Option<String>) {
    let password = match password.or_else(config::password) {
        Some(p) => p,
        None => error!("No password given. Use --password or set RHAPSODY_PASSWORD"),
    };

    let pb = spinner(format!("Logging in as {username}..."));
    let result = sdk.authorize(username, &password).await;
    pb.finish_and_clear();

    if let Err(e) = result {
        fail("Login failed", e);
    }

    match sdk.catalog().await {
        Some(catalog) => success!("Logged in. Catalog: {}", catalog),
        None => success!("Logged in."),
    }
}

pub async fn refresh(sdk: &RhapsodySdk) {
    if !sdk.is_authorized().await {
        warning!("Not logged in, the refresh will most likely fail.");
    }

    let pb = spinner("Refreshing access token...");
    let result = sdk.refresh_token().await;
    pb.finish_and_clear();

    match result {
        Ok(()) => success!("Access token refreshed."),
        Err(e) => fail("Token refresh failed", e),
    }
}

pub async fn logout(sdk: &RhapsodySdk) {
    sdk.clear_authorization().await;
    success!("Logged out.");
}

pub async fn status(sdk: &RhapsodySdk) {
    let credential = sdk.credential().await;
    if !credential.is_authorized() {
        warning!("Not logged in.");
        return;
    }

    success!("Logged in.");
    info!(
        "Catalog: {}",
        credential.catalog.as_deref().unwrap_or("unknown")
    );
    info!(
        "Refresh token: {}",
        if credential.refresh_token.is_some() {
            "present"
        } else {
            "missing"
        }
    );
    info!(
        "Stored in {}",
        FileStore::default_location().path().display()
    );
}
