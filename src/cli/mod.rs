//! # CLI Module
//!
//! User-facing commands of `rhapcli`. Every command receives a ready
//! [`RhapsodySdk`], runs one or two SDK operations behind a spinner and
//! renders the result as colored status lines or a table.
//!
//! ## Commands
//!
//! - [`login`], [`refresh`], [`logout`], [`status`] - member authorization
//! - [`album`], [`releases`] - album details and new release feeds
//! - [`artist`] - artist metadata, bio and image URL
//! - [`genres`] - the genre tree
//! - [`account`] - the member account
//! - [`library_artists`], [`library_albums`], [`add_album`], [`remove_album`]
//! - [`charts`] - the member's most played tracks, artists or albums
//!
//! Fatal failures go through the crate's `error!` macro, which exits the
//! process. An authorization failure additionally hints at `rhapcli auth login`.
//!
//! ## Usage
//!
//! ```bash
//! rhapcli auth login --username member@example.com
//! rhapcli releases --genre g.115 --limit 10
//! rhapcli library add Alb.54719066
//! rhapcli charts tracks --range month
//! ```

mod account;
mod albums;
mod artists;
mod auth;
mod charts;
mod genres;
mod library;

pub use account::account;
pub use albums::album;
pub use albums::releases;
pub use artists::artist;
pub use auth::login;
pub use auth::logout;
pub use auth::refresh;
pub use auth::status;
pub use charts::ChartKind;
pub use charts::charts;
pub use genres::genres;
pub use library::add_album;
pub use library::library_albums;
pub use library::library_artists;
pub use library::remove_album;

use std::{borrow::Cow, time::Duration};

use indicatif::{ProgressBar, ProgressStyle};

use crate::{
    RhapsodySdk, SdkConfig, SdkError, config, error, management::FileStore,
};

/// Builds the SDK from the `RHAPSODY_*` environment, persisting the
/// authorization in the JSON file store.
pub async fn connect(verbose: bool) -> RhapsodySdk {
    let sdk_config = match SdkConfig::from_env() {
        Ok(c) => c,
        Err(e) => error!(
            "{}. Set it in your environment or in {}",
            e,
            config::data_dir().join(".env").display()
        ),
    };

    let store = FileStore::default_location();
    let sdk = match RhapsodySdk::with_store(sdk_config, Box::new(store)).await {
        Ok(sdk) => sdk,
        Err(e) => error!("Cannot initialize the Rhapsody client. Err: {}", e),
    };

    sdk.set_verbose_logging(verbose);
    sdk
}

pub(crate) fn spinner(message: impl Into<Cow<'static, str>>) -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    pb.set_message(message);
    pb.enable_steady_tick(Duration::from_millis(100));
    if let Ok(style) = ProgressStyle::with_template("{spinner:.blue} {msg}") {
        pb.set_style(style.tick_chars("⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏"));
    }
    pb
}

/// Reports a failed operation and exits.
pub(crate) fn fail(context: &str, err: SdkError) -> ! {
    if let Some(hint) = auth_hint(&err) {
        error!("{}. Err: {}\n{}", context, err, hint);
    }
    error!("{}. Err: {}", context, err)
}

/// What to run next after an authorization failure.
///
/// Without a token only a login helps. A rejected token has most likely
/// expired, which a refresh fixes without the password.
fn auth_hint(err: &SdkError) -> Option<String> {
    let bin = env!("CARGO_PKG_NAME");
    match err {
        SdkError::NotAuthorized => Some(format!("Please run {bin} auth login")),
        _ if err.status() == Some(401) => Some(format!(
            "Please run {bin} auth refresh, or {bin} auth login if that fails"
        )),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_token_suggests_login() {
        let hint = auth_hint(&SdkError::NotAuthorized).unwrap();
        assert!(hint.ends_with("auth login"));
        assert!(!hint.contains("refresh"));
    }

    #[test]
    fn rejected_token_suggests_refresh_first() {
        let err = SdkError::from_response(401, r#"{"message":"Invalid Access Token"}"#);
        let hint = auth_hint(&err).unwrap();

        let refresh = hint.find("auth refresh").unwrap();
        let login = hint.find("auth login").unwrap();
        assert!(refresh < login);
    }

    #[test]
    fn other_failures_have_no_hint() {
        assert_eq!(auth_hint(&SdkError::from_response(404, "")), None);
        assert_eq!(auth_hint(&SdkError::InvalidInput("empty".into())), None);
    }
}
