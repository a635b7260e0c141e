//! Rhapsody REST SDK and command-line client
//!
//! This library wraps the Rhapsody (Napster) music catalog REST API: member
//! authorization with token persistence, album/artist/genre metadata, new
//! release feeds with an in-memory cache, the member's library and charts.
//! The `rhapcli` binary is a thin command-line front end on top of it.
//!
//! # Modules
//!
//! - `cli` - Command-line interface implementations
//! - `config` - Configuration management and environment variables
//! - `error` - The SDK error type
//! - `management` - Token management, authorization stores and the response cache
//! - `rhapsody` - Rhapsody REST API client implementation
//! - `sdk` - The `RhapsodySdk` facade
//! - `types` - Data structures and type definitions
//! - `utils` - Utility functions and helpers
//!
//! # Example
//!
//! ```
//! use rhapcli::{RhapsodySdk, SdkConfig, config};
//!
//! #[tokio::main]
//! async fn main() -> rhapcli::Res<()> {
//!     config::load_env().await?;
//!     let sdk = RhapsodySdk::new(SdkConfig::from_env()?).await?;
//!     sdk.authorize("member@example.com", "password").await?;
//!     Ok(())
//! }
//! ```

pub mod cli;
pub mod config;
pub mod error;
pub mod management;
pub mod rhapsody;
pub mod sdk;
pub mod types;
pub mod utils;

pub use config::SdkConfig;
pub use error::{Result, SdkError};
pub use sdk::RhapsodySdk;

/// Boxed error alias used by the command-line layer.
///
/// Library operations return the typed [`Result`]; code that mixes them with
/// I/O or environment errors can use `Res` and `?` on all of them.
///
/// # Example
///
/// ```
/// use rhapcli::Res;
///
/// async fn fetch_data() -> Res<String> {
///     Ok("data".to_string())
/// }
/// ```
pub type Res<T> = std::result::Result<T, Box<dyn std::error::Error + Send + Sync>>;

/// Prints a status line prefixed with a blue `o`.
///
/// Takes the same arguments as `println!`.
///
/// ```ignore
/// info!("Loading new releases of genre {}", genre_id);
/// ```
#[macro_export]
macro_rules! info {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    println!("[{}] {}", "o".blue().bold(), std::format_args!($($arg)*));
  })
}

/// Prints a status line prefixed with a green check mark.
///
/// ```ignore
/// success!("Album {} added to your library", album_id);
/// ```
#[macro_export]
macro_rules! success {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    println!("[{}] {}", "✓".green().bold(), std::format_args!($($arg)*));
  })
}

/// Prints a red `!` line to stderr and exits with status 1.
///
/// Only for failures the command cannot recover from; nothing after the
/// call runs.
///
/// ```ignore
/// error!("Cannot load album {}: {}", album_id, e);
/// ```
#[macro_export]
macro_rules! error {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    eprintln!("[{}] {}", "!".red().bold(), std::format_args!($($arg)*));
    std::process::exit(1);
  })
}

/// Prints a yellow `!` line for problems the command survives.
#[macro_export]
macro_rules! warning {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    eprintln!("[{}] {}", "!".yellow().bold(), std::format_args!($($arg)*));
  })
}
