//! Rust client for the operations console REST API
//!
//! Covers the two backend surfaces the console state layer depends on:
//! per-user preferences (`/user-preferences/*`) and the admin settings
//! object (`/settings`). Every request carries a bearer token read from a
//! [`TokenSource`] at call time.
//!
//! # Example
//!
//! ```rust,no_run
//! use opsconsole_client::{ClientConfig, ConsoleClient, StaticToken};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let client = ConsoleClient::new(
//!     ClientConfig {
//!         base_url: "http://localhost:8000/api/v1".into(),
//!         ..Default::default()
//!     },
//!     StaticToken::new("eyJhbGciOi..."),
//! )?;
//!
//! // Load every preference for the current user
//! let prefs = client.get_all_preferences(None).await?;
//!
//! // Fetch the raw admin settings object
//! let settings = client.get_settings().await?;
//! # Ok(())
//! # }
//! ```

pub mod auth;
pub mod client;
pub mod config;
pub mod error;
pub mod types;

// Re-export main types
pub use auth::{FileTokenStore, NoToken, StaticToken, TokenSource};
pub use client::ConsoleClient;
pub use config::{default_config_path, default_token_path, ClientConfig};
pub use error::{ClientError, Result};
pub use types::*;
