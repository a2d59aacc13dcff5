//! Backend abstraction for the remote source of truth
//!
//! The state components only talk to these traits. [`ConsoleClient`]
//! implements them over HTTP; [`MockBackend`] keeps everything in memory.
//!
//! [`ConsoleClient`]: opsconsole_client::ConsoleClient

mod http;
pub mod mock;
pub mod traits;

pub use mock::{MockBackend, MockCall};
pub use traits::{PreferenceBackend, SettingsBackend};
