//! Google Calendar source for weekplan.
//!
//! OAuth client credentials come from the JSON file Google's console hands
//! out; per-account sessions live in a `CredentialStore`.

mod app_config;
mod authenticate;
mod convert;
mod session;
mod source;
mod store;

pub use app_config::AppCredentials;
pub use session::Session;
pub use source::GoogleCalendarSource;
pub use store::FileCredentialStore;
