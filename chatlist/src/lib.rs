pub mod filter;
pub mod models;
pub mod scroll;
pub mod search;
pub mod servers;
pub mod users;

// Persisted screen preferences (filter toggle, one-hand UI)
pub mod config;

// Headless screen view-model and its event plumbing.
pub mod ui;

pub const PROFILE_DIR_ENV: &str = "CHATLIST_PROFILE_DIR";
