mod chat;
mod servers;
mod types;
mod user;

pub use chat::*;
pub use servers::*;
pub use types::*;
pub use user::*;
