mod poller;
mod provider;
mod status;

pub use poller::*;
pub use provider::*;
pub use status::*;
