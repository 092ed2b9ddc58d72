mod connector;
mod controller;

pub use connector::*;
pub use controller::*;
