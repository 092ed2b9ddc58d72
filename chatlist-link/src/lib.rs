mod detect;
mod error;
mod key_hash;
mod link;
mod smp;

pub use detect::*;
pub use error::*;
pub use key_hash::*;
pub use link::*;
pub use smp::*;
