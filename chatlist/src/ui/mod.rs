mod chat_list;
mod listener;

pub use chat_list::*;
pub use listener::*;
