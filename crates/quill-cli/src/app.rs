//! Application plumbing shared by command handlers.

mod context;
mod unlock;

pub use context::{AppContext, Journal};
