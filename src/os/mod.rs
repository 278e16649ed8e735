//! OS-level inputs: environmental variables and the current user.

pub mod env;
pub mod user;
