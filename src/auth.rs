//! Credential model and the sources that mint bearer tokens for management calls.

pub mod credential;
pub mod secret;
pub mod source;

pub use credential::*;
pub use secret::*;
pub use source::*;
