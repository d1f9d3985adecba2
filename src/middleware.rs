//! Transport decorators composed around the base sender.
//!
//! Every layer implements [`Middleware`] and receives a [`Next`] handle for the remainder of the
//! chain. [`Pipeline`] owns the ordered layer list (outermost first) plus the base
//! [`Transport`](crate::transport::Transport) and is itself a transport. The client assembles
//! `Diagnostics → RateLimitRetry → Identify → Bearer → base`, so the credential is attached
//! immediately before the request leaves the process and retries re-enter the inner layers.

pub mod bearer;
pub mod diagnostics;
pub mod identify;
pub mod pipeline;
pub mod rate_limit;

pub use bearer::*;
pub use diagnostics::*;
pub use identify::*;
pub use pipeline::*;
pub use rate_limit::*;
