// In-process credential cache for upstream APIs.

pub mod models;
pub mod operations;

pub use models::token::{CachedCredential, IssuedToken};
pub use operations::token::{Clock, CredentialExchange, SystemClock, TokenCache};
