//! The request handler layer: the bearer-token auth extractor and the
//! sliding-sync route handler.

pub mod extract;
pub mod sync;

pub use extract::AuthenticatedDevice;
