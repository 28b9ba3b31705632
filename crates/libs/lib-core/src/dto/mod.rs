//! # Data Transfer Objects (DTOs)
//!
//! Request and response bodies exchanged with the front-end over the REST API,
//! plus the wire format of the remote disease classifier.

pub mod auth;
pub mod listing;
pub mod diagnosis;
pub mod checkout;
pub mod rotation;
pub mod system;

pub use auth::*;
pub use listing::*;
pub use diagnosis::*;
pub use checkout::*;
pub use rotation::*;
pub use system::*;
