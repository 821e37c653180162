//! Turn-by-turn webhook contract for a conversational voice platform.
//!
//! This crate hosts the request and response schema, a builder for
//! well-formed replies and the [`Action`] seam a fulfillment host
//! implements. It is transport neutral.

pub mod action;
pub mod builder;
pub mod codec;
pub mod config;
pub mod request;
pub mod response;
pub mod validate;

pub use action::*;
pub use builder::*;
pub use codec::*;
pub use config::ValidationConfig;
pub use request::*;
pub use response::*;
pub use validate::*;
