//! HTTP side of the Aura-Match client.
//!
//! [`ApiClient`] talks to the platform API with a bearer credential and is
//! the [`IdentitySource`](aura_core::hydrate::IdentitySource) the hydrator
//! reads through. [`StudentContext`] and [`CompanyContext`] own each actor's
//! state container and pair every state-mutating action with a refetch.

pub mod client;
pub mod config;
pub mod context;
pub mod error;
pub mod wire;

mod identity;

pub use client::ApiClient;
pub use config::ClientConfig;
pub use context::{CompanyContext, SessionContext, StudentContext};
pub use error::{Error, Result};
