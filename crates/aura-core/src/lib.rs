//! Core types and trait definitions for the Aura-Match client.
//!
//! Holds the identity records, the session store abstraction, the hydrator,
//! the process-wide state container, and the route access guard. This crate
//! is free of HTTP and database dependencies; `aura-client` and
//! `aura-store-sqlite` plug into the traits defined here.

// Trait impls use native `async fn`; the traits themselves spell out `Send`.
#![allow(async_fn_in_trait)]

pub mod actor;
pub mod company;
pub mod error;
pub mod guard;
pub mod hydrate;
pub mod route;
pub mod session;
pub mod state;
pub mod student;

pub use actor::{Actor, ActorKind, Company, Credential, Identity, Student};
pub use error::{Error, Result};
