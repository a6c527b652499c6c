//! Actor types and the bearer credential they authenticate with.
//!
//! Students and companies hold two independent sessions. Each actor type has
//! its own credential key and its own identity record; nothing is shared
//! between them.

use std::fmt;

use serde::{Deserialize, Serialize, de::DeserializeOwned};
use strum::{Display, EnumString};

use crate::{company::CompanySession, student::StudentRecord};

// ─── Actor kind ──────────────────────────────────────────────────────────────

/// Which portal a session belongs to.
#[derive(
  Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display,
  EnumString,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum ActorKind {
  Student,
  Company,
}

impl ActorKind {
  /// The fixed storage key the actor's credential lives under.
  pub const fn credential_key(self) -> &'static str {
    match self {
      Self::Student => "aura_access_token",
      Self::Company => "aura_company_access_token",
    }
  }
}

// ─── Credential ──────────────────────────────────────────────────────────────

/// An opaque bearer token. The client never inspects its contents and holds
/// no expiry metadata; validity is only discovered by a rejected call.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Credential(String);

impl Credential {
  pub fn new(token: impl Into<String>) -> Self { Self(token.into()) }

  pub fn as_str(&self) -> &str { &self.0 }

  pub fn is_empty(&self) -> bool { self.0.is_empty() }
}

impl fmt::Debug for Credential {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str("Credential(<redacted>)")
  }
}

// ─── Actor trait ─────────────────────────────────────────────────────────────

/// Derived verification state of a hydrated identity record.
pub trait Identity {
  /// Student: both email and phone verified. Company: email verified.
  fn is_fully_verified(&self) -> bool;
}

/// Binds an [`ActorKind`] to the record its identity endpoint returns.
pub trait Actor: Send + Sync + 'static {
  const KIND: ActorKind;

  type Record: Identity
    + DeserializeOwned
    + Clone
    + fmt::Debug
    + Send
    + Sync
    + 'static;
}

/// The student portal.
#[derive(Debug, Clone, Copy)]
pub struct Student;

/// The company portal.
#[derive(Debug, Clone, Copy)]
pub struct Company;

impl Actor for Student {
  const KIND: ActorKind = ActorKind::Student;
  type Record = StudentRecord;
}

impl Actor for Company {
  const KIND: ActorKind = ActorKind::Company;
  type Record = CompanySession;
}
