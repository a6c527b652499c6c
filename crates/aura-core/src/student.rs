//! Student identity record, as returned by `GET /auth/me`.
//!
//! Every field is backend-authoritative. The client reads these values to
//! gate navigation and never computes or patches any of them locally.

use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

use crate::actor::Identity;

// ─── Lifecycle status ────────────────────────────────────────────────────────

/// Server-assigned lifecycle status. The wire field is a free-form string;
/// labels outside the known set deserialise to [`Self::Unrecognized`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum StudentStatus {
  ProfilePending,
  SkillsPending,
  PreferencesPending,
  Submitted,
  Processing,
  Matched,
  Waitlist,
  Rejected,
  Confirmed,
  SeekingAlternative,
  #[serde(other)]
  Unrecognized,
}

/// Which portal issued the record, when the backend echoes it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
  Student,
  Company,
}

// ─── Sub-records ─────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoPoint {
  pub lat: f64,
  pub lng: f64,
}

#[derive(
  Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display, EnumString,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum WorkStyle {
  Remote,
  Hybrid,
  Onsite,
}

/// Placement preferences captured during onboarding.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Preferences {
  pub domains:    Vec<String>,
  pub work_style: WorkStyle,
  /// Maximum commute distance in kilometres.
  pub distance:   f64,
  pub stipend:    Option<f64>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MatchOutcome {
  Matched,
  Waitlist,
  Rejected,
}

/// The system-computed allocation, present once matching has run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MatchResult {
  pub company_id:   String,
  pub company_name: String,
  pub score:        f64,
  pub explanation:  Vec<String>,
  pub status:       MatchOutcome,
}

// ─── Record ──────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StudentRecord {
  pub id:                  String,
  pub name:                String,
  pub email:               String,
  pub phone:               Option<String>,
  pub role:                Option<Role>,
  pub location:            Option<GeoPoint>,
  #[serde(default)]
  pub skills:              Vec<String>,
  /// Reference to the active resume upload, if any.
  pub resume:              Option<String>,
  pub preferences:         Option<Preferences>,
  pub status:              StudentStatus,
  /// Monotonic false → true; the client never resets it.
  pub email_verified:      bool,
  /// Monotonic false → true; the client never resets it.
  pub phone_verified:      bool,
  /// Token echoed by the backend. The guard relies on the credential the
  /// record was hydrated with, not on this field.
  pub token:               Option<String>,
  pub match_result:        Option<MatchResult>,
  #[serde(default)]
  pub onboarding_complete: bool,
  /// Opaque server timestamp; its format is not checked.
  pub created_at:          String,
}

impl StudentRecord {
  /// Name, email, phone and location are all filled in.
  pub fn is_profile_complete(&self) -> bool {
    !self.name.is_empty()
      && !self.email.is_empty()
      && self.phone.as_deref().is_some_and(|p| !p.is_empty())
      && self.location.is_some()
  }
}

impl Identity for StudentRecord {
  fn is_fully_verified(&self) -> bool { self.email_verified && self.phone_verified }
}

// ─── Mutations ───────────────────────────────────────────────────────────────

/// Body of `PATCH /student/profile`. Only the supplied fields are sent.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StudentProfilePatch {
  #[serde(skip_serializing_if = "Option::is_none")]
  pub name:     Option<String>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub phone:    Option<String>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub location: Option<GeoPoint>,
}
