//! Company identity record and the jobs it owns.
//!
//! Job status is system-owned and strictly forward-only
//! (`draft → processing → matched → closed`). The server enforces the
//! lifecycle; the client only reads it.

use serde::{Deserialize, Serialize};

use crate::actor::Identity;

// ─── Company ─────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum CompanyStatus {
  ProfilePending,
  Active,
}

/// As returned by `GET /company/auth/me`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompanyRecord {
  pub id:             String,
  pub company_name:   String,
  pub email:          String,
  pub contact_person: Option<String>,
  /// GST registration number.
  pub gst_number:     Option<String>,
  pub email_verified: bool,
  pub token:          Option<String>,
  pub status:         CompanyStatus,
  pub created_at:     String,
}

// ─── Jobs ────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum JobStatus {
  /// Created, not yet submitted for processing.
  Draft,
  /// The system is extracting requirements.
  Processing,
  /// Matching complete; candidates are available.
  Matched,
  /// Filled or closed.
  Closed,
}

impl JobStatus {
  /// The only status this one may move to, if any.
  pub const fn next(self) -> Option<Self> {
    match self {
      Self::Draft => Some(Self::Processing),
      Self::Processing => Some(Self::Matched),
      Self::Matched => Some(Self::Closed),
      Self::Closed => None,
    }
  }

  /// Whether the server may move a job from `self` to `to`. Descriptive
  /// only; the client never applies transitions.
  pub fn can_advance_to(self, to: Self) -> bool { self.next() == Some(to) }

  /// Matching has produced system-finalised data for this job.
  pub const fn has_matches(self) -> bool { matches!(self, Self::Matched | Self::Closed) }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JobLocation {
  pub lat:   f64,
  pub lng:   f64,
  pub label: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Job {
  pub id:              String,
  pub company_id:      String,
  pub title:           String,
  pub required_skills: Vec<String>,
  pub location:        JobLocation,
  /// Number of interns the company will take.
  pub intake:          u32,
  pub stipend:         Option<f64>,
  pub perks:           Option<String>,
  /// The job description as originally pasted by the company.
  #[serde(rename = "originalJD")]
  pub original_jd:     String,
  pub status:          JobStatus,
  pub created_at:      String,
  pub processed_at:    Option<String>,
  pub closed_at:       Option<String>,
}

/// Body of `POST /api/company/jobs`. Excludes every system-owned field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewJob {
  pub title:           String,
  pub required_skills: Vec<String>,
  pub location:        JobLocation,
  pub intake:          u32,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub stipend:         Option<f64>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub perks:           Option<String>,
  #[serde(rename = "originalJD")]
  pub original_jd:     String,
}

/// Body of `PATCH /company/profile`.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CompanyProfilePatch {
  #[serde(skip_serializing_if = "Option::is_none")]
  pub company_name:   Option<String>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub contact_person: Option<String>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub gst_number:     Option<String>,
}

// ─── Session record ──────────────────────────────────────────────────────────

/// The company record and its job list, hydrated together.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompanySession {
  pub company: CompanyRecord,
  #[serde(default)]
  pub jobs:    Vec<Job>,
}

impl CompanySession {
  pub fn has_jobs(&self) -> bool { !self.jobs.is_empty() }

  pub fn job(&self, id: &str) -> Option<&Job> { self.jobs.iter().find(|j| j.id == id) }

  /// Every job carries an id and title and belongs to this company.
  pub fn jobs_consistent(&self) -> bool {
    self.jobs.iter().all(|j| {
      !j.id.is_empty() && !j.title.is_empty() && j.company_id == self.company.id
    })
  }
}

impl Identity for CompanySession {
  fn is_fully_verified(&self) -> bool { self.company.email_verified }
}
