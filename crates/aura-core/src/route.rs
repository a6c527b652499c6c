//! Navigation targets and the protected-route table.
//!
//! | Path | Guard |
//! |------|-------|
//! | `/student/profile` | student `profile` |
//! | `/student/skill-extraction` | student `skills` |
//! | `/student/preferences` | student `preferences` |
//! | `/student/status`, `/student/dashboard`, `/student/offers`, `/student/notifications`, `/student/history` | student `status` |
//! | `/student/result` | student `result` |
//! | `/company/verify-email` | company `verify` |
//! | `/company/profile` | company `profile` |
//! | `/company/jobs/create` | company `create-job` |
//! | `/company/jobs/status` | company `job-status` |
//! | `/company/jobs/matches/:jobId` | company `job-matches` |
//!
//! Every other path is public.

use strum::{Display, EnumString, IntoStaticStr};

use crate::guard::{company::CompanyStep, student::StudentStep};

// ─── Targets ─────────────────────────────────────────────────────────────────

/// A redirect destination. Displays as (and parses from) its path.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, IntoStaticStr)]
pub enum Route {
  #[strum(serialize = "/login")]
  Login,
  #[strum(serialize = "/verify/email")]
  VerifyEmail,
  #[strum(serialize = "/verify/phone")]
  VerifyPhone,
  #[strum(serialize = "/student/profile")]
  StudentProfile,
  #[strum(serialize = "/student/skill-extraction")]
  SkillExtraction,
  #[strum(serialize = "/student/preferences")]
  Preferences,
  #[strum(serialize = "/student/status")]
  Status,
  #[strum(serialize = "/company/login")]
  CompanyLogin,
  #[strum(serialize = "/company/verify-email")]
  CompanyVerifyEmail,
  #[strum(serialize = "/company/profile")]
  CompanyProfile,
  #[strum(serialize = "/company/jobs/create")]
  CreateJob,
  #[strum(serialize = "/company/jobs/status")]
  JobStatus,
}

impl Route {
  pub fn path(self) -> &'static str { self.into() }
}

// ─── Route context ───────────────────────────────────────────────────────────

/// What the router exposes to a guard about the location being visited.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RouteContext {
  /// The originating location, carried as the post-login return target.
  pub location: String,
  /// The `:jobId` path parameter, when the route declares one.
  pub job_id:   Option<String>,
}

impl RouteContext {
  pub fn at(location: impl Into<String>) -> Self {
    Self { location: location.into(), job_id: None }
  }

  pub fn with_job(mut self, job_id: impl Into<String>) -> Self {
    self.job_id = Some(job_id.into());
    self
  }
}

// ─── Protected routes ────────────────────────────────────────────────────────

/// The guard a protected path is declared with.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Protected {
  Student(StudentStep),
  Company(CompanyStep),
}

const TABLE: &[(&str, Protected)] = &[
  ("/student/dashboard", Protected::Student(StudentStep::Status)),
  ("/student/profile", Protected::Student(StudentStep::Profile)),
  ("/student/skill-extraction", Protected::Student(StudentStep::Skills)),
  ("/student/preferences", Protected::Student(StudentStep::Preferences)),
  ("/student/status", Protected::Student(StudentStep::Status)),
  ("/student/result", Protected::Student(StudentStep::Result)),
  ("/student/offers", Protected::Student(StudentStep::Status)),
  ("/student/notifications", Protected::Student(StudentStep::Status)),
  ("/student/history", Protected::Student(StudentStep::Status)),
  ("/company/verify-email", Protected::Company(CompanyStep::Verify)),
  ("/company/profile", Protected::Company(CompanyStep::Profile)),
  ("/company/jobs/create", Protected::Company(CompanyStep::CreateJob)),
  ("/company/jobs/status", Protected::Company(CompanyStep::JobStatus)),
  ("/company/jobs/matches/:jobId", Protected::Company(CompanyStep::JobMatches)),
];

/// Look up the guard for `location`. Returns `None` for public paths.
///
/// Query strings, fragments and a trailing slash are ignored when matching;
/// the full `location` is kept as the return target.
pub fn resolve(location: &str) -> Option<(Protected, RouteContext)> {
  let path = location.split(['?', '#']).next().unwrap_or_default();
  let path = path.trim_end_matches('/');
  let segments: Vec<&str> = path.split('/').collect();

  TABLE.iter().find_map(|(pattern, guard)| {
    let pattern: Vec<&str> = pattern.split('/').collect();
    if pattern.len() != segments.len() {
      return None;
    }
    let mut ctx = RouteContext::at(location);
    for (p, s) in pattern.iter().zip(&segments) {
      match p.strip_prefix(':') {
        Some("jobId") if !s.is_empty() => ctx.job_id = Some((*s).to_owned()),
        Some(_) => return None,
        None if p == s => {}
        None => return None,
      }
    }
    Some((*guard, ctx))
  })
}
