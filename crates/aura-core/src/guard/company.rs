//! Company flow: verify → profile → create-job → job-status → job-matches.
//!
//! `job-matches` is the strictest gate: the job named in the route must be
//! one of the company's own and must have finished matching.

use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

use super::{Predicate, PredicateChain, Severity};
use crate::{
  actor::Company,
  company::CompanySession,
  route::{Route, RouteContext},
  state::Session,
};

#[derive(
  Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display,
  EnumString,
)]
#[serde(rename_all = "kebab-case")]
#[strum(serialize_all = "kebab-case")]
pub enum CompanyStep {
  Verify,
  Profile,
  CreateJob,
  JobStatus,
  JobMatches,
}

type Check = fn(&Session<CompanySession>, &RouteContext) -> bool;

const fn predicate(
  reason: &'static str,
  check: Check,
  target: Route,
  severity: Severity,
) -> Predicate<CompanySession> {
  Predicate { reason, check, target, severity }
}

fn route_job<'a>(s: &'a Session<CompanySession>, route: &RouteContext) -> Option<&'a crate::company::Job> {
  route.job_id.as_deref().and_then(|id| s.record.job(id))
}

const AUTHENTICATED: Predicate<CompanySession> = predicate(
  "not authenticated",
  |s, _| !s.record.company.id.is_empty(),
  Route::CompanyLogin,
  Severity::Gate,
);

const VERIFIED: Predicate<CompanySession> = predicate(
  "not verified",
  |s, _| s.record.company.email_verified,
  Route::CompanyVerifyEmail,
  Severity::Gate,
);

/// The one forward redirect: a verified company has nothing left to do on the
/// verification page.
const NOT_YET_VERIFIED: Predicate<CompanySession> = predicate(
  "already verified",
  |s, _| !s.record.company.email_verified,
  Route::CompanyProfile,
  Severity::Gate,
);

const HAS_JOBS: Predicate<CompanySession> = predicate(
  "no jobs",
  |s, _| s.record.has_jobs(),
  Route::CreateJob,
  Severity::Gate,
);

const JOBS_CONSISTENT: Predicate<CompanySession> = predicate(
  "corrupted job data",
  |s, _| s.record.jobs_consistent(),
  Route::CreateJob,
  Severity::Integrity,
);

const MATCHES_GATES: [Predicate<CompanySession>; 4] = [
  predicate(
    "missing job id",
    |_, r| r.job_id.as_deref().is_some_and(|id| !id.is_empty()),
    Route::JobStatus,
    Severity::Integrity,
  ),
  predicate("job not found", |s, r| route_job(s, r).is_some(), Route::JobStatus, Severity::Integrity),
  predicate(
    "job ownership mismatch",
    |s, r| route_job(s, r).is_some_and(|j| j.company_id == s.record.company.id),
    Route::JobStatus,
    Severity::Integrity,
  ),
  predicate(
    "job not ready for matches",
    |s, r| route_job(s, r).is_some_and(|j| j.status.has_matches()),
    Route::JobStatus,
    Severity::Gate,
  ),
];

impl PredicateChain for Company {
  type Step = CompanyStep;

  const LOGIN: Route = Route::CompanyLogin;
  const CARRIES_ORIGIN: bool = false;

  fn resolve(step: CompanyStep) -> Vec<Predicate<CompanySession>> {
    let mut chain = vec![AUTHENTICATED];
    match step {
      CompanyStep::Verify => chain.push(NOT_YET_VERIFIED),
      CompanyStep::Profile | CompanyStep::CreateJob => chain.push(VERIFIED),
      CompanyStep::JobStatus => chain.extend([VERIFIED, HAS_JOBS, JOBS_CONSISTENT]),
      CompanyStep::JobMatches => {
        chain.push(VERIFIED);
        chain.extend(MATCHES_GATES);
      }
    }
    chain
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::{
    actor::Credential,
    company::{CompanyRecord, CompanyStatus, Job, JobLocation, JobStatus},
    guard::{Decision, Guard, GuardState, Severity, evaluate, testing::Recorder},
    state::container,
  };

  fn company(id: &str, verified: bool) -> CompanyRecord {
    CompanyRecord {
      id:             id.into(),
      company_name:   "Acme".into(),
      email:          "hr@acme.test".into(),
      contact_person: None,
      gst_number:     None,
      email_verified: verified,
      token:          None,
      status:         CompanyStatus::Active,
      created_at:     "2025-01-01T00:00:00Z".into(),
    }
  }

  fn job(id: &str, company_id: &str, status: JobStatus) -> Job {
    Job {
      id:              id.into(),
      company_id:      company_id.into(),
      title:           "Backend intern".into(),
      required_skills: vec!["rust".into()],
      location:        JobLocation { lat: 0.0, lng: 0.0, label: "Remote".into() },
      intake:          2,
      stipend:         None,
      perks:           None,
      original_jd:     "jd".into(),
      status,
      created_at:      "2025-02-01T00:00:00Z".into(),
      processed_at:    None,
      closed_at:       None,
    }
  }

  fn session(verified: bool, jobs: Vec<Job>) -> Session<CompanySession> {
    Session {
      credential: Credential::new("tok"),
      record:     CompanySession { company: company("c1", verified), jobs },
    }
  }

  fn matches_route(job_id: &str) -> RouteContext {
    RouteContext::at(format!("/company/jobs/matches/{job_id}")).with_job(job_id)
  }

  fn decide(step: CompanyStep, s: &Session<CompanySession>, route: &RouteContext) -> Decision {
    evaluate::<Company>(step, Some(s), route)
  }

  #[test]
  fn absent_session_goes_to_company_login_without_origin() {
    let Decision::Redirect(r) =
      evaluate::<Company>(CompanyStep::Profile, None, &RouteContext::at("/company/profile"))
    else {
      panic!("expected redirect")
    };
    assert_eq!(r.target, Route::CompanyLogin);
    assert_eq!(r.return_to, None);
  }

  #[test]
  fn empty_company_id_is_unauthenticated() {
    let mut s = session(true, vec![]);
    s.record.company.id.clear();
    let d = decide(CompanyStep::CreateJob, &s, &RouteContext::default());
    assert_eq!(d.target(), Some(Route::CompanyLogin));
  }

  #[test]
  fn verified_company_is_pushed_past_verification() {
    let d = decide(CompanyStep::Verify, &session(true, vec![]), &RouteContext::default());
    assert_eq!(d.target(), Some(Route::CompanyProfile));
    let d = decide(CompanyStep::Verify, &session(false, vec![]), &RouteContext::default());
    assert_eq!(d, Decision::Allow);
  }

  #[test]
  fn unverified_company_is_sent_to_verify_email() {
    let s = session(false, vec![job("j1", "c1", JobStatus::Matched)]);
    for step in [
      CompanyStep::Profile,
      CompanyStep::CreateJob,
      CompanyStep::JobStatus,
      CompanyStep::JobMatches,
    ] {
      let d = decide(step, &s, &matches_route("j1"));
      assert_eq!(d.target(), Some(Route::CompanyVerifyEmail), "{step}");
    }
  }

  #[test]
  fn job_status_requires_a_job() {
    let d = decide(CompanyStep::JobStatus, &session(true, vec![]), &RouteContext::default());
    assert_eq!(d.target(), Some(Route::CreateJob));
  }

  #[test]
  fn job_status_rejects_foreign_or_blank_jobs_as_integrity_violation() {
    let foreign = session(true, vec![job("j1", "c1", JobStatus::Draft), job("j2", "c9", JobStatus::Draft)]);
    let Decision::Redirect(r) = decide(CompanyStep::JobStatus, &foreign, &RouteContext::default()) else {
      panic!("expected redirect")
    };
    assert_eq!(r.target, Route::CreateJob);
    assert_eq!(r.severity, Severity::Integrity);

    let mut blank = job("j1", "c1", JobStatus::Draft);
    blank.title.clear();
    let d = decide(CompanyStep::JobStatus, &session(true, vec![blank]), &RouteContext::default());
    assert_eq!(d.target(), Some(Route::CreateJob));
  }

  #[test]
  fn job_status_allows_consistent_jobs() {
    let s = session(true, vec![job("j1", "c1", JobStatus::Draft)]);
    assert_eq!(decide(CompanyStep::JobStatus, &s, &RouteContext::default()), Decision::Allow);
  }

  #[test]
  fn matched_job_allows_matches_view() {
    let s = session(true, vec![job("j1", "c1", JobStatus::Matched)]);
    assert_eq!(decide(CompanyStep::JobMatches, &s, &matches_route("j1")), Decision::Allow);
  }

  #[test]
  fn closed_job_allows_matches_view() {
    let s = session(true, vec![job("j1", "c1", JobStatus::Closed)]);
    assert_eq!(decide(CompanyStep::JobMatches, &s, &matches_route("j1")), Decision::Allow);
  }

  #[test]
  fn processing_job_is_sent_back_to_status() {
    let s = session(true, vec![job("j1", "c1", JobStatus::Processing)]);
    let Decision::Redirect(r) = decide(CompanyStep::JobMatches, &s, &matches_route("j1")) else {
      panic!("expected redirect")
    };
    assert_eq!(r.target, Route::JobStatus);
    assert_eq!(r.severity, Severity::Gate);
  }

  #[test]
  fn unfinished_jobs_are_denied_regardless_of_ownership() {
    for status in [JobStatus::Draft, JobStatus::Processing] {
      for owner in ["c1", "c9"] {
        let s = session(true, vec![job("j1", owner, status)]);
        let d = decide(CompanyStep::JobMatches, &s, &matches_route("j1"));
        assert_eq!(d.target(), Some(Route::JobStatus), "{status:?} owned by {owner}");
      }
    }
  }

  #[test]
  fn matches_without_job_id_or_unknown_job_is_denied() {
    let s = session(true, vec![job("j1", "c1", JobStatus::Matched)]);
    let d = decide(CompanyStep::JobMatches, &s, &RouteContext::at("/company/jobs/matches"));
    assert_eq!(d.target(), Some(Route::JobStatus));
    let d = decide(CompanyStep::JobMatches, &s, &matches_route("j2"));
    assert_eq!(d.target(), Some(Route::JobStatus));
  }

  #[test]
  fn foreign_matched_job_is_an_ownership_violation() {
    let s = session(true, vec![job("j1", "c9", JobStatus::Matched)]);
    let Decision::Redirect(r) = decide(CompanyStep::JobMatches, &s, &matches_route("j1")) else {
      panic!("expected redirect")
    };
    assert_eq!(r.reason, "job ownership mismatch");
    assert_eq!(r.severity, Severity::Integrity);
  }

  #[test]
  fn guard_navigates_on_denial_and_renders_on_allow() {
    let (writer, reader) = container();
    writer.complete_hydration(Some(session(true, vec![job("j1", "c1", JobStatus::Processing)])));
    let guard = Guard::<Company>::new(CompanyStep::JobMatches, matches_route("j1"));
    let mut nav = Recorder::default();
    assert!(matches!(guard.apply(&reader.snapshot(), &mut nav), GuardState::Deny(_)));
    assert_eq!(nav.visits[0].target, Route::JobStatus);

    writer.complete_hydration(Some(session(true, vec![job("j1", "c1", JobStatus::Matched)])));
    let mut nav = Recorder::default();
    assert!(guard.apply(&reader.snapshot(), &mut nav).renders_content());
    assert!(nav.visits.is_empty());
  }
}
