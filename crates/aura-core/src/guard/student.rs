//! Student flow: profile → skills → preferences → status → result.
//!
//! Every student guard first requires a session with a non-empty
//! credential, then full verification (email, then phone). Each later step
//! additionally requires every gate of the steps before it.

use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

use super::{Predicate, PredicateChain, Severity};
use crate::{
  actor::{Identity, Student},
  route::{Route, RouteContext},
  state::Session,
  student::{StudentRecord, StudentStatus},
};

#[derive(
  Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display,
  EnumString,
)]
#[serde(rename_all = "kebab-case")]
#[strum(serialize_all = "kebab-case")]
pub enum StudentStep {
  Profile,
  Skills,
  Preferences,
  Status,
  Result,
}

impl StudentStep {
  /// How many step gates precede this step.
  const fn depth(self) -> usize {
    match self {
      Self::Profile => 0,
      Self::Skills => 1,
      Self::Preferences => 2,
      Self::Status => 3,
      Self::Result => 4,
    }
  }
}

type Check = fn(&Session<StudentRecord>, &RouteContext) -> bool;

const fn gate(reason: &'static str, check: Check, target: Route) -> Predicate<StudentRecord> {
  Predicate { reason, check, target, severity: Severity::Gate }
}

const PREAMBLE: [Predicate<StudentRecord>; 3] = [
  gate("missing credential", |s, _| !s.credential.is_empty(), Route::Login),
  gate("email not verified", |s, _| s.record.email_verified, Route::VerifyEmail),
  gate("phone not verified", |s, _| s.record.is_fully_verified(), Route::VerifyPhone),
];

/// Indexed by step depth: entry `k` is the gate a step of depth > `k` must
/// pass.
const STEP_GATES: [Predicate<StudentRecord>; 4] = [
  gate(
    "profile incomplete",
    |s, _| s.record.is_profile_complete() && s.record.status != StudentStatus::ProfilePending,
    Route::StudentProfile,
  ),
  gate(
    "skills pending",
    |s, _| s.record.status != StudentStatus::SkillsPending,
    Route::SkillExtraction,
  ),
  gate(
    "preferences pending",
    |s, _| s.record.status != StudentStatus::PreferencesPending,
    Route::Preferences,
  ),
  gate("no match result", |s, _| s.record.match_result.is_some(), Route::Status),
];

impl PredicateChain for Student {
  type Step = StudentStep;

  const LOGIN: Route = Route::Login;
  const CARRIES_ORIGIN: bool = true;

  fn resolve(step: StudentStep) -> Vec<Predicate<StudentRecord>> {
    PREAMBLE
      .into_iter()
      .chain(STEP_GATES.into_iter().take(step.depth()))
      .collect()
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::{
    actor::Credential,
    guard::{Decision, Guard, GuardState, evaluate, testing::Recorder},
    state::container,
    student::{GeoPoint, MatchOutcome, MatchResult},
  };

  fn record(status: StudentStatus) -> StudentRecord {
    StudentRecord {
      id:                  "s1".into(),
      name:                "Asha".into(),
      email:               "asha@example.com".into(),
      phone:               Some("+91 98765 43210".into()),
      role:                None,
      location:            Some(GeoPoint { lat: 18.52, lng: 73.85 }),
      skills:              vec![],
      resume:              None,
      preferences:         None,
      status,
      email_verified:      true,
      phone_verified:      true,
      token:               None,
      match_result:        None,
      onboarding_complete: false,
      created_at:          "2025-01-01T00:00:00Z".into(),
    }
  }

  fn session(record: StudentRecord) -> Session<StudentRecord> {
    Session { credential: Credential::new("tok"), record }
  }

  fn at() -> RouteContext { RouteContext::at("/student/result") }

  fn target(step: StudentStep, s: &Session<StudentRecord>) -> Option<Route> {
    evaluate::<Student>(step, Some(s), &at()).target()
  }

  #[test]
  fn absent_session_goes_to_login_with_origin() {
    let decision = evaluate::<Student>(StudentStep::Profile, None, &at());
    let Decision::Redirect(r) = decision else { panic!("expected redirect") };
    assert_eq!(r.target, Route::Login);
    assert_eq!(r.return_to.as_deref(), Some("/student/result"));
  }

  #[test]
  fn empty_credential_goes_to_login() {
    let mut s = session(record(StudentStatus::Submitted));
    s.credential = Credential::new("");
    assert_eq!(target(StudentStep::Profile, &s), Some(Route::Login));
  }

  #[test]
  fn unverified_student_on_skills_goes_to_email_verification() {
    let mut r = record(StudentStatus::ProfilePending);
    r.email_verified = false;
    r.phone_verified = false;
    assert_eq!(target(StudentStep::Skills, &session(r)), Some(Route::VerifyEmail));
  }

  #[test]
  fn email_verified_only_goes_to_phone_verification() {
    let mut r = record(StudentStatus::Submitted);
    r.phone_verified = false;
    assert_eq!(target(StudentStep::Profile, &session(r)), Some(Route::VerifyPhone));
  }

  #[test]
  fn skills_pending_on_preferences_goes_to_skill_extraction() {
    let s = session(record(StudentStatus::SkillsPending));
    assert_eq!(target(StudentStep::Preferences, &s), Some(Route::SkillExtraction));
  }

  #[test]
  fn profile_step_is_always_reachable_once_verified() {
    let s = session(record(StudentStatus::ProfilePending));
    assert_eq!(evaluate::<Student>(StudentStep::Profile, Some(&s), &at()), Decision::Allow);
  }

  #[test]
  fn incomplete_profile_blocks_later_steps() {
    let mut r = record(StudentStatus::Submitted);
    r.location = None;
    let s = session(r);
    for step in [StudentStep::Skills, StudentStep::Preferences, StudentStep::Status, StudentStep::Result] {
      assert_eq!(target(step, &s), Some(Route::StudentProfile), "{step}");
    }
  }

  #[test]
  fn first_failing_gate_wins() {
    // Each status fails exactly the gate at its own depth; a deeper step
    // must report that gate, never a later one.
    let cases = [
      (StudentStatus::ProfilePending, Route::StudentProfile),
      (StudentStatus::SkillsPending, Route::SkillExtraction),
      (StudentStatus::PreferencesPending, Route::Preferences),
    ];
    for (status, expected) in cases {
      let s = session(record(status));
      assert_eq!(target(StudentStep::Result, &s), Some(expected), "{status:?}");
    }
  }

  #[test]
  fn result_requires_match_result() {
    let mut r = record(StudentStatus::Matched);
    assert_eq!(target(StudentStep::Status, &session(r.clone())), None);
    assert_eq!(target(StudentStep::Result, &session(r.clone())), Some(Route::Status));
    r.match_result = Some(MatchResult {
      company_id:   "c1".into(),
      company_name: "Acme".into(),
      score:        87.5,
      explanation:  vec!["skills overlap".into()],
      status:       MatchOutcome::Matched,
    });
    assert_eq!(target(StudentStep::Result, &session(r)), None);
  }

  #[test]
  fn evaluation_is_deterministic() {
    let s = session(record(StudentStatus::PreferencesPending));
    for step in [StudentStep::Profile, StudentStep::Skills, StudentStep::Status, StudentStep::Result] {
      assert_eq!(
        evaluate::<Student>(step, Some(&s), &at()),
        evaluate::<Student>(step, Some(&s), &at()),
      );
    }
  }

  #[test]
  fn uninitialised_container_shows_placeholder_and_never_navigates() {
    let (_writer, reader) = container::<StudentRecord>();
    let guard = Guard::<Student>::new(StudentStep::Result, at());
    let mut nav = Recorder::default();
    let state = guard.apply(&reader.snapshot(), &mut nav);
    assert_eq!(state, GuardState::WaitingForInit);
    assert!(!state.renders_content());
    assert!(nav.visits.is_empty());
  }

  #[test]
  fn denial_navigates_exactly_once() {
    let (writer, reader) = container();
    writer.complete_hydration(Some(session(record(StudentStatus::SkillsPending))));
    let guard = Guard::<Student>::new(StudentStep::Status, at());
    let mut nav = Recorder::default();
    let state = guard.apply(&reader.snapshot(), &mut nav);
    assert!(matches!(state, GuardState::Deny(ref r) if r.target == Route::SkillExtraction));
    assert_eq!(nav.visits.len(), 1);
  }

  #[tokio::test]
  async fn resolve_waits_for_hydration_then_allows() {
    let (writer, reader) = container();
    let guard = Guard::<Student>::new(StudentStep::Status, at());
    let mut waiting = reader.clone();
    let task = tokio::spawn(async move {
      let mut nav = Recorder::default();
      (guard.resolve(&mut waiting, &mut nav).await, nav.visits.len())
    });
    tokio::task::yield_now().await;
    writer.complete_hydration(Some(session(record(StudentStatus::Processing))));
    let (state, visits) = task.await.unwrap();
    assert_eq!(state, GuardState::Allow);
    assert_eq!(visits, 0);
  }

  #[tokio::test]
  async fn next_change_skips_writes_that_keep_the_state() {
    let (writer, reader) = container();
    writer.complete_hydration(Some(session(record(StudentStatus::Processing))));
    let guard = Guard::<Student>::new(StudentStep::Status, at());
    let mut watching = reader.clone();
    let last = guard.resolve(&mut watching, &mut Recorder::default()).await;
    assert_eq!(last, GuardState::Allow);

    let task = tokio::spawn(async move {
      let mut nav = Recorder::default();
      let next = guard.next_change(&mut watching, &last, &mut nav).await;
      (next, nav.visits.len())
    });
    tokio::task::yield_now().await;
    writer.complete_hydration(Some(session(record(StudentStatus::Processing))));
    tokio::task::yield_now().await;
    writer.complete_hydration(Some(session(record(StudentStatus::SkillsPending))));

    let (next, visits) = task.await.unwrap();
    assert!(matches!(next, Some(GuardState::Deny(ref r)) if r.target == Route::SkillExtraction));
    assert_eq!(visits, 1);
  }

  #[tokio::test]
  async fn next_change_ends_with_the_writer() {
    let (writer, mut reader) = container::<StudentRecord>();
    drop(writer);
    let guard = Guard::<Student>::new(StudentStep::Status, at());
    let next = guard
      .next_change(&mut reader, &GuardState::WaitingForInit, &mut Recorder::default())
      .await;
    assert!(next.is_none());
  }
}
