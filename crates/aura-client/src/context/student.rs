//! Student auth, verification and onboarding actions.

use aura_core::{
  Student,
  session::SessionStore,
  state::{Snapshot, Trigger},
  student::{Preferences, StudentProfilePatch, StudentRecord},
};
use serde::Serialize;
use serde_json::Value;

use super::SessionContext;
use crate::{
  Error, Result,
  wire::{Credentials, MessageResponse, OtpResponse, TokenResponse},
};

#[derive(Serialize)]
struct Registration<'a> {
  email:    &'a str,
  password: &'a str,
  phone:    &'a str,
  role:     &'static str,
}

#[derive(Serialize)]
struct EmailOtp<'a> {
  email: &'a str,
  #[serde(skip_serializing_if = "Option::is_none")]
  otp:   Option<&'a str>,
}

#[derive(Serialize)]
struct PhoneOtp<'a> {
  phone: &'a str,
  #[serde(skip_serializing_if = "Option::is_none")]
  otp:   Option<&'a str>,
}

#[derive(Serialize)]
struct ConfirmSkills<'a> {
  skills: &'a [String],
}

impl<S: SessionStore> SessionContext<Student, S> {
  /// `POST /auth/login`, store the issued token, then hydrate.
  pub async fn login(&self, email: &str, password: &str) -> Result<Snapshot<StudentRecord>> {
    let token: TokenResponse =
      self.client.post("/auth/login", None, &Credentials { email, password }).await?;
    self.store_credential(token.access_token).await?;
    self.refresh(Trigger::Action("login")).await
  }

  /// `POST /auth/register` as a student. The token is stored but the
  /// session is not hydrated; verification comes next.
  pub async fn register(&self, email: &str, password: &str, phone: &str) -> Result<()> {
    let body = Registration { email, password, phone, role: "student" };
    let token: TokenResponse = self.client.post("/auth/register", None, &body).await?;
    self.store_credential(token.access_token).await
  }

  pub async fn request_email_otp(&self, email: &str) -> Result<OtpResponse> {
    let credential = self.credential().await?;
    let outcome = self
      .client
      .post("/auth/request-email-otp", credential.as_ref(), &EmailOtp { email, otp: None })
      .await;
    self.settle(outcome).await
  }

  pub async fn verify_email_otp(&self, email: &str, otp: &str) -> Result<Snapshot<StudentRecord>> {
    let credential = self.credential().await?;
    let outcome: Result<MessageResponse> = self
      .client
      .post("/auth/verify-email-otp", credential.as_ref(), &EmailOtp { email, otp: Some(otp) })
      .await;
    self.settle(outcome).await?;
    self.refresh(Trigger::Action("verify email")).await
  }

  pub async fn request_phone_otp(&self, phone: &str) -> Result<OtpResponse> {
    let credential = self.credential().await?;
    let outcome = self
      .client
      .post("/auth/request-phone-otp", credential.as_ref(), &PhoneOtp { phone, otp: None })
      .await;
    self.settle(outcome).await
  }

  pub async fn verify_phone_otp(&self, phone: &str, otp: &str) -> Result<Snapshot<StudentRecord>> {
    let credential = self.credential().await?;
    let outcome: Result<MessageResponse> = self
      .client
      .post("/auth/verify-phone-otp", credential.as_ref(), &PhoneOtp { phone, otp: Some(otp) })
      .await;
    self.settle(outcome).await?;
    self.refresh(Trigger::Action("verify phone")).await
  }

  pub async fn logout(&self) -> Result<Snapshot<StudentRecord>> {
    self.logout_at("/auth/logout").await
  }

  /// Where to send the user to start Google sign-in.
  pub fn google_oauth_url(&self, callback: &str) -> Result<String> {
    self.client.google_oauth_url(callback)
  }

  /// Accept the token delivered to the OAuth callback.
  ///
  /// The token is kept only if it hydrates into a session.
  pub async fn complete_oauth(&self, token: &str) -> Result<Snapshot<StudentRecord>> {
    if token.is_empty() {
      return Err(Error::EmptyToken);
    }
    self.store_credential(token.to_owned()).await?;
    match self.refresh(Trigger::Action("oauth")).await {
      Ok(snapshot) if snapshot.is_authenticated() => Ok(snapshot),
      Ok(_) => {
        self.clear_credential().await?;
        Err(Error::NotAuthenticated)
      }
      Err(e) => {
        self.clear_credential().await?;
        Err(e)
      }
    }
  }

  // ── Onboarding ────────────────────────────────────────────────────────────

  pub async fn update_profile(&self, patch: &StudentProfilePatch) -> Result<Snapshot<StudentRecord>> {
    let credential = self.require_credential().await?;
    let outcome: Result<Value> =
      self.client.patch("/student/profile", Some(&credential), patch).await;
    self.settle(outcome).await?;
    self.refresh(Trigger::Action("update profile")).await
  }

  pub async fn confirm_skills(&self, skills: &[String]) -> Result<Snapshot<StudentRecord>> {
    let credential = self.require_credential().await?;
    let outcome: Result<Value> = self
      .client
      .post("/student/skills/confirm", Some(&credential), &ConfirmSkills { skills })
      .await;
    self.settle(outcome).await?;
    self.refresh(Trigger::Action("confirm skills")).await
  }

  pub async fn update_preferences(&self, preferences: &Preferences) -> Result<Snapshot<StudentRecord>> {
    let credential = self.require_credential().await?;
    let outcome: Result<Value> =
      self.client.post("/student/preferences", Some(&credential), preferences).await;
    self.settle(outcome).await?;
    self.refresh(Trigger::Action("update preferences")).await
  }
}
