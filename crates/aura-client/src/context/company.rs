//! Company auth, verification, profile and job actions.

use aura_core::{
  Company,
  company::{CompanyProfilePatch, CompanySession, Job, NewJob},
  session::SessionStore,
  state::{Snapshot, Trigger},
};
use serde::Serialize;
use serde_json::Value;

use super::SessionContext;
use crate::{
  ApiClient, Error, Result,
  wire::{Credentials, MessageResponse, OtpResponse, ProcessResponse, TokenResponse},
};

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct Registration<'a> {
  email:        &'a str,
  password:     &'a str,
  company_name: &'a str,
}

#[derive(Serialize)]
struct EmailOtp<'a> {
  email: &'a str,
  #[serde(skip_serializing_if = "Option::is_none")]
  otp:   Option<&'a str>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct Gst<'a> {
  gst_number: &'a str,
}

/// A new job tagged with the company that owns it.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct JobSubmission<'a> {
  company_id: &'a str,
  #[serde(flatten)]
  job:        &'a NewJob,
}

impl<S: SessionStore> SessionContext<Company, S> {
  /// `POST /company/auth/login`, store the issued token, then hydrate.
  pub async fn login(&self, email: &str, password: &str) -> Result<Snapshot<CompanySession>> {
    let token: TokenResponse = self
      .client
      .post("/company/auth/login", None, &Credentials { email, password })
      .await?;
    self.store_credential(token.access_token).await?;
    self.refresh(Trigger::Action("login")).await
  }

  /// `POST /company/auth/register`. No token is issued; the company logs in
  /// after verifying its email.
  pub async fn register(&self, email: &str, password: &str, company_name: &str) -> Result<MessageResponse> {
    let body = Registration { email, password, company_name };
    self.client.post("/company/auth/register", None, &body).await
  }

  pub async fn request_email_otp(&self, email: &str) -> Result<OtpResponse> {
    let credential = self.credential().await?;
    let outcome = self
      .client
      .post("/company/auth/otp/request", credential.as_ref(), &EmailOtp { email, otp: None })
      .await;
    self.settle(outcome).await
  }

  pub async fn verify_email_otp(&self, email: &str, otp: &str) -> Result<Snapshot<CompanySession>> {
    let credential = self.credential().await?;
    let outcome: Result<MessageResponse> = self
      .client
      .post("/company/auth/otp/verify", credential.as_ref(), &EmailOtp { email, otp: Some(otp) })
      .await;
    self.settle(outcome).await?;
    self.refresh(Trigger::Action("verify email")).await
  }

  pub async fn verify_gst(&self, gst_number: &str) -> Result<Snapshot<CompanySession>> {
    let credential = self.require_credential().await?;
    let outcome: Result<MessageResponse> =
      self.client.post("/company/verify/gst", Some(&credential), &Gst { gst_number }).await;
    self.settle(outcome).await?;
    self.refresh(Trigger::Action("verify gst")).await
  }

  pub async fn update_profile(&self, patch: &CompanyProfilePatch) -> Result<Snapshot<CompanySession>> {
    let credential = self.require_credential().await?;
    let outcome: Result<Value> =
      self.client.patch("/company/profile", Some(&credential), patch).await;
    self.settle(outcome).await?;
    self.refresh(Trigger::Action("update profile")).await
  }

  /// Create a job for the signed-in company. Requires a hydrated session.
  pub async fn create_job(&self, job: &NewJob) -> Result<Job> {
    let credential = self.require_credential().await?;
    let snapshot = self.snapshot();
    let company_id = snapshot
      .record()
      .map(|s| s.company.id.as_str())
      .ok_or(Error::NotAuthenticated)?;
    let outcome: Result<Job> = self
      .client
      .post("/api/company/jobs", Some(&credential), &JobSubmission { company_id, job })
      .await;
    let created = self.settle(outcome).await?;
    tracing::info!(job_id = %created.id, "job created");
    self.refresh(Trigger::Action("create job")).await?;
    Ok(created)
  }

  /// Submit a draft job for processing. Returns whether the server accepted
  /// it.
  pub async fn process_job(&self, job_id: &str) -> Result<bool> {
    let credential = self.require_credential().await?;
    let path = ApiClient::encoded_path(&["api", "company", "jobs", job_id, "process"])?;
    let outcome: Result<ProcessResponse> =
      self.client.post(&path, Some(&credential), &serde_json::json!({})).await;
    let accepted = self.settle(outcome).await?.success;
    self.refresh(Trigger::Action("process job")).await?;
    Ok(accepted)
  }

  pub async fn logout(&self) -> Result<Snapshot<CompanySession>> {
    self.logout_at("/company/auth/logout").await
  }
}
