//! [`ApiClient`] as the hydrator's identity source.
//!
//! Student identity is one read of `/auth/me`. Company identity is
//! `/company/auth/me` plus the company's job list, combined into the
//! `{company, jobs}` document the company record deserialises from.
//!
//! Bodies are handed over unparsed; deciding whether they are a valid
//! record (or JSON at all) is the hydrator's job.

use aura_core::{
  ActorKind, Credential,
  hydrate::{Fetched, IdentitySource},
};
use serde_json::{Value, json};

use crate::{ApiClient, Error, Result};

const STUDENT_ME: &str = "/auth/me";
const COMPANY_ME: &str = "/company/auth/me";
const COMPANY_JOBS: &str = "/api/company/jobs";

impl ApiClient {
  async fn company_identity(&self, credential: &Credential) -> Result<Vec<u8>> {
    let raw = self.get_raw(COMPANY_ME, Some(credential), &[]).await?;
    // A body that is not JSON is passed through to fail validation as is.
    let Ok(company) = serde_json::from_slice::<Value>(&raw) else {
      return Ok(raw);
    };
    // Without an id there is nothing to list jobs for; the record itself
    // then fails validation in the hydrator.
    let Some(id) = company.get("id").and_then(Value::as_str).map(str::to_owned) else {
      return Ok(json!({ "company": company, "jobs": [] }).to_string().into_bytes());
    };
    let raw = self
      .get_raw(COMPANY_JOBS, Some(credential), &[("companyId", id.as_str())])
      .await?;
    let Ok(jobs) = serde_json::from_slice::<Value>(&raw) else {
      return Ok(raw);
    };
    Ok(json!({ "company": company, "jobs": jobs }).to_string().into_bytes())
  }
}

impl IdentitySource for ApiClient {
  type Error = Error;

  async fn fetch_identity<'a>(
    &'a self,
    actor: ActorKind,
    credential: &'a Credential,
  ) -> Result<Fetched> {
    let document = match actor {
      ActorKind::Student => self.get_raw(STUDENT_ME, Some(credential), &[]).await,
      ActorKind::Company => self.company_identity(credential).await,
    };
    match document {
      Ok(body) => Ok(Fetched::Document(body)),
      Err(Error::Unauthorized { .. }) => Ok(Fetched::Rejected),
      Err(e) => Err(e),
    }
  }
}
