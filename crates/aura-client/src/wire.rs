//! Response bodies of the auth and job endpoints.

use serde::{Deserialize, Serialize};

/// Returned by the login and student register endpoints.
#[derive(Debug, Clone, Deserialize)]
pub struct TokenResponse {
  pub access_token: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct MessageResponse {
  pub message: String,
}

/// Returned by the OTP request endpoints.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OtpResponse {
  pub message:    String,
  #[serde(default)]
  pub success:    Option<bool>,
  /// Seconds until the code expires.
  #[serde(default)]
  pub expires_in: Option<u64>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ProcessResponse {
  pub success: bool,
}

#[derive(Debug, Serialize)]
pub(crate) struct Credentials<'a> {
  pub email:    &'a str,
  pub password: &'a str,
}
