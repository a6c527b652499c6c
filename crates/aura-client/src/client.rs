//! Async HTTP client wrapping the Aura-Match JSON API.

use aura_core::Credential;
use reqwest::{Client, Method, RequestBuilder, Response, StatusCode, Url};
use serde::{Serialize, de::DeserializeOwned};

use crate::{Error, Result, config::ClientConfig};

/// Async HTTP client for the Aura-Match REST API.
///
/// Attaches `Authorization: Bearer <token>` to every call made with a
/// credential and reports HTTP 401 as [`Error::Unauthorized`]. Cheap to
/// clone; the inner [`reqwest::Client`] is `Arc`-based.
#[derive(Debug, Clone)]
pub struct ApiClient {
  http:     Client,
  base_url: String,
}

impl ApiClient {
  pub fn new(config: &ClientConfig) -> Result<Self> {
    config.validate()?;
    let http = Client::builder().timeout(config.timeout()).build()?;
    Ok(Self { http, base_url: config.api_url.trim_end_matches('/').to_owned() })
  }

  pub fn base_url(&self) -> &str { &self.base_url }

  fn url(&self, path: &str) -> String { format!("{}{}", self.base_url, path) }

  /// `/seg/seg/...` with every segment percent-encoded, so opaque server ids
  /// can be placed in a path.
  pub fn encoded_path(segments: &[&str]) -> Result<String> {
    let mut url = Url::parse("http://localhost/")
      .map_err(|e| Error::Config(format!("path base: {e}")))?;
    url
      .path_segments_mut()
      .map_err(|()| Error::Config("path base cannot carry segments".into()))?
      .clear()
      .extend(segments);
    Ok(url.path().to_owned())
  }

  fn request(
    &self,
    method: Method,
    path: &str,
    credential: Option<&Credential>,
  ) -> RequestBuilder {
    let req = self.http.request(method, self.url(path));
    match credential {
      Some(c) => req.bearer_auth(c.as_str()),
      None => req,
    }
  }

  /// Send `req`, mapping 401 and any other non-success status to errors.
  async fn dispatch(&self, method: Method, path: &str, req: RequestBuilder) -> Result<Response> {
    tracing::debug!(%method, path, "api request");
    let resp = req.send().await?;
    match resp.status() {
      StatusCode::UNAUTHORIZED => Err(Error::Unauthorized { path: path.to_owned() }),
      status if !status.is_success() => {
        Err(Error::Status { method, path: path.to_owned(), status })
      }
      _ => Ok(resp),
    }
  }

  async fn execute<T: DeserializeOwned>(
    &self,
    method: Method,
    path: &str,
    req: RequestBuilder,
  ) -> Result<T> {
    let body = self.dispatch(method, path, req).await?.bytes().await?;
    serde_json::from_slice(&body)
      .map_err(|source| Error::Response { path: path.to_owned(), source })
  }

  // ── Verbs ─────────────────────────────────────────────────────────────────

  /// `GET` returning the successful body unparsed.
  pub async fn get_raw(
    &self,
    path: &str,
    credential: Option<&Credential>,
    query: &[(&str, &str)],
  ) -> Result<Vec<u8>> {
    let req = self.request(Method::GET, path, credential).query(query);
    let body = self.dispatch(Method::GET, path, req).await?.bytes().await?;
    Ok(body.to_vec())
  }

  pub async fn get<T: DeserializeOwned>(
    &self,
    path: &str,
    credential: Option<&Credential>,
    query: &[(&str, &str)],
  ) -> Result<T> {
    let req = self.request(Method::GET, path, credential).query(query);
    self.execute(Method::GET, path, req).await
  }

  pub async fn post<B, T>(
    &self,
    path: &str,
    credential: Option<&Credential>,
    body: &B,
  ) -> Result<T>
  where
    B: Serialize + ?Sized,
    T: DeserializeOwned,
  {
    let req = self.request(Method::POST, path, credential).json(body);
    self.execute(Method::POST, path, req).await
  }

  pub async fn patch<B, T>(
    &self,
    path: &str,
    credential: Option<&Credential>,
    body: &B,
  ) -> Result<T>
  where
    B: Serialize + ?Sized,
    T: DeserializeOwned,
  {
    let req = self.request(Method::PATCH, path, credential).json(body);
    self.execute(Method::PATCH, path, req).await
  }

  /// `POST` without a body, discarding whatever the server answers.
  pub async fn post_empty(&self, path: &str, credential: Option<&Credential>) -> Result<()> {
    let req = self.request(Method::POST, path, credential);
    self.dispatch(Method::POST, path, req).await?;
    Ok(())
  }

  // ── OAuth ─────────────────────────────────────────────────────────────────

  /// `<api>/auth/google?redirect_uri=<callback>`, with `callback` encoded.
  pub fn google_oauth_url(&self, callback: &str) -> Result<String> {
    let mut url = Url::parse(&self.url("/auth/google"))
      .map_err(|e| Error::Config(format!("invalid api_url {:?}: {e}", self.base_url)))?;
    url.query_pairs_mut().append_pair("redirect_uri", callback);
    Ok(url.to_string())
  }
}
