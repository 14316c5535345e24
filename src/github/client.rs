//! GitHub REST client (blocking)
//!
//! One request per call, no retries. HTTP 404 becomes `NotFound`, any other
//! non-success status becomes `RemoteRejected` carrying GitHub's `message`.

use super::{Asset, NewRelease, ReleaseHost, Release, RepoInfo, RepoRef, TagRef, Tagger, open_asset};
use crate::core::error::{CorralError, CorralResult, ResultExt};
use reqwest::Method;
use reqwest::StatusCode;
use reqwest::blocking::{Client, RequestBuilder, Response};
use serde::Deserialize;
use serde::de::DeserializeOwned;
use std::path::Path;
use std::time::Duration;
use tracing::debug;

pub const DEFAULT_API_URL: &str = "https://api.github.com";
const API_VERSION: &str = "2022-11-28";
const PAGE_SIZE: usize = 100;
const TIMEOUT: Duration = Duration::from_secs(30);

pub struct GithubClient {
  api_url: String,
  token: Option<String>,
  client: Client,
}

#[derive(Deserialize)]
struct ApiMessage {
  message: String,
}

#[derive(Deserialize)]
struct BranchPayload {
  commit: CommitPayload,
}

#[derive(Deserialize)]
struct CommitPayload {
  sha: String,
}

#[derive(Deserialize)]
struct TagPayload {
  tag: String,
  sha: String,
}

impl GithubClient {
  /// Client against `GITHUB_API_URL` (GitHub Enterprise) or api.github.com
  pub fn new(token: Option<String>) -> CorralResult<Self> {
    let api_url = std::env::var("GITHUB_API_URL").unwrap_or_else(|_| DEFAULT_API_URL.to_string());
    Self::with_api_url(&api_url, token)
  }

  pub fn with_api_url(api_url: &str, token: Option<String>) -> CorralResult<Self> {
    let client = Client::builder()
      .timeout(TIMEOUT)
      .user_agent(concat!("corral/", env!("CARGO_PKG_VERSION")))
      .build()
      .context("Failed to build HTTP client")?;

    Ok(Self {
      api_url: api_url.trim_end_matches('/').to_string(),
      token: token.filter(|t| !t.is_empty()),
      client,
    })
  }

  fn repo_url(&self, repo: &RepoRef, rest: &str) -> String {
    format!("{}/repos/{}/{}{}", self.api_url, repo.owner, repo.name, rest)
  }

  fn request(&self, method: Method, url: &str) -> RequestBuilder {
    debug!(%method, url, "github request");
    let builder = self
      .client
      .request(method, url)
      .header("Accept", "application/vnd.github+json")
      .header("X-GitHub-Api-Version", API_VERSION);

    match &self.token {
      Some(token) => builder.bearer_auth(token),
      None => builder,
    }
  }

  /// Send and map the status onto corral's error taxonomy
  fn send(&self, operation: &str, request: RequestBuilder) -> CorralResult<Response> {
    let response = request.send()?;
    let status = response.status();

    if status.is_success() {
      return Ok(response);
    }

    let body = response.text().unwrap_or_default();
    let message = serde_json::from_str::<ApiMessage>(&body)
      .map(|m| m.message)
      .unwrap_or(body);

    if status == StatusCode::NOT_FOUND {
      return Err(CorralError::not_found(operation.to_string()));
    }

    Err(CorralError::rejected(operation, Some(status.as_u16()), message))
  }

  fn send_json<T: DeserializeOwned>(&self, operation: &str, request: RequestBuilder) -> CorralResult<T> {
    let response = self.send(operation, request)?;
    let value = response
      .json::<T>()
      .map_err(|e| CorralError::rejected(operation, None, format!("unexpected response: {}", e)))?;
    Ok(value)
  }
}

/// Strip the RFC 6570 `{?name,label}` suffix GitHub puts on `upload_url`
pub fn upload_endpoint(upload_url: &str) -> &str {
  upload_url.split('{').next().unwrap_or(upload_url)
}

impl ReleaseHost for GithubClient {
  fn list_releases(&self, repo: &RepoRef) -> CorralResult<Vec<Release>> {
    let mut releases = Vec::new();
    let mut page = 1;

    loop {
      let request = self
        .request(Method::GET, &self.repo_url(repo, "/releases"))
        .query(&[("per_page", PAGE_SIZE), ("page", page)]);
      let batch: Vec<Release> = self.send_json(&format!("list releases of {}", repo), request)?;
      let done = batch.len() < PAGE_SIZE;
      releases.extend(batch);
      if done {
        break;
      }
      page += 1;
    }

    Ok(releases)
  }

  fn delete_release(&self, repo: &RepoRef, release_id: u64) -> CorralResult<()> {
    let url = self.repo_url(repo, &format!("/releases/{}", release_id));
    self.send(
      &format!("delete release {} of {}", release_id, repo),
      self.request(Method::DELETE, &url),
    )?;
    Ok(())
  }

  fn branch_tip(&self, repo: &RepoRef, branch: &str) -> CorralResult<String> {
    let url = self.repo_url(repo, &format!("/branches/{}", branch));
    let payload: BranchPayload = self.send_json(&format!("branch {} of {}", branch, repo), self.request(Method::GET, &url))?;
    Ok(payload.commit.sha)
  }

  fn create_tag(
    &self,
    repo: &RepoRef,
    tag: &str,
    message: &str,
    object_sha: &str,
    object_type: &str,
    tagger: &Tagger,
  ) -> CorralResult<TagRef> {
    let operation = format!("create tag {} on {}", tag, repo);
    let body = serde_json::json!({
      "tag": tag,
      "message": message,
      "object": object_sha,
      "type": object_type,
      "tagger": {
        "name": tagger.name,
        "email": tagger.email,
        "date": chrono::Utc::now().to_rfc3339_opts(chrono::SecondsFormat::Secs, true),
      },
    });
    let created: TagPayload = self.send_json(
      &operation,
      self.request(Method::POST, &self.repo_url(repo, "/git/tags")).json(&body),
    )?;

    let reference = serde_json::json!({
      "ref": format!("refs/tags/{}", created.tag),
      "sha": created.sha,
    });
    self.send(
      &operation,
      self.request(Method::POST, &self.repo_url(repo, "/git/refs")).json(&reference),
    )?;

    Ok(TagRef {
      tag: created.tag,
      sha: created.sha,
    })
  }

  fn create_release(&self, repo: &RepoRef, release: &NewRelease) -> CorralResult<Release> {
    self.send_json(
      &format!("create release {} on {}", release.tag_name, repo),
      self.request(Method::POST, &self.repo_url(repo, "/releases")).json(release),
    )
  }

  fn upload_asset(
    &self,
    repo: &RepoRef,
    release: &Release,
    content_type: &str,
    file_name: &str,
    file: &Path,
  ) -> CorralResult<Asset> {
    let endpoint = match upload_endpoint(&release.upload_url) {
      "" => format!(
        "https://uploads.github.com/repos/{}/{}/releases/{}/assets",
        repo.owner, repo.name, release.id
      ),
      url => url.to_string(),
    };

    let handle = open_asset(file)?;
    let request = self
      .request(Method::POST, &endpoint)
      .query(&[("name", file_name)])
      .header("Content-Type", content_type)
      .body(handle);

    self.send_json(&format!("upload {} to release {}", file_name, release.tag_name), request)
  }

  fn repository(&self, repo: &RepoRef) -> CorralResult<RepoInfo> {
    self.send_json(
      &format!("repository {}", repo),
      self.request(Method::GET, &self.repo_url(repo, "")),
    )
  }

  fn file_exists(&self, repo: &RepoRef, branch: &str, path: &str) -> CorralResult<bool> {
    let url = self.repo_url(repo, &format!("/contents/{}", path.trim_start_matches('/')));
    let request = self.request(Method::GET, &url).query(&[("ref", branch)]);
    match self.send(&format!("{} on {}@{}", path, repo, branch), request) {
      Ok(_) => Ok(true),
      Err(CorralError::NotFound { .. }) => Ok(false),
      Err(e) => Err(e),
    }
  }
}
