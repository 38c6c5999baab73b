// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Upload of exported projects to a repository contents API.
//!
//! The request shape follows `PUT /repos/{repo}/contents/{path}`. A prior
//! `GET` fetches the current file revision (`sha`) so an existing file is
//! updated instead of rejected. Credentials are not handled here beyond an
//! optional bearer token the caller resolves, usually from the environment;
//! pointing the endpoint at a proxy that injects credentials needs none.

use crate::io::export::{to_text, ExportFormat};
use crate::models::project::Project;
use base64::{engine::general_purpose::STANDARD, Engine as _};
use serde::{Deserialize, Serialize};
use std::sync::mpsc::{channel, Receiver};
use thiserror::Error;

const FALLBACK_ERROR: &str = "Failed to upload file.";

#[derive(Debug, Error)]
pub enum UploadError {
    #[error("Unsupported file type. Please use .json or .svg.")]
    UnsupportedFileType,
    #[error("Repository and path are required")]
    MissingTarget,
    #[error("Export failed: {0}")]
    Export(String),
    #[error("Network error: {0}")]
    Network(String),
    #[error("Remote API error ({status}): {message}")]
    Remote { status: u16, message: String },
}

impl From<reqwest::Error> for UploadError {
    fn from(e: reqwest::Error) -> Self {
        UploadError::Network(e.to_string())
    }
}

/// What to upload and where.
#[derive(Debug, Clone, PartialEq)]
pub struct UploadRequest {
    /// `owner/name`
    pub repo: String,
    /// Path inside the repository, e.g. `art/star.json`.
    pub path: String,
    pub message: String,
    pub content: String,
}

/// Body of the contents `PUT`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PutContents {
    pub message: String,
    /// Base64 of the file content.
    pub content: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sha: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ContentsMeta {
    sha: Option<String>,
}

#[derive(Debug, Deserialize)]
struct RemoteErrorBody {
    message: Option<String>,
}

/// Remote contents API.
pub trait ContentsApi {
    /// Revision marker of an existing file, `None` if it does not exist.
    fn existing_sha(&self, repo: &str, path: &str) -> Result<Option<String>, UploadError>;
    fn put_contents(&self, repo: &str, path: &str, body: &PutContents) -> Result<(), UploadError>;
}

/// Pick the export format from the target path's extension.
pub fn format_for_path(path: &str) -> Result<ExportFormat, UploadError> {
    let extension = path.rsplit_once('.').map(|(_, ext)| ext.to_ascii_lowercase());
    match extension.as_deref() {
        Some("json") => Ok(ExportFormat::Json),
        Some("svg") => Ok(ExportFormat::Svg),
        _ => Err(UploadError::UnsupportedFileType),
    }
}

/// Build an upload request for `project`, exporting it in the format the
/// path asks for.
pub fn prepare_request(
    project: &Project,
    repo: &str,
    path: &str,
    message: &str,
) -> Result<UploadRequest, UploadError> {
    if repo.trim().is_empty() || path.trim().is_empty() {
        return Err(UploadError::MissingTarget);
    }
    let format = format_for_path(path)?;
    let content = to_text(project, format).map_err(|e| UploadError::Export(format!("{:#}", e)))?;
    Ok(UploadRequest {
        repo: repo.trim().to_string(),
        path: path.trim().trim_start_matches('/').to_string(),
        message: message.to_string(),
        content,
    })
}

/// Create or update the file. A failed existence check counts as "new file".
pub fn upload(api: &dyn ContentsApi, request: &UploadRequest) -> Result<(), UploadError> {
    let sha = match api.existing_sha(&request.repo, &request.path) {
        Ok(sha) => sha,
        Err(e) => {
            log::debug!("Existence check for {} failed, creating: {}", request.path, e);
            None
        }
    };

    let body = PutContents {
        message: request.message.clone(),
        content: STANDARD.encode(request.content.as_bytes()),
        sha,
    };
    api.put_contents(&request.repo, &request.path, &body)
}

/// Contents API over HTTP.
pub struct HttpContentsApi {
    client: reqwest::blocking::Client,
    endpoint: String,
    token: Option<String>,
}

impl HttpContentsApi {
    pub fn new(endpoint: &str, token: Option<String>) -> Result<Self, UploadError> {
        let client = reqwest::blocking::Client::builder()
            .user_agent(concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")))
            .build()?;
        Ok(Self {
            client,
            endpoint: endpoint.trim_end_matches('/').to_string(),
            token,
        })
    }

    fn url(&self, repo: &str, path: &str) -> String {
        format!("{}/repos/{}/contents/{}", self.endpoint, repo, path)
    }

    fn request(&self, method: reqwest::Method, url: &str) -> reqwest::blocking::RequestBuilder {
        let builder = self
            .client
            .request(method, url)
            .header(reqwest::header::ACCEPT, "application/vnd.github+json");
        match &self.token {
            Some(token) => builder.bearer_auth(token),
            None => builder,
        }
    }
}

impl ContentsApi for HttpContentsApi {
    fn existing_sha(&self, repo: &str, path: &str) -> Result<Option<String>, UploadError> {
        let response = self.request(reqwest::Method::GET, &self.url(repo, path)).send()?;
        if !response.status().is_success() {
            return Ok(None);
        }
        let meta: ContentsMeta = response.json()?;
        Ok(meta.sha)
    }

    fn put_contents(&self, repo: &str, path: &str, body: &PutContents) -> Result<(), UploadError> {
        let response = self
            .request(reqwest::Method::PUT, &self.url(repo, path))
            .json(body)
            .send()?;

        let status = response.status();
        if status.is_success() {
            return Ok(());
        }

        let message = response
            .json::<RemoteErrorBody>()
            .ok()
            .and_then(|b| b.message)
            .unwrap_or_else(|| FALLBACK_ERROR.to_string());
        Err(UploadError::Remote {
            status: status.as_u16(),
            message,
        })
    }
}

/// Run an upload on a background thread. The receiver yields one result.
pub fn spawn_upload(
    endpoint: String,
    token: Option<String>,
    request: UploadRequest,
) -> Receiver<Result<(), UploadError>> {
    let (sender, receiver) = channel();
    std::thread::spawn(move || {
        let result = HttpContentsApi::new(&endpoint, token).and_then(|api| upload(&api, &request));
        let _ = sender.send(result);
    });
    receiver
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::dot::Dot;
    use std::cell::RefCell;

    #[derive(Default)]
    struct FakeApi {
        sha: Option<Result<Option<String>, u16>>,
        put_status: Option<(u16, String)>,
        puts: RefCell<Vec<(String, String, PutContents)>>,
    }

    impl ContentsApi for FakeApi {
        fn existing_sha(&self, _repo: &str, _path: &str) -> Result<Option<String>, UploadError> {
            match &self.sha {
                Some(Ok(sha)) => Ok(sha.clone()),
                Some(Err(_)) => Err(UploadError::Network("connection refused".to_string())),
                None => Ok(None),
            }
        }

        fn put_contents(&self, repo: &str, path: &str, body: &PutContents) -> Result<(), UploadError> {
            self.puts
                .borrow_mut()
                .push((repo.to_string(), path.to_string(), body.clone()));
            match &self.put_status {
                Some((status, message)) => Err(UploadError::Remote {
                    status: *status,
                    message: message.clone(),
                }),
                None => Ok(()),
            }
        }
    }

    fn request(content: &str) -> UploadRequest {
        UploadRequest {
            repo: "me/art".to_string(),
            path: "dots/star.json".to_string(),
            message: "add star".to_string(),
            content: content.to_string(),
        }
    }

    #[test]
    fn test_new_file_has_no_sha() {
        let api = FakeApi::default();
        upload(&api, &request("héllo")).unwrap();

        let puts = api.puts.borrow();
        assert_eq!(puts.len(), 1);
        let (repo, path, body) = &puts[0];
        assert_eq!(repo, "me/art");
        assert_eq!(path, "dots/star.json");
        assert_eq!(body.sha, None);
        assert_eq!(STANDARD.decode(&body.content).unwrap(), "héllo".as_bytes());
    }

    #[test]
    fn test_existing_file_is_updated() {
        let api = FakeApi {
            sha: Some(Ok(Some("abc123".to_string()))),
            ..Default::default()
        };
        upload(&api, &request("{}")).unwrap();
        assert_eq!(api.puts.borrow()[0].2.sha.as_deref(), Some("abc123"));
    }

    #[test]
    fn test_failed_existence_check_creates() {
        let api = FakeApi {
            sha: Some(Err(500)),
            ..Default::default()
        };
        upload(&api, &request("{}")).unwrap();
        assert_eq!(api.puts.borrow()[0].2.sha, None);
    }

    #[test]
    fn test_remote_error_surfaces_message() {
        let api = FakeApi {
            put_status: Some((422, "Invalid request".to_string())),
            ..Default::default()
        };
        let err = upload(&api, &request("{}")).unwrap_err();
        assert_eq!(err.to_string(), "Remote API error (422): Invalid request");
    }

    #[test]
    fn test_sha_is_omitted_from_body_when_absent() {
        let body = PutContents {
            message: "m".to_string(),
            content: "e30=".to_string(),
            sha: None,
        };
        let json = serde_json::to_value(&body).unwrap();
        assert!(json.get("sha").is_none());
    }

    #[test]
    fn test_prepare_picks_format_from_extension() {
        let mut project = Project::new("star");
        project.dots = vec![Dot::new(0.0, 0.0), Dot::new(10.0, 0.0)];

        let json = prepare_request(&project, "me/art", "a/star.JSON", "msg").unwrap();
        assert_eq!(serde_json::from_str::<Project>(&json.content).unwrap(), project);

        let svg = prepare_request(&project, "me/art", "/a/star.svg", "msg").unwrap();
        assert!(svg.content.starts_with("<svg"));
        assert_eq!(svg.path, "a/star.svg");

        assert!(matches!(
            prepare_request(&project, "me/art", "a/star.png", "msg"),
            Err(UploadError::UnsupportedFileType)
        ));
        assert!(matches!(
            prepare_request(&project, " ", "a/star.json", "msg"),
            Err(UploadError::MissingTarget)
        ));
    }
}
