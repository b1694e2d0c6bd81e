//! Render job API endpoints

use async_trait::async_trait;
use reqwest::{StatusCode, Url};
use serde_json::Value;
use studio_core::domain::content::MediaCheck;
use studio_core::domain::job::{CreateOutcome, JobSnapshot};
use studio_core::dto::job::{RenderRequest, ValidateMediaRequest};
use tracing::debug;

use crate::StudioClient;
use crate::error::{ClientError, Result};
use crate::parse_body;

/// The two calls a job poller needs from the backend
///
/// Kept as a trait so the poller can run against a scripted backend in tests.
#[async_trait]
pub trait JobApi: Send + Sync {
    /// Submits a render job
    async fn create_job(&self, req: &RenderRequest) -> Result<CreateOutcome>;

    /// Fetches the current status of a job
    ///
    /// Transport failures and non-JSON bodies are returned as errors; every
    /// JSON answer, including "not found", is a [`JobSnapshot`].
    async fn job_status(&self, job_id: &str) -> Result<JobSnapshot>;
}

impl StudioClient {
    // =============================================================================
    // Video Rendering
    // =============================================================================

    /// Submit a short-drama render job
    ///
    /// # Returns
    /// Either a terminal outcome (fast path) or an accepted job id to poll
    pub async fn create_render_job(&self, req: &RenderRequest) -> Result<CreateOutcome> {
        let url = self.url("/api/video/create");
        let response = self.client.post(&url).json(req).send().await?;

        let (_, value) = self.read_json(response).await?;
        Ok(CreateOutcome::from_value(value))
    }

    /// Get the status of a render job
    pub async fn get_job_status(&self, job_id: &str) -> Result<JobSnapshot> {
        let url = self.status_url(job_id)?;
        let response = self.client.get(url).send().await?;

        let status = response.status();
        let body = response.text().await?;
        snapshot_from_body(status, &body)
    }

    /// Status URL with the job id encoded as a single path segment
    fn status_url(&self, job_id: &str) -> Result<Url> {
        let base = self.url("/api/video/status");
        let mut url =
            Url::parse(&base).map_err(|e| ClientError::InvalidUrl(format!("{}: {}", base, e)))?;
        url.path_segments_mut()
            .map_err(|_| ClientError::InvalidUrl(format!("{} cannot have path segments", base)))?
            .push(job_id);
        Ok(url)
    }

    /// Check which media locations the backend can currently resolve
    pub async fn validate_media(&self, urls: &[String]) -> Result<MediaCheck> {
        let url = self.url("/api/video/validate");
        let response = self
            .client
            .post(&url)
            .json(&ValidateMediaRequest {
                urls: urls.to_vec(),
            })
            .send()
            .await?;

        self.handle_response(response).await
    }
}

/// Decodes a status response body into a snapshot
///
/// A 404 is "not found" regardless of its body, so an HTML 404 page from a
/// proxy still counts against the not-found budget rather than failing.
pub(crate) fn snapshot_from_body(status: StatusCode, body: &str) -> Result<JobSnapshot> {
    if status == StatusCode::NOT_FOUND {
        debug!("Status endpoint answered 404");
        return Ok(JobSnapshot::NotFound);
    }

    let value: Value = parse_body(status, body)?;
    Ok(JobSnapshot::from_value(value))
}

#[async_trait]
impl JobApi for StudioClient {
    async fn create_job(&self, req: &RenderRequest) -> Result<CreateOutcome> {
        self.create_render_job(req).await
    }

    async fn job_status(&self, job_id: &str) -> Result<JobSnapshot> {
        self.get_job_status(job_id).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::decode_envelope;

    #[test]
    fn test_status_url_encodes_job_id() {
        let client = StudioClient::new("http://localhost:3000/");

        let url = client.status_url("j-42").unwrap();
        assert_eq!(url.as_str(), "http://localhost:3000/api/video/status/j-42");

        let url = client.status_url("job#7/a?b%").unwrap();
        assert_eq!(
            url.as_str(),
            "http://localhost:3000/api/video/status/job%237%2Fa%3Fb%25"
        );
        assert_eq!(url.fragment(), None);
        assert_eq!(url.query(), None);
    }

    #[test]
    fn test_status_url_keeps_base_path() {
        let client = StudioClient::new("http://localhost:3000/studio");
        let url = client.status_url("j 1").unwrap();
        assert_eq!(url.path(), "/studio/api/video/status/j%201");
    }

    #[test]
    fn test_status_url_rejects_bad_base() {
        let client = StudioClient::new("not a url");
        let err = client.status_url("j1").unwrap_err();
        assert!(matches!(err, ClientError::InvalidUrl(_)));
    }

    #[tokio::test]
    async fn test_job_status_requests_encoded_path() {
        use tokio::io::{AsyncReadExt, AsyncWriteExt};

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let server = tokio::spawn(async move {
            let (mut socket, _) = listener.accept().await.unwrap();
            let mut buf = vec![0u8; 4096];
            let n = socket.read(&mut buf).await.unwrap();
            let request = String::from_utf8_lossy(&buf[..n]).to_string();
            let body = r#"{"ok":true,"status":"processing","progress":10}"#;
            let response = format!(
                "HTTP/1.1 200 OK\r\ncontent-type: application/json\r\ncontent-length: {}\r\nconnection: close\r\n\r\n{}",
                body.len(),
                body
            );
            socket.write_all(response.as_bytes()).await.unwrap();
            request.lines().next().unwrap_or_default().to_string()
        });

        let client = StudioClient::new(format!("http://{}", addr));
        let snapshot = client.get_job_status("job#7").await.unwrap();
        let request_line = server.await.unwrap();

        assert_eq!(request_line, "GET /api/video/status/job%237 HTTP/1.1");
        assert_eq!(snapshot.progress(), 10);
    }

    #[test]
    fn test_snapshot_from_404() {
        let snapshot = snapshot_from_body(StatusCode::NOT_FOUND, "<html>Not Found</html>").unwrap();
        assert_eq!(snapshot, JobSnapshot::NotFound);
    }

    #[test]
    fn test_snapshot_from_html_error_page() {
        let err = snapshot_from_body(
            StatusCode::INTERNAL_SERVER_ERROR,
            "<html><body>Internal Server Error</body></html>",
        )
        .unwrap_err();
        assert!(matches!(err, ClientError::NonJson { status: 500, .. }));
    }

    #[test]
    fn test_snapshot_from_json() {
        let snapshot = snapshot_from_body(
            StatusCode::OK,
            r#"{"ok":true,"status":"processing","progress":42}"#,
        )
        .unwrap();
        assert_eq!(snapshot.progress(), 42);
    }

    #[test]
    fn test_snapshot_from_json_error_status() {
        let snapshot = snapshot_from_body(
            StatusCode::INTERNAL_SERVER_ERROR,
            r#"{"ok":false,"error":"encoder crashed"}"#,
        )
        .unwrap();
        assert_eq!(
            snapshot,
            JobSnapshot::Failed {
                error: "encoder crashed".to_string()
            }
        );
    }

    #[test]
    fn test_decode_media_check() {
        let value = serde_json::json!({
            "ok": true,
            "results": [{"url": "/media/a.mp4", "available": true}]
        });
        let check: MediaCheck = decode_envelope(StatusCode::OK, value).unwrap();
        assert!(check.all_available(&["/media/a.mp4".to_string()]));
    }
}
