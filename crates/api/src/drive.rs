//! Outbound Google Drive client.
//!
//! [`DriveClient`] resolves a file id to its direct-download URL, follows
//! the one-time virus-scan confirmation if Drive asks for it, and buffers
//! the file through a scratch file before returning it base64-encoded.

use std::path::{Path, PathBuf};
use std::time::Duration;

use reqwest::header::{HeaderMap, CONTENT_DISPOSITION, CONTENT_TYPE, SET_COOKIE};
use reqwest::StatusCode;
use tokio::io::AsyncWriteExt;
use uuid::Uuid;
use vidhost_core::data_url::encode_base64;
use vidhost_core::drive;

use crate::config::DriveConfig;
use crate::error::{FunctionError, FunctionResult};

/// A fully downloaded Drive file.
#[derive(Debug, Clone)]
pub struct DriveDownload {
    /// Name from `Content-Disposition`, or [`drive::DEFAULT_DOWNLOAD_FILENAME`].
    pub filename: String,
    /// Total bytes received.
    pub size: u64,
    /// File content, standard base64.
    pub content_base64: String,
}

/// Downloads publicly shared files from Google Drive.
pub struct DriveClient {
    client: reqwest::Client,
    base_url: String,
    scratch_dir: PathBuf,
    /// Deadline for the whole download, confirmation round trip included.
    timeout: Duration,
}

impl DriveClient {
    /// Build a client whose downloads time out after `config.timeout_secs`.
    pub fn new(config: &DriveConfig) -> Result<Self, reqwest::Error> {
        let timeout = Duration::from_secs(config.timeout_secs);
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            base_url: config.base_url.clone(),
            scratch_dir: config.scratch_dir.clone(),
            timeout,
        })
    }

    /// Download a file by id.
    ///
    /// At most two GETs are issued: the initial one and, when Drive serves
    /// its confirmation page instead of the file, one confirmed retry. Both
    /// share a single deadline; exceeding it yields [`FunctionError::Timeout`]
    /// and removes any partial scratch file.
    pub async fn download(&self, file_id: &str) -> FunctionResult<DriveDownload> {
        let (filename, size, scratch) = tokio::time::timeout(self.timeout, self.receive(file_id))
            .await
            .map_err(|_| FunctionError::Timeout)??;

        let content = tokio::fs::read(scratch.path()).await?;

        tracing::info!(file_id, %filename, size, "Downloaded file from Google Drive");

        Ok(DriveDownload {
            filename,
            size,
            content_base64: encode_base64(&content),
        })
    }

    /// Fetch the file and spool it to a scratch file.
    async fn receive(&self, file_id: &str) -> FunctionResult<(String, u64, ScratchFile)> {
        let url = drive::direct_download_url(&self.base_url, file_id);
        tracing::debug!(file_id, %url, "Requesting file from Google Drive");

        let upstream = self.fetch(&url, file_id).await?;

        let status = upstream.status();
        if status != StatusCode::OK {
            return Err(FunctionError::Upstream {
                status: status.as_u16(),
            });
        }

        let filename = upstream
            .headers()
            .get(CONTENT_DISPOSITION)
            .and_then(|value| value.to_str().ok())
            .and_then(drive::filename_from_content_disposition)
            .unwrap_or_else(|| drive::DEFAULT_DOWNLOAD_FILENAME.to_string());

        let scratch = ScratchFile::new(&self.scratch_dir);
        let size = upstream.write_to(scratch.path()).await?;

        Ok((filename, size, scratch))
    }

    /// Issue the initial GET and, if needed, the confirmed retry.
    async fn fetch(&self, url: &str, file_id: &str) -> FunctionResult<Upstream> {
        let response = self.client.get(url).send().await?;

        let redirected = response.status() == StatusCode::FOUND;
        if !redirected && !is_text(response.headers()) {
            return Ok(Upstream::Live(response));
        }

        let status = response.status();
        let headers = response.headers().clone();
        let page = response.bytes().await?;

        if !redirected && !drive::needs_confirmation(&String::from_utf8_lossy(&page)) {
            return Ok(Upstream::Buffered {
                status,
                headers,
                body: page.to_vec(),
            });
        }

        let token = drive::confirm_token_from_cookies(
            headers
                .get_all(SET_COOKIE)
                .iter()
                .filter_map(|value| value.to_str().ok()),
        );
        tracing::info!(
            file_id,
            has_token = token.is_some(),
            "Google Drive requested download confirmation, retrying"
        );

        let confirm_url = match &token {
            Some(token) => drive::with_confirm_token(url, token),
            None => url.to_string(),
        };
        let response = self.client.get(&confirm_url).send().await?;
        Ok(Upstream::Live(response))
    }
}

/// The response whose body is the file, possibly already read.
enum Upstream {
    Buffered {
        status: StatusCode,
        headers: HeaderMap,
        body: Vec<u8>,
    },
    Live(reqwest::Response),
}

impl Upstream {
    fn status(&self) -> StatusCode {
        match self {
            Upstream::Buffered { status, .. } => *status,
            Upstream::Live(response) => response.status(),
        }
    }

    fn headers(&self) -> &HeaderMap {
        match self {
            Upstream::Buffered { headers, .. } => headers,
            Upstream::Live(response) => response.headers(),
        }
    }

    /// Stream the body to `path`, returning the number of bytes written.
    async fn write_to(self, path: &Path) -> FunctionResult<u64> {
        let mut file = tokio::fs::File::create(path).await?;
        let mut total: u64 = 0;

        match self {
            Upstream::Buffered { body, .. } => {
                file.write_all(&body).await?;
                total += body.len() as u64;
            }
            Upstream::Live(mut response) => {
                while let Some(chunk) = response.chunk().await? {
                    file.write_all(&chunk).await?;
                    total += chunk.len() as u64;
                }
            }
        }

        file.flush().await?;
        Ok(total)
    }
}

fn is_text(headers: &HeaderMap) -> bool {
    headers
        .get(CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
        .is_some_and(|value| value.starts_with("text/"))
}

/// A uniquely named file in the scratch directory, removed on drop.
struct ScratchFile {
    path: PathBuf,
}

impl ScratchFile {
    fn new(dir: &Path) -> Self {
        let path = dir.join(format!("vidhost-drive-{}.part", Uuid::new_v4().simple()));
        Self { path }
    }

    fn path(&self) -> &Path {
        &self.path
    }
}

impl Drop for ScratchFile {
    fn drop(&mut self) {
        if let Err(e) = std::fs::remove_file(&self.path) {
            if e.kind() != std::io::ErrorKind::NotFound {
                tracing::warn!(
                    path = %self.path.display(),
                    error = %e,
                    "Failed to remove scratch file"
                );
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use reqwest::header::HeaderValue;

    use super::*;

    #[test]
    fn html_is_text() {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("text/html; charset=utf-8"));
        assert!(is_text(&headers));
    }

    #[test]
    fn video_is_not_text() {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("video/mp4"));
        assert!(!is_text(&headers));
        assert!(!is_text(&HeaderMap::new()));
    }

    #[test]
    fn scratch_file_is_removed_on_drop() {
        let dir = std::env::temp_dir();
        let path = {
            let scratch = ScratchFile::new(&dir);
            std::fs::write(scratch.path(), b"partial").unwrap();
            assert!(scratch.path().exists());
            scratch.path().to_path_buf()
        };
        assert!(!path.exists());
    }

    #[test]
    fn scratch_names_are_unique() {
        let dir = std::env::temp_dir();
        assert_ne!(ScratchFile::new(&dir).path, ScratchFile::new(&dir).path);
    }
}
