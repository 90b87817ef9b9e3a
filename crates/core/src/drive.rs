//! Google Drive share-link parsing and download-confirmation helpers.
//!
//! Drive share links come in two shapes:
//!
//! ```text
//! https://drive.google.com/file/d/<id>/view?usp=sharing
//! https://drive.google.com/open?id=<id>&authuser=0
//! ```
//!
//! Large files are not served directly: the first request returns an HTML
//! warning page plus a `download_warning*` cookie whose value must be sent
//! back as `confirm=<token>`.

use crate::error::CoreError;

/// Filename used when the upstream response carries no usable
/// `Content-Disposition` header.
pub const DEFAULT_DOWNLOAD_FILENAME: &str = "video.mp4";

/// Substring whose presence in a response body marks the virus-scan
/// warning page.
pub const CONFIRM_MARKER: &str = "confirm=";

/// Cookie name prefix carrying the confirmation token.
pub const CONFIRM_COOKIE_PREFIX: &str = "download_warning";

/// Characters that terminate a file id inside a URL.
const ID_TERMINATORS: &[char] = &['/', '?', '&', '#'];

/// Extract the Drive file id from a share link.
///
/// The `/d/<id>` form takes precedence; the `id=<id>` query form is only
/// consulted when the URL has no `/d/` segment.
pub fn extract_file_id(drive_url: &str) -> Result<&str, CoreError> {
    let candidate = if let Some((_, rest)) = drive_url.split_once("/d/") {
        rest.split(ID_TERMINATORS).next()
    } else if let Some((_, rest)) = drive_url.split_once("id=") {
        rest.split(ID_TERMINATORS).next()
    } else {
        None
    };

    match candidate {
        Some(id) if !id.is_empty() => Ok(id),
        _ => Err(CoreError::InvalidDriveUrl),
    }
}

/// Build the direct-download URL for a file id against the given Drive origin.
pub fn direct_download_url(base_url: &str, file_id: &str) -> String {
    format!(
        "{}/uc?export=download&id={file_id}",
        base_url.trim_end_matches('/')
    )
}

/// Append a confirmation token to a direct-download URL.
pub fn with_confirm_token(download_url: &str, token: &str) -> String {
    format!("{download_url}&confirm={token}")
}

/// Whether a response body is the confirmation page rather than the file.
pub fn needs_confirmation(body: &str) -> bool {
    body.contains(CONFIRM_MARKER)
}

/// Find the confirmation token among raw `Set-Cookie` header values.
///
/// Returns the value of the first cookie whose name starts with
/// [`CONFIRM_COOKIE_PREFIX`].
pub fn confirm_token_from_cookies<'a, I>(set_cookie_headers: I) -> Option<String>
where
    I: IntoIterator<Item = &'a str>,
{
    set_cookie_headers.into_iter().find_map(|header| {
        let pair = header.split(';').next()?.trim();
        let (name, value) = pair.split_once('=')?;
        name.trim()
            .starts_with(CONFIRM_COOKIE_PREFIX)
            .then(|| value.trim().to_string())
    })
}

/// Extract the filename from a `Content-Disposition` header value.
///
/// Only the plain `filename=` parameter is read. Quotes are stripped and any
/// directory components are dropped.
pub fn filename_from_content_disposition(header: &str) -> Option<String> {
    let param = header
        .split(';')
        .map(str::trim)
        .find_map(|part| part.strip_prefix("filename="))?;

    let name = param.trim().trim_matches('"');
    let name = name.rsplit(['/', '\\']).next().unwrap_or(name);

    (!name.is_empty()).then(|| name.to_string())
}
