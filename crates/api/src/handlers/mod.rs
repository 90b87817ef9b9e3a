//! The cloud functions.
//!
//! Each submodule is one stateless function: it declares its CORS policy and
//! exposes `handle(&AppState, FunctionEvent) -> FunctionResponse`. Handlers
//! catch every failure and turn it into a structured response; nothing is
//! propagated to the caller.

pub mod cloud_upload;
pub mod download_from_drive;
pub mod get_videos;
pub mod upload_video;
pub mod video_save;
pub mod video_service;
pub mod video_upload;

use std::fmt;
use std::str::FromStr;

use crate::event::{FunctionEvent, FunctionResponse};
use crate::state::AppState;

/// The deployable functions, by their public name.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FunctionName {
    DownloadFromDrive,
    GetVideos,
    UploadVideo,
    VideoSave,
    VideoUpload,
    CloudUpload,
    VideoService,
}

impl FunctionName {
    /// Every function, in registration order.
    pub const ALL: [FunctionName; 7] = [
        FunctionName::DownloadFromDrive,
        FunctionName::GetVideos,
        FunctionName::UploadVideo,
        FunctionName::VideoSave,
        FunctionName::VideoUpload,
        FunctionName::CloudUpload,
        FunctionName::VideoService,
    ];

    /// The name used in URLs and deployment manifests.
    pub fn as_str(self) -> &'static str {
        match self {
            FunctionName::DownloadFromDrive => "download-from-drive",
            FunctionName::GetVideos => "get-videos",
            FunctionName::UploadVideo => "upload-video",
            FunctionName::VideoSave => "video-save",
            FunctionName::VideoUpload => "video-upload",
            FunctionName::CloudUpload => "cloud-upload",
            FunctionName::VideoService => "video-service",
        }
    }
}

impl fmt::Display for FunctionName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when parsing an unknown function name.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Unknown function: {0}")]
pub struct UnknownFunction(pub String);

impl FromStr for FunctionName {
    type Err = UnknownFunction;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        FunctionName::ALL
            .into_iter()
            .find(|name| name.as_str() == s)
            .ok_or_else(|| UnknownFunction(s.to_string()))
    }
}

/// Run one invocation of the named function.
pub async fn invoke(
    state: &AppState,
    name: FunctionName,
    event: FunctionEvent,
) -> FunctionResponse {
    tracing::debug!(function = %name, method = %event.method(), "Invoking function");

    match name {
        FunctionName::DownloadFromDrive => download_from_drive::handle(state, event).await,
        FunctionName::GetVideos => get_videos::handle(state, event).await,
        FunctionName::UploadVideo => upload_video::handle(state, event).await,
        FunctionName::VideoSave => video_save::handle(state, event).await,
        FunctionName::VideoUpload => video_upload::handle(state, event).await,
        FunctionName::CloudUpload => cloud_upload::handle(state, event).await,
        FunctionName::VideoService => video_service::handle(state, event).await,
    }
}
