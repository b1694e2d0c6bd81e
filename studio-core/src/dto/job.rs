//! Render job DTOs

use serde::{Deserialize, Serialize};

/// One source clip of a short-drama video
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Clip {
    pub url: String,
    /// Trim start in seconds
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start: Option<f64>,
    /// Trim end in seconds
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end: Option<f64>,
}

/// Request to create a render job
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RenderRequest {
    pub clips: Vec<Clip>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub audio_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub subtitles: Option<String>,
    pub width: u32,
    pub height: u32,
    pub fps: u32,
    pub codec: String,
    pub crf: u8,
}

impl RenderRequest {
    /// Every media location referenced by this request, clips first
    pub fn media_urls(&self) -> Vec<String> {
        let mut urls: Vec<String> = self.clips.iter().map(|c| c.url.clone()).collect();
        if let Some(audio) = &self.audio_url {
            urls.push(audio.clone());
        }
        urls
    }
}

/// Request to check which media locations are resolvable
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ValidateMediaRequest {
    pub urls: Vec<String>,
}
