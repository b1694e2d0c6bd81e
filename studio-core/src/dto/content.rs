//! Content generation DTOs

use serde::{Deserialize, Serialize};

/// Request to draft a sermon
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SermonRequest {
    pub title: String,
    pub scripture: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub audience: Option<String>,
    /// Target length in minutes
    #[serde(skip_serializing_if = "Option::is_none")]
    pub length_minutes: Option<u32>,
}

/// Request to draft a Bible message
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BibleMessageRequest {
    pub passage: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub theme: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tone: Option<String>,
}

/// Request to generate product detail-page copy
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductCopyRequest {
    pub product_name: String,
    pub features: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub target_audience: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub language: Option<String>,
}

/// Request to generate product images
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductImageRequest {
    pub prompt: String,
    pub count: u8,
}

/// Request to translate a text
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TranslateRequest {
    pub text: String,
    pub target_language: String,
}
