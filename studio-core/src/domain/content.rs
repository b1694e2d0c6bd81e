//! Generated content types
//!
//! Results of the one-shot generation endpoints. These are also the values
//! persisted into the local result store, so they serialize back to the same
//! camelCase shape the backend uses.

use serde::{Deserialize, Serialize};

/// A drafted sermon
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SermonDraft {
    pub title: String,
    #[serde(default)]
    pub outline: Vec<String>,
    pub content: String,
}

/// A drafted Bible message
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BibleMessage {
    pub title: String,
    pub passage: String,
    pub content: String,
}

/// One section of a product detail page
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CopySection {
    pub heading: String,
    pub body: String,
}

/// Generated product detail-page copy
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductCopy {
    pub headline: String,
    #[serde(default)]
    pub sections: Vec<CopySection>,
}

impl ProductCopy {
    /// Flattens the copy into plain text, headline first
    pub fn to_plain_text(&self) -> String {
        let mut out = self.headline.clone();
        for section in &self.sections {
            out.push_str("\n\n");
            out.push_str(&section.heading);
            out.push('\n');
            out.push_str(&section.body);
        }
        out
    }
}

/// Generated product images
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductImages {
    pub images: Vec<String>,
}

/// A translated text
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Translation {
    pub translation: String,
    pub detected_language: Option<String>,
}

/// Availability of a single media resource
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MediaAvailability {
    pub url: String,
    pub available: bool,
    pub reason: Option<String>,
}

/// Result of a media pre-flight check
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MediaCheck {
    #[serde(default)]
    pub results: Vec<MediaAvailability>,
}

impl MediaCheck {
    /// Resources the backend could not resolve
    pub fn unavailable(&self) -> Vec<&MediaAvailability> {
        self.results.iter().filter(|r| !r.available).collect()
    }

    /// Whether every requested resource is resolvable
    ///
    /// URLs missing from the response count as unavailable.
    pub fn all_available(&self, requested: &[String]) -> bool {
        requested.iter().all(|url| {
            self.results
                .iter()
                .any(|r| &r.url == url && r.available)
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_product_copy_plain_text() {
        let copy = ProductCopy {
            headline: "Lightweight hiking boots".to_string(),
            sections: vec![
                CopySection {
                    heading: "Comfort".to_string(),
                    body: "Cushioned sole.".to_string(),
                },
                CopySection {
                    heading: "Durability".to_string(),
                    body: "Ripstop upper.".to_string(),
                },
            ],
        };

        assert_eq!(
            copy.to_plain_text(),
            "Lightweight hiking boots\n\nComfort\nCushioned sole.\n\nDurability\nRipstop upper."
        );
    }

    #[test]
    fn test_media_check_missing_url_is_unavailable() {
        let check: MediaCheck = serde_json::from_value(json!({
            "results": [
                {"url": "/media/a.mp4", "available": true},
                {"url": "/media/b.mp4", "available": false, "reason": "404"}
            ]
        }))
        .unwrap();

        let requested = vec!["/media/a.mp4".to_string()];
        assert!(check.all_available(&requested));

        let requested = vec!["/media/a.mp4".to_string(), "/media/c.mp4".to_string()];
        assert!(!check.all_available(&requested));

        assert_eq!(check.unavailable().len(), 1);
        assert_eq!(check.unavailable()[0].url, "/media/b.mp4");
    }

    #[test]
    fn test_sermon_outline_defaults_to_empty() {
        let draft: SermonDraft = serde_json::from_value(json!({
            "title": "Grace",
            "content": "..."
        }))
        .unwrap();
        assert!(draft.outline.is_empty());
    }
}
