//! Content generation API endpoints

use studio_core::domain::content::{
    BibleMessage, ProductCopy, ProductImages, SermonDraft, Translation,
};
use studio_core::dto::content::{
    BibleMessageRequest, ProductCopyRequest, ProductImageRequest, SermonRequest, TranslateRequest,
};

use crate::StudioClient;
use crate::error::Result;

impl StudioClient {
    // =============================================================================
    // Sermon & Bible Message
    // =============================================================================

    /// Draft a sermon
    pub async fn draft_sermon(&self, req: &SermonRequest) -> Result<SermonDraft> {
        let url = self.url("/api/sermon/draft");
        let response = self.client.post(&url).json(req).send().await?;

        self.handle_response(response).await
    }

    /// Draft a Bible message for a passage
    pub async fn draft_bible_message(&self, req: &BibleMessageRequest) -> Result<BibleMessage> {
        let url = self.url("/api/bible/message");
        let response = self.client.post(&url).json(req).send().await?;

        self.handle_response(response).await
    }

    // =============================================================================
    // Product Detail Page
    // =============================================================================

    /// Generate product detail-page copy
    pub async fn generate_product_copy(&self, req: &ProductCopyRequest) -> Result<ProductCopy> {
        let url = self.url("/api/product/copy");
        let response = self.client.post(&url).json(req).send().await?;

        self.handle_response(response).await
    }

    /// Generate product images
    pub async fn generate_product_images(
        &self,
        req: &ProductImageRequest,
    ) -> Result<ProductImages> {
        let url = self.url("/api/product/images");
        let response = self.client.post(&url).json(req).send().await?;

        self.handle_response(response).await
    }

    // =============================================================================
    // Translation
    // =============================================================================

    /// Translate a text into the target language
    pub async fn translate(&self, req: &TranslateRequest) -> Result<Translation> {
        let url = self.url("/api/translate");
        let response = self.client.post(&url).json(req).send().await?;

        self.handle_response(response).await
    }
}
