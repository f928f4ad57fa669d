//! Abstraction over the review-flow backend operations.
//!
//! The session controller talks to the backend exclusively through
//! [`ViolationBackend`], so flow logic can be tested against a
//! scripted implementation without a network.

use async_trait::async_trait;

use parkwatch_core::detection::Detection;
use parkwatch_core::types::ViolationId;

use crate::api::{ApiError, ViolationApi};
use crate::responses::{FirstAnalysis, ViolationReport, ZoomAnalysis};

/// The five backend operations the review flow depends on.
#[async_trait]
pub trait ViolationBackend: Send + Sync {
    /// Screen the wide shot for a violation.
    async fn analyze_first_image(
        &self,
        image: Vec<u8>,
        filename: &str,
    ) -> Result<FirstAnalysis, ApiError>;

    /// Read the plate from the close-up and look up the driver.
    async fn analyze_zoom_image(
        &self,
        image: Vec<u8>,
        filename: &str,
        violation_id: &ViolationId,
    ) -> Result<ZoomAnalysis, ApiError>;

    /// Fetch overlay boxes for an image.
    async fn detect(&self, image: Vec<u8>, filename: &str) -> Result<Vec<Detection>, ApiError>;

    /// Record a confirmed violation.
    async fn record_violation(&self, report: &ViolationReport) -> Result<(), ApiError>;

    /// Reject a detection, retaining the sample for training.
    async fn reject_violation(&self, report: &ViolationReport) -> Result<(), ApiError>;
}

#[async_trait]
impl ViolationBackend for ViolationApi {
    async fn analyze_first_image(
        &self,
        image: Vec<u8>,
        filename: &str,
    ) -> Result<FirstAnalysis, ApiError> {
        ViolationApi::analyze_first_image(self, image, filename).await
    }

    async fn analyze_zoom_image(
        &self,
        image: Vec<u8>,
        filename: &str,
        violation_id: &ViolationId,
    ) -> Result<ZoomAnalysis, ApiError> {
        ViolationApi::analyze_zoom_image(self, image, filename, violation_id).await
    }

    async fn detect(&self, image: Vec<u8>, filename: &str) -> Result<Vec<Detection>, ApiError> {
        ViolationApi::detect(self, image, filename).await
    }

    async fn record_violation(&self, report: &ViolationReport) -> Result<(), ApiError> {
        ViolationApi::record_violation(self, report).await
    }

    async fn reject_violation(&self, report: &ViolationReport) -> Result<(), ApiError> {
        ViolationApi::reject_violation(self, report).await
    }
}
