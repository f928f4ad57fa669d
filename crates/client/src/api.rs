//! REST client for the detection/violation backend endpoints.
//!
//! Wraps the backend HTTP API (image analysis, overlay detection,
//! decision recording, and the driver/violation-type admin surface)
//! using [`reqwest`]. Every call maps transport failures and non-2xx
//! statuses to a typed [`ApiError`] so callers can surface them
//! without corrupting their own state.

use reqwest::multipart::{Form, Part};

use parkwatch_core::detection::{validate_box, validate_confidence, Detection};
use parkwatch_core::driver::{DriverRecord, NewDriver, NewViolationType, ViolationType};
use parkwatch_core::types::ViolationId;

use crate::config::BackendConfig;
use crate::responses::{DetectResponse, FirstAnalysis, ViolationReport, ZoomAnalysis};

/// HTTP client for a single backend instance.
pub struct ViolationApi {
    client: reqwest::Client,
    base_url: String,
}

/// Errors from the backend REST layer.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// The HTTP request itself failed (network, DNS, TLS, timeout).
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// The backend returned a non-2xx status code.
    #[error("Backend error ({status}): {body}")]
    Backend {
        /// HTTP status code.
        status: u16,
        /// Raw response body for debugging.
        body: String,
    },
}

impl ViolationApi {
    /// Create a new API client for a backend instance.
    ///
    /// * `base_url` - Base HTTP URL, e.g. `http://127.0.0.1:8000`.
    pub fn new(base_url: String) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url,
        }
    }

    /// Create an API client reusing an existing [`reqwest::Client`]
    /// (useful for connection pooling).
    pub fn with_client(client: reqwest::Client, base_url: String) -> Self {
        Self { client, base_url }
    }

    /// Build a client from environment configuration, applying the
    /// configured request timeout.
    pub fn from_config(config: &BackendConfig) -> Result<Self, ApiError> {
        let client = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(config.request_timeout_secs))
            .build()?;
        Ok(Self::with_client(client, config.base_url.clone()))
    }

    /// Base HTTP URL of the backend.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /* ---- review flow endpoints ---- */

    /// Upload the wide shot for violation screening.
    ///
    /// Sends a `POST /analyze_first_image` multipart request with the
    /// image bytes under the `file` field.
    pub async fn analyze_first_image(
        &self,
        image: Vec<u8>,
        filename: &str,
    ) -> Result<FirstAnalysis, ApiError> {
        let form = Form::new().part("file", image_part(image, filename)?);

        let response = self
            .client
            .post(format!("{}/analyze_first_image", self.base_url))
            .multipart(form)
            .send()
            .await?;

        tracing::debug!(filename, "First-image analysis submitted");
        Self::parse_response(response).await
    }

    /// Upload the close-up for plate reading and driver lookup.
    ///
    /// Sends a `POST /analyze_zoom_image` multipart request with the
    /// image bytes plus the violation id held from the first phase.
    pub async fn analyze_zoom_image(
        &self,
        image: Vec<u8>,
        filename: &str,
        violation_id: &ViolationId,
    ) -> Result<ZoomAnalysis, ApiError> {
        let form = Form::new()
            .part("file", image_part(image, filename)?)
            .text("prekrsaj_id", violation_id.as_str().to_string());

        let response = self
            .client
            .post(format!("{}/analyze_zoom_image", self.base_url))
            .multipart(form)
            .send()
            .await?;

        tracing::debug!(filename, violation_id = %violation_id, "Zoom analysis submitted");
        Self::parse_response(response).await
    }

    /// Run the detector on an image purely for overlay display.
    ///
    /// Sends a `POST /detect` multipart request and returns the boxes
    /// in natural-image pixel coordinates. Independent of the
    /// violation-decision endpoints. Detections with malformed boxes
    /// or out-of-range confidences are dropped with a warning rather
    /// than passed to the renderer.
    pub async fn detect(&self, image: Vec<u8>, filename: &str) -> Result<Vec<Detection>, ApiError> {
        let form = Form::new().part("file", image_part(image, filename)?);

        let response = self
            .client
            .post(format!("{}/detect", self.base_url))
            .multipart(form)
            .send()
            .await?;

        let parsed: DetectResponse = Self::parse_response(response).await?;
        let mut detections = parsed.detections;
        detections.retain(|d| {
            match validate_box(&d.bbox).and_then(|_| validate_confidence(d.confidence)) {
                Ok(()) => true,
                Err(e) => {
                    tracing::warn!(class = %d.class, error = %e, "Dropping malformed detection");
                    false
                }
            }
        });
        Ok(detections)
    }

    /// Record a confirmed violation.
    pub async fn record_violation(&self, report: &ViolationReport) -> Result<(), ApiError> {
        let response = self
            .client
            .post(format!("{}/record_violation", self.base_url))
            .json(report)
            .send()
            .await?;

        tracing::info!(
            driver_id = report.driver_id,
            violation_id = %report.violation_id,
            "Violation recorded",
        );
        Self::check_status(response).await
    }

    /// Reject a detection, retaining the sample server-side for
    /// future model training.
    pub async fn reject_violation(&self, report: &ViolationReport) -> Result<(), ApiError> {
        let response = self
            .client
            .post(format!("{}/reject_violation", self.base_url))
            .json(report)
            .send()
            .await?;

        tracing::info!(
            driver_id = report.driver_id,
            violation_id = %report.violation_id,
            "Detection rejected, sample retained for training",
        );
        Self::check_status(response).await
    }

    /* ---- admin endpoints ---- */

    /// Look up the driver registered for a plate.
    ///
    /// Sends a `GET /driver/{plate}` request.
    pub async fn driver_by_plate(&self, plate: &str) -> Result<DriverRecord, ApiError> {
        let response = self
            .client
            .get(format!("{}/driver/{}", self.base_url, plate))
            .send()
            .await?;

        Self::parse_response(response).await
    }

    /// List all registered drivers (`GET /vozaci`).
    pub async fn list_drivers(&self) -> Result<Vec<DriverRecord>, ApiError> {
        let response = self
            .client
            .get(format!("{}/vozaci", self.base_url))
            .send()
            .await?;

        Self::parse_response(response).await
    }

    /// List the violation-class catalog (`GET /prekrsaji`).
    pub async fn list_violation_types(&self) -> Result<Vec<ViolationType>, ApiError> {
        let response = self
            .client
            .get(format!("{}/prekrsaji", self.base_url))
            .send()
            .await?;

        Self::parse_response(response).await
    }

    /// Register a new driver (`POST /add_driver`).
    pub async fn add_driver(&self, driver: &NewDriver) -> Result<(), ApiError> {
        let response = self
            .client
            .post(format!("{}/add_driver", self.base_url))
            .json(driver)
            .send()
            .await?;

        Self::check_status(response).await
    }

    /// Register a new violation class (`POST /add_violation_type`).
    pub async fn add_violation_type(&self, vt: &NewViolationType) -> Result<(), ApiError> {
        let response = self
            .client
            .post(format!("{}/add_violation_type", self.base_url))
            .json(vt)
            .send()
            .await?;

        Self::check_status(response).await
    }

    /* ---- private helpers ---- */

    /// Ensure the response has a success status code. Returns the
    /// response unchanged on success, or an [`ApiError::Backend`]
    /// containing the status and body text on failure.
    async fn ensure_success(response: reqwest::Response) -> Result<reqwest::Response, ApiError> {
        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "<unreadable body>".to_string());
            return Err(ApiError::Backend {
                status: status.as_u16(),
                body,
            });
        }
        Ok(response)
    }

    /// Parse a successful JSON response body into the expected type.
    async fn parse_response<T: serde::de::DeserializeOwned>(
        response: reqwest::Response,
    ) -> Result<T, ApiError> {
        let response = Self::ensure_success(response).await?;
        Ok(response.json::<T>().await?)
    }

    /// Assert the response has a success status code, discarding the body.
    async fn check_status(response: reqwest::Response) -> Result<(), ApiError> {
        Self::ensure_success(response).await?;
        Ok(())
    }
}

/// Build the multipart file part the backend expects.
fn image_part(image: Vec<u8>, filename: &str) -> Result<Part, reqwest::Error> {
    Part::bytes(image)
        .file_name(filename.to_string())
        .mime_str("image/jpeg")
}
