//! The generation pipeline: validate, resolve size, call the provider,
//! normalize its response.

use std::sync::Arc;

use serde_json::Value;

use crate::error::GenerationError;
use crate::ports::{ImageProvider, ProviderReply, ProviderRequestBody};
use crate::ratio::{ratio_label, resolve_size};

/// Separator between the parts of a display label.
const LABEL_SEPARATOR: &str = " | ";

/// What the caller asked for.
#[derive(Debug, Clone, Default)]
pub struct GenerationRequest {
    /// Text prompt. Must be non-empty after trimming.
    pub prompt: String,
    /// Aspect-ratio tag such as `"16:9"`.
    pub ratio: Option<String>,
    /// `WIDTHxHEIGHT` override, used when well-formed.
    pub explicit_size: Option<String>,
    /// Style label. Only used for the display label.
    pub style: Option<String>,
    /// Base image for edits.
    pub reference_image_url: Option<String>,
    /// Region to edit. Ignored without `reference_image_url`.
    pub edit_mask_url: Option<String>,
}

/// A successful generation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Generated {
    /// Where the provider put the image.
    pub image_url: String,
    /// The size that was requested.
    pub resolved_size: String,
    /// `prompt | ratio label | style`, for display only.
    pub display_label: String,
}

/// Orchestrates one provider call per request. Holds no per-request state and
/// can be shared freely between tasks.
pub struct GenerationGateway {
    model: String,
    provider_name: String,
    provider: Option<Arc<dyn ImageProvider>>,
}

impl GenerationGateway {
    /// Create a gateway for `model`.
    ///
    /// `provider` is `None` when no credential is configured. Requests then
    /// fail as misconfigured instead of reaching the network.
    pub fn new(
        model: impl Into<String>,
        provider_name: impl Into<String>,
        provider: Option<Arc<dyn ImageProvider>>,
    ) -> Self {
        Self { model: model.into(), provider_name: provider_name.into(), provider }
    }

    /// The model identifier sent to the provider.
    #[must_use]
    pub fn model(&self) -> &str {
        &self.model
    }

    /// Whether a provider is available to serve requests.
    #[must_use]
    pub fn is_configured(&self) -> bool {
        self.provider.is_some()
    }

    /// Generate one image.
    ///
    /// # Errors
    ///
    /// Returns [`GenerationError`] for an empty prompt, a missing credential,
    /// an unreachable or failing provider, or a response with no image URL.
    pub async fn generate(&self, request: &GenerationRequest) -> Result<Generated, GenerationError> {
        if request.prompt.trim().is_empty() {
            return Err(GenerationError::InvalidInput("Prompt is required".to_string()));
        }

        let size = resolve_size(request.ratio.as_deref(), request.explicit_size.as_deref());

        let provider = self
            .provider
            .as_ref()
            .ok_or_else(|| GenerationError::Misconfigured { provider: self.provider_name.clone() })?;

        let body = self.build_body(request, &size);
        tracing::debug!(
            model = %body.model,
            size = %body.size,
            edit = body.image.is_some(),
            masked = body.mask.is_some(),
            "Dispatching generation request"
        );

        let reply = provider.send(&body).await.inspect_err(|e| {
            tracing::error!("{e}");
        })?;

        let image_url = self.interpret(reply)?;
        tracing::info!(size = %size, "Image generated");

        Ok(Generated {
            image_url,
            display_label: display_label(
                &request.prompt,
                request.ratio.as_deref(),
                request.style.as_deref(),
            ),
            resolved_size: size,
        })
    }

    /// Build the provider payload. The prompt is passed through untouched.
    #[must_use]
    pub fn build_body(&self, request: &GenerationRequest, size: &str) -> ProviderRequestBody {
        let image = non_empty(request.reference_image_url.as_deref());
        let mask = image.and(non_empty(request.edit_mask_url.as_deref()));
        ProviderRequestBody {
            model: self.model.clone(),
            prompt: request.prompt.clone(),
            size: size.to_string(),
            image: image.map(str::to_string),
            mask: mask.map(str::to_string),
        }
    }

    /// Turn a provider reply into an image URL or a typed error.
    fn interpret(&self, reply: ProviderReply) -> Result<String, GenerationError> {
        if !reply.is_success() {
            let details = serde_json::from_str::<Value>(&reply.body)
                .unwrap_or_else(|_| Value::String(reply.body.clone()));
            tracing::warn!(status = reply.status, "Provider rejected generation request");
            return Err(GenerationError::Provider {
                provider: self.provider_name.clone(),
                status: reply.status,
                details,
            });
        }

        let parsed = serde_json::from_str::<Value>(&reply.body).ok();
        if let Some(url) = parsed.as_ref().and_then(extract_image_url) {
            return Ok(url.to_string());
        }

        tracing::error!(status = reply.status, "Provider response contained no image URL");
        Err(GenerationError::UnparsableResponse {
            raw: parsed.unwrap_or(Value::String(reply.body)),
        })
    }
}

/// A response shape the provider is known to produce.
type ShapeMatcher = fn(&Value) -> Option<&str>;

/// Known response shapes, most current first.
const RESPONSE_SHAPES: &[(&str, ShapeMatcher)] =
    &[("structured_output", structured_output_url), ("legacy_data", legacy_data_url)];

/// Find the image URL in a provider response, trying each known shape in order.
#[must_use]
pub fn extract_image_url(response: &Value) -> Option<&str> {
    RESPONSE_SHAPES.iter().find_map(|(shape, matcher)| {
        let url = matcher(response)?;
        tracing::trace!(shape, "Matched response shape");
        Some(url)
    })
}

/// `{"output": [{"content": [{"type": "output_image", "image_url": "..."}]}]}`
fn structured_output_url(response: &Value) -> Option<&str> {
    let output = response
        .get("output")
        .filter(|v| !v.is_null())
        .or_else(|| response.get("outputs"))?;
    output.as_array()?.first()?.get("content")?.as_array()?.iter().find_map(|part| {
        if part.get("type")?.as_str()? == "output_image" {
            part.get("image_url")?.as_str().filter(|url| !url.is_empty())
        } else {
            None
        }
    })
}

/// `{"data": [{"url": "..."}]}`
fn legacy_data_url(response: &Value) -> Option<&str> {
    response.get("data")?.as_array()?.first()?.get("url")?.as_str().filter(|url| !url.is_empty())
}

/// Join prompt, ratio label and style with `" | "`, skipping empty parts.
#[must_use]
pub fn display_label(prompt: &str, ratio: Option<&str>, style: Option<&str>) -> String {
    let ratio = ratio_label(ratio);
    [Some(prompt), Some(ratio.as_str()), style]
        .into_iter()
        .flatten()
        .filter(|part| !part.trim().is_empty())
        .collect::<Vec<_>>()
        .join(LABEL_SEPARATOR)
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.trim().is_empty())
}
