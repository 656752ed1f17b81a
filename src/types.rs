//! JSON bodies exchanged with callers of the generation endpoint.

use serde::{Deserialize, Serialize};

use crate::error::GenerationError;
use crate::gateway::{Generated, GenerationRequest};
use crate::ratio::AspectRatio;

/// Request body of `POST /api/generate-image`.
///
/// Every field is optional here; a missing prompt is reported by the gateway.
#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct GenerateImagePayload {
    /// Text prompt.
    pub prompt: Option<String>,
    /// Aspect-ratio tag.
    pub ratio: Option<String>,
    /// `WIDTHxHEIGHT` override.
    pub size: Option<String>,
    /// Style label for display.
    pub style: Option<String>,
    /// Base image for edits.
    pub reference_image_url: Option<String>,
    /// Edit mask, used only with `reference_image_url`.
    pub edit_mask_url: Option<String>,
}

impl From<GenerateImagePayload> for GenerationRequest {
    fn from(payload: GenerateImagePayload) -> Self {
        let GenerateImagePayload { prompt, mut ratio, mut size, style, reference_image_url, edit_mask_url } =
            payload;

        // Older clients sent the ratio tag in `size`.
        if ratio.is_none() && size.as_deref().and_then(AspectRatio::from_tag).is_some() {
            ratio = size.take();
        }

        Self {
            prompt: prompt.unwrap_or_default(),
            ratio,
            explicit_size: size,
            style,
            reference_image_url,
            edit_mask_url,
        }
    }
}

/// Success body.
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateImageResponse {
    /// Always `true`.
    pub success: bool,
    /// URL of the generated image.
    pub image_url: String,
    /// Display label for the image (`prompt | ratio | style`).
    pub revised_prompt: String,
    /// Pixel size that was requested.
    pub size: String,
}

impl From<Generated> for GenerateImageResponse {
    fn from(generated: Generated) -> Self {
        Self {
            success: true,
            image_url: generated.image_url,
            revised_prompt: generated.display_label,
            size: generated.resolved_size,
        }
    }
}

/// Failure body.
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    /// Human-readable error message.
    pub error: String,
    /// Diagnostic payload from the provider or the decoder.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
    /// Status returned by the provider.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<u16>,
}

impl ErrorResponse {
    /// An error with only a message.
    pub fn message(error: impl Into<String>) -> Self {
        Self { error: error.into(), details: None, status: None }
    }
}

impl From<&GenerationError> for ErrorResponse {
    fn from(err: &GenerationError) -> Self {
        Self {
            error: err.to_string(),
            details: err.raw_details().cloned(),
            status: err.provider_status(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn decode(value: serde_json::Value) -> GenerationRequest {
        serde_json::from_value::<GenerateImagePayload>(value).unwrap().into()
    }

    #[test]
    fn camel_case_fields_are_read() {
        let request = decode(json!({
            "prompt": "a cat",
            "ratio": "9:16",
            "size": "512x512",
            "style": "Neon",
            "referenceImageUrl": "ref.png",
            "editMaskUrl": "mask.png"
        }));
        assert_eq!(request.prompt, "a cat");
        assert_eq!(request.ratio.as_deref(), Some("9:16"));
        assert_eq!(request.explicit_size.as_deref(), Some("512x512"));
        assert_eq!(request.style.as_deref(), Some("Neon"));
        assert_eq!(request.reference_image_url.as_deref(), Some("ref.png"));
        assert_eq!(request.edit_mask_url.as_deref(), Some("mask.png"));
    }

    #[test]
    fn missing_prompt_and_nulls_decode() {
        let request = decode(json!({"referenceImageUrl": null}));
        assert_eq!(request.prompt, "");
        assert!(request.reference_image_url.is_none());
    }

    #[test]
    fn ratio_tag_in_size_is_treated_as_ratio() {
        let request = decode(json!({"prompt": "a cat", "size": "16:9"}));
        assert_eq!(request.ratio.as_deref(), Some("16:9"));
        assert!(request.explicit_size.is_none());
    }

    #[test]
    fn ratio_field_takes_precedence_over_legacy_size() {
        let request = decode(json!({"prompt": "a cat", "ratio": "1:1", "size": "16:9"}));
        assert_eq!(request.ratio.as_deref(), Some("1:1"));
        assert_eq!(request.explicit_size.as_deref(), Some("16:9"));
    }

    #[test]
    fn success_body_shape() {
        let body = GenerateImageResponse::from(Generated {
            image_url: "https://x/y.png".into(),
            resolved_size: "1792x1024".into(),
            display_label: "sunset | Horizontal (16:9)".into(),
        });
        assert_eq!(
            serde_json::to_value(body).unwrap(),
            json!({
                "success": true,
                "imageUrl": "https://x/y.png",
                "revisedPrompt": "sunset | Horizontal (16:9)",
                "size": "1792x1024"
            })
        );
    }

    #[test]
    fn error_body_omits_absent_fields() {
        let err = GenerationError::InvalidInput("Prompt is required".into());
        assert_eq!(
            serde_json::to_value(ErrorResponse::from(&err)).unwrap(),
            json!({"error": "Prompt is required"})
        );

        let err = GenerationError::Provider {
            provider: "OpenAI".into(),
            status: 429,
            details: json!("slow down"),
        };
        assert_eq!(
            serde_json::to_value(ErrorResponse::from(&err)).unwrap(),
            json!({"error": "OpenAI error (429)", "details": "slow down", "status": 429})
        );
    }
}
