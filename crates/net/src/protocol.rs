//! Generation service payload types
//!
//! All payloads are JSON with camelCase keys.

use serde::{Deserialize, Serialize};

/// Rendering options applied to every generation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RenderOptions {
    pub text_mode: String,
    pub format: String,
    pub theme_name: String,
    pub num_cards: u32,
    pub card_split: String,
    pub export_as: String,
    pub text_amount: String,
    pub language: String,
    pub image_source: String,
    pub card_dimensions: String,
    pub workspace_access: String,
    pub external_access: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TextOptions {
    pub amount: String,
    pub language: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageOptions {
    pub source: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CardOptions {
    pub dimensions: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SharingOptions {
    pub workspace_access: String,
    pub external_access: String,
}

/// Body of a generation submission
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerationRequest {
    pub input_text: String,
    pub text_mode: String,
    pub format: String,
    pub theme_name: String,
    pub num_cards: u32,
    pub card_split: String,
    pub export_as: String,
    pub text_options: TextOptions,
    pub image_options: ImageOptions,
    pub card_options: CardOptions,
    pub sharing_options: SharingOptions,
}

impl GenerationRequest {
    pub fn new(input_text: String, options: &RenderOptions) -> Self {
        Self {
            input_text,
            text_mode: options.text_mode.clone(),
            format: options.format.clone(),
            theme_name: options.theme_name.clone(),
            num_cards: options.num_cards,
            card_split: options.card_split.clone(),
            export_as: options.export_as.clone(),
            text_options: TextOptions {
                amount: options.text_amount.clone(),
                language: options.language.clone(),
            },
            image_options: ImageOptions {
                source: options.image_source.clone(),
            },
            card_options: CardOptions {
                dimensions: options.card_dimensions.clone(),
            },
            sharing_options: SharingOptions {
                workspace_access: options.workspace_access.clone(),
                external_access: options.external_access.clone(),
            },
        }
    }
}

/// Successful submission response
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerationCreated {
    pub generation_id: String,
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use serde_json::json;

    pub(crate) fn options() -> RenderOptions {
        RenderOptions {
            text_mode: "preserve".to_string(),
            format: "document".to_string(),
            theme_name: "Night Sky".to_string(),
            num_cards: 5,
            card_split: "inputTextBreaks".to_string(),
            export_as: "pdf".to_string(),
            text_amount: "detailed".to_string(),
            language: "fr".to_string(),
            image_source: "pictographic".to_string(),
            card_dimensions: "a4".to_string(),
            workspace_access: "view".to_string(),
            external_access: "noAccess".to_string(),
        }
    }

    #[test]
    fn test_request_wire_shape() {
        let request = GenerationRequest::new("# Rapport".to_string(), &options());
        let value = serde_json::to_value(&request).unwrap();

        assert_eq!(
            value,
            json!({
                "inputText": "# Rapport",
                "textMode": "preserve",
                "format": "document",
                "themeName": "Night Sky",
                "numCards": 5,
                "cardSplit": "inputTextBreaks",
                "exportAs": "pdf",
                "textOptions": { "amount": "detailed", "language": "fr" },
                "imageOptions": { "source": "pictographic" },
                "cardOptions": { "dimensions": "a4" },
                "sharingOptions": { "workspaceAccess": "view", "externalAccess": "noAccess" }
            })
        );
    }

    #[test]
    fn test_created_ignores_extra_fields() {
        let created: GenerationCreated =
            serde_json::from_str(r#"{"generationId":"abc123","status":"pending"}"#).unwrap();
        assert_eq!(created.generation_id, "abc123");
    }
}
