//! Static model catalog.
//!
//! The catalog is fixed and ordered; it is never derived from the upstream
//! API. Entries list the models the relay is willing to pass through.

use parley_types::chat::ModelInfo;

/// Model used when a chat request names none.
pub const DEFAULT_MODEL: &str = "gpt-4o-mini";

/// The fixed, ordered model catalog.
pub fn model_catalog() -> Vec<ModelInfo> {
    vec![
        ModelInfo {
            id: "gpt-4o-mini".into(),
            display_name: "GPT-4o mini".into(),
            description: "Fast, low-cost default for everyday conversation.".into(),
        },
        ModelInfo {
            id: "gpt-4o".into(),
            display_name: "GPT-4o".into(),
            description: "Flagship multimodal model for harder questions.".into(),
        },
        ModelInfo {
            id: "o3-mini".into(),
            display_name: "o3-mini".into(),
            description: "Reasoning model for multi-step problems.".into(),
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_catalog_is_ordered_and_contains_default() {
        let models = model_catalog();
        assert_eq!(models.first().unwrap().id, DEFAULT_MODEL);
        assert_eq!(models.len(), 3);
    }
}
