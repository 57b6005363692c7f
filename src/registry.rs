//! Static model registry
//!
//! Maps user-facing display names to the wire ids the provider expects.
//! The registry is built once at startup and never changes afterwards.

use crate::error::{Result, RouterChatError};
use serde::Serialize;
use std::collections::HashSet;

/// Builtin display name / wire id pairs, in presentation order
const BUILTIN_MODELS: &[(&str, &str)] = &[
    ("LLaMA 3 (8B)", "meta-llama/llama-3-8b-instruct"),
    ("DeepSeek R1", "deepseek/deepseek-r1"),
    ("DeepSeek Chat V3", "deepseek/deepseek-chat-v3-0324"),
    ("Gemma 3 27B", "google/gemma-3-27b-it"),
    ("Mistral Small", "mistralai/devstral-small"),
];

/// Minimum Jaro-Winkler similarity for a "did you mean" suggestion
const SUGGESTION_THRESHOLD: f64 = 0.8;

/// A selectable model
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ModelDescriptor {
    /// Name the user types or picks (unique within a registry)
    pub display_name: String,
    /// Identifier sent to the provider in the `model` field
    pub wire_id: String,
}

impl ModelDescriptor {
    /// Create a new descriptor
    ///
    /// # Examples
    ///
    /// ```
    /// use routerchat::registry::ModelDescriptor;
    ///
    /// let model = ModelDescriptor::new("DeepSeek R1", "deepseek/deepseek-r1");
    /// assert_eq!(model.wire_id, "deepseek/deepseek-r1");
    /// ```
    pub fn new(display_name: impl Into<String>, wire_id: impl Into<String>) -> Self {
        Self {
            display_name: display_name.into(),
            wire_id: wire_id.into(),
        }
    }
}

/// Ordered, immutable set of selectable models
#[derive(Debug, Clone)]
pub struct ModelRegistry {
    models: Vec<ModelDescriptor>,
}

impl ModelRegistry {
    /// Build a registry from descriptors
    ///
    /// # Errors
    ///
    /// Returns `RouterChatError::Config` if the list is empty, a display name
    /// or wire id is blank, or a display name appears twice.
    pub fn new(models: Vec<ModelDescriptor>) -> Result<Self> {
        if models.is_empty() {
            return Err(
                RouterChatError::Config("model registry cannot be empty".to_string()).into(),
            );
        }

        let mut seen = HashSet::new();
        for model in &models {
            if model.display_name.trim().is_empty() || model.wire_id.trim().is_empty() {
                return Err(RouterChatError::Config(format!(
                    "model registry entry has a blank field: {:?}",
                    model
                ))
                .into());
            }
            if !seen.insert(model.display_name.as_str()) {
                return Err(RouterChatError::Config(format!(
                    "duplicate model display name: {}",
                    model.display_name
                ))
                .into());
            }
        }

        Ok(Self { models })
    }

    /// The registry shipped with RouterChat
    ///
    /// # Examples
    ///
    /// ```
    /// use routerchat::registry::ModelRegistry;
    ///
    /// let registry = ModelRegistry::builtin();
    /// let model = registry.lookup("DeepSeek R1").unwrap();
    /// assert_eq!(model.wire_id, "deepseek/deepseek-r1");
    /// ```
    pub fn builtin() -> Self {
        Self {
            models: BUILTIN_MODELS
                .iter()
                .map(|(name, wire_id)| ModelDescriptor::new(*name, *wire_id))
                .collect(),
        }
    }

    /// Find a model by exact, case-sensitive display name
    pub fn lookup(&self, display_name: &str) -> Option<&ModelDescriptor> {
        self.models.iter().find(|m| m.display_name == display_name)
    }

    /// Closest display name to `input`, if any is similar enough
    ///
    /// Used to re-prompt after a typo; never used to select implicitly.
    pub fn suggest(&self, input: &str) -> Option<&str> {
        let needle = input.trim().to_lowercase();
        if needle.is_empty() {
            return None;
        }

        self.models
            .iter()
            .map(|m| {
                let score = strsim::jaro_winkler(&needle, &m.display_name.to_lowercase());
                (m.display_name.as_str(), score)
            })
            .filter(|(_, score)| *score >= SUGGESTION_THRESHOLD)
            .max_by(|a, b| a.1.total_cmp(&b.1))
            .map(|(name, _)| name)
    }

    /// Iterate over models in registry order
    pub fn iter(&self) -> impl Iterator<Item = &ModelDescriptor> {
        self.models.iter()
    }

    /// All models in registry order
    pub fn models(&self) -> &[ModelDescriptor] {
        &self.models
    }

    /// Display names in registry order
    pub fn display_names(&self) -> Vec<&str> {
        self.models.iter().map(|m| m.display_name.as_str()).collect()
    }

    /// Number of registered models
    pub fn len(&self) -> usize {
        self.models.len()
    }

    /// Whether the registry has no models
    pub fn is_empty(&self) -> bool {
        self.models.is_empty()
    }
}

impl Default for ModelRegistry {
    fn default() -> Self {
        Self::builtin()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_registry_contents() {
        let registry = ModelRegistry::builtin();
        assert_eq!(registry.len(), 5);
        assert_eq!(
            registry.display_names(),
            vec![
                "LLaMA 3 (8B)",
                "DeepSeek R1",
                "DeepSeek Chat V3",
                "Gemma 3 27B",
                "Mistral Small"
            ]
        );
    }

    #[test]
    fn test_builtin_registry_is_valid() {
        let builtin = ModelRegistry::builtin();
        assert!(ModelRegistry::new(builtin.models().to_vec()).is_ok());
    }

    #[test]
    fn test_lookup_exact_match() {
        let registry = ModelRegistry::builtin();
        assert_eq!(
            registry.lookup("Gemma 3 27B").map(|m| m.wire_id.as_str()),
            Some("google/gemma-3-27b-it")
        );
    }

    #[test]
    fn test_lookup_is_case_sensitive() {
        let registry = ModelRegistry::builtin();
        assert!(registry.lookup("deepseek r1").is_none());
        assert!(registry.lookup("DEEPSEEK R1").is_none());
    }

    #[test]
    fn test_lookup_does_not_match_wire_id() {
        let registry = ModelRegistry::builtin();
        assert!(registry.lookup("deepseek/deepseek-r1").is_none());
    }

    #[test]
    fn test_new_rejects_duplicate_display_names() {
        let result = ModelRegistry::new(vec![
            ModelDescriptor::new("A", "vendor/a"),
            ModelDescriptor::new("A", "vendor/b"),
        ]);
        assert!(result.is_err());
    }

    #[test]
    fn test_new_rejects_blank_wire_id() {
        let result = ModelRegistry::new(vec![ModelDescriptor::new("A", " ")]);
        assert!(result.is_err());
    }

    #[test]
    fn test_new_rejects_empty_registry() {
        assert!(ModelRegistry::new(Vec::new()).is_err());
    }

    #[test]
    fn test_suggest_close_match() {
        let registry = ModelRegistry::builtin();
        assert_eq!(registry.suggest("deepseek r1"), Some("DeepSeek R1"));
        assert_eq!(registry.suggest("Mistral Smal"), Some("Mistral Small"));
    }

    #[test]
    fn test_suggest_nothing_for_unrelated_input() {
        let registry = ModelRegistry::builtin();
        assert_eq!(registry.suggest("what is the weather today?"), None);
        assert_eq!(registry.suggest("   "), None);
    }

    #[test]
    fn test_descriptor_serializes_to_json() {
        let model = ModelDescriptor::new("DeepSeek R1", "deepseek/deepseek-r1");
        let json = serde_json::to_value(&model).unwrap();
        assert_eq!(json["display_name"], "DeepSeek R1");
        assert_eq!(json["wire_id"], "deepseek/deepseek-r1");
    }
}
