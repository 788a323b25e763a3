//! Types representing the registry JSON document.
//!
//! Only the fields the accessor reads are typed. Everything else is kept in
//! `extra` maps so a document survives a load/serialize cycle unchanged.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::{Error, Result};

/// The full registry payload.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RegistryDocument {
    /// Providers in display order. Required: a body without it is not a
    /// registry document.
    pub providers: Vec<Provider>,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// A provider entry, e.g. `"openai"`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Provider {
    /// Provider identifier, unique within a document.
    pub id: String,

    /// Provider homepage.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub website: Option<String>,

    /// Models offered by this provider. `None` when the field is absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub models: Option<Vec<Model>>,

    /// API configuration; only `auth` is interpreted.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_config: Option<ApiConfig>,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// The `api_config` object of a provider.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ApiConfig {
    /// Opaque auth configuration, passed through untouched.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub auth: Option<Value>,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// A model entry within a provider.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Model {
    /// Model identifier, e.g. `"gpt-4"`.
    pub id: String,

    /// Human-friendly display name.
    pub name: String,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl RegistryDocument {
    /// Parse and validate a document. `origin` names the source in errors.
    pub fn from_slice(bytes: &[u8], origin: &str) -> Result<Self> {
        let document: Self =
            serde_json::from_slice(bytes).map_err(|e| Error::parse(origin, e))?;
        document.validate()?;
        Ok(document)
    }

    /// Parse and validate a document from a string.
    pub fn from_json(json: &str, origin: &str) -> Result<Self> {
        Self::from_slice(json.as_bytes(), origin)
    }

    /// Check that provider ids are unique.
    pub fn validate(&self) -> Result<()> {
        let mut seen = HashSet::with_capacity(self.providers.len());
        for provider in &self.providers {
            if !seen.insert(provider.id.as_str()) {
                return Err(Error::DuplicateProvider(provider.id.clone()));
            }
        }
        Ok(())
    }

    /// Pretty JSON with a trailing newline, as written to disk.
    pub fn to_json_pretty(&self) -> Result<String> {
        let mut json =
            serde_json::to_string_pretty(self).map_err(|e| Error::parse("document", e))?;
        json.push('\n');
        Ok(json)
    }

    /// Find a provider by exact id. First match wins.
    pub fn provider(&self, id: &str) -> Option<&Provider> {
        self.providers.iter().find(|p| p.id == id)
    }

    /// Total number of models across all providers.
    pub fn model_count(&self) -> usize {
        self.providers.iter().map(|p| p.models().len()).sum()
    }
}

impl Provider {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            website: None,
            models: None,
            api_config: None,
            extra: Map::new(),
        }
    }

    /// Models, or an empty slice when the field is absent.
    pub fn models(&self) -> &[Model] {
        self.models.as_deref().unwrap_or_default()
    }

    pub fn website(&self) -> Option<&str> {
        self.website.as_deref()
    }

    /// The nested `api_config.auth` object, if any.
    pub fn auth(&self) -> Option<&Value> {
        self.api_config.as_ref()?.auth.as_ref()
    }
}

impl Model {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            extra: Map::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::{Model, RegistryDocument};
    use crate::error::Error;

    const OPENAI: &str = r#"{"providers":[{"id":"openai","website":"https://openai.com","models":[{"id":"gpt-4","name":"GPT-4"}]}]}"#;

    #[test]
    fn parses_minimal_document() {
        let doc = RegistryDocument::from_json(OPENAI, "test").expect("parse");
        let provider = doc.provider("openai").expect("openai");

        assert_eq!(provider.website(), Some("https://openai.com"));
        assert_eq!(provider.models(), &[Model::new("gpt-4", "GPT-4")]);
        assert!(provider.auth().is_none());
        assert_eq!(doc.model_count(), 1);
    }

    #[test]
    fn absent_models_are_empty_and_stay_absent() {
        let doc = RegistryDocument::from_json(r#"{"providers":[{"id":"bare"}]}"#, "test")
            .expect("parse");
        let provider = doc.provider("bare").expect("bare");

        assert!(provider.models().is_empty());
        assert!(provider.models.is_none());

        let value = serde_json::to_value(&doc).expect("serialize");
        assert_eq!(value, json!({"providers": [{"id": "bare"}]}));
    }

    #[test]
    fn auth_requires_nested_object() {
        let doc = RegistryDocument::from_json(
            r#"{"providers":[
                {"id":"a","api_config":{"base_url":"https://a.example"}},
                {"id":"b","api_config":{"auth":{"type":"bearer","env":"B_KEY"}}}
            ]}"#,
            "test",
        )
        .expect("parse");

        assert!(doc.provider("a").expect("a").auth().is_none());
        assert_eq!(
            doc.provider("b").expect("b").auth(),
            Some(&json!({"type": "bearer", "env": "B_KEY"}))
        );
    }

    #[test]
    fn passthrough_fields_survive_round_trip() {
        let source = r#"{
            "version": 3,
            "providers": [{
                "id": "anthropic",
                "name": "Anthropic",
                "website": "https://anthropic.com",
                "api_config": {"base_url": "https://api.anthropic.com", "auth": {"header": "x-api-key"}},
                "models": [{"id": "claude", "name": "Claude", "context_window": 200000}]
            }]
        }"#;

        let first = RegistryDocument::from_json(source, "test").expect("parse");
        let written = first.to_json_pretty().expect("serialize");
        let second = RegistryDocument::from_json(&written, "roundtrip").expect("reparse");

        assert_eq!(first, second);
        assert_eq!(second.extra.get("version"), Some(&json!(3)));
        assert_eq!(
            second.providers[0].models()[0].extra.get("context_window"),
            Some(&json!(200000))
        );
        assert!(written.ends_with('\n'));
    }

    #[test]
    fn duplicate_ids_are_rejected() {
        let err = RegistryDocument::from_json(
            r#"{"providers":[{"id":"x"},{"id":"y"},{"id":"x"}]}"#,
            "test",
        )
        .unwrap_err();

        assert!(matches!(err, Error::DuplicateProvider(ref id) if id == "x"));
    }

    #[test]
    fn malformed_json_is_a_parse_error() {
        let err = RegistryDocument::from_json("{\"providers\": [", "remote").unwrap_err();
        assert!(matches!(err, Error::Parse { ref origin, .. } if origin == "remote"));
    }

    #[test]
    fn object_without_providers_is_a_parse_error() {
        let err = RegistryDocument::from_json(r#"{"error":"rate limited"}"#, "remote").unwrap_err();
        assert!(matches!(err, Error::Parse { ref origin, .. } if origin == "remote"));
    }

    #[test]
    fn empty_provider_list_is_valid() {
        let doc = RegistryDocument::from_json(r#"{"providers":[]}"#, "test").expect("parse");
        assert!(doc.providers.is_empty());
    }

    #[test]
    fn model_without_name_is_a_parse_error() {
        let err = RegistryDocument::from_json(
            r#"{"providers":[{"id":"p","models":[{"id":"m"}]}]}"#,
            "test",
        )
        .unwrap_err();
        assert!(matches!(err, Error::Parse { .. }));
    }
}
