//! Rule entries and the JSON shapes they arrive in.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::warning::RuleLoadWarning;

/// Fields every rule entry must carry as strings (possibly empty).
pub const REQUIRED_FIELDS: [&str; 3] = ["feature_name", "documentation_url", "comment"];

/// One documented integration step of a rule.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StepDef {
    pub documentation_url: String,
    #[serde(default)]
    pub comment: String,
}

/// Documentation metadata for one feature.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeatureRule {
    pub feature_name: String,
    pub documentation_url: String,
    pub comment: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub integration_steps: Vec<StepDef>,
}

/// An integration step attached to the feature it documents.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IntegrationStep {
    pub feature_name: String,
    pub documentation_url: String,
    pub comment: String,
}

/// Rules section of a rule document plus its envelope fields.
pub(crate) struct RuleDocument<'a> {
    pub rules: &'a Map<String, Value>,
    pub version: Option<String>,
    pub metadata: Map<String, Value>,
}

/// Splits a rule document into its rules section and envelope.
///
/// An object with a `rules` key is an envelope. An object carrying only
/// `version` and/or `metadata` is an envelope without rules. Anything else
/// is the bare feature map.
pub(crate) fn split_document(value: &Value) -> Result<RuleDocument<'_>, RuleLoadWarning> {
    let object = value.as_object().ok_or(RuleLoadWarning::NotAnObject)?;

    match object.get("rules") {
        Some(Value::Object(rules)) => Ok(RuleDocument {
            rules,
            version: object
                .get("version")
                .and_then(Value::as_str)
                .map(str::to_string),
            metadata: object
                .get("metadata")
                .and_then(Value::as_object)
                .cloned()
                .unwrap_or_default(),
        }),
        Some(_) => Err(RuleLoadWarning::MissingRulesSection),
        None if object.contains_key("version") || object.contains_key("metadata") => {
            Err(RuleLoadWarning::MissingRulesSection)
        }
        None => Ok(RuleDocument {
            rules: object,
            version: None,
            metadata: Map::new(),
        }),
    }
}

/// Checks one entry and converts it into a rule.
pub(crate) fn parse_entry(
    feature: &str,
    value: &Value,
) -> Result<(FeatureRule, Option<RuleLoadWarning>), RuleLoadWarning> {
    let object = value
        .as_object()
        .ok_or_else(|| RuleLoadWarning::EntryNotAnObject {
            feature: feature.to_string(),
        })?;

    let missing = missing_fields(object);
    if !missing.is_empty() {
        return Err(RuleLoadWarning::MissingFields {
            feature: feature.to_string(),
            fields: missing,
        });
    }

    let field = |name: &str| {
        object
            .get(name)
            .and_then(Value::as_str)
            .unwrap_or_default()
            .to_string()
    };

    let (integration_steps, warning) = match object.get("integration_steps") {
        None | Some(Value::Null) => (Vec::new(), None),
        Some(steps) => match serde_json::from_value::<Vec<StepDef>>(steps.clone()) {
            Ok(steps) => (steps, None),
            Err(e) => (
                Vec::new(),
                Some(RuleLoadWarning::InvalidIntegrationSteps {
                    feature: feature.to_string(),
                    message: e.to_string(),
                }),
            ),
        },
    };

    let rule = FeatureRule {
        feature_name: field("feature_name"),
        documentation_url: field("documentation_url"),
        comment: field("comment"),
        integration_steps,
    };
    Ok((rule, warning))
}

/// Required fields that are absent or not strings.
pub(crate) fn missing_fields(object: &Map<String, Value>) -> Vec<&'static str> {
    REQUIRED_FIELDS
        .into_iter()
        .filter(|field| !matches!(object.get(*field), Some(Value::String(_))))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn envelope_and_bare_map() {
        let envelope = json!({"version": "2.0", "rules": {"Verify": {}}});
        let doc = split_document(&envelope).unwrap();
        assert_eq!(doc.version.as_deref(), Some("2.0"));
        assert!(doc.rules.contains_key("Verify"));

        let bare = json!({"Verify": {}});
        let doc = split_document(&bare).unwrap();
        assert!(doc.version.is_none());
        assert!(doc.rules.contains_key("Verify"));

        let missing = json!({"version": "1.0"});
        assert!(matches!(
            split_document(&missing),
            Err(RuleLoadWarning::MissingRulesSection)
        ));
        assert!(matches!(
            split_document(&json!([1, 2])),
            Err(RuleLoadWarning::NotAnObject)
        ));
    }

    #[test]
    fn entry_requires_string_fields() {
        let entry = json!({"feature_name": "Verify", "documentation_url": 3});
        let err = parse_entry("Verify", &entry).unwrap_err();
        assert_eq!(
            err,
            RuleLoadWarning::MissingFields {
                feature: "Verify".to_string(),
                fields: vec!["documentation_url", "comment"],
            }
        );
    }

    #[test]
    fn malformed_steps_keep_the_rule() {
        let entry = json!({
            "feature_name": "Verify",
            "documentation_url": "https://docs.example.com/verify",
            "comment": "",
            "integration_steps": "not a list"
        });
        let (rule, warning) = parse_entry("Verify", &entry).unwrap();
        assert!(rule.integration_steps.is_empty());
        assert!(matches!(
            warning,
            Some(RuleLoadWarning::InvalidIntegrationSteps { .. })
        ));
    }
}
