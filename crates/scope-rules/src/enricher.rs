//! Feature enrichment from a shared rule snapshot.

use std::collections::BTreeSet;
use std::path::Path;
use std::sync::Arc;

use scope_model::{EnrichedFeature, FeatureRecord};

use crate::rule::IntegrationStep;
use crate::table::{RuleLoadOutcome, RuleTable};

/// Attaches documentation metadata to feature records.
///
/// The enricher reads one immutable [`RuleTable`] snapshot; clones share it.
/// Use [`with_rules`](Self::with_rules) to move to a newer snapshot.
#[derive(Debug, Clone, Default)]
pub struct RuleEnricher {
    rules: Arc<RuleTable>,
}

impl RuleEnricher {
    pub fn new(rules: Arc<RuleTable>) -> Self {
        Self { rules }
    }

    /// Enricher without rules; every record comes back with `has_rule == false`.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Loads `path` and returns the enricher along with the load outcome's
    /// warnings.
    pub fn from_path(path: &Path) -> (Self, Vec<crate::RuleLoadWarning>) {
        let RuleLoadOutcome { table, warnings } = RuleTable::load(path);
        (Self::new(Arc::new(table)), warnings)
    }

    /// A new enricher over `rules`; `self` keeps its own snapshot.
    pub fn with_rules(&self, rules: Arc<RuleTable>) -> Self {
        Self::new(rules)
    }

    pub fn rules(&self) -> &Arc<RuleTable> {
        &self.rules
    }

    pub fn has_rule(&self, feature_name: &str) -> bool {
        self.rules.has_rule(feature_name)
    }

    pub fn get_documentation_url(&self, feature_name: &str) -> Option<&str> {
        self.rules
            .get(feature_name)
            .map(|rule| rule.documentation_url.as_str())
    }

    pub fn get_comment(&self, feature_name: &str) -> Option<&str> {
        self.rules.get(feature_name).map(|rule| rule.comment.as_str())
    }

    /// Copies `record` and attaches its rule's metadata, if any.
    pub fn enrich(&self, record: &FeatureRecord) -> EnrichedFeature {
        match self.rules.get(&record.feature_name) {
            Some(rule) => EnrichedFeature::with_rule(
                record.clone(),
                rule.documentation_url.clone(),
                rule.comment.clone(),
            ),
            None => EnrichedFeature::without_rule(record.clone()),
        }
    }

    pub fn enrich_all<'a>(
        &self,
        records: impl IntoIterator<Item = &'a FeatureRecord>,
    ) -> Vec<EnrichedFeature> {
        records.into_iter().map(|record| self.enrich(record)).collect()
    }

    /// Integration steps for the given features, in first-seen order.
    ///
    /// Each feature contributes once. A rule without explicit steps
    /// contributes a single step built from its own URL and comment;
    /// features without a rule contribute nothing.
    pub fn integration_steps<'a>(
        &self,
        feature_names: impl IntoIterator<Item = &'a str>,
    ) -> Vec<IntegrationStep> {
        let mut seen = BTreeSet::new();
        let mut steps = Vec::new();

        for name in feature_names {
            if !seen.insert(name) {
                continue;
            }
            let Some(rule) = self.rules.get(name) else {
                continue;
            };
            if rule.integration_steps.is_empty() {
                steps.push(IntegrationStep {
                    feature_name: name.to_string(),
                    documentation_url: rule.documentation_url.clone(),
                    comment: rule.comment.clone(),
                });
            } else {
                steps.extend(rule.integration_steps.iter().map(|step| IntegrationStep {
                    feature_name: name.to_string(),
                    documentation_url: step.documentation_url.clone(),
                    comment: step.comment.clone(),
                }));
            }
        }

        steps
    }
}
