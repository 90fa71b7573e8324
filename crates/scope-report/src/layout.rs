//! Document structure shared by both renderers.
//!
//! Cases are grouped by provider + payment method, then by feature. Both
//! levels keep first-seen order, so a document lists cases exactly in the
//! order the result holds them.

use scope_model::{Category, Environment, TestCase};

pub(crate) const INTRODUCTION: &str = "This document contains test cases for your payment \
integration implementation. Each test case should be executed to ensure proper functionality \
of the implemented features. Test cases are organized by environment, then by provider and \
payment method combination.";

pub(crate) const CATEGORY_NOTES: [(Category, &str); 3] = [
    (Category::HappyPath, "Normal flow test cases"),
    (Category::UnhappyPath, "Error handling test cases"),
    (Category::CornerCase, "Edge case and boundary test cases"),
];

pub(crate) const IMPLEMENTATION_NOTES: [&str; 4] = [
    "Execute all test cases in the matching environment before going live",
    "Document any failures or unexpected behaviors",
    "Sandbox results do not replace the production checks",
    "Test error handling for unhappy path scenarios",
];

pub(crate) const FOOTER: &str =
    "This document was automatically generated from your implementation scope.";

pub(crate) const EMPTY_SECTION: &str = "No test cases for this environment.";

/// Cases of one feature inside a provider group.
#[derive(Debug)]
pub struct FeatureGroup<'a> {
    pub feature_name: &'a str,
    pub cases: Vec<&'a TestCase>,
}

/// Cases of one provider + payment method combination.
#[derive(Debug)]
pub struct ProviderGroup<'a> {
    pub provider: &'a str,
    pub payment_method: &'a str,
    pub features: Vec<FeatureGroup<'a>>,
}

impl ProviderGroup<'_> {
    pub fn heading(&self) -> String {
        format!("{} + {}", self.provider, self.payment_method)
    }

    pub fn case_count(&self) -> usize {
        self.features.iter().map(|feature| feature.cases.len()).sum()
    }
}

/// Groups `cases` by provider + payment method, then by feature.
pub fn group_cases(cases: &[TestCase]) -> Vec<ProviderGroup<'_>> {
    let mut groups: Vec<ProviderGroup<'_>> = Vec::new();
    for case in cases {
        let index = match groups.iter().position(|group| {
            group.provider == case.provider && group.payment_method == case.payment_method
        }) {
            Some(index) => index,
            None => {
                groups.push(ProviderGroup {
                    provider: &case.provider,
                    payment_method: &case.payment_method,
                    features: Vec::new(),
                });
                groups.len() - 1
            }
        };

        let features = &mut groups[index].features;
        match features
            .iter()
            .position(|feature| feature.feature_name == case.feature_name)
        {
            Some(position) => features[position].cases.push(case),
            None => features.push(FeatureGroup {
                feature_name: &case.feature_name,
                cases: vec![case],
            }),
        }
    }
    groups
}

pub(crate) fn environment_title(environment: Environment) -> &'static str {
    match environment {
        Environment::Sandbox => "Sandbox Environment",
        Environment::Production => "Production Environment",
        Environment::Both => "All Environments",
    }
}

/// Capitalized category label: "Happy Path".
pub(crate) fn category_title(category: Category) -> String {
    category
        .label()
        .split(' ')
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}
