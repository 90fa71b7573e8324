//! Markdown documents.

use scope_model::{Category, GenerationResult, TestCase};
use scope_rules::IntegrationStep;
use tracing::debug;

use crate::layout::{
    CATEGORY_NOTES, EMPTY_SECTION, FOOTER, IMPLEMENTATION_NOTES, INTRODUCTION, category_title,
    environment_title, group_cases,
};
use crate::options::DocumentOptions;

/// Renders `result` as a Markdown document.
///
/// One `##` section per environment section of the result, each case a
/// table row `ID | Category | Description`.
pub fn render_markdown(result: &GenerationResult, options: &DocumentOptions) -> String {
    let mut lines = vec![format!("# {}", options.title()), String::new()];

    if options.include_metadata {
        let locale = result.locale.as_str().to_uppercase();
        lines.extend([
            format!("**Generated on:** {}  ", options.timestamp()),
            format!("**Language:** {locale}  "),
            format!("**Environment Mode:** {}  ", result.mode),
            format!(
                "**Total Provider Combinations:** {}",
                result.stats.combinations
            ),
            String::new(),
            "---".to_string(),
            String::new(),
        ]);
    }

    lines.extend([
        "## Test Case Documentation".to_string(),
        String::new(),
        INTRODUCTION.to_string(),
        String::new(),
        "### Test Case Types".to_string(),
        String::new(),
    ]);
    lines.extend(
        CATEGORY_NOTES
            .iter()
            .map(|(category, note)| format!("- **{}:** {note}", category_title(*category))),
    );
    lines.extend([String::new(), "---".to_string(), String::new()]);

    for section in &result.sections {
        lines.push(format!("## {}", environment_title(section.environment)));
        lines.push(String::new());
        if section.test_cases.is_empty() {
            lines.push(format!("_{EMPTY_SECTION}_"));
            lines.push(String::new());
        } else {
            push_section(&mut lines, &section.test_cases);
        }
    }

    if !options.integration_steps.is_empty() {
        push_integration_steps(&mut lines, &options.integration_steps);
    }

    if options.include_metadata {
        push_summary(&mut lines, result);
    }

    let mut document = lines.join("\n");
    document.push('\n');

    debug!(
        sections = result.sections.len(),
        test_cases = result.total(),
        integration_steps = options.integration_steps.len(),
        bytes = document.len(),
        "rendered markdown document"
    );
    document
}

fn push_section(lines: &mut Vec<String>, cases: &[TestCase]) {
    for group in group_cases(cases) {
        lines.push(format!("### {}", group.heading()));
        lines.push(String::new());
        lines.push(format!("**Total Test Cases:** {}", group.case_count()));
        lines.push(String::new());
        for feature in &group.features {
            lines.push(format!("#### {} Feature", feature.feature_name));
            lines.push(String::new());
            lines.push("| ID | Category | Description |".to_string());
            lines.push("| --- | --- | --- |".to_string());
            lines.extend(feature.cases.iter().map(|case| {
                format!(
                    "| {} | {} | {} |",
                    case.id,
                    case.category.label(),
                    escape_cell(&case.description)
                )
            }));
            lines.push(String::new());
        }
    }
    lines.extend(["---".to_string(), String::new()]);
}

fn push_integration_steps(lines: &mut Vec<String>, steps: &[IntegrationStep]) {
    lines.push("## Integration Steps".to_string());
    lines.push(String::new());
    for (index, step) in steps.iter().enumerate() {
        let mut line = format!("{}. **{}**", index + 1, step.feature_name);
        let comment = step.comment.trim();
        if !comment.is_empty() {
            line.push_str(&format!(": {comment}"));
        }
        let url = step.documentation_url.trim();
        if !url.is_empty() {
            line.push_str(&format!(" ([documentation]({url}))"));
        }
        lines.push(line);
    }
    lines.extend([String::new(), "---".to_string(), String::new()]);
}

fn push_summary(lines: &mut Vec<String>, result: &GenerationResult) {
    let stats = &result.stats;
    lines.extend([
        "## Summary".to_string(),
        String::new(),
        format!("- **Total Providers:** {}", stats.combinations),
        format!("- **Total Test Cases:** {}", stats.total_test_cases),
        format!("- **Sandbox Test Cases:** {}", stats.sandbox_test_cases),
        format!("- **Production Test Cases:** {}", stats.production_test_cases),
    ]);
    for category in Category::ALL {
        let count = stats.by_category.get(&category).copied().unwrap_or(0);
        lines.push(format!("- **{}:** {count}", category_title(category)));
    }
    lines.push(format!(
        "- **Document Language:** {}",
        result.locale.as_str().to_uppercase()
    ));
    lines.extend([String::new(), "### Implementation Notes".to_string(), String::new()]);
    lines.extend(IMPLEMENTATION_NOTES.iter().map(|note| format!("- {note}")));
    lines.extend([
        String::new(),
        "---".to_string(),
        String::new(),
        format!("*{FOOTER}*"),
    ]);
}

/// Pipes and line breaks would break the table row.
fn escape_cell(text: &str) -> String {
    text.replace('|', "\\|").replace(['\r', '\n'], " ")
}
