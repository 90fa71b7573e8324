//! HTML documents.
//!
//! Written as an event stream through `quick_xml::Writer`, so every text
//! node and attribute is escaped on the way out. The markup is plain
//! enough to paste into a word processor.

use std::io::Write;

use quick_xml::Writer;
use quick_xml::events::{BytesEnd, BytesStart, BytesText, Event};

use scope_model::{Category, GenerationResult, TestCase};
use scope_rules::IntegrationStep;
use tracing::debug;

use crate::error::Result;
use crate::layout::{
    CATEGORY_NOTES, EMPTY_SECTION, FOOTER, IMPLEMENTATION_NOTES, INTRODUCTION, category_title,
    environment_title, group_cases,
};
use crate::options::DocumentOptions;

const STYLESHEET: &str = "body { font-family: Arial, sans-serif; line-height: 1.6; margin: 40px; } \
h1 { color: #2c3e50; border-bottom: 3px solid #3498db; } \
h2 { color: #34495e; margin-top: 30px; } \
table { border-collapse: collapse; width: 100%; margin-bottom: 16px; } \
th, td { border: 1px solid #d0d7de; padding: 6px 10px; text-align: left; } \
tr.unhappy td:first-child { border-left: 3px solid #e74c3c; } \
tr.corner td:first-child { border-left: 3px solid #f39c12; } \
.metadata, .summary { background-color: #f8f9fa; padding: 15px; }";

/// Renders `result` as a standalone HTML document.
pub fn render_html(result: &GenerationResult, options: &DocumentOptions) -> Result<String> {
    let mut xml = Writer::new_with_indent(Vec::new(), b' ', 2);
    let title = options.title();

    xml.write_event(Event::DocType(BytesText::new("html")))?;
    let mut root = BytesStart::new("html");
    root.push_attribute(("lang", result.locale.as_str()));
    xml.write_event(Event::Start(root))?;

    xml.write_event(Event::Start(BytesStart::new("head")))?;
    let mut charset = BytesStart::new("meta");
    charset.push_attribute(("charset", "UTF-8"));
    xml.write_event(Event::Empty(charset))?;
    write_text_element(&mut xml, "title", &title)?;
    write_text_element(&mut xml, "style", STYLESHEET)?;
    xml.write_event(Event::End(BytesEnd::new("head")))?;

    xml.write_event(Event::Start(BytesStart::new("body")))?;
    write_text_element(&mut xml, "h1", &title)?;

    if options.include_metadata {
        let locale = result.locale.as_str().to_uppercase();
        let mode = result.mode.to_string();
        let combinations = result.stats.combinations.to_string();
        write_classed_start(&mut xml, "div", "metadata")?;
        write_labeled(&mut xml, "p", "Generated on", &options.timestamp())?;
        write_labeled(&mut xml, "p", "Language", &locale)?;
        write_labeled(&mut xml, "p", "Environment Mode", &mode)?;
        write_labeled(&mut xml, "p", "Total Provider Combinations", &combinations)?;
        xml.write_event(Event::End(BytesEnd::new("div")))?;
    }

    write_text_element(&mut xml, "h2", "Test Case Documentation")?;
    write_text_element(&mut xml, "p", INTRODUCTION)?;
    write_text_element(&mut xml, "h3", "Test Case Types")?;
    xml.write_event(Event::Start(BytesStart::new("ul")))?;
    for (category, note) in CATEGORY_NOTES {
        write_labeled(&mut xml, "li", &category_title(category), note)?;
    }
    xml.write_event(Event::End(BytesEnd::new("ul")))?;

    for section in &result.sections {
        write_text_element(&mut xml, "h2", environment_title(section.environment))?;
        if section.test_cases.is_empty() {
            write_text_element(&mut xml, "p", EMPTY_SECTION)?;
            continue;
        }
        write_section(&mut xml, &section.test_cases)?;
    }

    if !options.integration_steps.is_empty() {
        write_integration_steps(&mut xml, &options.integration_steps)?;
    }

    if options.include_metadata {
        write_summary(&mut xml, result)?;
    }

    xml.write_event(Event::End(BytesEnd::new("body")))?;
    xml.write_event(Event::End(BytesEnd::new("html")))?;

    let mut html = String::from_utf8(xml.into_inner())?;
    html.push('\n');

    debug!(
        sections = result.sections.len(),
        test_cases = result.total(),
        integration_steps = options.integration_steps.len(),
        bytes = html.len(),
        "rendered HTML document"
    );
    Ok(html)
}

fn write_section<W: Write>(xml: &mut Writer<W>, cases: &[TestCase]) -> Result<()> {
    for group in group_cases(cases) {
        write_text_element(xml, "h3", &group.heading())?;
        write_labeled(
            xml,
            "p",
            "Total Test Cases",
            &group.case_count().to_string(),
        )?;
        for feature in &group.features {
            write_text_element(xml, "h4", &format!("{} Feature", feature.feature_name))?;
            xml.write_event(Event::Start(BytesStart::new("table")))?;
            xml.write_event(Event::Start(BytesStart::new("tr")))?;
            for heading in ["ID", "Category", "Description"] {
                write_text_element(xml, "th", heading)?;
            }
            xml.write_event(Event::End(BytesEnd::new("tr")))?;
            for case in &feature.cases {
                write_case_row(xml, case)?;
            }
            xml.write_event(Event::End(BytesEnd::new("table")))?;
        }
    }
    xml.write_event(Event::Empty(BytesStart::new("hr")))?;
    Ok(())
}

fn write_case_row<W: Write>(xml: &mut Writer<W>, case: &TestCase) -> Result<()> {
    let row = match case.category {
        Category::HappyPath => BytesStart::new("tr"),
        Category::UnhappyPath => BytesStart::new("tr").with_attributes([("class", "unhappy")]),
        Category::CornerCase => BytesStart::new("tr").with_attributes([("class", "corner")]),
    };
    xml.write_event(Event::Start(row))?;
    write_text_element(xml, "td", &case.id)?;
    write_text_element(xml, "td", case.category.label())?;
    write_text_element(xml, "td", &case.description)?;
    xml.write_event(Event::End(BytesEnd::new("tr")))?;
    Ok(())
}

fn write_integration_steps<W: Write>(xml: &mut Writer<W>, steps: &[IntegrationStep]) -> Result<()> {
    write_text_element(xml, "h2", "Integration Steps")?;
    xml.write_event(Event::Start(BytesStart::new("ol")))?;
    for step in steps {
        xml.write_event(Event::Start(BytesStart::new("li")))?;
        write_text_element(xml, "strong", &step.feature_name)?;
        let comment = step.comment.trim();
        if !comment.is_empty() {
            xml.write_event(Event::Text(BytesText::new(&format!(": {comment} "))))?;
        }
        let url = step.documentation_url.trim();
        if !url.is_empty() {
            let link = BytesStart::new("a").with_attributes([("href", url)]);
            xml.write_event(Event::Start(link))?;
            xml.write_event(Event::Text(BytesText::new("documentation")))?;
            xml.write_event(Event::End(BytesEnd::new("a")))?;
        }
        xml.write_event(Event::End(BytesEnd::new("li")))?;
    }
    xml.write_event(Event::End(BytesEnd::new("ol")))?;
    Ok(())
}

fn write_summary<W: Write>(xml: &mut Writer<W>, result: &GenerationResult) -> Result<()> {
    let stats = &result.stats;
    write_classed_start(xml, "div", "summary")?;
    write_text_element(xml, "h2", "Summary")?;
    xml.write_event(Event::Start(BytesStart::new("ul")))?;
    write_labeled(xml, "li", "Total Providers", &stats.combinations.to_string())?;
    write_labeled(xml, "li", "Total Test Cases", &stats.total_test_cases.to_string())?;
    write_labeled(
        xml,
        "li",
        "Sandbox Test Cases",
        &stats.sandbox_test_cases.to_string(),
    )?;
    write_labeled(
        xml,
        "li",
        "Production Test Cases",
        &stats.production_test_cases.to_string(),
    )?;
    for category in Category::ALL {
        let count = stats.by_category.get(&category).copied().unwrap_or(0);
        write_labeled(xml, "li", &category_title(category), &count.to_string())?;
    }
    xml.write_event(Event::End(BytesEnd::new("ul")))?;
    write_text_element(xml, "h3", "Implementation Notes")?;
    xml.write_event(Event::Start(BytesStart::new("ul")))?;
    for note in IMPLEMENTATION_NOTES {
        write_text_element(xml, "li", note)?;
    }
    xml.write_event(Event::End(BytesEnd::new("ul")))?;
    xml.write_event(Event::End(BytesEnd::new("div")))?;
    xml.write_event(Event::Empty(BytesStart::new("hr")))?;
    xml.write_event(Event::Start(BytesStart::new("p")))?;
    write_text_element(xml, "em", FOOTER)?;
    xml.write_event(Event::End(BytesEnd::new("p")))?;
    Ok(())
}

fn write_text_element<W: Write>(xml: &mut Writer<W>, name: &str, text: &str) -> Result<()> {
    xml.write_event(Event::Start(BytesStart::new(name)))?;
    xml.write_event(Event::Text(BytesText::new(text)))?;
    xml.write_event(Event::End(BytesEnd::new(name)))?;
    Ok(())
}

fn write_classed_start<W: Write>(xml: &mut Writer<W>, name: &str, class: &str) -> Result<()> {
    let start = BytesStart::new(name).with_attributes([("class", class)]);
    xml.write_event(Event::Start(start))?;
    Ok(())
}

/// `<name><strong>label:</strong> value</name>`
fn write_labeled<W: Write>(
    xml: &mut Writer<W>,
    name: &str,
    label: &str,
    value: &str,
) -> Result<()> {
    xml.write_event(Event::Start(BytesStart::new(name)))?;
    write_text_element(xml, "strong", &format!("{label}:"))?;
    xml.write_event(Event::Text(BytesText::new(&format!(" {value}"))))?;
    xml.write_event(Event::End(BytesEnd::new(name)))?;
    Ok(())
}
