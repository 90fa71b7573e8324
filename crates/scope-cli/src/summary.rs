use comfy_table::modifiers::{UTF8_ROUND_CORNERS, UTF8_SOLID_INNER_BORDERS};
use comfy_table::presets::{UTF8_FULL, UTF8_FULL_CONDENSED};
use comfy_table::{
    Attribute, Cell, CellAlignment, Color, ColumnConstraint, ContentArrangement, Table, Width,
};

use scope_catalog::{EnvironmentPolicy, TemplateCatalog};
use scope_cli::pipeline::GenerateOutcome;
use scope_model::{Category, Environment, EnvironmentTag, FeatureSet, Locale, TestCase};
use scope_rules::RuleValidationReport;

/// Shown for blank feature values.
const EMPTY_VALUE: &str = "[empty]";

pub fn print_generation_summary(outcome: &GenerateOutcome) {
    let result = &outcome.result;
    println!("Mode: {}", result.mode);
    println!("Locale: {}", result.locale);
    if let Some(rules) = &outcome.rules {
        println!(
            "Rules: {} ({} rules, version {})",
            rules.source, rules.total_rules, rules.version
        );
    }

    for section in &result.sections {
        println!();
        println!("{} ({})", section_title(section.environment), section.test_cases.len());
        if section.test_cases.is_empty() {
            println!("  no test cases");
            continue;
        }
        println!("{}", case_table(&section.test_cases));
    }

    let stats = &result.stats;
    let mut table = Table::new();
    table.set_header(vec![header_cell("Metric"), header_cell("Count")]);
    apply_table_style(&mut table);
    align_column(&mut table, 1, CellAlignment::Right);
    table.add_row(vec![
        Cell::new("Test cases").add_attribute(Attribute::Bold),
        Cell::new(stats.total_test_cases).add_attribute(Attribute::Bold),
    ]);
    table.add_row(vec![Cell::new("Sandbox"), Cell::new(stats.sandbox_test_cases)]);
    table.add_row(vec![
        Cell::new("Production"),
        Cell::new(stats.production_test_cases),
    ]);
    for category in Category::ALL {
        let count = stats.by_category.get(&category).copied().unwrap_or(0);
        table.add_row(vec![
            category_cell(category),
            count_cell(count, Color::Reset),
        ]);
    }
    table.add_row(vec![
        Cell::new("Provider combinations"),
        Cell::new(stats.combinations),
    ]);
    table.add_row(vec![
        Cell::new("Recognized features"),
        Cell::new(stats.recognized_features),
    ]);
    table.add_row(vec![
        Cell::new("Integration steps"),
        count_cell(outcome.integration_steps.len(), Color::Reset),
    ]);
    println!();
    println!("{table}");

    if !outcome.rule_warnings.is_empty() {
        eprintln!("Rule warnings:");
        for warning in &outcome.rule_warnings {
            eprintln!("- {warning}");
        }
    }
}

fn case_table(cases: &[TestCase]) -> Table {
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("ID"),
        header_cell("Provider"),
        header_cell("Payment Method"),
        header_cell("Feature"),
        header_cell("Category"),
        header_cell("Description"),
    ]);
    apply_case_table_style(&mut table);
    for case in cases {
        table.add_row(vec![
            Cell::new(&case.id)
                .fg(Color::Blue)
                .add_attribute(Attribute::Bold),
            Cell::new(&case.provider),
            Cell::new(&case.payment_method),
            Cell::new(&case.feature_name),
            category_cell(case.category),
            Cell::new(&case.description),
        ]);
    }
    table
}

pub fn print_features(features: &FeatureSet) {
    if features.is_empty() {
        println!("No valid provider + payment method columns.");
        return;
    }
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Column"),
        header_cell("Provider"),
        header_cell("Payment Method"),
        header_cell("Feature"),
        header_cell("Value"),
    ]);
    apply_table_style(&mut table);
    align_column(&mut table, 0, CellAlignment::Right);
    for entry in features {
        let column = &entry.column;
        if entry.features.is_empty() {
            table.add_row(vec![
                Cell::new(column.column_index),
                Cell::new(&column.provider),
                Cell::new(&column.payment_method),
                dim_cell("-"),
                dim_cell("-"),
            ]);
            continue;
        }
        for record in &entry.features {
            let value = if record.value.trim().is_empty() {
                dim_cell(EMPTY_VALUE)
            } else if record.is_implemented() {
                Cell::new(&record.value).fg(Color::Green)
            } else {
                Cell::new(&record.value)
            };
            table.add_row(vec![
                Cell::new(column.column_index),
                Cell::new(&column.provider),
                Cell::new(&column.payment_method),
                Cell::new(&record.feature_name),
                value,
            ]);
        }
    }
    println!("{table}");
    println!("{} valid column(s)", features.len());
}

pub fn print_rule_report(report: &RuleValidationReport) {
    let status = if report.is_valid {
        Cell::new("VALID")
            .fg(Color::Green)
            .add_attribute(Attribute::Bold)
    } else {
        Cell::new("INVALID")
            .fg(Color::Red)
            .add_attribute(Attribute::Bold)
    };
    let mut table = Table::new();
    table.set_header(vec![header_cell("Check"), header_cell("Result")]);
    apply_table_style(&mut table);
    table.add_row(vec![Cell::new("Status"), status]);
    if let Some(stats) = &report.stats {
        table.add_row(vec![Cell::new("Version"), Cell::new(&stats.version)]);
        table.add_row(vec![Cell::new("Rules"), Cell::new(stats.total_rules)]);
        table.add_row(vec![Cell::new("Valid"), count_cell(stats.valid_rules, Color::Green)]);
        table.add_row(vec![Cell::new("Invalid"), count_cell(stats.invalid_rules, Color::Red)]);
    }
    table.add_row(vec![
        Cell::new("Warnings"),
        count_cell(report.warnings.len(), Color::Yellow),
    ]);
    println!("{table}");

    for error in &report.errors {
        eprintln!("error: {error}");
    }
    for warning in &report.warnings {
        eprintln!("warning: {warning}");
    }
}

pub fn print_catalog(catalog: &TemplateCatalog, policy: &EnvironmentPolicy) {
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Feature"),
        header_cell("Prefix"),
        header_cell("Templates"),
        header_cell("Environment"),
    ]);
    apply_table_style(&mut table);
    align_column(&mut table, 1, CellAlignment::Center);
    align_column(&mut table, 2, CellAlignment::Right);
    align_column(&mut table, 3, CellAlignment::Center);
    if let Some(master) = catalog.master() {
        table.add_row(vec![
            Cell::new(&master.feature_name)
                .fg(Color::Cyan)
                .add_attribute(Attribute::Bold),
            Cell::new(&master.code_prefix),
            Cell::new(master.templates.len()),
            tag_cell(policy.tag_for(&master.feature_name)),
        ]);
    }
    for entry in catalog.features() {
        table.add_row(vec![
            Cell::new(&entry.feature_name)
                .fg(Color::Blue)
                .add_attribute(Attribute::Bold),
            Cell::new(&entry.code_prefix),
            Cell::new(entry.templates.len()),
            tag_cell(policy.tag_for(&entry.feature_name)),
        ]);
    }
    println!("Catalog version {}", catalog.version());
    println!("{table}");
    let locales: Vec<&str> = catalog.supported_locales().map(Locale::as_str).collect();
    println!("Locales: {}", locales.join(", "));
}

fn section_title(environment: Environment) -> &'static str {
    match environment {
        Environment::Sandbox => "Sandbox",
        Environment::Production => "Production",
        Environment::Both => "All environments",
    }
}

fn category_cell(category: Category) -> Cell {
    let cell = Cell::new(category.label());
    match category {
        Category::HappyPath => cell.fg(Color::Green),
        Category::UnhappyPath => cell.fg(Color::Red),
        Category::CornerCase => cell.fg(Color::Yellow),
    }
}

fn tag_cell(tag: EnvironmentTag) -> Cell {
    match tag {
        EnvironmentTag::Both => Cell::new(tag.as_str()),
        EnvironmentTag::SandboxOnly => Cell::new(tag.as_str()).fg(Color::Yellow),
        EnvironmentTag::ProductionOnly => Cell::new(tag.as_str()).fg(Color::Magenta),
    }
}

fn count_cell(count: usize, color: Color) -> Cell {
    if count > 0 {
        Cell::new(count).fg(color).add_attribute(Attribute::Bold)
    } else {
        dim_cell(count)
    }
}

pub fn apply_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(120);
}

fn apply_case_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .apply_modifier(UTF8_SOLID_INNER_BORDERS)
        .set_content_arrangement(ContentArrangement::DynamicFullWidth)
        .set_width(165);
    if table.column_count() >= 6 {
        table.set_constraints(vec![
            ColumnConstraint::LowerBoundary(Width::Fixed(14)),
            ColumnConstraint::UpperBoundary(Width::Fixed(14)),
            ColumnConstraint::UpperBoundary(Width::Fixed(16)),
            ColumnConstraint::UpperBoundary(Width::Fixed(14)),
            ColumnConstraint::LowerBoundary(Width::Fixed(12)),
            ColumnConstraint::UpperBoundary(Width::Percentage(55)),
        ]);
    }
}

fn align_column(table: &mut Table, index: usize, alignment: CellAlignment) {
    if let Some(column) = table.column_mut(index) {
        column.set_cell_alignment(alignment);
    }
}

fn header_cell(label: &str) -> Cell {
    Cell::new(label)
        .fg(Color::Cyan)
        .add_attribute(Attribute::Bold)
}

fn dim_cell<T: ToString>(value: T) -> Cell {
    Cell::new(value).fg(Color::DarkGrey)
}
