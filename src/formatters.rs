use crate::health::{HealthReport, HealthStatus};
use crate::models::DatasetCounts;
use crate::validator::{validate_or_throw, Violation};
use colored::Colorize;
use prettytable::{format, Cell, Row, Table};
use serde::Serialize;
use serde_json::Value;

pub const SUMMARY_FAILED: &str = "Validation failed - check console for details";

/// Health of one loaded fixture, ready for rendering.
#[derive(Debug, Clone, Serialize)]
pub struct FixtureReport {
    pub source: String,
    pub user: String,
    pub counts: DatasetCounts,
    pub health: HealthReport,
}

/// Short plain-text report of a fixture, or [`SUMMARY_FAILED`].
pub fn summarize(data: &Value) -> String {
    let dataset = match validate_or_throw(data) {
        Ok(d) => d,
        Err(_) => return SUMMARY_FAILED.to_string(),
    };

    let mut out = String::from("Validation passed:\n");
    out.push_str(&format!("- User: {}\n", dataset.current_user.name));
    for (label, count) in dataset.counts().labelled() {
        out.push_str(&format!("- {}: {} items\n", label, count));
    }
    out.pop();
    out
}

fn status_cell(status: HealthStatus) -> Cell {
    let spec = match status {
        HealthStatus::Healthy => "bFg",
        HealthStatus::Degraded => "bFy",
        HealthStatus::Critical => "bFr",
    };
    Cell::new(status.as_str()).style_spec(spec)
}

pub fn format_table(reports: &[FixtureReport]) -> String {
    let mut table = Table::new();
    table.set_format(*format::consts::FORMAT_NO_LINESEP_WITH_TITLE);

    let mut titles = vec![
        Cell::new("Fixture").style_spec("bFc"),
        Cell::new("User").style_spec("bFc"),
    ];
    for (label, _) in DatasetCounts::default().labelled() {
        titles.push(Cell::new(label).style_spec("bFc"));
    }
    titles.push(Cell::new("Status").style_spec("bFc"));
    titles.push(Cell::new("Issues").style_spec("bFc"));
    table.set_titles(Row::new(titles));

    for report in reports {
        let mut cells = vec![Cell::new(&report.source), Cell::new(&report.user)];
        for (_, count) in report.counts.labelled() {
            cells.push(Cell::new(&count.to_string()));
        }
        cells.push(status_cell(report.health.status));
        cells.push(Cell::new(&report.health.issues.join("\n")));
        table.add_row(Row::new(cells));
    }

    table.to_string()
}

pub fn format_csv(reports: &[FixtureReport]) -> Result<String, csv::Error> {
    let mut writer = csv::Writer::from_writer(Vec::new());

    let mut header = vec!["Fixture", "User"];
    header.extend(DatasetCounts::default().labelled().iter().map(|(label, _)| *label));
    header.extend(["Status", "Issues", "Recommendations"]);
    writer.write_record(&header)?;

    for report in reports {
        let mut record = vec![report.source.clone(), report.user.clone()];
        record.extend(report.counts.labelled().iter().map(|(_, c)| c.to_string()));
        record.push(report.health.status.to_string());
        record.push(report.health.issues.join("; "));
        record.push(report.health.recommendations.join("; "));
        writer.write_record(&record)?;
    }

    let bytes = writer.into_inner().map_err(|e| e.into_error())?;
    Ok(String::from_utf8_lossy(&bytes).into_owned())
}

pub fn format_json(reports: &[FixtureReport]) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(reports)
}

pub fn format_markdown(reports: &[FixtureReport]) -> String {
    let mut md = String::new();

    md.push_str("| Fixture | User | News | Events | New Hires | Quick Links | Spaces | Applications | Status |\n");
    md.push_str("|---------|------|------|--------|-----------|-------------|--------|--------------|--------|\n");

    for report in reports {
        let c = &report.counts;
        md.push_str(&format!(
            "| {} | {} | {} | {} | {} | {} | {} | {} | **{}** |\n",
            report.source,
            report.user,
            c.news,
            c.events,
            c.new_hires,
            c.quick_links,
            c.spaces,
            c.applications,
            report.health.status
        ));
    }

    // Findings per fixture
    for report in reports.iter().filter(|r| !r.health.issues.is_empty()) {
        md.push_str(&format!("\n### {}\n\n", report.source));
        for (issue, recommendation) in report.health.findings() {
            md.push_str(&format!("- {} (_{}_)\n", issue, recommendation));
        }
    }

    md
}

pub fn format_violations(source: &str, violations: &[Violation]) -> String {
    let mut out = format!("{} {}\n", "✗".red().bold(), source.bold());
    for v in violations {
        out.push_str(&format!("    {} {}\n", v.field.yellow(), v.message));
    }
    out
}

pub fn print_summary(reports: &[FixtureReport]) {
    println!("\n{}", "=== Dataset Health ===".bright_cyan().bold());

    let count_of = |status: HealthStatus| reports.iter().filter(|r| r.health.status == status).count();

    println!("\n{}", "Fixtures:".yellow());
    println!("  Total: {}", reports.len().to_string().green());
    println!("  Healthy: {}", count_of(HealthStatus::Healthy).to_string().green());
    println!("  Degraded: {}", count_of(HealthStatus::Degraded).to_string().yellow());
    println!("  Critical: {}", count_of(HealthStatus::Critical).to_string().red());

    let mut totals = DatasetCounts::default();
    for report in reports {
        totals.news += report.counts.news;
        totals.events += report.counts.events;
        totals.new_hires += report.counts.new_hires;
        totals.quick_links += report.counts.quick_links;
        totals.spaces += report.counts.spaces;
        totals.applications += report.counts.applications;
    }

    println!("\n{}", "Items:".yellow());
    for (label, count) in totals.labelled() {
        println!("  {}: {}", label, count.to_string().cyan());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::health::health_of;
    use crate::models::fallback_dataset;
    use crate::sanitize::sanitize_or_fallback;
    use crate::test_support::valid_fixture;
    use serde_json::json;

    fn reports() -> Vec<FixtureReport> {
        let good = sanitize_or_fallback(&valid_fixture());
        let empty = fallback_dataset();
        vec![
            FixtureReport {
                source: "good.json".to_string(),
                user: good.current_user.name.clone(),
                counts: good.counts(),
                health: health_of(&good),
            },
            FixtureReport {
                source: "empty.json".to_string(),
                user: empty.current_user.name.clone(),
                counts: empty.counts(),
                health: health_of(&empty),
            },
        ]
    }

    #[test]
    fn test_summarize_valid() {
        let expected = "Validation passed:\n\
            - User: María López\n\
            - News: 2 items\n\
            - Events: 2 items\n\
            - New Hires: 2 items\n\
            - Quick Links: 2 items\n\
            - Spaces: 2 items\n\
            - Applications: 2 items";
        assert_eq!(summarize(&valid_fixture()), expected);
    }

    #[test]
    fn test_summarize_invalid() {
        assert_eq!(summarize(&Value::Null), SUMMARY_FAILED);
        assert_eq!(summarize(&json!({"currentUser": {}})), SUMMARY_FAILED);
    }

    #[test]
    fn test_csv_output() {
        let csv = format_csv(&reports()).unwrap();
        let lines: Vec<_> = csv.lines().collect();
        assert_eq!(
            lines[0],
            "Fixture,User,News,Events,New Hires,Quick Links,Spaces,Applications,Status,Issues,Recommendations"
        );
        assert!(lines[1].starts_with("good.json,María López,2,2,2,2,2,2,healthy"));
        assert!(lines[2].starts_with("empty.json,Usuario Desconocido,0,0,0,0,0,0,critical"));
    }

    #[test]
    fn test_json_output() {
        let json = format_json(&reports()).unwrap();
        let parsed: Value = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed[0]["health"]["status"], "healthy");
        assert_eq!(parsed[1]["counts"]["quickLinks"], 0);
    }

    #[test]
    fn test_markdown_lists_findings() {
        let md = format_markdown(&reports());
        assert!(md.contains("| good.json | María López | 2 | 2 | 2 | 2 | 2 | 2 | **healthy** |"));
        assert!(md.contains("### empty.json"));
        assert!(md.contains("- No hay noticias disponibles (_Verificar fuente de noticias_)"));
        assert!(!md.contains("### good.json"));
    }

    #[test]
    fn test_table_contains_sources() {
        let table = format_table(&reports());
        assert!(table.contains("good.json"));
        assert!(table.contains("critical"));
    }
}
