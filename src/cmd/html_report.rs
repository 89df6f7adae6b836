//! HTML report generation for a tax estimate
//!
//! Generates a self-contained HTML file with embedded CSS.

use crate::cmd::{fiscal_year, load_rates, read_snapshot};
use crate::core::{LineItem, TaxResult};
use crate::money::format_fcfa;
use crate::tax::{payment_schedule, Deadline, TaxEngine, TaxOffice};
use clap::Args;
use rust_decimal::Decimal;
use std::fmt::Write;
use std::path::PathBuf;

#[derive(Args, Debug)]
pub struct HtmlCommand {
    /// JSON file containing the taxpayer snapshot ("-" for stdin)
    #[arg(short, long)]
    input: PathBuf,

    /// JSON file overriding the built-in rate tables
    #[arg(short, long)]
    rates: Option<PathBuf>,

    /// Fiscal year the revenue relates to (defaults to the current year)
    #[arg(short, long)]
    year: Option<i32>,

    /// Output file path (default: opens in browser)
    #[arg(short, long)]
    output: Option<PathBuf>,
}

impl HtmlCommand {
    pub fn exec(&self) -> anyhow::Result<()> {
        let snapshot = read_snapshot(&self.input)?;
        let tables = load_rates(self.rates.as_deref())?;
        let result = TaxEngine::new(&tables).compute(&snapshot)?;

        let report = Report {
            result: &result,
            revenue: snapshot.revenue,
            fiscal_year: fiscal_year(self.year),
            office: TaxOffice::for_regime(result.regime, snapshot.revenue),
        };
        let html = report.generate();

        if let Some(ref output_path) = self.output {
            std::fs::write(output_path, &html)?;
            println!("HTML report written to: {}", output_path.display());
        } else {
            let temp_path = std::env::temp_dir().join("taxbj-report.html");
            std::fs::write(&temp_path, &html)?;
            opener::open(&temp_path)?;
            println!("Opened HTML report in browser: {}", temp_path.display());
        }

        Ok(())
    }
}

pub struct Report<'a> {
    pub result: &'a TaxResult,
    pub revenue: Decimal,
    pub fiscal_year: i32,
    pub office: TaxOffice,
}

impl Report<'_> {
    /// Render the full HTML document
    pub fn generate(&self) -> String {
        let regime = self.result.regime;
        let deadlines = payment_schedule(regime, self.fiscal_year);

        format!(
            r##"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>Benin Tax Estimate</title>
    <style>
{css}
    </style>
</head>
<body>
    <header>
        <h1>Benin Tax Estimate</h1>
        <p class="subtitle">{regime_code} - {regime_title}</p>
    </header>

    <main>
        <section class="summary-cards">
            <div class="card">
                <h3>Revenue</h3>
                <p class="value">{revenue}</p>
            </div>
            <div class="card total">
                <h3>Estimated Total</h3>
                <p class="value">{total}</p>
            </div>
            <div class="card">
                <h3>Tax Office</h3>
                <p class="value small">{office}</p>
            </div>
        </section>

        <section class="data-section">
            <h2>Breakdown <span class="count">({count})</span></h2>
            <div class="table-container">
                <table>
                    <thead>
                        <tr>
                            <th>Tax</th>
                            <th>Rate</th>
                            <th>Amount</th>
                            <th>Description</th>
                        </tr>
                    </thead>
                    <tbody>
{rows}
                    </tbody>
                </table>
            </div>
        </section>

        <section class="data-section">
            <h2>About this regime</h2>
            <ul>
{details}
            </ul>
        </section>

        <section class="data-section">
            <h2>Obligations</h2>
            <ul>
{obligations}
            </ul>
        </section>

        <section class="data-section">
            <h2>Calendar <span class="count">(fiscal year {year})</span></h2>
            <div class="table-container">
                <table>
                    <thead>
                        <tr>
                            <th>Date</th>
                            <th>Obligation</th>
                        </tr>
                    </thead>
                    <tbody>
{calendar}
                    </tbody>
                </table>
            </div>
        </section>

        <p class="disclaimer">This is a simulation based on the declared information.</p>
    </main>
</body>
</html>"##,
            css = CSS,
            regime_code = regime.code(),
            regime_title = escape(regime.title()),
            revenue = escape(&format_fcfa(self.revenue)),
            total = escape(&format_fcfa(self.result.total_tax)),
            office = escape(&self.office.to_string()),
            count = self.result.breakdown.len(),
            rows = breakdown_rows(&self.result.breakdown),
            details = list_items(&self.result.details),
            obligations = list_items(&self.result.additional_info),
            year = self.fiscal_year,
            calendar = calendar_rows(&deadlines),
        )
    }
}

fn breakdown_rows(items: &[LineItem]) -> String {
    let mut html = String::new();
    for item in items {
        let (class, amount) = if item.is_informational() {
            ("info", "Information".to_string())
        } else {
            ("", format_fcfa(item.amount))
        };
        let _ = writeln!(
            html,
            r#"                        <tr class="{}"><td>{}</td><td>{}</td><td class="number">{}</td><td>{}</td></tr>"#,
            class,
            escape(&item.name),
            escape(item.rate.as_deref().unwrap_or("-")),
            escape(&amount),
            escape(&item.description),
        );
    }
    html
}

fn list_items(lines: &[String]) -> String {
    let mut html = String::new();
    for line in lines {
        let _ = writeln!(html, "                <li>{}</li>", escape(line));
    }
    html
}

fn calendar_rows(deadlines: &[Deadline]) -> String {
    let mut html = String::new();
    for deadline in deadlines {
        let _ = writeln!(
            html,
            "                        <tr><td>{}</td><td>{}</td></tr>",
            deadline.date.format("%Y-%m-%d"),
            escape(&deadline.label),
        );
    }
    html
}

/// Escape text for inclusion in HTML element content or attributes
fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

const CSS: &str = r#"
:root {
    --primary: #15803d;
    --primary-dark: #166534;
    --warning: #ca8a04;
    --gray-50: #f9fafb;
    --gray-100: #f3f4f6;
    --gray-200: #e5e7eb;
    --gray-500: #6b7280;
    --gray-700: #374151;
    --gray-900: #111827;
}

* {
    margin: 0;
    padding: 0;
    box-sizing: border-box;
}

body {
    font-family: -apple-system, BlinkMacSystemFont, 'Segoe UI', Roboto, 'Helvetica Neue', Arial, sans-serif;
    background: var(--gray-50);
    color: var(--gray-900);
    line-height: 1.5;
}

header {
    background: white;
    border-bottom: 1px solid var(--gray-200);
    padding: 1.5rem 2rem;
}

header h1 {
    font-size: 1.5rem;
    font-weight: 600;
}

.subtitle {
    color: var(--gray-500);
}

main {
    padding: 2rem;
    max-width: 1200px;
    margin: 0 auto;
}

.summary-cards {
    display: grid;
    grid-template-columns: repeat(auto-fit, minmax(220px, 1fr));
    gap: 1rem;
    margin-bottom: 2rem;
}

.card {
    background: white;
    border: 1px solid var(--gray-200);
    border-radius: 0.5rem;
    padding: 1.25rem;
}

.card h3 {
    font-size: 0.875rem;
    font-weight: 500;
    color: var(--gray-500);
    margin-bottom: 0.5rem;
}

.card .value {
    font-size: 1.5rem;
    font-weight: 600;
    font-variant-numeric: tabular-nums;
}

.card .value.small {
    font-size: 1rem;
}

.card.total .value {
    color: var(--primary);
}

.data-section {
    background: white;
    border: 1px solid var(--gray-200);
    border-radius: 0.5rem;
    padding: 1.5rem;
    margin-bottom: 1.5rem;
}

.data-section h2 {
    font-size: 1.125rem;
    font-weight: 600;
    margin-bottom: 1rem;
}

.data-section ul {
    padding-left: 1.25rem;
    color: var(--gray-700);
}

.count {
    font-weight: 400;
    color: var(--gray-500);
}

.table-container {
    overflow-x: auto;
}

table {
    width: 100%;
    border-collapse: collapse;
    font-size: 0.875rem;
}

th {
    text-align: left;
    font-weight: 500;
    color: var(--gray-500);
    padding: 0.75rem 1rem;
    border-bottom: 1px solid var(--gray-200);
    background: var(--gray-50);
}

td {
    padding: 0.75rem 1rem;
    border-bottom: 1px solid var(--gray-100);
}

td.number {
    text-align: right;
    font-variant-numeric: tabular-nums;
    white-space: nowrap;
}

tr.info td {
    color: var(--warning);
}

.disclaimer {
    color: var(--gray-500);
    font-size: 0.875rem;
    text-align: center;
}
"#;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{TaxpayerCategory, TaxpayerSnapshot};
    use crate::tax::compute_tax;
    use rust_decimal_macros::dec;

    #[test]
    fn escapes_markup() {
        assert_eq!(
            escape(r#"<b>"R&D" 'lab'</b>"#),
            "&lt;b&gt;&quot;R&amp;D&quot; &#39;lab&#39;&lt;/b&gt;"
        );
        assert_eq!(escape("plain"), "plain");
    }

    #[test]
    fn report_contains_breakdown_and_calendar() {
        let snapshot = TaxpayerSnapshot {
            location: Some("cotonou".to_string()),
            ..TaxpayerSnapshot::new(TaxpayerCategory::EntrepreneurCompany, dec!(60000000))
        };
        let result = compute_tax(&snapshot).unwrap();
        let html = Report {
            result: &result,
            revenue: snapshot.revenue,
            fiscal_year: 2025,
            office: TaxOffice::for_regime(result.regime, snapshot.revenue),
        }
        .generate();

        assert!(html.starts_with("<!DOCTYPE html>"));
        assert!(html.contains("REEL - General Regime"));
        assert!(html.contains("4 674 000 FCFA"));
        assert!(html.contains("Corporate Income Tax (IS)"));
        assert!(html.contains(r#"<tr class="info"><td>VAT (Information)</td>"#));
        assert!(html.contains("Medium Enterprises Tax Centre (CIME)"));
        assert!(html.contains("<td>2026-04-30</td>"));
        assert_eq!(html.matches("<li>").count(), 8);
    }
}
