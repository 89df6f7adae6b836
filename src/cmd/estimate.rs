//! Estimate command - run the engine on a snapshot and print the breakdown

use crate::cmd::{fiscal_year, load_rates, read_snapshot, write_csv};
use crate::core::{LineItem, TaxResult};
use crate::money::format_fcfa;
use crate::tax::{payment_schedule, Deadline, TaxEngine, TaxOffice};
use clap::Args;
use rust_decimal::Decimal;
use serde::Serialize;
use std::io;
use std::path::PathBuf;
use tabled::{
    settings::{object::Columns, Alignment, Modify, Style},
    Table, Tabled,
};

#[derive(Args, Debug)]
pub struct EstimateCommand {
    /// JSON file containing the taxpayer snapshot ("-" for stdin)
    #[arg(short, long)]
    input: PathBuf,

    /// JSON file overriding the built-in rate tables
    #[arg(short, long)]
    rates: Option<PathBuf>,

    /// Fiscal year the revenue relates to (defaults to the current year)
    #[arg(short, long)]
    year: Option<i32>,

    /// Output as JSON instead of formatted text
    #[arg(long, conflicts_with = "csv")]
    json: bool,

    /// Output the breakdown as CSV
    #[arg(long)]
    csv: bool,
}

/// Row for the breakdown table output
#[derive(Debug, Clone, Tabled)]
struct BreakdownRow {
    #[tabled(rename = "Tax")]
    name: String,

    #[tabled(rename = "Rate")]
    rate: String,

    #[tabled(rename = "Amount")]
    amount: String,

    #[tabled(rename = "Description")]
    description: String,
}

impl From<&LineItem> for BreakdownRow {
    fn from(item: &LineItem) -> Self {
        BreakdownRow {
            name: item.name.clone(),
            rate: item.rate.clone().unwrap_or_default(),
            amount: if item.is_informational() {
                "Information".to_string()
            } else {
                format_fcfa(item.amount)
            },
            description: item.description.clone(),
        }
    }
}

/// Row for CSV export of the breakdown
#[derive(Debug, Serialize)]
pub struct CsvRow<'a> {
    pub name: &'a str,
    pub rate: &'a str,
    pub amount: Decimal,
    pub description: &'a str,
}

impl<'a> From<&'a LineItem> for CsvRow<'a> {
    fn from(item: &'a LineItem) -> Self {
        CsvRow {
            name: &item.name,
            rate: item.rate.as_deref().unwrap_or_default(),
            amount: item.amount,
            description: &item.description,
        }
    }
}

pub const CSV_COLUMNS: &[&str] = &["name", "rate", "amount", "description"];

/// JSON output structure
#[derive(Debug, Serialize)]
struct EstimateOutput<'a> {
    input_sha256: String,
    fiscal_year: i32,
    #[serde(flatten)]
    result: &'a TaxResult,
    tax_office: TaxOffice,
    tax_office_name: String,
    deadlines: Vec<Deadline>,
}

impl EstimateCommand {
    pub fn exec(&self) -> anyhow::Result<()> {
        let snapshot = read_snapshot(&self.input)?;
        let tables = load_rates(self.rates.as_deref())?;
        let result = TaxEngine::new(&tables).compute(&snapshot)?;

        let year = fiscal_year(self.year);
        let office = TaxOffice::for_regime(result.regime, snapshot.revenue);
        let deadlines = payment_schedule(result.regime, year);

        if self.csv {
            write_csv(result.breakdown.iter().map(CsvRow::from), io::stdout())
        } else if self.json {
            let output = EstimateOutput {
                input_sha256: snapshot.fingerprint()?,
                fiscal_year: year,
                result: &result,
                tax_office: office,
                tax_office_name: office.to_string(),
                deadlines,
            };
            println!("{}", serde_json::to_string_pretty(&output)?);
            Ok(())
        } else {
            print_estimate(&result, snapshot.revenue, office, year, &deadlines);
            Ok(())
        }
    }
}

fn breakdown_table(items: &[LineItem]) -> String {
    let rows: Vec<BreakdownRow> = items.iter().map(BreakdownRow::from).collect();
    Table::new(rows)
        .with(Style::rounded())
        .with(Modify::new(Columns::one(2)).with(Alignment::right()))
        .to_string()
}

fn print_estimate(
    result: &TaxResult,
    revenue: Decimal,
    office: TaxOffice,
    year: i32,
    deadlines: &[Deadline],
) {
    println!();
    println!(
        "TAX ESTIMATE ({} - {}) - revenue {}",
        result.regime,
        result.regime.title(),
        format_fcfa(revenue)
    );
    println!();

    for detail in &result.details {
        println!("  {}", detail);
    }
    println!();

    println!("{}", breakdown_table(&result.breakdown));
    println!();
    println!("ESTIMATED TOTAL: {}", format_fcfa(result.total_tax));
    println!("  This is a simulation based on the declared information.");
    println!();

    println!("OBLIGATIONS");
    for info in &result.additional_info {
        println!("  - {}", info);
    }
    println!();

    println!("TAX OFFICE: {}", office);
    println!();

    println!("CALENDAR (fiscal year {})", year);
    for deadline in deadlines {
        println!("  {}  {}", deadline.date.format("%Y-%m-%d"), deadline.label);
    }
    println!();
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn informational_rows_show_label() {
        let vat = LineItem::new("VAT (Information)", Decimal::ZERO, "vat").with_rate("18%");
        let row = BreakdownRow::from(&vat);
        assert_eq!(row.amount, "Information");
        assert_eq!(row.rate, "18%");

        let fee = LineItem::new("Broadcasting Fee", dec!(4000), "fee");
        let row = BreakdownRow::from(&fee);
        assert_eq!(row.amount, "4 000 FCFA");
        assert_eq!(row.rate, "");
    }

    #[test]
    fn zero_charge_is_not_informational() {
        let empty = LineItem::new("Single Property Tax (TFU)", Decimal::ZERO, "tfu");
        assert_eq!(BreakdownRow::from(&empty).amount, "0 FCFA");
    }

    #[test]
    fn breakdown_table_renders() {
        let items = [
            LineItem::new("Broadcasting Fee", dec!(4000), "fee"),
            LineItem::new("VAT (Information)", Decimal::ZERO, "vat").with_rate("18%"),
        ];
        let table = breakdown_table(&items);
        assert!(table.contains("Broadcasting Fee"));
        assert!(table.contains("4 000 FCFA"));
        assert!(table.contains("Information"));
    }

    #[test]
    fn csv_rows_keep_raw_amounts() {
        let item = LineItem::new("Advance on Income Tax (AIB)", dec!(600000.00), "aib").with_rate("1%");
        let mut out = Vec::new();
        write_csv([CsvRow::from(&item)], &mut out).unwrap();
        let text = String::from_utf8(out).unwrap();
        let mut lines = text.lines();
        assert_eq!(lines.next(), Some(CSV_COLUMNS.join(",").as_str()));
        assert_eq!(lines.next(), Some("Advance on Income Tax (AIB),1%,600000.00,aib"));
    }
}
