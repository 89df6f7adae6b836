//! Rates command - display the rate tables the engine would use

use crate::cmd::load_rates;
use crate::core::{RateTables, Tier};
use crate::money::format_fcfa;
use clap::Args;
use rust_decimal::Decimal;
use std::path::PathBuf;
use tabled::{
    settings::{object::Columns, Alignment, Modify, Style},
    Table, Tabled,
};

#[derive(Args, Debug)]
pub struct RatesCommand {
    /// JSON file overriding the built-in rate tables
    #[arg(short, long)]
    rates: Option<PathBuf>,

    /// Output as JSON (the same format accepted by --rates)
    #[arg(long)]
    json: bool,
}

impl RatesCommand {
    pub fn exec(&self) -> anyhow::Result<()> {
        let tables = load_rates(self.rates.as_deref())?;
        if self.json {
            println!("{}", serde_json::to_string_pretty(tables.as_ref())?);
        } else {
            print_tables(&tables);
        }
        Ok(())
    }
}

#[derive(Tabled)]
struct LocationRow {
    #[tabled(rename = "Location")]
    code: String,
    #[tabled(rename = "Zone")]
    zone: u8,
    #[tabled(rename = "Patent Base")]
    patent_fixed_base: String,
    #[tabled(rename = "Patent Rate")]
    patent_proportional_rate: String,
    #[tabled(rename = "Built")]
    built_property_rate: String,
    #[tabled(rename = "Non-Built")]
    non_built_property_rate: String,
}

#[derive(Tabled)]
struct ChamberRow {
    #[tabled(rename = "Revenue Up To")]
    upper_bound: String,
    #[tabled(rename = "Individual")]
    individual: String,
    #[tabled(rename = "Organization")]
    organization: String,
}

#[derive(Tabled)]
struct ImportExportRow {
    #[tabled(rename = "Amount Up To")]
    upper_bound: String,
    #[tabled(rename = "Fixed Right")]
    fixed_right: String,
    #[tabled(rename = "Per Extra Billion")]
    per_billion: String,
}

fn percent(value: Decimal) -> String {
    format!("{}%", value.normalize())
}

fn bound<T>(tier: &Tier<T>) -> String {
    tier.upper_bound
        .map(format_fcfa)
        .unwrap_or_else(|| "and above".to_string())
}

fn location_rows(tables: &RateTables) -> Vec<LocationRow> {
    tables
        .locations
        .iter()
        .map(|(code, entry)| LocationRow {
            code: if *code == tables.default_location {
                format!("{} (default)", code)
            } else {
                code.clone()
            },
            zone: entry.zone.into(),
            patent_fixed_base: format_fcfa(entry.patent_fixed_base),
            patent_proportional_rate: percent(entry.patent_proportional_rate),
            built_property_rate: percent(entry.built_property_rate),
            non_built_property_rate: percent(entry.non_built_property_rate),
        })
        .collect()
}

fn chamber_rows(tables: &RateTables) -> Vec<ChamberRow> {
    tables
        .chamber
        .tiers
        .iter()
        .map(|tier| ChamberRow {
            upper_bound: bound(tier),
            individual: format_fcfa(tier.value.individual),
            organization: format_fcfa(tier.value.organization),
        })
        .collect()
}

fn import_export_rows(tables: &RateTables) -> Vec<ImportExportRow> {
    tables
        .import_export
        .tiers
        .iter()
        .map(|tier| ImportExportRow {
            upper_bound: bound(tier),
            fixed_right: format_fcfa(tier.value.fixed_right),
            per_billion: tier
                .value
                .per_billion
                .map(format_fcfa)
                .unwrap_or_else(|| "-".to_string()),
        })
        .collect()
}

fn print_tables(tables: &RateTables) {
    println!();
    println!("LOCATIONS");
    let table = Table::new(location_rows(tables))
        .with(Style::rounded())
        .with(Modify::new(Columns::new(2..)).with(Alignment::right()))
        .to_string();
    println!("{}", table);
    println!();

    println!("CHAMBER OF COMMERCE (CCI)");
    let table = Table::new(chamber_rows(tables))
        .with(Style::rounded())
        .with(Modify::new(Columns::new(..)).with(Alignment::right()))
        .to_string();
    println!("{}", table);
    println!();

    println!("IMPORT/EXPORT PATENT RIGHT");
    let table = Table::new(import_export_rows(tables))
        .with(Style::rounded())
        .with(Modify::new(Columns::new(..)).with(Alignment::right()))
        .to_string();
    println!("{}", table);
    println!();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rows_cover_every_table_entry() {
        let tables = RateTables::benin();
        let locations = location_rows(&tables);
        assert_eq!(locations.len(), tables.locations.len());
        assert!(locations
            .iter()
            .any(|row| row.code == "other-zone1 (default)"));

        let chamber = chamber_rows(&tables);
        assert_eq!(chamber.len(), tables.chamber.tiers.len());
        assert_eq!(chamber.last().unwrap().upper_bound, "and above");

        let import_export = import_export_rows(&tables);
        assert_eq!(import_export.len(), tables.import_export.tiers.len());
        assert_eq!(import_export[0].per_billion, "-");
    }

    #[test]
    fn cotonou_row() {
        let tables = RateTables::benin();
        let rows = location_rows(&tables);
        let cotonou = rows.iter().find(|row| row.code == "cotonou").unwrap();
        assert_eq!(cotonou.zone, 1);
        assert_eq!(cotonou.patent_fixed_base, "70 000 FCFA");
        assert_eq!(cotonou.patent_proportional_rate, "17%");
    }

    #[test]
    fn tables_render() {
        print_tables(&RateTables::benin());
    }
}
