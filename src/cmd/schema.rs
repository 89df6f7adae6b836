//! Schema command - print expected input and output formats

use crate::cmd::estimate::CSV_COLUMNS;
use crate::core::{RateTables, TaxpayerSnapshot};
use clap::Args;
use schemars::schema_for;

#[derive(Args, Debug)]
pub struct SchemaCommand {
    /// Output format
    #[arg(value_enum, default_value = "json-schema")]
    format: SchemaFormat,
}

#[derive(Debug, Clone, Copy, clap::ValueEnum)]
pub enum SchemaFormat {
    /// JSON Schema for the taxpayer snapshot
    JsonSchema,
    /// JSON Schema for a rate table override file
    RatesSchema,
    /// CSV header row of the estimate breakdown
    CsvHeader,
    /// Snapshot field descriptions
    CsvFields,
}

impl SchemaCommand {
    pub fn exec(&self) -> anyhow::Result<()> {
        match self.format {
            SchemaFormat::JsonSchema => {
                let schema = schema_for!(TaxpayerSnapshot);
                println!("{}", serde_json::to_string_pretty(&schema)?);
            }
            SchemaFormat::RatesSchema => {
                let schema = schema_for!(RateTables);
                println!("{}", serde_json::to_string_pretty(&schema)?);
            }
            SchemaFormat::CsvHeader => println!("{}", CSV_COLUMNS.join(",")),
            SchemaFormat::CsvFields => print_fields(),
        }
        Ok(())
    }
}

fn print_fields() {
    println!("Taxpayer Snapshot Fields");
    println!("========================");
    println!();
    for (name, required, description) in FIELD_DESCRIPTIONS {
        let req = if *required { "required" } else { "optional" };
        println!("{:26} ({:8})  {}", name, req, description);
    }
    println!();
    println!("Amounts are in FCFA. Optional amounts count only when above zero.");
}

const FIELD_DESCRIPTIONS: &[(&str, bool, &str)] = &[
    (
        "category",
        true,
        "entrepreneur-individual, entrepreneur-company or individual",
    ),
    ("revenue", true, "Annual revenue (50,000,000 or less is TPS)"),
    ("location", false, "Location code (see `taxbj rates`)"),
    ("sector", false, "general, construction, real-estate, gas-station, education"),
    ("property_value", false, "Rental value of business premises"),
    ("property_count", false, "Number of business premises"),
    ("is_importer", false, "Importer or exporter (true/false)"),
    ("import_export_amount", false, "Annual import/export amount"),
    ("has_government_contracts", false, "Holds public procurement contracts"),
    ("contract_amount", false, "Total amount of public contracts"),
    ("encashable_products", false, "Encashable products, defaults to 80% of revenue"),
    ("has_properties", false, "Owns property subject to TFU"),
    ("properties", false, "List of {location, value, is_built}"),
    ("has_vehicles", false, "Owns vehicles subject to TVM"),
    (
        "vehicles",
        false,
        "List of {category, horsepower, is_public_transport, capacity}",
    ),
];
