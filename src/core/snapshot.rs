use rust_decimal::Decimal;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::io::Read;

/// Legal form of the taxpayer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "kebab-case")]
pub enum TaxpayerCategory {
    /// Sole proprietor (personne physique exerçant une activité)
    EntrepreneurIndividual,
    /// Company or other legal entity (personne morale)
    EntrepreneurCompany,
    /// Private individual
    Individual,
}

impl TaxpayerCategory {
    /// Organizations pay the company rates of the chamber and income tax tables
    pub fn is_organization(self) -> bool {
        matches!(self, TaxpayerCategory::EntrepreneurCompany)
    }
}

/// Activity sector, drives the income tax rate and its minimum
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "kebab-case")]
pub enum Sector {
    #[default]
    General,
    Construction,
    RealEstate,
    #[serde(rename = "gas-station", alias = "fuel-distribution")]
    FuelDistribution,
    Education,
}

impl Sector {
    /// Education is taxed at the reduced income tax rate
    pub fn is_preferential(self) -> bool {
        matches!(self, Sector::Education)
    }
}

/// A declared piece of real estate
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct PropertyRecord {
    /// Location code of the property (e.g. "cotonou", "parakou")
    pub location: String,
    /// Declared value in FCFA
    #[schemars(with = "f64")]
    pub value: Decimal,
    /// Built (bâti) or bare land (non bâti)
    #[serde(default)]
    pub is_built: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum VehicleCategory {
    /// Passenger transport, capacity counted in seats
    Person,
    /// Freight transport, capacity counted in tonnes
    Goods,
}

/// A declared motor vehicle
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct VehicleRecord {
    pub category: VehicleCategory,
    /// Fiscal horsepower (CV), used for private vehicles
    #[serde(default)]
    pub horsepower: u32,
    /// Public transport vehicles are banded by capacity instead of horsepower
    #[serde(default)]
    pub is_public_transport: bool,
    /// Seats for passenger vehicles, tonnes for freight vehicles
    #[serde(default)]
    #[schemars(with = "Option<f64>")]
    pub capacity: Option<Decimal>,
}

/// Everything a taxpayer declared, as captured by the input form.
///
/// Immutable for the duration of a computation. Only `category` and `revenue`
/// are validated by the engine; the other fields fall back to defaults when
/// absent.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct TaxpayerSnapshot {
    /// Legal form; computation fails when absent
    #[serde(default)]
    pub category: Option<TaxpayerCategory>,
    /// Annual revenue (chiffre d'affaires) in FCFA
    #[schemars(with = "f64")]
    pub revenue: Decimal,
    /// Location code of the business premises
    #[serde(default)]
    pub location: Option<String>,
    /// Rental value of the business premises
    #[serde(default)]
    #[schemars(with = "Option<f64>")]
    pub property_value: Option<Decimal>,
    /// Number of business premises
    #[serde(default)]
    pub property_count: Option<u32>,
    #[serde(default)]
    pub is_importer: bool,
    /// Annual import/export volume in FCFA
    #[serde(default)]
    #[schemars(with = "Option<f64>")]
    pub import_export_amount: Option<Decimal>,
    #[serde(default)]
    pub has_government_contracts: bool,
    /// Total value of public procurement contracts in FCFA
    #[serde(default)]
    #[schemars(with = "Option<f64>")]
    pub contract_amount: Option<Decimal>,
    #[serde(default)]
    pub sector: Sector,
    /// Encashable products (produits encaissables); estimated from revenue when absent
    #[serde(default)]
    #[schemars(with = "Option<f64>")]
    pub encashable_products: Option<Decimal>,
    #[serde(default)]
    pub has_properties: bool,
    #[serde(default)]
    pub properties: Option<Vec<PropertyRecord>>,
    #[serde(default)]
    pub has_vehicles: bool,
    #[serde(default)]
    pub vehicles: Option<Vec<VehicleRecord>>,
}

impl TaxpayerSnapshot {
    pub fn new(category: TaxpayerCategory, revenue: Decimal) -> Self {
        TaxpayerSnapshot {
            category: Some(category),
            revenue,
            ..Default::default()
        }
    }

    /// Property records, when real estate was declared
    pub fn declared_properties(&self) -> Option<&[PropertyRecord]> {
        if self.has_properties {
            self.properties.as_deref()
        } else {
            None
        }
    }

    /// Vehicle records, when vehicles were declared
    pub fn declared_vehicles(&self) -> Option<&[VehicleRecord]> {
        if self.has_vehicles {
            self.vehicles.as_deref()
        } else {
            None
        }
    }

    /// Hex SHA-256 of the canonical JSON form of this snapshot
    pub fn fingerprint(&self) -> anyhow::Result<String> {
        let bytes = serde_json::to_vec(self)?;
        Ok(hex::encode(Sha256::digest(&bytes)))
    }
}

/// Read a snapshot from JSON
pub fn read_snapshot_json<R: Read>(reader: R) -> anyhow::Result<TaxpayerSnapshot> {
    let snapshot = serde_json::from_reader(reader)?;
    Ok(snapshot)
}
