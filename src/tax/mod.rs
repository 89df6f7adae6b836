//! Tax computation engine
//!
//! [`TaxEngine::compute`] validates a [`TaxpayerSnapshot`], picks the regime
//! from the revenue and delegates to the matching regime calculator. Each
//! calculator returns an [`Assessment`] fragment; the regime calculators merge
//! them in presentation order. The engine holds no state besides a shared
//! reference to its rate tables, so it can be used from any number of threads.

pub mod calendar;
pub mod chamber;
pub mod flat_rate;
pub mod general;
pub mod income;
pub mod patent;
pub mod property;
pub mod vehicle;

use crate::core::{
    Assessment, InvalidInput, LineItem, RateTables, Regime, TaxError, TaxResult, TaxpayerSnapshot,
};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

pub use calendar::{payment_schedule, Deadline, TaxOffice};

/// Highest revenue still assessed under the flat-rate regime
pub const FLAT_RATE_CEILING: Decimal = dec!(50000000);

/// Annual broadcasting licence fee, charged under both regimes
pub const BROADCASTING_FEE: Decimal = dec!(4000);

pub fn select_regime(revenue: Decimal) -> Regime {
    if revenue <= FLAT_RATE_CEILING {
        Regime::FlatRate
    } else {
        Regime::General
    }
}

#[derive(Debug, Clone, Copy)]
pub struct TaxEngine<'a> {
    tables: &'a RateTables,
}

impl Default for TaxEngine<'static> {
    fn default() -> Self {
        TaxEngine::new(RateTables::standard())
    }
}

impl<'a> TaxEngine<'a> {
    pub fn new(tables: &'a RateTables) -> Self {
        TaxEngine { tables }
    }

    pub fn tables(&self) -> &'a RateTables {
        self.tables
    }

    pub fn compute(&self, snapshot: &TaxpayerSnapshot) -> Result<TaxResult, TaxError> {
        let category = snapshot.category.ok_or(InvalidInput::MissingCategory)?;
        if snapshot.revenue < Decimal::ZERO {
            return Err(InvalidInput::NegativeRevenue(snapshot.revenue).into());
        }

        let regime = select_regime(snapshot.revenue);
        log::info!("Regime: {}, revenue: {}", regime, snapshot.revenue);

        let result = match regime {
            Regime::FlatRate => flat_rate::assess_flat_rate(self.tables, snapshot, category),
            Regime::General => general::assess_general(self.tables, snapshot, category),
        }?;
        log::info!("Total tax: {}", result.total_tax);
        Ok(result)
    }
}

/// Compute with the standard rate tables
pub fn compute_tax(snapshot: &TaxpayerSnapshot) -> Result<TaxResult, TaxError> {
    TaxEngine::default().compute(snapshot)
}

fn broadcasting_fee() -> Assessment {
    LineItem::new(
        "Broadcasting Fee",
        BROADCASTING_FEE,
        "Mandatory licence fee paid to the national broadcaster (ORTB)",
    )
    .into()
}

/// Property and vehicle taxes, for the assets the taxpayer declared
fn asset_taxes(
    tables: &RateTables,
    snapshot: &TaxpayerSnapshot,
) -> Result<Vec<Assessment>, InvalidInput> {
    let property = snapshot
        .declared_properties()
        .map(|properties| property::calculate_property_tax(tables, properties))
        .transpose()?
        .map(|tax| tax.assessment());
    let vehicle = snapshot
        .declared_vehicles()
        .map(|vehicles| vehicle::calculate_vehicle_tax(vehicles).assessment());
    Ok(property.into_iter().chain(vehicle).collect())
}
