//! General regime (régime du réel), for revenue above the flat-rate ceiling

use super::chamber::calculate_chamber_contribution;
use super::income::calculate_income_tax;
use super::patent::calculate_patent_tax;
use super::{asset_taxes, broadcasting_fee};
use crate::core::{
    Assessment, InvalidInput, LineItem, RateTables, Regime, Sector, TaxResult, TaxpayerCategory,
    TaxpayerSnapshot,
};
use crate::money::format_percent;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

pub const VAT_RATE: Decimal = dec!(0.18);

const DETAILS: &[&str] = &[
    "With annual revenue above 50 million FCFA, you are subject to the general regime.",
    "Taxes must be declared and paid monthly, no later than the 10th of each month.",
    "The annual return must be filed no later than 30 April.",
];

const OBLIGATIONS: &[&str] = &[
    "Full accounts compliant with OHADA standards must be kept.",
    "Income tax advances are due on 10 March, 10 June, 10 September and 10 December.",
    "Every operation must be invoiced with a standardised invoice.",
    "Payments above 100,000 FCFA must be made through a bank.",
    "A visible professional sign showing your IFU must be displayed.",
];

/// Advance on income tax: 1% for importers and the general sector, 3% otherwise
pub fn aib_rate(snapshot: &TaxpayerSnapshot) -> Decimal {
    if snapshot.is_importer || snapshot.sector == Sector::General {
        dec!(0.01)
    } else {
        dec!(0.03)
    }
}

fn vat_notice() -> Assessment {
    LineItem::new(
        "VAT (Information)",
        Decimal::ZERO,
        format!(
            "VAT at {}, an indirect tax borne by the final consumer",
            format_percent(VAT_RATE)
        ),
    )
    .with_rate(format_percent(VAT_RATE))
    .into()
}

fn advance_on_income_tax(snapshot: &TaxpayerSnapshot) -> Assessment {
    let rate = aib_rate(snapshot);
    LineItem::new(
        "Advance on Income Tax (AIB)",
        snapshot.revenue * rate,
        "Advance withheld on imports, commercial purchases and services",
    )
    .with_rate(format_percent(rate))
    .into()
}

pub fn assess_general(
    tables: &RateTables,
    snapshot: &TaxpayerSnapshot,
    category: TaxpayerCategory,
) -> Result<TaxResult, InvalidInput> {
    if snapshot.location.is_none() {
        log::warn!(
            "No location declared, using {} by default",
            tables.default_location
        );
    }

    let assessment: Assessment = [
        calculate_patent_tax(tables, snapshot)?.assessment(),
        vat_notice(),
        calculate_income_tax(snapshot, category).assessment(),
        advance_on_income_tax(snapshot),
        broadcasting_fee(),
        calculate_chamber_contribution(tables, snapshot.revenue, category).assessment(),
    ]
    .into_iter()
    .chain(asset_taxes(tables, snapshot)?)
    .chain([Assessment::notes(DETAILS, OBLIGATIONS)])
    .collect();

    let result = assessment.into_result(Regime::General)?;
    log::debug!("REEL total: {}", result.total_tax);
    Ok(result)
}
