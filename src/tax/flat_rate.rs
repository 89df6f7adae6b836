//! Synthetic Professional Tax regime (TPS), for revenue up to the ceiling

use super::{asset_taxes, broadcasting_fee, chamber::calculate_chamber_contribution};
use crate::core::{
    Assessment, InvalidInput, LineItem, RateTables, Regime, TaxResult, TaxpayerCategory,
    TaxpayerSnapshot,
};
use crate::money::{format_fcfa, format_percent};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

pub const FLAT_RATE: Decimal = dec!(0.05);
pub const FLAT_RATE_MINIMUM: Decimal = dec!(10000);

const DETAILS: &[&str] = &[
    "As a taxpayer with annual revenue below 50 million FCFA, you are subject to the Synthetic Professional Tax (TPS) regime.",
    "The TPS replaces business profits tax (IBA), the patent and licence contributions and the employer payroll levy (VPS).",
];

const OBLIGATIONS: &[&str] = &[
    "Taxes are due no later than 30 April following the financial year.",
    "Two advance payments are due on 10 February and 10 June.",
    "No advance payment is due for the first year of activity.",
    "Simplified accounts must be kept and supporting documents retained for 10 years.",
];

pub fn flat_rate_tax(revenue: Decimal) -> Decimal {
    (revenue * FLAT_RATE).max(FLAT_RATE_MINIMUM)
}

pub fn assess_flat_rate(
    tables: &RateTables,
    snapshot: &TaxpayerSnapshot,
    category: TaxpayerCategory,
) -> Result<TaxResult, InvalidInput> {
    let tps = LineItem::new(
        "Synthetic Professional Tax (TPS)",
        flat_rate_tax(snapshot.revenue),
        format!(
            "{} of annual revenue (minimum {})",
            format_percent(FLAT_RATE),
            format_fcfa(FLAT_RATE_MINIMUM)
        ),
    )
    .with_rate(format_percent(FLAT_RATE));

    let assessment: Assessment = [
        Assessment::from(tps),
        broadcasting_fee(),
        calculate_chamber_contribution(tables, snapshot.revenue, category).assessment(),
    ]
    .into_iter()
    .chain(asset_taxes(tables, snapshot)?)
    .chain([Assessment::notes(DETAILS, OBLIGATIONS)])
    .collect();

    let result = assessment.into_result(Regime::FlatRate)?;
    log::debug!("TPS total: {}", result.total_tax);
    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn five_percent_of_revenue() {
        assert_eq!(flat_rate_tax(dec!(10000000)), dec!(500000));
        assert_eq!(flat_rate_tax(dec!(3000000)), dec!(150000));
    }

    #[test]
    fn minimum_applies_to_small_revenue() {
        assert_eq!(flat_rate_tax(dec!(100000)), dec!(10000));
        assert_eq!(flat_rate_tax(Decimal::ZERO), dec!(10000));
    }

    #[test]
    fn breakdown_order() {
        let snapshot = TaxpayerSnapshot::new(TaxpayerCategory::EntrepreneurIndividual, dec!(10000000));
        let result = assess_flat_rate(
            RateTables::standard(),
            &snapshot,
            TaxpayerCategory::EntrepreneurIndividual,
        )
        .unwrap();
        let names: Vec<_> = result.breakdown.iter().map(|i| i.name.as_str()).collect();
        assert_eq!(
            names,
            [
                "Synthetic Professional Tax (TPS)",
                "Broadcasting Fee",
                "CCI Benin Contribution"
            ]
        );
        assert_eq!(result.breakdown[0].rate.as_deref(), Some("5%"));
        assert_eq!(result.details.len(), 2);
        assert_eq!(result.additional_info.len(), 4);
    }
}
