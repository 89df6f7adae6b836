//! Patent contribution (contribution des patentes)
//!
//! The patent is made of three rights:
//! - a fixed right, from the import/export schedule for importers or from the
//!   location's patent base otherwise, plus a surcharge per started billion of
//!   revenue above one billion
//! - a proportional right on the rental value of the business premises, never
//!   below a third of the fixed right once it applies
//! - an additional right of 0.5% on public procurement contracts

use crate::core::{Assessment, InvalidInput, LineItem, RateTables, TaxpayerSnapshot};
use crate::money::format_fcfa;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

const BILLION: Decimal = dec!(1000000000);
const REVENUE_SURCHARGE_PER_BILLION: Decimal = dec!(10000);
const PUBLIC_CONTRACT_RATE: Decimal = dec!(0.005);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PatentTax {
    pub fixed: Decimal,
    pub proportional: Decimal,
    pub additional: Decimal,
    pub total: Decimal,
}

impl PatentTax {
    pub fn assessment(&self) -> Assessment {
        LineItem::new(
            "Patent Contribution",
            self.total,
            format!(
                "Fixed right: {} + Proportional right: {} + Additional patent: {}",
                format_fcfa(self.fixed),
                format_fcfa(self.proportional),
                format_fcfa(self.additional)
            ),
        )
        .into()
    }
}

pub fn calculate_patent_tax(
    tables: &RateTables,
    snapshot: &TaxpayerSnapshot,
) -> Result<PatentTax, InvalidInput> {
    let overflow = || InvalidInput::AmountOverflow("patent contribution");
    let location = tables.resolve_location(snapshot.location.as_deref()).entry;

    let fixed = match import_export_amount(snapshot) {
        Some(amount) => import_export_fixed_right(tables, amount),
        None => per_started_billion(snapshot.revenue - BILLION)
            .checked_mul(REVENUE_SURCHARGE_PER_BILLION)
            .and_then(|surcharge| location.patent_fixed_base.checked_add(surcharge)),
    }
    .ok_or_else(overflow)?;

    let proportional = match (positive(snapshot.property_value), snapshot.property_count) {
        (Some(value), Some(count)) if count > 0 => value
            .checked_mul(location.patent_proportional_rate / dec!(100))
            .and_then(|v| v.checked_mul(Decimal::from(count)))
            .ok_or_else(overflow)?
            .max(fixed / dec!(3)),
        _ => Decimal::ZERO,
    };

    let additional = if snapshot.has_government_contracts {
        snapshot.contract_amount.unwrap_or_default() * PUBLIC_CONTRACT_RATE
    } else {
        Decimal::ZERO
    };

    let total = fixed
        .checked_add(proportional)
        .and_then(|sum| sum.checked_add(additional))
        .ok_or_else(overflow)?;

    let patent = PatentTax {
        fixed,
        proportional,
        additional,
        total,
    };
    log::debug!(
        "Patent - fixed: {}, proportional: {}, additional: {}, total: {}",
        patent.fixed,
        patent.proportional,
        patent.additional,
        patent.total
    );
    Ok(patent)
}

fn import_export_amount(snapshot: &TaxpayerSnapshot) -> Option<Decimal> {
    if snapshot.is_importer {
        positive(snapshot.import_export_amount)
    } else {
        None
    }
}

/// Fixed right from the import/export schedule. The open-ended tier adds its
/// per-billion surcharge for every started billion above the last bound.
/// `None` on overflow.
fn import_export_fixed_right(tables: &RateTables, amount: Decimal) -> Option<Decimal> {
    let Some(resolved) = tables.import_export.resolve(amount) else {
        return Some(Decimal::ZERO);
    };
    let right = &resolved.entry.value;
    let surcharge = match right.per_billion {
        Some(per_billion) => {
            let excess = amount - tables.import_export_surcharge_floor();
            per_started_billion(excess).checked_mul(per_billion)?
        }
        None => Decimal::ZERO,
    };
    right.fixed_right.checked_add(surcharge)
}

/// Number of started billions in `excess`, zero when not positive
fn per_started_billion(excess: Decimal) -> Decimal {
    if excess > Decimal::ZERO {
        (excess / BILLION).ceil()
    } else {
        Decimal::ZERO
    }
}

fn positive(value: Option<Decimal>) -> Option<Decimal> {
    value.filter(|v| *v > Decimal::ZERO)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::TaxpayerCategory;

    fn snapshot(revenue: Decimal, location: &str) -> TaxpayerSnapshot {
        TaxpayerSnapshot {
            location: Some(location.to_string()),
            ..TaxpayerSnapshot::new(TaxpayerCategory::EntrepreneurCompany, revenue)
        }
    }

    fn patent(snapshot: &TaxpayerSnapshot) -> PatentTax {
        calculate_patent_tax(RateTables::standard(), snapshot).unwrap()
    }

    #[test]
    fn zone_one_base_without_extras() {
        let p = patent(&snapshot(dec!(60000000), "cotonou"));
        assert_eq!(p.fixed, dec!(70000));
        assert_eq!(p.proportional, Decimal::ZERO);
        assert_eq!(p.additional, Decimal::ZERO);
        assert_eq!(p.total, dec!(70000));
    }

    #[test]
    fn zone_two_base() {
        assert_eq!(patent(&snapshot(dec!(60000000), "parakou")).fixed, dec!(60000));
    }

    #[test]
    fn unknown_location_uses_default_zone() {
        assert_eq!(patent(&snapshot(dec!(60000000), "lagos")).fixed, dec!(70000));
        let no_location = TaxpayerSnapshot::new(TaxpayerCategory::EntrepreneurCompany, dec!(60000000));
        assert_eq!(patent(&no_location).fixed, dec!(70000));
    }

    #[test]
    fn revenue_surcharge_per_started_billion() {
        assert_eq!(patent(&snapshot(dec!(1000000000), "cotonou")).fixed, dec!(70000));
        assert_eq!(patent(&snapshot(dec!(1000000001), "cotonou")).fixed, dec!(80000));
        assert_eq!(patent(&snapshot(dec!(2000000000), "cotonou")).fixed, dec!(80000));
        assert_eq!(patent(&snapshot(dec!(3500000000), "parakou")).fixed, dec!(90000));
    }

    #[test]
    fn importer_uses_first_matching_tier() {
        let mut s = snapshot(dec!(60000000), "cotonou");
        s.is_importer = true;

        s.import_export_amount = Some(dec!(50000000));
        assert_eq!(patent(&s).fixed, dec!(150000));
        s.import_export_amount = Some(dec!(80000000));
        assert_eq!(patent(&s).fixed, dec!(150000));
        s.import_export_amount = Some(dec!(150000000));
        assert_eq!(patent(&s).fixed, dec!(337500));
        s.import_export_amount = Some(dec!(10000000000));
        assert_eq!(patent(&s).fixed, dec!(1125000));
    }

    #[test]
    fn importer_above_ten_billion_pays_per_billion() {
        let mut s = snapshot(dec!(60000000), "cotonou");
        s.is_importer = true;
        s.import_export_amount = Some(dec!(12500000000));
        // 2.5 billion above the last bound, three started billions
        assert_eq!(patent(&s).fixed, dec!(1155000));
    }

    #[test]
    fn importer_flag_without_amount_uses_zone() {
        let mut s = snapshot(dec!(60000000), "parakou");
        s.is_importer = true;
        assert_eq!(patent(&s).fixed, dec!(60000));
    }

    #[test]
    fn proportional_right_with_floor() {
        let mut s = snapshot(dec!(60000000), "cotonou");
        s.property_value = Some(dec!(1000000));
        s.property_count = Some(2);
        // 1,000,000 x 17% x 2
        assert_eq!(patent(&s).proportional, dec!(340000));

        s.property_value = Some(dec!(10000));
        // 3,400 is below a third of the 70,000 fixed right
        assert_eq!(patent(&s).proportional.round_dp(2), dec!(23333.33));
    }

    #[test]
    fn proportional_right_needs_value_and_count() {
        let mut s = snapshot(dec!(60000000), "cotonou");
        s.property_value = Some(dec!(1000000));
        assert_eq!(patent(&s).proportional, Decimal::ZERO);
        s.property_count = Some(0);
        assert_eq!(patent(&s).proportional, Decimal::ZERO);
    }

    #[test]
    fn public_contracts_add_half_percent() {
        let mut s = snapshot(dec!(60000000), "cotonou");
        s.has_government_contracts = true;
        s.contract_amount = Some(dec!(20000000));
        let p = patent(&s);
        assert_eq!(p.additional, dec!(100000));
        assert_eq!(p.total, dec!(170000));

        s.has_government_contracts = false;
        assert_eq!(patent(&s).additional, Decimal::ZERO);
    }

    #[test]
    fn description_lists_all_rights() {
        let p = PatentTax {
            fixed: dec!(70000),
            proportional: dec!(0),
            additional: dec!(100000),
            total: dec!(170000),
        };
        let item = &p.assessment().line_items[0];
        assert_eq!(item.amount, dec!(170000));
        assert_eq!(
            item.description,
            "Fixed right: 70 000 FCFA + Proportional right: 0 FCFA + Additional patent: 100 000 FCFA"
        );
    }

    #[test]
    fn fixed_right_follows_location_table() {
        let mut tables = RateTables::benin();
        for entry in tables.locations.values_mut() {
            entry.patent_fixed_base = dec!(1);
        }
        let s = snapshot(dec!(2500000000), "cotonou");
        let p = calculate_patent_tax(&tables, &s).unwrap();
        // base 1 plus two started billions above one billion
        assert_eq!(p.fixed, dec!(20001));
        assert_eq!(p.total, dec!(20001));
    }

    #[test]
    fn oversized_premises_are_rejected() {
        let mut s = snapshot(dec!(60000000), "cotonou");
        s.property_value = Some(dec!(10000000000000000000000000000));
        s.property_count = Some(u32::MAX);
        assert_eq!(
            calculate_patent_tax(RateTables::standard(), &s),
            Err(InvalidInput::AmountOverflow("patent contribution"))
        );
    }
}
