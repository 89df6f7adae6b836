use crate::core::{Assessment, LineItem, RateTables, TaxpayerCategory};
use rust_decimal::Decimal;

/// Chamber of Commerce and Industry (CCI Benin) contribution
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChamberContribution {
    pub amount: Decimal,
    /// True when the amount did not come from a matching bracket
    pub defaulted: bool,
}

impl ChamberContribution {
    pub fn assessment(&self) -> Assessment {
        LineItem::new(
            "CCI Benin Contribution",
            self.amount,
            "Contribution to the Chamber of Commerce and Industry of Benin",
        )
        .into()
    }
}

/// Bracketed flat fee by revenue and legal form.
///
/// Never fails: negative revenue yields zero and a table without a matching
/// bracket yields the terminal bracket's fee, both flagged as defaulted.
pub fn calculate_chamber_contribution(
    tables: &RateTables,
    revenue: Decimal,
    category: TaxpayerCategory,
) -> ChamberContribution {
    if revenue < Decimal::ZERO {
        log::error!("Invalid revenue for chamber contribution: {}", revenue);
        return ChamberContribution {
            amount: Decimal::ZERO,
            defaulted: true,
        };
    }

    let Some(resolved) = tables.chamber.resolve(revenue) else {
        log::warn!("Chamber table is empty, no contribution charged");
        return ChamberContribution {
            amount: Decimal::ZERO,
            defaulted: true,
        };
    };
    if resolved.defaulted {
        log::warn!(
            "No chamber bracket for revenue {}, using the terminal bracket",
            revenue
        );
    }

    let fee = &resolved.entry.value;
    let amount = if category.is_organization() {
        fee.organization
    } else {
        fee.individual
    };
    log::debug!(
        "Chamber contribution - revenue: {}, bracket: {:?}, amount: {}, organization: {}",
        revenue,
        resolved.entry.upper_bound,
        amount,
        category.is_organization()
    );

    ChamberContribution {
        amount,
        defaulted: resolved.defaulted,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::rates::{ChamberFee, Tier, TierTable};
    use rust_decimal_macros::dec;

    fn contribution(revenue: Decimal, category: TaxpayerCategory) -> ChamberContribution {
        calculate_chamber_contribution(RateTables::standard(), revenue, category)
    }

    #[test]
    fn individual_brackets() {
        use TaxpayerCategory::EntrepreneurIndividual as Ind;
        assert_eq!(contribution(dec!(0), Ind).amount, dec!(20000));
        assert_eq!(contribution(dec!(3000000), Ind).amount, dec!(20000));
        assert_eq!(contribution(dec!(10000000), Ind).amount, dec!(50000));
        assert_eq!(contribution(dec!(50000000), Ind).amount, dec!(150000));
        assert_eq!(contribution(dec!(50000001), Ind).amount, dec!(400000));
    }

    #[test]
    fn organization_brackets() {
        use TaxpayerCategory::EntrepreneurCompany as Org;
        assert_eq!(contribution(dec!(5000000), Org).amount, dec!(100000));
        assert_eq!(contribution(dec!(25000000), Org).amount, dec!(200000));
        assert_eq!(contribution(dec!(60000000), Org).amount, dec!(400000));
        assert_eq!(contribution(dec!(1500000000), Org).amount, dec!(1200000));
        assert_eq!(contribution(dec!(4000000001), Org).amount, dec!(2000000));
    }

    #[test]
    fn private_individual_pays_individual_rate() {
        assert_eq!(
            contribution(dec!(20000000), TaxpayerCategory::Individual).amount,
            dec!(50000)
        );
    }

    #[test]
    fn negative_revenue_yields_zero() {
        let result = contribution(dec!(-1), TaxpayerCategory::Individual);
        assert_eq!(result.amount, Decimal::ZERO);
        assert!(result.defaulted);
    }

    #[test]
    fn unmatched_revenue_uses_terminal_bracket() {
        let mut tables = RateTables::benin();
        tables.chamber = TierTable {
            tiers: vec![
                Tier {
                    upper_bound: Some(dec!(100)),
                    value: ChamberFee {
                        individual: dec!(1),
                        organization: dec!(2),
                    },
                },
                Tier {
                    upper_bound: Some(dec!(200)),
                    value: ChamberFee {
                        individual: dec!(3),
                        organization: dec!(4),
                    },
                },
            ],
        };
        let result = calculate_chamber_contribution(
            &tables,
            dec!(500),
            TaxpayerCategory::EntrepreneurCompany,
        );
        assert_eq!(result.amount, dec!(4));
        assert!(result.defaulted);
    }
}
