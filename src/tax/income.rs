use crate::core::{Assessment, LineItem, Sector, TaxpayerCategory, TaxpayerSnapshot};
use crate::money::format_percent;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

/// Share of revenue assumed to be profit
const PROFIT_MARGIN: Decimal = dec!(0.20);
/// Share of revenue assumed encashable when not declared
const ENCASHABLE_SHARE: Decimal = dec!(0.80);

/// Income tax on estimated profit (IS for companies, IBA otherwise)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IncomeTax {
    pub estimated_profit: Decimal,
    pub rate: Decimal,
    /// Profit times rate, before the minimum applies
    pub nominal: Decimal,
    pub minimum: Decimal,
    pub organization: bool,
}

impl IncomeTax {
    pub fn amount(&self) -> Decimal {
        self.nominal.max(self.minimum)
    }

    pub fn name(&self) -> &'static str {
        if self.organization {
            "Corporate Income Tax (IS)"
        } else {
            "Business Profits Tax (IBA)"
        }
    }

    pub fn assessment(&self) -> Assessment {
        LineItem::new(
            self.name(),
            self.amount(),
            "Tax on estimated net profit, subject to the minimum tax",
        )
        .with_rate(format_percent(self.rate))
        .into()
    }
}

/// Rate on profit: 25% for the preferential sector, 30% otherwise
pub fn sector_rate(sector: Sector) -> Decimal {
    if sector.is_preferential() {
        dec!(0.25)
    } else {
        dec!(0.30)
    }
}

pub fn calculate_income_tax(snapshot: &TaxpayerSnapshot, category: TaxpayerCategory) -> IncomeTax {
    let revenue = snapshot.revenue;
    let organization = category.is_organization();
    let estimated_profit = revenue * PROFIT_MARGIN;
    let rate = sector_rate(snapshot.sector);
    let nominal = estimated_profit * rate;

    let encashable = snapshot
        .encashable_products
        .filter(|v| *v > Decimal::ZERO)
        .unwrap_or(revenue * ENCASHABLE_SHARE);

    let minimum = match snapshot.sector {
        Sector::Construction => (encashable * dec!(0.03)).max(dec!(500000)),
        Sector::RealEstate => (encashable * dec!(0.10)).max(dec!(500000)),
        Sector::FuelDistribution => dec!(250000).max(revenue * dec!(0.0006)),
        Sector::General | Sector::Education => {
            let floor = if organization {
                dec!(250000)
            } else {
                dec!(500000)
            };
            (encashable * dec!(0.015)).max(floor)
        }
    };

    let tax = IncomeTax {
        estimated_profit,
        rate,
        nominal,
        minimum,
        organization,
    };
    log::debug!(
        "Income tax - nominal: {}, minimum: {}, final: {}",
        tax.nominal,
        tax.minimum,
        tax.amount()
    );
    tax
}
