use crate::core::{Assessment, InvalidInput, LineItem, PropertyRecord, RateTables};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

/// Single property tax (Taxe Foncière Unique)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PropertyTax {
    pub amount: Decimal,
    /// Properties whose location was not in the rate table
    pub defaulted_locations: usize,
}

impl PropertyTax {
    pub fn assessment(&self) -> Assessment {
        LineItem::new(
            "Single Property Tax (TFU)",
            self.amount,
            "Tax on built and non-built property",
        )
        .into()
    }
}

pub fn calculate_property_tax(
    tables: &RateTables,
    properties: &[PropertyRecord],
) -> Result<PropertyTax, InvalidInput> {
    let mut tax = PropertyTax {
        amount: Decimal::ZERO,
        defaulted_locations: 0,
    };
    for property in properties {
        let resolved = tables.resolve_location(Some(&property.location));
        if resolved.defaulted {
            tax.defaulted_locations += 1;
        }
        let rate = if property.is_built {
            resolved.entry.built_property_rate
        } else {
            resolved.entry.non_built_property_rate
        };
        tax.amount = property
            .value
            .checked_mul(rate / dec!(100))
            .and_then(|due| tax.amount.checked_add(due))
            .ok_or(InvalidInput::AmountOverflow("property tax"))?;
    }
    log::debug!(
        "Property tax - properties: {}, amount: {}",
        properties.len(),
        tax.amount
    );
    Ok(tax)
}
