use super::error::InvalidInput;
use rust_decimal::Decimal;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Tax regime a taxpayer is assessed under
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub enum Regime {
    /// Taxe Professionnelle Synthétique, for revenue up to 50 million
    #[serde(rename = "TPS")]
    FlatRate,
    /// Régime du réel
    #[serde(rename = "REEL")]
    General,
}

impl Regime {
    pub fn code(self) -> &'static str {
        match self {
            Regime::FlatRate => "TPS",
            Regime::General => "REEL",
        }
    }

    pub fn title(self) -> &'static str {
        match self {
            Regime::FlatRate => "Synthetic Professional Tax",
            Regime::General => "General Regime",
        }
    }
}

impl fmt::Display for Regime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// One line of the liability breakdown
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct LineItem {
    pub name: String,
    /// Zero for purely informational lines
    #[schemars(with = "f64")]
    pub amount: Decimal,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rate: Option<String>,
    pub description: String,
}

impl LineItem {
    pub fn new(name: impl Into<String>, amount: Decimal, description: impl Into<String>) -> Self {
        LineItem {
            name: name.into(),
            amount,
            rate: None,
            description: description.into(),
        }
    }

    pub fn with_rate(mut self, rate: impl Into<String>) -> Self {
        self.rate = Some(rate.into());
        self
    }

    pub fn is_informational(&self) -> bool {
        self.amount.is_zero() && self.rate.is_some()
    }
}

/// Result of a tax computation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct TaxResult {
    #[schemars(with = "f64")]
    pub total_tax: Decimal,
    pub regime: Regime,
    /// Breakdown in presentation order
    pub breakdown: Vec<LineItem>,
    pub details: Vec<String>,
    pub additional_info: Vec<String>,
}

/// Partial result produced by a calculator, merged by the regime calculators.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Assessment {
    pub line_items: Vec<LineItem>,
    pub details: Vec<String>,
    pub additional_info: Vec<String>,
}

impl Assessment {
    pub fn item(item: LineItem) -> Self {
        Assessment {
            line_items: vec![item],
            ..Default::default()
        }
    }

    pub fn notes(details: &[&str], additional_info: &[&str]) -> Self {
        Assessment {
            line_items: Vec::new(),
            details: details.iter().map(|s| s.to_string()).collect(),
            additional_info: additional_info.iter().map(|s| s.to_string()).collect(),
        }
    }

    /// Sum of the line items, `None` when it does not fit in a `Decimal`
    pub fn total(&self) -> Option<Decimal> {
        self.line_items
            .iter()
            .try_fold(Decimal::ZERO, |sum, item| sum.checked_add(item.amount))
    }

    pub fn into_result(self, regime: Regime) -> Result<TaxResult, InvalidInput> {
        let total_tax = self
            .total()
            .ok_or(InvalidInput::AmountOverflow("total tax"))?;
        Ok(TaxResult {
            total_tax,
            regime,
            breakdown: self.line_items,
            details: self.details,
            additional_info: self.additional_info,
        })
    }
}

impl From<LineItem> for Assessment {
    fn from(item: LineItem) -> Self {
        Assessment::item(item)
    }
}

impl FromIterator<Assessment> for Assessment {
    fn from_iter<I: IntoIterator<Item = Assessment>>(iter: I) -> Self {
        iter.into_iter().fold(Assessment::default(), |mut acc, part| {
            acc.line_items.extend(part.line_items);
            acc.details.extend(part.details);
            acc.additional_info.extend(part.additional_info);
            acc
        })
    }
}
