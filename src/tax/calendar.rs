//! Filing calendar and competent tax office for an assessed regime

use crate::core::Regime;
use chrono::NaiveDate;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use schemars::JsonSchema;
use serde::Serialize;
use std::fmt;

/// Revenue above which general-regime taxpayers are handled by the DGE
pub const LARGE_ENTERPRISE_THRESHOLD: Decimal = dec!(1000000000);

/// Tax office a taxpayer reports to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, JsonSchema)]
pub enum TaxOffice {
    /// Centre des Impôts des Petites Entreprises
    #[serde(rename = "CIPE")]
    SmallEnterprises,
    /// Centre des Impôts des Moyennes Entreprises
    #[serde(rename = "CIME")]
    MediumEnterprises,
    /// Direction des Grandes Entreprises
    #[serde(rename = "DGE")]
    LargeEnterprises,
}

impl TaxOffice {
    pub fn for_regime(regime: Regime, revenue: Decimal) -> Self {
        match regime {
            Regime::FlatRate => TaxOffice::SmallEnterprises,
            Regime::General if revenue > LARGE_ENTERPRISE_THRESHOLD => TaxOffice::LargeEnterprises,
            Regime::General => TaxOffice::MediumEnterprises,
        }
    }
}

impl fmt::Display for TaxOffice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            TaxOffice::SmallEnterprises => "Small Enterprises Tax Centre (CIPE) of your municipality",
            TaxOffice::MediumEnterprises => "Medium Enterprises Tax Centre (CIME)",
            TaxOffice::LargeEnterprises => "Large Enterprises Directorate (DGE)",
        };
        f.write_str(name)
    }
}

/// A dated payment or filing obligation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, JsonSchema)]
pub struct Deadline {
    #[schemars(with = "String")]
    pub date: NaiveDate,
    pub label: String,
}

/// Deadlines falling in the year after `fiscal_year`, sorted by date
pub fn payment_schedule(regime: Regime, fiscal_year: i32) -> Vec<Deadline> {
    let year = fiscal_year + 1;
    let mut deadlines = Vec::new();
    let mut push = |month: u32, day: u32, label: String| {
        if let Some(date) = NaiveDate::from_ymd_opt(year, month, day) {
            deadlines.push(Deadline { date, label });
        }
    };

    match regime {
        Regime::FlatRate => {
            push(2, 10, "First advance (50% of previous tax)".to_string());
            push(6, 10, "Second advance (50% of previous tax)".to_string());
        }
        Regime::General => {
            for month in 1..=12 {
                push(month, 10, "Monthly return (VAT, AIB, etc.)".to_string());
            }
            for month in [3, 6, 9, 12] {
                push(month, 10, "Quarterly income tax advance".to_string());
            }
        }
    }
    push(4, 30, "Annual return and balance".to_string());

    deadlines.sort_by_key(|d| d.date);
    deadlines
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn office_by_regime_and_size() {
        assert_eq!(
            TaxOffice::for_regime(Regime::FlatRate, dec!(10000000)),
            TaxOffice::SmallEnterprises
        );
        assert_eq!(
            TaxOffice::for_regime(Regime::General, dec!(1000000000)),
            TaxOffice::MediumEnterprises
        );
        assert_eq!(
            TaxOffice::for_regime(Regime::General, dec!(1000000001)),
            TaxOffice::LargeEnterprises
        );
    }

    #[test]
    fn flat_rate_schedule() {
        let schedule = payment_schedule(Regime::FlatRate, 2025);
        let dates: Vec<_> = schedule.iter().map(|d| d.date).collect();
        assert_eq!(dates, [date(2026, 2, 10), date(2026, 4, 30), date(2026, 6, 10)]);
    }

    #[test]
    fn general_schedule() {
        let schedule = payment_schedule(Regime::General, 2025);
        assert_eq!(schedule.len(), 17);
        assert_eq!(schedule.first().unwrap().date, date(2026, 1, 10));
        assert_eq!(schedule.last().unwrap().date, date(2026, 12, 10));
        let quarterly = schedule
            .iter()
            .filter(|d| d.label.starts_with("Quarterly"))
            .count();
        assert_eq!(quarterly, 4);
        assert!(schedule.windows(2).all(|w| w[0].date <= w[1].date));
    }
}
