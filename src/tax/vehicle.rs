use crate::core::{Assessment, LineItem, VehicleCategory, VehicleRecord};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

/// Motor vehicle tax (Taxe sur les Véhicules à Moteur)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VehicleTax {
    pub amount: Decimal,
}

impl VehicleTax {
    pub fn assessment(&self) -> Assessment {
        LineItem::new("Motor Vehicle Tax (TVM)", self.amount, "Tax on motor vehicles").into()
    }
}

pub fn calculate_vehicle_tax(vehicles: &[VehicleRecord]) -> VehicleTax {
    let amount: Decimal = vehicles.iter().map(vehicle_fee).sum();
    log::debug!("Vehicle tax - vehicles: {}, amount: {}", vehicles.len(), amount);
    VehicleTax { amount }
}

/// Flat fee for one vehicle. Public transport is banded by capacity (seats or
/// tonnes), private vehicles by fiscal horsepower. A public vehicle without a
/// declared capacity falls in its top band.
pub fn vehicle_fee(vehicle: &VehicleRecord) -> Decimal {
    if !vehicle.is_public_transport {
        return match vehicle.horsepower {
            0..=7 => dec!(20000),
            8..=10 => dec!(30000),
            11..=15 => dec!(40000),
            _ => dec!(60000),
        };
    }

    let within = |limit: Decimal| vehicle.capacity.is_some_and(|c| c <= limit);
    match vehicle.category {
        VehicleCategory::Person => {
            if within(dec!(9)) {
                dec!(38000)
            } else if within(dec!(20)) {
                dec!(57000)
            } else {
                dec!(86800)
            }
        }
        VehicleCategory::Goods => {
            if within(dec!(2.5)) {
                dec!(49500)
            } else if within(dec!(5)) {
                dec!(57000)
            } else if within(dec!(10)) {
                dec!(86800)
            } else {
                dec!(136400)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn public(category: VehicleCategory, capacity: Decimal) -> VehicleRecord {
        VehicleRecord {
            category,
            horsepower: 0,
            is_public_transport: true,
            capacity: Some(capacity),
        }
    }

    fn private(horsepower: u32) -> VehicleRecord {
        VehicleRecord {
            category: VehicleCategory::Person,
            horsepower,
            is_public_transport: false,
            capacity: None,
        }
    }

    #[test]
    fn public_passenger_bands() {
        assert_eq!(vehicle_fee(&public(VehicleCategory::Person, dec!(9))), dec!(38000));
        assert_eq!(vehicle_fee(&public(VehicleCategory::Person, dec!(15))), dec!(57000));
        assert_eq!(vehicle_fee(&public(VehicleCategory::Person, dec!(20))), dec!(57000));
        assert_eq!(vehicle_fee(&public(VehicleCategory::Person, dec!(21))), dec!(86800));
    }

    #[test]
    fn public_goods_bands() {
        assert_eq!(vehicle_fee(&public(VehicleCategory::Goods, dec!(2.5))), dec!(49500));
        assert_eq!(vehicle_fee(&public(VehicleCategory::Goods, dec!(3))), dec!(57000));
        assert_eq!(vehicle_fee(&public(VehicleCategory::Goods, dec!(10))), dec!(86800));
        assert_eq!(vehicle_fee(&public(VehicleCategory::Goods, dec!(10.5))), dec!(136400));
    }

    #[test]
    fn private_horsepower_bands() {
        assert_eq!(vehicle_fee(&private(7)), dec!(20000));
        assert_eq!(vehicle_fee(&private(10)), dec!(30000));
        assert_eq!(vehicle_fee(&private(12)), dec!(40000));
        assert_eq!(vehicle_fee(&private(16)), dec!(60000));
    }

    #[test]
    fn missing_capacity_is_top_band() {
        let mut vehicle = public(VehicleCategory::Goods, dec!(1));
        vehicle.capacity = None;
        assert_eq!(vehicle_fee(&vehicle), dec!(136400));
    }

    #[test]
    fn sums_fleet() {
        let fleet = [public(VehicleCategory::Person, dec!(15)), private(12)];
        assert_eq!(calculate_vehicle_tax(&fleet).amount, dec!(97000));
        assert_eq!(calculate_vehicle_tax(&[]).amount, Decimal::ZERO);
    }
}
