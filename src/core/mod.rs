pub mod error;
pub mod rates;
pub mod result;
pub mod snapshot;

// Flat public surface for domain types.
pub use error::{InvalidInput, TaxError};
pub use rates::{RateTables, Tier};
pub use result::{Assessment, LineItem, Regime, TaxResult};
pub use snapshot::{
    read_snapshot_json, PropertyRecord, Sector, TaxpayerCategory, TaxpayerSnapshot,
    VehicleCategory, VehicleRecord,
};
