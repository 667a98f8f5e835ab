mod inspections;
mod seed;

pub use inspections::{
    Alert, AlertStatus, Inspection, InspectionStatus, InspectionStore, Stats, StoreError,
    StoreResult, TIMESTAMP_FORMAT,
};
pub use seed::seed_demo_data;
