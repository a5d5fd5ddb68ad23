//! Vehicle maintenance records.

mod core;
mod service;

pub use self::core::{Maintenance, MaintenanceDraft, total_maintenance_cost};
pub use service::MaintenanceService;

pub(crate) use self::core::MaintenanceWire;
