pub mod gear;
pub mod loader;
pub mod loose;
pub mod master;
pub mod registry;
pub mod ship;
pub mod validate;

pub use gear::{GearCategoryEntry, GearRecord};
pub use loader::{load_batch, BatchInput};
pub use loose::{loose_row, LooseNumber};
pub use master::{lookup, lookup_loose, MasterData, MasterFile, DEFAULT_MASTER_PATH};
pub use registry::{load_registry, registry_path_for, save_registry, DataSetEntry, Registry};
pub use ship::{ShipClassEntry, ShipRecord, ShipTypeEntry, UnitRecord};
pub use validate::{
    validate_master, ValidationDiagnostic, ValidationReport, ValidationSeverity,
};
