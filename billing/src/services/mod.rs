pub mod file_catalog;
pub mod plan_catalog;
pub mod upstream;

pub use file_catalog::FilePlanCatalog;
pub use plan_catalog::{build_plan_catalog, parse_catalog, CatalogError, PlanCatalogService};
pub use upstream::UpstreamPlanCatalog;
