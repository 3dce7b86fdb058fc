//! Shared data types for the plan catalog services.

pub mod billing;

pub use billing::{ErrorBody, PlanCatalog, PlanRecordError, SubscriptionPlan};
