//! Module and role catalogue wiring.
//!
//! Wraps the JSON catalogue (validated against `schema/catalogue.schema.json`)
//! so the selector and builders share one immutable snapshot. Types here
//! mirror the catalogue fields; callers go through `CatalogueRepository` for
//! lookups.

pub mod identity;
pub mod model;
pub mod repository;

pub use identity::{CatalogueKey, ModuleId, OutcomeDimension, RoleId};
pub use model::{
    CatalogueDocument, Module, ModuleRecord, RoleProfile, RoleRecord, load_catalogue_from_path,
};
pub use repository::{CATALOGUE_SCHEMA_VERSION, CatalogueRepository};
