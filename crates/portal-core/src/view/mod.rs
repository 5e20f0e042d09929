//! View identifiers and the registry that maps them to breadcrumbs.
//!
//! - `model`: the closed [`ViewId`] enumeration
//! - `registry`: lookup, string resolution and breadcrumb labels

mod model;
mod registry;

pub use model::ViewId;
pub use registry::{Breadcrumb, ViewRegistry};
