//! Identifier remapping and referential integrity for the racing warehouse.
//!
//! The build runs in two phases. Dimension builders clean each raw entity,
//! assign warehouse keys and return an original-to-surrogate
//! [`IdentifierMap`]; the maps are gathered into an [`IdentifierRegistry`]
//! that only the dimension phase can produce. Fact builders then translate
//! every foreign key through that registry.

pub mod columns;
pub mod dimensions;
pub mod error;
pub mod facts;
pub mod frame;
pub mod idmap;
pub mod integrity;
mod keys;
pub mod pipeline;
pub mod warehouse;

pub use columns::{ColumnValues, int_values, real_values, text_values};
pub use dimensions::{DimensionBuilder, DimensionOutput, DimensionSet, build_dimensions};
pub use error::{Result, TransformError};
pub use facts::{FactBuilder, FactContext, FactKey, UNKNOWN_KEY, build_facts};
pub use frame::WarehouseTable;
pub use idmap::{IdentifierMap, IdentifierRegistry};
pub use integrity::verify_integrity;
pub use pipeline::{PipelineOutput, run_pipeline};
pub use warehouse::Warehouse;
