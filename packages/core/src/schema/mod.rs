//! Schema nodes describing a remote call's parameter surface.
//!
//! - [`Element`]: a named, typed leaf (struct member or table column)
//! - [`Parameter`]: a flat input/output value of a primitive type
//! - [`Struct`]: a directional record with typed members
//! - [`Table`]: a row set with typed columns
//! - [`SchemaNode`]: the closed union of the three entry kinds

mod element;
mod node;
mod parameter;
mod structure;
mod table;
mod types;

pub use element::Element;
pub use node::SchemaNode;
pub use parameter::Parameter;
pub use structure::Struct;
pub use table::Table;
pub use types::{Direction, ElementType};
