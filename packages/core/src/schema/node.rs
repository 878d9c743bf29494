use crate::error::{Error, Result};
use crate::keyed::{KeyRules, KeyedStore};
use crate::schema::parameter::PARAMETER_RULES;
use crate::schema::structure::STRUCT_RULES;
use crate::schema::table::TABLE_RULES;
use crate::schema::{Direction, Parameter, Struct, Table};
use crate::value::Value;

/// Composite tag used by an older wire dialect for both structs and tables.
const LEGACY_ARRAY_TAG: &str = "array";

/// One entry of a [`RemoteApi`](crate::RemoteApi).
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SchemaNode {
    Parameter(Parameter),
    Struct(Struct),
    Table(Table),
}

impl SchemaNode {
    pub fn name(&self) -> &str {
        match self {
            SchemaNode::Parameter(p) => p.name(),
            SchemaNode::Struct(s) => s.name(),
            SchemaNode::Table(t) => t.name(),
        }
    }

    pub fn direction(&self) -> Direction {
        match self {
            SchemaNode::Parameter(p) => p.direction(),
            SchemaNode::Struct(s) => s.direction(),
            SchemaNode::Table(_) => Direction::Table,
        }
    }

    pub fn is_optional(&self) -> bool {
        match self {
            SchemaNode::Parameter(p) => p.is_optional(),
            SchemaNode::Struct(s) => s.is_optional(),
            SchemaNode::Table(t) => t.is_optional(),
        }
    }

    /// The `type` discriminator this node serializes with.
    pub fn type_tag(&self) -> &'static str {
        match self {
            SchemaNode::Parameter(p) => p.element_type().as_str(),
            SchemaNode::Struct(_) => Struct::TYPE_TAG,
            SchemaNode::Table(_) => Table::TYPE_TAG,
        }
    }

    pub fn as_table(&self) -> Option<&Table> {
        match self {
            SchemaNode::Table(t) => Some(t),
            _ => None,
        }
    }

    pub fn as_struct(&self) -> Option<&Struct> {
        match self {
            SchemaNode::Struct(s) => Some(s),
            _ => None,
        }
    }

    pub fn cast(&self, raw: &Value) -> Result<Value> {
        match self {
            SchemaNode::Parameter(p) => p.cast(raw),
            SchemaNode::Struct(s) => s.cast(raw),
            SchemaNode::Table(t) => t.cast(raw),
        }
    }

    pub fn to_wire(&self, typed: &Value) -> Result<Value> {
        match self {
            SchemaNode::Parameter(p) => p.to_wire(typed),
            SchemaNode::Struct(s) => s.to_wire(typed),
            SchemaNode::Table(t) => t.to_wire(typed),
        }
    }

    pub fn to_keyed(&self) -> KeyedStore {
        match self {
            SchemaNode::Parameter(p) => p.to_keyed(),
            SchemaNode::Struct(s) => s.to_keyed(),
            SchemaNode::Table(t) => t.to_keyed(),
        }
    }

    /// Decode one schema entry, dispatching on its `type` discriminator.
    ///
    /// `"table"` decodes a [`Table`], `"struct"` a [`Struct`], anything else
    /// a [`Parameter`].
    ///
    /// # Errors
    ///
    /// - `InvalidJson` if `value` is not a map
    /// - `MissingType` if there is no `type` field
    /// - `InvalidArgument` for the deprecated `"array"` tag
    /// - any error of the chosen variant's decoder
    pub fn from_value(value: &Value) -> Result<Self> {
        let map = value.as_map().ok_or_else(|| {
            Error::invalid_json(format!("schema entry must be an object, got {}", value.kind()))
        })?;
        let tag = match map.get("type") {
            Some(Value::String(tag)) => tag.as_str(),
            Some(other) => {
                return Err(Error::invalid_argument(format!(
                    "'type' must be a string, got {}",
                    other.kind()
                )))
            }
            None => return Err(Error::MissingType),
        };

        let load = |rules: &'static KeyRules| {
            KeyedStore::from_entries(rules, map.iter().map(|(k, v)| (k.clone(), v.clone())))
        };
        match tag {
            Table::TYPE_TAG => Table::from_keyed(&load(&TABLE_RULES)?).map(SchemaNode::Table),
            Struct::TYPE_TAG => Struct::from_keyed(&load(&STRUCT_RULES)?).map(SchemaNode::Struct),
            LEGACY_ARRAY_TAG => Err(Error::invalid_argument(
                "the 'array' type tag is deprecated, use 'struct' or 'table'",
            )),
            _ => Parameter::from_keyed(&load(&PARAMETER_RULES)?).map(SchemaNode::Parameter),
        }
    }
}

impl From<Parameter> for SchemaNode {
    fn from(p: Parameter) -> Self {
        SchemaNode::Parameter(p)
    }
}

impl From<Struct> for SchemaNode {
    fn from(s: Struct) -> Self {
        SchemaNode::Struct(s)
    }
}

impl From<Table> for SchemaNode {
    fn from(t: Table) -> Self {
        SchemaNode::Table(t)
    }
}
