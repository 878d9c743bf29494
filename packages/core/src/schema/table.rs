use log::trace;

use crate::cast::{cast_record, record_to_wire};
use crate::error::{Error, Result};
use crate::keyed::{KeyRules, KeyedStore};
use crate::schema::element::validate_name;
use crate::schema::structure::{members_from_keyed, members_to_value, require_tag};
use crate::schema::{Direction, Element};
use crate::value::{Record, Value, ValueKind};

pub(crate) static TABLE_RULES: KeyRules = KeyRules {
    name: "table",
    keys: &["type", "name", "direction", "optional", "members"],
    kinds: &[ValueKind::String, ValueKind::Bool, ValueKind::Array],
};

/// A row set with an ordered list of typed columns. Direction is always
/// [`Direction::Table`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Table {
    name: String,
    optional: bool,
    members: Vec<Element>,
}

impl Table {
    pub const TYPE_TAG: &'static str = "table";

    /// # Errors
    ///
    /// `InvalidArgument` for an empty name or any direction but `table`.
    pub fn new(
        name: impl Into<String>,
        direction: Direction,
        optional: bool,
        members: Vec<Element>,
    ) -> Result<Self> {
        let name = name.into();
        validate_name(&name, "table")?;
        if direction != Direction::Table {
            return Err(Error::invalid_argument(format!(
                "table '{}' must have direction 'table', got '{}'",
                name, direction
            )));
        }
        Ok(Self {
            name,
            optional,
            members,
        })
    }

    /// Shorthand for [`Table::new`] with the fixed direction.
    pub fn with_members(
        name: impl Into<String>,
        optional: bool,
        members: Vec<Element>,
    ) -> Result<Self> {
        Self::new(name, Direction::Table, optional, members)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn direction(&self) -> Direction {
        Direction::Table
    }

    pub fn is_optional(&self) -> bool {
        self.optional
    }

    pub fn members(&self) -> &[Element] {
        &self.members
    }

    pub fn member(&self, name: &str) -> Option<&Element> {
        self.members.iter().find(|m| m.name() == name)
    }

    /// Cast every row, in order.
    ///
    /// # Errors
    ///
    /// - `InvalidArgument` if `rows` is not an array or a row is not a map
    /// - `ArrayElementMissing` if a row lacks a declared column
    pub fn cast(&self, rows: &Value) -> Result<Value> {
        self.map_rows(rows, cast_record)
    }

    pub fn to_wire(&self, rows: &Value) -> Result<Value> {
        self.map_rows(rows, record_to_wire)
    }

    pub fn to_keyed(&self) -> KeyedStore {
        let mut store = KeyedStore::new(&TABLE_RULES);
        store.insert_trusted("type", Self::TYPE_TAG);
        store.insert_trusted("name", self.name.as_str());
        store.insert_trusted("direction", Direction::Table.as_str());
        store.insert_trusted("optional", self.optional);
        store.insert_trusted("members", members_to_value(&self.members));
        store
    }

    pub fn from_keyed(store: &KeyedStore) -> Result<Self> {
        require_tag(store, Self::TYPE_TAG)?;
        let name = store.require_str("name")?;
        let direction = store.require_str("direction")?;
        let optional = store.require_bool("optional")?;
        let members = members_from_keyed(store)?;
        Self::new(name, direction.parse()?, optional, members)
    }

    fn map_rows(
        &self,
        rows: &Value,
        convert: fn(&[Element], &str, &Record) -> Result<Record>,
    ) -> Result<Value> {
        let rows = rows.as_array().ok_or_else(|| {
            Error::invalid_argument(format!(
                "table '{}' expects an array of rows, got {}",
                self.name,
                rows.kind()
            ))
        })?;
        trace!("table {}: converting {} rows", self.name, rows.len());

        rows.iter()
            .enumerate()
            .map(|(i, row)| {
                let record = row.as_map().ok_or_else(|| {
                    Error::invalid_argument(format!(
                        "row {} of table '{}' is not a record, got {}",
                        i,
                        self.name,
                        row.kind()
                    ))
                })?;
                convert(&self.members, &self.name, record).map(Value::Map)
            })
            .collect::<Result<Vec<_>>>()
            .map(Value::Array)
    }
}
