//! RemoteApi - the full parameter schema of one remote call.

use log::{debug, trace};

use crate::error::{Error, Result};
use crate::keyed::KeyedStore;
use crate::schema::{Direction, SchemaNode};
use crate::value::{Record, Value};

/// Ordered collection of schema entries for one remote call.
///
/// Built once, then treated as read-only configuration. Casting never
/// touches the schema, so a built `RemoteApi` can be shared across threads.
///
/// # Example
///
/// ```rust
/// use remoteapi_core::{ElementType, Parameter, RemoteApi, Value};
///
/// let mut api = RemoteApi::new();
/// api.add(Parameter::input(ElementType::Int, "N", false).unwrap());
///
/// let record = Value::Map([("N".to_string(), Value::from("42"))].into_iter().collect());
/// let typed = api.cast_input_values(&record).unwrap();
/// assert_eq!(typed.get("N"), Some(&Value::Integer(42)));
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RemoteApi {
    entries: Vec<SchemaNode>,
}

impl RemoteApi {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an entry. Names are not deduplicated.
    pub fn add(&mut self, entry: impl Into<SchemaNode>) -> &mut Self {
        self.entries.push(entry.into());
        self
    }

    /// Builder form of [`RemoteApi::add`].
    #[must_use]
    pub fn with(mut self, entry: impl Into<SchemaNode>) -> Self {
        self.add(entry);
        self
    }

    pub fn entries(&self) -> &[SchemaNode] {
        &self.entries
    }

    pub fn iter(&self) -> impl Iterator<Item = &SchemaNode> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// First entry with the given name.
    pub fn get(&self, name: &str) -> Option<&SchemaNode> {
        self.entries.iter().find(|e| e.name() == name)
    }

    /// All entries with the given direction, in insertion order.
    pub fn by_direction(&self, direction: Direction) -> Vec<&SchemaNode> {
        self.entries
            .iter()
            .filter(|e| e.direction() == direction)
            .collect()
    }

    pub fn input_values(&self) -> Vec<&SchemaNode> {
        self.by_direction(Direction::Input)
    }

    pub fn output_values(&self) -> Vec<&SchemaNode> {
        self.by_direction(Direction::Output)
    }

    pub fn tables(&self) -> Vec<&SchemaNode> {
        self.by_direction(Direction::Table)
    }

    pub fn cast_input_values(&self, record: &Value) -> Result<Value> {
        self.cast_values(Direction::Input, record)
    }

    pub fn cast_output_values(&self, record: &Value) -> Result<Value> {
        self.cast_values(Direction::Output, record)
    }

    pub fn cast_tables(&self, record: &Value) -> Result<Value> {
        self.cast_values(Direction::Table, record)
    }

    /// Cast the entries of one direction found in `record`.
    ///
    /// Keys without a matching entry are copied through. An absent optional
    /// entry is skipped; an absent mandatory one fails the whole cast.
    ///
    /// # Errors
    ///
    /// - `InvalidArgument` if `record` is not a map
    /// - `ArrayElementMissing(entry, direction)` for an absent mandatory entry
    /// - any cast error of an entry
    pub fn cast_values(&self, direction: Direction, record: &Value) -> Result<Value> {
        self.convert_values(direction, record, SchemaNode::cast)
    }

    /// Reverse of [`RemoteApi::cast_input_values`]: typed inputs to wire form.
    pub fn to_wire_input_values(&self, record: &Value) -> Result<Value> {
        self.convert_values(Direction::Input, record, SchemaNode::to_wire)
    }

    pub fn to_wire_tables(&self, record: &Value) -> Result<Value> {
        self.convert_values(Direction::Table, record, SchemaNode::to_wire)
    }

    fn convert_values(
        &self,
        direction: Direction,
        record: &Value,
        convert: fn(&SchemaNode, &Value) -> Result<Value>,
    ) -> Result<Value> {
        let map = record.as_map().ok_or_else(|| {
            Error::invalid_argument(format!(
                "{} values must be a record, got {}",
                direction,
                record.kind()
            ))
        })?;

        let mut out: Record = map.clone();
        let mut converted = 0usize;
        for entry in self.entries.iter().filter(|e| e.direction() == direction) {
            match map.get(entry.name()) {
                Some(raw) => {
                    out.insert(entry.name().to_string(), convert(entry, raw)?);
                    converted += 1;
                }
                None if entry.is_optional() => {
                    trace!("skipping absent optional {} '{}'", direction, entry.name());
                }
                None => return Err(Error::missing_element(entry.name(), direction.as_str())),
            }
        }
        debug!("converted {} {} values", converted, direction);
        Ok(Value::Map(out))
    }

    /// Decode a schema from its array-of-entries form.
    ///
    /// # Errors
    ///
    /// `InvalidJson` if `value` is not an array. Any entry failure aborts the
    /// decode and is wrapped as `Error::Entry` with the entry's index.
    pub fn from_value(value: &Value) -> Result<Self> {
        let items = value.as_array().ok_or_else(|| {
            Error::invalid_json(format!("schema must be an array, got {}", value.kind()))
        })?;
        let entries = items
            .iter()
            .enumerate()
            .map(|(i, item)| SchemaNode::from_value(item).map_err(|e| e.in_entry(i)))
            .collect::<Result<Vec<_>>>()?;
        debug!("decoded remote api with {} entries", entries.len());
        Ok(Self { entries })
    }

    /// Each entry's keyed form, in insertion order.
    pub fn to_keyed_entries(&self) -> Vec<KeyedStore> {
        self.entries.iter().map(SchemaNode::to_keyed).collect()
    }
}

impl FromIterator<SchemaNode> for RemoteApi {
    fn from_iter<I: IntoIterator<Item = SchemaNode>>(iter: I) -> Self {
        Self {
            entries: iter.into_iter().collect(),
        }
    }
}

impl<'a> IntoIterator for &'a RemoteApi {
    type Item = &'a SchemaNode;
    type IntoIter = std::slice::Iter<'a, SchemaNode>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}
