use crate::cast::{cast_record, record_to_wire};
use crate::error::{Error, Result};
use crate::keyed::{KeyRules, KeyedStore};
use crate::schema::element::validate_name;
use crate::schema::{Direction, Element};
use crate::value::{Value, ValueKind};

pub(crate) static STRUCT_RULES: KeyRules = KeyRules {
    name: "struct",
    keys: &["type", "name", "direction", "optional", "members"],
    kinds: &[ValueKind::String, ValueKind::Bool, ValueKind::Array],
};

/// A directional record parameter with an ordered list of typed members.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Struct {
    name: String,
    direction: Direction,
    optional: bool,
    members: Vec<Element>,
}

impl Struct {
    pub const TYPE_TAG: &'static str = "struct";

    /// # Errors
    ///
    /// `InvalidArgument` for an empty name or the `table` direction.
    pub fn new(
        name: impl Into<String>,
        direction: Direction,
        optional: bool,
        members: Vec<Element>,
    ) -> Result<Self> {
        let name = name.into();
        validate_name(&name, "struct")?;
        if direction == Direction::Table {
            return Err(Error::invalid_argument(format!(
                "struct '{}' must have direction 'input' or 'output'",
                name
            )));
        }
        Ok(Self {
            name,
            direction,
            optional,
            members,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }

    pub fn is_optional(&self) -> bool {
        self.optional
    }

    pub fn members(&self) -> &[Element] {
        &self.members
    }

    /// First member with the given name.
    pub fn member(&self, name: &str) -> Option<&Element> {
        self.members.iter().find(|m| m.name() == name)
    }

    /// Cast every declared member of `record`.
    ///
    /// Keys that are not declared members are copied through untouched.
    ///
    /// # Errors
    ///
    /// - `InvalidArgument` if `record` is not a map
    /// - `ArrayElementMissing` for the first declared member without a key
    /// - `Cast` if a member value cannot be parsed
    pub fn cast(&self, record: &Value) -> Result<Value> {
        let map = record.as_map().ok_or_else(|| self.expected_record(record))?;
        cast_record(&self.members, &self.name, map).map(Value::Map)
    }

    pub fn to_wire(&self, record: &Value) -> Result<Value> {
        let map = record.as_map().ok_or_else(|| self.expected_record(record))?;
        record_to_wire(&self.members, &self.name, map).map(Value::Map)
    }

    pub fn to_keyed(&self) -> KeyedStore {
        let mut store = KeyedStore::new(&STRUCT_RULES);
        store.insert_trusted("type", Self::TYPE_TAG);
        store.insert_trusted("name", self.name.as_str());
        store.insert_trusted("direction", self.direction.as_str());
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

    fn expected_record(&self, found: &Value) -> Error {
        Error::invalid_argument(format!(
            "struct '{}' expects a record, got {}",
            self.name,
            found.kind()
        ))
    }
}

pub(crate) fn members_to_value(members: &[Element]) -> Value {
    Value::Array(members.iter().map(Element::to_value).collect())
}

pub(crate) fn members_from_keyed(store: &KeyedStore) -> Result<Vec<Element>> {
    store
        .require_array("members")?
        .iter()
        .map(Element::from_value)
        .collect()
}

pub(crate) fn require_tag(store: &KeyedStore, tag: &'static str) -> Result<()> {
    let ty = store.require_str("type")?;
    if ty != tag {
        return Err(Error::invalid_argument(format!(
            "expected type '{}', got '{}'",
            tag, ty
        )));
    }
    Ok(())
}
