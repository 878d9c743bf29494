use crate::cast::{cast_value, to_wire_value};
use crate::error::{Error, Result};
use crate::keyed::{KeyRules, KeyedStore};
use crate::schema::element::validate_name;
use crate::schema::{Direction, ElementType};
use crate::value::{Value, ValueKind};

pub(crate) static PARAMETER_RULES: KeyRules = KeyRules {
    name: "value",
    keys: &["type", "name", "direction", "optional"],
    kinds: &[ValueKind::String, ValueKind::Bool],
};

/// A flat, directional call parameter of a primitive type.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Parameter {
    ty: ElementType,
    name: String,
    direction: Direction,
    optional: bool,
}

impl Parameter {
    /// # Errors
    ///
    /// `InvalidArgument` for an extended wire type, an empty name, or a
    /// direction other than input/output.
    pub fn new(
        ty: ElementType,
        name: impl Into<String>,
        direction: Direction,
        optional: bool,
    ) -> Result<Self> {
        let name = name.into();
        validate_type(ty)?;
        validate_name(&name, "value")?;
        validate_direction(direction)?;
        Ok(Self {
            ty,
            name,
            direction,
            optional,
        })
    }

    pub fn input(ty: ElementType, name: impl Into<String>, optional: bool) -> Result<Self> {
        Self::new(ty, name, Direction::Input, optional)
    }

    pub fn output(ty: ElementType, name: impl Into<String>, optional: bool) -> Result<Self> {
        Self::new(ty, name, Direction::Output, optional)
    }

    pub fn element_type(&self) -> ElementType {
        self.ty
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

    pub fn set_type(&mut self, ty: ElementType) -> Result<()> {
        validate_type(ty)?;
        self.ty = ty;
        Ok(())
    }

    pub fn set_direction(&mut self, direction: Direction) -> Result<()> {
        validate_direction(direction)?;
        self.direction = direction;
        Ok(())
    }

    pub fn set_optional(&mut self, optional: bool) {
        self.optional = optional;
    }

    pub fn cast(&self, raw: &Value) -> Result<Value> {
        cast_value(self.ty, &self.name, raw)
    }

    pub fn to_wire(&self, typed: &Value) -> Result<Value> {
        to_wire_value(self.ty, &self.name, typed)
    }

    pub fn to_keyed(&self) -> KeyedStore {
        let mut store = KeyedStore::new(&PARAMETER_RULES);
        store.insert_trusted("type", self.ty.as_str());
        store.insert_trusted("name", self.name.as_str());
        store.insert_trusted("direction", self.direction.as_str());
        store.insert_trusted("optional", self.optional);
        store
    }

    /// Rebuild from a keyed form; all four fields are required.
    pub fn from_keyed(store: &KeyedStore) -> Result<Self> {
        let ty = store.require_str("type")?;
        let name = store.require_str("name")?;
        let direction = store.require_str("direction")?;
        let optional = store.require_bool("optional")?;
        Self::new(ty.parse()?, name, direction.parse()?, optional)
    }
}

fn validate_type(ty: ElementType) -> Result<()> {
    if !ty.is_primitive() {
        return Err(Error::invalid_argument(format!(
            "type '{}' is only allowed for struct and table members",
            ty
        )));
    }
    Ok(())
}

fn validate_direction(direction: Direction) -> Result<()> {
    if direction == Direction::Table {
        return Err(Error::invalid_argument(
            "value direction must be 'input' or 'output'",
        ));
    }
    Ok(())
}
