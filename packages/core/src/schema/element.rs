use crate::cast::{cast_value, to_wire_value};
use crate::error::{Error, Result};
use crate::keyed::{KeyRules, KeyedStore};
use crate::schema::ElementType;
use crate::value::{Value, ValueKind};

pub(crate) static ELEMENT_RULES: KeyRules = KeyRules {
    name: "element",
    keys: &["type", "name"],
    kinds: &[ValueKind::String],
};

/// A named, typed leaf: one struct member or one table column.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Element {
    ty: ElementType,
    name: String,
}

impl Element {
    pub fn new(ty: ElementType, name: impl Into<String>) -> Result<Self> {
        let name = name.into();
        validate_name(&name, "element")?;
        Ok(Self { ty, name })
    }

    /// Build an element from a textual type tag.
    pub fn parse(ty: &str, name: impl Into<String>) -> Result<Self> {
        Self::new(ty.parse()?, name)
    }

    pub fn element_type(&self) -> ElementType {
        self.ty
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn set_type(&mut self, ty: ElementType) {
        self.ty = ty;
    }

    pub fn set_name(&mut self, name: impl Into<String>) -> Result<()> {
        let name = name.into();
        validate_name(&name, "element")?;
        self.name = name;
        Ok(())
    }

    /// Cast one raw wire value to this element's type.
    pub fn cast(&self, raw: &Value) -> Result<Value> {
        cast_value(self.ty, &self.name, raw)
    }

    /// Convert a typed value back to its wire form.
    pub fn to_wire(&self, typed: &Value) -> Result<Value> {
        to_wire_value(self.ty, &self.name, typed)
    }

    pub fn to_keyed(&self) -> KeyedStore {
        let mut store = KeyedStore::new(&ELEMENT_RULES);
        store.insert_trusted("type", self.ty.as_str());
        store.insert_trusted("name", self.name.as_str());
        store
    }

    pub fn from_keyed(store: &KeyedStore) -> Result<Self> {
        let ty = store.require_str("type")?;
        let name = store.require_str("name")?;
        Self::parse(ty, name)
    }

    /// The element as a `{type, name}` map, the form it takes in `members`.
    pub fn to_value(&self) -> Value {
        Value::Map(
            self.to_keyed()
                .iter()
                .map(|(k, v)| (k.to_string(), v.clone()))
                .collect(),
        )
    }

    pub fn from_value(value: &Value) -> Result<Self> {
        let map = value.as_map().ok_or_else(|| {
            Error::invalid_argument(format!("member must be an element object, got {}", value.kind()))
        })?;
        let store = KeyedStore::from_entries(
            &ELEMENT_RULES,
            map.iter().map(|(k, v)| (k.clone(), v.clone())),
        )?;
        Self::from_keyed(&store)
    }
}

/// Names must be non-empty once surrounding whitespace is removed.
pub(crate) fn validate_name(name: &str, node: &str) -> Result<()> {
    if name.trim().is_empty() {
        return Err(Error::invalid_argument(format!("{} name must not be empty", node)));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use collection_literals::btree;

    #[test]
    fn new_validates_name() {
        assert!(Element::new(ElementType::Int, "N").is_ok());
        let err = Element::new(ElementType::Int, "   ").unwrap_err();
        assert!(matches!(err, Error::InvalidArgument { .. }));
    }

    #[test]
    fn parse_rejects_unknown_type() {
        assert!(matches!(
            Element::parse("decimal", "N"),
            Err(Error::InvalidArgument { .. })
        ));
        assert_eq!(
            Element::parse("week", "KW").unwrap().element_type(),
            ElementType::Week
        );
    }

    #[test]
    fn setters_revalidate() {
        let mut element = Element::new(ElementType::Int, "N").unwrap();
        assert!(element.set_name("").is_err());
        assert_eq!(element.name(), "N");

        element.set_name("M").unwrap();
        element.set_type(ElementType::Date);
        assert_eq!(element.name(), "M");
        assert_eq!(element.element_type(), ElementType::Date);
    }

    #[test]
    fn cast_delegates_to_type() {
        let element = Element::new(ElementType::Date, "BUDAT").unwrap();
        assert_eq!(element.cast(&Value::from("00000000")).unwrap(), Value::Null);

        let err = element.cast(&Value::from("garbage")).unwrap_err();
        assert!(err.to_string().contains("BUDAT"));
    }

    #[test]
    fn keyed_form_is_type_then_name() {
        let element = Element::new(ElementType::Float, "AMT").unwrap();
        let keys: Vec<String> = element.to_keyed().to_map().into_iter().map(|(k, _)| k).collect();
        assert_eq!(keys, vec!["type".to_string(), "name".to_string()]);
        assert_eq!(Element::from_keyed(&element.to_keyed()).unwrap(), element);
    }

    #[test]
    fn from_value_requires_both_fields() {
        let value = Value::Map(btree! { "name".to_string() => Value::from("AMT") });
        assert_eq!(
            Element::from_value(&value).unwrap_err(),
            Error::MissingField {
                field: "type",
                node: "element",
            }
        );
    }

    #[test]
    fn from_value_rejects_non_elements() {
        assert!(matches!(
            Element::from_value(&Value::from("AMT")),
            Err(Error::InvalidArgument { .. })
        ));

        let nested = Value::Map(btree! {
            "type".to_string() => Value::from("struct"),
            "name".to_string() => Value::from("INNER"),
        });
        assert!(matches!(
            Element::from_value(&nested),
            Err(Error::InvalidArgument { .. })
        ));
    }
}
