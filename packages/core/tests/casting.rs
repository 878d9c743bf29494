//! End-to-end casting through a built schema.

use collection_literals::btree;
use remoteapi_core::{
    cast_value, to_wire_value, Direction, Element, ElementType, Error, Parameter, RemoteApi,
    Struct, Table, Value,
};

fn scenario() -> RemoteApi {
    RemoteApi::new()
        .with(Parameter::input(ElementType::Int, "N", false).unwrap())
        .with(
            Struct::new(
                "RESULT",
                Direction::Output,
                false,
                vec![
                    Element::new(ElementType::Float, "AMT").unwrap(),
                    Element::new(ElementType::Bool, "OK").unwrap(),
                ],
            )
            .unwrap(),
        )
}

#[test]
fn scenario_inputs_outputs_and_missing_output() {
    let api = scenario();

    let inputs = api
        .cast_input_values(&Value::Map(btree! { "N".to_string() => Value::from("42") }))
        .unwrap();
    assert_eq!(inputs.get("N"), Some(&Value::Integer(42)));

    let outputs = api
        .cast_output_values(&Value::Map(btree! {
            "RESULT".to_string() => Value::Map(btree! {
                "AMT".to_string() => Value::from("12.5"),
                "OK".to_string() => Value::from("1"),
            }),
        }))
        .unwrap();
    let result = outputs.get("RESULT").unwrap();
    assert_eq!(result.get("AMT"), Some(&Value::Float(12.5)));
    assert_eq!(result.get("OK"), Some(&Value::Bool(true)));

    assert_eq!(
        api.cast_output_values(&Value::map()).unwrap_err(),
        Error::missing_element("RESULT", "output")
    );
}

#[test]
fn canonical_wire_strings_survive_a_round_trip() {
    let cases = [
        (ElementType::Date, "20191030"),
        (ElementType::Time, "235959"),
        (ElementType::Timestamp, "20191030080001"),
        (ElementType::Week, "201944"),
        (ElementType::HexBin, "00FF10AB"),
        (ElementType::Date, "00000000"),
        (ElementType::Week, "000000"),
    ];
    for (ty, wire) in cases {
        let typed = cast_value(ty, "F", &Value::from(wire)).unwrap();
        assert_eq!(
            to_wire_value(ty, "F", &typed).unwrap(),
            Value::from(wire),
            "{} {}",
            ty,
            wire
        );
    }
}

#[test]
fn cast_failures_name_the_element() {
    let table = Table::with_members(
        "ITEMS",
        false,
        vec![Element::new(ElementType::Date, "BUDAT").unwrap()],
    )
    .unwrap();
    let api = RemoteApi::new().with(table);

    let err = api
        .cast_tables(&Value::Map(btree! {
            "ITEMS".to_string() => Value::Array(vec![Value::Map(btree! {
                "BUDAT".to_string() => Value::from("20191332"),
            })]),
        }))
        .unwrap_err();
    assert!(matches!(err, Error::Cast { ref element, .. } if element == "BUDAT"));
}

#[test]
fn schema_is_shared_across_threads() {
    let api = std::sync::Arc::new(scenario());
    let handles: Vec<_> = (0..4)
        .map(|i| {
            let api = api.clone();
            std::thread::spawn(move || {
                api.cast_input_values(&Value::Map(btree! {
                    "N".to_string() => Value::from(i.to_string()),
                }))
                .unwrap()
            })
        })
        .collect();
    for (i, handle) in handles.into_iter().enumerate() {
        assert_eq!(
            handle.join().unwrap().get("N"),
            Some(&Value::Integer(i as i64))
        );
    }
}
