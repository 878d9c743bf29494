//! Call driver tests against an in-memory transport.

use std::sync::{Arc, Mutex};

use collection_literals::btree;
use remoteapi::{
    Call, Connection, Direction, Element, ElementType, Error, JsonCodec, Parameter, RemoteApi,
    RemoteFunction, Result, Struct, Table, Value,
};

type Staged = Arc<Mutex<Vec<(String, Value)>>>;

/// Transport that serves a fixed schema and result, recording staged params.
struct MockConnection {
    api: RemoteApi,
    result: Value,
    staged: Staged,
}

struct MockFunction {
    name: String,
    api: RemoteApi,
    pushed: Option<RemoteApi>,
    result: Value,
    staged: Staged,
}

impl Connection for MockConnection {
    fn prepare(&self, name: &str) -> Result<Box<dyn RemoteFunction>> {
        if name == "MISSING" {
            return Err(Error::transport(format!("function {} not found", name)));
        }
        Ok(Box::new(MockFunction {
            name: name.to_string(),
            api: self.api.clone(),
            pushed: None,
            result: self.result.clone(),
            staged: self.staged.clone(),
        }))
    }
}

impl RemoteFunction for MockFunction {
    fn name(&self) -> &str {
        &self.name
    }

    fn describe(&self) -> Result<RemoteApi> {
        Ok(self.api.clone())
    }

    fn set_api(&mut self, api: RemoteApi) -> Result<()> {
        self.pushed = Some(api);
        Ok(())
    }

    fn set_param(&mut self, name: &str, value: Value) -> Result<()> {
        self.staged.lock().unwrap().push((name.to_string(), value));
        Ok(())
    }

    fn invoke(&mut self) -> Result<Value> {
        Ok(self.result.clone())
    }
}

fn scenario_api() -> RemoteApi {
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

fn connection(api: RemoteApi, result: Value) -> MockConnection {
    MockConnection {
        api,
        result,
        staged: Arc::default(),
    }
}

fn record(pairs: Vec<(&str, Value)>) -> Value {
    Value::Map(pairs.into_iter().map(|(k, v)| (k.to_string(), v)).collect())
}

#[test]
fn invoke_casts_both_ways() {
    let conn = connection(
        scenario_api(),
        record(vec![(
            "RESULT",
            Value::Map(btree! {
                "AMT".to_string() => Value::from("12.5"),
                "OK".to_string() => Value::from("1"),
            }),
        )]),
    );
    let mut call = Call::discover(&conn, "Z_SCENARIO").unwrap();
    assert_eq!(call.name(), "Z_SCENARIO");

    let result = call.invoke(&record(vec![("N", Value::from("42"))])).unwrap();

    assert_eq!(
        *conn.staged.lock().unwrap(),
        vec![("N".to_string(), Value::Integer(42))]
    );
    assert_eq!(
        result,
        record(vec![(
            "RESULT",
            Value::Map(btree! {
                "AMT".to_string() => Value::Float(12.5),
                "OK".to_string() => Value::Bool(true),
            }),
        )])
    );
}

#[test]
fn missing_mandatory_output_surfaces() {
    let conn = connection(scenario_api(), Value::map());
    let mut call = Call::discover(&conn, "Z_SCENARIO").unwrap();

    let err = call.invoke(&record(vec![("N", Value::Integer(1))])).unwrap_err();
    assert_eq!(
        err.as_schema(),
        Some(&remoteapi_core::Error::missing_element("RESULT", "output"))
    );
}

#[test]
fn missing_mandatory_input_stops_before_transport() {
    let conn = connection(scenario_api(), Value::map());
    let mut call = Call::discover(&conn, "Z_SCENARIO").unwrap();

    let err = call.invoke(&Value::map()).unwrap_err();
    assert!(matches!(
        err.as_schema(),
        Some(remoteapi_core::Error::ArrayElementMissing { .. })
    ));
    assert!(conn.staged.lock().unwrap().is_empty());
}

#[test]
fn tables_go_out_in_wire_form_and_come_back_typed() {
    let api = RemoteApi::new().with(
        Table::with_members(
            "ITEMS",
            false,
            vec![
                Element::new(ElementType::Int, "POSNR").unwrap(),
                Element::new(ElementType::Date, "BUDAT").unwrap(),
            ],
        )
        .unwrap(),
    );
    let returned = record(vec![(
        "ITEMS",
        Value::Array(vec![Value::Map(btree! {
            "POSNR".to_string() => Value::from("000010"),
            "BUDAT".to_string() => Value::from("00000000"),
        })]),
    )]);
    let conn = connection(api.clone(), returned);
    let mut call = Call::with_api(&conn, "Z_ITEMS", api).unwrap();

    let date = posting_date();
    let result = call
        .invoke(&record(vec![(
            "ITEMS",
            Value::Array(vec![Value::Map(btree! {
                "POSNR".to_string() => Value::Integer(10),
                "BUDAT".to_string() => date,
            })]),
        )]))
        .unwrap();

    let staged = conn.staged.lock().unwrap();
    assert_eq!(staged[0].0, "ITEMS");
    assert_eq!(
        staged[0].1.as_array().unwrap()[0].get("BUDAT"),
        Some(&Value::from("20191030"))
    );

    let row = &result.get("ITEMS").unwrap().as_array().unwrap()[0];
    assert_eq!(row.get("POSNR"), Some(&Value::Integer(10)));
    assert_eq!(row.get("BUDAT"), Some(&Value::Null));
}

fn posting_date() -> Value {
    remoteapi_core::cast_value(ElementType::Date, "BUDAT", &Value::from("20191030")).unwrap()
}

#[test]
fn schema_survives_a_cache_round_trip() {
    let conn = connection(scenario_api(), Value::map());
    let call = Call::discover(&conn, "Z_SCENARIO").unwrap();
    let bytes = call.cache(&JsonCodec).unwrap();

    let cached = Call::from_cache(&conn, "Z_SCENARIO", &JsonCodec, &bytes).unwrap();
    assert_eq!(cached.api(), call.api());
}

#[test]
fn transport_errors_pass_through() {
    let conn = connection(scenario_api(), Value::map());
    let err = Call::discover(&conn, "MISSING").unwrap_err();
    assert!(matches!(err, Error::Transport { .. }));
}

#[test]
fn non_record_result_is_a_transport_error() {
    let conn = connection(RemoteApi::new(), Value::from("oops"));
    let mut call = Call::discover(&conn, "Z_EMPTY").unwrap();
    assert!(matches!(
        call.invoke(&Value::map()),
        Err(Error::Transport { .. })
    ));
}
