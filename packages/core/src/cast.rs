//! Leaf casting between wire values and typed values.
//!
//! These are free functions over an [`ElementType`] so every schema node
//! (element, parameter, struct member, table column) shares one set of
//! coercion rules.

use chrono::{Datelike, Duration, NaiveDate, Weekday};
use lazy_static::lazy_static;
use regex::Regex;

use crate::error::{Error, Result};
use crate::schema::{Element, ElementType};
use crate::value::{Record, Value};

lazy_static! {
    static ref ZERO_DIGITS: Regex = Regex::new(r"^0+$").unwrap();
    static ref DATE: Regex = Regex::new(r"^([0-9]{4})([0-9]{2})([0-9]{2})$").unwrap();
    static ref TIME: Regex = Regex::new(r"^([0-9]{2})([0-9]{2})([0-9]{2})$").unwrap();
    static ref TIMESTAMP: Regex =
        Regex::new(r"^([0-9]{4})([0-9]{2})([0-9]{2})([0-9]{2})([0-9]{2})([0-9]{2})$").unwrap();
    static ref WEEK: Regex = Regex::new(r"^([0-9]{4})([0-9]{2})$").unwrap();
}

/// Cast a raw wire value to the typed form of `ty`.
///
/// `element` names the schema element for error attribution. `Null` stays
/// `Null` for every type, and a value already in typed form is returned
/// unchanged.
pub fn cast_value(ty: ElementType, element: &str, raw: &Value) -> Result<Value> {
    if raw.is_null() {
        return Ok(Value::Null);
    }

    match ty {
        ElementType::Bool => cast_bool(element, raw),
        ElementType::Int => cast_int(element, raw),
        ElementType::Float => cast_float(element, raw),
        ElementType::String => cast_string(element, raw),
        ElementType::HexBin => cast_hexbin(element, raw),
        ElementType::Date => cast_date(element, raw),
        ElementType::Time => cast_time(element, raw),
        ElementType::Timestamp => cast_timestamp(element, raw),
        ElementType::Week => cast_week(element, raw),
    }
}

/// Convert a typed value back to its wire representation.
///
/// Primitive values pass through. Strings pass through for every type, as
/// they are already in wire form.
pub fn to_wire_value(ty: ElementType, element: &str, typed: &Value) -> Result<Value> {
    if ty.is_primitive() || matches!(typed, Value::String(_)) {
        return Ok(typed.clone());
    }

    let wire = match (ty, typed) {
        (ElementType::Date, Value::Null) => "00000000".to_string(),
        (ElementType::Timestamp, Value::Null) => "00000000000000".to_string(),
        (ElementType::Week, Value::Null) => "000000".to_string(),
        (_, Value::Null) => return Ok(Value::Null),
        (ElementType::Date, Value::Date(date)) => date.format("%Y%m%d").to_string(),
        (ElementType::Timestamp, Value::Timestamp(ts)) => ts.format("%Y%m%d%H%M%S").to_string(),
        (ElementType::Week, Value::Week(monday)) => {
            let week = monday.iso_week();
            format!("{:04}{:02}", week.year(), week.week())
        }
        (ElementType::Time, Value::Time(interval)) => time_to_wire(element, interval)?,
        (ElementType::HexBin, Value::Bytes(bytes)) => hex::encode_upper(bytes),
        (ty, other) => return Err(Error::cast(element, ty.expected(), other)),
    };
    Ok(Value::String(wire))
}

/// Cast the declared members of a record, leaving other keys untouched.
///
/// Members are visited in declaration order, so the first missing member is
/// always the one reported.
pub(crate) fn cast_record(members: &[Element], owner: &str, record: &Record) -> Result<Record> {
    map_record(members, owner, record, Element::cast)
}

/// Reverse of [`cast_record`].
pub(crate) fn record_to_wire(members: &[Element], owner: &str, record: &Record) -> Result<Record> {
    map_record(members, owner, record, Element::to_wire)
}

fn map_record(
    members: &[Element],
    owner: &str,
    record: &Record,
    convert: fn(&Element, &Value) -> Result<Value>,
) -> Result<Record> {
    let mut out = Record::new();
    for member in members {
        let raw = record
            .get(member.name())
            .ok_or_else(|| Error::missing_element(member.name(), owner))?;
        out.insert(member.name().to_string(), convert(member, raw)?);
    }
    for (key, value) in record {
        if !out.contains_key(key) {
            out.insert(key.clone(), value.clone());
        }
    }
    Ok(out)
}

fn cast_bool(element: &str, raw: &Value) -> Result<Value> {
    let b = match raw {
        Value::Bool(b) => *b,
        Value::Integer(i) => *i != 0,
        Value::Float(f) => *f != 0.0,
        Value::String(s) => {
            let s = s.trim();
            !(s.is_empty() || s == "0")
        }
        other => return Err(Error::cast(element, ElementType::Bool.expected(), other)),
    };
    Ok(Value::Bool(b))
}

fn cast_int(element: &str, raw: &Value) -> Result<Value> {
    let expected = ElementType::Int.expected();
    let i = match raw {
        Value::Integer(i) => Some(*i),
        Value::Bool(b) => Some(i64::from(*b)),
        Value::Float(f) => truncate(*f),
        Value::String(s) => {
            let s = s.trim();
            match s.parse::<i64>() {
                Ok(i) => Some(i),
                Err(_) => s.parse::<f64>().ok().and_then(truncate),
            }
        }
        other => return Err(Error::cast(element, expected, other)),
    };
    i.map(Value::Integer)
        .ok_or_else(|| Error::cast(element, expected, raw))
}

/// Whole part of `f`, or `None` when it is not finite or outside `i64`.
fn truncate(f: f64) -> Option<i64> {
    // i64::MAX as f64 rounds up to 2^63, which is already out of range.
    if !f.is_finite() || f < i64::MIN as f64 || f >= i64::MAX as f64 {
        return None;
    }
    Some(f.trunc() as i64)
}

fn cast_float(element: &str, raw: &Value) -> Result<Value> {
    let expected = ElementType::Float.expected();
    let f = match raw {
        Value::Float(f) => *f,
        Value::Integer(i) => *i as f64,
        Value::Bool(b) => f64::from(u8::from(*b)),
        Value::String(s) => s
            .trim()
            .parse::<f64>()
            .map_err(|_| Error::cast(element, expected, raw))?,
        other => return Err(Error::cast(element, expected, other)),
    };
    if !f.is_finite() {
        return Err(Error::cast(element, expected, raw));
    }
    Ok(Value::Float(f))
}

fn cast_string(element: &str, raw: &Value) -> Result<Value> {
    let s = match raw {
        Value::String(s) => s.clone(),
        Value::Integer(i) => i.to_string(),
        Value::Float(f) => f.to_string(),
        Value::Bool(b) => String::from(if *b { "1" } else { "0" }),
        other => return Err(Error::cast(element, ElementType::String.expected(), other)),
    };
    Ok(Value::String(s))
}

fn cast_hexbin(element: &str, raw: &Value) -> Result<Value> {
    match raw {
        Value::Bytes(_) => Ok(raw.clone()),
        Value::String(s) => hex::decode(s.trim())
            .map(Value::Bytes)
            .map_err(|_| Error::cast(element, ElementType::HexBin.expected(), raw)),
        other => Err(Error::cast(element, ElementType::HexBin.expected(), other)),
    }
}

fn cast_date(element: &str, raw: &Value) -> Result<Value> {
    if let Value::Date(_) = raw {
        return Ok(raw.clone());
    }
    let expected = ElementType::Date.expected();
    let text = wire_text(element, expected, raw, 8)?;
    if ZERO_DIGITS.is_match(&text) {
        return Ok(Value::Null);
    }

    let caps = DATE
        .captures(&text)
        .ok_or_else(|| Error::cast(element, expected, raw))?;
    ymd(&caps[1], &caps[2], &caps[3])
        .map(Value::Date)
        .ok_or_else(|| Error::cast(element, expected, raw))
}

fn cast_time(element: &str, raw: &Value) -> Result<Value> {
    if let Value::Time(_) = raw {
        return Ok(raw.clone());
    }
    let expected = ElementType::Time.expected();
    let text = wire_text(element, expected, raw, 6)?;

    let caps = TIME
        .captures(&text)
        .ok_or_else(|| Error::cast(element, expected, raw))?;
    let (hours, minutes, seconds) = (digits(&caps[1]), digits(&caps[2]), digits(&caps[3]));
    if minutes >= 60 || seconds >= 60 {
        return Err(Error::cast(element, expected, raw));
    }
    Ok(Value::Time(Duration::seconds(
        hours * 3600 + minutes * 60 + seconds,
    )))
}

fn cast_timestamp(element: &str, raw: &Value) -> Result<Value> {
    if let Value::Timestamp(_) = raw {
        return Ok(raw.clone());
    }
    let expected = ElementType::Timestamp.expected();
    let text = wire_text(element, expected, raw, 14)?;
    if ZERO_DIGITS.is_match(&text) {
        return Ok(Value::Null);
    }

    let caps = TIMESTAMP
        .captures(&text)
        .ok_or_else(|| Error::cast(element, expected, raw))?;
    ymd(&caps[1], &caps[2], &caps[3])
        .and_then(|date| {
            date.and_hms_opt(
                digits(&caps[4]) as u32,
                digits(&caps[5]) as u32,
                digits(&caps[6]) as u32,
            )
        })
        .map(Value::Timestamp)
        .ok_or_else(|| Error::cast(element, expected, raw))
}

fn cast_week(element: &str, raw: &Value) -> Result<Value> {
    if let Value::Week(_) = raw {
        return Ok(raw.clone());
    }
    let expected = ElementType::Week.expected();
    let text = wire_text(element, expected, raw, 6)?;
    if ZERO_DIGITS.is_match(&text) {
        return Ok(Value::Null);
    }

    let caps = WEEK
        .captures(&text)
        .ok_or_else(|| Error::cast(element, expected, raw))?;
    NaiveDate::from_isoywd_opt(digits(&caps[1]) as i32, digits(&caps[2]) as u32, Weekday::Mon)
        .map(Value::Week)
        .ok_or_else(|| Error::cast(element, expected, raw))
}

/// The trimmed text of a pattern-typed wire value.
///
/// Integers are zero-padded to `width`, since a numeric transport drops
/// leading zeros.
fn wire_text(element: &str, expected: &'static str, raw: &Value, width: usize) -> Result<String> {
    match raw {
        Value::String(s) => Ok(s.trim().to_string()),
        Value::Integer(i) if *i >= 0 => Ok(format!("{:0width$}", i, width = width)),
        other => Err(Error::cast(element, expected, other)),
    }
}

fn time_to_wire(element: &str, interval: &Duration) -> Result<String> {
    let total = interval.num_seconds();
    let hours = total / 3600;
    if total < 0 || hours > 99 {
        return Err(Error::cast(
            element,
            ElementType::Time.expected(),
            &Value::Time(*interval),
        ));
    }
    Ok(format!(
        "{:02}{:02}{:02}",
        hours,
        (total % 3600) / 60,
        total % 60
    ))
}

fn ymd(year: &str, month: &str, day: &str) -> Option<NaiveDate> {
    NaiveDate::from_ymd_opt(digits(year) as i32, digits(month) as u32, digits(day) as u32)
}

// Callers only pass regex-captured ASCII digit runs.
fn digits(s: &str) -> i64 {
    s.bytes().fold(0, |acc, b| acc * 10 + i64::from(b - b'0'))
}
