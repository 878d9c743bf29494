//! Type tags and directions.

use std::fmt;
use std::str::FromStr;

use crate::error::Error;

/// The closed set of wire types a schema element may declare.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ElementType {
    Bool,
    Int,
    Float,
    String,
    HexBin,
    Date,
    Time,
    Timestamp,
    Week,
}

impl ElementType {
    pub const ALL: [ElementType; 9] = [
        ElementType::Bool,
        ElementType::Int,
        ElementType::Float,
        ElementType::String,
        ElementType::HexBin,
        ElementType::Date,
        ElementType::Time,
        ElementType::Timestamp,
        ElementType::Week,
    ];

    pub const PRIMITIVES: [ElementType; 4] = [
        ElementType::Bool,
        ElementType::Int,
        ElementType::Float,
        ElementType::String,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ElementType::Bool => "bool",
            ElementType::Int => "int",
            ElementType::Float => "float",
            ElementType::String => "string",
            ElementType::HexBin => "hexbin",
            ElementType::Date => "date",
            ElementType::Time => "time",
            ElementType::Timestamp => "timestamp",
            ElementType::Week => "week",
        }
    }

    /// Whether this type may be used by a top-level call parameter.
    ///
    /// Extended wire types only appear as struct or table members.
    pub fn is_primitive(&self) -> bool {
        matches!(
            self,
            ElementType::Bool | ElementType::Int | ElementType::Float | ElementType::String
        )
    }

    /// What a wire value of this type looks like, for cast errors.
    pub fn expected(&self) -> &'static str {
        match self {
            ElementType::Bool => "a boolean",
            ElementType::Int => "an integer",
            ElementType::Float => "a number",
            ElementType::String => "a scalar",
            ElementType::HexBin => "hexadecimal digits",
            ElementType::Date => "date YYYYMMDD",
            ElementType::Time => "time HHMMSS",
            ElementType::Timestamp => "timestamp YYYYMMDDHHMMSS",
            ElementType::Week => "week YYYYWW",
        }
    }
}

impl FromStr for ElementType {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ElementType::ALL
            .into_iter()
            .find(|ty| ty.as_str() == s)
            .ok_or_else(|| Error::invalid_argument(format!("unknown element type '{}'", s)))
    }
}

impl fmt::Display for ElementType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Which way an entry's data flows in a call.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Direction {
    /// Sent to the remote system.
    Input,
    /// Returned from the remote system.
    Output,
    /// A tabular data set, in and out.
    Table,
}

impl Direction {
    pub fn as_str(&self) -> &'static str {
        match self {
            Direction::Input => "input",
            Direction::Output => "output",
            Direction::Table => "table",
        }
    }
}

impl FromStr for Direction {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "input" => Ok(Direction::Input),
            "output" => Ok(Direction::Output),
            "table" => Ok(Direction::Table),
            other => Err(Error::invalid_argument(format!(
                "unknown direction '{}'",
                other
            ))),
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
