//! Conversion between host values and graph objects.
//!
//! This is the one place where loosely typed values become [`Object`]s and
//! back. The PDF rules enforced here:
//!
//! - numbers must be finite
//! - names must start with `/` and have at least one more character
//! - dictionary keys must be names; a null key is rejected
//! - dictionary entries whose value is null are dropped
//!
//! Host-side names keep their leading `/` (`"/Type"`); [`Object::Name`]
//! stores them without it.
//!
//! The JSON bridge maps dictionaries to JSON objects keyed by `/Name`, names
//! to `"/Name"` strings, byte strings that are not text to
//! `{"$bytes": "<hex>"}` and indirect objects seen a second time to
//! `{"$ref": "N G R"}`.

use crate::config::GraphOptions;
use crate::error::{Error, Result};
use crate::node::{Identity, Node};
use crate::numeric::Decimal;
use crate::object::{Dictionary, Object, ObjectRef};
use crate::recursion::DepthCounter;
use crate::text::{decode_text_string, encode_text_string};
use serde_json::{Map, Number, Value};
use std::cell::RefCell;
use std::collections::HashSet;

/// A loosely typed value from the host side.
#[derive(Debug, Clone, PartialEq)]
pub enum HostValue {
    /// Absent value
    Null,
    /// Boolean
    Bool(bool),
    /// Integer
    Int(i64),
    /// Binary floating point; must be finite
    Float(f64),
    /// Decimal literal text such as `"2.50"`
    Decimal(String),
    /// Unicode text, stored as a PDF text string
    Text(String),
    /// Raw bytes, stored as a PDF string
    Bytes(Vec<u8>),
    /// Name including the leading `/`
    Name(String),
    /// Ordered sequence
    List(Vec<HostValue>),
    /// Key/value pairs; keys must be names
    Map(Vec<(HostValue, HostValue)>),
}

/// Build a name from its `/`-prefixed spelling.
///
/// ```
/// use pdf_graph::marshal::make_name;
/// use pdf_graph::object::Object;
///
/// assert_eq!(make_name("/Type").unwrap(), Object::name("Type"));
/// assert!(make_name("Type").is_err());
/// assert!(make_name("/").is_err());
/// ```
pub fn make_name(name: &str) -> Result<Object> {
    match name.strip_prefix('/') {
        Some(bare) if !bare.is_empty() => Ok(Object::Name(bare.to_string())),
        _ => Err(Error::InvalidName(name.to_string())),
    }
}

/// Build a real from decimal text, keeping every digit.
///
/// ```
/// use pdf_graph::marshal::make_decimal;
/// use pdf_graph::equal;
/// use pdf_graph::node::Node;
///
/// let precise = make_decimal("0.30000000000000001").unwrap();
/// let short = make_decimal("0.3").unwrap();
/// assert!(!equal(Node::direct(&precise), Node::direct(&short)));
/// ```
pub fn make_decimal(text: &str) -> Result<Object> {
    match text.parse::<Decimal>() {
        Ok(value) => Ok(Object::Real(value)),
        Err(err) => match text.trim().parse::<f64>() {
            Ok(value) if !value.is_finite() => Err(Error::NonFiniteNumber(value)),
            _ => Err(err),
        },
    }
}

/// Build a text string.
pub fn make_text_string(text: &str) -> Object {
    Object::String(encode_text_string(text))
}

impl TryFrom<f64> for Object {
    type Error = Error;

    fn try_from(value: f64) -> Result<Self> {
        Decimal::from_f64(value)
            .map(Object::Real)
            .ok_or(Error::NonFiniteNumber(value))
    }
}

fn dictionary_key(key: HostValue) -> Result<String> {
    match key {
        HostValue::Null => Err(Error::NullKey),
        HostValue::Name(name) | HostValue::Text(name) => match make_name(&name)? {
            Object::Name(bare) => Ok(bare),
            other => Err(Error::type_error("Name", other.type_name())),
        },
        other => Err(Error::type_error("Name", host_type_name(&other))),
    }
}

/// Build a dictionary from host key/value pairs. Null values are dropped.
pub fn dictionary_from_pairs<I>(pairs: I) -> Result<Object>
where
    I: IntoIterator<Item = (HostValue, HostValue)>,
{
    let mut dict = Dictionary::new();
    for (key, value) in pairs {
        let key = dictionary_key(key)?;
        let value = Object::try_from(value)?;
        if !value.is_null() {
            dict.insert(key, value);
        }
    }
    Ok(Object::Dictionary(dict))
}

fn host_type_name(value: &HostValue) -> &'static str {
    match value {
        HostValue::Null => "null",
        HostValue::Bool(_) => "bool",
        HostValue::Int(_) => "int",
        HostValue::Float(_) => "float",
        HostValue::Decimal(_) => "decimal",
        HostValue::Text(_) => "text",
        HostValue::Bytes(_) => "bytes",
        HostValue::Name(_) => "name",
        HostValue::List(_) => "list",
        HostValue::Map(_) => "map",
    }
}

impl TryFrom<HostValue> for Object {
    type Error = Error;

    fn try_from(value: HostValue) -> Result<Self> {
        match value {
            HostValue::Null => Ok(Object::Null),
            HostValue::Bool(b) => Ok(Object::Boolean(b)),
            HostValue::Int(i) => Ok(Object::Integer(i)),
            HostValue::Float(f) => Object::try_from(f),
            HostValue::Decimal(text) => make_decimal(&text),
            HostValue::Text(text) => Ok(make_text_string(&text)),
            HostValue::Bytes(bytes) => Ok(Object::String(bytes)),
            HostValue::Name(name) => make_name(&name),
            HostValue::List(items) => items
                .into_iter()
                .map(Object::try_from)
                .collect::<Result<Vec<_>>>()
                .map(Object::Array),
            HostValue::Map(pairs) => dictionary_from_pairs(pairs),
        }
    }
}

impl HostValue {
    /// Convert a node into a host value.
    ///
    /// Reals become [`HostValue::Decimal`] with every digit kept. Strings
    /// become [`HostValue::Text`] when they decode as text and
    /// [`HostValue::Bytes`] otherwise. Streams, operators, inline images and
    /// unrealized references have no host form; a cycle through indirect
    /// objects is reported as a type error.
    pub fn from_node(node: Node<'_>) -> Result<HostValue> {
        let depth = DepthCounter::new(GraphOptions::default().max_recursion_depth);
        let active = RefCell::new(HashSet::new());
        host_from_node(node, &depth, &active)
    }
}

fn host_from_node(
    node: Node<'_>,
    depth: &DepthCounter,
    active: &RefCell<HashSet<Identity>>,
) -> Result<HostValue> {
    let obj = node.resolve().ok_or_else(|| {
        Error::type_error(
            "resolvable object",
            node.objgen()
                .map_or_else(|| "unresolved".to_string(), |r| format!("unresolved {}", r)),
        )
    })?;

    let value = match obj {
        Object::Null => HostValue::Null,
        Object::Boolean(b) => HostValue::Bool(*b),
        Object::Integer(i) => HostValue::Int(*i),
        Object::Real(r) => HostValue::Decimal(r.to_string()),
        Object::Name(n) => HostValue::Name(format!("/{}", n)),
        Object::String(bytes) => match decode_text_string(bytes) {
            Some(text) => HostValue::Text(text),
            None => HostValue::Bytes(bytes.clone()),
        },
        Object::Array(_) | Object::Dictionary(_) => {
            let _guard = depth.enter()?;
            let identity = node.identity().filter(|_| node.is_indirect());
            if let Some(id) = identity {
                if !active.borrow_mut().insert(id) {
                    let at = node.objgen().map(|r| r.to_string()).unwrap_or_default();
                    return Err(Error::type_error(
                        "acyclic object graph",
                        format!("cycle at {}", at),
                    ));
                }
            }
            let value = if matches!(obj, Object::Array(_)) {
                node.items()
                    .into_iter()
                    .map(|item| host_from_node(item, depth, active))
                    .collect::<Result<Vec<_>>>()
                    .map(HostValue::List)?
            } else {
                node.entries()
                    .into_iter()
                    .map(|(key, value)| {
                        Ok((
                            HostValue::Name(format!("/{}", key)),
                            host_from_node(value, depth, active)?,
                        ))
                    })
                    .collect::<Result<Vec<_>>>()
                    .map(HostValue::Map)?
            };
            if let Some(id) = identity {
                active.borrow_mut().remove(&id);
            }
            value
        },
        other => return Err(Error::type_error("marshallable object", other.type_name())),
    };
    Ok(value)
}

/// Build an object from JSON.
///
/// ```
/// use pdf_graph::marshal::from_json;
/// use pdf_graph::object::Object;
///
/// let obj = from_json(&serde_json::json!({"/Type": "/Page", "/Rotate": 90})).unwrap();
/// assert!(obj.is_page_dict());
/// ```
pub fn from_json(value: &Value) -> Result<Object> {
    match value {
        Value::Null => Ok(Object::Null),
        Value::Bool(b) => Ok(Object::Boolean(*b)),
        Value::Number(n) => match n.as_i64() {
            Some(i) => Ok(Object::Integer(i)),
            None => make_decimal(&n.to_string()),
        },
        Value::String(s) if s.starts_with('/') => make_name(s),
        Value::String(s) => Ok(make_text_string(s)),
        Value::Array(items) => items
            .iter()
            .map(from_json)
            .collect::<Result<Vec<_>>>()
            .map(Object::Array),
        Value::Object(map) => {
            if let Some(r) = special_entry(map, "$ref") {
                return parse_ref(r).map(Object::Reference);
            }
            if let Some(hex) = special_entry(map, "$bytes") {
                return crate::parser::decode_hex(hex.as_bytes()).map(Object::String);
            }
            let mut dict = Dictionary::new();
            for (key, value) in map {
                let key = match make_name(key)? {
                    Object::Name(bare) => bare,
                    other => return Err(Error::type_error("Name", other.type_name())),
                };
                let value = from_json(value)?;
                if !value.is_null() {
                    dict.insert(key, value);
                }
            }
            Ok(Object::Dictionary(dict))
        },
    }
}

fn special_entry<'v>(map: &'v Map<String, Value>, key: &str) -> Option<&'v str> {
    if map.len() != 1 {
        return None;
    }
    map.get(key).and_then(Value::as_str)
}

fn parse_ref(text: &str) -> Result<ObjectRef> {
    let invalid = || Error::type_error("reference \"N G R\"", format!("{:?}", text));
    let mut parts = text.split_whitespace();
    let id = parts.next().and_then(|p| p.parse().ok()).ok_or_else(invalid)?;
    let gen = parts.next().and_then(|p| p.parse().ok()).ok_or_else(invalid)?;
    match (parts.next(), parts.next()) {
        (Some("R"), None) => Ok(ObjectRef::new(id, gen)),
        _ => Err(invalid()),
    }
}

/// Convert a node to JSON.
///
/// Each indirect array or dictionary is expanded on its first visit; later
/// visits, including cycles, render as `{"$ref": "N G R"}`. Streams render
/// as `{"$stream": <dictionary>, "$length": n}`.
pub fn to_json(node: Node<'_>) -> Result<Value> {
    let writer = JsonWriter {
        visited: RefCell::new(HashSet::new()),
        depth: DepthCounter::new(GraphOptions::default().max_recursion_depth),
    };
    writer.write(node)
}

struct JsonWriter {
    visited: RefCell<HashSet<Identity>>,
    depth: DepthCounter,
}

impl JsonWriter {
    fn reference(r: ObjectRef) -> Value {
        let mut map = Map::new();
        map.insert("$ref".to_string(), Value::String(r.to_string()));
        Value::Object(map)
    }

    fn write(&self, node: Node<'_>) -> Result<Value> {
        let Some(obj) = node.resolve() else {
            return Ok(node.objgen().map_or(Value::Null, Self::reference));
        };

        match obj {
            Object::Null => return Ok(Value::Null),
            Object::Boolean(b) => return Ok(Value::Bool(*b)),
            Object::Integer(i) => return Ok(Value::from(*i)),
            Object::Real(r) => {
                let value = r.to_f64();
                return Number::from_f64(value)
                    .map(Value::Number)
                    .ok_or(Error::NonFiniteNumber(value));
            },
            Object::Name(n) => return Ok(Value::String(format!("/{}", n))),
            Object::String(bytes) => {
                return Ok(match decode_text_string(bytes) {
                    Some(text) => Value::String(text),
                    None => {
                        let hex: String = bytes.iter().map(|b| format!("{:02X}", b)).collect();
                        let mut map = Map::new();
                        map.insert("$bytes".to_string(), Value::String(hex));
                        Value::Object(map)
                    },
                })
            },
            Object::Operator(_) | Object::InlineImage(_) | Object::Reference(_) => {
                return Err(Error::type_error("JSON-representable object", obj.type_name()))
            },
            Object::Array(_) | Object::Dictionary(_) | Object::Stream { .. } => {},
        }

        if node.is_indirect() {
            if let (Some(id), Some(r)) = (node.identity(), node.objgen()) {
                if !self.visited.borrow_mut().insert(id) {
                    return Ok(Self::reference(r));
                }
            }
        }
        let _guard = self.depth.enter()?;

        match obj {
            Object::Array(_) => node
                .items()
                .into_iter()
                .map(|item| self.write(item))
                .collect::<Result<Vec<_>>>()
                .map(Value::Array),
            Object::Stream { data, .. } => {
                let mut map = Map::new();
                map.insert("$stream".to_string(), self.write_dict(node)?);
                map.insert("$length".to_string(), Value::from(data.len()));
                Ok(Value::Object(map))
            },
            _ => self.write_dict(node),
        }
    }

    fn write_dict(&self, node: Node<'_>) -> Result<Value> {
        let mut map = Map::new();
        for (key, value) in node.entries() {
            map.insert(format!("/{}", key), self.write(value)?);
        }
        Ok(Value::Object(map))
    }
}
