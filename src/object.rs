//! PDF object types.
//!
//! `Object` is a closed tagged union over the PDF object kinds plus the two
//! kinds that only occur inside content streams (operators and inline
//! images). Names are stored without their leading `/`; the marshaller is
//! responsible for accepting and producing the slash-prefixed spelling.

use crate::content::InlineImage;
use crate::error::{Error, Result};
use crate::numeric::Decimal;
use bytes::Bytes;
use indexmap::IndexMap;

/// Dictionary storage: name (without `/`) to object.
///
/// Insertion order is kept so serialization is stable; equality is
/// order-independent.
pub type Dictionary = IndexMap<String, Object>;

/// PDF object representation.
#[derive(Debug, Clone, PartialEq)]
pub enum Object {
    /// Null object
    Null,
    /// Boolean value
    Boolean(bool),
    /// Integer value
    Integer(i64),
    /// Real value, held as an exact decimal
    Real(Decimal),
    /// String (byte array; text encoding is ambiguous)
    String(Vec<u8>),
    /// Name (stored without the leading /)
    Name(String),
    /// Array of objects
    Array(Vec<Object>),
    /// Dictionary (key-value pairs)
    Dictionary(Dictionary),
    /// Stream (dictionary + data)
    Stream {
        /// Stream dictionary (never holds /Length)
        dict: Dictionary,
        /// Stream data, as stored (possibly filtered)
        data: Bytes,
    },
    /// Indirect object reference
    Reference(ObjectRef),
    /// Bare content-stream operator token
    Operator(String),
    /// Inline image token produced while tokenizing a content stream
    InlineImage(Box<InlineImage>),
}

/// Reference to an indirect object.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ObjectRef {
    /// Object number
    pub id: u32,
    /// Generation number
    pub gen: u16,
}

impl ObjectRef {
    /// Create a new object reference.
    pub fn new(id: u32, gen: u16) -> Self {
        Self { id, gen }
    }
}

impl std::fmt::Display for ObjectRef {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {} R", self.id, self.gen)
    }
}

/// Type tag of an object, as seen through a handle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ObjectType {
    /// A reference whose target cannot be reached (no owner, or deleted)
    Unresolved,
    /// Null
    Null,
    /// Boolean
    Boolean,
    /// Integer
    Integer,
    /// Real
    Real,
    /// String
    String,
    /// Name
    Name,
    /// Array
    Array,
    /// Dictionary
    Dictionary,
    /// Stream
    Stream,
    /// Unresolved reference (only seen on raw objects)
    Reference,
    /// Content-stream operator
    Operator,
    /// Content-stream inline image
    InlineImage,
}

impl ObjectType {
    /// Human-readable name of the tag.
    pub fn name(self) -> &'static str {
        match self {
            ObjectType::Unresolved => "Unresolved",
            ObjectType::Null => "Null",
            ObjectType::Boolean => "Boolean",
            ObjectType::Integer => "Integer",
            ObjectType::Real => "Real",
            ObjectType::String => "String",
            ObjectType::Name => "Name",
            ObjectType::Array => "Array",
            ObjectType::Dictionary => "Dictionary",
            ObjectType::Stream => "Stream",
            ObjectType::Reference => "Reference",
            ObjectType::Operator => "Operator",
            ObjectType::InlineImage => "InlineImage",
        }
    }

    /// Scalars have no children and no identity worth tracking.
    pub fn is_scalar(self) -> bool {
        matches!(
            self,
            ObjectType::Null
                | ObjectType::Boolean
                | ObjectType::Integer
                | ObjectType::Real
                | ObjectType::String
                | ObjectType::Name
        )
    }

    /// Booleans, integers and reals compare with each other by value.
    pub fn is_numeric_family(self) -> bool {
        matches!(self, ObjectType::Boolean | ObjectType::Integer | ObjectType::Real)
    }
}

impl std::fmt::Display for ObjectType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

impl Object {
    /// Create a Name object from a bare name (no leading `/`).
    pub fn name(name: impl Into<String>) -> Self {
        Object::Name(name.into())
    }

    /// Create a String object holding `text` as a PDF text string.
    ///
    /// PDFDocEncoding is used when it can represent the text, UTF-16BE with
    /// a byte-order mark otherwise.
    pub fn text_string(text: &str) -> Self {
        Object::String(crate::text::encode_text_string(text))
    }

    /// Create a Real object from a float's shortest decimal form.
    ///
    /// PDF has no NaN or infinity; non-finite values give `Null`. Use
    /// `Object::try_from(f64)` to get an error instead.
    pub fn real(value: f64) -> Self {
        Decimal::from_f64(value).map_or(Object::Null, Object::Real)
    }

    /// Create an Operator token.
    pub fn operator(op: impl Into<String>) -> Self {
        Object::Operator(op.into())
    }

    /// Create a Dictionary object from `(key, value)` pairs, dropping null values.
    pub fn dictionary<K: Into<String>>(entries: impl IntoIterator<Item = (K, Object)>) -> Self {
        Object::Dictionary(
            entries
                .into_iter()
                .filter(|(_, v)| !v.is_null())
                .map(|(k, v)| (k.into(), v))
                .collect(),
        )
    }

    /// Create a Stream object. Any /Length entry in `dict` is dropped.
    pub fn stream(mut dict: Dictionary, data: impl Into<Bytes>) -> Self {
        dict.shift_remove("Length");
        Object::Stream {
            dict,
            data: data.into(),
        }
    }

    /// Get the type tag of this object (references are not followed).
    pub fn type_tag(&self) -> ObjectType {
        match self {
            Object::Null => ObjectType::Null,
            Object::Boolean(_) => ObjectType::Boolean,
            Object::Integer(_) => ObjectType::Integer,
            Object::Real(_) => ObjectType::Real,
            Object::String(_) => ObjectType::String,
            Object::Name(_) => ObjectType::Name,
            Object::Array(_) => ObjectType::Array,
            Object::Dictionary(_) => ObjectType::Dictionary,
            Object::Stream { .. } => ObjectType::Stream,
            Object::Reference(_) => ObjectType::Reference,
            Object::Operator(_) => ObjectType::Operator,
            Object::InlineImage(_) => ObjectType::InlineImage,
        }
    }

    /// Get the type name of this object (without data).
    pub fn type_name(&self) -> &'static str {
        self.type_tag().name()
    }

    /// Try to cast to integer.
    pub fn as_integer(&self) -> Option<i64> {
        match self {
            Object::Integer(i) => Some(*i),
            _ => None,
        }
    }

    /// Try to cast to name.
    pub fn as_name(&self) -> Option<&str> {
        match self {
            Object::Name(s) => Some(s),
            _ => None,
        }
    }

    /// Try to cast to dictionary. Works for both Dictionary and Stream objects.
    pub fn as_dict(&self) -> Option<&Dictionary> {
        match self {
            Object::Dictionary(d) => Some(d),
            Object::Stream { dict, .. } => Some(dict),
            _ => None,
        }
    }

    /// Mutable dictionary access. Works for both Dictionary and Stream objects.
    pub fn as_dict_mut(&mut self) -> Option<&mut Dictionary> {
        match self {
            Object::Dictionary(d) => Some(d),
            Object::Stream { dict, .. } => Some(dict),
            _ => None,
        }
    }

    /// Try to cast to array.
    pub fn as_array(&self) -> Option<&Vec<Object>> {
        match self {
            Object::Array(arr) => Some(arr),
            _ => None,
        }
    }

    /// Mutable array access.
    pub fn as_array_mut(&mut self) -> Option<&mut Vec<Object>> {
        match self {
            Object::Array(arr) => Some(arr),
            _ => None,
        }
    }

    /// Try to cast to reference.
    pub fn as_reference(&self) -> Option<ObjectRef> {
        match self {
            Object::Reference(r) => Some(*r),
            _ => None,
        }
    }

    /// Try to cast to boolean.
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Object::Boolean(b) => Some(*b),
            _ => None,
        }
    }

    /// Try to cast to real number.
    pub fn as_real(&self) -> Option<f64> {
        match self {
            Object::Real(r) => Some(r.to_f64()),
            _ => None,
        }
    }

    /// Try to cast to string (bytes).
    pub fn as_string(&self) -> Option<&[u8]> {
        match self {
            Object::String(s) => Some(s),
            _ => None,
        }
    }

    /// Try to cast to an operator token.
    pub fn as_operator(&self) -> Option<&str> {
        match self {
            Object::Operator(op) => Some(op),
            _ => None,
        }
    }

    /// Check if object is null.
    pub fn is_null(&self) -> bool {
        matches!(self, Object::Null)
    }

    /// True for a dictionary (not a stream) whose /Type is /Page.
    pub fn is_page_dict(&self) -> bool {
        match self {
            Object::Dictionary(d) => d.get("Type").and_then(Object::as_name) == Some("Page"),
            _ => false,
        }
    }

    /// Set a dictionary or stream key.
    ///
    /// Setting [`Object::Null`] removes the key; a stream's /Length cannot be set.
    pub fn set_key(&mut self, key: &str, value: Object) -> Result<()> {
        if key.is_empty() {
            return Err(Error::InvalidName(key.to_string()));
        }
        let is_stream = matches!(self, Object::Stream { .. });
        if is_stream && key == "Length" {
            return Err(Error::ReadOnlyLength);
        }
        let found = self.type_name();
        let dict = self
            .as_dict_mut()
            .ok_or_else(|| Error::type_error("Dictionary or Stream", found))?;
        if value.is_null() {
            dict.shift_remove(key);
        } else {
            dict.insert(key.to_string(), value);
        }
        Ok(())
    }

    /// Remove a dictionary or stream key, returning the old value.
    pub fn delete_key(&mut self, key: &str) -> Result<Option<Object>> {
        let found = self.type_name();
        let dict = self
            .as_dict_mut()
            .ok_or_else(|| Error::type_error("Dictionary or Stream", found))?;
        Ok(dict.shift_remove(key))
    }

    /// Number of items in an array.
    pub fn array_len(&self) -> Result<usize> {
        self.as_array()
            .map(Vec::len)
            .ok_or_else(|| Error::type_error("Array", self.type_name()))
    }

    /// Replace an array item; negative indices count from the end.
    pub fn set_item(&mut self, index: isize, value: Object) -> Result<()> {
        let found = self.type_name();
        let arr = self
            .as_array_mut()
            .ok_or_else(|| Error::type_error("Array", found))?;
        let pos = normalize_index(index, arr.len()).ok_or_else(|| Error::IndexOutOfRange {
            index,
            len: arr.len(),
            requested: format!("[{}]", index),
            traversed: ".".to_string(),
        })?;
        arr[pos] = value;
        Ok(())
    }

    /// Remove an array item; negative indices count from the end.
    pub fn delete_item(&mut self, index: isize) -> Result<Object> {
        let found = self.type_name();
        let arr = self
            .as_array_mut()
            .ok_or_else(|| Error::type_error("Array", found))?;
        let pos = normalize_index(index, arr.len()).ok_or_else(|| Error::IndexOutOfRange {
            index,
            len: arr.len(),
            requested: format!("[{}]", index),
            traversed: ".".to_string(),
        })?;
        Ok(arr.remove(pos))
    }
}

/// Resolve a possibly negative index against `len`.
pub(crate) fn normalize_index(index: isize, len: usize) -> Option<usize> {
    let resolved = if index < 0 {
        len as isize + index
    } else {
        index
    };
    if resolved >= 0 && (resolved as usize) < len {
        Some(resolved as usize)
    } else {
        None
    }
}

impl From<bool> for Object {
    fn from(b: bool) -> Self {
        Object::Boolean(b)
    }
}

impl From<i64> for Object {
    fn from(i: i64) -> Self {
        Object::Integer(i)
    }
}

impl From<i32> for Object {
    fn from(i: i32) -> Self {
        Object::Integer(i as i64)
    }
}

impl From<ObjectRef> for Object {
    fn from(r: ObjectRef) -> Self {
        Object::Reference(r)
    }
}

impl From<Vec<Object>> for Object {
    fn from(items: Vec<Object>) -> Self {
        Object::Array(items)
    }
}

impl From<Dictionary> for Object {
    fn from(dict: Dictionary) -> Self {
        Object::Dictionary(dict)
    }
}
