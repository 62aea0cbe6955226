//! Typed auxiliary tag values ("optional fields").
//!
//! A tag value in the in-memory model is a `(type_code, Value)` pair — the
//! type code is the original one-character SAM/BAM type letter and is kept
//! alongside the decoded [`Value`] so round-tripping preserves it exactly
//! (spec'd in the header-invariant sense: the *kind* of integer a field was
//! written as matters even though its decoded value is a plain `i64`).

use std::{error, fmt};

use indexmap::IndexMap;

/// A tag key: two ASCII bytes (e.g. `NM`, `RG`).
pub type Key = [u8; 2];

/// The ordered collection of a record's optional tags.
pub type Tags = IndexMap<Key, (char, Value)>;

/// A decoded tag value.
#[derive(Clone, Debug, PartialEq)]
pub enum Value {
    /// `A`: a single printable character.
    Char(char),
    /// `c C s S i I`: a signed integer (the original width is tracked by the
    /// paired type code, not by this variant).
    Int(i64),
    /// `f`: a 32-bit IEEE-754 float, widened to `f64`.
    Float(f64),
    /// `Z`: a verbatim string.
    String(String),
    /// `H`: a verbatim hex string (left undecoded into bytes).
    Hex(String),
    /// `B`: a typed numeric array.
    Array(ArrayValue),
}

/// The payload of a `B`-typed tag: a numeric sub-type plus its elements.
#[derive(Clone, Debug, PartialEq)]
pub enum ArrayValue {
    /// An integer array, carrying the sub-type letter (`c C s S i I`) it was
    /// declared with.
    Int(char, Vec<i64>),
    /// A float array (sub-type is always `f`).
    Float(Vec<f64>),
}

/// An error returned when a tag value fails to parse.
#[derive(Debug)]
pub enum ParseError {
    /// The type code is not one of `A c C s S i I f Z H B`.
    UnknownType(char),
    /// A character value was not exactly one character.
    InvalidChar,
    /// An integer value failed to parse.
    InvalidInt,
    /// A float value failed to parse.
    InvalidFloat,
    /// A `B`-array value was missing its leading sub-type element.
    MissingArraySubtype,
    /// A `B`-array's sub-type letter was not a numeric type.
    InvalidArraySubtype(char),
}

impl error::Error for ParseError {}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnknownType(c) => write!(f, "unknown tag type: {c:?}"),
            Self::InvalidChar => write!(f, "tag type A value must be exactly one character"),
            Self::InvalidInt => write!(f, "invalid integer tag value"),
            Self::InvalidFloat => write!(f, "invalid float tag value"),
            Self::MissingArraySubtype => write!(f, "B-array value is missing its sub-type"),
            Self::InvalidArraySubtype(c) => write!(f, "invalid B-array sub-type: {c:?}"),
        }
    }
}

/// Parses the SAM-text form of a tag value (the `V` in `TT:Y:V`) given its
/// type code `Y`.
pub fn parse_tag_value(type_code: char, text: &str) -> Result<Value, ParseError> {
    match type_code {
        'A' => {
            let mut chars = text.chars();
            let c = chars.next().ok_or(ParseError::InvalidChar)?;
            if chars.next().is_some() {
                return Err(ParseError::InvalidChar);
            }
            Ok(Value::Char(c))
        }
        'c' | 'C' | 's' | 'S' | 'i' | 'I' => {
            let n = parse_int(text)?;
            Ok(Value::Int(n))
        }
        'f' => {
            let n = parse_float(text)?;
            Ok(Value::Float(n))
        }
        'Z' => Ok(Value::String(text.to_string())),
        'H' => Ok(Value::Hex(text.to_string())),
        'B' => parse_array(text),
        _ => Err(ParseError::UnknownType(type_code)),
    }
}

fn parse_array(text: &str) -> Result<Value, ParseError> {
    let mut fields = text.split(',');
    let subtype_str = fields.next().ok_or(ParseError::MissingArraySubtype)?;
    let subtype = subtype_str
        .chars()
        .next()
        .ok_or(ParseError::MissingArraySubtype)?;

    match subtype {
        'f' => {
            let values = fields.map(parse_float).collect::<Result<Vec<_>, _>>()?;
            Ok(Value::Array(ArrayValue::Float(values)))
        }
        'c' | 'C' | 's' | 'S' | 'i' | 'I' => {
            let values = fields.map(parse_int).collect::<Result<Vec<_>, _>>()?;
            Ok(Value::Array(ArrayValue::Int(subtype, values)))
        }
        c => Err(ParseError::InvalidArraySubtype(c)),
    }
}

fn parse_int(s: &str) -> Result<i64, ParseError> {
    lexical_core::parse(s.as_bytes()).map_err(|_| ParseError::InvalidInt)
}

fn parse_float(s: &str) -> Result<f64, ParseError> {
    lexical_core::parse(s.as_bytes()).map_err(|_| ParseError::InvalidFloat)
}

/// Formats a decoded tag value back into its SAM-text form (the `V` in
/// `TT:Y:V`).
///
/// For `B` arrays, the sub-type written is *not* necessarily the sub-type
/// the value carries: it is re-inferred from the first element (`i` unless
/// every element is a float, then `f`). This is deliberately distinct from
/// [`infer_array_type`], which serves a different caller (see module docs).
pub fn format_tag_value(value: &Value) -> String {
    match value {
        Value::Char(c) => c.to_string(),
        Value::Int(n) => n.to_string(),
        Value::Float(n) => format_float(*n),
        Value::String(s) => s.clone(),
        Value::Hex(s) => s.clone(),
        Value::Array(array) => format_array(array),
    }
}

fn format_float(n: f64) -> String {
    if n.fract() == 0.0 && n.abs() < 1e15 {
        format!("{n:.0}")
    } else {
        n.to_string()
    }
}

fn format_array(array: &ArrayValue) -> String {
    match array {
        ArrayValue::Float(values) => {
            let mut s = String::from("f");
            for v in values {
                s.push(',');
                s.push_str(&format_float(*v));
            }
            s
        }
        ArrayValue::Int(_, values) => {
            let mut s = String::from("i");
            for v in values {
                s.push(',');
                s.push_str(&v.to_string());
            }
            s
        }
    }
}

/// A numeric element used only to pick a sub-type for a `B` array via
/// [`infer_array_type`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum NumericElement {
    Int(i64),
    Float(f64),
}

/// Returns the narrowest signed/unsigned integer (or float) sub-type that
/// can hold `values`'s first element.
///
/// This is distinct from the rule [`format_tag_value`] uses for `B`-array
/// emission (which always collapses to `i`/`f`): `infer_array_type` serves
/// callers that want the tightest binary encoding (e.g. a BAM writer),
/// while SAM-text emission intentionally does not narrow.
pub fn infer_array_type(values: &[NumericElement]) -> (char, &'static str) {
    match values.first() {
        None => ('i', "int32"),
        Some(NumericElement::Float(_)) => ('f', "float"),
        Some(NumericElement::Int(v)) => {
            let v = *v;
            if (-128..=127).contains(&v) {
                ('c', "int8")
            } else if (0..=255).contains(&v) {
                ('C', "uint8")
            } else if (-32768..=32767).contains(&v) {
                ('s', "int16")
            } else if (0..=65535).contains(&v) {
                ('S', "uint16")
            } else {
                ('i', "int32")
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // S7
    #[test]
    fn test_parse_tag_value_scenario_s7() {
        assert_eq!(parse_tag_value('i', "42").unwrap(), Value::Int(42));
        assert_eq!(parse_tag_value('f', "3.14").unwrap(), Value::Float(3.14));
        assert_eq!(
            parse_tag_value('Z', "hello").unwrap(),
            Value::String("hello".to_string())
        );
        assert_eq!(
            parse_tag_value('B', "i,1,2,3").unwrap(),
            Value::Array(ArrayValue::Int('i', vec![1, 2, 3]))
        );
        assert_eq!(
            parse_tag_value('B', "f,1.1,2.2").unwrap(),
            Value::Array(ArrayValue::Float(vec![1.1, 2.2]))
        );
    }

    #[test]
    fn test_parse_tag_value_char() {
        assert_eq!(parse_tag_value('A', "x").unwrap(), Value::Char('x'));
        assert!(parse_tag_value('A', "xy").is_err());
    }

    #[test]
    fn test_parse_tag_value_hex_is_verbatim() {
        assert_eq!(
            parse_tag_value('H', "1A2B").unwrap(),
            Value::Hex("1A2B".to_string())
        );
    }

    #[test]
    fn test_format_tag_value_array_uses_i_or_f_not_narrowest() {
        let value = Value::Array(ArrayValue::Int('C', vec![200, 1, 2]));
        assert_eq!(format_tag_value(&value), "i,200,1,2");

        let value = Value::Array(ArrayValue::Float(vec![1.5, 2.0]));
        assert_eq!(format_tag_value(&value), "f,1.5,2");
    }

    #[test]
    fn test_infer_array_type_narrows() {
        assert_eq!(
            infer_array_type(&[NumericElement::Int(5)]),
            ('c', "int8")
        );
        assert_eq!(
            infer_array_type(&[NumericElement::Int(200)]),
            ('C', "uint8")
        );
        assert_eq!(
            infer_array_type(&[NumericElement::Int(40000)]),
            ('i', "int32")
        );
        assert_eq!(
            infer_array_type(&[NumericElement::Float(1.0)]),
            ('f', "float")
        );
        assert_eq!(infer_array_type(&[]), ('i', "int32"));
    }
}
