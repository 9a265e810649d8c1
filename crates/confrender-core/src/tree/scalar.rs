//! Scalar values stored in a [`ConfigTree`](super::ConfigTree)

use std::fmt;
use toml::Value;

/// A leaf value of the configuration tree
#[derive(Debug, Clone, PartialEq)]
pub enum Scalar {
    String(String),
    Boolean(bool),
    Integer(i64),
    Float(f64),
}

impl Scalar {
    /// Interpret command-line text as a scalar
    ///
    /// `true`/`false` become booleans and numbers become integers or floats,
    /// but only when they render back to exactly `text`. Anything else
    /// (`0640`, `+5`, `1e3`) stays a string so the rendered output keeps what
    /// was typed.
    pub fn parse_literal(text: &str) -> Self {
        match text {
            "true" => return Scalar::Boolean(true),
            "false" => return Scalar::Boolean(false),
            _ => {}
        }

        if let Ok(i) = text.parse::<i64>() {
            let scalar = Scalar::Integer(i);
            if scalar.to_string() == text {
                return scalar;
            }
        }

        if let Ok(f) = text.parse::<f64>() {
            let scalar = Scalar::Float(f);
            if f.is_finite() && scalar.to_string() == text {
                return scalar;
            }
        }

        Scalar::String(text.to_string())
    }

    /// Name of the value kind, for diagnostics
    pub fn kind(&self) -> &'static str {
        match self {
            Scalar::String(_) => "string",
            Scalar::Boolean(_) => "boolean",
            Scalar::Integer(_) => "integer",
            Scalar::Float(_) => "float",
        }
    }

    /// Convert back into a TOML value
    pub fn to_toml(&self) -> Value {
        match self {
            Scalar::String(s) => Value::String(s.clone()),
            Scalar::Boolean(b) => Value::Boolean(*b),
            Scalar::Integer(i) => Value::Integer(*i),
            Scalar::Float(f) => Value::Float(*f),
        }
    }
}

/// Template text of a scalar
///
/// Strings are written verbatim. Floats always carry a fractional part so
/// `3.0` stays distinguishable from the integer `3`.
impl fmt::Display for Scalar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Scalar::String(s) => f.write_str(s),
            Scalar::Boolean(b) => write!(f, "{}", b),
            Scalar::Integer(i) => write!(f, "{}", i),
            Scalar::Float(x) => {
                let text = x.to_string();
                if text.contains('.') {
                    f.write_str(&text)
                } else {
                    write!(f, "{}.0", text)
                }
            }
        }
    }
}

impl From<&str> for Scalar {
    fn from(s: &str) -> Self {
        Scalar::String(s.to_string())
    }
}

impl From<String> for Scalar {
    fn from(s: String) -> Self {
        Scalar::String(s)
    }
}

impl From<bool> for Scalar {
    fn from(b: bool) -> Self {
        Scalar::Boolean(b)
    }
}

impl From<i32> for Scalar {
    fn from(i: i32) -> Self {
        Scalar::Integer(i64::from(i))
    }
}

impl From<i64> for Scalar {
    fn from(i: i64) -> Self {
        Scalar::Integer(i)
    }
}

impl From<f64> for Scalar {
    fn from(f: f64) -> Self {
        Scalar::Float(f)
    }
}
