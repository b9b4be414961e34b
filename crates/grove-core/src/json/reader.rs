//! JSON reader archive — a cursor over a parsed document tree.
//!
//! The reader borrows a `serde_json::Value` parsed up front (the
//! `preserve_order` feature keeps object members in document order, which
//! `load_next_key` relies on). State is a pending-value slot plus a stack
//! of cursors, one per open compound: the compound value and the position
//! of the single-pass member iteration.
//!
//! Numeric conversion policy:
//! - narrowing reads use checked conversion and fail with `IntegerRange`
//!   when the token does not fit the destination width;
//! - fraction-free float tokens (e.g. `2.0`) convert to integers, tokens
//!   with a fractional part fail with `PrecisionLoss`;
//! - negative tokens read as unsigned fail with `IntegerRange`;
//! - finite doubles past f32's range fail with `PrecisionLoss` instead of
//!   narrowing to infinity.

use serde_json::Value;

use crate::archive::ReadArchive;
use crate::error::{GroveError, Result};
use crate::types::TypeMask;

fn value_type_name(v: &Value) -> &'static str {
    match v {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

fn mismatch(expected: &'static str, found: &Value) -> GroveError {
    GroveError::TypeMismatch {
        expected,
        found: value_type_name(found),
    }
}

struct Cursor<'doc> {
    value: &'doc Value,
    /// Position of the single-pass member iteration (`load_next_key`).
    next: usize,
}

/// Concrete [`ReadArchive`] over a parsed JSON tree.
pub struct JsonReader<'doc> {
    pending: Option<&'doc Value>,
    stack: Vec<Cursor<'doc>>,
}

impl<'doc> JsonReader<'doc> {
    /// A reader positioned at the document root.
    pub fn new(root: &'doc Value) -> Self {
        JsonReader {
            pending: Some(root),
            stack: Vec::new(),
        }
    }

    fn take_pending(&mut self) -> Result<&'doc Value> {
        self.pending
            .take()
            .ok_or(GroveError::Usage("no value is pending at the cursor"))
    }

    fn top_value(&self) -> Result<&'doc Value> {
        self.stack
            .last()
            .map(|c| c.value)
            .ok_or(GroveError::Usage("no open compound scope"))
    }

    fn read_signed(&mut self) -> Result<i64> {
        let v = self.take_pending()?;
        let n = match v {
            Value::Number(n) => n,
            other => return Err(mismatch("integer", other)),
        };
        if let Some(i) = n.as_i64() {
            return Ok(i);
        }
        if n.as_u64().is_some() {
            return Err(GroveError::IntegerRange {
                value: n.to_string(),
            });
        }
        match n.as_f64() {
            Some(f) if f.fract() == 0.0 => {
                // `i64::MAX as f64` rounds up to exactly 2^63, one past the
                // largest i64, so the upper bound must be exclusive or the
                // cast below would saturate instead of failing.
                if f >= i64::MIN as f64 && f < i64::MAX as f64 {
                    Ok(f as i64)
                } else {
                    Err(GroveError::IntegerRange {
                        value: n.to_string(),
                    })
                }
            }
            _ => Err(GroveError::PrecisionLoss {
                value: n.to_string(),
                target: "integer",
            }),
        }
    }

    fn read_unsigned(&mut self) -> Result<u64> {
        let v = self.take_pending()?;
        let n = match v {
            Value::Number(n) => n,
            other => return Err(mismatch("integer", other)),
        };
        if let Some(u) = n.as_u64() {
            return Ok(u);
        }
        if n.as_i64().is_some() {
            // negative, since non-negative i64 always has a u64 form
            return Err(GroveError::IntegerRange {
                value: n.to_string(),
            });
        }
        match n.as_f64() {
            Some(f) if f.fract() == 0.0 => {
                // `u64::MAX as f64` rounds up to exactly 2^64; same exclusive
                // bound as the signed path.
                if f >= 0.0 && f < u64::MAX as f64 {
                    Ok(f as u64)
                } else {
                    Err(GroveError::IntegerRange {
                        value: n.to_string(),
                    })
                }
            }
            _ => Err(GroveError::PrecisionLoss {
                value: n.to_string(),
                target: "integer",
            }),
        }
    }
}

macro_rules! read_narrow_signed {
    ($($method:ident => $ty:ty),* $(,)?) => {$(
        fn $method(&mut self) -> Result<$ty> {
            let wide = self.read_signed()?;
            <$ty>::try_from(wide).map_err(|_| GroveError::IntegerRange {
                value: wide.to_string(),
            })
        }
    )*};
}

macro_rules! read_narrow_unsigned {
    ($($method:ident => $ty:ty),* $(,)?) => {$(
        fn $method(&mut self) -> Result<$ty> {
            let wide = self.read_unsigned()?;
            <$ty>::try_from(wide).map_err(|_| GroveError::IntegerRange {
                value: wide.to_string(),
            })
        }
    )*};
}

impl ReadArchive for JsonReader<'_> {
    fn read_bool(&mut self) -> Result<bool> {
        match self.take_pending()? {
            Value::Bool(b) => Ok(*b),
            other => Err(mismatch("boolean", other)),
        }
    }

    read_narrow_signed! {
        read_i8 => i8,
        read_i16 => i16,
        read_i32 => i32,
    }

    fn read_i64(&mut self) -> Result<i64> {
        self.read_signed()
    }

    read_narrow_unsigned! {
        read_u8 => u8,
        read_u16 => u16,
        read_u32 => u32,
    }

    fn read_u64(&mut self) -> Result<u64> {
        self.read_unsigned()
    }

    fn read_f32(&mut self) -> Result<f32> {
        let wide = self.read_f64()?;
        let narrow = wide as f32;
        // A finite double past f32's range casts to infinity; that is a
        // value that does not fit the destination width, not a value.
        if !narrow.is_finite() && wide.is_finite() {
            return Err(GroveError::PrecisionLoss {
                value: wide.to_string(),
                target: "f32",
            });
        }
        Ok(narrow)
    }

    fn read_f64(&mut self) -> Result<f64> {
        match self.take_pending()? {
            Value::Number(n) => n
                .as_f64()
                .ok_or(GroveError::IntegerRange {
                    value: n.to_string(),
                }),
            other => Err(mismatch("number", other)),
        }
    }

    fn read_string(&mut self) -> Result<String> {
        match self.take_pending()? {
            Value::String(s) => Ok(s.clone()),
            other => Err(mismatch("string", other)),
        }
    }

    fn read_null(&mut self) -> Result<()> {
        match self.take_pending()? {
            Value::Null => Ok(()),
            other => Err(mismatch("null", other)),
        }
    }

    fn load_object(&mut self) -> Result<()> {
        let v = self.take_pending()?;
        if !v.is_object() {
            return Err(mismatch("object", v));
        }
        self.stack.push(Cursor { value: v, next: 0 });
        Ok(())
    }

    fn load_array(&mut self) -> Result<()> {
        let v = self.take_pending()?;
        if !v.is_array() {
            return Err(mismatch("array", v));
        }
        self.stack.push(Cursor { value: v, next: 0 });
        Ok(())
    }

    fn unload_object(&mut self) {
        self.stack.pop();
        self.pending = None;
    }

    fn unload_array(&mut self) {
        self.stack.pop();
        self.pending = None;
    }

    fn cur_length(&self) -> Result<usize> {
        Ok(match self.top_value()? {
            Value::Object(map) => map.len(),
            Value::Array(arr) => arr.len(),
            _ => 0,
        })
    }

    fn load_key(&mut self, key: &str) -> Result<()> {
        let cur = self.top_value()?;
        match cur.as_object().and_then(|m| m.get(key)) {
            Some(v) => {
                self.pending = Some(v);
                Ok(())
            }
            None => Err(GroveError::KeyNotFound {
                key: key.to_string(),
            }),
        }
    }

    fn try_load_key(&mut self, key: &str) -> Result<bool> {
        let cur = self.top_value()?;
        match cur.as_object().and_then(|m| m.get(key)) {
            Some(v) => {
                self.pending = Some(v);
                Ok(true)
            }
            None => Ok(false),
        }
    }

    fn load_index(&mut self, index: usize) -> Result<()> {
        let cur = self.top_value()?;
        let arr = match cur.as_array() {
            Some(arr) => arr,
            None => return Err(mismatch("array", cur)),
        };
        match arr.get(index) {
            Some(v) => {
                self.pending = Some(v);
                Ok(())
            }
            None => Err(GroveError::IndexOutOfRange {
                index,
                len: arr.len(),
            }),
        }
    }

    fn pending_type(&self) -> Result<TypeMask> {
        let v = self
            .pending
            .ok_or(GroveError::Usage("no value is pending at the cursor"))?;
        Ok(match v {
            Value::Null => TypeMask::NULL,
            Value::Bool(true) => TypeMask::TRUE,
            Value::Bool(false) => TypeMask::FALSE,
            Value::Number(n) if n.as_i64().is_some() || n.as_u64().is_some() => TypeMask::INTEGER,
            Value::Number(_) => TypeMask::FLOAT,
            Value::String(_) => TypeMask::STRING,
            Value::Array(_) => TypeMask::ARRAY,
            Value::Object(_) => TypeMask::OBJECT,
        })
    }

    fn load_next_key(&mut self) -> Result<Option<String>> {
        let cur = self
            .stack
            .last_mut()
            .ok_or(GroveError::Usage("no open compound scope"))?;
        let map = match cur.value.as_object() {
            Some(map) => map,
            None => return Err(mismatch("object", cur.value)),
        };
        match map.iter().nth(cur.next) {
            Some((name, value)) => {
                cur.next += 1;
                self.pending = Some(value);
                Ok(Some(name.clone()))
            }
            None => Ok(None),
        }
    }
}
