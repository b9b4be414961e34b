//! JSON writer archive — single-pass text production.
//!
//! The writer is a small state machine over one depth counter and two
//! booleans:
//!
//! - `has_value` — the current compound already emitted a member/element,
//!   so the next one is preceded by a comma (and, in pretty mode, a
//!   newline plus indentation).
//! - `array_just_open` — an array was opened and no element written yet;
//!   the first element gets a newline without a comma in pretty mode.
//!
//! Pretty mode indents two spaces per depth level with `\n` line breaks;
//! compact mode emits no insignificant whitespace at all. Output goes into
//! an owned `String`, so closing delimiters can be emitted infallibly from
//! scope drops.

use crate::archive::WriteArchive;
use crate::error::{GroveError, Result};

/// Largest integer exactly representable in an IEEE-754 double (2^53).
/// 64-bit integers outside ±this bound are rejected rather than silently
/// rounded, since JSON's number type commits to double precision.
const MAX_SAFE_INTEGER: i64 = 9_007_199_254_740_992;

/// Concrete [`WriteArchive`] producing well-formed JSON text.
#[derive(Debug)]
pub struct JsonWriter {
    out: String,
    pretty: bool,
    depth: usize,
    has_value: bool,
    array_just_open: bool,
}

impl JsonWriter {
    /// A writer producing compact JSON (no insignificant whitespace).
    pub fn new() -> Self {
        JsonWriter {
            out: String::new(),
            pretty: false,
            depth: 0,
            has_value: false,
            array_just_open: false,
        }
    }

    /// A writer producing pretty JSON (two-space indent, `\n` breaks).
    pub fn pretty() -> Self {
        JsonWriter {
            pretty: true,
            ..JsonWriter::new()
        }
    }

    /// Releases the produced text. Depth has returned to zero by the time
    /// the serializer hands the writer back from `finish`.
    pub fn into_string(self) -> String {
        debug_assert_eq!(self.depth, 0, "unbalanced open/close");
        self.out
    }

    fn new_line(&mut self) {
        if !self.pretty {
            return;
        }
        self.out.push('\n');
        for _ in 0..self.depth {
            self.out.push_str("  ");
        }
    }

    /// Structural bookkeeping before any scalar or nested value: separator
    /// comma if the scope already holds a value, first-element newline for
    /// a freshly opened array.
    fn prepare_write_val(&mut self) {
        if self.has_value {
            self.out.push(',');
            self.new_line();
        } else if self.array_just_open {
            self.new_line();
            self.array_just_open = false;
        }
        self.has_value = true;
    }

    fn write_token(&mut self, token: &str) {
        self.prepare_write_val();
        self.out.push_str(token);
    }

    fn write_escaped(&mut self, s: &str) {
        self.out.push('"');
        for c in s.chars() {
            match c {
                '"' => self.out.push_str("\\\""),
                '\\' => self.out.push_str("\\\\"),
                '\n' => self.out.push_str("\\n"),
                '\r' => self.out.push_str("\\r"),
                '\u{0008}' => self.out.push_str("\\b"),
                '\t' => self.out.push_str("\\t"),
                '\u{000C}' => self.out.push_str("\\f"),
                c if c >= ' ' => self.out.push(c),
                c => {
                    // remaining control bytes below 0x20
                    self.out.push_str(&format!("\\u{:04x}", c as u32));
                }
            }
        }
        self.out.push('"');
    }

    fn open(&mut self, delim: char) {
        self.prepare_write_val();
        self.out.push(delim);
        self.has_value = false;
        self.depth += 1;
    }

    fn close(&mut self, delim: char) {
        debug_assert!(self.depth > 0, "close without matching open");
        self.depth -= 1;
        if self.has_value {
            self.new_line();
        }
        self.out.push(delim);
        self.has_value = true;
    }
}

impl Default for JsonWriter {
    fn default() -> Self {
        JsonWriter::new()
    }
}

macro_rules! write_small_int {
    ($($method:ident => $ty:ty),* $(,)?) => {$(
        fn $method(&mut self, v: $ty) -> Result<()> {
            self.write_token(&v.to_string());
            Ok(())
        }
    )*};
}

impl WriteArchive for JsonWriter {
    fn write_bool(&mut self, v: bool) -> Result<()> {
        self.write_token(if v { "true" } else { "false" });
        Ok(())
    }

    // Widths of 32 bits or less always fit a double exactly.
    write_small_int! {
        write_i8 => i8,
        write_i16 => i16,
        write_i32 => i32,
        write_u8 => u8,
        write_u16 => u16,
        write_u32 => u32,
    }

    fn write_i64(&mut self, v: i64) -> Result<()> {
        if !(-MAX_SAFE_INTEGER..=MAX_SAFE_INTEGER).contains(&v) {
            return Err(GroveError::IntegerRange {
                value: v.to_string(),
            });
        }
        self.write_token(&v.to_string());
        Ok(())
    }

    fn write_u64(&mut self, v: u64) -> Result<()> {
        if v > MAX_SAFE_INTEGER as u64 {
            return Err(GroveError::IntegerRange {
                value: v.to_string(),
            });
        }
        self.write_token(&v.to_string());
        Ok(())
    }

    fn write_f32(&mut self, v: f32) -> Result<()> {
        if !v.is_finite() {
            return Err(GroveError::NonFiniteFloat);
        }
        self.write_token(&v.to_string());
        Ok(())
    }

    fn write_f64(&mut self, v: f64) -> Result<()> {
        if !v.is_finite() {
            return Err(GroveError::NonFiniteFloat);
        }
        self.write_token(&v.to_string());
        Ok(())
    }

    fn write_str(&mut self, v: &str) -> Result<()> {
        self.prepare_write_val();
        self.write_escaped(v);
        Ok(())
    }

    fn write_null(&mut self) -> Result<()> {
        self.write_token("null");
        Ok(())
    }

    fn open_object(&mut self) -> Result<()> {
        self.open('{');
        Ok(())
    }

    fn open_array(&mut self) -> Result<()> {
        self.open('[');
        self.array_just_open = true;
        Ok(())
    }

    fn close_object(&mut self) {
        self.close('}');
    }

    fn close_array(&mut self) {
        self.close(']');
        self.array_just_open = false;
    }

    fn push_key(&mut self, key: &str) -> Result<()> {
        if self.has_value {
            self.out.push(',');
        }
        self.new_line();
        self.write_escaped(key);
        self.out.push(':');
        // the key's value has not been written yet
        self.has_value = false;
        Ok(())
    }
}
