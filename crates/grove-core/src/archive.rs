//! The backend contract consumed by the node hierarchy.
//!
//! A concrete format implements these two traits and nothing else; the node
//! layer ([`ser`](crate::ser), [`de`](crate::de)) is backend-agnostic and
//! translates every navigation and value transfer into calls through them.
//! The reference implementation is the JSON codec in [`json`](crate::json).

use crate::error::Result;
use crate::types::TypeMask;

/// Write-side backend: translates key/value framing into concrete output.
///
/// `close_object`/`close_array` are infallible because they run during
/// scope unwinding (node drops); a backend whose output can fail must
/// buffer and surface errors from its own release method instead.
pub trait WriteArchive {
    fn write_bool(&mut self, v: bool) -> Result<()>;
    fn write_i8(&mut self, v: i8) -> Result<()>;
    fn write_i16(&mut self, v: i16) -> Result<()>;
    fn write_i32(&mut self, v: i32) -> Result<()>;
    fn write_i64(&mut self, v: i64) -> Result<()>;
    fn write_u8(&mut self, v: u8) -> Result<()>;
    fn write_u16(&mut self, v: u16) -> Result<()>;
    fn write_u32(&mut self, v: u32) -> Result<()>;
    fn write_u64(&mut self, v: u64) -> Result<()>;
    fn write_f32(&mut self, v: f32) -> Result<()>;
    fn write_f64(&mut self, v: f64) -> Result<()>;
    fn write_str(&mut self, v: &str) -> Result<()>;
    fn write_null(&mut self) -> Result<()>;

    /// Begin a compound value at the current position.
    fn open_object(&mut self) -> Result<()>;
    fn open_array(&mut self) -> Result<()>;

    /// End the innermost compound value, emitting its closing delimiter.
    fn close_object(&mut self);
    fn close_array(&mut self);

    /// Frame the next member of the current object: after this, the next
    /// written value belongs to `key`.
    fn push_key(&mut self, key: &str) -> Result<()>;
}

/// Read-side backend: a cursor over a parsed document.
///
/// Navigation (`load_key`, `load_index`, `load_next_key`) selects a pending
/// value; a subsequent `read_*` or `load_object`/`load_array` consumes it.
pub trait ReadArchive {
    fn read_bool(&mut self) -> Result<bool>;
    fn read_i8(&mut self) -> Result<i8>;
    fn read_i16(&mut self) -> Result<i16>;
    fn read_i32(&mut self) -> Result<i32>;
    fn read_i64(&mut self) -> Result<i64>;
    fn read_u8(&mut self) -> Result<u8>;
    fn read_u16(&mut self) -> Result<u16>;
    fn read_u32(&mut self) -> Result<u32>;
    fn read_u64(&mut self) -> Result<u64>;
    fn read_f32(&mut self) -> Result<f32>;
    fn read_f64(&mut self) -> Result<f64>;
    fn read_string(&mut self) -> Result<String>;
    fn read_null(&mut self) -> Result<()>;

    /// Enter the pending compound value.
    fn load_object(&mut self) -> Result<()>;
    fn load_array(&mut self) -> Result<()>;

    /// Leave the innermost compound value, discarding any unconsumed
    /// pending selection. Infallible for the same reason as the write-side
    /// close methods.
    fn unload_object(&mut self);
    fn unload_array(&mut self);

    /// Number of direct children of the current compound value.
    fn cur_length(&self) -> Result<usize>;

    /// Select the member `key` of the current object; fails if absent.
    fn load_key(&mut self, key: &str) -> Result<()>;

    /// Select the member `key` if present; reports absence without failing.
    fn try_load_key(&mut self, key: &str) -> Result<bool>;

    /// Select the `index`-th element of the current array; fails past the
    /// end.
    fn load_index(&mut self, index: usize) -> Result<()>;

    /// Type tag of the pending value.
    fn pending_type(&self) -> Result<TypeMask>;

    /// Advance the single-pass, in-document-order member iteration of the
    /// current object. `None` once exhausted; the iteration cannot be
    /// restarted.
    fn load_next_key(&mut self) -> Result<Option<String>>;
}
