//! # grove-core
//!
//! Bidirectional, format-agnostic tree serialization. A "node" abstraction
//! lets arbitrary user types be written to, or read from, a tree-shaped
//! external representation (the reference backend is JSON) without the
//! user types depending on the concrete format.
//!
//! A caller opens a node (object or array), navigates to keys or indices,
//! recurses into child nodes, and closes them in strict nesting order;
//! the backend archive translates each call into text production or
//! consumption. Only the innermost open node may be used at any time —
//! violating that fails with [`GroveError::Usage`] instead of corrupting
//! the document.
//!
//! ## Quick start
//!
//! ```rust
//! use grove_core::{Decode, Encode, ReadArchive, ReadNode, Result, WriteArchive, WriteNode};
//!
//! struct Point {
//!     x: i32,
//!     y: i32,
//! }
//!
//! impl Encode for Point {
//!     fn encode<A: WriteArchive>(&self, node: WriteNode<'_, A>) -> Result<()> {
//!         let obj = node.object()?;
//!         obj.value("x", &self.x)?;
//!         obj.value("y", &self.y)
//!     }
//! }
//!
//! impl Decode for Point {
//!     fn decode<A: ReadArchive>(node: ReadNode<'_, A>) -> Result<Self> {
//!         let obj = node.object()?;
//!         Ok(Point {
//!             x: obj.value("x")?,
//!             y: obj.value("y")?,
//!         })
//!     }
//! }
//!
//! let json = grove_core::to_string(&Point { x: 1, y: 2 })?;
//! assert_eq!(json, r#"{"x":1,"y":2}"#);
//!
//! let p: Point = grove_core::from_str(&json)?;
//! assert_eq!((p.x, p.y), (1, 2));
//! # Ok::<(), grove_core::GroveError>(())
//! ```
//!
//! ## Modules
//!
//! - [`ser`] / [`de`] — the writer- and reader-side node hierarchies and
//!   the [`Encode`]/[`Decode`] dispatch traits
//! - [`archive`] — the backend contract any concrete format implements
//! - [`json`] — the JSON codec and string-level entry points
//! - [`adapt`] — container and dynamic-tree adapters
//! - [`stack`] — the frame discipline behind node activity tracking
//! - [`error`] / [`types`] — the failure taxonomy and value type tags

pub mod adapt;
pub mod archive;
pub mod de;
pub mod error;
pub mod json;
pub mod ser;
pub mod stack;
pub mod types;

pub use archive::{ReadArchive, WriteArchive};
pub use de::{ArrayReader, Decode, DecodeFlat, Deserializer, KeyQuery, ObjectReader, ReadNode};
pub use error::{GroveError, Result};
pub use json::{from_str, from_value, to_string, to_string_pretty, JsonReader, JsonWriter};
pub use ser::{ArrayWriter, Encode, EncodeFlat, ObjectWriter, Serializer, WriteNode};
pub use types::TypeMask;
