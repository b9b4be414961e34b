//! Reader-side node hierarchy, mirroring [`ser`](crate::ser).
//!
//! A [`Deserializer`] owns a [`ReadArchive`] for one document read.
//! [`ReadNode`] is the cursor for "the place being read right now";
//! [`ObjectReader`] and [`ArrayReader`] are the compound scopes entered
//! from it, closed on drop. The same frame discipline applies: using a
//! retained parent handle while a child scope is open fails with
//! [`Usage`](crate::GroveError::Usage) before the archive cursor is
//! touched.

use std::cell::RefCell;

use crate::archive::ReadArchive;
use crate::error::Result;
use crate::stack::{FrameId, FrameStack};
use crate::types::TypeMask;

/// How a type reads itself from a node. See [`Encode`](crate::Encode) for
/// the resolution rules; decoded values are returned rather than written
/// through out-parameters.
pub trait Decode: Sized {
    fn decode<A: ReadArchive>(node: ReadNode<'_, A>) -> Result<Self>;
}

/// Flat variant of [`Decode`]: the type's fields are read from the
/// enclosing object's own members. No primitive fallback exists.
pub trait DecodeFlat: Sized {
    fn decode_flat<A: ReadArchive>(obj: &ObjectReader<'_, A>) -> Result<Self>;
}

struct DeInner<A> {
    archive: A,
    frames: FrameStack,
}

/// Owns the backend archive for one document read.
pub struct Deserializer<A: ReadArchive> {
    inner: RefCell<DeInner<A>>,
}

impl<A: ReadArchive> Deserializer<A> {
    pub fn new(archive: A) -> Self {
        Deserializer {
            inner: RefCell::new(DeInner {
                archive,
                frames: FrameStack::new(),
            }),
        }
    }

    /// The node addressing the document root.
    pub fn root(&self) -> ReadNode<'_, A> {
        ReadNode {
            de: self,
            frame: self.inner.borrow().frames.root(),
        }
    }

    /// Releases the deserializer and returns the backend. Fails if any
    /// compound scope is still open.
    pub fn finish(self) -> Result<A> {
        let inner = self.inner.into_inner();
        if inner.frames.depth() != 0 {
            return Err(crate::GroveError::Usage(
                "document finished with unclosed scopes",
            ));
        }
        Ok(inner.archive)
    }
}

/// Cursor into the position currently being read.
pub struct ReadNode<'a, A: ReadArchive> {
    de: &'a Deserializer<A>,
    frame: FrameId,
}

impl<A: ReadArchive> Clone for ReadNode<'_, A> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<A: ReadArchive> Copy for ReadNode<'_, A> {}

impl<'a, A: ReadArchive> ReadNode<'a, A> {
    pub(crate) fn with<R>(&self, f: impl FnOnce(&mut A) -> Result<R>) -> Result<R> {
        let mut inner = self.de.inner.borrow_mut();
        inner.frames.require_active(self.frame)?;
        f(&mut inner.archive)
    }

    /// Type tag of the value pending at this position. Valid only while
    /// this node is the innermost open scope.
    pub fn node_type(&self) -> Result<TypeMask> {
        self.with(|a| a.pending_type())
    }

    /// Read the value at this position, dispatched per its [`Decode`] impl.
    pub fn value<T: Decode>(&self) -> Result<T> {
        T::decode(*self)
    }

    /// Consume an explicit null at this position.
    pub fn null(&self) -> Result<()> {
        self.with(|a| a.read_null())
    }

    /// Enter the pending compound value as an object scope. Dropping the
    /// returned handle leaves the scope and reactivates this node.
    pub fn object(&self) -> Result<ObjectReader<'a, A>> {
        let frame = {
            let mut inner = self.de.inner.borrow_mut();
            inner.frames.require_active(self.frame)?;
            inner.archive.load_object()?;
            inner.frames.push()
        };
        Ok(ObjectReader {
            node: ReadNode {
                de: self.de,
                frame,
            },
        })
    }

    /// Enter the pending compound value as an array scope.
    pub fn array(&self) -> Result<ArrayReader<'a, A>> {
        let frame = {
            let mut inner = self.de.inner.borrow_mut();
            inner.frames.require_active(self.frame)?;
            inner.archive.load_array()?;
            inner.frames.push()
        };
        Ok(ArrayReader {
            node: ReadNode {
                de: self.de,
                frame,
            },
        })
    }
}

/// One step of object iteration: a discovered member name and the node to
/// read its value from. Produced by [`ObjectReader::next_key`].
pub struct KeyQuery<'a, A: ReadArchive> {
    pub name: String,
    pub node: ReadNode<'a, A>,
}

/// An open object scope on the read side: keyed children.
pub struct ObjectReader<'a, A: ReadArchive> {
    node: ReadNode<'a, A>,
}

impl<'a, A: ReadArchive> ObjectReader<'a, A> {
    /// Number of members of this object.
    pub fn length(&self) -> Result<usize> {
        self.node.with(|a| a.cur_length())
    }

    /// Navigate to a required member; fails with
    /// [`KeyNotFound`](crate::GroveError::KeyNotFound) if absent.
    pub fn key(&self, name: &str) -> Result<ReadNode<'a, A>> {
        self.node.with(|a| a.load_key(name))?;
        Ok(self.node)
    }

    /// Navigate to a member if present; absence is reported as `None`, not
    /// as a failure.
    pub fn try_key(&self, name: &str) -> Result<Option<ReadNode<'a, A>>> {
        if self.node.with(|a| a.try_load_key(name))? {
            Ok(Some(self.node))
        } else {
            Ok(None)
        }
    }

    /// Read the required member `key`.
    pub fn value<T: Decode>(&self, key: &str) -> Result<T> {
        self.key(key)?.value()
    }

    /// Read the member `key` if present; a missing key yields `None`
    /// rather than a decode error.
    pub fn opt_value<T: Decode>(&self, key: &str) -> Result<Option<T>> {
        match self.try_key(key)? {
            Some(node) => Ok(Some(node.value()?)),
            None => Ok(None),
        }
    }

    /// Enter the member `key` as an object scope.
    pub fn object(&self, key: &str) -> Result<ObjectReader<'a, A>> {
        self.key(key)?.object()
    }

    /// Enter the member `key` as an array scope.
    pub fn array(&self, key: &str) -> Result<ArrayReader<'a, A>> {
        self.key(key)?.array()
    }

    /// Advance the lazy, single-pass member iteration. Yields each member
    /// exactly once in document order, then `None`; the sequence cannot be
    /// restarted. Used for generic decoding of unknown schemas.
    pub fn next_key(&self) -> Result<Option<KeyQuery<'a, A>>> {
        match self.node.with(|a| a.load_next_key())? {
            Some(name) => Ok(Some(KeyQuery {
                name,
                node: self.node,
            })),
            None => Ok(None),
        }
    }

    /// Read a type whose fields are direct members of this object (flat
    /// adaptation), dispatched per its [`DecodeFlat`] impl.
    pub fn flat_value<T: DecodeFlat>(&self) -> Result<T> {
        T::decode_flat(self)
    }

    /// An object node's kind is part of its own state, always `OBJECT`.
    pub fn node_type(&self) -> TypeMask {
        TypeMask::OBJECT
    }
}

impl<A: ReadArchive> Drop for ObjectReader<'_, A> {
    fn drop(&mut self) {
        let mut inner = self.node.de.inner.borrow_mut();
        inner.frames.pop(self.node.frame);
        inner.archive.unload_object();
    }
}

/// An open array scope on the read side: indexed children.
pub struct ArrayReader<'a, A: ReadArchive> {
    node: ReadNode<'a, A>,
}

impl<'a, A: ReadArchive> ArrayReader<'a, A> {
    /// Number of elements of this array.
    pub fn length(&self) -> Result<usize> {
        self.node.with(|a| a.cur_length())
    }

    /// Navigate to the `i`-th element, 0-based; fails with
    /// [`IndexOutOfRange`](crate::GroveError::IndexOutOfRange) past the
    /// end. Sequential access is the expected pattern, but the JSON
    /// backend supports random access.
    pub fn index(&self, i: usize) -> Result<ReadNode<'a, A>> {
        self.node.with(|a| a.load_index(i))?;
        Ok(self.node)
    }

    /// Read the `i`-th element.
    pub fn value<T: Decode>(&self, i: usize) -> Result<T> {
        self.index(i)?.value()
    }

    /// An array node's kind is part of its own state, always `ARRAY`.
    pub fn node_type(&self) -> TypeMask {
        TypeMask::ARRAY
    }
}

impl<A: ReadArchive> Drop for ArrayReader<'_, A> {
    fn drop(&mut self) {
        let mut inner = self.node.de.inner.borrow_mut();
        inner.frames.pop(self.node.frame);
        inner.archive.unload_array();
    }
}

// The primitive set, delegating to the archive's primitive read methods.

macro_rules! decode_primitive {
    ($($ty:ty => $method:ident),* $(,)?) => {$(
        impl Decode for $ty {
            fn decode<A: ReadArchive>(node: ReadNode<'_, A>) -> Result<Self> {
                node.with(|a| a.$method())
            }
        }
    )*};
}

decode_primitive! {
    bool => read_bool,
    i8 => read_i8,
    i16 => read_i16,
    i32 => read_i32,
    i64 => read_i64,
    u8 => read_u8,
    u16 => read_u16,
    u32 => read_u32,
    u64 => read_u64,
    f32 => read_f32,
    f64 => read_f64,
    String => read_string,
}
