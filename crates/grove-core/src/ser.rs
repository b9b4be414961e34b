//! Writer-side node hierarchy and the value-dispatch trait.
//!
//! A [`Serializer`] owns a [`WriteArchive`] for the duration of one
//! document write. Callers navigate through lightweight node handles:
//! [`WriteNode`] is the cursor for "the place being written right now",
//! [`ObjectWriter`] and [`ArrayWriter`] are the compound scopes opened from
//! it. Scopes close when the handle is dropped, which emits the closing
//! delimiter and reactivates the parent frame — on every exit path,
//! including error unwinding.
//!
//! Nodes share the serializer through interior mutability rather than
//! `&mut` chains. That is deliberate: it keeps a retained parent handle
//! usable *as a value* while a child scope is open, so the frame check can
//! reject the misuse at runtime with an attributable
//! [`Usage`](crate::GroveError::Usage) error instead of silently corrupting
//! the output (see [`stack`](crate::stack)).

use std::cell::RefCell;

use crate::archive::WriteArchive;
use crate::error::Result;
use crate::stack::{FrameId, FrameStack};
use crate::types::TypeMask;

/// How a type writes itself to a node.
///
/// Resolution follows a fixed priority realized through trait coherence:
/// user types implement `Encode` themselves; adapter impls (see
/// [`adapt`](crate::adapt)) cover foreign container types; and this crate
/// provides the primitive set (`bool`, the integer widths, `f32`/`f64`,
/// text) by delegating to the archive's primitive methods. A type covered
/// by none of these fails to compile at the call site — a build-time
/// contract violation, not a runtime error.
pub trait Encode {
    fn encode<A: WriteArchive>(&self, node: WriteNode<'_, A>) -> Result<()>;
}

/// Flat variant of [`Encode`]: the type's fields are written as direct
/// siblings of the enclosing object's members instead of nested under one
/// key. There is no primitive fallback — only object-shaped types can
/// flatten.
pub trait EncodeFlat {
    fn encode_flat<A: WriteArchive>(&self, obj: &ObjectWriter<'_, A>) -> Result<()>;
}

struct SerInner<A> {
    archive: A,
    frames: FrameStack,
}

/// Owns the backend archive for one document write.
pub struct Serializer<A: WriteArchive> {
    inner: RefCell<SerInner<A>>,
}

impl<A: WriteArchive> Serializer<A> {
    pub fn new(archive: A) -> Self {
        Serializer {
            inner: RefCell::new(SerInner {
                archive,
                frames: FrameStack::new(),
            }),
        }
    }

    /// The node addressing the document root.
    pub fn root(&self) -> WriteNode<'_, A> {
        WriteNode {
            ser: self,
            frame: self.inner.borrow().frames.root(),
        }
    }

    /// Releases the serializer and returns the backend. Fails if any
    /// compound scope is still open — an unbalanced document is a
    /// programming error.
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

/// Cursor into the position currently being written. Holds no data itself;
/// it is a frame-checked handle into the serializer's archive.
pub struct WriteNode<'a, A: WriteArchive> {
    ser: &'a Serializer<A>,
    frame: FrameId,
}

impl<A: WriteArchive> Clone for WriteNode<'_, A> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<A: WriteArchive> Copy for WriteNode<'_, A> {}

impl<'a, A: WriteArchive> WriteNode<'a, A> {
    /// Runs `f` against the archive after verifying this node is the
    /// innermost open scope. All archive access funnels through here.
    pub(crate) fn with<R>(&self, f: impl FnOnce(&mut A) -> Result<R>) -> Result<R> {
        let mut inner = self.ser.inner.borrow_mut();
        inner.frames.require_active(self.frame)?;
        f(&mut inner.archive)
    }

    /// Write a value at this position, dispatched per its [`Encode`] impl.
    pub fn value<T: Encode + ?Sized>(&self, v: &T) -> Result<()> {
        v.encode(*self)
    }

    /// Write an explicit null at this position.
    pub fn null(&self) -> Result<()> {
        self.with(|a| a.write_null())
    }

    /// Open a child object scope rooted at this position. The returned
    /// handle must stay in scope until the object's members are written;
    /// dropping it closes the object and reactivates this node.
    pub fn object(&self) -> Result<ObjectWriter<'a, A>> {
        let frame = {
            let mut inner = self.ser.inner.borrow_mut();
            inner.frames.require_active(self.frame)?;
            inner.archive.open_object()?;
            inner.frames.push()
        };
        Ok(ObjectWriter {
            node: WriteNode {
                ser: self.ser,
                frame,
            },
        })
    }

    /// Open a child array scope rooted at this position.
    pub fn array(&self) -> Result<ArrayWriter<'a, A>> {
        let frame = {
            let mut inner = self.ser.inner.borrow_mut();
            inner.frames.require_active(self.frame)?;
            inner.archive.open_array()?;
            inner.frames.push()
        };
        Ok(ArrayWriter {
            node: WriteNode {
                ser: self.ser,
                frame,
            },
        })
    }
}

/// An open object scope on the write side: keyed children.
pub struct ObjectWriter<'a, A: WriteArchive> {
    node: WriteNode<'a, A>,
}

impl<'a, A: WriteArchive> ObjectWriter<'a, A> {
    /// Frame a member: writes the pending key and returns the node for its
    /// value. On the write side this always succeeds.
    pub fn key(&self, name: &str) -> Result<WriteNode<'a, A>> {
        self.node.with(|a| a.push_key(name))?;
        Ok(self.node)
    }

    /// Write the member `key` with the given value.
    pub fn value<T: Encode + ?Sized>(&self, key: &str, v: &T) -> Result<()> {
        self.key(key)?.value(v)
    }

    /// Write the member `key` only when the value is present; an absent
    /// optional emits nothing at all, not a null.
    pub fn opt_value<T: Encode>(&self, key: &str, v: &Option<T>) -> Result<()> {
        match v {
            Some(inner) => self.value(key, inner),
            None => Ok(()),
        }
    }

    /// Open a child object under the member `key`.
    pub fn object(&self, key: &str) -> Result<ObjectWriter<'a, A>> {
        self.key(key)?.object()
    }

    /// Open a child array under the member `key`.
    pub fn array(&self, key: &str) -> Result<ArrayWriter<'a, A>> {
        self.key(key)?.array()
    }

    /// Write a type's fields as direct members of this object (flat
    /// adaptation), dispatched per its [`EncodeFlat`] impl.
    pub fn flat_value<T: EncodeFlat + ?Sized>(&self, v: &T) -> Result<()> {
        v.encode_flat(self)
    }

    /// An object node's kind is part of its own state, always `OBJECT`.
    pub fn node_type(&self) -> TypeMask {
        TypeMask::OBJECT
    }
}

impl<A: WriteArchive> Drop for ObjectWriter<'_, A> {
    fn drop(&mut self) {
        let mut inner = self.node.ser.inner.borrow_mut();
        inner.frames.pop(self.node.frame);
        inner.archive.close_object();
    }
}

/// An open array scope on the write side: indexed children, written in
/// sequence.
pub struct ArrayWriter<'a, A: WriteArchive> {
    node: WriteNode<'a, A>,
}

impl<'a, A: WriteArchive> ArrayWriter<'a, A> {
    /// Append an element.
    pub fn value<T: Encode + ?Sized>(&self, v: &T) -> Result<()> {
        self.node.value(v)
    }

    /// Append an explicit null element.
    pub fn null(&self) -> Result<()> {
        self.node.null()
    }

    /// Open a child object as the next element.
    pub fn object(&self) -> Result<ObjectWriter<'a, A>> {
        self.node.object()
    }

    /// Open a child array as the next element.
    pub fn array(&self) -> Result<ArrayWriter<'a, A>> {
        self.node.array()
    }

    /// An array node's kind is part of its own state, always `ARRAY`.
    pub fn node_type(&self) -> TypeMask {
        TypeMask::ARRAY
    }
}

impl<A: WriteArchive> Drop for ArrayWriter<'_, A> {
    fn drop(&mut self) {
        let mut inner = self.node.ser.inner.borrow_mut();
        inner.frames.pop(self.node.frame);
        inner.archive.close_array();
    }
}

// The primitive set: the lowest-priority resolution tier, delegating to the
// archive's primitive write methods.

macro_rules! encode_primitive {
    ($($ty:ty => $method:ident),* $(,)?) => {$(
        impl Encode for $ty {
            fn encode<A: WriteArchive>(&self, node: WriteNode<'_, A>) -> Result<()> {
                node.with(|a| a.$method(*self))
            }
        }
    )*};
}

encode_primitive! {
    bool => write_bool,
    i8 => write_i8,
    i16 => write_i16,
    i32 => write_i32,
    i64 => write_i64,
    u8 => write_u8,
    u16 => write_u16,
    u32 => write_u32,
    u64 => write_u64,
    f32 => write_f32,
    f64 => write_f64,
}

impl Encode for str {
    fn encode<A: WriteArchive>(&self, node: WriteNode<'_, A>) -> Result<()> {
        node.with(|a| a.write_str(self))
    }
}

impl Encode for String {
    fn encode<A: WriteArchive>(&self, node: WriteNode<'_, A>) -> Result<()> {
        node.with(|a| a.write_str(self))
    }
}
