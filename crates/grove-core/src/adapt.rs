//! Adapters binding common containers and dynamic JSON trees to the node
//! contract.
//!
//! These are peripheral collaborators: they use only the public
//! node/resolver API, the same way user code would, and compose with both
//! primitive and user-defined element types.

use std::collections::BTreeMap;

use serde_json::{Map, Number, Value};

use crate::archive::{ReadArchive, WriteArchive};
use crate::de::{Decode, ReadNode};
use crate::error::{GroveError, Result};
use crate::ser::{Encode, WriteNode};
use crate::types::TypeMask;

impl<T: Encode> Encode for [T] {
    fn encode<A: WriteArchive>(&self, node: WriteNode<'_, A>) -> Result<()> {
        let ar = node.array()?;
        for item in self {
            ar.value(item)?;
        }
        Ok(())
    }
}

impl<T: Encode> Encode for Vec<T> {
    fn encode<A: WriteArchive>(&self, node: WriteNode<'_, A>) -> Result<()> {
        self.as_slice().encode(node)
    }
}

impl<T: Decode> Decode for Vec<T> {
    fn decode<A: ReadArchive>(node: ReadNode<'_, A>) -> Result<Self> {
        let ar = node.array()?;
        let len = ar.length()?;
        let mut out = Vec::with_capacity(len);
        for i in 0..len {
            out.push(ar.value(i)?);
        }
        Ok(out)
    }
}

impl<T: Encode> Encode for BTreeMap<String, T> {
    fn encode<A: WriteArchive>(&self, node: WriteNode<'_, A>) -> Result<()> {
        let obj = node.object()?;
        for (key, value) in self {
            obj.value(key, value)?;
        }
        Ok(())
    }
}

impl<T: Decode> Decode for BTreeMap<String, T> {
    fn decode<A: ReadArchive>(node: ReadNode<'_, A>) -> Result<Self> {
        let obj = node.object()?;
        let mut out = BTreeMap::new();
        while let Some(query) = obj.next_key()? {
            out.insert(query.name, query.node.value()?);
        }
        Ok(out)
    }
}

/// Dynamic-tree encoding: walks the parsed tree one node at a time.
impl Encode for Value {
    fn encode<A: WriteArchive>(&self, node: WriteNode<'_, A>) -> Result<()> {
        match self {
            Value::Null => node.null(),
            Value::Bool(b) => node.value(b),
            Value::Number(n) => {
                if let Some(i) = n.as_i64() {
                    node.value(&i)
                } else if let Some(u) = n.as_u64() {
                    node.value(&u)
                } else if let Some(f) = n.as_f64() {
                    node.value(&f)
                } else {
                    node.null()
                }
            }
            Value::String(s) => node.value(s.as_str()),
            Value::Array(arr) => {
                let ar = node.array()?;
                for item in arr {
                    ar.value(item)?;
                }
                Ok(())
            }
            Value::Object(map) => {
                let obj = node.object()?;
                for (key, value) in map {
                    obj.value(key, value)?;
                }
                Ok(())
            }
        }
    }
}

/// Generic unknown-schema decoding: dispatches on the pending type tag and
/// drives the single-pass key iteration for objects.
impl Decode for Value {
    fn decode<A: ReadArchive>(node: ReadNode<'_, A>) -> Result<Self> {
        let tag = node.node_type()?;
        if tag.is(TypeMask::NULL) {
            node.null()?;
            Ok(Value::Null)
        } else if tag.is(TypeMask::BOOLEAN) {
            Ok(Value::Bool(node.value()?))
        } else if tag.is(TypeMask::INTEGER) {
            Ok(Value::Number(Number::from(node.value::<i64>()?)))
        } else if tag.is(TypeMask::FLOAT) {
            let f: f64 = node.value()?;
            Number::from_f64(f)
                .map(Value::Number)
                .ok_or(GroveError::NonFiniteFloat)
        } else if tag.is(TypeMask::STRING) {
            Ok(Value::String(node.value()?))
        } else if tag.is(TypeMask::ARRAY) {
            let ar = node.array()?;
            let len = ar.length()?;
            let mut out = Vec::with_capacity(len);
            for i in 0..len {
                out.push(ar.value(i)?);
            }
            Ok(Value::Array(out))
        } else {
            let obj = node.object()?;
            let mut map = Map::new();
            while let Some(query) = obj.next_key()? {
                map.insert(query.name, query.node.value()?);
            }
            Ok(Value::Object(map))
        }
    }
}
