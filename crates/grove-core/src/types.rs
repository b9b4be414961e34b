//! Value type tags reported by a reader before a value is consumed.

/// Bitmask describing what kind of value is pending at the current cursor
/// position, allowing combined queries such as "is this any kind of number".
///
/// `TRUE` and `FALSE` are two disjoint leaf tags under the combined
/// `BOOLEAN` category; a backend reports exactly one leaf tag per value,
/// never a combination. `INTEGER` and `FLOAT` combine into `NUMBER` the
/// same way.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TypeMask(u16);

impl TypeMask {
    pub const TRUE: TypeMask = TypeMask(0b0000_0001);
    pub const FALSE: TypeMask = TypeMask(0b0000_0010);
    pub const BOOLEAN: TypeMask = TypeMask(0b0000_0011);
    pub const INTEGER: TypeMask = TypeMask(0b0000_0100);
    pub const FLOAT: TypeMask = TypeMask(0b0000_1000);
    pub const NUMBER: TypeMask = TypeMask(0b0000_1100);
    pub const STRING: TypeMask = TypeMask(0b0001_0000);
    pub const OBJECT: TypeMask = TypeMask(0b0010_0000);
    pub const ARRAY: TypeMask = TypeMask(0b0100_0000);
    pub const NULL: TypeMask = TypeMask(0b1000_0000);

    /// True if this tag overlaps `mask`, e.g. `tag.is(TypeMask::NUMBER)`
    /// for either integers or floats.
    pub fn is(self, mask: TypeMask) -> bool {
        self.0 & mask.0 != 0
    }
}
