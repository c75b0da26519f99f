//! Index types for mesh elements.
//!
//! Mesh elements are addressed by type-safe index newtypes so a face index
//! cannot be passed where a vertex index is expected. The newtypes are generic
//! over the underlying integer width ([`MeshIndex`]), letting callers pick
//! `u16`, `u32`, or `u64` to match mesh size.
//!
//! Face indices are dense and stable: face `i` is the `i`-th face passed to
//! the builder, and downstream consumers (notably the field solver) use that
//! same index space for matrix rows and columns.

use std::fmt::{self, Debug};
use std::hash::Hash;

/// Trait for integer types usable as mesh indices.
///
/// Implemented for `u16`, `u32`, and `u64`. The all-ones value of each type is
/// reserved as the invalid/null sentinel.
pub trait MeshIndex:
    Copy + Clone + Eq + PartialEq + Ord + PartialOrd + Hash + Debug + Send + Sync + 'static
{
    /// Sentinel value for an invalid/null index.
    const INVALID: Self;

    /// Convert from `usize`.
    ///
    /// # Panics
    /// May panic in debug builds if the value does not fit.
    fn from_usize(v: usize) -> Self;

    /// Convert to `usize`.
    fn to_usize(self) -> usize;

    /// Whether this is a valid (non-sentinel) index.
    fn is_valid(self) -> bool {
        self != Self::INVALID
    }
}

macro_rules! impl_mesh_index {
    ($($t:ty),*) => {
        $(
            impl MeshIndex for $t {
                const INVALID: Self = <$t>::MAX;

                #[inline]
                fn from_usize(v: usize) -> Self {
                    debug_assert!(
                        v < <$t>::MAX as usize,
                        "index {} does not fit in {}",
                        v,
                        stringify!($t)
                    );
                    v as $t
                }

                #[inline]
                fn to_usize(self) -> usize {
                    self as usize
                }
            }
        )*
    };
}

impl_mesh_index!(u16, u32, u64);

macro_rules! define_id {
    ($(#[$doc:meta])* $name:ident, $tag:literal) => {
        $(#[$doc])*
        #[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash)]
        #[repr(transparent)]
        pub struct $name<I: MeshIndex = u32>(I);

        impl<I: MeshIndex> $name<I> {
            /// Create an id from a raw index value.
            #[inline]
            pub fn new(index: usize) -> Self {
                Self(I::from_usize(index))
            }

            /// Create the invalid/null id.
            #[inline]
            pub fn invalid() -> Self {
                Self(I::INVALID)
            }

            /// The raw index value.
            #[inline]
            pub fn index(self) -> usize {
                self.0.to_usize()
            }

            /// Whether this id is valid (non-null).
            #[inline]
            pub fn is_valid(self) -> bool {
                self.0.is_valid()
            }
        }

        impl<I: MeshIndex> Debug for $name<I> {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                if self.is_valid() {
                    write!(f, "{}({})", $tag, self.index())
                } else {
                    write!(f, "{}(INVALID)", $tag)
                }
            }
        }

        impl<I: MeshIndex> Default for $name<I> {
            fn default() -> Self {
                Self::invalid()
            }
        }
    };
}

define_id! {
    /// A type-safe vertex index.
    VertexId, "V"
}

define_id! {
    /// A type-safe half-edge index.
    HalfEdgeId, "HE"
}

define_id! {
    /// A type-safe face index.
    FaceId, "F"
}

define_id! {
    /// A type-safe index for an undirected edge.
    ///
    /// An edge id is canonical: it is derived from the lower-indexed of the
    /// two twin half-edges, so looking an edge up from either direction
    /// yields the same id.
    EdgeId, "E"
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_id_roundtrip() {
        let f: FaceId = FaceId::new(17);
        assert_eq!(f.index(), 17);
        assert!(f.is_valid());

        let invalid: FaceId = FaceId::invalid();
        assert!(!invalid.is_valid());
    }

    #[test]
    fn test_ids_are_distinct_types() {
        let v: VertexId = VertexId::new(3);
        let e: EdgeId = EdgeId::new(3);
        // Same raw value, different types; can only compare raw indices.
        assert_eq!(v.index(), e.index());
    }

    #[test]
    fn test_small_index_width() {
        let v: VertexId<u16> = VertexId::new(1000);
        assert_eq!(v.index(), 1000);
    }

    #[test]
    fn test_debug_format() {
        let e: EdgeId = EdgeId::new(5);
        assert_eq!(format!("{:?}", e), "E(5)");
        assert_eq!(format!("{:?}", EdgeId::<u32>::invalid()), "E(INVALID)");
    }
}
