use core::cmp::Ordering;
use core::fmt;
use core::hash::{Hash, Hasher};
use core::marker::PhantomData;
use core::num::NonZeroU32;

/// Tag naming what an [`Id`] indexes.
pub trait IdKind {
    const PREFIX: &'static str;
}

/// Pumping wells, in request order. Image wells share their origin's id.
#[derive(Debug)]
pub enum WellKind {}

/// Observation points, in request order.
#[derive(Debug)]
pub enum PointKind {}

impl IdKind for WellKind {
    const PREFIX: &'static str = "well";
}

impl IdKind for PointKind {
    const PREFIX: &'static str = "point";
}

/// Compact index into one of the request's input slices.
///
/// Stored as index+1 so `Option<Id<_>>` costs nothing extra. The kind tag
/// keeps well and point indices from being mixed up.
pub struct Id<K> {
    raw: NonZeroU32,
    kind: PhantomData<fn() -> K>,
}

pub type WellId = Id<WellKind>;
pub type PointId = Id<PointKind>;

impl<K> Id<K> {
    /// Id of the 0-based `index`.
    pub fn from_index(index: u32) -> Self {
        let raw = NonZeroU32::MIN.saturating_add(index);
        Self {
            raw,
            kind: PhantomData,
        }
    }

    pub fn index(self) -> u32 {
        self.raw.get() - 1
    }

    /// Index as `usize` for slice access.
    pub fn slot(self) -> usize {
        self.index() as usize
    }
}

impl<K> Clone for Id<K> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<K> Copy for Id<K> {}

impl<K> PartialEq for Id<K> {
    fn eq(&self, other: &Self) -> bool {
        self.raw == other.raw
    }
}

impl<K> Eq for Id<K> {}

impl<K> PartialOrd for Id<K> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<K> Ord for Id<K> {
    fn cmp(&self, other: &Self) -> Ordering {
        self.raw.cmp(&other.raw)
    }
}

impl<K> Hash for Id<K> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.raw.hash(state);
    }
}

impl<K: IdKind> fmt::Debug for Id<K> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}#{}", K::PREFIX, self.index())
    }
}

impl<K: IdKind> fmt::Display for Id<K> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", K::PREFIX, self.index())
    }
}
