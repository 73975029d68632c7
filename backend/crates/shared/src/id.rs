//! Typed Integer IDs
//!
//! Records in this system are keyed by database-assigned `BIGSERIAL`
//! values. [`Id`] wraps the raw `i64` with a marker type so ids of
//! different entities cannot be mixed up.

use std::fmt;
use std::marker::PhantomData;

/// Generic typed ID wrapper
///
/// ```
/// use kernel::id::Id;
///
/// struct Account;
/// type AccountId = Id<Account>;
///
/// let id = AccountId::from_raw(42);
/// assert_eq!(id.get(), 42);
/// assert!(id.is_assigned());
/// ```
pub struct Id<T> {
    value: i64,
    _marker: PhantomData<fn() -> T>,
}

impl<T> Id<T> {
    /// Wrap a raw value. No validation happens here; callers that accept
    /// ids from outside must check [`Id::is_assigned`].
    pub const fn from_raw(value: i64) -> Self {
        Self {
            value,
            _marker: PhantomData,
        }
    }

    pub const fn get(&self) -> i64 {
        self.value
    }

    /// Serial ids start at 1; zero and negatives were never handed out.
    pub const fn is_assigned(&self) -> bool {
        self.value > 0
    }
}

// Manual impls: derives would put bounds on the marker type.
impl<T> Clone for Id<T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for Id<T> {}

impl<T> PartialEq for Id<T> {
    fn eq(&self, other: &Self) -> bool {
        self.value == other.value
    }
}

impl<T> Eq for Id<T> {}

impl<T> std::hash::Hash for Id<T> {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.value.hash(state);
    }
}

impl<T> fmt::Debug for Id<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Id({})", self.value)
    }
}

impl<T> fmt::Display for Id<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.value)
    }
}

impl<T> From<i64> for Id<T> {
    fn from(value: i64) -> Self {
        Self::from_raw(value)
    }
}

impl<T> From<Id<T>> for i64 {
    fn from(id: Id<T>) -> Self {
        id.value
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct A;
    struct B;

    #[test]
    fn test_assigned() {
        assert!(Id::<A>::from_raw(1).is_assigned());
        assert!(!Id::<A>::from_raw(0).is_assigned());
        assert!(!Id::<A>::from_raw(-7).is_assigned());
    }

    #[test]
    fn test_markers_do_not_need_traits() {
        let a: Id<A> = 5.into();
        let b: Id<B> = Id::from_raw(5);
        let copy = a;
        assert_eq!(a, copy);
        assert_eq!(i64::from(a), b.get());
        assert_eq!(format!("{a} {b:?}"), "5 Id(5)");
    }
}
