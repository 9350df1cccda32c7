//! Opaque structure elements.
//!
//! An [`Elem`] is an owned buffer whose meaning is defined entirely by the
//! structure that created it. Generic code never looks inside; it moves
//! elements around and hands them back to the owning structure's methods.

use std::any::{type_name, Any};
use std::fmt;

/// An opaque element owned by exactly one structure.
///
/// `Elem` deliberately does not implement `Clone`: a payload may own heap
/// memory whose copy semantics only its structure knows, so copies go
/// through [`Structure::set`](crate::Structure::set) or
/// [`Structure::clone_elem`](crate::Structure::clone_elem). Dropping an
/// element releases it.
pub struct Elem(Box<dyn Any + Send + Sync>);

impl Elem {
    /// Wraps a payload. Intended for structure implementations.
    pub fn new<T: Any + Send + Sync>(payload: T) -> Self {
        Self(Box::new(payload))
    }

    /// Returns the payload.
    ///
    /// # Panics
    ///
    /// Panics if the element was not created by a structure using payload
    /// type `T`, i.e. it belongs to a different structure.
    #[must_use]
    pub fn payload<T: Any>(&self) -> &T {
        match self.0.downcast_ref::<T>() {
            Some(p) => p,
            None => foreign::<T>(),
        }
    }

    /// Returns the payload mutably.
    ///
    /// # Panics
    ///
    /// Panics if the element belongs to a different structure.
    pub fn payload_mut<T: Any>(&mut self) -> &mut T {
        match self.0.downcast_mut::<T>() {
            Some(p) => p,
            None => foreign::<T>(),
        }
    }

    /// Returns the payload if it has type `T`.
    #[must_use]
    pub fn try_payload<T: Any>(&self) -> Option<&T> {
        self.0.downcast_ref::<T>()
    }

    /// Returns true if the payload has type `T`.
    #[must_use]
    pub fn holds<T: Any>(&self) -> bool {
        self.0.is::<T>()
    }

    /// Exchanges two elements in constant time.
    pub fn swap(&mut self, other: &mut Elem) {
        std::mem::swap(self, other);
    }
}

#[cold]
fn foreign<T>() -> ! {
    panic!(
        "element does not belong to this structure (expected payload {})",
        type_name::<T>()
    )
}

impl fmt::Debug for Elem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Elem(..)")
    }
}
