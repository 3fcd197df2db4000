//! Typestate markers for builders with required fields.
//!
//! A builder starts with every required field `Unset` and only exposes `build` once each one has
//! been replaced by a `Set` value, so forgetting a field is a compile error.

use std::marker::PhantomData;

/// A required field that has not been provided yet.
#[derive(Debug)]
pub struct Unset<T> {
    _marker: PhantomData<T>,
}

impl<T> Default for Unset<T> {
    fn default() -> Self {
        Self {
            _marker: PhantomData,
        }
    }
}

impl<T> Unset<T> {
    pub fn new() -> Self {
        Self::default()
    }
}

/// A required field holding its value.
#[derive(Debug, Clone)]
pub struct Set<T> {
    value: T,
}

impl<T> Set<T> {
    pub fn new(value: T) -> Self {
        Self { value }
    }

    pub fn into_inner(self) -> T {
        self.value
    }

    pub fn as_ref_inner(&self) -> &T {
        &self.value
    }
}
