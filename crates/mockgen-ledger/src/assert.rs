//! Argument assertions used by generated mock methods.
//!
//! Each helper compares a recorded value against the argument a mock method
//! actually received, records a non-fatal failure on the [`TestHandle`] if
//! they differ, and returns whether they matched. The call is consumed
//! either way.

use std::any::type_name;
use std::fmt::Debug;
use std::sync::Arc;

use crate::handle::TestHandle;
use crate::ledger::Value;

/// Asserts that `expected` holds a `T` equal to `actual`.
pub fn equal_values<T>(
    handle: &TestHandle,
    expected: &Value,
    actual: &T,
    label: &str,
    index: usize,
) -> bool
where
    T: PartialEq + Debug + 'static,
{
    match expected.downcast_ref::<T>() {
        Some(expected) if expected == actual => true,
        Some(expected) => {
            handle.error(format!(
                "{} mismatch in call #{}: expected {:?}, got {:?}",
                label, index, expected, actual
            ));
            false
        }
        None => {
            handle.error(format!(
                "{} mismatch in call #{}: recorded value is not a `{}`",
                label,
                index,
                type_name::<T>()
            ));
            false
        }
    }
}

/// Asserts that `expected` holds an `Arc` pointing at the same object as
/// `actual`. Used for contract-typed arguments, which have no value
/// equality.
pub fn same_object<T>(
    handle: &TestHandle,
    expected: &Value,
    actual: &Arc<T>,
    label: &str,
    index: usize,
) -> bool
where
    T: ?Sized + 'static,
{
    match expected.downcast_ref::<Arc<T>>() {
        Some(expected) if Arc::ptr_eq(expected, actual) => true,
        Some(_) => {
            handle.error(format!(
                "{} mismatch in call #{}: recorded object is a different instance",
                label, index
            ));
            false
        }
        None => {
            handle.error(format!(
                "{} mismatch in call #{}: recorded value is not a `{}`",
                label,
                index,
                type_name::<Arc<T>>()
            ));
            false
        }
    }
}

/// Values made of shared objects: an `Arc`, or `Box`es, `Vec`s, arrays and
/// `Option`s of them.
///
/// Identity is the sequence of object addresses, with `None` contributing
/// nothing.
pub trait SharedObjects {
    fn addresses(&self, out: &mut Vec<*const ()>);
}

impl<T: ?Sized> SharedObjects for Arc<T> {
    fn addresses(&self, out: &mut Vec<*const ()>) {
        out.push(Arc::as_ptr(self) as *const ());
    }
}

impl<U: SharedObjects + ?Sized> SharedObjects for Box<U> {
    fn addresses(&self, out: &mut Vec<*const ()>) {
        (**self).addresses(out);
    }
}

impl<U: SharedObjects> SharedObjects for [U] {
    fn addresses(&self, out: &mut Vec<*const ()>) {
        for item in self {
            item.addresses(out);
        }
    }
}

impl<U: SharedObjects, const N: usize> SharedObjects for [U; N] {
    fn addresses(&self, out: &mut Vec<*const ()>) {
        self.as_slice().addresses(out);
    }
}

impl<U: SharedObjects> SharedObjects for Vec<U> {
    fn addresses(&self, out: &mut Vec<*const ()>) {
        self.as_slice().addresses(out);
    }
}

impl<U: SharedObjects> SharedObjects for Option<U> {
    fn addresses(&self, out: &mut Vec<*const ()>) {
        if let Some(inner) = self {
            inner.addresses(out);
        }
    }
}

fn addresses_of<C: SharedObjects + ?Sized>(value: &C) -> Vec<*const ()> {
    let mut out = Vec::new();
    value.addresses(&mut out);
    out
}

/// Asserts that `expected` holds a `C` referring to the same objects, in the
/// same positions, as `actual`. Used for boxes, sequences, arrays and
/// options of contract objects.
pub fn same_objects<C>(
    handle: &TestHandle,
    expected: &Value,
    actual: &C,
    label: &str,
    index: usize,
) -> bool
where
    C: SharedObjects + 'static,
{
    let expected = match expected.downcast_ref::<C>() {
        Some(expected) => addresses_of(expected),
        None => {
            handle.error(format!(
                "{} mismatch in call #{}: recorded value is not a `{}`",
                label,
                index,
                type_name::<C>()
            ));
            return false;
        }
    };
    let actual = addresses_of(actual);
    if expected.len() != actual.len() {
        handle.error(format!(
            "{} mismatch in call #{}: expected {} object(s), got {}",
            label,
            index,
            expected.len(),
            actual.len()
        ));
        return false;
    }
    match expected.iter().zip(&actual).position(|(e, a)| e != a) {
        None => true,
        Some(position) => {
            handle.error(format!(
                "{} mismatch in call #{}: object {} is a different instance",
                label, index, position
            ));
            false
        }
    }
}
