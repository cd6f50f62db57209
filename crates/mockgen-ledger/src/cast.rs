//! Reconstruction helpers: turn a recorded [`Value`] back into the concrete
//! result type of a mock method.
//!
//! [`cast`] is the plain downcast. The others accept a few stored shapes for
//! the same result, so an expectation can record either the exact result
//! type or its obvious inner value.

use std::any::type_name;

use crate::error::CastError;
use crate::ledger::Value;

pub fn try_cast<T: 'static>(value: Value) -> Result<T, CastError> {
    value
        .downcast::<T>()
        .map(|boxed| *boxed)
        .map_err(|_| CastError::TypeMismatch {
            expected: type_name::<T>(),
        })
}

/// Downcasts `value` to `T`.
///
/// # Panics
///
/// If the recorded value is not a `T`.
pub fn cast<T: 'static>(value: Value) -> T {
    try_cast(value).unwrap_or_else(|err| panic!("{}", err))
}

/// Accepts a stored `Box<T>` or a bare `T`.
pub fn try_to_pointer<T: 'static>(value: Value) -> Result<Box<T>, CastError> {
    let value = match value.downcast::<Box<T>>() {
        Ok(boxed) => return Ok(*boxed),
        Err(value) => value,
    };
    value
        .downcast::<T>()
        .map_err(|_| CastError::TypeMismatch {
            expected: type_name::<Box<T>>(),
        })
}

/// Rebuilds a `Box<T>` result.
///
/// # Panics
///
/// If the recorded value is neither a `Box<T>` nor a `T`.
pub fn to_pointer<T: 'static>(value: Value) -> Box<T> {
    try_to_pointer(value).unwrap_or_else(|err| panic!("{}", err))
}

/// Accepts a stored `Option<T>`, a bare `T` (`Some`), or `()` (`None`).
/// A bare `T` wins over `()`, so for `Option<()>` a recorded `()` is
/// `Some(())`; record `None::<()>` to replay `None`.
pub fn try_to_option<T: 'static>(value: Value) -> Result<Option<T>, CastError> {
    let value = match value.downcast::<Option<T>>() {
        Ok(option) => return Ok(*option),
        Err(value) => value,
    };
    let value = match value.downcast::<T>() {
        Ok(inner) => return Ok(Some(*inner)),
        Err(value) => value,
    };
    if value.is::<()>() {
        return Ok(None);
    }
    Err(CastError::TypeMismatch {
        expected: type_name::<Option<T>>(),
    })
}

/// Rebuilds an `Option<T>` result.
///
/// # Panics
///
/// If the recorded value is not an `Option<T>`, a `T`, or `()`.
pub fn to_option<T: 'static>(value: Value) -> Option<T> {
    try_to_option(value).unwrap_or_else(|err| panic!("{}", err))
}

/// Accepts a stored `Result<T, E>`, a bare `T` (`Ok`), or a bare `E`
/// (`Err`). When `T` and `E` are the same type a bare value is `Ok`.
pub fn try_to_result<T: 'static, E: 'static>(value: Value) -> Result<Result<T, E>, CastError> {
    let value = match value.downcast::<Result<T, E>>() {
        Ok(result) => return Ok(*result),
        Err(value) => value,
    };
    let value = match value.downcast::<T>() {
        Ok(ok) => return Ok(Ok(*ok)),
        Err(value) => value,
    };
    value
        .downcast::<E>()
        .map(|err| Err(*err))
        .map_err(|_| CastError::TypeMismatch {
            expected: type_name::<Result<T, E>>(),
        })
}

/// Rebuilds a `Result<T, E>` result.
///
/// # Panics
///
/// If the recorded value is not a `Result<T, E>`, a `T`, or an `E`.
pub fn to_result<T: 'static, E: 'static>(value: Value) -> Result<T, E> {
    try_to_result(value).unwrap_or_else(|err| panic!("{}", err))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, PartialEq)]
    struct Failure(&'static str);

    fn boxed<T: Send + 'static>(v: T) -> Value {
        Box::new(v)
    }

    #[test]
    fn cast_downcasts_exact_type() {
        assert_eq!(cast::<u32>(boxed(7u32)), 7);
        assert_eq!(
            try_cast::<u32>(boxed(7i32)),
            Err(CastError::TypeMismatch { expected: "u32" })
        );
    }

    #[test]
    #[should_panic(expected = "recorded value is not a `u32`")]
    fn cast_panics_on_wrong_type() {
        cast::<u32>(boxed("seven"));
    }

    #[test]
    fn to_pointer_accepts_box_or_value() {
        assert_eq!(*to_pointer::<String>(boxed(Box::new("a".to_string()))), "a");
        assert_eq!(*to_pointer::<String>(boxed("b".to_string())), "b");
        assert!(try_to_pointer::<String>(boxed(1u8)).is_err());
    }

    #[test]
    fn to_option_accepts_option_value_or_unit() {
        assert_eq!(to_option::<u8>(boxed(Some(3u8))), Some(3));
        assert_eq!(to_option::<u8>(boxed(None::<u8>)), None);
        assert_eq!(to_option::<u8>(boxed(4u8)), Some(4));
        assert_eq!(to_option::<u8>(boxed(())), None);
        assert!(try_to_option::<u8>(boxed("x")).is_err());
    }

    #[test]
    fn unit_option_prefers_some_for_a_bare_unit() {
        assert_eq!(to_option::<()>(boxed(())), Some(()));
        assert_eq!(to_option::<()>(boxed(None::<()>)), None);
        assert_eq!(to_option::<()>(boxed(Some(()))), Some(()));
    }

    #[test]
    fn to_result_accepts_result_ok_or_err() {
        let ok: Result<(), Failure> = to_result(boxed(Ok::<(), Failure>(())));
        assert_eq!(ok, Ok(()));

        let ok: Result<u8, Failure> = to_result(boxed(9u8));
        assert_eq!(ok, Ok(9));

        let err: Result<u8, Failure> = to_result(boxed(Failure("nope")));
        assert_eq!(err, Err(Failure("nope")));

        assert!(try_to_result::<u8, Failure>(boxed("other")).is_err());
    }
}
