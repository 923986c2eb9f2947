//! Result shapes for the dispatch flavors.

use crate::error::RouterError;

/// Outcome of an action dispatch.
pub type DoResult = Result<(), RouterError>;

/// Outcome of a value dispatch.
pub type GetResult<T> = Result<T, RouterError>;

/// Collapse a [`GetResult`] into a plain value.
pub trait GetResultExt<T> {
    /// Return the success value, or `default` for any error kind.
    fn get_or(self, default: T) -> T;
}

impl<T> GetResultExt<T> for GetResult<T> {
    fn get_or(self, default: T) -> T {
        match self {
            Ok(value) => value,
            Err(_) => default,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::key::Key;

    #[test]
    fn test_get_or() {
        let key = Key::from("k");
        assert_eq!(Ok::<_, RouterError>(1).get_or(7), 1);

        for err in [
            RouterError::KeyMissing,
            RouterError::RegistryUnavailable { key: key.clone() },
            RouterError::HandlerNotFound { key: key.clone() },
            RouterError::TypeMismatch {
                key,
                expected: "i32",
            },
        ] {
            assert_eq!(Err::<i32, _>(err).get_or(7), 7);
        }
    }
}
