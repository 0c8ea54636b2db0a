// Wire
// Copyright (C) 2022 Wire Swiss GmbH

// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU General Public License as published by
// the Free Software Foundation, either version 3 of the License, or
// (at your option) any later version.

// This program is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE. See the
// GNU General Public License for more details.

// You should have received a copy of the GNU General Public License
// along with this program. If not, see http://www.gnu.org/licenses/.

use crate::TraceError;

/// Is `err` the failure `target`, looking through at most one [TraceError]?
///
/// A [TraceError] is unwrapped exactly one level and its immediate cause compared to `target`;
/// anything else is compared directly. Use [is_in_chain] to look through any number of wraps.
pub fn is<E>(err: &(dyn std::error::Error + 'static), target: &E) -> bool
where
    E: std::error::Error + PartialEq + 'static,
{
    match err.downcast_ref::<TraceError>() {
        Some(traced) => matches(traced.cause().as_error(), target),
        None => matches(err, target),
    }
}

/// Is `target` anywhere in the [source][std::error::Error::source] chain of `err`, `err` included?
pub fn is_in_chain<E>(err: &(dyn std::error::Error + 'static), target: &E) -> bool
where
    E: std::error::Error + PartialEq + 'static,
{
    std::iter::successors(Some(err), |err| err.source()).any(|err| matches(err, target))
}

fn matches<E>(err: &(dyn std::error::Error + 'static), target: &E) -> bool
where
    E: std::error::Error + PartialEq + 'static,
{
    err.downcast_ref::<E>().is_some_and(|err| err == target)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{wrap, ResultExt as _};

    #[derive(Debug, PartialEq, thiserror::Error)]
    enum StorageError {
        #[error("psql: could not create user")]
        CreateUser,
        #[error("psql: connection refused")]
        ConnectionRefused,
    }

    #[test]
    fn one_wrap_is_seen_through() {
        let traced = TraceError::new(StorageError::CreateUser);
        assert!(is(&traced, &StorageError::CreateUser));
    }

    #[test]
    fn other_failures_do_not_match() {
        let traced = TraceError::new(StorageError::CreateUser);
        assert!(!is(&traced, &StorageError::ConnectionRefused));
    }

    #[test]
    fn unwrapped_failures_compare_directly() {
        assert!(is(&StorageError::CreateUser, &StorageError::CreateUser));
        assert!(!is(&StorageError::CreateUser, &StorageError::ConnectionRefused));
    }

    #[test]
    fn only_one_level_is_unwrapped() {
        let traced = TraceError::new(TraceError::new(StorageError::CreateUser));
        assert!(!is(&traced, &StorageError::CreateUser));
        assert!(is_in_chain(&traced, &StorageError::CreateUser));
    }

    #[test]
    fn chain_lookup_rejects_other_failures() {
        let traced = TraceError::new(TraceError::new(StorageError::CreateUser));
        assert!(!is_in_chain(&traced, &StorageError::ConnectionRefused));
    }

    #[test]
    fn works_on_traced_results() {
        let failing: Result<(), StorageError> = Err(StorageError::ConnectionRefused);
        let traced = failing.trace().unwrap_err();
        assert!(is(&traced, &StorageError::ConnectionRefused));

        let traced = wrap(Some(StorageError::CreateUser)).unwrap();
        assert!(is(&traced, &StorageError::CreateUser));
    }

    #[derive(Debug, PartialEq, thiserror::Error)]
    #[error("psql: could not create user")]
    struct LookalikeError;

    #[test]
    fn same_text_different_type_does_not_match() {
        let traced = TraceError::new(StorageError::CreateUser);
        assert!(!is(&traced, &LookalikeError));
        assert!(!is_in_chain(&traced, &LookalikeError));
    }
}
