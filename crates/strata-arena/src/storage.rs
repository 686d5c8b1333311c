//! Backing buffer acquisition shared by both arena variants.

use crate::error::ArenaError;

/// Acquire a fixed-size byte buffer from the system allocator.
///
/// The buffer is filled once here so it is fully initialised memory;
/// allocations carved out of it later are never cleared again.
pub(crate) fn acquire(capacity: usize) -> Result<Box<[u8]>, ArenaError> {
    let mut data = Vec::new();
    data.try_reserve_exact(capacity)
        .map_err(|_| ArenaError::StorageUnavailable {
            requested: capacity,
        })?;
    data.resize(capacity, 0);
    Ok(data.into_boxed_slice())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn acquire_returns_exact_length() {
        let data = acquire(37).unwrap();
        assert_eq!(data.len(), 37);
    }

    #[test]
    fn acquire_zero_is_empty() {
        assert!(acquire(0).unwrap().is_empty());
    }

    #[test]
    fn acquire_reports_impossible_sizes() {
        let err = acquire(usize::MAX).unwrap_err();
        assert_eq!(
            err,
            ArenaError::StorageUnavailable {
                requested: usize::MAX
            }
        );
    }
}
