use crate::StoreError;

/// Bytes an entry occupies: key plus value, the way browser storage counts it.
pub(crate) fn entry_size(key: &str, value: &str) -> u64 {
    (key.len() + value.len()) as u64
}

/// Usage after replacing an entry of `old` bytes with one of `new` bytes.
///
/// # Errors
///
/// Returns [`StoreError::CapacityExceeded`] when the result would exceed `capacity`.
pub(crate) fn reserve(
    key: &str,
    used: u64,
    old: u64,
    new: u64,
    capacity: u64,
) -> Result<u64, StoreError> {
    let base = used.saturating_sub(old);
    let after = base.saturating_add(new);
    if after > capacity {
        return Err(StoreError::CapacityExceeded {
            key: key.to_string(),
            required: new,
            available: capacity.saturating_sub(base),
        });
    }
    Ok(after)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn replacing_an_entry_frees_its_old_bytes() {
        assert_eq!(reserve("k", 90, 40, 50, 100).unwrap(), 100);
    }

    #[test]
    fn overflow_reports_what_was_available() {
        let err = reserve("k", 90, 0, 20, 100).unwrap_err();
        assert!(matches!(
            err,
            StoreError::CapacityExceeded {
                required: 20,
                available: 10,
                ..
            }
        ));
    }
}
