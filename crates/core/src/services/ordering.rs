//! Helpers for orderable child collections.

use std::collections::HashSet;

use moviecat_common::{AppError, AppResult};

/// Check that `requested` is a reordering of `current`.
///
/// Every current ID must appear exactly once and nothing else may appear.
pub fn validate_permutation(current: &[String], requested: &[String]) -> AppResult<()> {
    let known: HashSet<&str> = current.iter().map(String::as_str).collect();
    let mut seen = HashSet::with_capacity(requested.len());

    for id in requested {
        if !known.contains(id.as_str()) {
            return Err(AppError::Validation(format!("Unknown item: {id}")));
        }
        if !seen.insert(id.as_str()) {
            return Err(AppError::Validation(format!("Duplicate item: {id}")));
        }
    }

    if seen.len() != known.len() {
        return Err(AppError::Validation(format!(
            "Expected {} items, got {}",
            known.len(),
            seen.len()
        )));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ids(raw: &[&str]) -> Vec<String> {
        raw.iter().map(ToString::to_string).collect()
    }

    #[test]
    fn test_accepts_reordering() {
        assert!(validate_permutation(&ids(&["a", "b", "c"]), &ids(&["c", "a", "b"])).is_ok());
        assert!(validate_permutation(&[], &[]).is_ok());
    }

    #[test]
    fn test_rejects_foreign_missing_and_duplicate() {
        let current = ids(&["a", "b"]);
        assert!(validate_permutation(&current, &ids(&["a", "x"])).is_err());
        assert!(validate_permutation(&current, &ids(&["a"])).is_err());
        assert!(validate_permutation(&current, &ids(&["a", "a"])).is_err());
    }
}
