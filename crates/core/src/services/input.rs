//! Shared request-input helpers.

use serde::{Deserialize, Deserializer};

/// Default page size for listings.
pub const DEFAULT_LIMIT: u64 = 20;
/// Largest page size accepted.
pub const MAX_LIMIT: u64 = 100;

/// Clamp a requested page size.
#[must_use]
pub fn page_limit(limit: Option<u64>) -> u64 {
    limit.unwrap_or(DEFAULT_LIMIT).clamp(1, MAX_LIMIT)
}

/// Deserialize a field where `null` means "clear" and absence means "keep".
///
/// Use with `#[serde(default, deserialize_with = "double_option")]`.
pub fn double_option<'de, T, D>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    T: Deserialize<'de>,
    D: Deserializer<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}

/// Drop repeated IDs, keeping first occurrences in order.
#[must_use]
pub fn dedup_ids(ids: Vec<String>) -> Vec<String> {
    let mut seen = std::collections::HashSet::new();
    ids.into_iter().filter(|id| seen.insert(id.clone())).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Deserialize)]
    struct Patch {
        #[serde(default, deserialize_with = "double_option")]
        image_id: Option<Option<String>>,
    }

    #[test]
    fn test_double_option() {
        let absent: Patch = serde_json::from_str("{}").unwrap();
        let cleared: Patch = serde_json::from_str(r#"{"image_id": null}"#).unwrap();
        let set: Patch = serde_json::from_str(r#"{"image_id": "img1"}"#).unwrap();

        assert_eq!(absent.image_id, None);
        assert_eq!(cleared.image_id, Some(None));
        assert_eq!(set.image_id, Some(Some("img1".to_string())));
    }

    #[test]
    fn test_page_limit() {
        assert_eq!(page_limit(None), DEFAULT_LIMIT);
        assert_eq!(page_limit(Some(0)), 1);
        assert_eq!(page_limit(Some(10_000)), MAX_LIMIT);
    }

    #[test]
    fn test_dedup_ids() {
        let ids = vec!["a".to_string(), "b".to_string(), "a".to_string()];
        assert_eq!(dedup_ids(ids), vec!["a".to_string(), "b".to_string()]);
    }
}
