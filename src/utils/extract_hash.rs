//! Hash candidate extraction from raw request paths.

/// Extracts the hash candidate from a raw request URL.
///
/// The contract is: the hash is the **first path segment**, with any query
/// string stripped. A leading slash is optional.
///
/// ```text
/// /abc123?click_id=xyz  ->  Some("abc123")
/// /abc123/extra         ->  Some("abc123")
/// abc123                ->  Some("abc123")
/// /                     ->  None
/// ?click_id=xyz         ->  None
/// ```
///
/// Absence of a candidate is not an error; it simply means the worker
/// produces no redirect-history record for the hit.
pub fn extract_hash(request_url: &str) -> Option<String> {
    let path = request_url.split('?').next().unwrap_or(request_url);
    let segment = path.trim_start_matches('/').split('/').next()?;

    if segment.is_empty() {
        None
    } else {
        Some(segment.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_hash_with_query() {
        assert_eq!(
            extract_hash("/abc123?click_id=xyz"),
            Some("abc123".to_string())
        );
    }

    #[test]
    fn test_extract_hash_plain() {
        assert_eq!(extract_hash("/abc123"), Some("abc123".to_string()));
        assert_eq!(extract_hash("abc123"), Some("abc123".to_string()));
    }

    #[test]
    fn test_extract_hash_takes_first_segment() {
        assert_eq!(extract_hash("/abc123/extra/path"), Some("abc123".to_string()));
    }

    #[test]
    fn test_extract_hash_empty_path() {
        assert_eq!(extract_hash("/"), None);
        assert_eq!(extract_hash(""), None);
        assert_eq!(extract_hash("?click_id=xyz"), None);
        assert_eq!(extract_hash("/?click_id=xyz"), None);
    }
}
