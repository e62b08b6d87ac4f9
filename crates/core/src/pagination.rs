//! Limit/offset clamping for list endpoints.

/// Default number of rows returned by a list endpoint.
pub const DEFAULT_LIMIT: i64 = 50;

/// Maximum number of rows a caller may request.
pub const MAX_LIMIT: i64 = 100;

/// Clamp a user-provided limit to valid bounds.
pub fn clamp_limit(limit: Option<i64>, default: i64, max: i64) -> i64 {
    limit.unwrap_or(default).max(1).min(max)
}

/// Clamp a user-provided offset to non-negative.
pub fn clamp_offset(offset: Option<i64>) -> i64 {
    offset.unwrap_or(0).max(0)
}

/// Resolve `(limit, offset)` from either `limit`/`offset` or `page`/`page_size`.
///
/// Page numbers are 1-based. When both styles are given, `page` wins.
pub fn resolve_window(
    limit: Option<i64>,
    offset: Option<i64>,
    page: Option<i64>,
    page_size: Option<i64>,
) -> (i64, i64) {
    match page {
        Some(page) => {
            let size = clamp_limit(page_size.or(limit), DEFAULT_LIMIT, MAX_LIMIT);
            (size, page.max(1).saturating_sub(1).saturating_mul(size))
        }
        None => (
            clamp_limit(limit, DEFAULT_LIMIT, MAX_LIMIT),
            clamp_offset(offset),
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn limit_is_clamped() {
        assert_eq!(clamp_limit(None, 50, 100), 50);
        assert_eq!(clamp_limit(Some(0), 50, 100), 1);
        assert_eq!(clamp_limit(Some(500), 50, 100), 100);
    }

    #[test]
    fn negative_offset_becomes_zero() {
        assert_eq!(clamp_offset(Some(-3)), 0);
    }

    #[test]
    fn page_overrides_offset() {
        assert_eq!(resolve_window(None, Some(7), Some(3), Some(10)), (10, 20));
        assert_eq!(resolve_window(None, None, Some(0), None), (DEFAULT_LIMIT, 0));
    }

    #[test]
    fn huge_page_saturates_instead_of_overflowing() {
        assert_eq!(
            resolve_window(None, None, Some(i64::MAX), Some(100)),
            (100, i64::MAX)
        );
    }

    #[test]
    fn limit_offset_style() {
        assert_eq!(resolve_window(Some(5), Some(15), None, None), (5, 15));
    }
}
