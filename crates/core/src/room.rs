//! Room categories and search pagination.

use crate::error::CoreError;

pub const CATEGORY_KING: &str = "King";
pub const CATEGORY_SINGLE: &str = "Single";
pub const CATEGORY_TWINS: &str = "Twins";

/// All valid values of `rooms.category`.
pub const VALID_CATEGORIES: &[&str] = &[CATEGORY_KING, CATEGORY_SINGLE, CATEGORY_TWINS];

/// Rooms returned per page by the public search.
pub const RES_PER_PAGE: i64 = 5;

pub fn validate_category(category: &str) -> Result<(), CoreError> {
    if VALID_CATEGORIES.contains(&category) {
        Ok(())
    } else {
        Err(CoreError::Validation(format!(
            "Unknown room category '{category}'. Expected one of: {}",
            VALID_CATEGORIES.join(", ")
        )))
    }
}

/// Row offset for a 1-based `page`. Missing or non-positive pages map to the
/// first page.
pub fn page_offset(page: Option<i64>) -> i64 {
    let page = page.unwrap_or(1).max(1);
    (page - 1).saturating_mul(RES_PER_PAGE)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_categories_validate() {
        for category in VALID_CATEGORIES {
            assert!(validate_category(category).is_ok());
        }
        assert!(validate_category("Penthouse").is_err());
        assert!(validate_category("king").is_err());
    }

    #[test]
    fn page_offsets() {
        assert_eq!(page_offset(None), 0);
        assert_eq!(page_offset(Some(1)), 0);
        assert_eq!(page_offset(Some(3)), 10);
        assert_eq!(page_offset(Some(0)), 0);
        assert_eq!(page_offset(Some(-4)), 0);
    }
}
