//! Pagination parameters for listing endpoints.
//!
//! Page numbers are 0-based; a page size of zero is rejected rather than clamped.

use serde::Deserialize;

use crate::errors::ServiceError;

pub const DEFAULT_PAGE_SIZE: u64 = 3;

/// Pagination parameters
#[derive(Clone, Copy, Debug, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageRequest {
    /// 0-based page index
    #[serde(default)]
    pub page_number: u64,
    /// items per page
    #[serde(default = "default_page_size")]
    pub page_size: u64,
}

fn default_page_size() -> u64 { DEFAULT_PAGE_SIZE }

impl PageRequest {
    pub fn new(page_number: u64, page_size: u64) -> Self { Self { page_number, page_size } }

    /// Reject empty pages and offsets the database cannot represent.
    pub fn validate(self) -> Result<Self, ServiceError> {
        if self.page_size == 0 {
            return Err(ServiceError::invalid("pageSize"));
        }
        let offset = self.page_number.checked_mul(self.page_size);
        if offset.map_or(true, |o| o > i64::MAX as u64) || self.page_size > i64::MAX as u64 {
            return Err(ServiceError::invalid("pageNumber"));
        }
        Ok(self)
    }
}

impl Default for PageRequest {
    fn default() -> Self { Self { page_number: 0, page_size: DEFAULT_PAGE_SIZE } }
}

#[cfg(test)]
mod tests {
    use super::PageRequest;

    #[test]
    fn default_values_are_first_page_of_three() {
        let d = PageRequest::default();
        assert_eq!(d.page_number, 0);
        assert_eq!(d.page_size, 3);
    }

    #[test]
    fn zero_page_size_is_rejected() {
        assert!(PageRequest::new(0, 0).validate().is_err());
    }

    #[test]
    fn overflowing_offset_is_rejected() {
        assert!(PageRequest::new(u64::MAX, 2).validate().is_err());
        assert!(PageRequest::new(1, u64::MAX).validate().is_err());
        assert!(PageRequest::new(5, 20).validate().is_ok());
    }

    #[test]
    fn missing_fields_take_defaults() {
        let p: PageRequest = serde_json::from_str(r#"{"pageNumber": 2}"#).unwrap();
        assert_eq!(p, PageRequest::new(2, 3));
    }
}
