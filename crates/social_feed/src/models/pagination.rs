use serde::{Deserialize, Serialize};
use utoipa::IntoParams;

use crate::utils::errors::app_error::AppError;

pub const MAX_PAGE_SIZE: u32 = 100;

/// Pagination window for list endpoints
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct PageSpec {
    /// Page number (starts at 1)
    #[serde(default = "default_page")]
    #[param(default = 1)]
    pub page: u32,
    /// Number of items per page
    #[serde(default = "default_limit")]
    #[param(default = 10)]
    pub limit: u32,
}

impl Default for PageSpec {
    fn default() -> Self {
        PageSpec {
            page: default_page(),
            limit: default_limit(),
        }
    }
}

impl PageSpec {
    pub fn new(page: u32, limit: u32) -> Self {
        PageSpec { page, limit }
    }

    pub fn validate(&self) -> Result<(), AppError> {
        if self.page == 0 {
            return Err(AppError::BadRequest("page starts at 1".to_string()));
        }
        if self.limit == 0 || self.limit > MAX_PAGE_SIZE {
            return Err(AppError::BadRequest(format!(
                "limit must be between 1 and {}",
                MAX_PAGE_SIZE
            )));
        }
        Ok(())
    }

    pub fn offset(&self) -> i64 {
        i64::from(self.page.saturating_sub(1)) * i64::from(self.limit)
    }

    pub fn limit(&self) -> i64 {
        i64::from(self.limit)
    }

    pub fn total_pages(&self, total_items: i64) -> u32 {
        if self.limit == 0 || total_items <= 0 {
            return 0;
        }
        let pages = (total_items + self.limit() - 1) / self.limit();
        u32::try_from(pages).unwrap_or(u32::MAX)
    }
}

/// One page of results plus the size of the full result set.
#[derive(Debug, Clone, PartialEq)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub total_items: i64,
}

impl<T> Page<T> {
    pub fn map<U>(self, f: impl FnMut(T) -> U) -> Page<U> {
        Page {
            items: self.items.into_iter().map(f).collect(),
            total_items: self.total_items,
        }
    }
}

fn default_page() -> u32 {
    1
}

fn default_limit() -> u32 {
    10
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;

    #[rstest]
    #[case(1, 1, true)]
    #[case(3, 10, true)]
    #[case(1, MAX_PAGE_SIZE, true)]
    #[case(0, 10, false)]
    #[case(1, 0, false)]
    #[case(1, MAX_PAGE_SIZE + 1, false)]
    fn test_validate(#[case] page: u32, #[case] limit: u32, #[case] valid: bool) {
        assert_eq!(PageSpec::new(page, limit).validate().is_ok(), valid);
    }

    #[rstest]
    #[case(1, 10, 0)]
    #[case(2, 10, 10)]
    #[case(4, 25, 75)]
    fn test_offset(#[case] page: u32, #[case] limit: u32, #[case] offset: i64) {
        assert_eq!(PageSpec::new(page, limit).offset(), offset);
    }

    #[rstest]
    #[case(0, 0)]
    #[case(1, 1)]
    #[case(10, 1)]
    #[case(11, 2)]
    fn test_total_pages(#[case] total_items: i64, #[case] pages: u32) {
        assert_eq!(PageSpec::new(1, 10).total_pages(total_items), pages);
    }
}
