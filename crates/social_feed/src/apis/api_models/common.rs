use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::models::pagination::{Page, PageSpec};

/// Standard paginated response wrapper
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct PaginatedResponse<T> {
    /// List of items for the current page
    pub items: Vec<T>,
    /// Total number of items across all pages
    pub total_items: i64,
    /// Current page number
    pub current_page: u32,
    /// Items per page
    pub items_per_page: u32,
    /// Total number of pages
    pub total_pages: u32,
}

impl<T> PaginatedResponse<T> {
    pub fn new(page: Page<T>, spec: &PageSpec) -> Self {
        PaginatedResponse {
            total_pages: spec.total_pages(page.total_items),
            items: page.items,
            total_items: page.total_items,
            current_page: spec.page,
            items_per_page: spec.limit,
        }
    }
}
