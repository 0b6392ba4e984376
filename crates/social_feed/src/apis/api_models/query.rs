use serde::Deserialize;
use utoipa::IntoParams;
use uuid::Uuid;

use crate::models::pagination::PageSpec;

#[derive(Debug, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
#[serde(rename_all = "camelCase")]
pub struct ListUsersQuery {
    #[serde(default = "default_page")]
    #[param(default = 1)]
    pub page: u32,
    #[serde(default = "default_limit")]
    #[param(default = 10)]
    pub limit: u32,
    /// When set, each user carries the viewer's update and delete permissions
    pub viewer_id: Option<Uuid>,
}

impl ListUsersQuery {
    pub fn page_spec(&self) -> PageSpec {
        PageSpec::new(self.page, self.limit)
    }
}

fn default_page() -> u32 {
    PageSpec::default().page
}

fn default_limit() -> u32 {
    PageSpec::default().limit
}
