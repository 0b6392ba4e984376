pub mod pagination;
pub mod statuses;
pub mod user_follows;
pub mod users;
