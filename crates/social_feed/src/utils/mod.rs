pub mod errors;
pub mod gravatar;
