pub mod pagination;
pub mod requests;
pub mod users;
