#![allow(dead_code, unused_imports)]

pub mod database;
pub mod helpers;
pub mod services;
pub mod test_app;

pub use helpers::{generate_test_email, register_and_login};
pub use services::TestServices;
pub use test_app::TestApp;
