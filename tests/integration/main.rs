//! Integration tests driving the full router.

mod auth_test;
mod file_test;
mod helpers;
mod share_test;
mod user_test;
