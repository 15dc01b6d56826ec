pub mod auth;
pub mod error;
pub mod models;
pub mod pagination;
pub mod render;
pub mod state;
pub mod views;

#[cfg(test)]
pub mod test_support;
