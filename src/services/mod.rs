pub mod db;
pub mod forms;
pub mod models;
pub mod services;
pub mod views;
