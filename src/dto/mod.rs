pub mod auth;
pub mod clusters;
pub mod employees;
pub mod orders;
pub mod products;
pub mod stores;
pub mod suppliers;
