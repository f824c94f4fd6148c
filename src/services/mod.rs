pub mod auth_service;
pub mod cluster_service;
pub mod employee_service;
pub mod order_service;
pub mod order_summary;
pub mod product_service;
pub mod store_service;
pub mod supplier_service;
