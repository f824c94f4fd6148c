pub mod audit_logs;
pub mod categories;
pub mod clusters;
pub mod employees;
pub mod order_details;
pub mod orders;
pub mod products;
pub mod stores;
pub mod sub_clusters;
pub mod suppliers;
pub mod users;
pub mod verified_emails;

pub use audit_logs::Entity as AuditLogs;
pub use categories::Entity as Categories;
pub use clusters::Entity as Clusters;
pub use employees::Entity as Employees;
pub use order_details::Entity as OrderDetails;
pub use orders::Entity as Orders;
pub use products::Entity as Products;
pub use stores::Entity as Stores;
pub use sub_clusters::Entity as SubClusters;
pub use suppliers::Entity as Suppliers;
pub use users::Entity as Users;
pub use verified_emails::Entity as VerifiedEmails;
