use utoipa::{
    Modify, OpenApi,
    openapi::{
        self,
        OpenApi as OpenApiSpec,
        security::{ApiKey, ApiKeyValue, SecurityScheme},
    },
};
use utoipa_scalar::{Scalar, Servable};

use crate::{
    dto::{
        auth::{CurrentUser, LoginPage, LoginRequest, LoginResponse},
        clusters::ClusterPage,
        employees::EmployeePage,
        orders::{
            CreateOrderRequest, OrderDetailPage, OrderLineRequest, OrderListPage, OrderWithDetails,
        },
        products::{ProductList, ProductPage},
        stores::StorePage,
        suppliers::SupplierPage,
    },
    entity::{employees::Gender, order_details::OrderStatus},
    models::{
        Category, Cluster, Employee, Order, OrderDetail, OrderHeader, Product, Store, SubCluster,
        Supplier, User,
    },
    response::{Ack, ApiResponse, Meta},
    routes::{api, auth, clusters, employees, health, orders, params, products, stores, suppliers},
    services::order_summary::OrderSummary,
    session::SESSION_COOKIE,
    validation::{FieldErrors, FormData},
};

struct SessionCookieAddon;

impl Modify for SessionCookieAddon {
    fn modify(&self, openapi: &mut openapi::OpenApi) {
        let components = openapi.components.get_or_insert_with(Default::default);
        components.add_security_scheme(
            "session_cookie",
            SecurityScheme::ApiKey(ApiKey::Cookie(ApiKeyValue::new(SESSION_COOKIE))),
        );
    }
}

#[derive(OpenApi)]
#[openapi(
    paths(
        health::health_check,
        auth::login_page,
        auth::login_action,
        auth::logout,
        auth::verify_email,
        auth::dashboard,
        auth::dashboard_action,
        api::login,
        api::list_products,
        api::create_order,
        clusters::cluster_loader,
        clusters::cluster_action,
        clusters::sub_cluster_action,
        stores::store_loader,
        stores::store_action,
        suppliers::supplier_loader,
        suppliers::supplier_action,
        products::product_loader,
        products::product_action,
        products::category_action,
        employees::employee_loader,
        employees::employee_action,
        orders::order_loader,
        orders::order_action,
        orders::order_detail_loader,
        orders::order_detail_action
    ),
    components(
        schemas(
            User,
            Cluster,
            SubCluster,
            Store,
            Supplier,
            Category,
            Product,
            Employee,
            Gender,
            Order,
            OrderHeader,
            OrderDetail,
            OrderStatus,
            OrderSummary,
            LoginRequest,
            LoginResponse,
            LoginPage,
            CurrentUser,
            CreateOrderRequest,
            OrderLineRequest,
            ClusterPage,
            StorePage,
            SupplierPage,
            ProductPage,
            ProductList,
            EmployeePage,
            OrderListPage,
            OrderDetailPage,
            OrderWithDetails,
            params::Pagination,
            params::ProductQuery,
            FieldErrors,
            FormData,
            Ack,
            Meta,
            ApiResponse<Ack>,
            ApiResponse<ProductList>,
            ApiResponse<OrderWithDetails>,
            ApiResponse<LoginResponse>
        )
    ),
    security(
        ("session_cookie" = [])
    ),
    modifiers(&SessionCookieAddon),
    tags(
        (name = "Health", description = "Health check endpoint"),
        (name = "Auth", description = "Login, registration, email verification and dashboard"),
        (name = "Api", description = "JSON endpoints for external clients"),
        (name = "Cluster", description = "Clusters and sub-clusters"),
        (name = "Store", description = "Stores"),
        (name = "Supplier", description = "Suppliers"),
        (name = "Product", description = "Products and categories"),
        (name = "Employee", description = "Employees and their accounts"),
        (name = "Order", description = "Orders and order lines"),
    )
)]
pub struct ApiDoc;

pub fn scalar_docs() -> Scalar<OpenApiSpec> {
    Scalar::with_url("/docs", ApiDoc::openapi())
}
