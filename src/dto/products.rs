use axum::http::Method;
use serde::Serialize;
use utoipa::ToSchema;
use uuid::Uuid;

use crate::{
    models::{Category, Product, Supplier},
    validation::{ActionInput, FieldErrors, FormData},
};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProductInput {
    pub category_id: i32,
    pub supplier_id: i32,
    pub product_name: String,
    pub price: i64,
    pub description: String,
}

impl ProductInput {
    fn parse(form: &FormData, errors: &mut FieldErrors) -> Self {
        let input = Self {
            product_name: form.required("product_name", "Product Name is Required", errors),
            category_id: form.parse("category_id", "Category Id is Required", errors),
            supplier_id: form.parse("supplier_id", "Supplier Id is Required", errors),
            price: form.parse("price", "Price is Required", errors),
            description: form.required("description", "Description is Required", errors),
        };
        if input.price < 0 {
            errors.add("price", "Price must not be negative");
        }
        input
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProductAction {
    Create(ProductInput),
    Update { product_id: i32, input: ProductInput },
    Delete { product_id: i32 },
}

impl ProductAction {
    pub fn method(&self) -> Method {
        match self {
            ProductAction::Create(_) => Method::POST,
            ProductAction::Update { .. } => Method::PUT,
            ProductAction::Delete { .. } => Method::DELETE,
        }
    }
}

impl ActionInput for ProductAction {
    fn parse(form: &FormData) -> Result<Self, FieldErrors> {
        let mut errors = FieldErrors::new();
        let action = match form.get("action") {
            Some("createProduct") => ProductAction::Create(ProductInput::parse(form, &mut errors)),
            Some("updateProduct") => ProductAction::Update {
                product_id: form.parse("product_id", "Product Id is Required", &mut errors),
                input: ProductInput::parse(form, &mut errors),
            },
            Some("deleteProduct") => ProductAction::Delete {
                product_id: form.parse("product_id", "Product Id is Required", &mut errors),
            },
            _ => return Err(FieldErrors::single("action", "Method Not Allowed")),
        };
        errors.check()?;
        Ok(action)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CategoryAction {
    Create { category_name: String },
    Update { category_id: i32, category_name: String },
    Delete { category_id: i32 },
}

impl CategoryAction {
    pub fn method(&self) -> Method {
        match self {
            CategoryAction::Create { .. } => Method::POST,
            CategoryAction::Update { .. } => Method::PUT,
            CategoryAction::Delete { .. } => Method::DELETE,
        }
    }
}

impl ActionInput for CategoryAction {
    fn parse(form: &FormData) -> Result<Self, FieldErrors> {
        const NAME_REQUIRED: &str = "Category Name is Require";
        const ID_REQUIRED: &str = "Category Id is Require";

        let mut errors = FieldErrors::new();
        let action = match form.get("action") {
            Some("createCategory") => CategoryAction::Create {
                category_name: form.required("category_name", NAME_REQUIRED, &mut errors),
            },
            Some("updateCategory") => CategoryAction::Update {
                category_id: form.parse("category_id", ID_REQUIRED, &mut errors),
                category_name: form.required("category_name", NAME_REQUIRED, &mut errors),
            },
            Some("deleteCategory") => CategoryAction::Delete {
                category_id: form.parse("category_id", ID_REQUIRED, &mut errors),
            },
            _ => return Err(FieldErrors::single("action", "Method Not Allowed")),
        };
        errors.check()?;
        Ok(action)
    }
}

#[derive(Serialize, ToSchema)]
#[serde(transparent)]
pub struct ProductList {
    #[schema(value_type = Vec<Product>)]
    pub items: Vec<Product>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct ProductPage {
    pub user_id: Uuid,
    pub product: Vec<Product>,
    pub category: Vec<Category>,
    pub supplier: Vec<Supplier>,
}
