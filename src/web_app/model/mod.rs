// web_app/model/mod.rs - Shared data models for the product screen
//
// These types travel between the REST backend, the controller and
// whatever renders the view state.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::web_app::components::toast::Toast;

/// Product as exchanged with the REST backend
///
/// `id` is absent until the server has created the record.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Product {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    pub name: String,
    pub description: String,
    #[serde(with = "rust_decimal::serde::float")]
    pub price: Decimal,
    pub quantity: i64,
}

/// Product being edited in the dialog
///
/// Every field may be missing so that an empty "new" form and a partly
/// filled one are representable before validation.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ProductDraft {
    pub id: Option<i64>,
    pub name: Option<String>,
    pub description: Option<String>,
    pub price: Option<Decimal>,
    pub quantity: Option<i64>,
}

/// Reasons a draft is refused before any request is made
#[derive(Clone, Copy, Debug, Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("All fields are required and the price must be greater than or equal to 0")]
    MissingFields,

    #[error("Price and quantity must be greater than or equal to 0")]
    NegativeAmount,
}

impl ProductDraft {
    /// Check required fields, then signs, and build the product to submit
    pub fn validate(&self) -> Result<Product, ValidationError> {
        let name = non_blank(self.name.as_deref());
        let description = non_blank(self.description.as_deref());

        let (Some(name), Some(description), Some(price), Some(quantity)) =
            (name, description, self.price, self.quantity)
        else {
            return Err(ValidationError::MissingFields);
        };

        if price < Decimal::ZERO || quantity < 0 {
            return Err(ValidationError::NegativeAmount);
        }

        Ok(Product {
            id: self.id,
            name: name.to_string(),
            description: description.to_string(),
            price,
            quantity,
        })
    }

    pub fn is_new(&self) -> bool {
        self.id.is_none()
    }
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.trim().is_empty())
}

impl From<Product> for ProductDraft {
    fn from(product: Product) -> Self {
        Self {
            id: product.id,
            name: Some(product.name),
            description: Some(product.description),
            price: Some(product.price),
            quantity: Some(product.quantity),
        }
    }
}

/// Value of a text input change event (search box)
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct InputChange {
    pub value: String,
}

impl InputChange {
    pub fn new(value: impl Into<String>) -> Self {
        Self { value: value.into() }
    }

    /// Text worth sending as a filter, `None` when blank
    pub fn search_term(&self) -> Option<&str> {
        if self.value.trim().is_empty() {
            None
        } else {
            Some(&self.value)
        }
    }
}

/// Yes/no prompt shown before an irreversible action
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Confirmation {
    pub header: String,
    pub message: String,
    pub accept_label: String,
    pub reject_label: String,
}

impl Confirmation {
    pub fn delete_product(name: &str) -> Self {
        Self {
            header: "Confirmation".to_string(),
            message: format!("Are you sure you want to delete the product {}?", name),
            accept_label: "Yes".to_string(),
            reject_label: "No".to_string(),
        }
    }
}

/// Snapshot of everything the product screen renders
#[derive(Clone, Debug, Default)]
pub struct ViewState {
    pub products: Vec<Product>,
    pub draft: ProductDraft,
    pub dialog_open: bool,
    pub submitted: bool,
    pub loading: bool,
    pub saving: bool,
    pub toasts: Vec<Toast>,
}

impl ViewState {
    pub fn find(&self, id: i64) -> Option<&Product> {
        self.products.iter().find(|p| p.id == Some(id))
    }
}
