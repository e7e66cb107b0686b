//! Admin route handlers.
//!
//! Minimal catalog management: a single form that creates a product
//! through the backend. There is no authentication layer here; the
//! deployment keeps these routes off the public network.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Form,
    extract::State,
    response::{IntoResponse, Redirect, Response},
};
use rust_decimal::Decimal;
use serde::Deserialize;
use tracing::instrument;

use school_merch_core::COLOR_KEYS;

use crate::backend::NewProduct;
use crate::error::Result;
use crate::routes::home::ColorOptionView;
use crate::state::AppState;

/// New product form template.
#[derive(Template, WebTemplate)]
#[template(path = "admin/new_product.html")]
pub struct NewProductTemplate {
    pub error: Option<String>,
    pub colors: Vec<ColorOptionView>,
}

impl NewProductTemplate {
    fn with_error(error: Option<String>) -> Self {
        Self {
            error,
            colors: COLOR_KEYS
                .iter()
                .map(|key| ColorOptionView::for_key(key.key))
                .collect(),
        }
    }
}

/// New product form data.
///
/// Colors arrive as one optional field per known color key because HTML
/// checkboxes only submit when checked.
#[derive(Debug, Deserialize)]
pub struct NewProductForm {
    pub title: String,
    pub category: String,
    pub base_price: Decimal,
    pub image: Option<String>,
    pub description: Option<String>,
    pub color_green: Option<String>,
    pub color_black: Option<String>,
    pub color_yellow: Option<String>,
    pub color_white: Option<String>,
}

impl NewProductForm {
    fn selected_colors(&self) -> Vec<String> {
        [
            ("green", &self.color_green),
            ("black", &self.color_black),
            ("yellow", &self.color_yellow),
            ("white", &self.color_white),
        ]
        .into_iter()
        .filter(|(_, checked)| checked.is_some())
        .map(|(key, _)| key.to_string())
        .collect()
    }
}

/// Display the new product form.
#[instrument]
pub async fn new_product_page() -> impl IntoResponse {
    NewProductTemplate::with_error(None)
}

/// Create a product and redirect back to the store page.
///
/// Form-level validation failures re-render the form with an inline
/// error; backend failures propagate as a gateway error.
#[instrument(skip(state))]
pub async fn create_product(
    State(state): State<AppState>,
    Form(form): Form<NewProductForm>,
) -> Result<Response> {
    let title = form.title.trim();
    if title.is_empty() {
        return Ok(NewProductTemplate::with_error(Some(
            "Title is required".to_string(),
        ))
        .into_response());
    }

    let colors = form.selected_colors();
    if colors.is_empty() {
        return Ok(NewProductTemplate::with_error(Some(
            "Pick at least one color".to_string(),
        ))
        .into_response());
    }

    let category = form.category.trim();
    let category = if category.is_empty() {
        "other".to_string()
    } else {
        category.to_lowercase()
    };

    let product = NewProduct {
        title: title.to_string(),
        category,
        description: form
            .description
            .map(|d| d.trim().to_string())
            .unwrap_or_default(),
        base_price: form.base_price,
        colors,
        images: form
            .image
            .map(|url| url.trim().to_string())
            .filter(|url| !url.is_empty())
            .into_iter()
            .collect(),
        in_stock: true,
    };

    let created = state.backend().create_product(&product).await?;
    tracing::info!(product_id = %created.id, title = %created.title, "Product created");

    Ok(Redirect::to("/").into_response())
}
