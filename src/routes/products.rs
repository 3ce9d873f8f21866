use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};

use crate::{
    AppState,
    error::{AppError, Result},
    models::{
        CreateProductRequest, Product, ProductEnvelope, ProductListEnvelope, UpdateProductRequest,
    },
    services::{Outcome, product_service},
};

pub async fn list_products(State(state): State<AppState>) -> Result<Json<ProductListEnvelope>> {
    let products = product_service::list_products(&state.db).await?;

    Ok(Json(ProductListEnvelope {
        success: true,
        count: products.len(),
        data: products,
        message: "Products loaded successfully".to_string(),
    }))
}

pub async fn find_product(
    State(state): State<AppState>,
    Path(term): Path<String>,
) -> Result<(StatusCode, Json<ProductEnvelope>)> {
    let outcome = product_service::find_product(&state.db, &term).await?;

    Ok(envelope_for(outcome, StatusCode::OK, "Product found"))
}

pub async fn create_product(
    State(state): State<AppState>,
    Json(payload): Json<CreateProductRequest>,
) -> Result<(StatusCode, Json<ProductEnvelope>)> {
    let outcome = product_service::create_product(&state.db, &payload).await?;

    Ok(envelope_for(
        outcome,
        StatusCode::CREATED,
        "Product created successfully",
    ))
}

pub async fn update_product(
    State(state): State<AppState>,
    Path(param): Path<String>,
    Json(body): Json<serde_json::Value>,
) -> Result<(StatusCode, Json<ProductEnvelope>)> {
    let payload = parse_update_body(body)?;

    let outcome = product_service::update_product(&state.db, &param, &payload).await?;

    Ok(envelope_for(
        outcome,
        StatusCode::OK,
        "Product updated successfully",
    ))
}

/// A bodiless update is rejected, but a body whose keys are all protected
/// (`id`, `registrationDate`, ...) is accepted: the keys are stripped and the
/// touch still bumps `lastUpdate`. The emptiness check therefore runs on the
/// raw JSON keys, before unknown keys are dropped.
fn parse_update_body(body: serde_json::Value) -> Result<UpdateProductRequest> {
    match body.as_object() {
        Some(map) if !map.is_empty() => {}
        _ => {
            return Err(AppError::BadRequest(
                "No data provided for update".to_string(),
            ));
        }
    }

    serde_json::from_value(body)
        .map_err(|e| AppError::BadRequest(format!("Malformed update payload: {}", e)))
}

pub async fn deactivate_product(
    State(state): State<AppState>,
    Path(param): Path<String>,
) -> Result<(StatusCode, Json<ProductEnvelope>)> {
    let outcome = product_service::deactivate_product(&state.db, &param).await?;

    Ok(envelope_for(
        outcome,
        StatusCode::OK,
        "Product removed successfully",
    ))
}

/// Map a service outcome onto the uniform response envelope and its status
/// code. Expected business failures keep `success: false` bodies; they are
/// never transported as errors.
fn envelope_for(
    outcome: Outcome<Product>,
    success_status: StatusCode,
    success_message: &str,
) -> (StatusCode, Json<ProductEnvelope>) {
    match outcome {
        Outcome::Success(product) => (
            success_status,
            Json(ProductEnvelope {
                success: true,
                data: Some(product),
                message: success_message.to_string(),
            }),
        ),
        Outcome::NotFound => (
            StatusCode::NOT_FOUND,
            Json(ProductEnvelope {
                success: false,
                data: None,
                message: "Product not found".to_string(),
            }),
        ),
        Outcome::DuplicateName(name) => (
            StatusCode::CONFLICT,
            Json(ProductEnvelope {
                success: false,
                data: None,
                message: format!("A product named '{}' already exists", name),
            }),
        ),
        Outcome::Invalid(failure) => (
            StatusCode::BAD_REQUEST,
            Json(ProductEnvelope {
                success: false,
                data: None,
                message: failure.to_string(),
            }),
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{FieldError, ValidationFailure};
    use chrono::Utc;
    use rust_decimal::dec;

    fn sample_product() -> Product {
        let now = Utc::now();
        Product {
            id: 1,
            product_name: "Camisa Azul".to_string(),
            description: "Camisa de algodão".to_string(),
            color: "azul".to_string(),
            weight: dec!(0.3),
            category: "vestuario".to_string(),
            price: dec!(49.90),
            registration_date: now,
            last_update: now,
            is_active: true,
            stock_quantity: 0,
        }
    }

    #[test]
    fn success_uses_given_status_and_message() {
        let (status, Json(body)) = envelope_for(
            Outcome::Success(sample_product()),
            StatusCode::CREATED,
            "Product created successfully",
        );

        assert_eq!(status, StatusCode::CREATED);
        assert!(body.success);
        assert_eq!(body.message, "Product created successfully");
        assert_eq!(body.data.unwrap().id, 1);
    }

    #[test]
    fn not_found_is_a_failure_envelope() {
        let (status, Json(body)) =
            envelope_for(Outcome::NotFound, StatusCode::OK, "Product found");

        assert_eq!(status, StatusCode::NOT_FOUND);
        assert!(!body.success);
        assert!(body.data.is_none());
        assert_eq!(body.message, "Product not found");
    }

    #[test]
    fn duplicate_name_maps_to_conflict() {
        let (status, Json(body)) = envelope_for(
            Outcome::DuplicateName("Camisa Azul".to_string()),
            StatusCode::CREATED,
            "Product created successfully",
        );

        assert_eq!(status, StatusCode::CONFLICT);
        assert!(!body.success);
        assert!(body.message.contains("Camisa Azul"));
    }

    #[test]
    fn validation_failure_maps_to_bad_request() {
        let failure = ValidationFailure {
            errors: vec![FieldError::InvalidEnum {
                field: "color",
                value: "roxo-escuro".to_string(),
            }],
        };

        let (status, Json(body)) = envelope_for(
            Outcome::Invalid(failure),
            StatusCode::OK,
            "Product updated successfully",
        );

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(!body.success);
        assert!(body.message.contains("color 'roxo-escuro'"));
    }

    #[test]
    fn empty_update_body_is_rejected() {
        assert!(matches!(
            parse_update_body(serde_json::json!({})),
            Err(AppError::BadRequest(_))
        ));
        // Non-object bodies carry no data either.
        assert!(parse_update_body(serde_json::json!([1, 2])).is_err());
        assert!(parse_update_body(serde_json::json!(null)).is_err());
    }

    #[test]
    fn protected_keys_only_body_is_accepted_as_a_touch() {
        let req = parse_update_body(serde_json::json!({
            "id": 5,
            "registrationDate": "2020-01-01T00:00:00Z"
        }))
        .unwrap();

        assert!(req.product_name.is_none());
        assert!(req.price.is_none());
        assert!(req.stock_quantity.is_none());
    }

    #[test]
    fn malformed_update_field_is_a_bad_request() {
        let err = parse_update_body(serde_json::json!({ "weight": "heavy" })).unwrap_err();
        assert!(matches!(err, AppError::BadRequest(_)));
    }

    #[test]
    fn product_serializes_with_wire_field_names() {
        let value = serde_json::to_value(sample_product()).unwrap();
        assert!(value.get("productName").is_some());
        assert!(value.get("registrationDate").is_some());
        assert!(value.get("isActive").is_some());
        assert!(value.get("stockQuantity").is_some());
        assert!(value.get("product_name").is_none());
    }
}
