use std::fmt;

use rust_decimal::{Decimal, dec};

use crate::models::{
    Category, Color, CreateProductRequest, NewProduct, ProductChanges, UpdateProductRequest,
};

const WEIGHT_MIN: Decimal = dec!(0.001);
const WEIGHT_MAX: Decimal = dec!(1000);
const PRICE_MIN: Decimal = dec!(0.01);
const PRICE_MAX: Decimal = dec!(999999.99);

/// A single field-level constraint violation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldError {
    Missing(&'static str),
    InvalidEnum { field: &'static str, value: String },
    OutOfRange { field: &'static str, detail: &'static str },
    Precision { field: &'static str },
}

impl fmt::Display for FieldError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldError::Missing(field) => write!(f, "{} is required", field),
            FieldError::InvalidEnum { field, value } => {
                write!(f, "{} '{}' is not a valid value", field, value)
            }
            FieldError::OutOfRange { field, detail } => write!(f, "{} {}", field, detail),
            FieldError::Precision { field } => {
                write!(f, "{} must have at most 2 decimal places", field)
            }
        }
    }
}

/// All constraint violations found in one payload, reported together as a
/// single aggregated message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationFailure {
    pub errors: Vec<FieldError>,
}

impl fmt::Display for ValidationFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let joined = self
            .errors
            .iter()
            .map(|e| e.to_string())
            .collect::<Vec<_>>()
            .join(", ");
        write!(f, "Validation error: {}", joined)
    }
}

fn check_product_name(raw: &str) -> Result<String, FieldError> {
    let trimmed = raw.trim();
    let len = trimmed.chars().count();
    if len < 2 || len > 100 {
        return Err(FieldError::OutOfRange {
            field: "productName",
            detail: "must be between 2 and 100 characters",
        });
    }
    Ok(trimmed.to_string())
}

fn check_description(raw: &str) -> Result<String, FieldError> {
    let trimmed = raw.trim();
    let len = trimmed.chars().count();
    if len < 5 || len > 500 {
        return Err(FieldError::OutOfRange {
            field: "description",
            detail: "must be between 5 and 500 characters",
        });
    }
    Ok(trimmed.to_string())
}

fn check_color(raw: &str) -> Result<Color, FieldError> {
    Color::parse(raw).ok_or_else(|| FieldError::InvalidEnum {
        field: "color",
        value: raw.trim().to_string(),
    })
}

fn check_category(raw: &str) -> Result<Category, FieldError> {
    Category::parse(raw).ok_or_else(|| FieldError::InvalidEnum {
        field: "category",
        value: raw.trim().to_string(),
    })
}

fn check_weight(weight: Decimal) -> Result<Decimal, FieldError> {
    if weight <= Decimal::ZERO {
        return Err(FieldError::OutOfRange {
            field: "weight",
            detail: "must be a positive value",
        });
    }
    if weight < WEIGHT_MIN || weight > WEIGHT_MAX {
        return Err(FieldError::OutOfRange {
            field: "weight",
            detail: "must be between 0.001 and 1000",
        });
    }
    Ok(weight)
}

fn check_price(price: Decimal) -> Result<Decimal, FieldError> {
    if price < PRICE_MIN || price > PRICE_MAX {
        return Err(FieldError::OutOfRange {
            field: "price",
            detail: "must be between 0.01 and 999999.99",
        });
    }
    // Rounding to 2 decimal places must be lossless.
    if price.round_dp(2) != price {
        return Err(FieldError::Precision { field: "price" });
    }
    Ok(price)
}

fn check_stock_quantity(quantity: i32) -> Result<i32, FieldError> {
    if quantity < 0 {
        return Err(FieldError::OutOfRange {
            field: "stockQuantity",
            detail: "cannot be negative",
        });
    }
    Ok(quantity)
}

fn collect<T>(checked: Result<T, FieldError>, errors: &mut Vec<FieldError>) -> Option<T> {
    match checked {
        Ok(value) => Some(value),
        Err(e) => {
            errors.push(e);
            None
        }
    }
}

/// Validate a create payload. Missing required fields and per-field
/// violations are all collected before reporting.
pub fn validate_create(req: &CreateProductRequest) -> Result<NewProduct, ValidationFailure> {
    let mut errors = Vec::new();

    let product_name = match &req.product_name {
        Some(raw) => collect(check_product_name(raw), &mut errors),
        None => {
            errors.push(FieldError::Missing("productName"));
            None
        }
    };
    let description = match &req.description {
        Some(raw) => collect(check_description(raw), &mut errors),
        None => {
            errors.push(FieldError::Missing("description"));
            None
        }
    };
    let color = match &req.color {
        Some(raw) => collect(check_color(raw), &mut errors),
        None => {
            errors.push(FieldError::Missing("color"));
            None
        }
    };
    let weight = match req.weight {
        Some(value) => collect(check_weight(value), &mut errors),
        None => {
            errors.push(FieldError::Missing("weight"));
            None
        }
    };
    let category = match &req.category {
        Some(raw) => collect(check_category(raw), &mut errors),
        None => {
            errors.push(FieldError::Missing("category"));
            None
        }
    };
    let price = match req.price {
        Some(value) => collect(check_price(value), &mut errors),
        None => {
            errors.push(FieldError::Missing("price"));
            None
        }
    };
    let stock_quantity = collect(
        check_stock_quantity(req.stock_quantity.unwrap_or(0)),
        &mut errors,
    );

    match (
        product_name,
        description,
        color,
        weight,
        category,
        price,
        stock_quantity,
    ) {
        (
            Some(product_name),
            Some(description),
            Some(color),
            Some(weight),
            Some(category),
            Some(price),
            Some(stock_quantity),
        ) if errors.is_empty() => Ok(NewProduct {
            product_name,
            description,
            color,
            weight,
            category,
            price,
            stock_quantity,
        }),
        _ => Err(ValidationFailure { errors }),
    }
}

/// Validate the fields present in a partial update. Absent fields are left
/// untouched; present ones must satisfy the same constraints as on create.
pub fn validate_update(req: &UpdateProductRequest) -> Result<ProductChanges, ValidationFailure> {
    let mut errors = Vec::new();

    let changes = ProductChanges {
        product_name: req
            .product_name
            .as_deref()
            .and_then(|raw| collect(check_product_name(raw), &mut errors)),
        description: req
            .description
            .as_deref()
            .and_then(|raw| collect(check_description(raw), &mut errors)),
        color: req
            .color
            .as_deref()
            .and_then(|raw| collect(check_color(raw), &mut errors)),
        weight: req
            .weight
            .and_then(|value| collect(check_weight(value), &mut errors)),
        category: req
            .category
            .as_deref()
            .and_then(|raw| collect(check_category(raw), &mut errors)),
        price: req
            .price
            .and_then(|value| collect(check_price(value), &mut errors)),
        stock_quantity: req
            .stock_quantity
            .and_then(|value| collect(check_stock_quantity(value), &mut errors)),
    };

    if errors.is_empty() {
        Ok(changes)
    } else {
        Err(ValidationFailure { errors })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid_request() -> CreateProductRequest {
        CreateProductRequest {
            product_name: Some("Camisa Azul".to_string()),
            description: Some("Camisa de algodão".to_string()),
            color: Some("azul".to_string()),
            weight: Some(dec!(0.3)),
            category: Some("vestuario".to_string()),
            price: Some(dec!(49.90)),
            stock_quantity: None,
        }
    }

    #[test]
    fn accepts_valid_create_payload() {
        let product = validate_create(&valid_request()).unwrap();
        assert_eq!(product.product_name, "Camisa Azul");
        assert_eq!(product.color, Color::Azul);
        assert_eq!(product.category, Category::Vestuario);
        assert_eq!(product.stock_quantity, 0);
    }

    #[test]
    fn reports_every_missing_field_at_once() {
        let req = CreateProductRequest {
            product_name: None,
            description: None,
            color: None,
            weight: None,
            category: None,
            price: None,
            stock_quantity: None,
        };

        let failure = validate_create(&req).unwrap_err();
        let missing: Vec<_> = failure
            .errors
            .iter()
            .filter(|e| matches!(e, FieldError::Missing(_)))
            .collect();
        assert_eq!(missing.len(), 6);

        let message = failure.to_string();
        assert!(message.contains("productName is required"));
        assert!(message.contains("price is required"));
    }

    #[test]
    fn trims_name_and_description() {
        let mut req = valid_request();
        req.product_name = Some("  Camisa Azul  ".to_string());
        req.description = Some(" Camisa de algodão ".to_string());

        let product = validate_create(&req).unwrap();
        assert_eq!(product.product_name, "Camisa Azul");
        assert_eq!(product.description, "Camisa de algodão");
    }

    #[test]
    fn rejects_short_name_after_trimming() {
        let mut req = valid_request();
        req.product_name = Some("  a  ".to_string());

        let failure = validate_create(&req).unwrap_err();
        assert_eq!(
            failure.errors,
            vec![FieldError::OutOfRange {
                field: "productName",
                detail: "must be between 2 and 100 characters",
            }]
        );
    }

    #[test]
    fn rejects_unknown_enum_values() {
        let mut req = valid_request();
        req.color = Some("roxo-escuro".to_string());
        req.category = Some("moveis".to_string());

        let failure = validate_create(&req).unwrap_err();
        assert_eq!(failure.errors.len(), 2);
        assert!(failure.to_string().contains("color 'roxo-escuro'"));
        assert!(failure.to_string().contains("category 'moveis'"));
    }

    #[test]
    fn price_precision_boundaries() {
        let mut req = valid_request();
        req.price = Some(dec!(19.99));
        assert!(validate_create(&req).is_ok());

        req.price = Some(dec!(19.999));
        let failure = validate_create(&req).unwrap_err();
        assert_eq!(failure.errors, vec![FieldError::Precision { field: "price" }]);
    }

    #[test]
    fn price_range_boundaries() {
        let mut req = valid_request();
        req.price = Some(dec!(0.01));
        assert!(validate_create(&req).is_ok());

        req.price = Some(dec!(999999.99));
        assert!(validate_create(&req).is_ok());

        req.price = Some(dec!(0.001));
        assert!(validate_create(&req).is_err());

        req.price = Some(dec!(1000000.00));
        assert!(validate_create(&req).is_err());
    }

    #[test]
    fn weight_boundaries() {
        let mut req = valid_request();
        req.weight = Some(dec!(0.001));
        assert!(validate_create(&req).is_ok());

        req.weight = Some(dec!(1000));
        assert!(validate_create(&req).is_ok());

        req.weight = Some(dec!(0));
        let failure = validate_create(&req).unwrap_err();
        assert_eq!(
            failure.errors,
            vec![FieldError::OutOfRange {
                field: "weight",
                detail: "must be a positive value",
            }]
        );

        req.weight = Some(dec!(1000.001));
        assert!(validate_create(&req).is_err());
    }

    #[test]
    fn negative_stock_is_rejected() {
        let mut req = valid_request();
        req.stock_quantity = Some(-1);

        let failure = validate_create(&req).unwrap_err();
        assert_eq!(
            failure.errors,
            vec![FieldError::OutOfRange {
                field: "stockQuantity",
                detail: "cannot be negative",
            }]
        );
    }

    #[test]
    fn update_validates_only_present_fields() {
        let req = UpdateProductRequest {
            price: Some(dec!(12.34)),
            ..Default::default()
        };

        let changes = validate_update(&req).unwrap();
        assert_eq!(changes.price, Some(dec!(12.34)));
        assert!(changes.product_name.is_none());
    }

    #[test]
    fn update_rejects_invalid_enum() {
        let req = UpdateProductRequest {
            color: Some("roxo-escuro".to_string()),
            ..Default::default()
        };

        let failure = validate_update(&req).unwrap_err();
        assert_eq!(
            failure.errors,
            vec![FieldError::InvalidEnum {
                field: "color",
                value: "roxo-escuro".to_string(),
            }]
        );
    }

    #[test]
    fn aggregated_message_joins_all_errors() {
        let mut req = valid_request();
        req.price = Some(dec!(19.999));
        req.weight = Some(dec!(0));

        let message = validate_create(&req).unwrap_err().to_string();
        assert!(message.starts_with("Validation error: "));
        assert!(message.contains("weight must be a positive value"));
        assert!(message.contains("price must have at most 2 decimal places"));
    }
}
