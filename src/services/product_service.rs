use sqlx::PgPool;

use crate::{
    error::{AppError, Result},
    models::{
        CreateProductRequest, Product, UpdateProductRequest, ValidationFailure, validate_create,
        validate_update,
    },
    queries::product_queries::{self, SearchTerm},
};

/// Business-level outcome of a catalog operation. Expected failures are
/// variants here rather than errors; only store faults surface as `AppError`.
#[derive(Debug)]
pub enum Outcome<T> {
    Success(T),
    NotFound,
    DuplicateName(String),
    Invalid(ValidationFailure),
}

pub async fn list_products(pool: &PgPool) -> Result<Vec<Product>> {
    product_queries::list_active(pool).await
}

pub async fn find_product(pool: &PgPool, term: &str) -> Result<Outcome<Product>> {
    match product_queries::find_by_id_or_name(pool, term).await? {
        Some(product) => Ok(Outcome::Success(product)),
        None => Ok(Outcome::NotFound),
    }
}

/// Create a product. An exact case-insensitive name match among active
/// products is rejected before anything is persisted; the partial unique
/// index closes the remaining race window, so a unique violation from the
/// insert is reported as the same duplicate outcome.
pub async fn create_product(
    pool: &PgPool,
    req: &CreateProductRequest,
) -> Result<Outcome<Product>> {
    let new_product = match validate_create(req) {
        Ok(product) => product,
        Err(failure) => return Ok(Outcome::Invalid(failure)),
    };

    if let Some(existing) =
        product_queries::find_active_by_name(pool, &new_product.product_name).await?
    {
        return Ok(Outcome::DuplicateName(existing.product_name));
    }

    match product_queries::insert(pool, &new_product).await {
        Ok(created) => Ok(Outcome::Success(created)),
        Err(AppError::DatabaseError(e)) if is_unique_violation(&e) => {
            Ok(Outcome::DuplicateName(new_product.product_name))
        }
        Err(e) => Err(e),
    }
}

/// Apply a partial update. Inactive products remain updatable; an unknown
/// or non-id-shaped identifier resolves to not-found.
pub async fn update_product(
    pool: &PgPool,
    id: &str,
    req: &UpdateProductRequest,
) -> Result<Outcome<Product>> {
    let id = match SearchTerm::classify(id) {
        SearchTerm::Id(id) => id,
        SearchTerm::Name(_) => return Ok(Outcome::NotFound),
    };

    let changes = match validate_update(req) {
        Ok(changes) => changes,
        Err(failure) => return Ok(Outcome::Invalid(failure)),
    };

    match product_queries::update(pool, id, &changes).await {
        Ok(Some(updated)) => Ok(Outcome::Success(updated)),
        Ok(None) => Ok(Outcome::NotFound),
        Err(AppError::DatabaseError(e)) if is_unique_violation(&e) => {
            // Renamed onto another active product's name.
            Ok(Outcome::DuplicateName(
                changes.product_name.unwrap_or_default(),
            ))
        }
        Err(e) => Err(e),
    }
}

pub async fn deactivate_product(pool: &PgPool, id: &str) -> Result<Outcome<Product>> {
    let id = match SearchTerm::classify(id) {
        SearchTerm::Id(id) => id,
        SearchTerm::Name(_) => return Ok(Outcome::NotFound),
    };

    match product_queries::deactivate(pool, id).await? {
        Some(product) => Ok(Outcome::Success(product)),
        None => Ok(Outcome::NotFound),
    }
}

fn is_unique_violation(err: &sqlx::Error) -> bool {
    matches!(err, sqlx::Error::Database(db) if db.is_unique_violation())
}
