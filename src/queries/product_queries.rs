use sqlx::PgPool;

use crate::{
    error::Result,
    models::{NewProduct, Product, ProductChanges},
};

/// The two shapes a lookup term can take. A term is id-shaped when it parses
/// as a positive record identifier; anything else is treated as a name
/// fragment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SearchTerm {
    Id(i32),
    Name(String),
}

impl SearchTerm {
    pub fn classify(raw: &str) -> Self {
        let trimmed = raw.trim();
        match trimmed.parse::<i32>() {
            Ok(id) if id > 0 => SearchTerm::Id(id),
            _ => SearchTerm::Name(trimmed.to_string()),
        }
    }
}

/// All active products, newest registrations first.
pub async fn list_active(pool: &PgPool) -> Result<Vec<Product>> {
    let products = sqlx::query_as::<_, Product>(
        "SELECT * FROM products WHERE is_active = true ORDER BY registration_date DESC",
    )
    .fetch_all(pool)
    .await?;

    Ok(products)
}

/// Resolve a lookup term against active products. Id-shaped terms try an
/// identifier match first and fall back to the name search; everything else
/// goes straight to a case-insensitive substring match on the name.
pub async fn find_by_id_or_name(pool: &PgPool, term: &str) -> Result<Option<Product>> {
    match SearchTerm::classify(term) {
        SearchTerm::Id(id) => {
            if let Some(product) = find_active_by_id(pool, id).await? {
                return Ok(Some(product));
            }
            find_active_by_name_like(pool, term.trim()).await
        }
        SearchTerm::Name(name) => find_active_by_name_like(pool, &name).await,
    }
}

pub async fn find_active_by_id(pool: &PgPool, id: i32) -> Result<Option<Product>> {
    let product =
        sqlx::query_as::<_, Product>("SELECT * FROM products WHERE id = $1 AND is_active = true")
            .bind(id)
            .fetch_optional(pool)
            .await?;

    Ok(product)
}

async fn find_active_by_name_like(pool: &PgPool, fragment: &str) -> Result<Option<Product>> {
    let product = sqlx::query_as::<_, Product>(
        "SELECT * FROM products
         WHERE is_active = true AND product_name ILIKE $1
         ORDER BY registration_date DESC
         LIMIT 1",
    )
    .bind(format!("%{}%", fragment))
    .fetch_optional(pool)
    .await?;

    Ok(product)
}

/// Exact case-insensitive name match among active products. Used by the
/// service duplicate pre-check, which is stricter than the substring search.
pub async fn find_active_by_name(pool: &PgPool, name: &str) -> Result<Option<Product>> {
    let product = sqlx::query_as::<_, Product>(
        "SELECT * FROM products
         WHERE is_active = true AND LOWER(product_name) = LOWER($1)",
    )
    .bind(name)
    .fetch_optional(pool)
    .await?;

    Ok(product)
}

/// Persist a validated product. The store assigns the identifier and both
/// timestamps, and new records start active.
pub async fn insert(pool: &PgPool, product: &NewProduct) -> Result<Product> {
    let created = sqlx::query_as::<_, Product>(
        "INSERT INTO products
             (product_name, description, color, weight, category, price, stock_quantity)
         VALUES ($1, $2, $3, $4, $5, $6, $7)
         RETURNING *",
    )
    .bind(&product.product_name)
    .bind(&product.description)
    .bind(product.color.as_str())
    .bind(product.weight)
    .bind(product.category.as_str())
    .bind(product.price)
    .bind(product.stock_quantity)
    .fetch_one(pool)
    .await?;

    Ok(created)
}

/// Apply a validated partial update. `registration_date` is never touched,
/// `last_update` always is. Inactive records are updatable too.
pub async fn update(pool: &PgPool, id: i32, changes: &ProductChanges) -> Result<Option<Product>> {
    let product = sqlx::query_as::<_, Product>(
        "UPDATE products SET
             product_name = COALESCE($2, product_name),
             description = COALESCE($3, description),
             color = COALESCE($4, color),
             weight = COALESCE($5, weight),
             category = COALESCE($6, category),
             price = COALESCE($7, price),
             stock_quantity = COALESCE($8, stock_quantity),
             last_update = now()
         WHERE id = $1
         RETURNING *",
    )
    .bind(id)
    .bind(changes.product_name.as_deref())
    .bind(changes.description.as_deref())
    .bind(changes.color.map(|c| c.as_str()))
    .bind(changes.weight)
    .bind(changes.category.map(|c| c.as_str()))
    .bind(changes.price)
    .bind(changes.stock_quantity)
    .fetch_optional(pool)
    .await?;

    Ok(product)
}

/// Soft delete: flip `is_active` off and refresh `last_update`, nothing else.
pub async fn deactivate(pool: &PgPool, id: i32) -> Result<Option<Product>> {
    let product = sqlx::query_as::<_, Product>(
        "UPDATE products SET is_active = false, last_update = now()
         WHERE id = $1
         RETURNING *",
    )
    .bind(id)
    .fetch_optional(pool)
    .await?;

    Ok(product)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn numeric_terms_are_id_shaped() {
        assert_eq!(SearchTerm::classify("42"), SearchTerm::Id(42));
        assert_eq!(SearchTerm::classify(" 7 "), SearchTerm::Id(7));
    }

    #[test]
    fn non_numeric_terms_search_by_name() {
        assert_eq!(
            SearchTerm::classify("Camisa Azul"),
            SearchTerm::Name("Camisa Azul".to_string())
        );
        assert_eq!(
            SearchTerm::classify("12abc"),
            SearchTerm::Name("12abc".to_string())
        );
    }

    #[test]
    fn non_positive_numbers_are_not_identifiers() {
        assert_eq!(SearchTerm::classify("0"), SearchTerm::Name("0".to_string()));
        assert_eq!(
            SearchTerm::classify("-3"),
            SearchTerm::Name("-3".to_string())
        );
        // Out of range for the store's id type.
        assert_eq!(
            SearchTerm::classify("99999999999999"),
            SearchTerm::Name("99999999999999".to_string())
        );
    }
}
