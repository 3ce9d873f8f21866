use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A catalog product as persisted in the `products` table. Soft-deleted
/// records stay in the table with `is_active = false`.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: i32,
    pub product_name: String,
    pub description: String,
    pub color: String,
    pub weight: Decimal,
    pub category: String,
    pub price: Decimal,
    pub registration_date: DateTime<Utc>,
    pub last_update: DateTime<Utc>,
    pub is_active: bool,
    pub stock_quantity: i32,
}

/// Allowed product colors, stored lowercased.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Color {
    Branco,
    Preto,
    Azul,
    Vermelho,
    Verde,
    Amarelo,
    Rosa,
    Roxo,
    Laranja,
    Marrom,
    Cinza,
    Bege,
    Multicolor,
}

impl Color {
    /// Case-insensitive parse; surrounding whitespace is ignored.
    pub fn parse(input: &str) -> Option<Self> {
        match input.trim().to_lowercase().as_str() {
            "branco" => Some(Color::Branco),
            "preto" => Some(Color::Preto),
            "azul" => Some(Color::Azul),
            "vermelho" => Some(Color::Vermelho),
            "verde" => Some(Color::Verde),
            "amarelo" => Some(Color::Amarelo),
            "rosa" => Some(Color::Rosa),
            "roxo" => Some(Color::Roxo),
            "laranja" => Some(Color::Laranja),
            "marrom" => Some(Color::Marrom),
            "cinza" => Some(Color::Cinza),
            "bege" => Some(Color::Bege),
            "multicolor" => Some(Color::Multicolor),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Color::Branco => "branco",
            Color::Preto => "preto",
            Color::Azul => "azul",
            Color::Vermelho => "vermelho",
            Color::Verde => "verde",
            Color::Amarelo => "amarelo",
            Color::Rosa => "rosa",
            Color::Roxo => "roxo",
            Color::Laranja => "laranja",
            Color::Marrom => "marrom",
            Color::Cinza => "cinza",
            Color::Bege => "bege",
            Color::Multicolor => "multicolor",
        }
    }
}

/// Allowed product categories, stored lowercased.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Category {
    Vestuario,
    Calcado,
    Acessorio,
    Eletronico,
    Casa,
    Beleza,
    Esporte,
    Livro,
    Brinquedo,
    Outros,
}

impl Category {
    /// Case-insensitive parse; surrounding whitespace is ignored.
    pub fn parse(input: &str) -> Option<Self> {
        match input.trim().to_lowercase().as_str() {
            "vestuario" => Some(Category::Vestuario),
            "calcado" => Some(Category::Calcado),
            "acessorio" => Some(Category::Acessorio),
            "eletronico" => Some(Category::Eletronico),
            "casa" => Some(Category::Casa),
            "beleza" => Some(Category::Beleza),
            "esporte" => Some(Category::Esporte),
            "livro" => Some(Category::Livro),
            "brinquedo" => Some(Category::Brinquedo),
            "outros" => Some(Category::Outros),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Vestuario => "vestuario",
            Category::Calcado => "calcado",
            Category::Acessorio => "acessorio",
            Category::Eletronico => "eletronico",
            Category::Casa => "casa",
            Category::Beleza => "beleza",
            Category::Esporte => "esporte",
            Category::Livro => "livro",
            Category::Brinquedo => "brinquedo",
            Category::Outros => "outros",
        }
    }
}

/// Create payload. Every field is optional so the validator can report all
/// missing required fields in a single aggregated failure.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateProductRequest {
    pub product_name: Option<String>,
    pub description: Option<String>,
    pub color: Option<String>,
    pub weight: Option<Decimal>,
    pub category: Option<String>,
    pub price: Option<Decimal>,
    pub stock_quantity: Option<i32>,
}

/// Update payload. `id`, `registrationDate`, `lastUpdate` and `isActive`
/// have no field here, so they are silently dropped when present in the
/// request body.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateProductRequest {
    pub product_name: Option<String>,
    pub description: Option<String>,
    pub color: Option<String>,
    pub weight: Option<Decimal>,
    pub category: Option<String>,
    pub price: Option<Decimal>,
    pub stock_quantity: Option<i32>,
}

/// A fully validated create payload, ready to be inserted.
#[derive(Debug, Clone)]
pub struct NewProduct {
    pub product_name: String,
    pub description: String,
    pub color: Color,
    pub weight: Decimal,
    pub category: Category,
    pub price: Decimal,
    pub stock_quantity: i32,
}

/// A validated partial update. Absent fields keep their stored value.
#[derive(Debug, Clone, Default)]
pub struct ProductChanges {
    pub product_name: Option<String>,
    pub description: Option<String>,
    pub color: Option<Color>,
    pub weight: Option<Decimal>,
    pub category: Option<Category>,
    pub price: Option<Decimal>,
    pub stock_quantity: Option<i32>,
}

#[derive(Debug, Serialize)]
pub struct ProductEnvelope {
    pub success: bool,
    pub data: Option<Product>,
    pub message: String,
}

#[derive(Debug, Serialize)]
pub struct ProductListEnvelope {
    pub success: bool,
    pub data: Vec<Product>,
    pub count: usize,
    pub message: String,
}
