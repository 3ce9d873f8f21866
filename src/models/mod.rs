mod product;
mod validation;

pub use product::*;
pub use validation::{FieldError, ValidationFailure, validate_create, validate_update};
