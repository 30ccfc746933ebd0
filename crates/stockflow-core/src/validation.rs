//! # Validation Module
//!
//! Input validation for the reconciliation engine.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Validation Layers                                  │
//! │                                                                         │
//! │  Layer 1: Presentation (browser forms)                                 │
//! │  ├── Basic format checks (empty, length)                               │
//! │  └── Immediate user feedback                                           │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 2: THIS MODULE, called by every engine operation                │
//! │  ├── The engine never trusts the caller's checks                       │
//! │  └── A direct API call hits the same rules as the UI                   │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use crate::error::ValidationError;

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

// =============================================================================
// String Validators
// =============================================================================

/// Validates a product name.
///
/// ## Rules
/// - Must not be empty after trimming
/// - Must be at most 200 characters
pub fn validate_product_name(name: &str) -> ValidationResult<()> {
    let name = name.trim();

    if name.is_empty() {
        return Err(ValidationError::Required {
            field: "name".to_string(),
        });
    }

    if name.len() > 200 {
        return Err(ValidationError::TooLong {
            field: "name".to_string(),
            max: 200,
        });
    }

    Ok(())
}

/// Validates a category name.
///
/// ## Rules
/// - Must not be empty after trimming
/// - Must be at most 50 characters
pub fn validate_category_name(name: &str) -> ValidationResult<()> {
    let name = name.trim();

    if name.is_empty() {
        return Err(ValidationError::Required {
            field: "category name".to_string(),
        });
    }

    if name.len() > 50 {
        return Err(ValidationError::TooLong {
            field: "category name".to_string(),
            max: 50,
        });
    }

    Ok(())
}

/// Validates a category badge color.
///
/// ## Rules
/// - Must be a `#RRGGBB` hex string (7 characters, leading `#`)
pub fn validate_color(color: &str) -> ValidationResult<()> {
    let valid = color.len() == 7
        && color.starts_with('#')
        && color[1..].chars().all(|c| c.is_ascii_hexdigit());

    if !valid {
        return Err(ValidationError::InvalidFormat {
            field: "color".to_string(),
            reason: "must be a #RRGGBB hex string".to_string(),
        });
    }

    Ok(())
}

// =============================================================================
// Numeric Validators
// =============================================================================

/// Validates a purchase/sale quantity.
///
/// ## Rules
/// - Must be positive (> 0). There is no upper bound: stock levels are
///   unbounded by design.
pub fn validate_quantity(qty: i64) -> ValidationResult<()> {
    if qty <= 0 {
        return Err(ValidationError::MustBePositive {
            field: "quantity".to_string(),
        });
    }

    Ok(())
}

/// Validates a unit price in cents.
///
/// ## Rules
/// - Must be non-negative (>= 0)
/// - Zero is allowed (giveaways, samples)
pub fn validate_unit_price_cents(cents: i64) -> ValidationResult<()> {
    if cents < 0 {
        return Err(ValidationError::OutOfRange {
            field: "unit price".to_string(),
            min: 0,
            max: i64::MAX,
        });
    }

    Ok(())
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_product_name() {
        assert!(validate_product_name("Widget 330ml").is_ok());
        assert!(validate_product_name("").is_err());
        assert!(validate_product_name("   ").is_err());
        assert!(validate_product_name(&"A".repeat(300)).is_err());
    }

    #[test]
    fn test_validate_category_name() {
        assert!(validate_category_name("Electronics").is_ok());
        assert!(validate_category_name("").is_err());
        assert!(validate_category_name(&"A".repeat(51)).is_err());
    }

    #[test]
    fn test_validate_color() {
        assert!(validate_color("#3B82F6").is_ok());
        assert!(validate_color("#abcdef").is_ok());
        assert!(validate_color("3B82F6").is_err());
        assert!(validate_color("#3B82F").is_err());
        assert!(validate_color("#GGGGGG").is_err());
    }

    #[test]
    fn test_validate_quantity() {
        assert!(validate_quantity(1).is_ok());
        assert!(validate_quantity(100_000).is_ok());

        assert!(validate_quantity(0).is_err());
        assert!(validate_quantity(-1).is_err());
    }

    #[test]
    fn test_validate_unit_price_cents() {
        assert!(validate_unit_price_cents(0).is_ok());
        assert!(validate_unit_price_cents(1099).is_ok());
        assert!(validate_unit_price_cents(-100).is_err());
    }
}
