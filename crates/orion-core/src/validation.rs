//! # Validation Module
//!
//! Field checks used by the workflows (product forms, purchase orders,
//! request approval, company registration).
//!
//! ## Where Validation Runs
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Dashboard form ──► workflow (orion-store::workflows) ──► DomainStore  │
//! │                          │                                              │
//! │                          └── THIS MODULE                                │
//! │                                                                         │
//! │  The raw DomainStore mutators accept whatever they are given; only the │
//! │  workflow entry points validate.                                        │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use orion_core::validation::{validate_pan, validate_sku};
//!
//! validate_sku("DL-MNG-001").unwrap();
//! validate_pan("301234567").unwrap();
//! assert!(validate_pan("30123456X").is_err());
//! ```

use crate::error::ValidationError;
use crate::money::VatRate;
use crate::types::{NewProduct, SelectedProduct};
use crate::MAX_LINE_QUANTITY;

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

// =============================================================================
// String Validators
// =============================================================================

/// Validates a SKU.
///
/// ## Rules
/// - Must not be empty
/// - At most 50 characters
/// - Letters, digits, hyphens and underscores only
pub fn validate_sku(sku: &str) -> ValidationResult<()> {
    let sku = sku.trim();

    if sku.is_empty() {
        return Err(ValidationError::Required {
            field: "sku".to_string(),
        });
    }

    if sku.chars().count() > 50 {
        return Err(ValidationError::TooLong {
            field: "sku".to_string(),
            max: 50,
        });
    }

    if !sku
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
    {
        return Err(ValidationError::InvalidFormat {
            field: "sku".to_string(),
            reason: "must contain only letters, numbers, hyphens, and underscores".to_string(),
        });
    }

    Ok(())
}

/// Validates a product name (1..=200 characters after trimming).
pub fn validate_product_name(name: &str) -> ValidationResult<()> {
    let name = name.trim();

    if name.is_empty() {
        return Err(ValidationError::Required {
            field: "name".to_string(),
        });
    }

    if name.chars().count() > 200 {
        return Err(ValidationError::TooLong {
            field: "name".to_string(),
            max: 200,
        });
    }

    Ok(())
}

/// Validates a Permanent Account Number: exactly nine ASCII digits.
pub fn validate_pan(pan: &str) -> ValidationResult<()> {
    let pan = pan.trim();

    if pan.is_empty() {
        return Err(ValidationError::Required {
            field: "pan".to_string(),
        });
    }

    if pan.len() != 9 || !pan.bytes().all(|b| b.is_ascii_digit()) {
        return Err(ValidationError::InvalidFormat {
            field: "pan".to_string(),
            reason: "must be exactly 9 digits".to_string(),
        });
    }

    Ok(())
}

/// Loose email shape check: one `@`, non-empty local part, a dot in the
/// domain. Deliverability is not our problem.
pub fn validate_email(email: &str) -> ValidationResult<()> {
    let email = email.trim();

    if email.is_empty() {
        return Err(ValidationError::Required {
            field: "email".to_string(),
        });
    }

    let invalid = || ValidationError::InvalidFormat {
        field: "email".to_string(),
        reason: "must look like name@domain.tld".to_string(),
    };

    let (local, domain) = email.split_once('@').ok_or_else(invalid)?;
    if local.is_empty()
        || domain.contains('@')
        || !domain.contains('.')
        || domain.starts_with('.')
        || domain.ends_with('.')
        || email.chars().any(char::is_whitespace)
    {
        return Err(invalid());
    }

    Ok(())
}

/// Validates a search query. Empty is fine (matches everything).
///
/// ## Returns
/// The trimmed query.
pub fn validate_search_query(query: &str) -> ValidationResult<String> {
    let query = query.trim();

    if query.chars().count() > 100 {
        return Err(ValidationError::TooLong {
            field: "query".to_string(),
            max: 100,
        });
    }

    Ok(query.to_string())
}

// =============================================================================
// Numeric Validators
// =============================================================================

/// Validates an order line quantity (1..=MAX_LINE_QUANTITY).
pub fn validate_quantity(qty: u32) -> ValidationResult<()> {
    if qty == 0 {
        return Err(ValidationError::MustBePositive {
            field: "quantity".to_string(),
        });
    }

    if qty > MAX_LINE_QUANTITY {
        return Err(ValidationError::OutOfRange {
            field: "quantity".to_string(),
            min: 1,
            max: MAX_LINE_QUANTITY as i64,
        });
    }

    Ok(())
}

/// Validates a VAT rate (0 % to 100 %).
pub fn validate_vat_rate(rate: VatRate) -> ValidationResult<()> {
    if rate.bps() > 10_000 {
        return Err(ValidationError::OutOfRange {
            field: "vat_rate".to_string(),
            min: 0,
            max: 10_000,
        });
    }

    Ok(())
}

// =============================================================================
// Composite Validators
// =============================================================================

/// Validates a product selection: at least one entry, each quantity valid.
pub fn validate_selection(selected: &[SelectedProduct]) -> ValidationResult<()> {
    if selected.is_empty() {
        return Err(ValidationError::Required {
            field: "selected products".to_string(),
        });
    }

    for s in selected {
        validate_quantity(s.quantity)?;
    }

    Ok(())
}

/// Validates the user-entered fields of a product form.
pub fn validate_new_product(product: &NewProduct) -> ValidationResult<()> {
    validate_product_name(&product.name)?;
    validate_sku(&product.sku)?;
    validate_vat_rate(product.vat_rate)?;

    if product.price.is_negative() {
        return Err(ValidationError::OutOfRange {
            field: "price".to_string(),
            min: 0,
            max: i64::MAX,
        });
    }

    if let Some(pan) = &product.importer_pan {
        validate_pan(pan)?;
    }

    Ok(())
}
