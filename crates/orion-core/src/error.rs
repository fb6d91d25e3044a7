//! # Error Types
//!
//! Domain-specific error types for orion-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  orion-core errors (this file)                                         │
//! │  ├── CoreError        - Business rule violations                       │
//! │  └── ValidationError  - Input validation failures                      │
//! │                                                                         │
//! │  orion-store errors                                                    │
//! │  └── StoreError       - Local key/value slot failures, workflows       │
//! │                                                                         │
//! │  orion-pos errors                                                      │
//! │  └── PosError         - POS HTTP / config failures (toast line)        │
//! │                                                                         │
//! │  Flow: ValidationError → CoreError → StoreError                        │
//! │        PosError → user_message() → Toast                               │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Plain store mutators never fail: an unknown id is a silent no-op. The
//! variants below come from the stricter paths (status transitions,
//! request responses, purchase-order workflows).

use thiserror::Error;

use crate::types::{OrderStatus, RequestStatus};

// =============================================================================
// Core Error
// =============================================================================

/// Core business logic errors.
#[derive(Debug, Error)]
pub enum CoreError {
    /// Product cannot be found in the catalog.
    #[error("Product not found: {0}")]
    ProductNotFound(String),

    /// Order cannot be found.
    #[error("Order not found: {0}")]
    OrderNotFound(String),

    /// Wholesaler request cannot be found.
    #[error("Wholesaler request not found: {0}")]
    RequestNotFound(String),

    /// Company cannot be found.
    #[error("Company not found: {0}")]
    CompanyNotFound(String),

    /// Order status change outside the transition table.
    ///
    /// ## Transition Table
    /// ```text
    /// pending ──► processing ──► shipped ──► delivered
    ///    │            │             │
    ///    └────────────┴─────────────┴──► cancelled
    /// ```
    #[error("Order {order_id} cannot move from {from} to {to}")]
    InvalidStatusTransition {
        order_id: String,
        from: OrderStatus,
        to: OrderStatus,
    },

    /// Request was already approved or rejected.
    #[error("Wholesaler request {request_id} is already {status}")]
    RequestAlreadyResolved {
        request_id: String,
        status: RequestStatus,
    },

    /// Only the wholesaler a request is addressed to may answer it.
    #[error("Wholesaler request {request_id} is not addressed to user {user_id}")]
    NotAddressee { request_id: String, user_id: String },

    /// Selection names a product the request never offered.
    #[error("Product {product_id} is not offered in wholesaler request {request_id}")]
    ProductNotInRequest {
        request_id: String,
        product_id: String,
    },

    /// Approving a request or placing an order with nothing selected.
    #[error("Please select at least one product")]
    EmptySelection,

    /// Validation error (wraps ValidationError).
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),
}

// =============================================================================
// Validation Error
// =============================================================================

/// Input validation errors.
#[derive(Debug, Error)]
pub enum ValidationError {
    /// A required field is missing or empty.
    #[error("{field} is required")]
    Required { field: String },

    /// Field value is too long.
    #[error("{field} must be at most {max} characters")]
    TooLong { field: String, max: usize },

    /// Numeric value is out of range.
    #[error("{field} must be between {min} and {max}")]
    OutOfRange { field: String, min: i64, max: i64 },

    /// Value must be positive.
    #[error("{field} must be positive")]
    MustBePositive { field: String },

    /// Invalid format (e.g., PAN with letters, malformed email).
    #[error("{field} has invalid format: {reason}")]
    InvalidFormat { field: String, reason: String },
}

// =============================================================================
// Result Type Alias
// =============================================================================

/// Convenience type alias for Results with CoreError.
pub type CoreResult<T> = Result<T, CoreError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_transition_error_message() {
        let err = CoreError::InvalidStatusTransition {
            order_id: "1".to_string(),
            from: OrderStatus::Delivered,
            to: OrderStatus::Pending,
        };
        assert_eq!(err.to_string(), "Order 1 cannot move from delivered to pending");
    }

    #[test]
    fn test_validation_error_messages() {
        let err = ValidationError::Required {
            field: "sku".to_string(),
        };
        assert_eq!(err.to_string(), "sku is required");

        let err = ValidationError::TooLong {
            field: "name".to_string(),
            max: 200,
        };
        assert_eq!(err.to_string(), "name must be at most 200 characters");
    }

    #[test]
    fn test_validation_converts_to_core_error() {
        let validation_err = ValidationError::Required {
            field: "sku".to_string(),
        };
        let core_err: CoreError = validation_err.into();
        assert!(matches!(core_err, CoreError::Validation(_)));
    }
}
