//! # Validation Module
//!
//! Input sanitization and business rule validation for MediPOS.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Validation Layers                                  │
//! │                                                                         │
//! │  Layer 1: Frontend form fields                                         │
//! │  ├── Raw text from numeric inputs                                      │
//! │  └── THIS MODULE: coerce_* turns raw text into safe numbers            │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 2: Record entry                                                 │
//! │  └── THIS MODULE: validate_* enforces business rules before saving     │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 3: Pricing / classification                                     │
//! │  └── Pure math over already-sanitized numbers (never fails)            │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The pricing engine only accepts numeric types. The coercion rules here
//! are the contract the engine relies on: a quantity field that fails to
//! parse (or is non-positive) becomes 1, an amount field that fails to
//! parse becomes 0.

use crate::error::ValidationError;
use crate::MAX_LINE_QUANTITY;

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

// =============================================================================
// Input Coercion
// =============================================================================

/// Coerces a raw quantity field to a billable quantity.
///
/// ## Rules
/// - Parses as an integer; non-numeric input becomes 1
/// - Non-positive values become 1 (a bill row always sells at least one unit)
///
/// Note: this masks an explicit "0" typed by the operator. Deliberately
/// preserved billing behavior; flagged as a UX concern, not a pricing one.
///
/// ## Example
/// ```rust
/// use medipos_core::validation::coerce_quantity;
///
/// assert_eq!(coerce_quantity("3"), 3);
/// assert_eq!(coerce_quantity(""), 1);
/// assert_eq!(coerce_quantity("abc"), 1);
/// assert_eq!(coerce_quantity("0"), 1);
/// assert_eq!(coerce_quantity("-2"), 1);
/// ```
pub fn coerce_quantity(raw: &str) -> i64 {
    raw.trim()
        .parse::<i64>()
        .ok()
        .filter(|q| *q > 0)
        .unwrap_or(1)
}

/// Coerces a raw amount/percentage field to a number.
///
/// ## Rules
/// - Parses as a float; non-numeric or non-finite input becomes 0
/// - No range clamping: "150" stays 150, the validators below catch it
///
/// ## Example
/// ```rust
/// use medipos_core::validation::coerce_amount;
///
/// assert_eq!(coerce_amount("33.50"), 33.5);
/// assert_eq!(coerce_amount(""), 0.0);
/// assert_eq!(coerce_amount("n/a"), 0.0);
/// ```
pub fn coerce_amount(raw: &str) -> f64 {
    raw.trim()
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
        .unwrap_or(0.0)
}

// =============================================================================
// String Validators
// =============================================================================

/// Validates a medicine brand name.
///
/// ## Rules
/// - Must not be empty
/// - Must be at most 200 characters
pub fn validate_brand_name(name: &str) -> ValidationResult<()> {
    let name = name.trim();

    if name.is_empty() {
        return Err(ValidationError::Required {
            field: "brand name".to_string(),
        });
    }

    if name.len() > 200 {
        return Err(ValidationError::TooLong {
            field: "brand name".to_string(),
            max: 200,
        });
    }

    Ok(())
}

/// Validates a batch number.
///
/// ## Rules
/// - Must not be empty
/// - Must be at most 50 characters
/// - Should contain only alphanumeric characters, hyphens, slashes
///
/// ## Example
/// ```rust
/// use medipos_core::validation::validate_batch_no;
///
/// assert!(validate_batch_no("DL2401").is_ok());
/// assert!(validate_batch_no("AZ-24/07").is_ok());
/// assert!(validate_batch_no("").is_err());
/// ```
pub fn validate_batch_no(batch: &str) -> ValidationResult<()> {
    let batch = batch.trim();

    if batch.is_empty() {
        return Err(ValidationError::Required {
            field: "batch number".to_string(),
        });
    }

    if batch.len() > 50 {
        return Err(ValidationError::TooLong {
            field: "batch number".to_string(),
            max: 50,
        });
    }

    if !batch
        .chars()
        .all(|c| c.is_alphanumeric() || c == '-' || c == '/')
    {
        return Err(ValidationError::InvalidFormat {
            field: "batch number".to_string(),
            reason: "must contain only letters, numbers, hyphens, and slashes".to_string(),
        });
    }

    Ok(())
}

/// Validates a customer mobile number.
///
/// ## Rules
/// - 10 to 12 digits, nothing else
pub fn validate_mobile(mobile: &str) -> ValidationResult<()> {
    let mobile = mobile.trim();

    if mobile.is_empty() {
        return Err(ValidationError::Required {
            field: "mobile".to_string(),
        });
    }

    if mobile.len() < 10 || mobile.len() > 12 || !mobile.chars().all(|c| c.is_ascii_digit()) {
        return Err(ValidationError::InvalidFormat {
            field: "mobile".to_string(),
            reason: "must be 10 to 12 digits".to_string(),
        });
    }

    Ok(())
}

// =============================================================================
// Numeric Validators
// =============================================================================

/// Validates a line quantity against the billing bounds.
///
/// ## Rules
/// - Must be positive (> 0)
/// - Must not exceed [`MAX_LINE_QUANTITY`]
pub fn validate_quantity(qty: i64) -> ValidationResult<()> {
    if qty <= 0 {
        return Err(ValidationError::MustBePositive {
            field: "quantity".to_string(),
        });
    }

    if qty > MAX_LINE_QUANTITY {
        return Err(ValidationError::OutOfRange {
            field: "quantity".to_string(),
            min: 1,
            max: MAX_LINE_QUANTITY,
        });
    }

    Ok(())
}

/// Validates an MRP value.
///
/// ## Rules
/// - Must be non-negative (zero allowed: sample/free items)
pub fn validate_mrp(mrp: f64) -> ValidationResult<()> {
    if mrp < 0.0 {
        return Err(ValidationError::MustBePositive {
            field: "MRP".to_string(),
        });
    }

    Ok(())
}

/// Validates a percentage field (discount or GST).
///
/// ## Rules
/// - Must be between 0 and 100
///
/// The pricing formulas tolerate out-of-range values; this check is the
/// caller-side guard that keeps them out of real bills.
pub fn validate_percentage(field: &str, pct: f64) -> ValidationResult<()> {
    if !(0.0..=100.0).contains(&pct) {
        return Err(ValidationError::OutOfRange {
            field: field.to_string(),
            min: 0,
            max: 100,
        });
    }

    Ok(())
}

// =============================================================================
// Unit Tests
// =============================================================================
