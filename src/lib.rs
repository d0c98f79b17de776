#![doc(
    html_logo_url = "https://raw.githubusercontent.com/dariocurr/dynamodb-expr/main/assets/logo.png",
    html_favicon_url = "https://raw.githubusercontent.com/dariocurr/dynamodb-expr/main/assets/logo.png"
)]
#![deny(missing_docs)]
#![deny(warnings)]

//! # DynamoDB Expr
//!
//! A type-safe, ergonomic core for building Amazon DynamoDB attribute values and expressions.
//!
//! ## Overview
//!
//! This library models the two pieces every DynamoDB request body is built from:
//! - [`value::AttributeValue`]: a closed tagged value representing one item attribute,
//!   with a faithful single-key JSON wire codec (`{"S": "hello"}`, `{"N": "42"}`, ...)
//! - [`expression::Expression`]: expression text plus the name/value placeholder tables,
//!   rendered from composable condition, key-condition, filter, update and projection trees
//!
//! Placeholder management is fully automatic and collision-free: attribute names become
//! `#name` tokens derived from the path segments, while literal values receive opaque
//! `:v_...` tokens allocated from a process-random source, so the same attribute can be
//! compared against two different values in one expression without the tables clobbering
//! each other.
//!
//! This crate builds request *inputs*; sending them (HTTP transport, retries, error
//! mapping) and converting typed entities to and from raw item maps belong to the
//! surrounding application.
//!
//! ## Quick Example
//!
//! Instead of manually interpolating expression strings and managing placeholders,
//! compose structured trees and render them once:
//!
//! ```rust
//! use dynamodb_expr::expression::{condition, path, update};
//! use dynamodb_expr::value;
//!
//! // condition: status = "ACTIVE" AND age BETWEEN 18 AND 65
//! let status = path::AttributePath::new("status")?;
//! let age = path::AttributePath::new("age")?;
//! let guard = condition::Condition::equal(
//!     status,
//!     value::AttributeValue::string("ACTIVE"),
//! )
//! .and(condition::Condition::between(
//!     age,
//!     value::AttributeValue::number(18),
//!     value::AttributeValue::number(65),
//! ));
//! let condition_expression = guard.into_expression();
//!
//! // update: SET name = "Jane" REMOVE legacy_flags
//! let update = update::Update::new()
//!     .set(
//!         path::AttributePath::new("name")?,
//!         update::SetValue::assign(value::AttributeValue::string("Jane")),
//!     )
//!     .remove(path::AttributePath::new("legacy_flags")?);
//! let update_expression = update.try_into_expression()?;
//!
//! // each triple is ready to embed into a request: expression text plus the
//! // ExpressionAttributeNames / ExpressionAttributeValues tables
//! assert_eq!(condition_expression.expression_attribute_names["#status"], "status");
//! assert_eq!(update_expression.expression_attribute_names["#name"], "name");
//! # Ok::<(), dynamodb_expr::error::Error>(())
//! ```
//!
//! ## Modules
//!
//! - [`mod@value`] - The tagged attribute value and its wire JSON codec
//! - [`mod@expression`] - Expression trees and the rendered placeholder triple
//! - [`mod@error`] - Construction-time validation errors

/// Construction-time validation errors.
pub mod error;

/// Expression building: paths, operands, condition/key/update/projection trees.
pub mod expression;

/// The tagged attribute value and its wire JSON codec.
pub mod value;
