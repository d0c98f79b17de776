//! Expression building for DynamoDB requests.
//!
//! Callers build a tree of [`path::AttributePath`]s, [`operand::Operand`]s and
//! expression nodes, then render it once into an [`Expression`]: the
//! expression text plus the attribute-name and attribute-value placeholder
//! tables the wire protocol requires. The same triple serves every expression
//! slot a request accepts: condition, key-condition, filter, update and
//! projection expressions.

/// Condition and filter expression nodes.
pub mod condition;

/// Key-condition expressions for query operations.
pub mod key;

/// Operands usable inside expression nodes.
pub mod operand;

/// Attribute paths referencing (possibly nested) item attributes.
pub mod path;

/// Projection expressions selecting attributes to return.
pub mod projection;

/// Update expressions composed of SET, REMOVE, ADD and DELETE clauses.
pub mod update;

use crate::value;

use indexmap::IndexMap;

/// A rendered expression together with its placeholder substitution tables.
///
/// This is the contract delivered to the request marshaller: the marshaller
/// embeds [`expression`](Self::expression) under the relevant request field
/// and merges the two tables into the request's shared
/// `ExpressionAttributeNames` / `ExpressionAttributeValues` maps. Placeholder
/// collisions across different expressions on the same request are the
/// caller's responsibility to avoid; within one expression the tables are
/// collision-free by construction.
///
/// ```rust
/// use dynamodb_expr::expression::{condition, path};
/// use dynamodb_expr::{expression, value};
///
/// let status = path::AttributePath::new("status")?;
/// let active = value::AttributeValue::string("ACTIVE");
/// let expression: expression::Expression =
///     condition::Condition::equal(status, active).into();
/// assert_eq!(expression.expression_attribute_names["#status"], "status");
/// # Ok::<(), dynamodb_expr::error::Error>(())
/// ```
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Expression {
    /// The expression text, referencing placeholders instead of literals.
    pub expression: String,
    /// Name placeholders (`#name`) mapped to the attribute names they stand for.
    pub expression_attribute_names: IndexMap<String, String>,
    /// Value placeholders (`:v_...`) mapped to the values they stand for.
    pub expression_attribute_values: IndexMap<String, value::AttributeValue>,
}

impl Expression {
    /// Returns `true` if the expression text is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.expression.is_empty()
    }

    pub(crate) fn consolidate(
        expression: String,
        names: Vec<(String, String)>,
        values: Vec<(String, value::AttributeValue)>,
    ) -> Self {
        Self {
            expression,
            expression_attribute_names: names.into_iter().collect(),
            expression_attribute_values: values.into_iter().collect(),
        }
    }
}
