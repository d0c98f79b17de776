use crate::expression::path;
use crate::value;

/// A value usable inside an expression node: either an attribute path
/// reference or a literal attribute value.
///
/// A literal operand allocates its value-placeholder token at construction
/// time from a process-random 128-bit source, so two literal operands built
/// independently always carry distinct tokens, even for equal values over
/// the same attribute path. Compound expressions such as
/// `age > :v_x AND age < :v_y` therefore never overwrite each other's value
/// table entries.
///
/// ```rust
/// use dynamodb_expr::expression::{operand, path};
/// use dynamodb_expr::value;
///
/// let by_path = operand::Operand::path(path::AttributePath::new("age")?);
/// let by_value = operand::Operand::value(value::AttributeValue::number(21));
/// assert!(by_value.render().starts_with(":v_"));
/// # Ok::<(), dynamodb_expr::error::Error>(())
/// ```
#[derive(Clone, Debug, PartialEq)]
pub enum Operand {
    /// A reference to an item attribute; contributes name placeholders only.
    Path(path::AttributePath),
    /// A literal value bound to a unique value-placeholder token.
    Value {
        /// The value-placeholder token, unique per constructed operand.
        token: String,
        /// The literal attribute value the token stands for.
        value: value::AttributeValue,
    },
}

impl Operand {
    /// Creates a path operand.
    #[must_use]
    pub fn path(path: path::AttributePath) -> Self {
        Self::Path(path)
    }

    /// Creates a literal operand with a freshly allocated unique token.
    ///
    /// Token allocation is lock-free and safe to call from concurrent
    /// expression-building call sites.
    #[must_use]
    pub fn value(value: value::AttributeValue) -> Self {
        let token = format!(":v_{}", uuid::Uuid::new_v4().simple());
        Self::Value { token, value }
    }

    /// The expression fragment this operand renders as: the path's name
    /// expression, or the literal's value token.
    #[must_use]
    pub fn render(&self) -> String {
        match self {
            Self::Path(path) => path.name_expression(),
            Self::Value { token, .. } => token.clone(),
        }
    }

    /// The name placeholders this operand contributes, in order.
    #[must_use]
    pub fn name_table(&self) -> Vec<(String, String)> {
        match self {
            Self::Path(path) => path.name_table(),
            Self::Value { .. } => Vec::new(),
        }
    }

    /// The value placeholders this operand contributes, in order.
    #[must_use]
    pub fn value_table(&self) -> Vec<(String, value::AttributeValue)> {
        match self {
            Self::Path(_) => Vec::new(),
            Self::Value { token, value } => vec![(token.clone(), value.clone())],
        }
    }
}

impl From<path::AttributePath> for Operand {
    fn from(path: path::AttributePath) -> Self {
        Self::path(path)
    }
}

impl From<value::AttributeValue> for Operand {
    fn from(value: value::AttributeValue) -> Self {
        Self::value(value)
    }
}
