use crate::expression::{self, operand, path};
use crate::value;

use std::fmt;

/// Comparison operator usable in a [`Condition::Compare`] node.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Comparator {
    /// Equal (`=`).
    Equal,
    /// Not equal (`<>`).
    NotEqual,
    /// Less than (`<`).
    LessThan,
    /// Less than or equal (`<=`).
    LessThanOrEqual,
    /// Greater than (`>`).
    GreaterThan,
    /// Greater than or equal (`>=`).
    GreaterThanOrEqual,
}

impl fmt::Display for Comparator {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Equal => write!(formatter, "="),
            Self::NotEqual => write!(formatter, "<>"),
            Self::LessThan => write!(formatter, "<"),
            Self::LessThanOrEqual => write!(formatter, "<="),
            Self::GreaterThan => write!(formatter, ">"),
            Self::GreaterThanOrEqual => write!(formatter, ">="),
        }
    }
}

/// Attribute type tag checked by an `attribute_type` condition.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum AttributeKind {
    /// Binary (`B`).
    Binary,
    /// Boolean (`BOOL`).
    Boolean,
    /// Binary set (`BS`).
    BinarySet,
    /// List (`L`).
    List,
    /// Map (`M`).
    Map,
    /// Number (`N`).
    Number,
    /// Number set (`NS`).
    NumberSet,
    /// Null (`NULL`).
    Null,
    /// String (`S`).
    String,
    /// String set (`SS`).
    StringSet,
}

impl AttributeKind {
    /// The wire type tag this kind compares against.
    #[must_use]
    pub fn wire_tag(self) -> &'static str {
        match self {
            Self::Binary => "B",
            Self::Boolean => "BOOL",
            Self::BinarySet => "BS",
            Self::List => "L",
            Self::Map => "M",
            Self::Number => "N",
            Self::NumberSet => "NS",
            Self::Null => "NULL",
            Self::String => "S",
            Self::StringSet => "SS",
        }
    }
}

/// A condition or filter expression node.
///
/// Nodes are immutable and stateless beyond their children; rendering is a
/// pure structural fold, so a tree may be rendered repeatedly with identical
/// results and shared freely across threads.
///
/// `And` and `Or` are binary, which makes the empty-children case
/// unrepresentable; combine more than two conditions by nesting, usually via
/// the [`and`](Self::and) and [`or`](Self::or) helpers.
///
/// ```rust
/// use dynamodb_expr::expression::{condition, path};
/// use dynamodb_expr::value;
///
/// let age = path::AttributePath::new("age")?;
/// let adult = condition::Condition::greater_than(
///     age.clone(),
///     value::AttributeValue::number(18),
/// )
/// .and(condition::Condition::less_than(
///     age,
///     value::AttributeValue::number(65),
/// ));
/// # Ok::<(), dynamodb_expr::error::Error>(())
/// ```
#[derive(Clone, Debug, PartialEq)]
pub enum Condition {
    /// Comparison between two operands: `left <comparator> right`.
    Compare {
        /// Left-hand operand.
        left: operand::Operand,
        /// Comparison operator.
        comparator: Comparator,
        /// Right-hand operand.
        right: operand::Operand,
    },
    /// Inclusive range check: `operand BETWEEN lower AND upper`.
    Between {
        /// Operand to test.
        operand: operand::Operand,
        /// Lower bound (inclusive).
        lower: operand::Operand,
        /// Upper bound (inclusive).
        upper: operand::Operand,
    },
    /// Membership check: `operand IN (values...)`.
    ///
    /// A non-empty value list is a caller precondition.
    In {
        /// Operand to search for.
        operand: operand::Operand,
        /// Candidate values.
        values: Vec<operand::Operand>,
    },
    /// `attribute_exists(path)`.
    AttributeExists(path::AttributePath),
    /// `attribute_not_exists(path)`.
    AttributeNotExists(path::AttributePath),
    /// `attribute_type(path, kind)`.
    AttributeType {
        /// Path whose type is checked.
        path: path::AttributePath,
        /// The type tag, carried as a literal string operand.
        kind: operand::Operand,
    },
    /// `begins_with(path, prefix)`.
    BeginsWith {
        /// Path to test.
        path: path::AttributePath,
        /// Prefix operand.
        prefix: operand::Operand,
    },
    /// `contains(path, operand)`.
    Contains {
        /// Path to test.
        path: path::AttributePath,
        /// Operand searched for.
        operand: operand::Operand,
    },
    /// Logical conjunction: `lhs AND rhs`.
    And(Box<Condition>, Box<Condition>),
    /// Logical disjunction: `lhs OR rhs`.
    Or(Box<Condition>, Box<Condition>),
    /// Logical negation: `NOT inner`.
    Not(Box<Condition>),
    /// Grouping: `(inner)`.
    Parentheses(Box<Condition>),
}

impl Condition {
    /// Creates a comparison node.
    pub fn compare(
        left: impl Into<operand::Operand>,
        comparator: Comparator,
        right: impl Into<operand::Operand>,
    ) -> Self {
        Self::Compare {
            left: left.into(),
            comparator,
            right: right.into(),
        }
    }

    /// Creates an equality comparison (`=`).
    pub fn equal(left: impl Into<operand::Operand>, right: impl Into<operand::Operand>) -> Self {
        Self::compare(left, Comparator::Equal, right)
    }

    /// Creates an inequality comparison (`<>`).
    pub fn not_equal(
        left: impl Into<operand::Operand>,
        right: impl Into<operand::Operand>,
    ) -> Self {
        Self::compare(left, Comparator::NotEqual, right)
    }

    /// Creates a `<` comparison.
    pub fn less_than(
        left: impl Into<operand::Operand>,
        right: impl Into<operand::Operand>,
    ) -> Self {
        Self::compare(left, Comparator::LessThan, right)
    }

    /// Creates a `<=` comparison.
    pub fn less_than_or_equal(
        left: impl Into<operand::Operand>,
        right: impl Into<operand::Operand>,
    ) -> Self {
        Self::compare(left, Comparator::LessThanOrEqual, right)
    }

    /// Creates a `>` comparison.
    pub fn greater_than(
        left: impl Into<operand::Operand>,
        right: impl Into<operand::Operand>,
    ) -> Self {
        Self::compare(left, Comparator::GreaterThan, right)
    }

    /// Creates a `>=` comparison.
    pub fn greater_than_or_equal(
        left: impl Into<operand::Operand>,
        right: impl Into<operand::Operand>,
    ) -> Self {
        Self::compare(left, Comparator::GreaterThanOrEqual, right)
    }

    /// Creates an inclusive range check.
    pub fn between(
        operand: impl Into<operand::Operand>,
        lower: impl Into<operand::Operand>,
        upper: impl Into<operand::Operand>,
    ) -> Self {
        Self::Between {
            operand: operand.into(),
            lower: lower.into(),
            upper: upper.into(),
        }
    }

    /// Creates a membership check. The value list must be non-empty.
    pub fn in_list<I, T>(operand: impl Into<operand::Operand>, values: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<operand::Operand>,
    {
        Self::In {
            operand: operand.into(),
            values: values.into_iter().map(Into::into).collect(),
        }
    }

    /// Creates an `attribute_exists` check.
    #[must_use]
    pub fn attribute_exists(path: path::AttributePath) -> Self {
        Self::AttributeExists(path)
    }

    /// Creates an `attribute_not_exists` check.
    #[must_use]
    pub fn attribute_not_exists(path: path::AttributePath) -> Self {
        Self::AttributeNotExists(path)
    }

    /// Creates an `attribute_type` check against the given type tag.
    #[must_use]
    pub fn attribute_type(path: path::AttributePath, kind: AttributeKind) -> Self {
        Self::AttributeType {
            path,
            kind: operand::Operand::value(value::AttributeValue::string(kind.wire_tag())),
        }
    }

    /// Creates a `begins_with` check.
    pub fn begins_with(path: path::AttributePath, prefix: impl Into<operand::Operand>) -> Self {
        Self::BeginsWith {
            path,
            prefix: prefix.into(),
        }
    }

    /// Creates a `contains` check.
    pub fn contains(path: path::AttributePath, operand: impl Into<operand::Operand>) -> Self {
        Self::Contains {
            path,
            operand: operand.into(),
        }
    }

    /// Combines this condition with another using `AND`.
    #[must_use]
    pub fn and(self, other: Condition) -> Self {
        Self::And(Box::new(self), Box::new(other))
    }

    /// Combines this condition with another using `OR`.
    #[must_use]
    pub fn or(self, other: Condition) -> Self {
        Self::Or(Box::new(self), Box::new(other))
    }

    /// Negates this condition with `NOT`.
    #[must_use]
    pub fn not(self) -> Self {
        Self::Not(Box::new(self))
    }

    /// Wraps this condition in parentheses.
    #[must_use]
    pub fn parenthesize(self) -> Self {
        Self::Parentheses(Box::new(self))
    }

    /// Renders the expression text, referencing the operands' placeholders.
    #[must_use]
    pub fn render(&self) -> String {
        match self {
            Self::Compare {
                left,
                comparator,
                right,
            } => format!("{} {comparator} {}", left.render(), right.render()),
            Self::Between {
                operand,
                lower,
                upper,
            } => format!(
                "{} BETWEEN {} AND {}",
                operand.render(),
                lower.render(),
                upper.render()
            ),
            Self::In { operand, values } => {
                debug_assert!(!values.is_empty(), "IN requires at least one value");
                let values: Vec<String> = values.iter().map(operand::Operand::render).collect();
                format!("{} IN ({})", operand.render(), values.join(", "))
            }
            Self::AttributeExists(path) => {
                format!("attribute_exists({})", path.name_expression())
            }
            Self::AttributeNotExists(path) => {
                format!("attribute_not_exists({})", path.name_expression())
            }
            Self::AttributeType { path, kind } => {
                format!("attribute_type({}, {})", path.name_expression(), kind.render())
            }
            Self::BeginsWith { path, prefix } => {
                format!("begins_with({}, {})", path.name_expression(), prefix.render())
            }
            Self::Contains { path, operand } => {
                format!("contains({}, {})", path.name_expression(), operand.render())
            }
            Self::And(lhs, rhs) => format!("{} AND {}", lhs.render(), rhs.render()),
            Self::Or(lhs, rhs) => format!("{} OR {}", lhs.render(), rhs.render()),
            Self::Not(inner) => format!("NOT {}", inner.render()),
            Self::Parentheses(inner) => format!("({})", inner.render()),
        }
    }

    /// The name placeholders of all descendants, concatenated left-to-right.
    #[must_use]
    pub fn name_table(&self) -> Vec<(String, String)> {
        match self {
            Self::Compare { left, right, .. } => {
                let mut table = left.name_table();
                table.extend(right.name_table());
                table
            }
            Self::Between {
                operand,
                lower,
                upper,
            } => {
                let mut table = operand.name_table();
                table.extend(lower.name_table());
                table.extend(upper.name_table());
                table
            }
            Self::In { operand, values } => {
                let mut table = operand.name_table();
                for value in values {
                    table.extend(value.name_table());
                }
                table
            }
            Self::AttributeExists(path) | Self::AttributeNotExists(path) => path.name_table(),
            Self::AttributeType { path, kind } => {
                let mut table = path.name_table();
                table.extend(kind.name_table());
                table
            }
            Self::BeginsWith {
                path,
                prefix: operand,
            }
            | Self::Contains { path, operand } => {
                let mut table = path.name_table();
                table.extend(operand.name_table());
                table
            }
            Self::And(lhs, rhs) | Self::Or(lhs, rhs) => {
                let mut table = lhs.name_table();
                table.extend(rhs.name_table());
                table
            }
            Self::Not(inner) | Self::Parentheses(inner) => inner.name_table(),
        }
    }

    /// The value placeholders of all descendants, concatenated left-to-right.
    #[must_use]
    pub fn value_table(&self) -> Vec<(String, value::AttributeValue)> {
        match self {
            Self::Compare { left, right, .. } => {
                let mut table = left.value_table();
                table.extend(right.value_table());
                table
            }
            Self::Between {
                operand,
                lower,
                upper,
            } => {
                let mut table = operand.value_table();
                table.extend(lower.value_table());
                table.extend(upper.value_table());
                table
            }
            Self::In { operand, values } => {
                let mut table = operand.value_table();
                for value in values {
                    table.extend(value.value_table());
                }
                table
            }
            Self::AttributeExists(_) | Self::AttributeNotExists(_) => Vec::new(),
            Self::AttributeType { kind: operand, .. }
            | Self::BeginsWith {
                prefix: operand, ..
            }
            | Self::Contains { operand, .. } => operand.value_table(),
            Self::And(lhs, rhs) | Self::Or(lhs, rhs) => {
                let mut table = lhs.value_table();
                table.extend(rhs.value_table());
                table
            }
            Self::Not(inner) | Self::Parentheses(inner) => inner.value_table(),
        }
    }

    /// Renders this condition into the expression triple handed to the
    /// request marshaller. Serves the condition and filter expression slots.
    #[cfg_attr(
        feature = "tracing",
        tracing::instrument(name = "dynamodb_expr.condition", skip_all)
    )]
    #[must_use]
    pub fn into_expression(self) -> expression::Expression {
        expression::Expression::consolidate(self.render(), self.name_table(), self.value_table())
    }
}

impl From<Condition> for expression::Expression {
    fn from(condition: Condition) -> Self {
        condition.into_expression()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use rstest::rstest;

    fn attribute_path(path: &str) -> path::AttributePath {
        path::AttributePath::new(path).unwrap()
    }

    #[rstest]
    #[case::equal(Comparator::Equal, "=")]
    #[case::not_equal(Comparator::NotEqual, "<>")]
    #[case::less_than(Comparator::LessThan, "<")]
    #[case::less_than_or_equal(Comparator::LessThanOrEqual, "<=")]
    #[case::greater_than(Comparator::GreaterThan, ">")]
    #[case::greater_than_or_equal(Comparator::GreaterThanOrEqual, ">=")]
    fn test_comparator_syntax(#[case] comparator: Comparator, #[case] expected: &str) {
        assert_eq!(comparator.to_string(), expected);
    }

    #[test]
    fn test_equal_renders_path_and_token() {
        let condition = Condition::equal(
            attribute_path("status"),
            value::AttributeValue::string("ACTIVE"),
        );
        let values = condition.value_table();
        assert_eq!(values.len(), 1);
        let (token, value) = &values[0];
        assert!(token.starts_with(":v_"));
        assert_eq!(value, &value::AttributeValue::string("ACTIVE"));
        assert_eq!(condition.render(), format!("#status = {token}"));
        assert_eq!(
            condition.name_table(),
            vec![("#status".to_string(), "status".to_string())]
        );
    }

    #[test]
    fn test_between_uses_two_distinct_tokens() {
        let condition = Condition::between(
            attribute_path("age"),
            value::AttributeValue::number(18),
            value::AttributeValue::number(65),
        );
        let values = condition.value_table();
        assert_eq!(values.len(), 2);
        let (lower_token, lower) = &values[0];
        let (upper_token, upper) = &values[1];
        assert_ne!(lower_token, upper_token);
        assert_eq!(lower, &value::AttributeValue::number(18));
        assert_eq!(upper, &value::AttributeValue::number(65));
        assert_eq!(
            condition.render(),
            format!("#age BETWEEN {lower_token} AND {upper_token}")
        );
    }

    #[test]
    fn test_in_list_renders_comma_joined_tokens() {
        let condition = Condition::in_list(
            attribute_path("color"),
            [
                value::AttributeValue::string("red"),
                value::AttributeValue::string("blue"),
            ],
        );
        let values = condition.value_table();
        assert_eq!(values.len(), 2);
        assert_eq!(
            condition.render(),
            format!("#color IN ({}, {})", values[0].0, values[1].0)
        );
    }

    #[test]
    fn test_function_conditions_render_call_syntax() {
        let exists = Condition::attribute_exists(attribute_path("profile.email"));
        assert_eq!(exists.render(), "attribute_exists(#profile.#email)");
        assert!(exists.value_table().is_empty());

        let missing = Condition::attribute_not_exists(attribute_path("deleted_at"));
        assert_eq!(missing.render(), "attribute_not_exists(#deleted_at)");

        let typed = Condition::attribute_type(attribute_path("age"), AttributeKind::Number);
        let values = typed.value_table();
        assert_eq!(values.len(), 1);
        assert_eq!(values[0].1, value::AttributeValue::string("N"));
        assert_eq!(
            typed.render(),
            format!("attribute_type(#age, {})", values[0].0)
        );

        let prefix = Condition::begins_with(
            attribute_path("name"),
            value::AttributeValue::string("Ja"),
        );
        let values = prefix.value_table();
        assert_eq!(
            prefix.render(),
            format!("begins_with(#name, {})", values[0].0)
        );

        let contains = Condition::contains(
            attribute_path("tags"),
            value::AttributeValue::string("beta"),
        );
        let values = contains.value_table();
        assert_eq!(
            contains.render(),
            format!("contains(#tags, {})", values[0].0)
        );
    }

    #[test]
    fn test_and_concatenates_renders_and_tables() {
        let first = Condition::equal(
            attribute_path("status"),
            value::AttributeValue::string("ACTIVE"),
        );
        let second = Condition::greater_than(
            attribute_path("age"),
            value::AttributeValue::number(18),
        );
        let combined = first.clone().and(second.clone());
        assert_eq!(
            combined.render(),
            format!("{} AND {}", first.render(), second.render())
        );
        let mut expected_names = first.name_table();
        expected_names.extend(second.name_table());
        assert_eq!(combined.name_table(), expected_names);
        let mut expected_values = first.value_table();
        expected_values.extend(second.value_table());
        assert_eq!(combined.value_table(), expected_values);
    }

    #[test]
    fn test_or_not_and_parentheses_render() {
        let first = Condition::attribute_exists(attribute_path("a"));
        let second = Condition::attribute_exists(attribute_path("b"));
        let either = first.or(second).parenthesize();
        assert_eq!(
            either.render(),
            "(attribute_exists(#a) OR attribute_exists(#b))"
        );
        let negated = either.not();
        assert_eq!(
            negated.render(),
            "NOT (attribute_exists(#a) OR attribute_exists(#b))"
        );
    }

    #[test]
    fn test_same_path_twice_gets_distinct_tokens() {
        // regression: deriving tokens from the path would collide here and
        // silently overwrite one bound with the other
        let age = attribute_path("age");
        let condition = Condition::greater_than(age.clone(), value::AttributeValue::number(18))
            .and(Condition::less_than(age, value::AttributeValue::number(65)));
        let expression = condition.into_expression();
        assert_eq!(expression.expression_attribute_values.len(), 2);
        assert_eq!(expression.expression_attribute_names.len(), 1);
        assert_eq!(expression.expression_attribute_names["#age"], "age");
        let tokens: Vec<&String> = expression.expression_attribute_values.keys().collect();
        assert_ne!(tokens[0], tokens[1]);
        assert_eq!(
            expression.expression,
            format!("#age > {} AND #age < {}", tokens[0], tokens[1])
        );
    }

    #[test]
    fn test_rendering_is_referentially_transparent() {
        let condition = Condition::equal(
            attribute_path("status"),
            value::AttributeValue::string("ACTIVE"),
        );
        assert_eq!(condition.render(), condition.render());
        assert_eq!(condition.value_table(), condition.value_table());
        assert_eq!(
            condition.clone().into_expression(),
            condition.into_expression()
        );
    }

    #[test]
    fn test_path_to_path_comparison_contributes_no_values() {
        let condition = Condition::greater_than_or_equal(
            attribute_path("updated_at"),
            attribute_path("created_at"),
        );
        assert_eq!(condition.render(), "#updated_at >= #created_at");
        assert!(condition.value_table().is_empty());
        assert_eq!(condition.name_table().len(), 2);
    }
}
