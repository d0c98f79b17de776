use crate::expression::{self, condition, path};
use crate::value;

/// One primary-key attribute paired with the value to match or bound.
///
/// ```rust
/// use dynamodb_expr::expression::{key, path};
/// use dynamodb_expr::value;
///
/// let partition = key::Key {
///     path: path::AttributePath::new("user_id")?,
///     value: value::AttributeValue::string("u-1"),
/// };
/// # Ok::<(), dynamodb_expr::error::Error>(())
/// ```
#[derive(Clone, Debug, PartialEq)]
pub struct Key {
    /// The key attribute. Key attributes are top-level, so this is normally a
    /// single-segment path; the real table key schema is not validated here.
    pub path: path::AttributePath,
    /// The value to match or bound.
    pub value: value::AttributeValue,
}

/// Condition applicable to the sort key of a query.
///
/// Restricted to the operators the key-condition slot accepts; general
/// conditions (e.g. `contains`, `OR`) belong in a filter expression instead.
#[derive(Clone, Debug, PartialEq)]
pub enum SortCondition {
    /// Sort key equals the value.
    Equal,
    /// Sort key is less than the value.
    LessThan,
    /// Sort key is less than or equal to the value.
    LessThanOrEqual,
    /// Sort key is greater than the value.
    GreaterThan,
    /// Sort key is greater than or equal to the value.
    GreaterThanOrEqual,
    /// Sort key is between the key value and this upper bound (inclusive).
    Between(value::AttributeValue),
    /// Sort key begins with the value (string or binary keys only).
    BeginsWith,
}

/// A key-condition expression: partition key equality plus an optional sort
/// key condition.
///
/// ```rust
/// use dynamodb_expr::expression::{key, path};
/// use dynamodb_expr::{expression, value};
///
/// let key_condition = key::KeyCondition::new(
///     path::AttributePath::new("user_id")?,
///     value::AttributeValue::string("u-1"),
/// );
/// let expression: expression::Expression = key_condition.into_expression();
/// assert!(expression.expression.starts_with("#user_id = :v_"));
/// # Ok::<(), dynamodb_expr::error::Error>(())
/// ```
#[derive(Clone, Debug, PartialEq)]
pub struct KeyCondition {
    /// The partition key, always matched by equality.
    pub partition_key: Key,
    /// The optional sort key together with its condition.
    pub sort_key: Option<(Key, SortCondition)>,
}

impl KeyCondition {
    /// Creates a key condition matching the partition key by equality.
    #[must_use]
    pub fn new(path: path::AttributePath, value: value::AttributeValue) -> Self {
        Self {
            partition_key: Key { path, value },
            sort_key: None,
        }
    }

    /// Adds a sort key condition.
    #[must_use]
    pub fn with_sort_key(
        mut self,
        path: path::AttributePath,
        value: value::AttributeValue,
        condition: SortCondition,
    ) -> Self {
        self.sort_key = Some((Key { path, value }, condition));
        self
    }

    /// Renders the key-condition expression triple.
    #[cfg_attr(
        feature = "tracing",
        tracing::instrument(name = "dynamodb_expr.key_condition", skip_all)
    )]
    #[must_use]
    pub fn into_expression(self) -> expression::Expression {
        let partition =
            condition::Condition::equal(self.partition_key.path, self.partition_key.value);
        let combined = match self.sort_key {
            Some((key, sort_condition)) => {
                let sort = match sort_condition {
                    SortCondition::Equal => condition::Condition::equal(key.path, key.value),
                    SortCondition::LessThan => {
                        condition::Condition::less_than(key.path, key.value)
                    }
                    SortCondition::LessThanOrEqual => {
                        condition::Condition::less_than_or_equal(key.path, key.value)
                    }
                    SortCondition::GreaterThan => {
                        condition::Condition::greater_than(key.path, key.value)
                    }
                    SortCondition::GreaterThanOrEqual => {
                        condition::Condition::greater_than_or_equal(key.path, key.value)
                    }
                    SortCondition::Between(upper) => {
                        condition::Condition::between(key.path, key.value, upper)
                    }
                    SortCondition::BeginsWith => {
                        condition::Condition::begins_with(key.path, key.value)
                    }
                };
                partition.and(sort)
            }
            None => partition,
        };
        combined.into_expression()
    }
}

impl From<KeyCondition> for expression::Expression {
    fn from(key_condition: KeyCondition) -> Self {
        key_condition.into_expression()
    }
}
