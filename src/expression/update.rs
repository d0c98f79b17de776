use crate::error::{Error, Result};
use crate::expression::{self, operand, path};
use crate::value;

/// The value side of a SET clause.
///
/// ```rust
/// use dynamodb_expr::expression::update;
/// use dynamodb_expr::value;
///
/// let assign = update::SetValue::assign(value::AttributeValue::string("Jane"));
/// let increment = update::SetValue::increment(value::AttributeValue::number(1));
/// ```
#[derive(Clone, Debug, PartialEq)]
pub enum SetValue {
    /// Assign the operand, replacing any existing value.
    Assign(operand::Operand),
    /// Increment the numeric attribute by the operand.
    Increment(operand::Operand),
    /// Decrement the numeric attribute by the operand.
    Decrement(operand::Operand),
    /// Append the operand to the end of the list attribute.
    ListAppend(operand::Operand),
    /// Prepend the operand to the beginning of the list attribute.
    ListPrepend(operand::Operand),
    /// Assign the operand only if the attribute does not exist yet.
    IfNotExists(operand::Operand),
}

impl SetValue {
    /// Creates an assignment.
    pub fn assign(value: impl Into<operand::Operand>) -> Self {
        Self::Assign(value.into())
    }

    /// Creates an increment.
    pub fn increment(value: impl Into<operand::Operand>) -> Self {
        Self::Increment(value.into())
    }

    /// Creates a decrement.
    pub fn decrement(value: impl Into<operand::Operand>) -> Self {
        Self::Decrement(value.into())
    }

    /// Creates a list append.
    pub fn list_append(value: impl Into<operand::Operand>) -> Self {
        Self::ListAppend(value.into())
    }

    /// Creates a list prepend.
    pub fn list_prepend(value: impl Into<operand::Operand>) -> Self {
        Self::ListPrepend(value.into())
    }

    /// Creates an assign-if-absent.
    pub fn if_not_exists(value: impl Into<operand::Operand>) -> Self {
        Self::IfNotExists(value.into())
    }

    fn render(&self, path: &str) -> String {
        match self {
            Self::Assign(operand) => format!("{path} = {}", operand.render()),
            Self::Increment(operand) => format!("{path} = {path} + {}", operand.render()),
            Self::Decrement(operand) => format!("{path} = {path} - {}", operand.render()),
            Self::ListAppend(operand) => {
                format!("{path} = list_append({path}, {})", operand.render())
            }
            Self::ListPrepend(operand) => {
                format!("{path} = list_append({}, {path})", operand.render())
            }
            Self::IfNotExists(operand) => {
                format!("{path} = if_not_exists({path}, {})", operand.render())
            }
        }
    }

    fn operand(&self) -> &operand::Operand {
        match self {
            Self::Assign(operand)
            | Self::Increment(operand)
            | Self::Decrement(operand)
            | Self::ListAppend(operand)
            | Self::ListPrepend(operand)
            | Self::IfNotExists(operand) => operand,
        }
    }
}

/// An update expression assembled from SET, REMOVE, ADD and DELETE clauses.
///
/// Clauses are kept in insertion order within their group; groups render in
/// SET, REMOVE, ADD, DELETE order with empty groups omitted entirely.
///
/// ```rust
/// use dynamodb_expr::expression::{path, update};
/// use dynamodb_expr::value;
///
/// let update = update::Update::new()
///     .set(
///         path::AttributePath::new("name")?,
///         update::SetValue::assign(value::AttributeValue::string("Jane")),
///     )
///     .remove(path::AttributePath::new("legacy_flags")?);
/// let expression = update.try_into_expression()?;
/// assert!(expression.expression.starts_with("SET #name = :v_"));
/// # Ok::<(), dynamodb_expr::error::Error>(())
/// ```
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Update {
    set: Vec<(path::AttributePath, SetValue)>,
    remove: Vec<path::AttributePath>,
    add: Vec<(path::AttributePath, operand::Operand)>,
    delete: Vec<(path::AttributePath, operand::Operand)>,
}

impl Update {
    /// Creates an empty update expression.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a SET clause.
    #[must_use]
    pub fn set(mut self, path: path::AttributePath, value: SetValue) -> Self {
        self.set.push((path, value));
        self
    }

    /// Appends a REMOVE clause.
    #[must_use]
    pub fn remove(mut self, path: path::AttributePath) -> Self {
        self.remove.push(path);
        self
    }

    /// Appends an ADD clause (adds to a number or inserts into a set).
    #[must_use]
    pub fn add(mut self, path: path::AttributePath, value: value::AttributeValue) -> Self {
        self.add.push((path, operand::Operand::value(value)));
        self
    }

    /// Appends a DELETE clause (removes a subset from a set attribute).
    #[must_use]
    pub fn delete(mut self, path: path::AttributePath, subset: value::AttributeValue) -> Self {
        self.delete.push((path, operand::Operand::value(subset)));
        self
    }

    /// Returns `true` if no clause has been appended yet.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.set.is_empty() && self.remove.is_empty() && self.add.is_empty() && self.delete.is_empty()
    }

    /// Renders the update expression triple.
    ///
    /// # Errors
    ///
    /// Returns [`Error::EmptyUpdate`] when no clause has been appended.
    #[cfg_attr(
        feature = "tracing",
        tracing::instrument(name = "dynamodb_expr.update", skip_all, err)
    )]
    pub fn try_into_expression(self) -> Result<expression::Expression> {
        if self.is_empty() {
            return Err(Error::EmptyUpdate);
        }
        let mut fragments = Vec::new();
        let mut names = Vec::new();
        let mut values = Vec::new();

        if !self.set.is_empty() {
            let items: Vec<String> = self
                .set
                .iter()
                .map(|(path, set_value)| {
                    names.extend(path.name_table());
                    values.extend(set_value.operand().value_table());
                    names.extend(set_value.operand().name_table());
                    set_value.render(&path.name_expression())
                })
                .collect();
            fragments.push(format!("SET {}", items.join(", ")));
        }
        if !self.remove.is_empty() {
            let items: Vec<String> = self
                .remove
                .iter()
                .map(|path| {
                    names.extend(path.name_table());
                    path.name_expression()
                })
                .collect();
            fragments.push(format!("REMOVE {}", items.join(", ")));
        }
        if !self.add.is_empty() {
            let items: Vec<String> = self
                .add
                .iter()
                .map(|(path, operand)| {
                    names.extend(path.name_table());
                    values.extend(operand.value_table());
                    format!("{} {}", path.name_expression(), operand.render())
                })
                .collect();
            fragments.push(format!("ADD {}", items.join(", ")));
        }
        if !self.delete.is_empty() {
            let items: Vec<String> = self
                .delete
                .iter()
                .map(|(path, operand)| {
                    names.extend(path.name_table());
                    values.extend(operand.value_table());
                    format!("{} {}", path.name_expression(), operand.render())
                })
                .collect();
            fragments.push(format!("DELETE {}", items.join(", ")));
        }

        Ok(expression::Expression::consolidate(
            fragments.join(" "),
            names,
            values,
        ))
    }
}

impl TryFrom<Update> for expression::Expression {
    type Error = Error;

    fn try_from(update: Update) -> Result<Self> {
        update.try_into_expression()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn attribute_path(path: &str) -> path::AttributePath {
        path::AttributePath::new(path).unwrap()
    }

    #[test]
    fn test_set_and_remove_render_in_group_order() {
        let expression = Update::new()
            .set(
                attribute_path("a"),
                SetValue::assign(value::AttributeValue::string("x")),
            )
            .remove(attribute_path("b"))
            .try_into_expression()
            .unwrap();
        let token = expression.expression_attribute_values.keys().next().unwrap();
        assert_eq!(expression.expression, format!("SET #a = {token} REMOVE #b"));
        assert_eq!(expression.expression_attribute_names.len(), 2);
    }

    #[test]
    fn test_groups_render_in_set_remove_add_delete_order() {
        // appended deliberately out of group order
        let expression = Update::new()
            .delete(attribute_path("labels"), value::AttributeValue::string_set(["old"]))
            .add(attribute_path("count"), value::AttributeValue::number(1))
            .remove(attribute_path("temp"))
            .set(
                attribute_path("name"),
                SetValue::assign(value::AttributeValue::string("Jane")),
            )
            .try_into_expression()
            .unwrap();
        let tokens: Vec<&String> = expression.expression_attribute_values.keys().collect();
        assert_eq!(tokens.len(), 3);
        assert_eq!(
            expression.expression,
            format!(
                "SET #name = {} REMOVE #temp ADD #count {} DELETE #labels {}",
                tokens[0], tokens[1], tokens[2]
            )
        );
    }

    #[test]
    fn test_items_within_a_group_are_comma_joined() {
        let expression = Update::new()
            .set(
                attribute_path("name"),
                SetValue::assign(value::AttributeValue::string("Jane")),
            )
            .set(
                attribute_path("age"),
                SetValue::increment(value::AttributeValue::number(1)),
            )
            .remove(attribute_path("a"))
            .remove(attribute_path("b"))
            .try_into_expression()
            .unwrap();
        let tokens: Vec<&String> = expression.expression_attribute_values.keys().collect();
        assert_eq!(
            expression.expression,
            format!(
                "SET #name = {}, #age = #age + {} REMOVE #a, #b",
                tokens[0], tokens[1]
            )
        );
    }

    #[test]
    fn test_set_can_assign_one_path_to_another() {
        let expression = Update::new()
            .set(
                attribute_path("backup"),
                SetValue::assign(attribute_path("current")),
            )
            .try_into_expression()
            .unwrap();
        assert_eq!(expression.expression, "SET #backup = #current");
        assert!(expression.expression_attribute_values.is_empty());
        assert_eq!(expression.expression_attribute_names.len(), 2);
    }

    #[test]
    fn test_list_append_and_prepend_fragments() {
        let expression = Update::new()
            .set(
                attribute_path("events"),
                SetValue::list_append(value::AttributeValue::list([
                    value::AttributeValue::string("login"),
                ])),
            )
            .set(
                attribute_path("history"),
                SetValue::list_prepend(value::AttributeValue::list([
                    value::AttributeValue::string("first"),
                ])),
            )
            .try_into_expression()
            .unwrap();
        let tokens: Vec<&String> = expression.expression_attribute_values.keys().collect();
        assert_eq!(
            expression.expression,
            format!(
                "SET #events = list_append(#events, {}), #history = list_append({}, #history)",
                tokens[0], tokens[1]
            )
        );
    }

    #[test]
    fn test_if_not_exists_and_decrement_fragments() {
        let expression = Update::new()
            .set(
                attribute_path("views"),
                SetValue::if_not_exists(value::AttributeValue::number(0)),
            )
            .set(
                attribute_path("stock"),
                SetValue::decrement(value::AttributeValue::number(2)),
            )
            .try_into_expression()
            .unwrap();
        let tokens: Vec<&String> = expression.expression_attribute_values.keys().collect();
        assert_eq!(
            expression.expression,
            format!(
                "SET #views = if_not_exists(#views, {}), #stock = #stock - {}",
                tokens[0], tokens[1]
            )
        );
    }

    #[test]
    fn test_remove_only_update_has_no_values() {
        let expression = Update::new()
            .remove(attribute_path("legacy"))
            .try_into_expression()
            .unwrap();
        assert_eq!(expression.expression, "REMOVE #legacy");
        assert!(expression.expression_attribute_values.is_empty());
    }

    #[test]
    fn test_empty_update_is_rejected() {
        assert_eq!(
            Update::new().try_into_expression().unwrap_err(),
            Error::EmptyUpdate
        );
    }

    #[test]
    fn test_nested_path_in_set_clause() {
        let expression = Update::new()
            .set(
                attribute_path("profile.age"),
                SetValue::assign(value::AttributeValue::number(30)),
            )
            .try_into_expression()
            .unwrap();
        let token = expression.expression_attribute_values.keys().next().unwrap();
        assert_eq!(
            expression.expression,
            format!("SET #profile.#age = {token}")
        );
        assert_eq!(expression.expression_attribute_names.len(), 2);
    }
}
