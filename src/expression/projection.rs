use crate::error::{Error, Result};
use crate::expression::{self, path};

/// A projection expression selecting the attributes to return.
///
/// ```rust
/// use dynamodb_expr::expression::{path, projection};
/// use dynamodb_expr::expression::Expression;
///
/// let projection = projection::Projection::new(vec![
///     path::AttributePath::new("id")?,
///     path::AttributePath::new("profile.age")?,
/// ])?;
/// let expression: Expression = projection.into_expression();
/// assert_eq!(expression.expression, "#id, #profile.#age");
/// # Ok::<(), dynamodb_expr::error::Error>(())
/// ```
#[derive(Clone, Debug, PartialEq)]
pub struct Projection {
    paths: Vec<path::AttributePath>,
}

impl Projection {
    /// Creates a projection over the given attribute paths.
    ///
    /// # Errors
    ///
    /// Returns [`Error::EmptyProjection`] when no paths are given.
    pub fn new(paths: Vec<path::AttributePath>) -> Result<Self> {
        if paths.is_empty() {
            return Err(Error::EmptyProjection);
        }
        Ok(Self { paths })
    }

    /// The selected paths, in order. Always non-empty.
    #[must_use]
    pub fn paths(&self) -> &[path::AttributePath] {
        &self.paths
    }

    /// Renders the projection expression triple. Projections reference no
    /// literal values, so the value table is always empty.
    #[cfg_attr(
        feature = "tracing",
        tracing::instrument(name = "dynamodb_expr.projection", skip_all)
    )]
    #[must_use]
    pub fn into_expression(self) -> expression::Expression {
        let fragments: Vec<String> = self
            .paths
            .iter()
            .map(path::AttributePath::name_expression)
            .collect();
        let names = self
            .paths
            .iter()
            .flat_map(path::AttributePath::name_table)
            .collect();
        expression::Expression::consolidate(fragments.join(", "), names, Vec::new())
    }
}

impl TryFrom<Vec<path::AttributePath>> for Projection {
    type Error = Error;

    fn try_from(paths: Vec<path::AttributePath>) -> Result<Self> {
        Self::new(paths)
    }
}

impl From<Projection> for expression::Expression {
    fn from(projection: Projection) -> Self {
        projection.into_expression()
    }
}
