//! Pure statement rendering.
//!
//! Every interactive field is gathered before anything here runs, so each
//! renderer is a deterministic function from a [`QuerySpec`] to one SQL
//! statement ending in `;` plus a newline. Identifiers, conditions, and
//! values are interpolated verbatim: the operator is trusted and nothing is
//! escaped, quoted, or validated.

use crate::error::WorkbenchError;

mod dml;
mod select;

pub use dml::{render_delete, render_insert, render_update};
pub use select::{
    render_aggregate, render_group, render_join, render_search, render_sort, render_subquery,
};

/// The nine statement categories the operator can build, selected from a 1-9
/// menu.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActionKind {
    Insert,
    Update,
    Delete,
    Search,
    Aggregate,
    Sort,
    Join,
    Group,
    Subquery,
}

impl ActionKind {
    /// Map a 1-9 menu selection to an action. Anything else is unrecognized.
    #[must_use]
    pub fn from_menu(selection: i64) -> Option<ActionKind> {
        match selection {
            1 => Some(ActionKind::Insert),
            2 => Some(ActionKind::Update),
            3 => Some(ActionKind::Delete),
            4 => Some(ActionKind::Search),
            5 => Some(ActionKind::Aggregate),
            6 => Some(ActionKind::Sort),
            7 => Some(ActionKind::Join),
            8 => Some(ActionKind::Group),
            9 => Some(ActionKind::Subquery),
            _ => None,
        }
    }

    /// Whether a successful execution of this action produces fetchable rows.
    #[must_use]
    pub fn returns_rows(self) -> bool {
        !matches!(
            self,
            ActionKind::Insert | ActionKind::Update | ActionKind::Delete
        )
    }

    /// Lowercase name used in operator prompts.
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            ActionKind::Insert => "insert",
            ActionKind::Update => "update",
            ActionKind::Delete => "delete",
            ActionKind::Search => "search",
            ActionKind::Aggregate => "aggregate",
            ActionKind::Sort => "sort",
            ActionKind::Join => "join",
            ActionKind::Group => "group",
            ActionKind::Subquery => "subquery",
        }
    }
}

/// One `column = value` pair for Insert/Update.
///
/// The value is kept exactly as typed; it lands in the statement unescaped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Assignment {
    pub column: String,
    pub value: String,
}

/// Structured input for one build cycle. All text fields are raw, unescaped
/// fragments.
#[derive(Debug, Clone, PartialEq)]
pub enum QuerySpec {
    Insert {
        table: String,
        assignments: Vec<Assignment>,
    },
    Update {
        table: String,
        assignments: Vec<Assignment>,
        condition: String,
    },
    Delete {
        table: String,
        condition: String,
    },
    Search {
        table: String,
        columns: String,
        condition: String,
    },
    Aggregate {
        table: String,
        expression: String,
    },
    Sort {
        table: String,
        columns: String,
        condition: String,
        order_by: String,
    },
    Join {
        left: String,
        right: String,
        join_type: String,
        predicate: String,
    },
    Group {
        table: String,
        expression: String,
        group_by: String,
    },
    Subquery {
        table: String,
        subquery_table: String,
        column: String,
    },
}

impl QuerySpec {
    #[must_use]
    pub fn kind(&self) -> ActionKind {
        match self {
            QuerySpec::Insert { .. } => ActionKind::Insert,
            QuerySpec::Update { .. } => ActionKind::Update,
            QuerySpec::Delete { .. } => ActionKind::Delete,
            QuerySpec::Search { .. } => ActionKind::Search,
            QuerySpec::Aggregate { .. } => ActionKind::Aggregate,
            QuerySpec::Sort { .. } => ActionKind::Sort,
            QuerySpec::Join { .. } => ActionKind::Join,
            QuerySpec::Group { .. } => ActionKind::Group,
            QuerySpec::Subquery { .. } => ActionKind::Subquery,
        }
    }

    /// Render this spec into one SQL statement, terminated by `;` and a
    /// newline.
    #[must_use]
    pub fn render(&self) -> String {
        match self {
            QuerySpec::Insert { table, assignments } => render_insert(table, assignments),
            QuerySpec::Update {
                table,
                assignments,
                condition,
            } => render_update(table, assignments, condition),
            QuerySpec::Delete { table, condition } => render_delete(table, condition),
            QuerySpec::Search {
                table,
                columns,
                condition,
            } => render_search(table, columns, condition),
            QuerySpec::Aggregate { table, expression } => render_aggregate(table, expression),
            QuerySpec::Sort {
                table,
                columns,
                condition,
                order_by,
            } => render_sort(table, columns, condition, order_by),
            QuerySpec::Join {
                left,
                right,
                join_type,
                predicate,
            } => render_join(left, right, join_type, predicate),
            QuerySpec::Group {
                table,
                expression,
                group_by,
            } => render_group(table, expression, group_by),
            QuerySpec::Subquery {
                table,
                subquery_table,
                column,
            } => render_subquery(table, subquery_table, column),
        }
    }
}

/// Parse a `key1=value1,key2=value2,...` line into assignments, preserving
/// input order.
///
/// # Errors
/// Returns `WorkbenchError::InputError` when a pair has no `=`.
pub fn parse_assignments(input: &str) -> Result<Vec<Assignment>, WorkbenchError> {
    input
        .split(',')
        .map(|pair| {
            let pair = pair.trim();
            let (column, value) = pair.split_once('=').ok_or_else(|| {
                WorkbenchError::InputError(format!(
                    "expected key=value, got {pair:?}"
                ))
            })?;
            Ok(Assignment {
                column: column.to_string(),
                value: value.to_string(),
            })
        })
        .collect()
}
