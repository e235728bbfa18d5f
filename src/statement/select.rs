/// Render `SELECT <cols|*> FROM <table> [WHERE <condition>];`.
#[must_use]
pub fn render_search(table: &str, columns: &str, condition: &str) -> String {
    let select_clause = if columns.is_empty() { "*" } else { columns };
    let mut sql = format!("SELECT {select_clause} FROM {table}");
    if !condition.is_empty() {
        sql.push_str(" WHERE ");
        sql.push_str(condition);
    }
    sql.push_str(";\n");
    sql
}

/// Render `SELECT <expression> FROM <table>;`.
#[must_use]
pub fn render_aggregate(table: &str, expression: &str) -> String {
    format!("SELECT {expression} FROM {table};\n")
}

/// Render `SELECT <cols|*> FROM <table> [WHERE <condition>] ORDER BY <spec>;`.
#[must_use]
pub fn render_sort(table: &str, columns: &str, condition: &str, order_by: &str) -> String {
    let select_clause = if columns.is_empty() { "*" } else { columns };
    let mut sql = format!("SELECT {select_clause} FROM {table}");
    if !condition.is_empty() {
        sql.push_str(" WHERE ");
        sql.push_str(condition);
    }
    sql.push_str(" ORDER BY ");
    sql.push_str(order_by);
    sql.push_str(";\n");
    sql
}

/// Render `SELECT * FROM <left> <JOINTYPE> <right> ON <predicate>;`.
#[must_use]
pub fn render_join(left: &str, right: &str, join_type: &str, predicate: &str) -> String {
    format!("SELECT * FROM {left} {join_type} {right} ON {predicate};\n")
}

/// Render `SELECT <expression> FROM <table> GROUP BY <column>;`.
#[must_use]
pub fn render_group(table: &str, expression: &str, group_by: &str) -> String {
    format!("SELECT {expression} FROM {table} GROUP BY {group_by};\n")
}

/// Render `SELECT * FROM <table> WHERE <column> IN (SELECT <column> FROM <subtable>);`.
#[must_use]
pub fn render_subquery(table: &str, subquery_table: &str, column: &str) -> String {
    format!("SELECT * FROM {table} WHERE {column} IN (SELECT {column} FROM {subquery_table});\n")
}
