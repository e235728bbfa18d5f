use super::Assignment;

/// Render `INSERT INTO <table> (<keys>) VALUES (<values>);`.
#[must_use]
pub fn render_insert(table: &str, assignments: &[Assignment]) -> String {
    let columns = assignments
        .iter()
        .map(|a| a.column.as_str())
        .collect::<Vec<_>>()
        .join(", ");
    let values = assignments
        .iter()
        .map(|a| a.value.as_str())
        .collect::<Vec<_>>()
        .join(", ");
    format!("INSERT INTO {table} ({columns}) VALUES ({values});\n")
}

/// Render `UPDATE <table> SET k = v, ... [WHERE <condition>];`.
#[must_use]
pub fn render_update(table: &str, assignments: &[Assignment], condition: &str) -> String {
    let set_clause = assignments
        .iter()
        .map(|a| format!("{} = {}", a.column, a.value))
        .collect::<Vec<_>>()
        .join(", ");
    let mut sql = format!("UPDATE {table} SET {set_clause}");
    if !condition.is_empty() {
        sql.push_str(" WHERE ");
        sql.push_str(condition);
    }
    sql.push_str(";\n");
    sql
}

/// Render `DELETE FROM <table> [WHERE <condition>];`.
#[must_use]
pub fn render_delete(table: &str, condition: &str) -> String {
    let mut sql = format!("DELETE FROM {table}");
    if !condition.is_empty() {
        sql.push_str(" WHERE ");
        sql.push_str(condition);
    }
    sql.push_str(";\n");
    sql
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::statement::parse_assignments;

    #[test]
    fn insert_lists_keys_and_values_in_order() {
        let assignments = parse_assignments("id=1").unwrap();
        assert_eq!(
            render_insert("orders", &assignments),
            "INSERT INTO orders (id) VALUES (1);\n"
        );
    }

    #[test]
    fn update_joins_set_clause_with_spaces() {
        let assignments = parse_assignments("name=bob,age=30").unwrap();
        assert_eq!(
            render_update("users", &assignments, "id=1"),
            "UPDATE users SET name = bob, age = 30 WHERE id=1;\n"
        );
        assert_eq!(
            render_update("users", &assignments, ""),
            "UPDATE users SET name = bob, age = 30;\n"
        );
    }

    #[test]
    fn delete_condition_is_optional() {
        assert_eq!(render_delete("orders", "id=2"), "DELETE FROM orders WHERE id=2;\n");
        assert_eq!(render_delete("orders", ""), "DELETE FROM orders;\n");
    }
}
