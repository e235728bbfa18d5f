use std::collections::VecDeque;
use std::sync::Arc;

use async_trait::async_trait;
use sql_workbench::{
    ExecutionGateway, Prompt, ResultSet, RowValues, Session, SessionLoop, TransactionState,
    WorkbenchError,
};

struct ScriptedPrompt {
    lines: VecDeque<String>,
}

impl ScriptedPrompt {
    fn new(lines: &[&str]) -> Self {
        Self {
            lines: lines.iter().map(|s| (*s).to_string()).collect(),
        }
    }
}

impl Prompt for ScriptedPrompt {
    fn read_line(&mut self, _text: &str) -> Result<Option<String>, WorkbenchError> {
        Ok(self.lines.pop_front())
    }
}

/// Records every gateway interaction; optionally fails submissions whose
/// text contains a marker.
#[derive(Default)]
struct RecordingGateway {
    submitted: Vec<String>,
    commits: usize,
    rollbacks: usize,
    fetches: usize,
    fail_on: Option<&'static str>,
    pending: Option<ResultSet>,
}

impl RecordingGateway {
    fn failing_on(marker: &'static str) -> Self {
        Self {
            fail_on: Some(marker),
            ..Self::default()
        }
    }
}

#[async_trait]
impl ExecutionGateway for RecordingGateway {
    async fn submit(&mut self, sql: &str) -> Result<(), WorkbenchError> {
        self.pending = None;
        self.submitted.push(sql.to_string());
        if let Some(marker) = self.fail_on {
            if sql.contains(marker) {
                return Err(WorkbenchError::ExecutionError(
                    "update or delete violates foreign key constraint".to_string(),
                ));
            }
        }
        let mut result_set = ResultSet::with_capacity(1);
        if sql.starts_with("SELECT") {
            result_set.set_column_names(Arc::new(vec!["id".to_string(), "name".to_string()]));
            result_set.add_row_values(vec![RowValues::Int(1), RowValues::Text("bob".to_string())]);
        }
        self.pending = Some(result_set);
        Ok(())
    }

    async fn fetch_all(&mut self) -> Result<ResultSet, WorkbenchError> {
        self.fetches += 1;
        self.pending.take().ok_or_else(|| {
            WorkbenchError::ExecutionError("no submitted result to fetch".to_string())
        })
    }

    async fn commit(&mut self) -> Result<(), WorkbenchError> {
        self.commits += 1;
        Ok(())
    }

    async fn rollback(&mut self) -> Result<(), WorkbenchError> {
        self.rollbacks += 1;
        Ok(())
    }
}

async fn run_script(lines: &[&str], gateway: RecordingGateway) -> (RecordingGateway, Session) {
    let mut console = SessionLoop::new(ScriptedPrompt::new(lines), gateway);
    console.run().await.unwrap();
    let (_, gateway, session) = console.into_parts();
    (gateway, session)
}

#[tokio::test]
async fn idle_insert_submits_immediately_and_commits() {
    let script = ["1", "1", "users", "name=bob,age=30", "3"];
    let (gateway, session) = run_script(&script, RecordingGateway::default()).await;

    assert_eq!(
        gateway.submitted,
        vec!["INSERT INTO users (name, age) VALUES (bob, 30);\n"]
    );
    assert_eq!(gateway.commits, 1);
    assert_eq!(gateway.rollbacks, 0);
    assert_eq!(gateway.fetches, 0);
    assert!(session.buffer().is_empty());
    assert_eq!(session.state(), TransactionState::Idle);
}

#[tokio::test]
async fn committed_envelope_submits_one_blob_without_extra_commit() {
    let script = [
        "2", // start transaction
        "1", "1", "orders", "id=1", // insert, buffered
        "1", "3", "orders", "id=2", // delete, buffered
        "2", "1", // end transaction, commit
        "3",
    ];
    let (gateway, session) = run_script(&script, RecordingGateway::default()).await;

    assert_eq!(
        gateway.submitted,
        vec![
            "BEGIN TRANSACTION;\nINSERT INTO orders (id) VALUES (1);\nDELETE FROM orders WHERE id=2;\nCOMMIT;\n"
        ]
    );
    assert_eq!(gateway.commits, 0);
    assert_eq!(gateway.rollbacks, 0);
    assert!(session.buffer().is_empty());
    assert_eq!(session.state(), TransactionState::Idle);
}

#[tokio::test]
async fn idle_search_fetches_rows_and_commits() {
    let script = ["1", "4", "users", "", "", "3"];
    let (gateway, session) = run_script(&script, RecordingGateway::default()).await;

    assert_eq!(gateway.submitted, vec!["SELECT * FROM users;\n"]);
    assert_eq!(gateway.fetches, 1);
    assert_eq!(gateway.commits, 1);
    assert!(session.buffer().is_empty());
}

#[tokio::test]
async fn non_integer_menu_input_mutates_nothing() {
    let script = ["abc", "3"];
    let (gateway, session) = run_script(&script, RecordingGateway::default()).await;

    assert!(gateway.submitted.is_empty());
    assert_eq!(gateway.commits, 0);
    assert_eq!(gateway.rollbacks, 0);
    assert!(session.buffer().is_empty());
    assert_eq!(session.state(), TransactionState::Idle);
}

#[tokio::test]
async fn non_integer_action_input_mutates_nothing() {
    let script = ["1", "abc", "3"];
    let (gateway, session) = run_script(&script, RecordingGateway::default()).await;

    assert!(gateway.submitted.is_empty());
    assert!(session.buffer().is_empty());
}

#[tokio::test]
async fn out_of_range_selections_are_reported_and_skipped() {
    let script = ["5", "1", "12", "3"];
    let (gateway, session) = run_script(&script, RecordingGateway::default()).await;

    assert!(gateway.submitted.is_empty());
    assert!(session.buffer().is_empty());
}

#[tokio::test]
async fn failed_idle_delete_rolls_back_and_loop_continues() {
    let script = [
        "1", "3", "users", "id=7", // delete that the backend rejects
        "1", "4", "users", "", "", // loop continues: a search still works
        "3",
    ];
    let (gateway, session) = run_script(&script, RecordingGateway::failing_on("DELETE")).await;

    assert_eq!(gateway.submitted.len(), 2);
    assert_eq!(gateway.submitted[0], "DELETE FROM users WHERE id=7;\n");
    assert_eq!(gateway.rollbacks, 1);
    assert_eq!(gateway.commits, 1); // only the search commits
    assert!(session.buffer().is_empty());
    assert_eq!(session.state(), TransactionState::Idle);
}

#[tokio::test]
async fn failed_envelope_rolls_back_and_discards_the_buffer() {
    let script = ["2", "1", "1", "orders", "id=1", "2", "1", "3"];
    let (gateway, session) = run_script(&script, RecordingGateway::failing_on("INSERT")).await;

    assert_eq!(gateway.submitted.len(), 1);
    assert_eq!(gateway.rollbacks, 1);
    assert_eq!(gateway.commits, 0);
    assert!(session.buffer().is_empty());
    assert_eq!(session.state(), TransactionState::Idle);
}

#[tokio::test]
async fn join_fields_are_cased_like_the_prompts_promise() {
    let script = [
        "1",
        "7",
        "Employees",
        "Departments",
        "inner join",
        "Employees.dept_id = Departments.id",
        "3",
    ];
    let (gateway, _) = run_script(&script, RecordingGateway::default()).await;

    assert_eq!(
        gateway.submitted,
        vec!["SELECT * FROM employees INNER JOIN departments ON employees.dept_id = departments.id;\n"]
    );
    assert_eq!(gateway.fetches, 1);
}

#[tokio::test]
async fn malformed_assignments_abandon_the_cycle() {
    let script = ["1", "1", "users", "garbage", "3"];
    let (gateway, session) = run_script(&script, RecordingGateway::default()).await;

    assert!(gateway.submitted.is_empty());
    assert!(session.buffer().is_empty());
}

#[tokio::test]
async fn repeated_idle_builds_submit_identical_text() {
    let script = ["1", "4", "users", "", "", "1", "4", "users", "", "", "3"];
    let (gateway, _) = run_script(&script, RecordingGateway::default()).await;

    assert_eq!(gateway.submitted.len(), 2);
    assert_eq!(gateway.submitted[0], gateway.submitted[1]);
}

#[tokio::test]
async fn statements_buffered_while_active_are_not_submitted() {
    // Quit while the envelope is still open: nothing was ever sent.
    let script = ["2", "1", "1", "orders", "id=1", "3"];
    let (gateway, session) = run_script(&script, RecordingGateway::default()).await;

    assert!(gateway.submitted.is_empty());
    assert_eq!(session.state(), TransactionState::Active);
    assert_eq!(
        session.buffer(),
        "BEGIN TRANSACTION;\nINSERT INTO orders (id) VALUES (1);\n"
    );
}
