//! The interactive session loop: menus, field gathering, and the
//! execute/commit/rollback cycle.

mod prompt;

pub use prompt::{Prompt, RustylinePrompt};

use tracing::error;

use crate::error::WorkbenchError;
use crate::gateway::ExecutionGateway;
use crate::results::ResultSet;
use crate::router::{MenuChoice, route};
use crate::session::{Session, TxEnding};
use crate::statement::{ActionKind, QuerySpec, parse_assignments};

const IDLE_MENU: &str = "Select an option:\n 1. SQL Command\n 2. Start transaction\n 3. Quit";
const ACTIVE_MENU: &str = "Select an option:\n 1. SQL Command\n 2. End transaction\n 3. Quit";
const ACTION_MENU: &str = "Select an action:\n 1. Insert\n 2. Update\n 3. Delete\n 4. Search\n 5. Aggregate Functions\n 6. Sorting\n 7. Joins\n 8. Grouping\n 9. Subqueries";
const ENDING_MENU: &str = "Select an option:\n 1. Commit\n 2. Rollback";

const COLUMNS_PROMPT: &str = "Enter columns to select (comma-separated, empty for all): ";
const CONDITIONS_PROMPT: &str = "Enter conditions (empty for no conditions): ";

const INVALID_INTEGER: &str = "Please enter a valid integer.";
const UNRECOGNIZED: &str = "Oops! Unrecognized command.";

/// Drives repeated rounds of route, gather, build, and execute until the
/// operator quits.
///
/// Owns the session state, the prompt, and the gateway; nothing else retains
/// a copy of the buffer or the transaction flag.
pub struct SessionLoop<P, G> {
    prompt: P,
    gateway: G,
    session: Session,
}

impl<P: Prompt, G: ExecutionGateway> SessionLoop<P, G> {
    pub fn new(prompt: P, gateway: G) -> Self {
        Self {
            prompt,
            gateway,
            session: Session::new(),
        }
    }

    #[must_use]
    pub fn session(&self) -> &Session {
        &self.session
    }

    #[must_use]
    pub fn gateway(&self) -> &G {
        &self.gateway
    }

    pub fn into_parts(self) -> (P, G, Session) {
        (self.prompt, self.gateway, self.session)
    }

    /// Run until the quit selection (or until input is exhausted). Backend
    /// failures are reported and the loop resumes; they never end the
    /// session.
    ///
    /// # Errors
    /// Returns an error only when the input source itself fails.
    pub async fn run(&mut self) -> Result<(), WorkbenchError> {
        loop {
            let menu = if self.session.is_active() {
                ACTIVE_MENU
            } else {
                IDLE_MENU
            };
            let Some(choice) = self.select(menu, 3)? else {
                break;
            };
            match choice {
                MenuChoice::Invalid => println!("{INVALID_INTEGER}"),
                MenuChoice::Unrecognized => println!("{UNRECOGNIZED}"),
                MenuChoice::Entry(2) if self.session.is_active() => {
                    self.end_transaction().await?;
                }
                MenuChoice::Entry(2) => {
                    self.session.begin();
                    println!("Transaction started.");
                }
                MenuChoice::Entry(3) => break,
                MenuChoice::Entry(_) => self.command_cycle().await?,
            }
        }
        Ok(())
    }

    /// Print a menu and classify the next line. `None` means end of input.
    fn select(&mut self, menu: &str, max: i64) -> Result<Option<MenuChoice>, WorkbenchError> {
        println!("{menu}");
        let Some(line) = self.prompt.read_line("")? else {
            return Ok(None);
        };
        Ok(Some(route(&line, max)))
    }

    async fn command_cycle(&mut self) -> Result<(), WorkbenchError> {
        let Some(choice) = self.select(ACTION_MENU, 9)? else {
            return Ok(());
        };
        let kind = match choice {
            MenuChoice::Invalid => {
                println!("{INVALID_INTEGER}");
                return Ok(());
            }
            MenuChoice::Unrecognized => {
                println!("{UNRECOGNIZED}");
                return Ok(());
            }
            MenuChoice::Entry(n) => match ActionKind::from_menu(n) {
                Some(kind) => kind,
                None => {
                    println!("{UNRECOGNIZED}");
                    return Ok(());
                }
            },
        };

        let Some(spec) = self.gather(kind)? else {
            return Ok(());
        };
        let statement = spec.render();
        self.session.push(&statement);

        if self.session.is_active() {
            // Statements wait for the envelope terminator.
            print!("{statement}");
            return Ok(());
        }
        self.execute_buffer(Some(kind)).await
    }

    async fn end_transaction(&mut self) -> Result<(), WorkbenchError> {
        let ending = self.select_ending()?;
        self.session.finish(ending);
        println!("Transaction ended.");
        self.execute_buffer(None).await
    }

    fn select_ending(&mut self) -> Result<TxEnding, WorkbenchError> {
        loop {
            println!("{ENDING_MENU}");
            let Some(line) = self.prompt.read_line("")? else {
                return Ok(TxEnding::Rollback);
            };
            match route(&line, 2) {
                MenuChoice::Invalid => println!("{INVALID_INTEGER}"),
                MenuChoice::Entry(1) => return Ok(TxEnding::Commit),
                // Any other integer rolls back.
                _ => return Ok(TxEnding::Rollback),
            }
        }
    }

    /// Submit the accumulated buffer. `action` is the idle-cycle action, or
    /// `None` for an envelope; idle successes commit immediately, failures
    /// always roll back, and the buffer is gone either way.
    async fn execute_buffer(&mut self, action: Option<ActionKind>) -> Result<(), WorkbenchError> {
        let blob = self.session.take();
        match self.gateway.submit(&blob).await {
            Ok(()) => {
                if let Some(kind) = action {
                    if kind.returns_rows() {
                        match self.gateway.fetch_all().await {
                            Ok(result_set) => print_rows(&result_set),
                            Err(err) => {
                                report_failure(&blob, &err);
                                self.settle_rollback().await;
                                return Ok(());
                            }
                        }
                    }
                }
                print!("{blob}");
                if action.is_some() {
                    if let Err(err) = self.gateway.commit().await {
                        report_failure(&blob, &err);
                    }
                }
            }
            Err(err) => {
                report_failure(&blob, &err);
                self.settle_rollback().await;
            }
        }
        Ok(())
    }

    async fn settle_rollback(&mut self) {
        if let Err(err) = self.gateway.rollback().await {
            error!("rollback failed: {err}");
        }
    }

    fn gather(&mut self, kind: ActionKind) -> Result<Option<QuerySpec>, WorkbenchError> {
        if kind == ActionKind::Join {
            let Some(left) = self.field_lower("Enter the first table name: ")? else {
                return Ok(None);
            };
            let Some(right) = self.field_lower("Enter the second table name: ")? else {
                return Ok(None);
            };
            let Some(join_type) = self.field_upper("Enter the join type: ")? else {
                return Ok(None);
            };
            let Some(predicate) = self.field_lower("Enter the join condition: ")? else {
                return Ok(None);
            };
            return Ok(Some(QuerySpec::Join {
                left,
                right,
                join_type,
                predicate,
            }));
        }

        let Some(table) = self.field_lower("Enter table name: ")? else {
            return Ok(None);
        };

        let spec = match kind {
            ActionKind::Insert | ActionKind::Update => {
                let data_prompt = format!(
                    "Enter data to {} (format: key1=value1,key2=value2,...): ",
                    kind.label()
                );
                let Some(data) = self.field_raw(&data_prompt)? else {
                    return Ok(None);
                };
                let assignments = match parse_assignments(&data) {
                    Ok(assignments) => assignments,
                    Err(err) => {
                        println!("{err}");
                        return Ok(None);
                    }
                };
                if kind == ActionKind::Insert {
                    QuerySpec::Insert { table, assignments }
                } else {
                    let Some(condition) = self.field_lower(CONDITIONS_PROMPT)? else {
                        return Ok(None);
                    };
                    QuerySpec::Update {
                        table,
                        assignments,
                        condition,
                    }
                }
            }
            ActionKind::Delete => {
                let Some(condition) = self.field_lower(CONDITIONS_PROMPT)? else {
                    return Ok(None);
                };
                QuerySpec::Delete { table, condition }
            }
            ActionKind::Search => {
                let Some(columns) = self.field_lower(COLUMNS_PROMPT)? else {
                    return Ok(None);
                };
                let Some(condition) = self.field_lower(CONDITIONS_PROMPT)? else {
                    return Ok(None);
                };
                QuerySpec::Search {
                    table,
                    columns,
                    condition,
                }
            }
            ActionKind::Aggregate => {
                let Some(expression) = self.field_trim(
                    "Enter an aggregate function (e.g., SUM(column_name), AVG(column_name), ...): ",
                )?
                else {
                    return Ok(None);
                };
                QuerySpec::Aggregate { table, expression }
            }
            ActionKind::Sort => {
                let Some(columns) = self.field_lower(COLUMNS_PROMPT)? else {
                    return Ok(None);
                };
                let Some(condition) = self.field_lower(CONDITIONS_PROMPT)? else {
                    return Ok(None);
                };
                let Some(order_by) = self.field_trim(
                    "Enter a column to sort by and a direction (format: column_name ASC/DESC): ",
                )?
                else {
                    return Ok(None);
                };
                QuerySpec::Sort {
                    table,
                    columns,
                    condition,
                    order_by,
                }
            }
            ActionKind::Group => {
                let Some(expression) = self.field_trim(
                    "Enter a column followed by an aggregate function (format: column_name(s), AGGREGATE(column_name)): ",
                )?
                else {
                    return Ok(None);
                };
                let Some(group_by) = self.field_trim("Enter a column to group by: ")? else {
                    return Ok(None);
                };
                QuerySpec::Group {
                    table,
                    expression,
                    group_by,
                }
            }
            ActionKind::Subquery => {
                let Some(subquery_table) = self.field_lower("Enter the subquery table name: ")?
                else {
                    return Ok(None);
                };
                let Some(column) = self
                    .field_lower("Enter the column to search for in the subquery table: ")?
                else {
                    return Ok(None);
                };
                QuerySpec::Subquery {
                    table,
                    subquery_table,
                    column,
                }
            }
            ActionKind::Join => unreachable!("handled before the table prompt"),
        };
        Ok(Some(spec))
    }

    fn field_lower(&mut self, text: &str) -> Result<Option<String>, WorkbenchError> {
        Ok(self
            .prompt
            .read_line(text)?
            .map(|line| line.trim().to_lowercase()))
    }

    fn field_upper(&mut self, text: &str) -> Result<Option<String>, WorkbenchError> {
        Ok(self
            .prompt
            .read_line(text)?
            .map(|line| line.trim().to_uppercase()))
    }

    fn field_trim(&mut self, text: &str) -> Result<Option<String>, WorkbenchError> {
        Ok(self
            .prompt
            .read_line(text)?
            .map(|line| line.trim().to_string()))
    }

    fn field_raw(&mut self, text: &str) -> Result<Option<String>, WorkbenchError> {
        self.prompt.read_line(text)
    }
}

fn print_rows(result_set: &ResultSet) {
    for row in &result_set.results {
        let line = row
            .values
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join(", ");
        println!("({line})");
    }
}

fn report_failure(blob: &str, err: &WorkbenchError) {
    println!("You provided an invalid query:\n{blob}{err}");
}
