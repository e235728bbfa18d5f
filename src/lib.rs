//! Guided interactive SQL workbench over PostgreSQL.
//!
//! The operator assembles statements through numbered menus; rendered text
//! accumulates in a session buffer and is submitted either immediately or as
//! an explicit `BEGIN TRANSACTION; ... COMMIT;/ROLLBACK;` envelope.

pub mod console;
pub mod error;
pub mod gateway;
pub mod postgres;
pub mod results;
pub mod router;
pub mod session;
pub mod statement;
pub mod types;

pub use console::{Prompt, RustylinePrompt, SessionLoop};
pub use error::WorkbenchError;
pub use gateway::ExecutionGateway;
pub use postgres::{ConnectSettings, PostgresGateway};
pub use results::{DbRow, ResultSet};
pub use router::{MenuChoice, route};
pub use session::{Session, TransactionState, TxEnding};
pub use statement::{ActionKind, Assignment, QuerySpec, parse_assignments};
pub use types::RowValues;
