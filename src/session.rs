//! Statement accumulation and the transaction envelope state machine.

/// Whether a transaction envelope is currently open.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TransactionState {
    #[default]
    Idle,
    Active,
}

/// How an open envelope is finished.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TxEnding {
    Commit,
    Rollback,
}

/// Owner of the pending statement text and the transaction flag.
///
/// While `Idle`, the buffer holds at most one rendered statement and is
/// drained immediately after each execution. While `Active`, statements
/// accumulate behind the `BEGIN TRANSACTION;` opener until [`Session::finish`]
/// seals the envelope with `COMMIT;` or `ROLLBACK;`.
#[derive(Debug, Default)]
pub struct Session {
    buffer: String,
    state: TransactionState,
}

impl Session {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn state(&self) -> TransactionState {
        self.state
    }

    #[must_use]
    pub fn is_active(&self) -> bool {
        self.state == TransactionState::Active
    }

    /// The accumulated, not-yet-executed statement text.
    #[must_use]
    pub fn buffer(&self) -> &str {
        &self.buffer
    }

    /// Open a transaction envelope. Resets the buffer to the opener line.
    pub fn begin(&mut self) {
        self.buffer = "BEGIN TRANSACTION;\n".to_string();
        self.state = TransactionState::Active;
    }

    /// Append one rendered statement to the buffer.
    pub fn push(&mut self, statement: &str) {
        self.buffer.push_str(statement);
    }

    /// Seal the open envelope with its terminator and drop back to `Idle`.
    ///
    /// The caller submits the buffer afterwards; the state transition happens
    /// here unconditionally so a failed submission still leaves the session
    /// out of the envelope.
    pub fn finish(&mut self, ending: TxEnding) {
        match ending {
            TxEnding::Commit => self.buffer.push_str("COMMIT;\n"),
            TxEnding::Rollback => self.buffer.push_str("ROLLBACK;\n"),
        }
        self.state = TransactionState::Idle;
    }

    /// Take the accumulated text for submission, leaving the buffer empty.
    #[must_use]
    pub fn take(&mut self) -> String {
        std::mem::take(&mut self.buffer)
    }
}
