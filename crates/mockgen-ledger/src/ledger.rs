//! The call ledger: an ordered queue of expected calls.
//!
//! Expectations are appended with [`Ledger::append_call`] and consumed
//! strictly in append order by [`Ledger::next`]. A single mutex guards the
//! records and the cursor, so concurrent callers consume expectations in
//! FIFO order no matter which caller arrives first. The cursor never moves
//! backwards and a consumed record is never handed out again.

use std::any::Any;
use std::sync::{Mutex, MutexGuard, PoisonError};

use crate::error::{CastError, LedgerError};
use crate::handle::TestHandle;

/// A recorded argument or result, type-erased.
pub type Value = Box<dyn Any + Send>;

/// One recorded expectation.
#[derive(Debug)]
struct ExpectedCall {
    name: String,
    /// `None` once the call has been consumed.
    payload: Option<Vec<Value>>,
}

#[derive(Debug, Default)]
struct LedgerState {
    records: Vec<ExpectedCall>,
    cursor: usize,
}

/// Mutex-guarded sequence of expectations plus a consumption cursor.
#[derive(Debug, Default)]
pub struct Ledger {
    state: Mutex<LedgerState>,
}

/// A consumed expectation, handed to the mock method that matched it.
#[derive(Debug)]
pub struct Call {
    index: usize,
    name: String,
    payload: Vec<Option<Value>>,
}

impl Ledger {
    pub fn new() -> Self {
        Ledger::default()
    }

    fn lock(&self) -> MutexGuard<'_, LedgerState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Appends an expectation for `name` with its inputs followed by its
    /// outputs.
    pub fn append_call(&self, name: impl Into<String>, payload: Vec<Value>) {
        let name = name.into();
        let mut state = self.lock();
        tracing::debug!(
            method = %name,
            position = state.records.len(),
            values = payload.len(),
            "expectation appended"
        );
        state.records.push(ExpectedCall {
            name,
            payload: Some(payload),
        });
    }

    /// Consumes the expectation at the cursor if it is for `expected`.
    ///
    /// A method mismatch leaves the record in place; only a successful
    /// match advances the cursor.
    pub fn try_next(&self, expected: &str) -> Result<Call, LedgerError> {
        let mut state = self.lock();
        let index = state.cursor;
        let recorded = state.records.len();

        let record = match state.records.get_mut(index) {
            Some(record) => record,
            None => {
                return Err(LedgerError::Exhausted {
                    recorded,
                    called: expected.to_string(),
                })
            }
        };

        if record.name != expected {
            return Err(LedgerError::MethodMismatch {
                index,
                recorded: record.name.clone(),
                called: expected.to_string(),
            });
        }

        let payload = record.payload.take().unwrap_or_default();
        let name = record.name.clone();
        state.cursor += 1;
        tracing::debug!(method = %name, index, "expectation consumed");

        Ok(Call {
            index,
            name,
            payload: payload.into_iter().map(Some).collect(),
        })
    }

    /// Consumes the next expectation, failing the test fatally on
    /// exhaustion or method mismatch.
    pub fn next(&self, handle: &TestHandle, expected: &str) -> Call {
        match self.try_next(expected) {
            Ok(call) => call,
            Err(err) => handle.fatal(err.to_string()),
        }
    }

    /// Returns `true` if every expectation has been consumed.
    ///
    /// Otherwise records a non-fatal failure on `handle` listing the
    /// unconsumed methods and returns `false`.
    pub fn assert_no_calls_left(&self, handle: &TestHandle) -> bool {
        let missing = self.remaining();
        if missing.is_empty() {
            return true;
        }
        handle.error(format!(
            "calls which were not done: [{}]",
            missing.join(", ")
        ));
        false
    }

    /// Names of the expectations not yet consumed, in order.
    pub fn remaining(&self) -> Vec<String> {
        let state = self.lock();
        state.records[state.cursor..]
            .iter()
            .map(|r| r.name.clone())
            .collect()
    }

    /// Index of the next expectation to consume.
    pub fn cursor(&self) -> usize {
        self.lock().cursor
    }

    /// Number of expectations ever appended.
    pub fn len(&self) -> usize {
        self.lock().records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Call {
    /// Position of this call in the ledger.
    pub fn index(&self) -> usize {
        self.index
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Number of values recorded with the call.
    pub fn len(&self) -> usize {
        self.payload.len()
    }

    pub fn is_empty(&self) -> bool {
        self.payload.is_empty()
    }

    /// Borrows the value at `position`.
    pub fn try_get(&self, position: usize) -> Result<&Value, CastError> {
        self.payload
            .get(position)
            .and_then(|slot| slot.as_ref())
            .ok_or(CastError::MissingSlot {
                index: self.index,
                position,
            })
    }

    /// Moves the value at `position` out of the call.
    pub fn try_take(&mut self, position: usize) -> Result<Value, CastError> {
        let index = self.index;
        self.payload
            .get_mut(position)
            .and_then(Option::take)
            .ok_or(CastError::MissingSlot { index, position })
    }

    /// Borrows the value at `position`.
    ///
    /// # Panics
    ///
    /// If there is no value there; generated mocks only ask for positions
    /// their expectation helper recorded.
    pub fn get(&self, position: usize) -> &Value {
        match self.try_get(position) {
            Ok(value) => value,
            Err(err) => panic!("{} ({})", err, self.name),
        }
    }

    /// Moves the value at `position` out of the call.
    ///
    /// # Panics
    ///
    /// If there is no value there or it was already taken.
    pub fn take(&mut self, position: usize) -> Value {
        match self.try_take(position) {
            Ok(value) => value,
            Err(err) => panic!("{} ({})", err, self.name),
        }
    }
}
