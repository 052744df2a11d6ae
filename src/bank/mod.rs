use log::{info, warn};

use crate::storage::{Storage, StorageError};

pub mod parser;
pub mod question;

pub use parser::{parse, parse_with_mode, ParseMode};
pub use question::Question;


pub const DEFAULT_SLOT: &str = "quiz_bank";

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct BankStatus {
    pub count: usize,
}

/// The question bank, mirrored in memory and in a single storage slot.
pub struct BankStore<S: Storage> {
    storage: S,
    slot: String,
    questions: Vec<Question>,
}

impl<S: Storage> BankStore<S> {
    pub fn open(storage: S, slot: &str) -> Self {
        let mut store = BankStore {
            storage,
            slot: slot.to_owned(),
            questions: Vec::new(),
        };
        store.load();
        store
    }

    /// Re-reads the bank from storage. A missing or unreadable slot is an empty bank.
    pub fn load(&mut self) -> &[Question] {
        self.questions = match self.storage.read(&self.slot) {
            Ok(Some(contents)) => match parse(&contents) {
                Ok(questions) => questions,
                Err(e) => {
                    warn!("Ignoring unreadable question bank in slot {}: {}", self.slot, e);
                    Vec::new()
                }
            },
            Ok(None) => Vec::new(),
            Err(e) => {
                warn!("Could not read question bank from slot {}: {}", self.slot, e);
                Vec::new()
            }
        };
        info!("Loaded {} questions from slot {}", self.questions.len(), self.slot);
        &self.questions
    }

    pub fn replace(&mut self, questions: Vec<Question>) -> Result<(), StorageError> {
        let contents = serde_json::to_string_pretty(&questions)?;
        self.storage.write(&self.slot, &contents)?;
        info!("Saved {} questions to slot {}", questions.len(), self.slot);
        self.questions = questions;
        Ok(())
    }

    pub fn clear(&mut self) -> Result<(), StorageError> {
        self.storage.remove(&self.slot)?;
        self.questions.clear();
        info!("Cleared question bank in slot {}", self.slot);
        Ok(())
    }

    pub fn status(&self) -> BankStatus {
        BankStatus {
            count: self.questions.len(),
        }
    }

    pub fn questions(&self) -> &[Question] {
        &self.questions
    }
}
