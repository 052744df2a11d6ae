use parking_lot::RwLock;
use std::sync::Arc;

use crate::output::{ExamOutput, Message};

#[derive(Clone, Default)]
pub struct MockExamOutput {
    messages: Arc<RwLock<Vec<Message>>>,
}

impl MockExamOutput {
    pub fn new() -> Self {
        Default::default()
    }

    pub fn flush(&self) -> Vec<Message> {
        std::mem::replace(&mut *self.messages.write(), Vec::new())
    }

    pub fn contains_message(&self, message: &Message) -> bool {
        self.messages.read().iter().any(|m| m == message)
    }

    pub fn contains_error(&self) -> bool {
        self.messages.read().iter().any(|m| match m {
            Message::Error(_) => true,
            _ => false,
        })
    }
}

impl ExamOutput for MockExamOutput {
    fn say(&self, message: &Message) {
        self.messages.write().push(message.clone());
    }
}
