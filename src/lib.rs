pub mod bank;
pub mod commands;
pub mod exam;
pub mod output;
pub mod quizmaster;
pub mod settings;
pub mod storage;
