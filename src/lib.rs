pub mod api;
pub mod config;
pub mod database;
pub mod errors;
pub mod logging;
pub mod models;
pub mod pagination;
pub mod quiz;
pub mod trivia_service;

pub use config::Config;
pub use database::{Database, TriviaRepository};
pub use errors::*;
pub use models::*;
pub use pagination::{paginate, QUESTIONS_PER_PAGE};
pub use quiz::{QuizScope, QuizSelector};
pub use trivia_service::TriviaService;
