//! Generator for classroom lessons - builds illustrated lessons and quizzes with Gemini
//!
//! Turns a teacher's request into a structured lesson with one illustration per
//! section, polishes existing lessons' language, and writes short quizzes.

pub mod ai;
pub mod error;
pub mod lessons;
pub mod models;
pub mod policy;
pub mod prompts;

pub use error::{Error, Result};
pub use lessons::{LessonService, LessonServices};
