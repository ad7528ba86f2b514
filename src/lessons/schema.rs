//! Output schemas for lesson and quiz replies, and validation of parsed replies.
//!
//! The schema constrains what the provider produces, but nothing guarantees
//! the provider honours it, so every reply is checked before use.

use crate::ai::Schema;
use crate::models::{Language, LessonDraft, QuizQuestion};
use crate::{policy, Error, Result};

/// Sections in every generated lesson except the refusal lesson.
pub const LESSON_SECTIONS: usize = 3;
pub const MIN_QUIZ_OPTIONS: usize = 3;
pub const MAX_QUIZ_OPTIONS: usize = 4;

pub fn lesson_schema() -> Schema {
    Schema::object(vec![
        ("title", Schema::string()),
        ("emoji", Schema::string().with_description("A single emoji for the topic")),
        ("introduction", Schema::string()),
        (
            "sections",
            Schema::array(Schema::object(vec![
                ("heading", Schema::string()),
                ("content", Schema::string()),
                (
                    "visualDescription",
                    Schema::string()
                        .with_description("Illustration description; no text in the image"),
                ),
            ])),
        ),
        ("funFact", Schema::string()),
        ("objectives", Schema::array(Schema::string())),
    ])
}

pub fn quiz_schema() -> Schema {
    Schema::array(Schema::object(vec![
        ("question", Schema::string()),
        ("options", Schema::array(Schema::string())),
        (
            "correctAnswerIndex",
            Schema::integer().with_description("Zero-based index into options"),
        ),
        ("explanation", Schema::string()),
    ]))
}

pub fn parse_lesson_draft(text: &str) -> Result<LessonDraft> {
    let draft: LessonDraft = serde_json::from_str(text.trim()).map_err(|e| {
        tracing::error!("Failed to parse lesson reply: {}\nBody: {}", e, text);
        Error::InvalidResponse(format!("Failed to parse lesson reply: {}", e))
    })?;
    validate_lesson_draft(&draft)?;
    Ok(draft)
}

pub fn validate_lesson_draft(draft: &LessonDraft) -> Result<()> {
    if draft.title.trim().is_empty() {
        return Err(Error::InvalidResponse("Lesson has an empty title".to_string()));
    }
    if draft.sections.is_empty() {
        return Err(Error::InvalidResponse("Lesson has no sections".to_string()));
    }
    for (index, section) in draft.sections.iter().enumerate() {
        if section.heading.trim().is_empty() || section.content.trim().is_empty() {
            return Err(Error::InvalidResponse(format!(
                "Section {} is missing a heading or content",
                index
            )));
        }
    }
    Ok(())
}

/// Check a freshly generated lesson has the template's section count.
///
/// The refusal lesson for `language` is the only reply allowed a single section.
pub fn validate_section_count(draft: &LessonDraft, language: Language) -> Result<()> {
    let count = draft.sections.len();
    if count == LESSON_SECTIONS || (count == 1 && policy::is_refusal(draft, language)) {
        return Ok(());
    }
    Err(Error::InvalidResponse(format!(
        "expected {} sections, got {}",
        LESSON_SECTIONS, count
    )))
}

pub fn parse_quiz(text: &str) -> Result<Vec<QuizQuestion>> {
    let questions: Vec<QuizQuestion> = serde_json::from_str(text.trim()).map_err(|e| {
        tracing::error!("Failed to parse quiz reply: {}\nBody: {}", e, text);
        Error::InvalidResponse(format!("Failed to parse quiz reply: {}", e))
    })?;
    for (index, question) in questions.iter().enumerate() {
        validate_quiz_question(question).map_err(|e| {
            Error::InvalidResponse(format!("Quiz question {}: {}", index, e))
        })?;
    }
    Ok(questions)
}

pub fn validate_quiz_question(question: &QuizQuestion) -> Result<()> {
    if question.question.trim().is_empty() {
        return Err(Error::InvalidResponse("empty question text".to_string()));
    }
    let count = question.options.len();
    if !(MIN_QUIZ_OPTIONS..=MAX_QUIZ_OPTIONS).contains(&count) {
        return Err(Error::InvalidResponse(format!(
            "expected {}-{} options, got {}",
            MIN_QUIZ_OPTIONS, MAX_QUIZ_OPTIONS, count
        )));
    }
    if question.correct_answer_index >= count {
        return Err(Error::InvalidResponse(format!(
            "correctAnswerIndex {} is out of bounds for {} options",
            question.correct_answer_index, count
        )));
    }
    Ok(())
}
