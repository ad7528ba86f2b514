use super::{schema, LessonService};
use crate::ai::StructuredPrompt;
use crate::models::{Language, LessonData, QuizQuestion};
use crate::{prompts, Result};
use tracing::info;

impl LessonService {
    /// Generate multiple-choice questions from a lesson's introduction and sections.
    ///
    /// The prompt asks for three questions; the count is not enforced, but
    /// every returned question has 3-4 options and an in-bounds answer index.
    pub async fn generate_quiz(
        &self,
        lesson: &LessonData,
        language: Language,
    ) -> Result<Vec<QuizQuestion>> {
        info!("Generating quiz for '{}' ({})", lesson.title, language);

        let instruction = prompts::render(
            prompts::QUIZ,
            &[
                ("language", language.name()),
                ("title", &lesson.title),
                ("summary", &lesson.summary()),
            ],
        );

        let prompt = StructuredPrompt::new(instruction, schema::quiz_schema());
        let text = self.text.generate_text(&prompt).await?;
        let questions = schema::parse_quiz(&text)?;

        info!("Generated {} quiz questions", questions.len());
        Ok(questions)
    }
}
