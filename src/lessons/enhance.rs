use super::{schema, LessonService};
use crate::ai::StructuredPrompt;
use crate::models::{Language, LessonData, LessonDraft};
use crate::{prompts, Result};
use tracing::{info, warn};

impl LessonService {
    /// Polish a lesson's language, falling back to the unchanged lesson.
    ///
    /// Never fails. Use [`LessonService::try_enhance_lesson_language`] to
    /// learn whether the revision actually happened.
    pub async fn enhance_lesson_language(
        &self,
        lesson: &LessonData,
        language: Language,
    ) -> LessonData {
        match self.try_enhance_lesson_language(lesson, language).await {
            Ok(revised) => revised,
            Err(e) => {
                warn!(
                    "Language enhancement of '{}' failed, keeping original: {}",
                    lesson.title, e
                );
                lesson.clone()
            }
        }
    }

    /// Polish a lesson's language, surfacing any failure.
    ///
    /// Teacher, class, language and approval are copied from `lesson`, and each
    /// section keeps the image of the original section at the same position.
    pub async fn try_enhance_lesson_language(
        &self,
        lesson: &LessonData,
        language: Language,
    ) -> Result<LessonData> {
        info!("Enhancing language of '{}' ({})", lesson.title, language);

        let canonical = serde_json::to_string_pretty(&LessonDraft::from(lesson))?;
        let instruction = prompts::render(
            prompts::ENHANCE,
            &[
                ("language", language.name()),
                ("register", language.register()),
                ("lesson", &canonical),
            ],
        );

        let prompt = StructuredPrompt::new(instruction, schema::lesson_schema());
        let text = self.text.generate_text(&prompt).await?;
        let draft = schema::parse_lesson_draft(&text)?;

        let mut revised = draft.into_lesson(
            lesson.teacher_name.clone(),
            lesson.class_name.clone(),
            lesson.language,
        );
        revised.is_approved = lesson.is_approved;

        if revised.sections.len() != lesson.sections.len() {
            warn!(
                "Enhanced lesson has {} sections, original had {}; images realigned by position",
                revised.sections.len(),
                lesson.sections.len()
            );
        }
        for (section, original) in revised.sections.iter_mut().zip(&lesson.sections) {
            section.image_url = original.image_url.clone();
        }

        info!("Enhanced language of '{}'", revised.title);
        Ok(revised)
    }
}
