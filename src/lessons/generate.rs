use super::{schema, LessonService};
use crate::ai::{PromptPart, StructuredPrompt};
use crate::models::{AgeGroup, LessonData, LessonRequest, LessonTemplate};
use crate::{policy, prompts, Result};
use futures::future::join_all;
use tracing::{info, warn};

impl LessonService {
    /// Generate a lesson for `request` and illustrate its sections.
    ///
    /// Fails when the provider returns no text or an unusable reply. Section
    /// illustrations are best effort: a failed image leaves that section
    /// without an `image_url` and never fails the lesson.
    pub async fn generate_lesson(&self, request: &LessonRequest) -> Result<LessonData> {
        info!(
            "Generating {} lesson on '{}' ({}, {})",
            request.subject.label(),
            request.topic,
            request.language,
            request.age_group.describe()
        );

        if policy::is_religious_topic(&request.topic) {
            warn!(
                "Topic '{}' is outside the content policy, returning refusal lesson",
                request.topic
            );
            return Ok(policy::refusal_draft(request.language).into_lesson(
                request.teacher_name.clone(),
                request.class_name.clone(),
                request.language,
            ));
        }

        let prompt = build_lesson_prompt(request);
        let text = self.text.generate_text(&prompt).await?;
        let draft = schema::parse_lesson_draft(&text)?;
        schema::validate_section_count(&draft, request.language)?;

        if policy::is_refusal(&draft, request.language) {
            info!("Provider declined topic '{}' under the content policy", request.topic);
            return Ok(draft.into_lesson(
                request.teacher_name.clone(),
                request.class_name.clone(),
                request.language,
            ));
        }

        let mut lesson = draft.into_lesson(
            request.teacher_name.clone(),
            request.class_name.clone(),
            request.language,
        );

        info!(
            "Generated lesson '{}' with {} sections",
            lesson.title,
            lesson.sections.len()
        );

        self.illustrate_sections(&mut lesson, request.age_group).await;

        Ok(lesson)
    }

    /// Request one illustration per described section, all at once.
    async fn illustrate_sections(&self, lesson: &mut LessonData, age_group: AgeGroup) {
        let jobs: Vec<(usize, String)> = lesson
            .sections
            .iter()
            .enumerate()
            .filter(|(_, section)| !section.visual_description.trim().is_empty())
            .map(|(index, section)| {
                (
                    index,
                    build_image_prompt(&section.visual_description, age_group),
                )
            })
            .collect();

        if jobs.is_empty() {
            return;
        }

        info!("Requesting {} section illustrations", jobs.len());

        let results = join_all(jobs.into_iter().map(|(index, prompt)| async move {
            (index, self.image.generate_image(&prompt).await)
        }))
        .await;

        let mut attached = 0;
        for (index, result) in results {
            match result {
                Ok(Some(image)) => {
                    lesson.sections[index].image_url = Some(image.to_data_uri());
                    attached += 1;
                }
                Ok(None) => warn!("[section {}] Provider returned no image", index),
                Err(e) => warn!("[section {}] Image generation failed: {}", index, e),
            }
        }

        info!(
            "Attached {} of {} section illustrations",
            attached,
            lesson.sections.len()
        );
    }
}

fn subject_template(template: LessonTemplate) -> &'static str {
    match template {
        LessonTemplate::Math => prompts::TEMPLATE_MATH,
        LessonTemplate::Literacy => prompts::TEMPLATE_LITERACY,
        LessonTemplate::General => prompts::TEMPLATE_GENERAL,
    }
}

pub(crate) fn build_lesson_prompt(request: &LessonRequest) -> StructuredPrompt {
    let language = request.language;
    let refusal = policy::refusal(language);

    let policy_clause = prompts::render(
        prompts::POLICY,
        &[
            ("language", language.name()),
            ("title", refusal.title),
            ("emoji", policy::REFUSAL_EMOJI),
            ("introduction", refusal.introduction),
            ("heading", refusal.heading),
            ("content", refusal.content),
        ],
    );

    // Topic goes in last so text inside it is never treated as a placeholder.
    let mut instruction = prompts::render(
        prompts::LESSON,
        &[
            ("template", subject_template(request.subject.template())),
            ("policy", &policy_clause),
            ("age", request.age_group.describe()),
            ("subject", request.subject.label()),
            ("tone", request.tone.describe()),
            ("language", language.name()),
            ("register", language.register()),
            ("topic", &request.topic),
        ],
    );

    let mut parts = Vec::new();
    if let Some(image) = &request.reference_image {
        parts.push(PromptPart::Image(image.clone()));
        instruction.push('\n');
        instruction.push_str(prompts::REFERENCE_IMAGE);
    }
    parts.push(PromptPart::Text(instruction));

    StructuredPrompt {
        system_instruction: None,
        parts,
        response_schema: Some(schema::lesson_schema()),
    }
}

pub(crate) fn build_image_prompt(description: &str, age_group: AgeGroup) -> String {
    prompts::render(
        prompts::IMAGE,
        &[("age", age_group.describe()), ("description", description)],
    )
}
