//! Data models and structures
//!
//! Defines lesson requests, generated lesson and quiz data, the raw reply
//! shapes returned by the generation service, and runtime configuration.

use crate::ai::mime;
use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

const DEFAULT_TEXT_MODEL: &str = "gemini-2.5-flash";
const DEFAULT_IMAGE_MODEL: &str = "gemini-2.5-flash-image";

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum Language {
    #[serde(rename = "ar")]
    Arabic,
    #[serde(rename = "en")]
    English,
}

impl Language {
    pub fn code(self) -> &'static str {
        match self {
            Language::Arabic => "ar",
            Language::English => "en",
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Language::Arabic => "Arabic",
            Language::English => "English",
        }
    }

    /// Writing register the generator is asked to use for this language.
    pub fn register(self) -> &'static str {
        match self {
            Language::Arabic => "Modern Standard Arabic (الفصحى) with correct grammar and full diacritics where they aid young readers",
            Language::English => "simple, clear educational English suitable for young learners",
        }
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for Language {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "ar" | "arabic" => Ok(Language::Arabic),
            "en" | "english" => Ok(Language::English),
            other => Err(format!("Unsupported language '{}'. Expected: ar, en", other)),
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub enum Subject {
    Mathematics,
    Literacy,
    Science,
    SocialStudies,
    General,
}

/// Instruction template family a subject is taught with.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LessonTemplate {
    Math,
    Literacy,
    General,
}

impl Subject {
    pub fn label(self) -> &'static str {
        match self {
            Subject::Mathematics => "Mathematics",
            Subject::Literacy => "Literacy",
            Subject::Science => "Science",
            Subject::SocialStudies => "Social Studies",
            Subject::General => "General Knowledge",
        }
    }

    pub fn template(self) -> LessonTemplate {
        match self {
            Subject::Mathematics => LessonTemplate::Math,
            Subject::Literacy => LessonTemplate::Literacy,
            Subject::Science | Subject::SocialStudies | Subject::General => {
                LessonTemplate::General
            }
        }
    }
}

impl FromStr for Subject {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "math" | "maths" | "mathematics" => Ok(Subject::Mathematics),
            "literacy" | "reading" => Ok(Subject::Literacy),
            "science" => Ok(Subject::Science),
            "social-studies" | "social" => Ok(Subject::SocialStudies),
            "general" => Ok(Subject::General),
            other => Err(format!(
                "Unsupported subject '{}'. Expected: mathematics, literacy, science, social-studies, general",
                other
            )),
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub enum AgeGroup {
    Preschool,
    EarlyPrimary,
    UpperPrimary,
}

impl AgeGroup {
    pub fn describe(self) -> &'static str {
        match self {
            AgeGroup::Preschool => "3-5 years old",
            AgeGroup::EarlyPrimary => "6-8 years old",
            AgeGroup::UpperPrimary => "9-12 years old",
        }
    }
}

impl FromStr for AgeGroup {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "preschool" | "3-5" => Ok(AgeGroup::Preschool),
            "early-primary" | "6-8" => Ok(AgeGroup::EarlyPrimary),
            "upper-primary" | "9-12" => Ok(AgeGroup::UpperPrimary),
            other => Err(format!(
                "Unsupported age group '{}'. Expected: preschool, early-primary, upper-primary",
                other
            )),
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Tone {
    Playful,
    Calm,
    Storytelling,
    Formal,
}

impl Tone {
    pub fn describe(self) -> &'static str {
        match self {
            Tone::Playful => "playful and energetic",
            Tone::Calm => "calm and gentle",
            Tone::Storytelling => "story-driven, like a short adventure",
            Tone::Formal => "clear and structured",
        }
    }
}

impl FromStr for Tone {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "playful" => Ok(Tone::Playful),
            "calm" => Ok(Tone::Calm),
            "storytelling" | "story" => Ok(Tone::Storytelling),
            "formal" => Ok(Tone::Formal),
            other => Err(format!(
                "Unsupported tone '{}'. Expected: playful, calm, storytelling, formal",
                other
            )),
        }
    }
}

/// Image supplied by the teacher for the generator to draw on.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ReferenceImage {
    pub mime_type: String,
    /// Base64 payload, without any `data:` prefix.
    pub data: String,
}

impl ReferenceImage {
    pub fn from_bytes(bytes: &[u8]) -> Self {
        use base64::Engine as _;
        Self {
            mime_type: mime::detect_image_mime(bytes).to_string(),
            data: base64::engine::general_purpose::STANDARD.encode(bytes),
        }
    }

    pub fn from_data_uri(uri: &str) -> Result<Self> {
        let (mime_type, data) = mime::parse_data_uri(uri)?;
        Ok(Self {
            mime_type: mime_type.to_string(),
            data: data.to_string(),
        })
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LessonRequest {
    pub topic: String,
    pub subject: Subject,
    pub tone: Tone,
    pub age_group: AgeGroup,
    pub language: Language,
    pub teacher_name: String,
    pub class_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reference_image: Option<ReferenceImage>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Section {
    pub heading: String,
    pub content: String,
    /// Description of the illustration; never drawn as literal text.
    #[serde(default)]
    pub visual_description: String,
    /// `data:<mime>;base64,<payload>` when an illustration was generated.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct LessonData {
    pub title: String,
    pub emoji: String,
    pub introduction: String,
    pub sections: Vec<Section>,
    #[serde(default)]
    pub fun_fact: String,
    #[serde(default)]
    pub objectives: Vec<String>,
    pub teacher_name: String,
    pub class_name: String,
    pub language: Language,
    #[serde(default)]
    pub is_approved: bool,
}

impl LessonData {
    /// Introduction followed by every section body, used as quiz source material.
    pub fn summary(&self) -> String {
        std::iter::once(self.introduction.as_str())
            .chain(self.sections.iter().map(|s| s.content.as_str()))
            .filter(|text| !text.trim().is_empty())
            .collect::<Vec<_>>()
            .join("\n\n")
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct QuizQuestion {
    pub question: String,
    pub options: Vec<String>,
    pub correct_answer_index: usize,
    pub explanation: String,
}

/// Section as produced by the generation service.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct SectionDraft {
    pub heading: String,
    pub content: String,
    #[serde(default)]
    pub visual_description: String,
}

/// Lesson as produced by the generation service, before application fields
/// are injected.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct LessonDraft {
    pub title: String,
    pub emoji: String,
    pub introduction: String,
    pub sections: Vec<SectionDraft>,
    #[serde(default)]
    pub fun_fact: String,
    #[serde(default)]
    pub objectives: Vec<String>,
}

impl LessonDraft {
    pub fn into_lesson(
        self,
        teacher_name: String,
        class_name: String,
        language: Language,
    ) -> LessonData {
        LessonData {
            title: self.title,
            emoji: self.emoji,
            introduction: self.introduction,
            sections: self
                .sections
                .into_iter()
                .map(|s| Section {
                    heading: s.heading,
                    content: s.content,
                    visual_description: s.visual_description,
                    image_url: None,
                })
                .collect(),
            fun_fact: self.fun_fact,
            objectives: self.objectives,
            teacher_name,
            class_name,
            language,
            is_approved: false,
        }
    }
}

impl From<&LessonData> for LessonDraft {
    fn from(lesson: &LessonData) -> Self {
        Self {
            title: lesson.title.clone(),
            emoji: lesson.emoji.clone(),
            introduction: lesson.introduction.clone(),
            sections: lesson
                .sections
                .iter()
                .map(|s| SectionDraft {
                    heading: s.heading.clone(),
                    content: s.content.clone(),
                    visual_description: s.visual_description.clone(),
                })
                .collect(),
            fun_fact: lesson.fun_fact.clone(),
            objectives: lesson.objectives.clone(),
        }
    }
}

// Configuration
#[derive(Debug, Clone)]
pub struct Config {
    pub gemini_api_key: String,
    pub text_model: String,
    pub image_model: String,
    pub gemini_base_url: Option<String>,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let non_empty = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        Ok(Self {
            gemini_api_key: non_empty("GEMINI_API_KEY")
                .ok_or_else(|| Error::Config("GEMINI_API_KEY not set".to_string()))?,
            text_model: non_empty("LESSON_TEXT_MODEL")
                .unwrap_or_else(|| DEFAULT_TEXT_MODEL.to_string()),
            image_model: non_empty("LESSON_IMAGE_MODEL")
                .unwrap_or_else(|| DEFAULT_IMAGE_MODEL.to_string()),
            gemini_base_url: non_empty("GEMINI_BASE_URL"),
        })
    }
}
