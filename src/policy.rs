//! Content policy for lesson topics.
//!
//! Religious topics are never taught. The generator is instructed to answer
//! them with a fixed refusal lesson, and [`is_religious_topic`] catches the
//! obvious cases locally so they never reach the provider at all.

use crate::models::{Language, LessonDraft, SectionDraft};

pub const REFUSAL_EMOJI: &str = "⚠️";

/// Fixed wording of the refusal lesson in one language.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Refusal {
    pub title: &'static str,
    pub introduction: &'static str,
    pub heading: &'static str,
    pub content: &'static str,
}

pub fn refusal(language: Language) -> Refusal {
    match language {
        Language::English => Refusal {
            title: "Content Not Available",
            introduction: "We are sorry, but lessons about this topic are not available.",
            heading: "Notice",
            content: "This topic is outside the subjects covered by our lessons. Please choose a different topic.",
        },
        Language::Arabic => Refusal {
            title: "المحتوى غير متاح",
            introduction: "نعتذر، الدروس حول هذا الموضوع غير متاحة.",
            heading: "تنبيه",
            content: "هذا الموضوع خارج نطاق المواد التي تغطيها دروسنا. يرجى اختيار موضوع آخر.",
        },
    }
}

/// The refusal lesson as the generator is told to produce it.
pub fn refusal_draft(language: Language) -> LessonDraft {
    let refusal = refusal(language);
    LessonDraft {
        title: refusal.title.to_string(),
        emoji: REFUSAL_EMOJI.to_string(),
        introduction: refusal.introduction.to_string(),
        sections: vec![SectionDraft {
            heading: refusal.heading.to_string(),
            content: refusal.content.to_string(),
            visual_description: String::new(),
        }],
        fun_fact: String::new(),
        objectives: Vec::new(),
    }
}

const RELIGIOUS_TERMS: &[&str] = &[
    // English
    "religion",
    "religions",
    "religious",
    "theology",
    "god",
    "gods",
    "goddess",
    "deity",
    "deities",
    "allah",
    "prophet",
    "prophets",
    "jesus",
    "christ",
    "muhammad",
    "mohammed",
    "moses",
    "buddha",
    "krishna",
    "quran",
    "koran",
    "bible",
    "torah",
    "gospel",
    "scripture",
    "church",
    "mosque",
    "synagogue",
    "prayer",
    "prayers",
    "worship",
    "hajj",
    "ramadan",
    "baptism",
    "sacrament",
    // Arabic, matched with or without the definite article
    "دين",
    "ديني",
    "الله",
    "نبي",
    "رسول",
    "قرآن",
    "القرآن",
    "إنجيل",
    "توراة",
    "مسجد",
    "كنيسة",
    "صلاة",
    "عبادة",
    "حج",
    "رمضان",
    "ملائكة",
];

/// Whole-word check of a topic against known religious terms.
pub fn is_religious_topic(topic: &str) -> bool {
    // Arabic diacritics are combining marks and would otherwise split words.
    let normalized: String = topic
        .to_lowercase()
        .chars()
        .filter(|c| !('\u{064B}'..='\u{0652}').contains(c))
        .collect();

    normalized
        .split(|c: char| !c.is_alphanumeric())
        .filter(|token| !token.is_empty())
        .any(|token| {
            let unprefixed = strip_conjunction(token);
            let bare = unprefixed.strip_prefix("ال").unwrap_or(unprefixed);
            [token, unprefixed, bare]
                .iter()
                .any(|candidate| RELIGIOUS_TERMS.contains(candidate))
        })
}

/// Drops a leading و, ب or ف attached to a definite article,
/// so "والصلاة" is checked as "الصلاة".
fn strip_conjunction(token: &str) -> &str {
    ["و", "ب", "ف"]
        .iter()
        .find_map(|prefix| {
            token
                .strip_prefix(*prefix)
                .filter(|rest| rest.starts_with("ال"))
        })
        .unwrap_or(token)
}

/// True when a generated lesson is the refusal lesson for `language`.
pub fn is_refusal(draft: &LessonDraft, language: Language) -> bool {
    draft.title.trim() == refusal(language).title
}
