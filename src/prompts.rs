pub const LESSON: &str = include_str!("../data/prompts/lesson.txt");
pub const POLICY: &str = include_str!("../data/prompts/policy.txt");
pub const TEMPLATE_MATH: &str = include_str!("../data/prompts/template_math.txt");
pub const TEMPLATE_LITERACY: &str = include_str!("../data/prompts/template_literacy.txt");
pub const TEMPLATE_GENERAL: &str = include_str!("../data/prompts/template_general.txt");
pub const REFERENCE_IMAGE: &str = include_str!("../data/prompts/reference_image.txt");
pub const ENHANCE: &str = include_str!("../data/prompts/enhance.txt");
pub const QUIZ: &str = include_str!("../data/prompts/quiz.txt");
pub const IMAGE: &str = include_str!("../data/prompts/image.txt");

/// Replace `{{key}}` placeholders in a template string.
pub fn render(template: &str, vars: &[(&str, &str)]) -> String {
    let mut result = template.to_string();
    for (key, value) in vars {
        result = result.replace(&format!("{{{{{}}}}}", key), value);
    }
    result
}
