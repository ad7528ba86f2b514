use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use lesson_generator::models::{
    AgeGroup, Config, Language, LessonData, LessonRequest, ReferenceImage, Subject, Tone,
};
use lesson_generator::LessonService;
use serde::Serialize;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Debug, Parser)]
#[command(name = "lesson-generator")]
#[command(about = "Generate illustrated lessons and quizzes")]
struct CliArgs {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Generate a new lesson.
    Lesson(LessonArgs),
    /// Polish the language of a lesson JSON file.
    Enhance {
        #[arg(value_name = "LESSON_JSON")]
        lesson: PathBuf,
        #[arg(long, default_value = "en")]
        language: Language,
        #[arg(long, value_name = "PATH")]
        output: Option<PathBuf>,
    },
    /// Generate a quiz from a lesson JSON file.
    Quiz {
        #[arg(value_name = "LESSON_JSON")]
        lesson: PathBuf,
        #[arg(long, default_value = "en")]
        language: Language,
        #[arg(long, value_name = "PATH")]
        output: Option<PathBuf>,
    },
}

#[derive(Debug, Args)]
struct LessonArgs {
    #[arg(long)]
    topic: String,
    #[arg(long, default_value = "general")]
    subject: Subject,
    #[arg(long, default_value = "playful")]
    tone: Tone,
    #[arg(long, default_value = "early-primary")]
    age: AgeGroup,
    #[arg(long, default_value = "en")]
    language: Language,
    #[arg(long)]
    teacher: String,
    #[arg(long = "class")]
    class_name: String,
    /// Image file the lesson should draw on.
    #[arg(long, value_name = "PATH")]
    reference_image: Option<PathBuf>,
    /// Polish the generated lesson's language before writing it.
    #[arg(long)]
    enhance: bool,
    #[arg(long, value_name = "PATH")]
    output: Option<PathBuf>,
}

impl LessonArgs {
    fn to_request(&self) -> Result<LessonRequest> {
        let reference_image = self
            .reference_image
            .as_deref()
            .map(load_reference_image)
            .transpose()?;

        Ok(LessonRequest {
            topic: self.topic.clone(),
            subject: self.subject,
            tone: self.tone,
            age_group: self.age,
            language: self.language,
            teacher_name: self.teacher.clone(),
            class_name: self.class_name.clone(),
            reference_image,
        })
    }
}

fn load_reference_image(path: &Path) -> Result<ReferenceImage> {
    let bytes = fs::read(path)
        .with_context(|| format!("Failed to read reference image {}", path.display()))?;
    Ok(ReferenceImage::from_bytes(&bytes))
}

fn read_lesson(path: &Path) -> Result<LessonData> {
    let json = fs::read_to_string(path)
        .with_context(|| format!("Failed to read lesson {}", path.display()))?;
    serde_json::from_str(&json)
        .with_context(|| format!("Invalid lesson JSON in {}", path.display()))
}

fn write_output<T: Serialize>(value: &T, output: Option<&Path>) -> Result<()> {
    let json = serde_json::to_string_pretty(value)?;
    match output {
        Some(path) => {
            fs::write(path, &json)
                .with_context(|| format!("Failed to write {}", path.display()))?;
            info!("Saved output to {}", path.display());
        }
        None => println!("{}", json),
    }
    Ok(())
}

async fn run(service: &LessonService, command: Command) -> Result<()> {
    match command {
        Command::Lesson(args) => {
            let request = args.to_request()?;
            let mut lesson = service.generate_lesson(&request).await?;
            if args.enhance {
                lesson = service
                    .enhance_lesson_language(&lesson, request.language)
                    .await;
            }
            write_output(&lesson, args.output.as_deref())
        }
        Command::Enhance {
            lesson,
            language,
            output,
        } => {
            let lesson = read_lesson(&lesson)?;
            let revised = service.enhance_lesson_language(&lesson, language).await;
            write_output(&revised, output.as_deref())
        }
        Command::Quiz {
            lesson,
            language,
            output,
        } => {
            let lesson = read_lesson(&lesson)?;
            let questions = service.generate_quiz(&lesson, language).await?;
            write_output(&questions, output.as_deref())
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "lesson_generator=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    info!("Starting lesson-generator");

    let args = CliArgs::parse();

    let config = match Config::from_env() {
        Ok(config) => config,
        Err(e) => {
            error!("Failed to load configuration: {}", e);
            std::process::exit(1);
        }
    };

    let service = LessonService::from_config(&config);

    match run(&service, args.command).await {
        Ok(()) => {
            info!("Done");
            Ok(())
        }
        Err(e) => {
            error!("Generation failed: {:#}", e);
            std::process::exit(1);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use lesson_generator::models::Section;

    #[test]
    fn test_lesson_command_parses_with_defaults() {
        let args = CliArgs::try_parse_from([
            "lesson-generator",
            "lesson",
            "--topic",
            "Volcanoes",
            "--teacher",
            "Ms. Huda",
            "--class",
            "2B",
        ])
        .unwrap();

        let Command::Lesson(lesson) = args.command else {
            panic!("expected lesson command");
        };
        let request = lesson.to_request().unwrap();
        assert_eq!(request.subject, Subject::General);
        assert_eq!(request.language, Language::English);
        assert_eq!(request.age_group, AgeGroup::EarlyPrimary);
        assert!(request.reference_image.is_none());
        assert!(!lesson.enhance);
    }

    #[test]
    fn test_invalid_language_is_rejected() {
        let err = CliArgs::try_parse_from([
            "lesson-generator",
            "quiz",
            "lesson.json",
            "--language",
            "fr",
        ])
        .unwrap_err();
        assert!(err.to_string().contains("Unsupported language"));
    }

    #[test]
    fn test_reference_image_is_loaded_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("ref.jpg");
        fs::write(&path, [0xFF, 0xD8, 0xFF, 0xE0]).unwrap();

        let image = load_reference_image(&path).unwrap();
        assert_eq!(image.mime_type, "image/jpeg");
    }

    #[test]
    fn test_lesson_file_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("lesson.json");
        let lesson = LessonData {
            title: "Shapes".to_string(),
            emoji: "🔺".to_string(),
            introduction: "Shapes are everywhere".to_string(),
            sections: vec![Section {
                heading: "Circles".to_string(),
                content: "A circle is round".to_string(),
                visual_description: "A ball".to_string(),
                image_url: None,
            }],
            fun_fact: String::new(),
            objectives: Vec::new(),
            teacher_name: "Mr. Sam".to_string(),
            class_name: "1A".to_string(),
            language: Language::English,
            is_approved: false,
        };

        write_output(&lesson, Some(&path)).unwrap();
        assert_eq!(read_lesson(&path).unwrap(), lesson);
    }

    #[test]
    fn test_read_lesson_reports_invalid_json() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("broken.json");
        fs::write(&path, "{").unwrap();

        let err = read_lesson(&path).unwrap_err();
        assert!(err.to_string().contains("Invalid lesson JSON"));
    }
}
