// Coaching requests and advice parsing

use crate::api::TextGenerator;
use crate::error::AppError;
use tracing::{info, instrument};

pub const PROMPT_REQUIRED: &str = "Prompt is required";

pub const SYSTEM_INSTRUCTION: &str = "You are an experienced League of Legends coach who provides clear, actionable advice based on player statistics.
Format your response exactly with these four sections using these exact headers:

Strengths:
[List the player's key strengths in bullet points]

Weaknesses:
[List the main areas where the player needs improvement in bullet points]

Improvements:
[Provide specific, actionable advice for improvement in bullet points]

Champion Recommendations:
[Suggest 2-3 champions that would suit their playstyle and explain why in bullet points]

Keep each section concise and focused on actionable insights.";

pub struct CoachingService<'a> {
    generator: &'a dyn TextGenerator,
}

impl<'a> CoachingService<'a> {
    pub fn new(generator: &'a dyn TextGenerator) -> Self {
        CoachingService { generator }
    }

    /// Forwards `prompt` with the coaching system instruction and returns the
    /// generated advice verbatim. No retry, no cache.
    #[instrument(skip_all, fields(prompt_len = prompt.map(str::len).unwrap_or(0)))]
    pub fn advise(&self, prompt: Option<&str>) -> Result<String, AppError> {
        let prompt = prompt
            .filter(|p| !p.trim().is_empty())
            .ok_or_else(|| AppError::InvalidRequest(PROMPT_REQUIRED.to_string()))?;

        let advice = self.generator.generate(SYSTEM_INSTRUCTION, prompt)?;
        info!(advice_len = advice.len(), "coaching advice generated");
        Ok(advice)
    }
}

/// Advice split on the four section headers the system instruction asks for.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AdviceSections {
    pub strengths: String,
    pub weaknesses: String,
    pub improvements: String,
    pub champions: String,
}

#[derive(Clone, Copy)]
enum Section {
    Strengths,
    Weaknesses,
    Improvements,
    Champions,
}

const HEADERS: [(&str, Section); 4] = [
    ("strengths:", Section::Strengths),
    ("weaknesses:", Section::Weaknesses),
    ("improvements:", Section::Improvements),
    ("champion recommendations:", Section::Champions),
];

impl AdviceSections {
    /// Headers match case-insensitively and may carry markdown emphasis
    /// (`**Strengths:**`). Text before the first header is ignored.
    pub fn parse(advice: &str) -> Self {
        let mut sections = AdviceSections::default();
        let mut current: Option<Section> = None;

        for line in advice.lines() {
            let bare = line.trim().trim_matches(|c| c == '*' || c == '#').trim();
            let lower = bare.to_lowercase();

            if let Some((header, section)) = HEADERS.iter().find(|(h, _)| lower.starts_with(h)) {
                current = Some(*section);
                let rest = bare.get(header.len()..).unwrap_or("").trim();
                if !rest.is_empty() {
                    sections.slot(*section).push_str(rest);
                }
                continue;
            }

            if let Some(section) = current {
                let slot = sections.slot(section);
                if !slot.is_empty() {
                    slot.push('\n');
                }
                slot.push_str(line.trim_end());
            }
        }

        for slot in [
            &mut sections.strengths,
            &mut sections.weaknesses,
            &mut sections.improvements,
            &mut sections.champions,
        ] {
            *slot = slot.trim().to_string();
        }
        sections
    }

    fn slot(&mut self, section: Section) -> &mut String {
        match section {
            Section::Strengths => &mut self.strengths,
            Section::Weaknesses => &mut self.weaknesses,
            Section::Improvements => &mut self.improvements,
            Section::Champions => &mut self.champions,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.strengths.is_empty()
            && self.weaknesses.is_empty()
            && self.improvements.is_empty()
            && self.champions.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    struct RecordingGenerator {
        reply: Result<String, u16>,
        seen: Mutex<Vec<(String, String)>>,
    }

    impl RecordingGenerator {
        fn replying(reply: Result<String, u16>) -> Self {
            RecordingGenerator {
                reply,
                seen: Mutex::new(Vec::new()),
            }
        }
    }

    impl TextGenerator for RecordingGenerator {
        fn generate(&self, system: &str, prompt: &str) -> Result<String, AppError> {
            self.seen
                .lock()
                .unwrap()
                .push((system.to_string(), prompt.to_string()));
            self.reply.clone().map_err(|status| AppError::Upstream {
                service: "OpenAI",
                status,
                body: "boom".to_string(),
            })
        }
    }

    #[test]
    fn missing_or_blank_prompt_is_rejected() {
        let generator = RecordingGenerator::replying(Ok("unused".to_string()));
        let service = CoachingService::new(&generator);

        for prompt in [None, Some(""), Some("   ")] {
            let err = service.advise(prompt).unwrap_err();
            assert_eq!(err.to_string(), PROMPT_REQUIRED);
        }
        assert!(generator.seen.lock().unwrap().is_empty());
    }

    #[test]
    fn forwards_prompt_with_system_instruction() {
        let generator = RecordingGenerator::replying(Ok("Strengths:\n- vision".to_string()));
        let advice = CoachingService::new(&generator)
            .advise(Some("analyze my games"))
            .unwrap();

        assert_eq!(advice, "Strengths:\n- vision");
        let seen = generator.seen.lock().unwrap();
        assert_eq!(seen[0].0, SYSTEM_INSTRUCTION);
        assert_eq!(seen[0].1, "analyze my games");
    }

    #[test]
    fn provider_errors_propagate() {
        let generator = RecordingGenerator::replying(Err(502));
        let err = CoachingService::new(&generator)
            .advise(Some("prompt"))
            .unwrap_err();
        assert!(matches!(err, AppError::Upstream { status: 502, .. }));
    }

    #[test]
    fn parses_four_sections() {
        let advice = "Here is my analysis.\n\n\
            **Strengths:**\n- Strong laning\n- Good CS\n\n\
            Weaknesses:\n- Dies too often\n\n\
            ## Improvements:\n- Ward more\n\n\
            Champion Recommendations: Orianna\n- Syndra";
        let sections = AdviceSections::parse(advice);

        assert_eq!(sections.strengths, "- Strong laning\n- Good CS");
        assert_eq!(sections.weaknesses, "- Dies too often");
        assert_eq!(sections.improvements, "- Ward more");
        assert_eq!(sections.champions, "Orianna\n- Syndra");
    }

    #[test]
    fn unstructured_advice_has_no_sections() {
        assert!(AdviceSections::parse("Just play more.").is_empty());
    }
}
