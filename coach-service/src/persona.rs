//! Coach personas and prompt assembly.
//!
//! Everything here is a pure function of the request: the same persona tag,
//! task list and placement always produce the same [`PromptPlan`].

use std::fmt;
use std::str::FromStr;

/// Directive shared by every persona.
const BASE_INSTRUCTION: &str = "You are a personal AI coach and motivational mentor. \
Your answers must be inspiring, useful and consistent with your chosen role.";

const WISE_STYLE: &str = "Your style: the Wise Philosopher. Speak calmly, use metaphors and \
quotes, focus on root causes and long-term goals. Avoid fuss and haste.";

const ENERGIZER_STYLE: &str = "Your style: the Energizer. Speak with high energy, keep it short \
and positive. Use exclamation marks and emoji (no more than 3-4 per answer) and push for \
immediate action.";

const STRATEGIST_STYLE: &str = "Your style: the Strategist-Planner. Speak in a structured way. \
Split the answer into points, propose concrete steps and use lists. Focus on optimization and \
efficiency.";

const DEFAULT_STYLE: &str = "Your style: a supportive coach. Be warm, encouraging and practical.";

const TASKS_HEADER: &str = "Current tasks (take them into account in your answer when relevant):";

/// Closed set of coach personas a caller can select with `coachType`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum CoachPersona {
    Wise,
    Energizer,
    Strategist,
    #[default]
    Default,
}

impl CoachPersona {
    pub const ALL: [CoachPersona; 4] = [
        CoachPersona::Wise,
        CoachPersona::Energizer,
        CoachPersona::Strategist,
        CoachPersona::Default,
    ];

    /// Resolve a client-supplied tag. Unknown or missing tags fall back to
    /// [`CoachPersona::Default`].
    pub fn from_tag(tag: Option<&str>) -> Self {
        let Some(raw) = tag else {
            return CoachPersona::Default;
        };

        match raw.trim().to_ascii_lowercase().as_str() {
            "wise" => CoachPersona::Wise,
            "energizer" => CoachPersona::Energizer,
            "strategist" => CoachPersona::Strategist,
            "default" | "" => CoachPersona::Default,
            other => {
                tracing::debug!(coach_type = %other, "Unknown coach type, using default persona");
                CoachPersona::Default
            }
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            CoachPersona::Wise => "wise",
            CoachPersona::Energizer => "energizer",
            CoachPersona::Strategist => "strategist",
            CoachPersona::Default => "default",
        }
    }

    fn style(&self) -> &'static str {
        match self {
            CoachPersona::Wise => WISE_STYLE,
            CoachPersona::Energizer => ENERGIZER_STYLE,
            CoachPersona::Strategist => STRATEGIST_STYLE,
            CoachPersona::Default => DEFAULT_STYLE,
        }
    }

    /// The fixed system instruction for this persona, without tasks.
    pub fn instruction(&self) -> String {
        format!("{} {}", BASE_INSTRUCTION, self.style())
    }
}

impl fmt::Display for CoachPersona {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Where the numbered task section is appended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TaskPlacement {
    #[default]
    SystemInstruction,
    UserPrompt,
}

impl FromStr for TaskPlacement {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "system_instruction" | "system" => Ok(TaskPlacement::SystemInstruction),
            "user_prompt" | "prompt" => Ok(TaskPlacement::UserPrompt),
            other => Err(anyhow::anyhow!(
                "COACH_TASK_PLACEMENT must be 'system_instruction' or 'user_prompt', got '{}'",
                other
            )),
        }
    }
}

/// Render tasks as a numbered list, one per line, starting at 1.
///
/// Each task keeps its position in the input and is written unmodified.
/// Returns `None` for an empty list.
pub fn format_task_section(tasks: &[String]) -> Option<String> {
    if tasks.is_empty() {
        return None;
    }

    let lines: Vec<String> = tasks
        .iter()
        .enumerate()
        .map(|(i, t)| format!("{}. {}", i + 1, t))
        .collect();

    Some(format!("{}\n{}", TASKS_HEADER, lines.join("\n")))
}

/// System instruction and user prompt sent upstream for one request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PromptPlan {
    pub system_instruction: String,
    pub user_prompt: String,
}

impl PromptPlan {
    pub fn build(
        persona: CoachPersona,
        prompt: &str,
        tasks: &[String],
        placement: TaskPlacement,
    ) -> Self {
        let mut system_instruction = persona.instruction();
        let mut user_prompt = prompt.to_string();

        if let Some(section) = format_task_section(tasks) {
            let target = match placement {
                TaskPlacement::SystemInstruction => &mut system_instruction,
                TaskPlacement::UserPrompt => &mut user_prompt,
            };
            target.push_str("\n\n");
            target.push_str(&section);
        }

        PromptPlan {
            system_instruction,
            user_prompt,
        }
    }
}
