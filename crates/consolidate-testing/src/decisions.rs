use consolidate_engine::{DecisionProvider, Result};
use std::collections::VecDeque;

/// Decision provider replaying queued answers.
///
/// Choices are 0-based; `None` means "accept the default". When a queue
/// runs dry the default is used. Every prompt is recorded.
#[derive(Debug, Default)]
pub struct ScriptedDecisions {
    choices: VecDeque<Option<usize>>,
    answers: VecDeque<bool>,
    pub choice_prompts: Vec<(String, Vec<String>)>,
    pub yes_no_prompts: Vec<String>,
}

impl ScriptedDecisions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn choose(mut self, index: usize) -> Self {
        self.choices.push_back(Some(index));
        self
    }

    pub fn accept_default(mut self) -> Self {
        self.choices.push_back(None);
        self
    }

    pub fn answer(mut self, yes: bool) -> Self {
        self.answers.push_back(yes);
        self
    }
}

impl DecisionProvider for ScriptedDecisions {
    fn ask_choice(&mut self, prompt: &str, options: &[String], default: usize) -> Result<usize> {
        self.choice_prompts
            .push((prompt.to_string(), options.to_vec()));
        Ok(self.choices.pop_front().flatten().unwrap_or(default))
    }

    fn ask_yes_no(&mut self, prompt: &str, default: bool) -> Result<bool> {
        self.yes_no_prompts.push(prompt.to_string());
        Ok(self.answers.pop_front().unwrap_or(default))
    }
}
