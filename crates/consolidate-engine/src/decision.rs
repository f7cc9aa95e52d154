use crate::Result;

/// Operator decisions requested while a run is in progress.
///
/// Implementations block until an answer is available. Console
/// implementations are expected to re-prompt on invalid input themselves;
/// the engine still rejects an out-of-range index.
pub trait DecisionProvider {
    /// Pick one of `options` (0-based). `default` is returned for "accept default".
    fn ask_choice(&mut self, prompt: &str, options: &[String], default: usize) -> Result<usize>;

    fn ask_yes_no(&mut self, prompt: &str, default: bool) -> Result<bool>;
}

/// Answers every question with its default
#[derive(Debug, Default, Clone, Copy)]
pub struct AcceptDefaults;

impl DecisionProvider for AcceptDefaults {
    fn ask_choice(&mut self, _prompt: &str, _options: &[String], default: usize) -> Result<usize> {
        Ok(default)
    }

    fn ask_yes_no(&mut self, _prompt: &str, default: bool) -> Result<bool> {
        Ok(default)
    }
}

/// Parsed operator answer to a 1-based numbered list
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChoiceInput {
    /// Empty line
    Default,
    /// 0-based index of the chosen entry
    Selected(usize),
    /// Reason shown before re-prompting
    Invalid(String),
}

pub fn parse_choice(input: &str, options: usize) -> ChoiceInput {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return ChoiceInput::Default;
    }

    match trimmed.parse::<usize>() {
        Ok(n) if (1..=options).contains(&n) => ChoiceInput::Selected(n - 1),
        Ok(n) => ChoiceInput::Invalid(format!("{} is out of range 1-{}", n, options)),
        Err(_) => ChoiceInput::Invalid(format!("'{}' is not a number", trimmed)),
    }
}

/// `None` means the answer was not recognized and the question should be asked again
pub fn parse_yes_no(input: &str, default: bool) -> Option<bool> {
    match input.trim().to_ascii_lowercase().as_str() {
        "" => Some(default),
        "y" | "yes" => Some(true),
        "n" | "no" => Some(false),
        _ => None,
    }
}
