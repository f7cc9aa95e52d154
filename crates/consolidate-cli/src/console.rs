use consolidate_engine::{ChoiceInput, DecisionProvider, Result, parse_choice, parse_yes_no};
use std::io::{BufRead, Write};

/// Line-based operator prompts. Invalid answers are explained and asked
/// again; end of input accepts the default.
pub struct ConsoleDecisions<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> ConsoleDecisions<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    fn read_line(&mut self) -> Result<Option<String>> {
        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            writeln!(self.output)?;
            return Ok(None);
        }
        Ok(Some(line))
    }
}

impl<R: BufRead, W: Write> DecisionProvider for ConsoleDecisions<R, W> {
    fn ask_choice(&mut self, prompt: &str, options: &[String], default: usize) -> Result<usize> {
        writeln!(self.output, "{}", prompt)?;
        for (i, option) in options.iter().enumerate() {
            let marker = if i == default { " (default)" } else { "" };
            writeln!(self.output, "  {}) {}{}", i + 1, option, marker)?;
        }

        loop {
            write!(self.output, "Choice [{}]: ", default + 1)?;
            self.output.flush()?;

            let Some(line) = self.read_line()? else {
                return Ok(default);
            };
            match parse_choice(&line, options.len()) {
                ChoiceInput::Default => return Ok(default),
                ChoiceInput::Selected(index) => return Ok(index),
                ChoiceInput::Invalid(reason) => writeln!(self.output, "{}", reason)?,
            }
        }
    }

    fn ask_yes_no(&mut self, prompt: &str, default: bool) -> Result<bool> {
        let hint = if default { "[Y/n]" } else { "[y/N]" };

        loop {
            write!(self.output, "{} {}: ", prompt, hint)?;
            self.output.flush()?;

            let Some(line) = self.read_line()? else {
                return Ok(default);
            };
            match parse_yes_no(&line, default) {
                Some(answer) => return Ok(answer),
                None => writeln!(self.output, "Please answer y or n")?,
            }
        }
    }
}
