use std::io::{self, BufRead, Write};

/// Interactive questions asked in the middle of a flow.
pub trait Prompt {
    /// Ask for free text. `None` means the user cancelled.
    fn ask(&mut self, question: &str) -> Option<String>;

    /// Ask a yes/no question.
    fn confirm(&mut self, question: &str) -> bool;
}

/// Asks on a line-based terminal.
///
/// The prompt owns the input, so anything else that reads commands from the
/// same terminal goes through [`LinePrompt::read_line`].
pub struct LinePrompt<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> LinePrompt<R, W> {
    pub fn new(input: R, output: W) -> LinePrompt<R, W> {
        LinePrompt { input, output }
    }

    /// Read the next line without its line ending. `None` at end of input.
    pub fn read_line(&mut self) -> io::Result<Option<String>> {
        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        Ok(Some(line.trim_end_matches(['\r', '\n']).to_string()))
    }

    fn read_answer(&mut self, question: &str) -> Option<String> {
        write!(self.output, "{} ", question).ok()?;
        self.output.flush().ok()?;

        self.read_line().ok().flatten()
    }
}

impl<R: BufRead, W: Write> Prompt for LinePrompt<R, W> {
    fn ask(&mut self, question: &str) -> Option<String> {
        self.read_answer(question)
    }

    fn confirm(&mut self, question: &str) -> bool {
        let question = format!("{} [y/N]", question);
        matches!(
            self.read_answer(&question).map(|answer| answer.trim().to_lowercase()),
            Some(answer) if answer == "y" || answer == "yes"
        )
    }
}

/// Answers from a prepared script and records what was asked.
#[cfg(test)]
#[derive(Default)]
pub struct Scripted {
    pub answers: std::collections::VecDeque<Option<String>>,
    pub confirmations: std::collections::VecDeque<bool>,
    pub asked: Vec<String>,
}

#[cfg(test)]
impl Prompt for Scripted {
    fn ask(&mut self, question: &str) -> Option<String> {
        self.asked.push(question.to_string());
        self.answers.pop_front().flatten()
    }

    fn confirm(&mut self, question: &str) -> bool {
        self.asked.push(question.to_string());
        self.confirmations.pop_front().unwrap_or(false)
    }
}

#[cfg(test)]
mod tests {
    use std::io::Cursor;

    use super::*;

    #[test]
    fn reads_one_line_per_question() {
        let mut output = Vec::new();
        let mut prompt = LinePrompt::new(Cursor::new("off topic\r\nyes\n"), &mut output);

        assert_eq!(prompt.ask("Reason?"), Some("off topic".to_string()));
        assert!(prompt.confirm("Sure?"));
        drop(prompt);

        assert_eq!(String::from_utf8(output).unwrap(), "Reason? Sure? [y/N] ");
    }

    #[test]
    fn end_of_input_cancels() {
        let mut prompt = LinePrompt::new(Cursor::new(""), Vec::new());
        assert_eq!(prompt.ask("Reason?"), None);
        assert!(!prompt.confirm("Sure?"));
    }

    #[test]
    fn lines_and_answers_share_the_input() {
        let mut prompt = LinePrompt::new(Cursor::new("delete 7\ny\nquit\n"), Vec::new());

        assert_eq!(prompt.read_line().unwrap().as_deref(), Some("delete 7"));
        assert!(prompt.confirm("Sure?"));
        assert_eq!(prompt.read_line().unwrap().as_deref(), Some("quit"));
        assert_eq!(prompt.read_line().unwrap(), None);
    }

    #[test]
    fn anything_but_yes_declines() {
        let mut prompt = LinePrompt::new(Cursor::new("\nn\nY\n"), Vec::new());
        assert!(!prompt.confirm("Sure?"));
        assert!(!prompt.confirm("Sure?"));
        assert!(prompt.confirm("Sure?"));
    }
}
