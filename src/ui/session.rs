//! Interactive terminal session

use super::{render, Page};
use crate::intake::{IntakeError, IntakeService};
use std::io::{self, BufRead, Write};
use std::sync::Arc;

/// Interactive session over any line-oriented input and output.
///
/// One user action runs one full synchronous chain (analyze, persist,
/// redraw or fetch, redraw) before the next prompt is shown.
pub struct Session<R, W> {
    intake: Arc<IntakeService>,
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> Session<R, W> {
    pub fn new(intake: Arc<IntakeService>, input: R, output: W) -> Self {
        Self {
            intake,
            input,
            output,
        }
    }

    /// Run until the user quits or input ends.
    pub async fn run(&mut self) -> io::Result<()> {
        loop {
            write!(self.output, "\n{}", render::menu())?;
            let Some(choice) = self.prompt(render::MENU_PROMPT)? else {
                return Ok(());
            };
            if choice.trim().eq_ignore_ascii_case("q") {
                return Ok(());
            }
            match Page::from_choice(&choice) {
                Some(page) => self.render_page(page).await?,
                None => writeln!(self.output, "Unknown choice: {}", choice.trim())?,
            }
        }
    }

    /// Render `page` and handle its interaction.
    pub async fn render_page(&mut self, page: Page) -> io::Result<()> {
        write!(self.output, "\n{}", render::heading(page.title()))?;
        match page {
            Page::Submit => self.submit_page().await,
            Page::History => self.history_page(),
        }
    }

    async fn submit_page(&mut self) -> io::Result<()> {
        writeln!(self.output, "{}", render::COMPLAINT_PROMPT)?;
        let text = self.read_complaint()?;

        match self.intake.submit(&text).await {
            Ok(submission) => write!(self.output, "{}", render::submission(&submission)),
            Err(IntakeError::Validation(err)) => {
                write!(self.output, "{}", render::validation_error(&err))
            }
            Err(err) => {
                tracing::error!(error = %err, "complaint submission aborted");
                write!(self.output, "{}", render::error(&err))
            }
        }
    }

    fn history_page(&mut self) -> io::Result<()> {
        let records = match self.intake.history() {
            Ok(records) => records,
            Err(err) => {
                tracing::error!(error = %err, "history fetch aborted");
                return write!(self.output, "{}", render::error(&err));
            }
        };

        write!(self.output, "{}", render::history_headers(&records))?;
        if records.is_empty() {
            return Ok(());
        }
        match self.intake.count() {
            Ok(count) => write!(self.output, "{}", render::status_line(count))?,
            Err(err) => tracing::warn!(error = %err, "complaint count unavailable"),
        }

        loop {
            let Some(line) = self.prompt(render::EXPAND_PROMPT)? else {
                return Ok(());
            };
            let line = line.trim();
            if line.is_empty() {
                return Ok(());
            }
            match line.parse::<usize>() {
                Ok(n) if (1..=records.len()).contains(&n) => {
                    write!(self.output, "{}", render::expanded_entry(n, &records[n - 1]))?
                }
                _ => writeln!(self.output, "No entry {}.", line)?,
            }
        }
    }

    /// Show `prompt` and read one line; `None` at end of input.
    fn prompt(&mut self, prompt: &str) -> io::Result<Option<String>> {
        write!(self.output, "{}", prompt)?;
        self.output.flush()?;
        self.read_line()
    }

    fn read_line(&mut self) -> io::Result<Option<String>> {
        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        let trimmed_len = line.trim_end_matches(['\n', '\r']).len();
        line.truncate(trimmed_len);
        Ok(Some(line))
    }

    /// Lines up to a lone `.` line or end of input, joined by `\n`.
    ///
    /// Blank lines belong to the text, so complaints may span paragraphs.
    fn read_complaint(&mut self) -> io::Result<String> {
        let mut lines = Vec::new();
        while let Some(line) = self.read_line()? {
            if line == render::END_OF_COMPLAINT {
                break;
            }
            lines.push(line);
        }
        Ok(lines.join("\n"))
    }

    /// Consume the session, returning its output sink.
    pub fn into_output(self) -> W {
        self.output
    }
}
