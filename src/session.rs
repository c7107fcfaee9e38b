//! Interactive question-and-answer session.
//!
//! Every question is a bounded retry loop over an [`InputSource`]: an invalid answer prints a
//! hint and asks again, up to [`SessionOptions::max_attempts`] times, after which the prompt
//! fails with [`BikeshareError::RetriesExhausted`]. Restarting the session is a loop too.

use std::collections::VecDeque;
use std::io::{self, BufRead, Write};

use crate::error::{BikeshareError, Result};
use crate::ingestion::{load_and_derive, City, LoadOptions};
use crate::processing::{apply_filter, calendar, FilterSelection};
use crate::report::{render, render_window, title, RawDataPager, Summary, DEFAULT_PAGE_SIZE};

/// A source of answer lines.
pub trait InputSource {
    /// Next line without its line terminator, or `None` at end of input.
    fn read_line(&mut self) -> io::Result<Option<String>>;
}

/// Reads answers from standard input.
#[derive(Debug, Default)]
pub struct StdinSource;

impl InputSource for StdinSource {
    fn read_line(&mut self) -> io::Result<Option<String>> {
        let mut buf = String::new();
        if io::stdin().lock().read_line(&mut buf)? == 0 {
            return Ok(None);
        }
        Ok(Some(buf.trim_end_matches(['\r', '\n']).to_string()))
    }
}

/// Replays a fixed list of answers.
#[derive(Debug, Default, Clone)]
pub struct ScriptedSource {
    lines: VecDeque<String>,
}

impl ScriptedSource {
    pub fn new<I, S>(lines: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            lines: lines.into_iter().map(Into::into).collect(),
        }
    }
}

impl InputSource for ScriptedSource {
    fn read_line(&mut self) -> io::Result<Option<String>> {
        Ok(self.lines.pop_front())
    }
}

/// Session configuration.
#[derive(Debug, Clone)]
pub struct SessionOptions {
    /// Where and how city datasets are loaded.
    pub load: LoadOptions,
    /// Answers allowed per question before giving up.
    pub max_attempts: usize,
    /// Records per raw-data window.
    pub page_size: usize,
}

impl Default for SessionOptions {
    fn default() -> Self {
        Self {
            load: LoadOptions::default(),
            max_attempts: 5,
            page_size: DEFAULT_PAGE_SIZE,
        }
    }
}

/// Asks questions on `output` and reads answers from `input`.
pub struct Prompter<I, W> {
    input: I,
    output: W,
    max_attempts: usize,
}

impl<I: InputSource, W: Write> Prompter<I, W> {
    /// Create a prompter; `max_attempts` of 0 is treated as 1.
    pub fn new(input: I, output: W, max_attempts: usize) -> Self {
        Self {
            input,
            output,
            max_attempts: max_attempts.max(1),
        }
    }

    /// Consume the prompter, returning the output sink.
    pub fn into_output(self) -> W {
        self.output
    }

    /// Write one line to the output.
    pub fn say(&mut self, line: &str) -> Result<()> {
        writeln!(self.output, "{line}")?;
        Ok(())
    }

    /// Ask `prompt` until `parse` accepts the (trimmed) answer.
    pub fn ask<T>(
        &mut self,
        prompt: &str,
        retry_hint: &str,
        parse: impl Fn(&str) -> Option<T>,
    ) -> Result<T> {
        for attempt in 1..=self.max_attempts {
            writeln!(self.output, "\n{prompt}")?;
            self.output.flush()?;
            let Some(answer) = self.input.read_line()? else {
                return Err(BikeshareError::InputClosed {
                    prompt: prompt.to_string(),
                });
            };
            if let Some(value) = parse(answer.trim()) {
                return Ok(value);
            }
            tracing::debug!(attempt, answer = %answer.trim(), "rejected answer");
            writeln!(self.output, "\n{retry_hint}")?;
        }
        Err(BikeshareError::RetriesExhausted {
            prompt: prompt.to_string(),
            attempts: self.max_attempts,
        })
    }

    pub fn ask_city(&mut self) -> Result<City> {
        self.ask(
            "Hello! Let's explore some US bikeshare data!\n\
             Would you like to see data for Chicago, New York City, or Washington?",
            "Oops! You entered an invalid city! Please try again.",
            City::parse,
        )
    }

    /// Ask for the filter kind and, unless it is `none`, the concrete month or day.
    pub fn ask_filter(&mut self) -> Result<FilterSelection> {
        let kind = self.ask(
            "Would you like to filter the data by month, day, or not at all (type none)?",
            "It is unclear what you mean. Please try again.",
            |answer| {
                let answer = answer.to_ascii_lowercase();
                matches!(answer.as_str(), "month" | "day" | "none").then_some(answer)
            },
        )?;
        match kind.as_str() {
            "month" => self.ask(
                "Which month? January, February, March, April, May, or June?",
                "It is not clear what you mean. Please try again.",
                supported_month,
            ),
            "day" => self.ask(
                "Which day? Monday, Tuesday, Wednesday, Thursday, Friday, Saturday, or Sunday?",
                "It is not clear what you mean. Please try again.",
                FilterSelection::day_named,
            ),
            _ => Ok(FilterSelection::None),
        }
    }

    pub fn ask_yes_no(&mut self, prompt: &str) -> Result<bool> {
        self.ask(
            prompt,
            "I didn't understand that answer. Please type 'yes' or 'no'.",
            |answer| match answer.to_ascii_lowercase().as_str() {
                "yes" | "y" => Some(true),
                "no" | "n" => Some(false),
                _ => None,
            },
        )
    }
}

/// Month filter for one of the months the datasets cover.
fn supported_month(answer: &str) -> Option<FilterSelection> {
    calendar::MONTH_NAMES[..calendar::SUPPORTED_MONTHS]
        .iter()
        .position(|m| m.eq_ignore_ascii_case(answer))
        .map(|i| FilterSelection::Month(format!("{:02}", i + 1)))
}

/// Run sessions until the user declines to restart.
///
/// An empty filtered set prints `No data for this filter.` instead of statistics.
pub fn run<I: InputSource, W: Write>(
    prompter: &mut Prompter<I, W>,
    options: &SessionOptions,
) -> Result<()> {
    loop {
        let city = prompter.ask_city()?;
        let set = load_and_derive(city, &options.load)?;
        let selection = prompter.ask_filter()?;
        let filtered = apply_filter(&set, &selection);
        let heading = title(city, &selection);

        prompter.say("")?;
        match Summary::compute(&filtered, &selection) {
            Ok(summary) => {
                for line in render(&heading, &summary) {
                    prompter.say(&line)?;
                }
            }
            Err(e) if e.is_recoverable() => {
                prompter.say(&heading)?;
                prompter.say("No data for this filter.")?;
            }
            Err(e) => return Err(e),
        }

        let mut pager = RawDataPager::new(&filtered, options.page_size);
        while !pager.is_exhausted()
            && prompter.ask_yes_no("Would you like to view raw data? Type 'yes' or 'no'.")?
        {
            let first = pager.offset();
            if let Some(window) = pager.next() {
                for line in render_window(window, first, filtered.columns()) {
                    prompter.say(&line)?;
                }
            }
        }

        if !prompter.ask_yes_no("Do you want to restart the program? Type 'yes' or 'no'.")? {
            return Ok(());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{supported_month, Prompter, ScriptedSource};
    use crate::error::BikeshareError;
    use crate::ingestion::City;
    use crate::processing::FilterSelection;

    fn prompter(lines: &[&str], max_attempts: usize) -> Prompter<ScriptedSource, Vec<u8>> {
        Prompter::new(ScriptedSource::new(lines.iter().copied()), Vec::new(), max_attempts)
    }

    #[test]
    fn retries_until_a_valid_city() {
        let mut p = prompter(&["boston", "  NEW YORK "], 3);
        assert_eq!(p.ask_city().unwrap(), City::NewYorkCity);
        let out = String::from_utf8(p.into_output()).unwrap();
        assert_eq!(out.matches("invalid city").count(), 1);
    }

    #[test]
    fn gives_up_after_max_attempts() {
        let mut p = prompter(&["x", "y", "z", "chicago"], 3);
        match p.ask_city().unwrap_err() {
            BikeshareError::RetriesExhausted { attempts, .. } => assert_eq!(attempts, 3),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn closed_input_is_reported() {
        let mut p = prompter(&[], 3);
        assert!(matches!(
            p.ask_yes_no("Continue?"),
            Err(BikeshareError::InputClosed { .. })
        ));
    }

    #[test]
    fn filter_questions_map_to_selections() {
        let mut p = prompter(&["Month", "march"], 3);
        assert_eq!(p.ask_filter().unwrap(), FilterSelection::Month("03".to_string()));

        let mut p = prompter(&["day", "Sunday"], 3);
        assert_eq!(p.ask_filter().unwrap(), FilterSelection::DayOfWeek(6));

        let mut p = prompter(&["week", "none"], 3);
        assert_eq!(p.ask_filter().unwrap(), FilterSelection::None);
    }

    #[test]
    fn only_covered_months_are_offered() {
        assert_eq!(supported_month("June"), Some(FilterSelection::Month("06".to_string())));
        assert_eq!(supported_month("july"), None);

        let mut p = prompter(&["month", "July", "January"], 3);
        assert_eq!(p.ask_filter().unwrap(), FilterSelection::Month("01".to_string()));
    }
}
