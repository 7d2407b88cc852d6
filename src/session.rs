//! The command loop that stands in for the poll's web page.
//!
//! A [`Session`] owns the calendar, everyone's picks, and the two inputs a
//! person fills in before clicking a date: their name and what a click means.
//! Each line of input is one command; its output is written before the next
//! line is read.

use crate::render::{self, Locale};
use clap::{Parser, Subcommand};
use std::io::{self, BufRead, Write};
use tally::{Calendar, DateId, Directory, SelectionType, UserName, compute_best_dates};

/// Whether to keep reading commands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    /// Read the next command.
    Continue,
    /// Stop the session.
    Quit,
}

#[derive(Debug, Parser)]
#[command(multicall = true)]
struct Line {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Set the name picks are recorded under
    Name {
        #[arg(required = true, num_args = 1.., allow_hyphen_values = true)]
        name: Vec<String>,
    },

    /// Choose what clicking a date marks it as
    Mode {
        #[arg(value_parser = SelectionType::parse)]
        selection: SelectionType,
    },

    /// Pick a date (YYYY-MM-DD); picking it again the same way clears it
    Click { date: String },

    /// Show the calendar with the current name's picks
    Calendar,

    /// List the dates with the most overlap
    Calculate,

    /// List everyone's picks, or one person's
    Show {
        #[arg(num_args = 0.., allow_hyphen_values = true)]
        name: Vec<String>,
    },

    /// End the session
    #[command(alias = "exit")]
    Quit,
}

/// State of one polling session.
#[derive(Debug)]
pub struct Session {
    calendar: Calendar,
    directory: Directory,
    locale: Locale,
    json: bool,
    name: String,
    mode: SelectionType,
}

impl Session {
    /// Start a session with nobody's picks recorded yet.
    ///
    /// `json` switches `calculate` output to a JSON array.
    pub fn new(calendar: Calendar, locale: Locale, json: bool) -> Self {
        Self {
            calendar,
            directory: Directory::new(),
            locale,
            json,
            name: String::new(),
            mode: SelectionType::Unavailable,
        }
    }

    /// Everyone's picks so far.
    #[inline]
    pub fn directory(&self) -> &Directory {
        &self.directory
    }

    /// Run one line of input, writing whatever it shows to `out`.
    ///
    /// Blank lines and `#` comments do nothing. Mistakes in a command are
    /// reported to `out` and leave the session as it was.
    ///
    /// # Errors
    ///
    /// Only if writing to `out` fails.
    pub fn execute<W: Write>(&mut self, line: &str, out: &mut W) -> io::Result<Flow> {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            return Ok(Flow::Continue);
        }

        let command = match Line::try_parse_from(line.split_whitespace()) {
            Ok(Line { command }) => command,
            Err(e) => {
                write!(out, "{}", e.render())?;
                return Ok(Flow::Continue);
            }
        };
        log::trace!("{command:?}");

        match command {
            Command::Name { name } => self.name = name.join(" "),
            Command::Mode { selection } => self.mode = selection,
            Command::Click { date } => self.click(&date, out)?,
            Command::Calendar => {
                let record = self.directory.get(self.name.trim());
                writeln!(out, "{}", render::calendar(&self.calendar, self.locale, record))?;
            }
            Command::Calculate => self.calculate(out)?,
            Command::Show { name } if name.is_empty() => {
                write!(out, "{}", render::directory(&self.directory))?;
            }
            Command::Show { name } => self.show(&name.join(" "), out)?,
            Command::Quit => return Ok(Flow::Quit),
        }
        Ok(Flow::Continue)
    }

    fn click<W: Write>(&mut self, date: &str, out: &mut W) -> io::Result<()> {
        let Ok(user) = UserName::new(&self.name) else {
            return writeln!(out, "{}", self.locale.name_prompt());
        };

        let date = match date.parse::<DateId>() {
            Ok(date) => date,
            Err(e) => return writeln!(out, "{e}"),
        };

        if !self.calendar.contains(&date) {
            log::warn!("{date} is not on the calendar; ignoring");
            return Ok(());
        }

        let state = self.directory.record(user, date, self.mode);
        writeln!(out, "{date}: {state}")?;

        if log::log_enabled!(log::Level::Debug) {
            match serde_json::to_string(&self.directory) {
                Ok(json) => log::debug!("current picks: {json}"),
                Err(e) => log::warn!("could not serialize picks: {e}"),
            }
        }
        Ok(())
    }

    fn calculate<W: Write>(&self, out: &mut W) -> io::Result<()> {
        let ranked = compute_best_dates(&self.directory);
        if self.json {
            serde_json::to_writer(&mut *out, &ranked)?;
            writeln!(out)
        } else {
            write!(out, "{}", render::results(&ranked, self.locale))
        }
    }

    fn show<W: Write>(&self, name: &str, out: &mut W) -> io::Result<()> {
        if let Some(record) = self.directory.get(name) {
            return write!(out, "{}", render::record(name, record));
        }

        let closest = self
            .directory
            .names()
            .map(|known| {
                let similarity =
                    strsim::jaro_winkler(&name.to_lowercase(), &known.to_lowercase());
                (known, similarity)
            })
            .filter(|(_, similarity)| *similarity > 0.8)
            .max_by(|(_, a), (_, b)| a.total_cmp(b));

        match closest {
            Some((known, _)) => writeln!(out, "no picks from `{name}`; did you mean `{known}`?"),
            None => writeln!(out, "no picks from `{name}`"),
        }
    }

    /// Read commands from `input` until it ends or a `quit` command.
    ///
    /// With `prompt`, a `> ` prompt is written before each command.
    ///
    /// # Errors
    ///
    /// If reading `input` or writing `out` fails.
    pub fn run<R: BufRead, W: Write>(&mut self, input: R, out: &mut W, prompt: bool) -> io::Result<()> {
        let show_prompt = |out: &mut W| -> io::Result<()> {
            if prompt {
                write!(out, "> ")?;
                out.flush()?;
            }
            Ok(())
        };

        show_prompt(out)?;
        for line in input.lines() {
            if self.execute(&line?, out)? == Flow::Quit {
                break;
            }
            show_prompt(out)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Month;
    use tally::{CellState, date};

    fn session(locale: Locale) -> Session {
        Session::new(Calendar::new(2025, [Month::July, Month::August]), locale, false)
    }

    /// Run each line and collect everything written.
    fn run(session: &mut Session, lines: &[&str]) -> String {
        let mut out = Vec::new();
        for line in lines {
            session.execute(line, &mut out).unwrap();
        }
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn test_click_without_name_prompts() {
        let mut s = session(Locale::Nl);
        assert_eq!(
            run(&mut s, &["click 2025-07-10"]),
            "Vul alsjeblieft eerst je naam in!\n"
        );
        assert!(s.directory().is_empty());

        let mut s = session(Locale::En);
        let out = run(&mut s, &["name   ", "click 2025-07-10"]);
        assert!(out.ends_with("Please enter your name first!\n"), "{out}");
        assert!(s.directory().is_empty());
    }

    #[test]
    fn test_click_toggles_and_switches() {
        let mut s = session(Locale::En);
        assert_eq!(
            run(
                &mut s,
                &[
                    "name Jan",
                    "mode available",
                    "click 2025-07-10",
                    "click 2025-07-10",
                    "click 2025-07-10",
                    "mode unavailable",
                    "click 2025-07-10",
                ]
            ),
            concat!(
                "2025-07-10: available\n",
                "2025-07-10: unset\n",
                "2025-07-10: available\n",
                "2025-07-10: unavailable\n",
            )
        );
        assert_eq!(
            s.directory().state("Jan", &date!(7/10/2025)),
            CellState::Unavailable
        );
    }

    #[test]
    fn test_name_is_trimmed_and_joined() {
        let mut s = session(Locale::En);
        run(&mut s, &["name  Jan   de  Vries ", "mode available", "click 2025-08-01"]);
        assert_eq!(
            s.directory().names().map(UserName::as_str).collect::<Vec<_>>(),
            ["Jan de Vries"]
        );
    }

    #[test]
    fn test_click_off_calendar_is_ignored() {
        let mut s = session(Locale::En);
        assert_eq!(run(&mut s, &["name Jan", "click 2025-09-01"]), "");
        assert!(s.directory().is_empty());
    }

    #[test]
    fn test_click_malformed_date() {
        let mut s = session(Locale::En);
        assert_eq!(
            run(&mut s, &["name Jan", "click 2025-7-10"]),
            "`2025-7-10` is not a date of the form YYYY-MM-DD\n"
        );
        assert!(s.directory().is_empty());
    }

    #[test]
    fn test_calculate_scenarios() {
        let mut s = session(Locale::Nl);
        assert_eq!(
            run(&mut s, &["calculate"]),
            "Geen geschikte overlappende data gevonden.\n"
        );

        let out = run(
            &mut s,
            &[
                "name A",
                "mode available",
                "click 2025-07-10",
                "name B",
                "click 2025-07-10",
                "calculate",
            ],
        );
        assert!(out.ends_with("Datum: 2025-07-10 (Beschikbaar voor 2 persoon/personen)\n"));

        let out = run(&mut s, &["name C", "mode unavailable", "click 2025-07-10", "calculate"]);
        assert!(out.ends_with("Geen geschikte overlappende data gevonden.\n"));
    }

    #[test]
    fn test_calculate_json() {
        let mut s = Session::new(Calendar::new(2025, [Month::July]), Locale::En, true);
        let out = run(&mut s, &["calculate"]);
        assert_eq!(out, "[]\n");

        let out = run(
            &mut s,
            &["name A", "mode available", "click 2025-07-10", "calculate"],
        );
        assert!(out.ends_with("[{\"date\":\"2025-07-10\",\"score\":1}]\n"));
    }

    #[test]
    fn test_calendar_marks_current_user() {
        let mut s = session(Locale::En);
        let out = run(
            &mut s,
            &[
                "name Jan",
                "mode available",
                "click 2025-07-01",
                "mode unavailable",
                "click 2025-07-02",
                "name Piet",
                "click 2025-07-03",
                "name Jan",
                "calendar",
            ],
        );
        assert!(out.contains("July 2025\nMo  Tu  We  Th  Fr  Sa  Su\n     1+  2-  3   4   5   6\n"));
    }

    #[test]
    fn test_show() {
        let mut s = session(Locale::En);
        let out = run(
            &mut s,
            &[
                "name Jan",
                "mode available",
                "click 2025-07-10",
                "show",
                "show Jan",
                "show jan",
                "show Nobody",
            ],
        );
        assert_eq!(
            out,
            concat!(
                "2025-07-10: available\n",
                "Jan: available [2025-07-10], unavailable []\n",
                "Jan: available [2025-07-10], unavailable []\n",
                "no picks from `jan`; did you mean `Jan`?\n",
                "no picks from `Nobody`\n",
            )
        );
    }

    #[test]
    fn test_show_multi_word_name() {
        let mut s = session(Locale::En);
        let out = run(
            &mut s,
            &[
                "name Jan de Vries",
                "mode available",
                "click 2025-07-10",
                "show Jan  de Vries",
                "show Jan de Vreis",
            ],
        );
        assert_eq!(
            out,
            concat!(
                "2025-07-10: available\n",
                "Jan de Vries: available [2025-07-10], unavailable []\n",
                "no picks from `Jan de Vreis`; did you mean `Jan de Vries`?\n",
            )
        );
    }

    #[test]
    fn test_unknown_command_keeps_going() {
        let mut s = session(Locale::En);
        let mut out = Vec::new();
        assert_eq!(s.execute("frobnicate", &mut out).unwrap(), Flow::Continue);
        assert!(!out.is_empty());
        assert_eq!(s.execute("mode maybe", &mut out).unwrap(), Flow::Continue);
        assert_eq!(s.execute("# just a comment", &mut out).unwrap(), Flow::Continue);
        assert_eq!(s.execute("   ", &mut out).unwrap(), Flow::Continue);
    }

    #[test]
    fn test_quit_and_exit() {
        let mut s = session(Locale::En);
        let mut out = Vec::new();
        assert_eq!(s.execute("quit", &mut out).unwrap(), Flow::Quit);
        assert_eq!(s.execute("exit", &mut out).unwrap(), Flow::Quit);
    }

    #[test]
    fn test_run_stops_at_quit() {
        let mut s = session(Locale::En);
        let script = "name Jan\nmode available\nclick 2025-07-10\nquit\nclick 2025-07-11\n";
        let mut out = Vec::new();
        s.run(script.as_bytes(), &mut out, false).unwrap();
        assert_eq!(String::from_utf8(out).unwrap(), "2025-07-10: available\n");
        assert!(s.directory().get("Jan").unwrap().available().len() == 1);
    }

    #[test]
    fn test_run_prompts() {
        let mut s = session(Locale::En);
        let mut out = Vec::new();
        s.run("calculate\n".as_bytes(), &mut out, true).unwrap();
        assert_eq!(
            String::from_utf8(out).unwrap(),
            "> No suitable overlapping dates found.\n> "
        );
    }
}
