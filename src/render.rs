//! Plain-text presentation of calendars and results

use chrono::Month;
use serde::{Deserialize, Serialize};
use strum::{Display, EnumString, VariantNames};
use tally::{Calendar, CellState, DateId, Directory, MonthGrid, ScoreEntry, UserRecord};

/// Language used for labels and messages.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Default,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    VariantNames,
    clap::ValueEnum,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum Locale {
    /// Dutch
    #[default]
    Nl,
    /// English
    En,
}

impl Locale {
    /// Full name of `month`, as shown above its grid.
    pub fn month_name(self, month: Month) -> &'static str {
        const NL: [&str; 12] = [
            "Januari",
            "Februari",
            "Maart",
            "April",
            "Mei",
            "Juni",
            "Juli",
            "Augustus",
            "September",
            "Oktober",
            "November",
            "December",
        ];
        let index = month.number_from_month() as usize - 1;
        match self {
            Self::Nl => NL[index],
            Self::En => month.name(),
        }
    }

    /// Column headers, Monday first.
    pub const fn weekday_headers(self) -> [&'static str; 7] {
        match self {
            Self::Nl => ["Ma", "Di", "Wo", "Do", "Vr", "Za", "Zo"],
            Self::En => ["Mo", "Tu", "We", "Th", "Fr", "Sa", "Su"],
        }
    }

    /// Shown instead of results when no date has overlap.
    pub const fn no_overlap(self) -> &'static str {
        match self {
            Self::Nl => "Geen geschikte overlappende data gevonden.",
            Self::En => "No suitable overlapping dates found.",
        }
    }

    /// Shown when a date is clicked before a name was entered.
    pub const fn name_prompt(self) -> &'static str {
        match self {
            Self::Nl => "Vul alsjeblieft eerst je naam in!",
            Self::En => "Please enter your name first!",
        }
    }

    /// One line of the result list.
    pub fn result_line(self, entry: &ScoreEntry) -> String {
        let ScoreEntry { date, score } = entry;
        match self {
            Self::Nl => format!("Datum: {date} (Beschikbaar voor {score} persoon/personen)"),
            Self::En => format!("Date: {date} (Available for {score} person/people)"),
        }
    }
}

/// Suffix drawn after a day number.
const fn mark(state: CellState) -> char {
    match state {
        CellState::Unset => ' ',
        CellState::Available => '+',
        CellState::Unavailable => '-',
    }
}

/// Draw one month as a 7-column grid.
///
/// Each cell is 4 characters wide. `state` decides the mark drawn after each day.
pub fn month<F>(grid: &MonthGrid, locale: Locale, state: F) -> String
where
    F: Fn(&DateId) -> CellState,
{
    let mut s = format!("{} {}\n", locale.month_name(grid.month), grid.year);

    let headers = locale
        .weekday_headers()
        .map(|name| format!("{name:<2}  "))
        .concat();
    s.push_str(headers.trim_end());
    s.push('\n');

    let cells = std::iter::repeat_n("    ".to_string(), grid.leading_blanks).chain(
        grid.days
            .iter()
            .map(|cell| format!("{:>2}{} ", cell.label, mark(state(&cell.date)))),
    );

    let mut row = String::new();
    for (i, cell) in cells.enumerate() {
        row.push_str(&cell);
        if i % 7 == 6 {
            s.push_str(row.trim_end());
            s.push('\n');
            row.clear();
        }
    }
    if !row.is_empty() {
        s.push_str(row.trim_end());
        s.push('\n');
    }
    s
}

/// Draw every month, marking `record`'s picks if given.
pub fn calendar(calendar: &Calendar, locale: Locale, record: Option<&UserRecord>) -> String {
    let state = |date: &DateId| record.map_or(CellState::Unset, |record| record.state(date));
    calendar
        .months()
        .iter()
        .map(|grid| month(grid, locale, &state))
        .collect::<Vec<_>>()
        .join("\n")
}

/// The ranked list, or the "no overlap" message when it is empty.
pub fn results(ranked: &[ScoreEntry], locale: Locale) -> String {
    if ranked.is_empty() {
        return format!("{}\n", locale.no_overlap());
    }
    ranked.iter().fold(String::new(), |mut s, entry| {
        s.push_str(&locale.result_line(entry));
        s.push('\n');
        s
    })
}

/// One person's picks on a single line.
pub fn record(name: &str, record: &UserRecord) -> String {
    let join = |dates: &tally::DateSet| {
        dates
            .iter()
            .map(DateId::to_string)
            .collect::<Vec<_>>()
            .join(", ")
    };
    format!(
        "{name}: available [{}], unavailable [{}]\n",
        join(record.available()),
        join(record.unavailable())
    )
}

/// Everyone's picks, one line per person in order of first pick.
pub fn directory(directory: &Directory) -> String {
    let mut s = String::new();
    for (name, rec) in directory {
        s.push_str(&record(name, rec));
    }
    s
}
