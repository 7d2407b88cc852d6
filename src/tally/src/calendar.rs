//! The days people can pick from, laid out as month grids.
//!
//! Weeks start on Monday. Each month begins with enough blank cells that its
//! first day lands under the right weekday column.

use crate::data::DateId;
use chrono::prelude::*;
use smallvec::SmallVec;

/// One pickable day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct DayCell {
    /// Key used when this day is picked.
    pub date: DateId,
    /// Day of the month, as shown in the cell.
    pub label: u32,
}

/// Every day of one month, ready to be laid out in a 7-column grid.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MonthGrid {
    /// The year shown in the header.
    pub year: i32,
    /// The month shown in the header.
    pub month: Month,
    /// Blank cells before the first day (0 when the month starts on a Monday).
    pub leading_blanks: usize,
    /// Day cells in order, first to last.
    pub days: Vec<DayCell>,
}

impl MonthGrid {
    /// Whether `date` is one of this month's cells.
    pub fn contains(&self, date: &DateId) -> bool {
        date.year() == self.year
            && date.month() == self.month.number_from_month()
            && self.days.iter().any(|cell| cell.date == *date)
    }
}

/// Convert a zero-based month index (0 = January) into a [`Month`].
///
/// [`None`] if `index` is not in `0..12`.
pub fn month_from_index(index: u32) -> Option<Month> {
    u8::try_from(index)
        .ok()?
        .checked_add(1)
        .and_then(|number| Month::try_from(number).ok())
}

/// Lay out every day of `month` in `year`.
///
/// A year outside the range [`NaiveDate`] can represent produces a grid with
/// no days.
pub fn generate_month(year: i32, month: Month) -> MonthGrid {
    let Some(first) = NaiveDate::from_ymd_opt(year, month.number_from_month(), 1) else {
        log::warn!("{} {year} cannot be represented; leaving it empty", month.name());
        return MonthGrid {
            year,
            month,
            leading_blanks: 0,
            days: Vec::new(),
        };
    };

    let days = first
        .iter_days()
        .take_while(|date| date.month() == first.month())
        .map(|date| DayCell {
            date: DateId::new(date),
            label: date.day(),
        })
        .collect::<Vec<_>>();

    MonthGrid {
        year,
        month,
        leading_blanks: first.weekday().num_days_from_monday() as usize,
        days,
    }
}

/// The months on offer, in display order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Calendar {
    months: SmallVec<[MonthGrid; 2]>,
}

impl Calendar {
    /// Lay out each of `months` in `year`, in the order given.
    pub fn new<I>(year: i32, months: I) -> Self
    where
        I: IntoIterator<Item = Month>,
    {
        Self {
            months: months
                .into_iter()
                .map(|month| generate_month(year, month))
                .collect(),
        }
    }

    /// The month grids, in display order.
    #[inline]
    pub fn months(&self) -> &[MonthGrid] {
        &self.months
    }

    /// Every day cell of every month, in display order.
    pub fn days(&self) -> impl Iterator<Item = &DayCell> + '_ {
        self.months.iter().flat_map(|grid| grid.days.iter())
    }

    /// Whether `date` is a day on this calendar.
    pub fn contains(&self, date: &DateId) -> bool {
        self.months.iter().any(|grid| grid.contains(date))
    }
}
