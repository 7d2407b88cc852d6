//! See [`Directory`]

use crate::{
    data::{CellState, DateId, SelectionType},
    error::ValidationError,
};
use indexmap::{IndexMap, IndexSet};
use rustc_hash::FxBuildHasher;
use serde::Serialize;

/// A person's name as typed into the name field.
///
/// Surrounding whitespace is trimmed and the result must not be empty.
/// Comparison is case-sensitive: `"Jan"` and `"jan"` are different people.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(transparent)]
pub struct UserName(String);

impl UserName {
    /// Trim and validate a raw name.
    ///
    /// # Errors
    ///
    /// [`ValidationError::EmptyUserName`] if nothing is left after trimming.
    pub fn new(raw: &str) -> Result<Self, ValidationError> {
        match raw.trim() {
            "" => Err(ValidationError::EmptyUserName),
            name => Ok(Self(name.to_string())),
        }
    }

    /// The trimmed name.
    #[inline]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::str::FromStr for UserName {
    type Err = ValidationError;

    #[inline]
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl std::fmt::Display for UserName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl std::ops::Deref for UserName {
    type Target = str;

    #[inline]
    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl std::borrow::Borrow<str> for UserName {
    #[inline]
    fn borrow(&self) -> &str {
        &self.0
    }
}

/// A set of dates that remembers the order they were picked in.
pub type DateSet = IndexSet<DateId, FxBuildHasher>;

/// A dictionary associating [`UserName`]s with `T`, in order of first appearance.
pub type UserMap<T = UserRecord> = IndexMap<UserName, T, FxBuildHasher>;

/// One person's picks.
///
/// A date is never in both sets at once.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct UserRecord {
    unavailable: DateSet,
    available: DateSet,
}

impl UserRecord {
    /// Dates this person cannot make, in the order they were marked.
    #[inline]
    pub fn unavailable(&self) -> &DateSet {
        &self.unavailable
    }

    /// Dates this person can make, in the order they were marked.
    #[inline]
    pub fn available(&self) -> &DateSet {
        &self.available
    }

    /// The current state of `date` for this person.
    pub fn state(&self, date: &DateId) -> CellState {
        if self.available.contains(date) {
            CellState::Available
        } else if self.unavailable.contains(date) {
            CellState::Unavailable
        } else {
            CellState::Unset
        }
    }

    /// Whether this person has not marked anything.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.available.is_empty() && self.unavailable.is_empty()
    }

    /// Clear `date`, then mark it `selection` unless it was already marked that way.
    fn apply(&mut self, date: DateId, selection: SelectionType) -> CellState {
        let was_unavailable = self.unavailable.shift_remove(&date);
        let was_available = self.available.shift_remove(&date);

        match selection {
            SelectionType::Unavailable if !was_unavailable => {
                self.unavailable.insert(date);
                CellState::Unavailable
            }
            SelectionType::Available if !was_available => {
                self.available.insert(date);
                CellState::Available
            }
            _ => CellState::Unset,
        }
    }
}

/// Everyone's picks for the current session.
///
/// Created empty when a session starts and owned by it; a person's
/// [`UserRecord`] appears the first time they pick a date and is never removed.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Directory {
    users: UserMap,
}

impl Directory {
    /// An empty directory.
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    /// Validate raw input and record a pick.
    ///
    /// Returns the new state of the cell. See [`Directory::record`] for the
    /// transition.
    ///
    /// # Errors
    ///
    /// A [`ValidationError`] if `user` is blank, `date` is not a `YYYY-MM-DD`
    /// date, or `selection` is not `available`/`unavailable`. Nothing is
    /// changed in that case.
    pub fn record_selection(
        &mut self,
        user: &str,
        date: &str,
        selection: &str,
    ) -> Result<CellState, ValidationError> {
        let user = UserName::new(user)?;
        let date = date.parse::<DateId>()?;
        let selection = SelectionType::parse(selection)?;
        Ok(self.record(user, date, selection))
    }

    /// Record a pick.
    ///
    /// The date is first cleared from both of the person's sets. It is then
    /// added to the set for `selection`, unless it was already there before
    /// clearing: picking the same thing twice undoes it, picking the other
    /// thing switches.
    pub fn record(&mut self, user: UserName, date: DateId, selection: SelectionType) -> CellState {
        let entry = self.users.entry(user);
        log::trace!("{} picked {date} as {selection}", entry.key());
        let state = entry.or_default().apply(date, selection);
        log::debug!("{date} is now {state}");
        state
    }

    /// The state of `date` for `user`; [`CellState::Unset`] for unknown users.
    pub fn state(&self, user: &str, date: &DateId) -> CellState {
        self.users
            .get(user)
            .map_or(CellState::Unset, |record| record.state(date))
    }

    /// The record for `user`, if they have picked anything yet.
    #[inline]
    pub fn get(&self, user: &str) -> Option<&UserRecord> {
        self.users.get(user)
    }

    /// Every person with their record, in order of first pick.
    #[inline]
    pub fn iter(&self) -> indexmap::map::Iter<'_, UserName, UserRecord> {
        self.users.iter()
    }

    /// Every known name, in order of first pick.
    #[inline]
    pub fn names(&self) -> indexmap::map::Keys<'_, UserName, UserRecord> {
        self.users.keys()
    }

    /// Number of people who have picked at least once.
    #[inline]
    pub fn len(&self) -> usize {
        self.users.len()
    }

    /// Whether nobody has picked anything yet.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.users.is_empty()
    }
}

impl<'a> IntoIterator for &'a Directory {
    type Item = (&'a UserName, &'a UserRecord);
    type IntoIter = indexmap::map::Iter<'a, UserName, UserRecord>;

    #[inline]
    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
