//! Derived views over the full student list.
//!
//! The history page searches, filters, sorts, groups and summarises records
//! on every keystroke. All of it is recomputed from the complete list each
//! time; at this scale no incremental index is needed.

use serde::{Deserialize, Serialize};

use crate::grading::{grade_for_marks, Grade};
use crate::student::{MAX_MARKS, MIN_MARKS};

/// Read access to the fields the roster views need.
pub trait RosterEntry {
    fn name(&self) -> &str;
    fn roll_no(&self) -> i64;
    fn department(&self) -> &str;
    fn subject(&self) -> &str;
    fn marks(&self) -> f64;
    fn grade(&self) -> Grade;
}

// ---------------------------------------------------------------------------
// Search / filter / sort
// ---------------------------------------------------------------------------

/// Ordering applied after filtering.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortKey {
    /// Ascending, case-insensitive.
    #[default]
    Name,
    /// Highest marks first.
    Marks,
    /// Best grade first.
    Grade,
    /// Ascending, case-insensitive.
    Department,
}

/// Search text, grade filter and sort key from the history page.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RosterQuery {
    #[serde(default)]
    pub search: String,
    #[serde(default)]
    pub grade: Option<Grade>,
    #[serde(default)]
    pub sort: SortKey,
}

impl RosterQuery {
    /// Whether `entry` passes both the search text and the grade filter.
    ///
    /// Search is a case-insensitive substring match against name, roll
    /// number, subject and department. Empty search matches everything.
    pub fn matches<E: RosterEntry>(&self, entry: &E) -> bool {
        let needle = self.search.trim().to_lowercase();
        let matches_search = needle.is_empty()
            || entry.name().to_lowercase().contains(&needle)
            || entry.roll_no().to_string().contains(&needle)
            || entry.subject().to_lowercase().contains(&needle)
            || entry.department().to_lowercase().contains(&needle);

        let matches_grade = self.grade.map_or(true, |grade| entry.grade() == grade);

        matches_search && matches_grade
    }

    /// Filter then stably sort.
    pub fn apply<'a, E: RosterEntry>(&self, entries: &'a [E]) -> Vec<&'a E> {
        let mut visible: Vec<&E> = entries.iter().filter(|e| self.matches(*e)).collect();

        match self.sort {
            SortKey::Name => {
                visible.sort_by_cached_key(|e| e.name().to_lowercase());
            }
            SortKey::Marks => visible.sort_by(|a, b| b.marks().total_cmp(&a.marks())),
            SortKey::Grade => visible.sort_by_key(|e| e.grade().rank()),
            SortKey::Department => {
                visible.sort_by_cached_key(|e| e.department().to_lowercase());
            }
        }

        visible
    }
}

// ---------------------------------------------------------------------------
// Summary statistics
// ---------------------------------------------------------------------------

/// Headline numbers shown above the roster.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RosterSummary {
    pub total: usize,
    /// Mean marks, `0.0` when there are no entries.
    pub average_marks: f64,
    /// Count per grade, best first, omitting grades nobody has.
    pub distribution: Vec<(Grade, usize)>,
    /// Highest marks on record.
    pub top_marks: Option<f64>,
    pub department_count: usize,
}

impl RosterSummary {
    pub fn from_entries<E: RosterEntry>(entries: &[E]) -> Self {
        let total = entries.len();
        let average_marks = average(entries.iter());

        let distribution = Grade::ALL
            .into_iter()
            .map(|grade| (grade, entries.iter().filter(|e| e.grade() == grade).count()))
            .filter(|(_, count)| *count > 0)
            .collect();

        let top_marks = entries
            .iter()
            .map(|e| e.marks())
            .max_by(|a, b| a.total_cmp(b));

        let department_count = group_by_department(entries).len();

        Self {
            total,
            average_marks,
            distribution,
            top_marks,
            department_count,
        }
    }
}

/// Entries sharing a department, in first-seen order.
#[derive(Debug)]
pub struct DepartmentGroup<'a, E> {
    pub department: &'a str,
    pub entries: Vec<&'a E>,
}

impl<E: RosterEntry> DepartmentGroup<'_, E> {
    pub fn average_marks(&self) -> f64 {
        average(self.entries.iter().copied())
    }
}

/// Group entries by department, keeping the order in which each department
/// first appears.
pub fn group_by_department<E: RosterEntry>(entries: &[E]) -> Vec<DepartmentGroup<'_, E>> {
    let mut groups: Vec<DepartmentGroup<'_, E>> = Vec::new();
    for entry in entries {
        match groups.iter_mut().find(|g| g.department == entry.department()) {
            Some(group) => group.entries.push(entry),
            None => groups.push(DepartmentGroup {
                department: entry.department(),
                entries: vec![entry],
            }),
        }
    }
    groups
}

/// The last `n` entries, newest first.
pub fn recent<E: RosterEntry>(entries: &[E], n: usize) -> Vec<&E> {
    entries.iter().rev().take(n).collect()
}

/// Live grade preview for the entry form.
///
/// Returns `None` while the input is empty, not a number, or outside the
/// range the service would accept.
pub fn preview_grade(raw: &str) -> Option<Grade> {
    let marks: f64 = raw.trim().parse().ok()?;
    if !marks.is_finite() || !(MIN_MARKS..=MAX_MARKS).contains(&marks) {
        return None;
    }
    Some(grade_for_marks(marks))
}

fn average<'a, E: RosterEntry + 'a>(entries: impl Iterator<Item = &'a E>) -> f64 {
    let (sum, count) = entries.fold((0.0, 0usize), |(sum, count), e| (sum + e.marks(), count + 1));
    if count == 0 {
        0.0
    } else {
        sum / count as f64
    }
}
