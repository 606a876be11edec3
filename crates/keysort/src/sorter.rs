//! Sorting records by multiple named keys
//!
//! A [SortSpec] is an ordered list of [KeyComparator]s. Two records are compared key by key, the first key that
//! does not consider them equal decides their order.
//!
//! ```
//! # use keysort::{record, sorter::by_keys};
//! let mut records = vec![
//!     record! { "name" => "b", "pri" => 1 },
//!     record! { "name" => "a", "pri" => 1 },
//!     record! { "name" => "c", "pri" => 2 },
//! ];
//!
//! by_keys(["-pri", "name"])?.sort(&mut records)?;
//!
//! assert_eq!(records[0], record! { "name" => "c", "pri" => 2 });
//! assert_eq!(records[1], record! { "name" => "a", "pri" => 1 });
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```
use crate::comparator::{CompareError, Direction, KeyComparator, KeyComparatorList, Verdict};
use crate::value::Value;
use indexmap::IndexMap;
use std::cmp::Ordering;
use std::str::FromStr;

/// A field name and the direction to sort it in
#[derive(Debug, Clone, PartialEq, Eq, derive_new::new)]
pub struct SortKey {
    pub name: String,
    pub direction: Direction,
}

impl SortKey {
    /// `index` is the position in a list of specifiers, `None` for a standalone one
    fn parse(index: Option<usize>, spec: &str) -> Result<Self, SpecError> {
        if spec.is_empty() {
            return Err(SpecError::EmptyKey { index });
        }

        let (direction, name) = if let Some(name) = spec.strip_prefix('-') {
            (Direction::Descending, name)
        } else if let Some(name) = spec.strip_prefix('+') {
            (Direction::Ascending, name)
        } else {
            (Direction::Ascending, spec)
        };

        if name.is_empty() {
            return Err(SpecError::MissingFieldName {
                index,
                spec: spec.to_string(),
            });
        }

        Ok(Self::new(name.to_string(), direction))
    }
}

impl FromStr for SortKey {
    type Err = SpecError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(None, s)
    }
}

impl std::fmt::Display for SortKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.direction {
            Direction::Descending => write!(f, "-{}", self.name),
            // names that start with a marker need an explicit one to parse back
            Direction::Ascending if self.name.starts_with(['-', '+']) => {
                write!(f, "+{}", self.name)
            }
            Direction::Ascending => f.write_str(&self.name),
        }
    }
}

impl From<SortKey> for KeyComparator {
    fn from(value: SortKey) -> Self {
        KeyComparator::generic(value.name, value.direction)
    }
}

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum SpecError {
    #[error("sort key{} is empty", position(.index))]
    EmptyKey { index: Option<usize> },
    #[error("sort key{} ({spec:?}) has a direction but no field name", position(.index))]
    MissingFieldName { index: Option<usize>, spec: String },
}

fn position(index: &Option<usize>) -> String {
    index.map(|index| format!(" #{index}")).unwrap_or_default()
}

#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum SortError {
    #[error("element at index {index} is not a record but {kind}")]
    NotARecord { index: usize, kind: &'static str },
    #[error("record at index {index} has no field {field:?}")]
    MissingField { index: usize, field: String },
    #[error("unable to compare values of field {field:?}")]
    Compare {
        field: String,
        #[source]
        source: CompareError,
    },
}

/// Anything that can be sorted by [SortSpec::sort]
pub trait AsRecord {
    /// The fields of this record, `None` if it is not a record
    fn as_record(&self) -> Option<&IndexMap<String, Value>>;

    /// Type name used in error messages
    fn kind(&self) -> &'static str;
}

impl AsRecord for Value {
    fn as_record(&self) -> Option<&IndexMap<String, Value>> {
        self.as_object()
    }

    fn kind(&self) -> &'static str {
        self.type_name()
    }
}

impl AsRecord for IndexMap<String, Value> {
    fn as_record(&self) -> Option<&IndexMap<String, Value>> {
        Some(self)
    }

    fn kind(&self) -> &'static str {
        "object"
    }
}

impl<T: AsRecord + ?Sized> AsRecord for &T {
    fn as_record(&self) -> Option<&IndexMap<String, Value>> {
        (**self).as_record()
    }

    fn kind(&self) -> &'static str {
        (**self).kind()
    }
}

/// Parses key specifiers such as `["-priority", "name"]`
///
/// A leading `-` sorts descending, a leading `+` or no marker sorts ascending. Only one marker is removed, so
/// `--a` sorts the field `-a` descending.
pub fn parse_keys<I, S>(order: I) -> Result<Vec<SortKey>, SpecError>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let keys = order
        .into_iter()
        .enumerate()
        .map(|(index, spec)| SortKey::parse(Some(index), spec.as_ref()))
        .collect::<Result<Vec<_>, _>>()?;

    tracing::debug!(?keys, "parsed sort keys");
    Ok(keys)
}

/// Sort using the generic comparators, see [parse_keys] for the format
pub fn by_keys<I, S>(order: I) -> Result<SortSpec, SpecError>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let comparators = parse_keys(order)?
        .into_iter()
        .map(KeyComparator::from)
        .collect();

    Ok(SortSpec { comparators })
}

/// Sort using the given comparators, in order
pub fn by_key_comparators(comparators: KeyComparatorList) -> SortSpec {
    SortSpec { comparators }
}

/// Ordered list of [KeyComparator]s used for sorting
#[derive(Debug, Clone, Default)]
pub struct SortSpec {
    comparators: KeyComparatorList,
}

impl From<KeyComparatorList> for SortSpec {
    fn from(value: KeyComparatorList) -> Self {
        by_key_comparators(value)
    }
}

impl SortSpec {
    pub fn by_keys<I, S>(order: I) -> Result<Self, SpecError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        by_keys(order)
    }

    pub fn by_key_comparators(comparators: KeyComparatorList) -> Self {
        by_key_comparators(comparators)
    }

    pub fn comparators(&self) -> &[KeyComparator] {
        &self.comparators
    }

    pub fn key_names(&self) -> impl Iterator<Item = &str> {
        self.comparators.iter().map(|key| key.name.as_str())
    }

    pub fn len(&self) -> usize {
        self.comparators.len()
    }

    pub fn is_empty(&self) -> bool {
        self.comparators.is_empty()
    }

    /// Sorts `records` in place
    ///
    /// Records that compare equal on every key keep their relative order.
    ///
    /// Fails when an element is not a record, a record lacks a key field or two values of a field can not be
    /// compared. `records` is left untouched in that case.
    ///
    /// Custom comparators must implement a total order, otherwise sorting may panic.
    #[tracing::instrument(level = "trace", skip_all, fields(records = records.len(), keys = self.comparators.len()))]
    pub fn sort<R: AsRecord>(&self, records: &mut [R]) -> Result<(), SortError> {
        let order = self.sorted_order(records).inspect_err(|error| {
            tracing::debug!(%error, "sort aborted");
        })?;

        apply_permutation(records, order);
        Ok(())
    }

    /// Indices of `records` in sorted order
    fn sorted_order<R: AsRecord>(&self, records: &[R]) -> Result<Vec<usize>, SortError> {
        let rows = records
            .iter()
            .enumerate()
            .map(|(index, record)| self.key_values(index, record))
            .collect::<Result<Vec<_>, _>>()?;

        let mut order: Vec<usize> = (0..rows.len()).collect();
        if self.comparators.is_empty() {
            return Ok(order);
        }

        self.check_comparable(&rows)?;

        let mut failure = None;
        order.sort_by(|&x, &y| {
            if failure.is_some() {
                return Ordering::Equal;
            }

            self.compare(&rows[x], &rows[y])
                .unwrap_or_else(|error| {
                    failure = Some(error);
                    Verdict::Equal
                })
                .into()
        });

        match failure {
            Some(error) => Err(error),
            None => Ok(order),
        }
    }

    fn key_values<'r, R: AsRecord>(
        &self,
        index: usize,
        record: &'r R,
    ) -> Result<Vec<&'r Value>, SortError> {
        let Some(fields) = record.as_record() else {
            return Err(SortError::NotARecord {
                index,
                kind: record.kind(),
            });
        };

        self.comparators
            .iter()
            .map(|key| {
                fields
                    .get(key.name.as_str())
                    .ok_or_else(|| SortError::MissingField {
                        index,
                        field: key.name.clone(),
                    })
            })
            .collect()
    }

    /// Compares every value against the first record's, so type errors surface before anything is sorted
    fn check_comparable(&self, rows: &[Vec<&Value>]) -> Result<(), SortError> {
        let Some((first, rest)) = rows.split_first() else {
            return Ok(());
        };

        for row in rest {
            for ((key, a), b) in self.comparators.iter().zip(first).zip(row) {
                key.compare(a, b).map_err(|source| SortError::Compare {
                    field: key.name.clone(),
                    source,
                })?;
            }
        }

        Ok(())
    }

    fn compare(&self, x: &[&Value], y: &[&Value]) -> Result<Verdict, SortError> {
        for ((key, a), b) in self.comparators.iter().zip(x).zip(y) {
            let verdict = key.compare(a, b).map_err(|source| SortError::Compare {
                field: key.name.clone(),
                source,
            })?;

            if verdict != Verdict::Equal {
                return Ok(verdict);
            }
        }

        Ok(Verdict::Equal)
    }
}

/// Moves `items[order[k]]` to position `k` using swaps only
fn apply_permutation<T>(items: &mut [T], mut order: Vec<usize>) {
    for start in 0..items.len() {
        let mut current = start;
        while order[current] != start {
            let next = order[current];
            items.swap(current, next);
            order[current] = current;
            current = next;
        }
        order[current] = current;
    }
}
