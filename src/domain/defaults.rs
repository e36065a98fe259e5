//! Default-flag invariant maintenance for owner-scoped record collections.
//!
//! Every function here operates on one owner's collection, in collection
//! order. After any of them returns, a non-empty collection has exactly one
//! record flagged default and an empty one has none. The functions are pure:
//! they never log, retry or touch storage.

use crate::{Result, StorefrontError};

/// A record that carries an "is default" flag within its owner's collection.
pub trait DefaultFlagged {
    fn record_id(&self) -> &str;
    fn is_default(&self) -> bool;
    fn set_default_flag(&mut self, value: bool);
    /// Error returned when no record in the collection has the requested id.
    fn not_found() -> StorefrontError;
}

/// Which record held the default flag before and after a mutation.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct DefaultChange {
    pub previous: Option<String>,
    pub current: Option<String>,
}

impl DefaultChange {
    pub fn changed(&self) -> bool { self.previous != self.current }
}

/// Result of a maintainer operation: the affected record plus the default move.
#[derive(Clone, Debug)]
pub struct Mutation<R> {
    pub record: R,
    pub default_change: DefaultChange,
}

pub fn current_default<R: DefaultFlagged>(records: &[R]) -> Option<&R> {
    records.iter().find(|r| r.is_default())
}

pub fn default_count<R: DefaultFlagged>(records: &[R]) -> usize {
    records.iter().filter(|r| r.is_default()).count()
}

fn default_id<R: DefaultFlagged>(records: &[R]) -> Option<String> {
    current_default(records).map(|r| r.record_id().to_string())
}

fn position<R: DefaultFlagged>(records: &[R], id: &str) -> Result<usize> {
    records.iter().position(|r| r.record_id() == id).ok_or_else(R::not_found)
}

fn make_default<R: DefaultFlagged>(records: &mut [R], index: usize) {
    for (i, record) in records.iter_mut().enumerate() {
        record.set_default_flag(i == index);
    }
}

/// Marks `id` as the owner's default and clears every other record.
///
/// Already-default records short-circuit and leave the collection untouched.
pub fn set_default<R: DefaultFlagged + Clone>(records: &mut [R], id: &str) -> Result<Mutation<R>> {
    let index = position(records, id)?;
    let previous = default_id(records);
    if !records[index].is_default() {
        make_default(records, index);
    }
    Ok(Mutation { record: records[index].clone(), default_change: DefaultChange { previous, current: Some(id.to_string()) } })
}

/// Appends `record`. It becomes the default when it asks to be, or when the
/// collection was empty; otherwise it is stored non-default.
pub fn insert<R: DefaultFlagged + Clone>(records: &mut Vec<R>, mut record: R) -> Mutation<R> {
    let previous = default_id(records);
    let becomes_default = record.is_default() || records.is_empty();
    if becomes_default {
        for other in records.iter_mut() { other.set_default_flag(false); }
    }
    record.set_default_flag(becomes_default);
    records.push(record.clone());
    Mutation { record, default_change: DefaultChange { previous, current: default_id(records) } }
}

/// Applies `edit` to the record with `id`.
///
/// `wants_default == Some(true)` on a non-default record moves the default to
/// it before the edit. A request to clear the flag is ignored: the default only
/// moves when another record claims it. `edit` must not change the record id.
pub fn update<R, F>(records: &mut [R], id: &str, wants_default: Option<bool>, edit: F) -> Result<Mutation<R>>
where
    R: DefaultFlagged + Clone,
    F: FnOnce(&mut R),
{
    let index = position(records, id)?;
    let previous = default_id(records);
    if wants_default == Some(true) && !records[index].is_default() {
        make_default(records, index);
    }
    edit(&mut records[index]);
    Ok(Mutation { record: records[index].clone(), default_change: DefaultChange { previous, current: default_id(records) } })
}

/// Removes the record with `id`. If it was the default, the first remaining
/// record in collection order is promoted.
pub fn remove<R: DefaultFlagged + Clone>(records: &mut Vec<R>, id: &str) -> Result<Mutation<R>> {
    let index = position(records, id)?;
    let previous = default_id(records);
    let removed = records.remove(index);
    if removed.is_default() {
        if let Some(first) = records.first_mut() { first.set_default_flag(true); }
    }
    Ok(Mutation { record: removed, default_change: DefaultChange { previous, current: default_id(records) } })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Clone, Debug, PartialEq)]
    struct Rec { id: String, default: bool, label: &'static str }

    impl DefaultFlagged for Rec {
        fn record_id(&self) -> &str { &self.id }
        fn is_default(&self) -> bool { self.default }
        fn set_default_flag(&mut self, value: bool) { self.default = value; }
        fn not_found() -> StorefrontError { StorefrontError::AddressNotFound }
    }

    fn rec(id: &str, default: bool) -> Rec { Rec { id: id.into(), default, label: "" } }
    fn flags(records: &[Rec]) -> Vec<(&str, bool)> { records.iter().map(|r| (r.id.as_str(), r.default)).collect() }

    #[test]
    fn test_set_default_moves_flag() {
        let mut records = vec![rec("A", true), rec("B", false)];
        let m = set_default(&mut records, "B").unwrap();
        assert_eq!(flags(&records), vec![("A", false), ("B", true)]);
        assert!(m.record.default);
        assert_eq!(m.default_change, DefaultChange { previous: Some("A".into()), current: Some("B".into()) });
    }

    #[test]
    fn test_set_default_is_idempotent() {
        let mut records = vec![rec("A", true), rec("B", false)];
        set_default(&mut records, "B").unwrap();
        let snapshot = records.clone();
        let m = set_default(&mut records, "B").unwrap();
        assert_eq!(records, snapshot);
        assert!(!m.default_change.changed());
    }

    #[test]
    fn test_set_default_unknown_id() {
        let mut records = vec![rec("A", true)];
        assert!(matches!(set_default(&mut records, "Z"), Err(StorefrontError::AddressNotFound)));
        assert_eq!(flags(&records), vec![("A", true)]);
    }

    #[test]
    fn test_insert_into_empty_becomes_default() {
        let mut records = Vec::new();
        let m = insert(&mut records, rec("A", false));
        assert!(m.record.default);
        assert_eq!(m.default_change.current.as_deref(), Some("A"));
    }

    #[test]
    fn test_insert_default_clears_others() {
        let mut records = vec![rec("A", true), rec("B", false)];
        insert(&mut records, rec("C", true));
        assert_eq!(flags(&records), vec![("A", false), ("B", false), ("C", true)]);
    }

    #[test]
    fn test_insert_non_default_keeps_existing() {
        let mut records = vec![rec("A", true)];
        let m = insert(&mut records, rec("B", false));
        assert_eq!(flags(&records), vec![("A", true), ("B", false)]);
        assert!(!m.default_change.changed());
    }

    #[test]
    fn test_update_claiming_default_clears_previous() {
        let mut records = vec![rec("A", true), rec("B", false)];
        let m = update(&mut records, "B", Some(true), |r| r.label = "edited").unwrap();
        assert_eq!(flags(&records), vec![("A", false), ("B", true)]);
        assert_eq!(m.record.label, "edited");
        assert!(m.default_change.changed());
    }

    #[test]
    fn test_update_cannot_clear_only_default() {
        let mut records = vec![rec("A", true), rec("B", false)];
        update(&mut records, "A", Some(false), |r| r.label = "x").unwrap();
        assert_eq!(flags(&records), vec![("A", true), ("B", false)]);
    }

    #[test]
    fn test_remove_default_promotes_first_remaining() {
        let mut records = vec![rec("A", false), rec("B", true), rec("C", false)];
        let m = remove(&mut records, "B").unwrap();
        assert_eq!(flags(&records), vec![("A", true), ("C", false)]);
        assert_eq!(m.record.id, "B");
        assert_eq!(m.default_change.current.as_deref(), Some("A"));
    }

    #[test]
    fn test_remove_last_leaves_no_default() {
        let mut records = vec![rec("A", true)];
        let m = remove(&mut records, "A").unwrap();
        assert!(records.is_empty());
        assert_eq!(m.default_change, DefaultChange { previous: Some("A".into()), current: None });
    }

    #[test]
    fn test_switch_then_delete_restores_first() {
        let mut records = vec![rec("A", true), rec("B", false)];
        set_default(&mut records, "B").unwrap();
        remove(&mut records, "B").unwrap();
        assert_eq!(flags(&records), vec![("A", true)]);
    }

    #[test]
    fn test_invariant_holds_over_operation_sequence() {
        let mut records: Vec<Rec> = Vec::new();
        let ids = ["A", "B", "C", "D", "E"];
        for (step, id) in ids.iter().enumerate() {
            insert(&mut records, rec(id, step % 2 == 1));
            assert_eq!(default_count(&records), 1);
        }
        for step in 0..40usize {
            let target = records[step % records.len()].id.clone();
            match step % 4 {
                0 => { set_default(&mut records, &target).unwrap(); }
                1 => { update(&mut records, &target, Some(step % 3 == 0), |_| {}).unwrap(); }
                2 if records.len() > 1 => { remove(&mut records, &target).unwrap(); }
                _ => { insert(&mut records, rec(&format!("N{step}"), step % 5 == 0)); }
            }
            assert_eq!(default_count(&records), 1, "after step {step}");
        }
        while let Some(first) = records.first().map(|r| r.id.clone()) {
            remove(&mut records, &first).unwrap();
            assert_eq!(default_count(&records), usize::from(!records.is_empty()));
        }
    }
}
