//! Ordered section lists for the custom page builder.
//!
//! Invariant: after any mutation, `order == index + 1` for every section.

use db::models::page::Section;
use thiserror::Error;

#[derive(Debug, Clone, Error, PartialEq)]
pub enum SectionError {
    #[error("section id must not be empty")]
    EmptyId,
    #[error("duplicate section id: {0}")]
    DuplicateId(String),
    #[error("index {0} out of bounds for {1} sections")]
    OutOfBounds(usize, usize),
}

/// Reassign every `order` field to its position + 1.
pub fn normalize(mut sections: Vec<Section>) -> Vec<Section> {
    for (index, section) in sections.iter_mut().enumerate() {
        section.order = index as i64 + 1;
    }
    sections
}

/// Move the section at `from` to `to`, renumbering the whole list.
pub fn reorder(sections: Vec<Section>, from: usize, to: usize) -> Result<Vec<Section>, SectionError> {
    let len = sections.len();
    if from >= len {
        return Err(SectionError::OutOfBounds(from, len));
    }
    if to >= len {
        return Err(SectionError::OutOfBounds(to, len));
    }

    let mut sections = sections;
    let moved = sections.remove(from);
    sections.insert(to, moved);
    Ok(normalize(sections))
}

/// Merge an edited section back into the list by id, or append it when
/// the id is new. The list is renumbered either way.
pub fn merge(sections: Vec<Section>, edited: Section) -> Result<Vec<Section>, SectionError> {
    if edited.id.trim().is_empty() {
        return Err(SectionError::EmptyId);
    }

    let mut sections = sections;
    match sections.iter_mut().find(|s| s.id == edited.id) {
        Some(existing) => *existing = edited,
        None => sections.push(edited),
    }
    Ok(normalize(sections))
}

/// Validate a full section list as submitted by the page form.
pub fn validate(sections: &[Section]) -> Result<(), SectionError> {
    let mut seen = std::collections::HashSet::new();
    for section in sections {
        if section.id.trim().is_empty() {
            return Err(SectionError::EmptyId);
        }
        if !seen.insert(section.id.as_str()) {
            return Err(SectionError::DuplicateId(section.id.clone()));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use db::models::page::{SectionKind, SectionStyles};

    fn section(id: &str, order: i64) -> Section {
        Section {
            id: id.into(),
            kind: SectionKind::Content,
            title: format!("Section {id}"),
            content: String::new(),
            order,
            styles: SectionStyles::default(),
        }
    }

    fn ids(sections: &[Section]) -> Vec<&str> {
        sections.iter().map(|s| s.id.as_str()).collect()
    }

    fn orders(sections: &[Section]) -> Vec<i64> {
        sections.iter().map(|s| s.order).collect()
    }

    #[test]
    fn move_first_to_last_renumbers() {
        let list = vec![section("a", 1), section("b", 2), section("c", 3)];
        let result = reorder(list, 0, 2).unwrap();
        assert_eq!(ids(&result), ["b", "c", "a"]);
        assert_eq!(orders(&result), [1, 2, 3]);
    }

    #[test]
    fn order_always_equals_index_plus_one() {
        // Orders arrive dirty; any reorder must leave them normalized.
        let list = vec![section("a", 9), section("b", 4), section("c", 7)];
        let result = reorder(list, 2, 0).unwrap();
        assert_eq!(ids(&result), ["c", "a", "b"]);
        assert_eq!(orders(&result), [1, 2, 3]);
    }

    #[test]
    fn reorder_out_of_bounds_is_rejected() {
        let list = vec![section("a", 1)];
        assert_eq!(
            reorder(list, 3, 0),
            Err(SectionError::OutOfBounds(3, 1))
        );
    }

    #[test]
    fn merge_replaces_by_id() {
        let list = vec![section("a", 1), section("b", 2)];
        let mut edited = section("b", 2);
        edited.title = "Edited".into();

        let result = merge(list, edited).unwrap();
        assert_eq!(result.len(), 2);
        assert_eq!(result[1].title, "Edited");
        assert_eq!(orders(&result), [1, 2]);
    }

    #[test]
    fn merge_appends_unknown_id() {
        let list = vec![section("a", 1)];
        let result = merge(list, section("z", 0)).unwrap();
        assert_eq!(ids(&result), ["a", "z"]);
        assert_eq!(orders(&result), [1, 2]);
    }

    #[test]
    fn merge_rejects_empty_id() {
        let result = merge(vec![], section("", 0));
        assert_eq!(result, Err(SectionError::EmptyId));
    }

    #[test]
    fn validate_catches_duplicates() {
        let list = vec![section("a", 1), section("a", 2)];
        assert_eq!(
            validate(&list),
            Err(SectionError::DuplicateId("a".into()))
        );
        assert!(validate(&[section("a", 1), section("b", 2)]).is_ok());
    }
}
