//! Offset-indexed annotations describing every marshaled field.

use std::collections::BTreeMap;

use crate::kind::Kind;
use crate::value::ScalarValue;

/// Metadata for one marshaled field: where its bytes live and how to present
/// them. Start offsets are unique within a store; byte ranges from a single
/// marshal call tile the consumed range with no gaps or overlap.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Annotation {
    /// Absolute byte offset where the field begins.
    pub start: u64,
    /// Dotted path name, e.g. `song.Text[2]`.
    pub name: String,
    /// Byte length consumed, from the static layout (never content-dependent).
    pub size: usize,
    /// Shape kinds from outermost to innermost, for highlight cadence.
    pub kind_path: Vec<Kind>,
    /// Display label of the declared shape, e.g. `[[u8; 40]; 6]`.
    pub type_label: String,
    /// Decoded value for scalar fields; `None` for arrays and records.
    pub value: Option<ScalarValue>,
}

impl Annotation {
    /// One past the last byte this annotation covers.
    pub fn end(&self) -> u64 {
        self.start + self.size as u64
    }
}

/// Annotations keyed by start offset. Insertion order is irrelevant;
/// iteration replays entries in ascending start order.
#[derive(Debug, Default)]
pub struct AnnotationStore {
    entries: BTreeMap<u64, Annotation>,
}

impl AnnotationStore {
    pub fn new() -> Self {
        AnnotationStore::default()
    }

    /// Inserts an annotation, replacing any existing entry at the same start.
    pub fn insert(&mut self, annotation: Annotation) {
        self.entries.insert(annotation.start, annotation);
    }

    pub fn get(&self, start: u64) -> Option<&Annotation> {
        self.entries.get(&start)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Annotations in ascending start-offset order.
    pub fn iter(&self) -> impl Iterator<Item = &Annotation> {
        self.entries.values()
    }
}

#[cfg(feature = "serde")]
impl From<&Annotation> for crate::serde::AnnotationExport {
    fn from(annotation: &Annotation) -> Self {
        crate::serde::AnnotationExport {
            start: annotation.start,
            name: annotation.name.clone(),
            size: annotation.size,
            kind_path: annotation
                .kind_path
                .iter()
                .map(|kind| kind.label().to_string())
                .collect(),
            type_label: annotation.type_label.clone(),
            value: annotation.value.map(Into::into),
        }
    }
}

#[cfg(feature = "serde")]
impl AnnotationStore {
    /// Serializable snapshot of all annotations in ascending start order.
    pub fn export(&self) -> Vec<crate::serde::AnnotationExport> {
        self.iter().map(Into::into).collect()
    }
}

#[cfg(test)]
mod tests {
    use crate::layout::ScalarKind;

    use super::*;

    fn annotation(start: u64, size: usize) -> Annotation {
        Annotation {
            start,
            name: format!("f{start}"),
            size,
            kind_path: vec![Kind::Scalar(ScalarKind::U8)],
            type_label: "u8".to_string(),
            value: None,
        }
    }

    #[test]
    fn test_iter_ascending_regardless_of_insertion_order() {
        let mut store = AnnotationStore::new();
        store.insert(annotation(20, 4));
        store.insert(annotation(0, 10));
        store.insert(annotation(10, 10));

        let starts: Vec<u64> = store.iter().map(|a| a.start).collect();
        assert_eq!(starts, vec![0, 10, 20]);
    }

    #[test]
    fn test_insert_replaces_same_start() {
        let mut store = AnnotationStore::new();
        store.insert(annotation(0, 4));
        store.insert(annotation(0, 8));

        assert_eq!(store.len(), 1);
        assert_eq!(store.get(0).unwrap().size, 8);
    }

    #[test]
    fn test_end() {
        assert_eq!(annotation(10, 6).end(), 16);
    }
}
