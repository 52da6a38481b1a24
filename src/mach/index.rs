use std::collections::HashMap;

/// ## Line and label index
///
/// Filled in while the program runs. Entries are appended in discovery
/// order and never removed until the index is cleared. Lookups that
/// miss fall back to a rescan of the source, see `jump.rs`.

#[derive(Debug, Clone, PartialEq)]
pub struct Entry {
    pub line_number: usize,
    pub label: Option<String>,
    pub position: usize,
}

#[derive(Debug, Default)]
pub struct Index {
    entries: Vec<Entry>,
    by_line: HashMap<usize, usize>,
    by_label: HashMap<String, usize>,
    by_position: HashMap<usize, usize>,
}

impl Index {
    pub fn new() -> Index {
        Index::default()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
        self.by_line.clear();
        self.by_label.clear();
        self.by_position.clear();
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn entries(&self) -> &[Entry] {
        &self.entries
    }

    /// Source position of a line.
    pub fn find(&self, line_number: usize) -> Option<usize> {
        self.by_line
            .get(&line_number)
            .map(|&i| self.entries[i].position)
    }

    /// Source position of the line carrying a label.
    pub fn find_by_label(&self, label: &str) -> Option<usize> {
        self.by_label.get(label).map(|&i| self.entries[i].position)
    }

    /// Line starting at a source position.
    pub fn line_at(&self, position: usize) -> Option<usize> {
        self.by_position
            .get(&position)
            .map(|&i| self.entries[i].line_number)
    }

    pub fn add(&mut self, line_number: usize, position: usize) {
        if self.by_line.contains_key(&line_number) || self.by_position.contains_key(&position) {
            return;
        }
        let i = self.entries.len();
        self.entries.push(Entry {
            line_number,
            label: None,
            position,
        });
        self.by_line.insert(line_number, i);
        self.by_position.insert(position, i);
    }

    /// Does nothing when the line has not been indexed yet.
    pub fn add_label(&mut self, line_number: usize, label: &str) {
        let i = match self.by_line.get(&line_number) {
            Some(&i) => i,
            None => return,
        };
        if let Some(old) = self.entries[i].label.replace(label.to_string()) {
            self.by_label.remove(&old);
        }
        self.by_label.insert(label.to_string(), i);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_add_once() {
        let mut index = Index::new();
        index.add(1, 0);
        index.add(1, 40);
        index.add(2, 0);
        assert_eq!(index.len(), 1);
        assert_eq!(index.find(1), Some(0));
        assert_eq!(index.find(2), None);
        assert_eq!(index.line_at(0), Some(1));
    }

    #[test]
    fn test_label_needs_line() {
        let mut index = Index::new();
        index.add_label(3, "loop");
        assert_eq!(index.find_by_label("loop"), None);
        index.add(3, 17);
        index.add_label(3, "loop");
        assert_eq!(index.find_by_label("loop"), Some(17));
        assert_eq!(index.len(), 1);
        assert_eq!(index.entries()[0].label.as_deref(), Some("loop"));
    }

    #[test]
    fn test_clear() {
        let mut index = Index::new();
        index.add(1, 0);
        index.add_label(1, "a");
        index.clear();
        assert!(index.is_empty());
        assert_eq!(index.find_by_label("a"), None);
    }
}
