use std::collections::VecDeque;
use std::path::{Path, PathBuf};

/// The queue of fragment files still to be tried.
///
/// Fragments are taken from the front; after an attempt, successful or not, the fragment is
/// moved to the back so that every fragment gets retried once the reference has grown.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Worklist {
    queue: VecDeque<PathBuf>,
}

impl Worklist {
    pub fn new(fragments: impl IntoIterator<Item = PathBuf>) -> Self {
        Self {
            queue: fragments.into_iter().collect(),
        }
    }

    pub fn len(&self) -> usize {
        self.queue.len()
    }

    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }

    pub fn front(&self) -> Option<&Path> {
        self.queue.front().map(PathBuf::as_path)
    }

    /// Moves the front fragment to the back of the queue.
    pub fn rotate(&mut self) {
        if let Some(path) = self.queue.pop_front() {
            self.queue.push_back(path);
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = &Path> {
        self.queue.iter().map(PathBuf::as_path)
    }
}
