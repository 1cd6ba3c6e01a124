use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

/// Shared, ordered collection of completion candidates.
///
/// The store is mutated by the host (as the data behind a text field's
/// suggestions changes) and snapshot-read by filter workers. Both sides go
/// through the same mutex, so a mutation never interleaves with a snapshot.
/// Order is significant: it breaks ties in the ranked segment and is the
/// output order of the anchored segment.
#[derive(Debug, Default, Clone)]
pub struct CandidateStore {
    entries: Arc<Mutex<Vec<String>>>,
}

impl CandidateStore {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a candidate. Duplicates are permitted.
    pub fn add(&self, candidate: impl Into<String>) {
        self.lock().push(candidate.into());
    }

    /// Remove the first occurrence of `candidate`, returning whether one was
    /// removed.
    pub fn remove(&self, candidate: &str) -> bool {
        let mut entries = self.lock();
        match entries.iter().position(|entry| entry == candidate) {
            Some(index) => {
                entries.remove(index);
                true
            }
            None => false,
        }
    }

    /// Remove every candidate.
    pub fn clear(&self) {
        self.lock().clear();
    }

    /// Replace the entire contents in one locked step.
    pub fn set_all<I>(&self, candidates: I)
    where
        I: IntoIterator,
        I::Item: Into<String>,
    {
        let replacement: Vec<String> = candidates.into_iter().map(Into::into).collect();
        *self.lock() = replacement;
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.lock().len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    /// Copy the current contents for a worker scan. Holding the lock only
    /// for the copy keeps mutation and scanning mutually exclusive without
    /// blocking the host for the duration of the scan.
    pub(crate) fn snapshot(&self) -> Vec<String> {
        self.lock().clone()
    }

    fn lock(&self) -> MutexGuard<'_, Vec<String>> {
        self.entries.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
