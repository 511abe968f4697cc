use crate::SiteId;

/// Round-robin order of site ids. Front is most overdue, back was opened last.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct QueueState {
    ids: Vec<SiteId>,
}

impl QueueState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    pub fn as_slice(&self) -> &[SiteId] {
        &self.ids
    }

    pub fn position(&self, id: SiteId) -> Option<usize> {
        self.ids.iter().position(|&queued| queued == id)
    }

    pub fn contains(&self, id: SiteId) -> bool {
        self.ids.contains(&id)
    }

    /// Returns the position of `id`, appending it to the back if absent.
    pub fn index_or_append(&mut self, id: SiteId) -> usize {
        match self.position(id) {
            Some(index) => index,
            None => {
                self.ids.push(id);
                self.ids.len() - 1
            }
        }
    }

    pub(crate) fn push(&mut self, id: SiteId) {
        self.ids.push(id);
    }

    pub(crate) fn remove(&mut self, index: usize) -> SiteId {
        self.ids.remove(index)
    }

    pub(crate) fn get(&self, index: usize) -> Option<SiteId> {
        self.ids.get(index).copied()
    }

    pub(crate) fn retain(&mut self, keep: impl FnMut(&SiteId) -> bool) {
        self.ids.retain(keep);
    }
}

impl From<Vec<SiteId>> for QueueState {
    fn from(ids: Vec<SiteId>) -> Self {
        Self { ids }
    }
}

impl FromIterator<SiteId> for QueueState {
    fn from_iter<I: IntoIterator<Item = SiteId>>(iter: I) -> Self {
        Self {
            ids: iter.into_iter().collect(),
        }
    }
}
