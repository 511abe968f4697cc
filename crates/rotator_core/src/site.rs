use std::collections::BTreeSet;
use std::num::NonZeroU32;

pub type SiteId = u64;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Category {
    JobBoard,
    Organization,
}

/// Display-only location data. Each level may name several places.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Location {
    pub countries: Vec<String>,
    pub states: Vec<String>,
    pub cities: Vec<String>,
}

/// A job-search site as provided by the catalog for a single run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Site {
    pub id: SiteId,
    pub name: String,
    pub description: String,
    pub urls: Vec<String>,
    /// The site is considered from the front `1/priority` of the queue.
    pub priority: NonZeroU32,
    pub categories: BTreeSet<Category>,
    pub location: Location,
}

impl Site {
    pub fn new(id: SiteId, name: impl Into<String>, urls: Vec<String>, priority: NonZeroU32) -> Self {
        Self {
            id,
            name: name.into(),
            description: String::new(),
            urls,
            priority,
            categories: BTreeSet::new(),
            location: Location::default(),
        }
    }

    pub fn with_category(mut self, category: Category) -> Self {
        self.categories.insert(category);
        self
    }

    pub fn is_jobboard(&self) -> bool {
        self.categories.contains(&Category::JobBoard)
    }

    pub fn is_organization(&self) -> bool {
        self.categories.contains(&Category::Organization)
    }
}
