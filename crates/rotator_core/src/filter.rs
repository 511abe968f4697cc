use crate::Site;

/// Run-level gate deciding whether a site may be opened at all.
pub trait SiteFilter {
    fn accepts(&self, site: &Site) -> bool;
}

impl<F> SiteFilter for F
where
    F: Fn(&Site) -> bool,
{
    fn accepts(&self, site: &Site) -> bool {
        self(site)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CategoryFilter {
    #[default]
    All,
    JobBoards,
    Organizations,
}

impl SiteFilter for CategoryFilter {
    fn accepts(&self, site: &Site) -> bool {
        match self {
            CategoryFilter::All => true,
            CategoryFilter::JobBoards => site.is_jobboard(),
            CategoryFilter::Organizations => site.is_organization(),
        }
    }
}
