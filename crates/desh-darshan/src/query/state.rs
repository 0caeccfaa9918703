use std::{fmt, str::FromStr};

use desh_darshan_catalog::Category;
use thiserror::Error;

/// Category filter: everything, or one exact category.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub enum CategoryFilter {
    #[default]
    All,
    Only(Category),
}

impl FromStr for CategoryFilter {
    type Err = std::convert::Infallible;

    /// `"all"` selects everything; any other label is an exact category.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s {
            "all" => Self::All,
            label => Self::Only(Category::from_label(label)),
        })
    }
}

impl From<Category> for CategoryFilter {
    fn from(value: Category) -> Self {
        Self::Only(value)
    }
}

impl fmt::Display for CategoryFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::All => f.write_str("all"),
            Self::Only(category) => category.fmt(f),
        }
    }
}

/// Region (state) filter. The label is stored trimmed.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub enum RegionFilter {
    #[default]
    All,
    Only(String),
}

impl RegionFilter {
    pub fn only(label: &str) -> Self {
        Self::Only(label.trim().to_string())
    }
}

impl FromStr for RegionFilter {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s.trim() {
            "all" => Self::All,
            label => Self::only(label),
        })
    }
}

impl fmt::Display for RegionFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::All => f.write_str("all"),
            Self::Only(label) => f.write_str(label),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum SortKey {
    /// Ascending by name
    #[default]
    Name,
    /// Highest rating first
    Rating,
    /// Most reviewed first
    Reviews,
}

/// Presentation only; never affects results.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ViewMode {
    #[default]
    Grid,
    List,
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("unknown {kind}: {value:?}")]
pub struct ParseQueryError {
    kind: &'static str,
    value: String,
}

impl FromStr for SortKey {
    type Err = ParseQueryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "name" => Ok(Self::Name),
            "rating" => Ok(Self::Rating),
            "reviews" => Ok(Self::Reviews),
            other => Err(ParseQueryError {
                kind: "sort key",
                value: other.to_string(),
            }),
        }
    }
}

impl FromStr for ViewMode {
    type Err = ParseQueryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "grid" => Ok(Self::Grid),
            "list" => Ok(Self::List),
            other => Err(ParseQueryError {
                kind: "view mode",
                value: other.to_string(),
            }),
        }
    }
}

/// Everything the user has chosen on the explore view.
///
/// Independent of favorites: nothing here reads or writes the favorite set.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct QueryState {
    pub search_text: String,
    pub category: CategoryFilter,
    pub region: RegionFilter,
    pub sort: SortKey,
    pub view: ViewMode,
}

impl QueryState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_search(mut self, text: impl Into<String>) -> Self {
        self.search_text = text.into();
        self
    }

    pub fn with_category(mut self, category: impl Into<CategoryFilter>) -> Self {
        self.category = category.into();
        self
    }

    pub fn with_region(mut self, region: RegionFilter) -> Self {
        self.region = region;
        self
    }

    pub fn with_sort(mut self, sort: SortKey) -> Self {
        self.sort = sort;
        self
    }

    pub fn with_view(mut self, view: ViewMode) -> Self {
        self.view = view;
        self
    }

    /// Back to defaults: no search text, all categories, all regions,
    /// sorted by name, grid view.
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// Whether any filter narrows the results.
    #[must_use]
    pub fn is_filtered(&self) -> bool {
        !self.search_text.trim().is_empty()
            || self.category != CategoryFilter::All
            || self.region != RegionFilter::All
    }
}
