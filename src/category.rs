use std::collections::HashMap;

use lazy_static::lazy_static;
use rocket::http::uri::Origin;

/// A subject area. Cards store the `code`, routes and filters use the `name`.
#[derive(Debug, PartialEq, Eq)]
pub struct Category {
    pub name: &'static str,
    pub code: i64,
}

/// Every category, in menu order. Filters, review routes and mark-known
/// redirects all resolve names through this table.
pub static CATEGORIES: [Category; 6] = [
    Category { name: "cpp", code: 1 },
    Category { name: "web", code: 2 },
    Category { name: "alglin", code: 3 },
    Category { name: "mathdi", code: 4 },
    Category { name: "eco", code: 5 },
    Category { name: "systeme", code: 6 },
];

lazy_static! {
    static ref BY_NAME: HashMap<&'static str, &'static Category> =
        CATEGORIES.iter().map(|c| (c.name, c)).collect();
}

impl Category {
    pub fn from_name(name: &str) -> Option<&'static Category> {
        BY_NAME.get(name).copied()
    }

    /// Review route for this category
    pub fn route(&self) -> Origin<'static> {
        uri!(crate::review::review(self.name))
    }
}

/// One of the fixed predicates a card listing can be narrowed by.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Filter {
    All,
    Category(&'static Category),
    Known,
    Unknown,
}

impl Filter {
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "all" => Some(Filter::All),
            "known" => Some(Filter::Known),
            "unknown" => Some(Filter::Unknown),
            other => Category::from_name(other).map(Filter::Category),
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Filter::All => "all",
            Filter::Category(c) => c.name,
            Filter::Known => "known",
            Filter::Unknown => "unknown",
        }
    }

    /// Value the `type` column must equal, if any
    pub(crate) fn code(&self) -> Option<i64> {
        match self {
            Filter::Category(c) => Some(c.code),
            _ => None,
        }
    }

    /// Value the `known` column must equal, if any
    pub(crate) fn known(&self) -> Option<bool> {
        match self {
            Filter::Known => Some(true),
            Filter::Unknown => Some(false),
            _ => None,
        }
    }
}
