use std::fmt;

use serde::{Deserialize, Serialize};

/// The fixed set of categories the dashboard reports on.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Category {
    Food,
    Rent,
    Travel,
    Entertainment,
    Other,
}

impl Category {
    /// Recognized categories in reporting order.
    pub const ALL: [Category; 5] = [
        Category::Food,
        Category::Rent,
        Category::Travel,
        Category::Entertainment,
        Category::Other,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Food => "Food",
            Category::Rent => "Rent",
            Category::Travel => "Travel",
            Category::Entertainment => "Entertainment",
            Category::Other => "Other",
        }
    }

    /// Exact, case-sensitive lookup of a stored label.
    pub fn from_label(label: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|category| category.as_str() == label)
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

/// A stored category label classified at aggregation time.
///
/// Storage keeps whatever label the user typed; only reporting maps it onto
/// the recognized set.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CategoryLabel<'a> {
    Recognized(Category),
    Custom(&'a str),
}

impl<'a> CategoryLabel<'a> {
    pub fn classify(label: &'a str) -> Self {
        match Category::from_label(label) {
            Some(category) => CategoryLabel::Recognized(category),
            None => CategoryLabel::Custom(label),
        }
    }

    /// Reporting bucket: custom labels fold into [`Category::Other`].
    pub fn bucket(&self) -> Category {
        match self {
            CategoryLabel::Recognized(category) => *category,
            CategoryLabel::Custom(_) => Category::Other,
        }
    }
}
