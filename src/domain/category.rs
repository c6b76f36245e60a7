use std::fmt;

use serde::{Deserialize, Serialize};

/// The fixed set of expense categories.
///
/// Variant order is the canonical display order: grouped reports and the
/// CLI list categories in this order. Labels are stored verbatim in the
/// database and in CSV exports.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Category {
    Food,
    Transport,
    Housing,
    Leisure,
    Health,
    Water,
    Electricity,
    Phone,
    Internet,
    Education,
    Other,
}

impl Category {
    /// Every category, in display order.
    pub const ALL: [Category; 11] = [
        Category::Food,
        Category::Transport,
        Category::Housing,
        Category::Leisure,
        Category::Health,
        Category::Water,
        Category::Electricity,
        Category::Phone,
        Category::Internet,
        Category::Education,
        Category::Other,
    ];

    /// Comma-separated list of every valid label, for error messages
    /// and help output.
    pub fn label_list() -> String {
        Category::ALL.map(|c| c.as_str()).join(", ")
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Food => "Food",
            Category::Transport => "Transport",
            Category::Housing => "Housing",
            Category::Leisure => "Leisure",
            Category::Health => "Health",
            Category::Water => "Water",
            Category::Electricity => "Electricity",
            Category::Phone => "Phone",
            Category::Internet => "Internet",
            Category::Education => "Education",
            Category::Other => "Other",
        }
    }
}

impl std::str::FromStr for Category {
    type Err = ParseCategoryError;

    /// Parse a category label, ignoring case and surrounding whitespace.
    /// Anything outside the fixed set fails, including the "pick one"
    /// placeholder a form would show before the user makes a choice.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "food" => Ok(Category::Food),
            "transport" => Ok(Category::Transport),
            "housing" => Ok(Category::Housing),
            "leisure" => Ok(Category::Leisure),
            "health" => Ok(Category::Health),
            "water" => Ok(Category::Water),
            "electricity" => Ok(Category::Electricity),
            "phone" => Ok(Category::Phone),
            "internet" => Ok(Category::Internet),
            "education" => Ok(Category::Education),
            "other" => Ok(Category::Other),
            _ => Err(ParseCategoryError::UnknownLabel),
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParseCategoryError {
    UnknownLabel,
}

impl fmt::Display for ParseCategoryError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParseCategoryError::UnknownLabel => write!(f, "unknown expense category"),
        }
    }
}

impl std::error::Error for ParseCategoryError {}
