//! Core type definitions for the scent wheel
//!
//! Items are scent notes, relations are recipes pairing two notes, and both
//! are partitioned by one of four seasonal categories.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::DiagramError;

/// One of the four fixed branches of the wheel
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub enum Category {
    /// Spring: `SP`
    #[default]
    Spring,
    /// Summer: `SU`
    Summer,
    /// Autumn: `AU`
    Autumn,
    /// Winter: `WI`
    Winter,
}

impl Category {
    /// Branch order around the wheel
    pub const ALL: [Category; 4] = [
        Category::Spring,
        Category::Summer,
        Category::Autumn,
        Category::Winter,
    ];

    /// The symbol used in catalog data
    pub fn symbol(&self) -> &'static str {
        match self {
            Category::Spring => "SP",
            Category::Summer => "SU",
            Category::Autumn => "AU",
            Category::Winter => "WI",
        }
    }

    /// Parse an exact category symbol
    ///
    /// Matching is case-sensitive; anything that is not one of the four
    /// symbols yields `None`.
    pub fn from_symbol(symbol: &str) -> Option<Self> {
        Category::ALL.into_iter().find(|c| c.symbol() == symbol)
    }

    /// Index of this branch in [`Category::ALL`]
    pub fn index(&self) -> usize {
        *self as usize
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.symbol())
    }
}

impl FromStr for Category {
    type Err = DiagramError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Category::from_symbol(s.trim()).ok_or_else(|| DiagramError::unknown_category(s))
    }
}

/// A scent note rendered as a leaf of the wheel
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Item {
    /// Unique identifier, also used as the label text
    pub id: String,
    /// Display name
    pub name: String,
    /// Raw category symbol; unknown symbols are kept but never laid out
    #[serde(alias = "season")]
    pub category: String,
}

impl Item {
    /// Create a new item in one of the known categories
    pub fn new(id: impl Into<String>, name: impl Into<String>, category: Category) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            category: category.symbol().to_string(),
        }
    }

    /// Create an item with an arbitrary category symbol
    pub fn with_symbol(
        id: impl Into<String>,
        name: impl Into<String>,
        symbol: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            category: symbol.into(),
        }
    }

    /// The parsed category, if the symbol is one of the four known ones
    pub fn category(&self) -> Option<Category> {
        Category::from_symbol(&self.category)
    }
}

/// A note reference carried by a recipe
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Ingredient {
    pub id: String,
    pub name: String,
}

impl Ingredient {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
        }
    }
}

/// A recipe pairing two items
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Relation {
    /// The two endpoint item ids
    pub ids: [String; 2],
    /// Raw category symbol
    #[serde(alias = "primarySeason")]
    pub category: String,
    /// Caller-owned payload; the chart only reads it for search
    #[serde(default, alias = "rawSelected")]
    pub ingredients: Vec<Ingredient>,
}

impl Relation {
    /// Create a relation without a payload
    pub fn new(a: impl Into<String>, b: impl Into<String>, category: Category) -> Self {
        Self {
            ids: [a.into(), b.into()],
            category: category.symbol().to_string(),
            ingredients: Vec::new(),
        }
    }

    /// Attach an ingredient list
    pub fn with_ingredients(mut self, ingredients: Vec<Ingredient>) -> Self {
        self.ingredients = ingredients;
        self
    }

    /// The parsed category, if known
    pub fn category(&self) -> Option<Category> {
        Category::from_symbol(&self.category)
    }

    /// Returns true if this relation is tagged with `category`
    pub fn is_in(&self, category: Category) -> bool {
        self.category == category.symbol()
    }

    /// Returns true if either endpoint is `id`
    pub fn involves(&self, id: &str) -> bool {
        self.ids.iter().any(|i| i == id)
    }

    pub fn source(&self) -> &str {
        &self.ids[0]
    }

    pub fn target(&self) -> &str {
        &self.ids[1]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_category_symbols() {
        assert_eq!(Category::Spring.symbol(), "SP");
        assert_eq!(Category::Summer.symbol(), "SU");
        assert_eq!(Category::Autumn.symbol(), "AU");
        assert_eq!(Category::Winter.symbol(), "WI");
    }

    #[test]
    fn test_category_from_symbol() {
        assert_eq!(Category::from_symbol("SP"), Some(Category::Spring));
        assert_eq!(Category::from_symbol("WI"), Some(Category::Winter));
        assert_eq!(Category::from_symbol("sp"), None);
        assert_eq!(Category::from_symbol("XX"), None);
    }

    #[test]
    fn test_category_from_str() {
        assert_eq!("AU".parse::<Category>().unwrap(), Category::Autumn);
        assert_eq!(" SU ".parse::<Category>().unwrap(), Category::Summer);
        assert!("summer".parse::<Category>().is_err());
    }

    #[test]
    fn test_category_order() {
        for (i, category) in Category::ALL.iter().enumerate() {
            assert_eq!(category.index(), i);
        }
        assert_eq!(Category::default(), Category::Spring);
    }

    #[test]
    fn test_category_display() {
        assert_eq!(Category::Autumn.to_string(), "AU");
    }

    #[test]
    fn test_item_category() {
        let item = Item::new("Rose", "Rose Absolute", Category::Spring);
        assert_eq!(item.category(), Some(Category::Spring));

        let stray = Item::with_symbol("Ghost", "Ghost", "ZZ");
        assert_eq!(stray.category(), None);
    }

    #[test]
    fn test_relation_involves() {
        let relation = Relation::new("Rose", "Oud", Category::Winter);
        assert!(relation.involves("Rose"));
        assert!(relation.involves("Oud"));
        assert!(!relation.involves("Musk"));
        assert!(relation.is_in(Category::Winter));
        assert!(!relation.is_in(Category::Spring));
        assert_eq!(relation.source(), "Rose");
        assert_eq!(relation.target(), "Oud");
    }

    #[test]
    fn test_relation_deserializes_original_field_names() {
        let json = r#"{
            "ids": ["Rose", "Oud"],
            "primarySeason": "WI",
            "rawSelected": [{"id": "Rose", "name": "Rose Absolute"}]
        }"#;
        let relation: Relation = serde_json::from_str(json).unwrap();
        assert_eq!(relation.category(), Some(Category::Winter));
        assert_eq!(relation.ingredients.len(), 1);
        assert_eq!(relation.ingredients[0].name, "Rose Absolute");
    }

    #[test]
    fn test_item_deserializes_season_alias() {
        let item: Item = serde_json::from_str(r#"{"id":"Yuzu","name":"Yuzu","season":"SU"}"#)
            .unwrap();
        assert_eq!(item.category(), Some(Category::Summer));
    }
}
