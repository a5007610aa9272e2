//! Catalog of scent notes and recipes
//!
//! The catalog is the caller-owned input of the chart. It keeps items in
//! insertion order and indexes them by id; relations are stored as given,
//! orphans included.

use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::Path;
use tracing::{debug, info};

use super::{Category, Database, DiagramError, Item, Relation};

/// Default number of entries in the related-recipe list
pub const DEFAULT_RELATED_LIMIT: usize = 10;

#[derive(Debug, Default, Serialize, Deserialize)]
struct CatalogFile {
    #[serde(default)]
    items: Vec<Item>,
    #[serde(default, alias = "recipes")]
    relations: Vec<Relation>,
}

/// Item and relation store
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    items: Vec<Item>,
    index: HashMap<String, usize>,
    relations: Vec<Relation>,
}

impl Catalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a catalog from item and relation lists
    pub fn from_parts(items: Vec<Item>, relations: Vec<Relation>) -> Result<Self> {
        let mut catalog = Self::new();
        for item in items {
            catalog.add_node(item)?;
        }
        for relation in relations {
            catalog.add_edge(relation)?;
        }
        Ok(catalog)
    }

    /// Parse a catalog from its JSON form
    ///
    /// ```rust
    /// use scentwheel::Catalog;
    /// use scentwheel::prelude::Database;
    ///
    /// let json = r#"{
    ///     "items": [{"id": "Rose", "name": "Rose", "category": "SP"}],
    ///     "relations": []
    /// }"#;
    /// let catalog = Catalog::from_json(json).unwrap();
    /// assert_eq!(catalog.node_count(), 1);
    /// ```
    pub fn from_json(input: &str) -> Result<Self> {
        let file: CatalogFile = serde_json::from_str(input).map_err(DiagramError::from)?;
        let catalog = Self::from_parts(file.items, file.relations)?;
        info!(
            item_count = catalog.node_count(),
            relation_count = catalog.edge_count(),
            "Catalog loaded"
        );
        Ok(catalog)
    }

    /// Read and parse a catalog file
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let content = std::fs::read_to_string(path.as_ref()).map_err(DiagramError::from)?;
        Self::from_json(&content)
    }

    /// Serialize back to JSON
    pub fn to_json(&self) -> Result<String> {
        let file = CatalogFile {
            items: self.items.clone(),
            relations: self.relations.clone(),
        };
        Ok(serde_json::to_string_pretty(&file)?)
    }

    pub fn items(&self) -> &[Item] {
        &self.items
    }

    pub fn relations(&self) -> &[Relation] {
        &self.relations
    }

    pub fn has_item(&self, id: &str) -> bool {
        self.index.contains_key(id)
    }

    /// Items belonging to `category`, in insertion order
    pub fn items_in(&self, category: Category) -> impl Iterator<Item = &Item> {
        self.items
            .iter()
            .filter(move |item| item.category() == Some(category))
    }

    /// Items whose category symbol is not one of the four branches
    pub fn uncategorized(&self) -> impl Iterator<Item = &Item> {
        self.items.iter().filter(|item| item.category().is_none())
    }

    /// Relations tagged with `category` whose endpoints both exist
    pub fn drawable_relations(&self, category: Category) -> impl Iterator<Item = &Relation> {
        self.relations.iter().filter(move |relation| {
            relation.is_in(category) && relation.ids.iter().all(|id| self.is_laid_out(id))
        })
    }

    fn is_laid_out(&self, id: &str) -> bool {
        self.get_node(id)
            .is_some_and(|item| item.category().is_some())
    }

    /// Recipes listed next to the chart for the current selection
    ///
    /// Nothing is listed without a selection. Otherwise the relations of the
    /// active category that involve the selected item are returned, narrowed
    /// by a case-insensitive ingredient name search when `search` is not
    /// empty, and truncated to `limit`.
    pub fn related(
        &self,
        category: Category,
        selected: Option<&str>,
        search: &str,
        limit: usize,
    ) -> Vec<&Relation> {
        let Some(selected) = selected else {
            return Vec::new();
        };
        let needle = search.trim().to_lowercase();

        let related: Vec<&Relation> = self
            .relations
            .iter()
            .filter(|r| r.is_in(category) && r.involves(selected))
            .filter(|r| {
                needle.is_empty()
                    || r
                        .ingredients
                        .iter()
                        .any(|ingredient| ingredient.name.to_lowercase().contains(&needle))
            })
            .take(limit)
            .collect();

        debug!(
            selected,
            search = %needle,
            count = related.len(),
            "Resolved related recipes"
        );
        related
    }
}

impl Database for Catalog {
    type Node = Item;
    type Edge = Relation;

    fn add_node(&mut self, node: Item) -> Result<()> {
        if self.index.contains_key(&node.id) {
            return Err(DiagramError::duplicate_item(&node.id).into());
        }
        if node.category().is_none() {
            debug!(item_id = %node.id, symbol = %node.category, "Item has unknown category");
        }
        self.index.insert(node.id.clone(), self.items.len());
        self.items.push(node);
        Ok(())
    }

    fn add_edge(&mut self, edge: Relation) -> Result<()> {
        self.relations.push(edge);
        Ok(())
    }

    fn get_node(&self, id: &str) -> Option<&Item> {
        self.index.get(id).map(|&i| &self.items[i])
    }

    fn nodes(&self) -> impl Iterator<Item = &Item> {
        self.items.iter()
    }

    fn edges(&self) -> impl Iterator<Item = &Relation> {
        self.relations.iter()
    }

    fn clear(&mut self) {
        self.items.clear();
        self.index.clear();
        self.relations.clear();
    }

    fn node_count(&self) -> usize {
        self.items.len()
    }

    fn edge_count(&self) -> usize {
        self.relations.len()
    }
}
