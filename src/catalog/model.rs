// SPDX-License-Identifier: MIT
// Catalog data model — the persisted menu.json document.
//
// Dish is one menu entry. MenuDocument is the full wire shape the
// presentation layer consumes read-only: a category-grouped view, the flat
// item list, and aggregate statistics. The grouped view and statistics are
// always derived from the flat list, never persisted independently.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// One menu entry.
///
/// `name` is the de-duplication key, unique case-insensitively within the
/// catalog. `description`, `composition`, and `allergens` are `null` at
/// creation time and filled in by an enrichment step outside this tool.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Dish {
    /// Positive, unique, assigned in discovery order; never reused.
    pub id: u64,
    pub name: String,
    pub category: String,
    /// Relative asset reference, e.g. `images/Салат_Цезарь.jpg`.
    pub image: String,
    /// Lowercase image extension without the dot.
    pub image_format: String,
    pub description: Option<String>,
    pub composition: Option<String>,
    pub allergens: Option<String>,
}

/// One group of the category-grouped view. `count` always equals
/// `items.len()`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryGroup {
    pub name: String,
    pub items: Vec<Dish>,
    pub count: usize,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MenuSection {
    #[serde(default)]
    pub categories: Vec<CategoryGroup>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Statistics {
    #[serde(default)]
    pub total_items: usize,
    #[serde(default)]
    pub categories_count: usize,
}

/// The whole persisted catalog.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MenuDocument {
    #[serde(default)]
    pub menu: MenuSection,
    #[serde(default)]
    pub all_items: Vec<Dish>,
    #[serde(default)]
    pub statistics: Statistics,
}

impl MenuDocument {
    /// Rebuild the full document from a flat item list.
    ///
    /// Groups appear in first-appearance order over `items`; counts and
    /// statistics are recomputed from scratch on every call.
    pub fn from_items(items: Vec<Dish>) -> Self {
        let mut order: Vec<&str> = Vec::new();
        let mut grouped: HashMap<&str, Vec<Dish>> = HashMap::new();
        for dish in &items {
            let slot = grouped.entry(dish.category.as_str()).or_default();
            if slot.is_empty() {
                order.push(dish.category.as_str());
            }
            slot.push(dish.clone());
        }

        let categories: Vec<CategoryGroup> = order
            .into_iter()
            .map(|name| {
                let items = grouped.remove(name).unwrap_or_default();
                CategoryGroup {
                    name: name.to_string(),
                    count: items.len(),
                    items,
                }
            })
            .collect();

        let statistics = Statistics {
            total_items: items.len(),
            categories_count: categories.len(),
        };

        Self {
            menu: MenuSection { categories },
            all_items: items,
            statistics,
        }
    }

    /// Highest assigned dish id, 0 for an empty catalog.
    pub fn max_id(&self) -> u64 {
        self.all_items.iter().map(|dish| dish.id).max().unwrap_or(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dish(id: u64, name: &str, category: &str) -> Dish {
        Dish {
            id,
            name: name.to_string(),
            category: category.to_string(),
            image: format!("images/{name}.jpg"),
            image_format: "jpg".to_string(),
            description: None,
            composition: None,
            allergens: None,
        }
    }

    #[test]
    fn from_items_groups_in_first_appearance_order() {
        let doc = MenuDocument::from_items(vec![
            dish(1, "Суп дня", "Супы"),
            dish(2, "Салат Цезарь", "Салаты"),
            dish(3, "Том-ям", "Супы"),
        ]);

        let names: Vec<&str> = doc.menu.categories.iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, ["Супы", "Салаты"]);
        assert_eq!(doc.menu.categories[0].count, 2);
        assert_eq!(doc.menu.categories[0].items.len(), 2);
        assert_eq!(doc.menu.categories[1].count, 1);
        assert_eq!(doc.statistics.total_items, 3);
        assert_eq!(doc.statistics.categories_count, 2);
    }

    #[test]
    fn group_counts_sum_to_total() {
        let doc = MenuDocument::from_items(vec![
            dish(1, "a1", "Супы"),
            dish(2, "a2", "Салаты"),
            dish(3, "a3", "Супы"),
            dish(4, "a4", "Прочее"),
        ]);
        let summed: usize = doc.menu.categories.iter().map(|c| c.count).sum();
        assert_eq!(summed, doc.statistics.total_items);
        for group in &doc.menu.categories {
            assert!(group.items.iter().all(|d| d.category == group.name));
        }
    }

    #[test]
    fn max_id_is_zero_for_empty_catalog() {
        assert_eq!(MenuDocument::default().max_id(), 0);
        let doc = MenuDocument::from_items(vec![dish(7, "x", "Прочее"), dish(3, "y", "Прочее")]);
        assert_eq!(doc.max_id(), 7);
    }

    #[test]
    fn document_round_trips_through_json() {
        let doc = MenuDocument::from_items(vec![
            dish(1, "Салат Цезарь", "Салаты"),
            dish(2, "Том-ям", "Супы"),
        ]);
        let json = serde_json::to_string_pretty(&doc).unwrap();
        let parsed: MenuDocument = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, doc);
    }

    #[test]
    fn optional_fields_serialize_as_null() {
        let json = serde_json::to_value(dish(1, "Суп", "Супы")).unwrap();
        assert!(json.get("description").unwrap().is_null());
        assert!(json.get("composition").unwrap().is_null());
        assert!(json.get("allergens").unwrap().is_null());
    }
}
