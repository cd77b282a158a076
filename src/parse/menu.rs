use std::collections::BTreeSet;

use serde::ser::SerializeMap;
use serde::{Deserialize, Serialize, Serializer};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Dish {
    pub name: String,
    #[serde(default)]
    pub diets: BTreeSet<String>,
}

impl Dish {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            diets: BTreeSet::new(),
        }
    }

    #[must_use]
    pub fn with_diets<I, S>(mut self, diets: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.diets.extend(diets.into_iter().map(Into::into));
        self
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Category {
    pub name: String,
    pub dishes: Vec<Dish>,
}

/// Categories in document order, each holding its dishes in document order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Menu {
    categories: Vec<Category>,
}

impl Menu {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the dish list for `name`, creating the category at the end if it is new.
    ///
    /// Category names are compared exactly, so a name that shows up again later in
    /// the page keeps its first position and collects the later dishes too.
    pub fn category_mut(&mut self, name: &str) -> &mut Vec<Dish> {
        let idx = match self.categories.iter().position(|c| c.name == name) {
            Some(idx) => idx,
            None => {
                self.categories.push(Category {
                    name: name.to_owned(),
                    dishes: Vec::new(),
                });
                self.categories.len() - 1
            }
        };
        &mut self.categories[idx].dishes
    }

    pub fn push(&mut self, category: &str, dish: Dish) {
        self.category_mut(category).push(dish);
    }

    pub fn prune_empty(&mut self) {
        self.categories.retain(|c| !c.dishes.is_empty());
    }

    pub fn get(&self, category: &str) -> Option<&[Dish]> {
        self.categories
            .iter()
            .find(|c| c.name == category)
            .map(|c| c.dishes.as_slice())
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Category> {
        self.categories.iter()
    }

    pub fn len(&self) -> usize {
        self.categories.len()
    }

    pub fn is_empty(&self) -> bool {
        self.categories.is_empty()
    }

    /// Category names mapped to plain dish names, mostly useful for comparisons.
    pub fn dish_names(&self) -> Vec<(&str, Vec<&str>)> {
        self.categories
            .iter()
            .map(|c| {
                (
                    c.name.as_str(),
                    c.dishes.iter().map(|d| d.name.as_str()).collect(),
                )
            })
            .collect()
    }
}

impl<'a> IntoIterator for &'a Menu {
    type Item = &'a Category;
    type IntoIter = std::slice::Iter<'a, Category>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl FromIterator<(String, Vec<Dish>)> for Menu {
    fn from_iter<T: IntoIterator<Item = (String, Vec<Dish>)>>(iter: T) -> Self {
        let mut menu = Self::new();
        for (name, dishes) in iter {
            menu.category_mut(&name).extend(dishes);
        }
        menu
    }
}

// serialized as an object so the JSON reads `{"Entrées": [...]}` in page order
impl Serialize for Menu {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.categories.len()))?;
        for category in &self.categories {
            map.serialize_entry(&category.name, &category.dishes)?;
        }
        map.end()
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
pub struct ParseOptions {
    /// Keep categories that ended up with no dishes.
    #[serde(default)]
    pub keep_empty_categories: bool,
}

impl ParseOptions {
    pub(super) fn finish(self, mut menu: Menu) -> Menu {
        if !self.keep_empty_categories {
            menu.prune_empty();
        }
        menu
    }
}
