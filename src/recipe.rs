//! Recipe records and the drafts used to create or edit them

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// A stored recipe
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Recipe {
    /// Opaque unique id, assigned once at creation
    pub id: String,
    pub name: String,
    /// Display order; never contains blank entries
    pub ingredients: Vec<String>,
    pub calories: u32,
    #[serde(rename = "isFavorite")]
    pub is_favorite: bool,
}

impl Recipe {
    /// Build a non-favorite recipe from a draft
    pub fn from_draft(id: String, draft: RecipeDraft) -> Self {
        Self {
            id,
            name: draft.name,
            ingredients: draft.ingredients,
            calories: draft.calories,
            is_favorite: false,
        }
    }

    /// Replace the editable fields, keeping id and favorite flag
    pub fn apply(&mut self, draft: RecipeDraft) {
        self.name = draft.name;
        self.ingredients = draft.ingredients;
        self.calories = draft.calories;
    }

    /// Case-insensitive match on name or any ingredient.
    ///
    /// `needle` must already be lowercased.
    pub fn matches(&self, needle: &str) -> bool {
        self.name.to_lowercase().contains(needle)
            || self
                .ingredients
                .iter()
                .any(|ing| ing.to_lowercase().contains(needle))
    }

    /// Ingredients as the comma-separated text used by the edit form
    pub fn ingredients_text(&self) -> String {
        self.ingredients.join(", ")
    }
}

/// The editable part of a recipe
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecipeDraft {
    pub name: String,
    pub ingredients: Vec<String>,
    pub calories: u32,
}

impl RecipeDraft {
    /// Create a draft, trimming the name and dropping blank ingredients
    pub fn new<I, S>(name: impl AsRef<str>, ingredients: I, calories: u32) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self {
            name: name.as_ref().trim().to_string(),
            ingredients: normalize_ingredients(ingredients),
            calories,
        }
    }

    /// Parse raw form fields.
    ///
    /// Ingredients arrive as comma-separated text. The name must be non-blank
    /// and calories must parse as a non-negative integer.
    pub fn from_form(name: &str, ingredients: &str, calories: &str) -> Result<Self> {
        let name = name.trim();
        if name.is_empty() {
            return Err(Error::EmptyName);
        }
        let calories = calories
            .trim()
            .parse::<u32>()
            .map_err(|_| Error::InvalidCalories(calories.to_string()))?;
        Ok(Self::new(name, ingredients.split(','), calories))
    }
}

/// Trim every entry and drop the ones left empty
pub fn normalize_ingredients<I, S>(ingredients: I) -> Vec<String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    ingredients
        .into_iter()
        .map(|ing| ing.as_ref().trim().to_string())
        .filter(|ing| !ing.is_empty())
        .collect()
}
