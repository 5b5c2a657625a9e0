//! Recipe collection with write-through persistence
//!
//! `RecipeStore` owns the ordered collection (most recent first) and an
//! injected key-value backend. Every mutation serializes the whole collection
//! into one slot. Nothing here renders or prompts; see `view` for that.

use crate::error::{Error, Result};
use crate::id::IdGenerator;
use crate::persistence::KeyValueStore;
use crate::recipe::{Recipe, RecipeDraft};
use crate::settings::Settings;

/// Sample recipes written on first start: (name, ingredients, calories, favorite)
const SAMPLE_RECIPES: [(&str, &[&str], u32, bool); 5] = [
    (
        "Pasta Carbonara",
        &["spaghetti", "eggs", "pancetta", "parmesan", "black pepper"],
        650,
        false,
    ),
    (
        "Greek Salad",
        &["cucumber", "tomato", "red onion", "feta cheese", "olives", "olive oil"],
        320,
        true,
    ),
    (
        "Chicken Curry",
        &["chicken breast", "coconut milk", "curry paste", "onion", "garlic", "ginger"],
        480,
        false,
    ),
    (
        "Avocado Toast",
        &["sourdough bread", "avocado", "cherry tomatoes", "red pepper flakes", "lemon juice"],
        280,
        true,
    ),
    (
        "Chocolate Chip Cookies",
        &["flour", "butter", "sugar", "chocolate chips", "eggs", "vanilla extract"],
        150,
        false,
    ),
];

pub struct RecipeStore<S: KeyValueStore> {
    storage: S,
    key: String,
    recipes: Vec<Recipe>,
    ids: IdGenerator,
}

impl<S: KeyValueStore> RecipeStore<S> {
    /// Empty store over `storage`, writing to slot `key`. Does not load.
    pub fn new(storage: S, key: impl Into<String>) -> Self {
        Self::with_ids(storage, key, IdGenerator::new())
    }

    /// Like `new`, with an explicit id generator
    pub fn with_ids(storage: S, key: impl Into<String>, ids: IdGenerator) -> Self {
        Self {
            storage,
            key: key.into(),
            recipes: Vec::new(),
            ids,
        }
    }

    /// Load the persisted collection, seeding sample recipes if it is empty
    pub fn open(storage: S, settings: &Settings) -> Self {
        Self::open_with_ids(storage, settings, IdGenerator::new())
    }

    pub fn open_with_ids(storage: S, settings: &Settings, ids: IdGenerator) -> Self {
        let mut store = Self::with_ids(storage, settings.storage_key.clone(), ids);
        store.recipes = store.load();
        if store.recipes.is_empty() && settings.seed_when_empty {
            store.recipes = store.seed_defaults();
            log::info!("Seeded {} sample recipes", store.recipes.len());
            store.persist();
        }
        store
    }

    /// Read the persisted collection; an absent slot is an empty collection
    pub fn try_load(&self) -> Result<Vec<Recipe>> {
        match self.storage.get(&self.key)? {
            Some(json) => Ok(serde_json::from_str(&json)?),
            None => Ok(Vec::new()),
        }
    }

    /// Read the persisted collection, treating unreadable data as empty
    pub fn load(&self) -> Vec<Recipe> {
        match self.try_load() {
            Ok(recipes) => {
                log::info!("Loaded {} recipes from '{}'", recipes.len(), self.key);
                recipes
            }
            Err(e) => {
                log::warn!("Ignoring unreadable recipes in '{}': {}", self.key, e);
                Vec::new()
            }
        }
    }

    /// The sample recipes, each with a fresh id. Does not touch the collection.
    pub fn seed_defaults(&mut self) -> Vec<Recipe> {
        let mut seeds: Vec<Recipe> = Vec::with_capacity(SAMPLE_RECIPES.len());
        for (name, ingredients, calories, favorite) in SAMPLE_RECIPES {
            let id = fresh_id(&mut self.ids, &seeds);
            let mut recipe = Recipe::from_draft(id, RecipeDraft::new(name, ingredients, calories));
            recipe.is_favorite = favorite;
            seeds.push(recipe);
        }
        seeds
    }

    /// Create a recipe at the front of the collection
    pub fn add(&mut self, draft: RecipeDraft) -> &Recipe {
        let id = fresh_id(&mut self.ids, &self.recipes);
        log::debug!("Adding recipe {} ({})", id, draft.name);
        self.recipes.insert(0, Recipe::from_draft(id, draft));
        self.persist();
        &self.recipes[0]
    }

    /// Replace name, ingredients and calories of an existing recipe
    pub fn update(&mut self, id: &str, draft: RecipeDraft) -> Result<&Recipe> {
        let index = self.position(id)?;
        log::debug!("Updating recipe {}", id);
        self.recipes[index].apply(draft);
        self.persist();
        Ok(&self.recipes[index])
    }

    /// Delete a recipe; returns whether one was removed
    pub fn remove(&mut self, id: &str) -> bool {
        let before = self.recipes.len();
        self.recipes.retain(|r| r.id != id);
        let removed = self.recipes.len() != before;
        if removed {
            log::debug!("Removed recipe {}", id);
            self.persist();
        } else {
            log::warn!("Nothing to remove for id {}", id);
        }
        removed
    }

    /// Flip the favorite flag
    pub fn toggle_favorite(&mut self, id: &str) -> Result<&Recipe> {
        let index = self.position(id)?;
        let recipe = &mut self.recipes[index];
        recipe.is_favorite = !recipe.is_favorite;
        log::debug!("Recipe {} favorite = {}", id, recipe.is_favorite);
        self.persist();
        Ok(&self.recipes[index])
    }

    /// Recipes whose name or any ingredient contains `term`, ignoring case.
    /// A blank term returns everything.
    pub fn search(&self, term: &str) -> Vec<&Recipe> {
        let needle = term.trim().to_lowercase();
        if needle.is_empty() {
            return self.recipes.iter().collect();
        }
        self.recipes.iter().filter(|r| r.matches(&needle)).collect()
    }

    /// Sum of calories over favorite recipes
    pub fn total_favorite_calories(&self) -> u64 {
        self.recipes
            .iter()
            .filter(|r| r.is_favorite)
            .map(|r| u64::from(r.calories))
            .sum()
    }

    pub fn get(&self, id: &str) -> Option<&Recipe> {
        self.recipes.iter().find(|r| r.id == id)
    }

    /// The collection, most recent first
    pub fn recipes(&self) -> &[Recipe] {
        &self.recipes
    }

    pub fn len(&self) -> usize {
        self.recipes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.recipes.is_empty()
    }

    /// Give the backend back, to reopen it as another instance would
    #[cfg(test)]
    fn into_storage(self) -> S {
        self.storage
    }

    fn position(&self, id: &str) -> Result<usize> {
        self.recipes.iter().position(|r| r.id == id).ok_or_else(|| {
            log::warn!("No recipe with id {}", id);
            Error::not_found(id)
        })
    }

    /// Write the full collection; the in-memory copy stays authoritative on failure
    fn persist(&mut self) {
        let result = serde_json::to_string(&self.recipes)
            .map_err(Error::from)
            .and_then(|json| self.storage.set(&self.key, &json));
        match result {
            Ok(()) => log::debug!("Saved {} recipes to '{}'", self.recipes.len(), self.key),
            Err(e) => log::warn!("Recipes not saved: {}", e),
        }
    }
}

/// Draw ids until one is not already taken
fn fresh_id(ids: &mut IdGenerator, taken: &[Recipe]) -> String {
    loop {
        let id = ids.next_id();
        if taken.iter().all(|r| r.id != id) {
            return id;
        }
        log::warn!("Generated id {} already in use, drawing another", id);
    }
}
