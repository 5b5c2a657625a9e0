//! Presentation state for the recipe list
//!
//! `RecipeView` turns user intents (button presses, form submission, search)
//! into store calls and rebuilds a `ListView` after each one. It knows nothing
//! about the DOM or the terminal; the front-ends only draw what it returns.

use crate::error::{Error, Result};
use crate::persistence::KeyValueStore;
use crate::recipe::{Recipe, RecipeDraft};
use crate::store::RecipeStore;

/// Shown when the visible list is empty
pub const EMPTY_MESSAGE: &str = "No recipes found. Add a new recipe to get started!";

/// Whether the form creates a new recipe or edits an existing one
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormMode {
    Add,
    Edit(String),
}

/// The add/edit form as currently filled in
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormState {
    pub mode: FormMode,
    pub name: String,
    /// Comma-separated
    pub ingredients: String,
    pub calories: String,
}

impl FormState {
    fn blank() -> Self {
        Self {
            mode: FormMode::Add,
            name: String::new(),
            ingredients: String::new(),
            calories: String::new(),
        }
    }

    fn editing(recipe: &Recipe) -> Self {
        Self {
            mode: FormMode::Edit(recipe.id.clone()),
            name: recipe.name.clone(),
            ingredients: recipe.ingredients_text(),
            calories: recipe.calories.to_string(),
        }
    }

    pub fn title(&self) -> &'static str {
        match self.mode {
            FormMode::Add => "Add New Recipe",
            FormMode::Edit(_) => "Edit Recipe",
        }
    }
}

/// Something the user asked for
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Intent {
    OpenAddForm,
    Submit {
        name: String,
        ingredients: String,
        calories: String,
    },
    CancelForm,
    ToggleFavorite(String),
    Edit(String),
    /// Only acted on once the user has confirmed
    Delete { id: String, confirmed: bool },
    Search(String),
}

/// One recipe as drawn in the list
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecipeCard {
    pub id: String,
    pub name: String,
    pub ingredients: Vec<String>,
    pub calories: u32,
    pub is_favorite: bool,
}

impl From<&Recipe> for RecipeCard {
    fn from(recipe: &Recipe) -> Self {
        Self {
            id: recipe.id.clone(),
            name: recipe.name.clone(),
            ingredients: recipe.ingredients.clone(),
            calories: recipe.calories,
            is_favorite: recipe.is_favorite,
        }
    }
}

/// Everything a front-end needs to draw
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListView {
    pub cards: Vec<RecipeCard>,
    pub total_favorite_calories: u64,
    pub form: Option<FormState>,
    /// Bumped whenever the form contents are replaced (opened, prefilled for
    /// editing, or echoed back after a rejected submit). Front-ends with live
    /// inputs copy `form` into them only when this changes.
    pub form_generation: u64,
}

impl ListView {
    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    /// The recipe list as HTML, with all user text escaped
    pub fn list_html(&self) -> String {
        if self.cards.is_empty() {
            return format!(r#"<p class="no-recipes">{EMPTY_MESSAGE}</p>"#);
        }
        self.cards.iter().map(card_html).collect()
    }
}

pub struct RecipeView<S: KeyValueStore> {
    store: RecipeStore<S>,
    search_term: String,
    form: Option<FormState>,
    form_generation: u64,
}

impl<S: KeyValueStore> RecipeView<S> {
    pub fn new(store: RecipeStore<S>) -> Self {
        Self {
            store,
            search_term: String::new(),
            form: None,
            form_generation: 0,
        }
    }

    pub fn store(&self) -> &RecipeStore<S> {
        &self.store
    }

    pub fn form(&self) -> Option<&FormState> {
        self.form.as_ref()
    }

    pub fn search_term(&self) -> &str {
        &self.search_term
    }

    /// Apply an intent.
    ///
    /// Only form validation errors are returned; the form stays open so the
    /// user can correct it. Missing ids are logged and ignored.
    pub fn dispatch(&mut self, intent: Intent) -> Result<()> {
        match intent {
            Intent::OpenAddForm => self.replace_form(FormState::blank()),
            Intent::CancelForm => self.form = None,
            Intent::Submit {
                name,
                ingredients,
                calories,
            } => self.submit(&name, &ingredients, &calories)?,
            Intent::ToggleFavorite(id) => {
                ignore_missing(self.store.toggle_favorite(&id).map(|_| ()))?;
            }
            Intent::Edit(id) => match self.store.get(&id) {
                Some(recipe) => {
                    let form = FormState::editing(recipe);
                    self.replace_form(form);
                }
                None => log::warn!("Cannot edit missing recipe {}", id),
            },
            Intent::Delete { id, confirmed } => {
                if confirmed {
                    self.store.remove(&id);
                    if self.editing_id() == Some(id.as_str()) {
                        self.form = None;
                    }
                } else {
                    log::debug!("Delete of {} cancelled", id);
                }
            }
            Intent::Search(term) => self.search_term = term.trim().to_string(),
        }
        Ok(())
    }

    /// Current list, filtered by the active search term
    pub fn render(&self) -> ListView {
        ListView {
            cards: self
                .store
                .search(&self.search_term)
                .into_iter()
                .map(RecipeCard::from)
                .collect(),
            total_favorite_calories: self.store.total_favorite_calories(),
            form: self.form.clone(),
            form_generation: self.form_generation,
        }
    }

    fn replace_form(&mut self, form: FormState) {
        self.form = Some(form);
        self.form_generation += 1;
    }

    fn editing_id(&self) -> Option<&str> {
        match self.form.as_ref().map(|f| &f.mode) {
            Some(FormMode::Edit(id)) => Some(id),
            _ => None,
        }
    }

    fn submit(&mut self, name: &str, ingredients: &str, calories: &str) -> Result<()> {
        let draft = match RecipeDraft::from_form(name, ingredients, calories) {
            Ok(draft) => draft,
            Err(e) => {
                if let Some(form) = self.form.take() {
                    self.replace_form(FormState {
                        name: name.to_string(),
                        ingredients: ingredients.to_string(),
                        calories: calories.to_string(),
                        ..form
                    });
                }
                return Err(e);
            }
        };

        match self.editing_id().map(str::to_string) {
            Some(id) => ignore_missing(self.store.update(&id, draft).map(|_| ()))?,
            None => {
                self.store.add(draft);
            }
        }
        self.form = None;
        Ok(())
    }
}

fn ignore_missing(result: Result<()>) -> Result<()> {
    match result {
        Err(e) if e.is_not_found() => {
            log::warn!("{}", e);
            Ok(())
        }
        other => other,
    }
}

/// Escape text for HTML element content and attribute values
pub fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

fn card_html(card: &RecipeCard) -> String {
    let id = escape_html(&card.id);
    let favorite = if card.is_favorite { " favorite" } else { "" };
    let active = if card.is_favorite { " active" } else { "" };
    let ingredients: String = card
        .ingredients
        .iter()
        .map(|ing| format!("<li>{}</li>", escape_html(ing)))
        .collect();
    format!(
        r#"<div class="recipe-card{favorite}" data-id="{id}"><div class="recipe-header"><h3 class="recipe-title">{name}</h3><span class="recipe-calories">{calories} cal</span></div><div class="recipe-ingredients"><h4>Ingredients:</h4><ul class="ingredients-list">{ingredients}</ul></div><div class="recipe-actions"><button class="favorite-btn{active}" data-action="favorite" data-id="{id}">&#9733;</button><div><button class="edit-btn" data-action="edit" data-id="{id}">Edit</button><button class="delete-btn" data-action="delete" data-id="{id}">Delete</button></div></div></div>"#,
        name = escape_html(&card.name),
        calories = card.calories,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::id::IdGenerator;
    use crate::persistence::MemoryStorage;
    use crate::settings::Settings;

    fn fixed_clock() -> u64 {
        1_700_000_000_000
    }

    fn view() -> RecipeView<MemoryStorage> {
        let store = RecipeStore::open_with_ids(
            MemoryStorage::new(),
            &Settings::default(),
            IdGenerator::with_clock(3, fixed_clock),
        );
        RecipeView::new(store)
    }

    fn submit(name: &str, ingredients: &str, calories: &str) -> Intent {
        Intent::Submit {
            name: name.to_string(),
            ingredients: ingredients.to_string(),
            calories: calories.to_string(),
        }
    }

    #[test]
    fn test_initial_render() {
        let view = view();
        let list = view.render();
        assert_eq!(list.cards.len(), 5);
        assert_eq!(list.total_favorite_calories, 600);
        assert!(list.form.is_none());
    }

    #[test]
    fn test_add_through_form() {
        let mut view = view();
        view.dispatch(Intent::OpenAddForm).unwrap();
        assert_eq!(view.form().unwrap().title(), "Add New Recipe");

        view.dispatch(submit("Tea", "water, tea leaves, ", "5")).unwrap();
        assert!(view.form().is_none());

        let list = view.render();
        assert_eq!(list.cards.len(), 6);
        assert_eq!(list.cards[0].name, "Tea");
        assert_eq!(list.cards[0].ingredients, vec!["water", "tea leaves"]);
    }

    #[test]
    fn test_invalid_submit_keeps_form_open() {
        let mut view = view();
        view.dispatch(Intent::OpenAddForm).unwrap();
        let err = view.dispatch(submit("Tea", "water", "lots")).unwrap_err();
        assert!(matches!(err, Error::InvalidCalories(_)));

        let form = view.form().unwrap();
        assert_eq!(form.name, "Tea");
        assert_eq!(form.calories, "lots");
        assert_eq!(view.store().len(), 5);
    }

    #[test]
    fn test_unrelated_intents_keep_form_contents() {
        let mut view = view();
        view.dispatch(Intent::OpenAddForm).unwrap();
        let opened = view.render();
        let id = opened.cards[0].id.clone();

        // The user is mid-typing while other intents redraw the list
        view.dispatch(Intent::ToggleFavorite(id.clone())).unwrap();
        view.dispatch(Intent::Search("pasta".into())).unwrap();
        view.dispatch(Intent::Delete { id: "gone".into(), confirmed: true }).unwrap();
        let list = view.render();
        assert_eq!(list.form_generation, opened.form_generation);
        assert_eq!(list.form, opened.form);

        // A rejected submit hands the typed values back as new contents
        view.dispatch(submit("Tea", "water", "lots")).unwrap_err();
        let rejected = view.render();
        assert!(rejected.form_generation > opened.form_generation);
        let form = rejected.form.unwrap();
        assert_eq!(form.mode, FormMode::Add);
        assert_eq!(form.name, "Tea");
        assert_eq!(form.ingredients, "water");

        view.dispatch(Intent::Edit(id)).unwrap();
        assert!(view.render().form_generation > rejected.form_generation);
    }

    #[test]
    fn test_edit_prefills_and_updates_in_place() {
        let mut view = view();
        let id = view.store().recipes()[1].id.clone();

        view.dispatch(Intent::Edit(id.clone())).unwrap();
        let form = view.form().unwrap();
        assert_eq!(form.title(), "Edit Recipe");
        assert_eq!(form.name, "Greek Salad");
        assert_eq!(
            form.ingredients,
            "cucumber, tomato, red onion, feta cheese, olives, olive oil"
        );
        assert_eq!(form.calories, "320");

        view.dispatch(submit("Greek Salad", "cucumber, feta", "300")).unwrap();
        let recipe = &view.store().recipes()[1];
        assert_eq!(recipe.id, id);
        assert_eq!(recipe.calories, 300);
        assert!(recipe.is_favorite);
        assert_eq!(view.render().total_favorite_calories, 580);
    }

    #[test]
    fn test_submit_edit_of_deleted_recipe_is_noop() {
        let mut view = view();
        let id = view.store().recipes()[0].id.clone();
        view.dispatch(Intent::Edit(id.clone())).unwrap();

        // Gone before the form is submitted
        assert!(view.store.remove(&id));

        view.dispatch(submit("Pasta", "pasta", "1")).unwrap();
        assert!(view.form().is_none());
        assert_eq!(view.store().len(), 4);
    }

    #[test]
    fn test_cancel_closes_form() {
        let mut view = view();
        let id = view.store().recipes()[0].id.clone();
        view.dispatch(Intent::Edit(id)).unwrap();
        view.dispatch(Intent::CancelForm).unwrap();
        assert!(view.form().is_none());

        view.dispatch(submit("Soup", "water", "10")).unwrap();
        assert_eq!(view.store().recipes()[0].name, "Soup");
    }

    #[test]
    fn test_delete_requires_confirmation() {
        let mut view = view();
        let id = view.store().recipes()[0].id.clone();

        view.dispatch(Intent::Delete { id: id.clone(), confirmed: false }).unwrap();
        assert_eq!(view.store().len(), 5);

        view.dispatch(Intent::Delete { id: id.clone(), confirmed: true }).unwrap();
        assert_eq!(view.store().len(), 4);
        assert!(view.store().get(&id).is_none());
    }

    #[test]
    fn test_toggle_missing_id_is_ignored() {
        let mut view = view();
        view.dispatch(Intent::ToggleFavorite("gone".into())).unwrap();
        view.dispatch(Intent::Edit("gone".into())).unwrap();
        assert!(view.form().is_none());
        assert_eq!(view.render().total_favorite_calories, 600);
    }

    #[test]
    fn test_search_filters_until_cleared() {
        let mut view = view();
        view.dispatch(Intent::Search("  CHOCOLATE ".into())).unwrap();
        assert_eq!(view.search_term(), "CHOCOLATE");

        let list = view.render();
        assert_eq!(list.cards.len(), 1);
        assert_eq!(list.cards[0].name, "Chocolate Chip Cookies");

        // Filter survives mutations
        let id = list.cards[0].id.clone();
        view.dispatch(Intent::ToggleFavorite(id)).unwrap();
        let list = view.render();
        assert_eq!(list.cards.len(), 1);
        assert_eq!(list.total_favorite_calories, 750);

        view.dispatch(Intent::Search(String::new())).unwrap();
        assert_eq!(view.render().cards.len(), 5);
    }

    #[test]
    fn test_empty_list_html() {
        let mut view = view();
        view.dispatch(Intent::Search("lobster".into())).unwrap();
        let list = view.render();
        assert!(list.is_empty());
        assert!(list.list_html().contains(EMPTY_MESSAGE));
    }

    #[test]
    fn test_card_html_escapes_user_text() {
        let mut view = view();
        view.dispatch(submit("<b>Tea</b>", "water & \"leaves\"", "5")).unwrap();
        view.dispatch(Intent::Search("tea".into())).unwrap();
        let html = view.render().list_html();
        assert!(html.contains("&lt;b&gt;Tea&lt;/b&gt;"));
        assert!(html.contains("<li>water &amp; &quot;leaves&quot;</li>"));
        assert!(!html.contains("<b>"));
    }

    #[test]
    fn test_favorite_card_markup() {
        let view = view();
        let html = view.render().list_html();
        assert_eq!(html.matches(r#"class="recipe-card favorite""#).count(), 2);
        assert_eq!(html.matches(r#"data-action="delete""#).count(), 5);
    }
}
