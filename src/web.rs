//! Browser front-end
//!
//! Binds `RecipeView` to the page: wires buttons, the form and the search box
//! to intents, and redraws the whole list after each one.

use std::cell::RefCell;
use std::rc::Rc;

use wasm_bindgen::JsCast;
use wasm_bindgen::convert::FromWasmAbi;
use wasm_bindgen::prelude::*;
use web_sys::{Document, Element, Event, HtmlElement, HtmlFormElement, HtmlInputElement, KeyboardEvent, MouseEvent};

use crate::persistence::KeyValueStore;
use crate::platform;
use crate::settings::Settings;
use crate::store::RecipeStore;
use crate::view::{Intent, RecipeView};

struct App {
    view: RecipeView<Box<dyn KeyValueStore>>,
    document: Document,
    confirm_delete: bool,
    /// Form generation last copied into the inputs
    filled_form: u64,
}

impl App {
    /// Apply an intent and redraw
    fn handle(&mut self, intent: Intent) {
        if let Err(e) = self.view.dispatch(intent) {
            log::warn!("{}", e);
        }
        if let Err(e) = self.draw() {
            log::error!("Render failed: {:?}", e);
        }
    }

    fn draw(&mut self) -> Result<(), JsValue> {
        let list = self.view.render();

        element(&self.document, "recipesContainer")?.set_inner_html(&list.list_html());
        element(&self.document, "totalCalories")?
            .set_text_content(Some(&list.total_favorite_calories.to_string()));

        let form_panel: HtmlElement = element(&self.document, "recipeForm")?.dyn_into()?;
        match &list.form {
            Some(form) => {
                // Leave the inputs alone while the user is typing
                if self.filled_form != list.form_generation {
                    element(&self.document, "formTitle")?.set_text_content(Some(form.title()));
                    input(&self.document, "recipeName")?.set_value(&form.name);
                    input(&self.document, "ingredients")?.set_value(&form.ingredients);
                    input(&self.document, "calories")?.set_value(&form.calories);
                    self.filled_form = list.form_generation;
                }
                form_panel.style().set_property("display", "flex")?;
            }
            None => {
                let form_element: HtmlFormElement =
                    element(&self.document, "recipeFormElement")?.dyn_into()?;
                form_element.reset();
                form_panel.style().set_property("display", "none")?;
            }
        }
        Ok(())
    }

    fn search_intent(&self) -> Intent {
        let term = input(&self.document, "searchInput")
            .map(|i| i.value())
            .unwrap_or_default();
        Intent::Search(term)
    }

    fn submit_intent(&self) -> Result<Intent, JsValue> {
        Ok(Intent::Submit {
            name: input(&self.document, "recipeName")?.value(),
            ingredients: input(&self.document, "ingredients")?.value(),
            calories: input(&self.document, "calories")?.value(),
        })
    }

    fn confirmed(&self) -> bool {
        if !self.confirm_delete {
            return true;
        }
        web_sys::window()
            .and_then(|w| {
                w.confirm_with_message("Are you sure you want to delete this recipe?")
                    .ok()
            })
            .unwrap_or(false)
    }
}

fn element(document: &Document, id: &str) -> Result<Element, JsValue> {
    document
        .get_element_by_id(id)
        .ok_or_else(|| JsValue::from_str(&format!("missing element #{id}")))
}

fn input(document: &Document, id: &str) -> Result<HtmlInputElement, JsValue> {
    Ok(element(document, id)?.dyn_into()?)
}

/// Listen for `event` on element `#id`
fn on<E, F>(document: &Document, id: &str, event: &str, handler: F) -> Result<(), JsValue>
where
    E: FromWasmAbi + 'static,
    F: FnMut(E) + 'static,
{
    let closure = Closure::<dyn FnMut(E)>::new(handler);
    element(document, id)?.add_event_listener_with_callback(event, closure.as_ref().unchecked_ref())?;
    closure.forget();
    Ok(())
}

pub fn run() -> Result<(), JsValue> {
    console_error_panic_hook::set_once();
    console_log::init_with_level(log::Level::Info).map_err(|e| JsValue::from_str(&e.to_string()))?;

    let mut storage = platform::default_storage();
    let settings = Settings::load_or_init(&mut storage);
    log::set_max_level(settings.log_level.to_level().to_level_filter());

    log::info!("Recipe box starting...");

    let document = web_sys::window()
        .and_then(|w| w.document())
        .ok_or_else(|| JsValue::from_str("no document"))?;

    let store = RecipeStore::open(storage, &settings);
    let app = Rc::new(RefCell::new(App {
        view: RecipeView::new(store),
        document: document.clone(),
        confirm_delete: settings.confirm_delete,
        filled_form: 0,
    }));

    setup_handlers(&document, app.clone())?;
    app.borrow_mut().draw()?;

    log::info!("Recipe box ready ({} recipes)", app.borrow().view.store().len());
    Ok(())
}

fn setup_handlers(document: &Document, app: Rc<RefCell<App>>) -> Result<(), JsValue> {
    {
        let app = app.clone();
        on(document, "addRecipeBtn", "click", move |_: MouseEvent| {
            app.borrow_mut().handle(Intent::OpenAddForm);
        })?;
    }

    {
        let app = app.clone();
        on(document, "cancelBtn", "click", move |_: MouseEvent| {
            app.borrow_mut().handle(Intent::CancelForm);
        })?;
    }

    {
        let app = app.clone();
        on(document, "recipeFormElement", "submit", move |event: Event| {
            event.prevent_default();
            let mut app = app.borrow_mut();
            match app.submit_intent() {
                Ok(intent) => app.handle(intent),
                Err(e) => log::error!("Cannot read form: {:?}", e),
            }
        })?;
    }

    {
        let app = app.clone();
        on(document, "searchBtn", "click", move |_: MouseEvent| {
            let mut app = app.borrow_mut();
            let intent = app.search_intent();
            app.handle(intent);
        })?;
    }

    {
        let app = app.clone();
        on(document, "searchInput", "keyup", move |event: KeyboardEvent| {
            if event.key() == "Enter" {
                let mut app = app.borrow_mut();
                let intent = app.search_intent();
                app.handle(intent);
            }
        })?;
    }

    // Card buttons are redrawn on every render, so listen on the container
    on(document, "recipesContainer", "click", move |event: MouseEvent| {
        let Some(button) = event
            .target()
            .and_then(|t| t.dyn_into::<Element>().ok())
            .and_then(|el| el.closest("[data-action]").ok().flatten())
        else {
            return;
        };
        let (Some(action), Some(id)) = (button.get_attribute("data-action"), button.get_attribute("data-id")) else {
            return;
        };

        let mut app = app.borrow_mut();
        let intent = match action.as_str() {
            "favorite" => Intent::ToggleFavorite(id),
            "edit" => Intent::Edit(id),
            "delete" => {
                let confirmed = app.confirmed();
                Intent::Delete { id, confirmed }
            }
            other => {
                log::warn!("Unknown card action {}", other);
                return;
            }
        };
        app.handle(intent);
    })?;

    Ok(())
}
