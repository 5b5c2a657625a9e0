//! Line-oriented front-end for the native build
//!
//! Reads commands from any `BufRead`, draws the list to any `Write`.

use std::io::{BufRead, Write};

use crate::error::Result;
use crate::persistence::KeyValueStore;
use crate::view::{EMPTY_MESSAGE, FormState, Intent, ListView, RecipeView};

const HELP: &str = "\
Commands:
  list             show recipes (filtered by the current search)
  add              add a recipe
  edit <id>        edit a recipe
  delete <id>      delete a recipe
  fav <id>         toggle favorite
  search [text]    filter by name or ingredient; no text clears the filter
  help             show this help
  quit             exit
Type `cancel` at any form prompt to abandon the form.";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    List,
    Add,
    Edit(String),
    Delete(String),
    Favorite(String),
    Search(String),
    Help,
    Quit,
}

impl Command {
    /// Parse one input line; `None` for blank or unknown input
    pub fn parse(line: &str) -> Option<Self> {
        let line = line.trim();
        let (word, rest) = match line.split_once(char::is_whitespace) {
            Some((word, rest)) => (word, rest.trim()),
            None => (line, ""),
        };
        let id = || (!rest.is_empty()).then(|| rest.to_string());
        match word.to_lowercase().as_str() {
            "list" | "ls" => Some(Command::List),
            "add" | "new" => Some(Command::Add),
            "edit" => id().map(Command::Edit),
            "delete" | "rm" => id().map(Command::Delete),
            "fav" | "favorite" => id().map(Command::Favorite),
            "search" | "find" => Some(Command::Search(rest.to_string())),
            "help" | "?" => Some(Command::Help),
            "quit" | "exit" | "q" => Some(Command::Quit),
            _ => None,
        }
    }
}

pub struct Terminal<S: KeyValueStore, R, W> {
    view: RecipeView<S>,
    input: R,
    output: W,
    confirm_delete: bool,
}

impl<S: KeyValueStore, R: BufRead, W: Write> Terminal<S, R, W> {
    pub fn new(view: RecipeView<S>, input: R, output: W, confirm_delete: bool) -> Self {
        Self {
            view,
            input,
            output,
            confirm_delete,
        }
    }

    pub fn view(&self) -> &RecipeView<S> {
        &self.view
    }

    /// Run until `quit` or end of input
    pub fn run(&mut self) -> Result<()> {
        self.draw()?;
        while let Some(line) = self.prompt("> ")? {
            let Some(command) = Command::parse(&line) else {
                if !line.trim().is_empty() {
                    writeln!(self.output, "Unknown command. Type `help` for a list.")?;
                }
                continue;
            };
            match command {
                Command::Quit => break,
                Command::Help => writeln!(self.output, "{HELP}")?,
                Command::List => self.draw()?,
                command => {
                    self.execute(command)?;
                    self.draw()?;
                }
            }
        }
        Ok(())
    }

    fn execute(&mut self, command: Command) -> Result<()> {
        match command {
            Command::Add => {
                self.view.dispatch(Intent::OpenAddForm)?;
                self.fill_form()?;
            }
            Command::Edit(id) => {
                self.view.dispatch(Intent::Edit(id.clone()))?;
                if self.view.form().is_none() {
                    writeln!(self.output, "No recipe with id {id}")?;
                    return Ok(());
                }
                self.fill_form()?;
            }
            Command::Delete(id) => {
                if self.view.store().get(&id).is_none() {
                    writeln!(self.output, "No recipe with id {id}")?;
                    return Ok(());
                }
                let confirmed = !self.confirm_delete || self.confirm()?;
                self.view.dispatch(Intent::Delete { id, confirmed })?;
            }
            Command::Favorite(id) => {
                if self.view.store().get(&id).is_none() {
                    writeln!(self.output, "No recipe with id {id}")?;
                }
                self.view.dispatch(Intent::ToggleFavorite(id))?;
            }
            Command::Search(term) => self.view.dispatch(Intent::Search(term))?,
            Command::List | Command::Help | Command::Quit => {}
        }
        Ok(())
    }

    /// Prompt for each field until the submit is accepted or cancelled
    fn fill_form(&mut self) -> Result<()> {
        while let Some(form) = self.view.form().cloned() {
            writeln!(self.output, "{}", form.title())?;
            let Some(fields) = self.read_fields(&form)? else {
                self.view.dispatch(Intent::CancelForm)?;
                writeln!(self.output, "Cancelled.")?;
                return Ok(());
            };
            let (name, ingredients, calories) = fields;
            if let Err(e) = self.view.dispatch(Intent::Submit {
                name,
                ingredients,
                calories,
            }) {
                writeln!(self.output, "{e}")?;
            }
        }
        Ok(())
    }

    /// Read name, ingredients and calories; a blank answer keeps the shown value.
    /// `None` when the user cancels or input ends.
    fn read_fields(&mut self, form: &FormState) -> Result<Option<(String, String, String)>> {
        let mut fields = Vec::with_capacity(3);
        for (label, current) in [
            ("Name", &form.name),
            ("Ingredients (comma-separated)", &form.ingredients),
            ("Calories", &form.calories),
        ] {
            let prompt = if current.is_empty() {
                format!("{label}: ")
            } else {
                format!("{label} [{current}]: ")
            };
            let Some(answer) = self.prompt(&prompt)? else {
                return Ok(None);
            };
            let answer = answer.trim();
            if answer.eq_ignore_ascii_case("cancel") {
                return Ok(None);
            }
            fields.push(if answer.is_empty() {
                current.clone()
            } else {
                answer.to_string()
            });
        }
        let calories = fields.pop().unwrap_or_default();
        let ingredients = fields.pop().unwrap_or_default();
        let name = fields.pop().unwrap_or_default();
        Ok(Some((name, ingredients, calories)))
    }

    fn confirm(&mut self) -> Result<bool> {
        let answer = self.prompt("Are you sure you want to delete this recipe? [y/N] ")?;
        Ok(matches!(
            answer.as_deref().map(str::trim),
            Some("y" | "Y" | "yes" | "Yes")
        ))
    }

    /// Print `text` and read one line; `None` at end of input
    fn prompt(&mut self, text: &str) -> Result<Option<String>> {
        write!(self.output, "{text}")?;
        self.output.flush()?;
        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        Ok(Some(line.trim_end_matches(['\r', '\n']).to_string()))
    }

    fn draw(&mut self) -> Result<()> {
        let list = self.view.render();
        write_list(&mut self.output, &list, self.view.search_term())?;
        Ok(())
    }
}

/// Draw the list and the favorite-calorie summary
pub fn write_list(out: &mut impl Write, list: &ListView, search_term: &str) -> std::io::Result<()> {
    if !search_term.is_empty() {
        writeln!(out, "Search: {search_term}")?;
    }
    if list.is_empty() {
        writeln!(out, "{EMPTY_MESSAGE}")?;
    }
    for card in &list.cards {
        let star = if card.is_favorite { "*" } else { " " };
        writeln!(out, "{star} [{}] {} ({} cal)", card.id, card.name, card.calories)?;
        writeln!(out, "      {}", card.ingredients.join(", "))?;
    }
    writeln!(out, "Total calories (favorites): {}", list.total_favorite_calories)
}
