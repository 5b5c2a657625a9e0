//! Recipe Box entry point
//!
//! Handles platform-specific initialization and starts the front-end.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn wasm_main() -> Result<(), JsValue> {
    recipe_box::web::run()
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    use recipe_box::terminal::Terminal;
    use recipe_box::{RecipeStore, RecipeView, Settings, platform};

    // Info until settings are read; RUST_LOG always wins
    let env_filter = std::env::var_os(env_logger::DEFAULT_FILTER_ENV).is_some();
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("trace")).init();
    if !env_filter {
        log::set_max_level(log::LevelFilter::Info);
    }

    let mut storage = platform::default_storage();
    let settings = Settings::load_or_init(&mut storage);
    if !env_filter {
        log::set_max_level(settings.log_level.to_level().to_level_filter());
    }
    log::info!("Recipe Box (native) starting...");

    let store = RecipeStore::open(storage, &settings);
    let stdin = std::io::stdin();
    let mut terminal = Terminal::new(
        RecipeView::new(store),
        stdin.lock(),
        std::io::stdout(),
        settings.confirm_delete,
    );
    if let Err(e) = terminal.run() {
        log::error!("{}", e);
        std::process::exit(1);
    }
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}
