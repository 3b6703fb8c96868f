#![allow(dead_code)]

use std::sync::{Arc, Mutex};

use chrono::NaiveDate;
use once_cell::sync::Lazy;
use select_foods::{
    core::{FixedCalendar, MenuCatalog, PlanWindow},
    domain::{Ingredient, Menu, MenuIngredient, MenuType},
    storage::{
        json_backend::JsonStorage,
        memory::{InMemoryMenuRepository, InMemoryPlanRepository},
        CatalogSeed,
    },
};
use tempfile::TempDir;

/// Holds TempDir guards so temporary folders live for the duration of the test run.
static TEST_DIRS: Lazy<Mutex<Vec<TempDir>>> = Lazy::new(|| Mutex::new(Vec::new()));

pub fn date(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).expect("valid date")
}

pub fn line(name: &str, unit: &str, quantity: f64) -> MenuIngredient {
    MenuIngredient::new(Ingredient::new(name, unit), quantity)
}

pub fn menu(name: &str, menu_type: MenuType, lines: Vec<MenuIngredient>) -> Menu {
    Menu::new(name, menu_type, lines)
}

/// In-memory plan window over `[start, end]` with a calendar pinned to `start`.
pub fn window(start: NaiveDate, end: NaiveDate) -> (PlanWindow, Arc<InMemoryPlanRepository>) {
    let repo = Arc::new(InMemoryPlanRepository::new());
    let calendar = Arc::new(FixedCalendar::on(start));
    let window =
        PlanWindow::with_range(repo.clone(), calendar, start, end).expect("open plan window");
    (window, repo)
}

/// Catalog over an in-memory repository seeded with `menus` only.
pub fn catalog_with(menus: Vec<Menu>) -> MenuCatalog {
    let seed = CatalogSeed::empty().with_menus(menus);
    MenuCatalog::new(Arc::new(InMemoryMenuRepository::new(seed)))
}

/// Opens a JSON store in a fresh temporary directory.
pub fn json_storage(seed: CatalogSeed) -> Arc<JsonStorage> {
    let temp = TempDir::new().expect("create temp dir");
    let base = temp.path().to_path_buf();
    TEST_DIRS.lock().expect("lock temp dir registry").push(temp);
    Arc::new(JsonStorage::open(base, seed).expect("open json storage"))
}
