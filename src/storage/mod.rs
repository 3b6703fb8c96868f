//! Persistence contracts for plans and menus plus the bundled backends.

pub mod json_backend;
pub mod memory;

use chrono::NaiveDate;

use crate::{
    config::Config,
    core::observable::Observable,
    domain::{Menu, MenuType, MenuTypeSet, Plan},
    errors::PlannerResult,
};

/// Loads and stores the plan window.
pub trait PlanRepository: Send + Sync {
    /// Returns the stored plan for the requested window.
    ///
    /// Backends may hand back a plan for a different range; the caller
    /// reconciles it onto `[start, end]`.
    fn load_plan(&self, start: NaiveDate, end: NaiveDate) -> PlannerResult<Plan>;
    fn save(&self, plan: &Plan) -> PlannerResult<()>;
}

/// Owns the menu catalog and its fixed reference lists.
pub trait MenuRepository: Send + Sync {
    fn menu_types(&self) -> Vec<MenuType>;
    fn menu_type_sets(&self) -> Vec<MenuTypeSet>;
    /// Current and future snapshots of the stored menus, in insertion order.
    fn menus(&self) -> Observable<Vec<Menu>>;
    /// Appends `menu`. Invalid menus are ignored without error.
    ///
    /// Concurrent calls are serialized; each append is broadcast through
    /// [`menus`](Self::menus) before the next one starts.
    fn add(&self, menu: Menu) -> PlannerResult<()>;
}

/// Initial contents for a menu repository.
#[derive(Debug, Clone)]
pub struct CatalogSeed {
    pub menus: Vec<Menu>,
    pub menu_types: Vec<MenuType>,
    pub menu_type_sets: Vec<MenuTypeSet>,
}

impl CatalogSeed {
    /// No menus, the built-in types and the default type sets.
    pub fn empty() -> Self {
        Self {
            menus: Vec::new(),
            ..Self::default()
        }
    }

    pub fn from_config(config: &Config) -> Self {
        if config.seed_sample_menus {
            Self::default()
        } else {
            Self::empty()
        }
    }

    pub fn with_menus(mut self, menus: Vec<Menu>) -> Self {
        self.menus = menus;
        self
    }

    /// Replaces the type sets; an empty list keeps the defaults.
    pub fn with_type_sets(mut self, menu_type_sets: Vec<MenuTypeSet>) -> Self {
        if !menu_type_sets.is_empty() {
            self.menu_type_sets = menu_type_sets;
        }
        self
    }

    /// Drops invalid seed menus, logging each one.
    pub(crate) fn valid_menus(&self) -> Vec<Menu> {
        self.menus
            .iter()
            .filter(|menu| {
                let valid = menu.is_valid();
                if !valid {
                    tracing::warn!(menu = %menu.name, "skipping invalid seed menu");
                }
                valid
            })
            .cloned()
            .collect()
    }
}

impl Default for CatalogSeed {
    fn default() -> Self {
        Self {
            menus: Menu::sample_menus(),
            menu_types: MenuType::presets(),
            menu_type_sets: MenuTypeSet::defaults(),
        }
    }
}

/// Type sets a repository offers: `menu_type_sets`, or the defaults when empty.
pub(crate) fn type_sets_or_defaults(menu_type_sets: Vec<MenuTypeSet>) -> Vec<MenuTypeSet> {
    if menu_type_sets.is_empty() {
        MenuTypeSet::defaults()
    } else {
        menu_type_sets
    }
}
