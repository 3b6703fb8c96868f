//! Menu catalog: validated additions and type filtering.

use std::sync::Arc;

use uuid::Uuid;

use crate::{
    core::observable::{Observable, Subscription},
    domain::{find_by_id, find_by_name, Menu, MenuIngredient, MenuType, MenuTypeSet},
    errors::PlannerResult,
    storage::MenuRepository,
};

/// Why an `add_menu` call stored nothing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuRejection {
    BlankName,
    NoValidIngredients,
}

/// Outcome of [`MenuCatalog::add_menu`].
#[derive(Debug, Clone, PartialEq)]
pub enum MenuAddition {
    Added(Menu),
    Rejected(MenuRejection),
}

impl MenuAddition {
    pub fn is_added(&self) -> bool {
        matches!(self, MenuAddition::Added(_))
    }
}

/// Facade over a [`MenuRepository`] that validates new menus and filters the
/// stored ones by type.
///
/// Writes are serialized by the repository, so several catalogs may share one.
pub struct MenuCatalog {
    repository: Arc<dyn MenuRepository>,
    menus: Observable<Vec<Menu>>,
    menu_types: Vec<MenuType>,
    menu_type_sets: Vec<MenuTypeSet>,
}

impl MenuCatalog {
    pub fn new(repository: Arc<dyn MenuRepository>) -> Self {
        let menus = repository.menus();
        let menu_types = repository.menu_types();
        let menu_type_sets = repository.menu_type_sets();
        Self {
            repository,
            menus,
            menu_types,
            menu_type_sets,
        }
    }

    /// Snapshot of every stored menu in insertion order.
    pub fn menus(&self) -> Vec<Menu> {
        self.menus.get()
    }

    /// Receives the current menus immediately and again after every change.
    pub fn subscribe<F>(&self, callback: F) -> Subscription
    where
        F: Fn(&Vec<Menu>) + Send + Sync + 'static,
    {
        self.menus.subscribe(callback)
    }

    pub fn menu_types(&self) -> &[MenuType] {
        &self.menu_types
    }

    pub fn menu_type_sets(&self) -> &[MenuTypeSet] {
        &self.menu_type_sets
    }

    pub fn menu(&self, id: Uuid) -> Option<Menu> {
        self.menus.with(|menus| find_by_id(menus, id).cloned())
    }

    /// Type set named `name`, compared after trimming.
    pub fn menu_type_set(&self, name: &str) -> Option<&MenuTypeSet> {
        find_by_name(&self.menu_type_sets, name)
    }

    /// Menus matching every constraint given; `None` constraints always match.
    pub fn menus_matching(
        &self,
        menu_type: Option<&MenuType>,
        type_set: Option<&MenuTypeSet>,
    ) -> Vec<Menu> {
        self.menus.with(|menus| {
            menus
                .iter()
                .filter(|menu| menu_type.map_or(true, |wanted| *wanted == menu.menu_type))
                .filter(|menu| type_set.map_or(true, |set| set.contains(&menu.menu_type)))
                .cloned()
                .collect()
        })
    }

    /// Builds a menu from a trimmed `name` and the valid `ingredients` lines
    /// and stores it when the result is valid.
    ///
    /// A rejected menu leaves the catalog untouched and is not broadcast.
    pub fn add_menu(
        &self,
        name: &str,
        menu_type: MenuType,
        ingredients: Vec<MenuIngredient>,
    ) -> PlannerResult<MenuAddition> {
        let name = name.trim();
        if name.is_empty() {
            tracing::debug!("rejecting menu with blank name");
            return Ok(MenuAddition::Rejected(MenuRejection::BlankName));
        }

        let ingredients: Vec<MenuIngredient> = ingredients
            .into_iter()
            .filter(MenuIngredient::is_valid)
            .collect();
        if ingredients.is_empty() {
            tracing::debug!(menu = name, "rejecting menu without valid ingredients");
            return Ok(MenuAddition::Rejected(MenuRejection::NoValidIngredients));
        }

        let menu = Menu::new(name, menu_type, ingredients);
        self.repository.add(menu.clone())?;
        tracing::info!(menu = %menu.name, menu_type = %menu.menu_type, "menu added");
        Ok(MenuAddition::Added(menu))
    }
}

impl std::fmt::Debug for MenuCatalog {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MenuCatalog")
            .field("menus", &self.menus)
            .field("menu_types", &self.menu_types)
            .field("menu_type_sets", &self.menu_type_sets)
            .finish_non_exhaustive()
    }
}
