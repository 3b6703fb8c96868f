//! Process-local repositories. Every operation succeeds.

use std::sync::Mutex;

use chrono::NaiveDate;

use crate::{
    core::observable::{lock, Observable},
    domain::{Displayable, Menu, MenuType, MenuTypeSet, Plan},
    errors::PlannerResult,
    storage::{type_sets_or_defaults, CatalogSeed, MenuRepository, PlanRepository},
};

/// Keeps the last saved plan in memory.
#[derive(Debug, Default)]
pub struct InMemoryPlanRepository {
    plan: Mutex<Option<Plan>>,
}

impl InMemoryPlanRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_plan(plan: Plan) -> Self {
        Self {
            plan: Mutex::new(Some(plan)),
        }
    }

    /// Last plan handed to [`PlanRepository::save`], if any.
    pub fn stored(&self) -> Option<Plan> {
        lock(&self.plan).clone()
    }
}

impl PlanRepository for InMemoryPlanRepository {
    fn load_plan(&self, start: NaiveDate, end: NaiveDate) -> PlannerResult<Plan> {
        Ok(lock(&self.plan)
            .clone()
            .unwrap_or_else(|| Plan::new(start, end, Vec::new())))
    }

    fn save(&self, plan: &Plan) -> PlannerResult<()> {
        *lock(&self.plan) = Some(plan.clone());
        Ok(())
    }
}

/// Menu catalog held in an [`Observable`].
#[derive(Debug)]
pub struct InMemoryMenuRepository {
    storage: Observable<Vec<Menu>>,
    menu_types: Vec<MenuType>,
    menu_type_sets: Vec<MenuTypeSet>,
    writer: Mutex<()>,
}

impl InMemoryMenuRepository {
    /// An empty `seed.menu_type_sets` falls back to [`MenuTypeSet::defaults`].
    pub fn new(seed: CatalogSeed) -> Self {
        Self {
            storage: Observable::new(seed.valid_menus()),
            menu_types: seed.menu_types,
            menu_type_sets: type_sets_or_defaults(seed.menu_type_sets),
            writer: Mutex::new(()),
        }
    }
}

impl Default for InMemoryMenuRepository {
    fn default() -> Self {
        Self::new(CatalogSeed::default())
    }
}

impl MenuRepository for InMemoryMenuRepository {
    fn menu_types(&self) -> Vec<MenuType> {
        self.menu_types.clone()
    }

    fn menu_type_sets(&self) -> Vec<MenuTypeSet> {
        self.menu_type_sets.clone()
    }

    fn menus(&self) -> Observable<Vec<Menu>> {
        self.storage.clone()
    }

    fn add(&self, menu: Menu) -> PlannerResult<()> {
        if !menu.is_valid() {
            tracing::debug!(menu = %menu.display_label(), "ignoring invalid menu");
            return Ok(());
        }
        let _guard = lock(&self.writer);
        self.storage.modify(|menus| menus.push(menu));
        Ok(())
    }
}
