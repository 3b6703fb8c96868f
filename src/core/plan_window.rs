//! The rolling plan window: range reconciliation, slot assignment and the
//! shopping list for the visible days.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use chrono::{DateTime, NaiveDate, Utc};

use crate::{
    config::Config,
    core::{
        aggregation,
        calendar::Calendar,
        observable::{lock, Observable, Subscription},
    },
    domain::{Displayable, IngredientTotal, MealSlot, Menu, Plan, PlanDay},
    errors::PlannerResult,
    storage::PlanRepository,
};

/// Days in the window opened by [`PlanWindow::new`], today included.
pub const DEFAULT_WINDOW_DAYS: u32 = 7;

/// Outcome of a range update.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WindowChange {
    /// The requested range equals the current one; nothing was rebuilt.
    Unchanged,
    /// The day sequence was rebuilt for the new range.
    Rebuilt {
        days: usize,
        /// Days with assignments that stayed in the window.
        carried: usize,
        /// Days with assignments that left the window and were discarded.
        dropped: usize,
    },
}

/// Outcome of an assign or clear.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SlotChange {
    Applied,
    /// The date lies outside the current window; the plan is unchanged.
    OutsideWindow,
}

/// Owns the current [`Plan`] and serializes every mutation of it.
pub struct PlanWindow {
    plan: Observable<Plan>,
    repository: Arc<dyn PlanRepository>,
    calendar: Arc<dyn Calendar>,
    writer: Mutex<()>,
}

impl PlanWindow {
    /// Opens the default seven-day window starting today.
    pub fn new(
        repository: Arc<dyn PlanRepository>,
        calendar: Arc<dyn Calendar>,
    ) -> PlannerResult<Self> {
        Self::with_window_days(repository, calendar, DEFAULT_WINDOW_DAYS)
    }

    /// Opens a window of `config.window_days` days starting today.
    pub fn from_config(
        repository: Arc<dyn PlanRepository>,
        calendar: Arc<dyn Calendar>,
        config: &Config,
    ) -> PlannerResult<Self> {
        Self::with_window_days(repository, calendar, config.effective_window_days())
    }

    fn with_window_days(
        repository: Arc<dyn PlanRepository>,
        calendar: Arc<dyn Calendar>,
        window_days: u32,
    ) -> PlannerResult<Self> {
        let start = calendar.today();
        let span = i64::from(window_days.max(1)) - 1;
        let end = calendar.add_days(start, span).unwrap_or(start);
        Self::with_range(repository, calendar, start, end)
    }

    /// Opens the window `[start, end]`, reconciling whatever the repository
    /// has stored onto that range.
    pub fn with_range(
        repository: Arc<dyn PlanRepository>,
        calendar: Arc<dyn Calendar>,
        start: NaiveDate,
        end: NaiveDate,
    ) -> PlannerResult<Self> {
        let stored = repository.load_plan(start, end)?;
        let (plan, _) = reconcile(&stored, start, end, calendar.as_ref());
        if plan != stored {
            if stored.covers(start, end) && !stored.days.is_empty() {
                tracing::warn!(%start, %end, "repaired inconsistent stored plan");
            }
            repository.save(&plan)?;
        }
        tracing::debug!(%start, %end, days = plan.days.len(), "plan window opened");
        Ok(Self {
            plan: Observable::new(plan),
            repository,
            calendar,
            writer: Mutex::new(()),
        })
    }

    /// Snapshot of the current plan.
    pub fn plan(&self) -> Plan {
        self.plan.get()
    }

    pub fn range(&self) -> (NaiveDate, NaiveDate) {
        self.plan.with(Plan::range)
    }

    /// Receives the current plan immediately and again after every change.
    pub fn subscribe<F>(&self, callback: F) -> Subscription
    where
        F: Fn(&Plan) + Send + Sync + 'static,
    {
        self.plan.subscribe(callback)
    }

    /// Moves the window to `[start, end]`.
    ///
    /// Days present in both windows keep their assignments; days leaving the
    /// window are discarded and new days start empty. An identical range is a
    /// no-op, and `start > end` yields an empty plan.
    pub fn update(&self, start: NaiveDate, end: NaiveDate) -> PlannerResult<WindowChange> {
        let _guard = lock(&self.writer);
        let current = self.plan.get();
        if current.covers(start, end) {
            tracing::debug!(%start, %end, "plan range unchanged");
            return Ok(WindowChange::Unchanged);
        }

        let (next, change) = reconcile(&current, start, end, self.calendar.as_ref());
        self.repository.save(&next)?;
        self.plan.set(next);
        if let WindowChange::Rebuilt {
            days,
            carried,
            dropped,
        } = change
        {
            tracing::info!(%start, %end, days, carried, dropped, "plan window updated");
        }
        Ok(change)
    }

    /// Like [`update`](Self::update) for instants, which are first reduced
    /// to calendar days by the injected calendar.
    pub fn update_instants(
        &self,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> PlannerResult<WindowChange> {
        let start = self.calendar.day_of(start);
        let end = self.calendar.day_of(end);
        self.update(start, end)
    }

    /// Puts `menu` into `slot` on `date`, replacing any previous menu.
    pub fn assign(&self, menu: Menu, date: NaiveDate, slot: MealSlot) -> PlannerResult<SlotChange> {
        let label = menu.display_label();
        let change = self.set_slot(date, slot, Some(menu))?;
        if change == SlotChange::Applied {
            tracing::debug!(%date, %slot, menu = %label, "menu assigned");
        }
        Ok(change)
    }

    /// Empties `slot` on `date`.
    pub fn clear_menu(&self, date: NaiveDate, slot: MealSlot) -> PlannerResult<SlotChange> {
        let change = self.set_slot(date, slot, None)?;
        if change == SlotChange::Applied {
            tracing::debug!(%date, %slot, "menu cleared");
        }
        Ok(change)
    }

    /// Shopping list for the current window, recomputed on every call.
    pub fn ingredient_totals(&self) -> Vec<IngredientTotal> {
        self.plan.with(aggregation::ingredient_totals)
    }

    fn set_slot(
        &self,
        date: NaiveDate,
        slot: MealSlot,
        menu: Option<Menu>,
    ) -> PlannerResult<SlotChange> {
        let _guard = lock(&self.writer);
        let mut next = self.plan.get();
        let calendar = self.calendar.as_ref();
        let Some(day) = next
            .days
            .iter_mut()
            .find(|day| calendar.is_same_day(day.date, date))
        else {
            tracing::debug!(%date, %slot, "date outside plan window, ignoring");
            return Ok(SlotChange::OutsideWindow);
        };
        day.set_slot(slot, menu);

        self.repository.save(&next)?;
        self.plan.set(next);
        Ok(SlotChange::Applied)
    }
}

impl std::fmt::Debug for PlanWindow {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PlanWindow")
            .field("plan", &self.plan)
            .finish_non_exhaustive()
    }
}

/// Builds the plan for `[start, end]` from `previous`.
///
/// Each day of the new range takes the assignments and id of the previous
/// day with the same date, if there was one.
pub fn reconcile(
    previous: &Plan,
    start: NaiveDate,
    end: NaiveDate,
    calendar: &dyn Calendar,
) -> (Plan, WindowChange) {
    let mut by_date: HashMap<NaiveDate, &PlanDay> =
        previous.days.iter().map(|day| (day.date, day)).collect();

    let mut carried = 0;
    let days: Vec<PlanDay> = calendar
        .days_between(start, end)
        .into_iter()
        .map(|date| match by_date.remove(&date) {
            Some(existing) => {
                if existing.has_assignments() {
                    carried += 1;
                }
                PlanDay {
                    date,
                    ..existing.clone()
                }
            }
            None => PlanDay::new(date),
        })
        .collect();

    let dropped = by_date.values().filter(|day| day.has_assignments()).count();
    let change = WindowChange::Rebuilt {
        days: days.len(),
        carried,
        dropped,
    };
    (Plan::new(start, end, days), change)
}
