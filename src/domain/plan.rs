//! Plan windows, their days and meal slots.

use std::fmt;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::common::Identifiable;
use crate::domain::menu::Menu;

/// One of the two meals tracked per day.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum MealSlot {
    Lunch,
    Dinner,
}

impl fmt::Display for MealSlot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            MealSlot::Lunch => "lunch",
            MealSlot::Dinner => "dinner",
        };
        f.write_str(label)
    }
}

/// A calendar day of the plan with its optional lunch and dinner.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PlanDay {
    pub id: Uuid,
    pub date: NaiveDate,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lunch: Option<Menu>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dinner: Option<Menu>,
}

impl PlanDay {
    pub fn new(date: NaiveDate) -> Self {
        Self {
            id: Uuid::new_v4(),
            date,
            lunch: None,
            dinner: None,
        }
    }

    pub fn slot(&self, slot: MealSlot) -> Option<&Menu> {
        match slot {
            MealSlot::Lunch => self.lunch.as_ref(),
            MealSlot::Dinner => self.dinner.as_ref(),
        }
    }

    pub fn set_slot(&mut self, slot: MealSlot, menu: Option<Menu>) {
        match slot {
            MealSlot::Lunch => self.lunch = menu,
            MealSlot::Dinner => self.dinner = menu,
        }
    }

    /// Assigned menus of the day, lunch before dinner.
    pub fn meals(&self) -> impl Iterator<Item = &Menu> {
        self.lunch.iter().chain(self.dinner.iter())
    }

    pub fn has_assignments(&self) -> bool {
        self.lunch.is_some() || self.dinner.is_some()
    }
}

impl Identifiable for PlanDay {
    fn id(&self) -> Uuid {
        self.id
    }
}

/// The plan for an inclusive `[start_date, end_date]` window.
///
/// `days` holds one entry per calendar day of the window in ascending order,
/// and is empty when `start_date > end_date`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Plan {
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    #[serde(default)]
    pub days: Vec<PlanDay>,
}

impl Plan {
    pub fn new(start_date: NaiveDate, end_date: NaiveDate, days: Vec<PlanDay>) -> Self {
        Self {
            start_date,
            end_date,
            days,
        }
    }

    pub fn range(&self) -> (NaiveDate, NaiveDate) {
        (self.start_date, self.end_date)
    }

    pub fn covers(&self, start_date: NaiveDate, end_date: NaiveDate) -> bool {
        self.start_date == start_date && self.end_date == end_date
    }

    pub fn day(&self, date: NaiveDate) -> Option<&PlanDay> {
        self.days.iter().find(|day| day.date == date)
    }

    pub fn assigned_days(&self) -> usize {
        self.days.iter().filter(|day| day.has_assignments()).count()
    }

    /// Checks the one-day-per-date ordering invariant against the range bounds.
    pub fn is_consistent(&self) -> bool {
        if self.start_date > self.end_date {
            return self.days.is_empty();
        }
        let mut expected = Some(self.start_date);
        for day in &self.days {
            if Some(day.date) != expected {
                return false;
            }
            expected = day.date.succ_opt();
        }
        self.days.last().map(|day| day.date) == Some(self.end_date)
    }
}
