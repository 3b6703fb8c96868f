//! Menus, menu types and the named type groupings used for filtering.

use std::fmt;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::common::*;
use crate::domain::ingredient::{Ingredient, MenuIngredient};

/// Cuisine classification of a menu.
///
/// `Other` carries a free-form label and never compares equal to a built-in
/// variant, even when the label spells the same word.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "MenuTypeRepr", into = "MenuTypeRepr")]
pub enum MenuType {
    Japanese,
    Western,
    Chinese,
    Italian,
    Other(String),
}

impl MenuType {
    /// Built-in menu types in declaration order.
    pub fn presets() -> Vec<MenuType> {
        vec![
            MenuType::Japanese,
            MenuType::Western,
            MenuType::Chinese,
            MenuType::Italian,
        ]
    }

    pub fn display_name(&self) -> &str {
        match self {
            MenuType::Japanese => "和食",
            MenuType::Western => "洋食",
            MenuType::Chinese => "中華",
            MenuType::Italian => "イタリアン",
            MenuType::Other(label) => label,
        }
    }

    fn base(&self) -> &'static str {
        match self {
            MenuType::Japanese => "japanese",
            MenuType::Western => "western",
            MenuType::Chinese => "chinese",
            MenuType::Italian => "italian",
            MenuType::Other(_) => "other",
        }
    }
}

impl fmt::Display for MenuType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

/// Tagged wire form: `{"base": "japanese"}` or `{"base": "other", "associated": "..."}`.
#[derive(Serialize, Deserialize)]
struct MenuTypeRepr {
    base: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    associated: Option<String>,
}

impl TryFrom<MenuTypeRepr> for MenuType {
    type Error = String;

    fn try_from(repr: MenuTypeRepr) -> Result<Self, Self::Error> {
        let menu_type = match repr.base.as_str() {
            "japanese" => MenuType::Japanese,
            "western" => MenuType::Western,
            "chinese" => MenuType::Chinese,
            "italian" => MenuType::Italian,
            "other" => MenuType::Other(
                repr.associated
                    .ok_or_else(|| "menu type `other` requires an associated label".to_string())?,
            ),
            _ => MenuType::Other(repr.base),
        };
        Ok(menu_type)
    }
}

impl From<MenuType> for MenuTypeRepr {
    fn from(menu_type: MenuType) -> Self {
        let base = menu_type.base().to_string();
        let associated = match menu_type {
            MenuType::Other(label) => Some(label),
            _ => None,
        };
        Self { base, associated }
    }
}

/// Named, unordered grouping of menu types.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct MenuTypeSet {
    pub id: Uuid,
    pub name: String,
    pub included_types: Vec<MenuType>,
}

impl MenuTypeSet {
    pub fn new(name: impl Into<String>, included_types: Vec<MenuType>) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            included_types,
        }
    }

    pub fn contains(&self, menu_type: &MenuType) -> bool {
        self.included_types.contains(menu_type)
    }

    /// Groupings offered when a repository is created without its own list.
    pub fn defaults() -> Vec<MenuTypeSet> {
        vec![
            MenuTypeSet::new("和食中心", vec![MenuType::Japanese]),
            MenuTypeSet::new("時短", vec![MenuType::Western, MenuType::Italian]),
            MenuTypeSet::new("ヘルシー", vec![MenuType::Japanese, MenuType::Western]),
        ]
    }
}

impl Identifiable for MenuTypeSet {
    fn id(&self) -> Uuid {
        self.id
    }
}

impl NamedEntity for MenuTypeSet {
    fn name(&self) -> &str {
        &self.name
    }
}

/// A dish that can be assigned to a meal slot.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Menu {
    pub id: Uuid,
    pub name: String,
    pub menu_type: MenuType,
    #[serde(default)]
    pub ingredients: Vec<MenuIngredient>,
}

impl Menu {
    pub fn new(
        name: impl Into<String>,
        menu_type: MenuType,
        ingredients: Vec<MenuIngredient>,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            menu_type,
            ingredients,
        }
    }

    /// A menu is valid with a non-blank name and at least one line, all of them valid.
    pub fn is_valid(&self) -> bool {
        !self.name.trim().is_empty()
            && !self.ingredients.is_empty()
            && self.ingredients.iter().all(MenuIngredient::is_valid)
    }

    /// Seed catalog used by fresh repositories.
    pub fn sample_menus() -> Vec<Menu> {
        vec![
            Menu::new(
                "照り焼きチキン",
                MenuType::Japanese,
                vec![
                    MenuIngredient::new(Ingredient::new("鶏もも肉", "g"), 400.0),
                    MenuIngredient::new(Ingredient::new("醤油", "ml"), 30.0),
                    MenuIngredient::new(Ingredient::new("みりん", "ml"), 30.0),
                ],
            ),
            Menu::new(
                "パスタ",
                MenuType::Italian,
                vec![
                    MenuIngredient::new(Ingredient::new("パスタ", "g"), 200.0),
                    MenuIngredient::new(Ingredient::new("オリーブオイル", "ml"), 20.0),
                ],
            ),
            Menu::new(
                "サラダ",
                MenuType::Western,
                vec![
                    MenuIngredient::new(Ingredient::new("レタス", "g"), 150.0),
                    MenuIngredient::new(Ingredient::new("ドレッシング", "ml"), 30.0),
                ],
            ),
        ]
    }
}

impl Identifiable for Menu {
    fn id(&self) -> Uuid {
        self.id
    }
}

impl NamedEntity for Menu {
    fn name(&self) -> &str {
        &self.name
    }
}

impl Displayable for Menu {
    fn display_label(&self) -> String {
        format!("{} ({})", self.name, self.menu_type)
    }
}
