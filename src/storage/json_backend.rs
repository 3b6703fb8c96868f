//! Filesystem-backed JSON snapshots of the plan and the menu catalog.

use std::{
    fs::{self, File},
    io::Write,
    path::{Path, PathBuf},
    sync::Mutex,
};

use chrono::NaiveDate;
use serde::{de::DeserializeOwned, Deserialize, Serialize};

use crate::{
    core::observable::{lock, Observable},
    domain::{Displayable, Menu, MenuType, MenuTypeSet, Plan},
    errors::{PlannerError, PlannerResult},
    storage::{type_sets_or_defaults, CatalogSeed, MenuRepository, PlanRepository},
};

pub const CURRENT_SCHEMA_VERSION: u8 = 1;
const PLAN_FILE: &str = "plan.json";
const MENUS_FILE: &str = "menus.json";
const TMP_SUFFIX: &str = "tmp";

#[derive(Debug, Serialize, Deserialize)]
struct PlanFile {
    #[serde(default = "schema_version_default")]
    schema_version: u8,
    plan: Plan,
}

#[derive(Debug, Serialize, Deserialize)]
struct CatalogFile {
    #[serde(default = "schema_version_default")]
    schema_version: u8,
    #[serde(default = "MenuType::presets")]
    menu_types: Vec<MenuType>,
    #[serde(default)]
    menu_type_sets: Vec<MenuTypeSet>,
    #[serde(default)]
    menus: Vec<Menu>,
}

fn schema_version_default() -> u8 {
    CURRENT_SCHEMA_VERSION
}

/// Stores `plan.json` and `menus.json` inside one directory.
///
/// Writes go to a `.tmp` sibling first and are renamed into place, so a
/// failed write leaves the previous snapshot intact.
#[derive(Debug)]
pub struct JsonStorage {
    dir: PathBuf,
    menus: Observable<Vec<Menu>>,
    menu_types: Vec<MenuType>,
    menu_type_sets: Vec<MenuTypeSet>,
    writer: Mutex<()>,
}

impl JsonStorage {
    /// Opens the store in `dir`, creating the catalog from `seed` when no
    /// `menus.json` exists yet. A catalog without type sets gets the defaults.
    pub fn open(dir: impl Into<PathBuf>, seed: CatalogSeed) -> PlannerResult<Self> {
        let dir = dir.into();
        fs::create_dir_all(&dir)?;
        let menus_path = dir.join(MENUS_FILE);

        let catalog = if menus_path.exists() {
            let catalog: CatalogFile = read_json(&menus_path)?;
            ensure_schema_support(catalog.schema_version)?;
            catalog
        } else {
            let catalog = CatalogFile {
                schema_version: CURRENT_SCHEMA_VERSION,
                menus: seed.valid_menus(),
                menu_types: seed.menu_types,
                menu_type_sets: seed.menu_type_sets,
            };
            write_json(&menus_path, &catalog)?;
            tracing::info!(path = %menus_path.display(), "created menu catalog");
            catalog
        };

        let menus: Vec<Menu> = catalog
            .menus
            .into_iter()
            .filter(|menu| {
                let valid = menu.is_valid();
                if !valid {
                    tracing::warn!(menu = %menu.display_label(), "dropping invalid stored menu");
                }
                valid
            })
            .collect();

        Ok(Self {
            dir,
            menus: Observable::new(menus),
            menu_types: catalog.menu_types,
            menu_type_sets: type_sets_or_defaults(catalog.menu_type_sets),
            writer: Mutex::new(()),
        })
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn plan_path(&self) -> PathBuf {
        self.dir.join(PLAN_FILE)
    }

    pub fn menus_path(&self) -> PathBuf {
        self.dir.join(MENUS_FILE)
    }

    fn write_catalog(&self, menus: &[Menu]) -> PlannerResult<()> {
        let catalog = CatalogFile {
            schema_version: CURRENT_SCHEMA_VERSION,
            menu_types: self.menu_types.clone(),
            menu_type_sets: self.menu_type_sets.clone(),
            menus: menus.to_vec(),
        };
        write_json(&self.menus_path(), &catalog)
    }
}

impl PlanRepository for JsonStorage {
    fn load_plan(&self, start: NaiveDate, end: NaiveDate) -> PlannerResult<Plan> {
        let path = self.plan_path();
        if !path.exists() {
            return Ok(Plan::new(start, end, Vec::new()));
        }
        let file: PlanFile = read_json(&path)?;
        ensure_schema_support(file.schema_version)?;
        Ok(file.plan)
    }

    fn save(&self, plan: &Plan) -> PlannerResult<()> {
        let _guard = lock(&self.writer);
        let file = PlanFile {
            schema_version: CURRENT_SCHEMA_VERSION,
            plan: plan.clone(),
        };
        write_json(&self.plan_path(), &file)
    }
}

impl MenuRepository for JsonStorage {
    fn menu_types(&self) -> Vec<MenuType> {
        self.menu_types.clone()
    }

    fn menu_type_sets(&self) -> Vec<MenuTypeSet> {
        self.menu_type_sets.clone()
    }

    fn menus(&self) -> Observable<Vec<Menu>> {
        self.menus.clone()
    }

    fn add(&self, menu: Menu) -> PlannerResult<()> {
        if !menu.is_valid() {
            tracing::debug!(menu = %menu.display_label(), "ignoring invalid menu");
            return Ok(());
        }
        let _guard = lock(&self.writer);
        let mut next = self.menus.get();
        next.push(menu);
        self.write_catalog(&next)?;
        self.menus.set(next);
        Ok(())
    }
}

fn ensure_schema_support(schema_version: u8) -> PlannerResult<()> {
    if schema_version > CURRENT_SCHEMA_VERSION {
        return Err(PlannerError::Storage(format!(
            "snapshot schema v{} is newer than supported v{}",
            schema_version, CURRENT_SCHEMA_VERSION
        )));
    }
    Ok(())
}

fn read_json<T: DeserializeOwned>(path: &Path) -> PlannerResult<T> {
    let data = fs::read_to_string(path)?;
    Ok(serde_json::from_str(&data)?)
}

fn write_json<T: Serialize>(path: &Path, value: &T) -> PlannerResult<()> {
    let json = serde_json::to_string_pretty(value)?;
    let tmp = tmp_path(path);
    write_atomic(&tmp, &json)?;
    fs::rename(&tmp, path)?;
    Ok(())
}

fn tmp_path(path: &Path) -> PathBuf {
    let mut tmp = path.to_path_buf();
    let ext = match path.extension().and_then(|ext| ext.to_str()) {
        Some(existing) => format!("{}.{}", existing, TMP_SUFFIX),
        None => TMP_SUFFIX.to_string(),
    };
    tmp.set_extension(ext);
    tmp
}

fn write_atomic(path: &Path, data: &str) -> PlannerResult<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let mut file = File::create(path)?;
    file.write_all(data.as_bytes())?;
    file.flush()?;
    Ok(())
}
