mod common;

use std::fs;
use std::path::Path;
use std::sync::Arc;

use common::{date, json_storage, line, menu};
use select_foods::{
    core::{FixedCalendar, MenuAddition, MenuCatalog, PlanWindow},
    domain::{MealSlot, MenuType},
    errors::PlannerError,
    storage::{CatalogSeed, MenuRepository, PlanRepository},
};

fn tmp_path_for(path: &Path) -> std::path::PathBuf {
    let mut tmp = path.to_path_buf();
    let ext = match path.extension().and_then(|ext| ext.to_str()) {
        Some(existing) => format!("{}.tmp", existing),
        None => String::from("tmp"),
    };
    tmp.set_extension(ext);
    tmp
}

#[test]
fn fresh_store_writes_seed_catalog() {
    let storage = json_storage(CatalogSeed::default());
    assert!(storage.menus_path().exists());
    assert!(!storage.plan_path().exists());
    assert_eq!(storage.menus().get().len(), 3);
    assert_eq!(storage.menu_types(), MenuType::presets());
}

#[test]
fn plan_survives_reopen() {
    let storage = json_storage(CatalogSeed::empty());
    let calendar = Arc::new(FixedCalendar::on(date(2025, 5, 1)));
    let window = PlanWindow::with_range(
        storage.clone(),
        calendar.clone(),
        date(2025, 5, 1),
        date(2025, 5, 7),
    )
    .unwrap();
    let stew = menu("シチュー", MenuType::Western, vec![line("牛乳", "ml", 400.0)]);
    window.assign(stew.clone(), date(2025, 5, 4), MealSlot::Dinner).unwrap();
    let before = window.plan();
    drop(window);

    let reopened =
        PlanWindow::with_range(storage, calendar, date(2025, 5, 1), date(2025, 5, 7)).unwrap();
    assert_eq!(reopened.plan(), before);
    assert_eq!(
        reopened.plan().day(date(2025, 5, 4)).unwrap().dinner.as_ref(),
        Some(&stew)
    );
}

#[test]
fn added_menus_survive_reopen_with_custom_types_intact() {
    let temp = tempfile::tempdir().unwrap();
    let storage = Arc::new(
        select_foods::storage::json_backend::JsonStorage::open(temp.path(), CatalogSeed::empty())
            .unwrap(),
    );
    let catalog = MenuCatalog::new(storage);
    let added = catalog
        .add_menu(
            "おでん",
            MenuType::Other("japanese".into()),
            vec![line("大根", "本", 0.5)],
        )
        .unwrap();
    let MenuAddition::Added(added) = added else {
        panic!("expected menu to be added");
    };

    let reopened =
        select_foods::storage::json_backend::JsonStorage::open(temp.path(), CatalogSeed::default())
            .unwrap();
    let menus = reopened.menus().get();
    assert_eq!(menus, vec![added]);
    assert_eq!(menus[0].menu_type, MenuType::Other("japanese".into()));
    assert_ne!(menus[0].menu_type, MenuType::Japanese);
}

#[test]
fn failed_plan_write_keeps_file_and_window_unchanged() {
    let storage = json_storage(CatalogSeed::empty());
    let calendar = Arc::new(FixedCalendar::on(date(2025, 5, 1)));
    let window = PlanWindow::with_range(
        storage.clone(),
        calendar,
        date(2025, 5, 1),
        date(2025, 5, 3),
    )
    .unwrap();
    let path = storage.plan_path();
    let original = fs::read_to_string(&path).expect("read plan file");
    let before = window.plan();

    // A directory squatting on the temp name makes File::create fail.
    fs::create_dir_all(tmp_path_for(&path)).unwrap();

    let dish = menu("餃子", MenuType::Chinese, vec![line("皮", "枚", 20.0)]);
    let result = window.assign(dish, date(2025, 5, 2), MealSlot::Lunch);
    assert!(matches!(result, Err(PlannerError::Io(_))));
    assert_eq!(window.plan(), before);
    assert_eq!(fs::read_to_string(&path).unwrap(), original);
}

#[test]
fn failed_catalog_write_keeps_menus_unchanged() {
    let storage = json_storage(CatalogSeed::empty());
    fs::create_dir_all(tmp_path_for(&storage.menus_path())).unwrap();

    let catalog = MenuCatalog::new(storage.clone());
    let result = catalog.add_menu("天ぷら", MenuType::Japanese, vec![line("海老", "尾", 4.0)]);
    assert!(result.is_err());
    assert!(catalog.menus().is_empty());
}

#[test]
fn newer_snapshot_schema_is_refused() {
    let storage = json_storage(CatalogSeed::empty());
    let snapshot = serde_json::json!({
        "schema_version": 99,
        "plan": { "start_date": "2025-01-01", "end_date": "2025-01-01", "days": [] }
    });
    fs::write(storage.plan_path(), snapshot.to_string()).unwrap();

    let result = storage.load_plan(date(2025, 1, 1), date(2025, 1, 1));
    assert!(matches!(result, Err(PlannerError::Storage(_))));
}

#[test]
fn stored_plan_for_other_range_is_reconciled_on_open() {
    let storage = json_storage(CatalogSeed::empty());
    let calendar = Arc::new(FixedCalendar::on(date(2025, 5, 1)));
    let window = PlanWindow::with_range(
        storage.clone(),
        calendar.clone(),
        date(2025, 5, 1),
        date(2025, 5, 3),
    )
    .unwrap();
    let rice = menu("炊き込みご飯", MenuType::Japanese, vec![line("米", "合", 2.0)]);
    window.assign(rice.clone(), date(2025, 5, 3), MealSlot::Lunch).unwrap();
    drop(window);

    let moved =
        PlanWindow::with_range(storage.clone(), calendar, date(2025, 5, 3), date(2025, 5, 5))
            .unwrap();
    let plan = moved.plan();
    assert_eq!(plan.range(), (date(2025, 5, 3), date(2025, 5, 5)));
    assert_eq!(plan.days[0].lunch.as_ref(), Some(&rice));
    assert_eq!(
        storage.load_plan(date(2025, 5, 3), date(2025, 5, 5)).unwrap(),
        plan
    );
}

#[test]
fn catalog_file_without_type_sets_opens_with_defaults() {
    let temp = tempfile::tempdir().unwrap();
    let stored = menu("冷やし中華", MenuType::Chinese, vec![line("麺", "玉", 1.0)]);
    let snapshot = serde_json::json!({
        "schema_version": 1,
        "menus": [stored.clone()],
    });
    fs::write(temp.path().join("menus.json"), snapshot.to_string()).unwrap();

    let storage =
        select_foods::storage::json_backend::JsonStorage::open(temp.path(), CatalogSeed::empty())
            .unwrap();
    assert_eq!(storage.menu_types(), MenuType::presets());
    let names: Vec<_> = storage
        .menu_type_sets()
        .into_iter()
        .map(|set| set.name)
        .collect();
    assert_eq!(names, vec!["和食中心", "時短", "ヘルシー"]);
    assert_eq!(storage.menus().get(), vec![stored]);
}
