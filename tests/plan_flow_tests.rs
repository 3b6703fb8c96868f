mod common;

use std::sync::Arc;

use common::{date, line};
use select_foods::{
    config::Config,
    core::{FixedCalendar, MenuAddition, MenuCatalog, PlanWindow, SlotChange},
    domain::{MealSlot, MenuType, MenuTypeSet},
    storage::{
        memory::{InMemoryMenuRepository, InMemoryPlanRepository},
        CatalogSeed,
    },
};

#[test]
fn weekly_planning_walkthrough() {
    let today = date(2025, 4, 7);
    let calendar = Arc::new(FixedCalendar::on(today));
    let config = Config::default();

    let catalog = MenuCatalog::new(Arc::new(InMemoryMenuRepository::new(
        CatalogSeed::from_config(&config),
    )));
    let window = PlanWindow::from_config(
        Arc::new(InMemoryPlanRepository::new()),
        calendar,
        &config,
    )
    .unwrap();
    assert_eq!(window.range(), (today, date(2025, 4, 13)));

    let quick = catalog
        .add_menu(
            "15分カルボナーラ",
            MenuType::Italian,
            vec![
                line("パスタ", "g", 200.0),
                line("卵", "個", 2.0),
                line("ベーコン", "g", 80.0),
            ],
        )
        .unwrap();
    let MenuAddition::Added(quick) = quick else {
        panic!("expected menu to be added");
    };

    let jitan = catalog.menu_type_set("時短").expect("default type set");
    let candidates = catalog.menus_matching(Some(&MenuType::Italian), Some(jitan));
    let names: Vec<_> = candidates.iter().map(|menu| menu.name.as_str()).collect();
    assert_eq!(names, vec!["パスタ", "15分カルボナーラ"]);

    let pasta = candidates[0].clone();
    assert_eq!(
        window.assign(pasta, today, MealSlot::Lunch).unwrap(),
        SlotChange::Applied
    );
    assert_eq!(
        window
            .assign(quick, date(2025, 4, 8), MealSlot::Dinner)
            .unwrap(),
        SlotChange::Applied
    );

    let totals: Vec<String> = window
        .ingredient_totals()
        .iter()
        .map(ToString::to_string)
        .collect();
    assert_eq!(
        totals,
        vec![
            "オリーブオイル 20.0 ml",
            "パスタ 400.0 g",
            "ベーコン 80.0 g",
            "卵 2.0 個",
        ]
    );
    assert_eq!(window.plan().assigned_days(), 2);
}

#[test]
fn custom_type_sets_replace_defaults() {
    let sets = vec![MenuTypeSet::new("中華の日", vec![MenuType::Chinese])];
    let seed = CatalogSeed::default().with_type_sets(sets.clone());
    let catalog = MenuCatalog::new(Arc::new(InMemoryMenuRepository::new(seed)));
    assert_eq!(catalog.menu_type_sets(), sets.as_slice());
    assert!(catalog
        .menus_matching(None, Some(&sets[0]))
        .is_empty());
}

#[test]
fn sample_seed_can_be_disabled() {
    let config = Config {
        seed_sample_menus: false,
        ..Config::default()
    };
    let catalog = MenuCatalog::new(Arc::new(InMemoryMenuRepository::new(
        CatalogSeed::from_config(&config),
    )));
    assert!(catalog.menus().is_empty());
    assert_eq!(catalog.menu_types(), MenuType::presets().as_slice());
}
