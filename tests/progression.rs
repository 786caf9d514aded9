use platform_blaster::persistence::{ShopError, ShopItem};
use platform_blaster::sim::{GamePhase, GameState, LevelData, LevelError, TickInput, tick};
use platform_blaster::{Error, Loadout, SaveData, Tuning};

const PIT: &str = r#"{
    "id": 2,
    "name": "Pit",
    "platforms": [{ "x": 400, "y": 550, "w": 200, "h": 40 }],
    "coins": [[115, 430]],
    "gate": { "x": 1500, "kind": "next_level" }
}"#;

// ── loading ───────────────────────────────────────────────────────────────────

#[test]
fn builtin_levels_load_and_chain() {
    let ids: Vec<u32> = LevelData::builtin_ids().collect();
    assert_eq!(ids, vec![1, 2, 3]);
    for id in ids {
        let level = LevelData::builtin(id).unwrap();
        assert_eq!(level.id, id);
        assert!(level.boss.is_some());
        GameState::new(&level, &Loadout::default(), Tuning::default(), 1).unwrap();
    }
    assert_eq!(LevelData::builtin(1).unwrap().next_level_id(), Some(2));
    assert_eq!(LevelData::builtin(3).unwrap().next_level_id(), None);
}

#[test]
fn bad_level_data_is_rejected() {
    assert!(matches!(LevelData::builtin(0), Err(LevelError::UnknownLevel(0))));
    assert!(matches!(LevelData::builtin(4), Err(LevelError::UnknownLevel(4))));
    assert!(matches!(LevelData::from_json("{ not json"), Err(LevelError::Parse(_))));

    let no_boss = r#"{
        "id": 1, "name": "x",
        "platforms": [{ "x": 0, "y": 550, "w": 100, "h": 40 }],
        "gate": { "x": 90, "kind": "boss" }
    }"#;
    assert!(matches!(LevelData::from_json(no_boss), Err(LevelError::MissingBoss)));

    let stuck_platform = r#"{
        "id": 1, "name": "x",
        "platforms": [{ "x": 0, "y": 550, "w": 100, "h": 40 }],
        "moving_platforms": [{ "x": 0, "y": 400, "w": 100, "h": 20, "axis": "y", "range": 50, "speed": 0 }],
        "gate": { "x": 90, "kind": "next_level" }
    }"#;
    assert!(matches!(
        LevelData::from_json(stuck_platform),
        Err(LevelError::InvalidMovingPlatform { index: 0, .. })
    ));
}

#[test]
fn bad_tuning_refuses_to_start() {
    let level = LevelData::builtin(1).unwrap();
    let tuning = Tuning {
        gravity: -0.5,
        ..Tuning::default()
    };
    let result = GameState::new(&level, &Loadout::default(), tuning, 1);
    assert!(matches!(result, Err(Error::Config(_))));
}

// ── outcome and save ──────────────────────────────────────────────────────────

#[test]
fn falling_out_ends_the_run_once() {
    let level = LevelData::from_json(PIT).unwrap();
    let mut state = GameState::new(&level, &Loadout::default(), Tuning::default(), 1).unwrap();

    for _ in 0..600 {
        tick(&mut state, &TickInput::default());
    }
    assert_eq!(state.phase, GamePhase::GameOver);
    assert!(!state.players[0].alive);
    let ticks = state.time_ticks;

    // Finished worlds no longer advance
    tick(&mut state, &TickInput::default());
    assert_eq!(state.time_ticks, ticks);

    let outcome = state.outcome().unwrap();
    assert_eq!(outcome.level_id, 2);
    assert_eq!(outcome.coins_earned, 1);
    assert_eq!(outcome.unlocked_level, None);

    let mut save = SaveData::default();
    save.apply(&outcome);
    assert_eq!(save.total_coins, 1);
    assert!(!save.is_unlocked(3));
}

#[test]
fn banked_coins_buy_upgrades_that_reach_the_next_run() {
    let mut save = SaveData {
        total_coins: 70,
        ..SaveData::default()
    };
    assert_eq!(save.purchase(ShopItem::HealthUp), Ok(()));
    assert_eq!(save.total_coins, 20);
    assert_eq!(save.purchase(ShopItem::HealthUp), Err(ShopError::AlreadyOwned(ShopItem::HealthUp)));
    assert_eq!(
        save.purchase(ShopItem::SpreadShot),
        Err(ShopError::InsufficientCoins {
            price: 25,
            available: 20
        })
    );

    let restored = SaveData::from_json(&save.to_json().unwrap()).unwrap();
    assert_eq!(restored, save);

    let level = LevelData::builtin(1).unwrap();
    let state = GameState::new(&level, &restored.loadout(), Tuning::default(), 1).unwrap();
    assert_eq!(state.players[0].max_health, 125);
    assert_eq!(state.players[0].health, 125);
}
