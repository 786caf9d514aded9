//! Platform Blaster headless runner
//!
//! Loads a level, feeds a scripted input through the fixed-timestep clock and
//! reports what happened. Usage: `platform-blaster [level-id|path.json] [seconds]`

use std::env;
use std::fs;

use platform_blaster::audio::AudioQueue;
use platform_blaster::sim::{Actions, FixedTimestep, GameEvent, GameState, LevelData, ShootDirection, TickInput, tick};
use platform_blaster::{Error, SaveData, Tuning};

/// Host frame duration, not a whole number of ticks
const FRAME_SECS: f32 = 1.0 / 50.0;
const DEFAULT_SECONDS: f32 = 30.0;

fn main() {
    env_logger::init();

    if let Err(e) = run() {
        log::error!("{}", e);
        eprintln!("error: {}", e);
        std::process::exit(1);
    }
}

fn run() -> Result<(), Box<dyn std::error::Error>> {
    let mut args = env::args().skip(1);
    let level = load_level(args.next().as_deref())?;
    let seconds = match args.next() {
        Some(s) => s.parse::<f32>()?,
        None => DEFAULT_SECONDS,
    };

    log::info!("Platform Blaster (headless) running '{}' for {:.1}s", level.name, seconds);

    let save = SaveData::default();
    let mut state = GameState::new(&level, &save.loadout(), Tuning::default(), 0x5eed)?;
    let mut clock = FixedTimestep::default();
    let mut audio = AudioQueue::new();

    let frames = (seconds / FRAME_SECS).ceil() as u32;
    for _ in 0..frames {
        for _ in 0..clock.advance(FRAME_SECS) {
            let input = TickInput::single(scripted_actions(state.time_ticks));
            tick(&mut state, &input);
        }

        let events = state.drain_events();
        log_events(&events);
        audio.push_events(&events);
        for queued in audio.drain() {
            log::debug!("cue {} @ {:.2}", queued.cue.key(), queued.volume);
        }

        if state.phase.is_finished() {
            break;
        }
    }

    println!("Level:   {} ({})", state.level_name, state.level_id);
    println!("Phase:   {:?}", state.phase);
    println!("Ticks:   {}", state.time_ticks);
    println!("Score:   {}", state.score());
    println!("Coins:   {}", state.coins_collected());
    if clock.dropped_ticks() > 0 {
        println!("Dropped: {} ticks", clock.dropped_ticks());
    }

    match state.outcome() {
        Some(delta) => {
            let mut save = save;
            save.apply(&delta);
            println!("Outcome: {}", serde_json::to_string(&delta)?);
            println!("Save:    {}", save.to_json()?);
        }
        None => println!("Outcome: unfinished"),
    }

    Ok(())
}

fn load_level(arg: Option<&str>) -> Result<LevelData, Error> {
    let level = match arg {
        None => LevelData::builtin(1)?,
        Some(arg) => match arg.parse::<u32>() {
            Ok(id) => LevelData::builtin(id)?,
            Err(_) => {
                let json = fs::read_to_string(arg).map_err(|source| Error::Io {
                    path: arg.to_string(),
                    source,
                })?;
                LevelData::from_json(&json)?
            }
        },
    };
    Ok(level)
}

/// Run right, hop every 45 ticks, keep shooting, dash now and then and
/// press the ultimate once a second
fn scripted_actions(now: u64) -> Actions {
    Actions {
        move_x: 1.0,
        jump: now % 45 < 8,
        shoot: true,
        shoot_direction: ShootDirection::Horizontal,
        dash: now % 180 == 90,
        switch_weapon: false,
        activate_ultimate: now % 60 == 30,
    }
}


fn log_events(events: &[GameEvent]) {
    for event in events {
        match event {
            GameEvent::BossGate | GameEvent::Victory | GameEvent::GameOver | GameEvent::BossDefeated { .. } => {
                log::info!("{:?}", event);
            }
            GameEvent::BossPhase { phase } => log::info!("Boss entered phase {}", phase),
            _ => log::trace!("{}", event.name()),
        }
    }
}
