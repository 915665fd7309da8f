pub mod runner;

pub use runner::WorldRunner;

use std::cell::RefCell;

use grove_engine::{EngineConfig, RenderOptions};
use wasm_bindgen::prelude::*;

thread_local! {
    static RUNNER: RefCell<Option<WorldRunner>> = RefCell::new(None);
}

fn with_runner<R>(f: impl FnOnce(&mut WorldRunner) -> R) -> R {
    RUNNER.with(|cell| {
        let mut borrow = cell.borrow_mut();
        let runner = borrow.as_mut().expect("World not initialized. Call world_init() first.");
        f(runner)
    })
}

/// Create the world. `config_json` may be empty or partial; missing fields
/// take their defaults and a malformed document falls back to all defaults.
#[wasm_bindgen]
pub fn world_init(config_json: &str) {
    console_error_panic_hook::set_once();
    let _ = console_log::init_with_level(log::Level::Info);

    let config = if config_json.trim().is_empty() {
        EngineConfig::default()
    } else {
        EngineConfig::from_json(config_json).unwrap_or_else(|err| {
            log::warn!("{}; using default config", err);
            EngineConfig::default()
        })
    };

    RUNNER.with(|cell| {
        *cell.borrow_mut() = Some(WorldRunner::new(config));
    });
    log::info!("grove: initialized");
}

#[wasm_bindgen]
pub fn world_load_map(json: &str) -> bool {
    with_runner(|r| match r.load_map(json) {
        Ok(_) => true,
        Err(err) => {
            log::error!("map load failed: {}", err);
            false
        }
    })
}

/// The scene in map-file JSON, or an empty string on failure.
#[wasm_bindgen]
pub fn world_save_map() -> String {
    with_runner(|r| {
        r.save_map().unwrap_or_else(|err| {
            log::error!("map save failed: {}", err);
            String::new()
        })
    })
}

#[wasm_bindgen]
pub fn world_spawn_player(x: f32, y: f32, width: f32, height: f32) {
    with_runner(|r| r.spawn_player(x, y, width, height));
}

/// Returns true when the move was blocked by an obstacle.
#[wasm_bindgen]
pub fn world_move_player(dx: f32, dy: f32) -> bool {
    with_runner(|r| r.move_player(dx, dy).is_some_and(|out| out.blocked))
}

#[wasm_bindgen]
pub fn world_player_x() -> f32 {
    with_runner(|r| r.player_pos().map_or(0.0, |p| p.x))
}

#[wasm_bindgen]
pub fn world_player_y() -> f32 {
    with_runner(|r| r.player_pos().map_or(0.0, |p| p.y))
}

#[wasm_bindgen]
pub fn world_tick(dt_ms: f32) {
    with_runner(|r| r.tick(dt_ms));
}

/// Returns false when no unchopped tree is in reach.
#[wasm_bindgen]
pub fn world_start_chop() -> bool {
    with_runner(|r| r.start_chop())
}

#[wasm_bindgen]
pub fn world_stop_chop() {
    with_runner(|r| r.stop_chop());
}

#[wasm_bindgen]
pub fn world_wood() -> u32 {
    with_runner(|r| r.wood())
}

/// True when a gate is in reach and enough wood has been gathered.
#[wasm_bindgen]
pub fn world_gate_ready() -> bool {
    with_runner(|r| r.gate_ready())
}

#[wasm_bindgen]
pub fn world_build_draw_list(debug: bool) {
    with_runner(|r| r.build_draw_list(RenderOptions { debug }));
}

// ---- Data accessors ----

#[wasm_bindgen]
pub fn get_draw_commands_ptr() -> *const u32 {
    with_runner(|r| r.draw_commands_ptr())
}

#[wasm_bindgen]
pub fn get_draw_command_count() -> u32 {
    with_runner(|r| r.draw_command_count())
}

#[wasm_bindgen]
pub fn world_interactable_count() -> u32 {
    with_runner(|r| r.interactable_count())
}

#[wasm_bindgen]
pub fn world_camera_x() -> f32 {
    with_runner(|r| r.camera().x)
}

#[wasm_bindgen]
pub fn world_camera_y() -> f32 {
    with_runner(|r| r.camera().y)
}
