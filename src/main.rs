//! Asteroid Shooter - terminal entry point
//!
//! Configuration comes from `settings.json` in the working directory.

use std::fs::File;
use std::io::{self, BufWriter};
use std::path::Path;
use std::time::{Duration, Instant, SystemTime, UNIX_EPOCH};

use asteroid_shooter::Game;
use asteroid_shooter::persistence::FileStore;
use asteroid_shooter::platform::{FixedTimestep, InputState};
use asteroid_shooter::renderer::{SpriteSet, TerminalRenderer};
use asteroid_shooter::settings::{DEFAULT_SETTINGS_FILE, Settings};
use asteroid_shooter::ui::Ui;
use crossterm::cursor::{Hide, Show};
use crossterm::event::{
    self, DisableMouseCapture, EnableMouseCapture, KeyboardEnhancementFlags,
    PopKeyboardEnhancementFlags, PushKeyboardEnhancementFlags,
};
use crossterm::execute;
use crossterm::terminal::{self, Clear, ClearType, EnterAlternateScreen, LeaveAlternateScreen};
use glam::Vec2;

fn main() -> io::Result<()> {
    let settings_path = Path::new(DEFAULT_SETTINGS_FILE);
    let (settings, outcome) = Settings::load(settings_path);
    init_logging(&settings);

    log::info!("Asteroid Shooter starting...");
    outcome.log(settings_path);

    let result = run(&settings);
    match &result {
        Ok(()) => log::info!("Asteroid Shooter exited cleanly"),
        Err(e) => log::error!("Asteroid Shooter stopped: {}", e),
    }
    result
}

/// Log to a file; the terminal is the game screen
fn init_logging(settings: &Settings) {
    let mut builder = env_logger::Builder::new();
    builder.filter_level(settings.log_filter());

    match File::create(&settings.log_path) {
        Ok(file) => {
            builder.target(env_logger::Target::Pipe(Box::new(file)));
        }
        Err(e) => {
            eprintln!(
                "Cannot open log file {}: {}; logging disabled",
                settings.log_path.display(),
                e
            );
            builder.filter_level(log::LevelFilter::Off);
        }
    }
    builder.init();
}

fn clock_seed() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_nanos() as u64)
        .unwrap_or(0)
}

/// Raw mode, alternate screen and mouse capture, undone on drop
struct TerminalGuard {
    enhanced_keys: bool,
}

impl TerminalGuard {
    fn enter() -> io::Result<Self> {
        terminal::enable_raw_mode()?;
        let mut guard = Self {
            enhanced_keys: false,
        };

        let mut out = io::stdout();
        execute!(
            out,
            EnterAlternateScreen,
            Hide,
            EnableMouseCapture,
            Clear(ClearType::All)
        )?;

        // Key release events make held movement exact
        if matches!(terminal::supports_keyboard_enhancement(), Ok(true)) {
            execute!(
                out,
                PushKeyboardEnhancementFlags(KeyboardEnhancementFlags::REPORT_EVENT_TYPES)
            )?;
            guard.enhanced_keys = true;
        }
        log::info!(
            "Terminal ready (key release events: {})",
            guard.enhanced_keys
        );
        Ok(guard)
    }
}

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        let mut out = io::stdout();
        if self.enhanced_keys {
            let _ = execute!(out, PopKeyboardEnhancementFlags);
        }
        let _ = execute!(out, DisableMouseCapture, Show, LeaveAlternateScreen);
        let _ = terminal::disable_raw_mode();
    }
}

fn run(settings: &Settings) -> io::Result<()> {
    let tuning = settings.tuning.clone().sanitized();
    let seed = settings.seed.unwrap_or_else(clock_seed);
    let world = Vec2::new(tuning.screen_width, tuning.screen_height);
    let tick_rate = tuning.tick_rate;

    let mut game = Game::new(
        tuning,
        FileStore::new(settings.highscore_path.clone()),
        seed,
    );
    let sprites = SpriteSet::load(&settings.sprite_dir);
    let mut ui = Ui::new(world.x, world.y);
    let mut input = InputState::new();
    let mut clock = FixedTimestep::from_rate(tick_rate);
    let frame_budget = Duration::from_secs_f32(1.0 / tick_rate as f32);

    let _guard = TerminalGuard::enter()?;
    let (cols, rows) = terminal::size()?;
    log::info!("Terminal size: {}x{}", cols, rows);
    let mut renderer = TerminalRenderer::new(cols, rows, world, sprites);
    let mut out = BufWriter::new(io::stdout());

    let mut last = Instant::now();
    while !input.quit_requested() {
        let frame_start = Instant::now();

        while event::poll(Duration::ZERO)? {
            input.handle_event(&event::read()?);
        }
        if let Some((cols, rows)) = input.take_resize() {
            renderer.resize(cols, rows);
        }
        for command in input.drain_ui() {
            if let Some(action) = ui.handle(command, game.phase(), renderer.viewport()) {
                log::debug!("UI action {:?}", action);
                if !action.apply(input.pending_mut()) {
                    input.request_quit();
                }
            }
        }
        if input.quit_requested() {
            break;
        }

        let dt = frame_start.duration_since(last).as_secs_f32();
        last = frame_start;
        for _ in 0..clock.advance(dt) {
            let phase = game.phase();
            let tick_input = input.take_tick_input();
            for event in game.step(&tick_input) {
                log::debug!("Event {:?}", event);
            }
            // A new screen starts from a clean clock
            if game.phase() != phase {
                clock.reset();
                break;
            }
        }

        ui.sync(game.phase());
        renderer.draw(&game.snapshot(), &ui);
        renderer.present(&mut out)?;

        // Sleep out the rest of the frame, waking early for input
        let wait = frame_budget.saturating_sub(frame_start.elapsed());
        if event::poll(wait)? {
            input.handle_event(&event::read()?);
        }
    }

    log::info!(
        "Quitting (best score {}, best level {})",
        game.record().score,
        game.record().level
    );
    Ok(())
}
