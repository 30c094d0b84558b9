use crossterm::event::{
    self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, KeyboardEnhancementFlags,
    PopKeyboardEnhancementFlags, PushKeyboardEnhancementFlags,
};
use crossterm::terminal::{
    disable_raw_mode, enable_raw_mode, supports_keyboard_enhancement, EnterAlternateScreen,
    LeaveAlternateScreen,
};
use crossterm::ExecutableCommand;
use dino_runner::constants::LOG_FILE;
use dino_runner::ui::{render_dino_scene, SceneOptions};
use dino_runner::utils::{build_info, persistence};
use dino_runner::{build_world, CueSink, FileHighScoreStore, GameConfig, GameEvent, World};
use rand::rngs::StdRng;
use rand::SeedableRng;
use ratatui::{backend::CrosstermBackend, Terminal};
use std::fs::OpenOptions;
use std::io::{self, Write};
use std::sync::Mutex;
use std::time::{Duration, Instant};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

/// Command-line overrides layered over the config file.
#[derive(Debug, Default)]
struct CliOptions {
    seed: Option<u64>,
    debug: bool,
    mute: bool,
}

impl CliOptions {
    fn apply(&self, config: &mut GameConfig) {
        if self.seed.is_some() {
            config.seed = self.seed;
        }
        if self.debug {
            config.debug_hitboxes = true;
        }
        if self.mute {
            config.sound = false;
        }
    }
}

fn print_help() {
    println!("Dino Runner - jump the cacti, duck the birds\n");
    println!("Usage: dino-runner [options]\n");
    println!("Options:");
    println!("  --seed N   Use a fixed random seed");
    println!("  --debug    Outline hitboxes");
    println!("  --mute     Disable the terminal bell");
    println!("  --version  Show version information");
    println!("  --help     Show this help message");
    println!("\nControls: Space/Up jump, Down duck, R restart, Esc/Q quit");
}

/// Parse arguments. `Err` carries the process exit code.
fn parse_args(args: &[String]) -> Result<CliOptions, i32> {
    let mut options = CliOptions::default();
    let mut iter = args.iter().skip(1);

    while let Some(arg) = iter.next() {
        match arg.as_str() {
            "--version" | "-v" => {
                println!("{}", build_info::version_line());
                return Err(0);
            }
            "--help" | "-h" => {
                print_help();
                return Err(0);
            }
            "--debug" => options.debug = true,
            "--mute" => options.mute = true,
            "--seed" => match iter.next().map(|s| s.parse::<u64>()) {
                Some(Ok(seed)) => options.seed = Some(seed),
                _ => {
                    eprintln!("--seed expects a non-negative integer");
                    eprintln!("Run 'dino-runner --help' for usage.");
                    return Err(1);
                }
            },
            other => {
                eprintln!("Unknown option: {}", other);
                eprintln!("Run 'dino-runner --help' for usage.");
                return Err(1);
            }
        }
    }
    Ok(options)
}

/// Send logs to ~/.dino-runner/dino-runner.log; the terminal belongs to the UI.
fn init_logging() -> io::Result<()> {
    let path = persistence::save_path(LOG_FILE)?;
    let file = OpenOptions::new().create(true).append(true).open(path)?;
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .with_target(false)
        .try_init()
        .map_err(io::Error::other)
}

/// Rings the terminal bell on milestones and collisions.
struct BellCues {
    enabled: bool,
}

impl CueSink for BellCues {
    fn play(&mut self, event: GameEvent) {
        if !self.enabled {
            return;
        }
        if !matches!(event, GameEvent::Milestone(_) | GameEvent::Collided) {
            return;
        }
        let mut out = io::stdout();
        if let Err(e) = out.write_all(b"\x07").and_then(|_| out.flush()) {
            warn!(error = %e, "bell cue failed");
        }
    }
}

fn is_quit(key: &KeyEvent) -> bool {
    match key.code {
        KeyCode::Esc | KeyCode::Char('q') | KeyCode::Char('Q') => true,
        KeyCode::Char('c') => key.modifiers.contains(KeyModifiers::CONTROL),
        _ => false,
    }
}

fn run(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    world: &mut World,
    config: &GameConfig,
) -> io::Result<()> {
    let mut cues = BellCues {
        enabled: config.sound,
    };
    let options = SceneOptions {
        sound: config.sound,
        debug_hitboxes: config.debug_hitboxes,
    };
    let frame_duration = Duration::from_millis(config.frame_ms);
    let start = Instant::now();

    loop {
        let frame_start = Instant::now();
        let now_ms = start.elapsed().as_millis() as u64;

        while event::poll(Duration::ZERO)? {
            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press && is_quit(&key) {
                    return Ok(());
                }
                world.keys_mut().apply_event(&key, now_ms);
            }
        }
        world.keys_mut().expire(now_ms, config.key_hold_ms);

        world.update();
        for event in world.drain_events() {
            cues.play(event);
        }

        terminal.draw(|frame| {
            let area = frame.size();
            render_dino_scene(frame, area, world, now_ms, options);
        })?;

        let elapsed = frame_start.elapsed();
        if elapsed < frame_duration {
            std::thread::sleep(frame_duration - elapsed);
        }
    }
}

fn main() -> io::Result<()> {
    let args: Vec<String> = std::env::args().collect();
    let cli = match parse_args(&args) {
        Ok(cli) => cli,
        Err(code) => std::process::exit(code),
    };

    if let Err(e) = init_logging() {
        eprintln!("Warning: logging disabled: {}", e);
    }

    let mut config = GameConfig::load();
    cli.apply(&mut config);
    info!(version = %build_info::version_line(), seed = ?config.seed, "starting");

    let rng = match config.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };
    let mut world = build_world(&config, Box::new(FileHighScoreStore::new()), rng);

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    stdout.execute(EnterAlternateScreen)?;

    // Without release events, held keys expire after key_hold_ms instead
    let enhanced = matches!(supports_keyboard_enhancement(), Ok(true))
        && stdout
            .execute(PushKeyboardEnhancementFlags(
                KeyboardEnhancementFlags::REPORT_EVENT_TYPES,
            ))
            .is_ok();
    world.keys_mut().set_auto_release(!enhanced);
    info!(keyboard_enhanced = enhanced, "terminal ready");

    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;
    terminal.hide_cursor()?;

    let result = run(&mut terminal, &mut world, &config);

    // Always restore the terminal
    let out = terminal.backend_mut();
    if enhanced {
        let _ = out.execute(PopKeyboardEnhancementFlags);
    }
    let _ = out.execute(LeaveAlternateScreen);
    let _ = disable_raw_mode();
    let _ = terminal.show_cursor();

    info!(high_score = world.ctx().high_score, "exiting");
    result
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(list: &[&str]) -> Vec<String> {
        std::iter::once("dino-runner")
            .chain(list.iter().copied())
            .map(String::from)
            .collect()
    }

    #[test]
    fn test_parse_flags() {
        let cli = parse_args(&args(&["--seed", "42", "--debug", "--mute"])).unwrap();
        assert_eq!(cli.seed, Some(42));
        assert!(cli.debug);
        assert!(cli.mute);

        let mut config = GameConfig::default();
        cli.apply(&mut config);
        assert_eq!(config.seed, Some(42));
        assert!(config.debug_hitboxes);
        assert!(!config.sound);
    }

    #[test]
    fn test_no_flags_keep_config() {
        let cli = parse_args(&args(&[])).unwrap();
        let mut config = GameConfig {
            seed: Some(7),
            ..GameConfig::default()
        };
        cli.apply(&mut config);
        assert_eq!(config.seed, Some(7));
        assert!(config.sound);
    }

    #[test]
    fn test_bad_arguments_exit_with_error() {
        assert_eq!(parse_args(&args(&["--seed"])).unwrap_err(), 1);
        assert_eq!(parse_args(&args(&["--seed", "abc"])).unwrap_err(), 1);
        assert_eq!(parse_args(&args(&["--fly"])).unwrap_err(), 1);
    }

    #[test]
    fn test_quit_keys() {
        let key = |code, modifiers| KeyEvent::new(code, modifiers);
        assert!(is_quit(&key(KeyCode::Esc, KeyModifiers::NONE)));
        assert!(is_quit(&key(KeyCode::Char('q'), KeyModifiers::NONE)));
        assert!(is_quit(&key(KeyCode::Char('c'), KeyModifiers::CONTROL)));
        assert!(!is_quit(&key(KeyCode::Char('c'), KeyModifiers::NONE)));
        assert!(!is_quit(&key(KeyCode::Char(' '), KeyModifiers::NONE)));
    }
}
