mod app;
mod config;
mod picker;
mod sheet;
mod theme;
mod ui;

use anyhow::Result;
use clap::Parser;
use crossterm::{
    event::{self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io;
use std::path::PathBuf;
use std::time::{Duration, Instant};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use app::{App, Popup};
use config::{AppConfig, ConfigError};
use picker::{Clock, FixedClock, SystemClock};

#[derive(Parser, Debug)]
#[command(name = "wheeltime")]
#[command(version = "0.1.0")]
#[command(about = "Pick an hour and minute on two wheels, never earlier than now")]
struct Args {
    /// Hour label to start from (e.g. "18")
    #[arg(long)]
    hour: Option<String>,

    /// Minute label to start from (e.g. "45")
    #[arg(long)]
    minute: Option<String>,

    /// Pretend the current time is HH:MM
    #[arg(long)]
    now: Option<String>,

    /// Use this config file instead of ~/.config/wheeltime/config.toml
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Print the picked time as JSON on exit
    #[arg(long)]
    json: bool,
}

fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .with(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let args = Args::parse();

    let clock: Box<dyn Clock> = match args.now.as_deref() {
        Some(s) => {
            let now = picker::clock::parse_hh_mm(s).ok_or_else(|| ConfigError::InvalidTime(s.to_string()))?;
            Box::new(FixedClock(now))
        }
        None => Box::new(SystemClock),
    };

    let config = AppConfig::load(args.config.as_deref()).unwrap_or_default();
    ui::init_theme(theme::Theme::load(&config.theme));

    let mut app = App::new(config, clock, args.hour, args.minute);
    run_tui(&mut app)?;

    if args.json {
        println!("{}", serde_json::to_string(&app.selection())?);
    }
    Ok(())
}

fn run_tui(app: &mut App) -> Result<()> {
    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // Main loop
    let result = run_app(&mut terminal, app);

    // Restore terminal
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    result
}

fn run_app(terminal: &mut Terminal<CrosstermBackend<io::Stdout>>, app: &mut App) -> Result<()> {
    loop {
        terminal.draw(|f| ui::draw(f, app))?;

        // Short poll so settles and corrective scrolls feel immediate
        if event::poll(Duration::from_millis(50))? {
            match event::read()? {
                Event::Key(key) if key.kind == KeyEventKind::Press => match key.code {
                    KeyCode::Char('q') if app.popup == Popup::None => return Ok(()),
                    KeyCode::Char('c') if key.modifiers.contains(event::KeyModifiers::CONTROL) => {
                        return Ok(())
                    }
                    _ => app.handle_key(key),
                },
                Event::Mouse(mouse) => app.handle_mouse(mouse),
                _ => {}
            }
        }

        app.tick(Instant::now());
    }
}
