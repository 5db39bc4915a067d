pub mod answer;
pub mod config;
pub mod game;
pub mod hints;
pub mod history;
pub mod puzzle;
pub mod runtime;
pub mod ui;
pub mod util;

use crate::{
    config::{Config, ConfigStore, FileConfigStore},
    game::Session,
    history::{humanize_age, GameRecord, HistoryLog},
    puzzle::Puzzle,
    runtime::{CrosstermEventSource, EventSource, GameClock, GameEvent},
};
use clap::{error::ErrorKind, CommandFactory, Parser};
use crossterm::{
    event::{KeyCode, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
    tty::IsTty,
};
use ratatui::{
    backend::{Backend, CrosstermBackend},
    Frame, Terminal,
};
use std::{
    error::Error,
    io::{self, stdin},
    time::Duration,
};

/// The game clock runs at 1 Hz.
const TICK_RATE_MS: u64 = 1000;

/// terminal movie-guessing game with progressively revealed stills
#[derive(Parser, Debug, Clone)]
#[clap(
    version,
    about,
    long_about = "Guess the movie from its stills before the clock runs out. Each wrong guess costs seconds and reveals another still; both the original and the Spanish release title are accepted."
)]
pub struct Cli {
    /// puzzle to play instead of a random pick
    #[clap(short = 'p', long)]
    puzzle: Option<String>,

    /// seconds on the clock
    #[clap(short = 's', long)]
    seconds: Option<u32>,

    /// seconds lost per wrong guess
    #[clap(long)]
    penalty: Option<u32>,

    /// number of guess attempts (at least 1)
    #[clap(short = 'a', long, value_parser = clap::value_parser!(u64).range(1..))]
    attempts: Option<u64>,

    /// list the embedded puzzles and exit
    #[clap(long)]
    list_puzzles: bool,

    /// show recent game results and exit
    #[clap(long)]
    history: bool,
}

impl Cli {
    /// Flags override whatever the config file carries.
    fn apply(&self, cfg: &mut Config) {
        if let Some(name) = &self.puzzle {
            cfg.puzzle = Some(name.clone());
        }
        if let Some(secs) = self.seconds {
            cfg.initial_secs = secs;
        }
        if let Some(penalty) = self.penalty {
            cfg.penalty_secs = penalty;
        }
        if let Some(attempts) = self.attempts {
            cfg.max_attempts = attempts as usize;
        }
    }
}

#[derive(Debug)]
pub struct App {
    pub config: Config,
    pub puzzle: Puzzle,
    pub session: Session,
    pub input: String,
    recorded: bool,
}

impl App {
    pub fn new(config: Config) -> Result<Self, Box<dyn Error>> {
        let puzzle = match &config.puzzle {
            Some(name) => Puzzle::load(name)?,
            None => Puzzle::random(),
        };
        let session = Session::new(puzzle.answer_key(), config.session_config())
            .with_hints(puzzle.frames.len());
        Ok(Self {
            config,
            puzzle,
            session,
            input: String::new(),
            recorded: false,
        })
    }

    /// Fresh session; keeps the current movie when replaying or when a
    /// puzzle is pinned, otherwise draws a new one.
    pub fn reset(&mut self, keep_puzzle: bool) {
        if !keep_puzzle && self.config.puzzle.is_none() {
            self.puzzle = Puzzle::random();
        }
        self.session = Session::new(self.puzzle.answer_key(), self.config.session_config())
            .with_hints(self.puzzle.frames.len());
        self.input.clear();
        self.recorded = false;
    }

    /// Appends the result to the history log once per session, best-effort.
    fn record_result(&mut self, log: &HistoryLog) {
        if self.recorded {
            return;
        }
        if let Some(summary) = self.session.summary() {
            let _ = log.append(&GameRecord::from_summary(&self.puzzle.name, &summary));
            self.recorded = true;
        }
    }
}

fn main() -> Result<(), Box<dyn Error>> {
    let cli = Cli::parse();

    if cli.list_puzzles {
        for name in Puzzle::names() {
            println!("{name}");
        }
        return Ok(());
    }

    if cli.history {
        print_history(&HistoryLog::new());
        return Ok(());
    }

    if !stdin().is_tty() {
        let mut cmd = Cli::command();
        cmd.error(ErrorKind::Io, "stdin must be a tty").exit();
    }

    let mut config = FileConfigStore::new().load();
    cli.apply(&mut config);

    let mut app = App::new(config)?;

    enable_raw_mode()?;

    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = start_tui(&mut terminal, &mut app);

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen,)?;
    terminal.show_cursor()?;

    result
}

fn print_history(log: &HistoryLog) {
    let rows = log.recent(10);
    if rows.is_empty() {
        println!("no games played yet");
        return;
    }
    for rec in rows {
        println!(
            "{}  {:<16} {}  {} attempts  {} on the clock  ({})",
            rec.when.format("%Y-%m-%d %H:%M"),
            rec.puzzle,
            if rec.won { "won " } else { "lost" },
            rec.attempts,
            util::format_clock(rec.elapsed_secs),
            humanize_age(rec.when),
        );
    }
}

#[derive(Debug)]
enum ExitType {
    Replay,
    New,
    Quit,
}

fn start_tui<B: Backend>(
    terminal: &mut Terminal<B>,
    app: &mut App,
) -> Result<(), Box<dyn Error>> {
    let clock = GameClock::new(
        CrosstermEventSource::new(),
        Duration::from_millis(TICK_RATE_MS),
    );
    let history = HistoryLog::new();

    loop {
        terminal.draw(|f| ui(app, f))?;

        let exit_type = run_session(terminal, app, &clock, &history)?;

        match exit_type {
            ExitType::Replay => app.reset(true),
            ExitType::New => app.reset(false),
            ExitType::Quit => break,
        }
    }

    Ok(())
}

/// Drives one session to an exit decision.
fn run_session<B: Backend, E: EventSource>(
    terminal: &mut Terminal<B>,
    app: &mut App,
    clock: &GameClock<E>,
    history: &HistoryLog,
) -> Result<ExitType, Box<dyn Error>> {
    loop {
        match clock.advance(&mut app.session) {
            GameEvent::Tick => {}
            GameEvent::Resize => {}
            GameEvent::Key(key) => match key.code {
                KeyCode::Esc => return Ok(ExitType::Quit),
                KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                    return Ok(ExitType::Quit);
                }
                KeyCode::Enter => {
                    if app.session.phase == game::Phase::Waiting {
                        app.session.start();
                    } else if app.session.is_playing() {
                        let guess = std::mem::take(&mut app.input);
                        app.session.submit_guess(&guess);
                    }
                }
                KeyCode::Backspace => {
                    if app.session.is_playing() {
                        app.input.pop();
                    }
                }
                KeyCode::Left => {
                    if app.session.is_playing() {
                        app.session.hints.select_prev();
                    }
                }
                KeyCode::Right => {
                    if app.session.is_playing() {
                        app.session.hints.select_next();
                    }
                }
                KeyCode::Char(c) => {
                    if app.session.is_playing() {
                        app.input.push(c);
                    } else if app.session.is_finished() {
                        match c {
                            'r' => return Ok(ExitType::Replay),
                            'n' => return Ok(ExitType::New),
                            _ => {}
                        }
                    }
                }
                _ => {}
            },
        }

        if app.session.is_finished() {
            app.record_result(history);
        }

        terminal.draw(|f| ui(app, f))?;
    }
}

fn ui(app: &mut App, f: &mut Frame) {
    f.render_widget(&*app, f.area());
}
