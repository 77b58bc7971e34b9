mod cli;
mod clock;
mod logging;
mod surface;

use std::time::{Duration, Instant};

use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use ratatui::{
    DefaultTerminal, Frame,
    layout::{Constraint, Layout},
    style::{Color, Stylize},
    text::{Line, Span},
};
use retrofx_config::Config;
use retrofx_core::{AnimationSpeed, EffectKind, Surface};
use retrofx_effects::{EffectManager, EffectSettings};
use tracing::{debug, info, warn};

use crate::cli::{HELP_TEXT, Opts, VERSION};
use crate::clock::FrameClock;
use crate::surface::TerminalSurface;

/// Highlight color for key hints and the active effect.
const ACCENT: Color = Color::Green;

fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;
    let opts = Opts::parse()?;
    if opts.show_help {
        println!("{HELP_TEXT}");
        return Ok(());
    }
    if opts.show_version {
        println!("retrofx {VERSION}");
        return Ok(());
    }

    if let Some(path) = logging::init() {
        debug!(path = %path.display(), "logging to file");
    }

    let mut config = load_config(&opts);
    opts.apply(&mut config);
    let config = config.normalized();
    info!(effect = %config.effect, fps = config.fps, "starting");

    let terminal = ratatui::init();
    let result = App::new(config).run(terminal);
    ratatui::restore();
    result
}

/// Read the config file, falling back to defaults when it is unreadable.
fn load_config(opts: &Opts) -> Config {
    let loaded = match &opts.config {
        Some(path) => Config::load_from(path),
        None => Config::load(),
    };
    loaded.unwrap_or_else(|err| {
        warn!(%err, "using default config");
        eprintln!("retrofx: {err}; using defaults");
        Config::default()
    })
}

fn effect_settings(config: &Config) -> EffectSettings {
    EffectSettings {
        glyph_size: config.glyph_size,
        star_count: config.star_count,
        speed: config.speed,
    }
}

/// The main application which holds the state and logic of the application.
#[derive(Debug)]
pub struct App {
    /// Is the application running?
    running: bool,
    manager: EffectManager,
    surface: TerminalSurface,
    config: Config,
    /// Whether the status line is drawn.
    show_status: bool,
    speed: AnimationSpeed,
}

impl App {
    /// Construct a new instance of [`App`].
    pub fn new(config: Config) -> Self {
        Self {
            running: false,
            manager: EffectManager::new(effect_settings(&config)),
            surface: TerminalSurface::default(),
            show_status: config.show_status,
            speed: config.speed,
            config,
        }
    }

    /// Run the application's main loop.
    pub fn run(mut self, mut terminal: DefaultTerminal) -> color_eyre::Result<()> {
        let size = terminal.size()?;
        self.surface.resize(size.width, size.height);
        self.select(self.config.effect);

        let mut clock = FrameClock::new(self.config.frame_interval(), Instant::now());
        self.running = true;
        while self.running {
            if clock.tick(Instant::now()) {
                self.manager.frame(&mut self.surface);
                terminal.draw(|frame| self.render(frame))?;
            }
            self.handle_crossterm_events(clock.timeout(Instant::now()))?;
        }
        Ok(())
    }

    /// Renders the user interface.
    fn render(&self, frame: &mut Frame) {
        let area = frame.area();
        frame.render_widget(&self.surface, area);

        if self.show_status {
            let [_, status] =
                Layout::vertical([Constraint::Fill(1), Constraint::Length(1)]).areas(area);
            frame.render_widget(self.status_line(), status);
        }
    }

    /// Effect bar with the running effect highlighted, followed by key hints.
    fn status_line(&self) -> Line<'static> {
        let current = self.manager.current();
        let mut spans: Vec<Span<'static>> = Vec::new();
        for (i, kind) in self.manager.registered().enumerate() {
            spans.push(format!("{}", i + 1).bold().fg(ACCENT));
            let label = format!(" {} ", kind.label());
            if current == Some(kind) {
                spans.push(label.black().bg(ACCENT));
            } else {
                spans.push(label.dark_gray());
            }
            spans.push(" ".into());
        }
        spans.extend([
            " n".bold().fg(ACCENT),
            " next  ".dark_gray(),
            "s".bold().fg(ACCENT),
            " stop  ".dark_gray(),
            "v".bold().fg(ACCENT),
            format!(" speed: {}  ", self.speed.label()).dark_gray(),
            "q".bold().fg(ACCENT),
            " quit".dark_gray(),
        ]);
        Line::from(spans).centered()
    }

    /// Reads the crossterm events and updates the state of [`App`].
    /// Waits at most `timeout` so the next frame is not delayed.
    fn handle_crossterm_events(&mut self, timeout: Duration) -> color_eyre::Result<()> {
        if event::poll(timeout)? {
            match event::read()? {
                Event::Key(key) if key.kind == KeyEventKind::Press => self.on_key_event(key),
                Event::Resize(cols, rows) => self.on_resize(cols, rows),
                _ => {}
            }
        }
        Ok(())
    }

    /// Handles the key events and updates the state of [`App`].
    fn on_key_event(&mut self, key: KeyEvent) {
        match (key.modifiers, key.code) {
            (_, KeyCode::Esc | KeyCode::Char('q'))
            | (KeyModifiers::CONTROL, KeyCode::Char('c') | KeyCode::Char('C')) => self.quit(),
            (_, KeyCode::Char(c @ '1'..='4')) => {
                if let Some(&kind) = EffectKind::ALL.get(c as usize - '1' as usize) {
                    self.select(kind);
                }
            }
            (_, KeyCode::Char('n')) => self.cycle(),
            (_, KeyCode::Char('s')) => self.stop(),
            (_, KeyCode::Char('v')) => self.cycle_speed(),
            (_, KeyCode::Char('h')) => self.show_status = !self.show_status,
            _ => {}
        }
    }

    fn on_resize(&mut self, cols: u16, rows: u16) {
        self.surface.resize(cols, rows);
        self.manager.resize(self.surface.size());
    }

    fn select(&mut self, kind: EffectKind) {
        self.manager.select_kind(Some(&self.surface), kind);
    }

    /// Advance to the next effect, starting the first one when idle.
    fn cycle(&mut self) {
        let was_running = self.manager.is_running();
        let next = self.manager.cycle();
        if !was_running {
            self.select(next);
        }
    }

    fn stop(&mut self) {
        self.manager.stop();
        self.surface.clear();
    }

    fn cycle_speed(&mut self) {
        self.speed = self.speed.next();
        self.manager.set_speed(self.speed);
    }

    /// Set running to false to quit the application.
    fn quit(&mut self) {
        self.running = false;
    }
}
