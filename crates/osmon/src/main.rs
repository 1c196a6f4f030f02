use std::io::{IsTerminal, stdout};
use std::path::PathBuf;
use std::time::{Duration, Instant};

use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use ratatui::{
    DefaultTerminal, Frame,
    layout::{Constraint, Layout},
    style::{Color, Stylize},
    text::Line,
    widgets::Paragraph,
};
use tracing::{debug, info, warn};

use osmon_background::{
    AnimationContext, FrameDriver, IntervalTimer, Random, Viewport, backdrop, to_lines,
};
use osmon_config::Config;
use osmon_core::{Mode, Theme};

mod logging;

fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;
    logging::init();

    let (config, config_path) = load_config();
    let Some(viewport) = probe_viewport(&config) else {
        warn!("no terminal surface available, animation not started");
        return Ok(());
    };

    info!(version = env!("CARGO_PKG_VERSION"), "osmon starting");
    let terminal = ratatui::init();
    let result = App::new(config, viewport)
        .with_config_path(config_path)
        .run(terminal);
    ratatui::restore();
    info!("osmon stopped");
    result
}

/// Load the config and the path theme changes are saved to.
fn load_config() -> (Config, Option<PathBuf>) {
    match Config::path() {
        Ok(path) => load_config_from(path),
        Err(err) => {
            warn!(error = %err, "using default configuration");
            (Config::default(), None)
        }
    }
}

/// Load the config at `path`, falling back to defaults on any error.
///
/// A file that failed to load is never written back.
fn load_config_from(path: PathBuf) -> (Config, Option<PathBuf>) {
    match Config::load_from(&path) {
        Ok(config) => (config, Some(path)),
        Err(err) => {
            warn!(
                error = %err,
                path = %path.display(),
                "using default configuration, theme changes will not be saved"
            );
            (Config::default(), None)
        }
    }
}

/// Viewport of the attached terminal, if there is one.
fn probe_viewport(config: &Config) -> Option<Viewport> {
    if !stdout().is_terminal() {
        return None;
    }
    let (columns, rows) = crossterm::terminal::size().ok()?;
    Some(viewport_for(config, columns, rows))
}

fn viewport_for(config: &Config, columns: u16, rows: u16) -> Viewport {
    Viewport::from_cells(
        columns,
        rows,
        config.cell_width,
        config.cell_height,
        config.device_pixel_ratio(),
    )
}

/// The main application which holds the state and logic of the application.
#[derive(Debug)]
pub struct App {
    /// Is the application running?
    running: bool,
    /// User configuration, also used to persist the theme.
    config: Config,
    /// Where theme changes are saved, if anywhere.
    config_path: Option<PathBuf>,
    /// Is the key help line shown?
    show_help: bool,
    /// Current page theme.
    theme: Theme,
    /// Sky animation state.
    context: AnimationContext,
    /// Frame loop driver.
    driver: FrameDriver,
    /// Deadline for the next frame.
    frame_timer: IntervalTimer,
    /// Clock origin for timers.
    started: Instant,
    /// Terminal size the animation was last sized for.
    cells: (u16, u16),
}

impl App {
    /// Construct a new instance of [`App`].
    pub fn new(config: Config, viewport: Viewport) -> Self {
        let theme = config.theme;
        let context = AnimationContext::new(viewport, theme.is_light(), Random::new(config.seed));
        let driver = FrameDriver::new(config.meteor_interval());
        let frame_timer = IntervalTimer::new(config.frame_interval(), Duration::ZERO);
        Self {
            running: false,
            show_help: config.show_help,
            config,
            config_path: None,
            theme,
            context,
            driver,
            frame_timer,
            started: Instant::now(),
            cells: (0, 0),
        }
    }

    /// Save theme changes to `path`. Without a path nothing is written.
    pub fn with_config_path(mut self, path: Option<PathBuf>) -> Self {
        self.config_path = path;
        self
    }

    /// Run the application's main loop.
    pub fn run(mut self, mut terminal: DefaultTerminal) -> color_eyre::Result<()> {
        self.running = true;
        let now = self.started.elapsed();
        self.driver.start(now);
        self.frame_timer = IntervalTimer::new(self.frame_interval(), now);
        while self.running {
            terminal.draw(|frame| self.render(frame))?;
            self.handle_crossterm_events()?;
        }
        self.driver.stop();
        Ok(())
    }

    /// Renders one animation frame and the help line.
    fn render(&mut self, frame: &mut Frame) {
        let area = frame.area();
        if (area.width, area.height) != self.cells {
            self.resize(area.width, area.height);
        }

        self.driver.step(&mut self.context, self.started.elapsed());

        let lines = to_lines(
            self.context.surface().canvas(),
            area.width,
            area.height,
            backdrop(self.context.mode()),
        );
        frame.render_widget(Paragraph::new(lines), area);

        if self.show_help {
            let [_, help_area] = Layout::vertical([Constraint::Fill(1), Constraint::Length(1)])
                .areas(area);
            frame.render_widget(self.help_line(), help_area);
        }
    }

    fn help_line(&self) -> Line<'static> {
        let (key, text) = match self.context.mode() {
            Mode::Night => (Color::Rgb(180, 170, 255), Color::Rgb(150, 150, 170)),
            Mode::Day => (Color::Rgb(30, 90, 160), Color::Rgb(70, 80, 100)),
        };
        let next = self.theme.toggle().name();
        Line::from(vec![
            "q".bold().fg(key),
            " quit  ".fg(text),
            "t".bold().fg(key),
            format!(" {next} theme  ").fg(text),
            "h".bold().fg(key),
            " hide help".fg(text),
        ])
        .centered()
    }

    /// Reads the crossterm events and updates the state of [`App`].
    /// Keeps reading until the next frame is due, so input never speeds up
    /// the animation.
    fn handle_crossterm_events(&mut self) -> color_eyre::Result<()> {
        while self.running {
            let now = self.started.elapsed();
            if self.frame_timer.poll(now) {
                break;
            }
            if event::poll(self.frame_timer.remaining(now))? {
                match event::read()? {
                    Event::Key(key) if key.kind == KeyEventKind::Press => self.on_key_event(key),
                    Event::Resize(columns, rows) => self.resize(columns, rows),
                    _ => {}
                }
            }
        }
        Ok(())
    }

    /// Handles the key events and updates the state of [`App`].
    fn on_key_event(&mut self, key: KeyEvent) {
        match (key.modifiers, key.code) {
            (_, KeyCode::Esc | KeyCode::Char('q'))
            | (KeyModifiers::CONTROL, KeyCode::Char('c') | KeyCode::Char('C')) => self.quit(),
            (_, KeyCode::Char('t')) => self.toggle_theme(),
            (_, KeyCode::Char('h')) => self.show_help = !self.show_help,
            _ => {}
        }
    }

    fn frame_interval(&self) -> Duration {
        self.config.frame_interval()
    }

    /// Resize the animation to a new terminal size before the next frame.
    fn resize(&mut self, columns: u16, rows: u16) {
        self.cells = (columns, rows);
        self.context.resize(viewport_for(&self.config, columns, rows));
    }

    /// Switch the page theme, remember it and notify the animation.
    fn toggle_theme(&mut self) {
        self.theme = self.theme.toggle();
        self.config.theme = self.theme;
        self.save_config();
        let mode = self.context.on_theme_change(self.theme.is_light());
        info!(theme = self.theme.name(), ?mode, "theme changed");
    }

    fn save_config(&self) {
        let Some(path) = &self.config_path else {
            debug!("no usable config file, theme not saved");
            return;
        };
        if let Err(err) = self.config.save_to(path) {
            warn!(error = %err, "failed to persist theme");
        }
    }

    /// Set running to false to quit the application.
    fn quit(&mut self) {
        self.running = false;
    }
}
