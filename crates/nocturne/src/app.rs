use std::time::{Duration, Instant};

use chrono::Local;
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use nocturne_config::Config;
use nocturne_sky::{RendererSettings, ResizeMode, SkyRenderer};
use ratatui::{DefaultTerminal, Frame};

use crate::ui::Foreground;

/// The main application which holds the state and logic of the application.
#[derive(Debug)]
pub struct App {
    /// Is the application running?
    running: bool,
    /// The animated background.
    renderer: SkyRenderer,
    /// Time budget of one frame.
    frame_interval: Duration,
    /// Origin of the timestamps handed to the renderer.
    epoch: Instant,
}

impl App {
    /// Construct a new instance of [`App`].
    pub fn new(config: &Config) -> Self {
        let observable = config.display.observe_resize && crossterm::terminal::size().is_ok();
        let settings = RendererSettings {
            options: config.sky.clone(),
            ratio: config.display.pixel_ratio,
            resize_mode: if observable {
                ResizeMode::Observe
            } else {
                ResizeMode::Fixed
            },
            wash_blur: config.display.wash_blur,
            seed: None,
        };

        Self {
            running: false,
            renderer: SkyRenderer::detect(settings),
            frame_interval: config.frame_interval(),
            epoch: Instant::now(),
        }
    }

    /// Run the application's main loop.
    pub fn run(mut self, mut terminal: DefaultTerminal) -> color_eyre::Result<()> {
        self.running = true;
        self.renderer.start();
        if let Ok(size) = terminal.size() {
            self.renderer.observe_resize(size.width, size.height);
        }

        while self.running {
            let started = Instant::now();
            self.renderer.frame(self.now_ms());
            terminal.draw(|frame| self.render(frame))?;
            let timeout = self.frame_interval.saturating_sub(started.elapsed());
            self.handle_crossterm_events(timeout)?;
        }

        self.renderer.stop();
        Ok(())
    }

    fn now_ms(&self) -> f64 {
        self.epoch.elapsed().as_secs_f64() * 1000.0
    }

    /// Renders the sky, then the foreground on top of it.
    fn render(&self, frame: &mut Frame) {
        let area = frame.area();
        frame.render_widget(&self.renderer, area);
        frame.render_widget(&Foreground { now: Local::now() }, area);
    }

    /// Reads the crossterm events and updates the state of [`App`].
    /// Waits at most `timeout` so the next frame starts on time.
    fn handle_crossterm_events(&mut self, timeout: Duration) -> color_eyre::Result<()> {
        if event::poll(timeout)? {
            match event::read()? {
                Event::Key(key) if key.kind == KeyEventKind::Press => self.on_key_event(key),
                Event::Resize(cols, rows) => self.renderer.observe_resize(cols, rows),
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
            _ => {}
        }
    }

    /// Set running to false to quit the application.
    fn quit(&mut self) {
        self.running = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn app() -> App {
        let mut app = App::new(&Config::default());
        app.running = true;
        app
    }

    #[test]
    fn test_quit_keys() {
        for key in [
            KeyEvent::from(KeyCode::Char('q')),
            KeyEvent::from(KeyCode::Esc),
            KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL),
        ] {
            let mut app = app();
            app.on_key_event(key);
            assert!(!app.running, "{key:?} should quit");
        }
    }

    #[test]
    fn test_other_keys_keep_running() {
        let mut app = app();
        app.on_key_event(KeyEvent::from(KeyCode::Char('c')));
        app.on_key_event(KeyEvent::from(KeyCode::Char('x')));
        assert!(app.running);
    }

    #[test]
    fn test_frame_interval_follows_config() {
        let mut config = Config::default();
        config.display.frame_rate = 25;
        let app = App::new(&config);
        assert_eq!(app.frame_interval, Duration::from_millis(40));
    }
}
