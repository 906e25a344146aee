use color_eyre::Result;
use ratatui::{Terminal, backend::CrosstermBackend};
use std::time::{Duration, Instant};

use crate::entities::GamePhase;
use crate::input::{InputAction, InputManager};
use crate::physics::AabbCollisions;
use crate::renderer::{GameRenderer, RenderView};
use crate::session::{Command, Session};

/// Frame budget for the cooperative ~60 FPS loop.
const FRAME_SLEEP: Duration = Duration::from_millis(16);

/// The main application: owns the simulation session and the terminal-facing
/// pieces that stand in for a host engine (input, broad phase, renderer).
pub struct App {
    running: bool,
    session: Session,
    detector: AabbCollisions,
    /// internal components
    input_manager: InputManager,
    renderer: GameRenderer,
    /// Frames info
    frame_count: u64,
    epoch: Instant,
    last_frame_time: Instant,
    fps: u32,
}

impl Default for App {
    fn default() -> Self {
        Self::new()
    }
}

impl App {
    /// Construct a new instance of [`App`].
    pub fn new() -> Self {
        let now = Instant::now();
        Self {
            running: true,
            session: Session::new(),
            detector: AabbCollisions,
            input_manager: InputManager::new(),
            renderer: GameRenderer::new(),
            frame_count: 0,
            epoch: now,
            last_frame_time: now,
            fps: 0,
        }
    }

    /// Run the application's main loop.
    pub fn run(mut self, terminal: &mut Terminal<CrosstermBackend<std::io::Stdout>>) -> Result<()> {
        while self.running {
            // Calculate FPS
            let now = Instant::now();
            let frame_time = now.duration_since(self.last_frame_time);
            self.last_frame_time = now;
            if frame_time.as_micros() > 0 {
                self.fps = (1_000_000 / frame_time.as_micros()) as u32;
            }
            self.frame_count += 1;

            // Render the frame
            terminal.draw(|frame| {
                let view = RenderView {
                    phase: self.session.phase,
                    state: &self.session.state,
                    player: &self.session.player,
                    aliens: &self.session.formation.aliens,
                    bullets: &self.session.bullets,
                    barriers: &self.session.barriers,
                    explosions: &self.session.explosions,
                    area: frame.area(),
                    frames: self.frame_count,
                    fps: self.fps,
                };
                self.renderer.render(frame, &view);
            })?;

            // Poll input events and translate them into actions
            self.input_manager.poll_events(&self.session.phase)?;
            let actions = self.input_manager.get_actions(&self.session.phase);
            let commands = self.process_actions(&actions);

            // Tick the simulation; frozen screens simply skip it
            if self.session.phase == GamePhase::Playing {
                let now_ms = self.epoch.elapsed().as_millis() as u64;
                self.session.update(1.0, now_ms, &commands, &self.detector);
            }

            // Small sleep to maintain ~60 FPS and prevent CPU spinning
            std::thread::sleep(FRAME_SLEEP);
        }
        Ok(())
    }

    /// Routes one-shot scene actions and collects this frame's ship commands.
    fn process_actions(&mut self, actions: &[InputAction]) -> Vec<Command> {
        let mut commands = Vec::new();
        for action in actions {
            match action {
                InputAction::Quit => self.running = false,
                InputAction::Continue => self.session.confirm_continue(),
                InputAction::Decline => self.session.decline_continue(),
                InputAction::Restart => self.session.restart(),
                InputAction::MoveLeft => commands.push(Command::MoveLeft),
                InputAction::MoveRight => commands.push(Command::MoveRight),
                InputAction::Fire => commands.push(Command::Fire),
            }
        }
        commands
    }
}
