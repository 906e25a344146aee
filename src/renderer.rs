use rand::Rng;
use ratatui::{
    Frame,
    layout::{Alignment, Rect},
    style::{Color, Modifier, Style, Stylize},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
};

use crate::entities::{Alien, BarrierBlock, Bullet, BulletOwner, Explosion, GamePhase, GameState, Player};
use crate::session::{FIELD_HEIGHT, FIELD_WIDTH};

/// Wave tints, cycled by level.
const LEVEL_TINTS: [Color; 6] = [
    Color::Rgb(255, 255, 255),
    Color::Rgb(0, 255, 0),
    Color::Rgb(255, 0, 0),
    Color::Rgb(0, 102, 255),
    Color::Rgb(245, 176, 65),
    Color::Rgb(153, 0, 255),
];

/// View struct that holds all game state needed for rendering
pub struct RenderView<'a> {
    pub phase: GamePhase,
    pub state: &'a GameState,
    pub player: &'a Player,
    pub aliens: &'a [Alien],
    pub bullets: &'a [Bullet],
    pub barriers: &'a [BarrierBlock],
    pub explosions: &'a [Explosion],
    pub area: Rect,
    pub frames: u64,
    pub fps: u32,
}

/// Maps a world position onto the terminal cell grid.
fn project(area: Rect, x: f32, y: f32) -> Option<(u16, u16)> {
    if !(0.0..FIELD_WIDTH).contains(&x) || !(0.0..FIELD_HEIGHT).contains(&y) {
        return None;
    }
    let cx = (x / FIELD_WIDTH * area.width as f32) as u16;
    let cy = (y / FIELD_HEIGHT * area.height as f32) as u16;
    if cx >= area.width || cy >= area.height {
        return None;
    }
    Some((area.x + cx, area.y + cy))
}

/// Handles all rendering responsibilities for the game
pub struct GameRenderer {}

impl Default for GameRenderer {
    fn default() -> Self {
        Self::new()
    }
}

impl GameRenderer {
    pub fn new() -> Self {
        Self {}
    }

    /// Main render method that dispatches to phase-specific renderers
    pub fn render(&self, frame: &mut Frame, view: &RenderView) {
        match view.phase {
            GamePhase::Playing => self.render_playing(frame, view),
            GamePhase::AwaitingContinue => self.render_continue_prompt(frame, view),
            GamePhase::GameOver => self.render_game_over(frame, view),
        }
    }

    /// Renders the active battlefield screen
    fn render_playing(&self, frame: &mut Frame, view: &RenderView) {
        let area = view.area;

        // Flickering starfield background
        if view.frames % 10 < 5 {
            let mut rng = rand::rng();
            let star_text = (0..area.height)
                .map(|_| if rng.random_bool(0.05) { "." } else { " " })
                .collect::<Vec<_>>()
                .join("\n");
            frame.render_widget(
                Paragraph::new(star_text).style(Style::default().fg(Color::DarkGray)),
                area,
            );
        }

        let buffer = frame.buffer_mut();

        // Aliens, tinted by the current wave
        let tint = LEVEL_TINTS[(view.state.level as usize - 1) % LEVEL_TINTS.len()];
        for alien in view.aliens {
            if let Some((cx, cy)) = project(area, alien.x, alien.y)
                && cx > area.x
                && cx + 1 < area.x + area.width
            {
                buffer.set_string(
                    cx - 1,
                    cy,
                    "\\o/",
                    Style::default().fg(tint).add_modifier(Modifier::BOLD),
                );
            }
        }

        // Barrier blocks, colored by remaining health
        for block in view.barriers {
            if let Some((cx, cy)) = project(area, block.x, block.y) {
                let color = match block.health {
                    3 => Color::Green,
                    2 => Color::Yellow,
                    _ => Color::Red,
                };
                buffer.set_string(cx, cy, "#", Style::default().fg(color));
            }
        }

        // Bullets
        for bullet in view.bullets {
            if let Some((cx, cy)) = project(area, bullet.x, bullet.y) {
                let (glyph, color) = match bullet.owner {
                    BulletOwner::Player => ("|", Color::Yellow),
                    BulletOwner::Alien => ("!", Color::Magenta),
                };
                buffer.set_string(cx, cy, glyph, Style::default().fg(color));
            }
        }

        // Explosions fade out as their lifetime runs down
        for explosion in view.explosions {
            if let Some((cx, cy)) = project(area, explosion.x, explosion.y) {
                let color = if explosion.ttl > 20 {
                    Color::Red
                } else if explosion.ttl > 10 {
                    Color::LightRed
                } else {
                    Color::Yellow
                };
                buffer.set_string(
                    cx,
                    cy,
                    "*",
                    Style::default().fg(color).add_modifier(Modifier::BOLD),
                );
            }
        }

        // Player ship
        if let Some((cx, cy)) = project(area, view.player.x, view.player.y)
            && cx > area.x
            && cx + 1 < area.x + area.width
        {
            buffer.set_string(
                cx - 1,
                cy,
                "/^\\",
                Style::default()
                    .fg(Color::Green)
                    .add_modifier(Modifier::BOLD),
            );
        }

        // Stats overlay at the top
        let stats = Line::from(vec![
            Span::styled("Score: ", Style::default().fg(Color::DarkGray)),
            Span::styled(
                format!("{}", view.state.score),
                Style::default()
                    .fg(Color::Yellow)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::styled("  Lives: ", Style::default().fg(Color::DarkGray)),
            Span::styled(
                format!("{}", view.state.lives),
                if view.state.lives > 1 {
                    Style::default()
                        .fg(Color::Green)
                        .add_modifier(Modifier::BOLD)
                } else {
                    Style::default().fg(Color::Red).add_modifier(Modifier::BOLD)
                },
            ),
            Span::styled("  Level: ", Style::default().fg(Color::DarkGray)),
            Span::styled(
                format!("{}", view.state.level),
                Style::default()
                    .fg(Color::Cyan)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::styled("  Continues: ", Style::default().fg(Color::DarkGray)),
            Span::styled(
                format!("{}", view.state.continues_left),
                Style::default()
                    .fg(Color::White)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::styled("  FPS: ", Style::default().fg(Color::DarkGray)),
            Span::styled(
                format!("{}", view.fps),
                Style::default()
                    .fg(Color::White)
                    .add_modifier(Modifier::BOLD),
            ),
        ]);

        let stats_area = Rect {
            x: area.x + 1,
            y: area.y,
            width: area.width.saturating_sub(2),
            height: 1,
        };
        frame.render_widget(Paragraph::new(stats), stats_area);

        // Controls hint at bottom
        let controls = Line::from(vec![Span::styled(
            "[AD/Arrows: Move] [Space: Fire] [Q: Quit]",
            Style::default().fg(Color::DarkGray),
        )]);

        let controls_area = Rect {
            x: area.x + 1,
            y: area.y + area.height.saturating_sub(1),
            width: area.width.saturating_sub(2),
            height: 1,
        };
        frame.render_widget(Paragraph::new(controls).centered(), controls_area);
    }

    /// Renders the continue prompt over the frozen battlefield
    fn render_continue_prompt(&self, frame: &mut Frame, view: &RenderView) {
        self.render_playing(frame, view);

        let area = view.area;
        let prompt_text = vec![
            Line::from(""),
            Line::from(format!("Continues left: {}", view.state.continues_left))
                .centered()
                .yellow()
                .bold(),
            Line::from(format!(
                "Score: {}   Level: {}",
                view.state.score, view.state.level
            ))
            .centered()
            .white(),
            Line::from(""),
            Line::from("Press C to continue, Q to give up")
                .centered()
                .white(),
        ];

        let prompt_area = Rect {
            x: area.x + area.width.saturating_sub(42) / 2,
            y: area.y + area.height.saturating_sub(7) / 2,
            width: 42.min(area.width),
            height: 7.min(area.height),
        };

        frame.render_widget(
            Paragraph::new(prompt_text)
                .block(
                    Block::default()
                        .borders(Borders::ALL)
                        .border_style(Style::default().fg(Color::Yellow)),
                )
                .alignment(Alignment::Center),
            prompt_area,
        );
    }

    /// Renders the game over screen
    fn render_game_over(&self, frame: &mut Frame, view: &RenderView) {
        let area = view.area;

        let game_over_text = vec![
            Line::from(""),
            Line::from("╔═══════════════════════════╗").centered().red(),
            Line::from("║        GAME OVER!         ║")
                .centered()
                .red()
                .bold(),
            Line::from("╚═══════════════════════════╝").centered().red(),
            Line::from(""),
            Line::from(format!("Final Score: {}", view.state.score))
                .centered()
                .yellow()
                .bold(),
            Line::from(format!("Level Reached: {}", view.state.level))
                .centered()
                .cyan()
                .bold(),
            Line::from(""),
            Line::from("Press R to restart").centered().white(),
            Line::from("Press Q to quit").centered().white(),
        ];

        frame.render_widget(
            Paragraph::new(game_over_text)
                .block(Block::default().borders(Borders::ALL))
                .alignment(Alignment::Center),
            area,
        );
    }
}
