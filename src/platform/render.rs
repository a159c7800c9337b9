//! Render frames
//!
//! The core never draws. Each frame it hands the host a list of sprites in
//! draw order, already culled to the viewport, plus the HUD strings.

use super::RenderSink;
use crate::sim::{Aabb, EntityKind, GamePhase, GameState};

/// What a sprite represents
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpriteKind {
    /// Background or foreground scenery, no gameplay effect
    Decoration,
    Entity(EntityKind),
}

/// One thing to draw, in world coordinates
#[derive(Debug, Clone, PartialEq)]
pub struct Sprite {
    pub kind: SpriteKind,
    /// Image name for the host's asset loader
    pub image: String,
    pub bounds: Aabb,
}

/// End-of-game text
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Overlay {
    pub title: &'static str,
    pub subtitle: &'static str,
    pub victory: bool,
}

impl Overlay {
    pub fn for_phase(phase: GamePhase) -> Option<Self> {
        match phase {
            GamePhase::Playing => None,
            GamePhase::GameOver => Some(Self {
                title: "Game Over",
                subtitle: "Click to restart game",
                victory: false,
            }),
            GamePhase::Victory => Some(Self {
                title: "Congratulations!",
                subtitle: "Click to start again",
                victory: true,
            }),
        }
    }
}

/// Everything the host needs to draw one frame
#[derive(Debug, Clone, PartialEq)]
pub struct RenderFrame {
    /// Visible world rectangle
    pub viewport: Aabb,
    /// Back to front
    pub sprites: Vec<Sprite>,
    pub score_text: String,
    pub overlay: Option<Overlay>,
}

impl RenderFrame {
    pub fn capture(state: &GameState) -> Self {
        let viewport = state.camera.visible(state.viewport_origin);
        let mut sprites = Vec::new();
        let mut push = |kind: SpriteKind, image: &str, bounds: Aabb| {
            if bounds.overlaps(&viewport) {
                sprites.push(Sprite {
                    kind,
                    image: image.to_string(),
                    bounds,
                });
            }
        };

        let entities = &state.entities;
        for &bounds in &entities.obstacles {
            push(SpriteKind::Entity(EntityKind::StaticObstacle), "platform", bounds);
        }
        for deco in &state.level.background {
            push(SpriteKind::Decoration, &deco.glyph.to_string(), deco.bounds);
        }
        for coin in &entities.collectibles {
            push(SpriteKind::Entity(EntityKind::Collectible), "coin", coin.bounds);
        }
        for &bounds in &entities.lethal_tiles {
            push(SpriteKind::Entity(EntityKind::LethalTile), "dont_touch", bounds);
        }
        push(
            SpriteKind::Entity(EntityKind::Player),
            "player_stand",
            entities.player.bounds(),
        );
        for hazard in &entities.hazards {
            push(
                SpriteKind::Entity(EntityKind::PatrolHazard),
                &hazard.sprite,
                hazard.bounds(),
            );
        }
        for deco in &state.level.foreground {
            push(SpriteKind::Decoration, &deco.glyph.to_string(), deco.bounds);
        }

        Self {
            viewport,
            sprites,
            score_text: format!("Score: {}", state.score),
            overlay: Overlay::for_phase(state.phase),
        }
    }
}

/// Logs frames instead of drawing them (headless runs)
#[derive(Debug, Default)]
pub struct LogRender {
    pub frames: u64,
    /// Log every n-th frame; 0 disables logging
    pub every: u64,
}

impl LogRender {
    pub fn new(every: u64) -> Self {
        Self { frames: 0, every }
    }
}

impl RenderSink for LogRender {
    fn render(&mut self, frame: &RenderFrame) {
        self.frames += 1;
        if self.every == 0 || self.frames % self.every != 0 {
            return;
        }
        log::info!(
            "frame {}: view x={} y={}, {} sprites, {}{}",
            self.frames,
            frame.viewport.left,
            frame.viewport.bottom,
            frame.sprites.len(),
            frame.score_text,
            frame
                .overlay
                .map(|o| format!(" [{}]", o.title))
                .unwrap_or_default()
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::settings::Settings;
    use crate::sim::BuiltinLevels;
    use glam::Vec2;

    fn state() -> GameState {
        GameState::new(Settings::default(), BuiltinLevels::new(64.0)).unwrap()
    }

    #[test]
    fn test_frame_contains_player_and_hud() {
        let state = state();
        let frame = RenderFrame::capture(&state);
        assert_eq!(frame.score_text, "Score: 0");
        assert_eq!(frame.overlay, None);
        assert_eq!(frame.viewport, Aabb::new(0.0, 1000.0, 0.0, 550.0));
        let players: Vec<_> = frame
            .sprites
            .iter()
            .filter(|s| s.kind == SpriteKind::Entity(EntityKind::Player))
            .collect();
        assert_eq!(players.len(), 1);
        assert_eq!(players[0].bounds, state.entities.player.bounds());
    }

    #[test]
    fn test_sprites_are_culled_to_viewport() {
        let state = state();
        let frame = RenderFrame::capture(&state);
        assert!(frame.sprites.iter().all(|s| s.bounds.overlaps(&frame.viewport)));
        let visible_tiles = frame
            .sprites
            .iter()
            .filter(|s| s.kind == SpriteKind::Entity(EntityKind::StaticObstacle))
            .count();
        assert!(visible_tiles < state.entities.obstacles.len());
    }

    #[test]
    fn test_draw_order_puts_foreground_last() {
        let mut state = state();
        state.viewport_origin = Vec2::new(0.0, 0.0);
        let frame = RenderFrame::capture(&state);
        let player_at = frame
            .sprites
            .iter()
            .position(|s| s.kind == SpriteKind::Entity(EntityKind::Player))
            .unwrap();
        let first_obstacle = frame
            .sprites
            .iter()
            .position(|s| s.kind == SpriteKind::Entity(EntityKind::StaticObstacle))
            .unwrap();
        assert!(first_obstacle < player_at);
        assert_eq!(frame.sprites.last().map(|s| s.kind), Some(SpriteKind::Decoration));
    }

    #[test]
    fn test_overlay_text() {
        let mut state = state();
        state.phase = GamePhase::GameOver;
        let overlay = RenderFrame::capture(&state).overlay.unwrap();
        assert_eq!(overlay.title, "Game Over");
        assert!(!overlay.victory);

        state.phase = GamePhase::Victory;
        let overlay = RenderFrame::capture(&state).overlay.unwrap();
        assert_eq!(overlay.title, "Congratulations!");
        assert_eq!(overlay.subtitle, "Click to start again");
    }

    #[test]
    fn test_log_render_counts_frames() {
        let state = state();
        let mut sink = LogRender::new(0);
        sink.render(&RenderFrame::capture(&state));
        sink.render(&RenderFrame::capture(&state));
        assert_eq!(sink.frames, 2);
    }
}
