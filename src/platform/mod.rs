//! Platform abstraction layer
//!
//! The simulation never draws, schedules or measures anything itself. A host
//! (windowing toolkit, terminal, test harness) provides:
//! - Timer scheduling
//! - Sprite and widget drawing
//! - Screen metrics
//!
//! Input arrives the other way: the host calls `Game::on_primary_input` and
//! `Game::on_button_released`.

pub mod headless;

pub use headless::{HeadlessHost, HostCall};

use glam::Vec2;

use crate::sim::{EntityId, ImageRef};

/// Handle of a repeating timer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TimerHandle(pub u32);

/// Handle of a label or button
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct WidgetHandle(pub u32);

/// A clickable button; release events come back via its handle
#[derive(Debug, Clone, PartialEq)]
pub struct ButtonSpec {
    pub text: String,
    pub pos: Vec2,
    pub size: Vec2,
    pub font_size: f32,
}

pub trait Scheduler {
    /// Start calling the game's `on_timer` every `interval_secs`
    fn schedule_repeating(&mut self, interval_secs: f32) -> TimerHandle;
    fn cancel(&mut self, handle: TimerHandle);
}

pub trait Renderer {
    /// Create or move the sprite linked to `sprite`
    fn draw_sprite(&mut self, sprite: EntityId, image: &ImageRef, pos: Vec2, size: Vec2);
    fn remove_sprite(&mut self, sprite: EntityId);
    fn create_label(&mut self, text: &str, pos: Vec2) -> WidgetHandle;
    fn create_button(&mut self, button: &ButtonSpec) -> WidgetHandle;
    fn remove_widget(&mut self, handle: WidgetHandle);
}

pub trait ScreenMetrics {
    fn width(&self) -> f32;
    fn height(&self) -> f32;
}

/// Everything a game needs from its host
pub trait Host: Scheduler + Renderer + ScreenMetrics {}

impl<T: Scheduler + Renderer + ScreenMetrics> Host for T {}
