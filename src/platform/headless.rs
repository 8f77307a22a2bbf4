//! Headless host
//!
//! Keeps the latest state of every sprite and widget in memory and records
//! all non-draw calls. Drives the native runner and the driver tests.

use std::collections::HashMap;

use glam::Vec2;

use super::{ButtonSpec, Renderer, ScreenMetrics, Scheduler, TimerHandle, WidgetHandle};
use crate::sim::{EntityId, ImageRef};

/// A recorded host call (sprite draws are only counted)
#[derive(Debug, Clone, PartialEq)]
pub enum HostCall {
    Schedule { handle: TimerHandle, interval_secs: f32 },
    Cancel(TimerHandle),
    RemoveSprite(EntityId),
    CreateLabel { handle: WidgetHandle, text: String },
    CreateButton { handle: WidgetHandle, text: String },
    RemoveWidget(WidgetHandle),
}

#[derive(Debug, Clone, PartialEq)]
pub struct Sprite {
    pub image: ImageRef,
    pub pos: Vec2,
    pub size: Vec2,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Widget {
    Label { text: String, pos: Vec2 },
    Button(ButtonSpec),
}

pub struct HeadlessHost {
    width: f32,
    height: f32,
    next_handle: u32,
    timers: HashMap<TimerHandle, f32>,
    sprites: HashMap<EntityId, Sprite>,
    widgets: HashMap<WidgetHandle, Widget>,
    calls: Vec<HostCall>,
    draw_calls: u64,
}

impl HeadlessHost {
    pub fn new(width: f32, height: f32) -> Self {
        Self {
            width,
            height,
            next_handle: 1,
            timers: HashMap::new(),
            sprites: HashMap::new(),
            widgets: HashMap::new(),
            calls: Vec::new(),
            draw_calls: 0,
        }
    }

    fn next_handle(&mut self) -> u32 {
        let h = self.next_handle;
        self.next_handle += 1;
        h
    }

    /// Interval of the running timer, if exactly one is scheduled
    pub fn active_interval(&self) -> Option<f32> {
        match self.timers.len() {
            1 => self.timers.values().next().copied(),
            _ => None,
        }
    }

    pub fn timer_count(&self) -> usize {
        self.timers.len()
    }

    pub fn sprites(&self) -> &HashMap<EntityId, Sprite> {
        &self.sprites
    }

    pub fn widgets(&self) -> &HashMap<WidgetHandle, Widget> {
        &self.widgets
    }

    /// First live button with the given label
    pub fn find_button(&self, text: &str) -> Option<WidgetHandle> {
        self.widgets.iter().find_map(|(handle, widget)| match widget {
            Widget::Button(spec) if spec.text == text => Some(*handle),
            _ => None,
        })
    }

    pub fn calls(&self) -> &[HostCall] {
        &self.calls
    }

    pub fn count_calls(&self, pred: impl Fn(&HostCall) -> bool) -> usize {
        self.calls.iter().filter(|c| pred(*c)).count()
    }

    pub fn draw_calls(&self) -> u64 {
        self.draw_calls
    }
}

impl Scheduler for HeadlessHost {
    fn schedule_repeating(&mut self, interval_secs: f32) -> TimerHandle {
        let handle = TimerHandle(self.next_handle());
        self.timers.insert(handle, interval_secs);
        self.calls.push(HostCall::Schedule {
            handle,
            interval_secs,
        });
        handle
    }

    fn cancel(&mut self, handle: TimerHandle) {
        if self.timers.remove(&handle).is_none() {
            log::warn!("Cancel of unknown timer {:?}", handle);
        }
        self.calls.push(HostCall::Cancel(handle));
    }
}

impl Renderer for HeadlessHost {
    fn draw_sprite(&mut self, sprite: EntityId, image: &ImageRef, pos: Vec2, size: Vec2) {
        self.draw_calls += 1;
        let entry = self.sprites.entry(sprite).or_insert_with(|| Sprite {
            image: image.clone(),
            pos,
            size,
        });
        entry.pos = pos;
        entry.size = size;
    }

    fn remove_sprite(&mut self, sprite: EntityId) {
        self.sprites.remove(&sprite);
        self.calls.push(HostCall::RemoveSprite(sprite));
    }

    fn create_label(&mut self, text: &str, pos: Vec2) -> WidgetHandle {
        let handle = WidgetHandle(self.next_handle());
        self.widgets.insert(
            handle,
            Widget::Label {
                text: text.to_string(),
                pos,
            },
        );
        self.calls.push(HostCall::CreateLabel {
            handle,
            text: text.to_string(),
        });
        handle
    }

    fn create_button(&mut self, button: &ButtonSpec) -> WidgetHandle {
        let handle = WidgetHandle(self.next_handle());
        self.widgets.insert(handle, Widget::Button(button.clone()));
        self.calls.push(HostCall::CreateButton {
            handle,
            text: button.text.clone(),
        });
        handle
    }

    fn remove_widget(&mut self, handle: WidgetHandle) {
        self.widgets.remove(&handle);
        self.calls.push(HostCall::RemoveWidget(handle));
    }
}

impl ScreenMetrics for HeadlessHost {
    fn width(&self) -> f32 {
        self.width
    }

    fn height(&self) -> f32 {
        self.height
    }
}
