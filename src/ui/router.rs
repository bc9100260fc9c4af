use crate::event::events::Event;
use crate::ui::context::AppContext;
use crate::ui::state::AppState;
use crate::ui::traits::{Action, View};
use ratatui::Frame;
use ratatui::crossterm::event::KeyEvent;
use ratatui::layout::Rect;

#[derive(Default)]
pub struct Router {
    pub stack: Vec<Box<dyn View>>,
    pub overlay: Option<Box<dyn View>>,
}

impl Router {
    pub fn new() -> Self {
        Self::default()
    }

    /// Drops every view and mounts `view` as the only one.
    pub async fn reset(
        &mut self,
        mut view: Box<dyn View>,
        state: &AppState,
        ctx: &AppContext,
    ) -> Option<Action> {
        self.overlay = None;
        self.stack.clear();
        let action = view.on_mount(state, ctx).await;
        self.stack.push(view);
        action
    }

    pub fn clear(&mut self) {
        self.overlay = None;
        self.stack.clear();
    }

    pub async fn set_overlay(
        &mut self,
        mut view: Box<dyn View>,
        state: &AppState,
        ctx: &AppContext,
    ) -> Option<Action> {
        let action = view.on_mount(state, ctx).await;
        self.overlay = Some(view);
        action
    }

    pub fn clear_overlay(&mut self) {
        self.overlay = None;
    }

    pub fn has_overlay(&self) -> bool {
        self.overlay.is_some()
    }

    pub fn active_view(&self) -> Option<&dyn View> {
        match &self.overlay {
            Some(overlay) => Some(overlay.as_ref()),
            None => self.stack.last().map(|v| v.as_ref()),
        }
    }

    pub fn render(&mut self, f: &mut Frame, area: Rect, state: &AppState, ctx: &AppContext) {
        if let Some(view) = self.stack.last_mut() {
            view.render(f, area, state, ctx);
        }
        if let Some(overlay) = &mut self.overlay {
            overlay.render(f, area, state, ctx);
        }
    }

    pub async fn handle_input(
        &mut self,
        key: KeyEvent,
        state: &AppState,
        ctx: &AppContext,
    ) -> Option<Action> {
        if let Some(overlay) = &mut self.overlay {
            overlay.handle_input(key, state, ctx).await
        } else if let Some(view) = self.stack.last_mut() {
            view.handle_input(key, state, ctx).await
        } else {
            None
        }
    }

    pub fn handle_paste(&mut self, text: &str) -> Option<Action> {
        if let Some(overlay) = &mut self.overlay {
            overlay.on_paste(text)
        } else if let Some(view) = self.stack.last_mut() {
            view.on_paste(text)
        } else {
            None
        }
    }

    /// Every view sees every event; stack views answer before the overlay.
    pub async fn on_event(&mut self, event: &Event, state: &AppState, ctx: &AppContext) -> Vec<Action> {
        let mut actions = Vec::new();
        for view in &mut self.stack {
            if let Some(action) = view.on_event(event, state, ctx).await {
                actions.push(action);
            }
        }

        if let Some(overlay) = &mut self.overlay {
            if let Some(action) = overlay.on_event(event, state, ctx).await {
                actions.push(action);
            }
        }
        actions
    }
}
