//! The decoration of a single window.
//!
//! A [`Decoration`] is driven entirely by its host. The host feeds it
//! [`WindowEvent`]s, settings and configuration changes, and animation
//! ticks; the decoration answers by queueing [`HostRequest`]s, which the
//! host drains with [`Decoration::drain_requests`] and carries out.
//!
//! Geometry-affecting events do not recompute anything on the spot. They
//! mark the geometry as stale, and it is recomputed once, the next time it
//! is needed.

mod paint;

use std::cell::{Cell, RefCell};
use std::rc::Rc;
use std::time::Duration;

use tracing::{debug, instrument, trace, warn};

use crate::animation::Animation;
use crate::button::{Button, ButtonContext};
use crate::config::{DecorationConfig, DecorationSettings};
use crate::frame::{Geometry, GeometryModel};
use crate::paint::Painter;
use crate::shadow::{ShadowCache, ShadowDescriptor, ShadowKey};
use crate::theme::{colors_for, ColorSet};
use crate::types::{Color, Direction, Insets, Logical, PointF, Rect, Size};
use crate::window::{ButtonKind, WindowEvent, WindowState};

pub use crate::frame::ButtonLayout;

/// Something the host is asked to do on behalf of a decoration.
#[derive(Debug, Clone)]
pub enum HostRequest {
    /// Repaint this part of the decoration.
    Repaint(Rect),
    /// Repaint the whole decoration.
    RepaintAll,
    /// Use this shadow from now on. `None` removes the shadow.
    SetShadow(Option<Rc<ShadowDescriptor>>),
    /// Call [`Decoration::tick`] on the next frame.
    ScheduleTick,
}

impl PartialEq for HostRequest {
    fn eq(&self, other: &Self) -> bool {
        use HostRequest::*;
        match (self, other) {
            (Repaint(a), Repaint(b)) => a == b,
            (RepaintAll, RepaintAll) | (ScheduleTick, ScheduleTick) => true,
            (SetShadow(a), SetShadow(b)) => match (a, b) {
                (Some(a), Some(b)) => Rc::ptr_eq(a, b),
                (None, None) => true,
                _ => false,
            },
            _ => false,
        }
    }
}

/// The interface shared by decorations and their buttons.
pub trait DecorationElement {
    /// Paints the parts of the element inside `repaint`.
    fn paint(&self, painter: &mut dyn Painter, repaint: Rect);

    /// Whether `point` falls on the element.
    fn hit_test(&self, point: PointF) -> bool;

    /// The size of the element.
    fn computed_size(&self) -> Size<i32, Logical>;
}

/// The decoration of one window.
#[derive(Debug)]
pub struct Decoration {
    state: Option<WindowState>,
    config: DecorationConfig,
    settings: DecorationSettings,

    animation: Animation,
    shadow_cache: Rc<RefCell<ShadowCache>>,
    shadow_key: ShadowKey,
    shadow: Rc<ShadowDescriptor>,

    // recomputed lazily from paint and the geometry accessors
    geometry: RefCell<Geometry>,
    buttons: RefCell<Vec<Button>>,
    stale: Cell<bool>,

    requests: Vec<HostRequest>,
}

impl Decoration {
    /// Creates the decoration of the window in `state`.
    ///
    /// The shadow for `config` is acquired from `shadow_cache` right away,
    /// and handed to the host with the first batch of requests.
    #[instrument(target = "decoration", level = "trace", skip_all)]
    pub fn new(
        state: WindowState,
        config: DecorationConfig,
        settings: DecorationSettings,
        shadow_cache: Rc<RefCell<ShadowCache>>,
    ) -> Self {
        let shadow_key = ShadowKey::from_config(&config);
        let shadow = shadow_cache.borrow_mut().acquire(shadow_key);

        let mut animation = Animation::new(config.animations_duration);
        animation.set_enabled(config.animations_enabled);
        animation.set_progress(if state.active { 1.0 } else { 0.0 });

        let mut deco = Self {
            state: Some(state),
            config,
            settings,
            animation,
            shadow_cache,
            shadow_key,
            shadow: Rc::clone(&shadow),
            geometry: RefCell::new(Geometry::default()),
            buttons: RefCell::new(Vec::new()),
            stale: Cell::new(true),
            requests: Vec::new(),
        };
        deco.push_shadow();
        deco.request(HostRequest::RepaintAll);
        deco.flush();
        deco
    }

    /// The window snapshot, or `None` once the window is gone.
    pub fn window(&self) -> Option<&WindowState> {
        self.state.as_ref()
    }

    /// The current configuration.
    pub fn config(&self) -> &DecorationConfig {
        &self.config
    }

    /// The current host settings.
    pub fn settings(&self) -> &DecorationSettings {
        &self.settings
    }

    /// The shadow in use.
    pub fn shadow(&self) -> &Rc<ShadowDescriptor> {
        &self.shadow
    }

    /// The focus animation.
    pub fn animation(&self) -> &Animation {
        &self.animation
    }

    /// Takes every request queued since the last call.
    pub fn drain_requests(&mut self) -> Vec<HostRequest> {
        std::mem::take(&mut self.requests)
    }

    fn request(&mut self, req: HostRequest) {
        if !self.requests.contains(&req) {
            self.requests.push(req);
        }
    }

    fn mark_stale(&self) {
        self.stale.set(true);
    }

    //* Geometry *//

    /// Recomputes stale geometry. Does nothing if nothing changed.
    #[instrument(target = "frame", level = "trace", skip_all)]
    pub fn flush(&self) {
        if !self.stale.replace(false) {
            return
        }
        let Some(state) = self.state.as_ref() else {
            trace!(target: "frame", "no window, keeping old geometry");
            return
        };

        let geometry = GeometryModel::new(state, &self.config, &self.settings).compute();
        debug!(
            target: "frame",
            "borders {:?}, title bar {:?}, {} buttons",
            geometry.borders, geometry.title_bar, geometry.buttons.len()
        );

        let mut buttons = self.buttons.borrow_mut();
        let mut old = std::mem::take(&mut *buttons);
        let ctx = self.button_context();
        for cell in geometry.buttons.iter() {
            let button = match old.iter().position(|b| b.kind() == cell.kind) {
                Some(idx) => {
                    let mut b = old.swap_remove(idx);
                    b.set_cell(*cell);
                    b
                }
                None => {
                    let mut b = Button::new(*cell);
                    b.configure(&self.config);
                    sync_checked(&mut b, state);
                    b
                }
            };
            buttons.push(button);
        }
        for b in buttons.iter_mut() {
            b.set_context(ctx);
        }

        *self.geometry.borrow_mut() = geometry;
    }

    /// The current geometry.
    pub fn geometry(&self) -> Geometry {
        self.flush();
        self.geometry.borrow().clone()
    }

    /// The visible borders.
    pub fn computed_borders(&self) -> Insets {
        self.flush();
        self.geometry.borrow().borders
    }

    /// The margins outside the borders that still resize the window.
    pub fn computed_resize_borders(&self) -> Insets {
        self.flush();
        self.geometry.borrow().resize_borders
    }

    /// The button cells, for routing input.
    pub fn button_hit_rects(&self) -> ButtonLayout {
        self.flush();
        self.geometry.borrow().buttons.clone()
    }

    /// Whether the decoration is fully opaque, which it is while maximized.
    pub fn is_opaque(&self) -> bool {
        self.state
            .as_ref()
            .map(|s| GeometryModel::new(s, &self.config, &self.settings).is_maximized())
            .unwrap_or(false)
    }

    //* Colors *//

    /// The palette of the configured theme.
    pub fn colors(&self) -> &'static ColorSet {
        colors_for(self.config.theme)
    }

    /// The title bar color.
    pub fn title_bar_color(&self) -> Color {
        self.colors().title_bar
    }

    /// The frame outline color.
    pub fn outline_color(&self) -> Color {
        self.colors().outline
    }

    /// The color of the shading along the top of the title bar.
    pub fn highlight_color(&self) -> Color {
        self.colors().highlight
    }

    /// The caption color, faded between inactive and active while
    /// focus changes.
    pub fn font_color(&self) -> Color {
        let active = self.state.as_ref().map(|s| s.active).unwrap_or(false);
        let progress = self.animation.is_running().then(|| self.animation.value());
        self.colors().font_color(active, progress)
    }

    fn button_context(&self) -> ButtonContext {
        ButtonContext {
            colors: self.colors(),
            icon_style: self.config.icon_style,
            window_active: self.state.as_ref().map(|s| s.active),
            font_color: self.font_color(),
        }
    }

    fn sync_buttons(&mut self) {
        let ctx = self.button_context();
        for b in self.buttons.get_mut().iter_mut() {
            b.set_context(ctx);
        }
    }

    //* Host input *//

    /// Applies a change to the window.
    #[instrument(target = "decoration", level = "trace", skip(self))]
    pub fn on_window_state_changed(&mut self, event: WindowEvent) {
        let Some(state) = self.state.as_mut() else {
            warn!(target: "decoration", "{:?} after the window was released", event);
            return
        };

        match event {
            WindowEvent::Released => {
                debug!(target: "decoration", "window released");
                self.state = None;
                self.animation.stop();
                self.sync_buttons();
                self.request(HostRequest::RepaintAll);
                return
            }
            WindowEvent::ActiveChanged(active) => {
                if state.active == active {
                    return
                }
                state.active = active;
                self.update_animation_state();
                self.sync_buttons();
                return
            }
            WindowEvent::CaptionChanged(caption) => {
                self.flush();
                let old = self.geometry.get_mut().caption;
                if let Some(state) = self.state.as_mut() {
                    state.caption = caption;
                }
                self.mark_stale();
                self.flush();
                let new = self.geometry.get_mut().caption;

                let dirty = old.united(&new);
                if !dirty.is_empty() {
                    self.request(HostRequest::Repaint(dirty));
                }
                return
            }
            WindowEvent::WidthChanged(width) => state.width = width,
            WindowEvent::HeightChanged(height) => state.height = height,
            WindowEvent::MaximizedChanged { horizontal, vertical } => {
                state.maximized_horizontally = horizontal;
                state.maximized_vertically = vertical;
            }
            WindowEvent::ShadedChanged(shaded) => state.shaded = shaded,
            WindowEvent::AdjacentEdgesChanged(edges) => state.adjacent_edges = edges,
            WindowEvent::CapabilitiesChanged(caps) => state.capabilities = caps,
        }

        if let Some(state) = self.state.as_ref() {
            for b in self.buttons.get_mut().iter_mut() {
                sync_checked(b, state);
            }
        }
        self.mark_stale();
        self.request(HostRequest::RepaintAll);
    }

    /// Applies new host settings.
    pub fn on_settings_changed(&mut self, settings: DecorationSettings) {
        self.settings = settings;
        self.mark_stale();
        self.request(HostRequest::RepaintAll);
    }

    /// Applies a new configuration.
    ///
    /// If the shadow parameters changed, the old shadow is released and
    /// the new one acquired and handed to the host.
    #[instrument(target = "decoration", level = "trace", skip_all)]
    pub fn on_configuration_reconfigured(&mut self, config: DecorationConfig) {
        self.animation.set_duration(config.animations_duration);
        self.animation.set_enabled(config.animations_enabled);
        if !config.animations_enabled {
            self.snap_animation();
        }
        for b in self.buttons.get_mut().iter_mut() {
            b.configure(&config);
        }

        let key = ShadowKey::from_config(&config);
        if key != self.shadow_key {
            debug!(target: "decoration", "shadow changed to {:?}", key);
            let mut cache = self.shadow_cache.borrow_mut();
            self.shadow = cache.acquire(key);
            cache.release(self.shadow_key);
            drop(cache);
            self.shadow_key = key;
            self.push_shadow();
        }

        self.config = config;
        self.sync_buttons();
        self.mark_stale();
        self.request(HostRequest::RepaintAll);
    }

    fn push_shadow(&mut self) {
        let shadow = (!self.shadow.is_empty()).then(|| Rc::clone(&self.shadow));
        self.request(HostRequest::SetShadow(shadow));
    }

    fn update_animation_state(&mut self) {
        if self.config.animations_enabled {
            let active = self.state.as_ref().map(|s| s.active).unwrap_or(false);
            let direction = if active { Direction::Forward } else { Direction::Backward };
            self.animation.set_direction(direction);
            if self.animation.start() {
                self.request(HostRequest::ScheduleTick);
            }
        } else {
            self.snap_animation();
        }
        self.request(HostRequest::RepaintAll);
    }

    fn snap_animation(&mut self) {
        let active = self.state.as_ref().map(|s| s.active).unwrap_or(false);
        self.animation.set_progress(if active { 1.0 } else { 0.0 });
    }

    /// Advances every running animation by `elapsed`.
    ///
    /// Returns whether any animation is still running, in which case a
    /// further tick has been requested.
    pub fn tick(&mut self, elapsed: Duration) -> bool {
        let mut running = false;

        if self.animation.is_running() {
            let progress = self.animation.advance(elapsed);
            trace!(target: "decoration", "focus animation at {}", progress);
            running |= self.animation.is_running();
            self.request(HostRequest::RepaintAll);
        }

        let mut dirty = Vec::new();
        for b in self.buttons.get_mut().iter_mut() {
            if b.is_animating() {
                running |= b.advance(elapsed);
                dirty.push(b.geometry());
            }
        }
        for rect in dirty {
            self.request(HostRequest::Repaint(rect));
        }

        self.sync_buttons();
        if running {
            self.request(HostRequest::ScheduleTick);
        }
        running
    }

    /// Whether any animation is running.
    pub fn is_animating(&self) -> bool {
        self.animation.is_running() || self.buttons.borrow().iter().any(|b| b.is_animating())
    }

    //* Buttons *//

    /// Applies `f` to the first button of `kind`, repainting it if `f` returns true.
    fn with_button<F>(&mut self, kind: ButtonKind, f: F)
    where
        F: FnOnce(&mut Button) -> bool,
    {
        self.flush();
        let Some(button) = self.buttons.get_mut().iter_mut().find(|b| b.kind() == kind) else {
            trace!(target: "decoration", "no {} button", kind);
            return
        };
        if f(button) {
            let rect = button.geometry();
            let animating = button.is_animating();
            self.request(HostRequest::Repaint(rect));
            if animating {
                self.request(HostRequest::ScheduleTick);
            }
        }
    }

    /// Sets whether the pointer is over the button of `kind`.
    pub fn set_button_hovered(&mut self, kind: ButtonKind, hovered: bool) {
        if self.state.is_none() {
            return
        }
        self.with_button(kind, |b| b.set_hovered(hovered));
    }

    /// Sets whether the button of `kind` is held down.
    pub fn set_button_pressed(&mut self, kind: ButtonKind, pressed: bool) {
        self.with_button(kind, |b| b.set_pressed(pressed));
    }

    /// Sets whether the button of `kind` is toggled on.
    pub fn set_button_checked(&mut self, kind: ButtonKind, checked: bool) {
        self.with_button(kind, |b| b.set_checked(checked));
    }

    /// Hovers the button under `point`, if any, and unhovers the rest.
    pub fn pointer_moved(&mut self, point: PointF) {
        self.flush();
        let kinds: Vec<(ButtonKind, bool)> = self
            .buttons
            .get_mut()
            .iter()
            .map(|b| (b.kind(), b.geometry().to_f32().contains_point(point)))
            .collect();
        for (kind, inside) in kinds {
            self.set_button_hovered(kind, inside);
        }
    }

    /// Unhovers every button.
    pub fn pointer_left(&mut self) {
        let kinds: Vec<ButtonKind> = self.buttons.get_mut().iter().map(|b| b.kind()).collect();
        for kind in kinds {
            self.set_button_hovered(kind, false);
        }
    }

    /// Runs `f` on the button of `kind`, if there is one.
    pub fn inspect_button<F, T>(&self, kind: ButtonKind, f: F) -> Option<T>
    where
        F: FnOnce(&Button) -> T,
    {
        self.flush();
        self.buttons.borrow().iter().find(|b| b.kind() == kind).map(f)
    }
}

// The maximize and shade buttons show the window's state.
fn sync_checked(button: &mut Button, state: &WindowState) {
    match button.kind() {
        ButtonKind::Maximize => {
            button.set_checked(state.is_maximized());
        }
        ButtonKind::Shade => {
            button.set_checked(state.shaded);
        }
        _ => {}
    }
}

impl DecorationElement for Decoration {
    fn paint(&self, painter: &mut dyn Painter, repaint: Rect) {
        self.flush();
        paint::paint(self, painter, repaint);
    }

    fn hit_test(&self, point: PointF) -> bool {
        self.flush();
        let geom = self.geometry.borrow();
        let r = geom.resize_borders;
        Rect::from_size(geom.size)
            .adjusted(-r.left, -r.top, r.right, r.bottom)
            .to_f32()
            .contains_point(point)
    }

    fn computed_size(&self) -> Size<i32, Logical> {
        self.flush();
        self.geometry.borrow().size
    }
}

impl Drop for Decoration {
    fn drop(&mut self) {
        trace!(target: "decoration", "releasing shadow {:?}", self.shadow_key);
        match self.shadow_cache.try_borrow_mut() {
            Ok(mut cache) => cache.release(self.shadow_key),
            Err(_) => warn!(target: "decoration", "shadow cache busy, leaking {:?}", self.shadow_key),
        }
    }
}

#[cfg(test)]
mod tests;
