use super::*;

use crate::config::{ShadowSize, Theme, NO_CHECKS};
use crate::paint::testing::{Op, RecordingPainter};
use crate::paint::Alignment;
use crate::theme::DARK;
use crate::types::RectF;
use crate::window::Capabilities;

fn window(caption: &str) -> WindowState {
    WindowState::new(400, caption, Capabilities::all()).with_height(300)
}

fn cache() -> Rc<RefCell<ShadowCache>> {
    Rc::new(RefCell::new(ShadowCache::new()))
}

fn decoration(config: DecorationConfig) -> Decoration {
    Decoration::new(window("Hello"), config, DecorationSettings::default(), cache())
}

fn record(deco: &Decoration, repaint: Rect) -> RecordingPainter {
    let mut painter = RecordingPainter::new();
    deco.paint(&mut painter, repaint);
    painter
}

fn everything() -> Rect {
    Rect::new(-1000, -1000, 3000, 3000)
}

#[test_log::test]
fn test_first_requests() {
    let mut deco = decoration(DecorationConfig::default());
    let shadow = Rc::clone(deco.shadow());

    let requests = deco.drain_requests();
    assert_eq!(requests, vec![HostRequest::SetShadow(Some(shadow)), HostRequest::RepaintAll]);
    assert!(deco.drain_requests().is_empty());
}

#[test_log::test]
fn test_focus_fades_caption_color() {
    let config = DecorationConfig::builder()
        .theme(Theme::Dark)
        .animations_duration(Duration::from_millis(200))
        .finish(NO_CHECKS)
        .unwrap();
    let mut deco = decoration(config);
    deco.drain_requests();
    assert_eq!(deco.font_color(), DARK.title_font_inactive);

    deco.on_window_state_changed(WindowEvent::ActiveChanged(true));
    assert!(deco.animation().is_running());
    assert!(deco.drain_requests().contains(&HostRequest::ScheduleTick));
    assert_eq!(deco.font_color(), DARK.title_font_inactive);

    assert!(deco.tick(Duration::from_millis(100)));
    let alpha = deco.font_color().alpha();
    assert!(alpha > DARK.title_font_inactive.alpha() && alpha < DARK.title_font.alpha());

    // the buttons tint the client icon with the same color
    let tint = deco.inspect_button(ButtonKind::Menu, |b| b.context().font_color);
    assert_eq!(tint, Some(deco.font_color()));

    assert!(!deco.tick(Duration::from_millis(100)));
    assert!(!deco.animation().is_running());
    assert_eq!(deco.font_color(), DARK.title_font);
}

#[test_log::test]
fn test_focus_snaps_without_animations() {
    let config = DecorationConfig::builder().animations_enabled(false).finish(NO_CHECKS).unwrap();
    let mut deco = decoration(config);
    deco.drain_requests();

    deco.on_window_state_changed(WindowEvent::ActiveChanged(true));
    assert!(!deco.animation().is_running());
    assert_eq!(deco.drain_requests(), vec![HostRequest::RepaintAll]);
    assert_eq!(deco.font_color(), deco.colors().title_font);
}

#[test_log::test]
fn test_large_shadow() {
    let config = DecorationConfig::builder().shadow_size(ShadowSize::Large).finish(NO_CHECKS).unwrap();
    let deco = decoration(config);

    let padding = deco.shadow().padding;
    assert!(padding.is_positive());
    assert_eq!(padding.left, padding.right);
    // the shadow falls below the window
    assert!(padding.bottom > padding.top);
}

#[test_log::test]
fn test_shadow_is_shared_and_released() {
    let cache = cache();
    let config = DecorationConfig::default();
    let key = ShadowKey::from_config(&config);

    let a = Decoration::new(window("a"), config.clone(), DecorationSettings::default(), Rc::clone(&cache));
    let mut b = Decoration::new(window("b"), config, DecorationSettings::default(), Rc::clone(&cache));
    assert!(Rc::ptr_eq(a.shadow(), b.shadow()));
    assert_eq!(cache.borrow().users(&key), 2);

    b.drain_requests();
    let none = DecorationConfig::builder().shadow_size(ShadowSize::None).finish(NO_CHECKS).unwrap();
    b.on_configuration_reconfigured(none.clone());
    assert!(b.drain_requests().contains(&HostRequest::SetShadow(None)));
    assert_eq!(cache.borrow().users(&key), 1);

    // same shadow again: nothing to hand over
    b.on_configuration_reconfigured(none);
    assert!(!b.drain_requests().iter().any(|r| matches!(r, HostRequest::SetShadow(_))));

    drop(a);
    assert_eq!(cache.borrow().users(&key), 0);
    drop(b);
    assert!(cache.borrow().is_empty());
}

#[test_log::test]
fn test_geometry_is_flushed_lazily() {
    let mut deco = decoration(DecorationConfig::default());
    deco.drain_requests();
    assert!(!deco.stale.get());

    deco.on_window_state_changed(WindowEvent::WidthChanged(500));
    deco.on_window_state_changed(WindowEvent::ShadedChanged(true));
    deco.on_window_state_changed(WindowEvent::HeightChanged(100));

    // one repaint for the whole batch, and nothing recomputed yet
    assert_eq!(deco.drain_requests(), vec![HostRequest::RepaintAll]);
    assert!(deco.stale.get());
    assert_eq!(deco.geometry.borrow().size, Size::new(408, 337));

    assert_eq!(deco.computed_borders(), Insets::new(4, 33, 4, 0));
    assert!(!deco.stale.get());
    assert_eq!(deco.computed_size(), Size::new(508, 133));
}

#[test_log::test]
fn test_caption_change_repaints_caption_only() {
    let mut deco = decoration(DecorationConfig::default());
    deco.drain_requests();
    let old = deco.geometry().caption;

    deco.on_window_state_changed(WindowEvent::CaptionChanged("Hello world".into()));
    let new = deco.geometry().caption;
    assert_ne!(old, new);
    assert_eq!(deco.drain_requests(), vec![HostRequest::Repaint(old.united(&new))]);
}

#[test_log::test]
fn test_maximize_updates_buttons_and_opacity() {
    let mut deco = decoration(DecorationConfig::default());
    assert!(!deco.is_opaque());
    assert_eq!(deco.inspect_button(ButtonKind::Maximize, |b| b.is_checked()), Some(false));

    deco.on_window_state_changed(WindowEvent::MaximizedChanged { horizontal: true, vertical: true });
    assert!(deco.is_opaque());
    assert_eq!(deco.computed_borders(), Insets::new(0, 33, 0, 0));
    assert_eq!(deco.computed_resize_borders(), Insets::zeroed());
    assert_eq!(deco.inspect_button(ButtonKind::Maximize, |b| b.is_checked()), Some(true));

    let close = deco.button_hit_rects().find(ButtonKind::Close).map(|c| c.rect);
    assert_eq!(close.map(|r| r.right()), Some(400));
}

#[test_log::test]
fn test_capabilities_drop_buttons() {
    let mut deco = decoration(DecorationConfig::default());
    assert!(deco.inspect_button(ButtonKind::Minimize, |_| ()).is_some());

    deco.on_window_state_changed(WindowEvent::CapabilitiesChanged(Capabilities::CLOSEABLE));
    assert!(deco.stale.get());
    assert!(deco.inspect_button(ButtonKind::Minimize, |_| ()).is_none());
    assert!(deco.inspect_button(ButtonKind::Close, |_| ()).is_some());
}

#[test_log::test]
fn test_hover_animates_button() {
    let mut deco = decoration(DecorationConfig::default());
    deco.on_window_state_changed(WindowEvent::ActiveChanged(true));
    while deco.tick(Duration::from_millis(50)) {}
    deco.drain_requests();

    let close = deco.button_hit_rects().find(ButtonKind::Close).map(|c| c.rect).unwrap();
    let center = close.center();
    deco.pointer_moved(PointF::new(center.x as f32, center.y as f32));

    let requests = deco.drain_requests();
    assert!(requests.contains(&HostRequest::Repaint(close)));
    assert!(requests.contains(&HostRequest::ScheduleTick));
    assert!(deco.is_animating());

    while deco.tick(Duration::from_millis(50)) {}
    assert!(!deco.is_animating());
    assert_eq!(deco.inspect_button(ButtonKind::Close, |b| b.is_hovered()), Some(true));

    deco.pointer_left();
    assert_eq!(deco.inspect_button(ButtonKind::Close, |b| b.is_hovered()), Some(false));
}

#[test_log::test]
fn test_press_and_check_routing() {
    let mut deco = decoration(DecorationConfig::default());
    deco.drain_requests();

    deco.set_button_pressed(ButtonKind::Minimize, true);
    let rect = deco.button_hit_rects().find(ButtonKind::Minimize).map(|c| c.rect).unwrap();
    assert_eq!(deco.drain_requests(), vec![HostRequest::Repaint(rect)]);

    // no change, no repaint
    deco.set_button_pressed(ButtonKind::Minimize, true);
    assert!(deco.drain_requests().is_empty());

    deco.set_button_checked(ButtonKind::OnAllDesktops, true);
    assert_eq!(deco.inspect_button(ButtonKind::OnAllDesktops, |b| b.is_checked()), Some(true));
    let rect = deco.button_hit_rects().find(ButtonKind::OnAllDesktops).map(|c| c.rect).unwrap();
    assert_eq!(deco.drain_requests(), vec![HostRequest::Repaint(rect)]);

    // not laid out
    deco.set_button_pressed(ButtonKind::KeepAbove, true);
    assert!(deco.drain_requests().is_empty());
}

#[test_log::test]
fn test_hit_test_includes_resize_borders() {
    let deco = decoration(DecorationConfig::default());

    assert!(deco.hit_test(PointF::new(10.0, 10.0)));
    assert!(deco.hit_test(PointF::new(-5.0, -5.0)));
    assert!(deco.hit_test(PointF::new(415.0, 340.0)));
    assert!(!deco.hit_test(PointF::new(-20.0, 10.0)));
}

#[test_log::test]
fn test_paint_order() {
    let mut deco = decoration(DecorationConfig::default());
    deco.on_window_state_changed(WindowEvent::ActiveChanged(true));
    while deco.tick(Duration::from_millis(50)) {}

    let painter = record(&deco, everything());
    assert!(painter.is_balanced());

    assert_eq!(painter.ops[0], Op::Clear(RectF::new(0.0, 0.0, 408.0, 337.0)));

    let text = painter.ops.iter().position(|op| matches!(op, Op::Text { .. })).unwrap();
    let icon = painter.ops.iter().position(|op| matches!(op, Op::ClientIcon(..))).unwrap();
    let title_bar = painter
        .ops
        .iter()
        .position(|op| matches!(op, Op::Path(_, s) if s.fill == Some(deco.title_bar_color())))
        .unwrap();
    assert!(title_bar < text && text < icon);

    assert_eq!(
        painter.ops[text],
        Op::Text {
            rect: RectF::new(186.0, 6.0, 35.0, 20.0),
            align: Alignment::CENTER,
            text: "Hello".into(),
            color: deco.font_color(),
        }
    );
}

#[test_log::test]
fn test_paint_skips_title_bar_outside_repaint() {
    let deco = decoration(DecorationConfig::default());
    let painter = record(&deco, Rect::new(0, 200, 10, 10));

    assert!(painter.texts().is_empty());
    assert!(!painter.ops.iter().any(|op| matches!(op, Op::ClientIcon(..))));
    assert!(painter.is_balanced());
}

#[test_log::test]
fn test_caption_is_elided() {
    let caption = "x".repeat(60);
    let deco = Decoration::new(window(&caption), DecorationConfig::default(), DecorationSettings::default(), cache());
    let painter = record(&deco, everything());

    match painter.texts().first() {
        Some(Op::Text { text, rect, .. }) => {
            assert!(text.contains('…'));
            assert!(text.chars().count() < 60);
            assert_eq!(*rect, RectF::new(68.0, 6.0, 216.0, 20.0));
        }
        other => panic!("unexpected {other:?}"),
    }
}

#[test_log::test]
fn test_opaque_frame_gets_an_outline() {
    let mut settings = DecorationSettings::default();
    settings.alpha_channel_supported = false;
    let deco = Decoration::new(window("Hello"), DecorationConfig::default(), settings, cache());

    let painter = record(&deco, everything());
    match painter.ops.last() {
        Some(Op::Path(_, style)) => {
            assert!(style.fill.is_none());
            assert_eq!(style.stroke.map(|p| p.color), Some(deco.outline_color()));
            assert!(!style.antialias);
        }
        other => panic!("unexpected {other:?}"),
    }
}

#[test_log::test]
fn test_shaded_skips_background() {
    let mut deco = decoration(DecorationConfig::default());
    deco.on_window_state_changed(WindowEvent::ShadedChanged(true));

    let painter = record(&deco, everything());
    assert!(!painter.ops.iter().any(|op| matches!(op, Op::Clear(_))));
    assert_eq!(painter.texts().len(), 1);
}

#[test_log::test]
fn test_released_window() {
    let mut deco = decoration(DecorationConfig::default());
    deco.on_window_state_changed(WindowEvent::ActiveChanged(true));
    deco.drain_requests();

    deco.on_window_state_changed(WindowEvent::Released);
    assert!(deco.window().is_none());
    assert!(!deco.animation().is_running());
    assert_eq!(deco.drain_requests(), vec![HostRequest::RepaintAll]);
    assert_eq!(deco.inspect_button(ButtonKind::Close, |b| b.foreground_color()), Some(None));

    // later events are ignored, and geometry stays put
    deco.on_window_state_changed(WindowEvent::WidthChanged(10));
    assert!(deco.drain_requests().is_empty());
    assert_eq!(deco.computed_size(), Size::new(408, 337));

    let painter = record(&deco, everything());
    assert_eq!(painter.ops, vec![Op::Clear(RectF::new(0.0, 0.0, 408.0, 337.0))]);
}

#[test_log::test]
fn test_settings_change_relayouts_buttons() {
    let mut deco = decoration(DecorationConfig::default());
    deco.drain_requests();

    let settings = DecorationSettings::default().with_buttons([ButtonKind::Close], [ButtonKind::Shade]);
    deco.on_settings_changed(settings);
    assert_eq!(deco.drain_requests(), vec![HostRequest::RepaintAll]);

    let layout = deco.button_hit_rects();
    assert_eq!(layout.len(), 2);
    assert_eq!(layout.left.cells[0].kind, ButtonKind::Close);
    assert!(deco.inspect_button(ButtonKind::Menu, |_| ()).is_none());
}
