//! The top-level context that decorations are created from.

use std::cell::RefCell;
use std::rc::Rc;

use tracing::{debug, instrument, warn};

use crate::button::{Button, ButtonContext};
use crate::config::{ConfigSection, DecorationConfig, DecorationSettings};
use crate::decoration::Decoration;
use crate::shadow::ShadowCache;
use crate::theme::colors_for;
use crate::types::Rect;
use crate::window::{ButtonKind, WindowState};

/// Creates decorations and owns what they share.
///
/// There should be one `DecorationManager` per process. It holds the
/// current configuration and host settings, and the [`ShadowCache`] that
/// every decoration it creates acquires its shadow from.
///
/// Decorations are owned by the host, not the manager. To apply a new
/// configuration, pass the live decorations to
/// [`reconfigure`](DecorationManager::reconfigure).
#[derive(Debug)]
pub struct DecorationManager {
    config: DecorationConfig,
    settings: DecorationSettings,
    shadow_cache: Rc<RefCell<ShadowCache>>,
}

impl DecorationManager {
    /// Creates a new `DecorationManager` with an empty shadow cache.
    pub fn new(config: DecorationConfig, settings: DecorationSettings) -> Self {
        Self {
            config,
            settings,
            shadow_cache: Rc::new(RefCell::new(ShadowCache::new())),
        }
    }

    /// Creates a new `DecorationManager`, reading its configuration from `section`.
    ///
    /// Bad values fall back to their defaults.
    pub fn from_section(section: &dyn ConfigSection, settings: DecorationSettings) -> Self {
        Self::new(DecorationConfig::load(section), settings)
    }

    /// The current configuration.
    pub fn config(&self) -> &DecorationConfig {
        &self.config
    }

    /// The current host settings.
    pub fn settings(&self) -> &DecorationSettings {
        &self.settings
    }

    /// The shared shadow cache.
    pub fn shadow_cache(&self) -> &Rc<RefCell<ShadowCache>> {
        &self.shadow_cache
    }

    /// The number of distinct shadows currently alive.
    pub fn live_shadows(&self) -> usize {
        self.shadow_cache.borrow().len()
    }

    /// Creates the decoration of the window in `state`.
    pub fn create_decoration(&self, state: WindowState) -> Decoration {
        debug!(target: "decoration", "decorating {:?}", state.caption);
        Decoration::new(
            state,
            self.config.clone(),
            self.settings.clone(),
            Rc::clone(&self.shadow_cache),
        )
    }

    /// Creates a button outside of any title bar, such as a preview in a
    /// settings dialog. It is drawn as if its window were active.
    pub fn create_standalone_button(&self, kind: ButtonKind, geometry: Rect) -> Button {
        let colors = colors_for(self.config.theme);
        let mut button = Button::standalone(kind, geometry);
        button.configure(&self.config);
        button.set_context(ButtonContext {
            colors,
            icon_style: self.config.icon_style,
            window_active: Some(true),
            font_color: colors.title_font,
        });
        button
    }

    /// Replaces the configuration, and applies it to `decorations`.
    #[instrument(target = "decoration", level = "trace", skip_all)]
    pub fn reconfigure<'a, I>(&mut self, config: DecorationConfig, decorations: I)
    where
        I: IntoIterator<Item = &'a mut Decoration>,
    {
        for deco in decorations {
            deco.on_configuration_reconfigured(config.clone());
        }
        self.config = config;
    }

    /// Replaces the host settings, and applies them to `decorations`.
    pub fn update_settings<'a, I>(&mut self, settings: DecorationSettings, decorations: I)
    where
        I: IntoIterator<Item = &'a mut Decoration>,
    {
        for deco in decorations {
            deco.on_settings_changed(settings.clone());
        }
        self.settings = settings;
    }

    /// Frees every cached shadow.
    ///
    /// Decorations that are still alive keep the shadow they hold, and
    /// their later releases are ignored.
    pub fn teardown(&mut self) {
        let mut cache = self.shadow_cache.borrow_mut();
        if !cache.is_empty() {
            warn!(target: "shadow", "tearing down {} shadows still in use", cache.len());
        }
        cache.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use crate::config::{ShadowSize, Theme, NO_CHECKS};
    use crate::dict;
    use crate::shadow::ShadowKey;
    use crate::types::Dict;
    use crate::window::Capabilities;

    fn window() -> WindowState {
        WindowState::new(300, "test", Capabilities::all()).with_height(200)
    }

    #[test_log::test]
    fn test_decorations_share_shadows() {
        let manager = DecorationManager::new(DecorationConfig::default(), DecorationSettings::default());

        let a = manager.create_decoration(window());
        let b = manager.create_decoration(window());
        assert!(Rc::ptr_eq(a.shadow(), b.shadow()));
        assert_eq!(manager.live_shadows(), 1);

        drop(a);
        assert_eq!(manager.live_shadows(), 1);
        drop(b);
        assert_eq!(manager.live_shadows(), 0);
    }

    #[test_log::test]
    fn test_reconfigure_moves_shadows() {
        let mut manager = DecorationManager::new(DecorationConfig::default(), DecorationSettings::default());
        let old_key = ShadowKey::from_config(manager.config());

        let mut decos = vec![manager.create_decoration(window()), manager.create_decoration(window())];

        let config = DecorationConfig::builder()
            .shadow_size(ShadowSize::Small)
            .theme(Theme::Dark)
            .finish(NO_CHECKS)
            .unwrap();
        let new_key = ShadowKey::from_config(&config);
        manager.reconfigure(config, decos.iter_mut());

        let cache = manager.shadow_cache().borrow();
        assert_eq!(cache.users(&old_key), 0);
        assert_eq!(cache.users(&new_key), 2);
        drop(cache);

        assert_eq!(manager.config().theme, Theme::Dark);
        assert!(decos.iter().all(|d| d.config().theme == Theme::Dark));
    }

    #[test_log::test]
    fn test_settings_reach_decorations() {
        let mut manager = DecorationManager::new(DecorationConfig::default(), DecorationSettings::default());
        let mut deco = manager.create_decoration(window());

        let settings = DecorationSettings::default().with_buttons([ButtonKind::Close], [] as [ButtonKind; 0]);
        manager.update_settings(settings, [&mut deco]);
        assert_eq!(deco.button_hit_rects().len(), 1);
        assert_eq!(manager.settings().buttons_left, vec![ButtonKind::Close]);
    }

    #[test_log::test]
    fn test_from_section() {
        let section: Dict = dict! {
            "Theme" => "Dark".to_string(),
            "ShadowSize" => 0i64,
        };
        let manager = DecorationManager::from_section(&section, DecorationSettings::default());
        assert_eq!(manager.config().theme, Theme::Dark);
        assert_eq!(manager.config().shadow_size, ShadowSize::None);

        let deco = manager.create_decoration(window());
        assert!(deco.shadow().is_empty());
    }

    #[test_log::test]
    fn test_standalone_button() {
        let manager = DecorationManager::new(DecorationConfig::default(), DecorationSettings::default());
        let button = manager.create_standalone_button(ButtonKind::Close, Rect::new(0, 0, 40, 40));

        assert!(button.is_standalone());
        assert_eq!(button.context().window_active, Some(true));
        assert!(button.foreground_color().is_some());
    }

    #[test_log::test]
    fn test_teardown() {
        let mut manager = DecorationManager::new(DecorationConfig::default(), DecorationSettings::default());
        let deco = manager.create_decoration(window());

        manager.teardown();
        assert_eq!(manager.live_shadows(), 0);
        // the decoration keeps its texture
        assert!(!deco.shadow().is_empty());
        drop(deco);
        assert_eq!(manager.live_shadows(), 0);
    }
}
