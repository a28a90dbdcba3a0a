//! Browser platform layer
//!
//! DOM lookups happen once at startup. Each frame the host writes one
//! transform to the sprite wrapper, refreshes HUD text that changed and
//! syncs effect elements with the pool.

use std::collections::HashMap;

use wasm_bindgen::{JsCast, JsValue};
use web_sys::{Document, HtmlElement, Window};

use crate::consts::BASE_WRAPPER_SCALE;
use crate::renderer::{self, FrameTransform};
use crate::settings::Settings;
use crate::sim::{EffectKind, GameState};
use crate::tuning::Tuning;
use crate::ui::HudSnapshot;

const REDUCED_MOTION_QUERY: &str = "(prefers-reduced-motion: reduce)";

fn missing(what: &str) -> JsValue {
    JsValue::from_str(&format!("missing element: {}", what))
}

fn by_id(document: &Document, id: &str) -> Result<HtmlElement, JsValue> {
    document
        .get_element_by_id(id)
        .ok_or_else(|| missing(id))?
        .dyn_into::<HtmlElement>()
        .map_err(JsValue::from)
}

fn by_selector(document: &Document, selector: &str) -> Result<HtmlElement, JsValue> {
    document
        .query_selector(selector)?
        .ok_or_else(|| missing(selector))?
        .dyn_into::<HtmlElement>()
        .map_err(JsValue::from)
}

/// Current host time in milliseconds
pub fn performance_now() -> f64 {
    web_sys::window()
        .and_then(|w| w.performance())
        .map(|p| p.now())
        .unwrap_or_else(js_sys::Date::now)
}

/// Whether the user asked the OS for reduced motion
pub fn prefers_reduced_motion(window: &Window) -> bool {
    matches!(
        window.match_media(REDUCED_MOTION_QUERY),
        Ok(Some(query)) if query.matches()
    )
}

/// Elements the game writes to
pub struct DomCache {
    pub sprite: HtmlElement,
    pub wrapper: HtmlElement,
    pub container: HtmlElement,
    pub fx_layer: HtmlElement,
    pub body: HtmlElement,
    gold: HtmlElement,
    level: HtmlElement,
    xp_fill: HtmlElement,
    combo_container: HtmlElement,
    combo_count: HtmlElement,
    combo_label: HtmlElement,
}

impl DomCache {
    pub fn lookup(document: &Document) -> Result<Self, JsValue> {
        Ok(Self {
            sprite: by_id(document, "action-sprite")?,
            wrapper: by_selector(document, ".sprite-wrapper")?,
            container: by_id(document, "game-container")?,
            fx_layer: by_id(document, "fx-layer")?,
            body: document.body().ok_or_else(|| missing("body"))?,
            gold: by_id(document, "gold-display")?,
            level: by_id(document, "level-display")?,
            xp_fill: by_id(document, "xp-fill")?,
            combo_container: by_id(document, "combo-container")?,
            combo_count: by_id(document, "combo-count")?,
            combo_label: by_id(document, "combo-label")?,
        })
    }

    /// Tuning from the container's `data-preset` and `data-tuning` attributes
    ///
    /// Falls back to defaults when the overrides are rejected.
    pub fn load_tuning(&self) -> Tuning {
        let preset = self.container.get_attribute("data-preset");
        let overrides = self.container.get_attribute("data-tuning");
        match Tuning::load(preset.as_deref(), overrides.as_deref()) {
            Ok(tuning) => {
                log::info!(
                    "Tuning loaded (preset: {})",
                    preset.as_deref().unwrap_or("default")
                );
                tuning
            }
            Err(e) => {
                log::warn!("Rejected tuning, using defaults: {}", e);
                Tuning::default()
            }
        }
    }

    /// Settings from the container's `data-quality` and `data-settings`
    /// attributes, with the OS reduced-motion preference folded in
    pub fn load_settings(&self, window: &Window) -> Settings {
        let quality = self.container.get_attribute("data-quality");
        let overrides = self.container.get_attribute("data-settings");
        let mut settings = match Settings::load(quality.as_deref(), overrides.as_deref()) {
            Ok(settings) => settings,
            Err(e) => {
                log::warn!("Rejected settings, using defaults: {}", e);
                Settings::default()
            }
        };
        settings.reduced_motion |= prefers_reduced_motion(window);
        log::info!(
            "Quality: {} (particles: {}, shake: {})",
            settings.quality.as_str(),
            settings.particles,
            settings.effective_screen_shake()
        );
        settings
    }

    /// Size the sprite box and its sheet
    pub fn init_sprite(&self, tuning: &Tuning) -> Result<(), JsValue> {
        let style = self.sprite.style();
        style.set_property("width", &format!("{}px", tuning.frame_width))?;
        style.set_property("height", &format!("{}px", tuning.frame_height))?;
        style.set_property("background-size", &renderer::sheet_size_css(tuning))?;
        style.set_property("background-position", "0px 0px")?;
        self.wrapper
            .style()
            .set_property("transform", &format!("scale({})", BASE_WRAPPER_SCALE))?;
        Ok(())
    }

    pub fn apply_frame(&self, transform: &FrameTransform) -> Result<(), JsValue> {
        self.sprite
            .style()
            .set_property("background-position", &transform.background_position_css())?;
        let style = self.wrapper.style();
        style.set_property("transform", &transform.transform_css())?;
        style.set_property("filter", &transform.filter_css())?;
        self.wrapper
            .class_list()
            .toggle_with_force("active", transform.active)?;
        Ok(())
    }

    /// Write HUD values that differ from `previous`
    pub fn apply_hud(&self, hud: &HudSnapshot, previous: Option<&HudSnapshot>) -> Result<(), JsValue> {
        let stale = |same: fn(&HudSnapshot, &HudSnapshot) -> bool| {
            previous.is_none_or(|prev| !same(prev, hud))
        };

        if stale(|a, b| a.gold == b.gold) {
            self.gold.set_text_content(Some(&hud.gold));
        }
        if stale(|a, b| a.level == b.level) {
            self.level.set_text_content(Some(&hud.level));
        }
        if stale(|a, b| a.xp_percent == b.xp_percent) {
            self.xp_fill.style().set_property("width", &hud.xp_width_css())?;
        }
        if stale(|a, b| a.combo_count == b.combo_count) {
            self.combo_count.set_text_content(Some(&hud.combo_count));
        }
        if stale(|a, b| a.combo_label == b.combo_label) {
            self.combo_label.set_text_content(Some(hud.combo_label));
        }
        if stale(|a, b| a.combo_visible == b.combo_visible) {
            self.combo_container
                .class_list()
                .toggle_with_force("hidden", !hud.combo_visible)?;
        }
        Ok(())
    }
}

/// DOM elements mirroring the effect pool, keyed by effect id
#[derive(Default)]
pub struct FxLayer {
    elements: HashMap<u32, HtmlElement>,
}

impl FxLayer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Remove despawned elements, create new ones, then restyle the rest
    pub fn sync(&mut self, document: &Document, dom: &DomCache, state: &mut GameState) -> Result<(), JsValue> {
        for id in state.effects.drain_despawned() {
            if let Some(element) = self.elements.remove(&id) {
                element.remove();
            }
        }

        for effect in state.effects.iter() {
            if !self.elements.contains_key(&effect.id) {
                let template = renderer::effect_template(effect);
                let element = document
                    .create_element("div")?
                    .dyn_into::<HtmlElement>()
                    .map_err(JsValue::from)?;
                element.set_class_name(template.class_name);
                if let Some(text) = &template.text {
                    element.set_text_content(Some(text));
                }
                let style = element.style();
                for (property, value) in &template.fixed {
                    style.set_property(property, value)?;
                }
                let parent = match effect.kind() {
                    EffectKind::Flash => &dom.body,
                    _ => &dom.fx_layer,
                };
                parent.append_child(&element)?;
                self.elements.insert(effect.id, element);
            }

            if let Some(element) = self.elements.get(&effect.id) {
                let frame = renderer::effect_style(effect);
                let style = element.style();
                style.set_property("transform", &frame.transform)?;
                style.set_property("opacity", &frame.opacity)?;
            }
        }
        Ok(())
    }
}
