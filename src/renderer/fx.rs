//! Style properties for effect elements

use crate::sim::effects::HEART_GLYPH;
use crate::sim::{Effect, EffectBody};

/// Element class and static content, set once at creation
#[derive(Debug, Clone, PartialEq)]
pub struct EffectTemplate {
    pub class_name: &'static str,
    pub text: Option<String>,
    /// Static inline declarations as (property, value)
    pub fixed: Vec<(&'static str, String)>,
}

/// Per-frame style values
#[derive(Debug, Clone, PartialEq)]
pub struct EffectStyle {
    pub transform: String,
    pub opacity: String,
}

/// Inline declarations shared by everything in the effects layer
const LAYER_BASE: [(&str, &str); 4] = [
    ("position", "absolute"),
    ("left", "0px"),
    ("top", "0px"),
    ("pointer-events", "none"),
];

fn fixed_styles(extra: &[(&'static str, String)], z_index: u32) -> Vec<(&'static str, String)> {
    let mut fixed: Vec<(&'static str, String)> = LAYER_BASE
        .iter()
        .map(|(k, v)| (*k, v.to_string()))
        .collect();
    fixed.push(("z-index", z_index.to_string()));
    fixed.push(("will-change", "transform, opacity".to_string()));
    fixed.extend(extra.iter().cloned());
    fixed
}

/// Creation-time class, text and fixed styles
pub fn effect_template(effect: &Effect) -> EffectTemplate {
    match &effect.body {
        EffectBody::Particle { size, color, .. } => EffectTemplate {
            class_name: "fx-particle",
            text: None,
            fixed: fixed_styles(
                &[
                    ("width", format!("{:.1}px", size)),
                    ("height", format!("{:.1}px", size)),
                    ("border-radius", "50%".to_string()),
                    ("background-color", color.to_string()),
                ],
                1000,
            ),
        },
        EffectBody::FloatingText {
            text,
            color,
            critical,
        } => EffectTemplate {
            class_name: if *critical {
                "float-text crit"
            } else {
                "float-text"
            },
            text: Some(text.clone()),
            fixed: fixed_styles(&[("color", color.to_string())], 1200),
        },
        EffectBody::Heart => EffectTemplate {
            class_name: "fx-heart",
            text: Some(HEART_GLYPH.to_string()),
            fixed: fixed_styles(&[("font-size", "30px".to_string())], 1100),
        },
        EffectBody::ComicCallout { word, .. } => EffectTemplate {
            class_name: "fx-callout",
            text: Some(word.to_string()),
            fixed: fixed_styles(&[], 1150),
        },
        EffectBody::Flash => EffectTemplate {
            class_name: "fx-flash",
            text: None,
            fixed: vec![
                ("position", "fixed".to_string()),
                ("top", "0px".to_string()),
                ("left", "0px".to_string()),
                ("width", "100vw".to_string()),
                ("height", "100vh".to_string()),
                ("background-color", "white".to_string()),
                ("pointer-events", "none".to_string()),
                ("z-index", "2000".to_string()),
            ],
        },
    }
}

/// Transform and opacity for the current frame
pub fn effect_style(effect: &Effect) -> EffectStyle {
    let transform = match &effect.body {
        EffectBody::Flash => "none".to_string(),
        EffectBody::ComicCallout { tilt, .. } => format!(
            "translate3d({:.1}px, {:.1}px, 0) rotate({:.1}deg) scale({:.3})",
            effect.pos.x, effect.pos.y, tilt, effect.scale
        ),
        _ => format!(
            "translate3d({:.1}px, {:.1}px, 0) scale({:.3})",
            effect.pos.x, effect.pos.y, effect.scale
        ),
    };
    EffectStyle {
        transform,
        opacity: format!("{:.3}", effect.opacity.clamp(0.0, 1.0)),
    }
}
