//! Presentation mapping
//!
//! Turns simulation state into the style values the host writes to the
//! sprite and to effect elements. No DOM access happens here.

pub mod fx;
pub mod sprite;

pub use fx::{EffectStyle, EffectTemplate, effect_style, effect_template};
pub use sprite::{FrameTransform, frame_transform, sheet_size_css};
