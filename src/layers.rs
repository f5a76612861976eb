// Back-to-front composition of the backdrop. Everything here is static
// styling; only the scene and particle layers have runtime state.

use crate::color::Color;

#[derive(Copy, Clone, Debug, PartialEq)]
pub enum Layer {
    /// Solid fill behind everything else.
    Backdrop,
    /// The external 3D scene, drawn at reduced opacity.
    Scene,
    /// The particle canvas, screen-blended over the scene.
    Particles,
    Decoration(Decoration),
}

#[derive(Copy, Clone, Debug, PartialEq)]
pub enum Decoration {
    Gradient {
        direction: &'static str,
        animation: &'static str,
    },
    Orb {
        anchor: &'static str,
        size_rem: f64,
        blur_px: u32,
        color: Color,
        animation: &'static str,
    },
}

pub const SCENE_OPACITY: f64 = 0.75;

pub static STACK: [Layer; 7] = [
    Layer::Backdrop,
    Layer::Scene,
    Layer::Particles,
    Layer::Decoration(Decoration::Gradient {
        direction: "to bottom right",
        animation: "gradient-slow",
    }),
    Layer::Decoration(Decoration::Gradient {
        direction: "to top right",
        animation: "gradient-slow-reverse",
    }),
    Layer::Decoration(Decoration::Orb {
        anchor: "top: 25%; left: 25%",
        size_rem: 1.0,
        blur_px: 4,
        color: Color::TEAL,
        animation: "float-slow",
    }),
    Layer::Decoration(Decoration::Orb {
        anchor: "bottom: 33.333%; right: 33.333%",
        size_rem: 1.5,
        blur_px: 12,
        color: Color::BLUE,
        animation: "float-medium",
    }),
];

const FULL_COVER: &str = "position: absolute; inset: 0";

impl Layer {
    pub fn css(&self) -> String {
        match self {
            Layer::Backdrop => format!(
                "position: fixed; inset: 0; z-index: -10; overflow: hidden; background: {}",
                Color::NIGHT
            ),
            Layer::Scene => format!("{}; opacity: {}", FULL_COVER, SCENE_OPACITY),
            Layer::Particles => format!("{}; mix-blend-mode: screen", FULL_COVER),
            Layer::Decoration(decoration) => decoration.css(),
        }
    }

    pub fn decorations() -> impl Iterator<Item = Decoration> {
        STACK.iter().filter_map(|layer| match layer {
            Layer::Decoration(decoration) => Some(*decoration),
            _ => None,
        })
    }
}

impl Decoration {
    pub fn css(&self) -> String {
        match self {
            Decoration::Gradient {
                direction,
                animation,
            } => format!(
                "{}; background: linear-gradient({}, rgba(168, 85, 247, 0.1), rgba(59, 130, 246, 0.1)); animation: {} 15s ease infinite",
                FULL_COVER, direction, animation
            ),
            Decoration::Orb {
                anchor,
                size_rem,
                blur_px,
                color,
                animation,
            } => format!(
                "position: absolute; {}; width: {size}rem; height: {size}rem; border-radius: 9999px; background: {}; filter: blur({}px); animation: {} 6s ease-in-out infinite",
                anchor,
                color,
                blur_px,
                animation,
                size = size_rem
            ),
        }
    }
}
