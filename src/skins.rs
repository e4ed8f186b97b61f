//! Cosmetic skin catalog
//!
//! The catalog is a fixed, ordered, read-only list. Each skin carries an
//! immutable bag of rendering options; the renderer reads them from the skin,
//! they are never copied onto the actor.

use std::collections::HashMap;
use std::sync::OnceLock;

use glam::Vec3;
use serde::{Deserialize, Serialize};

/// How segment colors are produced
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ColorMode {
    /// One flat color
    Solid,
    /// Cycle through the palette along the body
    Palette,
    /// Animated hue sweep
    Rainbow,
    /// Base color brightening in a sine wave
    Pulse,
}

/// Rendering parameters attached to a skin
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SkinOptions {
    pub show_outline: bool,
    pub outline_color: [u8; 3],
    pub outline_width: u32,
    pub show_shadow: bool,
    pub shadow_color: [u8; 4],
    pub show_highlight: bool,
    pub highlight_color: [u8; 4],
    /// Rainbow cycles per second
    pub animation_speed: f32,
    /// Hue spacing between consecutive segments
    pub hue_step: f32,
    /// Palette shifts per second (0 = static)
    pub palette_scroll: f32,
    pub pulse_speed: f32,
    pub pulse_amplitude: f32,
    /// Pulse phase offset between consecutive segments
    pub pulse_offset: f32,
    /// How much lighter the head is than its segment color (0-1)
    pub head_glow: f32,
}

impl SkinOptions {
    pub const DEFAULT: SkinOptions = SkinOptions {
        show_outline: true,
        outline_color: [40, 40, 40],
        outline_width: 2,
        show_shadow: true,
        shadow_color: [0, 0, 0, 110],
        show_highlight: true,
        highlight_color: [255, 255, 255, 45],
        animation_speed: 0.25,
        hue_step: 0.10,
        palette_scroll: 0.0,
        pulse_speed: 1.5,
        pulse_amplitude: 0.4,
        pulse_offset: 0.25,
        head_glow: 0.18,
    };
}

impl Default for SkinOptions {
    fn default() -> Self {
        Self::DEFAULT
    }
}

/// A catalog entry
#[derive(Debug, PartialEq)]
pub struct Skin {
    pub id: &'static str,
    pub name: &'static str,
    /// Best score required to unlock
    pub cost: u64,
    pub appearance: &'static str,
    pub effect: &'static str,
    pub color_mode: ColorMode,
    pub palette: &'static [[u8; 3]],
    pub options: SkinOptions,
}

/// Id of the skin every player owns
pub const DEFAULT_SKIN_ID: &str = "orange";

/// The full catalog, cheapest first
pub static SKINS: [Skin; 10] = [
    Skin {
        id: DEFAULT_SKIN_ID,
        name: "Orange",
        cost: 0,
        appearance: "Bright orange snake in the classic style.",
        effect: "Flat tint for instant readability.",
        color_mode: ColorMode::Solid,
        palette: &[[255, 165, 0]],
        options: SkinOptions::DEFAULT,
    },
    Skin {
        id: "rainbow",
        name: "Rainbow",
        cost: 0,
        appearance: "Prismatic snake with shifting colors.",
        effect: "Bright, lively animation.",
        color_mode: ColorMode::Rainbow,
        palette: &[],
        options: SkinOptions::DEFAULT,
    },
    Skin {
        id: "jade_forest",
        name: "Jade Forest",
        cost: 120,
        appearance: "Deep greens inspired by the canopy.",
        effect: "Heavy outline and muted highlights for readability.",
        color_mode: ColorMode::Palette,
        palette: &[[34, 139, 34], [46, 180, 126], [144, 238, 144]],
        options: SkinOptions {
            show_highlight: false,
            outline_color: [12, 60, 28],
            outline_width: 3,
            ..SkinOptions::DEFAULT
        },
    },
    Skin {
        id: "deep_ocean",
        name: "Deep Ocean",
        cost: 180,
        appearance: "Marine blues from the ocean depths.",
        effect: "Flowing blue gradient with a bright outline.",
        color_mode: ColorMode::Palette,
        palette: &[[0, 105, 148], [30, 144, 255], [135, 206, 250]],
        options: SkinOptions {
            show_highlight: true,
            outline_color: [0, 50, 80],
            outline_width: 2,
            palette_scroll: 1.5,
            ..SkinOptions::DEFAULT
        },
    },
    Skin {
        id: "nocturne",
        name: "Nocturne",
        cost: 250,
        appearance: "Night tones under an electric halo.",
        effect: "Rhythmic glow and faster animation.",
        color_mode: ColorMode::Pulse,
        palette: &[[70, 70, 100]],
        options: SkinOptions {
            show_highlight: false,
            show_shadow: false,
            show_outline: true,
            outline_color: [180, 180, 255],
            animation_speed: 0.45,
            pulse_speed: 2.2,
            pulse_amplitude: 0.55,
            pulse_offset: 0.35,
            ..SkinOptions::DEFAULT
        },
    },
    Skin {
        id: "magma",
        name: "Magma",
        cost: 350,
        appearance: "Glowing snake like molten lava.",
        effect: "Intense red-orange pulse with a heat haze.",
        color_mode: ColorMode::Pulse,
        palette: &[[180, 50, 30]],
        options: SkinOptions {
            show_highlight: false,
            show_shadow: true,
            show_outline: true,
            outline_color: [255, 140, 0],
            shadow_color: [255, 69, 0, 80],
            animation_speed: 0.35,
            pulse_speed: 3.0,
            pulse_amplitude: 0.7,
            pulse_offset: 0.2,
            ..SkinOptions::DEFAULT
        },
    },
    Skin {
        id: "royal_desert",
        name: "Royal Desert",
        cost: 400,
        appearance: "Warm desert tones with a golden sheen.",
        effect: "Gold and sand palette with strong highlights.",
        color_mode: ColorMode::Palette,
        palette: &[[218, 165, 32], [255, 215, 0], [255, 235, 140]],
        options: SkinOptions {
            show_highlight: true,
            outline_color: [139, 90, 0],
            outline_width: 3,
            highlight_color: [255, 255, 200, 80],
            palette_scroll: 2.0,
            ..SkinOptions::DEFAULT
        },
    },
    Skin {
        id: "venomous",
        name: "Venomous",
        cost: 500,
        appearance: "Glowing toxic green with a warning sheen.",
        effect: "Fast acid pulse that reads as danger.",
        color_mode: ColorMode::Pulse,
        palette: &[[100, 200, 50]],
        options: SkinOptions {
            show_highlight: false,
            show_shadow: false,
            show_outline: true,
            outline_color: [200, 255, 0],
            animation_speed: 0.55,
            pulse_speed: 4.0,
            pulse_amplitude: 0.6,
            pulse_offset: 0.15,
            ..SkinOptions::DEFAULT
        },
    },
    Skin {
        id: "crystal",
        name: "Crystal",
        cost: 600,
        appearance: "Translucent snake in crystalline pastels.",
        effect: "Soft palette with transparency and shine.",
        color_mode: ColorMode::Palette,
        palette: &[[200, 180, 255], [180, 220, 255], [220, 200, 255]],
        options: SkinOptions {
            show_highlight: true,
            outline_color: [150, 130, 200],
            outline_width: 2,
            highlight_color: [255, 255, 255, 100],
            palette_scroll: 1.0,
            ..SkinOptions::DEFAULT
        },
    },
    Skin {
        id: "galaxy",
        name: "Galaxy",
        cost: 750,
        appearance: "Sparkling cosmic snake in galactic hues.",
        effect: "Slow rainbow with a starry glow.",
        color_mode: ColorMode::Rainbow,
        palette: &[],
        options: SkinOptions {
            show_highlight: true,
            outline_color: [50, 0, 100],
            outline_width: 3,
            animation_speed: 0.15,
            highlight_color: [255, 255, 255, 120],
            ..SkinOptions::DEFAULT
        },
    },
];

fn index() -> &'static HashMap<&'static str, usize> {
    static INDEX: OnceLock<HashMap<&'static str, usize>> = OnceLock::new();
    INDEX.get_or_init(|| SKINS.iter().enumerate().map(|(i, skin)| (skin.id, i)).collect())
}

/// The always-unlocked skin
pub fn default_skin() -> &'static Skin {
    &SKINS[0]
}

/// Look up a skin by id
pub fn find(id: &str) -> Option<&'static Skin> {
    index().get(id).map(|&i| &SKINS[i])
}

/// Catalog position of a skin id (0 when unknown)
pub fn position_of(id: &str) -> usize {
    index().get(id).copied().unwrap_or(0)
}

impl Skin {
    /// Color of body segment `index` at `time_secs`
    pub fn segment_color(&self, index: usize, time_secs: f32) -> [u8; 3] {
        match self.color_mode {
            _ if self.palette.is_empty() => self.rainbow_color(index, time_secs),
            ColorMode::Solid => self.palette[0],
            ColorMode::Palette => {
                let len = self.palette.len();
                let shift = (time_secs * self.options.palette_scroll).max(0.0) as usize;
                self.palette[(index + shift) % len]
            }
            ColorMode::Rainbow => self.rainbow_color(index, time_secs),
            ColorMode::Pulse => {
                let o = &self.options;
                let phase = time_secs * o.pulse_speed + index as f32 * o.pulse_offset;
                let intensity = (phase.sin() + 1.0) / 2.0;
                brighten(self.palette[0], o.pulse_amplitude * intensity)
            }
        }
    }

    /// Head color: the first segment color, lightened
    pub fn head_color(&self, time_secs: f32) -> [u8; 3] {
        brighten(self.segment_color(0, time_secs), self.options.head_glow)
    }

    fn rainbow_color(&self, index: usize, time_secs: f32) -> [u8; 3] {
        let hue = (index as f32 * self.options.hue_step + time_secs * self.options.animation_speed)
            .rem_euclid(1.0);
        to_rgb8(hue_to_rgb(hue))
    }
}

/// Move a color toward white by `amount` (0-1)
pub fn brighten(color: [u8; 3], amount: f32) -> [u8; 3] {
    let c = Vec3::new(color[0] as f32, color[1] as f32, color[2] as f32);
    to_rgb8((c + (Vec3::splat(255.0) - c) * amount.clamp(0.0, 1.0)) / 255.0)
}

/// Fully saturated, full value HSV to linear RGB (0-1)
fn hue_to_rgb(hue: f32) -> Vec3 {
    let h = hue * 6.0;
    let x = 1.0 - (h.rem_euclid(2.0) - 1.0).abs();
    match h as u32 {
        0 => Vec3::new(1.0, x, 0.0),
        1 => Vec3::new(x, 1.0, 0.0),
        2 => Vec3::new(0.0, 1.0, x),
        3 => Vec3::new(0.0, x, 1.0),
        4 => Vec3::new(x, 0.0, 1.0),
        _ => Vec3::new(1.0, 0.0, x),
    }
}

fn to_rgb8(c: Vec3) -> [u8; 3] {
    let c = (c.clamp(Vec3::ZERO, Vec3::ONE) * 255.0).round();
    [c.x as u8, c.y as u8, c.z as u8]
}
