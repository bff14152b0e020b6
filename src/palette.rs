//! Named heat map palettes
//!
//! Entry 0 of every palette is reserved for cells whose value is exactly zero.
//! The remaining entries form the graduated scale, light to dark.

/// Ordered color sequence for a heat map
#[derive(Debug, PartialEq, Eq)]
pub struct Palette {
    pub name: &'static str,
    pub colors: &'static [&'static str],
}

impl Palette {
    pub fn zero_color(&self) -> &'static str {
        self.colors[0]
    }

    /// Entries after the reserved zero color
    pub fn graduated(&self) -> &'static [&'static str] {
        &self.colors[1..]
    }
}

pub const BLUE: Palette = Palette {
    name: "blue",
    colors: &[
        "#E3F2FD", "#BBDEFB", "#90CAF9", "#64B5F6", "#42A5F5", "#2196F3", "#1E88E5", "#1976D2",
        "#1565C0", "#0D47A1",
    ],
};

pub const ORANGE: Palette = Palette {
    name: "orange",
    colors: &[
        "#FFF3E0", "#FFE0B2", "#FFCC80", "#FFB74D", "#FFA726", "#FF9800", "#FB8C00", "#F57C00",
        "#EF6C00", "#E65100",
    ],
};

pub const PURPLE: Palette = Palette {
    name: "purple",
    colors: &[
        "#F3E5F5", "#E1BEE7", "#CE93D8", "#BA68C8", "#AB47BC", "#9C27B0", "#8E24AA", "#7B1FA2",
        "#6A1B9A", "#4A148C",
    ],
};

pub const PINK: Palette = Palette {
    name: "pink",
    colors: &[
        "#FCE4EC", "#F8BBD0", "#F48FB1", "#F06292", "#EC407A", "#E91E63", "#D81B60", "#C2185B",
        "#AD1457", "#880E4F",
    ],
};

pub const INDIGO: Palette = Palette {
    name: "indigo",
    colors: &[
        "#E8EAF6", "#C5CAE9", "#9FA8DA", "#7986CB", "#5C6BC0", "#3F51B5", "#3949AB", "#303F9F",
        "#283593", "#1A237E",
    ],
};

pub const GREEN: Palette = Palette {
    name: "green",
    colors: &[
        "#E8F5E9", "#C8E6C9", "#A5D6A7", "#81C784", "#66BB6A", "#4CAF50", "#43A047", "#388E3C",
        "#2E7D32", "#1B5E20",
    ],
};

pub const RED: Palette = Palette {
    name: "red",
    colors: &[
        "#FFEBEE", "#FFCDD2", "#EF9A9A", "#E57373", "#EF5350", "#F44336", "#E53935", "#D32F2F",
        "#C62828", "#B71C1C",
    ],
};

pub const TEAL: Palette = Palette {
    name: "teal",
    colors: &[
        "#E0F2F1", "#B2DFDB", "#80CBC4", "#4DB6AC", "#26A69A", "#009688", "#00897B", "#00796B",
        "#00695C", "#004D40",
    ],
};

/// GitHub contribution graph colors
pub const GITHUB: Palette = Palette {
    name: "github",
    colors: &["#EBEDF0", "#9BE9A8", "#40C463", "#30A14E", "#216E39"],
};

pub const PALETTES: [&Palette; 9] = [
    &BLUE, &ORANGE, &PURPLE, &PINK, &INDIGO, &GREEN, &RED, &TEAL, &GITHUB,
];

pub fn palette_by_name(name: &str) -> Option<&'static Palette> {
    PALETTES
        .iter()
        .copied()
        .find(|p| p.name.eq_ignore_ascii_case(name))
}

pub fn palette_names() -> Vec<&'static str> {
    PALETTES.iter().map(|p| p.name).collect()
}

/// Parse `#RRGGBB` into components
pub fn hex_to_rgb(hex: &str) -> Option<(u8, u8, u8)> {
    let digits = hex.strip_prefix('#')?;
    if digits.len() != 6 {
        return None;
    }
    let channel = |i: usize| u8::from_str_radix(digits.get(i..i + 2)?, 16).ok();
    Some((channel(0)?, channel(2)?, channel(4)?))
}
