//! Color definitions for charts

/// Common colors
pub(super) const COLOR_BACKGROUND: &str = "#FFFFFF"; // White
pub(super) const COLOR_TEXT: &str = "#24292F"; // Near black
pub(super) const COLOR_SUBTEXT: &str = "#57606A"; // Muted gray

/// Cell border, matches the background so cells read as separate tiles
pub(super) const COLOR_CELL_BORDER: &str = COLOR_BACKGROUND;
