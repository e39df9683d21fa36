use plotters::style::RGBColor;

// matplotlib "tab" colors, one per polynomial order
pub const SERIES_COLORS: [RGBColor; 5] = [
    RGBColor(31, 119, 180),  // tab:blue
    RGBColor(255, 127, 14),  // tab:orange
    RGBColor(44, 160, 44),   // tab:green
    RGBColor(214, 39, 40),   // tab:red
    RGBColor(148, 103, 189), // tab:purple
];

// wraps for order ranges beyond the palette
pub fn series_color(index: usize) -> RGBColor {
    SERIES_COLORS[index % SERIES_COLORS.len()]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cycles_past_the_palette_end() {
        assert_eq!(series_color(0), SERIES_COLORS[0]);
        assert_eq!(series_color(4), SERIES_COLORS[4]);
        assert_eq!(series_color(5), SERIES_COLORS[0]);
        assert_eq!(series_color(12), SERIES_COLORS[2]);
    }
}
