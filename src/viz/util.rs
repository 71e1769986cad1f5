//! Utility functions for visualization: colours, axis ranges, label formatting.

use plotters::prelude::*;

/// Microsoft Office (2013+) chart series palette.
/// Order: Blue, Orange, Gray, Gold, Light Blue, Green, Dark Blue, Dark Orange, Dark Gray, Brownish Gold.
const OFFICE10: [RGBColor; 10] = [
    RGBColor(68, 114, 196),  // blue      (#4472C4)
    RGBColor(237, 125, 49),  // orange    (#ED7D31)
    RGBColor(165, 165, 165), // gray      (#A5A5A5)
    RGBColor(255, 192, 0),   // gold      (#FFC000)
    RGBColor(91, 155, 213),  // light blue(#5B9BD5)
    RGBColor(112, 173, 71),  // green     (#70AD47)
    RGBColor(38, 68, 120),   // dark blue (#264478)
    RGBColor(158, 72, 14),   // dark org. (#9E480E)
    RGBColor(99, 99, 99),    // dark gray (#636363)
    RGBColor(153, 115, 0),   // brownish  (#997300)
];

/// Get a color from the Office palette.
#[inline]
pub fn office_color(idx: usize) -> RGBColor {
    OFFICE10[idx % OFFICE10.len()]
}

pub fn rgb_to_hex(c: RGBColor) -> String {
    format!("#{:02X}{:02X}{:02X}", c.0, c.1, c.2)
}

/// Parse `#RRGGBB` (leading `#` optional) or one of a few named colours.
pub fn parse_color(s: &str) -> Option<RGBColor> {
    match s.to_ascii_lowercase().as_str() {
        "red" => return Some(RGBColor(255, 0, 0)),
        "black" => return Some(RGBColor(0, 0, 0)),
        "gray" | "grey" => return Some(RGBColor(128, 128, 128)),
        _ => {}
    }
    let hex = s.strip_prefix('#').unwrap_or(s);
    if hex.len() != 6 || !hex.is_ascii() {
        return None;
    }
    let r = u8::from_str_radix(&hex[0..2], 16).ok()?;
    let g = u8::from_str_radix(&hex[2..4], 16).ok()?;
    let b = u8::from_str_radix(&hex[4..6], 16).ok()?;
    Some(RGBColor(r, g, b))
}

/// Year axis range with half a year of padding on each side so bars and markers are not clipped.
pub fn year_range(years: impl IntoIterator<Item = i32>) -> Option<(f64, f64)> {
    let mut it = years.into_iter();
    let first = it.next()?;
    let (min, max) = it.fold((first, first), |(lo, hi), y| (lo.min(y), hi.max(y)));
    Some((min as f64 - 0.5, max as f64 + 0.5))
}

/// Value axis range. Bars always start at zero; markers get 10% headroom around the data.
pub fn value_range(values: impl IntoIterator<Item = f64>, from_zero: bool) -> Option<(f64, f64)> {
    let mut it = values.into_iter().filter(|v| v.is_finite());
    let first = it.next()?;
    let (mut min, mut max) = it.fold((first, first), |(lo, hi), v| (lo.min(v), hi.max(v)));
    if from_zero {
        min = min.min(0.0);
        max = max.max(0.0);
    }
    if (max - min).abs() < f64::EPSILON {
        min -= 1.0;
        max += 1.0;
    }
    let pad = (max - min) * 0.1;
    if from_zero {
        Some((if min < 0.0 { min - pad } else { min }, if max > 0.0 { max + pad } else { max }))
    } else {
        Some((min - pad, max + pad))
    }
}

/// Value tick label: fewer decimals for larger magnitudes.
pub fn format_value(v: f64) -> String {
    // no "-0" labels
    let v = if v == 0.0 { 0.0 } else { v };
    let a = v.abs();
    let prec = if a >= 100.0 {
        0
    } else if a >= 10.0 {
        1
    } else {
        2
    };
    format!("{:.*}", prec, v)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn palette_wraps() {
        assert_eq!(office_color(0), office_color(10));
        assert_eq!(rgb_to_hex(office_color(1)), "#ED7D31");
    }

    #[test]
    fn colors_round_trip_through_hex() {
        assert_eq!(parse_color("#4472C4"), Some(office_color(0)));
        assert_eq!(parse_color("Red"), Some(RGBColor(255, 0, 0)));
        assert_eq!(parse_color("#12"), None);
    }

    #[test]
    fn bar_range_starts_at_zero() {
        let (lo, hi) = value_range([78.5, 61.5], true).unwrap();
        assert_eq!(lo, 0.0);
        assert!(hi > 78.5);
    }

    #[test]
    fn flat_values_get_padding() {
        let (lo, hi) = value_range([5.0], false).unwrap();
        assert!(lo < 5.0 && hi > 5.0);
        assert!(value_range(Vec::<f64>::new(), true).is_none());
    }
}
