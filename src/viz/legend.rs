//! Legend panel drawn to the right of the plot area.

use anyhow::Result;
use plotters::backend::DrawingBackend;
use plotters::coord::Shift;
use plotters::prelude::*;
use plotters::style::FontFamily;
use plotters::style::text_anchor::{HPos, Pos, VPos};

use super::text::truncate_to_width;
use super::types::ChartKind;

/// Width in pixels reserved for the legend panel.
pub const LEGEND_PANEL_WIDTH: u32 = 150;

/// Draw one entry per `(label, color)` as a single column starting at `top_px`.
///
/// Bar charts get square swatches, scatter charts get round markers, matching the plot glyphs.
pub fn draw_legend_panel<DB: DrawingBackend>(
    legend_area: &DrawingArea<DB, Shift>,
    items: &[(String, RGBColor)],
    title: &str,
    kind: ChartKind,
    top_px: i32,
) -> Result<()> {
    let (w_u32, _) = legend_area.dim_in_pixel();
    let w = w_u32 as i32;

    let font_px: u32 = 14;
    let line_h: i32 = font_px as i32 + 8;
    let pad_x: i32 = 8;
    let marker_radius: i32 = 5;
    let text_x = pad_x + 2 * marker_radius + 8;
    let max_text_w = (w - text_x - pad_x).max(40) as u32;

    let label_style: TextStyle =
        TextStyle::from((FontFamily::SansSerif, font_px)).pos(Pos::new(HPos::Left, VPos::Center));

    let mut y = top_px;
    if !title.trim().is_empty() {
        let title_style = TextStyle::from((FontFamily::SansSerif, 15))
            .pos(Pos::new(HPos::Left, VPos::Center));
        legend_area
            .draw(&Text::new(title.to_string(), (pad_x, y), title_style))
            .map_err(|e| anyhow::anyhow!("{:?}", e))?;
        y += line_h;
    }

    for (label, color) in items {
        let cx = pad_x + marker_radius;
        match kind {
            ChartKind::Bar => legend_area
                .draw(&Rectangle::new(
                    [
                        (cx - marker_radius, y - marker_radius),
                        (cx + marker_radius, y + marker_radius),
                    ],
                    color.filled(),
                ))
                .map_err(|e| anyhow::anyhow!("{:?}", e))?,
            ChartKind::Scatter => legend_area
                .draw(&Circle::new((cx, y), marker_radius, color.filled()))
                .map_err(|e| anyhow::anyhow!("{:?}", e))?,
        }
        let text = truncate_to_width(label, font_px, max_text_w);
        legend_area
            .draw(&Text::new(text, (text_x, y), label_style.clone()))
            .map_err(|e| anyhow::anyhow!("{:?}", e))?;
        y += line_h;
    }
    Ok(())
}
