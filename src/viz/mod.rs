//! Chart building and rendering.
//!
//! - [`build_chart`] turns filtered records into a backend-independent [`ChartSpec`]
//!   (x = year, y = indicator value, one series per country, optional policy-change overlay)
//! - [`render_svg`] / [`save_svg`] draw a spec to **SVG** with Plotters
//! - Distinct series colours (Microsoft Office palette), keyed by the country's dataset position

pub mod legend;
pub mod text;
pub mod types;
pub mod util;

pub use types::{
    Annotation, Axis, ChartKind, ChartSpec, MIN_CHART_HEIGHT, MIN_CHART_WIDTH, POLICY_CHANGE_TEXT,
    POLICY_CHANGE_YEAR, ReferenceLine, Series, SeriesPoint,
};

use crate::models::{HealthRecord, Indicator};
use crate::stats;
use anyhow::{Result, anyhow};

use plotters::backend::DrawingBackend;
use plotters::coord::Shift;
use plotters::coord::cartesian::Cartesian2d;
use plotters::coord::ranged1d::Ranged;
use plotters::coord::types::RangedCoordf64;
use plotters::prelude::*;
use plotters::style::text_anchor::{HPos, Pos, VPos};
use plotters::style::{FontFamily, FontTransform};

use plotters_svg::SVGBackend;

use std::collections::BTreeMap;
use std::path::Path;

use legend::{LEGEND_PANEL_WIDTH, draw_legend_panel};
use util::{format_value, office_color, parse_color, rgb_to_hex, value_range, year_range};

/// How a chart should be built from the filtered records.
#[derive(Debug, Clone, PartialEq)]
pub struct ChartOptions {
    pub kind: ChartKind,
    pub title: String,
    /// Draw the reference line and "Policy Change" annotation at [`POLICY_CHANGE_YEAR`].
    pub policy_marker: bool,
}

/// `"{indicator} Over Time"`, optionally followed by the chart kind, e.g.
/// `"Diabetes Over Time (Bar Chart)"`.
pub fn chart_title(indicator: Indicator, kind_suffix: Option<ChartKind>) -> String {
    match kind_suffix {
        Some(kind) => format!("{} Over Time ({})", indicator.column(), kind.title_suffix()),
        None => format!("{} Over Time", indicator.column()),
    }
}

/// Map filtered records to a chart specification.
///
/// `palette_order` lists every country of the dataset; a country's position there picks its
/// colour, so colours stay stable while the selection changes. Series appear in order of first
/// appearance in `records`, points sorted by year.
///
/// With `policy_marker` set and at least one record, a vertical line is placed at
/// [`POLICY_CHANGE_YEAR`] from zero up to the largest value in `records`, with an annotation at
/// its top. For an empty `records` there is no largest value and the overlay is omitted.
pub fn build_chart(
    records: &[HealthRecord],
    palette_order: &[&str],
    indicator: Indicator,
    options: &ChartOptions,
) -> ChartSpec {
    let mut series: Vec<Series> = Vec::new();
    for r in records {
        let point = SeriesPoint {
            year: r.year,
            value: r.value(indicator),
        };
        match series.iter_mut().find(|s| s.name == r.country) {
            Some(s) => s.points.push(point),
            None => {
                let idx = palette_order
                    .iter()
                    .position(|c| *c == r.country)
                    .unwrap_or(palette_order.len() + series.len());
                series.push(Series {
                    name: r.country.clone(),
                    color: rgb_to_hex(office_color(idx)),
                    points: vec![point],
                });
            }
        }
    }
    for s in series.iter_mut() {
        s.points.sort_by_key(|p| p.year);
    }

    let max_value = if options.policy_marker {
        stats::max_value(records, indicator)
    } else {
        None
    };
    let reference_line = max_value.map(|max| ReferenceLine {
        x: POLICY_CHANGE_YEAR as f64,
        y0: 0.0,
        y1: max,
        color: "Red".to_string(),
        width: 2,
    });
    let annotations: Vec<Annotation> = max_value
        .map(|max| Annotation {
            x: POLICY_CHANGE_YEAR as f64,
            y: max,
            text: POLICY_CHANGE_TEXT.to_string(),
            show_arrow: true,
            arrow_head: 2,
            ax: 0,
            ay: -40,
        })
        .into_iter()
        .collect();

    let marker_year = reference_line.as_ref().map(|_| POLICY_CHANGE_YEAR);
    let x_range = year_range(records.iter().map(|r| r.year).chain(marker_year));
    let from_zero = options.kind == ChartKind::Bar || reference_line.is_some();
    let y_range = value_range(records.iter().map(|r| r.value(indicator)), from_zero);

    ChartSpec {
        title: options.title.clone(),
        kind: options.kind,
        indicator,
        x_axis: Axis {
            title: "Year".to_string(),
            range: x_range,
        },
        y_axis: Axis {
            title: indicator.column().to_string(),
            range: y_range,
        },
        series,
        reference_line,
        annotations,
    }
}

/// Render a spec to an SVG document held in memory.
pub fn render_svg(spec: &ChartSpec, width: u32, height: u32) -> Result<String> {
    if width < MIN_CHART_WIDTH || height < MIN_CHART_HEIGHT {
        return Err(anyhow!("chart size {width}x{height} is too small"));
    }
    let mut buf = String::new();
    {
        let root = SVGBackend::with_string(&mut buf, (width, height)).into_drawing_area();
        draw_chart(root, spec)?;
    }
    Ok(buf)
}

/// Render a spec and write it to `out_path`.
pub fn save_svg<P: AsRef<Path>>(spec: &ChartSpec, out_path: P, width: u32, height: u32) -> Result<()> {
    let svg = render_svg(spec, width, height)?;
    std::fs::write(out_path, svg)?;
    Ok(())
}

fn draw_chart<DB>(root: DrawingArea<DB, Shift>, spec: &ChartSpec) -> Result<()>
where
    DB: DrawingBackend,
{
    const MARGIN: i32 = 16;
    const TITLE_H: i32 = 44;
    const LEFT_LABELS: i32 = 64;
    const BOTTOM_LABELS: i32 = 52;

    root.fill(&WHITE).map_err(|e| anyhow!("{:?}", e))?;

    let (root_w, _) = root.dim_in_pixel();
    let show_legend = !spec.series.is_empty() && root_w > LEGEND_PANEL_WIDTH * 3;
    let (plot_area, legend_area_opt): (DrawingArea<DB, Shift>, Option<DrawingArea<DB, Shift>>) =
        if show_legend {
            let (plot, legend) = root.split_horizontally((root_w - LEGEND_PANEL_WIDTH) as i32);
            (plot, Some(legend))
        } else {
            (root, None)
        };

    let (pw, ph) = plot_area.dim_in_pixel();
    let (left, top, right, bottom) = (
        MARGIN + LEFT_LABELS,
        TITLE_H + MARGIN,
        pw as i32 - MARGIN,
        ph as i32 - BOTTOM_LABELS,
    );
    let x_range = spec.x_axis.range.unwrap_or((0.0, 1.0));
    let y_range = spec.y_axis.range.unwrap_or((0.0, 1.0));

    // Backend pixel ranges are absolute, the layout offsets are relative to `plot_area`.
    let (area_x, area_y) = plot_area.get_pixel_range();
    let chart = plot_area.apply_coord_spec(Cartesian2d::<RangedCoordf64, RangedCoordf64>::new(
        x_range.0..x_range.1,
        y_range.0..y_range.1,
        (
            area_x.start + left..area_x.start + right,
            area_y.start + top..area_y.start + bottom,
        ),
    ));

    // ----------------------------
    // 1) Title
    // ----------------------------
    let title_style = TextStyle::from((FontFamily::SansSerif, 20)).pos(Pos::new(HPos::Left, VPos::Top));
    plot_area
        .draw(&Text::new(spec.title.clone(), (left, 14), title_style))
        .map_err(|e| anyhow!("{:?}", e))?;

    // ----------------------------
    // 2) Grid, ticks, axis titles
    // ----------------------------
    let grid = ShapeStyle {
        color: RGBColor(225, 225, 225).to_rgba(),
        filled: false,
        stroke_width: 1,
    };
    let tick_right = TextStyle::from((FontFamily::SansSerif, 12)).pos(Pos::new(HPos::Right, VPos::Center));
    let tick_below = TextStyle::from((FontFamily::SansSerif, 12)).pos(Pos::new(HPos::Center, VPos::Top));

    if !spec.is_empty() {
        let value_axis = RangedCoordf64::from(y_range.0..y_range.1);
        for t in value_axis.key_points(6) {
            chart
                .draw(&PathElement::new(vec![(x_range.0, t), (x_range.1, t)], grid))
                .map_err(|e| anyhow!("{:?}", e))?;
            chart
                .draw(&(EmptyElement::at((x_range.0, t))
                    + Text::new(format_value(t), (-6, 0), tick_right.clone())))
                .map_err(|e| anyhow!("{:?}", e))?;
        }
        // one tick per whole year
        for year in (x_range.0.ceil() as i32)..=(x_range.1.floor() as i32) {
            chart
                .draw(&(EmptyElement::at((year as f64, y_range.0))
                    + PathElement::new(vec![(0, 0), (0, 5)], BLACK)
                    + Text::new(year.to_string(), (0, 8), tick_below.clone())))
                .map_err(|e| anyhow!("{:?}", e))?;
        }
    }

    chart
        .draw(&Rectangle::new(
            [(x_range.0, y_range.1), (x_range.1, y_range.0)],
            ShapeStyle {
                color: BLACK.mix(0.6),
                filled: false,
                stroke_width: 1,
            },
        ))
        .map_err(|e| anyhow!("{:?}", e))?;

    let axis_desc = TextStyle::from((FontFamily::SansSerif, 14)).pos(Pos::new(HPos::Center, VPos::Bottom));
    plot_area
        .draw(&Text::new(
            spec.x_axis.title.clone(),
            ((left + right) / 2, ph as i32 - 8),
            axis_desc.clone(),
        ))
        .map_err(|e| anyhow!("{:?}", e))?;
    plot_area
        .draw(&Text::new(
            spec.y_axis.title.clone(),
            (MARGIN + 4, (top + bottom) / 2),
            axis_desc.transform(FontTransform::Rotate270),
        ))
        .map_err(|e| anyhow!("{:?}", e))?;

    // ----------------------------
    // 3) Series
    // ----------------------------
    let colors: Vec<RGBColor> = spec
        .series
        .iter()
        .enumerate()
        .map(|(idx, s)| parse_color(&s.color).unwrap_or_else(|| office_color(idx)))
        .collect();

    match spec.kind {
        ChartKind::Bar => {
            // Bars sharing a year split the slot between them.
            let mut by_year: BTreeMap<i32, Vec<(usize, f64)>> = BTreeMap::new();
            for (idx, s) in spec.series.iter().enumerate() {
                for p in &s.points {
                    by_year.entry(p.year).or_default().push((idx, p.value));
                }
            }
            let group_width = 0.8f64;
            for (year, bars) in by_year {
                let slot = group_width / bars.len() as f64;
                for (k, (idx, value)) in bars.into_iter().enumerate() {
                    let x0 = year as f64 - group_width / 2.0 + k as f64 * slot;
                    chart
                        .draw(&Rectangle::new(
                            [(x0, value.max(0.0)), (x0 + slot, value.min(0.0))],
                            colors[idx].filled(),
                        ))
                        .map_err(|e| anyhow!("{:?}", e))?;
                }
            }
        }
        ChartKind::Scatter => {
            for (idx, s) in spec.series.iter().enumerate() {
                for p in &s.points {
                    chart
                        .draw(&Circle::new((p.year as f64, p.value), 6, colors[idx].filled()))
                        .map_err(|e| anyhow!("{:?}", e))?;
                }
            }
        }
    }

    if spec.is_empty() {
        let center = TextStyle::from((FontFamily::SansSerif, 16)).pos(Pos::new(HPos::Center, VPos::Center));
        chart
            .draw(&Text::new(
                "No data for the current selection",
                ((x_range.0 + x_range.1) / 2.0, (y_range.0 + y_range.1) / 2.0),
                center,
            ))
            .map_err(|e| anyhow!("{:?}", e))?;
    }

    // ----------------------------
    // 4) Overlay
    // ----------------------------
    if let Some(line) = &spec.reference_line {
        let color = parse_color(&line.color).unwrap_or(RED);
        let style = ShapeStyle {
            color: color.to_rgba(),
            filled: false,
            stroke_width: line.width,
        };
        chart
            .draw(&PathElement::new(vec![(line.x, line.y0), (line.x, line.y1)], style))
            .map_err(|e| anyhow!("{:?}", e))?;
    }

    // Annotation offsets are in pixels from the annotated point.
    let note_style = TextStyle::from((FontFamily::SansSerif, 13)).pos(Pos::new(HPos::Center, VPos::Bottom));
    for note in &spec.annotations {
        let at = (note.x, note.y);
        if note.show_arrow {
            chart
                .draw(&(EmptyElement::at(at)
                    + PathElement::new(vec![(note.ax, note.ay + 2), (0, -2)], BLACK)))
                .map_err(|e| anyhow!("{:?}", e))?;
            if note.arrow_head > 0 {
                let size = 4 + note.arrow_head as i32;
                chart
                    .draw(&(EmptyElement::at(at)
                        + Polygon::new(
                            vec![(0, -1), (-size / 2, -1 - size), (size / 2, -1 - size)],
                            BLACK.filled(),
                        )))
                    .map_err(|e| anyhow!("{:?}", e))?;
            }
        }
        chart
            .draw(&(EmptyElement::at(at)
                + Text::new(note.text.clone(), (note.ax, note.ay), note_style.clone())))
            .map_err(|e| anyhow!("{:?}", e))?;
    }

    // ----------------------------
    // 5) Legend & present
    // ----------------------------
    if let Some(ref legend_area) = legend_area_opt {
        let items: Vec<(String, RGBColor)> = spec
            .series
            .iter()
            .zip(colors.iter())
            .map(|(s, c)| (s.name.clone(), *c))
            .collect();
        draw_legend_panel(legend_area, &items, "country", spec.kind, top)?;
    }

    plot_area.present().map_err(|e| anyhow!("{:?}", e))?;
    if let Some(ref legend_area) = legend_area_opt {
        legend_area.present().map_err(|e| anyhow!("{:?}", e))?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dataset::Dataset;

    fn bar_options(title: &str, marker: bool) -> ChartOptions {
        ChartOptions {
            kind: ChartKind::Bar,
            title: title.to_string(),
            policy_marker: marker,
        }
    }

    #[test]
    fn title_formats() {
        assert_eq!(chart_title(Indicator::LifeExpectancy, None), "Life Expectancy Over Time");
        assert_eq!(
            chart_title(Indicator::Vaccination, Some(ChartKind::Scatter)),
            "Vaccination Over Time (Scatter Plot)"
        );
    }

    #[test]
    fn overlay_height_is_filtered_max() {
        let ds = Dataset::sample();
        let spec = build_chart(
            ds.records(),
            &ds.countries(),
            Indicator::InfantMortality,
            &bar_options("t", true),
        );
        let line = spec.reference_line.expect("overlay");
        assert_eq!(line.x, 2022.0);
        assert_eq!(line.y0, 0.0);
        assert_eq!(line.y1, 40.0);
        assert_eq!(spec.annotations.len(), 1);
        assert_eq!(spec.annotations[0].text, "Policy Change");
        assert_eq!(spec.annotations[0].y, 40.0);
    }

    #[test]
    fn empty_records_omit_overlay() {
        let spec = build_chart(&[], &[], Indicator::Diabetes, &bar_options("t", true));
        assert!(spec.reference_line.is_none());
        assert!(spec.annotations.is_empty());
        assert!(spec.is_empty());
        assert_eq!(spec.x_axis.range, None);
    }

    #[test]
    fn colours_follow_dataset_position() {
        let ds = Dataset::sample();
        let rwanda: Vec<HealthRecord> = ds
            .records()
            .iter()
            .filter(|r| r.country == "Rwanda")
            .cloned()
            .collect();
        let spec = build_chart(&rwanda, &ds.countries(), Indicator::Vaccination, &bar_options("t", false));
        assert_eq!(spec.series.len(), 1);
        assert_eq!(spec.series[0].color, rgb_to_hex(office_color(3)));
    }

    #[test]
    fn svg_has_title() {
        let ds = Dataset::sample();
        let spec = build_chart(
            ds.records(),
            &ds.countries(),
            Indicator::LifeExpectancy,
            &bar_options("Life Expectancy Over Time", true),
        );
        let svg = render_svg(&spec, 900, 500).unwrap();
        assert!(svg.contains("<svg"));
        assert!(svg.contains("Life Expectancy Over Time"));
        assert!(svg.contains("Policy Change"));
    }

    #[test]
    fn value_ticks_are_labelled() {
        let ds = Dataset::sample();
        let spec = build_chart(
            ds.records(),
            &ds.countries(),
            Indicator::Vaccination,
            &bar_options("Vaccination Over Time", false),
        );
        let svg = render_svg(&spec, 900, 500).unwrap();
        let has_label = |label: &str| {
            svg.contains(&format!(">{label}<")) || svg.lines().any(|l| l.trim() == label)
        };
        // y axis starts at zero, years 2020..=2024 are all labelled
        assert!(has_label("0.00"));
        assert!(!has_label("-0.00"));
        for year in 2020..=2024 {
            assert!(has_label(&year.to_string()), "missing year tick {year}");
        }
    }

    #[test]
    fn tiny_canvas_is_error() {
        let spec = build_chart(&[], &[], Indicator::Diabetes, &bar_options("t", false));
        assert!(render_svg(&spec, 10, 10).is_err());
    }
}
