use health_dash::controller::{self, Event, Selection, reduce};
use health_dash::viz::{self, ChartKind, ChartOptions};
use health_dash::{Dataset, Indicator, Variant};
use std::fs;

fn write_and_check(spec: &viz::ChartSpec, name: &str) -> String {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join(format!("health_viz_{}.svg", name));
    viz::save_svg(spec, &path, 900, 500).unwrap();
    let meta = fs::metadata(&path).expect("file created");
    assert!(meta.len() > 0, "svg has content");
    let svg = fs::read_to_string(&path).unwrap();
    assert!(svg.starts_with("<svg"), "svg root element");
    svg
}

#[test]
fn annotated_chart_draws_title_marker_and_legend() {
    let data = Dataset::sample();
    let sel = Selection::initial(&data).unwrap();
    let spec = controller::render(&data, &sel, Variant::Annotated).unwrap();
    let svg = write_and_check(&spec, "annotated");

    assert!(svg.contains("Life Expectancy Over Time"));
    assert!(svg.contains("Policy Change"));
    assert!(svg.contains("Rwanda"));
    assert!(svg.contains("Burundi"));
    assert!(svg.contains("USA"));
    assert!(svg.contains("<rect"));
}

#[test]
fn scatter_chart_uses_markers() {
    let data = Dataset::sample();
    let sel = Selection::initial(&data).unwrap();
    let spec = controller::render(&data, &sel, Variant::Toggle).unwrap();
    assert_eq!(spec.kind, ChartKind::Scatter);
    let svg = write_and_check(&spec, "scatter");

    assert!(svg.contains("Life Expectancy Over Time (Scatter Plot)"));
    assert!(svg.contains("<circle"));
    assert!(!svg.contains("Policy Change"));
}

#[test]
fn bar_after_one_click() {
    let data = Dataset::sample();
    let bounds = data.year_bounds().unwrap();
    let sel = reduce(&Selection::initial(&data).unwrap(), &Event::ToggleChartKind, bounds);
    let spec = controller::render(&data, &sel, Variant::Toggle).unwrap();
    let svg = write_and_check(&spec, "bar");
    assert!(svg.contains("(Bar Chart)"));
}

#[test]
fn empty_chart_still_renders() {
    let spec = viz::build_chart(
        &[],
        &[],
        Indicator::Vaccination,
        &ChartOptions {
            kind: ChartKind::Bar,
            title: viz::chart_title(Indicator::Vaccination, None),
            policy_marker: true,
        },
    );
    assert!(spec.is_empty());
    assert!(spec.reference_line.is_none());
    let svg = write_and_check(&spec, "empty");
    assert!(svg.contains("No data for the current selection"));
}

#[test]
fn tiny_canvas_is_rejected() {
    let data = Dataset::sample();
    let sel = Selection::initial(&data).unwrap();
    let spec = controller::render(&data, &sel, Variant::Annotated).unwrap();
    assert!(viz::render_svg(&spec, 100, 100).is_err());
}
