//! SVG rendering with plotters.

use super::{BarChart, LineChart};
use crate::error::{Error, Result};
use crate::schema::{FieldValue, ResultTable};
use plotters::prelude::*;
use plotters::style::text_anchor::{HPos, Pos, VPos};
use std::collections::BTreeMap;
use std::path::Path;

const WIDTH: u32 = 1000;
const HEIGHT: u32 = 500;
const TITLE_FONT_SIZE: u32 = 24;
const LABEL_FONT_SIZE: u32 = 16;

type DrawResult = std::result::Result<(), Box<dyn std::error::Error>>;

/// One line of a line chart.
#[derive(Debug, Clone, PartialEq)]
pub(super) struct Series {
    pub label: Option<String>,
    /// Sorted by x.
    pub points: Vec<(f64, f64)>,
}

fn numeric(column: &str, row: usize, value: &FieldValue) -> Result<f64> {
    value.as_f64().ok_or_else(|| Error::NonNumericColumn {
        column: column.to_string(),
        row,
        value: value.to_string(),
    })
}

/// `(category, value)` per row, in row order.
pub(super) fn bar_data(table: &ResultTable, opts: &BarChart<'_>) -> Result<Vec<(String, f64)>> {
    let cat = table.column_index(opts.category)?;
    let val = table.column_index(opts.value)?;
    table
        .rows()
        .iter()
        .enumerate()
        .map(|(i, r)| Ok((r.values[cat].to_string(), numeric(opts.value, i, &r.values[val])?)))
        .collect()
}

/// Points grouped into lines by the series column, lines in natural key order.
pub(super) fn line_data(table: &ResultTable, opts: &LineChart<'_>) -> Result<Vec<Series>> {
    let x = table.column_index(opts.x)?;
    let y = table.column_index(opts.y)?;
    let s = opts.series.map(|c| table.column_index(c)).transpose()?;

    let mut lines: BTreeMap<Option<&FieldValue>, Vec<(f64, f64)>> = BTreeMap::new();
    for (i, row) in table.rows().iter().enumerate() {
        let point = (
            numeric(opts.x, i, &row.values[x])?,
            numeric(opts.y, i, &row.values[y])?,
        );
        lines
            .entry(s.map(|s| &row.values[s]))
            .or_default()
            .push(point);
    }

    Ok(lines
        .into_iter()
        .map(|(label, mut points)| {
            points.sort_by(|a, b| a.0.total_cmp(&b.0));
            Series {
                label: label.map(|l| l.to_string()),
                points,
            }
        })
        .collect())
}

/// Axis bounds with a margin; a zero-width range is widened by one unit.
/// Non-finite values are left out of the bounds.
fn padded_range(values: impl Iterator<Item = f64>) -> (f64, f64) {
    let (min, max) = values
        .filter(|v| v.is_finite())
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), v| {
            (lo.min(v), hi.max(v))
        });
    if !min.is_finite() || !max.is_finite() {
        return (0.0, 1.0);
    }
    let span = max - min;
    if span == 0.0 {
        (min - 1.0, max + 1.0)
    } else {
        (min - span * 0.05, max + span * 0.05)
    }
}

fn format_tick(v: f64) -> String {
    let a = v.abs();
    if a != 0.0 && !(1e-2..1e5).contains(&a) {
        return format!("{:.1e}", v);
    }
    let s = format!("{:.3}", v);
    let s = s.trim_end_matches('0').trim_end_matches('.');
    if s == "-0" {
        "0".to_string()
    } else {
        s.to_string()
    }
}

pub(super) fn draw_bars(path: &Path, opts: &BarChart<'_>, bars: &[(String, f64)]) -> DrawResult {
    let root = SVGBackend::new(path, (WIDTH, HEIGHT)).into_drawing_area();
    root.fill(&WHITE)?;

    let finite = || bars.iter().map(|(_, v)| *v).filter(|v| v.is_finite());
    let hi = finite().fold(0.0_f64, f64::max);
    let lo = finite().fold(0.0_f64, f64::min);
    let (lo, hi) = if hi == lo { (lo, lo + 1.0) } else { (lo * 1.1, hi * 1.15) };

    let mut chart = ChartBuilder::on(&root)
        .caption(&opts.title, ("sans-serif", TITLE_FONT_SIZE))
        .margin(10)
        .x_label_area_size(40)
        .y_label_area_size(70)
        .build_cartesian_2d(-0.5..(bars.len() as f64 - 0.5), lo..hi)?;

    chart
        .configure_mesh()
        .disable_x_mesh()
        .x_label_formatter(&|_| String::new())
        .y_label_formatter(&|v| format_tick(*v))
        .x_desc(opts.x_label)
        .y_desc(opts.y_label)
        .draw()?;

    let drawable = || bars.iter().enumerate().filter(|(_, (_, v))| v.is_finite());
    chart.draw_series(drawable().map(|(i, (_, v))| {
        let color = Palette99::pick(i).to_rgba();
        let x = i as f64;
        Rectangle::new([(x - 0.35, 0.0), (x + 0.35, *v)], color.filled())
    }))?;

    let caption = TextStyle::from(("sans-serif", LABEL_FONT_SIZE).into_font())
        .pos(Pos::new(HPos::Center, VPos::Bottom));
    chart.draw_series(drawable().map(|(i, (label, v))| {
        Text::new(
            format!("{} ({})", label, format_tick(*v)),
            (i as f64, v.max(0.0)),
            caption.clone(),
        )
    }))?;

    root.present()?;
    Ok(())
}

pub(super) fn draw_lines(path: &Path, opts: &LineChart<'_>, series: &[Series]) -> DrawResult {
    let all_points = || series.iter().flat_map(|s| s.points.iter().copied());
    // log10 of the x values; not possible once any x is zero or negative
    let log_x = opts.log_x && all_points().all(|(x, _)| x > 0.0);
    let tx = |x: f64| if log_x { x.log10() } else { x };

    let (x_lo, x_hi) = padded_range(all_points().map(|(x, _)| tx(x)));
    let (y_lo, y_hi) = padded_range(all_points().map(|(_, y)| y));

    let root = SVGBackend::new(path, (WIDTH, HEIGHT)).into_drawing_area();
    root.fill(&WHITE)?;

    let mut chart = ChartBuilder::on(&root)
        .caption(&opts.title, ("sans-serif", TITLE_FONT_SIZE))
        .margin(10)
        .x_label_area_size(40)
        .y_label_area_size(70)
        .build_cartesian_2d(x_lo..x_hi, y_lo..y_hi)?;

    chart
        .configure_mesh()
        .x_label_formatter(&|v| {
            if log_x {
                format_tick(10f64.powf(*v))
            } else {
                format_tick(*v)
            }
        })
        .y_label_formatter(&|v| format_tick(*v))
        .x_desc(opts.x_label)
        .y_desc(opts.y_label)
        .draw()?;

    for (idx, line) in series.iter().enumerate() {
        let color = Palette99::pick(idx).to_rgba();
        let points: Vec<(f64, f64)> = line.points.iter().map(|&(x, y)| (tx(x), y)).collect();

        let drawn = chart.draw_series(LineSeries::new(points.clone(), color.stroke_width(2)))?;
        if let Some(label) = &line.label {
            drawn
                .label(label.clone())
                .legend(move |(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], color.stroke_width(2)));
        }
        chart.draw_series(points.into_iter().map(|p| Circle::new(p, 3, color.filled())))?;
    }

    if series.iter().any(|s| s.label.is_some()) {
        chart
            .configure_series_labels()
            .background_style(&WHITE.mix(0.8))
            .border_style(&BLACK)
            .draw()?;
    }

    root.present()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::{Column, ColumnRole, ResultRecord};

    fn table() -> ResultTable {
        let mut t = ResultTable::new(vec![
            Column::new("algorithm", ColumnRole::Label),
            Column::new("nodes", ColumnRole::Dimension),
            Column::new("time", ColumnRole::Measurement),
        ]);
        for (a, n, time) in [("radix", 100, 0.3), ("dial", 10, 0.1), ("dial", 1, 0.05)] {
            t.push(ResultRecord::new(vec![a.into(), FieldValue::Int(n), time.into()]))
                .unwrap();
        }
        t
    }

    fn opts(series: Option<&str>) -> LineChart<'_> {
        LineChart {
            file_name: "x.svg".into(),
            title: "t".into(),
            x: "nodes",
            y: "time",
            series,
            x_label: "Nodes",
            y_label: "Time",
            log_x: true,
        }
    }

    #[test]
    fn line_data_groups_and_sorts() {
        let series = line_data(&table(), &opts(Some("algorithm"))).unwrap();
        assert_eq!(series.len(), 2);
        assert_eq!(series[0].label.as_deref(), Some("dial"));
        assert_eq!(series[0].points, vec![(1.0, 0.05), (10.0, 0.1)]);
        assert_eq!(series[1].points, vec![(100.0, 0.3)]);
    }

    #[test]
    fn line_data_without_series_is_one_line() {
        let series = line_data(&table(), &opts(None)).unwrap();
        assert_eq!(series.len(), 1);
        assert_eq!(series[0].label, None);
        assert_eq!(series[0].points.len(), 3);
    }

    #[test]
    fn text_axis_is_rejected() {
        let mut s = opts(None);
        s.x = "algorithm";
        assert!(matches!(
            line_data(&table(), &s),
            Err(Error::NonNumericColumn { .. })
        ));
    }

    #[test]
    fn single_value_range_is_widened() {
        assert_eq!(padded_range([3.0].into_iter()), (2.0, 4.0));
        let (lo, hi) = padded_range([0.0, 10.0].into_iter());
        assert!(lo < 0.0 && hi > 10.0);
    }

    #[test]
    fn non_finite_values_do_not_reach_the_axis() {
        assert_eq!(padded_range([1.0, f64::INFINITY, 3.0].into_iter()), (0.9, 3.1));
        assert_eq!(padded_range([f64::NAN, f64::NEG_INFINITY].into_iter()), (0.0, 1.0));
    }

    #[test]
    fn bars_with_an_infinite_value_still_render() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bars.svg");
        let opts = BarChart {
            file_name: "bars.svg".into(),
            title: "t".into(),
            category: "algorithm",
            value: "time",
            x_label: "Algorithm",
            y_label: "Time",
        };
        let bars = vec![("dial".to_string(), 0.5), ("radix".to_string(), f64::INFINITY)];
        draw_bars(&path, &opts, &bars).unwrap();
        assert!(std::fs::metadata(&path).unwrap().len() > 0);
    }

    #[test]
    fn ticks_are_compact() {
        assert_eq!(format_tick(100.0), "100");
        assert_eq!(format_tick(0.25), "0.25");
        assert_eq!(format_tick(0.0), "0");
        assert_eq!(format_tick(1_000_000.0), "1.0e6");
    }
}
