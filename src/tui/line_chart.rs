//! Plotters-powered historical line chart widget for Ratatui.
//!
//! Why Plotters instead of Ratatui's built-in `Chart` widget?
//! - nicer axis + mesh rendering
//! - less manual work for ticks/labels
//! - easy to extend later (legend, annotations, exportable PNG/SVG backends, etc.)
//!
//! We render Plotters output into the Ratatui buffer using `plotters-ratatui-backend`.

use chrono::NaiveDate;
use plotters::prelude::*;
use plotters_ratatui_backend::widget_fn;
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Style},
    widgets::Widget,
};

use crate::report::format_compact;

/// A lightweight, render-only chart description.
///
/// The widget is intentionally data-driven: all series and bounds are computed
/// outside the render call. X values are point indices; `dates` maps them back
/// to calendar labels on the axis.
pub struct HistoryChart<'a> {
    /// Cumulative cases, deaths, and recovered series (x = point index).
    pub cases: &'a [(f64, f64)],
    pub deaths: &'a [(f64, f64)],
    pub recovered: &'a [(f64, f64)],
    /// Calendar dates, parallel to the series points.
    pub dates: &'a [NaiveDate],
    pub x_bounds: [f64; 2],
    pub y_bounds: [f64; 2],
}

impl Widget for HistoryChart<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        // When the available area is too small, Plotters may fail to build a chart.
        // In that case, we render a small hint rather than panicking.
        if area.width < 20 || area.height < 8 {
            buf.set_string(
                area.x,
                area.y,
                "Chart area too small (resize terminal).",
                Style::default().fg(Color::Yellow),
            );
            return;
        }

        let x0 = self.x_bounds[0];
        let x1 = self.x_bounds[1];
        let y0 = self.y_bounds[0];
        let y1 = self.y_bounds[1];

        if !(x0.is_finite() && x1.is_finite() && y0.is_finite() && y1.is_finite())
            || x1 <= x0
            || y1 <= y0
        {
            return;
        }

        // `plotters-ratatui-backend` draws Plotters primitives via Ratatui's
        // `Canvas` widget, which ultimately writes to the terminal buffer.
        //
        // We delegate rendering to the crate-provided widget helper to avoid
        // coupling our code to its internal backend types.
        let widget = widget_fn(move |root| {
            let mut chart = ChartBuilder::on(&root)
                // Small margins keep the chart readable without wasting space.
                .margin(1)
                // Terminal cells are low-res, so keep label areas compact.
                .set_label_area_size(LabelAreaPosition::Left, 7)
                .set_label_area_size(LabelAreaPosition::Bottom, 3)
                .build_cartesian_2d(x0..x1, y0..y1)?;

            // Axes + tick labels.
            //
            // We disable the mesh lines to reduce visual clutter in low-resolution
            // terminal rendering; the axes + labels are usually enough here.
            chart
                .configure_mesh()
                .disable_x_mesh()
                .disable_y_mesh()
                .x_labels(6)
                .y_labels(5)
                .x_label_formatter(&|v| fmt_date_tick(*v, self.dates))
                .y_label_formatter(&|v| format_compact(v.max(0.0) as u64))
                .label_style(("sans-serif", 10).into_font().color(&WHITE))
                .axis_style(&WHITE)
                .bold_line_style(&WHITE)
                .draw()?;

            // Series styling matches the metric palette used by the rest of
            // the dashboard (cases red, deaths orange, recovered green).
            let cases_color = RGBColor(0xff, 0x6b, 0x6b);
            let deaths_color = RGBColor(0xff, 0x8c, 0x42);
            let recovered_color = RGBColor(0x51, 0xcf, 0x66);

            chart.draw_series(LineSeries::new(self.cases.iter().copied(), &cases_color))?;
            chart.draw_series(LineSeries::new(self.deaths.iter().copied(), &deaths_color))?;
            chart.draw_series(LineSeries::new(
                self.recovered.iter().copied(),
                &recovered_color,
            ))?;

            Ok(())
        });

        widget.render(area, buf);
    }
}

/// Map a fractional point index back to a short month/year label.
fn fmt_date_tick(v: f64, dates: &[NaiveDate]) -> String {
    if dates.is_empty() || !v.is_finite() || v < 0.0 {
        return String::new();
    }
    let i = (v.round() as usize).min(dates.len() - 1);
    dates[i].format("%b %y").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn date_ticks_clamp_to_the_series_range() {
        let dates = vec![
            NaiveDate::from_ymd_opt(2020, 1, 22).unwrap(),
            NaiveDate::from_ymd_opt(2020, 12, 31).unwrap(),
        ];
        assert_eq!(fmt_date_tick(0.0, &dates), "Jan 20");
        assert_eq!(fmt_date_tick(1.0, &dates), "Dec 20");
        assert_eq!(fmt_date_tick(9.0, &dates), "Dec 20");
        assert_eq!(fmt_date_tick(0.0, &[]), "");
    }
}
