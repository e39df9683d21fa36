extern crate nalgebra as na;

use plotters::coord::Shift;
use plotters::prelude::IntoLogRange;
use plotters::prelude::*;
use plotters::style::{FontDesc, FontFamily, FontStyle};

use crate::case::CaseConfig;
use crate::error::VerificationError;
use crate::plot::palette;
use crate::plot::render_err;
use crate::plot::triangle::{SlopeTriangle, TriangleSketch};
use crate::richardson::{observed_rates, richardson_extrapolation};
use crate::table::{Quantity, SampleTable};

const X_AXIS_LABEL: &str = "1/√DoFs";
const TRIANGLE_SIZE: f64 = 0.5;
// width ratio of the main panel when rate panels are shown, 6:2 as in the
// original study figures
const MAIN_PANEL_FRACTION: f64 = 0.75;

pub struct OrderSeries {
    pub order: u32,
    pub color: RGBColor,
    // (1/sqrt(DoF), |value - reference|), positive errors only
    pub points: Vec<(f64, f64)>,
    // (1/sqrt(DoF) of the finer sample, local observed rate)
    pub rates: Vec<(f64, f64)>,
}

pub struct FigurePage {
    pub quantity: Quantity,
    pub reference: f64,
    pub series: Vec<OrderSeries>,
    pub triangles: Vec<SlopeTriangle>,
    pub rate_panels: bool,
}

impl FigurePage {
    pub fn build(
        table: &SampleTable,
        case: &CaseConfig,
        quantity: Quantity,
        rate_panels: bool,
    ) -> Result<Self, VerificationError> {
        let [(f1, h1), (f2, h2)] = table.finest_pair(case.p_reference, quantity)?;
        let reference = richardson_extrapolation(f1, f2, h1, h2, case.p_reference)?;

        let mut series = Vec::with_capacity(case.p_range.len());
        let mut triangles = Vec::with_capacity(case.p_range.len());
        for (index, &order) in case.p_range.iter().enumerate() {
            let group = table.order_samples(order);
            let resolution =
                na::DVector::from_iterator(group.len(), group.iter().map(|s| s.one_sqrt_dof));
            let error = na::DVector::from_iterator(
                group.len(),
                group.iter().map(|s| (quantity.value(s) - reference).abs()),
            );
            let rates = observed_rates(&error, &resolution);

            // zero error cannot be placed on a log axis
            let points = resolution
                .iter()
                .zip(error.iter())
                .filter(|(_, &e)| e > 0.0)
                .map(|(&h, &e)| (h, e))
                .collect();
            let rate_points = rates
                .iter()
                .enumerate()
                .filter(|(_, r)| r.is_finite())
                .map(|(i, &r)| (resolution[i + 1], r))
                .collect();

            let anchor = case.anchor(quantity, order)?;
            triangles.push(SlopeTriangle {
                anchor,
                size: TRIANGLE_SIZE,
                rise: order + 1,
            });
            series.push(OrderSeries {
                order,
                color: palette::series_color(index),
                points,
                rates: rate_points,
            });
        }

        Ok(FigurePage {
            quantity,
            reference,
            series,
            triangles,
            rate_panels,
        })
    }

    pub fn render<DB: DrawingBackend>(
        &self,
        area: &DrawingArea<DB, Shift>,
    ) -> Result<(), VerificationError> {
        area.fill(&WHITE).map_err(render_err)?;

        let (main_area, rate_areas) = if self.rate_panels && !self.series.is_empty() {
            let (width, _) = area.dim_in_pixel();
            let split = (width as f64 * MAIN_PANEL_FRACTION) as i32;
            let (left, right) = area.split_horizontally(split);
            (left, right.split_evenly((self.series.len(), 1)))
        } else {
            (area.clone(), Vec::new())
        };

        let (x_range, y_range, sketches) = self.layout();
        let sci = |v: &f64| format!("{:.0e}", v);

        let mut chart = ChartBuilder::on(&main_area)
            .margin(15)
            .x_label_area_size(45)
            .y_label_area_size(70)
            .build_cartesian_2d(
                (x_range.0..x_range.1).log_scale(),
                (y_range.0..y_range.1).log_scale(),
            )
            .map_err(render_err)?;
        chart
            .configure_mesh()
            .x_desc(X_AXIS_LABEL)
            .y_desc(self.quantity.axis_label())
            .x_label_formatter(&sci)
            .y_label_formatter(&sci)
            .light_line_style(&TRANSPARENT)
            .bold_line_style(&BLACK.mix(0.15))
            .label_style(("sans-serif", 14))
            .axis_desc_style(("sans-serif", 18))
            .draw()
            .map_err(render_err)?;

        for series in &self.series {
            let color = series.color;
            chart
                .draw_series(LineSeries::new(series.points.iter().copied(), &color))
                .map_err(render_err)?
                .label(format!("p = {}", series.order))
                .legend(move |(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], color));
            chart
                .draw_series(
                    series
                        .points
                        .iter()
                        .map(|&point| Circle::new(point, 3, color.filled())),
                )
                .map_err(render_err)?;
        }

        let annotation_font =
            FontDesc::new(FontFamily::SansSerif, 14.0, FontStyle::Normal).color(&BLACK);
        for sketch in &sketches {
            chart
                .draw_series(std::iter::once(PathElement::new(
                    sketch.outline.clone(),
                    &BLACK,
                )))
                .map_err(render_err)?;
            chart
                .draw_series(std::iter::once(Text::new(
                    sketch.run_label.1.clone(),
                    sketch.run_label.0,
                    annotation_font.clone(),
                )))
                .map_err(render_err)?;
            chart
                .draw_series(std::iter::once(Text::new(
                    sketch.rise_label.1.clone(),
                    sketch.rise_label.0,
                    annotation_font.clone(),
                )))
                .map_err(render_err)?;
        }

        if !self.series.is_empty() {
            chart
                .configure_series_labels()
                .background_style(&WHITE.mix(0.7))
                .border_style(&BLACK.mix(0.3))
                .label_font(("sans-serif", 16))
                .position(SeriesLabelPosition::UpperLeft)
                .draw()
                .map_err(render_err)?;
        }

        for (index, (series, panel)) in self.series.iter().zip(rate_areas.iter()).enumerate() {
            let bottom = index + 1 == self.series.len();
            let rates: Vec<f64> = series.rates.iter().map(|&(_, r)| r).collect();
            let (lo, hi) = rate_axis_bounds(&rates);

            let mut chart = ChartBuilder::on(panel)
                .margin(8)
                .x_label_area_size(if bottom { 40 } else { 0 })
                .y_label_area_size(55)
                .build_cartesian_2d((x_range.0..x_range.1).log_scale(), lo..hi)
                .map_err(render_err)?;
            let mut mesh = chart.configure_mesh();
            mesh.y_desc(format!("Rate, p = {}", series.order))
                .x_label_formatter(&sci)
                .light_line_style(&TRANSPARENT)
                .bold_line_style(&BLACK.mix(0.15))
                .label_style(("sans-serif", 11))
                .axis_desc_style(("sans-serif", 13));
            if bottom {
                mesh.x_desc(X_AXIS_LABEL);
            }
            mesh.draw().map_err(render_err)?;

            let color = series.color;
            chart
                .draw_series(LineSeries::new(series.rates.iter().copied(), &color))
                .map_err(render_err)?;
            chart
                .draw_series(
                    series
                        .rates
                        .iter()
                        .map(|&point| Circle::new(point, 3, color.filled())),
                )
                .map_err(render_err)?;
        }

        Ok(())
    }

    // axis extents from data and annotations, with the triangle sketches
    // placed against the final x extent
    fn layout(&self) -> ((f64, f64), (f64, f64), Vec<TriangleSketch>) {
        let xs = self
            .series
            .iter()
            .flat_map(|s| s.points.iter().map(|&(x, _)| x))
            .chain(self.triangles.iter().map(|t| t.anchor.0));
        let x_extent = positive_extent(xs).unwrap_or((1.0e-3, 1.0e-1));
        let x_range = (x_extent.0 / 1.25, x_extent.1 * 1.25);

        let sketches: Vec<_> = self
            .triangles
            .iter()
            .map(|triangle| triangle.sketch(x_range))
            .collect();

        let ys = self
            .series
            .iter()
            .flat_map(|s| s.points.iter().map(|&(_, y)| y))
            .chain(
                sketches
                    .iter()
                    .flat_map(|sketch| sketch.outline.iter().map(|&(_, y)| y)),
            );
        let y_extent = positive_extent(ys).unwrap_or((1.0e-6, 1.0));
        let y_range = (y_extent.0 / 2.0, y_extent.1 * 2.0);

        let xs_with_sketches = self
            .series
            .iter()
            .flat_map(|s| s.points.iter().map(|&(x, _)| x))
            .chain(
                sketches
                    .iter()
                    .flat_map(|sketch| sketch.outline.iter().map(|&(x, _)| x)),
            );
        let x_extent = positive_extent(xs_with_sketches).unwrap_or(x_range);
        let x_range = (
            x_range.0.min(x_extent.0 / 1.25),
            x_range.1.max(x_extent.1 * 1.25),
        );

        (x_range, y_range, sketches)
    }
}

fn positive_extent(values: impl Iterator<Item = f64>) -> Option<(f64, f64)> {
    let mut lo = f64::INFINITY;
    let mut hi = f64::NEG_INFINITY;
    for value in values {
        if value.is_finite() && value > 0.0 {
            lo = lo.min(value);
            hi = hi.max(value);
        }
    }
    (lo <= hi).then_some((lo, hi))
}

// floor/ceil of the rate data, widened when the natural span is too narrow
// to show a trend
pub fn rate_axis_bounds(rates: &[f64]) -> (f64, f64) {
    let finite = rates.iter().copied().filter(|r| r.is_finite());
    let Some((lo, hi)) = min_max(finite) else {
        return (-1.0, 1.0);
    };
    let mut lo = lo.floor();
    let mut hi = hi.ceil();
    if hi - lo <= 1.0 {
        lo -= 1.0;
        hi += 1.0;
    }
    (lo, hi)
}

fn min_max(values: impl Iterator<Item = f64>) -> Option<(f64, f64)> {
    values.fold(None, |acc, v| match acc {
        None => Some((v, v)),
        Some((lo, hi)) => Some((lo.min(v), hi.max(v))),
    })
}
