//! Raster rendering of the chart panel
//!
//! Three stacked plots: revenue vs expenses, monthly cash flow, headcount.

use crate::forecast::ForecastResult;
use image::{Rgb, RgbImage};

const BACKGROUND: Rgb<u8> = Rgb([255, 255, 255]);
const AXIS: Rgb<u8> = Rgb([156, 163, 175]);
const REVENUE: Rgb<u8> = Rgb([37, 99, 235]);
const EXPENSES: Rgb<u8> = Rgb([249, 115, 22]);
const POSITIVE: Rgb<u8> = Rgb([22, 163, 74]);
const NEGATIVE: Rgb<u8> = Rgb([220, 38, 38]);
const HEADCOUNT: Rgb<u8> = Rgb([124, 58, 237]);

/// Largest raster the panel will allocate (64 megapixels)
pub const MAX_PIXELS: u64 = 64 * 1024 * 1024;

/// Logical panel geometry, before scaling
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ChartPanel {
    pub width: u32,
    pub height: u32,
    pub margin: u32,
}

impl Default for ChartPanel {
    fn default() -> Self {
        Self {
            width: 800,
            height: 600,
            margin: 20,
        }
    }
}

/// Pixel rectangle of one plot area
#[derive(Debug, Clone, Copy)]
struct PlotArea {
    left: i64,
    top: i64,
    width: i64,
    height: i64,
}

impl PlotArea {
    fn bottom(&self) -> i64 {
        self.top + self.height
    }

    /// Map a value into a y pixel given the plotted value range
    fn y_for(&self, value: f64, lo: f64, hi: f64) -> i64 {
        let t = ((value - lo) / (hi - lo)).clamp(0.0, 1.0);
        self.bottom() - (t * self.height as f64).round() as i64
    }

    fn slot_width(&self, slots: usize) -> i64 {
        (self.width / slots.max(1) as i64).max(1)
    }
}

impl ChartPanel {
    /// Size of the raster at `scale`, `None` if it overflows or exceeds `MAX_PIXELS`
    pub fn pixel_size(&self, scale: u32) -> Option<(u32, u32)> {
        let w = self.width.checked_mul(scale)?;
        let h = self.height.checked_mul(scale)?;
        if w as u64 * h as u64 > MAX_PIXELS {
            return None;
        }
        Some((w, h))
    }

    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }

    /// Draw the forecast into a fresh raster on an opaque white background
    ///
    /// Returns `None` when the scaled panel is too large to allocate.
    pub fn render(&self, result: &ForecastResult, scale: u32) -> Option<RgbImage> {
        let scale = scale.max(1);
        let (w, h) = self.pixel_size(scale)?;
        let mut img = RgbImage::from_pixel(w, h, BACKGROUND);

        let margin = (self.margin * scale) as i64;
        let plot_height = ((h as i64 - margin * 4) / 3).max(1);
        let plot_width = (w as i64 - margin * 2).max(1);
        let area = |row: i64| PlotArea {
            left: margin,
            top: margin + row * (plot_height + margin),
            width: plot_width,
            height: plot_height,
        };

        self.draw_revenue_expenses(&mut img, area(0), result);
        self.draw_cash_flow(&mut img, area(1), result);
        self.draw_headcount(&mut img, area(2), result, scale as i64);

        Some(img)
    }

    fn draw_revenue_expenses(&self, img: &mut RgbImage, area: PlotArea, result: &ForecastResult) {
        let revenue = result.revenue_series();
        let expenses = result.expense_series();
        let (lo, hi) = value_range(revenue.iter().chain(expenses.iter()).copied());
        let zero = area.y_for(0.0, lo, hi);

        let slot = area.slot_width(revenue.len());
        let bar = (slot * 2 / 5).max(1);
        for (i, (rev, exp)) in revenue.iter().zip(&expenses).enumerate() {
            let x = area.left + i as i64 * slot + slot / 10;
            fill_bar(img, x, bar, zero, area.y_for(*rev, lo, hi), REVENUE);
            fill_bar(img, x + bar, bar, zero, area.y_for(*exp, lo, hi), EXPENSES);
        }

        draw_axes(img, area, zero);
    }

    fn draw_cash_flow(&self, img: &mut RgbImage, area: PlotArea, result: &ForecastResult) {
        let cash_flow = result.cash_flow_series();
        let (lo, hi) = value_range(cash_flow.iter().copied());
        let zero = area.y_for(0.0, lo, hi);

        let slot = area.slot_width(cash_flow.len());
        let bar = (slot * 3 / 5).max(1);
        for (i, cf) in cash_flow.iter().enumerate() {
            let x = area.left + i as i64 * slot + slot / 5;
            let color = if *cf >= 0.0 { POSITIVE } else { NEGATIVE };
            fill_bar(img, x, bar, zero, area.y_for(*cf, lo, hi), color);
        }

        draw_axes(img, area, zero);
    }

    fn draw_headcount(&self, img: &mut RgbImage, area: PlotArea, result: &ForecastResult, scale: i64) {
        let headcount: Vec<f64> = result.headcount_series().iter().map(|&h| h as f64).collect();
        let (lo, hi) = value_range(headcount.iter().copied());
        let zero = area.y_for(0.0, lo, hi);
        let thickness = 2 * scale;

        let slot = area.slot_width(headcount.len());
        let mut previous_y: Option<i64> = None;
        for (i, value) in headcount.iter().enumerate() {
            let x0 = area.left + i as i64 * slot;
            let y = area.y_for(*value, lo, hi);
            if let Some(py) = previous_y {
                fill_rect(img, x0, py.min(y), x0 + thickness, py.max(y) + thickness, HEADCOUNT);
            }
            fill_rect(img, x0, y, x0 + slot, y + thickness, HEADCOUNT);
            previous_y = Some(y);
        }

        draw_axes(img, area, zero);
    }
}

/// Plotted range always includes zero and never collapses to a point
fn value_range(values: impl Iterator<Item = f64>) -> (f64, f64) {
    let (mut lo, mut hi) = values
        .filter(|v| v.is_finite())
        .fold((0.0_f64, 0.0_f64), |(lo, hi), v| (lo.min(v), hi.max(v)));
    if hi - lo <= f64::EPSILON {
        lo -= 0.5;
        hi += 0.5;
    }
    (lo, hi)
}

fn draw_axes(img: &mut RgbImage, area: PlotArea, zero: i64) {
    fill_rect(img, area.left, area.top, area.left + 1, area.bottom() + 1, AXIS);
    fill_rect(img, area.left, zero, area.left + area.width, zero + 1, AXIS);
}

/// Vertical bar between the baseline and a value, either direction
fn fill_bar(img: &mut RgbImage, x: i64, width: i64, baseline: i64, y: i64, color: Rgb<u8>) {
    fill_rect(img, x, y.min(baseline), x + width, y.max(baseline), color);
}

/// Fill `[x0, x1) x [y0, y1)`, clipped to the image
fn fill_rect(img: &mut RgbImage, x0: i64, y0: i64, x1: i64, y1: i64, color: Rgb<u8>) {
    let (w, h) = (img.width() as i64, img.height() as i64);
    let (x0, x1) = (x0.clamp(0, w), x1.clamp(0, w));
    let (y0, y1) = (y0.clamp(0, h), y1.clamp(0, h));
    for y in y0..y1 {
        for x in x0..x1 {
            img.put_pixel(x as u32, y as u32, color);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::forecast::generate_forecast;

    #[test]
    fn test_render_size_and_background() {
        let panel = ChartPanel::default();
        let img = panel.render(&generate_forecast(50_000.0, 100.0, 10), 2).unwrap();

        assert_eq!(img.dimensions(), (1600, 1200));
        assert_eq!(*img.get_pixel(0, 0), BACKGROUND);
        assert_eq!(*img.get_pixel(1599, 1199), BACKGROUND);
    }

    #[test]
    fn test_render_draws_series() {
        let img = ChartPanel::default().render(&generate_forecast(50_000.0, 100.0, 10), 1).unwrap();
        let count = |color: Rgb<u8>| img.pixels().filter(|p| **p == color).count();

        assert!(count(REVENUE) > 0);
        assert!(count(EXPENSES) > 0);
        assert!(count(HEADCOUNT) > 0);
        // Early months burn cash with these inputs
        assert!(count(NEGATIVE) > 0);
    }

    #[test]
    fn test_render_degenerate_data() {
        let panel = ChartPanel::default();
        for result in [generate_forecast(0.0, 0.0, 0), generate_forecast(-5.0, -1.0, -3)] {
            let img = panel.render(&result, 1).unwrap();
            assert_eq!(img.dimensions(), (800, 600));
        }
    }

    #[test]
    fn test_oversized_scale_is_refused() {
        let panel = ChartPanel::default();
        assert_eq!(panel.pixel_size(2), Some((1600, 1200)));
        assert_eq!(panel.pixel_size(6_000_000), None);
        assert_eq!(panel.pixel_size(100), None);
        assert!(panel.render(&generate_forecast(1.0, 1.0, 1), 100).is_none());
    }

    #[test]
    fn test_value_range_includes_zero() {
        assert_eq!(value_range([5.0, 10.0].into_iter()), (0.0, 10.0));
        assert_eq!(value_range([-4.0, 2.0].into_iter()), (-4.0, 2.0));
        assert_eq!(value_range(std::iter::empty()), (-0.5, 0.5));
    }
}
