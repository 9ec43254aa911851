// crates/worldarea-core/src/export/chart.rs

//! # Static choropleth
//!
//! Renders every feature in the equal-area plane, shaded by the quantile
//! class of its `area_km2`, and writes a PNG that declares its DPI.
//!
//! Layout: title band on top, the map scaled uniformly into the remaining
//! area (no axes, ticks or frame), and a legend box in the lower-left corner.

use super::glyphs::{draw_text, text_height, text_width};
use crate::classify::Quantiles;
use crate::error::{GeoError, Result};
use crate::model::FeatureCollection;
use geo::{BoundingRect, Coord, LineString, Polygon, Rect as GeoRect};
use image::{GrayImage, Luma, Rgb, RgbImage};
use imageproc::drawing::{
    draw_filled_rect_mut, draw_hollow_rect_mut, draw_line_segment_mut, draw_polygon_mut,
};
use imageproc::point::Point;
use imageproc::rect::Rect;
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::BufWriter;
use std::path::Path;

pub const DEFAULT_TITLE: &str = "Country Area (km\u{b2}) \u{2014} Equal-Area Projection";

const METERS_PER_INCH: f64 = 0.0254;
const BACKGROUND: Rgb<u8> = Rgb([255, 255, 255]);
const EDGE: Rgb<u8> = Rgb([0, 0, 0]);
const LEGEND_FRAME: Rgb<u8> = Rgb([204, 204, 204]);
const MASK_ON: Luma<u8> = Luma([255]);
const MASK_OFF: Luma<u8> = Luma([0]);

/// matplotlib's viridis sampled at five evenly spaced stops.
const VIRIDIS: [[u8; 3]; 5] = [
    [0x44, 0x01, 0x54],
    [0x3b, 0x52, 0x8b],
    [0x21, 0x91, 0x8c],
    [0x5e, 0xc9, 0x62],
    [0xfd, 0xe7, 0x25],
];

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChartOptions {
    pub width_in: f64,
    pub height_in: f64,
    pub dpi: u32,
    /// Number of quantile classes.
    pub classes: usize,
    pub title: String,
}

impl Default for ChartOptions {
    fn default() -> Self {
        Self {
            width_in: 12.0,
            height_in: 6.0,
            dpi: 180,
            classes: 5,
            title: DEFAULT_TITLE.to_string(),
        }
    }
}

impl ChartOptions {
    pub fn pixel_size(&self) -> (u32, u32) {
        (
            (self.width_in * f64::from(self.dpi)).round() as u32,
            (self.height_in * f64::from(self.dpi)).round() as u32,
        )
    }

    fn pixels_per_meter(&self) -> u32 {
        (f64::from(self.dpi) / METERS_PER_INCH).round() as u32
    }
}

/// Colour of `class` out of `k`, spread over the viridis ramp.
pub fn class_color(class: usize, k: usize) -> Rgb<u8> {
    if k <= 1 {
        return Rgb(VIRIDIS[0]);
    }
    let t = class.min(k - 1) as f64 / (k - 1) as f64 * (VIRIDIS.len() - 1) as f64;
    let lo = t.floor() as usize;
    let hi = (lo + 1).min(VIRIDIS.len() - 1);
    let frac = t - lo as f64;
    let mix = |a: u8, b: u8| (f64::from(a) + (f64::from(b) - f64::from(a)) * frac).round() as u8;
    Rgb([
        mix(VIRIDIS[lo][0], VIRIDIS[hi][0]),
        mix(VIRIDIS[lo][1], VIRIDIS[hi][1]),
        mix(VIRIDIS[lo][2], VIRIDIS[hi][2]),
    ])
}

/// Renders the choropleth and saves it as PNG at `path`.
pub fn render_choropleth(fc: &FeatureCollection, path: &Path, opts: &ChartOptions) -> Result<()> {
    let img = draw_choropleth(fc, opts)?;
    save_png(&img, path, opts)?;
    tracing::info!(
        "Wrote {}x{} choropleth ({} dpi) to {}",
        img.width(),
        img.height(),
        opts.dpi,
        path.display()
    );
    Ok(())
}

/// Draws the choropleth in memory. `fc` must carry `area_km2` and be in an
/// equal-area system.
pub fn draw_choropleth(fc: &FeatureCollection, opts: &ChartOptions) -> Result<RgbImage> {
    if !fc.crs.is_equal_area() {
        return Err(GeoError::InvalidData(format!(
            "choropleth expects equal-area geometry, got {}",
            fc.crs
        )));
    }
    let values = fc
        .iter()
        .map(|f| {
            f.area_km2
                .ok_or_else(|| GeoError::InvalidData(format!("{} has no area_km2", f.name)))
        })
        .collect::<Result<Vec<_>>>()?;
    let quantiles = Quantiles::classify(&values, opts.classes);
    tracing::debug!("Quantile bins: {:?} counts: {:?}", quantiles.bins(), quantiles.counts());

    let (width, height) = opts.pixel_size();
    if width == 0 || height == 0 {
        return Err(GeoError::InvalidData(format!("empty canvas {width}x{height}")));
    }
    let mut img = RgbImage::from_pixel(width, height, BACKGROUND);

    let title_scale = (opts.dpi / 45).max(1);
    let margin = (width / 50) as i32;
    let title_band = text_height(title_scale) as i32 + 2 * margin;
    let title_w = text_width(&opts.title, title_scale) as i32;
    draw_text(&mut img, (width as i32 - title_w) / 2, margin, title_scale, &opts.title, EDGE);

    let plot = Rect::at(margin, title_band).of_size(
        (width as i32 - 2 * margin).max(1) as u32,
        (height as i32 - title_band - margin).max(1) as u32,
    );

    if let Some(view) = collection_bounds(fc).map(|b| ViewTransform::fit(b, plot)) {
        // fills first, then every outline on top so borders stay visible
        for (i, feature) in fc.iter().enumerate() {
            let color = class_color(quantiles.class_of(i), quantiles.k());
            for poly in &feature.geometry {
                fill_polygon(&mut img, poly, &view, color);
            }
        }
        for feature in fc {
            for poly in &feature.geometry {
                stroke_ring(&mut img, poly.exterior(), &view);
                for hole in poly.interiors() {
                    stroke_ring(&mut img, hole, &view);
                }
            }
        }
    }

    draw_legend(&mut img, &quantiles, plot, opts.dpi);
    Ok(img)
}

fn collection_bounds(fc: &FeatureCollection) -> Option<GeoRect<f64>> {
    fc.iter()
        .filter_map(|f| f.geometry.bounding_rect())
        .reduce(|a, b| {
            GeoRect::new(
                Coord { x: a.min().x.min(b.min().x), y: a.min().y.min(b.min().y) },
                Coord { x: a.max().x.max(b.max().x), y: a.max().y.max(b.max().y) },
            )
        })
}

/// Uniform scale from map units to pixels, centred in the plot rectangle,
/// with y flipped (north up).
#[derive(Debug, Clone, Copy)]
struct ViewTransform {
    scale: f64,
    min_x: f64,
    max_y: f64,
    offset_x: f64,
    offset_y: f64,
}

impl ViewTransform {
    fn fit(bounds: GeoRect<f64>, plot: Rect) -> Self {
        let dx = bounds.width().max(f64::EPSILON);
        let dy = bounds.height().max(f64::EPSILON);
        let plot_w = f64::from(plot.width());
        let plot_h = f64::from(plot.height());
        let scale = (plot_w / dx).min(plot_h / dy);
        Self {
            scale,
            min_x: bounds.min().x,
            max_y: bounds.max().y,
            offset_x: f64::from(plot.left()) + (plot_w - dx * scale) / 2.0,
            offset_y: f64::from(plot.top()) + (plot_h - dy * scale) / 2.0,
        }
    }

    fn apply(&self, c: Coord<f64>) -> (f64, f64) {
        (
            self.offset_x + (c.x - self.min_x) * self.scale,
            self.offset_y + (self.max_y - c.y) * self.scale,
        )
    }
}

/// Paints `poly` through its own mask, so a hole only clears pixels of this
/// polygon and never what other features already painted there.
fn fill_polygon(img: &mut RgbImage, poly: &Polygon<f64>, view: &ViewTransform, color: Rgb<u8>) {
    let Some(bounds) = poly.bounding_rect() else {
        return;
    };
    let (x0, y0) = view.apply(Coord { x: bounds.min().x, y: bounds.max().y });
    let (x1, y1) = view.apply(Coord { x: bounds.max().x, y: bounds.min().y });
    let left = (x0.floor() as i32).max(0);
    let top = (y0.floor() as i32).max(0);
    let right = (x1.ceil() as i32).min(img.width() as i32 - 1);
    let bottom = (y1.ceil() as i32).min(img.height() as i32 - 1);
    if right < left || bottom < top {
        return;
    }

    let mut mask = GrayImage::new((right - left + 1) as u32, (bottom - top + 1) as u32);
    let origin = (left, top);
    mask_ring(&mut mask, poly.exterior(), view, origin, MASK_ON);
    for hole in poly.interiors() {
        mask_ring(&mut mask, hole, view, origin, MASK_OFF);
    }

    for (x, y, px) in mask.enumerate_pixels() {
        if *px == MASK_ON {
            img.put_pixel(left as u32 + x, top as u32 + y, color);
        }
    }
}

fn mask_ring(
    mask: &mut GrayImage,
    ring: &LineString<f64>,
    view: &ViewTransform,
    (left, top): (i32, i32),
    value: Luma<u8>,
) {
    let mut points: Vec<Point<i32>> = Vec::with_capacity(ring.0.len());
    for c in ring.coords() {
        let (x, y) = view.apply(*c);
        let p = Point::new(x.round() as i32 - left, y.round() as i32 - top);
        if points.last() != Some(&p) {
            points.push(p);
        }
    }
    // draw_polygon_mut wants an open ring
    while points.len() > 1 && points.first() == points.last() {
        points.pop();
    }
    if points.len() >= 3 {
        draw_polygon_mut(mask, &points, value);
    }
}

fn stroke_ring(img: &mut RgbImage, ring: &LineString<f64>, view: &ViewTransform) {
    for line in ring.lines() {
        let (x0, y0) = view.apply(line.start);
        let (x1, y1) = view.apply(line.end);
        draw_line_segment_mut(img, (x0 as f32, y0 as f32), (x1 as f32, y1 as f32), EDGE);
    }
}

fn draw_legend(img: &mut RgbImage, quantiles: &Quantiles, plot: Rect, dpi: u32) {
    let labels = quantiles.legend_labels();
    if labels.is_empty() {
        return;
    }
    let scale = (dpi / 60).max(1);
    let line_h = text_height(scale) as i32;
    let swatch = line_h;
    let pad = line_h / 2;
    let row_h = line_h + pad;
    let label_w = labels.iter().map(|l| text_width(l, scale)).max().unwrap_or(0) as i32;

    let box_w = pad + swatch + pad + label_w + pad;
    let box_h = pad + row_h * labels.len() as i32;
    let left = plot.left() + pad;
    let top = plot.bottom() - box_h - pad;

    let frame = Rect::at(left, top).of_size(box_w as u32, box_h as u32);
    draw_filled_rect_mut(img, frame, BACKGROUND);
    draw_hollow_rect_mut(img, frame, LEGEND_FRAME);

    for (class, label) in labels.iter().enumerate() {
        let y = top + pad + row_h * class as i32;
        let patch = Rect::at(left + pad, y).of_size(swatch as u32, swatch as u32);
        draw_filled_rect_mut(img, patch, class_color(class, quantiles.k()));
        draw_hollow_rect_mut(img, patch, EDGE);
        draw_text(img, left + pad + swatch + pad, y, scale, label, EDGE);
    }
}

fn save_png(img: &RgbImage, path: &Path, opts: &ChartOptions) -> Result<()> {
    let file = File::create(path)?;
    let writer = BufWriter::new(file);

    let mut encoder = png::Encoder::new(writer, img.width(), img.height());
    encoder.set_color(png::ColorType::Rgb);
    encoder.set_depth(png::BitDepth::Eight);
    let ppm = opts.pixels_per_meter();
    encoder.set_pixel_dims(Some(png::PixelDimensions {
        xppu: ppm,
        yppu: ppm,
        unit: png::Unit::Meter,
    }));
    // tEXt is Latin-1 only; the title carries ² and an em dash
    encoder.add_itxt_chunk("Title".to_string(), opts.title.clone())?;

    let mut png_writer = encoder.write_header()?;
    png_writer.write_image_data(img.as_raw())?;
    png_writer.finish()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::area::with_area;
    use crate::model::fixtures::{boxed, world};

    fn small_opts() -> ChartOptions {
        ChartOptions {
            width_in: 4.0,
            height_in: 2.0,
            dpi: 60,
            ..ChartOptions::default()
        }
    }

    fn sample() -> FeatureCollection {
        let fc = world(vec![
            boxed("Small", "Europe", -10.0, -10.0, 0.0, 0.0),
            boxed("Large", "Asia", 0.0, 0.0, 40.0, 40.0),
        ]);
        with_area(&fc).unwrap()
    }

    #[test]
    fn default_canvas_is_12_by_6_inches_at_180_dpi() {
        assert_eq!(ChartOptions::default().pixel_size(), (2160, 1080));
        assert_eq!(ChartOptions::default().pixels_per_meter(), 7087);
    }

    #[test]
    fn ramp_endpoints_are_viridis() {
        assert_eq!(class_color(0, 5), Rgb(VIRIDIS[0]));
        assert_eq!(class_color(4, 5), Rgb(VIRIDIS[4]));
        assert_eq!(class_color(1, 3), Rgb(VIRIDIS[2]));
    }

    #[test]
    fn features_are_shaded_by_class() {
        let fc = sample();
        let opts = small_opts();
        let img = draw_choropleth(&fc, &opts).unwrap();
        assert_eq!(img.dimensions(), opts.pixel_size());

        // two distinct values still give five bins: the larger lands in the top class
        let top = class_color(4, 5);
        let painted = img.pixels().filter(|p| **p == top).count();
        assert!(painted > 500, "largest feature covers far more than its legend swatch: {painted}");
        assert!(img.pixels().any(|p| *p == EDGE), "outlines are drawn");
    }

    #[test]
    fn enclave_listed_before_its_host_keeps_its_fill() {
        // enclave sits on the right, clear of the lower-left legend
        let enclave = boxed("Enclave", "Africa", 30.0, 4.0, 34.0, 6.0);
        let mut host = boxed("Host", "Africa", 0.0, 0.0, 40.0, 10.0);
        host.geometry.0[0]
            .interiors_push(vec![(30.0, 4.0), (34.0, 4.0), (34.0, 6.0), (30.0, 6.0), (30.0, 4.0)]);
        let fc = with_area(&world(vec![enclave, host])).unwrap();
        let opts = small_opts();
        let img = draw_choropleth(&fc, &opts).unwrap();

        // enclave is class 0; only its legend swatch would remain if the host's hole cleared it
        let enclave_color = class_color(0, 5);
        let n = img.pixels().filter(|p| **p == enclave_color).count();
        assert!(n > 40, "enclave fill survives the host's hole: {n}");

        let host_color = class_color(4, 5);
        let h = img.pixels().filter(|p| **p == host_color).count();
        assert!(h > 200, "host painted around its hole: {h}");
    }

    #[test]
    fn refuses_geographic_geometry() {
        let fc = world(vec![boxed("A", "Europe", 0.0, 0.0, 1.0, 1.0)]);
        assert!(draw_choropleth(&fc, &small_opts()).is_err());
    }

    #[test]
    fn png_declares_dpi_and_size() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("chart.png");
        let opts = small_opts();
        render_choropleth(&sample(), &path, &opts).unwrap();

        let decoder = png::Decoder::new(File::open(&path).unwrap());
        let reader = decoder.read_info().unwrap();
        let info = reader.info();
        assert_eq!((info.width, info.height), (240, 120));
        let dims = info.pixel_dims.unwrap();
        assert_eq!(dims.unit, png::Unit::Meter);
        assert_eq!(dims.xppu, opts.pixels_per_meter());
    }
}
