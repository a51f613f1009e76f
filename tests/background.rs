//! Raster-level background tests

use pagepaint::canvas::raster::RasterCanvas;
use pagepaint::canvas::Image;
use pagepaint::paint::{ImageResolver, NoText, Painter};
use pagepaint::style::{BackgroundRepeat, BackgroundSize, Style};
use pagepaint::{Pattern, Rect, Rgba};

/// Serves one image for every URI
struct OneImage(Image);

impl ImageResolver for OneImage {
  fn resolve(&mut self, _uri: &str) -> Option<Image> {
    Some(self.0.clone())
  }
}

fn solid_image(width: u32, height: u32, color: Rgba) -> Image {
  let mut pixmap = tiny_skia::Pixmap::new(width, height).unwrap();
  pixmap.fill(tiny_skia::Color::from_rgba8(
    color.r,
    color.g,
    color.b,
    (color.a * 255.0) as u8,
  ));
  Image {
    pattern: Pattern::from_pixmap(pixmap),
    intrinsic_width: width as f32,
    intrinsic_height: height as f32,
  }
}

fn pixel(canvas: &RasterCanvas, x: u32, y: u32) -> (u8, u8, u8) {
  let p = canvas.pixmap().pixel(x, y).unwrap();
  (p.red(), p.green(), p.blue())
}

#[test]
fn test_color_fill_respects_painting_area() {
  let mut images = OneImage(solid_image(1, 1, Rgba::BLACK));
  let mut text = NoText;
  let mut painter = Painter::new(&mut images, &mut text);
  let mut canvas = RasterCanvas::new(100, 100, Rgba::WHITE).unwrap();

  let mut style = Style::default();
  style.background.color = Rgba::rgb(255, 0, 0);
  let area = Rect::from_xywh(10.0, 10.0, 30.0, 30.0);
  painter
    .draw_background(&mut canvas, &style, Some(area), area)
    .unwrap();

  assert_eq!(pixel(&canvas, 20, 20), (255, 0, 0));
  assert_eq!(pixel(&canvas, 5, 5), (255, 255, 255));
  assert_eq!(pixel(&canvas, 50, 50), (255, 255, 255));
}

#[test]
fn test_no_repeat_image_draws_once() {
  let mut images = OneImage(solid_image(10, 10, Rgba::rgb(0, 0, 255)));
  let mut text = NoText;
  let mut painter = Painter::new(&mut images, &mut text);
  let mut canvas = RasterCanvas::new(100, 100, Rgba::WHITE).unwrap();

  let mut style = Style::default();
  style.background.image = Some("img.png".to_string());
  style.background.repeat = BackgroundRepeat::NoRepeat;
  let area = Rect::from_xywh(0.0, 0.0, 100.0, 100.0);
  painter
    .draw_background(&mut canvas, &style, Some(area), area)
    .unwrap();

  assert_eq!(pixel(&canvas, 5, 5), (0, 0, 255));
  // Outside the single 10×10 tile the page stays white
  assert_eq!(pixel(&canvas, 30, 30), (255, 255, 255));
  assert_eq!(pixel(&canvas, 5, 30), (255, 255, 255));
}

#[test]
fn test_repeat_tiles_the_painting_area() {
  let mut images = OneImage(solid_image(8, 8, Rgba::rgb(0, 128, 0)));
  let mut text = NoText;
  let mut painter = Painter::new(&mut images, &mut text);
  let mut canvas = RasterCanvas::new(100, 100, Rgba::WHITE).unwrap();

  let mut style = Style::default();
  style.background.image = Some("tile.png".to_string());
  style.background.repeat = BackgroundRepeat::Repeat;
  let area = Rect::from_xywh(0.0, 0.0, 100.0, 100.0);
  painter
    .draw_background(&mut canvas, &style, Some(area), area)
    .unwrap();

  assert_eq!(pixel(&canvas, 4, 4), (0, 128, 0));
  assert_eq!(pixel(&canvas, 90, 90), (0, 128, 0));
}

#[test]
fn test_repeat_x_limits_to_one_band() {
  let mut images = OneImage(solid_image(10, 10, Rgba::rgb(200, 0, 200)));
  let mut text = NoText;
  let mut painter = Painter::new(&mut images, &mut text);
  let mut canvas = RasterCanvas::new(100, 100, Rgba::WHITE).unwrap();

  let mut style = Style::default();
  style.background.image = Some("tile.png".to_string());
  style.background.repeat = BackgroundRepeat::RepeatX;
  let area = Rect::from_xywh(0.0, 0.0, 100.0, 100.0);
  painter
    .draw_background(&mut canvas, &style, Some(area), area)
    .unwrap();

  // One image tall, all the way across
  assert_eq!(pixel(&canvas, 5, 5), (200, 0, 200));
  assert_eq!(pixel(&canvas, 95, 5), (200, 0, 200));
  assert_eq!(pixel(&canvas, 5, 20), (255, 255, 255));
}

#[test]
fn test_cover_fills_the_positioning_area() {
  let mut images = OneImage(solid_image(20, 10, Rgba::rgb(50, 60, 70)));
  let mut text = NoText;
  let mut painter = Painter::new(&mut images, &mut text);
  let mut canvas = RasterCanvas::new(100, 100, Rgba::WHITE).unwrap();

  let mut style = Style::default();
  style.background.image = Some("img.png".to_string());
  style.background.repeat = BackgroundRepeat::NoRepeat;
  style.background.size = BackgroundSize::Cover;
  let area = Rect::from_xywh(0.0, 0.0, 100.0, 100.0);
  painter
    .draw_background(&mut canvas, &style, Some(area), area)
    .unwrap();

  // Cover scales 20×10 by 10: no white remains anywhere in the area
  assert_eq!(pixel(&canvas, 2, 2), (50, 60, 70));
  assert_eq!(pixel(&canvas, 97, 97), (50, 60, 70));
}
