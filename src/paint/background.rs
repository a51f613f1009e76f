//! Background painting
//!
//! A background is a color fill plus an optional image, clipped to the
//! painting area and positioned against the positioning area. The two
//! areas differ: `background-clip` picks the painting area,
//! `background-origin` (or fixed attachment) picks the positioning area.

use super::{image_filter, Painter};
use crate::canvas::{Canvas, Extend, Image, SavedCanvas};
use crate::error::Result;
use crate::geometry::{Rect, Size};
use crate::style::{
  Background, BackgroundRepeat, BackgroundSize, BackgroundSizeComponent, ImageRendering, Style,
};

/// Outcome of `background-size` resolution
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct ResolvedBackgroundSize {
  /// Final image dimensions in positioning-area units
  pub image_size: Size,
  /// Per-axis scale from intrinsic to final dimensions
  pub scale: (f32, f32),
}

/// Resolves `background-size` against an image's intrinsic dimensions and
/// the positioning area
pub(crate) fn resolve_background_size(
  size: BackgroundSize,
  image: &Image,
  positioning: Size,
) -> ResolvedBackgroundSize {
  let intrinsic = Size::new(image.intrinsic_width, image.intrinsic_height);
  if intrinsic.width <= 0.0 || intrinsic.height <= 0.0 {
    return ResolvedBackgroundSize {
      image_size: Size::ZERO,
      scale: (0.0, 0.0),
    };
  }
  match size {
    BackgroundSize::Cover | BackgroundSize::Contain => {
      let ratio_x = positioning.width / intrinsic.width;
      let ratio_y = positioning.height / intrinsic.height;
      let scale = if size == BackgroundSize::Cover {
        ratio_x.max(ratio_y)
      } else {
        ratio_x.min(ratio_y)
      };
      ResolvedBackgroundSize {
        image_size: Size::new(intrinsic.width * scale, intrinsic.height * scale),
        scale: (scale, scale),
      }
    }
    BackgroundSize::Explicit(width, height) => match (width, height) {
      (BackgroundSizeComponent::Auto, BackgroundSizeComponent::Auto) => ResolvedBackgroundSize {
        image_size: intrinsic,
        scale: (1.0, 1.0),
      },
      (BackgroundSizeComponent::Auto, BackgroundSizeComponent::Length(length)) => {
        // Derive the auto axis from the other, keeping the aspect ratio
        let height = length.resolve(positioning.height);
        let scale = height / intrinsic.height;
        ResolvedBackgroundSize {
          image_size: Size::new(intrinsic.width * scale, height),
          scale: (scale, scale),
        }
      }
      (BackgroundSizeComponent::Length(length), BackgroundSizeComponent::Auto) => {
        let width = length.resolve(positioning.width);
        let scale = width / intrinsic.width;
        ResolvedBackgroundSize {
          image_size: Size::new(width, intrinsic.height * scale),
          scale: (scale, scale),
        }
      }
      (BackgroundSizeComponent::Length(width), BackgroundSizeComponent::Length(height)) => {
        let width = width.resolve(positioning.width);
        let height = height.resolve(positioning.height);
        ResolvedBackgroundSize {
          image_size: Size::new(width, height),
          scale: (width / intrinsic.width, height / intrinsic.height),
        }
      }
    },
  }
}

impl Painter<'_> {
  /// Paints a background into `painting_area`, positioned against
  /// `positioning_area`
  ///
  /// A `None` painting area means unbounded: the page background bleeds to
  /// the canvas edge. A missing or unresolvable image falls back to the
  /// color fill alone.
  pub fn draw_background(
    &mut self,
    canvas: &mut dyn Canvas,
    style: &Style,
    painting_area: Option<Rect>,
    positioning_area: Rect,
  ) -> Result<()> {
    let background = &style.background;
    if background.color.is_transparent() && background.image.is_none() {
      return Ok(());
    }

    let mut canvas = SavedCanvas::new(canvas);
    if self.hinting {
      // Crisp background edges
      canvas.set_antialias(false);
    }
    if let Some(area) = painting_area {
      canvas.rectangle(area);
      canvas.clip();
    }

    if !background.color.is_transparent() {
      canvas.set_color(background.color);
      canvas.paint();
    }

    let Some(uri) = &background.image else {
      return Ok(());
    };
    let Some(image) = self.images.resolve(uri) else {
      return Ok(());
    };
    draw_background_image(
      &mut *canvas,
      background,
      style.image_rendering,
      &image,
      positioning_area,
    );
    Ok(())
  }
}

fn draw_background_image(
  canvas: &mut dyn Canvas,
  background: &Background,
  rendering: ImageRendering,
  image: &Image,
  positioning_area: Rect,
) {
  let resolved = resolve_background_size(background.size, image, positioning_area.size);
  if resolved.image_size.is_empty() {
    return;
  }

  let mut canvas = SavedCanvas::new(canvas);
  canvas.translate(positioning_area.x(), positioning_area.y());

  // Position percentages resolve against the leftover space, which is
  // negative when the image is larger than the positioning area
  let position_x = background
    .position
    .0
    .resolve(positioning_area.width() - resolved.image_size.width);
  let position_y = background
    .position
    .1
    .resolve(positioning_area.height() - resolved.image_size.height);
  canvas.translate(position_x, position_y);

  match background.repeat {
    BackgroundRepeat::RepeatX => {
      // Full clip width, exactly one image tall
      let extents = canvas.clip_extents();
      canvas.rectangle(Rect::from_xywh(
        extents.x(),
        0.0,
        extents.width(),
        resolved.image_size.height,
      ));
      canvas.clip();
    }
    BackgroundRepeat::RepeatY => {
      let extents = canvas.clip_extents();
      canvas.rectangle(Rect::from_xywh(
        0.0,
        extents.y(),
        resolved.image_size.width,
        extents.height(),
      ));
      canvas.clip();
    }
    BackgroundRepeat::Repeat | BackgroundRepeat::NoRepeat => {}
  }

  let extend = match background.repeat {
    // The same pattern object may tile another box's background; without
    // this the edge pixels would bleed here
    BackgroundRepeat::NoRepeat => Extend::None,
    _ => Extend::Repeat,
  };
  canvas.set_pattern(&image.pattern, extend, image_filter(rendering));
  canvas.scale(resolved.scale.0, resolved.scale.1);
  canvas.paint();
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::canvas::recording::{DrawOp, RecordingCanvas};
  use crate::canvas::{ImageFilter, Pattern};
  use crate::paint::{ImageResolver, NoImages, NoText};
  use crate::style::{LengthOrPercentage, Rgba};

  fn test_image(width: u32, height: u32) -> Image {
    Image {
      pattern: Pattern::from_pixmap(tiny_skia::Pixmap::new(width, height).unwrap()),
      intrinsic_width: width as f32,
      intrinsic_height: height as f32,
    }
  }

  struct OneImage(Image);

  impl ImageResolver for OneImage {
    fn resolve(&mut self, _uri: &str) -> Option<Image> {
      Some(self.0.clone())
    }
  }

  #[test]
  fn test_cover_sizing() {
    let image = test_image(200, 100);
    let resolved =
      resolve_background_size(BackgroundSize::Cover, &image, Size::new(300.0, 300.0));
    assert_eq!(resolved.scale, (3.0, 3.0));
    assert_eq!(resolved.image_size, Size::new(600.0, 300.0));
  }

  #[test]
  fn test_contain_sizing() {
    let image = test_image(200, 100);
    let resolved =
      resolve_background_size(BackgroundSize::Contain, &image, Size::new(300.0, 300.0));
    assert_eq!(resolved.scale, (1.5, 1.5));
    assert_eq!(resolved.image_size, Size::new(300.0, 150.0));
  }

  #[test]
  fn test_auto_auto_keeps_intrinsic_size() {
    let image = test_image(40, 30);
    let resolved =
      resolve_background_size(BackgroundSize::default(), &image, Size::new(300.0, 300.0));
    assert_eq!(resolved.scale, (1.0, 1.0));
    assert_eq!(resolved.image_size, Size::new(40.0, 30.0));
  }

  #[test]
  fn test_one_auto_axis_preserves_aspect_ratio() {
    let image = test_image(100, 50);
    let resolved = resolve_background_size(
      BackgroundSize::Explicit(
        BackgroundSizeComponent::Length(LengthOrPercentage::Px(200.0)),
        BackgroundSizeComponent::Auto,
      ),
      &image,
      Size::new(400.0, 400.0),
    );
    assert_eq!(resolved.scale, (2.0, 2.0));
    assert_eq!(resolved.image_size, Size::new(200.0, 100.0));
  }

  #[test]
  fn test_explicit_axes_scale_independently() {
    let image = test_image(100, 50);
    let resolved = resolve_background_size(
      BackgroundSize::Explicit(
        BackgroundSizeComponent::Length(LengthOrPercentage::Percent(50.0)),
        BackgroundSizeComponent::Length(LengthOrPercentage::Px(25.0)),
      ),
      &image,
      Size::new(400.0, 400.0),
    );
    assert_eq!(resolved.scale, (2.0, 0.5));
    assert_eq!(resolved.image_size, Size::new(200.0, 25.0));
  }

  #[test]
  fn test_transparent_color_without_image_paints_nothing() {
    let (mut images, mut text) = (NoImages, NoText);
    let mut painter = Painter::new(&mut images, &mut text);
    let mut canvas = RecordingCanvas::new(100.0, 100.0);
    let style = Style::default();
    painter
      .draw_background(
        &mut canvas,
        &style,
        Some(Rect::from_xywh(0.0, 0.0, 50.0, 50.0)),
        Rect::from_xywh(0.0, 0.0, 50.0, 50.0),
      )
      .unwrap();
    assert!(canvas.ops().is_empty());
  }

  #[test]
  fn test_color_fill_is_clipped_to_painting_area() {
    let (mut images, mut text) = (NoImages, NoText);
    let mut painter = Painter::new(&mut images, &mut text);
    let mut canvas = RecordingCanvas::new(100.0, 100.0);
    let mut style = Style::default();
    style.background.color = Rgba::rgb(0, 128, 0);
    let area = Rect::from_xywh(10.0, 10.0, 30.0, 30.0);
    painter
      .draw_background(&mut canvas, &style, Some(area), area)
      .unwrap();
    assert_eq!(
      canvas.ops(),
      &[
        DrawOp::Save,
        DrawOp::Rectangle(area),
        DrawOp::Clip,
        DrawOp::SetColor(Rgba::rgb(0, 128, 0)),
        DrawOp::Paint,
        DrawOp::Restore,
      ]
    );
  }

  #[test]
  fn test_missing_image_falls_back_to_color() {
    let (mut images, mut text) = (NoImages, NoText);
    let mut painter = Painter::new(&mut images, &mut text);
    let mut canvas = RecordingCanvas::new(100.0, 100.0);
    let mut style = Style::default();
    style.background.color = Rgba::BLACK;
    style.background.image = Some("missing.png".to_string());
    painter
      .draw_background(
        &mut canvas,
        &style,
        Some(Rect::from_xywh(0.0, 0.0, 50.0, 50.0)),
        Rect::from_xywh(0.0, 0.0, 50.0, 50.0),
      )
      .unwrap();
    assert!(canvas.ops().contains(&DrawOp::Paint));
    assert!(!canvas
      .ops()
      .iter()
      .any(|op| matches!(op, DrawOp::SetPattern { .. })));
  }

  #[test]
  fn test_no_repeat_uses_extend_none() {
    let mut images = OneImage(test_image(20, 20));
    let mut text = NoText;
    let mut painter = Painter::new(&mut images, &mut text);
    let mut canvas = RecordingCanvas::new(100.0, 100.0);
    let mut style = Style::default();
    style.background.image = Some("tile.png".to_string());
    style.background.repeat = BackgroundRepeat::NoRepeat;
    painter
      .draw_background(
        &mut canvas,
        &style,
        Some(Rect::from_xywh(0.0, 0.0, 50.0, 50.0)),
        Rect::from_xywh(0.0, 0.0, 50.0, 50.0),
      )
      .unwrap();
    assert!(canvas.ops().contains(&DrawOp::SetPattern {
      width: 20,
      height: 20,
      extend: Extend::None,
      filter: ImageFilter::Good,
    }));
  }

  #[test]
  fn test_repeat_x_clips_to_one_image_band() {
    let mut images = OneImage(test_image(20, 10));
    let mut text = NoText;
    let mut painter = Painter::new(&mut images, &mut text);
    let mut canvas = RecordingCanvas::new(100.0, 100.0);
    let mut style = Style::default();
    style.background.image = Some("tile.png".to_string());
    style.background.repeat = BackgroundRepeat::RepeatX;
    painter
      .draw_background(
        &mut canvas,
        &style,
        None,
        Rect::from_xywh(0.0, 0.0, 100.0, 100.0),
      )
      .unwrap();
    // The band rectangle is one image tall and spans the clip width
    let band = canvas.ops().iter().find_map(|op| match op {
      DrawOp::Rectangle(rect) => Some(*rect),
      _ => None,
    });
    assert_eq!(band, Some(Rect::from_xywh(0.0, 0.0, 100.0, 10.0)));
  }

  #[test]
  fn test_position_translates_before_scaling() {
    let mut images = OneImage(test_image(50, 50));
    let mut text = NoText;
    let mut painter = Painter::new(&mut images, &mut text);
    let mut canvas = RecordingCanvas::new(200.0, 200.0);
    let mut style = Style::default();
    style.background.image = Some("img.png".to_string());
    style.background.repeat = BackgroundRepeat::NoRepeat;
    // 100% of (positioning - image) = 150 - 50 = 100 on each axis
    style.background.position = (
      LengthOrPercentage::Percent(100.0),
      LengthOrPercentage::Percent(100.0),
    );
    painter
      .draw_background(
        &mut canvas,
        &style,
        None,
        Rect::from_xywh(10.0, 10.0, 150.0, 150.0),
      )
      .unwrap();
    let translates: Vec<_> = canvas
      .ops()
      .iter()
      .filter_map(|op| match op {
        DrawOp::Translate(dx, dy) => Some((*dx, *dy)),
        _ => None,
      })
      .collect();
    assert_eq!(translates, vec![(10.0, 10.0), (100.0, 100.0)]);
  }
}
