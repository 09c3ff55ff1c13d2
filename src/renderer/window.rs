//! On-screen window via OpenCV highgui
//!
//! Rasterises each [`DrawList`] onto a BGR canvas the size of the play area
//! and shows it. Sprites are decoded once per slot and cached.

use std::collections::HashMap;

use glam::Vec2;
use opencv::core::{self, Mat, Point, Scalar};
use opencv::prelude::*;
use opencv::{highgui, imgcodecs, imgproc};

use super::draw::{Color, DrawCmd, DrawList};
use super::sink::FrameSink;
use crate::assets::{Sprite, SpriteSheet, SpriteSlot, SpriteSource};
use crate::error::{ArcadeError, Result};
use crate::platform::Frame;
use crate::sim::Rect;

/// Placeholder for sprite files that fail to decode
const UNDECODABLE: Color = Color::rgb(128, 128, 128);

fn cv_err(e: opencv::Error) -> ArcadeError {
    ArcadeError::Display(e.to_string())
}

fn bgr(color: Color) -> Scalar {
    Scalar::new(color.b as f64, color.g as f64, color.r as f64, 0.0)
}

fn point(p: Vec2) -> Point {
    Point::new(p.x.round() as i32, p.y.round() as i32)
}

fn solid(width: i32, height: i32, color: Color) -> Result<Mat> {
    Mat::new_rows_cols_with_default(height.max(1), width.max(1), core::CV_8UC3, bgr(color)).map_err(cv_err)
}

/// Part of `rect` that lies on a `width` x `height` canvas
fn clip(rect: Rect, width: i32, height: i32) -> Option<core::Rect> {
    let x0 = (rect.left().floor() as i32).max(0);
    let y0 = (rect.top().floor() as i32).max(0);
    let x1 = (rect.right().ceil() as i32).min(width);
    let y1 = (rect.bottom().ceil() as i32).min(height);
    (x1 > x0 && y1 > y0).then(|| core::Rect::new(x0, y0, x1 - x0, y1 - y0))
}

fn decode_sprite(sprite: &Sprite) -> Result<Mat> {
    let (w, h) = (sprite.size.x.round() as i32, sprite.size.y.round() as i32);
    match &sprite.source {
        SpriteSource::Solid(color) => solid(w, h, *color),
        SpriteSource::Encoded { path, bytes } => {
            let buf = core::Vector::<u8>::from_slice(bytes);
            let decoded = imgcodecs::imdecode(&buf, imgcodecs::IMREAD_COLOR).map_err(cv_err)?;
            if decoded.empty() {
                log::warn!("Could not decode sprite {:?}, using placeholder", path);
                return solid(w, h, UNDECODABLE);
            }
            let mut scaled = Mat::default();
            imgproc::resize(
                &decoded,
                &mut scaled,
                core::Size::new(w.max(1), h.max(1)),
                0.0,
                0.0,
                imgproc::INTER_LINEAR,
            )
            .map_err(cv_err)?;
            Ok(scaled)
        }
    }
}

/// A highgui window showing one game
pub struct WindowSink {
    title: String,
    sprite_cache: HashMap<SpriteSlot, Mat>,
    frames: u64,
}

impl WindowSink {
    pub fn open(title: &str) -> Result<Self> {
        highgui::named_window(title, highgui::WINDOW_AUTOSIZE).map_err(cv_err)?;
        log::info!("Opened window {:?}", title);
        Ok(Self {
            title: title.to_string(),
            sprite_cache: HashMap::new(),
            frames: 0,
        })
    }

    pub fn frames(&self) -> u64 {
        self.frames
    }

    /// Rasterise `scene` over `frame`
    pub fn compose(&mut self, frame: &Frame, scene: &DrawList, sprites: &SpriteSheet) -> Result<Mat> {
        let (w, h) = (scene.width.round() as i32, scene.height.round() as i32);
        let mut canvas = solid(w, h, Color::BLACK)?;

        for cmd in &scene.cmds {
            match cmd {
                DrawCmd::CameraFrame => draw_camera(&mut canvas, frame)?,
                DrawCmd::FillRect { rect, color } => {
                    if let Some(r) = clip(*rect, w, h) {
                        imgproc::rectangle(&mut canvas, r, bgr(*color), imgproc::FILLED, imgproc::LINE_8, 0)
                            .map_err(cv_err)?;
                    }
                }
                DrawCmd::Circle { center, radius, color } => {
                    imgproc::circle(
                        &mut canvas,
                        point(*center),
                        radius.round() as i32,
                        bgr(*color),
                        imgproc::FILLED,
                        imgproc::LINE_AA,
                        0,
                    )
                    .map_err(cv_err)?;
                }
                DrawCmd::Polyline { points, width, color } => {
                    let thickness = (width.round() as i32).max(1);
                    for pair in points.windows(2) {
                        imgproc::line(
                            &mut canvas,
                            point(pair[0]),
                            point(pair[1]),
                            bgr(*color),
                            thickness,
                            imgproc::LINE_AA,
                            0,
                        )
                        .map_err(cv_err)?;
                    }
                }
                DrawCmd::Text { text, pos, scale, color } => {
                    imgproc::put_text(
                        &mut canvas,
                        text,
                        point(*pos),
                        imgproc::FONT_HERSHEY_SIMPLEX,
                        *scale as f64,
                        bgr(*color),
                        ((scale * 2.0).round() as i32).max(1),
                        imgproc::LINE_AA,
                        false,
                    )
                    .map_err(cv_err)?;
                }
                DrawCmd::Sprite { slot, origin } => {
                    let Some(sprite) = sprites.get(*slot) else {
                        continue;
                    };
                    if !self.sprite_cache.contains_key(slot) {
                        self.sprite_cache.insert(*slot, decode_sprite(sprite)?);
                    }
                    if let Some(image) = self.sprite_cache.get(slot) {
                        blit(&mut canvas, image, *origin)?;
                    }
                }
                DrawCmd::Shade { rect, color, alpha } => {
                    if let Some(r) = clip(*rect, w, h) {
                        shade(&mut canvas, r, *color, *alpha)?;
                    }
                }
            }
        }

        Ok(canvas)
    }
}

fn draw_camera(canvas: &mut Mat, frame: &Frame) -> Result<()> {
    if !frame.has_pixels() {
        return Ok(());
    }
    let mut rgb = solid(frame.width as i32, frame.height as i32, Color::BLACK)?;
    rgb.data_bytes_mut().map_err(cv_err)?.copy_from_slice(&frame.pixels);

    let mut bgr_frame = Mat::default();
    imgproc::cvt_color_def(&rgb, &mut bgr_frame, imgproc::COLOR_RGB2BGR).map_err(cv_err)?;
    let size = canvas.size().map_err(cv_err)?;
    imgproc::resize(&bgr_frame, canvas, size, 0.0, 0.0, imgproc::INTER_LINEAR).map_err(cv_err)?;
    Ok(())
}

/// Copy `image` onto `canvas` with its top-left at `origin`, clipped
fn blit(canvas: &mut Mat, image: &Mat, origin: Vec2) -> Result<()> {
    let (cw, ch) = (canvas.cols(), canvas.rows());
    let area = Rect::from_origin(origin, Vec2::new(image.cols() as f32, image.rows() as f32));
    let Some(dst) = clip(area, cw, ch) else {
        return Ok(());
    };
    let (ox, oy) = (origin.x.floor() as i32, origin.y.floor() as i32);
    let src = core::Rect::new(dst.x - ox, dst.y - oy, dst.width, dst.height);
    if src.x < 0 || src.y < 0 || src.x + src.width > image.cols() || src.y + src.height > image.rows() {
        return Ok(());
    }

    let part = Mat::roi(image, src).map_err(cv_err)?;
    let mut target = Mat::roi_mut(canvas, dst).map_err(cv_err)?;
    part.copy_to(&mut *target).map_err(cv_err)?;
    Ok(())
}

/// Blend `color` over a region with weight `alpha`
fn shade(canvas: &mut Mat, region: core::Rect, color: Color, alpha: f32) -> Result<()> {
    let base = Mat::roi(canvas, region).map_err(cv_err)?.try_clone().map_err(cv_err)?;
    let tint = solid(region.width, region.height, color)?;
    let mut blended = Mat::default();
    core::add_weighted(&base, 1.0 - alpha as f64, &tint, alpha as f64, 0.0, &mut blended, -1).map_err(cv_err)?;

    let mut target = Mat::roi_mut(canvas, region).map_err(cv_err)?;
    blended.copy_to(&mut *target).map_err(cv_err)?;
    Ok(())
}

impl FrameSink for WindowSink {
    fn present(&mut self, frame: &Frame, scene: &DrawList, sprites: &SpriteSheet) -> Result<()> {
        let canvas = self.compose(frame, scene, sprites)?;
        highgui::imshow(&self.title, &canvas).map_err(cv_err)?;
        self.frames += 1;
        Ok(())
    }
}

impl Drop for WindowSink {
    fn drop(&mut self) {
        if let Err(e) = highgui::destroy_window(&self.title) {
            log::debug!("Closing window {:?}: {}", self.title, e);
        }
    }
}
