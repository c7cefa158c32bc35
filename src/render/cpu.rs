use std::collections::HashMap;
use std::sync::Arc;

use vello_cpu::kurbo::Shape as _;

use crate::assets::Raster;
use crate::assets::tint::TintKey;
use crate::engine::Scene;
use crate::engine::rotation::SlotState;
use crate::foundation::core::{Affine, Rgba8Premul};
use crate::foundation::error::{SpinError, SpinResult};
use crate::render::FrameRGBA;

/// Circle flattening tolerance in pixels.
const CIRCLE_TOLERANCE: f64 = 0.05;

/// Backend settings shared by every rasterizer of one emission.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RenderSettings {
    /// If set, frames are filled with this straight RGBA8 color before drawing.
    pub clear_rgba: Option<[u8; 4]>,
}

/// CPU rasterizer powered by `vello_cpu`.
///
/// Sprite paints are converted lazily and cached per rasterizer, so one instance serves every
/// frame of an emission.
pub struct CpuRasterizer {
    settings: RenderSettings,
    tint_cache: HashMap<TintKey, vello_cpu::Image>,
    outline_cache: Option<vello_cpu::Image>,
}

impl CpuRasterizer {
    /// Create a rasterizer with empty paint caches.
    pub fn new(settings: RenderSettings) -> Self {
        Self {
            settings,
            tint_cache: HashMap::new(),
            outline_cache: None,
        }
    }

    /// Rasterize one step: every slot in ascending order onto a fresh transparent frame.
    pub fn rasterize(&mut self, scene: &Scene, slots: &[SlotState]) -> SpinResult<FrameRGBA> {
        let edge = scene.layout().container_size;
        let edge_u16: u16 = edge
            .try_into()
            .map_err(|_| SpinError::render("container size exceeds u16"))?;

        let mut ctx = vello_cpu::RenderContext::new(edge_u16, edge_u16);
        if let Some([r, g, b, a]) = self.settings.clear_rgba {
            ctx.set_paint_transform(vello_cpu::kurbo::Affine::IDENTITY);
            ctx.set_transform(vello_cpu::kurbo::Affine::IDENTITY);
            ctx.set_paint(vello_cpu::peniko::Color::from_rgba8(r, g, b, a));
            ctx.fill_rect(&vello_cpu::kurbo::Rect::new(
                0.0,
                0.0,
                f64::from(edge),
                f64::from(edge),
            ));
        }

        for slot in slots {
            match scene.sprites() {
                Some(_) => self.draw_image_slot(&mut ctx, scene, slot)?,
                None => draw_circle_slot(&mut ctx, slot),
            }
        }

        ctx.flush();
        let mut pixmap = vello_cpu::Pixmap::new(edge_u16, edge_u16);
        ctx.render_to_pixmap(&mut pixmap);

        Ok(FrameRGBA {
            width: edge,
            height: edge,
            data: pixmap.data_as_u8_slice().to_vec(),
            premultiplied: true,
        })
    }

    fn draw_image_slot(
        &mut self,
        ctx: &mut vello_cpu::RenderContext,
        scene: &Scene,
        slot: &SlotState,
    ) -> SpinResult<()> {
        let Some(sprites) = scene.sprites() else {
            return Ok(());
        };
        let visual = &slot.visual;
        let scale = sprites.scale_for(visual.size);
        if scale <= 0.0 || visual.opacity <= 0.0 {
            return Ok(());
        }

        let placement = Affine::translate(slot.center.to_vec2())
            * Affine::rotate(slot.rotation)
            * Affine::scale(scale);

        let layered = visual.opacity < 1.0;
        if layered {
            ctx.push_opacity_layer(visual.opacity as f32);
        }

        if let Some(outline) = sprites.outline() {
            let paint = self.outline_paint(outline)?;
            fill_raster(ctx, paint, outline, placement);
        }

        let key = TintKey::of(visual);
        let tinted = sprites
            .tinted(visual)
            .ok_or_else(|| SpinError::render(format!("no sprite prepared for tint {key:?}")))?;
        let paint = self.tint_paint(key, tinted)?;
        fill_raster(ctx, paint, tinted, placement);

        if layered {
            ctx.pop_layer();
        }
        Ok(())
    }

    fn tint_paint(&mut self, key: TintKey, raster: &Raster) -> SpinResult<vello_cpu::Image> {
        if let Some(paint) = self.tint_cache.get(&key) {
            return Ok(paint.clone());
        }
        let paint = raster_to_paint(raster)?;
        self.tint_cache.insert(key, paint.clone());
        Ok(paint)
    }

    fn outline_paint(&mut self, raster: &Raster) -> SpinResult<vello_cpu::Image> {
        if let Some(paint) = &self.outline_cache {
            return Ok(paint.clone());
        }
        let paint = raster_to_paint(raster)?;
        self.outline_cache = Some(paint.clone());
        Ok(paint)
    }
}

fn draw_circle_slot(ctx: &mut vello_cpu::RenderContext, slot: &SlotState) {
    let visual = &slot.visual;
    let radius = visual.size / 2.0;
    if radius <= 0.0 || visual.opacity <= 0.0 {
        return;
    }

    ctx.set_paint_transform(vello_cpu::kurbo::Affine::IDENTITY);
    ctx.set_transform(vello_cpu::kurbo::Affine::IDENTITY);
    let [r, g, b, a] = visual.color.with_alpha(visual.alpha);
    ctx.set_paint(vello_cpu::peniko::Color::from_rgba8(r, g, b, a));

    let layered = visual.opacity < 1.0;
    if layered {
        ctx.push_opacity_layer(visual.opacity as f32);
    }
    let circle = vello_cpu::kurbo::Circle::new((slot.center.x, slot.center.y), radius);
    ctx.fill_path(&circle.to_path(CIRCLE_TOLERANCE));
    if layered {
        ctx.pop_layer();
    }
}

/// Fill `raster`'s bounds with its paint, centered on the placement origin.
fn fill_raster(
    ctx: &mut vello_cpu::RenderContext,
    paint: vello_cpu::Image,
    raster: &Raster,
    placement: Affine,
) {
    let (w, h) = (f64::from(raster.width), f64::from(raster.height));
    let transform = placement * Affine::translate((-w / 2.0, -h / 2.0));

    ctx.set_paint_transform(vello_cpu::kurbo::Affine::IDENTITY);
    ctx.set_transform(affine_to_cpu(transform));
    ctx.set_paint(paint);
    ctx.fill_rect(&vello_cpu::kurbo::Rect::new(0.0, 0.0, w, h));
}

fn affine_to_cpu(a: Affine) -> vello_cpu::kurbo::Affine {
    vello_cpu::kurbo::Affine::new(a.as_coeffs())
}

fn raster_to_paint(raster: &Raster) -> SpinResult<vello_cpu::Image> {
    let pixmap = straight_bytes_to_pixmap(&raster.rgba8, raster.width, raster.height)?;
    Ok(vello_cpu::Image {
        image: vello_cpu::ImageSource::Pixmap(Arc::new(pixmap)),
        sampler: vello_cpu::peniko::ImageSampler::default(),
    })
}

fn straight_bytes_to_pixmap(
    rgba8: &[u8],
    width: u32,
    height: u32,
) -> SpinResult<vello_cpu::Pixmap> {
    let w: u16 = width
        .try_into()
        .map_err(|_| SpinError::render("sprite width exceeds u16"))?;
    let h: u16 = height
        .try_into()
        .map_err(|_| SpinError::render("sprite height exceeds u16"))?;
    if rgba8.len() != width as usize * height as usize * 4 {
        return Err(SpinError::render("sprite byte length mismatch"));
    }

    let mut may_have_opacities = false;
    let mut pixels = Vec::with_capacity(width as usize * height as usize);
    for px in rgba8.chunks_exact(4) {
        let p = Rgba8Premul::from_straight_rgba(px[0], px[1], px[2], px[3]);
        may_have_opacities |= p.a != 255;
        pixels.push(vello_cpu::peniko::color::PremulRgba8 {
            r: p.r,
            g: p.g,
            b: p.b,
            a: p.a,
        });
    }

    Ok(vello_cpu::Pixmap::from_parts_with_opacity(
        pixels,
        w,
        h,
        may_have_opacities,
    ))
}

#[cfg(test)]
#[path = "../../tests/unit/render/cpu.rs"]
mod tests;
