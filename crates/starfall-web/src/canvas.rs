use starfall::{BlendMode, DrawContext, Paint, SurfaceState};
use glam::Vec2;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{CanvasGradient, CanvasRenderingContext2d, HtmlCanvasElement, Window};

/// A `<canvas>` element and its 2D context, sized to its CSS box.
pub struct CanvasSurface {
    window: Window,
    canvas: HtmlCanvasElement,
    ctx: CanvasRenderingContext2d,
}

impl CanvasSurface {
    /// Look up `<canvas id=canvas_id>` and acquire its 2D context.
    pub fn from_element_id(window: &Window, canvas_id: &str) -> Result<Self, JsValue> {
        let document = window
            .document()
            .ok_or_else(|| JsValue::from_str("no document"))?;
        let canvas = document
            .get_element_by_id(canvas_id)
            .ok_or_else(|| JsValue::from_str(&format!("canvas #{} not found", canvas_id)))?
            .dyn_into::<HtmlCanvasElement>()
            .map_err(|_| JsValue::from_str(&format!("#{} is not a canvas", canvas_id)))?;
        let ctx = canvas
            .get_context("2d")?
            .ok_or_else(|| JsValue::from_str("2d context unavailable"))?
            .dyn_into::<CanvasRenderingContext2d>()?;

        Ok(Self {
            window: window.clone(),
            canvas,
            ctx,
        })
    }

    /// Current logical size (CSS pixels) and device pixel ratio.
    pub fn measure(&self) -> (f32, f32, f32) {
        (
            self.canvas.client_width() as f32,
            self.canvas.client_height() as f32,
            self.window.device_pixel_ratio() as f32,
        )
    }

    /// Size the backing store to the surface's pixel buffer and scale drawing
    /// so that one logical unit maps to one CSS pixel.
    pub fn apply(&self, surface: &SurfaceState) -> Result<(), JsValue> {
        self.canvas.set_width(surface.pixel_width());
        self.canvas.set_height(surface.pixel_height());
        let dpr = surface.device_pixel_ratio() as f64;
        self.ctx.set_transform(dpr, 0.0, 0.0, dpr, 0.0, 0.0)
    }

    fn gradient(&self, paint: &Paint) -> Option<CanvasGradient> {
        let Paint::Linear(g) = paint else {
            return None;
        };
        let gradient = self.ctx.create_linear_gradient(
            g.start.x as f64,
            g.start.y as f64,
            g.end.x as f64,
            g.end.y as f64,
        );
        for stop in &g.stops {
            if let Err(e) = gradient.add_color_stop(stop.offset, &stop.color.to_css()) {
                log::warn!("canvas: bad gradient stop {:?}: {:?}", stop, e);
            }
        }
        Some(gradient)
    }
}

impl DrawContext for CanvasSurface {
    fn clear_rect(&mut self, x: f32, y: f32, width: f32, height: f32) {
        self.ctx
            .clear_rect(x as f64, y as f64, width as f64, height as f64);
    }

    fn save(&mut self) {
        self.ctx.save();
    }

    fn restore(&mut self) {
        self.ctx.restore();
    }

    fn set_global_alpha(&mut self, alpha: f32) {
        // Canvas ignores out-of-range values instead of saturating them
        self.ctx.set_global_alpha(alpha.clamp(0.0, 1.0) as f64);
    }

    fn set_blend_mode(&mut self, mode: BlendMode) {
        let op = match mode {
            BlendMode::Alpha => "source-over",
            BlendMode::Additive => "lighter",
        };
        let _ = self.ctx.set_global_composite_operation(op);
    }

    fn set_fill(&mut self, paint: &Paint) {
        match paint {
            Paint::Solid(color) => self.ctx.set_fill_style_str(&color.to_css()),
            Paint::Linear(_) => {
                if let Some(g) = self.gradient(paint) {
                    self.ctx.set_fill_style_canvas_gradient(&g);
                }
            }
        }
    }

    fn set_stroke(&mut self, paint: &Paint) {
        match paint {
            Paint::Solid(color) => self.ctx.set_stroke_style_str(&color.to_css()),
            Paint::Linear(_) => {
                if let Some(g) = self.gradient(paint) {
                    self.ctx.set_stroke_style_canvas_gradient(&g);
                }
            }
        }
    }

    fn set_line_width(&mut self, width: f32) {
        self.ctx.set_line_width(width as f64);
    }

    fn begin_path(&mut self) {
        self.ctx.begin_path();
    }

    fn move_to(&mut self, p: Vec2) {
        self.ctx.move_to(p.x as f64, p.y as f64);
    }

    fn line_to(&mut self, p: Vec2) {
        self.ctx.line_to(p.x as f64, p.y as f64);
    }

    fn arc(&mut self, center: Vec2, radius: f32, start_angle: f32, end_angle: f32) {
        let _ = self.ctx.arc(
            center.x as f64,
            center.y as f64,
            radius as f64,
            start_angle as f64,
            end_angle as f64,
        );
    }

    fn close_path(&mut self) {
        self.ctx.close_path();
    }

    fn fill(&mut self) {
        self.ctx.fill();
    }

    fn stroke(&mut self) {
        self.ctx.stroke();
    }
}
