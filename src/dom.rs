use crate::scene::config::is_mobile_user_agent;
use crate::scene::Viewport;
use wasm_bindgen::JsCast;
use wasm_bindgen::JsValue;
use web_sys as web;

pub fn canvas_by_id(document: &web::Document, id: &str) -> anyhow::Result<web::HtmlCanvasElement> {
    let el = document
        .get_element_by_id(id)
        .ok_or_else(|| anyhow::anyhow!("missing #{}", id))?;
    el.dyn_into::<web::HtmlCanvasElement>()
        .map_err(|e| anyhow::anyhow!(format!("#{} is not a canvas: {:?}", id, e)))
}

fn js_f32(value: Result<JsValue, JsValue>) -> f32 {
    value
        .ok()
        .and_then(|v| v.as_f64())
        .map(|v| v as f32)
        .unwrap_or(1.0)
}

/// Current CSS viewport of the window.
pub fn read_viewport(window: &web::Window) -> Viewport {
    Viewport::new(
        js_f32(window.inner_width()),
        js_f32(window.inner_height()),
        window.device_pixel_ratio() as f32,
    )
}

pub fn is_mobile_agent(window: &web::Window) -> bool {
    window
        .navigator()
        .user_agent()
        .map(|ua| is_mobile_user_agent(&ua))
        .unwrap_or(false)
}

/// `navigator.gpu` present. wgpu's webgpu backend has nothing to fall back to.
pub fn has_webgpu(window: &web::Window) -> bool {
    js_sys::Reflect::has(window.navigator().as_ref(), &JsValue::from_str("gpu")).unwrap_or(false)
}

pub fn scroll_y(window: &web::Window) -> f32 {
    window.scroll_y().map(|v| v as f32).unwrap_or(0.0)
}

/// Size the canvas backing store to the viewport at the capped pixel ratio.
pub fn sync_canvas_backing_size(canvas: &web::HtmlCanvasElement, viewport: &Viewport) -> (u32, u32) {
    let (w_px, h_px) = viewport.backing_size();
    if canvas.width() != w_px {
        canvas.set_width(w_px);
    }
    if canvas.height() != h_px {
        canvas.set_height(h_px);
    }
    (w_px, h_px)
}
