use crate::dom;
use crate::events::{self, EventListener};
use crate::frame::FieldContext;
use crate::render::{GpuCapacity, GpuState};
use crate::scene::{FieldConfig, FieldState};
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::prelude::*;
use web_sys as web;

#[wasm_bindgen(start)]
pub fn start() -> Result<(), JsValue> {
    console_error_panic_hook::set_once();
    console_log::init_with_level(log::Level::Info).ok();
    log::info!("ambient-field loaded");
    Ok(())
}

struct Mounted {
    ctx: Rc<RefCell<FieldContext>>,
    listeners: Vec<EventListener>,
}

impl Drop for Mounted {
    fn drop(&mut self) {
        // Listeners first so no handler runs against a stopped context.
        self.listeners.clear();
        match self.ctx.try_borrow_mut() {
            Ok(mut c) => c.shutdown(),
            Err(_) => log::warn!("[field] teardown while context busy"),
        }
    }
}

/// Handle returned to JS for one mounted field.
#[wasm_bindgen]
pub struct FieldHandle {
    inner: Option<Mounted>,
}

#[wasm_bindgen]
impl FieldHandle {
    /// Stop rendering, detach listeners and release GPU buffers. Calling it
    /// again does nothing.
    pub fn destroy(&mut self) {
        if self.inner.take().is_some() {
            log::info!("[field] destroyed");
        }
    }

    /// False when mounting failed or after `destroy`.
    #[wasm_bindgen(js_name = isActive)]
    pub fn is_active(&self) -> bool {
        self.inner.is_some()
    }
}

/// Mount a field onto the canvas with id `canvas_id`. Any failure leaves
/// the page untouched and yields an inactive handle.
#[wasm_bindgen]
pub async fn mount(canvas_id: String, config_json: Option<String>) -> FieldHandle {
    match try_mount(&canvas_id, config_json.as_deref()).await {
        Ok(mounted) => FieldHandle {
            inner: Some(mounted),
        },
        Err(e) => {
            log::warn!("[field] disabled: {:?}", e);
            FieldHandle { inner: None }
        }
    }
}

fn load_config(config_json: Option<&str>) -> FieldConfig {
    match config_json {
        None => FieldConfig::default(),
        Some(json) => FieldConfig::from_json(json).unwrap_or_else(|e| {
            log::warn!("[config] {}; using defaults", e);
            FieldConfig::default()
        }),
    }
}

async fn try_mount(canvas_id: &str, config_json: Option<&str>) -> anyhow::Result<Mounted> {
    let window = web::window().ok_or_else(|| anyhow::anyhow!("no window"))?;
    let document = window
        .document()
        .ok_or_else(|| anyhow::anyhow!("no document"))?;
    let canvas = dom::canvas_by_id(&document, canvas_id)?;
    if !dom::has_webgpu(&window) {
        anyhow::bail!("WebGPU unavailable");
    }

    let config = load_config(config_json);
    let viewport = dom::read_viewport(&window);
    let mut state = FieldState::new(&config, viewport, dom::is_mobile_agent(&window))?;
    state.on_scroll(dom::scroll_y(&window));

    let (w, h) = dom::sync_canvas_backing_size(&canvas, &viewport);
    let capacity = GpuCapacity {
        particles: state.point_count(),
        line_segments: state.lines().map_or(0, |l| l.capacity()),
        shape_segments: state.shape_segments().len(),
    };
    let gpu = GpuState::new(&canvas, w, h, viewport.effective_pixel_ratio(), capacity).await?;

    let ctx = FieldContext::create(state, gpu, canvas, window.clone());
    let listeners = events::wire_field_listeners(&ctx, &window, &document);
    {
        let mut c = ctx.borrow_mut();
        c.start();
        if document.hidden() {
            c.set_visible(false);
        }
    }
    log::info!("[field] mounted on #{}", canvas_id);
    Ok(Mounted { ctx, listeners })
}
