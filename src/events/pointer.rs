use super::listener::EventListener;
use crate::dom;
use crate::frame::FieldContext;
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::JsCast;
use web_sys as web;

/// Pointer position in viewport CSS pixels feeds the parallax target.
pub fn wire_pointermove(
    ctx: &Rc<RefCell<FieldContext>>,
    window: &web::Window,
) -> Option<EventListener> {
    let ctx = ctx.clone();
    EventListener::passive(window.as_ref(), "pointermove", move |ev: web::Event| {
        let Some(mouse) = ev.dyn_ref::<web::MouseEvent>() else {
            return;
        };
        if let Ok(mut c) = ctx.try_borrow_mut() {
            c.state
                .on_pointer_move(mouse.client_x() as f32, mouse.client_y() as f32);
        }
    })
}

pub fn wire_scroll(ctx: &Rc<RefCell<FieldContext>>, window: &web::Window) -> Option<EventListener> {
    let ctx = ctx.clone();
    let win = window.clone();
    EventListener::passive(window.as_ref(), "scroll", move |_ev: web::Event| {
        if let Ok(mut c) = ctx.try_borrow_mut() {
            c.state.on_scroll(dom::scroll_y(&win));
        }
    })
}
