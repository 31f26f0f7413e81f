use super::listener::EventListener;
use crate::dom;
use crate::frame::FieldContext;
use std::cell::RefCell;
use std::rc::Rc;
use web_sys as web;

pub fn wire_resize(ctx: &Rc<RefCell<FieldContext>>, window: &web::Window) -> Option<EventListener> {
    let ctx = ctx.clone();
    let win = window.clone();
    EventListener::passive(window.as_ref(), "resize", move |_ev: web::Event| {
        if let Ok(mut c) = ctx.try_borrow_mut() {
            c.resize(dom::read_viewport(&win));
        }
    })
}

/// Hidden documents pause the loop; visible ones resume it.
pub fn wire_visibility(
    ctx: &Rc<RefCell<FieldContext>>,
    document: &web::Document,
) -> Option<EventListener> {
    let ctx = ctx.clone();
    let doc = document.clone();
    EventListener::passive(document.as_ref(), "visibilitychange", move |_ev: web::Event| {
        let visible = !doc.hidden();
        if let Ok(mut c) = ctx.try_borrow_mut() {
            c.set_visible(visible);
        }
    })
}
