use crate::frame::FieldContext;
use std::cell::RefCell;
use std::rc::Rc;
use web_sys as web;

mod listener;
mod pointer;
mod viewport;

pub use listener::EventListener;

/// Attach every listener the field needs. Dropping the returned vector
/// detaches them all.
pub fn wire_field_listeners(
    ctx: &Rc<RefCell<FieldContext>>,
    window: &web::Window,
    document: &web::Document,
) -> Vec<EventListener> {
    let listeners: Vec<EventListener> = [
        pointer::wire_pointermove(ctx, window),
        pointer::wire_scroll(ctx, window),
        viewport::wire_resize(ctx, window),
        viewport::wire_visibility(ctx, document),
    ]
    .into_iter()
    .flatten()
    .collect();
    log::info!(
        "[events] wired {}",
        listeners
            .iter()
            .map(EventListener::kind)
            .collect::<Vec<_>>()
            .join(",")
    );
    listeners
}
