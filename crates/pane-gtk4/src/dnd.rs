//! Drag source, drop target and quadrant overlay for a pane

use std::rc::Rc;

use gtk4::prelude::*;
use gtk4::{gdk, gio};
use tracing::{debug, warn};

use pane_core::constants::TERMINAL_MIME;
use pane_core::drag::DROP_TARGETS;
use pane_core::DropPayload;

use crate::GtkPane;

// Overlay fill while a quadrant is hovered
const HIGHLIGHT_RGBA: (f64, f64, f64, f64) = (0.21, 0.52, 0.89, 0.35);
const HIGHLIGHT_BORDER: f64 = 2.0;

/// Make the title bar a drag handle that carries the pane UUID.
///
/// A drag released outside any target asks the pane to detach.
pub(crate) fn install_drag_source(pane: &Rc<GtkPane>) {
    let backend = pane.backend();
    let source = gtk4::DragSource::new();
    source.set_actions(gdk::DragAction::MOVE);

    let weak = Rc::downgrade(pane);
    source.connect_prepare(move |_, _, _| {
        let pane = weak.upgrade()?;
        let bytes = glib::Bytes::from_owned(pane.uuid().to_string().into_bytes());
        Some(gdk::ContentProvider::for_bytes(TERMINAL_MIME, &bytes))
    });

    let root = backend.root().clone();
    source.connect_drag_begin(move |source, _| {
        let paintable = gtk4::WidgetPaintable::new(Some(&root));
        source.set_icon(Some(&paintable), 0, 0);
    });

    let weak = Rc::downgrade(pane);
    source.connect_drag_cancel(move |_, drag, reason| {
        if reason != gdk::DragCancelReason::NoTarget {
            return false;
        }
        let Some(pane) = weak.upgrade() else {
            return false;
        };
        let (_, x, y) = drag.device().surface_at_position();
        pane.on_drag_failed(x, y);
        true
    });

    backend.title_bar().container.add_controller(source);
}

/// Accept pane, URI and text drops on the terminal area
pub(crate) fn install_drop_target(pane: &Rc<GtkPane>, area: &impl IsA<gtk4::Widget>) {
    let formats = gdk::ContentFormats::new(&DROP_TARGETS);
    let target = gtk4::DropTargetAsync::new(Some(formats), gdk::DragAction::COPY | gdk::DragAction::MOVE);

    let weak = Rc::downgrade(pane);
    target.connect_drag_motion(move |target, drop, x, y| {
        let Some(pane) = weak.upgrade() else {
            return gdk::DragAction::empty();
        };
        let Some(widget) = target.widget() else {
            return gdk::DragAction::empty();
        };
        if drop.formats().contain_mime_type(TERMINAL_MIME) {
            pane.on_drag_motion(x, y, widget.width() as f64, widget.height() as f64);
            gdk::DragAction::MOVE
        } else {
            gdk::DragAction::COPY
        }
    });

    let weak = Rc::downgrade(pane);
    target.connect_drag_leave(move |_, _| {
        if let Some(pane) = weak.upgrade() {
            pane.on_drag_leave();
        }
    });

    let weak = Rc::downgrade(pane);
    target.connect_drop(move |target, drop, x, y| {
        let Some(pane) = weak.upgrade() else {
            return false;
        };
        let (width, height) = target
            .widget()
            .map(|w| (w.width() as f64, w.height() as f64))
            .unwrap_or((0.0, 0.0));
        let Some(mime) = DROP_TARGETS
            .iter()
            .copied()
            .find(|m| drop.formats().contain_mime_type(m))
        else {
            pane.on_drop(None, x, y, width, height);
            return false;
        };

        let drop = drop.clone();
        let weak = Rc::downgrade(&pane);
        glib::spawn_future_local(async move {
            let payload = match read_drop(&drop, mime).await {
                Ok(data) => DropPayload::decode(mime, &data),
                Err(e) => {
                    warn!("Failed to read {} drop: {}", mime, e);
                    None
                }
            };
            let accepted = weak
                .upgrade()
                .is_some_and(|pane| pane.on_drop(payload, x, y, width, height));
            let action = match (accepted, mime == TERMINAL_MIME) {
                (false, _) => gdk::DragAction::empty(),
                (true, true) => gdk::DragAction::MOVE,
                (true, false) => gdk::DragAction::COPY,
            };
            debug!("Drop of {} finished with {:?}", mime, action);
            drop.finish(action);
        });
        true
    });

    area.add_controller(target);
}

async fn read_drop(drop: &gdk::Drop, mime: &str) -> Result<glib::Bytes, glib::Error> {
    let (stream, _) = drop.read_future(&[mime], glib::Priority::DEFAULT).await?;
    let sink = gio::MemoryOutputStream::new_resizable();
    sink.splice_future(
        &stream,
        gio::OutputStreamSpliceFlags::CLOSE_SOURCE | gio::OutputStreamSpliceFlags::CLOSE_TARGET,
        glib::Priority::DEFAULT,
    )
    .await?;
    Ok(sink.steal_as_bytes())
}

/// Paint the hovered quadrant on the overlay drawing area
pub(crate) fn install_overlay(pane: &Rc<GtkPane>) {
    let weak = Rc::downgrade(pane);
    pane.backend().drag_area().set_draw_func(move |_, cr: &cairo::Context, width, height| {
        let Some(pane) = weak.upgrade() else {
            return;
        };
        let state = pane.drag_state();
        let Some(quadrant) = state.quadrant.filter(|_| state.active) else {
            return;
        };
        let rect = quadrant.highlight_rect(width as f64, height as f64);
        let (r, g, b, a) = HIGHLIGHT_RGBA;

        cr.set_source_rgba(r, g, b, a);
        cr.rectangle(rect.x, rect.y, rect.width, rect.height);
        if let Err(e) = cr.fill() {
            warn!("Overlay fill failed: {}", e);
            return;
        }
        cr.set_source_rgba(r, g, b, 1.0);
        cr.set_line_width(HIGHLIGHT_BORDER);
        let inset = HIGHLIGHT_BORDER / 2.0;
        cr.rectangle(rect.x + inset, rect.y + inset, rect.width - HIGHLIGHT_BORDER, rect.height - HIGHLIGHT_BORDER);
        if let Err(e) = cr.stroke() {
            warn!("Overlay stroke failed: {}", e);
        }
    });
}
