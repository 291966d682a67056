//! Session host: owns the panes, lays them out in nested `gtk4::Paned`
//! containers and reacts to their notifications.

use std::cell::{Cell, RefCell};
use std::path::PathBuf;
use std::rc::{Rc, Weak};

use gtk4::prelude::*;
use tracing::{debug, info, warn};
use uuid::Uuid;

use pane_core::{
    DetachRequest, MoveRequest, Orientation, PaneOptions, PaneRegistry, SettingsStore, SplitRequest, SyncInput,
    TitleChanged,
};
use pane_gtk4::{build_pane, GtkPane};

const DEFAULT_WIDTH: i32 = 900;
const DEFAULT_HEIGHT: i32 = 600;

pub struct Session {
    app: gtk4::Application,
    settings: Rc<SettingsStore>,
    /// Strong references in creation order; ids are positions + 1
    panes: RefCell<Vec<Rc<GtkPane>>>,
    registry: PaneRegistry<GtkPane>,
    focused: Cell<Option<Uuid>>,
}

impl Session {
    pub fn new(app: &gtk4::Application, settings: Rc<SettingsStore>) -> Rc<Self> {
        Rc::new(Self {
            app: app.clone(),
            settings,
            panes: RefCell::new(Vec::new()),
            registry: PaneRegistry::new(),
            focused: Cell::new(None),
        })
    }

    pub fn settings(&self) -> &Rc<SettingsStore> {
        &self.settings
    }

    pub fn pane_count(&self) -> usize {
        self.panes.borrow().len()
    }

    /// Open a window holding a single new pane and start its child
    pub fn open_window(self: &Rc<Self>, options: PaneOptions) -> Rc<GtkPane> {
        let pane = self.add_pane(options);
        let window = self.new_window();
        window.set_child(Some(pane.backend().root()));
        window.present();
        pane.spawn();
        pane.backend().terminal().grab_focus();
        pane
    }

    fn new_window(self: &Rc<Self>) -> gtk4::ApplicationWindow {
        let window = gtk4::ApplicationWindow::builder()
            .application(&self.app)
            .title("hugopane")
            .default_width(DEFAULT_WIDTH)
            .default_height(DEFAULT_HEIGHT)
            .build();

        let weak = Rc::downgrade(self);
        window.connect_close_request(move |window| {
            if let Some(session) = weak.upgrade() {
                session.forget_window(window.upcast_ref());
            }
            glib::Propagation::Proceed
        });
        window
    }

    fn add_pane(self: &Rc<Self>, options: PaneOptions) -> Rc<GtkPane> {
        let id = self.pane_count() as u32 + 1;
        let pane = build_pane(Rc::clone(&self.settings), options.with_id(id));
        self.registry.register(pane.uuid(), &pane);
        self.panes.borrow_mut().push(Rc::clone(&pane));
        self.connect_pane(&pane);
        info!("Session added pane {} as #{}", pane.uuid(), id);
        pane
    }

    fn connect_pane(self: &Rc<Self>, pane: &Rc<GtkPane>) {
        let signals = pane.signals();

        let weak = Rc::downgrade(self);
        signals.focus_in.subscribe(move |id: &Uuid| {
            with_session(&weak, |s| s.on_focus(*id));
        });

        let weak = Rc::downgrade(self);
        signals.close_request.subscribe(move |id: &Uuid| {
            with_session(&weak, |s| s.remove_pane(id));
        });

        let weak = Rc::downgrade(self);
        signals.split_request.subscribe(move |req: &SplitRequest| {
            with_session(&weak, |s| s.split(req));
        });

        let weak = Rc::downgrade(self);
        signals.move_request.subscribe(move |req: &MoveRequest| {
            with_session(&weak, |s| s.move_pane(req));
        });

        let weak = Rc::downgrade(self);
        signals.detach_request.subscribe(move |req: &DetachRequest| {
            with_session(&weak, |s| s.detach(req));
        });

        let weak = Rc::downgrade(self);
        signals.sync_input.subscribe(move |input: &SyncInput| {
            with_session(&weak, |s| {
                for sibling in s.registry.panes() {
                    sibling.receive_sync_input(input);
                }
            });
        });

        let weak = Rc::downgrade(self);
        signals.title_changed.subscribe(move |change: &TitleChanged| {
            with_session(&weak, |s| {
                if s.focused.get() == Some(change.pane) {
                    s.set_window_title(&change.pane, &change.title);
                }
            });
        });

        // Detaching the last pane would leave an empty window behind
        let weak = Rc::downgrade(self);
        pane.set_detach_policy(move |_| weak.upgrade().is_some_and(|s| s.pane_count() > 1));
    }

    fn on_focus(&self, id: Uuid) {
        self.focused.set(Some(id));
        if let Some(pane) = self.registry.lookup(&id) {
            self.set_window_title(&id, &pane.title());
        }
    }

    fn set_window_title(&self, id: &Uuid, title: &str) {
        let Some(pane) = self.registry.lookup(id) else {
            return;
        };
        if let Some(window) = pane.backend().root().root().and_downcast::<gtk4::Window>() {
            window.set_title(Some(title));
        }
    }

    fn split(self: &Rc<Self>, req: &SplitRequest) {
        let Some(source) = self.registry.lookup(&req.pane) else {
            warn!("Split requested for unknown pane {}", req.pane);
            return;
        };
        let directory = source.current_directory();
        let directory = if directory.is_empty() {
            source.initial_working_directory()
        } else {
            Some(PathBuf::from(directory))
        };

        let mut options = PaneOptions::new().with_profile(source.profile_id());
        options.working_directory = directory;
        let pane = self.add_pane(options);

        insert_beside(
            source.backend().root().upcast_ref(),
            pane.backend().root().upcast_ref(),
            gtk_orientation(req.orientation),
            false,
        );
        pane.spawn();
        pane.backend().terminal().grab_focus();
    }

    fn move_pane(&self, req: &MoveRequest) {
        if req.source == req.target {
            return;
        }
        let (Some(source), Some(target)) = (self.registry.lookup(&req.source), self.registry.lookup(&req.target))
        else {
            warn!("Move between unknown panes {} -> {}", req.source, req.target);
            return;
        };
        debug!("Moving pane {} to the {} of {}", req.source, req.quadrant, req.target);

        let widget = source.backend().root().clone();
        detach_from_layout(widget.upcast_ref());
        insert_beside(
            target.backend().root().upcast_ref(),
            widget.upcast_ref(),
            gtk_orientation(req.quadrant.orientation()),
            req.quadrant.inserts_before(),
        );
        source.backend().terminal().grab_focus();
    }

    fn detach(self: &Rc<Self>, req: &DetachRequest) {
        let Some(pane) = self.registry.lookup(&req.pane) else {
            return;
        };
        info!("Detaching pane {} into a new window", req.pane);
        let widget = pane.backend().root().clone();
        detach_from_layout(widget.upcast_ref());

        let window = self.new_window();
        window.set_child(Some(&widget));
        window.set_title(Some(&pane.title()));
        window.present();
    }

    fn take_pane(&self, id: &Uuid) -> Option<Rc<GtkPane>> {
        let pane = {
            let mut panes = self.panes.borrow_mut();
            let index = panes.iter().position(|p| p.uuid() == *id)?;
            panes.remove(index)
        };
        self.registry.unregister(id);
        if self.focused.get() == Some(*id) {
            self.focused.set(None);
        }
        Some(pane)
    }

    fn remove_pane(&self, id: &Uuid) {
        let Some(pane) = self.take_pane(id) else {
            return;
        };
        detach_from_layout(pane.backend().root().upcast_ref());
        self.renumber();
        info!("Session removed pane {}, {} left", id, self.pane_count());
    }

    /// Drop every pane living in a window the user is closing; the window
    /// tears down its own widgets.
    fn forget_window(&self, window: &gtk4::Widget) {
        let doomed: Vec<Uuid> = self
            .panes
            .borrow()
            .iter()
            .filter(|p| p.backend().root().is_ancestor(window))
            .map(|p| p.uuid())
            .collect();
        for id in doomed {
            if let Some(pane) = self.take_pane(&id) {
                pane.close();
            }
        }
        self.renumber();
    }

    fn renumber(&self) {
        let panes: Vec<Rc<GtkPane>> = self.panes.borrow().clone();
        for (index, pane) in panes.iter().enumerate() {
            let id = index as u32 + 1;
            if pane.id() != id {
                pane.set_id(id);
            }
        }
    }
}

fn with_session<F>(weak: &Weak<Session>, f: F)
where
    F: FnOnce(&Rc<Session>),
{
    if let Some(session) = weak.upgrade() {
        f(&session);
    }
}

fn gtk_orientation(orientation: Orientation) -> gtk4::Orientation {
    match orientation {
        Orientation::Horizontal => gtk4::Orientation::Horizontal,
        Orientation::Vertical => gtk4::Orientation::Vertical,
    }
}

/// Put `new` where `old` sits in its paned or window
fn replace_child(old: &gtk4::Widget, new: &gtk4::Widget) -> bool {
    let Some(parent) = old.parent() else {
        return false;
    };
    if let Some(paned) = parent.downcast_ref::<gtk4::Paned>() {
        if paned.start_child().as_ref() == Some(old) {
            paned.set_start_child(Some(new));
        } else {
            paned.set_end_child(Some(new));
        }
    } else if let Some(window) = parent.downcast_ref::<gtk4::Window>() {
        window.set_child(Some(new));
    } else {
        warn!("Unexpected container {} in pane layout", parent.type_().name());
        return false;
    }
    true
}

/// Split `target` in two with `widget` on the given side
fn insert_beside(target: &gtk4::Widget, widget: &gtk4::Widget, orientation: gtk4::Orientation, before: bool) {
    let size = match orientation {
        gtk4::Orientation::Vertical => target.height(),
        _ => target.width(),
    };
    let paned = gtk4::Paned::new(orientation);
    paned.set_wide_handle(true);
    if !replace_child(target, paned.upcast_ref()) {
        return;
    }
    let (first, second) = if before { (widget, target) } else { (target, widget) };
    paned.set_start_child(Some(first));
    paned.set_end_child(Some(second));
    if size > 0 {
        paned.set_position(size / 2);
    }
}

/// Take `widget` out of the layout, collapsing its paned. A window left
/// empty is closed.
fn detach_from_layout(widget: &gtk4::Widget) {
    let Some(parent) = widget.parent() else {
        return;
    };
    if let Some(paned) = parent.downcast_ref::<gtk4::Paned>() {
        let sibling = if paned.start_child().as_ref() == Some(widget) {
            paned.end_child()
        } else {
            paned.start_child()
        };
        paned.set_start_child(None::<&gtk4::Widget>);
        paned.set_end_child(None::<&gtk4::Widget>);
        match sibling {
            Some(sibling) => {
                replace_child(paned.upcast_ref(), &sibling);
            }
            None => detach_from_layout(paned.upcast_ref()),
        }
    } else if let Some(window) = parent.downcast_ref::<gtk4::Window>() {
        window.set_child(None::<&gtk4::Widget>);
        window.close();
    } else {
        warn!("Cannot detach pane from {}", parent.type_().name());
    }
}
