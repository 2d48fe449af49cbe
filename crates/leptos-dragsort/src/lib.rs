//! Leptos DragSort
//!
//! Mouse-driven reordering for a todo list. A mousedown on a draggable
//! row starts a session: the row floats under the pointer while a
//! placeholder marks the slot it would land in. Lingering over a slot
//! previews the drop. Releasing over the list commits, handing the full
//! data-id order to the injected callback; releasing outside or
//! pressing Escape cancels and restores the original order.

use std::cell::RefCell;
use std::rc::Rc;

use leptos::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{Element, HtmlElement, MouseEvent};

mod geometry;
mod session;

pub use geometry::{insertion_index, DropBounds, RowBounds};

use session::SessionListeners;

/// Class of a draggable row
pub const ROW_CLASS: &str = "todo-item";
/// Class marking a row that refuses dragging
pub const COMPLETED_CLASS: &str = "completed";
/// Attribute carrying a row's id, read back at commit
pub const ROW_ID_ATTR: &str = "data-id";

pub(crate) const ROW_SELECTOR: &str = ".todo-item";
pub(crate) const CONTAINER_SELECTOR: &str = ".todo-list-items";
pub(crate) const PLACEHOLDER_CLASS: &str = "todo-item-placeholder";
pub(crate) const CANDIDATE_SELECTOR: &str = ".todo-item:not(.todo-item-placeholder)";
pub(crate) const CHECKBOX_SELECTOR: &str = ".check-mark";
pub(crate) const DELETE_SELECTOR: &str = ".delete-button";

#[derive(Clone, Copy, Debug)]
pub struct DragSortOptions {
    /// How long the pointer must rest before the drop preview shows
    pub dwell_delay_ms: u32,
    /// Movement past this many pixels resets the dwell (and dismisses
    /// a visible preview)
    pub move_threshold_px: f64,
}

impl Default for DragSortOptions {
    fn default() -> Self {
        Self { dwell_delay_ms: 2000, move_threshold_px: 5.0 }
    }
}

pub(crate) struct DragSortInner {
    pub(crate) session: RefCell<Option<session::DragSession>>,
    /// Listener sets from ended sessions, freed at the next start
    pub(crate) retired: RefCell<Vec<SessionListeners>>,
    pub(crate) on_commit: Box<dyn Fn(Vec<String>)>,
    pub(crate) options: DragSortOptions,
    pub(crate) active: RwSignal<bool>,
}

/// Drag coordinator for one list; clones share the same session
#[derive(Clone)]
pub struct DragSort {
    pub(crate) inner: Rc<DragSortInner>,
}

impl DragSort {
    /// `on_commit` receives the full top-to-bottom id order of the list
    /// every time a drag is dropped inside it
    pub fn new(options: DragSortOptions, on_commit: impl Fn(Vec<String>) + 'static) -> Self {
        Self {
            inner: Rc::new(DragSortInner {
                session: RefCell::new(None),
                retired: RefCell::new(Vec::new()),
                on_commit: Box::new(on_commit),
                options,
                active: RwSignal::new(false),
            }),
        }
    }

    /// True while a session is running; usable from views
    pub fn active(&self) -> RwSignal<bool> {
        self.inner.active
    }

    /// Begin dragging `row`. Ignored while another session runs.
    pub fn start_drag(&self, row: HtmlElement, ev: &MouseEvent) {
        if self.inner.session.borrow().is_some() {
            return;
        }
        // safe point to free the previous session's parked listeners
        self.inner.retired.borrow_mut().clear();
        session::start(self, row, ev);
    }
}

/// Whether a mousedown on `target` must not start a drag: completed
/// rows stay put, and the checkbox and delete button keep their clicks
pub fn should_prevent_drag(target: &Element) -> bool {
    if let Ok(Some(row)) = target.closest(ROW_SELECTOR) {
        if row.class_list().contains(COMPLETED_CLASS) {
            return true;
        }
    }
    matches!(target.closest(CHECKBOX_SELECTOR), Ok(Some(_)))
        || matches!(target.closest(DELETE_SELECTOR), Ok(Some(_)))
}

/// Create mousedown handler for draggable rows
pub fn make_on_mousedown(sorter: DragSort) -> impl Fn(MouseEvent) + 'static {
    move |ev: MouseEvent| {
        if ev.button() != 0 {
            return;
        }
        let Some(target) = ev.target() else { return };
        // Ignore if target is input or button
        if target.dyn_ref::<web_sys::HtmlInputElement>().is_some() {
            return;
        }
        if target.dyn_ref::<web_sys::HtmlButtonElement>().is_some() {
            return;
        }
        let Some(element) = target.dyn_ref::<Element>() else { return };
        if should_prevent_drag(element) {
            return;
        }
        let Ok(Some(row)) = element.closest(ROW_SELECTOR) else { return };
        let Ok(row) = row.dyn_into::<HtmlElement>() else { return };
        sorter.start_drag(row, &ev);
    }
}

#[cfg(all(test, target_arch = "wasm32"))]
mod dom_tests {
    use std::cell::RefCell;
    use std::rc::Rc;

    use gloo_timers::future::TimeoutFuture;
    use leptos::prelude::GetUntracked;
    use wasm_bindgen::JsCast;
    use wasm_bindgen_test::*;
    use web_sys::{
        Document, Element, HtmlElement, KeyboardEvent, KeyboardEventInit, MouseEvent,
        MouseEventInit,
    };

    use super::*;

    wasm_bindgen_test_configure!(run_in_browser);

    fn document() -> Document {
        web_sys::window().unwrap().document().unwrap()
    }

    /// Fresh list in the test page; any list from an earlier test is
    /// removed first
    fn build_list(ids: &[(&str, bool)]) -> (Element, Vec<HtmlElement>) {
        let document = document();
        let body = document.body().unwrap();
        if let Some(previous) = document.query_selector(".todo-list-items").unwrap() {
            previous.remove();
        }

        let list = document.create_element("ul").unwrap();
        list.set_class_name("todo-list-items");
        body.append_child(&list).unwrap();

        let mut rows = Vec::new();
        for (id, done) in ids {
            let row = document.create_element("li").unwrap();
            row.set_class_name(if *done { "todo-item completed" } else { "todo-item draggable" });
            row.set_attribute("data-id", id).unwrap();

            let checkbox = document.create_element("input").unwrap();
            checkbox.set_attribute("type", "checkbox").unwrap();
            checkbox.set_class_name("check-mark");
            row.append_child(&checkbox).unwrap();

            let text = document.create_element("span").unwrap();
            text.set_class_name(if *done { "todo-text completed" } else { "todo-text" });
            text.set_text_content(Some(id));
            row.append_child(&text).unwrap();

            let delete = document.create_element("button").unwrap();
            delete.set_class_name("delete-button");
            let label = document.create_element("span").unwrap();
            label.set_text_content(Some("Delete"));
            delete.append_child(&label).unwrap();
            row.append_child(&delete).unwrap();

            list.append_child(&row).unwrap();
            rows.push(row.dyn_into::<HtmlElement>().unwrap());
        }
        (list, rows)
    }

    fn mouse_event(kind: &str, client_x: f64, client_y: f64) -> MouseEvent {
        let init = MouseEventInit::new();
        init.set_bubbles(true);
        init.set_client_x(client_x as i32);
        init.set_client_y(client_y as i32);
        MouseEvent::new_with_mouse_event_init_dict(kind, &init).unwrap()
    }

    fn escape_event() -> KeyboardEvent {
        let init = KeyboardEventInit::new();
        init.set_key("Escape");
        KeyboardEvent::new_with_keyboard_event_init_dict("keydown", &init).unwrap()
    }

    fn center_of(row: &HtmlElement) -> (f64, f64) {
        let rect = row.get_bounding_client_rect();
        (rect.left() + rect.width() / 2.0, rect.top() + rect.height() / 2.0)
    }

    fn row_ids(list: &Element) -> Vec<String> {
        let nodes = list.query_selector_all(".todo-item").unwrap();
        let mut ids = Vec::new();
        for i in 0..nodes.length() {
            let element = nodes.get(i).unwrap().dyn_into::<Element>().unwrap();
            ids.push(element.get_attribute("data-id").unwrap());
        }
        ids
    }

    fn sorter_with_sink() -> (DragSort, Rc<RefCell<Option<Vec<String>>>>) {
        let committed: Rc<RefCell<Option<Vec<String>>>> = Rc::new(RefCell::new(None));
        let sink = Rc::clone(&committed);
        let sorter = DragSort::new(DragSortOptions::default(), move |order| {
            *sink.borrow_mut() = Some(order);
        });
        (sorter, committed)
    }

    #[wasm_bindgen_test]
    fn guard_refuses_interactive_and_completed_targets() {
        let (_list, rows) = build_list(&[("a", false), ("b", true)]);
        let pending = &rows[0];
        let completed = &rows[1];

        let checkbox = pending.query_selector(".check-mark").unwrap().unwrap();
        let delete_label = pending.query_selector(".delete-button span").unwrap().unwrap();
        let pending_text = pending.query_selector(".todo-text").unwrap().unwrap();
        let completed_text = completed.query_selector(".todo-text").unwrap().unwrap();

        assert!(!should_prevent_drag(pending));
        assert!(!should_prevent_drag(&pending_text));
        assert!(should_prevent_drag(&checkbox));
        assert!(should_prevent_drag(&delete_label));
        assert!(should_prevent_drag(completed));
        assert!(should_prevent_drag(&completed_text));
    }

    #[wasm_bindgen_test]
    fn committed_session_reports_full_id_order() {
        let (list, rows) = build_list(&[("a", false), ("b", false), ("c", false)]);
        let (sorter, committed) = sorter_with_sink();
        let document = document();

        let (ax, ay) = center_of(&rows[0]);
        sorter.start_drag(rows[0].clone(), &mouse_event("mousedown", ax, ay));
        assert!(sorter.active().get_untracked());

        // drag below the last row, then release over the list
        let below = rows[2].get_bounding_client_rect().bottom() + 40.0;
        document.dispatch_event(&mouse_event("mousemove", ax, below)).unwrap();
        let (bx, by) = center_of(&rows[1]);
        document.dispatch_event(&mouse_event("mouseup", bx, by)).unwrap();

        assert_eq!(
            *committed.borrow(),
            Some(vec!["b".to_string(), "c".to_string(), "a".to_string()])
        );
        assert_eq!(row_ids(&list), vec!["b", "c", "a"]);
        assert!(document.query_selector(".todo-item-placeholder").unwrap().is_none());
        assert!(!sorter.active().get_untracked());
    }

    #[wasm_bindgen_test]
    fn escape_cancels_and_restores_the_original_order() {
        let (list, rows) = build_list(&[("a", false), ("b", false), ("c", false)]);
        let (sorter, committed) = sorter_with_sink();
        let document = document();

        let (ax, ay) = center_of(&rows[0]);
        sorter.start_drag(rows[0].clone(), &mouse_event("mousedown", ax, ay));
        let below = rows[2].get_bounding_client_rect().bottom() + 40.0;
        document.dispatch_event(&mouse_event("mousemove", ax, below)).unwrap();

        document.dispatch_event(&escape_event()).unwrap();

        assert!(committed.borrow().is_none());
        assert_eq!(row_ids(&list), vec!["a", "b", "c"]);
        assert!(document.query_selector(".todo-item-placeholder").unwrap().is_none());
        assert!(!sorter.active().get_untracked());

        // the session is gone; a stray mouseup finds nothing to commit
        document.dispatch_event(&mouse_event("mouseup", ax, ay)).unwrap();
        assert!(committed.borrow().is_none());
    }

    #[wasm_bindgen_test]
    fn release_outside_the_list_cancels() {
        let (list, rows) = build_list(&[("a", false), ("b", false), ("c", false)]);
        let (sorter, committed) = sorter_with_sink();
        let document = document();

        let (ax, ay) = center_of(&rows[0]);
        sorter.start_drag(rows[0].clone(), &mouse_event("mousedown", ax, ay));
        let below = rows[2].get_bounding_client_rect().bottom() + 40.0;
        document.dispatch_event(&mouse_event("mousemove", ax, below)).unwrap();

        document.dispatch_event(&mouse_event("mouseup", -100.0, -100.0)).unwrap();

        assert!(committed.borrow().is_none());
        assert_eq!(row_ids(&list), vec!["a", "b", "c"]);
        assert!(!sorter.active().get_untracked());
    }

    #[wasm_bindgen_test]
    fn second_mousedown_during_a_session_is_ignored() {
        let (_list, rows) = build_list(&[("a", false), ("b", false)]);
        let (sorter, _committed) = sorter_with_sink();
        let document = document();

        let (ax, ay) = center_of(&rows[0]);
        sorter.start_drag(rows[0].clone(), &mouse_event("mousedown", ax, ay));
        let (bx, by) = center_of(&rows[1]);
        sorter.start_drag(rows[1].clone(), &mouse_event("mousedown", bx, by));

        let placeholders = document.query_selector_all(".todo-item-placeholder").unwrap();
        assert_eq!(placeholders.length(), 1);

        document.dispatch_event(&mouse_event("mouseup", ax, ay)).unwrap();
        assert!(!sorter.active().get_untracked());
    }

    #[wasm_bindgen_test]
    async fn dwell_preview_appears_and_survives_small_moves() {
        let (_list, rows) = build_list(&[("a", false), ("b", false), ("c", false)]);
        let sorter = DragSort::new(
            DragSortOptions { dwell_delay_ms: 20, move_threshold_px: 5.0 },
            |_| {},
        );
        let document = document();

        let (ax, ay) = center_of(&rows[0]);
        sorter.start_drag(rows[0].clone(), &mouse_event("mousedown", ax, ay));

        TimeoutFuture::new(60).await;
        assert!(document.query_selector(".preview-element").unwrap().is_some());

        // a wiggle inside the threshold keeps the preview alive
        document.dispatch_event(&mouse_event("mousemove", ax + 2.0, ay - 2.0)).unwrap();
        assert!(document.query_selector(".preview-element").unwrap().is_some());

        // straying past the threshold dismisses it
        document.dispatch_event(&mouse_event("mousemove", ax + 30.0, ay - 2.0)).unwrap();
        assert!(document.query_selector(".preview-element").unwrap().is_none());

        document.dispatch_event(&escape_event()).unwrap();
        assert!(!sorter.active().get_untracked());
    }
}
