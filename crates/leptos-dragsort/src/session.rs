//! One drag session: DOM state, document listeners, dwell preview.

use gloo_timers::callback::Timeout;
use leptos::prelude::*;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys::{CssStyleDeclaration, Document, Element, HtmlElement, KeyboardEvent, MouseEvent};

use crate::geometry::{insertion_index, moved_beyond, DropBounds, RowBounds};
use crate::{DragSort, CANDIDATE_SELECTOR, CONTAINER_SELECTOR, PLACEHOLDER_CLASS, ROW_ID_ATTR};

/// Styles lifting the dragged row out of flow while it follows the pointer
const FLOAT_STYLES: &[(&str, &str)] = &[
    ("position", "absolute"),
    ("z-index", "1000"),
    ("opacity", "0.8"),
    ("cursor", "grabbing"),
    ("box-shadow", "0 5px 15px rgba(0,0,0,0.3)"),
    ("pointer-events", "none"),
    ("max-width", "1000px"),
];

/// Properties to remove when the row settles back into the list
const FLOAT_RESET: &[&str] = &[
    "position",
    "z-index",
    "opacity",
    "cursor",
    "left",
    "top",
    "box-shadow",
    "pointer-events",
    "max-width",
];

const PLACEHOLDER_STYLES: &[(&str, &str)] = &[
    ("display", "flex"),
    ("align-items", "center"),
    ("justify-content", "space-between"),
    ("padding", "10px"),
    ("border-bottom", "1px solid #ccc"),
    ("width", "100%"),
    ("background", "#f0f0f0"),
    ("opacity", "0.5"),
];

const PREVIEW_STYLES: &[(&str, &str)] = &[
    ("position", "static"),
    ("z-index", "auto"),
    ("opacity", "0.7"),
    ("cursor", "default"),
    ("box-shadow", "inset 0 0 10px rgba(0, 128, 255, 0.5)"),
    ("background", "rgba(173, 216, 230, 0.3)"),
    ("border", "2px dashed #0080ff"),
    ("pointer-events", "none"),
    ("max-width", "none"),
    ("transform", "scale(1.02)"),
    ("transition", "all 0.3s ease"),
];

/// Document-level listeners for one session, detached and parked as a
/// set when the session ends
pub(crate) struct SessionListeners {
    document: Document,
    mousemove: Closure<dyn FnMut(MouseEvent)>,
    mouseup: Closure<dyn FnMut(MouseEvent)>,
    keydown: Closure<dyn FnMut(KeyboardEvent)>,
}

impl SessionListeners {
    fn attach(&self) {
        let _ = self
            .document
            .add_event_listener_with_callback("mousemove", self.mousemove.as_ref().unchecked_ref());
        let _ = self
            .document
            .add_event_listener_with_callback("mouseup", self.mouseup.as_ref().unchecked_ref());
        let _ = self
            .document
            .add_event_listener_with_callback("keydown", self.keydown.as_ref().unchecked_ref());
    }

    fn detach(&self) {
        let _ = self
            .document
            .remove_event_listener_with_callback("mousemove", self.mousemove.as_ref().unchecked_ref());
        let _ = self
            .document
            .remove_event_listener_with_callback("mouseup", self.mouseup.as_ref().unchecked_ref());
        let _ = self
            .document
            .remove_event_listener_with_callback("keydown", self.keydown.as_ref().unchecked_ref());
    }
}

/// Everything one active drag touches
pub(crate) struct DragSession {
    dragged: HtmlElement,
    container: Element,
    placeholder: HtmlElement,
    /// Row that followed the dragged one before the drag, for cancel
    original_next_sibling: Option<Element>,
    preview: Option<HtmlElement>,
    dwell_timer: Option<Timeout>,
    /// Page coordinates the dwell threshold measures from; only moves
    /// when the dwell re-arms
    dwell_anchor: (f64, f64),
    /// Client coordinates of the latest pointer position, for
    /// containment checks and insertion geometry
    pointer_client: (f64, f64),
    listeners: Option<SessionListeners>,
}

/// Begin a session for `row`: insert the placeholder in its slot,
/// float the row, attach document listeners, arm the dwell timer.
pub(crate) fn start(sort: &DragSort, row: HtmlElement, ev: &MouseEvent) {
    let Ok(Some(container)) = row.closest(CONTAINER_SELECTOR) else { return };
    let Some(document) = row.owner_document() else { return };

    let page = (f64::from(ev.page_x()), f64::from(ev.page_y()));
    let client = (f64::from(ev.client_x()), f64::from(ev.client_y()));

    // placeholder height comes from the row while it still sits in flow
    let Some(placeholder) = make_placeholder(&document, &row) else { return };
    let original_next_sibling = row.next_element_sibling();
    let Some(parent) = row.parent_node() else { return };
    if parent
        .insert_before(placeholder.as_ref(), row.next_sibling().as_ref())
        .is_err()
    {
        return;
    }

    set_styles(&row.style(), FLOAT_STYLES);
    move_float_to(&row, page);

    let move_sort = sort.clone();
    let mousemove = Closure::<dyn FnMut(MouseEvent)>::new(move |ev: MouseEvent| {
        handle_move(&move_sort, &ev);
    });
    let up_sort = sort.clone();
    let mouseup = Closure::<dyn FnMut(MouseEvent)>::new(move |ev: MouseEvent| {
        handle_up(&up_sort, &ev);
    });
    let key_sort = sort.clone();
    let keydown = Closure::<dyn FnMut(KeyboardEvent)>::new(move |ev: KeyboardEvent| {
        handle_key(&key_sort, &ev);
    });

    let listeners = SessionListeners { document, mousemove, mouseup, keydown };
    listeners.attach();

    *sort.inner.session.borrow_mut() = Some(DragSession {
        dragged: row,
        container,
        placeholder,
        original_next_sibling,
        preview: None,
        dwell_timer: Some(arm_dwell(sort)),
        dwell_anchor: page,
        pointer_client: client,
        listeners: Some(listeners),
    });
    sort.inner.active.set(true);
}

fn make_placeholder(document: &Document, row: &HtmlElement) -> Option<HtmlElement> {
    let placeholder = document.create_element("li").ok()?;
    placeholder.set_class_name(PLACEHOLDER_CLASS);
    let placeholder: HtmlElement = placeholder.dyn_into().ok()?;
    set_styles(&placeholder.style(), PLACEHOLDER_STYLES);
    let _ = placeholder
        .style()
        .set_property("height", &format!("{}px", row.offset_height()));
    Some(placeholder)
}

fn arm_dwell(sort: &DragSort) -> Timeout {
    let delay = sort.inner.options.dwell_delay_ms;
    let sort = sort.clone();
    Timeout::new(delay, move || show_preview(&sort))
}

fn handle_move(sort: &DragSort, ev: &MouseEvent) {
    let mut session_slot = sort.inner.session.borrow_mut();
    let Some(session) = session_slot.as_mut() else { return };

    let page = (f64::from(ev.page_x()), f64::from(ev.page_y()));
    let client = (f64::from(ev.client_x()), f64::from(ev.client_y()));

    move_float_to(&session.dragged, page);
    session.pointer_client = client;

    let old_next = session.placeholder.next_element_sibling();
    session.update_placeholder_slot(client.1);
    let new_next = session.placeholder.next_element_sibling();

    let slot_changed = !same_element(old_next.as_ref(), new_next.as_ref());
    let strayed = moved_beyond(session.dwell_anchor, page, sort.inner.options.move_threshold_px);

    // the preview survives small wiggles in the same slot; anything
    // else dismisses it and re-arms the dwell from here
    if slot_changed || strayed {
        session.hide_preview();
        session.dwell_anchor = page;
        session.dwell_timer = Some(arm_dwell(sort));
    }
}

/// Dwell timer fired: materialize the preview in the placeholder slot.
/// Must not touch `dwell_timer`, its own Timeout lives there.
fn show_preview(sort: &DragSort) {
    let mut session_slot = sort.inner.session.borrow_mut();
    let Some(session) = session_slot.as_mut() else { return };
    if session.preview.is_some() {
        return;
    }
    let (x, y) = session.pointer_client;
    if !session.container_bounds().contains(x, y) {
        return;
    }

    let Ok(clone) = session.dragged.clone_node_with_deep(true) else { return };
    let Ok(preview) = clone.dyn_into::<HtmlElement>() else { return };

    preview.set_class_name(&format!("{} preview-element", session.dragged.class_name()));
    set_styles(&preview.style(), PREVIEW_STYLES);

    match session
        .container
        .insert_before(preview.as_ref(), Some(session.placeholder.as_ref()))
    {
        Ok(_) => {
            let _ = session.placeholder.style().set_property("display", "none");
            let _ = session.dragged.style().set_property("opacity", "0.3");
            session.preview = Some(preview);
        }
        Err(_) => preview.remove(),
    }
}

fn handle_up(sort: &DragSort, ev: &MouseEvent) {
    let Some(mut session) = sort.inner.session.borrow_mut().take() else { return };

    session.hide_preview();

    let client = (f64::from(ev.client_x()), f64::from(ev.client_y()));
    let order = if session.container_bounds().contains(client.0, client.1) {
        session.settle_into_placeholder();
        Some(read_row_order(&session.container))
    } else {
        session.restore_original_slot();
        None
    };

    session.finish(sort);
    drop(session);

    // emit only once the list is back in a renderable state; the
    // commit typically re-renders it synchronously
    if let Some(order) = order {
        (sort.inner.on_commit)(order);
    }
}

fn handle_key(sort: &DragSort, ev: &KeyboardEvent) {
    if ev.key() != "Escape" {
        return;
    }
    let Some(mut session) = sort.inner.session.borrow_mut().take() else { return };
    session.hide_preview();
    session.restore_original_slot();
    session.finish(sort);
}

impl DragSession {
    /// Re-seat the placeholder at the slot nearest the pointer
    fn update_placeholder_slot(&self, pointer_y: f64) {
        // the preview is a styled clone carrying the row class; pull it
        // out before measuring so it never counts as a candidate
        if let Some(preview) = &self.preview {
            preview.remove();
        }

        let rows = self.candidate_rows();
        let bounds: Vec<RowBounds> = rows
            .iter()
            .map(|row| {
                let rect = row.get_bounding_client_rect();
                RowBounds { top: rect.top(), height: rect.height() }
            })
            .collect();

        match insertion_index(&bounds, pointer_y) {
            Some(index) => {
                let _ = self
                    .container
                    .insert_before(self.placeholder.as_ref(), Some(rows[index].as_ref()));
            }
            None => {
                let _ = self.container.append_child(self.placeholder.as_ref());
            }
        }

        // reinstate the preview next to the placeholder, still hidden or
        // visible exactly as it was
        if let Some(preview) = &self.preview {
            let _ = self
                .container
                .insert_before(preview.as_ref(), Some(self.placeholder.as_ref()));
        }
    }

    fn candidate_rows(&self) -> Vec<Element> {
        let mut rows = Vec::new();
        let Ok(nodes) = self.container.query_selector_all(CANDIDATE_SELECTOR) else {
            return rows;
        };
        for i in 0..nodes.length() {
            let Some(node) = nodes.get(i) else { continue };
            // the floating row tracks the pointer; it is never a slot
            if node.is_same_node(Some(self.dragged.as_ref())) {
                continue;
            }
            if let Ok(element) = node.dyn_into::<Element>() {
                rows.push(element);
            }
        }
        rows
    }

    fn hide_preview(&mut self) {
        let Some(preview) = self.preview.take() else { return };
        preview.remove();
        let _ = self.placeholder.style().set_property("display", "flex");
        let _ = self.dragged.style().set_property("opacity", "0.8");
    }

    /// Drop accepted: the row takes the placeholder's slot
    fn settle_into_placeholder(&self) {
        clear_styles(&self.dragged.style(), FLOAT_RESET);
        let _ = self
            .container
            .insert_before(self.dragged.as_ref(), Some(self.placeholder.as_ref()));
    }

    /// Drop rejected or cancelled: the row returns to where it started
    fn restore_original_slot(&self) {
        clear_styles(&self.dragged.style(), FLOAT_RESET);
        match &self.original_next_sibling {
            Some(sibling) => {
                if let Some(parent) = sibling.parent_node() {
                    let _ = parent.insert_before(self.dragged.as_ref(), Some(sibling.as_ref()));
                }
            }
            None => {
                let _ = self.container.append_child(self.dragged.as_ref());
            }
        }
    }

    fn finish(&mut self, sort: &DragSort) {
        self.placeholder.remove();
        if let Some(listeners) = self.listeners.take() {
            listeners.detach();
            // a Closure must not be dropped while its JS side is still
            // executing; park the set until the next session starts
            sort.inner.retired.borrow_mut().push(listeners);
        }
        sort.inner.active.set(false);
    }

    fn container_bounds(&self) -> DropBounds {
        let rect = self.container.get_bounding_client_rect();
        DropBounds {
            left: rect.left(),
            top: rect.top(),
            right: rect.right(),
            bottom: rect.bottom(),
        }
    }
}

/// Current top-to-bottom row ids, placeholder and preview excluded
fn read_row_order(container: &Element) -> Vec<String> {
    let mut order = Vec::new();
    let Ok(nodes) = container.query_selector_all(CANDIDATE_SELECTOR) else {
        return order;
    };
    for i in 0..nodes.length() {
        let Some(node) = nodes.get(i) else { continue };
        let Some(element) = node.dyn_ref::<Element>() else { continue };
        if let Some(id) = element.get_attribute(ROW_ID_ATTR) {
            order.push(id);
        }
    }
    order
}

/// Center the floating row on the pointer, in page coordinates
fn move_float_to(row: &HtmlElement, page: (f64, f64)) {
    let style = row.style();
    let _ = style.set_property(
        "left",
        &format!("{}px", page.0 - f64::from(row.offset_width()) / 2.0),
    );
    let _ = style.set_property(
        "top",
        &format!("{}px", page.1 - f64::from(row.offset_height()) / 2.0),
    );
}

fn same_element(a: Option<&Element>, b: Option<&Element>) -> bool {
    match (a, b) {
        (None, None) => true,
        (Some(a), Some(b)) => a.is_same_node(Some(b.as_ref())),
        _ => false,
    }
}

fn set_styles(style: &CssStyleDeclaration, entries: &[(&str, &str)]) {
    for (property, value) in entries {
        let _ = style.set_property(property, value);
    }
}

fn clear_styles(style: &CssStyleDeclaration, properties: &[&str]) {
    for property in properties {
        let _ = style.remove_property(property);
    }
}
