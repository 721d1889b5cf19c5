//! DOM implementation of the host capabilities.

use super::error::BrowserError;
use super::events::pointer_event;
use flyout_core::{
    Cursor, Display, Event, FrameDriver, HostEnvironment, ListenerId, NodeId, PanelMetrics,
    PanelPosition, Point, RoutedEvent, Size, StyleSink, TransitionDriver, TransitionState,
    TransitionTicket,
};
use flyout_widgets::Dialog;
use std::cell::RefCell;
use std::collections::{HashMap, VecDeque};
use std::rc::Rc;
use std::time::Duration;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{
    AddEventListenerOptions, CssStyleDeclaration, Document, Element, HtmlElement, Node,
    PointerEvent, Window,
};

type EventQueue = Rc<RefCell<VecDeque<RoutedEvent>>>;

/// Capture-phase `pointermove`/`pointerup` listeners of one drag gesture.
struct PointerListeners {
    on_move: Closure<dyn FnMut(PointerEvent)>,
    on_up: Closure<dyn FnMut(PointerEvent)>,
}

const MOVE_EVENTS: [&str; 1] = ["pointermove"];
const END_EVENTS: [&str; 2] = ["pointerup", "pointercancel"];

/// Host capabilities backed by the page DOM.
///
/// Widget node ids are bound to elements with [`BrowserHost::bind`] after
/// the rendered tree is attached. Events from global pointer listeners are
/// queued; [`BrowserHost::pump`] delivers them together with finished
/// transitions once per animation frame.
pub struct BrowserHost {
    window: Window,
    document: Document,
    body: HtmlElement,
    nodes: RefCell<Vec<(NodeId, Element)>>,
    next_listener: u64,
    listeners: HashMap<ListenerId, PointerListeners>,
    queue: EventQueue,
    driver: FrameDriver,
    fading: HashMap<NodeId, f64>,
}

impl BrowserHost {
    /// Attach to the current page.
    pub fn new() -> Result<Self, BrowserError> {
        let window = web_sys::window().ok_or(BrowserError::NoWindow)?;
        let document = window.document().ok_or(BrowserError::NoDocument)?;
        let body = document.body().ok_or(BrowserError::NoBody)?;
        Ok(Self {
            window,
            document,
            body,
            nodes: RefCell::new(Vec::new()),
            next_listener: 1,
            listeners: HashMap::new(),
            queue: Rc::new(RefCell::new(VecDeque::new())),
            driver: FrameDriver::new().with_easing(flyout_core::Easing::CubicOut),
            fading: HashMap::new(),
        })
    }

    /// Associate a widget node with a DOM element.
    pub fn bind(&self, node: NodeId, element: Element) {
        let mut nodes = self.nodes.borrow_mut();
        nodes.retain(|(id, _)| *id != node);
        nodes.push((node, element));
    }

    /// Forget a node, e.g. after its element was removed.
    pub fn unbind(&self, node: NodeId) {
        self.nodes.borrow_mut().retain(|(id, _)| *id != node);
    }

    fn element(&self, node: NodeId) -> Option<HtmlElement> {
        self.nodes
            .borrow()
            .iter()
            .find(|(id, _)| *id == node)
            .and_then(|(_, el)| el.dyn_ref::<HtmlElement>().cloned())
    }

    fn node_of(&self, dom: &Node) -> Option<NodeId> {
        self.nodes
            .borrow()
            .iter()
            .find(|(_, el)| {
                let el: &Node = el.as_ref();
                dom.is_same_node(Some(el))
            })
            .map(|(id, _)| *id)
    }

    /// Route a DOM event through the bound nodes on its composed path.
    ///
    /// The target is the bound node the event originated on, or
    /// [`NodeId::DOCUMENT`] if it originated on an unbound element.
    pub fn route(&self, dom_event: &web_sys::Event, event: Event) -> RoutedEvent {
        let path: js_sys::Array = dom_event.composed_path();
        let mut bound = Vec::new();
        let mut target = NodeId::DOCUMENT;
        for (i, value) in path.iter().enumerate() {
            let Ok(dom) = value.dyn_into::<Node>() else {
                continue;
            };
            if let Some(id) = self.node_of(&dom) {
                if i == 0 {
                    target = id;
                } else {
                    bound.push(id);
                }
            }
        }
        RoutedEvent::new(event, target, &bound)
    }

    /// Queued global pointer events, oldest first.
    pub fn take_events(&mut self) -> Vec<RoutedEvent> {
        self.queue.borrow_mut().drain(..).collect()
    }

    /// Advance transitions by `dt`, updating opacity of animating nodes.
    /// Returns the tickets that finished.
    pub fn tick(&mut self, dt: Duration) -> Vec<TransitionTicket> {
        let done = self.driver.tick(dt);
        let mut finished = Vec::new();
        for (&node, &target) in &self.fading {
            let opacity = self.driver.visibility(node).unwrap_or(target);
            if let Some(el) = self.element(node) {
                write(&el.style(), "opacity", Some(&opacity.to_string()));
            }
            if self.driver.visibility(node).is_none() {
                finished.push(node);
            }
        }
        for node in finished {
            self.fading.remove(&node);
        }
        done
    }

    /// Deliver queued pointer events and finished transitions to a dialog.
    pub fn pump(&mut self, dialog: &mut Dialog, dt: Duration) {
        for mut event in self.take_events() {
            dialog.dispatch(&mut event, self);
        }
        for ticket in self.tick(dt) {
            dialog.transition_end(ticket, self);
        }
    }
}

fn write(style: &CssStyleDeclaration, property: &str, value: Option<&str>) {
    let result = match value {
        Some(value) => style.set_property(property, value),
        None => style.remove_property(property).map(|_| ()),
    };
    if let Err(err) = result {
        tracing::warn!(property, ?err, "style write failed");
    }
}

impl HostEnvironment for BrowserHost {
    fn body_overflow(&self) -> Option<String> {
        self.body
            .style()
            .get_property_value("overflow")
            .ok()
            .filter(|v| !v.is_empty())
    }

    fn set_body_overflow(&mut self, value: Option<&str>) {
        write(&self.body.style(), "overflow", value);
    }

    fn viewport(&self) -> Size {
        let dim = |v: Result<JsValue, JsValue>| v.ok().and_then(|v| v.as_f64()).unwrap_or(0.0);
        Size::new(
            dim(self.window.inner_width()) as f32,
            dim(self.window.inner_height()) as f32,
        )
    }

    fn query_selector(&self, selector: &str) -> Option<NodeId> {
        let element = match self.document.query_selector(selector) {
            Ok(found) => found?,
            Err(err) => {
                tracing::warn!(selector, ?err, "invalid selector");
                return None;
            }
        };
        let dom: &Node = element.as_ref();
        if let Some(id) = self.node_of(dom) {
            return Some(id);
        }
        let id = NodeId::next();
        self.bind(id, element);
        Some(id)
    }

    fn focus(&mut self, node: NodeId) {
        if let Some(el) = self.element(node) {
            if let Err(err) = el.focus() {
                tracing::debug!(?err, "focus failed");
            }
        }
    }

    fn panel_metrics(&self, node: NodeId) -> Option<PanelMetrics> {
        let el = self.element(node)?;
        Some(PanelMetrics::new(
            Point::new(el.offset_left() as f32, el.offset_top() as f32),
            Size::new(el.offset_width() as f32, el.offset_height() as f32),
        ))
    }

    fn listen_pointer(&mut self, owner: NodeId) -> ListenerId {
        let id = ListenerId(self.next_listener);
        self.next_listener += 1;

        let forward = |queue: EventQueue| {
            Closure::<dyn FnMut(PointerEvent)>::new(move |e: PointerEvent| {
                if let Some(event) = pointer_event(&e) {
                    queue.borrow_mut().push_back(RoutedEvent::global(event));
                }
            })
        };
        let listeners = PointerListeners {
            on_move: forward(Rc::clone(&self.queue)),
            on_up: forward(Rc::clone(&self.queue)),
        };

        let options = AddEventListenerOptions::new();
        options.set_capture(true);
        for (events, closure) in [
            (&MOVE_EVENTS[..], &listeners.on_move),
            (&END_EVENTS[..], &listeners.on_up),
        ] {
            for name in events {
                let added = self
                    .document
                    .add_event_listener_with_callback_and_add_event_listener_options(
                        name,
                        closure.as_ref().unchecked_ref(),
                        &options,
                    );
                if let Err(err) = added {
                    tracing::warn!(event = name, ?err, "listener registration failed");
                }
            }
        }
        tracing::debug!(owner = owner.0, listener = id.0, "pointer listeners added");
        self.listeners.insert(id, listeners);
        id
    }

    fn unlisten_pointer(&mut self, id: ListenerId) {
        let Some(listeners) = self.listeners.remove(&id) else {
            return;
        };
        for (events, closure) in [
            (&MOVE_EVENTS[..], &listeners.on_move),
            (&END_EVENTS[..], &listeners.on_up),
        ] {
            for name in events {
                let removed = self.document.remove_event_listener_with_callback_and_bool(
                    name,
                    closure.as_ref().unchecked_ref(),
                    true,
                );
                if let Err(err) = removed {
                    tracing::warn!(event = name, ?err, "listener removal failed");
                }
            }
        }
        tracing::debug!(listener = id.0, "pointer listeners removed");
    }
}

impl StyleSink for BrowserHost {
    fn set_position(&mut self, node: NodeId, position: PanelPosition) {
        let Some(el) = self.element(node) else {
            return;
        };
        let style = el.style();
        match position {
            PanelPosition::Centered => {
                write(&style, "left", Some("50%"));
                write(&style, "top", Some("50%"));
            }
            PanelPosition::Pixels(p) => {
                write(&style, "left", Some(&format!("{}px", p.x)));
                write(&style, "top", Some(&format!("{}px", p.y)));
            }
        }
    }

    fn set_display(&mut self, node: NodeId, display: Display) {
        if let Some(el) = self.element(node) {
            let value = match display {
                Display::Flex => "flex",
                Display::None => "none",
            };
            write(&el.style(), "display", Some(value));
        }
    }

    fn set_cursor(&mut self, node: NodeId, cursor: Cursor) {
        if let Some(el) = self.element(node) {
            let value = match cursor {
                Cursor::Default => "default",
                Cursor::Move => "move",
            };
            write(&el.style(), "cursor", Some(value));
        }
    }
}

impl TransitionDriver for BrowserHost {
    fn animate(
        &mut self,
        node: NodeId,
        ticket: TransitionTicket,
        from: TransitionState,
        to: TransitionState,
        duration: Duration,
    ) {
        self.fading
            .insert(node, if to.is_showing() { 1.0 } else { 0.0 });
        self.driver.animate(node, ticket, from, to, duration);
    }
}
