//! In-memory document
//!
//! A small stand-in for the browser DOM: a tree of selector-addressed boxes
//! with layout offsets, metrics and scroll offsets. Used by the tests and by
//! the preview CLI.

use std::cell::RefCell;
use std::fmt;
use std::rc::{Rc, Weak};

use crate::host::{ActivationHost, Axis, BoxMetrics, Position, ScrollHost};

/// Handle to an element of a [`MemoryDocument`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId(usize);

const HTML: NodeId = NodeId(0);
const BODY: NodeId = NodeId(1);

/// One recorded scroll write
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScrollWrite {
    pub node: NodeId,
    pub axis: Axis,
    pub value: f64,
}

/// Simulated activation events
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActivationEvent {
    Click,
    TouchStart,
}

#[derive(Debug)]
struct Node {
    selector: String,
    offset_parent: Option<NodeId>,
    layout: Position,
    metrics: BoxMetrics,
    scroll_left: f64,
    scroll_top: f64,
}

struct ListenerEntry {
    id: u64,
    node: NodeId,
    event: ActivationEvent,
    handler: Rc<dyn Fn()>,
}

struct DocumentState {
    nodes: Vec<Node>,
    writes: Vec<ScrollWrite>,
    listeners: Vec<ListenerEntry>,
    next_listener: u64,
}

/// Shared handle to an in-memory document; clones see the same tree
#[derive(Clone)]
pub struct MemoryDocument {
    state: Rc<RefCell<DocumentState>>,
}

impl MemoryDocument {
    /// Empty page whose root scroller has the given viewport metrics
    pub fn new(viewport: BoxMetrics) -> Self {
        let root = |selector: &str| Node {
            selector: selector.to_string(),
            offset_parent: None,
            layout: Position::default(),
            metrics: viewport,
            scroll_left: 0.0,
            scroll_top: 0.0,
        };

        Self {
            state: Rc::new(RefCell::new(DocumentState {
                nodes: vec![root("html"), root("body")],
                writes: Vec::new(),
                listeners: Vec::new(),
                next_listener: 0,
            })),
        }
    }

    /// Add an element positioned `layout` inside `parent` (the body when
    /// `None`).
    pub fn append(
        &self,
        selector: &str,
        parent: Option<&NodeId>,
        layout: Position,
        metrics: BoxMetrics,
    ) -> NodeId {
        let mut state = self.state.borrow_mut();
        state.nodes.push(Node {
            selector: selector.to_string(),
            offset_parent: Some(parent.copied().unwrap_or(BODY)),
            layout,
            metrics,
            scroll_left: 0.0,
            scroll_top: 0.0,
        });
        NodeId(state.nodes.len() - 1)
    }

    pub fn set_metrics(&self, node: &NodeId, metrics: BoxMetrics) {
        self.state.borrow_mut().nodes[node.0].metrics = metrics;
    }

    pub fn set_layout(&self, node: &NodeId, layout: Position) {
        self.state.borrow_mut().nodes[node.0].layout = layout;
    }

    pub fn selector(&self, node: &NodeId) -> String {
        self.state.borrow().nodes[node.0].selector.clone()
    }

    /// Every scroll write made to `node`, oldest first
    pub fn scroll_writes(&self, node: &NodeId) -> Vec<ScrollWrite> {
        self.state
            .borrow()
            .writes
            .iter()
            .filter(|write| write.node == *node)
            .copied()
            .collect()
    }

    pub fn clear_writes(&self) {
        self.state.borrow_mut().writes.clear();
    }

    /// Dispatch `event` on `node`; returns how many handlers ran
    pub fn dispatch(&self, node: &NodeId, event: ActivationEvent) -> usize {
        // Handlers may call back into the document, so release the borrow first
        let handlers: Vec<Rc<dyn Fn()>> = self
            .state
            .borrow()
            .listeners
            .iter()
            .filter(|entry| entry.node == *node && entry.event == event)
            .map(|entry| Rc::clone(&entry.handler))
            .collect();

        for handler in &handlers {
            handler();
        }
        handlers.len()
    }

    pub fn click(&self, node: &NodeId) -> usize {
        self.dispatch(node, ActivationEvent::Click)
    }

    pub fn listener_count(&self, node: &NodeId) -> usize {
        self.state
            .borrow()
            .listeners
            .iter()
            .filter(|entry| entry.node == *node)
            .count()
    }
}

impl fmt::Debug for MemoryDocument {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let state = self.state.borrow();
        let selectors: Vec<&str> = state
            .nodes
            .iter()
            .map(|node| node.selector.as_str())
            .collect();
        f.debug_struct("MemoryDocument")
            .field("nodes", &selectors)
            .field("writes", &state.writes.len())
            .field("listeners", &state.listeners.len())
            .finish()
    }
}

impl ScrollHost for MemoryDocument {
    type Element = NodeId;

    fn query_selector(&self, selector: &str) -> Option<NodeId> {
        self.state
            .borrow()
            .nodes
            .iter()
            .position(|node| node.selector == selector)
            .map(NodeId)
    }

    fn body(&self) -> NodeId {
        BODY
    }

    fn document_element(&self) -> NodeId {
        HTML
    }

    fn offset_parent(&self, element: &NodeId) -> Option<NodeId> {
        self.state.borrow().nodes[element.0].offset_parent
    }

    fn layout_offset(&self, element: &NodeId) -> Position {
        self.state.borrow().nodes[element.0].layout
    }

    fn box_metrics(&self, element: &NodeId) -> BoxMetrics {
        self.state.borrow().nodes[element.0].metrics
    }

    fn element_scroll(&self, element: &NodeId, axis: Axis) -> f64 {
        let state = self.state.borrow();
        let node = &state.nodes[element.0];
        match axis {
            Axis::X => node.scroll_left,
            Axis::Y => node.scroll_top,
        }
    }

    fn set_element_scroll(&self, element: &NodeId, axis: Axis, value: f64) {
        let mut state = self.state.borrow_mut();
        let node = &mut state.nodes[element.0];
        let value = value.clamp(0.0, node.metrics.max_scroll(axis));
        match axis {
            Axis::X => node.scroll_left = value,
            Axis::Y => node.scroll_top = value,
        }
        state.writes.push(ScrollWrite {
            node: *element,
            axis,
            value,
        });
    }

    /// Mirrors the document element, like a standards-mode page
    fn window_scroll(&self, axis: Axis) -> f64 {
        self.element_scroll(&HTML, axis)
    }
}

/// Keeps a pair of activation listeners attached until dropped
pub struct MemoryListener {
    state: Weak<RefCell<DocumentState>>,
    ids: [u64; 2],
}

impl Drop for MemoryListener {
    fn drop(&mut self) {
        if let Some(state) = self.state.upgrade() {
            state
                .borrow_mut()
                .listeners
                .retain(|entry| !self.ids.contains(&entry.id));
        }
    }
}

impl ActivationHost for MemoryDocument {
    type Listener = MemoryListener;

    fn on_activate(&self, node: &NodeId, handler: Rc<dyn Fn()>) -> MemoryListener {
        let mut state = self.state.borrow_mut();
        let mut ids = [0; 2];
        for (slot, event) in [ActivationEvent::Click, ActivationEvent::TouchStart]
            .into_iter()
            .enumerate()
        {
            let id = state.next_listener;
            state.next_listener += 1;
            state.listeners.push(ListenerEntry {
                id,
                node: *node,
                event,
                handler: Rc::clone(&handler),
            });
            ids[slot] = id;
        }

        MemoryListener {
            state: Rc::downgrade(&self.state),
            ids,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    fn page() -> MemoryDocument {
        MemoryDocument::new(BoxMetrics::new(800.0, 600.0, 800.0, 2000.0))
    }

    #[test]
    fn test_query_selector() {
        let doc = page();
        let intro = doc.append("#intro", None, Position::new(300.0, 0.0), BoxMetrics::default());

        assert_eq!(doc.query_selector("#intro"), Some(intro));
        assert_eq!(doc.query_selector("body"), Some(doc.body()));
        assert_eq!(doc.query_selector("html"), Some(doc.document_element()));
        assert_eq!(doc.query_selector("#missing"), None);
        assert_eq!(doc.offset_parent(&intro), Some(doc.body()));
    }

    #[test]
    fn test_debug_lists_selectors() {
        let doc = page();
        doc.append("#intro", None, Position::default(), BoxMetrics::default());
        doc.set_element_scroll(&doc.body(), Axis::Y, 10.0);

        let text = format!("{:?}", doc);
        assert!(text.starts_with("MemoryDocument"));
        assert!(text.contains(r##"["html", "body", "#intro"]"##));
        assert!(text.contains("writes: 1"));
    }

    #[test]
    fn test_writes_are_clamped_and_recorded() {
        let doc = page();
        let html = doc.document_element();
        doc.set_element_scroll(&html, Axis::Y, 5000.0);
        doc.set_element_scroll(&html, Axis::Y, -20.0);

        let writes = doc.scroll_writes(&html);
        assert_eq!(writes.len(), 2);
        assert_eq!(writes[0].value, 1400.0);
        assert_eq!(writes[1].value, 0.0);

        doc.clear_writes();
        assert!(doc.scroll_writes(&html).is_empty());
    }

    #[test]
    fn test_listener_removed_on_drop() {
        let doc = page();
        let link = doc.append("a.top", None, Position::default(), BoxMetrics::default());
        let hits = Rc::new(Cell::new(0));
        let counter = Rc::clone(&hits);

        let listener = doc.on_activate(&link, Rc::new(move || counter.set(counter.get() + 1)));
        assert_eq!(doc.listener_count(&link), 2);
        assert_eq!(doc.click(&link), 1);
        assert_eq!(doc.dispatch(&link, ActivationEvent::TouchStart), 1);
        assert_eq!(hits.get(), 2);

        drop(listener);
        assert_eq!(doc.listener_count(&link), 0);
        assert_eq!(doc.click(&link), 0);
        assert_eq!(hits.get(), 2);
    }
}
