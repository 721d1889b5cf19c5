//! Anchor navigation: a parent registry of link items and the active one.

use flyout_core::NodeId;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::rc::Rc;

/// Hrefs registered by mounted items, in registration order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnchorRegistry {
    items: Vec<String>,
    active: Option<String>,
}

impl AnchorRegistry {
    /// Create an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register an href. Returns `false` if it was already registered.
    pub fn register(&mut self, href: &str) -> bool {
        if self.contains(href) {
            return false;
        }
        self.items.push(href.to_string());
        true
    }

    /// Unregister an href, clearing it if active.
    pub fn unregister(&mut self, href: &str) -> bool {
        let before = self.items.len();
        self.items.retain(|h| h != href);
        if self.active.as_deref() == Some(href) {
            self.active = None;
        }
        self.items.len() != before
    }

    /// Whether an href is registered.
    #[must_use]
    pub fn contains(&self, href: &str) -> bool {
        self.items.iter().any(|h| h == href)
    }

    /// Registered hrefs.
    #[must_use]
    pub fn items(&self) -> &[String] {
        &self.items
    }

    /// The active href.
    #[must_use]
    pub fn active(&self) -> Option<&str> {
        self.active.as_deref()
    }

    /// Make a registered href active. Unknown hrefs are rejected.
    pub fn set_active(&mut self, href: &str) -> bool {
        if !self.contains(href) {
            return false;
        }
        self.active = Some(href.to_string());
        true
    }
}

/// Emitted when an item link is clicked.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnchorClick {
    /// Text title, if the title is text
    pub title: Option<String>,
    /// Target href
    pub href: String,
}

/// Click handler.
pub type AnchorClickHandler = Rc<dyn Fn(&AnchorClick)>;

/// Anchor container.
#[derive(Clone, Default)]
pub struct Anchor {
    registry: AnchorRegistry,
    on_click: Option<AnchorClickHandler>,
}

impl Anchor {
    /// Create an empty anchor.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the click handler.
    #[must_use]
    pub fn on_click(mut self, f: impl Fn(&AnchorClick) + 'static) -> Self {
        self.on_click = Some(Rc::new(f));
        self
    }

    /// Item registry.
    #[must_use]
    pub const fn registry(&self) -> &AnchorRegistry {
        &self.registry
    }

    /// Mutable item registry.
    pub fn registry_mut(&mut self) -> &mut AnchorRegistry {
        &mut self.registry
    }

    /// The active href.
    #[must_use]
    pub fn active(&self) -> Option<&str> {
        self.registry.active()
    }

    fn clicked(&mut self, click: &AnchorClick) {
        self.registry.set_active(&click.href);
        if let Some(handler) = &self.on_click {
            handler(click);
        }
    }
}

impl fmt::Debug for Anchor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Anchor")
            .field("registry", &self.registry)
            .field("on_click", &self.on_click.is_some())
            .finish()
    }
}

/// Title of an anchor item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AnchorTitle {
    /// Plain text
    Text(String),
    /// Arbitrary rendered content
    Custom(NodeId),
}

impl AnchorTitle {
    /// The text, for plain text titles.
    #[must_use]
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(text) => Some(text),
            Self::Custom(_) => None,
        }
    }
}

impl From<&str> for AnchorTitle {
    fn from(text: &str) -> Self {
        Self::Text(text.to_string())
    }
}

/// One link of an anchor, optionally with nested items.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnchorItem {
    /// Link target, also the identity in the registry
    pub href: String,
    /// Link title
    pub title: AnchorTitle,
    /// Browsing context, e.g. `_blank`
    #[serde(default)]
    pub target: Option<String>,
    /// Nested items
    #[serde(default)]
    pub children: Vec<AnchorItem>,
}

/// Rendered state of an item.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnchorItemView {
    /// Link href
    pub href: String,
    /// `title` attribute, set only for text titles
    pub title_attr: Option<String>,
    /// Link target
    pub target: Option<String>,
    /// Whether this item is the active one
    pub active: bool,
    /// Nested item views
    pub children: Vec<AnchorItemView>,
}

impl AnchorItem {
    /// Create an item.
    #[must_use]
    pub fn new(href: impl Into<String>, title: impl Into<AnchorTitle>) -> Self {
        Self {
            href: href.into(),
            title: title.into(),
            target: None,
            children: Vec::new(),
        }
    }

    /// Set the link target.
    #[must_use]
    pub fn target(mut self, target: impl Into<String>) -> Self {
        self.target = Some(target.into());
        self
    }

    /// Add a nested item.
    #[must_use]
    pub fn child(mut self, item: Self) -> Self {
        self.children.push(item);
        self
    }

    /// Register this item and its children with the anchor.
    pub fn mount(&self, anchor: &mut Anchor) {
        anchor.registry.register(&self.href);
        for child in &self.children {
            child.mount(anchor);
        }
    }

    /// Unregister this item and its children.
    pub fn unmount(&self, anchor: &mut Anchor) {
        for child in &self.children {
            child.unmount(anchor);
        }
        anchor.registry.unregister(&self.href);
    }

    /// Rendered state against the anchor.
    #[must_use]
    pub fn view(&self, anchor: &Anchor) -> AnchorItemView {
        AnchorItemView {
            href: self.href.clone(),
            title_attr: self.title.as_text().map(str::to_string),
            target: self.target.clone(),
            active: anchor.active() == Some(self.href.as_str()),
            children: self.children.iter().map(|c| c.view(anchor)).collect(),
        }
    }

    /// Handle a click on the link.
    pub fn click(&self, anchor: &mut Anchor) -> AnchorClick {
        let click = AnchorClick {
            title: self.title.as_text().map(str::to_string),
            href: self.href.clone(),
        };
        anchor.clicked(&click);
        click
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;

    // =========================================================================
    // AnchorRegistry Tests
    // =========================================================================

    #[test]
    fn test_register_dedupes() {
        let mut reg = AnchorRegistry::new();
        assert!(reg.register("#a"));
        assert!(reg.register("#b"));
        assert!(!reg.register("#a"));
        assert_eq!(reg.items(), &["#a".to_string(), "#b".to_string()]);
    }

    #[test]
    fn test_set_active_requires_registration() {
        let mut reg = AnchorRegistry::new();
        assert!(!reg.set_active("#a"));
        reg.register("#a");
        assert!(reg.set_active("#a"));
        assert_eq!(reg.active(), Some("#a"));
    }

    #[test]
    fn test_unregister_active_clears() {
        let mut reg = AnchorRegistry::new();
        reg.register("#a");
        reg.register("#b");
        reg.set_active("#a");
        assert!(reg.unregister("#b"));
        assert_eq!(reg.active(), Some("#a"));
        assert!(reg.unregister("#a"));
        assert_eq!(reg.active(), None);
        assert!(!reg.unregister("#a"));
    }

    // =========================================================================
    // AnchorItem Tests
    // =========================================================================

    #[test]
    fn test_mount_registers_children() {
        let mut anchor = Anchor::new();
        let item = AnchorItem::new("#intro", "Intro").child(AnchorItem::new("#setup", "Setup"));
        item.mount(&mut anchor);
        assert_eq!(anchor.registry().items().len(), 2);
        item.unmount(&mut anchor);
        assert!(anchor.registry().items().is_empty());
    }

    #[test]
    fn test_view_title_attr_only_for_text() {
        let anchor = Anchor::new();
        let text = AnchorItem::new("#a", "Alpha").target("_blank");
        let view = text.view(&anchor);
        assert_eq!(view.title_attr.as_deref(), Some("Alpha"));
        assert_eq!(view.target.as_deref(), Some("_blank"));
        assert!(!view.active);

        let custom = AnchorItem::new("#b", AnchorTitle::Custom(NodeId::new(8)));
        assert_eq!(custom.view(&anchor).title_attr, None);
    }

    #[test]
    fn test_click_activates_and_notifies() {
        let seen = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&seen);
        let mut anchor = Anchor::new().on_click(move |c| sink.borrow_mut().push(c.clone()));
        let item = AnchorItem::new("#a", "Alpha");
        item.mount(&mut anchor);

        let click = item.click(&mut anchor);
        assert_eq!(
            click,
            AnchorClick {
                title: Some("Alpha".to_string()),
                href: "#a".to_string()
            }
        );
        assert!(item.view(&anchor).active);
        assert_eq!(seen.borrow().as_slice(), &[click]);
    }

    #[test]
    fn test_click_unmounted_item_does_not_activate() {
        let mut anchor = Anchor::new();
        let item = AnchorItem::new("#ghost", "Ghost");
        item.click(&mut anchor);
        assert_eq!(anchor.active(), None);
    }

    #[test]
    fn test_nested_view_marks_active_child() {
        let mut anchor = Anchor::new();
        let child = AnchorItem::new("#child", "Child");
        let parent = AnchorItem::new("#parent", "Parent").child(child.clone());
        parent.mount(&mut anchor);
        child.click(&mut anchor);
        let view = parent.view(&anchor);
        assert!(!view.active);
        assert!(view.children[0].active);
    }

    #[test]
    fn test_item_from_json() {
        let item: AnchorItem =
            serde_json::from_str(r##"{"href": "#faq", "title": "FAQ"}"##).unwrap();
        assert_eq!(item.title, AnchorTitle::Text("FAQ".to_string()));
        assert!(item.children.is_empty());
    }
}
