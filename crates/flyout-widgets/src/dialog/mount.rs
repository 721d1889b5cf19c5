//! Mount target resolution.

use crate::error::{DialogError, Result};
use flyout_core::{HostEnvironment, NodeId};
use serde::de::{self, Deserializer};
use serde::Deserialize;
use std::fmt;
use std::rc::Rc;

/// Selector used when no mount target is configured.
pub const DEFAULT_MOUNT_SELECTOR: &str = "body";

/// What a mount factory produces.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MountSource {
    /// CSS selector looked up at resolution time
    Selector(String),
    /// Concrete node
    Node(NodeId),
}

/// Where a dialog subtree should be attached.
#[derive(Clone)]
pub enum MountSpec {
    /// Render inside the caller's own tree
    InPlace,
    /// Portal into the first node matching a CSS selector
    Selector(String),
    /// Portal into a concrete node
    Node(NodeId),
    /// Called on every resolution; never memoized
    Factory(Rc<dyn Fn() -> MountSource>),
}

impl MountSpec {
    /// Mount target computed by `f` each time the dialog renders.
    pub fn factory(f: impl Fn() -> MountSource + 'static) -> Self {
        Self::Factory(Rc::new(f))
    }

    /// Resolve to a concrete attachment point.
    ///
    /// Performs at most one selector lookup. An unmatched selector is an
    /// error; there is no fallback to the page body.
    pub fn resolve<H: HostEnvironment + ?Sized>(&self, host: &H) -> Result<MountTarget> {
        match self {
            Self::InPlace => Ok(MountTarget::InPlace),
            Self::Selector(selector) => lookup(selector, host),
            Self::Node(node) => Ok(MountTarget::Portal(*node)),
            Self::Factory(f) => match f() {
                MountSource::Selector(selector) => lookup(&selector, host),
                MountSource::Node(node) => Ok(MountTarget::Portal(node)),
            },
        }
    }
}

fn lookup<H: HostEnvironment + ?Sized>(selector: &str, host: &H) -> Result<MountTarget> {
    host.query_selector(selector)
        .map(MountTarget::Portal)
        .ok_or_else(|| {
            tracing::warn!(selector, "dialog mount target not found");
            DialogError::MountTargetNotFound {
                selector: selector.to_string(),
            }
        })
}

impl Default for MountSpec {
    fn default() -> Self {
        Self::Selector(DEFAULT_MOUNT_SELECTOR.to_string())
    }
}

impl fmt::Debug for MountSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InPlace => f.write_str("InPlace"),
            Self::Selector(s) => f.debug_tuple("Selector").field(s).finish(),
            Self::Node(n) => f.debug_tuple("Node").field(n).finish(),
            Self::Factory(_) => f.write_str("Factory(..)"),
        }
    }
}

impl From<&str> for MountSpec {
    fn from(selector: &str) -> Self {
        Self::Selector(selector.to_string())
    }
}

impl From<String> for MountSpec {
    fn from(selector: String) -> Self {
        Self::Selector(selector)
    }
}

impl From<NodeId> for MountSpec {
    fn from(node: NodeId) -> Self {
        Self::Node(node)
    }
}

impl<'de> Deserialize<'de> for MountSpec {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Raw {
            Flag(bool),
            Selector(String),
        }

        match Raw::deserialize(deserializer)? {
            Raw::Flag(false) => Ok(Self::InPlace),
            Raw::Flag(true) => Err(de::Error::custom(
                "mountTarget must be `false` or a selector string",
            )),
            Raw::Selector(selector) => Ok(Self::Selector(selector)),
        }
    }
}

/// Resolved attachment point of a rendered dialog.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MountTarget {
    /// Rendered in place
    InPlace,
    /// Rendered as a portal under this node
    Portal(NodeId),
}

impl MountTarget {
    /// Whether the subtree is portaled out of the caller's tree.
    #[must_use]
    pub const fn is_portal(&self) -> bool {
        matches!(self, Self::Portal(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use flyout_test::FakeHost;
    use std::cell::Cell;

    #[test]
    fn test_default_is_body() {
        let host = FakeHost::new();
        let target = MountSpec::default().resolve(&host).unwrap();
        assert_eq!(target, MountTarget::Portal(FakeHost::BODY));
    }

    #[test]
    fn test_in_place() {
        let host = FakeHost::new();
        let target = MountSpec::InPlace.resolve(&host).unwrap();
        assert_eq!(target, MountTarget::InPlace);
        assert!(!target.is_portal());
    }

    #[test]
    fn test_selector_lookup() {
        let portal = NodeId::new(77);
        let host = FakeHost::new().with_selector("#portal", portal);
        let target = MountSpec::from("#portal").resolve(&host).unwrap();
        assert_eq!(target, MountTarget::Portal(portal));
    }

    #[test]
    fn test_missing_selector_fails_without_fallback() {
        let host = FakeHost::new();
        let err = MountSpec::from("#nowhere").resolve(&host).unwrap_err();
        assert!(matches!(
            err,
            DialogError::MountTargetNotFound { ref selector } if selector == "#nowhere"
        ));
    }

    #[test]
    fn test_node_target() {
        let host = FakeHost::new();
        let node = NodeId::new(12);
        assert_eq!(
            MountSpec::from(node).resolve(&host).unwrap(),
            MountTarget::Portal(node)
        );
    }

    #[test]
    fn test_factory_invoked_every_resolution() {
        let calls = Rc::new(Cell::new(0));
        let counter = Rc::clone(&calls);
        let spec = MountSpec::factory(move || {
            counter.set(counter.get() + 1);
            MountSource::Selector("body".to_string())
        });
        let host = FakeHost::new();
        spec.resolve(&host).unwrap();
        spec.resolve(&host).unwrap();
        assert_eq!(calls.get(), 2);
    }

    #[test]
    fn test_factory_node() {
        let node = NodeId::new(5);
        let spec = MountSpec::factory(move || MountSource::Node(node));
        assert_eq!(
            spec.resolve(&FakeHost::new()).unwrap(),
            MountTarget::Portal(node)
        );
    }

    #[test]
    fn test_deserialize_false_and_selector() {
        let spec: MountSpec = serde_json::from_str("false").unwrap();
        assert!(matches!(spec, MountSpec::InPlace));
        let spec: MountSpec = serde_json::from_str("\"#root\"").unwrap();
        assert!(matches!(spec, MountSpec::Selector(ref s) if s == "#root"));
        assert!(serde_json::from_str::<MountSpec>("true").is_err());
    }

    #[test]
    fn test_debug_hides_factory() {
        let spec = MountSpec::factory(|| MountSource::Node(NodeId::new(1)));
        assert_eq!(format!("{spec:?}"), "Factory(..)");
    }
}
