//! Callback probes.

use std::cell::RefCell;
use std::rc::Rc;

/// Records the names of callbacks as they fire, in order.
///
/// Clones share the same log, so a probe can hand out hooks and still be
/// inspected afterwards.
#[derive(Debug, Clone, Default)]
pub struct CallbackProbe {
    log: Rc<RefCell<Vec<String>>>,
}

impl CallbackProbe {
    /// Create an empty probe.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// A zero-argument callback that records `name`.
    #[must_use]
    pub fn hook(&self, name: &str) -> impl Fn() + 'static {
        let log = Rc::clone(&self.log);
        let name = name.to_string();
        move || log.borrow_mut().push(name.clone())
    }

    /// A one-argument callback that records `name` and ignores its argument.
    #[must_use]
    pub fn hook1<A>(&self, name: &str) -> impl Fn(A) + 'static {
        let log = Rc::clone(&self.log);
        let name = name.to_string();
        move |_| log.borrow_mut().push(name.clone())
    }

    /// How many times `name` fired.
    #[must_use]
    pub fn count(&self, name: &str) -> usize {
        self.log.borrow().iter().filter(|n| *n == name).count()
    }

    /// Every recorded name, oldest first.
    #[must_use]
    pub fn log(&self) -> Vec<String> {
        self.log.borrow().clone()
    }

    /// Forget everything recorded.
    pub fn clear(&self) {
        self.log.borrow_mut().clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_probe_counts_in_order() {
        let probe = CallbackProbe::new();
        let opened = probe.hook("opened");
        let closed = probe.hook1::<u8>("closed");
        opened();
        closed(3);
        opened();
        assert_eq!(probe.count("opened"), 2);
        assert_eq!(probe.count("closed"), 1);
        assert_eq!(probe.log(), vec!["opened", "closed", "opened"]);
    }

    #[test]
    fn test_probe_clones_share_log() {
        let probe = CallbackProbe::new();
        let copy = probe.clone();
        copy.hook("x")();
        assert_eq!(probe.count("x"), 1);
        probe.clear();
        assert!(copy.log().is_empty());
    }
}
