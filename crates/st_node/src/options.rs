use core::fmt;
use core::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, PoisonError, RwLock};

use crate::NodeError;

/// Rewrites comment text before it is attached to a node.
///
/// Used to localize or template the comments declared on configuration fields.
pub type Translator = Arc<dyn Fn(&str) -> String + Send + Sync>;

// -----------------------------------------------------------------------------
// NodeOptions

/// Format options shared by every node of one document.
///
/// Options are always handled through an `Arc`: container nodes keep a handle,
/// and nodes added to a container adopt the container's handle.
///
/// Once [sealed](NodeOptions::seal) the indent width can no longer change.
///
/// ```
/// use st_node::NodeOptions;
///
/// let options = NodeOptions::shared();
/// assert_eq!(options.indent(), 2);
/// options.set_indent(4).unwrap();
/// options.seal();
/// assert!(options.set_indent(8).is_err());
/// assert_eq!(options.indent(), 4);
/// ```
pub struct NodeOptions {
    indent: AtomicUsize,
    debug: AtomicBool,
    sealed: AtomicBool,
    translator: RwLock<Option<Translator>>,
}

impl NodeOptions {
    pub const DEFAULT_INDENT: usize = 2;

    pub fn new() -> Self {
        Self {
            indent: AtomicUsize::new(Self::DEFAULT_INDENT),
            debug: AtomicBool::new(false),
            sealed: AtomicBool::new(false),
            translator: RwLock::new(None),
        }
    }

    /// Creates default options behind an `Arc`.
    #[inline]
    pub fn shared() -> Arc<Self> {
        Arc::new(Self::new())
    }

    /// Spaces per nesting level.
    #[inline]
    pub fn indent(&self) -> usize {
        self.indent.load(Ordering::Acquire)
    }

    pub fn set_indent(&self, indent: usize) -> Result<(), NodeError> {
        if self.is_sealed() {
            return Err(NodeError::Sealed);
        }
        self.indent.store(indent, Ordering::Release);
        Ok(())
    }

    #[inline]
    pub fn debug(&self) -> bool {
        self.debug.load(Ordering::Relaxed)
    }

    /// Enables `log::debug!` tracing of reads and writes.
    pub fn set_debug(&self, debug: bool) {
        self.debug.store(debug, Ordering::Relaxed);
    }

    /// Marks the options read-only.
    pub fn seal(&self) {
        self.sealed.store(true, Ordering::Release);
    }

    #[inline]
    pub fn is_sealed(&self) -> bool {
        self.sealed.load(Ordering::Acquire)
    }

    pub fn set_translator(&self, translator: impl Fn(&str) -> String + Send + Sync + 'static) {
        *self
            .translator
            .write()
            .unwrap_or_else(PoisonError::into_inner) = Some(Arc::new(translator));
    }

    pub fn clear_translator(&self) {
        *self
            .translator
            .write()
            .unwrap_or_else(PoisonError::into_inner) = None;
    }

    /// Passes `text` through the translator, or returns it unchanged.
    pub fn translate(&self, text: &str) -> String {
        let translator = self
            .translator
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone();
        match translator {
            Some(translator) => translator(text),
            None => text.to_owned(),
        }
    }
}

impl Default for NodeOptions {
    #[inline]
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for NodeOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let has_translator = self
            .translator
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .is_some();
        f.debug_struct("NodeOptions")
            .field("indent", &self.indent())
            .field("debug", &self.debug())
            .field("sealed", &self.is_sealed())
            .field("translator", &has_translator)
            .finish()
    }
}

// -----------------------------------------------------------------------------
// Tests
