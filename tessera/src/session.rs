use crate::persistence::{BlobStore, LoadOutcome, Persistence, StoreConfig};
use crate::{Engine, ResourceLimits, RootNode, TesseraResult};
use tracing::warn;

/// The host's working state: the tree being edited and where it is stored.
///
/// The four host operations live here. None of them hold on to the engine;
/// it is passed in where signatures are needed.
#[derive(Debug, Clone)]
pub struct Session<S: BlobStore> {
    tree: RootNode,
    persistence: Persistence<S>,
}

impl<S: BlobStore> Session<S> {
    pub fn new(store: S) -> Self {
        Self {
            tree: RootNode::new(),
            persistence: Persistence::new(store),
        }
    }

    pub fn with_config(store: S, config: StoreConfig, limits: ResourceLimits) -> Self {
        Self {
            tree: RootNode::new(),
            persistence: Persistence::with_config(store, config, limits),
        }
    }

    pub fn tree(&self) -> &RootNode {
        &self.tree
    }

    pub fn tree_mut(&mut self) -> &mut RootNode {
        &mut self.tree
    }

    pub fn replace_tree(&mut self, tree: RootNode) -> RootNode {
        std::mem::replace(&mut self.tree, tree)
    }

    pub fn store(&self) -> &S {
        self.persistence.store()
    }

    /// Direct access to the store, for hosts that keep the blob elsewhere
    /// and hand it back before `load`
    pub fn store_mut(&mut self) -> &mut S {
        self.persistence.store_mut()
    }

    /// The key the tree is stored under
    pub fn key(&self) -> &str {
        self.persistence.key()
    }

    /// Compile the current tree. Neither the tree nor the store is touched.
    pub fn compile(&self, engine: &Engine) -> TesseraResult<String> {
        engine.compile(&self.tree)
    }

    pub fn save(&mut self) -> TesseraResult<()> {
        self.persistence.save(&self.tree)
    }

    /// Restore the stored tree. Returns `false` and leaves the current tree
    /// alone when nothing is stored.
    ///
    /// A tree referencing signatures the catalogue no longer has is still
    /// restored so it can be edited; compiling it reports `UnknownSignature`.
    pub fn load(&mut self, engine: &Engine) -> TesseraResult<bool> {
        match self.persistence.load()? {
            LoadOutcome::Restored(tree) => {
                let unknown = tree.unknown_signatures(engine.catalogue());
                if !unknown.is_empty() {
                    warn!(signatures = ?unknown, "restored tree references unknown signatures");
                }
                self.tree = tree;
                Ok(true)
            }
            LoadOutcome::NotFound => Ok(false),
        }
    }

    /// Remove the stored tree; the tree in memory is kept
    pub fn clear(&mut self) -> TesseraResult<()> {
        self.persistence.clear()
    }
}
