use crate::error::{AggregateError, FragmentError, Result};
use crate::json::aggregate_json;
use crate::namespace::Namespace;
use crate::rules::{ArtifactKind, Composition};
use crate::text::aggregate_text;
use crate::walker::{walk, WalkOrder};
use std::path::{Path, PathBuf};

/// Where fragment trees live on disk.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RootLayout {
    /// One directory per namespace under `apps_root`.
    MultiTenant { apps_root: PathBuf },
    /// A single fixed tree; the namespace is ignored.
    SingleTenant { data_root: PathBuf },
}

impl RootLayout {
    pub fn resolve(&self, namespace: Option<&Namespace>) -> Result<PathBuf> {
        match self {
            Self::MultiTenant { apps_root } => {
                let namespace = namespace.ok_or_else(|| {
                    AggregateError::InvalidNamespace("<missing>".to_string())
                })?;
                Ok(apps_root.join(namespace))
            }
            Self::SingleTenant { data_root } => Ok(data_root.clone()),
        }
    }
}

/// Fully assembled payload for one `(namespace, kind)` pass.
#[derive(Debug)]
pub struct Artifact {
    pub kind: ArtifactKind,
    pub body: Vec<u8>,
    /// Fragments skipped during the pass.
    pub errors: Vec<FragmentError>,
}

impl Artifact {
    pub fn content_type(&self) -> &'static str {
        self.kind.content_type()
    }
}

/// Stateless dispatcher: every call re-walks the filesystem.
#[derive(Debug, Clone)]
pub struct Aggregator {
    layout: RootLayout,
    order: WalkOrder,
}

impl Aggregator {
    pub fn new(layout: RootLayout) -> Self {
        Self {
            layout,
            order: WalkOrder::default(),
        }
    }

    pub fn with_order(mut self, order: WalkOrder) -> Self {
        self.order = order;
        self
    }

    pub fn aggregate(&self, namespace: Option<&Namespace>, kind: ArtifactKind) -> Result<Artifact> {
        let root = self.layout.resolve(namespace)?;
        self.aggregate_root(&root, kind)
    }

    /// Runs one pass over an explicit root, bypassing namespace resolution.
    pub fn aggregate_root(&self, root: &Path, kind: ArtifactKind) -> Result<Artifact> {
        let rule = kind.rule();
        let fragments = walk(root, rule.suffix, self.order)?;

        let (body, errors) = match &rule.composition {
            Composition::Merge => {
                let merged = aggregate_json(fragments, rule.suffix);
                log::debug!(
                    "Aggregated {kind} from {}: {} entries, {} skipped",
                    root.display(),
                    merged.entries.len(),
                    merged.errors.len()
                );
                (merged.to_bytes()?, merged.errors)
            }
            Composition::Concat(markers) => {
                let joined = aggregate_text(fragments, rule.suffix, markers);
                log::debug!(
                    "Aggregated {kind} from {}: {} bytes, {} skipped",
                    root.display(),
                    joined.body.len(),
                    joined.errors.len()
                );
                (joined.body, joined.errors)
            }
        };

        Ok(Artifact { kind, body, errors })
    }
}
