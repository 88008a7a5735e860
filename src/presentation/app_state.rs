// Application state for HTTP handlers
use crate::application::dispatcher::RenderDispatcher;
use crate::application::metric_source::MetricSource;
use crate::application::render_backend::RenderBackend;
use crate::domain::registry::PanelRegistry;
use std::sync::Arc;
use tokio::sync::RwLock;

/// One board session: the registry it owns plus the collaborators every
/// render cycle is dispatched against. Mutations take the write lock, so a
/// render pass and a registry mutation never interleave.
pub struct AppState {
    pub registry: RwLock<PanelRegistry>,
    pub dispatcher: RenderDispatcher,
    pub source: Arc<dyn MetricSource>,
    pub backend: Arc<dyn RenderBackend>,
}

impl AppState {
    pub fn new(
        dispatcher: RenderDispatcher,
        source: Arc<dyn MetricSource>,
        backend: Arc<dyn RenderBackend>,
    ) -> Self {
        Self {
            registry: RwLock::new(PanelRegistry::new()),
            dispatcher,
            source,
            backend,
        }
    }
}
