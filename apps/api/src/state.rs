use std::sync::Arc;

use tokio::sync::Mutex;

use crate::config::Config;
use crate::generation::client::TextGenerator;
use crate::llm_client::LanguageModel;
use crate::storage::DraftStore;
use crate::templates::renderer::Renderer;
use crate::wizard::controller::WizardController;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    /// Key-value draft storage (document, skills snapshot, template choice).
    pub store: Arc<dyn DraftStore>,
    /// The single wizard session. Handlers are serialized on this lock.
    pub wizard: Arc<Mutex<WizardController>>,
    /// Client for the regenerate endpoint used by the step editors.
    pub generator: Arc<dyn TextGenerator>,
    /// Gemini model behind `/api/regenerate`. `None` without an API key.
    pub llm: Option<Arc<dyn LanguageModel>>,
    pub renderer: Arc<Renderer>,
}
