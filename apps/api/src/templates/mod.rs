// Resume rendering: one HTML template, seven themes.

pub mod handlers;
pub mod renderer;
pub mod theme;
pub mod view;

use serde_json::Value;
use tracing::warn;

use crate::storage::{DraftStore, StorageError, TEMPLATE_KEY};
use theme::TemplateKind;

/// The stored template choice. Unknown or unreadable values fall back to the
/// default theme.
pub fn load_selected(store: &dyn DraftStore) -> TemplateKind {
    match store.load(TEMPLATE_KEY) {
        Ok(Some(envelope)) => envelope
            .data
            .as_str()
            .and_then(TemplateKind::parse)
            .unwrap_or_default(),
        Ok(None) => TemplateKind::default(),
        Err(e) => {
            warn!("Failed to load template selection: {e}");
            TemplateKind::default()
        }
    }
}

pub fn save_selected(store: &dyn DraftStore, kind: TemplateKind) -> Result<(), StorageError> {
    store.save(TEMPLATE_KEY, Value::String(kind.id().to_string()), None)?;
    Ok(())
}

/// Template for a preview: the requested id when valid, else the stored
/// selection.
pub fn resolve(requested: Option<&str>, store: &dyn DraftStore) -> TemplateKind {
    requested
        .and_then(TemplateKind::parse)
        .unwrap_or_else(|| load_selected(store))
}
