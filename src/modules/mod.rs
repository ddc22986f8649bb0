pub mod books;
pub mod loans;
pub mod members;

use std::sync::Arc;

use biblio_kernel::{ModuleRegistry, Settings};
use biblio_store::RecordStore;

/// Register all domain modules with the registry.
pub fn register_all(
    registry: &mut ModuleRegistry,
    store: &Arc<dyn RecordStore>,
    settings: &Settings,
) {
    registry.register(books::create_module(store.clone()));
    registry.register(members::create_module(store.clone()));
    registry.register(loans::create_module(store.clone(), settings));
}
