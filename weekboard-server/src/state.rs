use std::sync::Arc;

use weekboard_core::{ChangeNotifier, Vault};

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub vault: Vault,
    pub notifier: Arc<ChangeNotifier>,
}

impl AppState {
    pub fn new(vault: Vault) -> Self {
        AppState {
            vault,
            notifier: Arc::new(ChangeNotifier::new()),
        }
    }
}
