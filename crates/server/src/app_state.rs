use storage::Storage;

use crate::api::ApiContext;

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) api: ApiContext,
    pub(crate) db: Storage,
}

impl AppState {
    pub(crate) fn new(storage: Storage) -> Self {
        Self {
            api: ApiContext::new(std::sync::Arc::new(storage.clone())),
            db: storage,
        }
    }
}
