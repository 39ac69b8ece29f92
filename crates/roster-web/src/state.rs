use roster_core::DirectoryService;

/// Shared handler state.
#[derive(Clone)]
pub struct AppState {
    pub directory: DirectoryService,
}

impl AppState {
    pub fn new(directory: DirectoryService) -> Self {
        Self { directory }
    }
}
