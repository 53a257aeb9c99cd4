//! Shared handler state.

use crate::config::Config;
use crate::hf::ImageGenerationService;
use crate::store::{ConversationStore, UserStore};
use std::sync::Arc;

/// Cloneable bundle of the services the routes depend on. Trait objects so
/// tests can swap in mocks.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub users: Arc<dyn UserStore>,
    pub conversations: Arc<dyn ConversationStore>,
    pub generator: Arc<dyn ImageGenerationService>,
}
