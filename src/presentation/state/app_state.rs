use std::sync::Arc;

use crate::application::ports::FileRegistry;
use crate::application::services::ChatService;
use crate::presentation::config::Settings;

#[derive(Clone)]
pub struct AppState {
    pub chat_service: Arc<ChatService>,
    pub registry: Arc<dyn FileRegistry>,
    pub settings: Settings,
}
