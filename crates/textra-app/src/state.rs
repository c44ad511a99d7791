use std::sync::Arc;

use textra_config::Config;
use tokio::sync::RwLock;

use crate::menu::MenuRegistry;
use crate::preferences::PreferenceStore;

pub struct AppState {
    pub config: Arc<RwLock<Config>>,
    pub menus: MenuRegistry,
    pub preferences: Arc<dyn PreferenceStore>,
}

impl AppState {
    pub fn new(config: Config, preferences: Arc<dyn PreferenceStore>) -> Self {
        let menus = MenuRegistry::new();
        menus.ensure_registered();

        Self {
            config: Arc::new(RwLock::new(config)),
            menus,
            preferences,
        }
    }
}
