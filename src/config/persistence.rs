//! Key-value persistence configuration

/// Configuration for Application State Persistence
pub struct AppPersistenceConfig {
    /// Path for eframe's native state file
    pub state_path: &'static str,
}

/// Configuration for the indicator settings record
pub struct SettingsPersistenceConfig {
    /// The single key the settings record lives under (browser localStorage or eframe file storage)
    pub key: &'static str,
}

/// The Master Persistence Configuration
pub struct PersistenceConfig {
    pub app: AppPersistenceConfig,
    pub settings: SettingsPersistenceConfig,
}

pub const PERSISTENCE: PersistenceConfig = PersistenceConfig {
    app: AppPersistenceConfig {
        state_path: ".states.json",
    },
    settings: SettingsPersistenceConfig {
        key: "otc_analyst_settings",
    },
};
