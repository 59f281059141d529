mod image_input;
mod settings_store;

pub use {
    image_input::{
        ChartImage, ImageError, encode_data_uri, is_image_mime, mime_from_extension,
        split_data_uri,
    },
    settings_store::{MemoryStorage, SettingsStore, parse_settings_record},
};

#[cfg(not(target_arch = "wasm32"))]
pub use {image_input::spawn_image_read, settings_store::JsonFileStorage};
