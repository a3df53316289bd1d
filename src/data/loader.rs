use bevy::asset::{AssetLoader, LoadContext, io::Reader, ron};
use bevy::prelude::*;
use std::future::Future;
use thiserror::Error;

use super::schema::ItemCatalog;

#[derive(Default)]
pub struct RonCatalogLoader;

#[derive(Debug, Error)]
pub enum RonCatalogLoaderError {
    #[error("Could not load asset: {0}")]
    Io(#[from] std::io::Error),
    #[error("Could not parse RON: {0}")]
    Ron(#[from] ron::error::SpannedError),
    #[error("Could not interpret bytes as UTF-8: {0}")]
    Utf8(#[from] std::str::Utf8Error),
}

impl AssetLoader for RonCatalogLoader {
    type Asset = ItemCatalog;
    type Settings = ();
    type Error = RonCatalogLoaderError;

    fn load(
        &self,
        reader: &mut dyn Reader,
        _settings: &Self::Settings,
        _load_context: &mut LoadContext,
    ) -> impl Future<Output = Result<Self::Asset, Self::Error>> + Send {
        async move {
            let mut bytes = Vec::new();
            reader.read_to_end(&mut bytes).await?;

            let s = std::str::from_utf8(&bytes)?;
            let catalog: ItemCatalog = ron::de::from_str(s)?;

            Ok(catalog)
        }
    }
}
