/// Implements [`Store`](crate::store::Store) for [`Storable`](crate::store::Storable)
/// types backed by a pretty printed JSON file.
#[macro_export]
macro_rules! impl_store {
    ($($name:ty),+ $(,)?) => ($(
        #[async_trait::async_trait]
        impl $crate::store::Store for $name {
            async fn new() -> Result<Self> {
                use anyhow::Context as _;

                let path = Self::path()?;

                // nothing is written until something calls `save`
                if fs::metadata(&path).await.is_err() {
                    log::debug!("No store at {}, using defaults", path.display());

                    return Ok(Self::default());
                }

                let mut file = File::open(&path)
                    .await
                    .with_context(|| format!("Error opening {}", path.display()))?;

                let mut buffer = String::new();
                file.read_to_string(&mut buffer).await?;

                serde_json::from_str(&buffer)
                    .with_context(|| format!("Failed to deserialize {}", path.display()))
            }

            async fn save(&self) -> Result<Self> {
                use anyhow::Context as _;

                let path = Self::path()?;

                fs::create_dir_all(path.parent().context("Failed to get store directory")?)
                    .await
                    .context("Failed to create store directory")?;

                let mut file = File::create(&path)
                    .await
                    .with_context(|| format!("Error creating {}", path.display()))?;

                file.write_all(
                    serde_json::to_string_pretty(&self)
                        .context("Failed to serialize")?
                        .as_bytes(),
                )
                .await
                .context("Failed to write store")?;

                log::debug!("Saved store to {}", path.display());

                Ok(self.clone())
            }
        }
    )+)
}
