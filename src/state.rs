use std::collections::HashMap;
use std::sync::Arc;

use tokio::sync::RwLock;

use crate::cart::Cart;
use crate::error::{AppError, AppResult};
use crate::models::AppData;
use crate::store::{StateStore, bootstrap_data};

/// Shared handler state: the persisted snapshot, the store it is saved
/// through, and the per-partner session carts (never persisted).
#[derive(Clone)]
pub struct AppState {
    store: Arc<dyn StateStore>,
    data: Arc<RwLock<AppData>>,
    carts: Arc<RwLock<HashMap<String, Cart>>>,
}

impl AppState {
    /// Loads the saved snapshot, or bootstraps and saves the first-boot
    /// state when the store is empty.
    pub async fn init(store: Arc<dyn StateStore>) -> anyhow::Result<Self> {
        let data = match store.load().await? {
            Some(data) => {
                tracing::info!(
                    users = data.users.len(),
                    greens = data.greens.len(),
                    orders = data.orders.len(),
                    "loaded saved state"
                );
                data
            }
            None => {
                let data = bootstrap_data()?;
                store.save(&data).await?;
                tracing::info!("no saved state found, bootstrapped defaults");
                data
            }
        };

        Ok(Self {
            store,
            data: Arc::new(RwLock::new(data)),
            carts: Arc::new(RwLock::new(HashMap::new())),
        })
    }

    /// A point-in-time copy of the whole state, for read-only work.
    pub async fn snapshot(&self) -> AppData {
        self.data.read().await.clone()
    }

    /// Applies a mutation and saves the result, all under the write lock so
    /// concurrent updates serialize and the file always matches memory.
    pub async fn update<T, F>(&self, mutate: F) -> AppResult<T>
    where
        F: FnOnce(&mut AppData) -> AppResult<T>,
    {
        let mut data = self.data.write().await;
        let out = mutate(&mut data)?;
        if let Err(err) = self.store.save(&data).await {
            tracing::error!(error = %err, "failed to save state");
            return Err(AppError::Internal(err));
        }
        Ok(out)
    }

    pub async fn cart_snapshot(&self, owner: &str) -> Cart {
        self.carts
            .read()
            .await
            .get(owner)
            .cloned()
            .unwrap_or_default()
    }

    pub async fn with_cart<T, F>(&self, owner: &str, mutate: F) -> T
    where
        F: FnOnce(&mut Cart) -> T,
    {
        let mut carts = self.carts.write().await;
        mutate(carts.entry(owner.to_string()).or_default())
    }

    pub async fn clear_cart(&self, owner: &str) {
        self.carts.write().await.remove(owner);
    }
}
