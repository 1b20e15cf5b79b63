//! State persistence.
//!
//! The whole application state is one [`AppData`] snapshot, saved and loaded
//! as a single JSON document. Handlers never touch storage directly; they go
//! through [`StateStore`] so tests can swap the file for memory.

use std::path::PathBuf;
use std::sync::Mutex;

use anyhow::{Context, Result};
use async_trait::async_trait;
use tokio::fs;

use crate::models::{AppData, Microgreen, Region, Role, Unit, User};
use crate::services::auth_service;

#[async_trait]
pub trait StateStore: Send + Sync {
    /// Reads the last saved snapshot; `None` when nothing was ever saved.
    async fn load(&self) -> Result<Option<AppData>>;

    /// Replaces the saved snapshot.
    async fn save(&self, data: &AppData) -> Result<()>;
}

/// Stores the snapshot in one JSON file on disk. Writes go to a sibling
/// temp file first and are renamed into place, so a crash mid-write leaves
/// the previous snapshot intact.
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    fn tmp_path(&self) -> PathBuf {
        let mut tmp = self.path.clone().into_os_string();
        tmp.push(".tmp");
        PathBuf::from(tmp)
    }
}

#[async_trait]
impl StateStore for JsonFileStore {
    async fn load(&self) -> Result<Option<AppData>> {
        let bytes = match fs::read(&self.path).await {
            Ok(bytes) => bytes,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(err) => {
                return Err(err).with_context(|| format!("reading {}", self.path.display()));
            }
        };
        let data = serde_json::from_slice(&bytes)
            .with_context(|| format!("parsing {}", self.path.display()))?;
        Ok(Some(data))
    }

    async fn save(&self, data: &AppData) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)
                    .await
                    .with_context(|| format!("creating {}", parent.display()))?;
            }
        }
        let bytes = serde_json::to_vec_pretty(data).context("serializing state")?;
        let tmp = self.tmp_path();
        fs::write(&tmp, &bytes)
            .await
            .with_context(|| format!("writing {}", tmp.display()))?;
        fs::rename(&tmp, &self.path)
            .await
            .with_context(|| format!("replacing {}", self.path.display()))?;
        Ok(())
    }
}

/// Keeps the snapshot in memory only. Used by tests.
#[derive(Default)]
pub struct MemoryStore {
    data: Mutex<Option<AppData>>,
}

#[async_trait]
impl StateStore for MemoryStore {
    async fn load(&self) -> Result<Option<AppData>> {
        Ok(self.data.lock().unwrap_or_else(|e| e.into_inner()).clone())
    }

    async fn save(&self, data: &AppData) -> Result<()> {
        *self.data.lock().unwrap_or_else(|e| e.into_inner()) = Some(data.clone());
        Ok(())
    }
}

/// First-boot state: the farm admin account and the three crops the farm
/// always grows. Loaded state from disk always wins over this.
pub fn bootstrap_data() -> Result<AppData> {
    let admin = User {
        name: "marek".to_string(),
        role: Role::Admin,
        password_hash: auth_service::hash_password("marekmnf")?,
        email: None,
        phone: None,
        address: None,
        region: Region::Unassigned,
    };

    let greens = vec![
        default_green(
            "Reďkovka Sango",
            "Nádherná tmavofialová farba a intenzívna pikantná chuť.",
            "https://images.unsplash.com/photo-1591857177580-dc82b9ac4e1e?auto=format&fit=crop&q=80&w=400",
        ),
        default_green(
            "Reďkovka China Rose",
            "Svieža chuť s ružovými stonkami, skvelá k mäsu.",
            "https://images.unsplash.com/photo-1622484211148-716499368181?auto=format&fit=crop&q=80&w=400",
        ),
        default_green(
            "Slnečnica",
            "Orechová chuť, sladká a mimoriadne chrumkavá.",
            "https://images.unsplash.com/photo-1592144702958-8687a74959a4?auto=format&fit=crop&q=80&w=400",
        ),
    ];

    Ok(AppData {
        users: vec![admin],
        greens,
        orders: Vec::new(),
        harvest: Default::default(),
    })
}

fn default_green(name: &str, description: &str, image: &str) -> Microgreen {
    Microgreen {
        id: uuid::Uuid::new_v4(),
        name: name.to_string(),
        description: description.to_string(),
        image: image.to_string(),
        available_weights: [50, 100].into(),
        unit: Unit::Grams,
        available: true,
    }
}
