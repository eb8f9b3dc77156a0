//! Filesystem-backed adapters.
//!
//! Layout under the data root:
//!
//! ```text
//! profiles/<user>.json        ProfileStore
//! reference/services.json     ReferenceDataProvider
//! reference/states.json       (optional, defaults to the US state list)
//! reputation/<user>.json      ReputationProvider
//! <image path>                ImageStore blobs, e.g. profile-images/u1.png
//! ```

use std::io::ErrorKind;
use std::path::{Component, Path, PathBuf};

use async_trait::async_trait;
use contractor_model::{
    ContractorProfile, Service, StateEntry, UserBadge, UserId, us_states,
};
use serde::Deserialize;
use serde::de::DeserializeOwned;
use tokio::fs;
use tracing::{debug, info};
use url::Url;
use uuid::Uuid;

use crate::domain::profile::image::public_url_for;
use crate::error::{ProfileError, Result};
use crate::ports::{
    ImageStore, ProfileStore, ReferenceDataProvider, ReputationProvider,
    UploadOptions,
};

const PROFILES_DIR: &str = "profiles";
const REFERENCE_DIR: &str = "reference";
const REPUTATION_DIR: &str = "reputation";

/// Reject anything that could escape the data root.
fn relative_path(raw: &str) -> Option<PathBuf> {
    let path = Path::new(raw);
    let safe = !raw.is_empty()
        && path
            .components()
            .all(|component| matches!(component, Component::Normal(_)));
    safe.then(|| path.to_path_buf())
}

fn user_file(root: &Path, dir: &str, user_id: &UserId) -> Result<PathBuf> {
    let name = user_id.as_str();
    if name.contains(['/', '\\']) || name == "." || name == ".." {
        return Err(ProfileError::Store(format!(
            "user id {name:?} cannot be used as a file name"
        )));
    }
    Ok(root.join(dir).join(format!("{name}.json")))
}

async fn read_json<T: DeserializeOwned>(path: &Path) -> Result<Option<T>> {
    match fs::read(path).await {
        Ok(bytes) => Ok(Some(serde_json::from_slice(&bytes)?)),
        Err(err) if err.kind() == ErrorKind::NotFound => Ok(None),
        Err(err) => Err(err.into()),
    }
}

/// Write through a uniquely named sibling temp file so readers never see a
/// torn record and concurrent writers never share a temp file.
async fn write_atomically(path: &Path, bytes: &[u8]) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).await?;
    }
    let mut tmp = path.as_os_str().to_owned();
    tmp.push(format!(".tmp-{}", Uuid::new_v4().simple()));
    let tmp = PathBuf::from(tmp);

    let written = async {
        fs::write(&tmp, bytes).await?;
        fs::rename(&tmp, path).await
    }
    .await;

    if let Err(err) = written {
        let _ = fs::remove_file(&tmp).await;
        return Err(err.into());
    }
    Ok(())
}

/// One pretty-printed JSON document per profile.
#[derive(Clone, Debug)]
pub struct FsProfileStore {
    root: PathBuf,
}

impl FsProfileStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }
}

#[async_trait]
impl ProfileStore for FsProfileStore {
    async fn fetch(
        &self,
        user_id: &UserId,
    ) -> Result<Option<ContractorProfile>> {
        let path = user_file(&self.root, PROFILES_DIR, user_id)?;
        read_json(&path).await.map_err(|err| {
            ProfileError::Store(format!(
                "Failed to read profile {}: {err}",
                path.display()
            ))
        })
    }

    async fn upsert(
        &self,
        user_id: &UserId,
        profile: &ContractorProfile,
    ) -> Result<()> {
        let path = user_file(&self.root, PROFILES_DIR, user_id)?;
        let bytes = serde_json::to_vec_pretty(profile)?;
        write_atomically(&path, &bytes).await.map_err(|err| {
            ProfileError::Store(format!(
                "Failed to write profile {}: {err}",
                path.display()
            ))
        })?;
        info!(user_id = %user_id, path = %path.display(), "profile stored");
        Ok(())
    }
}

/// Blob storage in a local directory served under `public_base`.
#[derive(Clone, Debug)]
pub struct FsImageStore {
    root: PathBuf,
    public_base: Url,
}

impl FsImageStore {
    pub fn new(root: impl Into<PathBuf>, public_base: Url) -> Self {
        Self {
            root: root.into(),
            public_base,
        }
    }

    fn blob_path(&self, path: &str) -> Result<PathBuf> {
        relative_path(path).map(|rel| self.root.join(rel)).ok_or_else(|| {
            ProfileError::Upload(format!("invalid storage path {path:?}"))
        })
    }
}

#[async_trait]
impl ImageStore for FsImageStore {
    async fn upload(
        &self,
        path: &str,
        bytes: &[u8],
        options: UploadOptions,
    ) -> Result<()> {
        let target = self.blob_path(path)?;

        if !options.overwrite && fs::try_exists(&target).await? {
            return Err(ProfileError::Upload(format!(
                "The resource already exists: {path}"
            )));
        }

        write_atomically(&target, bytes).await.map_err(|err| {
            ProfileError::Upload(format!("Failed to store {path}: {err}"))
        })?;
        debug!(path, size = bytes.len(), "blob stored");
        Ok(())
    }

    fn public_url(&self, path: &str) -> Result<Url> {
        self.blob_path(path)?;
        public_url_for(&self.public_base, path).ok_or_else(|| {
            ProfileError::Upload(format!(
                "{} cannot be used as a base URL",
                self.public_base
            ))
        })
    }
}

/// Reference lists read from JSON files.
#[derive(Clone, Debug)]
pub struct FsReferenceData {
    root: PathBuf,
}

impl FsReferenceData {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    async fn read_list<T: DeserializeOwned>(
        &self,
        file: &str,
    ) -> Result<Option<Vec<T>>> {
        let path = self.root.join(REFERENCE_DIR).join(file);
        read_json(&path).await.map_err(|err| {
            ProfileError::Reference(format!(
                "Failed to read {}: {err}",
                path.display()
            ))
        })
    }
}

#[async_trait]
impl ReferenceDataProvider for FsReferenceData {
    async fn list_services(&self) -> Result<Vec<Service>> {
        Ok(self.read_list("services.json").await?.unwrap_or_default())
    }

    async fn list_states(&self) -> Result<Vec<StateEntry>> {
        Ok(self
            .read_list("states.json")
            .await?
            .unwrap_or_else(us_states))
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct ReputationRecord {
    badge: Option<UserBadge>,
    review_count: u32,
}

/// Per-user badge and review count snapshots.
#[derive(Clone, Debug)]
pub struct FsReputation {
    root: PathBuf,
}

impl FsReputation {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    async fn record(&self, user_id: &UserId) -> Result<ReputationRecord> {
        let path = user_file(&self.root, REPUTATION_DIR, user_id)?;
        let record = read_json(&path).await.map_err(|err| {
            ProfileError::Reputation(format!(
                "Failed to read {}: {err}",
                path.display()
            ))
        })?;
        Ok(record.unwrap_or_default())
    }
}

#[async_trait]
impl ReputationProvider for FsReputation {
    async fn fetch_badge(&self, user_id: &UserId) -> Result<Option<UserBadge>> {
        Ok(self.record(user_id).await?.badge)
    }

    async fn review_count(&self, user_id: &UserId) -> Result<u32> {
        Ok(self.record(user_id).await?.review_count)
    }
}
