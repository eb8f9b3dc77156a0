//! In-memory port fakes for driving [`ProfileEditor`] in tests.
#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use contractor_core::domain::profile::image::public_url_for;
use contractor_core::domain::profile::{EditorPorts, EditorSettings};
use contractor_core::error::{ProfileError, Result};
use contractor_core::ports::{
    ConfirmPrompt, Confirmer, ImageStore, Navigator, Notice, Notifier,
    ProfileStore, ReferenceDataProvider, ReputationProvider, Route,
    SessionProvider, Severity, UploadOptions,
};
use contractor_core::ProfileEditor;
use contractor_model::{
    ContractorProfile, Service, StateEntry, UserBadge, UserId,
};
use tokio::sync::{Mutex, Notify};
use url::Url;

pub const USER: &str = "u1";

pub fn user() -> UserId {
    UserId::new(USER).expect("valid user id")
}

pub fn complete_profile() -> ContractorProfile {
    ContractorProfile {
        business_name: "Lone Star Plumbing".into(),
        first_name: "Dana".into(),
        last_name: "Ruiz".into(),
        trade: "Plumbing".into(),
        city: "Austin".into(),
        state: "TX".into(),
        country: "US".into(),
        phone: "5125551234".into(),
        zip: "78701".into(),
        ..Default::default()
    }
}

/// Holds a port call open until the test releases it.
#[derive(Default)]
pub struct CallGate {
    pub started: Notify,
    pub release: Notify,
}

impl CallGate {
    async fn pass(&self) {
        self.started.notify_one();
        self.release.notified().await;
    }
}

#[derive(Default)]
pub struct MemoryProfiles {
    pub records: Mutex<HashMap<UserId, ContractorProfile>>,
    pub upserts: Mutex<Vec<(UserId, ContractorProfile)>>,
    pub fetch_error: Mutex<Option<String>>,
    pub upsert_error: Mutex<Option<String>>,
    pub gate: Option<Arc<CallGate>>,
    pub upsert_gate: Option<Arc<CallGate>>,
}

impl MemoryProfiles {
    pub async fn upsert_count(&self) -> usize {
        self.upserts.lock().await.len()
    }

    pub async fn last_upsert(&self) -> Option<ContractorProfile> {
        self.upserts
            .lock()
            .await
            .last()
            .map(|(_, profile)| profile.clone())
    }
}

#[async_trait]
impl ProfileStore for MemoryProfiles {
    async fn fetch(
        &self,
        user_id: &UserId,
    ) -> Result<Option<ContractorProfile>> {
        if let Some(gate) = &self.gate {
            gate.pass().await;
        }
        if let Some(message) = self.fetch_error.lock().await.clone() {
            return Err(ProfileError::Store(message));
        }
        Ok(self.records.lock().await.get(user_id).cloned())
    }

    async fn upsert(
        &self,
        user_id: &UserId,
        profile: &ContractorProfile,
    ) -> Result<()> {
        if let Some(gate) = &self.upsert_gate {
            gate.pass().await;
        }
        if let Some(message) = self.upsert_error.lock().await.clone() {
            return Err(ProfileError::Store(message));
        }
        self.upserts
            .lock()
            .await
            .push((user_id.clone(), profile.clone()));
        self.records
            .lock()
            .await
            .insert(user_id.clone(), profile.clone());
        Ok(())
    }
}

pub struct MemoryReference {
    pub services: Mutex<std::result::Result<Vec<Service>, String>>,
    pub states: Mutex<std::result::Result<Vec<StateEntry>, String>>,
}

impl Default for MemoryReference {
    fn default() -> Self {
        Self {
            services: Mutex::new(Ok(vec![Service {
                id: "plumbing".into(),
                name: "Plumbing".into(),
            }])),
            states: Mutex::new(Ok(vec![StateEntry {
                code: "TX".into(),
                name: "Texas".into(),
            }])),
        }
    }
}

#[async_trait]
impl ReferenceDataProvider for MemoryReference {
    async fn list_services(&self) -> Result<Vec<Service>> {
        self.services
            .lock()
            .await
            .clone()
            .map_err(ProfileError::Reference)
    }

    async fn list_states(&self) -> Result<Vec<StateEntry>> {
        self.states
            .lock()
            .await
            .clone()
            .map_err(ProfileError::Reference)
    }
}

pub struct MemoryReputation {
    pub badge: Mutex<std::result::Result<Option<UserBadge>, String>>,
    pub review_count: Mutex<std::result::Result<u32, String>>,
}

impl Default for MemoryReputation {
    fn default() -> Self {
        Self {
            badge: Mutex::new(Ok(Some(UserBadge {
                code: "top-rated".into(),
                label: "Top Rated".into(),
                icon_url: None,
            }))),
            review_count: Mutex::new(Ok(12)),
        }
    }
}

#[async_trait]
impl ReputationProvider for MemoryReputation {
    async fn fetch_badge(&self, _user_id: &UserId) -> Result<Option<UserBadge>> {
        self.badge
            .lock()
            .await
            .clone()
            .map_err(ProfileError::Reputation)
    }

    async fn review_count(&self, _user_id: &UserId) -> Result<u32> {
        self.review_count
            .lock()
            .await
            .clone()
            .map_err(ProfileError::Reputation)
    }
}

pub struct MemoryImages {
    pub base: Url,
    pub blobs: Mutex<HashMap<String, Vec<u8>>>,
    pub uploads: Mutex<Vec<(String, UploadOptions)>>,
    pub upload_error: Mutex<Option<String>>,
    pub gate: Option<Arc<CallGate>>,
}

impl Default for MemoryImages {
    fn default() -> Self {
        Self {
            base: Url::parse("https://cdn.example.com/storage/")
                .expect("valid base url"),
            blobs: Mutex::new(HashMap::new()),
            uploads: Mutex::new(Vec::new()),
            upload_error: Mutex::new(None),
            gate: None,
        }
    }
}

#[async_trait]
impl ImageStore for MemoryImages {
    async fn upload(
        &self,
        path: &str,
        bytes: &[u8],
        options: UploadOptions,
    ) -> Result<()> {
        if let Some(gate) = &self.gate {
            gate.pass().await;
        }
        if let Some(message) = self.upload_error.lock().await.clone() {
            return Err(ProfileError::Upload(message));
        }
        self.uploads.lock().await.push((path.to_string(), options));
        self.blobs
            .lock()
            .await
            .insert(path.to_string(), bytes.to_vec());
        Ok(())
    }

    fn public_url(&self, path: &str) -> Result<Url> {
        public_url_for(&self.base, path)
            .ok_or_else(|| ProfileError::Upload("opaque base url".into()))
    }
}

#[derive(Default)]
pub struct FixedSession {
    pub user: Option<UserId>,
    pub error: Option<String>,
}

#[async_trait]
impl SessionProvider for FixedSession {
    async fn current_user(&self) -> Result<Option<UserId>> {
        match &self.error {
            Some(message) => Err(ProfileError::Session(message.clone())),
            None => Ok(self.user.clone()),
        }
    }
}

#[derive(Default)]
pub struct RecordingNotifier {
    pub notices: Mutex<Vec<Notice>>,
}

impl RecordingNotifier {
    pub async fn messages(&self) -> Vec<(Severity, String)> {
        self.notices
            .lock()
            .await
            .iter()
            .map(|notice| (notice.severity, notice.message.clone()))
            .collect()
    }
}

#[async_trait]
impl Notifier for RecordingNotifier {
    async fn notify(&self, notice: Notice) {
        self.notices.lock().await.push(notice);
    }
}

#[derive(Default)]
pub struct ScriptedConfirmer {
    pub accept: bool,
    pub prompts: Mutex<Vec<ConfirmPrompt>>,
}

#[async_trait]
impl Confirmer for ScriptedConfirmer {
    async fn confirm(&self, prompt: ConfirmPrompt) -> bool {
        self.prompts.lock().await.push(prompt);
        self.accept
    }
}

#[derive(Default)]
pub struct RecordingNavigator {
    pub routes: parking_lot::Mutex<Vec<Route>>,
}

impl RecordingNavigator {
    pub fn routes(&self) -> Vec<Route> {
        self.routes.lock().clone()
    }
}

impl Navigator for RecordingNavigator {
    fn navigate(&self, route: Route) {
        self.routes.lock().push(route);
    }
}

/// Fakes for every port plus a way to build an editor over them.
#[derive(Default)]
pub struct Harness {
    pub profiles: Arc<MemoryProfiles>,
    pub reference: Arc<MemoryReference>,
    pub reputation: Arc<MemoryReputation>,
    pub images: Arc<MemoryImages>,
    pub session: Arc<FixedSession>,
    pub notifier: Arc<RecordingNotifier>,
    pub confirmer: Arc<ScriptedConfirmer>,
    pub navigator: Arc<RecordingNavigator>,
}

impl Harness {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_session_user(mut self, user: UserId) -> Self {
        self.session = Arc::new(FixedSession {
            user: Some(user),
            error: None,
        });
        self
    }

    pub fn with_session_error(mut self, message: &str) -> Self {
        self.session = Arc::new(FixedSession {
            user: None,
            error: Some(message.to_string()),
        });
        self
    }

    pub fn with_images(mut self, images: MemoryImages) -> Self {
        self.images = Arc::new(images);
        self
    }

    pub fn with_profiles(mut self, profiles: MemoryProfiles) -> Self {
        self.profiles = Arc::new(profiles);
        self
    }

    pub fn with_confirmer(mut self, accept: bool) -> Self {
        self.confirmer = Arc::new(ScriptedConfirmer {
            accept,
            prompts: Mutex::new(Vec::new()),
        });
        self
    }

    pub async fn store_profile(&self, profile: ContractorProfile) {
        self.profiles.records.lock().await.insert(user(), profile);
    }

    pub fn ports(&self) -> EditorPorts {
        EditorPorts {
            profiles: self.profiles.clone(),
            reference: self.reference.clone(),
            reputation: self.reputation.clone(),
            images: self.images.clone(),
            session: self.session.clone(),
            notifier: self.notifier.clone(),
            confirmer: self.confirmer.clone(),
            navigator: self.navigator.clone(),
        }
    }

    pub fn editor(&self) -> ProfileEditor {
        ProfileEditor::new(self.ports())
    }

    pub fn editor_with(&self, settings: EditorSettings) -> ProfileEditor {
        ProfileEditor::with_settings(self.ports(), settings)
    }
}
