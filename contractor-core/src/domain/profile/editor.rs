use std::{any::type_name_of_val, fmt, sync::Arc, time::Duration};

use chrono::Utc;
use contractor_model::{ContractorProfile, ProfileField, UserId};
use parking_lot::Mutex;
use serde::{Deserialize, Serialize};
use tracing::{debug, error, info, warn};
use url::Url;

use super::image::{
    DEFAULT_IMAGE_PREFIX, SelectedImage, image_storage_path, next_cache_stamp,
    with_cache_buster,
};
use super::phone::{live_format_phone, to_canonical_phone, to_display_phone};
use super::state::{BusyReason, EditorState};
use super::validation::{ValidationError, validate_profile};
use crate::error::ProfileError;
use crate::ports::{
    ConfirmPrompt, Confirmer, ImageStore, NavigationParams, Navigator, Notice,
    Notifier, ProfileStore, ReferenceDataProvider, ReputationProvider, Route,
    SessionProvider, Severity, UploadOptions,
    presentation::DEFAULT_NOTICE_DURATION,
};

const SAVE_FAILED: &str = "Failed to save profile";
const UPLOAD_FAILED: &str = "Image upload failed";

/// Which reference-list failures are surfaced to the user. Failures are
/// logged either way.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize,
)]
#[serde(rename_all = "kebab-case")]
pub enum ReferenceNoticePolicy {
    /// Notify for services and states alike.
    #[default]
    All,
    /// Only a states failure raises a notice (legacy behaviour).
    StatesOnly,
}

/// Tunables for [`ProfileEditor`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditorSettings {
    /// Folder profile images are stored under.
    pub image_prefix: String,
    /// Lifetime of transient notices.
    pub notice_duration: Duration,
    /// Which reference-list failures raise a notice.
    pub reference_notices: ReferenceNoticePolicy,
}

impl Default for EditorSettings {
    fn default() -> Self {
        Self {
            image_prefix: DEFAULT_IMAGE_PREFIX.to_string(),
            notice_duration: DEFAULT_NOTICE_DURATION,
            reference_notices: ReferenceNoticePolicy::default(),
        }
    }
}

/// Collaborators the editor talks to.
#[derive(Clone)]
pub struct EditorPorts {
    pub profiles: Arc<dyn ProfileStore>,
    pub reference: Arc<dyn ReferenceDataProvider>,
    pub reputation: Arc<dyn ReputationProvider>,
    pub images: Arc<dyn ImageStore>,
    pub session: Arc<dyn SessionProvider>,
    pub notifier: Arc<dyn Notifier>,
    pub confirmer: Arc<dyn Confirmer>,
    pub navigator: Arc<dyn Navigator>,
}

impl fmt::Debug for EditorPorts {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EditorPorts")
            .field("profiles", &type_name_of_val(self.profiles.as_ref()))
            .field("reference", &type_name_of_val(self.reference.as_ref()))
            .field("reputation", &type_name_of_val(self.reputation.as_ref()))
            .field("images", &type_name_of_val(self.images.as_ref()))
            .field("session", &type_name_of_val(self.session.as_ref()))
            .field("notifier", &type_name_of_val(self.notifier.as_ref()))
            .field("confirmer", &type_name_of_val(self.confirmer.as_ref()))
            .field("navigator", &type_name_of_val(self.navigator.as_ref()))
            .finish()
    }
}

/// What happened to the profile fetch during activation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProfileLoad {
    /// No account could be resolved, nothing was fetched.
    Skipped,
    /// No stored profile; the form keeps its defaults.
    Missing,
    /// The stored record replaced the form.
    Applied,
    /// The record arrived after the user had started editing and was dropped.
    Stale,
    /// The fetch failed; the user was notified.
    Failed,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActivationReport {
    pub user_id: Option<UserId>,
    pub profile: ProfileLoad,
}

/// Result of [`ProfileEditor::save`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SaveOutcome {
    Saved,
    NoUser,
    Invalid(ValidationError),
    Failed(String),
}

/// Result of [`ProfileEditor::upload_image`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UploadOutcome {
    /// Image stored and the profile now points at `url`.
    Uploaded { path: String, url: Url },
    /// No account resolved; nothing was uploaded.
    Skipped,
    UploadFailed(String),
    /// The blob was written but the profile still points at the old image.
    PersistFailed { url: Url, message: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeleteRequestOutcome {
    Declined,
    Routed,
}

/// Drives the contractor profile edit screen.
///
/// All operations take `&self`; state sits behind a mutex that is never held
/// across an `.await`, so loads, edits and saves may interleave freely.
pub struct ProfileEditor {
    ports: EditorPorts,
    settings: EditorSettings,
    state: Mutex<EditorState>,
}

impl fmt::Debug for ProfileEditor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ProfileEditor")
            .field("ports", &self.ports)
            .field("settings", &self.settings)
            .field("generation", &self.state.lock().generation())
            .finish()
    }
}

/// Ends its action's busy marker when the guarded action ends, however it
/// ends.
struct BusyGuard<'a> {
    state: &'a Mutex<EditorState>,
    reason: BusyReason,
}

impl Drop for BusyGuard<'_> {
    fn drop(&mut self) {
        self.state.lock().end_busy(self.reason);
    }
}

impl ProfileEditor {
    pub fn new(ports: EditorPorts) -> Self {
        Self::with_settings(ports, EditorSettings::default())
    }

    pub fn with_settings(ports: EditorPorts, settings: EditorSettings) -> Self {
        Self {
            ports,
            settings,
            state: Mutex::new(EditorState::default()),
        }
    }

    pub fn settings(&self) -> &EditorSettings {
        &self.settings
    }

    /// Snapshot of everything the screen renders.
    pub fn view(&self) -> EditorState {
        self.state.lock().clone()
    }

    pub fn form(&self) -> ContractorProfile {
        self.state.lock().form.clone()
    }

    pub fn user_id(&self) -> Option<UserId> {
        self.state.lock().user_id.clone()
    }

    pub fn is_loading(&self) -> bool {
        self.state.lock().is_loading
    }

    pub fn busy(&self) -> Option<BusyReason> {
        self.state.lock().busy
    }

    /// Load everything the screen needs.
    ///
    /// Reference lists, the profile and the reputation figures are fetched
    /// concurrently; each result is applied as soon as it arrives. Every
    /// failure is guarded: it is logged and, where the user can act on it,
    /// reported through the notifier.
    pub async fn activate(&self, params: &NavigationParams) -> ActivationReport {
        self.state.lock().is_loading = true;

        let reference = self.load_reference_data();
        let account = async {
            let Some(user_id) = self.resolve_user_id(params).await else {
                debug!("no user resolved; profile form keeps its defaults");
                return ActivationReport {
                    user_id: None,
                    profile: ProfileLoad::Skipped,
                };
            };
            self.state.lock().user_id = Some(user_id.clone());

            let (profile, ()) = tokio::join!(
                self.load_profile(&user_id),
                self.load_reputation(&user_id)
            );
            ActivationReport {
                user_id: Some(user_id),
                profile,
            }
        };

        let ((), report) = tokio::join!(reference, account);
        self.state.lock().is_loading = false;
        report
    }

    /// Overwrite one attribute of the form. Phone input is live-formatted.
    pub fn set_field(&self, field: ProfileField, value: impl Into<String>) {
        let value = value.into();
        if field == ProfileField::Phone {
            self.input_phone(&value);
            return;
        }

        let mut state = self.state.lock();
        *state.form.get_mut(field) = value;
        state.mark_dirty();
    }

    /// Apply the keystroke formatter to the phone input.
    ///
    /// Returns the text the input field should now show; the same text is
    /// mirrored into the form.
    pub fn input_phone(&self, current_input: &str) -> String {
        let rendered = live_format_phone(current_input);
        let mut state = self.state.lock();
        state.form.phone = rendered.clone();
        state.mark_dirty();
        rendered
    }

    /// Validate and persist the form, leaving the edit flow on success.
    pub async fn save(&self) -> SaveOutcome {
        let (user_id, form) = {
            let state = self.state.lock();
            (state.user_id.clone(), state.form.clone())
        };

        let Some(user_id) = user_id else {
            self.notify("No user found", Severity::Danger).await;
            return SaveOutcome::NoUser;
        };

        if let Err(err) = validate_profile(&form) {
            debug!(user_id = %user_id, error = %err, "profile rejected");
            self.notify(err.to_string(), Severity::Warning).await;
            return SaveOutcome::Invalid(err);
        }

        let record = canonical_record(form);
        let _busy = self.begin_busy(BusyReason::Saving);

        match self.ports.profiles.upsert(&user_id, &record).await {
            Ok(()) => {
                info!(user_id = %user_id, "profile saved");
                self.state.lock().mark_saved();
                self.notify("Profile saved successfully!", Severity::Success)
                    .await;
                self.ports.navigator.navigate(Route::ProfileTab);
                SaveOutcome::Saved
            }
            Err(err) => {
                error!(user_id = %user_id, error = %err, "failed to save profile");
                let message = failure_message(&err, SAVE_FAILED);
                self.notify(message.clone(), Severity::Danger).await;
                SaveOutcome::Failed(message)
            }
        }
    }

    /// Upload a new profile image and point the stored profile at it.
    ///
    /// The blob path depends only on the user and the file extension, so a
    /// repeated upload overwrites the previous image. The upload and the
    /// follow-up persist are not transactional.
    pub async fn upload_image(&self, image: SelectedImage) -> UploadOutcome {
        let Some(user_id) = self.user_id() else {
            debug!(file = %image.file_name, "image selected without a user");
            return UploadOutcome::Skipped;
        };

        let path =
            image_storage_path(&self.settings.image_prefix, &user_id, &image);
        let _busy = self.begin_busy(BusyReason::Uploading);

        let stored = match self.store_image(&path, &image).await {
            Ok(url) => url,
            Err(err) => {
                warn!(user_id = %user_id, path = %path, error = %err, "image upload failed");
                let message = failure_message(&err, UPLOAD_FAILED);
                self.notify(message.clone(), Severity::Danger).await;
                return UploadOutcome::UploadFailed(message);
            }
        };

        let (url, form) = {
            let mut state = self.state.lock();
            let stamp = next_cache_stamp(
                state.last_cache_stamp(),
                Utc::now().timestamp_millis(),
            );
            state.record_cache_stamp(stamp);
            let url = with_cache_buster(stored, stamp);
            state.form.profile_image_url = url.to_string();
            state.mark_dirty();
            (url, state.form.clone())
        };
        debug!(url = %url, "profile image url updated");

        let record = canonical_record(form);
        match self.ports.profiles.upsert(&user_id, &record).await {
            Ok(()) => {
                info!(user_id = %user_id, path = %path, "profile image updated");
                self.notify("Profile image updated!", Severity::Success).await;
                UploadOutcome::Uploaded { path, url }
            }
            Err(err) => {
                warn!(
                    user_id = %user_id,
                    error = %err,
                    "image stored but profile update failed"
                );
                let message = failure_message(&err, UPLOAD_FAILED);
                self.notify(message.clone(), Severity::Danger).await;
                UploadOutcome::PersistFailed { url, message }
            }
        }
    }

    /// Ask for confirmation and route to the account deletion request flow.
    /// Deletion itself happens elsewhere.
    pub async fn request_deletion(&self) -> DeleteRequestOutcome {
        let prompt = ConfirmPrompt {
            header: "Confirm".to_string(),
            message: "Are you sure you want to submit a delete request for \
                      your account?"
                .to_string(),
            cancel_label: "No".to_string(),
            accept_label: "Yes, Proceed".to_string(),
        };

        if self.ports.confirmer.confirm(prompt).await {
            self.ports.navigator.navigate(Route::DeleteRequest);
            DeleteRequestOutcome::Routed
        } else {
            DeleteRequestOutcome::Declined
        }
    }

    async fn resolve_user_id(&self, params: &NavigationParams) -> Option<UserId> {
        if let Some(raw) = params.user_id.as_deref() {
            match UserId::new(raw) {
                Ok(user_id) => return Some(user_id),
                Err(err) => debug!(error = %err, "ignoring userId parameter"),
            }
        }

        match self.ports.session.current_user().await {
            Ok(user) => user,
            Err(err) => {
                warn!(error = %err, "failed to read current session");
                None
            }
        }
    }

    async fn load_reference_data(&self) {
        let (services, states) = tokio::join!(
            self.ports.reference.list_services(),
            self.ports.reference.list_states()
        );

        match services {
            Ok(services) => self.state.lock().services = services,
            Err(err) => {
                warn!(error = %err, "Failed to load services");
                if self.settings.reference_notices == ReferenceNoticePolicy::All
                {
                    self.notify("Failed to load services", Severity::Danger)
                        .await;
                }
            }
        }

        match states {
            Ok(states) => self.state.lock().states = states,
            Err(err) => {
                warn!(error = %err, "Failed to load states");
                self.notify("Failed to load states", Severity::Danger).await;
            }
        }
    }

    async fn load_profile(&self, user_id: &UserId) -> ProfileLoad {
        let started_at = self.state.lock().generation();

        match self.ports.profiles.fetch(user_id).await {
            Ok(Some(mut profile)) => {
                profile.phone = to_display_phone(&profile.phone);
                if self.state.lock().apply_loaded_profile(started_at, profile) {
                    ProfileLoad::Applied
                } else {
                    debug!(
                        user_id = %user_id,
                        "dropping profile load that raced a user edit"
                    );
                    ProfileLoad::Stale
                }
            }
            Ok(None) => ProfileLoad::Missing,
            Err(err) => {
                warn!(user_id = %user_id, error = %err, "Failed to load profile");
                let message = match err.user_message() {
                    Some(detail) => format!("Failed to load profile: {detail}"),
                    None => "Failed to load profile".to_string(),
                };
                self.notify(message, Severity::Danger).await;
                ProfileLoad::Failed
            }
        }
    }

    async fn load_reputation(&self, user_id: &UserId) {
        let (badge, review_count) = tokio::join!(
            self.ports.reputation.fetch_badge(user_id),
            self.ports.reputation.review_count(user_id)
        );

        match badge {
            Ok(badge) => self.state.lock().badge = badge,
            Err(err) => {
                warn!(user_id = %user_id, error = %err, "Failed to fetch user badge")
            }
        }

        match review_count {
            Ok(count) => self.state.lock().review_count = count,
            Err(err) => warn!(
                user_id = %user_id,
                error = %err,
                "Failed to fetch review count"
            ),
        }
    }

    async fn store_image(
        &self,
        path: &str,
        image: &SelectedImage,
    ) -> Result<Url, ProfileError> {
        self.ports
            .images
            .upload(path, &image.bytes, UploadOptions { overwrite: true })
            .await?;
        self.ports.images.public_url(path)
    }

    fn begin_busy(&self, reason: BusyReason) -> BusyGuard<'_> {
        self.state.lock().begin_busy(reason);
        BusyGuard {
            state: &self.state,
            reason,
        }
    }

    async fn notify(&self, message: impl Into<String>, severity: Severity) {
        let notice = Notice::new(message, severity)
            .with_duration(self.settings.notice_duration);
        self.ports.notifier.notify(notice).await;
    }
}

/// The form as it must be persisted: digits-only phone, everything else as
/// typed.
fn canonical_record(form: ContractorProfile) -> ContractorProfile {
    ContractorProfile {
        phone: to_canonical_phone(&form.phone),
        ..form
    }
}

fn failure_message(err: &ProfileError, fallback: &str) -> String {
    err.user_message().unwrap_or_else(|| fallback.to_string())
}
