use crate::bbb::types::{
    CreateMeetingOptions, GetRecordingsOptions, JoinOptions, Meta, RecordIds, Role,
};
use crate::core::config::BbbConfig;
use crate::core::errors::BbbError;
use crate::core::kernel::{Attachment, Params, ReqwestRest, ResponseFormat, RestClient};
use reqwest::Method;
use serde_json::Value;
use std::path::Path;
use tracing::instrument;

/// Client for one conferencing server.
///
/// Construct once per target server and reuse across calls; the transport
/// holds the only shared resource (the HTTP connection pool) and the
/// client itself carries no mutable state, so concurrent calls on one
/// instance are fine. Generic over [`RestClient`] so tests can substitute
/// the transport.
pub struct BbbClient<R: RestClient> {
    rest: R,
}

impl BbbClient<ReqwestRest> {
    /// Connect to a server with the given credentials.
    pub fn new(config: &BbbConfig) -> Result<Self, BbbError> {
        crate::bbb::builder::build_client(config)
    }
}

impl<R: RestClient> BbbClient<R> {
    pub fn with_rest(rest: R) -> Self {
        Self { rest }
    }

    /// Query the server's API version. The version endpoint is the bare
    /// `/api/` path, hence the empty endpoint name.
    pub async fn get_api_version(&self) -> Result<Value, BbbError> {
        self.rest
            .call(Method::GET, "", &Params::new(), None, ResponseFormat::Xml)
            .await
    }

    /// Create a meeting.
    #[instrument(skip(self, options), fields(meeting_id = %meeting_id))]
    pub async fn create(
        &self,
        name: &str,
        meeting_id: &str,
        options: &CreateMeetingOptions,
    ) -> Result<Value, BbbError> {
        let mut params = Params::new();
        params.push("name", name);
        params.push("meetingID", meeting_id);
        params.push_opt("attendeePW", options.attendee_pw.as_deref());
        params.push_opt("moderatorPW", options.moderator_pw.as_deref());
        params.push_opt("welcome", options.welcome.as_deref());
        params.push_opt("dialNumber", options.dial_number.as_deref());
        params.push_opt("voiceBridge", options.voice_bridge.as_deref());
        params.push_opt("maxParticipants", options.max_participants);
        params.push_opt("logoutURL", options.logout_url.as_deref());
        params.push_opt("record", options.record);
        params.push_opt("duration", options.duration);
        params.push_opt("isBreakout", options.is_breakout);
        params.push_opt("parentMeetingID", options.parent_meeting_id.as_deref());
        params.push_opt("sequence", options.sequence);
        params.push_opt("freeJoin", options.free_join);
        params.push_opt("breakoutRoomsEnabled", options.breakout_rooms_enabled);
        params.push_opt(
            "breakoutRoomsPrivateChatEnabled",
            options.breakout_rooms_private_chat_enabled,
        );
        params.push_opt("breakoutRoomsRecord", options.breakout_rooms_record);
        params.push_opt("meta", options.meta.clone());
        params.push_opt(
            "moderatorOnlyMessage",
            options.moderator_only_message.as_deref(),
        );
        params.push_opt("autoStartRecording", options.auto_start_recording);
        params.push_opt(
            "allowStartStopRecording",
            options.allow_start_stop_recording,
        );
        params.push_opt(
            "webcamsOnlyForModerator",
            options.webcams_only_for_moderator,
        );
        params.push_opt("bannerText", options.banner_text.as_deref());
        params.push_opt("bannerColor", options.banner_color.as_deref());
        params.push_opt("muteOnStart", options.mute_on_start);
        params.push_opt(
            "allowModsToUnmuteUsers",
            options.allow_mods_to_unmute_users,
        );
        params.push_opt("lockSettingsDisableCam", options.lock_settings_disable_cam);
        params.push_opt("lockSettingsDisableMic", options.lock_settings_disable_mic);
        params.push_opt(
            "lockSettingsDisablePrivateChat",
            options.lock_settings_disable_private_chat,
        );
        params.push_opt(
            "lockSettingsDisablePublicChat",
            options.lock_settings_disable_public_chat,
        );
        params.push_opt(
            "lockSettingsDisableNote",
            options.lock_settings_disable_note,
        );
        params.push_opt(
            "lockSettingsLockedLayout",
            options.lock_settings_locked_layout,
        );
        params.push_opt(
            "lockSettingsLockOnJoin",
            options.lock_settings_lock_on_join,
        );
        params.push_opt(
            "lockSettingsLockOnJoinConfigurable",
            options.lock_settings_lock_on_join_configurable,
        );
        params.push_opt(
            "lockSettingsHideViewerCursor",
            options.lock_settings_hide_viewer_cursor,
        );
        params.push_opt("guestPolicy", options.guest_policy.as_deref());
        params.push_opt("meetingKeepEvents", options.meeting_keep_events);
        params.push_opt("endWhenNoModerator", options.end_when_no_moderator);
        params.push_opt(
            "endWhenNoModeratorDelayInMinutes",
            options.end_when_no_moderator_delay_in_minutes,
        );
        params.push_opt("meetingLayout", options.meeting_layout.as_deref());
        // The server spells this one with a capital B.
        params.push_opt("learningDashBoardEnabled", options.learning_dashboard_enabled);
        params.push_opt(
            "learningDashboardCleanupDelayInMinutes",
            options.learning_dashboard_cleanup_delay_in_minutes,
        );
        params.push_opt(
            "allowModsToEjectCameras",
            options.allow_mods_to_eject_cameras,
        );
        params.push_opt(
            "allowRequestsWithoutSession",
            options.allow_requests_without_session,
        );
        params.push_opt(
            "virtualBackgroundDisabled",
            options.virtual_background_disabled,
        );
        params.push_opt("userCameraCap", options.user_camera_cap);
        params.push_opt("meetingCameraCap", options.meeting_camera_cap);
        params.push_opt("groups", options.groups.clone());
        params.push_opt("logo", options.logo.as_deref());
        params.push_opt("disabledFeatures", options.disabled_features.clone());
        params.push_opt(
            "preUploadedPresentationOverrideDefault",
            options.pre_uploaded_presentation_override_default,
        );

        self.rest
            .call(Method::GET, "create", &params, None, ResponseFormat::Xml)
            .await
    }

    /// Join a meeting as the given role.
    #[instrument(skip(self, options), fields(meeting_id = %meeting_id))]
    pub async fn join(
        &self,
        full_name: &str,
        meeting_id: &str,
        role: Role,
        options: &JoinOptions,
    ) -> Result<Value, BbbError> {
        let mut params = Params::new();
        params.push("fullName", full_name);
        params.push("meetingID", meeting_id);
        params.push_opt("password", options.password.as_deref());
        params.push("role", role.as_str());
        params.push_opt("createTime", options.create_time.as_deref());
        params.push_opt("userID", options.user_id.as_deref());
        params.push_opt("webVoiceConf", options.web_voice_conf.as_deref());
        params.push_opt("configToken", options.config_token.as_deref());
        params.push_opt("defaultLayout", options.default_layout.as_deref());
        params.push_opt("avatarUrl", options.avatar_url.as_deref());
        params.push_opt("redirect", options.redirect);
        params.push_opt("clientUrl", options.client_url.as_deref());
        params.push_opt("guest", options.guest.as_deref());
        params.push_opt(
            "excludedFromDashboard",
            options.excluded_from_dashboard.as_deref(),
        );

        self.rest
            .call(Method::GET, "join", &params, None, ResponseFormat::Xml)
            .await
    }

    /// End a running meeting.
    pub async fn end(&self, meeting_id: &str) -> Result<Value, BbbError> {
        let mut params = Params::new();
        params.push("meetingID", meeting_id);

        self.rest
            .call(Method::GET, "end", &params, None, ResponseFormat::Xml)
            .await
    }

    pub async fn is_meeting_running(&self, meeting_id: &str) -> Result<Value, BbbError> {
        let mut params = Params::new();
        params.push("meetingID", meeting_id);

        self.rest
            .call(
                Method::GET,
                "isMeetingRunning",
                &params,
                None,
                ResponseFormat::Xml,
            )
            .await
    }

    pub async fn get_meetings(&self) -> Result<Value, BbbError> {
        self.rest
            .call(
                Method::GET,
                "getMeetings",
                &Params::new(),
                None,
                ResponseFormat::Xml,
            )
            .await
    }

    pub async fn get_meeting_info(&self, meeting_id: &str) -> Result<Value, BbbError> {
        let mut params = Params::new();
        params.push("meetingID", meeting_id);

        self.rest
            .call(
                Method::GET,
                "getMeetingInfo",
                &params,
                None,
                ResponseFormat::Xml,
            )
            .await
    }

    /// List recordings, flattened from the `recordings` sub-mapping into a
    /// sequence in its iteration order. A payload without recordings
    /// yields an empty list.
    pub async fn get_recordings(
        &self,
        options: &GetRecordingsOptions,
    ) -> Result<Vec<Value>, BbbError> {
        let mut params = Params::new();
        params.push_opt("meetingID", options.meeting_id.as_deref());
        params.push_opt("recordID", options.record_id.clone());
        params.push_opt("state", options.state.as_deref());
        params.push_opt("meta", options.meta.clone());

        let response = self
            .rest
            .call(
                Method::GET,
                "getRecordings",
                &params,
                None,
                ResponseFormat::Xml,
            )
            .await?;

        let recordings = match response.get("recordings") {
            Some(Value::Object(map)) => map.values().cloned().collect(),
            _ => Vec::new(),
        };
        Ok(recordings)
    }

    pub async fn publish_recordings(
        &self,
        record_id: &str,
        publish: bool,
    ) -> Result<Value, BbbError> {
        let mut params = Params::new();
        params.push("recordID", record_id);
        params.push("publish", publish);

        // The upstream server handles publishing through the getRecordings
        // endpoint; kept as-is.
        self.rest
            .call(
                Method::GET,
                "getRecordings",
                &params,
                None,
                ResponseFormat::Xml,
            )
            .await
    }

    pub async fn delete_recordings(
        &self,
        record_ids: impl Into<RecordIds>,
    ) -> Result<Value, BbbError> {
        let mut params = Params::new();
        params.push("recordID", record_ids.into());

        self.rest
            .call(
                Method::GET,
                "deleteRecordings",
                &params,
                None,
                ResponseFormat::Xml,
            )
            .await
    }

    pub async fn update_recordings(
        &self,
        record_ids: impl Into<RecordIds>,
        meta: Meta,
    ) -> Result<Value, BbbError> {
        let mut params = Params::new();
        params.push("recordID", record_ids.into());
        params.push("meta", meta);

        self.rest
            .call(
                Method::GET,
                "updateRecordings",
                &params,
                None,
                ResponseFormat::Xml,
            )
            .await
    }

    /// List the text tracks of a recording. This endpoint answers JSON.
    pub async fn get_recording_text_tracks(
        &self,
        record_id: &str,
    ) -> Result<Vec<Value>, BbbError> {
        let mut params = Params::new();
        params.push("recordID", record_id);

        let response = self
            .rest
            .call(
                Method::GET,
                "getRecordingTextTracks",
                &params,
                None,
                ResponseFormat::Json,
            )
            .await?;

        let tracks = match response.get("tracks") {
            Some(Value::Array(items)) => items.clone(),
            _ => Vec::new(),
        };
        Ok(tracks)
    }

    /// Upload a subtitle/caption file for a recording.
    ///
    /// The file must exist locally before any network I/O happens; its
    /// content is read fully into memory and sent as the multipart `file`
    /// part.
    #[instrument(skip(self), fields(record_id = %record_id))]
    pub async fn put_recording_text_track(
        &self,
        record_id: &str,
        kind: &str,
        lang: &str,
        label: &str,
        file_path: &Path,
    ) -> Result<Value, BbbError> {
        if !file_path.exists() {
            return Err(BbbError::FileDoesNotExist(file_path.to_path_buf()));
        }

        let content = tokio::fs::read(file_path).await?;
        let file_name = file_path
            .file_name()
            .map_or_else(|| "file".to_string(), |n| n.to_string_lossy().into_owned());

        let mut params = Params::new();
        params.push("recordID", record_id);
        params.push("kind", kind);
        params.push("lang", lang);
        params.push("label", label);

        self.rest
            .call(
                Method::POST,
                "putRecordingTextTrack",
                &params,
                Some(Attachment { file_name, content }),
                ResponseFormat::Json,
            )
            .await
    }

    /// Pre-upload documents into a meeting. Not wired up yet; always fails
    /// without touching the network.
    pub async fn insert_document(&self) -> Result<Value, BbbError> {
        Err(BbbError::NotImplemented(
            "This request is not yet implemented",
        ))
    }
}
