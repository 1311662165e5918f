use crate::core::kernel::ParamValue;

/// Ordered metadata entries, expanded on the wire as `meta_<key>=<value>`.
pub type Meta = Vec<(String, String)>;

/// Role a participant joins with.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    Moderator,
    Viewer,
}

impl Role {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Moderator => "MODERATOR",
            Self::Viewer => "VIEWER",
        }
    }
}

/// One or many recording ids; many are comma-joined into a single term.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RecordIds {
    One(String),
    Many(Vec<String>),
}

impl From<&str> for RecordIds {
    fn from(value: &str) -> Self {
        Self::One(value.to_string())
    }
}

impl From<String> for RecordIds {
    fn from(value: String) -> Self {
        Self::One(value)
    }
}

impl From<Vec<String>> for RecordIds {
    fn from(value: Vec<String>) -> Self {
        Self::Many(value)
    }
}

impl From<RecordIds> for ParamValue {
    fn from(value: RecordIds) -> Self {
        match value {
            RecordIds::One(id) => Self::Str(id),
            RecordIds::Many(ids) => Self::List(ids),
        }
    }
}

/// Optional settings for `create`. Every field defaults to absent, and
/// absent fields are omitted from the signed query entirely.
#[derive(Debug, Clone, Default)]
pub struct CreateMeetingOptions {
    pub attendee_pw: Option<String>,
    pub moderator_pw: Option<String>,
    pub welcome: Option<String>,
    pub dial_number: Option<String>,
    pub voice_bridge: Option<String>,
    pub max_participants: Option<i64>,
    pub logout_url: Option<String>,
    pub record: Option<bool>,
    pub duration: Option<i64>,
    pub is_breakout: Option<bool>,
    pub parent_meeting_id: Option<String>,
    pub sequence: Option<i64>,
    pub free_join: Option<bool>,
    pub breakout_rooms_enabled: Option<bool>,
    pub breakout_rooms_private_chat_enabled: Option<bool>,
    pub breakout_rooms_record: Option<bool>,
    pub meta: Option<Meta>,
    pub moderator_only_message: Option<String>,
    pub auto_start_recording: Option<bool>,
    pub allow_start_stop_recording: Option<bool>,
    pub webcams_only_for_moderator: Option<bool>,
    pub banner_text: Option<String>,
    pub banner_color: Option<String>,
    pub mute_on_start: Option<bool>,
    pub allow_mods_to_unmute_users: Option<bool>,
    pub lock_settings_disable_cam: Option<bool>,
    pub lock_settings_disable_mic: Option<bool>,
    pub lock_settings_disable_private_chat: Option<bool>,
    pub lock_settings_disable_public_chat: Option<bool>,
    pub lock_settings_disable_note: Option<bool>,
    pub lock_settings_locked_layout: Option<bool>,
    pub lock_settings_lock_on_join: Option<bool>,
    pub lock_settings_lock_on_join_configurable: Option<bool>,
    pub lock_settings_hide_viewer_cursor: Option<bool>,
    pub guest_policy: Option<String>,
    pub meeting_keep_events: Option<bool>,
    pub end_when_no_moderator: Option<bool>,
    pub end_when_no_moderator_delay_in_minutes: Option<i64>,
    pub meeting_layout: Option<String>,
    pub learning_dashboard_enabled: Option<bool>,
    pub learning_dashboard_cleanup_delay_in_minutes: Option<i64>,
    pub allow_mods_to_eject_cameras: Option<bool>,
    pub allow_requests_without_session: Option<bool>,
    pub virtual_background_disabled: Option<bool>,
    pub user_camera_cap: Option<i64>,
    pub meeting_camera_cap: Option<i64>,
    pub groups: Option<Vec<String>>,
    pub logo: Option<String>,
    pub disabled_features: Option<Vec<String>>,
    pub pre_uploaded_presentation_override_default: Option<bool>,
}

/// Optional settings for `join`.
#[derive(Debug, Clone, Default)]
pub struct JoinOptions {
    pub password: Option<String>,
    pub create_time: Option<String>,
    pub user_id: Option<String>,
    pub web_voice_conf: Option<String>,
    pub config_token: Option<String>,
    pub default_layout: Option<String>,
    pub avatar_url: Option<String>,
    pub redirect: Option<bool>,
    pub client_url: Option<String>,
    pub guest: Option<String>,
    pub excluded_from_dashboard: Option<String>,
}

/// Filters for `get_recordings`; all absent means "everything".
#[derive(Debug, Clone, Default)]
pub struct GetRecordingsOptions {
    pub meeting_id: Option<String>,
    pub record_id: Option<RecordIds>,
    pub state: Option<String>,
    pub meta: Option<Meta>,
}
