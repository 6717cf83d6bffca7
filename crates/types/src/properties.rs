use serde::{Deserialize, Serialize};

/// Who may watch the video.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PrivacyView {
    Anybody,
    Contacts,
    Disable,
    Nobody,
    Password,
    Unlisted,
}

/// Where the video may be embedded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PrivacyEmbed {
    Public,
    Private,
    Whitelist,
}

/// Who may comment on the video.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PrivacyComments {
    Anybody,
    Contacts,
    Nobody,
}

/// How a title element is displayed in the embedded player.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TitleDisplay {
    User,
    Show,
    Hide,
}

/// Settable video properties for `PATCH` requests.
///
/// The API takes a flat JSON object whose keys are dotted paths into the
/// resource (`privacy.view`, `embed.buttons.like`, ...). Each field maps to
/// its literal wire key; unset fields are omitted entirely rather than sent
/// as `null`, so a PATCH only touches what the caller set.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct VideoProperties {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Only honored when `privacy.view` is `password`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,
    #[serde(rename = "privacy.view", skip_serializing_if = "Option::is_none")]
    pub privacy_view: Option<PrivacyView>,
    #[serde(rename = "privacy.embed", skip_serializing_if = "Option::is_none")]
    pub privacy_embed: Option<PrivacyEmbed>,
    #[serde(rename = "privacy.download", skip_serializing_if = "Option::is_none")]
    pub privacy_download: Option<bool>,
    #[serde(rename = "privacy.add", skip_serializing_if = "Option::is_none")]
    pub privacy_add: Option<bool>,
    #[serde(rename = "privacy.comments", skip_serializing_if = "Option::is_none")]
    pub privacy_comments: Option<PrivacyComments>,
    #[serde(rename = "embed.buttons.like", skip_serializing_if = "Option::is_none")]
    pub embed_buttons_like: Option<bool>,
    #[serde(rename = "embed.buttons.share", skip_serializing_if = "Option::is_none")]
    pub embed_buttons_share: Option<bool>,
    #[serde(
        rename = "embed.buttons.watchlater",
        skip_serializing_if = "Option::is_none"
    )]
    pub embed_buttons_watchlater: Option<bool>,
    #[serde(rename = "embed.title.name", skip_serializing_if = "Option::is_none")]
    pub embed_title_name: Option<TitleDisplay>,
    #[serde(rename = "embed.title.owner", skip_serializing_if = "Option::is_none")]
    pub embed_title_owner: Option<TitleDisplay>,
}

impl VideoProperties {
    /// True when no field is set (a PATCH would be a no-op).
    pub fn is_empty(&self) -> bool {
        self == &Self::default()
    }
}
