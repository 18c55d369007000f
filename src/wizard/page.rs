// ABOUTME: Page definitions for the setup wizard
// Ordered page list, per-page visibility rules, and the controls each page owns

use serde::{Deserialize, Serialize};

use super::paths::PathFilter;
use super::strings::LANGUAGES;
use super::view::WizardView;

/// Page identifiers for the built-in page list
pub mod ids {
    pub const WELCOME: &str = "welcome";
    pub const PROXY: &str = "proxy";
    pub const SQN: &str = "sqn";
    pub const SOURCE: &str = "source";
    pub const AUDIODIR: &str = "audiodir";
    pub const PLAYLISTDIR: &str = "playlistdir";
    pub const ITUNES: &str = "itunes";
    pub const MUSICIP: &str = "musicip";
    pub const SUMMARY: &str = "summary";
}

/// Form field and checkbox identifiers shared with the settings backend
pub mod fields {
    pub const LANGUAGE: &str = "language";
    pub const WEBPROXY: &str = "webproxy";
    pub const SN_EMAIL: &str = "sn_email";
    pub const SN_PASSWORD: &str = "sn_password";
    pub const USE_AUDIODIR: &str = "useAudiodir";
    pub const ITUNES: &str = "itunes";
    pub const MUSICMAGIC: &str = "musicmagic";
    pub const AUDIODIR: &str = "audiodir";
    pub const PLAYLISTDIR: &str = "playlistdir";
    pub const XML_FILE: &str = "xml_file";
}

/// Global server capability switches
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FeatureFlag {
    Proxy,
    Itunes,
    MusicIp,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeatureFlags {
    #[serde(default)]
    pub show_proxy: bool,

    #[serde(default = "default_true")]
    pub show_itunes: bool,

    #[serde(default = "default_true")]
    pub show_musicip: bool,
}

fn default_true() -> bool {
    true
}

impl Default for FeatureFlags {
    fn default() -> Self {
        Self {
            show_proxy: false,
            show_itunes: true,
            show_musicip: true,
        }
    }
}

impl FeatureFlags {
    pub fn is_enabled(&self, flag: FeatureFlag) -> bool {
        match flag {
            FeatureFlag::Proxy => self.show_proxy,
            FeatureFlag::Itunes => self.show_itunes,
            FeatureFlag::MusicIp => self.show_musicip,
        }
    }
}

/// When a page takes part in navigation
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Visibility {
    Always,
    /// Shown only while the feature flag is enabled
    Feature(FeatureFlag),
    /// Shown only while the checkbox is checked
    Checkbox(String),
    /// Shown only while the checkbox is checked and the feature flag is enabled
    CheckboxAndFeature(String, FeatureFlag),
}

impl Visibility {
    /// Evaluate against the current view state.
    ///
    /// A checkbox that the view does not know about never hides its page.
    pub fn is_visible<V: WizardView + ?Sized>(&self, view: &V, flags: &FeatureFlags) -> bool {
        match self {
            Self::Always => true,
            Self::Feature(flag) => flags.is_enabled(*flag),
            Self::Checkbox(id) => view.is_checked(id).unwrap_or(true),
            Self::CheckboxAndFeature(id, flag) => match view.is_checked(id) {
                Some(checked) => checked && flags.is_enabled(*flag),
                None => true,
            },
        }
    }
}

/// Kinds of input a page can hold
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ControlKind {
    Text,
    Password,
    Checkbox { checked: bool },
    Path(PathFilter),
    /// Choice between `(value, display name)` options
    Choice(Vec<(String, String)>),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Control {
    pub id: String,
    pub kind: ControlKind,
}

impl Control {
    pub fn text(id: &str) -> Self {
        Self { id: id.to_string(), kind: ControlKind::Text }
    }

    pub fn password(id: &str) -> Self {
        Self { id: id.to_string(), kind: ControlKind::Password }
    }

    pub fn checkbox(id: &str, checked: bool) -> Self {
        Self { id: id.to_string(), kind: ControlKind::Checkbox { checked } }
    }

    pub fn path(id: &str, filter: PathFilter) -> Self {
        Self { id: id.to_string(), kind: ControlKind::Path(filter) }
    }

    pub fn choice(id: &str, options: Vec<(String, String)>) -> Self {
        Self { id: id.to_string(), kind: ControlKind::Choice(options) }
    }

    /// Whether typed characters go into this control
    pub fn accepts_text(&self) -> bool {
        matches!(self.kind, ControlKind::Text | ControlKind::Password | ControlKind::Path(_))
    }

    pub fn is_selector(&self) -> bool {
        matches!(self.kind, ControlKind::Path(_))
    }
}

/// One step of the wizard
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Page {
    pub id: String,
    pub visibility: Visibility,
    pub controls: Vec<Control>,
}

impl Page {
    pub fn new(id: &str) -> Self {
        Self {
            id: id.to_string(),
            visibility: Visibility::Always,
            controls: Vec::new(),
        }
    }

    #[must_use]
    pub fn with_visibility(mut self, visibility: Visibility) -> Self {
        self.visibility = visibility;
        self
    }

    #[must_use]
    pub fn with_control(mut self, control: Control) -> Self {
        self.controls.push(control);
        self
    }
}

/// The server setup page list, in navigation order
pub fn default_pages() -> Vec<Page> {
    let languages = LANGUAGES
        .iter()
        .map(|lang| (lang.code.to_string(), lang.name.to_string()))
        .collect();

    vec![
        Page::new(ids::WELCOME).with_control(Control::choice(fields::LANGUAGE, languages)),
        Page::new(ids::PROXY)
            .with_visibility(Visibility::Feature(FeatureFlag::Proxy))
            .with_control(Control::text(fields::WEBPROXY)),
        Page::new(ids::SQN)
            .with_control(Control::text(fields::SN_EMAIL))
            .with_control(Control::password(fields::SN_PASSWORD)),
        Page::new(ids::SOURCE)
            .with_control(Control::checkbox(fields::USE_AUDIODIR, true))
            .with_control(Control::checkbox(fields::ITUNES, false))
            .with_control(Control::checkbox(fields::MUSICMAGIC, false)),
        Page::new(ids::AUDIODIR)
            .with_visibility(Visibility::Checkbox(fields::USE_AUDIODIR.to_string()))
            .with_control(Control::path(fields::AUDIODIR, PathFilter::FoldersOnly)),
        Page::new(ids::PLAYLISTDIR)
            .with_visibility(Visibility::Checkbox(fields::USE_AUDIODIR.to_string()))
            .with_control(Control::path(fields::PLAYLISTDIR, PathFilter::FoldersOnly)),
        Page::new(ids::ITUNES)
            .with_visibility(Visibility::CheckboxAndFeature(
                fields::ITUNES.to_string(),
                FeatureFlag::Itunes,
            ))
            .with_control(Control::path(fields::XML_FILE, PathFilter::FileType("xml".to_string()))),
        Page::new(ids::MUSICIP).with_visibility(Visibility::CheckboxAndFeature(
            fields::MUSICMAGIC.to_string(),
            FeatureFlag::MusicIp,
        )),
        Page::new(ids::SUMMARY),
    ]
}
