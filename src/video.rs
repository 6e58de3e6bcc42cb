//! Video provider detection and embed URL construction.
//!
//! This is the single list of supported video platforms. Every widget that
//! shows a video (hero video, video embed, video modal, comparison demos)
//! goes through [`VideoSource`], so a URL is either recognised everywhere or
//! nowhere.
//!
//! | Provider     | Accepted URL forms                                   |
//! |--------------|------------------------------------------------------|
//! | YouTube      | `youtube.com/watch?v=ID`, `youtube.com/embed/ID`, `youtu.be/ID` |
//! | Vimeo        | `vimeo.com/ID`, `vimeo.com/video/ID`, `player.vimeo.com/video/ID` |
//! | Loom         | `loom.com/share/ID`, `loom.com/embed/ID`             |
//! | Google Drive | `drive.google.com/file/d/ID/...`                     |
//! | Figma        | `figma.com/proto/KEY/...`, `figma.com/file/KEY/...`, `figma.com/design/KEY/...` |
//!
//! Anything else is either a direct media file (played in a `<video>`
//! element, see [`VideoSource::direct`]) or unsupported, depending on the
//! widget.

use regex::Regex;
use serde::Serialize;
use std::fmt;
use std::sync::LazyLock;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum Provider {
    YouTube,
    Vimeo,
    Loom,
    GoogleDrive,
    Figma,
}

impl Provider {
    /// Human label, used for the platform badge.
    pub fn label(self) -> &'static str {
        match self {
            Provider::YouTube => "YouTube",
            Provider::Vimeo => "Vimeo",
            Provider::Loom => "Loom",
            Provider::GoogleDrive => "Google Drive",
            Provider::Figma => "Figma",
        }
    }

    /// Whether the provider can play as a muted looping background.
    pub fn supports_background(self) -> bool {
        matches!(self, Provider::YouTube | Provider::Vimeo)
    }
}

impl fmt::Display for Provider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

static YOUTUBE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?:youtube\.com/(?:watch\?(?:[^#]*&)?v=|embed/)|youtu\.be/)([A-Za-z0-9_-]{11})")
        .expect("valid youtube regex")
});
static VIMEO: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"vimeo\.com/(?:video/)?(\d+)").expect("valid vimeo regex"));
static LOOM: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"loom\.com/(?:share|embed)/([A-Za-z0-9]+)").expect("valid loom regex")
});
static DRIVE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"drive\.google\.com/file/d/([A-Za-z0-9_-]+)").expect("valid drive regex")
});
static FIGMA: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"figma\.com/(?:proto|file|design)/([A-Za-z0-9]+)").expect("valid figma regex")
});
static DROPBOX_ST: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"&st=[^&]+").expect("valid dropbox regex"));

/// A video URL resolved to a provider and its video id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct VideoSource {
    pub provider: Provider,
    pub id: String,
    /// The URL as written in the document.
    pub url: String,
}

impl VideoSource {
    /// Recognise a provider URL. Returns `None` for anything unsupported.
    pub fn parse(url: &str) -> Option<Self> {
        let table: [(Provider, &Regex); 5] = [
            (Provider::YouTube, &YOUTUBE),
            (Provider::Vimeo, &VIMEO),
            (Provider::Loom, &LOOM),
            (Provider::GoogleDrive, &DRIVE),
            (Provider::Figma, &FIGMA),
        ];
        table.into_iter().find_map(|(provider, re)| {
            re.captures(url).map(|caps| VideoSource {
                provider,
                id: caps[1].to_string(),
                url: url.to_string(),
            })
        })
    }

    /// Interactive player URL, autoplaying when opened in an overlay.
    pub fn embed_url(&self) -> String {
        match self.provider {
            Provider::YouTube => format!("https://www.youtube.com/embed/{}?autoplay=1&rel=0", self.id),
            Provider::Vimeo => format!(
                "https://player.vimeo.com/video/{}?autoplay=1&title=0&byline=0&portrait=0",
                self.id
            ),
            Provider::Loom => format!("https://www.loom.com/embed/{}?autoplay=1", self.id),
            Provider::GoogleDrive => format!("https://drive.google.com/file/d/{}/preview", self.id),
            Provider::Figma => {
                let encoded: String = url::form_urlencoded::byte_serialize(self.url.as_bytes()).collect();
                format!("https://www.figma.com/embed?embed_host=share&url={encoded}")
            }
        }
    }

    /// Muted, looping, chrome-less URL for hero backgrounds.
    ///
    /// Only YouTube and Vimeo offer a background mode.
    pub fn background_url(&self) -> Option<String> {
        match self.provider {
            Provider::Vimeo => Some(format!(
                "https://player.vimeo.com/video/{}?background=1&autoplay=1&muted=1&loop=1&quality=1080p",
                self.id
            )),
            Provider::YouTube => Some(format!(
                "https://www.youtube.com/embed/{id}?autoplay=1&mute=1&loop=1&controls=0&showinfo=0&rel=0&playlist={id}",
                id = self.id
            )),
            _ => None,
        }
    }

    /// Poster image the provider serves without an API call.
    pub fn default_thumbnail(&self) -> Option<String> {
        match self.provider {
            Provider::YouTube => Some(format!(
                "https://img.youtube.com/vi/{}/maxresdefault.jpg",
                self.id
            )),
            _ => None,
        }
    }

    /// Normalise a URL meant for a plain `<video>` element.
    ///
    /// Dropbox share links are turned into raw file links (`dl=0` → `raw=1`,
    /// the `st=` session parameter dropped); other URLs are returned as is.
    pub fn direct(url: &str) -> String {
        if url.contains("dropbox.com") {
            let raw = url.replacen("dl=0", "raw=1", 1);
            DROPBOX_ST.replace(&raw, "").into_owned()
        } else {
            url.to_string()
        }
    }
}

/// What a video-modal block should play.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Playback {
    Embed(VideoSource),
    File(String),
}

impl Playback {
    /// Provider URLs become iframes; any other URL is played as a file.
    pub fn resolve(url: &str) -> Self {
        match VideoSource::parse(url) {
            Some(source) => Playback::Embed(source),
            None => Playback::File(VideoSource::direct(url)),
        }
    }
}
