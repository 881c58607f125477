use crate::config::ApiConfig;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileKind {
    Avatars,
    Thumbnails,
    Misc,
}

impl FileKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            FileKind::Avatars => "avatars",
            FileKind::Thumbnails => "thumbnails",
            FileKind::Misc => "misc",
        }
    }
}

// Built for <img src>, never fetched through the client. Keys are storage
// paths and may contain '/', so they are not escaped.
pub fn file_url(config: &ApiConfig, kind: FileKind, key: &str) -> String {
    format!("{}/file/{}/{}", config.admin_prefix(), kind.as_str(), key)
}

pub fn thumbnail_url(config: &ApiConfig, key: Option<&str>) -> Option<String> {
    key.filter(|k| !k.is_empty())
        .map(|k| file_url(config, FileKind::Thumbnails, k))
}

pub fn avatar_url(config: &ApiConfig, key: Option<&str>) -> Option<String> {
    key.filter(|k| !k.is_empty())
        .map(|k| file_url(config, FileKind::Avatars, k))
}
