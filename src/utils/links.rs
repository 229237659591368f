use regex::Regex;
use std::sync::LazyLock;

static DRIVE_FILE_ID: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"/file/d/([a-zA-Z0-9_-]+)/").expect("drive file pattern is valid")
});

/// Rewrites a Google Drive share link (`.../file/d/<id>/view...`) into a
/// direct download link. Anything else is returned unchanged.
pub fn drive_download_url(share_url: &str) -> String {
    match DRIVE_FILE_ID.captures(share_url) {
        Some(caps) => format!("https://drive.google.com/uc?export=download&id={}", &caps[1]),
        None => share_url.to_string(),
    }
}
