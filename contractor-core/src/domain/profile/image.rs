//! Storage layout and URL handling for profile images.

use contractor_model::UserId;
use url::Url;

/// Default folder (and bucket) profile images are written to.
pub const DEFAULT_IMAGE_PREFIX: &str = "profile-images";

/// Query parameter carrying the cache-busting stamp.
pub const CACHE_BUST_PARAM: &str = "t";

/// A file picked by the user for upload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectedImage {
    pub file_name: String,
    pub bytes: Vec<u8>,
}

impl SelectedImage {
    pub fn new(file_name: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            file_name: file_name.into(),
            bytes,
        }
    }

    /// Text after the last `.` of the file name, kept as given.
    ///
    /// A name without a dot yields the whole name.
    pub fn extension(&self) -> &str {
        self.file_name
            .rsplit_once('.')
            .map_or(self.file_name.as_str(), |(_, ext)| ext)
    }
}

/// Path an image is stored under.
///
/// Only the user id and the extension contribute, so a user re-uploading
/// with the same extension always overwrites the same blob.
pub fn image_storage_path(
    prefix: &str,
    user_id: &UserId,
    image: &SelectedImage,
) -> String {
    format!("{prefix}/{user_id}.{}", image.extension())
}

/// Append a `/`-separated storage path to `base` as percent-encoded path
/// segments, so characters such as `#`, `?` or spaces in a user id stay
/// part of the path. Returns `None` for a base that cannot be a base.
pub fn public_url_for(base: &Url, path: &str) -> Option<Url> {
    let mut url = base.clone();
    url.path_segments_mut()
        .ok()?
        .pop_if_empty()
        .extend(path.split('/'));
    Some(url)
}

/// Replace any previous cache-busting stamp on `url` with `stamp`.
pub fn with_cache_buster(mut url: Url, stamp: i64) -> Url {
    let retained: Vec<(String, String)> = url
        .query_pairs()
        .filter(|(key, _)| *key != CACHE_BUST_PARAM)
        .map(|(key, value)| (key.into_owned(), value.into_owned()))
        .collect();

    {
        let mut pairs = url.query_pairs_mut();
        pairs.clear();
        for (key, value) in &retained {
            pairs.append_pair(key, value);
        }
        pairs.append_pair(CACHE_BUST_PARAM, &stamp.to_string());
    }
    url
}

/// Next cache-busting stamp: the current time in milliseconds, bumped past
/// the previous stamp when the clock has not advanced.
pub fn next_cache_stamp(previous: Option<i64>, now_millis: i64) -> i64 {
    match previous {
        Some(last) if now_millis <= last => last + 1,
        _ => now_millis,
    }
}
