//! Object naming and URL rules.
//!
//! Every upload is stored under a fresh random key that keeps the client's file
//! extension, so two uploads of `clip.mp4` never collide.

use uuid::Uuid;

/// Host suffix used when no public URL base is configured.
pub const R2_STORAGE_HOST: &str = "r2.cloudflarestorage.com";

/// Extension of the final path segment, including the leading dot.
///
/// Case is preserved. Returns `""` when the segment has no dot.
pub fn file_extension(filename: &str) -> &str {
    let segment_start = filename.rfind(['/', '\\']).map(|i| i + 1).unwrap_or(0);
    let segment = &filename[segment_start..];
    match segment.rfind('.') {
        Some(dot) => &segment[dot..],
        None => "",
    }
}

/// New object key for an upload: a v4 UUID followed by the original extension.
pub fn generate_object_name(original_filename: &str) -> String {
    format!("{}{}", Uuid::new_v4(), file_extension(original_filename))
}

/// Access URL recorded for an object.
///
/// Uses `{public_url}/{object_name}` when a non-empty public base is configured,
/// otherwise `https://{bucket}.r2.cloudflarestorage.com/{object_name}`.
pub fn build_object_url(public_url: Option<&str>, bucket: &str, object_name: &str) -> String {
    match public_url.map(|u| u.trim_end_matches('/')).filter(|u| !u.is_empty()) {
        Some(base) => format!("{}/{}", base, object_name),
        None => format!("https://{}.{}/{}", bucket, R2_STORAGE_HOST, object_name),
    }
}
