//! File naming, image saving, and format conversion.

use std::path::{Path, PathBuf};
use std::time::{SystemTime, UNIX_EPOCH};

use crate::error::AppError;
use crate::params::OutputFormat;

/// Generate an output filename from the (translated) prompt.
///
/// The first 50 characters of the prompt become a kebab-case stem,
/// followed by a unix timestamp and the format's extension.
#[must_use]
pub fn auto_filename(prompt: &str, format: OutputFormat) -> String {
    let stem = sanitize_for_filename(prompt, 50);
    let timestamp = SystemTime::now().duration_since(UNIX_EPOCH).unwrap_or_default().as_secs();
    format!("{stem}-{timestamp}.{}", format.extension())
}

/// Reduce a string to lowercase ASCII words joined by hyphens, at most
/// `max_len` bytes long. Falls back to `"image"` when nothing survives,
/// e.g. for an untranslated Devanagari prompt.
#[must_use]
pub fn sanitize_for_filename(input: &str, max_len: usize) -> String {
    let mut result = String::with_capacity(max_len);
    for word in input.split(|c: char| !c.is_ascii_alphanumeric()).filter(|w| !w.is_empty()) {
        if !result.is_empty() {
            result.push('-');
        }
        result.push_str(&word.to_ascii_lowercase());
        if result.len() >= max_len {
            result.truncate(max_len);
            break;
        }
    }

    let trimmed = result.trim_end_matches('-');
    if trimmed.is_empty() {
        "image".to_string()
    } else {
        trimmed.to_string()
    }
}

/// Resolve the output path: use explicit path or auto-generate.
#[must_use]
pub fn resolve_output_path(explicit: Option<&str>, prompt: &str, format: OutputFormat) -> PathBuf {
    match explicit {
        Some(p) => PathBuf::from(p),
        None => PathBuf::from(auto_filename(prompt, format)),
    }
}

/// Save raw image bytes to a file, converting if the source is not already
/// in the target format.
///
/// # Errors
///
/// Returns an error if the file cannot be written or format conversion fails.
pub fn save_image(
    data: &[u8],
    source_mime: &str,
    format: OutputFormat,
    output_path: &Path,
) -> Result<(), AppError> {
    if is_already(data, source_mime, format) {
        return std::fs::write(output_path, data).map_err(AppError::Io);
    }

    tracing::debug!(from = source_mime, to = %format, "converting image");
    let img = image::load_from_memory(data)
        .map_err(|e| AppError::ImageConversion(format!("Failed to decode image: {e}")))?;

    // JPEG has no alpha channel.
    let img = if format == OutputFormat::Jpeg { img.to_rgb8().into() } else { img };

    img.save_with_format(output_path, format.image_format())
        .map_err(|e| AppError::ImageConversion(format!("Failed to save as {format}: {e}")))
}

/// The declared MIME type is trusted first; the bytes are sniffed when the
/// server sent something generic.
fn is_already(data: &[u8], source_mime: &str, format: OutputFormat) -> bool {
    if format.matches_mime(source_mime) {
        return true;
    }
    image::guess_format(data).is_ok_and(|sniffed| sniffed == format.image_format())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sanitize_basic() {
        assert_eq!(sanitize_for_filename("The Sun", 50), "the-sun");
    }

    #[test]
    fn sanitize_special_chars() {
        assert_eq!(
            sanitize_for_filename("A kite!! flying over a river...", 50),
            "a-kite-flying-over-a-river"
        );
    }

    #[test]
    fn sanitize_truncates() {
        let long = "a".repeat(100);
        assert_eq!(sanitize_for_filename(&long, 10).len(), 10);
        assert_eq!(sanitize_for_filename("abcd efgh", 5), "abcd");
    }

    #[test]
    fn sanitize_devanagari_falls_back() {
        assert_eq!(sanitize_for_filename("सूरज", 50), "image");
        assert_eq!(sanitize_for_filename("", 50), "image");
    }

    #[test]
    fn sanitize_mixed_script_keeps_ascii() {
        assert_eq!(sanitize_for_filename("सूरज sun 2", 50), "sun-2");
    }

    #[test]
    fn auto_filename_format() {
        let name = auto_filename("sun", OutputFormat::Jpeg);
        assert!(name.starts_with("sun-"));
        assert_eq!(Path::new(&name).extension().unwrap(), "jpg");
    }

    #[test]
    fn resolve_explicit() {
        let path = resolve_output_path(Some("my-image.png"), "ignored", OutputFormat::Jpeg);
        assert_eq!(path, PathBuf::from("my-image.png"));
    }

    #[test]
    fn resolve_auto() {
        let path = resolve_output_path(None, "sun", OutputFormat::Png);
        assert!(path.to_str().unwrap().starts_with("sun-"));
        assert_eq!(path.extension().unwrap(), "png");
    }

    #[test]
    fn save_writes_matching_bytes_unchanged() {
        let dir = std::env::temp_dir().join("hindi_imagen_output_raw_test");
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("raw.jpg");
        let bytes = [0xFF, 0xD8, 0xFF, 0xE0, 1, 2, 3];

        save_image(&bytes, "image/jpeg", OutputFormat::Jpeg, &path).unwrap();
        assert_eq!(std::fs::read(&path).unwrap(), bytes);

        let _ = std::fs::remove_dir_all(&dir);
    }

    #[test]
    fn save_converts_png_to_jpeg() {
        let png = {
            let img = image::DynamicImage::new_rgba8(2, 2);
            let mut buf = std::io::Cursor::new(Vec::<u8>::new());
            img.write_to(&mut buf, image::ImageFormat::Png).unwrap();
            buf.into_inner()
        };
        let dir = std::env::temp_dir().join("hindi_imagen_output_convert_test");
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("converted.jpg");

        save_image(&png, "application/octet-stream", OutputFormat::Jpeg, &path).unwrap();
        let data = std::fs::read(&path).unwrap();
        assert_eq!(&data[..2], &[0xFF, 0xD8]);

        let _ = std::fs::remove_dir_all(&dir);
    }

    #[test]
    fn save_rejects_undecodable_bytes() {
        let path = std::env::temp_dir().join("hindi_imagen_output_bad.png");
        let err = save_image(b"not an image", "image/jpeg", OutputFormat::Png, &path).unwrap_err();
        assert!(matches!(err, AppError::ImageConversion(_)));
    }
}
