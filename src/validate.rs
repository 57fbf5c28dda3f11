use image::ImageReader;
use std::path::Path;
use tracing::debug;

/// True if the file decodes to an image with at least one pixel.
///
/// The format is guessed from the file contents, not its extension, so a PNG
/// served under a `.jpg` name still counts as decodable.
pub fn is_decodable(path: &Path) -> bool {
    let reader = match ImageReader::open(path).and_then(|r| r.with_guessed_format()) {
        Ok(reader) => reader,
        Err(err) => {
            debug!(path = %path.display(), error = %err, "cannot open image");
            return false;
        }
    };

    match reader.decode() {
        Ok(img) => img.width() > 0 && img.height() > 0,
        Err(err) => {
            debug!(path = %path.display(), error = %err, "decode failed");
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{ImageFormat, RgbImage};
    use std::fs;
    use std::io::Cursor;

    fn encode(format: ImageFormat) -> Vec<u8> {
        let img = RgbImage::from_pixel(4, 3, image::Rgb([200, 10, 10]));
        let mut buf = Cursor::new(Vec::new());
        img.write_to(&mut buf, format).unwrap();
        buf.into_inner()
    }

    #[test]
    fn png_and_jpeg_are_decodable() {
        let dir = tempfile::tempdir().unwrap();
        for (name, format) in [("a.png", ImageFormat::Png), ("b.jpg", ImageFormat::Jpeg)] {
            let path = dir.path().join(name);
            fs::write(&path, encode(format)).unwrap();
            assert!(is_decodable(&path), "{name}");
        }
    }

    #[test]
    fn format_is_sniffed_from_content() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("mislabelled.jpg");
        fs::write(&path, encode(ImageFormat::Png)).unwrap();
        assert!(is_decodable(&path));
    }

    #[test]
    fn html_is_not_decodable() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("404.png");
        fs::write(&path, b"<html><body>Not Found</body></html>").unwrap();
        assert!(!is_decodable(&path));
    }

    #[test]
    fn truncated_and_empty_files_are_not_decodable() {
        let dir = tempfile::tempdir().unwrap();
        let truncated = dir.path().join("t.png");
        let bytes = encode(ImageFormat::Png);
        fs::write(&truncated, &bytes[..bytes.len() / 2]).unwrap();
        assert!(!is_decodable(&truncated));

        let empty = dir.path().join("e.png");
        fs::write(&empty, b"").unwrap();
        assert!(!is_decodable(&empty));
    }

    #[test]
    fn missing_file_is_not_decodable() {
        let dir = tempfile::tempdir().unwrap();
        assert!(!is_decodable(&dir.path().join("nope.png")));
    }

    #[test]
    fn verdict_is_stable_across_calls() {
        let dir = tempfile::tempdir().unwrap();
        let good = dir.path().join("g.png");
        let bad = dir.path().join("b.png");
        fs::write(&good, encode(ImageFormat::Png)).unwrap();
        fs::write(&bad, b"garbage").unwrap();

        assert_eq!(is_decodable(&good), is_decodable(&good));
        assert_eq!(is_decodable(&bad), is_decodable(&bad));
    }
}
