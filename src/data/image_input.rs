use {
    base64::{Engine as _, engine::general_purpose},
    std::{
        path::Path,
        sync::{
            Arc,
            atomic::{AtomicU64, Ordering},
        },
    },
    thiserror::Error,
};

#[cfg(debug_assertions)]
use crate::config::DF;

#[cfg(not(target_arch = "wasm32"))]
use {
    eframe::egui::Context,
    std::{
        path::PathBuf,
        sync::mpsc::{self, Receiver},
        thread,
    },
};

const DATA_URI_PREFIX: &str = "data:";
const BASE64_MARKER: &str = ";base64,";

static NEXT_IMAGE_ID: AtomicU64 = AtomicU64::new(1);

#[derive(Debug, Error)]
pub enum ImageError {
    #[error("failed to read image file: {0}")]
    Io(#[from] std::io::Error),
    #[error("'{0}' is not an image")]
    NotAnImage(String),
    #[error("malformed image data URI")]
    MalformedDataUri,
}

/// A validated chart screenshot ready to be sent for analysis.
#[derive(Debug, Clone)]
pub struct ChartImage {
    id: u64,
    pub name: String,
    pub mime: String,
    pub bytes: Arc<[u8]>,
    data_uri: String,
}

impl ChartImage {
    /// Validate and encode an incoming file.
    ///
    /// `declared_mime` is what the browser reported; when it is absent or empty the type is
    /// derived from the file name. Anything that is not `image/*` (or is empty) is refused
    /// with `None` and no further side effects.
    pub fn accept(
        name: impl Into<String>,
        declared_mime: Option<&str>,
        bytes: impl Into<Arc<[u8]>>,
    ) -> Option<Self> {
        let name = name.into();
        let bytes = bytes.into();
        let mime = declared_mime
            .filter(|m| !m.trim().is_empty())
            .map(|m| m.trim().to_ascii_lowercase())
            .or_else(|| mime_from_extension(Path::new(&name)).map(str::to_owned));

        let Some(mime) = mime.filter(|m| is_image_mime(m)) else {
            #[cfg(debug_assertions)]
            if DF.log_image_input {
                log::info!("Ignoring non-image input '{}'", name);
            }
            return None;
        };
        if bytes.is_empty() {
            log::warn!("Ignoring empty image input '{}'", name);
            return None;
        }

        let data_uri = encode_data_uri(&mime, &bytes);
        #[cfg(debug_assertions)]
        if DF.log_image_input {
            log::info!("Accepted image '{}' ({}, {} bytes)", name, mime, bytes.len());
        }

        Some(Self {
            id: NEXT_IMAGE_ID.fetch_add(1, Ordering::Relaxed),
            name,
            mime,
            bytes,
            data_uri,
        })
    }

    /// Read a file from disk and validate it. Native only.
    #[cfg(not(target_arch = "wasm32"))]
    pub fn from_path(path: &Path) -> Result<Self, ImageError> {
        let display_name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());
        if mime_from_extension(path).is_none() {
            return Err(ImageError::NotAnImage(display_name));
        }
        let bytes = std::fs::read(path)?;
        Self::accept(display_name.clone(), None, bytes).ok_or(ImageError::NotAnImage(display_name))
    }

    pub fn data_uri(&self) -> &str {
        &self.data_uri
    }

    /// Stable per-image URI for egui's image loaders.
    pub fn texture_uri(&self) -> String {
        let ext = self.mime.strip_prefix("image/").unwrap_or("png");
        format!("bytes://chart-{}.{}", self.id, ext)
    }
}

pub fn is_image_mime(mime: &str) -> bool {
    mime.starts_with("image/")
}

pub fn mime_from_extension(path: &Path) -> Option<&'static str> {
    let ext = path.extension()?.to_str()?.to_ascii_lowercase();
    match ext.as_str() {
        "png" => Some("image/png"),
        "jpg" | "jpeg" => Some("image/jpeg"),
        "webp" => Some("image/webp"),
        "gif" => Some("image/gif"),
        "bmp" => Some("image/bmp"),
        _ => None,
    }
}

pub fn encode_data_uri(mime: &str, bytes: &[u8]) -> String {
    format!(
        "{}{}{}{}",
        DATA_URI_PREFIX,
        mime,
        BASE64_MARKER,
        general_purpose::STANDARD.encode(bytes)
    )
}

/// Split `data:image/<type>;base64,<payload>` into its MIME type and raw base64 payload.
pub fn split_data_uri(uri: &str) -> Result<(&str, &str), ImageError> {
    let rest = uri
        .strip_prefix(DATA_URI_PREFIX)
        .ok_or(ImageError::MalformedDataUri)?;
    let (mime, payload) = rest
        .split_once(BASE64_MARKER)
        .ok_or(ImageError::MalformedDataUri)?;
    if !is_image_mime(mime) || payload.is_empty() {
        return Err(ImageError::MalformedDataUri);
    }
    Ok((mime, payload))
}

/// Read and validate a file on a background thread; the render loop polls the receiver.
#[cfg(not(target_arch = "wasm32"))]
pub fn spawn_image_read(path: PathBuf, ctx: Context) -> Receiver<Result<ChartImage, ImageError>> {
    let (tx, rx) = mpsc::channel();
    thread::spawn(move || {
        let _ = tx.send(ChartImage::from_path(&path));
        ctx.request_repaint();
    });
    rx
}

#[cfg(test)]
mod tests {
    use super::*;

    const PNG_HEADER: &[u8] = &[0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A, 0, 0, 0, 13];

    #[test]
    fn accepts_declared_image_and_builds_data_uri() {
        let image =
            ChartImage::accept("chart.bin", Some("image/png"), PNG_HEADER.to_vec()).unwrap();

        assert!(image.data_uri().starts_with("data:image/png;base64,"));
        let (mime, payload) = split_data_uri(image.data_uri()).unwrap();
        assert_eq!(mime, "image/png");
        assert_eq!(general_purpose::STANDARD.decode(payload).unwrap(), PNG_HEADER);
    }

    #[test]
    fn rejects_non_image_types() {
        assert!(ChartImage::accept("notes.txt", Some("text/plain"), b"hello".to_vec()).is_none());
        assert!(ChartImage::accept("doc.pdf", Some("application/pdf"), b"%PDF".to_vec()).is_none());
        assert!(ChartImage::accept("archive.zip", None, b"PK".to_vec()).is_none());
    }

    #[test]
    fn missing_mime_is_derived_from_extension() {
        let image =
            ChartImage::accept("Screen Shot.JPG", Some(""), vec![0xFF, 0xD8, 0xFF]).unwrap();
        assert_eq!(image.mime, "image/jpeg");
        assert!(image.data_uri().starts_with("data:image/jpeg;base64,"));

        let image = ChartImage::accept("chart.webp", None, vec![1, 2, 3]).unwrap();
        assert_eq!(image.mime, "image/webp");
    }

    #[test]
    fn empty_files_are_ignored() {
        assert!(ChartImage::accept("chart.png", Some("image/png"), Vec::new()).is_none());
    }

    #[test]
    fn texture_uris_are_unique_per_image() {
        let a = ChartImage::accept("a.png", None, vec![1]).unwrap();
        let b = ChartImage::accept("a.png", None, vec![1]).unwrap();
        assert_ne!(a.texture_uri(), b.texture_uri());
        assert!(a.texture_uri().ends_with(".png"));
    }

    #[test]
    fn split_rejects_malformed_uris() {
        assert!(split_data_uri("image/png;base64,AAAA").is_err());
        assert!(split_data_uri("data:text/plain;base64,AAAA").is_err());
        assert!(split_data_uri("data:image/png,AAAA").is_err());
        assert!(split_data_uri("data:image/png;base64,").is_err());
        assert_eq!(
            split_data_uri("data:image/webp;base64,QUJD").unwrap(),
            ("image/webp", "QUJD")
        );
    }

    #[cfg(not(target_arch = "wasm32"))]
    #[test]
    fn from_path_reads_and_validates() {
        let dir = tempfile::tempdir().unwrap();
        let png = dir.path().join("chart.png");
        std::fs::write(&png, PNG_HEADER).unwrap();
        let image = ChartImage::from_path(&png).unwrap();
        assert_eq!(image.name, "chart.png");
        assert_eq!(&*image.bytes, PNG_HEADER);

        let txt = dir.path().join("notes.txt");
        std::fs::write(&txt, "hi").unwrap();
        assert!(matches!(ChartImage::from_path(&txt), Err(ImageError::NotAnImage(_))));

        let missing = dir.path().join("missing.png");
        assert!(matches!(ChartImage::from_path(&missing), Err(ImageError::Io(_))));
    }
}
