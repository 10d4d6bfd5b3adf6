//! Batch image resizing.
//!
//! Resized copies are written next to (or under a chosen output directory),
//! never over the inputs. One [`ResizeSpec`] describes the target geometry;
//! the enum makes the mutually exclusive sizing options unrepresentable in
//! combination.
use image::codecs::jpeg::JpegEncoder;
use image::imageops::FilterType;
use image::{DynamicImage, ImageFormat};
use std::fs::{self, File};
use std::io::BufWriter;
use std::path::{Path, PathBuf};

/// Extensions the directory scan picks up.
pub const SUPPORTED_EXTENSIONS: &[&str] = &["jpg", "jpeg", "png", "webp", "bmp", "tiff", "gif"];

/// Errors surfaced while resizing.
#[derive(Debug)]
pub enum ResizeError {
    /// The input file or directory does not exist.
    InputNotFound(PathBuf),
    /// The output directory could not be created.
    CreateDir {
        path: PathBuf,
        source: std::io::Error,
    },
    /// Decoding or encoding failed.
    Image {
        path: PathBuf,
        source: image::ImageError,
    },
    /// Filesystem access failed.
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    /// The requested output format name is not a known image format.
    UnknownFormat(String),
}

impl std::fmt::Display for ResizeError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InputNotFound(path) => write!(f, "input not found: {}", path.display()),
            Self::CreateDir { path, source } => {
                write!(
                    f,
                    "cannot create output directory {}: {}",
                    path.display(),
                    source
                )
            }
            Self::Image { path, source } => {
                write!(f, "cannot process {}: {}", path.display(), source)
            }
            Self::Io { path, source } => {
                write!(f, "cannot access {}: {}", path.display(), source)
            }
            Self::UnknownFormat(name) => write!(f, "unknown output format: {}", name),
        }
    }
}

impl std::error::Error for ResizeError {}

/// Target geometry for a resize. Exactly one sizing rule applies.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ResizeSpec {
    /// Exact width and height in pixels; the aspect ratio may change.
    Exact(u32, u32),
    /// Fixed width; height follows the aspect ratio.
    Width(u32),
    /// Fixed height; width follows the aspect ratio.
    Height(u32),
    /// Multiply both dimensions by this factor.
    Scale(f32),
}

impl ResizeSpec {
    /// Computes the output dimensions for an image of `width` x `height`.
    /// Dimensions never drop below one pixel.
    pub fn target_dimensions(&self, width: u32, height: u32) -> (u32, u32) {
        let (w, h) = match *self {
            ResizeSpec::Exact(w, h) => (w, h),
            ResizeSpec::Width(w) => {
                let ratio = w as f64 / width as f64;
                (w, (height as f64 * ratio) as u32)
            }
            ResizeSpec::Height(h) => {
                let ratio = h as f64 / height as f64;
                ((width as f64 * ratio) as u32, h)
            }
            ResizeSpec::Scale(factor) => (
                (width as f64 * factor as f64) as u32,
                (height as f64 * factor as f64) as u32,
            ),
        };
        (w.max(1), h.max(1))
    }
}

/// The result of resizing one image.
#[derive(Debug)]
pub struct ResizedImage {
    pub output_path: PathBuf,
    pub original_dimensions: (u32, u32),
    pub new_dimensions: (u32, u32),
}

/// Resizes images into `<stem>_resized` copies under an output directory.
pub struct ImageResizer {
    output_dir: Option<PathBuf>,
    output_format: Option<ImageFormat>,
    quality: u8,
}

impl ImageResizer {
    /// `output_dir` of `None` means a `resized/` directory beside each input.
    /// `output_format` of `None` keeps each input's own format.
    pub fn new(output_dir: Option<PathBuf>, output_format: Option<ImageFormat>) -> Self {
        Self {
            output_dir,
            output_format,
            quality: 85,
        }
    }

    /// Quality for JPEG output, 1-100. Other formats encode losslessly and
    /// ignore this setting (WebP in particular: the encoder is lossless-only).
    pub fn with_quality(mut self, quality: u8) -> Self {
        self.quality = quality;
        self
    }

    /// Parses a user-supplied format name such as `jpeg` or `PNG`.
    pub fn parse_format(name: &str) -> Result<ImageFormat, ResizeError> {
        ImageFormat::from_extension(name.to_ascii_lowercase())
            .ok_or_else(|| ResizeError::UnknownFormat(name.to_string()))
    }

    /// Collects supported image files under `directory`, sorted by path.
    pub fn collect_images(directory: &Path, recursive: bool) -> Result<Vec<PathBuf>, ResizeError> {
        if !directory.exists() {
            return Err(ResizeError::InputNotFound(directory.to_path_buf()));
        }
        let mut found = Vec::new();
        collect_into(directory, recursive, &mut found)?;
        found.sort();
        Ok(found)
    }

    /// Resizes one image according to `spec` and writes the copy. The input
    /// is never modified.
    pub fn resize_file(&self, input: &Path, spec: ResizeSpec) -> Result<ResizedImage, ResizeError> {
        if !input.exists() {
            return Err(ResizeError::InputNotFound(input.to_path_buf()));
        }

        let img = image::open(input).map_err(|e| ResizeError::Image {
            path: input.to_path_buf(),
            source: e,
        })?;
        let original = (img.width(), img.height());
        let (new_w, new_h) = spec.target_dimensions(original.0, original.1);
        let resized = img.resize_exact(new_w, new_h, FilterType::Lanczos3);

        let format = match self.output_format {
            Some(format) => format,
            None => ImageFormat::from_path(input).unwrap_or(ImageFormat::Jpeg),
        };

        let output_dir = self.output_dir_for(input)?;
        let output_path = output_path_for(input, &output_dir, format, self.output_format.is_some());
        self.write(&resized, &output_path, format)?;

        Ok(ResizedImage {
            output_path,
            original_dimensions: original,
            new_dimensions: (new_w, new_h),
        })
    }

    fn output_dir_for(&self, input: &Path) -> Result<PathBuf, ResizeError> {
        let dir = match &self.output_dir {
            Some(dir) => dir.clone(),
            None => input
                .parent()
                .unwrap_or_else(|| Path::new("."))
                .join("resized"),
        };
        fs::create_dir_all(&dir).map_err(|e| ResizeError::CreateDir {
            path: dir.clone(),
            source: e,
        })?;
        Ok(dir)
    }

    fn write(
        &self,
        img: &DynamicImage,
        output_path: &Path,
        format: ImageFormat,
    ) -> Result<(), ResizeError> {
        let image_err = |e| ResizeError::Image {
            path: output_path.to_path_buf(),
            source: e,
        };

        // JPEG has no alpha channel; flatten when needed.
        let flattened;
        let img = if format == ImageFormat::Jpeg && img.color().has_alpha() {
            flattened = DynamicImage::ImageRgb8(img.to_rgb8());
            &flattened
        } else {
            img
        };

        let file = File::create(output_path).map_err(|e| ResizeError::Io {
            path: output_path.to_path_buf(),
            source: e,
        })?;
        let mut writer = BufWriter::new(file);

        match format {
            ImageFormat::Jpeg => {
                let encoder = JpegEncoder::new_with_quality(&mut writer, self.quality);
                img.write_with_encoder(encoder).map_err(image_err)
            }
            _ => img.write_to(&mut writer, format).map_err(image_err),
        }
    }
}

fn is_supported(path: &Path) -> bool {
    path.extension()
        .map(|e| e.to_string_lossy().to_lowercase())
        .is_some_and(|ext| SUPPORTED_EXTENSIONS.contains(&ext.as_str()))
}

fn collect_into(dir: &Path, recursive: bool, found: &mut Vec<PathBuf>) -> Result<(), ResizeError> {
    let entries = fs::read_dir(dir).map_err(|e| ResizeError::Io {
        path: dir.to_path_buf(),
        source: e,
    })?;
    for entry in entries.flatten() {
        let path = entry.path();
        if path.is_dir() {
            if recursive {
                collect_into(&path, recursive, found)?;
            }
        } else if is_supported(&path) {
            found.push(path);
        }
    }
    Ok(())
}

/// `photo.png` becomes `photo_resized.png`; a format override swaps the
/// extension accordingly.
fn output_path_for(
    input: &Path,
    output_dir: &Path,
    format: ImageFormat,
    format_overridden: bool,
) -> PathBuf {
    let stem = input
        .file_stem()
        .map(|s| s.to_string_lossy().to_string())
        .unwrap_or_else(|| "image".to_string());
    let ext = if format_overridden {
        format.extensions_str().first().copied().unwrap_or("img")
    } else {
        // Keep the input's own extension spelling.
        return output_dir.join(format!(
            "{}_resized{}",
            stem,
            input
                .extension()
                .map(|e| format!(".{}", e.to_string_lossy().to_lowercase()))
                .unwrap_or_default()
        ));
    };
    output_dir.join(format!("{}_resized.{}", stem, ext))
}
