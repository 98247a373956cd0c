use crate::types::{BatchItem, IngestOptions, Upload};
use crate::{AssetError, Result};
use image::codecs::jpeg::JpegEncoder;
use image::imageops::FilterType;
use image::DynamicImage;
use lander_parts::asset_ref::FALLBACK_MIME;
use lander_parts::AssetRef;

const OUTPUT_MIME: &str = "image/jpeg";

/// Validate and process one uploaded image.
///
/// Only a size violation is an error. Decode or encode failures fall back to
/// the original bytes.
pub fn ingest(upload: &Upload, options: &IngestOptions) -> Result<AssetRef> {
    let size = upload.effective_size();
    if size > options.max_bytes {
        tracing::warn!(
            "rejecting '{}': {} bytes exceeds {} byte limit",
            upload.name,
            size,
            options.max_bytes
        );
        return Err(AssetError::TooLarge {
            name: upload.name.clone(),
            size,
            limit: options.max_bytes,
        });
    }

    if upload.bytes.is_empty() {
        return Err(AssetError::Empty(upload.name.clone()));
    }

    match reencode(&upload.bytes, options) {
        Ok(bytes) => {
            tracing::debug!(
                "ingested '{}': {} -> {} bytes",
                upload.name,
                upload.bytes.len(),
                bytes.len()
            );
            Ok(AssetRef::new(OUTPUT_MIME, bytes))
        }
        Err(e) => {
            tracing::warn!("passing '{}' through unprocessed: {}", upload.name, e);
            Ok(AssetRef::new(guess_mime(&upload.bytes), upload.bytes.clone()))
        }
    }
}

/// Process every file of a batch independently, preserving batch order
pub fn ingest_batch(uploads: &[Upload], options: &IngestOptions) -> Vec<BatchItem> {
    uploads
        .iter()
        .map(|upload| BatchItem {
            name: upload.name.clone(),
            result: ingest(upload, options),
        })
        .collect()
}

/// Pixel dimensions of an asset, if it decodes as an image
pub fn dimensions(asset: &AssetRef) -> Option<(u32, u32)> {
    image::load_from_memory(asset.bytes())
        .ok()
        .map(|img| (img.width(), img.height()))
}

fn reencode(bytes: &[u8], options: &IngestOptions) -> image::ImageResult<Vec<u8>> {
    let img = image::load_from_memory(bytes)?;
    let img = fit_within(img, options.max_width, options.max_height);

    let mut out = Vec::new();
    {
        let mut encoder = JpegEncoder::new_with_quality(&mut out, options.quality.clamp(1, 100));
        encoder.encode_image(&img.to_rgb8())?;
    }
    Ok(out)
}

/// Scale down uniformly so both sides fit the bounds; never scales up
fn fit_within(img: DynamicImage, max_width: u32, max_height: u32) -> DynamicImage {
    if img.width() <= max_width && img.height() <= max_height {
        return img;
    }
    img.resize(max_width, max_height, FilterType::Triangle)
}

fn guess_mime(bytes: &[u8]) -> &'static str {
    image::guess_format(bytes)
        .map(|format| format.to_mime_type())
        .unwrap_or(FALLBACK_MIME)
}
