//! Image-only PDF reconstruction
//!
//! Every slide image becomes one page whose MediaBox (in points) equals
//! the image size in pixels, with the image drawn over the whole page as
//! a Flate-compressed DeviceRGB XObject.

use flate2::{write::ZlibEncoder, Compression};
use lopdf::content::{Content, Operation};
use lopdf::{dictionary, Document, Object, ObjectId, Stream};
use std::io::Write;
use std::path::{Path, PathBuf};

use crate::error::{ConversionError, Result};

const ARTIFACT: &str = "PDF";
const IMAGE_NAME: &str = "Im0";

/// Writes a PDF with one image per page
#[derive(Debug, Clone, Default)]
pub struct PdfWriter;

impl PdfWriter {
    pub fn new() -> Self {
        Self
    }

    /// Write `images` (in order) to `out_path`, returning the page count
    ///
    /// # Errors
    ///
    /// `AssemblyError` when `images` is empty or the document cannot be
    /// saved, `ImageLoadError` when an image cannot be decoded.
    pub fn write(&self, images: &[PathBuf], out_path: &Path) -> Result<usize> {
        if images.is_empty() {
            return Err(ConversionError::assembly(ARTIFACT, "no images to place"));
        }

        let mut doc = Document::with_version("1.5");
        let pages_id = doc.new_object_id();
        let mut kids: Vec<Object> = Vec::with_capacity(images.len());

        for path in images {
            let page_id = add_image_page(&mut doc, pages_id, path)?;
            kids.push(page_id.into());
        }

        let count = kids.len();
        let pages = dictionary! {
            "Type" => "Pages",
            "Kids" => kids,
            "Count" => count as i64,
        };
        doc.objects.insert(pages_id, Object::Dictionary(pages));

        let catalog_id = doc.add_object(dictionary! {
            "Type" => "Catalog",
            "Pages" => pages_id,
        });
        doc.trailer.set("Root", catalog_id);

        doc.save(out_path).map_err(|e| {
            ConversionError::assembly(ARTIFACT, format!("{}: {}", out_path.display(), e))
        })?;

        log::info!("Wrote {} pages to {}", count, out_path.display());
        Ok(count)
    }
}

fn add_image_page(doc: &mut Document, pages_id: ObjectId, path: &Path) -> Result<ObjectId> {
    let rgb = image::open(path)
        .map_err(|e| {
            ConversionError::image_load(format!("Failed to decode image: {}", path.display()), e)
        })?
        .to_rgb8();
    let (width, height) = rgb.dimensions();
    let (width, height) = (width as i64, height as i64);

    let compress_error = |e: std::io::Error| {
        ConversionError::assembly(ARTIFACT, format!("compressing {}: {}", path.display(), e))
    };
    let mut encoder = ZlibEncoder::new(Vec::new(), Compression::default());
    encoder.write_all(rgb.as_raw()).map_err(compress_error)?;
    let compressed = encoder.finish().map_err(compress_error)?;

    let image_id = doc.add_object(Stream::new(
        dictionary! {
            "Type" => "XObject",
            "Subtype" => "Image",
            "Width" => width,
            "Height" => height,
            "ColorSpace" => "DeviceRGB",
            "BitsPerComponent" => 8i64,
            "Filter" => "FlateDecode",
        },
        compressed,
    ));

    // Scale the unit image square to the full page
    let content = Content {
        operations: vec![
            Operation::new("q", vec![]),
            Operation::new(
                "cm",
                vec![
                    width.into(),
                    0i64.into(),
                    0i64.into(),
                    height.into(),
                    0i64.into(),
                    0i64.into(),
                ],
            ),
            Operation::new("Do", vec![Object::Name(IMAGE_NAME.as_bytes().to_vec())]),
            Operation::new("Q", vec![]),
        ],
    };
    let encoded = content
        .encode()
        .map_err(|e| ConversionError::assembly(ARTIFACT, e.to_string()))?;
    let content_id = doc.add_object(Stream::new(dictionary! {}, encoded));

    Ok(doc.add_object(dictionary! {
        "Type" => "Page",
        "Parent" => pages_id,
        "MediaBox" => vec![
            Object::Integer(0),
            Object::Integer(0),
            Object::Integer(width),
            Object::Integer(height),
        ],
        "Contents" => content_id,
        "Resources" => dictionary! {
            "XObject" => dictionary! {
                IMAGE_NAME => image_id,
            },
        },
    }))
}
