//! Image XObject creation
//!
//! Composed sheets are JPEG-encoded once and embedded as DCTDecode image
//! XObjects, so the encoded bytes can be held between composition and
//! document assembly instead of full rasters.

use crate::types::Result;
use image::RgbImage;
use image::codecs::jpeg::JpegEncoder;
use lopdf::{Dictionary, Document, Object, ObjectId, Stream};

/// A composed sheet side, JPEG-encoded
#[derive(Debug, Clone)]
pub struct EncodedSheet {
    pub width: u32,
    pub height: u32,
    pub jpeg: Vec<u8>,
}

impl EncodedSheet {
    /// Encode a composed sheet at the given JPEG quality (1-100)
    pub fn encode(image: &RgbImage, quality: u8) -> Result<Self> {
        Ok(Self {
            width: image.width(),
            height: image.height(),
            jpeg: encode_jpeg(image, quality)?,
        })
    }
}

/// Encode an RGB raster as baseline JPEG
pub fn encode_jpeg(image: &RgbImage, quality: u8) -> Result<Vec<u8>> {
    let mut bytes = Vec::new();
    let mut encoder = JpegEncoder::new_with_quality(&mut bytes, quality);
    encoder.encode_image(image)?;
    Ok(bytes)
}

/// Add a sheet to the output document as an image XObject
pub fn create_image_xobject(output: &mut Document, sheet: &EncodedSheet) -> ObjectId {
    let mut dict = Dictionary::new();
    dict.set("Type", Object::Name(b"XObject".to_vec()));
    dict.set("Subtype", Object::Name(b"Image".to_vec()));
    dict.set("Width", Object::Integer(i64::from(sheet.width)));
    dict.set("Height", Object::Integer(i64::from(sheet.height)));
    dict.set("ColorSpace", Object::Name(b"DeviceRGB".to_vec()));
    dict.set("BitsPerComponent", Object::Integer(8));
    dict.set("Filter", Object::Name(b"DCTDecode".to_vec()));

    // Already compressed; keep lopdf from deflating it again
    let mut stream = Stream::new(dict, sheet.jpeg.clone());
    stream.allows_compression = false;
    output.add_object(stream)
}
