//! PDF serialization of the page model.
//!
//! Pages are written with the standard Helvetica fonts in WinAnsi encoding.
//! Image strips become individual XObjects; translucent operations use an
//! ExtGState per distinct opacity. All streams are Flate compressed.

use super::normalize::encode_win_ansi;
use crate::error::{Error, Result};
use crate::model::{Color, Document, DrawOp, Font, ImageId, Page};
use flate2::write::ZlibEncoder;
use flate2::Compression;
use lopdf::content::{Content, Operation};
use lopdf::{dictionary, Dictionary, Object, ObjectId, Stream, StringFormat};
use std::collections::{BTreeMap, HashMap};
use std::io::Write;

const PDF_VERSION: &str = "1.5";

/// Serialize `doc` as PDF into `writer`.
pub fn write_document<W: Write>(doc: &Document, writer: &mut W) -> Result<()> {
    let mut pdf = lopdf::Document::with_version(PDF_VERSION);
    let pages_id = pdf.new_object_id();

    let fonts = dictionary! {
        Font::Regular.resource_name() => pdf.add_object(font_dict(Font::Regular)),
        Font::Bold.resource_name() => pdf.add_object(font_dict(Font::Bold)),
    };

    let mut strips: HashMap<(ImageId, u32, u32), ObjectId> = HashMap::new();
    let mut kids: Vec<Object> = Vec::with_capacity(doc.pages.len());

    for page in &doc.pages {
        let mut painter = PagePainter::new(page);
        for op in page.all_ops() {
            painter.paint(op, doc, &mut pdf, &mut strips)?;
        }

        let content = Content {
            operations: painter.operations,
        }
        .encode()?;
        let content_id = pdf.add_object(compressed_stream(Dictionary::new(), &content)?);

        let mut resources = dictionary! {
            "Font" => fonts.clone(),
        };
        if !painter.xobjects.is_empty() {
            let mut xobjects = Dictionary::new();
            for (name, id) in painter.xobjects {
                xobjects.set(name, id);
            }
            resources.set("XObject", xobjects);
        }
        if !painter.states.is_empty() {
            let mut states = Dictionary::new();
            for (milli, name) in painter.states {
                let alpha = milli as f32 / 1000.0;
                states.set(
                    name,
                    dictionary! {
                        "Type" => "ExtGState",
                        "ca" => alpha,
                        "CA" => alpha,
                    },
                );
            }
            resources.set("ExtGState", states);
        }

        let page_id = pdf.add_object(dictionary! {
            "Type" => "Page",
            "Parent" => pages_id,
            "MediaBox" => vec![Object::Integer(0), Object::Integer(0), page.width.into(), page.height.into()],
            "Contents" => content_id,
            "Resources" => resources,
        });
        kids.push(page_id.into());
    }

    let count = kids.len() as i64;
    pdf.objects.insert(
        pages_id,
        Object::Dictionary(dictionary! {
            "Type" => "Pages",
            "Kids" => kids,
            "Count" => count,
        }),
    );

    let catalog_id = pdf.add_object(dictionary! {
        "Type" => "Catalog",
        "Pages" => pages_id,
    });
    pdf.trailer.set("Root", catalog_id);

    let info_id = pdf.add_object(info_dict(doc));
    pdf.trailer.set("Info", info_id);

    pdf.save_to(writer)?;
    log::debug!("Wrote PDF with {} pages, {} image strips", count, strips.len());
    Ok(())
}

fn font_dict(font: Font) -> Dictionary {
    dictionary! {
        "Type" => "Font",
        "Subtype" => "Type1",
        "BaseFont" => font.base_font(),
        "Encoding" => "WinAnsiEncoding",
    }
}

fn info_dict(doc: &Document) -> Dictionary {
    let meta = &doc.metadata;
    let mut info = Dictionary::new();
    let fields = [
        ("Title", &meta.title),
        ("Subject", &meta.subject),
        ("Author", &meta.author),
        ("Creator", &meta.creator),
        ("Producer", &meta.producer),
    ];
    for (key, value) in fields {
        if let Some(value) = value {
            info.set(key, Object::String(encode_win_ansi(value), StringFormat::Literal));
        }
    }
    if let Some(created) = meta.created {
        let stamp = created.format("D:%Y%m%d%H%M%SZ").to_string();
        info.set("CreationDate", Object::string_literal(stamp.clone()));
        info.set("ModDate", Object::string_literal(stamp));
    }
    info
}

fn deflate(data: &[u8]) -> Result<Vec<u8>> {
    let mut encoder = ZlibEncoder::new(Vec::new(), Compression::default());
    encoder.write_all(data)?;
    Ok(encoder.finish()?)
}

fn compressed_stream(mut dict: Dictionary, data: &[u8]) -> Result<Stream> {
    dict.set("Filter", "FlateDecode");
    Ok(Stream::new(dict, deflate(data)?))
}

/// Accumulates the content stream and resources of one page.
struct PagePainter {
    height: f32,
    operations: Vec<Operation>,
    xobjects: BTreeMap<String, ObjectId>,
    states: BTreeMap<u32, String>,
}

impl PagePainter {
    fn new(page: &Page) -> Self {
        Self {
            height: page.height,
            operations: Vec::new(),
            xobjects: BTreeMap::new(),
            states: BTreeMap::new(),
        }
    }

    fn op(&mut self, operator: &str, operands: Vec<Object>) {
        self.operations.push(Operation::new(operator, operands));
    }

    /// Select an ExtGState for `opacity` unless it is opaque.
    fn set_opacity(&mut self, opacity: f32) {
        let milli = (opacity.clamp(0.0, 1.0) * 1000.0).round() as u32;
        if milli >= 1000 {
            return;
        }
        let next = self.states.len();
        let name = self
            .states
            .entry(milli)
            .or_insert_with(|| format!("GS{}", next))
            .clone();
        self.op("gs", vec![Object::Name(name.into_bytes())]);
    }

    fn paint(
        &mut self,
        op: &DrawOp,
        doc: &Document,
        pdf: &mut lopdf::Document,
        strips: &mut HashMap<(ImageId, u32, u32), ObjectId>,
    ) -> Result<()> {
        match op {
            DrawOp::Text {
                x,
                y,
                text,
                font,
                size,
                color,
                angle,
                opacity,
            } => {
                self.op("q", vec![]);
                self.set_opacity(*opacity);
                self.op("rg", rgb(color));
                self.op("BT", vec![]);
                self.op(
                    "Tf",
                    vec![Object::Name(font.resource_name().as_bytes().to_vec()), (*size).into()],
                );
                let pdf_y = self.height - y;
                if angle.abs() > f32::EPSILON {
                    let (sin, cos) = angle.to_radians().sin_cos();
                    self.op(
                        "Tm",
                        vec![
                            cos.into(),
                            sin.into(),
                            (-sin).into(),
                            cos.into(),
                            (*x).into(),
                            pdf_y.into(),
                        ],
                    );
                } else {
                    self.op("Td", vec![(*x).into(), pdf_y.into()]);
                }
                self.op(
                    "Tj",
                    vec![Object::String(encode_win_ansi(text), StringFormat::Literal)],
                );
                self.op("ET", vec![]);
                self.op("Q", vec![]);
            }
            DrawOp::Rule {
                x1,
                y1,
                x2,
                y2,
                color,
                width,
            } => {
                self.op("q", vec![]);
                self.op("RG", rgb(color));
                self.op("w", vec![(*width).into()]);
                self.op("m", vec![(*x1).into(), (self.height - y1).into()]);
                self.op("l", vec![(*x2).into(), (self.height - y2).into()]);
                self.op("S", vec![]);
                self.op("Q", vec![]);
            }
            DrawOp::Image {
                x,
                y,
                width,
                height,
                image,
                row_start,
                row_end,
                opacity,
            } => {
                let key = (*image, *row_start, *row_end);
                let id = match strips.get(&key) {
                    Some(id) => *id,
                    None => {
                        let stream = strip_stream(doc, *image, *row_start, *row_end)?;
                        let id = pdf.add_object(stream);
                        strips.insert(key, id);
                        id
                    }
                };
                let name = format!("Im{}", self.xobjects.len());
                let name = match self.xobjects.iter().find(|(_, v)| **v == id) {
                    Some((existing, _)) => existing.clone(),
                    None => {
                        self.xobjects.insert(name.clone(), id);
                        name
                    }
                };

                let bottom = self.height - (y + height);
                self.op("q", vec![]);
                self.set_opacity(*opacity);
                self.op(
                    "cm",
                    vec![
                        (*width).into(),
                        Object::Integer(0),
                        Object::Integer(0),
                        (*height).into(),
                        (*x).into(),
                        bottom.into(),
                    ],
                );
                self.op("Do", vec![Object::Name(name.into_bytes())]);
                self.op("Q", vec![]);
            }
        }
        Ok(())
    }
}

fn rgb(color: &Color) -> Vec<Object> {
    vec![color.r.into(), color.g.into(), color.b.into()]
}

fn strip_stream(doc: &Document, id: ImageId, row_start: u32, row_end: u32) -> Result<Stream> {
    let image = doc
        .image(id)
        .ok_or_else(|| Error::Pdf(format!("unknown image {}", id.0)))?;
    let rows = image.rows(row_start, row_end).ok_or_else(|| {
        Error::Pdf(format!(
            "image {} has {} bytes, too few for {}x{}",
            id.0,
            image.pixels.len(),
            image.width,
            image.height
        ))
    })?;
    let height = row_end.min(image.height).saturating_sub(row_start);
    if rows.is_empty() || height == 0 {
        return Err(Error::Pdf(format!(
            "empty strip {}..{} of image {}",
            row_start, row_end, id.0
        )));
    }
    compressed_stream(
        dictionary! {
            "Type" => "XObject",
            "Subtype" => "Image",
            "Width" => image.width as i64,
            "Height" => height as i64,
            "ColorSpace" => "DeviceRGB",
            "BitsPerComponent" => 8,
        },
        rows,
    )
}
