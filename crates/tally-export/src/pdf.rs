use std::io::{BufWriter, Cursor};

use printpdf::path::{PaintMode, WindingOrder};
use printpdf::{
    BuiltinFont, Color as PdfColor, IndirectFontRef, Line, Mm, PdfDocument, PdfDocumentReference,
    PdfLayerReference, Point, Polygon, Rgb,
};

use tally_core::form::{FormData, InvoiceView};
use tally_render::metrics::text_width_mm;
use tally_render::{Align, Color, Document, Element, FontFamily, FontWeight, Page};

use crate::error::{pdf_error, ExportError};
use crate::naming;

/// A finished PDF ready to hand to the user.
#[derive(Debug, Clone)]
pub struct PdfArtifact {
    pub file_name: String,
    pub bytes: Vec<u8>,
    pub page_count: usize,
}

#[derive(Debug, Clone)]
pub struct PdfOptions {
    pub title: String,
}

impl Default for PdfOptions {
    fn default() -> Self {
        Self {
            title: "Invoice".to_string(),
        }
    }
}

/// Render `form` with the template registered under `template_number` and
/// flatten it to a PDF.
pub fn generate_pdf(form: &FormData, template_number: u32) -> Result<PdfArtifact, ExportError> {
    let document = tally_render::render(form, template_number);
    export_document(&document, &form.view())
}

/// Flatten an already rendered document. Passing the document the preview
/// shows guarantees the file matches it.
pub fn export_document(document: &Document, view: &InvoiceView) -> Result<PdfArtifact, ExportError> {
    let kind = document.kind();
    let options = PdfOptions {
        title: naming::document_title(view, kind),
    };
    let bytes = render_pdf(document, &options)?;

    tracing::info!(
        template = kind.descriptor().name,
        pages = document.page_count(),
        bytes = bytes.len(),
        "PDF generated"
    );

    Ok(PdfArtifact {
        file_name: naming::export_file_name(view, kind),
        bytes,
        page_count: document.page_count(),
    })
}

struct Fonts {
    sans: IndirectFontRef,
    sans_bold: IndirectFontRef,
    serif: IndirectFontRef,
    serif_bold: IndirectFontRef,
    mono: IndirectFontRef,
    mono_bold: IndirectFontRef,
}

impl Fonts {
    fn load(doc: &PdfDocumentReference) -> Result<Self, ExportError> {
        let font = |f: BuiltinFont| doc.add_builtin_font(f).map_err(pdf_error);
        Ok(Self {
            sans: font(BuiltinFont::Helvetica)?,
            sans_bold: font(BuiltinFont::HelveticaBold)?,
            serif: font(BuiltinFont::TimesRoman)?,
            serif_bold: font(BuiltinFont::TimesBold)?,
            mono: font(BuiltinFont::Courier)?,
            mono_bold: font(BuiltinFont::CourierBold)?,
        })
    }

    fn get(&self, family: FontFamily, weight: FontWeight) -> &IndirectFontRef {
        match (family, weight) {
            (FontFamily::Sans, FontWeight::Regular) => &self.sans,
            (FontFamily::Sans, FontWeight::Bold) => &self.sans_bold,
            (FontFamily::Serif, FontWeight::Regular) => &self.serif,
            (FontFamily::Serif, FontWeight::Bold) => &self.serif_bold,
            (FontFamily::Mono, FontWeight::Regular) => &self.mono,
            (FontFamily::Mono, FontWeight::Bold) => &self.mono_bold,
        }
    }
}

/// Paint every page of `document` into a PDF byte stream.
pub fn render_pdf(document: &Document, options: &PdfOptions) -> Result<Vec<u8>, ExportError> {
    let pages = document.pages();
    if pages.is_empty() {
        return Err(ExportError::EmptyDocument);
    }

    let size = document.size();
    let (width, height) = (Mm(size.width_mm), Mm(size.height_mm));
    let (doc, first_page, first_layer) =
        PdfDocument::new(options.title.as_str(), width, height, "Layer 1");
    let fonts = Fonts::load(&doc)?;

    for (index, page) in pages.iter().enumerate() {
        let layer = if index == 0 {
            doc.get_page(first_page).get_layer(first_layer)
        } else {
            let (page_index, layer_index) = doc.add_page(width, height, "Layer 1");
            doc.get_page(page_index).get_layer(layer_index)
        };
        paint_page(&layer, page, size.height_mm, &fonts);
    }

    let mut writer = BufWriter::new(Cursor::new(Vec::new()));
    doc.save(&mut writer).map_err(pdf_error)?;
    let cursor = writer.into_inner().map_err(pdf_error)?;
    Ok(cursor.into_inner())
}

fn paint_page(layer: &PdfLayerReference, page: &Page, page_height: f32, fonts: &Fonts) {
    // Document coordinates run down from the top edge; PDF runs up from
    // the bottom.
    let flip = |y: f32| Mm(page_height - y);

    for element in &page.elements {
        match element {
            Element::Rect {
                x,
                y,
                width,
                height,
                fill,
            } => {
                layer.set_fill_color(pdf_color(fill));
                let ring = vec![
                    (Point::new(Mm(*x), flip(*y + *height)), false),
                    (Point::new(Mm(*x + *width), flip(*y + *height)), false),
                    (Point::new(Mm(*x + *width), flip(*y)), false),
                    (Point::new(Mm(*x), flip(*y)), false),
                ];
                layer.add_polygon(Polygon {
                    rings: vec![ring],
                    mode: PaintMode::Fill,
                    winding_order: WindingOrder::NonZero,
                });
            }
            Element::Rule {
                x,
                y,
                width,
                thickness_pt,
                color,
            } => {
                layer.set_outline_color(pdf_color(color));
                layer.set_outline_thickness(*thickness_pt);
                layer.add_line(Line {
                    points: vec![
                        (Point::new(Mm(*x), flip(*y)), false),
                        (Point::new(Mm(*x + *width), flip(*y)), false),
                    ],
                    is_closed: false,
                });
            }
            Element::Text {
                x,
                y,
                text,
                style,
                align,
            } => {
                let left = match align {
                    Align::Left => *x,
                    Align::Center => *x - text_width_mm(text, style) / 2.0,
                    Align::Right => *x - text_width_mm(text, style),
                };
                layer.set_fill_color(pdf_color(&style.color));
                layer.use_text(
                    text.as_str(),
                    style.size_pt,
                    Mm(left),
                    flip(*y),
                    fonts.get(style.family, style.weight),
                );
            }
        }
    }
}

fn pdf_color(color: &Color) -> PdfColor {
    let (r, g, b) = color.unit();
    PdfColor::Rgb(Rgb::new(r, g, b, None))
}
