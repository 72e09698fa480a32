//! PPTX deck writer
//!
//! Produces a minimal OOXML presentation package: one slide master, one
//! blank layout, one theme and one slide per image. Each picture sits at
//! the top-left corner, scaled to the slide height with its aspect ratio
//! preserved.
//!
//! Entries are written with a fixed timestamp so the same inputs always
//! produce the same archive bytes.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event};
use quick_xml::Writer;
use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, DateTime, ZipWriter};

use crate::config::OutputConfig;
use crate::constants::deck;
use crate::error::{ConversionError, Result};

const ARTIFACT: &str = "PPTX";

const NS_A: &str = "http://schemas.openxmlformats.org/drawingml/2006/main";
const NS_R: &str = "http://schemas.openxmlformats.org/officeDocument/2006/relationships";
const NS_P: &str = "http://schemas.openxmlformats.org/presentationml/2006/main";
const NS_REL: &str = "http://schemas.openxmlformats.org/package/2006/relationships";

const REL_OFFICE_DOCUMENT: &str =
    "http://schemas.openxmlformats.org/officeDocument/2006/relationships/officeDocument";
const REL_CORE_PROPS: &str =
    "http://schemas.openxmlformats.org/package/2006/relationships/metadata/core-properties";
const REL_EXTENDED_PROPS: &str =
    "http://schemas.openxmlformats.org/officeDocument/2006/relationships/extended-properties";
const REL_SLIDE_MASTER: &str =
    "http://schemas.openxmlformats.org/officeDocument/2006/relationships/slideMaster";
const REL_SLIDE_LAYOUT: &str =
    "http://schemas.openxmlformats.org/officeDocument/2006/relationships/slideLayout";
const REL_SLIDE: &str = "http://schemas.openxmlformats.org/officeDocument/2006/relationships/slide";
const REL_THEME: &str = "http://schemas.openxmlformats.org/officeDocument/2006/relationships/theme";
const REL_IMAGE: &str = "http://schemas.openxmlformats.org/officeDocument/2006/relationships/image";

/// First slide id allowed by PresentationML
const FIRST_SLIDE_ID: usize = 256;

/// Writes image slides into a PPTX package
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PptxWriter {
    slide_width_emu: i64,
    slide_height_emu: i64,
}

impl Default for PptxWriter {
    fn default() -> Self {
        Self::new(deck::SLIDE_WIDTH_EMU, deck::SLIDE_HEIGHT_EMU)
    }
}

impl PptxWriter {
    pub fn new(slide_width_emu: i64, slide_height_emu: i64) -> Self {
        Self {
            slide_width_emu,
            slide_height_emu,
        }
    }

    pub fn from_config(config: &OutputConfig) -> Self {
        Self::new(config.slide_width_emu, config.slide_height_emu)
    }

    /// Picture size in EMU for an image of `width` x `height` pixels:
    /// full slide height, width scaled to keep the aspect ratio
    pub fn picture_extent(&self, width: u32, height: u32) -> (i64, i64) {
        if height == 0 {
            return (0, self.slide_height_emu);
        }
        let cx = (self.slide_height_emu as f64 * width as f64 / height as f64).round() as i64;
        (cx, self.slide_height_emu)
    }

    /// Write one slide per image (in order) to `out_path`, returning the slide count
    pub fn write(&self, images: &[PathBuf], out_path: &Path) -> Result<usize> {
        let file = File::create(out_path).map_err(|e| ConversionError::io(out_path, e))?;
        let mut zip = ZipWriter::new(BufWriter::new(file));
        let put = |zip: &mut ZipWriter<BufWriter<File>>, name: &str, data: &[u8]| -> Result<()> {
            zip.start_file(name, entry_options())
                .map_err(|e| ConversionError::assembly(ARTIFACT, format!("{}: {}", name, e)))?;
            zip.write_all(data)
                .map_err(|e| ConversionError::assembly(ARTIFACT, format!("{}: {}", name, e)))
        };

        let slides = images.len();
        put(&mut zip, "[Content_Types].xml", &content_types(slides)?)?;
        put(&mut zip, "_rels/.rels", &root_rels()?)?;
        put(&mut zip, "docProps/core.xml", &core_props()?)?;
        put(&mut zip, "docProps/app.xml", &app_props(slides)?)?;
        put(&mut zip, "ppt/presentation.xml", &self.presentation(slides)?)?;
        put(&mut zip, "ppt/_rels/presentation.xml.rels", &presentation_rels(slides)?)?;
        put(&mut zip, "ppt/slideMasters/slideMaster1.xml", &slide_master()?)?;
        put(&mut zip, "ppt/slideMasters/_rels/slideMaster1.xml.rels", &slide_master_rels()?)?;
        put(&mut zip, "ppt/slideLayouts/slideLayout1.xml", &slide_layout()?)?;
        put(&mut zip, "ppt/slideLayouts/_rels/slideLayout1.xml.rels", &slide_layout_rels()?)?;
        put(&mut zip, "ppt/theme/theme1.xml", THEME.as_bytes())?;

        for (index, image_path) in images.iter().enumerate() {
            let number = index + 1;
            let bytes = std::fs::read(image_path).map_err(|e| ConversionError::io(image_path, e))?;
            let (width, height) = image::image_dimensions(image_path).map_err(|e| {
                ConversionError::image_load(
                    format!("Failed to read size of {}", image_path.display()),
                    e,
                )
            })?;
            let (cx, cy) = self.picture_extent(width, height);
            let name = image_path
                .file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_default();

            put(&mut zip, &format!("ppt/media/image{}.png", number), &bytes)?;
            put(
                &mut zip,
                &format!("ppt/slides/slide{}.xml", number),
                &picture_slide(number, &name, cx, cy)?,
            )?;
            put(
                &mut zip,
                &format!("ppt/slides/_rels/slide{}.xml.rels", number),
                &slide_rels(number)?,
            )?;
            log::debug!("Slide {}: {} ({}x{} EMU)", number, name, cx, cy);
        }

        let mut writer = zip
            .finish()
            .map_err(|e| ConversionError::assembly(ARTIFACT, e.to_string()))?;
        writer.flush().map_err(|e| ConversionError::io(out_path, e))?;

        log::info!("Wrote {} slides to {}", slides, out_path.display());
        Ok(slides)
    }

    fn presentation(&self, slides: usize) -> Result<Vec<u8>> {
        let cx = self.slide_width_emu.to_string();
        let cy = self.slide_height_emu.to_string();

        let mut part = XmlPart::new()?;
        part.open(
            "p:presentation",
            &[("xmlns:a", NS_A), ("xmlns:r", NS_R), ("xmlns:p", NS_P), ("saveSubsetFonts", "1")],
        )?;
        part.open("p:sldMasterIdLst", &[])?;
        part.empty("p:sldMasterId", &[("id", "2147483648"), ("r:id", "rId1")])?;
        part.close("p:sldMasterIdLst")?;
        if slides > 0 {
            part.open("p:sldIdLst", &[])?;
            for index in 0..slides {
                let id = (FIRST_SLIDE_ID + index).to_string();
                let rel = format!("rId{}", index + 3);
                part.empty("p:sldId", &[("id", id.as_str()), ("r:id", rel.as_str())])?;
            }
            part.close("p:sldIdLst")?;
        }
        part.empty("p:sldSz", &[("cx", cx.as_str()), ("cy", cy.as_str())])?;
        part.empty("p:notesSz", &[("cx", cy.as_str()), ("cy", cx.as_str())])?;
        part.close("p:presentation")?;
        Ok(part.finish())
    }
}

fn entry_options() -> SimpleFileOptions {
    SimpleFileOptions::default()
        .compression_method(CompressionMethod::Deflated)
        .last_modified_time(DateTime::default())
}

fn xml_error(e: impl std::fmt::Display) -> ConversionError {
    ConversionError::assembly(ARTIFACT, format!("XML serialization: {}", e))
}

/// One XML part of the package, written event by event
struct XmlPart {
    writer: Writer<Vec<u8>>,
}

impl XmlPart {
    fn new() -> Result<Self> {
        let mut part = Self {
            writer: Writer::new(Vec::new()),
        };
        part.emit(Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), Some("yes"))))?;
        Ok(part)
    }

    fn emit(&mut self, event: Event<'_>) -> Result<()> {
        self.writer.write_event(event).map_err(xml_error)
    }

    fn open(&mut self, name: &str, attributes: &[(&str, &str)]) -> Result<()> {
        let start = BytesStart::new(name).with_attributes(attributes.iter().copied());
        self.emit(Event::Start(start))
    }

    fn empty(&mut self, name: &str, attributes: &[(&str, &str)]) -> Result<()> {
        let element = BytesStart::new(name).with_attributes(attributes.iter().copied());
        self.emit(Event::Empty(element))
    }

    fn close(&mut self, name: &str) -> Result<()> {
        self.emit(Event::End(BytesEnd::new(name)))
    }

    fn text(&mut self, name: &str, text: &str) -> Result<()> {
        self.open(name, &[])?;
        self.emit(Event::Text(BytesText::new(text)))?;
        self.close(name)
    }

    fn finish(self) -> Vec<u8> {
        self.writer.into_inner()
    }
}

const CT_SLIDE: &str = "application/vnd.openxmlformats-officedocument.presentationml.slide+xml";

fn content_types(slides: usize) -> Result<Vec<u8>> {
    let mut part = XmlPart::new()?;
    part.open(
        "Types",
        &[("xmlns", "http://schemas.openxmlformats.org/package/2006/content-types")],
    )?;
    for (extension, content_type) in [
        ("rels", "application/vnd.openxmlformats-package.relationships+xml"),
        ("xml", "application/xml"),
        ("png", "image/png"),
    ] {
        part.empty("Default", &[("Extension", extension), ("ContentType", content_type)])?;
    }
    for (name, content_type) in [
        (
            "/ppt/presentation.xml",
            "application/vnd.openxmlformats-officedocument.presentationml.presentation.main+xml",
        ),
        (
            "/ppt/slideMasters/slideMaster1.xml",
            "application/vnd.openxmlformats-officedocument.presentationml.slideMaster+xml",
        ),
        (
            "/ppt/slideLayouts/slideLayout1.xml",
            "application/vnd.openxmlformats-officedocument.presentationml.slideLayout+xml",
        ),
        ("/ppt/theme/theme1.xml", "application/vnd.openxmlformats-officedocument.theme+xml"),
        ("/docProps/core.xml", "application/vnd.openxmlformats-package.core-properties+xml"),
        (
            "/docProps/app.xml",
            "application/vnd.openxmlformats-officedocument.extended-properties+xml",
        ),
    ] {
        part.empty("Override", &[("PartName", name), ("ContentType", content_type)])?;
    }
    for number in 1..=slides {
        let name = format!("/ppt/slides/slide{}.xml", number);
        part.empty("Override", &[("PartName", name.as_str()), ("ContentType", CT_SLIDE)])?;
    }
    part.close("Types")?;
    Ok(part.finish())
}

fn relationships(rels: &[(String, &str, String)]) -> Result<Vec<u8>> {
    let mut part = XmlPart::new()?;
    part.open("Relationships", &[("xmlns", NS_REL)])?;
    for (id, kind, target) in rels {
        part.empty(
            "Relationship",
            &[("Id", id.as_str()), ("Type", *kind), ("Target", target.as_str())],
        )?;
    }
    part.close("Relationships")?;
    Ok(part.finish())
}

fn root_rels() -> Result<Vec<u8>> {
    relationships(&[
        ("rId1".into(), REL_OFFICE_DOCUMENT, "ppt/presentation.xml".into()),
        ("rId2".into(), REL_CORE_PROPS, "docProps/core.xml".into()),
        ("rId3".into(), REL_EXTENDED_PROPS, "docProps/app.xml".into()),
    ])
}

fn presentation_rels(slides: usize) -> Result<Vec<u8>> {
    let mut rels = vec![
        ("rId1".to_string(), REL_SLIDE_MASTER, "slideMasters/slideMaster1.xml".to_string()),
        ("rId2".to_string(), REL_THEME, "theme/theme1.xml".to_string()),
    ];
    rels.extend((1..=slides).map(|n| {
        (format!("rId{}", n + 2), REL_SLIDE, format!("slides/slide{}.xml", n))
    }));
    relationships(&rels)
}

fn slide_master_rels() -> Result<Vec<u8>> {
    relationships(&[
        ("rId1".into(), REL_SLIDE_LAYOUT, "../slideLayouts/slideLayout1.xml".into()),
        ("rId2".into(), REL_THEME, "../theme/theme1.xml".into()),
    ])
}

fn slide_layout_rels() -> Result<Vec<u8>> {
    relationships(&[(
        "rId1".into(),
        REL_SLIDE_MASTER,
        "../slideMasters/slideMaster1.xml".into(),
    )])
}

fn slide_rels(number: usize) -> Result<Vec<u8>> {
    relationships(&[
        ("rId1".into(), REL_SLIDE_LAYOUT, "../slideLayouts/slideLayout1.xml".into()),
        ("rId2".into(), REL_IMAGE, format!("../media/image{}.png", number)),
    ])
}

fn core_props() -> Result<Vec<u8>> {
    let mut part = XmlPart::new()?;
    part.open(
        "cp:coreProperties",
        &[
            ("xmlns:cp", "http://schemas.openxmlformats.org/package/2006/metadata/core-properties"),
            ("xmlns:dc", "http://purl.org/dc/elements/1.1/"),
            ("xmlns:dcterms", "http://purl.org/dc/terms/"),
            ("xmlns:xsi", "http://www.w3.org/2001/XMLSchema-instance"),
        ],
    )?;
    part.text("dc:title", "Presentation")?;
    part.text("dc:creator", env!("CARGO_PKG_NAME"))?;
    part.close("cp:coreProperties")?;
    Ok(part.finish())
}

fn app_props(slides: usize) -> Result<Vec<u8>> {
    let mut part = XmlPart::new()?;
    part.open(
        "Properties",
        &[("xmlns", "http://schemas.openxmlformats.org/officeDocument/2006/extended-properties")],
    )?;
    part.text("Application", env!("CARGO_PKG_NAME"))?;
    part.text("Slides", &slides.to_string())?;
    part.close("Properties")?;
    Ok(part.finish())
}

/// Group properties of an empty shape tree, shared by master, layout and slides
fn group_header(part: &mut XmlPart) -> Result<()> {
    part.open("p:nvGrpSpPr", &[])?;
    part.empty("p:cNvPr", &[("id", "1"), ("name", "")])?;
    part.empty("p:cNvGrpSpPr", &[])?;
    part.empty("p:nvPr", &[])?;
    part.close("p:nvGrpSpPr")?;
    part.open("p:grpSpPr", &[])?;
    part.open("a:xfrm", &[])?;
    part.empty("a:off", &[("x", "0"), ("y", "0")])?;
    part.empty("a:ext", &[("cx", "0"), ("cy", "0")])?;
    part.empty("a:chOff", &[("x", "0"), ("y", "0")])?;
    part.empty("a:chExt", &[("cx", "0"), ("cy", "0")])?;
    part.close("a:xfrm")?;
    part.close("p:grpSpPr")
}

fn master_color_mapping(part: &mut XmlPart) -> Result<()> {
    part.open("p:clrMapOvr", &[])?;
    part.empty("a:masterClrMapping", &[])?;
    part.close("p:clrMapOvr")
}

const PRESENTATION_NS: [(&str, &str); 3] =
    [("xmlns:a", NS_A), ("xmlns:r", NS_R), ("xmlns:p", NS_P)];

fn slide_master() -> Result<Vec<u8>> {
    let mut part = XmlPart::new()?;
    part.open("p:sldMaster", &PRESENTATION_NS)?;
    part.open("p:cSld", &[])?;
    part.open("p:bg", &[])?;
    part.open("p:bgRef", &[("idx", "1001")])?;
    part.empty("a:schemeClr", &[("val", "bg1")])?;
    part.close("p:bgRef")?;
    part.close("p:bg")?;
    part.open("p:spTree", &[])?;
    group_header(&mut part)?;
    part.close("p:spTree")?;
    part.close("p:cSld")?;
    part.empty(
        "p:clrMap",
        &[
            ("bg1", "lt1"),
            ("tx1", "dk1"),
            ("bg2", "lt2"),
            ("tx2", "dk2"),
            ("accent1", "accent1"),
            ("accent2", "accent2"),
            ("accent3", "accent3"),
            ("accent4", "accent4"),
            ("accent5", "accent5"),
            ("accent6", "accent6"),
            ("hlink", "hlink"),
            ("folHlink", "folHlink"),
        ],
    )?;
    part.open("p:sldLayoutIdLst", &[])?;
    part.empty("p:sldLayoutId", &[("id", "2147483649"), ("r:id", "rId1")])?;
    part.close("p:sldLayoutIdLst")?;
    part.close("p:sldMaster")?;
    Ok(part.finish())
}

fn slide_layout() -> Result<Vec<u8>> {
    let mut part = XmlPart::new()?;
    let mut attributes = PRESENTATION_NS.to_vec();
    attributes.extend([("type", "blank"), ("preserve", "1")]);
    part.open("p:sldLayout", &attributes)?;
    part.open("p:cSld", &[("name", "Blank")])?;
    part.open("p:spTree", &[])?;
    group_header(&mut part)?;
    part.close("p:spTree")?;
    part.close("p:cSld")?;
    master_color_mapping(&mut part)?;
    part.close("p:sldLayout")?;
    Ok(part.finish())
}

fn picture_slide(number: usize, name: &str, cx: i64, cy: i64) -> Result<Vec<u8>> {
    let title = format!("Picture {}", number);
    let cx = cx.to_string();
    let cy = cy.to_string();

    let mut part = XmlPart::new()?;
    part.open("p:sld", &PRESENTATION_NS)?;
    part.open("p:cSld", &[])?;
    part.open("p:spTree", &[])?;
    group_header(&mut part)?;

    part.open("p:pic", &[])?;
    part.open("p:nvPicPr", &[])?;
    part.empty("p:cNvPr", &[("id", "2"), ("name", title.as_str()), ("descr", name)])?;
    part.open("p:cNvPicPr", &[])?;
    part.empty("a:picLocks", &[("noChangeAspect", "1")])?;
    part.close("p:cNvPicPr")?;
    part.empty("p:nvPr", &[])?;
    part.close("p:nvPicPr")?;

    part.open("p:blipFill", &[])?;
    part.empty("a:blip", &[("r:embed", "rId2")])?;
    part.open("a:stretch", &[])?;
    part.empty("a:fillRect", &[])?;
    part.close("a:stretch")?;
    part.close("p:blipFill")?;

    part.open("p:spPr", &[])?;
    part.open("a:xfrm", &[])?;
    part.empty("a:off", &[("x", "0"), ("y", "0")])?;
    part.empty("a:ext", &[("cx", cx.as_str()), ("cy", cy.as_str())])?;
    part.close("a:xfrm")?;
    part.open("a:prstGeom", &[("prst", "rect")])?;
    part.empty("a:avLst", &[])?;
    part.close("a:prstGeom")?;
    part.close("p:spPr")?;
    part.close("p:pic")?;

    part.close("p:spTree")?;
    part.close("p:cSld")?;
    master_color_mapping(&mut part)?;
    part.close("p:sld")?;
    Ok(part.finish())
}

const THEME: &str = concat!(
    r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>"#,
    r#"<a:theme xmlns:a="http://schemas.openxmlformats.org/drawingml/2006/main" name="Office Theme"><a:themeElements>"#,
    r#"<a:clrScheme name="Office"><a:dk1><a:sysClr val="windowText" lastClr="000000"/></a:dk1><a:lt1><a:sysClr val="window" lastClr="FFFFFF"/></a:lt1>"#,
    r#"<a:dk2><a:srgbClr val="1F497D"/></a:dk2><a:lt2><a:srgbClr val="EEECE1"/></a:lt2><a:accent1><a:srgbClr val="4F81BD"/></a:accent1>"#,
    r#"<a:accent2><a:srgbClr val="C0504D"/></a:accent2><a:accent3><a:srgbClr val="9BBB59"/></a:accent3><a:accent4><a:srgbClr val="8064A2"/></a:accent4>"#,
    r#"<a:accent5><a:srgbClr val="4BACC6"/></a:accent5><a:accent6><a:srgbClr val="F79646"/></a:accent6><a:hlink><a:srgbClr val="0000FF"/></a:hlink>"#,
    r#"<a:folHlink><a:srgbClr val="800080"/></a:folHlink></a:clrScheme>"#,
    r#"<a:fontScheme name="Office"><a:majorFont><a:latin typeface="Calibri"/><a:ea typeface=""/><a:cs typeface=""/></a:majorFont>"#,
    r#"<a:minorFont><a:latin typeface="Calibri"/><a:ea typeface=""/><a:cs typeface=""/></a:minorFont></a:fontScheme>"#,
    r#"<a:fmtScheme name="Office"><a:fillStyleLst><a:solidFill><a:schemeClr val="phClr"/></a:solidFill><a:solidFill><a:schemeClr val="phClr"/></a:solidFill>"#,
    r#"<a:solidFill><a:schemeClr val="phClr"/></a:solidFill></a:fillStyleLst><a:lnStyleLst><a:ln w="9525"><a:solidFill><a:schemeClr val="phClr"/></a:solidFill></a:ln>"#,
    r#"<a:ln w="25400"><a:solidFill><a:schemeClr val="phClr"/></a:solidFill></a:ln><a:ln w="38100"><a:solidFill><a:schemeClr val="phClr"/></a:solidFill></a:ln></a:lnStyleLst>"#,
    r#"<a:effectStyleLst><a:effectStyle><a:effectLst/></a:effectStyle><a:effectStyle><a:effectLst/></a:effectStyle><a:effectStyle><a:effectLst/></a:effectStyle></a:effectStyleLst>"#,
    r#"<a:bgFillStyleLst><a:solidFill><a:schemeClr val="phClr"/></a:solidFill><a:solidFill><a:schemeClr val="phClr"/></a:solidFill><a:solidFill><a:schemeClr val="phClr"/></a:solidFill></a:bgFillStyleLst>"#,
    r#"</a:fmtScheme></a:themeElements><a:objectDefaults/><a:extraClrSchemeLst/></a:theme>"#,
);

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Read;

    fn write_png(dir: &Path, name: &str, width: u32, height: u32) -> PathBuf {
        let path = dir.join(name);
        image::RgbImage::from_pixel(width, height, image::Rgb([90, 0, 160]))
            .save(&path)
            .unwrap();
        path
    }

    fn read_entry(archive: &mut zip::ZipArchive<File>, name: &str) -> String {
        let mut text = String::new();
        archive
            .by_name(name)
            .unwrap()
            .read_to_string(&mut text)
            .unwrap();
        text
    }

    #[test]
    fn test_picture_extent_keeps_aspect_ratio() {
        let writer = PptxWriter::default();
        // 3x zoom A4 landscape page
        assert_eq!(writer.picture_extent(2526, 1785), (9_704_934, 6_858_000));
        assert_eq!(writer.picture_extent(400, 300), (9_144_000, 6_858_000));
        assert_eq!(writer.picture_extent(10, 0), (0, 6_858_000));
    }

    #[test]
    fn test_deck_has_one_slide_per_image() {
        let dir = tempfile::tempdir().unwrap();
        let images = vec![
            write_png(dir.path(), "page_01.png", 40, 30),
            write_png(dir.path(), "page_04.png", 30, 30),
        ];
        let out = dir.path().join("deck.pptx");

        let count = PptxWriter::default().write(&images, &out).unwrap();
        assert_eq!(count, 2);

        let mut archive = zip::ZipArchive::new(File::open(&out).unwrap()).unwrap();
        for entry in [
            "[Content_Types].xml",
            "ppt/presentation.xml",
            "ppt/slides/slide1.xml",
            "ppt/slides/slide2.xml",
            "ppt/media/image1.png",
            "ppt/media/image2.png",
            "ppt/theme/theme1.xml",
        ] {
            assert!(archive.by_name(entry).is_ok(), "missing {}", entry);
        }
        assert!(archive.by_name("ppt/slides/slide3.xml").is_err());

        let presentation = read_entry(&mut archive, "ppt/presentation.xml");
        assert!(presentation.contains(r#"<p:sldSz cx="9144000" cy="6858000"/>"#));
        assert_eq!(presentation.matches("<p:sldId ").count(), 2);

        let slide = read_entry(&mut archive, "ppt/slides/slide2.xml");
        assert!(slide.contains(r#"descr="page_04.png""#));
        assert!(slide.contains(r#"<a:off x="0" y="0"/><a:ext cx="6858000" cy="6858000"/>"#));

        let mut media = Vec::new();
        archive
            .by_name("ppt/media/image1.png")
            .unwrap()
            .read_to_end(&mut media)
            .unwrap();
        assert_eq!(media, std::fs::read(&images[0]).unwrap());
    }

    #[test]
    fn test_empty_deck() {
        let dir = tempfile::tempdir().unwrap();
        let out = dir.path().join("empty.pptx");

        assert_eq!(PptxWriter::default().write(&[], &out).unwrap(), 0);

        let mut archive = zip::ZipArchive::new(File::open(&out).unwrap()).unwrap();
        let presentation = read_entry(&mut archive, "ppt/presentation.xml");
        assert!(!presentation.contains("sldIdLst"));
    }

    #[test]
    fn test_output_is_deterministic() {
        let dir = tempfile::tempdir().unwrap();
        let images = vec![write_png(dir.path(), "page_02.png", 16, 9)];
        let first = dir.path().join("a.pptx");
        let second = dir.path().join("b.pptx");

        PptxWriter::default().write(&images, &first).unwrap();
        PptxWriter::default().write(&images, &second).unwrap();
        assert_eq!(std::fs::read(first).unwrap(), std::fs::read(second).unwrap());
    }

    #[test]
    fn test_slide_description_is_escaped() {
        let dir = tempfile::tempdir().unwrap();
        let images = vec![write_png(dir.path(), "Q&A draft.png", 20, 10)];
        let out = dir.path().join("escaped.pptx");

        PptxWriter::default().write(&images, &out).unwrap();

        let mut archive = zip::ZipArchive::new(File::open(&out).unwrap()).unwrap();
        let slide = read_entry(&mut archive, "ppt/slides/slide1.xml");
        assert!(slide.contains(r#"descr="Q&amp;A draft.png""#));
        assert!(slide.starts_with(r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>"#));
    }

    #[test]
    fn test_content_types_list_every_slide() {
        let types = String::from_utf8(content_types(3).unwrap()).unwrap();
        assert_eq!(types.matches(CT_SLIDE).count(), 3);
        assert!(types.contains(r#"<Override PartName="/ppt/slides/slide3.xml""#));
        assert!(types.contains(r#"<Default Extension="png" ContentType="image/png"/>"#));
    }
}
