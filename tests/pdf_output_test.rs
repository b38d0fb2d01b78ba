//! Integration tests for the serialized PDF.

use lopdf::content::Content;
use lopdf::{Object, ObjectId};
use plandoc::{
    export_strategic_plan_to_pdf, export_to_pdf, ExportOptions, MemoryRasterSource, RasterImage,
    StrategicPlanData,
};

fn reload(bytes: &[u8]) -> lopdf::Document {
    lopdf::Document::load_mem(bytes).unwrap()
}

fn page_strings(pdf: &lopdf::Document, page_id: ObjectId) -> Vec<Vec<u8>> {
    let content = pdf.get_page_content(page_id).unwrap();
    Content::decode(&content)
        .unwrap()
        .operations
        .into_iter()
        .filter(|op| op.operator == "Tj")
        .filter_map(|op| match op.operands.into_iter().next() {
            Some(Object::String(bytes, _)) => Some(bytes),
            _ => None,
        })
        .collect()
}

#[test]
fn test_watermark_on_every_pdf_page() {
    let options = ExportOptions::new()
        .with_export_permission(true)
        .with_watermark_text("DEMO");
    let mut data = StrategicPlanData::new("Acme");
    data.company.mission = Some("Simplificar o planejamento.".into());

    let bytes = export_strategic_plan_to_pdf(&data, &options)
        .unwrap()
        .to_pdf_bytes()
        .unwrap();
    let pdf = reload(&bytes);
    let pages = pdf.get_pages();
    assert_eq!(pages.len(), 2);

    for (number, page_id) in pages {
        let strings = page_strings(&pdf, page_id);
        assert!(
            strings.contains(&b"DEMO".to_vec()),
            "page {} has no stamp",
            number
        );
        let footer = format!("{} / 2", number).into_bytes();
        assert!(strings.contains(&footer));
    }
}

#[test]
fn test_accented_text_is_win_ansi() {
    let options = ExportOptions::new().with_export_permission(true);
    let mut data = StrategicPlanData::new("Ação & Cia");
    data.company.vision = Some("Ser referência".into());

    let bytes = export_strategic_plan_to_pdf(&data, &options)
        .unwrap()
        .to_pdf_bytes()
        .unwrap();
    let pdf = reload(&bytes);
    let strings: Vec<Vec<u8>> = pdf
        .get_pages()
        .values()
        .flat_map(|id| page_strings(&pdf, *id))
        .collect();

    let name = vec![b'A', 0xE7, 0xE3, b'o', b' ', b'&', b' ', b'C', b'i', b'a'];
    assert!(strings.iter().any(|s| s == &name));
}

#[test]
fn test_landscape_media_box() {
    let options = ExportOptions::new().with_export_permission(true).landscape();
    let source = MemoryRasterSource::new()
        .with("wide", RasterImage::solid(800, 300, [90, 90, 90]).unwrap());
    let bytes = export_to_pdf(&source, "wide", &options)
        .unwrap()
        .to_pdf_bytes()
        .unwrap();
    let pdf = reload(&bytes);

    let (_, page_id) = pdf.get_pages().into_iter().next().unwrap();
    let page = pdf.get_dictionary(page_id).unwrap();
    let media_box = page.get(b"MediaBox").unwrap().as_array().unwrap();
    let number = |o: &Object| match o {
        Object::Integer(i) => *i as f32,
        Object::Real(r) => *r,
        _ => panic!("not a number"),
    };
    assert!(number(&media_box[2]) > number(&media_box[3]));
}

#[test]
fn test_info_dictionary() {
    let options = ExportOptions::new()
        .with_export_permission(true)
        .with_title("Plano 2025")
        .with_author("Diretoria");
    let bytes = export_strategic_plan_to_pdf(&StrategicPlanData::new("Acme"), &options)
        .unwrap()
        .to_pdf_bytes()
        .unwrap();
    let pdf = reload(&bytes);

    let info_ref = pdf.trailer.get(b"Info").unwrap().as_reference().unwrap();
    let info = pdf.get_dictionary(info_ref).unwrap();
    match info.get(b"Title").unwrap() {
        Object::String(bytes, _) => assert_eq!(bytes, b"Plano 2025"),
        other => panic!("unexpected title {:?}", other),
    }
    assert!(info.get(b"Author").is_ok());
}
