//! Integration tests for placement and page breaking.

use plandoc::layout::{pages_needed, place, Cursor, Extent, Placement};
use plandoc::model::{DrawOp, ImageId};
use plandoc::render::sections::{Flowable, RasterFlow};
use plandoc::render::Paginator;
use plandoc::{ExportOptions, MemoryRasterSource, PageGeometry, RasterImage};

fn raster(height: f32, pixel_height: u32, geometry: &PageGeometry) -> Flowable {
    Flowable::Raster(RasterFlow {
        region: "chart".to_string(),
        image: ImageId(0),
        x: 0.0,
        width: geometry.content_width(),
        height,
        pixel_height,
        lead: Vec::new(),
    })
}

fn strips(pages: &[plandoc::Page]) -> Vec<(u32, u32, u32)> {
    pages
        .iter()
        .flat_map(|page| {
            page.ops.iter().filter_map(move |op| match op {
                DrawOp::Image {
                    row_start, row_end, ..
                } => Some((page.number, *row_start, *row_end)),
                _ => None,
            })
        })
        .collect()
}

#[test]
fn test_raster_pages_match_ceiling() {
    let geometry = PageGeometry::default();
    let content = geometry.content_height();

    for factor in [0.3_f32, 1.0, 1.5, 2.0, 2.75, 4.2] {
        let height = content * factor;
        let mut pager = Paginator::new(geometry);
        pager.start_page();
        pager.push(raster(height, 3000, &geometry));
        let (pages, _) = pager.finish();

        let expected = (factor - 0.001).ceil().max(1.0) as usize;
        assert_eq!(pages.len(), expected, "factor {}", factor);
        assert_eq!(pages.len() as u32, pages_needed(height, &geometry));
    }
}

#[test]
fn test_strips_cover_every_row_once() {
    let geometry = PageGeometry::default();
    let mut pager = Paginator::new(geometry);
    pager.start_page();
    pager.push(raster(geometry.content_height() * 3.4, 1234, &geometry));
    let (pages, stats) = pager.finish();

    let strips = strips(&pages);
    assert_eq!(strips.len(), 4);
    assert_eq!(stats.strip_count, 4);
    assert_eq!(strips.first().map(|s| s.1), Some(0));
    assert_eq!(strips.last().map(|s| s.2), Some(1234));
    for pair in strips.windows(2) {
        assert_eq!(pair[0].2, pair[1].1);
        assert_eq!(pair[0].0 + 1, pair[1].0);
    }
}

#[test]
fn test_raster_below_content_moves_or_fills() {
    let geometry = PageGeometry::default();
    let content = geometry.content_height();

    // Little room left: the whole block moves to the next page.
    let cursor = Cursor {
        page: 1,
        y: geometry.content_bottom() - geometry.min_strip_height / 2.0,
    };
    let placement = place(cursor, &Extent::Raster(content * 2.0), &geometry);
    assert_eq!(placement, Placement::NewPage);

    // Enough room: the remaining space is filled with a strip.
    let cursor = Cursor {
        page: 1,
        y: geometry.content_top() + content / 2.0,
    };
    match place(cursor, &Extent::Raster(content * 2.0), &geometry) {
        Placement::Split { head, tail, .. } => {
            assert!((head.height() - content / 2.0).abs() < 0.1);
            assert!((head.height() + tail.height() - content * 2.0).abs() < 0.1);
        }
        other => panic!("expected split, got {:?}", other),
    }
}

#[test]
fn test_never_new_page_at_top() {
    let geometry = PageGeometry::default();
    let top = Cursor::top(1, &geometry);
    for extent in [
        Extent::Raster(geometry.content_height() * 5.0),
        Extent::Lines(vec![geometry.content_height() * 2.0]),
        Extent::Lines(vec![14.0; 500]),
    ] {
        assert_ne!(place(top, &extent, &geometry), Placement::NewPage);
    }
}

#[test]
fn test_text_block_moves_whole_when_it_fits_a_page() {
    let geometry = PageGeometry::default();
    let cursor = Cursor {
        page: 1,
        y: geometry.content_bottom() - 30.0,
    };
    let placement = place(cursor, &Extent::Lines(vec![14.0; 10]), &geometry);
    assert_eq!(placement, Placement::NewPage);
}

#[test]
fn test_tall_region_export_pages() {
    let options = ExportOptions::new().with_export_permission(true);
    let geometry = options.geometry();
    // 1:4 aspect, drawn at content width.
    let source = MemoryRasterSource::new().with(
        "dashboard",
        RasterImage::solid(100, 400, [0, 0, 0]).unwrap(),
    );
    let doc = plandoc::export_to_pdf(&source, "dashboard", &options).unwrap();

    let drawn_height = geometry.content_width() * 4.0;
    assert!(doc.page_count() >= pages_needed(drawn_height, &geometry));
    assert!(doc.page_count() <= pages_needed(drawn_height, &geometry) + 1);
    let strips = strips(&doc.pages);
    assert_eq!(strips.last().map(|s| s.2), Some(400));
    for page in &doc.pages {
        assert_eq!(page.footer.len(), 2);
    }
}
