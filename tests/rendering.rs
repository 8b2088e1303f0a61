use drawing_pad::export::{self, ExportJob};
use drawing_pad::{Document, RasterCanvas, Renderer};
use egui::{Color32, Pos2};
use image::Rgba;

fn scratch_dir() -> std::path::PathBuf {
    std::env::temp_dir().join(format!("drawing_pad-test-{}", uuid::Uuid::new_v4()))
}

#[test]
fn test_later_strokes_paint_over_earlier_ones() {
    let mut doc = Document::new();
    doc.begin_stroke_with(Pos2::new(2.0, 10.0), Color32::RED, 6.0).unwrap();
    doc.extend_stroke(Pos2::new(18.0, 10.0));
    doc.end_stroke();
    doc.begin_stroke_with(Pos2::new(10.0, 2.0), Color32::BLUE, 6.0).unwrap();
    doc.extend_stroke(Pos2::new(10.0, 18.0));
    doc.end_stroke();

    let mut canvas = RasterCanvas::new(20, 20);
    canvas.fill(Color32::WHITE);
    Renderer::new().render(&doc, &mut canvas);

    // Crossing point shows the second stroke
    assert_eq!(canvas.pixel(10, 10), Some(Rgba([0, 0, 255, 255])));
    assert_eq!(canvas.pixel(3, 10), Some(Rgba([255, 0, 0, 255])));

    // After undo the first stroke is visible there again
    doc.undo();
    let mut canvas = RasterCanvas::new(20, 20);
    canvas.fill(Color32::WHITE);
    Renderer::new().render(&doc, &mut canvas);
    assert_eq!(canvas.pixel(10, 10), Some(Rgba([255, 0, 0, 255])));
}

#[test]
fn test_in_progress_stroke_is_rendered_on_top() {
    let mut doc = Document::new();
    doc.begin_stroke_with(Pos2::new(5.0, 5.0), Color32::RED, 8.0).unwrap();
    doc.end_stroke();
    doc.begin_stroke_with(Pos2::new(5.0, 5.0), Color32::GREEN, 4.0).unwrap();

    let mut canvas = RasterCanvas::new(10, 10);
    Renderer::new().render(&doc, &mut canvas);
    assert_eq!(canvas.pixel(5, 5), Some(Rgba([0, 255, 0, 255])));
}

#[test]
fn test_export_writes_timestamped_png() {
    let mut doc = Document::new();
    doc.begin_stroke_with(Pos2::new(4.0, 4.0), Color32::BLACK, 4.0).unwrap();
    doc.end_stroke();
    let snapshot = export::compose_snapshot(&doc, None, Color32::WHITE, 8, 8);

    let dir = scratch_dir();
    let path = export::write_png(&snapshot, &dir, 1_234).unwrap();
    assert_eq!(path, dir.join("DrawingApp_1234.png"));

    let decoded = image::open(&path).unwrap().to_rgba8();
    assert_eq!(decoded, snapshot);
    std::fs::remove_dir_all(&dir).unwrap();
}

#[test]
fn test_export_job_reports_path() {
    let snapshot = image::RgbaImage::from_pixel(4, 4, Rgba([255, 255, 255, 255]));
    let dir = scratch_dir();

    let job = ExportJob::spawn(snapshot, dir.clone(), 42).unwrap();
    let path = job.wait().unwrap();
    assert!(path.exists());
    std::fs::remove_dir_all(&dir).unwrap();
}

#[test]
fn test_export_job_reports_empty_canvas() {
    let job = ExportJob::spawn(image::RgbaImage::new(0, 0), scratch_dir(), 1).unwrap();
    assert!(job.wait().is_err());
}

#[test]
fn test_snapshot_does_not_change_with_document() {
    let mut doc = Document::new();
    let snapshot = export::compose_snapshot(&doc, None, Color32::WHITE, 6, 6);

    doc.begin_stroke_with(Pos2::new(3.0, 3.0), Color32::BLACK, 6.0).unwrap();
    doc.end_stroke();
    assert!(snapshot.pixels().all(|p| *p == Rgba([255, 255, 255, 255])));
}
