//! Export integration tests: rasterize, encode, download, report.

use crate::helpers::id;
use image::{Rgba, RgbaImage};
use moodboard::board::BoardConfig;
use moodboard::export::{encode_png, png_data_url, DirectorySink, MemorySink};
use moodboard::intent::BoardIntent;
use moodboard::notifications::ToastVariant;
use moodboard::session::BoardSession;
use moodboard::settings::Settings;
use std::sync::Arc;
use tempfile::tempdir;

const PNG_SIGNATURE: [u8; 8] = [0x89, b'P', b'N', b'G', 0x0d, 0x0a, 0x1a, 0x0a];

#[test]
fn test_export_writes_png_download() {
    let dir = tempdir().unwrap();
    let mut session = BoardSession::default();
    session.dispatch(BoardIntent::AddColorItem);
    session.dispatch(BoardIntent::AddTextItem);

    let mut sink = DirectorySink::new(dir.path());
    let outcome = session.export(&mut sink).expect("export succeeds");

    let path = dir.path().join("moodboard.png");
    assert_eq!(outcome.location, path);
    assert_eq!((outcome.width, outcome.height), (1000, 600));
    assert!(outcome.data_url.starts_with("data:image/png;base64,"));

    let bytes = std::fs::read(&path).unwrap();
    assert_eq!(&bytes[..8], &PNG_SIGNATURE);

    let decoded = image::open(&path).unwrap().to_rgba8();
    assert_eq!(decoded.get_pixel(100, 100), &Rgba([0xf9, 0x73, 0x16, 255]));

    let toast = session.toasts().latest().unwrap();
    assert_eq!(toast.variant, ToastVariant::Success);
}

#[test]
fn test_export_ignores_viewport_scale() {
    let mut session = BoardSession::default();
    session.set_viewport_width(300.0);
    let mut sink = MemorySink::default();
    let outcome = session.export(&mut sink).unwrap();
    assert_eq!((outcome.width, outcome.height), (1000, 600));
    assert_eq!(sink.files.len(), 1);
    assert_eq!(sink.files[0].0, "moodboard.png");
}

#[test]
fn test_local_image_is_painted() {
    let dir = tempdir().unwrap();
    let swatch = RgbaImage::from_pixel(4, 4, Rgba([0, 0, 255, 255]));
    swatch.save(dir.path().join("blue.png")).unwrap();

    let mut session = BoardSession::default().with_image_dir(dir.path());
    session.dispatch(BoardIntent::add_image("blue.png"));
    session.dispatch(BoardIntent::MoveItem { id: id("item-1"), x: 0.0, y: 0.0 });

    let mut sink = MemorySink::default();
    session.export(&mut sink).expect("export succeeds");

    let decoded = image::load_from_memory(&sink.files[0].1).unwrap().to_rgba8();
    assert_eq!(decoded.get_pixel(120, 90), &Rgba([0, 0, 255, 255]));
    assert_eq!(decoded.get_pixel(500, 500), &Rgba([255, 255, 255, 255]));
}

#[test]
fn test_tainted_image_reports_error_and_keeps_board() {
    let dir = tempdir().unwrap();
    let mut session = BoardSession::default();
    session.dispatch(BoardIntent::add_image("https://images.example.com/cat.jpg"));
    let before = Arc::clone(session.state());

    let mut sink = DirectorySink::new(dir.path());
    assert!(session.export(&mut sink).is_none());

    let toast = session.toasts().latest().unwrap();
    assert_eq!(toast.variant, ToastVariant::Error);
    assert!(toast.message.contains("cross-origin"));
    assert!(!dir.path().join("moodboard.png").exists());
    assert!(Arc::ptr_eq(&before, session.state()));
}

#[test]
fn test_missing_local_image_reports_error() {
    let dir = tempdir().unwrap();
    let mut session = BoardSession::default().with_image_dir(dir.path());
    session.dispatch(BoardIntent::add_image("nope.png"));

    let mut sink = MemorySink::default();
    assert!(session.export(&mut sink).is_none());
    assert!(sink.files.is_empty());
    assert_eq!(session.toasts().latest().map(|t| t.variant), Some(ToastVariant::Error));
}

#[test]
fn test_huge_image_paints_only_visible_part() {
    let red = RgbaImage::from_pixel(2, 2, Rgba([255, 0, 0, 255]));
    let src = png_data_url(&encode_png(&red).unwrap());

    let mut session = BoardSession::default();
    session.dispatch(BoardIntent::add_image(src));
    session.dispatch(BoardIntent::ResizeItem { id: id("item-1"), width: 1e10, height: 1e10 });
    let before = Arc::clone(session.state());

    let mut sink = MemorySink::default();
    let outcome = session.export(&mut sink).expect("export succeeds");
    assert_eq!((outcome.width, outcome.height), (1000, 600));
    assert_eq!(session.toasts().latest().map(|t| t.variant), Some(ToastVariant::Success));
    assert!(Arc::ptr_eq(&before, session.state()));

    // Image box starts at (360,40) and runs past the bottom-right corner
    let decoded = image::load_from_memory(&sink.files[0].1).unwrap().to_rgba8();
    assert_eq!(decoded.get_pixel(999, 599), &Rgba([255, 0, 0, 255]));
    assert_eq!(decoded.get_pixel(400, 100), &Rgba([255, 0, 0, 255]));
    assert_eq!(decoded.get_pixel(100, 300), &Rgba([255, 255, 255, 255]));
}

#[test]
fn test_oversized_board_reports_error() {
    let settings = Settings {
        board: BoardConfig {
            width: 1e6,
            height: 1e6,
            ..Default::default()
        },
        ..Default::default()
    };
    let mut session = BoardSession::new(settings);
    session.dispatch(BoardIntent::AddColorItem);
    let before = Arc::clone(session.state());

    let mut sink = MemorySink::default();
    assert!(session.export(&mut sink).is_none());
    assert!(sink.files.is_empty());

    let toast = session.toasts().latest().unwrap();
    assert_eq!(toast.variant, ToastVariant::Error);
    assert!(toast.message.contains("pixel budget"));
    assert!(Arc::ptr_eq(&before, session.state()));
}
