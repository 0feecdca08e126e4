#![allow(clippy::float_cmp)]

use serde_json::json;

use super::*;

fn canvas() -> Size {
    Size::new(2560.0, 1440.0)
}

fn text_box(z: i64) -> CanvasBox {
    CanvasBox::text(canvas(), z)
}

fn image_source(w: f64, h: f64) -> ImageSource {
    ImageSource { source: "data:image/png;base64,AAAA".into(), width: w, height: h }
}

// =============================================================
// Serde
// =============================================================

#[test]
fn kind_serde_lowercase() {
    assert_eq!(serde_json::to_string(&BoxKind::Image).unwrap(), "\"image\"");
    assert_eq!(serde_json::to_string(&BoxKind::Text).unwrap(), "\"text\"");
}

#[test]
fn content_serde_is_tagged_by_type() {
    let c = BoxContent::Text { text: "hi".into() };
    let v = serde_json::to_value(&c).unwrap();
    assert_eq!(v, json!({ "type": "text", "text": "hi" }));
    let back: BoxContent = serde_json::from_value(v).unwrap();
    assert_eq!(back, c);
}

#[test]
fn fit_serde_names() {
    assert_eq!(serde_json::to_string(&ImageFit::Original).unwrap(), "\"original\"");
    let f: ImageFit = serde_json::from_str("\"contain\"").unwrap();
    assert_eq!(f, ImageFit::Contain);
}

#[test]
fn box_serializes_camel_case_fields() {
    let b = text_box(3);
    let v = serde_json::to_value(&b).unwrap();
    assert_eq!(v["zIndex"], json!(3));
    assert_eq!(v["style"]["borderRadius"], json!(8.0));
    assert!(v.get("imageSettings").is_none());
}

// =============================================================
// Style helpers
// =============================================================

#[test]
fn style_defaults_match_editor_defaults() {
    let s = BoxStyle::default();
    assert_eq!(s.background_color, "white");
    assert_eq!(s.border_color, "#e2e8f0");
    assert_eq!(s.border_radius, 8.0);
    assert_eq!(s.opacity, 1.0);
    assert!(!s.shadow);
    assert!(!s.has_border);
    assert!(!s.has_background);
}

#[test]
fn border_css_respects_enabled_flag() {
    let mut s = BoxStyle::default();
    assert_eq!(s.border_css(), "none");
    s.has_border = true;
    s.border_width = 2.0;
    assert_eq!(s.border_css(), "2px solid #e2e8f0");
}

#[test]
fn shadow_css_respects_enabled_flag() {
    let mut s = BoxStyle::default();
    assert_eq!(s.shadow_css(), "none");
    s.shadow = true;
    assert_eq!(s.shadow_css(), "0 4px 8px rgba(0,0,0,0.1)");
}

#[test]
fn background_css_transparent_unless_enabled() {
    let mut s = BoxStyle::default();
    assert_eq!(s.background_css(), "transparent");
    s.has_background = true;
    assert_eq!(s.background_css(), "white");
}

// =============================================================
// Image placement
// =============================================================

#[test]
fn cover_fills_and_crops() {
    let s = ImageSettings { fit: ImageFit::Cover, width: 400.0, height: 200.0, scale: None };
    let r = s.content_rect(Size::new(200.0, 200.0));
    assert_eq!(r.height, 200.0);
    assert_eq!(r.width, 400.0);
    assert_eq!(r.x, -100.0);
    assert_eq!(r.y, 0.0);
}

#[test]
fn contain_letterboxes() {
    let s = ImageSettings { fit: ImageFit::Contain, width: 400.0, height: 200.0, scale: None };
    let r = s.content_rect(Size::new(200.0, 200.0));
    assert_eq!(r.width, 200.0);
    assert_eq!(r.height, 100.0);
    assert_eq!(r.y, 50.0);
}

#[test]
fn original_uses_intrinsic_size_times_scale() {
    let s = ImageSettings { fit: ImageFit::Original, width: 100.0, height: 50.0, scale: Some(2.0) };
    let r = s.content_rect(Size::new(300.0, 300.0));
    assert_eq!(r, Rect::new(50.0, 100.0, 200.0, 100.0));
}

#[test]
fn zero_intrinsic_size_fills_frame() {
    let s = ImageSettings { fit: ImageFit::Cover, width: 0.0, height: 0.0, scale: None };
    assert_eq!(s.content_rect(Size::new(80.0, 60.0)), Rect::new(0.0, 0.0, 80.0, 60.0));
}

// =============================================================
// Box construction
// =============================================================

#[test]
fn text_box_is_centered_200_by_100() {
    let b = text_box(1);
    assert_eq!(b.kind(), BoxKind::Text);
    assert_eq!((b.x, b.y, b.width, b.height), (1180.0, 670.0, 200.0, 100.0));
    assert_eq!(b.content, BoxContent::Text { text: DEFAULT_TEXT.into() });
}

#[test]
fn small_image_keeps_intrinsic_size() {
    let b = CanvasBox::image(image_source(640.0, 480.0), canvas(), 1);
    assert_eq!((b.width, b.height), (640.0, 480.0));
    assert_eq!((b.x, b.y), (960.0, 480.0));
    let settings = b.image_settings.unwrap();
    assert_eq!(settings.fit, ImageFit::Cover);
    assert_eq!((settings.width, settings.height), (640.0, 480.0));
}

#[test]
fn wide_image_is_limited_to_seventy_percent_width() {
    let b = CanvasBox::image(image_source(3584.0, 1000.0), canvas(), 1);
    assert!((b.width - 1792.0).abs() < 1e-9);
    assert!((b.height - 500.0).abs() < 1e-9);
}

#[test]
fn tall_image_is_limited_on_both_axes() {
    let b = CanvasBox::image(image_source(1000.0, 4000.0), canvas(), 1);
    assert!((b.height - 1008.0).abs() < 1e-9);
    assert!((b.width - 252.0).abs() < 1e-9);
}

#[test]
fn tiny_image_is_floored() {
    let b = CanvasBox::image(image_source(10.0, 10.0), canvas(), 1);
    assert_eq!((b.width, b.height), (MIN_BOX_SIZE, MIN_BOX_SIZE));
}

// =============================================================
// BoxStore
// =============================================================

#[test]
fn store_insert_returns_positional_index() {
    let mut store = BoxStore::new();
    assert_eq!(store.insert(text_box(1)), 0);
    assert_eq!(store.insert(text_box(2)), 1);
    assert_eq!(store.len(), 2);
}

#[test]
fn store_insert_floors_size() {
    let mut store = BoxStore::new();
    let mut b = text_box(1);
    b.width = 5.0;
    b.height = -3.0;
    let id = b.id;
    store.insert(b);
    let b = store.get(&id).unwrap();
    assert_eq!((b.width, b.height), (MIN_BOX_SIZE, MIN_BOX_SIZE));
}

#[test]
fn store_remove_returns_index_and_shifts() {
    let mut store = BoxStore::new();
    let a = text_box(1);
    let b = text_box(2);
    let (a_id, b_id) = (a.id, b.id);
    store.insert(a);
    store.insert(b);
    let (index, removed) = store.remove(&a_id).unwrap();
    assert_eq!(index, 0);
    assert_eq!(removed.id, a_id);
    assert_eq!(store.index_of(&b_id), Some(0));
    assert!(store.remove(&a_id).is_none());
}

#[test]
fn store_max_z_index_never_negative() {
    let mut store = BoxStore::new();
    assert_eq!(store.max_z_index(), 0);
    store.insert(text_box(-4));
    assert_eq!(store.max_z_index(), 0);
    store.insert(text_box(7));
    assert_eq!(store.max_z_index(), 7);
}

#[test]
fn set_position_moves_box() {
    let mut store = BoxStore::new();
    let b = text_box(1);
    let id = b.id;
    store.insert(b);
    assert!(store.set_position(&id, -20.0, 33.5));
    let b = store.get(&id).unwrap();
    assert_eq!((b.x, b.y), (-20.0, 33.5));
    assert!(!store.set_position(&Uuid::new_v4(), 0.0, 0.0));
}

#[test]
fn set_geometry_floors_size() {
    let mut store = BoxStore::new();
    let b = text_box(1);
    let id = b.id;
    store.insert(b);
    assert!(store.set_geometry(&id, Rect::new(1.0, 2.0, 10.0, 400.0)));
    assert_eq!(store.get(&id).unwrap().rect(), Rect::new(1.0, 2.0, MIN_BOX_SIZE, 400.0));
}

#[test]
fn apply_partial_replaces_style_without_touching_geometry() {
    let mut store = BoxStore::new();
    let b = text_box(1);
    let id = b.id;
    let before = b.rect();
    store.insert(b);

    let style = BoxStyle { opacity: 1.7, has_border: true, ..BoxStyle::default() };
    assert!(store.apply_partial(&id, &PartialBox { style: Some(style), ..Default::default() }));

    let b = store.get(&id).unwrap();
    assert!(b.style.has_border);
    assert_eq!(b.style.opacity, 1.0);
    assert_eq!(b.rect(), before);
}

#[test]
fn apply_partial_rejects_kind_change() {
    let mut store = BoxStore::new();
    let b = text_box(1);
    let id = b.id;
    store.insert(b);
    let partial = PartialBox {
        content: Some(BoxContent::Image { source: "x".into() }),
        z_index: Some(9),
        ..Default::default()
    };
    assert!(!store.apply_partial(&id, &partial));
    assert_eq!(store.get(&id).unwrap().z_index, 1);
}

#[test]
fn apply_partial_rejects_image_settings_on_text() {
    let mut store = BoxStore::new();
    let b = text_box(1);
    let id = b.id;
    store.insert(b);
    let partial = PartialBox {
        image_settings: Some(ImageSettings { fit: ImageFit::Contain, width: 1.0, height: 1.0, scale: None }),
        ..Default::default()
    };
    assert!(!store.apply_partial(&id, &partial));
}

#[test]
fn apply_partial_updates_text_and_image_settings() {
    let mut store = BoxStore::new();
    let t = text_box(1);
    let i = CanvasBox::image(image_source(100.0, 100.0), canvas(), 2);
    let (t_id, i_id) = (t.id, i.id);
    store.insert(t);
    store.insert(i);

    let text = PartialBox { content: Some(BoxContent::Text { text: "Hello".into() }), ..Default::default() };
    assert!(store.apply_partial(&t_id, &text));
    assert_eq!(store.get(&t_id).unwrap().content, BoxContent::Text { text: "Hello".into() });

    let settings = ImageSettings { fit: ImageFit::Original, width: 100.0, height: 100.0, scale: Some(1.5) };
    let img = PartialBox { image_settings: Some(settings), ..Default::default() };
    assert!(store.apply_partial(&i_id, &img));
    assert_eq!(store.get(&i_id).unwrap().fit(), Some(ImageFit::Original));
}

#[test]
fn apply_partial_missing_box_returns_false() {
    let mut store = BoxStore::new();
    assert!(!store.apply_partial(&Uuid::new_v4(), &PartialBox::default()));
}

#[test]
fn move_forward_and_backward_step_by_one() {
    let mut store = BoxStore::new();
    let b = text_box(3);
    let id = b.id;
    store.insert(b);
    assert_eq!(store.move_forward(&id), Some(4));
    assert_eq!(store.move_backward(&id), Some(3));
    assert_eq!(store.move_backward(&id), Some(2));
    assert_eq!(store.move_forward(&Uuid::new_v4()), None);
}

#[test]
fn sorted_boxes_orders_by_z_then_insertion() {
    let mut store = BoxStore::new();
    let a = text_box(2);
    let b = text_box(1);
    let c = text_box(2);
    let ids = [a.id, b.id, c.id];
    store.insert(a);
    store.insert(b);
    store.insert(c);
    let order: Vec<BoxId> = store.sorted_boxes().iter().map(|b| b.id).collect();
    assert_eq!(order, vec![ids[1], ids[0], ids[2]]);
}

#[test]
fn sorted_boxes_follows_z_changes() {
    let mut store = BoxStore::new();
    let a = text_box(1);
    let b = text_box(2);
    let (a_id, b_id) = (a.id, b.id);
    store.insert(a);
    store.insert(b);
    store.move_forward(&a_id);
    store.move_forward(&a_id);
    let order: Vec<BoxId> = store.sorted_boxes().iter().map(|b| b.id).collect();
    assert_eq!(order, vec![b_id, a_id]);
}
