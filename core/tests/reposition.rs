use tilebridge_core::{plan_reposition, PositionSnapshot, Rect, TileId, FALLBACK_ORIGIN};

fn tile(id: &str) -> TileId {
    TileId::parse(id).expect("valid tile id")
}

fn snapshot(entries: &[(&str, Rect)]) -> PositionSnapshot<&'static str> {
    let mut snapshot = PositionSnapshot::new();
    for (id, rect) in entries {
        snapshot.insert(tile(id), "node", *rect);
    }
    snapshot
}

#[test]
fn unchanged_rects_schedule_nothing() {
    let rect = Rect::new(12.5, 40.0, 32.0, 48.0);
    let previous = snapshot(&[("a", rect), ("b", Rect::new(0.0, 0.0, 10.0, 10.0))]);
    let current = snapshot(&[("a", rect), ("b", Rect::new(0.0, 0.0, 10.0, 10.0))]);
    let plans = plan_reposition(&previous, &current, FALLBACK_ORIGIN);
    assert!(plans.is_empty());
}

#[test]
fn new_tiles_animate_from_fallback_origin() {
    let previous = snapshot(&[]);
    let current = snapshot(&[("fresh", Rect::new(100.0, 200.0, 50.0, 20.0))]);
    let plans = plan_reposition(&previous, &current, FALLBACK_ORIGIN);
    assert_eq!(plans.len(), 1);
    let plan = &plans[0];
    assert!(plan.introduced);
    assert_eq!(plan.from, Rect::new(0.0, 100.0, 1.0, 1.0));
    assert_eq!(plan.transform.dx, -100.0);
    assert_eq!(plan.transform.dy, -100.0);
    assert_eq!(plan.transform.sx, 1.0 / 50.0);
    assert_eq!(plan.transform.sy, 1.0 / 20.0);
}

#[test]
fn moved_tile_inverts_delta() {
    let previous = snapshot(&[("a", Rect::new(10.0, 10.0, 40.0, 40.0))]);
    let current = snapshot(&[("a", Rect::new(60.0, 30.0, 20.0, 80.0))]);
    let plans = plan_reposition(&previous, &current, FALLBACK_ORIGIN);
    assert_eq!(plans.len(), 1);
    let transform = plans[0].transform;
    assert_eq!((transform.dx, transform.dy), (-50.0, -20.0));
    assert_eq!((transform.sx, transform.sy), (2.0, 0.5));
    assert!(!plans[0].introduced);
}

#[test]
fn removed_tiles_are_ignored() {
    let previous = snapshot(&[("gone", Rect::new(0.0, 0.0, 10.0, 10.0))]);
    let current = snapshot(&[]);
    assert!(plan_reposition(&previous, &current, FALLBACK_ORIGIN).is_empty());
}

#[test]
fn only_changed_tiles_are_planned() {
    let previous = snapshot(&[
        ("a", Rect::new(0.0, 0.0, 10.0, 10.0)),
        ("b", Rect::new(20.0, 0.0, 10.0, 10.0)),
    ]);
    let current = snapshot(&[
        ("a", Rect::new(0.0, 0.0, 10.0, 10.0)),
        ("b", Rect::new(40.0, 0.0, 10.0, 10.0)),
        ("c", Rect::new(60.0, 0.0, 10.0, 10.0)),
    ]);
    let plans = plan_reposition(&previous, &current, FALLBACK_ORIGIN);
    let ids: Vec<&str> = plans.iter().map(|plan| plan.tile_id.as_str()).collect();
    assert_eq!(ids, vec!["b", "c"]);
}

#[test]
fn long_tile_ids_are_planned() {
    let raw = format!("tile-{}", "x".repeat(200));
    let previous = snapshot(&[]);
    let current = snapshot(&[(raw.as_str(), Rect::new(10.0, 10.0, 20.0, 20.0))]);
    let plans = plan_reposition(&previous, &current, FALLBACK_ORIGIN);
    assert_eq!(plans.len(), 1);
    assert_eq!(plans[0].tile_id.as_str(), raw);
}
