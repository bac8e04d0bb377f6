use bevtrail::{
    Canvas, ColorScheme, Engine, EngineConfig, Handled, Layers, RecordingCanvas, TrackKey,
};
use serde_json::json;

fn engine(config: EngineConfig) -> Engine<RecordingCanvas> {
    let layers = Layers::new(
        RecordingCanvas::new(800, 600),
        RecordingCanvas::new(800, 600),
        RecordingCanvas::new(800, 600),
    )
    .unwrap();

    Engine::new(config, layers).unwrap()
}

fn small_config() -> EngineConfig {
    EngineConfig {
        history_len: 3,
        ttl_frames: 2,
        jump_threshold_px: 80.0,
        gap_frames: 2,
        break_on_camera_change: true,
        ..Default::default()
    }
}

fn frame(data: serde_json::Value) -> String {
    json!({"type": "detected_data", "data": data}).to_string()
}

fn scoped(cam: &str, local: &str) -> TrackKey {
    TrackKey::Scoped {
        camera: cam.into(),
        local: local.into(),
    }
}

#[test]
fn track_lifecycle_walkthrough() {
    let mut e = engine(small_config());
    let key = scoped("0", "5");

    // tick 1
    e.ingest(&frame(json!({"0": {"5": {"x": 10, "y": 10}}}))).unwrap();
    let track = e.store().get(&key).unwrap();
    let history: Vec<_> = track.history().iter().map(|p| (p.pos.x, p.pos.y, p.tick)).collect();
    assert_eq!(history, vec![(10.0, 10.0, 1)]);
    assert_eq!(&*track.history().latest().unwrap().camera_id, "0");
    assert_eq!(e.layers().trails.polylines().count(), 0);

    // tick 2
    e.ingest(&frame(json!({"0": {"5": {"x": 12, "y": 11}}}))).unwrap();
    let history: Vec<_> = e
        .store()
        .get(&key)
        .unwrap()
        .history()
        .iter()
        .map(|p| (p.pos.x, p.pos.y, p.tick))
        .collect();
    assert_eq!(history, vec![(10.0, 10.0, 1), (12.0, 11.0, 2)]);

    let lines: Vec<_> = e.layers().trails.polylines().collect();
    assert_eq!(lines.len(), 1);
    assert_eq!(lines[0].0.len(), 2);

    // ticks 3 and 4: unseen but within ttl
    for tick in 3..=4 {
        e.ingest(&frame(json!({}))).unwrap();
        assert_eq!(e.tick(), tick);

        let track = e.store().get(&key).unwrap();
        assert_eq!(track.last_seen_tick(), 2);
        assert!(e.visible().is_empty());
        assert_eq!(e.layers().markers.discs().count(), 0);
        assert_eq!(e.layers().trails.polylines().count(), 1);
    }

    // tick 5: 5 - 2 > 2
    let handled = e.ingest(&frame(json!({}))).unwrap();
    assert_eq!(
        handled,
        Handled::Frame {
            tick: 5,
            visible: 0,
            evicted: vec![key.clone()]
        }
    );
    assert!(e.store().get(&key).is_none());
    assert_eq!(e.layers().trails.polylines().count(), 0);
}

#[test]
fn jump_breaks_trail() {
    let mut e = engine(EngineConfig::default());

    for (x, tick) in [(10, 4), (12, 5), (212, 6)] {
        e.ingest(&frame(json!({"0": {"5": {"x": x, "y": 10}}}))).unwrap();
        assert_eq!(e.tick(), tick - 3);
    }

    let lines: Vec<_> = e.layers().trails.polylines().collect();
    assert_eq!(lines.len(), 1);
    assert_eq!(lines[0].0.len(), 2);
    assert_eq!(lines[0].0[1].x, 12.0);
}

#[test]
fn global_id_merges_cameras_into_one_track() {
    let mut e = engine(EngineConfig::default());

    e.ingest(&frame(json!({
        "0": {"5": {"x": 10, "y": 10, "global_id": 42}},
        "1": {"9": {"x": 400, "y": 10, "global_id": 42}}
    })))
    .unwrap();

    assert_eq!(e.store().len(), 1);

    let key = TrackKey::Global("42".into());
    assert_eq!(key.to_string(), "G42");

    let track = e.store().get(&key).unwrap();
    let cams: Vec<_> = track.history().iter().map(|p| p.camera_id.to_string()).collect();
    assert_eq!(cams, vec!["0", "1"]);

    // both detections are current, so both get a marker
    assert_eq!(e.layers().markers.discs().count(), 2);
    assert!(e.layers().markers.labels().all(|l| l == "G42"));
}

#[test]
fn camera_change_never_stroked() {
    let mut e = engine(EngineConfig::default());

    let frames = [
        json!({"0": {"1": {"x": 100, "y": 100, "global_id": 1}}}),
        json!({"0": {"1": {"x": 105, "y": 100, "global_id": 1}}}),
        json!({"1": {"3": {"x": 110, "y": 100, "global_id": 1}}}),
        json!({"1": {"3": {"x": 115, "y": 100, "global_id": 1}}}),
    ];

    for f in frames {
        e.ingest(&frame(f)).unwrap();
    }

    let track = e.store().get(&TrackKey::Global("1".into())).unwrap();
    assert_eq!(track.history().len(), 4);

    let lines: Vec<Vec<f32>> = e
        .layers()
        .trails
        .polylines()
        .map(|(pts, _)| pts.iter().map(|p| p.x).collect())
        .collect();
    assert_eq!(lines, vec![vec![100.0, 105.0], vec![110.0, 115.0]]);
}

#[test]
fn camera_change_connects_when_allowed() {
    let mut e = engine(EngineConfig {
        break_on_camera_change: false,
        ..Default::default()
    });

    e.ingest(&frame(json!({"0": {"1": {"x": 100, "y": 100, "global_id": 1}}}))).unwrap();
    e.ingest(&frame(json!({"1": {"3": {"x": 110, "y": 100, "global_id": 1}}}))).unwrap();

    assert_eq!(e.layers().trails.polylines().count(), 1);
}

#[test]
fn history_never_exceeds_capacity() {
    let mut e = engine(small_config());

    for i in 0..20 {
        e.ingest(&frame(json!({"0": {"1": {"x": i, "y": i}, "2": {"x": 2 * i, "y": i}}})))
            .unwrap();

        for (_, track) in e.store().entries() {
            assert!(track.history().len() <= 3);
        }
    }
}

#[test]
fn colors_stay_fixed_for_the_session() {
    let mut e = engine(EngineConfig {
        ttl_frames: 1,
        color_scheme: ColorScheme::Random { seed: None },
        ..Default::default()
    });
    let key = scoped("0", "1");

    e.ingest(&frame(json!({"0": {"1": {"x": 1, "y": 1}}}))).unwrap();
    let first = e.store().get(&key).unwrap().color();

    for _ in 0..3 {
        e.ingest(&frame(json!({}))).unwrap();
    }
    assert!(e.store().get(&key).is_none());

    e.ingest(&frame(json!({"0": {"1": {"x": 1, "y": 1}}}))).unwrap();
    assert_eq!(e.store().get(&key).unwrap().color(), first);
    assert_eq!(e.visible()[0].color, first);
}

#[test]
fn bad_input_is_never_fatal() {
    let mut e = engine(EngineConfig::default());

    assert_eq!(e.ingest("not json").unwrap(), Handled::Dropped);
    assert_eq!(e.ingest(r#"{"type":"hello"}"#).unwrap(), Handled::Ignored);
    assert_eq!(e.tick(), 0);

    let handled = e
        .ingest(&frame(json!({"0": {"1": {"x": null, "y": 3}, "2": {"bev_x": 900, "bev_y": -5}}})))
        .unwrap();
    assert_eq!(
        handled,
        Handled::Frame {
            tick: 1,
            visible: 1,
            evicted: vec![]
        }
    );

    // clamped into the 800x600 surface
    let pos = e.visible()[0].pos;
    assert_eq!((pos.x, pos.y), (800.0, 0.0));
    assert_eq!(e.layers().markers.dims(), (800, 600));
}
