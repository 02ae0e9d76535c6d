use growtree::{LabelSide, Point, Progress, SceneLayout, StageConfig, Stage};

fn layout() -> SceneLayout {
    Stage::builtin(StageConfig::default())
        .unwrap()
        .layout()
        .clone()
}

#[test]
fn children_start_where_parents_end() {
    let stage = Stage::builtin(StageConfig::default()).unwrap();
    let layout = stage.layout();
    for node in stage.tree().iter() {
        let Some(parent) = layout.edge(&node.id) else {
            continue;
        };
        for child in &node.children {
            let edge = layout.edge(&child.id).unwrap();
            assert!(edge.line.p0.distance(parent.end()) < 1e-9);
            assert_eq!(edge.depth, parent.depth + 1);
            assert!((edge.length - parent.length * 0.75).abs() < 1e-9);
        }
    }
}

#[test]
fn trunk_is_vertical_from_base() {
    let layout = layout();
    let trunk = layout.edge("src").unwrap();
    assert_eq!(trunk.depth, 0);
    assert_eq!(trunk.line.p0, Point::new(400.0, 520.0));
    assert!((trunk.end().x - 400.0).abs() < 1e-9);
    assert!((trunk.end().y - 380.0).abs() < 1e-9);
    assert_eq!(trunk.stroke_width, 10.0);
    assert!(trunk.label.is_none());
}

#[test]
fn deeper_edges_start_later_and_thinner() {
    let layout = layout();
    let src = layout.edge("src").unwrap();
    let components = layout.edge("components").unwrap();
    let button = layout.edge("button").unwrap();
    assert!(src.timing.start < components.timing.start);
    assert!(components.timing.start < button.timing.start);
    assert_eq!(components.stroke_width, 7.5);
    assert_eq!(button.stroke_width, 5.0);
}

#[test]
fn sibling_labels_split_left_and_right() {
    let layout = layout();
    assert_eq!(layout.edge("button").unwrap().label.unwrap().side, LabelSide::Left);
    assert_eq!(layout.edge("card").unwrap().label.unwrap().side, LabelSide::Right);
}

#[test]
fn growth_targets_are_monotonic() {
    let layout = layout();
    for edge in &layout.edges {
        let mut last = 0.0;
        for i in 0..=50 {
            let t = edge.timing.targets(Progress::new(f64::from(i) / 50.0));
            assert!(t.draw >= last);
            assert!((0.0..=1.0).contains(&t.opacity));
            last = t.draw;
        }
        assert_eq!(last, 1.0);
    }
}

#[test]
fn seed_changes_wobble_but_not_topology() {
    let a = layout();
    let cfg = StageConfig {
        seed: 7,
        ..StageConfig::default()
    };
    let b = Stage::builtin(cfg).unwrap().layout().clone();
    assert_eq!(a.edges.len(), b.edges.len());
    assert_ne!(a, b);
    assert_eq!(a.edge("src"), b.edge("src"));
}

#[test]
fn disabling_organic_removes_wobble() {
    let cfg = StageConfig {
        organic: false,
        ..StageConfig::default()
    };
    let layout = Stage::builtin(cfg).unwrap().layout().clone();
    let index = layout.edge("index").unwrap();
    let app = layout.edge("app").unwrap();
    // First and second of four children in a 60-degree fan.
    assert!((index.angle_deg + 30.0).abs() < 1e-9);
    assert!((app.angle_deg + 10.0).abs() < 1e-9);
}
