use trackexport::{Point, Project, Vec2, collect_composition};

fn approx(a: f64, b: f64) -> bool {
    (a - b).abs() < 1e-9
}

#[test]
fn static_layer_exports_eleven_identity_frames() {
    let project = Project::from_json_str(include_str!("data/static_comp.json")).unwrap();
    let rec = collect_composition(project.first_composition().unwrap()).unwrap();

    assert_eq!(rec.name, "Static");
    assert_eq!(rec.frame_rate, 10.0);
    assert_eq!(rec.layers.len(), 1);

    let layer = &rec.layers[0];
    assert_eq!(layer.name, "Solid 1");
    assert_eq!(layer.index, 1);
    assert_eq!(layer.kind, "ADBE AV Layer");
    assert_eq!(layer.frames.len(), 11);

    for (i, f) in layer.frames.iter().enumerate() {
        assert_eq!(f.frame, i as u64);
        assert!(approx(f.time, i as f64 / 10.0));
        assert_eq!(f.transform.rotation, 0.0);
        assert_eq!(f.transform.scale, Vec2::new(100.0, 100.0));
        assert_eq!(f.transform.opacity, 100.0);
        assert!(approx(f.transform.skew.x, 0.0));
        assert!(approx(f.transform.skew.y, 0.0));
        assert!(f.corner_pin.is_none());
        assert!(f.mesh_warp.is_none());
        assert!(f.tracker_points.is_empty());
        assert!(f.puppet_pins.is_empty());
    }
}

#[test]
fn tracked_layer_carries_every_feature() {
    let project = Project::from_json_str(include_str!("data/tracked_comp.json")).unwrap();
    let rec = collect_composition(project.composition("Shot 010").unwrap()).unwrap();

    assert_eq!((rec.width, rec.height), (1280, 720));
    assert_eq!(rec.layers.len(), 2);

    let plate = &rec.layers[0];
    assert_eq!(plate.frames.len(), 5);

    let mid = &plate.frames[2];
    assert_eq!(mid.frame, 2);
    assert!(approx(mid.time, 0.25));
    assert!(approx(mid.transform.position.x, 660.0));
    assert!(approx(mid.transform.position.y, 350.0));
    assert!(approx(mid.transform.rotation, 5.0));

    let names: Vec<&str> = mid.tracker_points.iter().map(|p| p.name.as_str()).collect();
    assert_eq!(names, vec!["Track Point 1", "Track Point 2"]);
    assert_eq!(mid.tracker_points[0].position, Point::new(100.0, 120.0));
    assert!(approx(mid.tracker_points[0].confidence, 0.75));
    assert!(approx(mid.tracker_points[1].confidence, 0.95));

    let mesh = mid.mesh_warp.as_ref().unwrap();
    assert_eq!((mesh.rows, mesh.columns), (2, 2));
    assert_eq!(mesh.vertices.len(), 4);
    assert_eq!((mesh.vertices[1].row, mesh.vertices[1].col), (0, 1));
    assert_eq!(mesh.vertices[1].position, Point::new(1280.0, 0.0));
    assert_eq!((mesh.vertices[2].row, mesh.vertices[2].col), (1, 0));

    let pin = mid.corner_pin.as_ref().unwrap();
    assert_eq!(pin.top_left, Point::new(10.0, 10.0));
    assert_eq!(pin.bottom_right, Point::new(1268.0, 710.0));

    let pins: Vec<&str> = mid.puppet_pins.iter().map(|p| p.name.as_str()).collect();
    assert_eq!(pins, vec!["Puppet Pin 1", "Puppet Pin 2"]);
    assert_eq!(mid.puppet_pins[1].position, Point::new(960.0, 500.0));
}

#[test]
fn layer_skew_is_recovered_from_the_matrix() {
    let project = Project::from_json_str(include_str!("data/tracked_comp.json")).unwrap();
    let rec = collect_composition(project.first_composition().unwrap()).unwrap();

    let first = &rec.layers[0].frames[0];
    assert!((first.transform.skew.x - 5.0).abs() < 1e-6);
    assert!(first.transform.skew.y.abs() < 1e-6);
}

#[test]
fn featureless_layer_alongside_tracked_one_stays_empty() {
    let project = Project::from_json_str(include_str!("data/tracked_comp.json")).unwrap();
    let rec = collect_composition(project.first_composition().unwrap()).unwrap();

    let null = &rec.layers[1];
    assert_eq!(null.kind, "ADBE Null Layer");
    assert_eq!(null.index, 2);
    assert_eq!(null.frames.len(), 5);
    for f in &null.frames {
        assert!(f.corner_pin.is_none());
        assert!(f.mesh_warp.is_none());
        assert!(f.tracker_points.is_empty());
        assert!(f.puppet_pins.is_empty());
    }
}

#[test]
fn composition_without_layers_exports_empty_list() {
    let project = Project::from_json_str(include_str!("data/tracked_comp.json")).unwrap();
    let rec = collect_composition(project.composition("2").unwrap()).unwrap();
    assert_eq!(rec.name, "Empty Precomp");
    assert!(rec.layers.is_empty());
}
