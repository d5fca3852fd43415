use std::path::PathBuf;

use epiworld::{
    pipeline,
    profile::{BuildProfile, ProfileLoader},
    region::read_regions,
    writer::load_world,
    WorldBuilder, WorldError,
};

fn profile_loader() -> ProfileLoader {
    ProfileLoader::new(env!("CARGO_MANIFEST_DIR"))
}

fn profile_path() -> PathBuf {
    PathBuf::from("profiles/sample.yaml")
}

fn sample_csv() -> String {
    let path = PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("data/sample_regions.csv");
    std::fs::read_to_string(path).expect("fixture exists")
}

/// Swap two data rows, leaving the header in place.
fn swap_rows(csv: &str, a: usize, b: usize) -> String {
    let mut lines: Vec<&str> = csv.lines().collect();
    lines.swap(a + 1, b + 1);
    lines.join("\n") + "\n"
}

#[test]
fn profile_loader_reads_fixture() {
    let profile = profile_loader().load(profile_path()).expect("profile parses");
    assert_eq!(profile.name, "sample");
    assert_eq!(profile.map, 0);
    assert!(profile.input.ends_with("data/sample_regions.csv"));
    assert_eq!(profile.edge_interactivity, 10.0);
}

#[test]
fn builds_sparse_world_from_fixture() {
    let profile = profile_loader().load(profile_path()).unwrap();
    let world = pipeline::build(&profile).unwrap();

    assert_eq!(world.nodes.len(), 5);
    // Ten pairs; Inverness<->Lerwick falls below one traveller a day.
    assert_eq!(world.edges.len(), 9);
    assert!(world.edges.iter().all(|e| e.left < e.right && e.right < 5));
    assert!(!world
        .edges
        .iter()
        .any(|e| e.left == 3 && e.right == 4));

    let london_manchester = &world.edges[0];
    assert_eq!(london_manchester.name, "London<->Manchester");
    assert_eq!(london_manchester.population, 50_713);
    assert_eq!(london_manchester.distance, 262);
    assert_eq!(london_manchester.interactivity, 10.0);

    assert_eq!(world.edges_for(0).count(), 4);
    assert_eq!(world.nodes[4].name, "Lerwick");
    assert_eq!(world.nodes[4].interactivity.over_eighty_five, 1.5);
    assert_eq!(world.nodes[0].demographics.under_five, 0.07);
}

#[test]
fn pipeline_writes_loadable_document() {
    let temp = tempfile::tempdir().unwrap();
    let mut profile = profile_loader().load(profile_path()).unwrap();
    profile.worlds_dir = temp.path().join("WorldFiles");

    let summary = pipeline::run(&profile).unwrap();
    assert_eq!(summary.path, temp.path().join("WorldFiles").join("sample.json"));
    assert_eq!(summary.nodes, 5);
    assert_eq!(summary.edges, 9);

    let text = std::fs::read_to_string(&summary.path).unwrap();
    let json: serde_json::Value = serde_json::from_str(&text).unwrap();
    let keys: Vec<&String> = json.as_object().unwrap().keys().collect();
    assert_eq!(keys.len(), 4);
    for key in ["map", "virus", "nodes", "edges"] {
        assert!(json.get(key).is_some(), "missing top-level key {key}");
    }
    assert_eq!(json["nodes"][0]["testingCapacity"], 20_000);
    assert_eq!(json["nodes"][0]["position"]["x"], 0.0);
    assert_eq!(json["virus"]["fatality"]["fourtyToFourtyNine"], 0.013);

    let loaded = load_world(&summary.path).unwrap();
    assert_eq!(loaded, pipeline::build(&profile).unwrap());
}

#[test]
fn node_indices_follow_row_order() {
    let original = read_regions(sample_csv().as_bytes()).unwrap();
    let swapped = read_regions(swap_rows(&sample_csv(), 1, 2).as_bytes()).unwrap();

    let world_a = WorldBuilder::new(0).build(&original).unwrap();
    let world_b = WorldBuilder::new(0).build(&swapped).unwrap();

    assert_eq!(world_a.nodes[1], world_b.nodes[2]);
    assert_eq!(world_a.nodes[2], world_b.nodes[1]);
    assert_eq!(world_a.edges.len(), world_b.edges.len());

    let remap = |i: usize| match i {
        1 => 2,
        2 => 1,
        other => other,
    };
    for edge in &world_a.edges {
        let (left, right) = (remap(edge.left), remap(edge.right));
        let (left, right) = (left.min(right), left.max(right));
        let twin = world_b
            .edges
            .iter()
            .find(|e| e.left == left && e.right == right)
            .unwrap_or_else(|| panic!("no edge {left}-{right} after swap"));
        assert_eq!(twin.population, edge.population);
        assert_eq!(twin.distance, edge.distance);
    }
}

#[test]
fn zero_passengers_abort_without_output() {
    let temp = tempfile::tempdir().unwrap();
    let input = temp.path().join("still.csv");
    std::fs::write(
        &input,
        "id,name,population,a,b,c,d,e,f,g,h,i,gdp,tests,passengers,lat,lon,inter\n\
         0,A,10,0.1,0.1,0.1,0.1,0.1,0.1,0.1,0.1,0.2,1,1,0,1N,1E,1\n\
         1,B,10,0.1,0.1,0.1,0.1,0.1,0.1,0.1,0.1,0.2,1,1,0,2N,2E,1\n",
    )
    .unwrap();
    let mut profile = BuildProfile::new("still", 2, &input);
    profile.worlds_dir = temp.path().join("out");

    let err = pipeline::run(&profile).unwrap_err();
    assert!(matches!(err, WorldError::ZeroTotalPassengers));
    assert!(!profile.worlds_dir.join("still.json").exists());
}

#[test]
fn malformed_row_aborts_without_output() {
    let temp = tempfile::tempdir().unwrap();
    let input = temp.path().join("broken.csv");
    std::fs::write(&input, sample_csv().replace("0.1278W", "0.1278Q")).unwrap();
    let mut profile = BuildProfile::new("broken", 0, &input);
    profile.worlds_dir = temp.path().join("out");

    let err = pipeline::run(&profile).unwrap_err();
    assert!(matches!(
        err,
        WorldError::InvalidField {
            row: 1,
            column: "longitude",
            ..
        }
    ));
    assert!(!profile.worlds_dir.exists());
}

#[test]
fn passenger_overflow_aborts_without_output() {
    let temp = tempfile::tempdir().unwrap();
    let input = temp.path().join("busy.csv");
    std::fs::write(
        &input,
        "id,name,population,a,b,c,d,e,f,g,h,i,gdp,tests,passengers,lat,lon,inter\n\
         0,A,10,0.1,0.1,0.1,0.1,0.1,0.1,0.1,0.1,0.2,1,1,10000000000000000000,1N,1E,1\n\
         1,B,10,0.1,0.1,0.1,0.1,0.1,0.1,0.1,0.1,0.2,1,1,10000000000000000000,2N,2E,1\n",
    )
    .unwrap();
    let mut profile = BuildProfile::new("busy", 0, &input);
    profile.worlds_dir = temp.path().join("out");

    let err = pipeline::run(&profile).unwrap_err();
    assert!(matches!(err, WorldError::CountOverflow { .. }));
    assert!(!profile.worlds_dir.exists());
}
