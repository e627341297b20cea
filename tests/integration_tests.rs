//! Integration tests for tsp_mix

use tsp_mix::pipeline::AbortBefore;
use tsp_mix::*;

/// Library document with one playlist of five tracks and one broken playlist
const LIBRARY: &str = r#"{
    "playlists": [
        {
            "name": "Sunday",
            "uri": "playlist:sunday",
            "tracks": [
                {"uri": "track:1", "name": "Slow Start", "artists": ["Ada"],
                 "features": {"danceability": 0.31, "energy": 0.22, "key": 0.0, "loudness": 0.40,
                              "mode": 1.0, "speechiness": 0.04, "acousticness": 0.91,
                              "instrumentalness": 0.10, "liveness": 0.11, "valence": 0.30, "tempo": 0.42}},
                {"uri": "track:2", "name": "Peak", "artists": ["Bea", "Cal"],
                 "features": {"danceability": 0.82, "energy": 0.93, "key": 0.5, "loudness": 0.88,
                              "mode": 0.0, "speechiness": 0.10, "acousticness": 0.03,
                              "instrumentalness": 0.00, "liveness": 0.31, "valence": 0.77, "tempo": 0.71}},
                {"uri": "track:3", "name": "Drift", "artists": ["Ada"],
                 "features": {"danceability": 0.35, "energy": 0.28, "key": 0.2, "loudness": 0.45,
                              "mode": 1.0, "speechiness": 0.05, "acousticness": 0.85,
                              "instrumentalness": 0.20, "liveness": 0.09, "valence": 0.36, "tempo": 0.44}},
                {"uri": "track:4", "name": "Climb", "artists": ["Dee"],
                 "features": {"danceability": 0.61, "energy": 0.66, "key": 0.9, "loudness": 0.70,
                              "mode": 0.0, "speechiness": 0.07, "acousticness": 0.21,
                              "instrumentalness": 0.01, "liveness": 0.15, "valence": 0.58, "tempo": 0.60}},
                {"uri": "track:5", "name": "Afterglow", "artists": [],
                 "features": {"danceability": 0.70, "energy": 0.80, "key": 0.4, "loudness": 0.79,
                              "mode": 1.0, "speechiness": 0.06, "acousticness": 0.10,
                              "instrumentalness": 0.02, "liveness": 0.20, "valence": 0.69, "tempo": 0.66}}
            ]
        },
        {
            "name": "Broken",
            "tracks": [
                {"uri": "track:9", "name": "No Analysis", "features": null},
                {"uri": "track:8", "name": "Fine", "features": {"energy": 0.5}}
            ]
        }
    ]
}"#;

fn line_items(values: &[f64]) -> Vec<Item> {
    values
        .iter()
        .enumerate()
        .map(|(i, v)| Item::bare(format!("t{}", i), vec![*v]))
        .collect()
}

fn line_config() -> MixConfig {
    MixConfig::default().with_weights(FeatureWeights::new().with("x", 1.0))
}

#[test]
fn test_four_item_scenario() {
    let items = line_items(&[0.0, 1.0, 5.0, 6.0]);
    let schema = FeatureSchema::new(["x"]);
    let pipeline = Pipeline::new(line_config()).unwrap();

    // Stage by stage
    let weights = line_config().weights.resolve(&schema).unwrap();
    let distances = DistanceMatrix::build(&items, &weights).unwrap();
    assert_eq!(distances.get(0, 3), 6.0);
    assert!(distances.get(2, 2).is_infinite());

    let tree = SpanningTree::build(&distances).unwrap();
    let edges: Vec<(usize, usize)> = tree.edges().iter().map(|e| (e.parent, e.child)).collect();
    assert_eq!(edges, vec![(0, 1), (1, 2), (2, 3)]);
    assert_eq!(tree.total_weight(), 6.0);

    let matching = match_odd_vertices(tree.graph(), &distances).unwrap();
    assert_eq!(matching.pairs, vec![(0, 3)]);

    let walk = eulerian_walk(&matching.graph, 0).unwrap();
    assert_eq!(walk, vec![0, 1, 2, 3, 0]);
    assert_eq!(shortcut(&walk, 4).unwrap(), vec![0, 1, 2, 3]);

    // End to end
    let outcome = pipeline.run(&items, &schema, &mut NoopObserver).unwrap();
    assert_eq!(outcome.ordering, vec![0, 1, 2, 3]);
    assert_eq!(outcome.ids(&items), vec!["t0", "t1", "t2", "t3"]);
    assert_eq!(outcome.path_cost, 6.0);
}

#[test]
fn test_two_items() {
    let items = line_items(&[3.0, 1.0]);
    let outcome = Pipeline::new(line_config())
        .unwrap()
        .run(&items, &FeatureSchema::new(["x"]), &mut NoopObserver)
        .unwrap();
    assert_eq!(outcome.ordering, vec![0, 1]);
    assert_eq!(outcome.tree_weight, 2.0);
}

#[test]
fn test_library_to_sink() {
    let library = PlaylistLibrary::from_json(LIBRARY).unwrap();
    assert_eq!(library.list(), vec!["1: Sunday", "2: Broken"]);

    let source = library.select(1).unwrap();
    let mut session = MixSession::new(source, JsonOrderSink::new(Vec::new()));
    let mut timing = StageTimingObserver::new();

    let outcome = session.run(MixConfig::default(), &mut timing).unwrap();
    assert_eq!(outcome.ordering, vec![0, 1, 4, 3, 2]);
    assert_eq!(timing.reports().len(), 5);

    let (_, sink) = session.into_parts();
    let written = String::from_utf8(sink.into_inner()).unwrap();
    let doc: serde_json::Value = serde_json::from_str(written.trim()).unwrap();
    assert_eq!(doc["name"], "Sunday - mix");
    assert_eq!(
        doc["uris"],
        serde_json::json!(["track:1", "track:2", "track:5", "track:4", "track:3"])
    );
}

#[test]
fn test_library_render_tree() {
    let library = PlaylistLibrary::from_json(LIBRARY).unwrap();
    let items = library.select(1).unwrap().items().unwrap();
    let weights = FeatureWeights::audio_defaults()
        .resolve(&FeatureSchema::audio_features())
        .unwrap();
    let distances = DistanceMatrix::build(&items, &weights).unwrap();
    let tree = SpanningTree::build(&distances).unwrap();

    let view = tree.render(&items);
    assert!(view.starts_with("0. Slow Start  -  Ada"));
    assert!(view.contains("1. Peak  -  Bea, Cal"));
    assert!(view.contains(" ㄴ-- "));
    assert_eq!(tree.edge_count(), 4);
}

#[test]
fn test_broken_playlist() {
    let library = PlaylistLibrary::from_json(LIBRARY).unwrap();
    let mut session = MixSession::new(library.select(2).unwrap(), VecSink::new());
    let err = session.run(MixConfig::default(), &mut NoopObserver).unwrap_err();

    assert_eq!(err.code(), ErrorCode::InvalidInput);
    assert!(err.is_retryable_after_reconfigure());
    assert!(session.sink().submissions().is_empty());
}

#[test]
fn test_error_surfaces() {
    let pipeline = Pipeline::new(line_config()).unwrap();
    let schema = FeatureSchema::new(["x"]);

    // Empty and single inputs
    for n in 0..2 {
        let items = line_items(&vec![0.0; n]);
        let err = pipeline.run(&items, &schema, &mut NoopObserver).unwrap_err();
        assert_eq!(err.code(), ErrorCode::InvalidInput);
    }

    // Non-finite values
    let items = vec![Item::bare("a", vec![f64::NAN]), Item::bare("b", vec![0.0])];
    let err = pipeline.run(&items, &schema, &mut NoopObserver).unwrap_err();
    assert_eq!(err.code(), ErrorCode::InvalidInput);

    // Mismatched dimensions
    let items = vec![Item::bare("a", vec![1.0]), Item::bare("b", vec![0.0, 2.0])];
    let err = pipeline.run(&items, &schema, &mut NoopObserver).unwrap_err();
    assert_eq!(err.code(), ErrorCode::InvalidInput);

    // Abort
    let items = line_items(&[0.0, 1.0, 5.0, 6.0]);
    let err = pipeline
        .run(&items, &schema, &mut AbortBefore::new("circuit"))
        .unwrap_err();
    let report = PipelineRuntimeError::from(&err);
    assert_eq!(report.code, ErrorCode::Aborted);
    assert_eq!(report.stage, "circuit");
}

#[test]
fn test_json_interface() {
    let out = json::order_from_json(
        r#"{
            "features": ["x"],
            "weights": {"x": 2.0},
            "items": [
                {"id": "a", "values": [0]},
                {"id": "b", "values": [1]},
                {"id": "c", "values": [5]},
                {"id": "d", "values": [6]}
            ]
        }"#,
    );
    let v: serde_json::Value = serde_json::from_str(&out).unwrap();
    assert_eq!(v["ids"], serde_json::json!(["a", "b", "c", "d"]));
    assert_eq!(v["tree_weight"], 12.0);
}

#[test]
fn test_config_from_json() {
    let config: MixConfig = serde_json::from_str(
        r#"{"weights": {"x": 1.0}, "walk_start": "highest_index", "max_items": 10}"#,
    )
    .unwrap();
    assert!(config.validate().is_ok());
    assert_eq!(config.walk_start, WalkStart::HighestIndex);
    assert_eq!(config.mix_suffix, " - mix");

    let defaults: MixConfig = serde_json::from_str("{}").unwrap();
    assert_eq!(defaults, MixConfig::default());
}

#[test]
fn test_determinism() {
    let items = line_items(&[4.0, 0.5, 9.0, 2.0, 7.5, 3.3, 8.1]);
    let schema = FeatureSchema::new(["x"]);
    let pipeline = Pipeline::new(line_config()).unwrap();

    let a = pipeline.run(&items, &schema, &mut NoopObserver);
    let b = pipeline.run(&items, &schema, &mut NoopObserver);
    assert_eq!(a, b);
}

#[test]
fn test_version() {
    assert!(!VERSION.is_empty());
}
