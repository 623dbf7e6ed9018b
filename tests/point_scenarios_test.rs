mod common;

use common::{at, created_at, point};
use corridormap::core::{Element, Geometry};
use corridormap::pipeline::{AggregationParams, AggregationResult, Aggregator};
use pretty_assertions::assert_eq;

fn run(elements: &[Element], params: AggregationParams) -> AggregationResult {
    Aggregator::default()
        .run(elements, &params, created_at())
        .unwrap()
}

fn member_sets(result: &AggregationResult) -> Vec<Vec<String>> {
    let mut sets: Vec<Vec<String>> = result
        .corridors
        .iter()
        .map(|c| {
            let mut ids: Vec<String> = c.member_ids.iter().map(|id| id.to_string()).collect();
            ids.sort();
            ids
        })
        .collect();
    sets.sort();
    sets
}

#[test]
fn test_two_separated_pairs_form_two_corridors() {
    let elements = vec![
        point("a1", 0.0, 0.0, 0.9),
        point("a2", 20.0, 0.0, 0.8),
        point("b1", 60.0, 0.0, 0.85),
        point("b2", 80.0, 0.0, 0.75),
    ];
    let result = run(&elements, AggregationParams::point(0.7, 30.0, 2));

    assert_eq!(
        member_sets(&result),
        vec![
            vec!["a1".to_string(), "a2".to_string()],
            vec!["b1".to_string(), "b2".to_string()],
        ]
    );
    for corridor in &result.corridors {
        assert_eq!(corridor.num_points(), Some(2));
        assert!((corridor.length_m - 20.0).abs() < 0.1);
    }
}

#[test]
fn test_point_floor_drops_small_groups() {
    let elements = vec![
        point("a1", 0.0, 0.0, 0.9),
        point("a2", 20.0, 0.0, 0.8),
        point("b1", 500.0, 0.0, 0.9),
        point("b2", 520.0, 0.0, 0.9),
        point("b3", 540.0, 0.0, 0.9),
    ];
    let result = run(&elements, AggregationParams::point(0.7, 30.0, 3));

    assert_eq!(result.corridors.len(), 1);
    assert_eq!(result.corridors[0].member_count, 3);
    assert_eq!(result.orphans, vec![0, 1]);
}

#[test]
fn test_path_starts_at_westernmost_point() {
    let elements = vec![
        point("mid", 25.0, 0.0, 0.9),
        point("east", 50.0, 0.0, 0.9),
        point("west", 0.0, 0.0, 0.9),
    ];
    let result = run(&elements, AggregationParams::point(0.7, 30.0, 3));
    let corridor = &result.corridors[0];

    let ids: Vec<&str> = corridor.member_ids.iter().map(|id| id.as_str()).collect();
    assert_eq!(ids, vec!["west", "mid", "east"]);
    assert_eq!(
        corridor.geometry,
        Geometry::LineString(vec![at(0.0, 0.0), at(25.0, 0.0), at(50.0, 0.0)])
    );
    assert_eq!(corridor.member_indices, vec![0, 1, 2]);
}

#[test]
fn test_chain_links_through_intermediate_points() {
    let elements: Vec<Element> = (0..10)
        .map(|i| point(&format!("p{}", i), i as f64 * 25.0, 0.0, 0.9))
        .collect();
    let result = run(&elements, AggregationParams::point(0.7, 30.0, 3));

    assert_eq!(result.corridors.len(), 1);
    assert_eq!(result.corridors[0].member_count, 10);
    assert!((result.corridors[0].length_m - 225.0).abs() < 0.5);
}

#[test]
fn test_point_mode_reports_every_point() {
    let elements = vec![
        point("hot", 0.0, 0.0, 0.9),
        point("cool", 10.0, 0.0, 0.2),
        Element::new("road", Geometry::LineString(vec![at(0.0, 0.0), at(10.0, 0.0)]))
            .with_priority(0.9),
    ];
    let result = run(&elements, AggregationParams::point(0.7, 30.0, 1));

    assert_eq!(result.all_points, Some(vec![0, 1]));
    assert_eq!(result.eligible, vec![0, 2]);
    assert_eq!(result.excluded.len(), 1);
    assert_eq!(result.excluded[0].id.as_str(), "road");
    assert_eq!(result.orphans, vec![2]);
}

#[test]
fn test_many_coincident_points_form_one_corridor() {
    // repeated samples at one stop, more than a k-d tree bucket holds
    let mut elements: Vec<Element> = (0..40)
        .map(|i| point(&format!("p{:02}", i), 0.0, 0.0, 0.9))
        .collect();
    elements.push(point("q", 20.0, 0.0, 0.9));

    let result = run(&elements, AggregationParams::point(0.7, 30.0, 2));

    assert_eq!(result.corridors.len(), 1);
    let corridor = &result.corridors[0];
    assert_eq!(corridor.num_points(), Some(41));
    assert_eq!(corridor.member_ids.first().map(|id| id.to_string()), Some("p00".to_string()));
    assert_eq!(corridor.member_ids.last().map(|id| id.to_string()), Some("q".to_string()));
    assert!((corridor.length_m - 20.0).abs() < 0.1);
    assert!(result.orphans.is_empty());
}
