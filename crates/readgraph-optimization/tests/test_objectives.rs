use readgraph_optimization::*;
use std::collections::HashMap;

#[test]
fn test_objective_set_from_json() {
    let json = r#"[
        {"name": "relevance", "weight": 0.5},
        {"name": "difficulty_match", "weight": 0.3, "maximize": false},
        {"name": "novelty", "weight": 0.2}
    ]"#;

    let set: ObjectiveSet = serde_json::from_str(json).expect("valid objective set");
    assert_eq!(set.names(), vec!["relevance", "difficulty_match", "novelty"]);
    assert!(set.get("relevance").unwrap().maximize);
    assert!(!set.get("difficulty_match").unwrap().maximize);
}

#[test]
fn test_negative_weight_rejected_at_deserialization() {
    let json = r#"[{"name": "relevance", "weight": -1.0}]"#;
    let result: Result<ObjectiveSet, _> = serde_json::from_str(json);
    assert!(result.is_err());
}

#[test]
fn test_repeated_feedback_keeps_unit_sum() {
    let mut set = ObjectiveSet::new(vec![
        Objective::new("relevance", 0.35, true),
        Objective::new("difficulty_match", 0.25, true),
        Objective::new("novelty", 0.20, true),
        Objective::new("engagement", 0.20, true),
    ])
    .unwrap();

    let rounds: Vec<HashMap<String, f64>> = vec![
        [("relevance".to_string(), 1.5)].into_iter().collect(),
        [("novelty".to_string(), 0.1), ("engagement".to_string(), 3.0)].into_iter().collect(),
        HashMap::new(),
    ];

    for feedback in &rounds {
        set.adjust(feedback).unwrap();
        assert!((set.total_weight() - 1.0).abs() < 1e-9);
    }
}

#[test]
fn test_aggregate_stays_in_unit_interval() {
    let set = ObjectiveSet::new(vec![
        Objective::new("a", 0.7, true),
        Objective::new("b", 0.3, false),
    ])
    .unwrap();

    for a in [0.0, 0.25, 1.0] {
        for b in [0.0, 0.5, 1.0] {
            let score = set.aggregate(&[a, b]);
            assert!((0.0..=1.0).contains(&score), "score {} out of range", score);
        }
    }
}

#[test]
fn test_pareto_fronts_with_minimized_axis_inverted() {
    let set = ObjectiveSet::new(vec![
        Objective::new("quality", 1.0, true),
        Objective::new("cost", 1.0, false),
    ])
    .unwrap();

    let raw = vec![vec![0.9, 0.1], vec![0.9, 0.5], vec![0.2, 0.9]];
    let oriented: Vec<Vec<f64>> = raw
        .iter()
        .map(|scores| {
            set.iter()
                .zip(scores.iter())
                .map(|(obj, &s)| obj.oriented(s))
                .collect()
        })
        .collect();

    let fronts = non_dominated_fronts(&oriented);
    assert_eq!(fronts[0], vec![0]);
    assert_eq!(fronts[1], vec![1]);
    assert_eq!(fronts[2], vec![2]);
}
