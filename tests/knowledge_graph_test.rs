use readgraph::graph::{sample_catalog, ContentNode, ContentRelation, GraphSeed, KnowledgeGraph, RelationType};
use readgraph::{find_learning_path, find_related_content, get_cultural_context};
use readgraph::algo::TraversalConfig;

fn sample() -> KnowledgeGraph {
    KnowledgeGraph::from_seed(&sample_catalog()).unwrap()
}

fn traversal(max_hops: usize, limit: usize) -> TraversalConfig {
    TraversalConfig {
        max_hops,
        decay: 0.7,
        limit,
    }
}

/// Three books in a prerequisite chain, each tied to its own culture
fn book_chain() -> KnowledgeGraph {
    let mut graph = KnowledgeGraph::new();
    for (i, difficulty) in [(1, 0.3), (2, 0.5), (3, 0.7)] {
        graph.add_node(ContentNode::new(format!("book_00{}", i), "book").with_difficulty(difficulty));
        graph.add_node(ContentNode::new(format!("culture_00{}", i), "culture"));
        graph
            .add_relation(ContentRelation::new(
                format!("book_00{}", i),
                format!("culture_00{}", i),
                "cultural_context",
            ))
            .unwrap();
    }
    graph
        .add_relation(ContentRelation::weighted("book_001", "book_002", "prerequisite", 0.8))
        .unwrap();
    graph
        .add_relation(ContentRelation::weighted("book_002", "book_003", "prerequisite", 0.9))
        .unwrap();
    graph
}

#[test]
fn test_book_chain_related_within_limit() {
    let graph = book_chain();
    let related = find_related_content(&graph, "book_001", None, &traversal(2, 5));
    let ids: Vec<&str> = related.iter().map(|(id, _)| id.as_str()).collect();

    assert_eq!(ids, vec!["culture_001", "book_002", "culture_002", "book_003"]);
    assert!((related[1].1 - 0.56).abs() < 1e-9);
    assert!((related[3].1 - 0.8 * 0.9 * 0.7 * 0.7).abs() < 1e-9);
}

#[test]
fn test_book_chain_learning_path() {
    let graph = book_chain();
    assert_eq!(
        find_learning_path(&graph, "book_001", "book_003", 0.3),
        vec!["book_001", "book_002", "book_003"]
    );
}

#[test]
fn test_learning_path_through_prerequisites() {
    let graph = sample();
    let path = find_learning_path(&graph, "book_001", "book_003", 0.3);
    assert_eq!(path, vec!["book_001", "book_002", "book_003"]);
}

#[test]
fn test_learning_path_unknown_ids() {
    let graph = sample();
    assert!(find_learning_path(&graph, "book_001", "missing", 0.3).is_empty());
    assert!(find_learning_path(&graph, "missing", "book_001", 0.3).is_empty());
    // Edges are directed
    assert!(find_learning_path(&graph, "book_003", "book_001", 0.3).is_empty());
}

#[test]
fn test_related_content_ordering() {
    let graph = sample();
    let related = find_related_content(&graph, "book_001", None, &traversal(2, 10));
    let ids: Vec<&str> = related.iter().map(|(id, _)| id.as_str()).collect();

    assert_eq!(&ids[..3], &["topic_001", "culture_001", "book_002"]);
    assert!(ids.contains(&"book_003"));
    assert!(!ids.contains(&"book_001"));
    assert!(related.windows(2).all(|w| w[0].1 >= w[1].1));

    let book_003 = related.iter().find(|(id, _)| id == "book_003").unwrap().1;
    assert!((book_003 - 0.8 * 0.7 * 0.9 * 0.7).abs() < 1e-9);
}

#[test]
fn test_related_content_limit_and_filter() {
    let graph = sample();
    assert_eq!(find_related_content(&graph, "book_001", None, &traversal(2, 5)).len(), 5);

    let prerequisites = [RelationType::Prerequisite];
    let related = find_related_content(&graph, "book_001", Some(&prerequisites), &traversal(3, 10));
    let ids: Vec<&str> = related.iter().map(|(id, _)| id.as_str()).collect();
    assert_eq!(ids, vec!["book_002", "book_003"]);

    assert!(find_related_content(&graph, "missing", None, &traversal(2, 10)).is_empty());
}

#[test]
fn test_cultural_context_of_books() {
    let graph = sample();
    let context = get_cultural_context(&graph, "book_002");
    assert_eq!(context.cultures, vec!["Amis"]);

    assert!(get_cultural_context(&graph, "topic_001").is_empty());
    assert!(get_cultural_context(&graph, "missing").is_empty());
}

#[test]
fn test_statistics_and_json_seed() {
    let json = r#"{
        "nodes": [
            {"id": "a", "type": "book", "properties": {"difficulty": 0.2}},
            {"id": "b", "type": "book", "properties": {"difficulty": 0.4}},
            {"id": "t", "type": "topic"}
        ],
        "relations": [
            {"source": "a", "target": "b", "relation_type": "prerequisite", "weight": 0.5},
            {"source": "a", "target": "t", "relation_type": "covers"}
        ]
    }"#;
    let graph = KnowledgeGraph::from_seed(&GraphSeed::from_json_str(json).unwrap()).unwrap();
    let stats = graph.statistics();

    assert_eq!(stats.num_nodes, 3);
    assert_eq!(stats.num_edges, 2);
    assert_eq!(stats.node_types.get("book"), Some(&2));
    assert_eq!(stats.relation_types.get("covers"), Some(&1));
    assert!((stats.average_degree - 2.0 / 3.0).abs() < 1e-12);
    assert_eq!(graph.relation("a", "t").unwrap().weight, 1.0);
}

#[test]
fn test_later_relation_replaces_earlier() {
    let mut graph = KnowledgeGraph::new();
    graph.add_node(ContentNode::new("a", "book"));
    graph.add_node(ContentNode::new("b", "book"));
    graph
        .add_relation(ContentRelation::weighted("a", "b", "related", 0.2))
        .unwrap();
    let first = find_related_content(&graph, "a", None, &traversal(1, 10));

    graph
        .add_relation(ContentRelation::weighted("a", "b", "prerequisite", 0.9))
        .unwrap();
    let second = find_related_content(&graph, "a", None, &traversal(1, 10));

    assert_eq!(graph.edge_count(), 1);
    assert!((first[0].1 - 0.14).abs() < 1e-12);
    assert!((second[0].1 - 0.63).abs() < 1e-12);
    assert_eq!(graph.edge_data("a", "b").type_name(), "prerequisite");
}
