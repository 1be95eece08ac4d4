use super::*;
use crate::metadata::keys;
use pretty_assertions::assert_eq;

fn names(graph: &ProjectGraph, ids: &[NodeId]) -> Vec<String> {
    ids.iter()
        .filter_map(|&id| graph.node(id))
        .map(|n| n.name.clone())
        .collect()
}

fn child_names(graph: &ProjectGraph, name: &str) -> Vec<String> {
    let id = graph.find(name).unwrap();
    graph.children_of(id).map(|n| n.name.clone()).collect()
}

#[test]
fn test_file_mappings_and_link_list() {
    let content = "Собаки: Files/File1.doc\n\
                   Кошки: Files/File2.doc\n\
                   Животные: File3.doc\n\
                   Животные: (Собаки Кошки)\n";

    let graph = parse_links(content);

    assert_eq!(graph.len(), 3);
    let animals = graph.get("Животные").unwrap();
    assert_eq!(animals.children.len(), 2);
    assert_eq!(animals.file_path.as_deref(), Some("File3.doc"));
    assert_eq!(child_names(&graph, "Животные"), vec!["Собаки", "Кошки"]);

    let dogs = graph.get("Собаки").unwrap();
    assert_eq!(dogs.file_path.as_deref(), Some("Files/File1.doc"));
    let cats = graph.get("Кошки").unwrap();
    assert_eq!(cats.file_path.as_deref(), Some("Files/File2.doc"));

    assert_eq!(names(&graph, &graph.roots), vec!["Животные"]);
}

#[test]
fn test_pure_cycle_makes_every_node_a_root() {
    let graph = parse_links("A: (B)\nB: (A)");

    assert_eq!(graph.len(), 2);
    assert_eq!(graph.roots, vec![0, 1]);
    assert_eq!(names(&graph, &graph.roots), vec!["A", "B"]);
}

#[test]
fn test_self_loop_falls_back_to_all_roots() {
    let graph = parse_links("A: (A)");

    assert_eq!(graph.roots, vec![0]);
    assert_eq!(graph.nodes[0].children, vec![0]);
}

#[test]
fn test_cycle_below_an_entry_point() {
    let graph = parse_links("Entry: (A)\nA: (B)\nB: (A)");

    assert_eq!(names(&graph, &graph.roots), vec!["Entry"]);
}

#[test]
fn test_undeclared_children_become_placeholders() {
    let graph = parse_links("Root: (Missing Known)\nKnown: a.txt");

    assert_eq!(graph.len(), 3);
    let missing = graph.get("Missing").unwrap();
    assert!(missing.is_placeholder());
    assert_eq!(missing.file_path, None);
    assert!(!graph.get("Known").unwrap().is_placeholder());
    assert!(!graph.get("Root").unwrap().is_placeholder());

    // placeholders are appended after every declared node
    assert_eq!(graph.find("Missing"), Some(2));
    assert_eq!(child_names(&graph, "Root"), vec!["Missing", "Known"]);
    assert_eq!(names(&graph, &graph.roots), vec!["Root"]);
    assert_eq!(graph.metadata[keys::PLACEHOLDER_NODES].as_integer(), Some(1));
}

#[test]
fn test_duplicate_children_are_dropped() {
    let graph = parse_links("A: (B B C)\nA: (C D)");

    assert_eq!(child_names(&graph, "A"), vec!["B", "C", "D"]);
}

#[test]
fn test_names_are_case_insensitive() {
    let graph = parse_links("dogs: a.txt\nAnimals: (DOGS Cats)\nANIMALS: (Dogs)");

    assert_eq!(graph.len(), 3);
    assert_eq!(child_names(&graph, "animals"), vec!["dogs", "Cats"]);
    assert_eq!(graph.get("DoGs").unwrap().file_path.as_deref(), Some("a.txt"));
}

#[test]
fn test_bare_reference_is_a_single_link() {
    let graph = parse_links("Zoo: Animals\nAnimals: (Dogs)");

    assert_eq!(child_names(&graph, "Zoo"), vec!["Animals"]);
    assert_eq!(child_names(&graph, "Animals"), vec!["Dogs"]);
    assert_eq!(graph.get("Zoo").unwrap().file_path, None);
    assert_eq!(names(&graph, &graph.roots), vec!["Zoo"]);
}

#[test]
fn test_forest_has_several_roots() {
    let graph = parse_links("A: (B)\nC: (D)");

    assert_eq!(names(&graph, &graph.roots), vec!["A", "C"]);
    assert_eq!(graph.root_nodes().count(), 2);
}

#[test]
fn test_later_file_mapping_wins() {
    let graph = parse_links("A: one.txt\nA: two.txt");

    assert_eq!(graph.get("A").unwrap().file_path.as_deref(), Some("two.txt"));
}

#[test]
fn test_value_keeps_everything_after_first_colon() {
    let graph = parse_links("Doc: C:/files/a.txt");

    assert_eq!(
        graph.get("Doc").unwrap().file_path.as_deref(),
        Some("C:/files/a.txt")
    );
}

#[test]
fn test_invalid_lines_are_skipped() {
    let content = "# project layout\n\n   \njust some text\n\
                   : orphan.txt\n\
                   A: a.txt\n  # indented comment";

    let graph = parse_links(content);

    assert_eq!(graph.len(), 1);
    assert_eq!(graph.metadata[keys::SKIPPED_LINES].as_integer(), Some(2));
    assert_eq!(graph.metadata[keys::TOTAL_NODES].as_integer(), Some(1));
    assert_eq!(graph.metadata[keys::TOTAL_ROOTS].as_integer(), Some(1));
}

#[test]
fn test_empty_value_only_registers_the_node() {
    let graph = parse_links("Lonely:");

    assert_eq!(graph.len(), 1);
    let node = graph.get("Lonely").unwrap();
    assert_eq!(node.file_path, None);
    assert!(node.children.is_empty());
}

#[test]
fn test_empty_input() {
    let graph = parse_links("");

    assert!(graph.is_empty());
    assert!(graph.roots.is_empty());
}

#[test]
fn test_deserialized_graph_resolves_names() {
    let graph = parse_links("Animals: (Dogs Cats)\nDogs: dogs.txt");

    let json = serde_json::to_string(&graph).unwrap();
    assert!(!json.contains("index"));

    let restored: ProjectGraph = serde_json::from_str(&json).unwrap();
    assert_eq!(restored.find("dogs"), graph.find("Dogs"));
    assert_eq!(
        restored.get("CATS").map(|n| n.name.as_str()),
        Some("Cats")
    );
    assert_eq!(restored.roots, graph.roots);
    assert_eq!(restored, graph);
}
