//! Loading the descriptors shipped in `services/`

use concert_services::{
    Descriptor, Endpoint, ParamValue, RoconUri, ServiceGraph, ServicePackage, TeleopRoles,
};
use std::path::PathBuf;

fn services_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("services")
}

fn waypoint_graph() -> ServiceGraph {
    ServiceGraph::from_file(services_dir().join("waypoint_navigation/waypoint_navigation.link_graph"))
        .unwrap()
}

fn teleop_roles() -> TeleopRoles {
    TeleopRoles::from_file(services_dir().join("teleop/teleop.interactions")).unwrap()
}

#[test]
fn waypoint_navigation_graph_shape() {
    let graph = waypoint_graph();
    assert_eq!(graph.name, "Waypoint navigation");

    let node_ids: Vec<_> = graph.nodes.iter().map(|n| n.id.as_str()).collect();
    assert_eq!(node_ids, vec!["robot"]);

    let topic_ids: Vec<_> = graph.topics.iter().map(|t| t.id.as_str()).collect();
    assert_eq!(topic_ids, vec!["nav_control", "nav_status"]);

    assert!(graph.actions.is_empty());
    assert_eq!(graph.edges.len(), 2);
}

#[test]
fn waypoint_navigation_edges_resolve() {
    let graph = waypoint_graph();
    for edge in &graph.edges {
        assert!(graph.resolve(&edge.start).is_some(), "start {}", edge.start);
        assert!(graph.resolve(&edge.finish).is_some(), "finish {}", edge.finish);
        assert!(edge.remap_to.starts_with('/'));
    }

    let inbound: Vec<_> = graph.edges_to("robot").collect();
    assert_eq!(inbound.len(), 1);
    assert_eq!(inbound[0].remap_from, "nav_ctrl");
    assert!(matches!(graph.resolve(&inbound[0].start), Some(Endpoint::Topic(t)) if t.msg_type == "yocs_msgs/NavigationControl"));
}

#[test]
fn waypoint_navigation_node_uri() {
    let graph = waypoint_graph();
    let robot = graph.node("robot").unwrap();
    assert_eq!((robot.min, robot.max), (1, 1));

    let uri = robot.rocon_uri().unwrap();
    let turtlebot: RoconUri = "rocon:/pc/turtlebot/indigo/trusty".parse().unwrap();
    assert!(uri.matches(&turtlebot));
    assert_eq!(uri.rapp.as_deref(), Some("waypoint_nav/waypoint_nav"));
}

#[test]
fn teleop_roles_shape() {
    let roles = teleop_roles();
    assert_eq!(roles.names(), vec!["concert_make_a_map", "concert_map_annotation"]);
    for role in &roles {
        assert_eq!(role.max, 1);
        assert!(!role.parameters.is_empty());
        assert!(role.rocon_uri().is_ok());
    }

    let make_a_map = roles.get("concert_make_a_map").unwrap();
    assert_eq!(make_a_map.role, "User");
    assert_eq!(make_a_map.parameters["map_resolution"], ParamValue::Float(0.05));
}

#[test]
fn descriptors_round_trip() {
    let graph = waypoint_graph();
    let reloaded = ServiceGraph::from_yaml(&graph.to_yaml().unwrap()).unwrap();
    assert_eq!(graph, reloaded);

    let roles = teleop_roles();
    let reloaded = TeleopRoles::from_yaml(&roles.to_yaml().unwrap()).unwrap();
    assert_eq!(roles, reloaded);
}

#[test]
fn descriptor_detects_shipped_files() {
    let graph = Descriptor::from_file(
        services_dir().join("waypoint_navigation/waypoint_navigation.link_graph"),
    )
    .unwrap();
    assert!(matches!(graph, Descriptor::ServiceGraph(_)));

    let roles = Descriptor::from_file(services_dir().join("teleop/teleop.interactions")).unwrap();
    assert!(matches!(roles, Descriptor::TeleopRoles(_)));
}

#[test]
fn package_scan_finds_everything() {
    let package = ServicePackage::scan(services_dir()).unwrap();
    assert_eq!(package.graphs().len(), 1);
    assert_eq!(package.teleop_roles().len(), 1);
    assert_eq!(package.graphs()[0].1, waypoint_graph());
}
