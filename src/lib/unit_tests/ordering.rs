// SPDX-License-Identifier: Apache-2.0

use std::collections::BTreeSet;

use crate::{
    ordering::annotation_constraints, AnnotationKeyword, AnnotationQualifier,
    Conjunction, ErrorKind, OrderOperation, OrderingConstraint,
    OrderingSolver, SchemaTree,
};

use crate::OrderOperation::{Create, Delete, Modify};

const ANNOTATED_SCHEMA: &str = r#"
modules:
  - name: Cisco-IOS-XE-native
    prefix: ios
    namespace: http://cisco.com/ns/yang/Cisco-IOS-XE-native
    nodes:
      - name: native
        type: container
        children:
          - name: vrf
            type: container
            children:
              - name: definition
                type: list
                key: [name]
                annotations:
                  - keyword: cli-diff-delete-before
                    target: /ios:native/ios:interface/ios:GigabitEthernet
                children:
                  - {name: name, type: leaf}
          - name: interface
            type: container
            children:
              - name: GigabitEthernet
                type: list
                key: [name]
                annotations:
                  - keyword: cli-diff-create-after
                    target: /ios:native/ios:vrf/ios:definition
                children:
                  - {name: name, type: leaf}
                  - name: vrf-forwarding
                    type: leaf
                    leafref: ../../../ios:vrf/ios:definition/ios:name
          - name: route-map
            type: list
            key: [name]
            annotations:
              - keyword: cli-diff-set-before
                target: ../ios:interface
                qualifiers: [cli-when-target-delete]
              - keyword: cli-diff-dependency
                target: /ios:native/ios:vrf
                qualifiers: [cli-trigger-on-set]
              - keyword: cli-diff-after
                target: /ios:native/ios:no-such-node
            children:
              - {name: name, type: leaf}
"#;

fn constraint_set(
    constraints: &[(OrderOperation, Conjunction, OrderOperation)],
) -> BTreeSet<OrderingConstraint> {
    constraints
        .iter()
        .map(|(o, c, t)| OrderingConstraint::new(*o, *c, *t))
        .collect()
}

#[test]
fn test_ordering_symmetric_annotations() {
    let schema = SchemaTree::new_from_yaml(ANNOTATED_SCHEMA).unwrap();
    let gi = schema
        .get_by_path("/ios:native/ios:interface/ios:GigabitEthernet")
        .unwrap();
    let definition =
        schema.get_by_path("/ios:native/ios:vrf/ios:definition").unwrap();

    let map = OrderingSolver::new(&schema).solve().unwrap();

    assert_eq!(
        map.constraints(gi, definition),
        Some(&constraint_set(&[
            (Create, Conjunction::After, Create),
            (Create, Conjunction::After, Delete),
        ]))
    );
    assert_eq!(
        map.constraints(definition, gi),
        Some(&constraint_set(&[
            (Delete, Conjunction::Before, Create),
            (Delete, Conjunction::Before, Delete),
        ]))
    );
}

#[test]
fn test_ordering_leafref() {
    let schema = SchemaTree::new_from_yaml(ANNOTATED_SCHEMA).unwrap();
    let source = schema
        .get_by_path(
            "/ios:native/ios:interface/ios:GigabitEthernet/ios:vrf-forwarding",
        )
        .unwrap();
    let target = schema
        .get_by_path("/ios:native/ios:vrf/ios:definition/ios:name")
        .unwrap();

    let map = OrderingSolver::new(&schema).solve().unwrap();

    assert_eq!(
        map.constraints(source, target),
        Some(&constraint_set(&[
            (Create, Conjunction::After, Create),
            (Modify, Conjunction::After, Create),
            (Delete, Conjunction::Before, Delete),
        ]))
    );
}

#[test]
fn test_ordering_qualifiers_and_unresolved_target() {
    let schema = SchemaTree::new_from_yaml(ANNOTATED_SCHEMA).unwrap();
    let route_map = schema.get_by_path("/ios:native/ios:route-map").unwrap();
    let interface = schema.get_by_path("/ios:native/ios:interface").unwrap();
    let vrf = schema.get_by_path("/ios:native/ios:vrf").unwrap();

    let map = OrderingSolver::new(&schema).solve().unwrap();

    assert_eq!(
        map.constraints(route_map, interface),
        Some(&constraint_set(&[
            (Create, Conjunction::Before, Delete),
            (Modify, Conjunction::Before, Delete),
        ]))
    );
    assert_eq!(
        map.constraints(route_map, vrf),
        Some(&constraint_set(&[
            (Create, Conjunction::After, Create),
            (Delete, Conjunction::Before, Delete),
            (Create, Conjunction::After, Modify),
            (Modify, Conjunction::After, Create),
            (Modify, Conjunction::After, Modify),
        ]))
    );
    let before_map = map.before_map(route_map);
    assert_eq!(
        before_map.keys().collect::<Vec<&String>>(),
        vec!["/ios:native/ios:interface", "/ios:native/ios:vrf"]
    );
    // The pairs: two symmetric ones, leafref and the two of route-map
    assert_eq!(map.len(), 5);
}

#[test]
fn test_ordering_csv() {
    let schema = SchemaTree::new_from_yaml(ANNOTATED_SCHEMA).unwrap();

    let csv = OrderingSolver::new(&schema).solve().unwrap().to_csv();
    let lines: Vec<&str> = csv.lines().collect();

    assert_eq!(
        lines[0],
        "source,operation,conjunction,target,target_operation"
    );
    assert!(lines.contains(
        &"/ios:native/ios:route-map,create,before,\
          /ios:native/ios:interface,delete"
    ));
    assert_eq!(lines.len(), 1 + 2 + 2 + 3 + 2 + 5);
}

#[test]
fn test_ordering_table() {
    assert_eq!(
        annotation_constraints(AnnotationKeyword::CliDiffAfter, &[]).len(),
        9
    );
    assert_eq!(
        annotation_constraints(
            AnnotationKeyword::CliDiffModifyAfter,
            &[AnnotationQualifier::CliWhenTargetSet],
        ),
        constraint_set(&[
            (Modify, Conjunction::After, Create),
            (Modify, Conjunction::After, Modify),
        ])
    );
    assert_eq!(
        annotation_constraints(
            AnnotationKeyword::CliDiffDependency,
            &[AnnotationQualifier::CliTriggerOnDelete],
        ),
        constraint_set(&[
            (Create, Conjunction::After, Create),
            (Delete, Conjunction::Before, Delete),
            (Modify, Conjunction::Before, Delete),
            (Create, Conjunction::After, Delete),
        ])
    );
}

#[test]
fn test_ordering_misused_qualifier() {
    let schema = SchemaTree::new_from_yaml(
        r#"
        modules:
          - name: test
            prefix: t
            namespace: urn:test
            nodes:
              - name: a
                type: leaf
                annotations:
                  - keyword: cli-diff-dependency
                    target: /t:b
                    qualifiers: [cli-when-target-set]
              - {name: b, type: leaf}
        "#,
    )
    .unwrap();

    let result = OrderingSolver::new(&schema).solve();

    assert!(result.is_err());
    if let Err(e) = result {
        assert_eq!(e.kind(), ErrorKind::InvalidSchema);
    }
}
