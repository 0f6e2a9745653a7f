// SPDX-License-Identifier: Apache-2.0

use super::testlib::{config_xml, new_config, test_schema, OC_NI_NS};
use crate::{
    ConfigDelta, DiffOption, EditOperation, ErrorKind, InsertPosition, QName,
};

fn import_policy_xml(policies: &[&str]) -> String {
    let policies: Vec<String> = policies
        .iter()
        .map(|p| format!("<import-policy>{p}</import-policy>"))
        .collect();
    config_xml(&format!(
        r#"
        <network-instances xmlns="http://openconfig.net/yang/network-instance">
          <network-instance>
            <name>default</name>
            <table-connections>
              <table-connection>
                <src-protocol>BGP</src-protocol>
                <dst-protocol>OSPF</dst-protocol>
                <address-family>IPV4</address-family>
                {}
              </table-connection>
            </table-connections>
          </network-instance>
        </network-instances>"#,
        policies.join("\n")
    ))
}

fn tables_xml(protocols: &[&str]) -> String {
    let tables: Vec<String> = protocols
        .iter()
        .map(|p| {
            format!(
                "<table><protocol>{p}</protocol>\
                 <address-family>IPV4</address-family></table>"
            )
        })
        .collect();
    config_xml(&format!(
        r#"
        <network-instances xmlns="http://openconfig.net/yang/network-instance">
          <network-instance>
            <name>default</name>
            <tables>
              {}
            </tables>
          </network-instance>
        </network-instances>"#,
        tables.join("\n")
    ))
}

#[test]
fn test_leaf_list_user_order_round_trip() {
    let schema = test_schema();
    let a =
        new_config(&schema, &import_policy_xml(&["ROUTEMAP1", "ROUTEMAP2"]));
    let b = new_config(
        &schema,
        &import_policy_xml(&[
            "ROUTEMAP1",
            "ROUTEMAP3",
            "ROUTEMAP0",
            "ROUTEMAP2",
        ]),
    );

    assert_ne!(a, b);
    assert_eq!((&a + &b.diff(&a).unwrap()).unwrap(), b);
    assert_eq!((&b + &a.diff(&b).unwrap()).unwrap(), a);
}

#[test]
fn test_leaf_list_user_order_insert_after() {
    let schema = test_schema();
    let a =
        new_config(&schema, &import_policy_xml(&["ROUTEMAP1", "ROUTEMAP2"]));
    let b = new_config(
        &schema,
        &import_policy_xml(&[
            "ROUTEMAP1",
            "ROUTEMAP3",
            "ROUTEMAP0",
            "ROUTEMAP2",
        ]),
    );

    let nc = b.diff(&a).unwrap().nc().unwrap();
    let connection = &nc.children[0].children[0].children[1].children[0];
    let policies: Vec<(Option<&str>, Option<InsertPosition>, Option<&str>)> =
        connection.children[3..]
            .iter()
            .map(|c| (c.text(), c.insert, c.value.as_deref()))
            .collect();

    assert_eq!(
        policies,
        vec![
            (Some("ROUTEMAP3"), None, None),
            (Some("ROUTEMAP0"), None, None),
            (
                Some("ROUTEMAP2"),
                Some(InsertPosition::After),
                Some("ROUTEMAP0")
            ),
        ]
    );
}

#[test]
fn test_leaf_list_user_order_only_reordered() {
    let schema = test_schema();
    let a = new_config(
        &schema,
        &import_policy_xml(&["ROUTEMAP1", "ROUTEMAP2", "ROUTEMAP3"]),
    );
    let b = new_config(
        &schema,
        &import_policy_xml(&["ROUTEMAP3", "ROUTEMAP1", "ROUTEMAP2"]),
    );

    assert!(a.is_subset_of(&a).unwrap());
    assert!(!a.is_subset_of(&b).unwrap());
    assert!(!b.diff(&a).unwrap().is_empty().unwrap());
    assert_eq!((&a + &b.diff(&a).unwrap()).unwrap(), b);
    assert_eq!((&b + &a.diff(&b).unwrap()).unwrap(), a);
}

#[test]
fn test_list_user_order_new_entry_first() {
    let schema = test_schema();
    let a = new_config(
        &schema,
        &tables_xml(&["DIRECTLY_CONNECTED", "STATIC", "OSPF", "ISIS"]),
    );
    let b = new_config(
        &schema,
        &tables_xml(&["BGP", "STATIC", "DIRECTLY_CONNECTED", "OSPF", "ISIS"]),
    );

    let nc = b.diff(&a).unwrap().nc().unwrap();
    let tables = &nc.children[0].children[0].children[1];

    assert_eq!(tables.children.len(), 2);
    let bgp = &tables.children[0];
    assert_eq!(bgp.insert, Some(InsertPosition::First));
    assert_eq!(bgp.operation, None);
    assert_eq!(bgp.children[0].text(), Some("BGP"));
    let connected = &tables.children[1];
    assert_eq!(connected.insert, Some(InsertPosition::After));
    assert_eq!(connected.children[0].text(), Some("DIRECTLY_CONNECTED"));
    assert_eq!(
        connected.key,
        Some(vec![
            (QName::new(OC_NI_NS, "protocol"), "STATIC".to_string()),
            (QName::new(OC_NI_NS, "address-family"), "IPV4".to_string()),
        ])
    );

    assert_eq!((&a + &b.diff(&a).unwrap()).unwrap(), b);
}

#[test]
fn test_list_user_order_reverse_delete() {
    let schema = test_schema();
    let a = new_config(
        &schema,
        &tables_xml(&["DIRECTLY_CONNECTED", "STATIC", "OSPF", "ISIS"]),
    );
    let b = new_config(
        &schema,
        &tables_xml(&["BGP", "STATIC", "DIRECTLY_CONNECTED", "OSPF", "ISIS"]),
    );

    let nc = a.diff(&b).unwrap().nc().unwrap();
    let tables = &nc.children[0].children[0].children[1];

    assert_eq!(tables.children[0].operation, Some(EditOperation::Delete));
    assert_eq!(tables.children[0].children[0].text(), Some("BGP"));
    assert_eq!((&b + &a.diff(&b).unwrap()).unwrap(), a);
}

#[test]
fn test_list_user_order_delta_xml_round_trip() {
    let schema = test_schema();
    let a = new_config(
        &schema,
        &tables_xml(&["DIRECTLY_CONNECTED", "STATIC", "OSPF", "ISIS"]),
    );
    let b = new_config(
        &schema,
        &tables_xml(&["BGP", "ISIS", "OSPF", "STATIC", "DIRECTLY_CONNECTED"]),
    );

    let delta_xml = b.diff(&a).unwrap().nc_xml().unwrap();
    let delta =
        ConfigDelta::new_from_xml(&a, &delta_xml, DiffOption::default())
            .unwrap();

    assert_eq!(delta.dst(), &b);
}

#[test]
fn test_list_insert_with_unknown_anchor() {
    let schema = test_schema();
    let a = new_config(&schema, &tables_xml(&["STATIC", "OSPF"]));
    let delta_xml = config_xml(
        r#"
        <network-instances xmlns="http://openconfig.net/yang/network-instance">
          <network-instance>
            <name>default</name>
            <tables>
              <table yang:insert="after"
                     yang:key="[protocol='ISIS'][address-family='IPV4']">
                <protocol>BGP</protocol>
                <address-family>IPV4</address-family>
              </table>
            </tables>
          </network-instance>
        </network-instances>"#,
    );

    let result = a.apply_xml(&delta_xml);

    assert!(result.is_err());
    if let Err(e) = result {
        assert_eq!(e.kind(), ErrorKind::DeltaApplication);
        assert!(e.msg().contains("key"));
    }
}

#[test]
fn test_leaf_list_insert_without_value() {
    let schema = test_schema();
    let a = new_config(&schema, &import_policy_xml(&["ROUTEMAP1"]));
    let delta_xml = import_policy_xml(&[]).replace(
        "<address-family>IPV4</address-family>",
        "<address-family>IPV4</address-family>\
         <import-policy yang:insert=\"before\">ROUTEMAP0</import-policy>",
    );

    let result = a.apply_xml(&delta_xml);

    assert!(result.is_err());
    if let Err(e) = result {
        assert_eq!(e.kind(), ErrorKind::DeltaApplication);
        assert!(e.msg().contains("yang:value"));
    }
}

#[test]
fn test_leaf_list_insert_first_and_before() {
    let schema = test_schema();
    let a = new_config(
        &schema,
        &import_policy_xml(&["ROUTEMAP1", "ROUTEMAP2"]),
    );
    let delta_xml = import_policy_xml(&[]).replace(
        "<address-family>IPV4</address-family>",
        "<address-family>IPV4</address-family>\
         <import-policy yang:insert=\"first\">ROUTEMAP9</import-policy>\
         <import-policy yang:insert=\"before\" \
         yang:value=\"ROUTEMAP2\">ROUTEMAP5</import-policy>",
    );

    let merged = a.apply_xml(&delta_xml).unwrap();

    assert_eq!(
        merged,
        new_config(
            &schema,
            &import_policy_xml(&[
                "ROUTEMAP9",
                "ROUTEMAP1",
                "ROUTEMAP5",
                "ROUTEMAP2"
            ]),
        )
    );
}
