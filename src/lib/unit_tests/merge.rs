// SPDX-License-Identifier: Apache-2.0

use super::testlib::{config_xml, new_config, test_schema, IOS_NS, OC_NI_NS};
use crate::{ErrorKind, QName};

const NETWORK_INSTANCES: &str = r#"
<network-instances xmlns="http://openconfig.net/yang/network-instance">
  <network-instance>
    <name>default</name>
    <tables>
      <table>
        <protocol>BGP</protocol>
        <address-family>IPV4</address-family>
      </table>
    </tables>
  </network-instance>
</network-instances>"#;

const NATIVE: &str = r#"
<native xmlns="http://cisco.com/ns/yang/Cisco-IOS-XE-native">
  <hostname>R1</hostname>
  <vrf>
    <definition><name>BLUE</name><rd>1:1</rd></definition>
  </vrf>
</native>"#;

#[test]
fn test_merge_disjoint_roots() {
    let schema = test_schema();
    let a = new_config(&schema, &config_xml(NETWORK_INSTANCES));
    let b = new_config(&schema, &config_xml(NATIVE));

    let sum = (&a + &b).unwrap();
    let combined = new_config(
        &schema,
        &config_xml(&format!("{NETWORK_INSTANCES}{NATIVE}")),
    );

    assert_eq!(
        sum.roots(),
        vec![
            QName::new(OC_NI_NS, "network-instances"),
            QName::new(IOS_NS, "native")
        ]
    );
    assert_eq!(sum, combined);
    assert_eq!(sum.to_xml().unwrap(), combined.to_xml().unwrap());
}

#[test]
fn test_merge_overwrite_leaf_and_add_entry() {
    let schema = test_schema();
    let base = new_config(&schema, &config_xml(NATIVE));
    let other = new_config(
        &schema,
        &config_xml(
            r#"
            <native xmlns="http://cisco.com/ns/yang/Cisco-IOS-XE-native">
              <hostname>R2</hostname>
              <vrf>
                <definition><name>RED</name></definition>
              </vrf>
            </native>"#,
        ),
    );

    let merged = base.merge(&other).unwrap();

    let expected = new_config(
        &schema,
        &config_xml(
            r#"
            <native xmlns="http://cisco.com/ns/yang/Cisco-IOS-XE-native">
              <hostname>R2</hostname>
              <vrf>
                <definition><name>BLUE</name><rd>1:1</rd></definition>
                <definition><name>RED</name></definition>
              </vrf>
            </native>"#,
        ),
    );
    assert_eq!(merged, expected);
    // Inputs are untouched
    assert_eq!(base, new_config(&schema, &config_xml(NATIVE)));
    assert!(other.is_proper_subset_of(&merged).unwrap());
    assert!(merged.is_proper_superset_of(&other).unwrap());
    assert!(other < merged);
    assert_eq!(base.partial_cmp(&merged), None);
}

#[test]
fn test_merge_create_existing_leaf() {
    let schema = test_schema();
    let base = new_config(&schema, &config_xml(NATIVE));
    let delta = config_xml(
        r#"
        <native xmlns="http://cisco.com/ns/yang/Cisco-IOS-XE-native">
          <hostname nc:operation="create">R2</hostname>
        </native>"#,
    );

    let result = base.apply_xml(&delta);

    assert!(result.is_err());
    if let Err(e) = result {
        assert_eq!(e.kind(), ErrorKind::DeltaApplication);
        assert!(e.msg().contains("data-exists"));
    }
}

#[test]
fn test_merge_delete_absent_list_entry() {
    let schema = test_schema();
    let base = new_config(&schema, &config_xml(NATIVE));
    let delta = config_xml(
        r#"
        <native xmlns="http://cisco.com/ns/yang/Cisco-IOS-XE-native">
          <vrf>
            <definition nc:operation="delete"><name>RED</name></definition>
          </vrf>
        </native>"#,
    );

    let result = base.apply_xml(&delta);

    assert!(result.is_err());
    if let Err(e) = result {
        assert_eq!(e.kind(), ErrorKind::DeltaApplication);
        assert!(e.msg().contains("data-missing"));
        assert!(e.msg().contains("RED"));
    }
}

#[test]
fn test_merge_remove_absent_list_entry() {
    let schema = test_schema();
    let base = new_config(&schema, &config_xml(NATIVE));
    let delta = config_xml(
        r#"
        <native xmlns="http://cisco.com/ns/yang/Cisco-IOS-XE-native">
          <vrf>
            <definition nc:operation="remove"><name>RED</name></definition>
          </vrf>
        </native>"#,
    );

    assert_eq!(base.apply_xml(&delta).unwrap(), base);
}

#[test]
fn test_merge_replace_list_entry() {
    let schema = test_schema();
    let base = new_config(&schema, &config_xml(NATIVE));
    let delta = config_xml(
        r#"
        <native xmlns="http://cisco.com/ns/yang/Cisco-IOS-XE-native">
          <vrf>
            <definition nc:operation="replace"><name>BLUE</name></definition>
          </vrf>
        </native>"#,
    );

    let merged = base.apply_xml(&delta).unwrap();

    assert_eq!(
        merged,
        new_config(
            &schema,
            &config_xml(
                r#"
                <native xmlns="http://cisco.com/ns/yang/Cisco-IOS-XE-native">
                  <hostname>R1</hostname>
                  <vrf><definition><name>BLUE</name></definition></vrf>
                </native>"#,
            ),
        )
    );
}

#[test]
fn test_merge_delete_prunes_empty_container() {
    let schema = test_schema();
    let base = new_config(&schema, &config_xml(NATIVE));
    let delta = config_xml(
        r#"
        <native xmlns="http://cisco.com/ns/yang/Cisco-IOS-XE-native">
          <vrf>
            <definition nc:operation="delete"><name>BLUE</name></definition>
          </vrf>
        </native>"#,
    );

    let merged = base.apply_xml(&delta).unwrap();

    let native = &merged.root().children[0];
    assert_eq!(native.children.len(), 1);
    assert_eq!(native.children[0].name, QName::new(IOS_NS, "hostname"));
}

#[test]
fn test_merge_keeps_presence_container() {
    let schema = test_schema();
    let base = new_config(&schema, &config_xml(NATIVE));
    let delta = config_xml(
        r#"
        <native xmlns="http://cisco.com/ns/yang/Cisco-IOS-XE-native">
          <banner/>
          <ip/>
        </native>"#,
    );

    let merged = base.apply_xml(&delta).unwrap();

    let native = &merged.root().children[0];
    let names: Vec<&str> =
        native.children.iter().map(|c| c.name.name.as_str()).collect();
    assert_eq!(names, vec!["hostname", "banner", "vrf"]);
}

#[test]
fn test_merge_rejects_unknown_node() {
    let schema = test_schema();
    let base = new_config(&schema, &config_xml(NATIVE));
    let delta = config_xml(
        r#"
        <native xmlns="http://cisco.com/ns/yang/Cisco-IOS-XE-native">
          <no-such-node>1</no-such-node>
        </native>"#,
    );

    let result = base.apply_xml(&delta);

    assert!(result.is_err());
    if let Err(e) = result {
        assert_eq!(e.kind(), ErrorKind::SchemaMissing);
    }
}

#[test]
fn test_merge_remove_existing_leaf() {
    let schema = test_schema();
    let base = new_config(&schema, &config_xml(NATIVE));
    let delta = config_xml(
        r#"
        <native xmlns="http://cisco.com/ns/yang/Cisco-IOS-XE-native">
          <hostname nc:operation="remove"/>
        </native>"#,
    );

    let merged = base.apply_xml(&delta).unwrap();

    let native = &merged.root().children[0];
    assert_eq!(native.children.len(), 1);
    assert_eq!(native.children[0].name, QName::new(IOS_NS, "vrf"));
}
