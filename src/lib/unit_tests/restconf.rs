// SPDX-License-Identifier: Apache-2.0

use serde_json::{json, Value};

use super::testlib::{config_xml, new_config, test_schema};
use crate::{DiffOption, RestconfMethod};

const OLD_INTERFACES: &str = r#"
<interfaces xmlns="http://openconfig.net/yang/interfaces">
  <interface>
    <name>Gi1/0/1</name>
    <config>
      <name>Gi1/0/1</name>
      <description>uplink</description>
      <mtu>1500</mtu>
    </config>
  </interface>
</interfaces>"#;

const NEW_INTERFACES: &str = r#"
<interfaces xmlns="http://openconfig.net/yang/interfaces">
  <interface>
    <name>Gi1/0/1</name>
    <config>
      <name>Gi1/0/1</name>
      <mtu>9000</mtu>
    </config>
  </interface>
  <interface>
    <name>Gi1/0/2</name>
    <config>
      <name>Gi1/0/2</name>
      <enabled>true</enabled>
    </config>
  </interface>
</interfaces>"#;

fn payload_json(payload: Option<&String>) -> Value {
    serde_json::from_str(payload.unwrap()).unwrap()
}

#[test]
fn test_restconf_leaf_changes() {
    let schema = test_schema();
    let old = new_config(&schema, &config_xml(OLD_INTERFACES));
    let new = new_config(&schema, &config_xml(NEW_INTERFACES));

    let requests = new.diff(&old).unwrap().restconf().unwrap();

    assert_eq!(requests.len(), 3);

    assert_eq!(requests[0].method, RestconfMethod::Delete);
    assert_eq!(
        requests[0].url,
        "/restconf/data/openconfig-interfaces:interfaces/\
         interface=Gi1%2F0%2F1/config/description"
    );
    assert_eq!(requests[0].payload, None);

    assert_eq!(requests[1].method, RestconfMethod::Patch);
    assert_eq!(
        requests[1].url,
        "/restconf/data/openconfig-interfaces:interfaces/\
         interface=Gi1%2F0%2F1/config/mtu"
    );
    assert_eq!(
        payload_json(requests[1].payload.as_ref()),
        json!({"openconfig-interfaces:mtu": 9000})
    );
    assert_eq!(
        requests[1].content_type(),
        Some("application/yang-data+json")
    );

    assert_eq!(requests[2].method, RestconfMethod::Put);
    assert_eq!(
        requests[2].url,
        "/restconf/data/openconfig-interfaces:interfaces/interface=Gi1%2F0%2F2"
    );
    assert_eq!(
        payload_json(requests[2].payload.as_ref()),
        json!({
            "openconfig-interfaces:interface": [{
                "name": "Gi1/0/2",
                "config": {"name": "Gi1/0/2", "enabled": true}
            }]
        })
    );
}

#[test]
fn test_restconf_nothing_changed() {
    let schema = test_schema();
    let old = new_config(&schema, &config_xml(OLD_INTERFACES));

    assert!(old.diff(&old).unwrap().restconf().unwrap().is_empty());
}

#[test]
fn test_restconf_user_ordered_list_put_whole() {
    let schema = test_schema();
    let tables = |protocols: &[&str]| {
        let entries: Vec<String> = protocols
            .iter()
            .map(|p| {
                format!(
                    "<table><protocol>{p}</protocol>\
                     <address-family>IPV4</address-family></table>"
                )
            })
            .collect();
        config_xml(&format!(
            r#"<network-instances
                  xmlns="http://openconfig.net/yang/network-instance">
                 <network-instance>
                   <name>default</name>
                   <tables>{}</tables>
                 </network-instance>
               </network-instances>"#,
            entries.join("")
        ))
    };
    let old = new_config(&schema, &tables(&["STATIC", "OSPF"]));
    let new = new_config(&schema, &tables(&["OSPF", "STATIC", "BGP"]));

    let requests = new.diff(&old).unwrap().restconf().unwrap();

    assert_eq!(requests.len(), 1);
    assert_eq!(requests[0].method, RestconfMethod::Put);
    assert_eq!(
        requests[0].url,
        "/restconf/data/openconfig-network-instance:network-instances/\
         network-instance=default/tables/table"
    );
    assert_eq!(
        payload_json(requests[0].payload.as_ref()),
        json!({
            "openconfig-network-instance:table": [
                {"protocol": "OSPF", "address-family": "IPV4"},
                {"protocol": "STATIC", "address-family": "IPV4"},
                {"protocol": "BGP", "address-family": "IPV4"},
            ]
        })
    );
}

#[test]
fn test_restconf_system_ordered_leaf_list_per_entry() {
    let schema = test_schema();
    let name_servers = |servers: &[&str]| {
        let entries: Vec<String> = servers
            .iter()
            .map(|s| format!("<name-server>{s}</name-server>"))
            .collect();
        config_xml(&format!(
            r#"<native xmlns="http://cisco.com/ns/yang/Cisco-IOS-XE-native">
                 <ip>{}</ip>
               </native>"#,
            entries.join("")
        ))
    };
    let old = new_config(&schema, &name_servers(&["8.8.8.8", "9.9.9.9"]));
    let new = new_config(&schema, &name_servers(&["9.9.9.9", "1.1.1.1"]));
    let option = DiffOption::new().restconf_root("/rest/data/");

    let requests = new
        .diff_with_option(&old, option)
        .unwrap()
        .restconf()
        .unwrap();

    let summary: Vec<(RestconfMethod, &str)> = requests
        .iter()
        .map(|r| (r.method, r.url.as_str()))
        .collect();
    assert_eq!(
        summary,
        vec![
            (
                RestconfMethod::Delete,
                "/rest/data/Cisco-IOS-XE-native:native/ip/\
                 name-server=8.8.8.8"
            ),
            (
                RestconfMethod::Put,
                "/rest/data/Cisco-IOS-XE-native:native/ip/\
                 name-server=1.1.1.1"
            ),
        ]
    );
    assert_eq!(
        payload_json(requests[1].payload.as_ref()),
        json!({"Cisco-IOS-XE-native:name-server": ["1.1.1.1"]})
    );
}

#[test]
fn test_restconf_request_display() {
    let schema = test_schema();
    let old = new_config(&schema, &config_xml(OLD_INTERFACES));
    let new = new_config(&schema, &config_xml(NEW_INTERFACES));

    let requests = new.diff(&old).unwrap().restconf().unwrap();
    let display: Value =
        serde_json::from_str(&requests[0].to_string()).unwrap();

    assert_eq!(display["method"], json!("DELETE"));
    assert!(display.get("payload").is_none());
}
