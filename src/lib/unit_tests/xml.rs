// SPDX-License-Identifier: Apache-2.0

use super::testlib::{config_xml, new_config, test_schema, IOS_NS, OC_NI_NS};
use crate::{
    xml::{data_node_from_xml, data_node_to_xml},
    Config, EditOperation, ErrorKind, InsertPosition, QName,
};

fn xml_error(xml: &str) -> ErrorKind {
    match data_node_from_xml(xml) {
        Ok(_) => panic!("XML should be rejected: {xml}"),
        Err(e) => e.kind(),
    }
}

#[test]
fn test_parse_control_attrs() {
    let node = data_node_from_xml(&config_xml(&format!(
        r#"<network-instances xmlns="{OC_NI_NS}">
             <network-instance>
               <name>default</name>
               <tables>
                 <table nc:operation="merge" yang:insert="after"
                        yang:key="[protocol='STATIC'][address-family='IPV4']">
                   <protocol>BGP</protocol>
                   <address-family>IPV4</address-family>
                 </table>
               </tables>
             </network-instance>
           </network-instances>
           <native xmlns="{IOS_NS}">
             <hostname nc:operation="delete"/>
           </native>"#
    )))
    .unwrap();

    let table = &node.children[0].children[0].children[1].children[0];
    assert_eq!(table.name, QName::new(OC_NI_NS, "table"));
    assert_eq!(table.operation, Some(EditOperation::Merge));
    assert_eq!(table.insert, Some(InsertPosition::After));
    assert_eq!(
        table.key,
        Some(vec![
            (QName::new(OC_NI_NS, "protocol"), "STATIC".to_string()),
            (QName::new(OC_NI_NS, "address-family"), "IPV4".to_string()),
        ])
    );
    assert_eq!(table.children[0].text(), Some("BGP"));

    let hostname = &node.children[1].children[0];
    assert_eq!(hostname.operation, Some(EditOperation::Delete));
    assert_eq!(hostname.text, None);
}

#[test]
fn test_parse_escaped_text() {
    let node = data_node_from_xml(&format!(
        r#"<native xmlns="{IOS_NS}"><hostname>R&amp;D</hostname></native>"#
    ))
    .unwrap();

    assert_eq!(node.children[0].text(), Some("R&D"));
}

#[test]
fn test_parse_keep_leaf_whitespace() {
    let node = data_node_from_xml(&format!(
        r#"<native xmlns="{IOS_NS}">
             <banner>
               <motd>  Authorized only  </motd>
             </banner>
           </native>"#
    ))
    .unwrap();

    let banner = &node.children[0];
    assert_eq!(banner.text, None);
    assert_eq!(banner.children[0].text(), Some("  Authorized only  "));
}

#[test]
fn test_config_differ_in_leaf_whitespace() {
    let schema = test_schema();
    let motd_xml = |motd: &str| {
        config_xml(&format!(
            r#"<native xmlns="{IOS_NS}">
                 <banner><motd>{motd}</motd></banner>
               </native>"#
        ))
    };
    let old = new_config(&schema, &motd_xml("Authorized only"));
    let new = new_config(&schema, &motd_xml("  Authorized only  "));

    assert!(old != new);
    let delta = new.diff(&old).unwrap();
    assert!(!delta.is_empty().unwrap());
    let applied = old.apply(&delta).unwrap();
    assert_eq!(
        applied.root().children[0].children[0].children[0].text(),
        Some("  Authorized only  ")
    );
}

#[test]
fn test_parse_unknown_attribute() {
    assert_eq!(
        xml_error(&format!(r#"<native xmlns="{IOS_NS}" color="red"/>"#)),
        ErrorKind::InvalidXml
    );
}

#[test]
fn test_parse_invalid_operation() {
    assert_eq!(
        xml_error(&config_xml(&format!(
            r#"<native xmlns="{IOS_NS}" nc:operation="destroy"/>"#
        ))),
        ErrorKind::InvalidArgument
    );
}

#[test]
fn test_parse_unclosed_element() {
    assert_eq!(
        xml_error(&format!(r#"<native xmlns="{IOS_NS}"><hostname>R1"#)),
        ErrorKind::InvalidXml
    );
}

#[test]
fn test_parse_multiple_roots() {
    assert_eq!(xml_error("<a/><b/>"), ErrorKind::InvalidXml);
}

#[test]
fn test_parse_undeclared_prefix() {
    assert_eq!(xml_error("<x:a/>"), ErrorKind::InvalidXml);
}

#[test]
fn test_write_then_parse() {
    let schema = test_schema();
    let node = data_node_from_xml(&config_xml(&format!(
        r#"<network-instances xmlns="{OC_NI_NS}">
             <network-instance>
               <name>default</name>
               <tables>
                 <table yang:insert="after"
                        yang:key="[protocol='STATIC'][address-family='IPV4']">
                   <protocol>BGP</protocol>
                   <address-family>IPV4</address-family>
                 </table>
               </tables>
             </network-instance>
           </network-instances>
           <native xmlns="{IOS_NS}">
             <hostname nc:operation="replace">a &lt; b</hostname>
           </native>"#
    )))
    .unwrap();

    let xml = data_node_to_xml(&node, schema.namespaces()).unwrap();
    let parsed = data_node_from_xml(&xml).unwrap();

    assert!(xml.contains(r#"yang:insert="after""#));
    assert!(xml.contains(r#"nc:operation="replace""#));
    assert_eq!(parsed, node);
    assert!(parsed.children[1].children[0].has_control_attrs());
}

#[test]
fn test_config_with_control_attrs() {
    let schema = test_schema();

    let result = Config::new_from_xml(
        schema,
        &config_xml(&format!(
            r#"<native xmlns="{IOS_NS}">
                 <hostname nc:operation="replace">R1</hostname>
               </native>"#
        )),
    );

    assert!(result.is_err());
    if let Err(e) = result {
        assert_eq!(e.kind(), ErrorKind::InvalidConfig);
    }
}

#[test]
fn test_config_leaf_with_children() {
    let schema = test_schema();

    let result = Config::new_from_xml(
        schema,
        &config_xml(&format!(
            r#"<native xmlns="{IOS_NS}">
                 <hostname><motd>hi</motd></hostname>
               </native>"#
        )),
    );

    assert!(result.is_err());
    if let Err(e) = result {
        assert_eq!(e.kind(), ErrorKind::InvalidConfig);
    }
}

#[test]
fn test_config_unknown_node() {
    let schema = test_schema();

    let result = Config::new_from_xml(
        schema,
        &config_xml(&format!(
            r#"<native xmlns="{IOS_NS}"><domain>lab</domain></native>"#
        )),
    );

    assert!(result.is_err());
    if let Err(e) = result {
        assert_eq!(e.kind(), ErrorKind::SchemaMissing);
    }
}

#[test]
fn test_config_to_xml() {
    let schema = test_schema();
    let config = new_config(
        &schema,
        &config_xml(&format!(
            r#"<native xmlns="{IOS_NS}"><hostname>R1</hostname></native>"#
        )),
    );

    let xml = config.to_xml().unwrap();

    assert!(xml.contains(&format!(r#"<native xmlns="{IOS_NS}">"#)));
    assert!(xml.contains("<hostname>R1</hostname>"));
    assert_eq!(new_config(&schema, &xml), config);
}
