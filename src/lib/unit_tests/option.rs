// SPDX-License-Identifier: Apache-2.0

use crate::{DiffOption, EditOperation, ErrorKind};

#[test]
fn test_diff_option_default() {
    let option = DiffOption::default();

    assert_eq!(option.preferred_create, EditOperation::Merge);
    assert_eq!(option.preferred_replace, EditOperation::Merge);
    assert_eq!(option.preferred_delete, EditOperation::Delete);
    assert_eq!(option.restconf_root, "/restconf/data");
    assert!(option.validate().is_ok());
}

#[test]
fn test_diff_option_from_yaml() {
    let option = DiffOption::new_from_yaml(
        r#"
        preferred-create: replace
        preferred-delete: remove
        restconf-root: /restconf/data/
        "#,
    )
    .unwrap();

    assert_eq!(
        option,
        DiffOption::new()
            .preferred_create(EditOperation::Replace)
            .preferred_delete(EditOperation::Remove)
            .restconf_root("/restconf/data/")
    );
    assert_eq!(option.restconf_prefix(), "/restconf/data");
}

#[test]
fn test_diff_option_invalid_choice() {
    let result = DiffOption::new_from_yaml("preferred-delete: merge");

    assert!(result.is_err());
    if let Err(e) = result {
        assert_eq!(e.kind(), ErrorKind::InvalidArgument);
        assert!(e.msg().contains("preferred-delete"));
    }
}

#[test]
fn test_diff_option_unknown_field() {
    let result = DiffOption::new_from_yaml("preferred-merge: merge");

    assert!(result.is_err());
    if let Err(e) = result {
        assert_eq!(e.kind(), ErrorKind::InvalidArgument);
    }
}
