use serde_json::json;

use super::{compose_err, compose_ok};
use crate::{AttributeValue, Group, Groups, User, UserOrGroup, Users};

#[test]
fn composes_user_from_current_keys() {
    let user: User = compose_ok(json!({
        "userName": "jmelius",
        "userId": "10068",
        "displayName": "Jonathan Melius"
    }));
    assert_eq!(
        user,
        User {
            user_name: "jmelius".into(),
            user_id: "10068".into(),
            display_name: "Jonathan Melius".into(),
        }
    );
}

#[test]
fn user_name_prefers_current_key_over_legacy_key() {
    let both: User = compose_ok(json!({
        "userName": "jmelius",
        "name": "legacy",
        "userId": "10068"
    }));
    assert_eq!(both.user_name, "jmelius");

    let legacy: User = compose_ok(json!({"name": "legacy", "userId": 10068}));
    assert_eq!(legacy.user_name, "legacy");
    assert_eq!(legacy.user_id, "10068");

    let neither: User = compose_ok(json!({"userId": "1"}));
    assert_eq!(neither.user_name, "");
    assert_eq!(neither.display_name, "");
}

#[test]
fn user_without_id_is_a_missing_key_error() {
    let err = compose_err::<User>(json!({"userName": "jmelius"}));
    assert!(err.is_missing_key());
    assert!(err.to_string().contains("userId"), "{err}");
}

#[test]
fn composing_twice_yields_equal_independent_values() {
    let record = json!([
        {"userName": "jmelius", "userId": "10068", "displayName": "Jonathan Melius"},
        {"userName": "psuppers", "userId": "10069", "displayName": "Pascal Suppers"}
    ]);
    let first: Users = compose_ok(record.clone());
    let mut second: Users = compose_ok(record);
    assert_eq!(first, second);

    second.users[0].display_name.clear();
    assert_eq!(first.users[0].display_name, "Jonathan Melius");
}

#[test]
fn users_keep_server_order() {
    let users: Users = compose_ok(json!([
        {"userName": "b", "userId": "2"},
        {"userName": "a", "userId": "1"},
        {"userName": "c", "userId": "3"}
    ]));
    let names: Vec<_> = users.iter().map(|user| user.user_name.as_str()).collect();
    assert_eq!(names, ["b", "a", "c"]);
}

#[test]
fn composes_groups_with_defaults() {
    let groups: Groups = compose_ok(json!([
        {"name": "datahub", "groupId": "10130", "displayName": "DataHub", "description": "Staff"},
        {"groupName": "scannexus", "groupId": 10131}
    ]));
    assert_eq!(groups.len(), 2);
    assert_eq!(groups.groups[0].description, "Staff");
    assert_eq!(groups.groups[1].name, "scannexus");
    assert_eq!(groups.groups[1].id, "10131");
    assert_eq!(groups.groups[1].display_name, "");
}

#[test]
fn account_type_selects_user_variant() {
    let resolved: UserOrGroup = compose_ok(json!({
        "account_type": "rodsuser",
        "userName": "jmelius",
        "userId": "10068",
        "displayName": "Jonathan Melius"
    }));
    let user = resolved.as_user().expect("user variant");
    assert_eq!(user.user_name, "jmelius");
    assert_eq!(user.user_id, "10068");
    assert_eq!(resolved.display_name(), "Jonathan Melius");
    assert!(resolved.as_group().is_none());
}

#[test]
fn account_type_selects_group_variant() {
    let resolved: UserOrGroup = compose_ok(json!({
        "account_type": "rodsgroup",
        "name": "datahub",
        "groupId": "10130",
        "displayName": "DataHub",
        "description": "DataHub staff"
    }));
    match resolved {
        UserOrGroup::Group(Group {
            name,
            id,
            display_name,
            description,
        }) => {
            assert_eq!(name, "datahub");
            assert_eq!(id, "10130");
            assert_eq!(display_name, "DataHub");
            assert_eq!(description, "DataHub staff");
        }
        other => panic!("expected group, got {other:?}"),
    }
}

#[test]
fn unknown_account_type_is_a_shape_error() {
    let err = compose_err::<UserOrGroup>(json!({
        "account_type": "rodsadmin",
        "userName": "rods",
        "userId": "9001"
    }));
    assert_eq!(err.shape, "UserOrGroup");
    assert!(err.to_string().contains("rodsadmin"), "{err}");
}

#[test]
fn attribute_value_accepts_numbers() {
    let value: AttributeValue = compose_ok(json!({"value": 42}));
    assert_eq!(value.value, "42");
}
