use serde::{Deserialize, Serialize};

use crate::compose::{list_shape, rule_result_shapes, text_or_number};

/// A user account.
///
/// | field | key | missing |
/// | --- | --- | --- |
/// | `user_name` | `userName`, else `name` | `""` |
/// | `user_id` | `userId` | error |
/// | `display_name` | `displayName` | `""` |
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", from = "UserRecord")]
pub struct User {
    pub user_name: String,
    pub user_id: String,
    pub display_name: String,
}

#[derive(Deserialize)]
struct UserRecord {
    #[serde(rename = "userName")]
    user_name: Option<String>,
    name: Option<String>,
    #[serde(rename = "userId", deserialize_with = "text_or_number")]
    user_id: String,
    #[serde(rename = "displayName", default)]
    display_name: String,
}

impl From<UserRecord> for User {
    fn from(record: UserRecord) -> Self {
        Self {
            user_name: record.user_name.or(record.name).unwrap_or_default(),
            user_id: record.user_id,
            display_name: record.display_name,
        }
    }
}

/// A group account.
///
/// | field | key | missing |
/// | --- | --- | --- |
/// | `name` | `name`, else `groupName` | `""` |
/// | `id` | `groupId` | error |
/// | `display_name` | `displayName` | `""` |
/// | `description` | `description` | `""` |
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "GroupRecord")]
pub struct Group {
    pub name: String,
    #[serde(rename = "groupId")]
    pub id: String,
    #[serde(rename = "displayName")]
    pub display_name: String,
    pub description: String,
}

#[derive(Deserialize)]
struct GroupRecord {
    name: Option<String>,
    #[serde(rename = "groupName")]
    group_name: Option<String>,
    #[serde(rename = "groupId", deserialize_with = "text_or_number")]
    id: String,
    #[serde(rename = "displayName", default)]
    display_name: String,
    #[serde(default)]
    description: String,
}

impl From<GroupRecord> for Group {
    fn from(record: GroupRecord) -> Self {
        Self {
            name: record.name.or(record.group_name).unwrap_or_default(),
            id: record.id,
            display_name: record.display_name,
            description: record.description,
        }
    }
}

list_shape!(
    /// Users in the order the server listed them.
    Users,
    users,
    User
);

list_shape!(
    /// Groups in the order the server listed them.
    Groups,
    groups,
    Group
);

/// The account behind a numeric id, discriminated by `account_type`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "account_type")]
pub enum UserOrGroup {
    #[serde(rename = "rodsuser")]
    User(User),
    #[serde(rename = "rodsgroup")]
    Group(Group),
}

impl UserOrGroup {
    pub fn display_name(&self) -> &str {
        match self {
            UserOrGroup::User(user) => &user.display_name,
            UserOrGroup::Group(group) => &group.display_name,
        }
    }

    pub fn as_user(&self) -> Option<&User> {
        match self {
            UserOrGroup::User(user) => Some(user),
            UserOrGroup::Group(_) => None,
        }
    }

    pub fn as_group(&self) -> Option<&Group> {
        match self {
            UserOrGroup::Group(group) => Some(group),
            UserOrGroup::User(_) => None,
        }
    }
}

/// Value of a single metadata attribute on a user or collection.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttributeValue {
    #[serde(deserialize_with = "text_or_number")]
    pub value: String,
}

rule_result_shapes!(User, Users, Group, Groups, UserOrGroup, AttributeValue);
