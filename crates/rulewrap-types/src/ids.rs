//! Identifier and flag formats checked client-side before a rule is dispatched.

use std::{fmt, str::FromStr};

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

static PROJECT_ID: Lazy<Regex> = Lazy::new(|| Regex::new(r"^P\d{9}$").expect("valid regex"));
static COLLECTION_ID: Lazy<Regex> = Lazy::new(|| Regex::new(r"^C\d{9}$").expect("valid regex"));
static PROJECT_PATH: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^/[^/]+/projects/P\d{9}$").expect("valid regex"));
static COLLECTION_PATH: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^/[^/]+/projects/P\d{9}/C\d{9}$").expect("valid regex"));
static OBJECT_PATH: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(/[^/\x00]+)+$").expect("valid regex"));
static DROP_ZONE_TOKEN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[a-z]+-[a-z]+$").expect("valid regex"));
static ACCOUNT_ID: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\d+$").expect("valid regex"));
static DATE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\d{4}-(0[1-9]|1[0-2])-(0[1-9]|[12]\d|3[01])$").expect("valid regex"));

macro_rules! checked_text {
    ($(#[$meta:meta])* $name:ident, $pattern:ident, $kind:literal, $expected:literal) => {
        $(#[$meta])*
        #[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
        pub struct $name(String);

        impl $name {
            pub fn new(value: impl Into<String>) -> Result<Self, ValidationError> {
                let value = value.into();
                if $pattern.is_match(&value) {
                    Ok(Self(value))
                } else {
                    Err(ValidationError::InvalidIdentifier {
                        kind: $kind,
                        value,
                        expected: $expected,
                    })
                }
            }

            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl FromStr for $name {
            type Err = ValidationError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                Self::new(s)
            }
        }

        impl AsRef<str> for $name {
            fn as_ref(&self) -> &str {
                &self.0
            }
        }
    };
}

checked_text!(
    /// `P` followed by nine digits.
    ProjectId,
    PROJECT_ID,
    "project id",
    "P followed by 9 digits"
);
checked_text!(
    /// `C` followed by nine digits.
    CollectionId,
    COLLECTION_ID,
    "collection id",
    "C followed by 9 digits"
);
checked_text!(
    ProjectPath,
    PROJECT_PATH,
    "project path",
    "/<zone>/projects/P#########"
);
checked_text!(
    CollectionPath,
    COLLECTION_PATH,
    "collection path",
    "/<zone>/projects/P#########/C#########"
);
checked_text!(
    /// Any absolute path in the remote namespace.
    ObjectPath,
    OBJECT_PATH,
    "path",
    "an absolute path"
);
checked_text!(
    /// Two lowercase words joined by a dash, e.g. `crazy-frog`.
    DropZoneToken,
    DROP_ZONE_TOKEN,
    "drop-zone token",
    "<word>-<word>"
);
checked_text!(
    /// Numeric user or group id.
    AccountId,
    ACCOUNT_ID,
    "account id",
    "a decimal number"
);
checked_text!(
    /// Calendar date as `YYYY-MM-DD`.
    IsoDate,
    DATE,
    "date",
    "YYYY-MM-DD"
);

impl ProjectPath {
    /// The project id in the last path segment.
    pub fn project_id(&self) -> ProjectId {
        let id = self.0.rsplit('/').next().unwrap_or_default();
        ProjectId(id.to_string())
    }
}

impl CollectionPath {
    pub fn project_id(&self) -> ProjectId {
        let id = self.0.rsplit('/').nth(1).unwrap_or_default();
        ProjectId(id.to_string())
    }

    pub fn collection_id(&self) -> CollectionId {
        let id = self.0.rsplit('/').next().unwrap_or_default();
        CollectionId(id.to_string())
    }
}

macro_rules! text_enum {
    (
        $(#[$meta:meta])*
        $name:ident, $field:literal {
            $($variant:ident => $text:literal),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
        pub enum $name {
            $(
                #[serde(rename = $text)]
                $variant,
            )+
        }

        impl $name {
            pub const ALL: &'static [$name] = &[$($name::$variant),+];

            pub fn as_str(&self) -> &'static str {
                match self {
                    $($name::$variant => $text,)+
                }
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl FromStr for $name {
            type Err = ValidationError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s {
                    $($text => Ok($name::$variant),)+
                    other => Err(ValidationError::OutOfEnum {
                        field: $field,
                        value: other.to_string(),
                        expected: concat!($($text, " "),+),
                    }),
                }
            }
        }
    };
}

text_enum!(
    /// Whether an ACL change applies to one object or a whole subtree.
    AclMode, "acl mode" {
        Default => "default",
        Recursive => "recursive",
    }
);

text_enum!(
    AccessLevel, "access level" {
        Null => "null",
        Read => "read",
        Write => "write",
        Own => "own",
    }
);

text_enum!(
    /// Unit a collection size is reported in.
    SizeUnit, "size unit" {
        Bytes => "B",
        KiB => "KiB",
        MiB => "MiB",
        GiB => "GiB",
        TiB => "TiB",
    }
);

text_enum!(
    /// How a reported size is rounded.
    Rounding, "rounding" {
        Exact => "none",
        Floor => "floor",
        Ceiling => "ceiling",
    }
);

text_enum!(
    /// How data reaches a drop zone: a network mount or direct upload.
    DropZoneType, "drop-zone type" {
        Mounted => "mounted",
        Direct => "direct",
    }
);

/// Rejects empty or whitespace-only free text.
pub fn require_text(field: &'static str, value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::argument(field, "must not be empty"));
    }
    Ok(())
}
