//! The four fixed stages every rule call runs through.
//!
//! A manager method describes its call as a [`RuleCall`]; [`prepare`] turns it
//! into a body and parameter table, [`invoke`] executes it over the session,
//! [`decode`] parses the `*result` slot and the caller composes the decoded
//! value into its target type.

mod decode;
mod invoke;
mod serialize;

use rulewrap_types::ids;

pub use decode::decode;
pub use invoke::invoke;
pub use serialize::{
    ParameterTable, PreparedRule, RESULT_SLOT, execute_block, placeholder, prepare,
    quote_literal, rule_body,
};

/// One positional argument, always sent to the server as a string literal.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RuleArg(String);

impl RuleArg {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for RuleArg {
    fn from(value: &str) -> Self {
        RuleArg(value.to_string())
    }
}

impl From<String> for RuleArg {
    fn from(value: String) -> Self {
        RuleArg(value)
    }
}

impl From<&String> for RuleArg {
    fn from(value: &String) -> Self {
        RuleArg(value.clone())
    }
}

/// Flags travel as the literals `true` / `false`.
impl From<bool> for RuleArg {
    fn from(value: bool) -> Self {
        RuleArg(if value { "true" } else { "false" }.to_string())
    }
}

macro_rules! numeric_rule_args {
    ($($ty:ty),*) => {
        $(
            impl From<$ty> for RuleArg {
                fn from(value: $ty) -> Self {
                    RuleArg(value.to_string())
                }
            }
        )*
    };
}

numeric_rule_args!(i32, i64, u32, u64, usize);

macro_rules! display_rule_args {
    ($($ty:ty),*) => {
        $(
            impl From<&$ty> for RuleArg {
                fn from(value: &$ty) -> Self {
                    RuleArg(value.to_string())
                }
            }

            impl From<$ty> for RuleArg {
                fn from(value: $ty) -> Self {
                    RuleArg(value.to_string())
                }
            }
        )*
    };
}

display_rule_args!(
    ids::ProjectId,
    ids::CollectionId,
    ids::ProjectPath,
    ids::CollectionPath,
    ids::ObjectPath,
    ids::DropZoneToken,
    ids::AccountId,
    ids::IsoDate,
    ids::AclMode,
    ids::AccessLevel,
    ids::SizeUnit,
    ids::Rounding,
    ids::DropZoneType
);

/// Descriptor of a single rule invocation, built fresh for every call.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RuleCall {
    pub rule_name: String,
    pub args: Vec<RuleArg>,
    pub wants_result: bool,
    /// Replaces the generated body verbatim.
    pub literal_body: Option<String>,
    /// Replaces the generated parameter table verbatim.
    pub literal_params: Option<ParameterTable>,
}

impl RuleCall {
    pub fn new(rule_name: impl Into<String>) -> Self {
        Self {
            rule_name: rule_name.into(),
            args: Vec::new(),
            wants_result: false,
            literal_body: None,
            literal_params: None,
        }
    }

    pub fn arg(mut self, value: impl Into<RuleArg>) -> Self {
        self.args.push(value.into());
        self
    }

    pub fn with_result(mut self) -> Self {
        self.wants_result = true;
        self
    }

    pub fn without_result(mut self) -> Self {
        self.wants_result = false;
        self
    }

    pub fn literal_body(mut self, body: impl Into<String>) -> Self {
        self.literal_body = Some(body.into());
        self
    }

    pub fn literal_params(mut self, params: ParameterTable) -> Self {
        self.literal_params = Some(params);
        self
    }
}
