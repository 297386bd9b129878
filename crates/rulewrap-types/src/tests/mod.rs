use serde_json::Value;

use crate::{FromRuleResult, ShapeError};

pub mod collections;
pub mod users;

pub(crate) fn compose_ok<T: FromRuleResult>(value: Value) -> T {
    match T::from_rule_result(value) {
        Ok(composed) => composed,
        Err(err) => panic!("composition failed: {err}"),
    }
}

pub(crate) fn compose_err<T: FromRuleResult + std::fmt::Debug>(value: Value) -> ShapeError {
    match T::from_rule_result(value) {
        Ok(composed) => panic!("expected a shape error, composed {composed:?}"),
        Err(err) => err,
    }
}
