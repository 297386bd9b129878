use indexmap::IndexMap;
use serde::Serialize;

use super::{RuleArg, RuleCall};

/// Output slot carrying a rule's JSON-encoded result.
pub const RESULT_SLOT: &str = "*result";

/// Placeholder name for the positional argument at `index` (1-based).
pub fn placeholder(index: usize) -> String {
    format!("*arg{index}")
}

/// Render `value` as a double-quoted string literal of the rule language.
///
/// Text without `"` or `\` is wrapped as is, so the literal is exactly
/// `"<value>"`. Those two characters are backslash-escaped, otherwise the
/// server would end the literal early.
pub fn quote_literal(value: &str) -> String {
    let mut literal = String::with_capacity(value.len() + 2);
    literal.push('"');
    for ch in value.chars() {
        if matches!(ch, '"' | '\\') {
            literal.push('\\');
        }
        literal.push(ch);
    }
    literal.push('"');
    literal
}

/// Ordered placeholder → literal mapping sent alongside a rule body.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ParameterTable(IndexMap<String, String>);

impl ParameterTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store `literal` verbatim under `name`.
    pub fn insert(&mut self, name: impl Into<String>, literal: impl Into<String>) {
        self.0.insert(name.into(), literal.into());
    }

    /// Builder form of [`ParameterTable::insert`] that quotes `value` first.
    pub fn quoted(mut self, name: impl Into<String>, value: impl AsRef<str>) -> Self {
        self.insert(name, quote_literal(value.as_ref()));
        self
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.0.get(name).map(String::as_str)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.0.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Table for positional `args`, with an empty `*result` slot appended when
    /// a result is wanted.
    pub fn positional(args: &[RuleArg], wants_result: bool) -> Self {
        let mut table = Self::new();
        for (index, arg) in args.iter().enumerate() {
            table.insert(placeholder(index + 1), quote_literal(arg.as_str()));
        }
        if wants_result {
            table.insert(RESULT_SLOT, quote_literal(""));
        }
        table
    }
}

/// Wrap `statement` in the block every rule body is executed from.
pub fn execute_block(statement: &str) -> String {
    format!("execute_rule{{\n{statement}\n}}")
}

/// Rule text that calls `rule_name` with every placeholder of `params`, in order.
pub fn rule_body(rule_name: &str, params: &ParameterTable) -> String {
    let names: Vec<&str> = params.names().collect();
    execute_block(&format!("{rule_name}({});", names.join(",")))
}

/// A rule ready to execute: body, parameter table and the output slot to read.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PreparedRule {
    pub rule_name: String,
    pub body: String,
    pub params: ParameterTable,
    pub output: Option<String>,
}

/// Serialize `call`, honouring any literal body or parameter table it carries.
pub fn prepare(call: &RuleCall) -> PreparedRule {
    let params = match &call.literal_params {
        Some(literal) => literal.clone(),
        None => ParameterTable::positional(&call.args, call.wants_result),
    };
    let body = match &call.literal_body {
        Some(literal) => literal.clone(),
        None => rule_body(&call.rule_name, &params),
    };
    PreparedRule {
        rule_name: call.rule_name.clone(),
        body,
        params,
        output: call.wants_result.then(|| RESULT_SLOT.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn positional_table_numbers_from_one_and_appends_result() {
        let call = RuleCall::new("get_project_details")
            .arg("/nlmumc/projects/P000000010")
            .arg(false)
            .arg(42_u64)
            .with_result();
        let prepared = prepare(&call);

        let entries: Vec<_> = prepared.params.iter().collect();
        assert_eq!(
            entries,
            [
                ("*arg1", "\"/nlmumc/projects/P000000010\""),
                ("*arg2", "\"false\""),
                ("*arg3", "\"42\""),
                ("*result", "\"\""),
            ]
        );
        assert_eq!(
            prepared.body,
            "execute_rule{\nget_project_details(*arg1,*arg2,*arg3,*result);\n}"
        );
        assert_eq!(prepared.output.as_deref(), Some(RESULT_SLOT));
    }

    #[test]
    fn no_result_slot_without_result() {
        let prepared = prepare(&RuleCall::new("set_collection_avu").arg("a").arg("b"));
        assert_eq!(prepared.params.len(), 2);
        assert!(!prepared.params.contains(RESULT_SLOT));
        assert_eq!(
            prepared.body,
            "execute_rule{\nset_collection_avu(*arg1,*arg2);\n}"
        );
        assert_eq!(prepared.output, None);
    }

    #[test]
    fn zero_argument_rules() {
        let prepared = prepare(&RuleCall::new("get_all_users").with_result());
        assert_eq!(prepared.body, "execute_rule{\nget_all_users(*result);\n}");
        let prepared = prepare(&RuleCall::new("ping"));
        assert_eq!(prepared.body, "execute_rule{\nping();\n}");
        assert!(prepared.params.is_empty());
    }

    #[test]
    fn literals_are_used_verbatim() {
        let params = ParameterTable::new()
            .quoted("*project", "P000000010")
            .quoted("*projectCollection", "C000000001");
        let call = RuleCall::new("close_project_collection")
            .arg("ignored")
            .literal_body("closeProjectCollection(*project,*projectCollection);")
            .literal_params(params.clone());
        let prepared = prepare(&call);
        assert_eq!(prepared.body, "closeProjectCollection(*project,*projectCollection);");
        assert_eq!(prepared.params, params);
    }

    #[test]
    fn literal_params_alone_still_generate_the_body() {
        let params = ParameterTable::new().quoted("*user", "jmelius");
        let prepared = prepare(&RuleCall::new("touch_user").literal_params(params));
        assert_eq!(prepared.body, "execute_rule{\ntouch_user(*user);\n}");
    }

    #[test]
    fn generated_and_literal_bodies_share_the_block() {
        let params = ParameterTable::new().quoted("*arg1", "x");
        assert_eq!(rule_body("ping", &params), execute_block("ping(*arg1);"));
        assert_eq!(execute_block("ping();"), "execute_rule{\nping();\n}");
    }

    #[test]
    fn plain_values_are_wrapped_verbatim() {
        for value in ["*arg1", "a*b", "/nlmumc/projects/P000000010", "x y z", "*result"] {
            assert_eq!(quote_literal(value), format!("\"{value}\""));
        }
        let prepared = prepare(&RuleCall::new("echo").arg("*arg2").with_result());
        assert_eq!(prepared.params.get("*arg1"), Some("\"*arg2\""));
    }

    #[test]
    fn quoting_escapes_embedded_quotes() {
        assert_eq!(quote_literal("plain"), "\"plain\"");
        assert_eq!(quote_literal(""), "\"\"");
        assert_eq!(quote_literal(r#"say "hi""#), r#""say \"hi\"""#);
        assert_eq!(quote_literal(r"C:\data"), r#""C:\\data""#);
    }
}
