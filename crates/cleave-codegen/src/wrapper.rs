//! Guest-language wrapper snippets.
//!
//! A wrapper is the snippet a generated local body evaluates in a fresh
//! interpreter context: a named function literal that carries the target's
//! verbatim definition, binds every sibling callable positionally, invokes
//! the target, and finally names itself so evaluating the snippet yields
//! the callable.

use cleave_core::FunctionRecord;
use cleave_extract::{minify, GuestLanguage};

/// Ordered parameter list for a function wrapper: every seen sibling except
/// the target, in seen order, followed by the target's positional
/// parameters.
///
/// The embedded snippet references siblings as free variables bound by
/// position to this exact list. Reordering breaks binding at runtime, not
/// at generation time, so this list is built once here and consumed
/// everywhere a wrapper's arguments are named.
pub fn wrapper_param_list(seen: &[FunctionRecord], target: &FunctionRecord) -> Vec<String> {
    let mut params: Vec<String> = seen
        .iter()
        .filter(|g| g.qualified_name != target.qualified_name)
        .map(|g| g.simple_name().to_string())
        .collect();
    params.extend(target.param_names());
    params
}

/// Ordered parameter list for the main wrapper: every seen function's
/// simple name, in seen order.
pub fn main_param_list(seen: &[FunctionRecord]) -> Vec<String> {
    seen.iter().map(|g| g.simple_name().to_string()).collect()
}

/// Build the wrapper snippet for one function.
pub fn wrap_function(
    language: GuestLanguage,
    seen: &[FunctionRecord],
    target: &FunctionRecord,
) -> String {
    let name = target.simple_name();
    let params = wrapper_param_list(seen, target).join(",");
    let body = minify(language, &target.source_text);
    let call = format!("{name}{}", target.call_invocation());

    match language {
        GuestLanguage::Js => {
            let invoke = if target.return_type.is_void() {
                format!("{call};")
            } else {
                format!("return {call};")
            };
            format!("function {name}_wrapper({params}){{{body}{invoke}}}{name}_wrapper;")
        }
        GuestLanguage::Python => {
            let invoke = if target.return_type.is_void() {
                call
            } else {
                format!("return {call}")
            };
            format!("def {name}_wrapper({params}):\n\t{body}\n\t{invoke}\n\n{name}_wrapper\n")
        }
    }
}

/// Build the main-routine wrapper around the isolated main source.
///
/// Its only formal parameters are the seen callables themselves, in order.
pub fn wrap_main(language: GuestLanguage, seen: &[FunctionRecord], main_body: &str) -> String {
    let params = main_param_list(seen).join(",");
    match language {
        GuestLanguage::Js => {
            format!("function main_wrapper({params}){{{main_body}}}main_wrapper;")
        }
        GuestLanguage::Python => {
            format!("def main_wrapper({params}):\n\t{main_body}\n\nmain_wrapper")
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cleave_core::{GuestType, TrustLabel};

    fn seen() -> Vec<FunctionRecord> {
        vec![
            FunctionRecord::new("app.js.a", TrustLabel::Neutral)
                .with_source("function a(){p=0;}"),
            FunctionRecord::new("app.js.b", TrustLabel::Trusted)
                .with_arg_types(vec![GuestType::Int, GuestType::Int])
                .with_return_type(GuestType::Int)
                .with_source("function b(x,y){return x+y;}"),
            FunctionRecord::new("app.js.c", TrustLabel::Untrusted)
                .with_source("function c(){q=1;}"),
        ]
    }

    #[test]
    fn sibling_order_then_positional_params() {
        let seen = seen();
        let params = wrapper_param_list(&seen, &seen[1]);
        assert_eq!(params, vec!["a", "c", "param1", "param2"]);
    }

    #[test]
    fn single_seen_function_has_no_stray_separator() {
        let only = vec![FunctionRecord::new("app.js.f", TrustLabel::Neutral)
            .with_arg_types(vec![GuestType::Int, GuestType::Int])];
        let params = wrapper_param_list(&only, &only[0]);
        assert_eq!(params.join(","), "param1,param2");
    }

    #[test]
    fn js_wrapper_shape() {
        let seen = seen();
        let snippet = wrap_function(GuestLanguage::Js, &seen, &seen[1]);
        assert_eq!(
            snippet,
            "function b_wrapper(a,c,param1,param2){function b(x,y){return x+y;}\
             return b(param1, param2);}b_wrapper;"
        );
    }

    #[test]
    fn js_wrapper_void_omits_return() {
        let seen = seen();
        let snippet = wrap_function(GuestLanguage::Js, &seen, &seen[2]);
        assert!(snippet.contains("{function c(){q=1;}c();}"));
        assert!(!snippet.contains("return c()"));
    }

    #[test]
    fn wrapper_snippet_round_trips_as_single_literal() {
        let seen = seen();
        let target = &seen[1];
        let snippet = wrap_function(GuestLanguage::Js, &seen, target);
        // Exactly one wrapper literal, named <simple>_wrapper, carrying the
        // verbatim definition, and the trailing bare reference.
        assert!(snippet.starts_with("function b_wrapper("));
        assert!(snippet.contains(&target.source_text));
        assert!(snippet.ends_with("b_wrapper;"));
        assert_eq!(snippet.matches("b_wrapper").count(), 2);
    }

    #[test]
    fn python_wrapper_shape() {
        let target = FunctionRecord::new("app.py.f", TrustLabel::Trusted)
            .with_arg_types(vec![GuestType::Int])
            .with_return_type(GuestType::Int)
            .with_source("def f(x):\n    return x");
        let seen = vec![target.clone()];
        let snippet = wrap_function(GuestLanguage::Python, &seen, &target);
        assert_eq!(
            snippet,
            "def f_wrapper(param1):\n\tdef f(x):\\n\\treturn x\n\treturn f(param1)\n\nf_wrapper\n"
        );
    }

    #[test]
    fn main_wrapper_binds_all_seen() {
        let seen = seen();
        let snippet = wrap_main(GuestLanguage::Js, &seen, "y=2; w=4;");
        assert_eq!(
            snippet,
            "function main_wrapper(a,b,c){y=2; w=4;}main_wrapper;"
        );
    }
}
