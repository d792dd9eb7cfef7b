//! Reflection configuration for ahead-of-time image builds.
//!
//! Each partition's image builder only retains methods it can prove
//! reachable; the generated program units look functions up by name at run
//! time, so every function a side may bind must be listed explicitly.

use cleave_core::{FunctionRegistry, Side};
use serde_json::json;

/// File name of the reflection configuration for one side.
pub fn config_file_name(side: Side) -> &'static str {
    match side {
        Side::Trusted => "reflect-config-in.json",
        Side::Untrusted => "reflect-config-out.json",
    }
}

/// Render the reflection configuration for one side's program unit.
///
/// Every seen function is listed, not just the side's own: generated
/// bodies bind all siblings into the evaluation context regardless of
/// where the body runs.
pub fn reflect_config(registry: &FunctionRegistry, side: Side) -> String {
    let methods: Vec<_> = registry
        .seen()
        .iter()
        .map(|func| {
            json!({
                "name": func.simple_name(),
                "parameterTypes": func
                    .arg_types
                    .iter()
                    .map(|ty| ty.name())
                    .collect::<Vec<_>>(),
            })
        })
        .collect();

    let config = json!([
        {
            "name": format!("partitioned.{}", side.program_class()),
            "allDeclaredMethods": true,
            "methods": methods,
        }
    ]);

    serde_json::to_string_pretty(&config).expect("reflect config is always serializable")
}
