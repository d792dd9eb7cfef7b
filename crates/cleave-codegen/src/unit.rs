//! Per-side program units.
//!
//! One translation unit per partition: the main routine (real on the
//! untrusted side, a placeholder on the trusted side), a body for every
//! function (wrapper-evaluating when local, proxy-forwarding when remote),
//! entry points for the functions this side owns, and externally-linked
//! proxy declarations for the functions it does not.

use cleave_core::{FunctionRecord, FunctionRegistry, Side};
use cleave_extract::GuestLanguage;

use crate::error::{CodegenError, Result};
use crate::plan::PartitionPlan;
use crate::wrapper::{main_param_list, wrap_function, wrap_main, wrapper_param_list};
use crate::writer::CodeWriter;

/// File name of the program unit for one side.
pub fn program_file_name(side: Side) -> String {
    format!("{}.java", side.program_class())
}

/// Generate the complete program unit for one side.
///
/// `main_source` is the program's isolated main source (everything outside
/// function bodies), already minified.
pub fn program_unit(
    registry: &FunctionRegistry,
    plan: &PartitionPlan<'_>,
    language: GuestLanguage,
    main_source: &str,
) -> Result<String> {
    let side = plan.side;
    let mut w = CodeWriter::new();

    emit_prologue(&mut w);
    w.appendln(&format!("public class {} {{", side.program_class()));
    w.blank();
    w.indent();

    match side {
        Side::Untrusted => emit_main(&mut w, registry, side, language, main_source),
        Side::Trusted => emit_placeholder_main(&mut w),
    }
    w.blank();

    // Bodies are emitted in a fixed traversal order on both sides so the
    // two units stay diffable: trusted, neutral, untrusted.
    emit_bodies(&mut w, registry, plan, language, registry.trusted())?;
    emit_bodies(&mut w, registry, plan, language, registry.neutral())?;
    emit_bodies(&mut w, registry, plan, language, registry.untrusted())?;

    emit_entry_points(&mut w, &plan.owned);
    emit_proxy_declarations(&mut w, &plan.remote);

    w.outdent();
    w.appendln("}");
    Ok(w.finish())
}

fn emit_prologue(w: &mut CodeWriter) {
    w.appendln("// Generated by cleave; do not edit.");
    w.blank();
    w.appendln("package partitioned;");
    w.blank();
    w.appendln("import org.graalvm.nativeimage.CurrentIsolate;");
    w.appendln("import org.graalvm.nativeimage.IsolateThread;");
    w.appendln("import org.graalvm.nativeimage.c.function.CEntryPoint;");
    w.appendln("import org.graalvm.nativeimage.c.function.CFunction;");
    w.appendln("import org.graalvm.polyglot.*;");
    w.appendln("import org.graalvm.polyglot.proxy.*;");
    w.blank();
}

/// The real program entry point. It lives in the untrusted unit by
/// convention: execution starts in the host and transitions into the
/// enclave only through generated proxies.
fn emit_main(
    w: &mut CodeWriter,
    registry: &FunctionRegistry,
    side: Side,
    language: GuestLanguage,
    main_source: &str,
) {
    w.line("public static void main(String[] args) {");
    w.indent();
    w.line("Context context = Context.newBuilder().allowAllAccess(true).build();");
    for func in registry.seen() {
        w.line(&sibling_binding(side, func.simple_name()));
    }
    let snippet = escape_embedded(&wrap_main(language, registry.seen(), main_source));
    let args = main_param_list(registry.seen()).join(",");
    w.line(&format!(
        "context.eval(\"{}\", \"{snippet}\").execute({args});",
        language.id()
    ));
    w.outdent();
    w.line("}");
}

/// The enclave image still needs a main symbol to link as a program, but
/// control never starts there.
fn emit_placeholder_main(w: &mut CodeWriter) {
    w.line("public static void main(String[] args) {");
    w.indent();
    w.line("System.out.println(\"trusted partition: no direct entry\");");
    w.outdent();
    w.line("}");
}

fn emit_bodies(
    w: &mut CodeWriter,
    registry: &FunctionRegistry,
    plan: &PartitionPlan<'_>,
    language: GuestLanguage,
    records: &[FunctionRecord],
) -> Result<()> {
    for func in records {
        if plan.is_local(func) {
            emit_local_body(w, registry, plan.side, language, func)?;
        } else {
            emit_proxy_forward(w, func);
        }
        w.blank();
    }
    Ok(())
}

/// A local body evaluates the function's wrapper snippet in a fresh
/// interpreter context seeded with every sibling's resolved callable, then
/// converts the boxed result through the declared return type's accessor.
fn emit_local_body(
    w: &mut CodeWriter,
    registry: &FunctionRegistry,
    side: Side,
    language: GuestLanguage,
    func: &FunctionRecord,
) -> Result<()> {
    let seen = registry.seen();
    if !seen
        .iter()
        .any(|s| s.qualified_name == func.qualified_name)
    {
        return Err(CodegenError::MissingFromSeen {
            name: func.qualified_name.clone(),
        });
    }

    w.line(&format!(
        "public static {} {}{} {{",
        func.return_type.name(),
        func.simple_name(),
        func.param_signature(false)
    ));
    w.indent();
    w.line("Context context = Context.newBuilder().allowAllAccess(true).build();");
    for sibling in seen {
        if sibling.qualified_name == func.qualified_name {
            continue;
        }
        w.line(&sibling_binding(side, sibling.simple_name()));
    }

    let snippet = escape_embedded(&wrap_function(language, seen, func));
    let args = wrapper_param_list(seen, func).join(",");
    let eval = format!(
        "context.eval(\"{}\", \"{snippet}\").execute({args})",
        language.id()
    );
    if func.return_type.is_void() {
        w.line(&format!("{eval};"));
    } else {
        w.line(&format!("return {eval}.{};", func.return_type.accessor()));
    }

    w.outdent();
    w.line("}");
    Ok(())
}

/// A remote function's body is one forward into its externally-linked
/// proxy; the proxy relays to the real transition routine.
fn emit_proxy_forward(w: &mut CodeWriter, func: &FunctionRecord) {
    w.line(&format!(
        "public static {} {}{} {{",
        func.return_type.name(),
        func.simple_name(),
        func.param_signature(false)
    ));
    w.indent();
    let call = format!(
        "{}_proxy{};",
        func.simple_name(),
        func.call_invocation()
    );
    if func.return_type.is_void() {
        w.line(&call);
    } else {
        w.line(&format!("return {call}"));
    }
    w.outdent();
    w.line("}");
}

/// Entry points adapt native transition routines onto this side's bodies:
/// an implicit execution-context handle first, then the function's exact
/// parameter list, and exactly one call inward.
fn emit_entry_points(w: &mut CodeWriter, owned: &[&FunctionRecord]) {
    for func in owned {
        let symbol = format!("{}_entry", func.simple_name());
        w.line(&format!("@CEntryPoint(name = \"{symbol}\")"));
        w.line(&format!(
            "public static {} {}{} {{",
            func.return_type.name(),
            symbol,
            func.param_signature(true)
        ));
        w.indent();
        let call = format!("{}{};", func.simple_name(), func.call_invocation());
        if func.return_type.is_void() {
            w.line(&call);
        } else {
            w.line(&format!("return {call}"));
        }
        w.outdent();
        w.line("}");
        w.blank();
    }
}

/// Externally-linked proxy prototypes for every remote function. No body
/// is emitted on this side; the native module provides it.
fn emit_proxy_declarations(w: &mut CodeWriter, remote: &[&FunctionRecord]) {
    for func in remote {
        w.line("@CFunction");
        w.line(&format!(
            "public static native {} {}_proxy{};",
            func.return_type.name(),
            func.simple_name(),
            func.param_signature(false)
        ));
    }
    if !remote.is_empty() {
        w.blank();
    }
}

fn sibling_binding(side: Side, simple: &str) -> String {
    format!(
        "Value {simple} = context.asValue({}.class).getMember(\"static\").getMember(\"{simple}\");",
        side.program_class()
    )
}

/// Escape raw newlines and tabs so a wrapper snippet survives inside the
/// generated unit's string literal. Indentation-significant snippets carry
/// real line structure in their skeleton.
fn escape_embedded(snippet: &str) -> String {
    snippet.replace('\n', "\\n").replace('\t', "\\t")
}
