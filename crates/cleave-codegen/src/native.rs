//! Native transition modules and proxy headers.
//!
//! Call chain for one cross-boundary call: generated body on the calling
//! side → proxy routine (this module, calling side) → ecall/ocall
//! transition routine (this module, owning side) → entry point → wrapper
//! body on the owning side.

use cleave_core::{FunctionRecord, Side};

use crate::plan::PartitionPlan;
use crate::writer::CodeWriter;

/// File name of the native transition module for one side.
pub fn module_file_name(side: Side) -> &'static str {
    match side {
        Side::Trusted => "Proxy_In.cpp",
        Side::Untrusted => "Proxy_Out.cpp",
    }
}

/// File name of the proxy header for one side.
pub fn header_file_name(side: Side) -> &'static str {
    match side {
        Side::Trusted => "Proxy_In.h",
        Side::Untrusted => "Proxy_Out.h",
    }
}

/// Generate the native module for one side: transition-routine bodies for
/// the functions this side owns, then proxy bodies for the functions it
/// calls remotely.
pub fn proxy_module(plan: &PartitionPlan<'_>) -> String {
    let side = plan.side;
    let mut w = CodeWriter::new();

    w.appendln("// Generated by cleave; do not edit.");
    w.blank();
    emit_includes(&mut w, side);
    w.blank();
    emit_externs(&mut w, side);
    w.blank();

    // Transition routines: the receiving half of calls into this side.
    for &func in &plan.owned {
        emit_transition_routine(&mut w, side, func);
    }

    // Proxy routines: the sending half of calls out of this side.
    for &func in &plan.remote {
        emit_proxy_routine(&mut w, side, func);
    }

    w.finish()
}

/// Generate the proxy header for one side: prototypes for every proxy the
/// side's program unit declares, inside include guards and a C-linkage
/// block.
pub fn proxy_header(plan: &PartitionPlan<'_>) -> String {
    let suffix = match plan.side {
        Side::Trusted => "IN_H",
        Side::Untrusted => "OUT_H",
    };
    let mut w = CodeWriter::new();

    w.appendln(&format!("#ifndef __PROXY_{suffix}"));
    w.appendln(&format!("#define __PROXY_{suffix}"));
    w.blank();
    w.appendln("#if defined(__cplusplus)");
    w.appendln("extern \"C\" {");
    w.appendln("#endif");
    w.blank();

    for func in &plan.remote {
        w.appendln(&format!(
            "{} {}_proxy{};",
            func.return_type.name(),
            func.simple_name(),
            func.param_signature(false)
        ));
    }
    w.blank();

    w.appendln("#if defined(__cplusplus)");
    w.appendln("}");
    w.appendln("#endif");
    w.blank();
    w.appendln("#endif");
    w.finish()
}

fn emit_includes(w: &mut CodeWriter, side: Side) {
    w.appendln(&format!("#include \"{}\"", header_file_name(side)));
    match side {
        Side::Trusted => {
            w.appendln("#include \"checks.h\"");
            w.appendln("#include \"../../Enclave.h\"");
            w.appendln("#include \"graal_isolate.h\"");
            w.appendln("#include \"main.h\"");
        }
        Side::Untrusted => {
            w.appendln("#include \"graal_isolate.h\"");
            w.appendln("#include \"Enclave_u.h\"");
            w.appendln("#include \"main.h\"");
        }
    }
}

/// Handles owned by the enclave runtime module; names must match it.
fn emit_externs(w: &mut CodeWriter, side: Side) {
    match side {
        Side::Trusted => {
            w.appendln("extern graal_isolatethread_t *global_enc_iso;");
        }
        Side::Untrusted => {
            w.appendln("extern sgx_enclave_id_t global_eid;");
            w.appendln("extern graal_isolatethread_t *global_app_iso;");
        }
    }
}

/// The owning side's half of a transition: receive the call and forward it
/// into the entry point with this side's own context handle.
fn emit_transition_routine(w: &mut CodeWriter, side: Side, func: &FunctionRecord) {
    let simple = func.simple_name();
    w.appendln(&format!(
        "{} {}{simple}{} {{",
        func.return_type.name(),
        side.transition_prefix(),
        func.param_signature(false)
    ));
    w.indent();
    let call = format!(
        "{simple}_entry{};",
        func.entry_invocation(side.isolate_handle())
    );
    if func.return_type.is_void() {
        w.line(&call);
    } else {
        w.line(&format!("return {call}"));
    }
    w.outdent();
    w.appendln("}");
    w.blank();
}

/// The calling side's half: relay the proxy call into the transition that
/// crosses the boundary, with a caller-allocated out-parameter when the
/// call returns a value.
fn emit_proxy_routine(w: &mut CodeWriter, side: Side, func: &FunctionRecord) {
    let simple = func.simple_name();
    let target = side.other();
    let is_ecall = target == Side::Trusted;

    w.appendln(&format!(
        "{} {simple}_proxy{} {{",
        func.return_type.name(),
        func.param_signature(false)
    ));
    w.indent();
    let transition = format!(
        "{}{simple}{};",
        target.transition_prefix(),
        func.transition_invocation(is_ecall)
    );
    if func.return_type.is_void() {
        w.line(&transition);
    } else {
        w.line(&format!("{} ret;", func.return_type.name()));
        w.line(&transition);
        w.line("return ret;");
    }
    w.outdent();
    w.appendln("}");
    w.blank();
}
