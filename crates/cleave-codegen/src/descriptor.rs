//! Boundary descriptor listing every cross-partition transition.

use cleave_core::{FunctionRecord, FunctionRegistry, Side};

use crate::writer::CodeWriter;

/// File name of the rendered boundary descriptor.
pub const DESCRIPTOR_FILE: &str = "partition.edl";

/// The set of transitions crossing the trust boundary in each direction.
///
/// Every trusted function is reachable from the untrusted side through an
/// ecall, and every untrusted function from the trusted side through an
/// ocall; neutral functions never cross and do not appear here.
#[derive(Debug)]
pub struct BoundaryDescriptor<'a> {
    ecalls: Vec<&'a FunctionRecord>,
    ocalls: Vec<&'a FunctionRecord>,
}

impl<'a> BoundaryDescriptor<'a> {
    pub fn from_registry(registry: &'a FunctionRegistry) -> Self {
        Self {
            ecalls: registry.trusted().iter().collect(),
            ocalls: registry.untrusted().iter().collect(),
        }
    }

    pub fn ecalls(&self) -> &[&'a FunctionRecord] {
        &self.ecalls
    }

    pub fn ocalls(&self) -> &[&'a FunctionRecord] {
        &self.ocalls
    }

    /// Render the descriptor in EDL syntax.
    pub fn render(&self) -> String {
        let mut w = CodeWriter::new();
        w.appendln("enclave {");
        w.indent();

        w.line("trusted {");
        w.indent();
        for func in &self.ecalls {
            w.line(&declaration(func, Side::Trusted));
        }
        w.outdent();
        w.line("};");
        w.blank();

        w.line("untrusted {");
        w.indent();
        for func in &self.ocalls {
            w.line(&declaration(func, Side::Untrusted));
        }
        w.outdent();
        w.line("};");

        w.outdent();
        w.appendln("};");
        w.finish()
    }
}

fn declaration(func: &FunctionRecord, side: Side) -> String {
    let visibility = match side {
        Side::Trusted => "public ",
        Side::Untrusted => "",
    };
    format!(
        "{visibility}{} {}{}{};",
        func.return_type.name(),
        side.transition_prefix(),
        func.simple_name(),
        func.param_signature(false)
    )
}
