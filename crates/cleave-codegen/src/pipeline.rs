//! Linear generation pipeline.
//!
//! One pass from a classified registry and the raw program source to the
//! full artifact set: two program units, two native modules with headers,
//! two reflection configurations, and the boundary descriptor.

use cleave_core::{FunctionRegistry, Side};
use cleave_extract::{isolate_main_source, minify, GuestLanguage};
use tracing::{debug, info};

use crate::descriptor::{BoundaryDescriptor, DESCRIPTOR_FILE};
use crate::error::{CodegenError, Result};
use crate::native;
use crate::plan::PartitionPlan;
use crate::reflect;
use crate::sink::{Artifact, ArtifactSink};
use crate::unit;

/// What one generation run produced.
#[derive(Debug)]
pub struct GenerationReport {
    /// Artifact names in write order.
    pub artifacts: Vec<String>,
    /// Number of trusted-bound transitions in the boundary descriptor.
    pub ecalls: usize,
    /// Number of untrusted-bound transitions in the boundary descriptor.
    pub ocalls: usize,
}

/// Generate the complete partitioned artifact set.
///
/// The registry's classification decides everything; this function only
/// sequences the emitters and routes their output into `sink`.
pub fn partition(
    registry: &FunctionRegistry,
    source: &str,
    language: GuestLanguage,
    sink: &mut dyn ArtifactSink,
) -> Result<GenerationReport> {
    if source.trim().is_empty() {
        return Err(CodegenError::EmptySource);
    }

    let main_source = minify(language, &isolate_main_source(language, source));
    debug!(
        language = language.id(),
        main_len = main_source.len(),
        "isolated main source"
    );

    let mut artifacts = Vec::new();

    for side in Side::both() {
        let plan = PartitionPlan::for_side(registry, side);
        info!(
            side = side.program_class(),
            owned = plan.owned.len(),
            remote = plan.remote.len(),
            "generating partition"
        );

        let unit_text = unit::program_unit(registry, &plan, language, &main_source)?;
        emit(sink, &mut artifacts, unit::program_file_name(side), unit_text)?;
        emit(
            sink,
            &mut artifacts,
            native::module_file_name(side).to_string(),
            native::proxy_module(&plan),
        )?;
        emit(
            sink,
            &mut artifacts,
            native::header_file_name(side).to_string(),
            native::proxy_header(&plan),
        )?;
        emit(
            sink,
            &mut artifacts,
            reflect::config_file_name(side).to_string(),
            reflect::reflect_config(registry, side),
        )?;
    }

    let descriptor = BoundaryDescriptor::from_registry(registry);
    let (ecalls, ocalls) = (descriptor.ecalls().len(), descriptor.ocalls().len());
    emit(sink, &mut artifacts, DESCRIPTOR_FILE.to_string(), descriptor.render())?;

    Ok(GenerationReport {
        artifacts,
        ecalls,
        ocalls,
    })
}

fn emit(
    sink: &mut dyn ArtifactSink,
    artifacts: &mut Vec<String>,
    name: String,
    contents: String,
) -> Result<()> {
    sink.write(&Artifact::new(name.clone(), contents))?;
    artifacts.push(name);
    Ok(())
}

/// Generate a single unpartitioned program unit that evaluates the whole
/// minified source in one context. Used to build a baseline image for
/// comparison against the partitioned pair.
pub fn full_image(
    source: &str,
    language: GuestLanguage,
    sink: &mut dyn ArtifactSink,
) -> Result<GenerationReport> {
    if source.trim().is_empty() {
        return Err(CodegenError::EmptySource);
    }

    let body = minify(language, source);
    let mut w = crate::writer::CodeWriter::new();
    w.appendln("// Generated by cleave; do not edit.");
    w.blank();
    w.appendln("package partitioned;");
    w.blank();
    w.appendln("import org.graalvm.polyglot.*;");
    w.blank();
    w.appendln("public class Program {");
    w.indent();
    w.line("public static void main(String[] args) {");
    w.indent();
    w.line("Context context = Context.newBuilder().allowAllAccess(true).build();");
    w.line(&format!("context.eval(\"{}\", \"{body}\");", language.id()));
    w.outdent();
    w.line("}");
    w.outdent();
    w.appendln("}");

    let name = "Program.java".to_string();
    sink.write(&Artifact::new(name.clone(), w.finish()))?;
    Ok(GenerationReport {
        artifacts: vec![name],
        ecalls: 0,
        ocalls: 0,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sink::MemorySink;
    use cleave_core::{FunctionRecord, GuestType, TrustLabel};

    fn registry() -> FunctionRegistry {
        FunctionRegistry::from_seen(vec![
            FunctionRecord::new("app.js.enc", TrustLabel::Trusted)
                .with_arg_types(vec![GuestType::Int])
                .with_return_type(GuestType::Int)
                .with_source("function enc(x){return x+1;}"),
            FunctionRecord::new("app.js.log", TrustLabel::Untrusted)
                .with_arg_types(vec![GuestType::Double])
                .with_source("function log(m){print(m);}"),
            FunctionRecord::new("app.js.fmt", TrustLabel::Neutral)
                .with_return_type(GuestType::Int)
                .with_source("function fmt(){return 0;}"),
        ])
        .unwrap()
    }

    const SOURCE: &str = "function enc(x){return x+1;} function log(m){print(m);} function fmt(){return 0;} enc(2); log(0.5);";

    #[test]
    fn partition_emits_the_full_artifact_set() {
        let registry = registry();
        let mut sink = MemorySink::new();
        let report = partition(&registry, SOURCE, GuestLanguage::Js, &mut sink).unwrap();

        assert_eq!(
            report.artifacts,
            [
                "Trusted.java",
                "Proxy_In.cpp",
                "Proxy_In.h",
                "reflect-config-in.json",
                "Untrusted.java",
                "Proxy_Out.cpp",
                "Proxy_Out.h",
                "reflect-config-out.json",
                "partition.edl",
            ]
        );
        assert_eq!(report.ecalls, 1);
        assert_eq!(report.ocalls, 1);
        assert_eq!(sink.artifacts().len(), report.artifacts.len());
    }

    #[test]
    fn empty_source_is_rejected() {
        let registry = registry();
        let mut sink = MemorySink::new();
        let err = partition(&registry, "  \n", GuestLanguage::Js, &mut sink).unwrap_err();
        assert!(matches!(err, CodegenError::EmptySource));
        assert!(sink.artifacts().is_empty());

        let err = full_image("", GuestLanguage::Js, &mut sink).unwrap_err();
        assert!(matches!(err, CodegenError::EmptySource));
    }

    /// Entry point, proxy, and transition routine must agree on each
    /// crossing function's parameter list, or the generated partitions
    /// fail to link.
    #[test]
    fn crossing_signatures_agree_across_artifacts() {
        let registry = registry();
        let mut sink = MemorySink::new();
        partition(&registry, SOURCE, GuestLanguage::Js, &mut sink).unwrap();

        let edl = &sink.get("partition.edl").unwrap().contents;
        for (side, module_file, unit_file) in [
            (Side::Trusted, "Proxy_Out.cpp", "Trusted.java"),
            (Side::Untrusted, "Proxy_In.cpp", "Untrusted.java"),
        ] {
            // The caller-side module proxies this side's functions; the
            // owning side's unit exports the matching entry points.
            let module = &sink.get(module_file).unwrap().contents;
            let unit = &sink.get(unit_file).unwrap().contents;
            let plan = PartitionPlan::for_side(&registry, side);

            for func in &plan.owned {
                let sig = func.param_signature(false);
                let inner = sig.trim_start_matches('(').trim_end_matches(')');
                let simple = func.simple_name();

                assert!(module.contains(&format!("{simple}_proxy{sig}")));
                assert!(edl.contains(&format!(
                    "{}{simple}{sig};",
                    side.transition_prefix()
                )));
                assert!(unit.contains(&format!(
                    "{simple}_entry(IsolateThread thread, {inner})"
                )));
            }
        }
    }

    /// Sink that rejects one named artifact and accepts everything else.
    struct FlakySink {
        inner: MemorySink,
        fail_on: &'static str,
    }

    impl ArtifactSink for FlakySink {
        fn write(&mut self, artifact: &Artifact) -> crate::error::Result<()> {
            if artifact.name == self.fail_on {
                return Err(CodegenError::ArtifactWrite {
                    name: artifact.name.clone(),
                    source: std::io::Error::new(std::io::ErrorKind::Other, "disk full"),
                });
            }
            self.inner.write(artifact)
        }
    }

    #[test]
    fn write_failure_is_scoped_to_one_artifact() {
        let registry = registry();
        let mut sink = FlakySink {
            inner: MemorySink::new(),
            fail_on: "Untrusted.java",
        };
        let err = partition(&registry, SOURCE, GuestLanguage::Js, &mut sink).unwrap_err();

        match err {
            CodegenError::ArtifactWrite { name, .. } => assert_eq!(name, "Untrusted.java"),
            other => panic!("unexpected error: {other}"),
        }
        // Everything written before the failure stays intact.
        let names: Vec<_> = sink
            .inner
            .artifacts()
            .iter()
            .map(|a| a.name.as_str())
            .collect();
        assert_eq!(
            names,
            [
                "Trusted.java",
                "Proxy_In.cpp",
                "Proxy_In.h",
                "reflect-config-in.json",
            ]
        );
        assert!(sink
            .inner
            .artifacts()
            .iter()
            .all(|a| !a.contents.is_empty()));
    }

    #[test]
    fn full_image_wraps_the_whole_source() {
        let mut sink = MemorySink::new();
        let report = full_image(SOURCE, GuestLanguage::Js, &mut sink).unwrap();

        assert_eq!(report.artifacts, ["Program.java"]);
        let unit = &sink.get("Program.java").unwrap().contents;
        assert!(unit.contains("public class Program {"));
        assert!(unit.contains("context.eval(\"js\","));
        assert!(unit.contains("function enc(x){return x+1;}"));
        assert!(!unit.contains("_proxy"));
    }
}
