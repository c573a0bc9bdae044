//! Registry manifests: the deterministic build step that feeds generation.
//!
//! A manifest is a JSON description of the declarations one interpreter
//! module contributes. The caller passes a repeatable list of manifest
//! paths; they are merged in order into one [`BridgeRegistry`], so the
//! authoritative declaration order is exactly the file order followed by
//! each file's own declaration order.

use std::fs;
use std::path::Path;

use rustc_hash::FxHashMap;
use serde::Deserialize;

use hpi_core::{Direction, GenError, ParamDecl, TypeTag, WrapperKind, WrapperSource};

use crate::{BridgeRegistry, RegistryBuilder};

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct Manifest {
    #[serde(default)]
    globals: Vec<ManifestCallable>,
    #[serde(default)]
    components: Vec<ManifestComponent>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct ManifestCallable {
    name: String,
    direction: Direction,
    #[serde(default)]
    ret: Option<TypeTag>,
    #[serde(default)]
    params: Vec<ManifestParam>,
    /// Interpreter module hosting a global import.
    #[serde(default)]
    module: Option<String>,
    /// Interpreter method a component import binds to; defaults to `name`.
    #[serde(default)]
    method: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct ManifestParam {
    name: String,
    #[serde(rename = "type")]
    tag: TypeTag,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct ManifestComponent {
    name: String,
    #[serde(default)]
    callables: Vec<ManifestCallable>,
    #[serde(default)]
    wrappers: FxHashMap<WrapperKind, String>,
}

/// Load and merge manifests, in order, into a finished registry.
pub fn load<P: AsRef<Path>>(paths: &[P]) -> Result<BridgeRegistry, GenError> {
    let mut builder = RegistryBuilder::new();
    for path in paths {
        let path = path.as_ref();
        let origin = path.display().to_string();
        let text = fs::read_to_string(path).map_err(|e| GenError::Manifest {
            path: origin.clone(),
            detail: e.to_string(),
        })?;
        builder = apply_str(builder, &text, &origin)?;
    }
    builder.finish()
}

/// Merge one manifest document into a builder.
pub fn apply_str(
    mut builder: RegistryBuilder,
    text: &str,
    origin: &str,
) -> Result<RegistryBuilder, GenError> {
    let manifest: Manifest = serde_json::from_str(text).map_err(|e| GenError::Manifest {
        path: origin.to_string(),
        detail: e.to_string(),
    })?;

    for callable in manifest.globals {
        let params = params_of(&callable);
        match callable.direction {
            Direction::Import => {
                let module = callable.module.ok_or_else(|| GenError::MissingField {
                    owner: format!("global callable \"{}\"", callable.name),
                    field: "module".into(),
                })?;
                builder = builder.global_import(callable.name, module, callable.ret, params);
            }
            Direction::Export => {
                builder = builder.global_export(callable.name, callable.ret, params);
            }
        }
    }

    for component in manifest.components {
        // Sort wrappers by kind for a deterministic registry.
        let mut wrappers: Vec<_> = component.wrappers.into_iter().collect();
        wrappers.sort_by_key(|(kind, _)| kind.as_str());

        builder = builder.component(component.name, |mut c| {
            for callable in component.callables {
                let params = params_of(&callable);
                match callable.direction {
                    Direction::Import => {
                        let method = callable.method.unwrap_or_else(|| callable.name.clone());
                        c = c.import(callable.name, method, callable.ret, params);
                    }
                    Direction::Export => {
                        c = c.export(callable.name, callable.ret, params);
                    }
                }
            }
            for (kind, text) in wrappers {
                c = c.wrapper(kind, WrapperSource::Literal(text));
            }
            c
        });
    }

    Ok(builder)
}

fn params_of(callable: &ManifestCallable) -> Vec<ParamDecl> {
    callable
        .params
        .iter()
        .map(|p| ParamDecl::new(p.name.clone(), p.tag))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use hpi_core::Binding;

    const SPI: &str = r#"{
        "components": [
            {
                "name": "Spi",
                "callables": [
                    { "name": "write", "direction": "export",
                      "params": [ { "name": "data", "type": "b" } ] },
                    { "name": "read_done", "direction": "import" }
                ],
                "wrappers": { "sv-dpi": "module spi_bfm; endmodule" }
            }
        ]
    }"#;

    #[test]
    fn parses_component_manifest() {
        let builder = apply_str(RegistryBuilder::new(), SPI, "spi.json").unwrap();
        let registry = builder.finish().unwrap();

        let spi = registry.component("Spi").unwrap();
        assert_eq!(spi.id, 0);
        assert_eq!(spi.callables.len(), 2);
        assert_eq!(spi.callables[0].params[0].tag, TypeTag::Byte);
        assert_eq!(spi.callables[0].export_id, Some(0));
        // Import method defaults to the callable name.
        assert_eq!(
            spi.callables[1].binding,
            Binding::Method("read_done".into())
        );
        assert!(spi.wrapper(WrapperKind::SvDpi).is_some());
    }

    #[test]
    fn merges_manifests_in_order() {
        let uart = r#"{ "components": [ { "name": "Uart" } ] }"#;
        let builder = apply_str(RegistryBuilder::new(), SPI, "spi.json").unwrap();
        let builder = apply_str(builder, uart, "uart.json").unwrap();
        let registry = builder.finish().unwrap();

        assert_eq!(registry.components()[0].name, "Spi");
        assert_eq!(registry.components()[1].name, "Uart");
        assert_eq!(registry.component("Uart").unwrap().id, 1);
    }

    #[test]
    fn global_import_requires_module() {
        let text = r#"{ "globals": [ { "name": "log_msg", "direction": "import" } ] }"#;
        let err = apply_str(RegistryBuilder::new(), text, "bad.json").unwrap_err();
        assert!(matches!(err, GenError::MissingField { field, .. } if field == "module"));
    }

    #[test]
    fn unknown_type_tag_is_fatal() {
        let text = r#"{ "globals": [ { "name": "f", "direction": "export",
            "params": [ { "name": "x", "type": "q" } ] } ] }"#;
        let err = apply_str(RegistryBuilder::new(), text, "bad.json").unwrap_err();
        assert!(matches!(err, GenError::Manifest { .. }));
    }

    #[test]
    fn malformed_json_names_the_origin() {
        let err = apply_str(RegistryBuilder::new(), "{", "broken.json").unwrap_err();
        assert!(matches!(err, GenError::Manifest { path, .. } if path == "broken.json"));
    }
}
