use std::fs;
use std::path::Path;

fn shader_sources() -> Vec<(String, String)> {
    let shader_dir = Path::new(env!("CARGO_MANIFEST_DIR")).join("src/gpu/shaders");
    assert!(shader_dir.exists(), "shader directory missing: {shader_dir:?}");

    let mut sources = Vec::new();
    for entry in fs::read_dir(&shader_dir).unwrap() {
        let path = entry.unwrap().path();
        if path.extension().map_or(false, |ext| ext == "wgsl") {
            let name = path.file_name().unwrap().to_string_lossy().into_owned();
            sources.push((name, fs::read_to_string(&path).unwrap()));
        }
    }
    assert!(!sources.is_empty(), "no .wgsl files found");
    sources
}

#[test]
fn all_shaders_parse_and_validate() {
    let mut errors = Vec::new();

    for (name, source) in shader_sources() {
        let module = match naga::front::wgsl::parse_str(&source) {
            Ok(module) => module,
            Err(e) => {
                errors.push(format!("{name} failed to parse:\n{}", e.emit_to_string(&source)));
                continue;
            }
        };

        let mut validator = naga::valid::Validator::new(
            naga::valid::ValidationFlags::all(),
            naga::valid::Capabilities::all(),
        );
        if let Err(e) = validator.validate(&module) {
            errors.push(format!("{name} failed validation:\n{e:?}"));
        }
    }

    if !errors.is_empty() {
        panic!("shader validation failed:\n{}", errors.join("\n"));
    }
}

#[test]
fn all_shaders_expose_render_entry_points() {
    // Every shader in this crate is a render pipeline with the same two
    // entry points; the pipeline builder assumes them.
    for (name, source) in shader_sources() {
        let module = naga::front::wgsl::parse_str(&source)
            .unwrap_or_else(|e| panic!("{name}: {}", e.emit_to_string(&source)));
        let entry_names: Vec<&str> = module
            .entry_points
            .iter()
            .map(|ep| ep.name.as_str())
            .collect();
        assert!(entry_names.contains(&"vs_main"), "{name} lacks vs_main");
        assert!(entry_names.contains(&"fs_main"), "{name} lacks fs_main");
    }
}
