//! The particle shader must parse and validate with naga, and its vertex
//! inputs must line up with `Vertex`.

use naga::valid::{Capabilities, ValidationFlags, Validator};
use pfx2d::SHADER_SOURCE;

fn parse() -> naga::Module {
    naga::front::wgsl::parse_str(SHADER_SOURCE)
        .unwrap_or_else(|e| panic!("WGSL parse error:\n{}", e.emit_to_string(SHADER_SOURCE)))
}

#[test]
fn test_shader_validates() {
    let module = parse();
    let mut validator = Validator::new(ValidationFlags::all(), Capabilities::all());
    validator
        .validate(&module)
        .unwrap_or_else(|e| panic!("WGSL validation error: {:?}", e));
}

#[test]
fn test_shader_entry_points() {
    let module = parse();
    let names: Vec<(&str, naga::ShaderStage)> = module
        .entry_points
        .iter()
        .map(|ep| (ep.name.as_str(), ep.stage))
        .collect();

    assert!(names.contains(&("vs_main", naga::ShaderStage::Vertex)));
    assert!(names.contains(&("fs_main", naga::ShaderStage::Fragment)));
}

#[test]
fn test_vertex_inputs_match_vertex_layout() {
    let module = parse();
    let vs = module
        .entry_points
        .iter()
        .find(|ep| ep.name == "vs_main")
        .expect("vertex entry point");

    // One struct argument carrying location 0 (position) and 1 (color)
    assert_eq!(vs.function.arguments.len(), 1);
    let ty = &module.types[vs.function.arguments[0].ty];
    let naga::TypeInner::Struct { members, .. } = &ty.inner else {
        panic!("vertex input should be a struct");
    };

    let locations: Vec<u32> = members
        .iter()
        .filter_map(|m| match m.binding {
            Some(naga::Binding::Location { location, .. }) => Some(location),
            _ => None,
        })
        .collect();
    assert_eq!(locations, vec![0, 1]);
}
