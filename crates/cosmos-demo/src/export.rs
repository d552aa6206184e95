//! Wavefront OBJ export of a generated planet.

use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;

use cosmos_planet::PlanetMesh;

/// Write `mesh` as a single OBJ object with positions, normals and biome UVs.
///
/// Faces are emitted in mesh order with 1-based `v/vt/vn` triplets.
pub fn write_obj<W: Write>(mesh: &PlanetMesh, object_name: &str, out: &mut W) -> io::Result<()> {
    let vertices = mesh.packed_vertices();

    writeln!(out, "# {} vertices, {} triangles", vertices.len(), mesh.triangle_count())?;
    writeln!(out, "o {object_name}")?;
    for v in &vertices {
        writeln!(out, "v {} {} {}", v.position[0], v.position[1], v.position[2])?;
    }
    for v in &vertices {
        writeln!(out, "vn {} {} {}", v.normal[0], v.normal[1], v.normal[2])?;
    }
    for v in &vertices {
        writeln!(out, "vt {} {}", v.uv[0], v.uv[1])?;
    }
    for tri in mesh.packed_indices().chunks_exact(3) {
        let (a, b, c) = (tri[0] + 1, tri[1] + 1, tri[2] + 1);
        writeln!(out, "f {a}/{a}/{a} {b}/{b}/{b} {c}/{c}/{c}")?;
    }
    Ok(())
}

/// Write `mesh` to `path` as OBJ.
pub fn save_obj(mesh: &PlanetMesh, object_name: &str, path: &Path) -> io::Result<()> {
    let mut out = BufWriter::new(File::create(path)?);
    write_obj(mesh, object_name, &mut out)?;
    out.flush()
}

/// Lowercase file stem for a planet name: alphanumerics kept, everything else `_`.
pub fn file_stem(name: &str) -> String {
    let stem: String = name
        .trim()
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() {
                c.to_ascii_lowercase()
            } else {
                '_'
            }
        })
        .collect();
    if stem.is_empty() { "planet".to_string() } else { stem }
}
