//! Script stub generation
//!
//! Emits the text file of import directives the external toolchain parser
//! consumes. The directive grammar is fixed; changing spacing, casing, or
//! the `MODELS\` prefixes breaks the importer.

/// Render the script stub for an exported model.
///
/// `name` doubles as the class name and the base of the referenced file
/// names; `frame_count` feeds the sequence directive spanning
/// `[0, frame_count)`.
pub fn generate_script(name: &str, frame_count: u16, materials: &[String]) -> String {
    let mut uc = String::new();

    uc.push_str(&format!("class {} extends Actor;\n", name));
    uc.push_str(&format!(
        "#exec MESH IMPORT MESH={0} ANIVFILE=MODELS\\{0}_a.3d DATAFILE=MODELS\\{0}_d.3d X=0 Y=0 Z=0\n",
        name
    ));
    uc.push_str(&format!("#exec MESH ORIGIN MESH={} X=0 Y=0 Z=0\n", name));
    uc.push_str(&format!(
        "#exec MESH SEQUENCE MESH={} SEQ=All STARTFRAME=0 NUMFRAMES={}\n",
        name, frame_count
    ));

    for material in materials {
        uc.push_str(&format!(
            "#exec TEXTURE IMPORT NAME={0} FILE=MODELS\\{0}.PCX GROUP=\"Skins\"\n",
            material
        ));
    }

    uc.push_str(&format!(
        "#exec MESHMAP SCALE MESHMAP={} X=0.5 Y=0.5 Z=1.0\n",
        name
    ));

    for (i, material) in materials.iter().enumerate() {
        uc.push_str(&format!(
            "#exec MESHMAP SETTEXTURE MESHMAP={} NUM={} TEXTURE={}\n",
            name, i, material
        ));
    }

    uc
}
