//! Integration tests for ugold-export
//!
//! Tests the full pipeline: generate scene snapshot -> export -> verify the
//! emitted files byte-for-byte.

use std::path::Path;
use tempfile::tempdir;

use ugold_export::scene::{FaceData, FrameSample, MeshData, ObjectKind, SceneDoc, SceneObject};

fn triangle_scene() -> SceneDoc {
    SceneDoc {
        frame_start: 1,
        frame_end: 1,
        objects: vec![SceneObject {
            name: "Tri".to_string(),
            kind: ObjectKind::Mesh,
            selected: true,
            selectable: true,
            mesh: Some(MeshData {
                vertices: vec![[0.0, 0.0, 0.0], [1.0, 0.0, 0.0], [0.0, 1.0, 0.0]],
                loops: vec![0, 1, 2],
                faces: vec![FaceData {
                    loop_indices: vec![0, 1, 2],
                    material_index: 0,
                }],
                uv_layer: None,
                materials: vec!["TriSkin".to_string()],
                frames: vec![],
            }),
        }],
    }
}

fn write_scene(path: &Path, scene: &SceneDoc) {
    let json = serde_json::to_string_pretty(scene).expect("Failed to serialize scene");
    std::fs::write(path, json).expect("Failed to write scene");
}

// Helper to run the export subcommand
fn run_export(scene: &Path, base: &Path, extra: &[&str]) -> std::process::ExitStatus {
    std::process::Command::new(env!("CARGO_BIN_EXE_ugold-export"))
        .args([
            "export",
            scene.to_str().unwrap(),
            "-o",
            base.to_str().unwrap(),
        ])
        .args(extra)
        .status()
        .expect("Failed to run ugold-export")
}

#[test]
fn test_export_single_triangle() {
    let dir = tempdir().expect("Failed to create temp dir");
    let scene_path = dir.path().join("tri.scene.json");
    let base = dir.path().join("Tri");
    write_scene(&scene_path, &triangle_scene());

    let status = run_export(&scene_path, &base, &["--scale", "32", "--frames", "1:1"]);
    assert!(status.success(), "ugold-export export command failed");

    // Geometry file: 48-byte header + one 16-byte triangle record
    let geometry = std::fs::read(dir.path().join("Tri_d.3d")).expect("Failed to read _d.3d");
    assert_eq!(geometry.len(), 64);
    assert_eq!(&geometry[0..4], &[1, 0, 3, 0]); // 1 tri, 3 verts
    assert!(geometry[4..48].iter().all(|&b| b == 0)); // reserved region
    assert_eq!(
        &geometry[48..],
        &[
            0, 0, 1, 0, 2, 0, // vertex indices
            0, 0, // face type + padding
            0, 0, 0, 0, 0, 0, // ST pairs (no UV layer)
            0, 0, // material + padding
        ]
    );

    // Animation file: 4-byte header + 3 packed words for the single frame
    let animation = std::fs::read(dir.path().join("Tri_a.3d")).expect("Failed to read _a.3d");
    assert_eq!(animation.len(), 16);
    assert_eq!(&animation[0..4], &[1, 0, 12, 0]); // 1 frame, 12 bytes each

    // Rest pose at scale 32: v1 sits 256 X-steps out, v2 256 Y-steps
    let word = |i: usize| {
        u32::from_le_bytes([
            animation[4 + i * 4],
            animation[5 + i * 4],
            animation[6 + i * 4],
            animation[7 + i * 4],
        ])
    };
    assert_eq!(word(0), 0);
    assert_eq!(word(1), 256);
    assert_eq!(word(2), 256 << 11);

    // Script stub references the sibling files and the frame count
    let script = std::fs::read_to_string(dir.path().join("Tri.uc")).expect("Failed to read .uc");
    assert!(script.starts_with("class Tri extends Actor;\n"));
    assert!(script.contains("ANIVFILE=MODELS\\Tri_a.3d DATAFILE=MODELS\\Tri_d.3d"));
    assert!(script.contains("STARTFRAME=0 NUMFRAMES=1\n"));
    assert!(script.contains("#exec TEXTURE IMPORT NAME=TriSkin FILE=MODELS\\TriSkin.PCX GROUP=\"Skins\"\n"));
    assert!(script.contains("#exec MESHMAP SETTEXTURE MESHMAP=Tri NUM=0 TEXTURE=TriSkin\n"));
}

#[test]
fn test_export_is_idempotent() {
    let dir = tempdir().expect("Failed to create temp dir");
    let scene_path = dir.path().join("tri.scene.json");
    let base = dir.path().join("Tri");
    write_scene(&scene_path, &triangle_scene());

    assert!(run_export(&scene_path, &base, &[]).success());
    let first_d = std::fs::read(dir.path().join("Tri_d.3d")).unwrap();
    let first_a = std::fs::read(dir.path().join("Tri_a.3d")).unwrap();
    let first_uc = std::fs::read(dir.path().join("Tri.uc")).unwrap();

    assert!(run_export(&scene_path, &base, &[]).success());
    assert_eq!(std::fs::read(dir.path().join("Tri_d.3d")).unwrap(), first_d);
    assert_eq!(std::fs::read(dir.path().join("Tri_a.3d")).unwrap(), first_a);
    assert_eq!(std::fs::read(dir.path().join("Tri.uc")).unwrap(), first_uc);
}

#[test]
fn test_animation_spans_whole_frame_range() {
    let dir = tempdir().expect("Failed to create temp dir");
    let scene_path = dir.path().join("anim.scene.json");
    let base = dir.path().join("Anim");

    let mut scene = triangle_scene();
    scene.frame_end = 10;
    scene.objects[0].mesh.as_mut().unwrap().frames = (1..=10)
        .map(|frame| FrameSample {
            frame,
            positions: vec![
                [frame as f32, 0.0, 0.0],
                [1.0, 0.0, 0.0],
                [0.0, 1.0, 0.0],
            ],
        })
        .collect();
    write_scene(&scene_path, &scene);

    let status = run_export(&scene_path, &base, &["--scale", "1"]);
    assert!(status.success());

    let animation = std::fs::read(dir.path().join("Anim_a.3d")).unwrap();
    // Inclusive range [1, 10]: 10 frames of 12 bytes after the header
    assert_eq!(&animation[0..4], &[10, 0, 12, 0]);
    assert_eq!(animation.len(), 4 + 10 * 12);

    // First vertex advances 8 X-steps per frame
    for frame in 1..=10u32 {
        let off = 4 + (frame as usize - 1) * 12;
        let word = u32::from_le_bytes([
            animation[off],
            animation[off + 1],
            animation[off + 2],
            animation[off + 3],
        ]);
        assert_eq!(word & 0x7FF, frame * 8);
    }
}

#[test]
fn test_quad_face_fails_without_output() {
    let dir = tempdir().expect("Failed to create temp dir");
    let scene_path = dir.path().join("quad.scene.json");
    let base = dir.path().join("Quad");

    let mut scene = triangle_scene();
    {
        let mesh = scene.objects[0].mesh.as_mut().unwrap();
        mesh.vertices.push([1.0, 1.0, 0.0]);
        mesh.loops = vec![0, 1, 3, 2];
        mesh.faces[0].loop_indices = vec![0, 1, 2, 3];
    }
    write_scene(&scene_path, &scene);

    let status = run_export(&scene_path, &base, &[]);
    assert!(!status.success(), "quad export should fail");

    // Nothing may be committed on failure
    assert!(!dir.path().join("Quad_d.3d").exists());
    assert!(!dir.path().join("Quad_a.3d").exists());
    assert!(!dir.path().join("Quad.uc").exists());
}

#[test]
fn test_unresolvable_selection_fails() {
    let dir = tempdir().expect("Failed to create temp dir");
    let scene_path = dir.path().join("empty.scene.json");
    let base = dir.path().join("Empty");

    let scene = SceneDoc {
        frame_start: 1,
        frame_end: 1,
        objects: vec![SceneObject {
            name: "Camera".to_string(),
            kind: ObjectKind::Camera,
            selected: false,
            selectable: true,
            mesh: None,
        }],
    };
    write_scene(&scene_path, &scene);

    let status = run_export(&scene_path, &base, &[]);
    assert!(!status.success(), "export without a mesh should fail");
    assert!(!dir.path().join("Empty_d.3d").exists());
}

#[test]
fn test_build_from_manifest() {
    let dir = tempdir().expect("Failed to create temp dir");
    let scene_path = dir.path().join("tri.scene.json");
    write_scene(&scene_path, &triangle_scene());

    let manifest_path = dir.path().join("models.toml");
    let out_dir = dir.path().join("Models");
    std::fs::write(
        &manifest_path,
        format!(
            "[output]\ndir = {:?}\n\n[models.Tri]\nscene = {:?}\nscale = 32.0\n",
            out_dir, scene_path
        ),
    )
    .expect("Failed to write manifest");

    let status = std::process::Command::new(env!("CARGO_BIN_EXE_ugold-export"))
        .args(["build", manifest_path.to_str().unwrap()])
        .status()
        .expect("Failed to run ugold-export");
    assert!(status.success(), "ugold-export build command failed");

    assert_eq!(std::fs::read(out_dir.join("Tri_d.3d")).unwrap().len(), 64);
    assert_eq!(std::fs::read(out_dir.join("Tri_a.3d")).unwrap().len(), 16);
    assert!(out_dir.join("Tri.uc").exists());
}

#[test]
fn test_check_rejects_missing_scene() {
    let dir = tempdir().expect("Failed to create temp dir");
    let manifest_path = dir.path().join("models.toml");
    std::fs::write(&manifest_path, "[models]\nghost = \"no/such.json\"\n")
        .expect("Failed to write manifest");

    let status = std::process::Command::new(env!("CARGO_BIN_EXE_ugold-export"))
        .args(["check", manifest_path.to_str().unwrap()])
        .status()
        .expect("Failed to run ugold-export");
    assert!(!status.success(), "check should reject a missing scene");
}
