//! Example: Load and inspect a scene file.
//!
//! Run with: cargo run --example load_scene -- scenes/spheres.scene

use std::env;

use glint_core::{load_scene_file, Light, Primitive};

fn main() {
    env_logger::init();

    let args: Vec<String> = env::args().collect();

    if args.len() < 2 {
        println!("Usage: load_scene <path-to-scene-file>");
        println!("\nExamples:");
        println!("  cargo run --example load_scene -- scenes/spheres.scene");
        println!("  cargo run --example load_scene -- scenes/glass.scene");
        return;
    }

    let path = &args[1];
    println!("Loading scene file: {}", path);

    match load_scene_file(path) {
        Ok(scene) => {
            let res = scene.resolution();
            let cam = scene.camera();
            println!("\n=== Scene: {}x{} ===", res.width, res.height);
            println!(
                "Camera: eye {:?} -> target {:?}, fov {:.1}",
                cam.eye, cam.target, cam.fov_degrees
            );
            println!("Max depth: {}", scene.settings().max_depth);
            println!("Materials: {}", scene.material_count());

            println!("\n--- Primitives ---");
            for (i, primitive) in scene.primitives().iter().enumerate() {
                match primitive {
                    Primitive::Sphere(s) => println!(
                        "  [{}] Sphere at ({:.2}, {:.2}, {:.2}) r={:.2}, material {}",
                        i, s.center.x, s.center.y, s.center.z, s.radius, s.material
                    ),
                    Primitive::Plane(p) => println!(
                        "  [{}] Plane through ({:.2}, {:.2}, {:.2}) n={:?}, material {}",
                        i, p.point.x, p.point.y, p.point.z, p.normal, p.material
                    ),
                }
            }

            println!("\n--- Lights ---");
            for (i, light) in scene.lights().iter().enumerate() {
                let kind = match light {
                    Light::Point(_) => "point",
                    Light::Directional(_) => "directional",
                    Light::Spot(_) => "spot",
                };
                println!("  [{}] {} light, color {:?}", i, kind, light.color());
            }
        }
        Err(e) => {
            eprintln!("Error loading scene file: {}", e);
        }
    }
}
