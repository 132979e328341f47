//! Simple ray tracer example.
//!
//! Builds a small scene in code (no scene file), renders it and saves a PNG.

use glint_core::{
    CameraSpec, Light, Material, Plane, PointLight, Primitive, Resolution, Scene, Sphere,
};
use glint_renderer::{encode_png, render, Color, RenderConfig, Vec3};

fn main() {
    env_logger::init();

    println!("Glint Ray Tracer - Simple Example");
    println!("=================================");

    let scene = build_scene();
    let config = RenderConfig::default();

    let start = std::time::Instant::now();
    let image = render(&scene, &config);
    println!("Rendered {}x{} in {:?}", image.width, image.height, start.elapsed());

    let png = encode_png(&image).expect("Failed to encode PNG");
    let filename = "output.png";
    std::fs::write(filename, png).expect("Failed to save image");
    println!("Saved to {}", filename);
}

fn build_scene() -> Scene {
    let camera = CameraSpec::new(
        Vec3::new(0.0, 1.5, 6.0), // eye
        Vec3::new(0.0, 0.5, 0.0), // target
        Vec3::Y,                  // up
        45.0,
    )
    .expect("valid camera");
    let mut scene = Scene::new(camera, Resolution::new(640, 360).expect("valid resolution"));

    scene.set_ambient(Color::splat(0.1));
    scene.set_background(Color::new(0.5, 0.7, 1.0));

    // Ground
    let ground = scene.add_material(Material::matte(Color::splat(0.5)));
    add(&mut scene, Primitive::Plane(Plane::new(Vec3::ZERO, Vec3::Y, ground).expect("valid plane")));

    // Red plastic
    let plastic = scene.add_material(
        Material::new(
            Color::new(0.1, 0.02, 0.02),
            Color::new(0.8, 0.1, 0.1),
            Color::splat(0.5),
            40.0,
            Color::ZERO,
            1.0,
        )
        .expect("valid material"),
    );
    add(&mut scene, sphere(Vec3::new(-1.6, 1.0, 0.0), 1.0, plastic));

    // Mirror
    let mirror = scene.add_material(
        Material::new(Color::ZERO, Color::splat(0.1), Color::ONE, 200.0, Color::splat(0.8), 1.0)
            .expect("valid material"),
    );
    add(&mut scene, sphere(Vec3::new(1.6, 1.0, -0.5), 1.0, mirror));

    // Glass
    let glass = scene.add_material(
        Material::new(Color::ZERO, Color::ZERO, Color::ONE, 100.0, Color::splat(0.05), 1.5)
            .expect("valid material"),
    );
    add(&mut scene, sphere(Vec3::new(0.0, 0.6, 1.5), 0.6, glass));

    scene.add_light(Light::Point(PointLight {
        position: Vec3::new(5.0, 8.0, 5.0),
        color: Color::splat(0.9),
    }));

    scene
}

fn sphere(center: Vec3, radius: f32, material: usize) -> Primitive {
    Primitive::Sphere(Sphere::new(center, radius, material).expect("valid sphere"))
}

fn add(scene: &mut Scene, primitive: Primitive) {
    scene.add_primitive(primitive).expect("material exists");
}
