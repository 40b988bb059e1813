//! Animated Cornell box example.
//!
//! A checkered metal ball orbits the middle of the floor, spinning as it goes. Each
//! frame is written to `frame_NNN.ppm`.
//!
//! Usage: `cargo run --release --example animate -- [frames] [settings.json] [texture]`

use std::f64::consts::PI;
use std::sync::Arc;

use anyhow::Context;
use ember_renderer::{
    make_box, render_parallel, save_ppm, Axis, CheckerTexture, Color, ConstantMedium,
    DiffuseLight, Hittable, HittableList, ImageTexture, Lambertian, Material, Metal, Point3,
    Quad, RenderConfig, RenderStats, Rotate, SceneSettings, Sphere, Texture, Transformable,
    Translate, Vec3,
};

const BOX_SIZE: f64 = 138.75;

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let mut args = std::env::args().skip(1);
    let frames: u32 = match args.next() {
        Some(arg) => arg.parse().context("frame count must be a number")?,
        None => 4,
    };
    let settings = match args.next() {
        Some(path) => SceneSettings::from_json_file(&path)
            .with_context(|| format!("loading settings from {}", path))?,
        None => default_settings(),
    };
    let texture: Arc<dyn Texture> = match args.next() {
        Some(path) => Arc::new(ImageTexture::open_or_fallback(path)),
        None => Arc::new(CheckerTexture::from_colors(
            0.1,
            Color::new(0.8, 0.1, 0.1),
            Color::splat(0.9),
        )),
    };

    let mut world = cornell_box();
    let floor_center = Point3::new(BOX_SIZE / 2.0, 0.0, BOX_SIZE / 2.0);
    let mut ball = Arc::new(Sphere::new(
        Point3::new(floor_center.x + 35.0, 15.0, floor_center.z),
        15.0,
        Arc::new(Metal::new(texture, 0.2)),
    ));
    world.add(ball.clone());

    let camera = settings.camera.build();
    let stats = RenderStats::new();

    for frame in 0..frames {
        if frame > 0 {
            roll_ball(&mut world, &mut ball, floor_center, 15.0);
        }

        let image = render_parallel(&camera, &world, &settings.render, &stats);
        let filename = format!("frame_{:03}.ppm", frame);
        save_ppm(&image, &filename)?;
    }

    log::info!("Render statistics:\n{}", stats.snapshot());
    Ok(())
}

fn default_settings() -> SceneSettings {
    let mut settings = SceneSettings::default();
    settings.render = RenderConfig::default()
        .with_resolution(300, 300)
        .with_quality(64, 20)
        .with_seed(7);
    settings.camera = settings
        .camera
        .with_position(
            Point3::new(BOX_SIZE / 2.0, BOX_SIZE / 2.0, -260.0),
            Point3::new(BOX_SIZE / 2.0, BOX_SIZE / 2.0, 0.0),
            Vec3::Y,
        )
        .with_fov(40.0)
        .with_aspect_ratio(settings.render.aspect_ratio());
    settings
}

/// Open-fronted box with a ceiling light and a block of smoke in the back corner.
fn cornell_box() -> HittableList {
    let red: Arc<dyn Material> = Arc::new(Lambertian::from_color(Color::new(0.65, 0.05, 0.05)));
    let white: Arc<dyn Material> = Arc::new(Lambertian::from_color(Color::splat(0.73)));
    let green: Arc<dyn Material> = Arc::new(Lambertian::from_color(Color::new(0.12, 0.45, 0.15)));
    let light: Arc<dyn Material> = Arc::new(DiffuseLight::from_color(Color::splat(12.0)));

    let s = BOX_SIZE;
    let mut world = HittableList::new();
    world.add(Arc::new(Quad::new(
        Point3::new(s, 0.0, 0.0),
        Vec3::new(0.0, s, 0.0),
        Vec3::new(0.0, 0.0, s),
        green,
    )));
    world.add(Arc::new(Quad::new(
        Point3::ZERO,
        Vec3::new(0.0, s, 0.0),
        Vec3::new(0.0, 0.0, s),
        red,
    )));
    world.add(Arc::new(Quad::new(
        Point3::new(28.25, s - 0.25, 31.75),
        Vec3::new(82.5, 0.0, 0.0),
        Vec3::new(0.0, 0.0, 76.25),
        light,
    )));
    // Floor, ceiling, back wall
    world.add(Arc::new(Quad::new(
        Point3::ZERO,
        Vec3::new(s, 0.0, 0.0),
        Vec3::new(0.0, 0.0, s),
        white.clone(),
    )));
    world.add(Arc::new(Quad::new(
        Point3::new(s, s, s),
        Vec3::new(-s, 0.0, 0.0),
        Vec3::new(0.0, 0.0, -s),
        white.clone(),
    )));
    world.add(Arc::new(Quad::new(
        Point3::new(0.0, 0.0, s),
        Vec3::new(s, 0.0, 0.0),
        Vec3::new(0.0, s, 0.0),
        white.clone(),
    )));

    let block: Arc<dyn Hittable> = Arc::new(make_box(
        Point3::ZERO,
        Point3::new(30.0, 60.0, 30.0),
        white,
    ));
    let block = Arc::new(Rotate::new(block, Axis::Y, 15.0));
    let block = Arc::new(Translate::new(block, Vec3::new(20.0, 0.0, 90.0)));
    world.add(Arc::new(ConstantMedium::from_color(block, 0.02, Color::ZERO)));

    world
}

/// Move the ball `degrees` around the vertical axis through `pivot` and spin it.
fn roll_ball(world: &mut HittableList, ball: &mut Arc<Sphere>, pivot: Point3, degrees: f64) {
    let angle = degrees * PI / 180.0;
    let center = ball.center(0.0);
    let rel_x = center.x - pivot.x;
    let rel_z = center.z - pivot.z;
    let new_x = rel_x * angle.cos() - rel_z * angle.sin() + pivot.x;
    let new_z = rel_x * angle.sin() + rel_z * angle.cos() + pivot.z;

    // The list holds a second reference; drop it so make_mut edits in place
    world.remove(ball);
    let sphere = Arc::make_mut(ball);
    sphere.translate(Vec3::new(new_x - center.x, 0.0, new_z - center.z));
    sphere.rotate(Axis::Y, 2.0 * degrees);
    world.add(ball.clone());

    log::debug!("Ball moved to {:?}", ball.center(0.0));
}
