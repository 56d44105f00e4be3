//! Example: Render a short particle-field sequence to PNG files.
//!
//! Drives a renderer with the paced host at 30 fps and writes every frame
//! into `field_frames/`.
//!
//! Run with:
//!     cargo run --example render_frames --features tokio [params.json]

use particle_field::host::paced::run_paced;
use particle_field::{
    parse_hex_color, FieldParams, FrameExporter, ManualHost, ParticleFieldRenderer, RasterSurface,
    RendererConfig, Viewport,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    println!("Particle Field - Frame Export Example");
    println!("=====================================\n");

    let params = match std::env::args().nth(1) {
        Some(path) => {
            println!("Loading parameters from {}", path);
            FieldParams::load(&path)?
        }
        None => FieldParams::default(),
    };

    let fps = 30;
    let total_frames = 90;
    let viewport = Viewport::new(640.0, 360.0).with_device_pixel_ratio(2.0);

    println!("Setting up renderer...");
    println!("  Viewport: {}x{} @ {}x", viewport.width, viewport.height, viewport.pixel_ratio());
    println!("  FPS: {}", fps);
    println!("  Frames: {}\n", total_frames);

    let mut host = ManualHost::with_viewport(viewport);
    let mut renderer: ParticleFieldRenderer<RasterSurface> =
        ParticleFieldRenderer::with_config(RendererConfig {
            params,
            seed: Some(2024),
        })?;
    renderer.start(RasterSurface::new(), &mut host);

    if let Some(session) = renderer.session() {
        println!("  Particles: {}\n", session.particles().len());
    }

    let background = parse_hex_color("#0b0d17").unwrap_or([0.0, 0.0, 0.0]);
    let mut exporter = FrameExporter::new("field_frames")?.with_background(background);

    println!("Rendering {} frames...", total_frames);
    let rendered = run_paced(&mut renderer, &mut host, fps, total_frames, |renderer| {
        if let Some(surface) = renderer.surface() {
            exporter.write_png(surface)?;
        }
        let written = exporter.frames_written();
        if written % 30 == 0 {
            let progress = written as f32 / total_frames as f32 * 100.0;
            println!("  Progress: {:.0}%", progress);
        }
        Ok::<_, anyhow::Error>(())
    })
    .await?;

    renderer.stop(&mut host);

    println!("\nDone! Rendered {} frames into field_frames/", rendered);
    Ok(())
}
