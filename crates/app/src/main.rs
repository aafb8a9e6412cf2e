//! Entry point for meshview: load models, place them in a world, tick the scene.

mod config;

use anyhow::{Context, Result};
use asset::{FsResolver, ImageTextureSource, ModelData, ModelLoader};
use corelib::{camera::Camera, ecs::World, settings::ModelSettings};

use config::Config;

/// Fixed simulation rate for headless ticks.
const TICKS_PER_SECOND: f32 = 60.0;

fn build_world(cfg: &Config, loader: &ModelLoader<'_>) -> Result<World<ModelData>> {
    let mut world = World::new();
    for request in cfg.requests() {
        let model = loader
            .load(&request)
            .with_context(|| format!("Failed to load model '{}'", request.path))?;

        let mut settings = ModelSettings::new(cfg.model_name(&request.path));
        settings.set_uniform_scale(cfg.scale);
        settings.set_offset(cfg.offset);
        settings.is_rotating = cfg.rotate;

        let id = world.spawn(settings, model);
        log::debug!("Spawned '{}' as entity {}", request.path, id);
    }
    Ok(world)
}

fn run_frames(world: &mut World<ModelData>, camera: &Camera, frames: u32) {
    let proj_view = camera.proj_view();
    for frame in 0..frames {
        let elapsed = frame as f32 / TICKS_PER_SECOND;
        let removed = world.remove_marked();
        if !removed.is_empty() {
            log::info!("Removed {} models", removed.len());
        }
        world.system_apply_settings();
        world.system_rotate(elapsed);
        world.update_mvp(proj_view);
    }
}

fn report(world: &World<ModelData>) {
    for m in world.iter() {
        let tex = &m.payload.texture;
        log::info!(
            "Model '{}': {} vertices, {} triangles, texture {}x{}, scale {:?}, offset {:?}",
            m.settings.name,
            m.payload.vertices.len(),
            m.payload.elements.len(),
            tex.width,
            tex.height,
            m.settings.scale(),
            m.settings.offset()
        );
        log::debug!("Model '{}' mvp: {:?}", m.settings.name, m.mvp);
    }
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cfg = Config::from_env();
    log::info!(
        "Starting meshview. Loader: {:?}, policy={:?}, window_size={}x{}, frames={}",
        cfg.loader,
        cfg.policy,
        cfg.width,
        cfg.height,
        cfg.frames
    );

    if cfg.models.is_empty() {
        log::warn!("No models given, pass one or more --model=<path>");
        return Ok(());
    }

    let resolver = match &cfg.root {
        Some(root) => FsResolver::with_root(root.clone()),
        None => FsResolver::new(),
    };
    let options = cfg.load_options();
    let textures = ImageTextureSource::new(&resolver);

    #[cfg(feature = "assimp")]
    let importer = asset::AssimpImporter;
    #[allow(unused_mut)]
    let mut loader = ModelLoader::new(&resolver, &textures).with_options(options);
    #[cfg(feature = "assimp")]
    {
        loader = loader.with_importer(&importer);
    }

    let mut world = build_world(&cfg, &loader)?;

    let camera = Camera::viewer_default(Camera::aspect_for(cfg.width, cfg.height));
    run_frames(&mut world, &camera, cfg.frames);
    report(&world);

    log::info!("Graceful shutdown. Bye!");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use asset::{LoadOptions, MemoryResolver};

    const TRIANGLE: &str = "v 0 0 0\nv 1 0 0\nv 0 1 0\nvt 0 0\nvt 1 0\nvt 0 1\nf 1/1/1 2/2/1 3/3/1\n";

    #[test]
    fn builds_world_from_memory_files() {
        let res = MemoryResolver::new().with_file("tri.obj", TRIANGLE);
        let textures = ImageTextureSource::new(&res);
        let loader = ModelLoader::new(&res, &textures).with_options(LoadOptions::default());
        let cfg = Config::from_args(["--model=tri.obj", "--scale=2", "--no-rotate"]);

        let mut world = build_world(&cfg, &loader).unwrap();
        assert_eq!(world.len(), 1);
        let m = world.iter().next().unwrap();
        assert_eq!(m.settings.name, "tri");
        assert_eq!(m.payload.elements.len(), 1);
        assert!(!m.settings.is_rotating);

        run_frames(&mut world, &Camera::viewer_default(1.0), 3);
        let t = world.transform(0).unwrap();
        assert_eq!(t.scale, corelib::Vec3::splat(2.0));
        assert_eq!(t.rotation, corelib::Quat::IDENTITY);
    }

    #[test]
    fn load_failure_names_the_model() {
        let res = MemoryResolver::new();
        let textures = ImageTextureSource::new(&res);
        let loader = ModelLoader::new(&res, &textures);
        let cfg = Config::from_args(["--model=missing.obj"]);
        let err = build_world(&cfg, &loader).err().unwrap();
        assert!(format!("{err:#}").contains("missing.obj"));
    }
}
