//! Command-line configuration: `--flag=value` pairs read from `std::env::args()`.

use std::path::{Path, PathBuf};

use asset::{LoadOptions, LoadRequest, ParsePolicy};
use corelib::{Vec3, vec3};

pub const DEFAULT_WINDOW_WIDTH: u32 = 1024;
pub const DEFAULT_WINDOW_HEIGHT: u32 = 768;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LoaderChoice {
    Obj,
    Assimp,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Config {
    pub models: Vec<String>,
    pub loader: LoaderChoice,
    /// Format hint for the general-purpose importer.
    pub format: String,
    /// Albedo texture for the general-purpose importer.
    pub albedo: String,
    pub name: Option<String>,
    pub scale: f32,
    pub offset: Vec3,
    pub rotate: bool,
    pub policy: ParsePolicy,
    pub flip_textures: bool,
    pub root: Option<PathBuf>,
    pub width: u32,
    pub height: u32,
    pub frames: u32,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            models: Vec::new(),
            loader: LoaderChoice::Obj,
            format: "fbx".to_owned(),
            albedo: String::new(),
            name: None,
            scale: 1.0,
            offset: Vec3::ZERO,
            rotate: true,
            policy: ParsePolicy::FailFast,
            flip_textures: true,
            root: None,
            width: DEFAULT_WINDOW_WIDTH,
            height: DEFAULT_WINDOW_HEIGHT,
            frames: 1,
        }
    }
}

impl Config {
    pub fn from_env() -> Self {
        Self::from_args(std::env::args().skip(1))
    }

    /// Unknown flags and unparsable values are logged and ignored.
    pub fn from_args<I, S>(args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut cfg = Self::default();
        let mut w: Option<u32> = None;
        let mut h: Option<u32> = None;

        for arg in args {
            let arg = arg.as_ref();
            if let Some(v) = arg.strip_prefix("--model=") {
                cfg.models.push(v.to_owned());
            } else if let Some(v) = arg.strip_prefix("--loader=") {
                cfg.loader = match v.to_ascii_lowercase().as_str() {
                    "obj" => LoaderChoice::Obj,
                    "assimp" | "fbx" => LoaderChoice::Assimp,
                    other => {
                        log::warn!("Unknown loader '{}', using the OBJ loader.", other);
                        LoaderChoice::Obj
                    }
                };
            } else if let Some(v) = arg.strip_prefix("--format=") {
                cfg.format = v.to_owned();
            } else if let Some(v) = arg.strip_prefix("--albedo=") {
                cfg.albedo = v.to_owned();
            } else if let Some(v) = arg.strip_prefix("--name=") {
                cfg.name = Some(v.to_owned());
            } else if let Some(v) = arg.strip_prefix("--scale=") {
                match v.parse::<f32>() {
                    Ok(s) => cfg.scale = s,
                    Err(_) => log::warn!("Ignoring invalid --scale value '{}'", v),
                }
            } else if let Some(v) = arg.strip_prefix("--offset=") {
                match parse_vec3(v) {
                    Some(o) => cfg.offset = o,
                    None => log::warn!("Ignoring invalid --offset value '{}' (want x,y,z)", v),
                }
            } else if arg == "--no-rotate" {
                cfg.rotate = false;
            } else if let Some(v) = arg.strip_prefix("--policy=") {
                cfg.policy = match v.to_ascii_lowercase().as_str() {
                    "strict" | "fail-fast" => ParsePolicy::FailFast,
                    "lenient" | "best-effort" => ParsePolicy::BestEffort,
                    other => {
                        log::warn!("Unknown policy '{}', using strict.", other);
                        ParsePolicy::FailFast
                    }
                };
            } else if arg == "--no-flip" {
                cfg.flip_textures = false;
            } else if let Some(v) = arg.strip_prefix("--root=") {
                cfg.root = Some(PathBuf::from(v));
            } else if let Some(v) = arg.strip_prefix("--size=") {
                if let Some((sw, sh)) = v.split_once('x').or_else(|| v.split_once('X')) {
                    if let (Ok(pw), Ok(ph)) = (sw.parse::<u32>(), sh.parse::<u32>()) {
                        w = Some(pw);
                        h = Some(ph);
                    }
                }
            } else if let Some(v) = arg.strip_prefix("--width=") {
                if let Ok(pw) = v.parse::<u32>() {
                    w = Some(pw);
                }
            } else if let Some(v) = arg.strip_prefix("--height=") {
                if let Ok(ph) = v.parse::<u32>() {
                    h = Some(ph);
                }
            } else if let Some(v) = arg.strip_prefix("--frames=") {
                match v.parse::<u32>() {
                    Ok(n) => cfg.frames = n,
                    Err(_) => log::warn!("Ignoring invalid --frames value '{}'", v),
                }
            } else {
                log::warn!("Ignoring unknown argument '{}'", arg);
            }
        }

        cfg.width = w.unwrap_or(DEFAULT_WINDOW_WIDTH).max(1);
        cfg.height = h.unwrap_or(DEFAULT_WINDOW_HEIGHT).max(1);
        cfg
    }

    pub fn load_options(&self) -> LoadOptions {
        LoadOptions {
            policy: self.policy,
            flip_textures: self.flip_textures,
        }
    }

    pub fn requests(&self) -> Vec<LoadRequest> {
        self.models
            .iter()
            .map(|path| match self.loader {
                LoaderChoice::Obj => LoadRequest::obj(path.as_str()),
                LoaderChoice::Assimp => {
                    LoadRequest::importer(path.as_str(), self.format.as_str(), self.albedo.as_str())
                }
            })
            .collect()
    }

    /// Display name for a model: `--name` if given, else the file stem.
    pub fn model_name(&self, path: &str) -> String {
        if let Some(name) = &self.name {
            return name.clone();
        }
        Path::new(path)
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.to_owned())
    }
}

fn parse_vec3(v: &str) -> Option<Vec3> {
    let mut parts = v.split(',').map(|p| p.trim().parse::<f32>());
    let (Some(Ok(x)), Some(Ok(y)), Some(Ok(z)), None) =
        (parts.next(), parts.next(), parts.next(), parts.next())
    else {
        return None;
    };
    Some(vec3(x, y, z))
}

#[cfg(test)]
mod tests {
    use super::*;
    use asset::LoaderKind;

    #[test]
    fn defaults_to_1024x768_window() {
        let cfg = Config::from_args(Vec::<String>::new());
        assert_eq!((cfg.width, cfg.height), (1024, 768));
        assert_eq!(cfg.loader, LoaderChoice::Obj);
        assert_eq!(cfg.policy, ParsePolicy::FailFast);
        assert!(cfg.rotate && cfg.flip_textures);
        assert_eq!(cfg.frames, 1);
    }

    #[test]
    fn parses_flags() {
        let cfg = Config::from_args([
            "--model=a.obj",
            "--model=models/b.obj",
            "--policy=lenient",
            "--size=800x600",
            "--scale=10",
            "--offset=1,2,3",
            "--no-rotate",
            "--no-flip",
            "--frames=120",
            "--root=assets",
        ]);
        assert_eq!(cfg.models, ["a.obj", "models/b.obj"]);
        assert_eq!(cfg.policy, ParsePolicy::BestEffort);
        assert_eq!((cfg.width, cfg.height), (800, 600));
        assert_eq!(cfg.scale, 10.0);
        assert_eq!(cfg.offset, vec3(1.0, 2.0, 3.0));
        assert!(!cfg.rotate);
        assert!(!cfg.load_options().flip_textures);
        assert_eq!(cfg.frames, 120);
        assert_eq!(cfg.root, Some(PathBuf::from("assets")));
    }

    #[test]
    fn bad_values_keep_defaults() {
        let cfg = Config::from_args(["--scale=big", "--offset=1,2", "--width=0", "--bogus"]);
        assert_eq!(cfg.scale, 1.0);
        assert_eq!(cfg.offset, Vec3::ZERO);
        assert_eq!(cfg.width, 1);
    }

    #[test]
    fn assimp_requests_carry_format_and_albedo() {
        let cfg = Config::from_args([
            "--loader=assimp",
            "--model=AK-47.fbx",
            "--albedo=textures/Ak-47_Albedo.png",
        ]);
        let reqs = cfg.requests();
        assert_eq!(reqs.len(), 1);
        assert_eq!(
            reqs[0].kind,
            LoaderKind::Importer {
                format: "fbx".into(),
                texture_path: "textures/Ak-47_Albedo.png".into(),
            }
        );
    }

    #[test]
    fn model_name_falls_back_to_stem() {
        let cfg = Config::default();
        assert_eq!(cfg.model_name("resources/lowpoly_city.obj"), "lowpoly_city");
        let named = Config {
            name: Some("City".into()),
            ..Config::default()
        };
        assert_eq!(named.model_name("x.obj"), "City");
    }
}
