//! Session presets: the six parameters plus the loaded sample, kept as JSON

use std::fs::File;
use std::io::{BufReader, BufWriter};
use std::path::{Path, PathBuf};
use std::sync::Arc;

use color_eyre::eyre::{Result as EyreResult, WrapErr};
use log::{info, warn};

use anydrum::{io::wav, params::Preset, ControlParams, EngineHandle};

pub fn load_preset(path: &Path) -> EyreResult<Preset> {
    let file = File::open(path)
        .wrap_err_with(|| format!("failed to open preset {}", path.display()))?;
    let preset = serde_json::from_reader(BufReader::new(file))
        .wrap_err_with(|| format!("failed to parse preset {}", path.display()))?;
    info!("loaded preset {}", path.display());
    Ok(preset)
}

pub fn save_preset(path: &Path, preset: &Preset) -> EyreResult<()> {
    let file = File::create(path)
        .wrap_err_with(|| format!("failed to create preset {}", path.display()))?;
    serde_json::to_writer_pretty(BufWriter::new(file), preset)
        .wrap_err_with(|| format!("failed to write preset {}", path.display()))?;
    info!("saved preset {}", path.display());
    Ok(())
}

/// Decode a WAV file and hand it to the engine.
pub fn load_sample(handle: &mut EngineHandle, path: &Path) -> EyreResult<()> {
    let source = wav::load(path)
        .wrap_err_with(|| format!("failed to load sample {}", path.display()))?;
    handle.load_source(Arc::new(source))?;
    Ok(())
}

/// Bring up a session from the command line.
///
/// A preset's parameters replace the current ones. `sample` wins over the
/// preset's sample; a preset sample that no longer exists is skipped.
/// Returns the path of the sample that ended up loaded.
pub fn start(
    params: &ControlParams,
    handle: &mut EngineHandle,
    sample: Option<&Path>,
    preset: Option<&Path>,
) -> EyreResult<Option<PathBuf>> {
    let restored = match preset {
        Some(path) => Some(load_preset(path)?),
        None => None,
    };
    if let Some(preset) = &restored {
        params.apply(&preset.params);
    }

    if let Some(path) = sample {
        load_sample(handle, path)?;
        return Ok(Some(path.to_path_buf()));
    }

    match restored.and_then(|p| p.sample) {
        Some(path) if path.is_file() => {
            load_sample(handle, &path)?;
            Ok(Some(path))
        }
        Some(path) => {
            warn!("preset sample {} no longer exists, skipping", path.display());
            Ok(None)
        }
        None => Ok(None),
    }
}
