use std::{
    fs,
    path::{Path, PathBuf},
};

use clap::ValueEnum;
use log::{info, warn};

use crate::{
    error::{MicrocodeError, Result},
    rom::{Rom, RomSet},
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub(crate) enum ImageFormat {
    /// Raw address-indexed bytes
    #[default]
    Binary,
    /// One upper-case hex byte per line
    Hex,
}

impl ImageFormat {
    fn extension(self) -> &'static str {
        match self {
            ImageFormat::Binary => "bin",
            ImageFormat::Hex => "hex",
        }
    }

    fn encode(self, data: &[u8]) -> Vec<u8> {
        match self {
            ImageFormat::Binary => data.to_vec(),
            ImageFormat::Hex => data
                .iter()
                .map(|byte| format!("{:02X}\n", byte))
                .collect::<String>()
                .into_bytes(),
        }
    }
}

/// Writes one image per ROM into `dir`, returning the paths written.
///
/// Images are staged as `.tmp` files and only renamed into place once every
/// one of them has been written, so a failed run leaves no images behind.
pub(crate) fn emit(roms: &RomSet, dir: &Path, format: ImageFormat) -> Result<Vec<PathBuf>> {
    fs::create_dir_all(dir).map_err(|e| MicrocodeError::io(dir, e))?;

    let mut staged: Vec<(PathBuf, PathBuf)> = Vec::new();
    for rom in roms.iter() {
        match stage(rom, dir, format) {
            Ok(paths) => staged.push(paths),
            Err(e) => {
                discard(staged.iter().map(|(tmp, _)| tmp));
                return Err(e);
            }
        }
    }

    let mut written = Vec::with_capacity(staged.len());
    for (i, (tmp, path)) in staged.iter().enumerate() {
        if let Err(e) = fs::rename(tmp, path) {
            discard(staged[i..].iter().map(|(tmp, _)| tmp));
            discard(written.iter());
            return Err(MicrocodeError::io(path, e));
        }
        info!("Wrote {}", path.display());
        written.push(path.clone());
    }
    Ok(written)
}

fn stage(rom: &Rom, dir: &Path, format: ImageFormat) -> Result<(PathBuf, PathBuf)> {
    let path = dir.join(rom.filename(format.extension()));
    let tmp = path.with_extension(format!("{}.tmp", format.extension()));
    fs::write(&tmp, format.encode(rom.data())).map_err(|e| MicrocodeError::io(&tmp, e))?;
    Ok((tmp, path))
}

fn discard<'a>(paths: impl Iterator<Item = &'a PathBuf>) {
    for path in paths {
        if let Err(e) = fs::remove_file(path) {
            warn!("Failed to remove '{}': {}", path.display(), e);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn rom_set() -> RomSet {
        let mut roms = RomSet::new(2);
        roms.create("Upper").unwrap();
        roms.create("lower").unwrap();
        roms.write("Upper", 1, 0xA5).unwrap();
        roms.write("lower", 3, 0x0F).unwrap();
        roms
    }

    #[test]
    fn test_emit_binary() {
        let dir = tempfile::tempdir().unwrap();
        let written = emit(&rom_set(), dir.path(), ImageFormat::Binary).unwrap();

        assert_eq!(
            written,
            vec![
                dir.path().join("microcode_upper.bin"),
                dir.path().join("microcode_lower.bin"),
            ]
        );
        assert_eq!(fs::read(&written[0]).unwrap(), vec![0x00, 0xA5, 0x00, 0x00]);
        assert_eq!(fs::read(&written[1]).unwrap(), vec![0x00, 0x00, 0x00, 0x0F]);
    }

    #[test]
    fn test_emit_hex() {
        let dir = tempfile::tempdir().unwrap();
        let written = emit(&rom_set(), dir.path(), ImageFormat::Hex).unwrap();

        assert_eq!(written[0], dir.path().join("microcode_upper.hex"));
        assert_eq!(
            fs::read_to_string(&written[0]).unwrap(),
            "00\nA5\n00\n00\n"
        );
    }

    #[test]
    fn test_emit_leaves_no_temp_files() {
        let dir = tempfile::tempdir().unwrap();
        emit(&rom_set(), dir.path(), ImageFormat::Binary).unwrap();

        let mut names: Vec<String> = fs::read_dir(dir.path())
            .unwrap()
            .map(|entry| entry.unwrap().file_name().to_string_lossy().into_owned())
            .collect();
        names.sort();
        assert_eq!(names, vec!["microcode_lower.bin", "microcode_upper.bin"]);
    }

    #[test]
    fn test_emit_creates_output_dir() {
        let dir = tempfile::tempdir().unwrap();
        let out = dir.path().join("roms").join("v1");
        emit(&rom_set(), &out, ImageFormat::Binary).unwrap();
        assert!(out.join("microcode_upper.bin").is_file());
    }

    #[test]
    fn test_error_unwritable_destination() {
        let dir = tempfile::tempdir().unwrap();
        let blocker = dir.path().join("not_a_dir");
        fs::write(&blocker, b"").unwrap();

        let err = emit(&rom_set(), &blocker, ImageFormat::Binary).unwrap_err();
        assert!(matches!(err, MicrocodeError::Io { .. }));
    }

    #[test]
    fn test_error_rolls_back_staged_images() {
        let dir = tempfile::tempdir().unwrap();
        // A directory squatting on the second temp file makes staging fail
        fs::create_dir(dir.path().join("microcode_lower.bin.tmp")).unwrap();

        let err = emit(&rom_set(), dir.path(), ImageFormat::Binary).unwrap_err();
        assert!(matches!(err, MicrocodeError::Io { .. }));
        assert!(!dir.path().join("microcode_upper.bin").exists());
        assert!(!dir.path().join("microcode_upper.bin.tmp").exists());
        assert!(!dir.path().join("microcode_lower.bin").exists());
    }
}
