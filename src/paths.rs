use std::path::{Path, PathBuf};

use crate::error::AppErr;

const DESKTOP_PICTURE_DB_RELPATH: &str = "Library/Application Support/Dock/desktoppicture.db";

/// The two directories a user-supplied path can be relative to.
/// Captured once at startup so the rest of the program never reads the environment.
#[derive(Clone, Debug)]
pub struct UserDirs {
    pub home: String,
    pub cwd: String,
}

impl UserDirs {
    pub fn from_env() -> Result<UserDirs, AppErr> {
        let home = dirs::home_dir()
            .ok_or_else(|| AppErr::path_not_found("Could not determine the home directory"))?;
        let cwd = std::env::current_dir()
            .map_err(|_| AppErr::path_not_found("Could not determine the current directory"))?;

        Ok(UserDirs {
            home: home.to_string_lossy().into_owned(),
            cwd: cwd.to_string_lossy().into_owned(),
        })
    }

    pub fn desktop_picture_db(&self) -> PathBuf {
        Path::new(&self.home).join(DESKTOP_PICTURE_DB_RELPATH)
    }
}

/// Turns the image argument into an absolute path and checks that it exists.
///
/// `~` is replaced by the home directory with plain string concatenation, so
/// `~/a.jpg` becomes `$HOME/a.jpg` while `~a.jpg` becomes `$HOMEa.jpg`.
/// Existence is the only thing checked.
pub fn resolve_image_path(input: &str, dirs: &UserDirs) -> Result<String, AppErr> {
    let candidate = if input.starts_with('/') {
        input.to_string()
    } else if let Some(rest) = input.strip_prefix('~') {
        format!("{}{}", dirs.home, rest)
    } else {
        format!("{}/{}", dirs.cwd, input)
    };

    debug!("Resolved {:?} to {:?}", input, candidate);

    if !Path::new(&candidate).exists() {
        return Err(AppErr::path_not_found("Provided file does not exist"));
    }

    Ok(candidate)
}
