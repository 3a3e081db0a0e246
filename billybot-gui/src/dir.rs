use std::path::{Path, PathBuf};

#[derive(Clone, Debug, PartialEq)]
pub struct BillyBotDirectory(PathBuf);

impl BillyBotDirectory {
    pub fn new(p: PathBuf) -> Self {
        BillyBotDirectory(p)
    }
    pub fn new_default() -> Result<Self, Box<dyn std::error::Error>> {
        billybot::config::config_folder_path()
            .map(BillyBotDirectory::new)
            .ok_or_else(|| "Failed to get default data directory".into())
    }
}

impl BillyBotDirectory {
    pub fn exists(&self) -> bool {
        self.0.as_path().exists()
    }
    pub fn init(&self) -> Result<(), Box<dyn std::error::Error>> {
        create_directory(self.0.as_path())
    }
    pub fn path(&self) -> &Path {
        self.0.as_path()
    }
}

fn create_directory(datadir_path: &std::path::Path) -> Result<(), Box<dyn std::error::Error>> {
    #[cfg(unix)]
    return {
        use std::fs::DirBuilder;
        use std::os::unix::fs::DirBuilderExt;

        let mut builder = DirBuilder::new();
        builder.mode(0o700).recursive(true).create(datadir_path)?;
        Ok(())
    };

    #[cfg(not(unix))]
    return {
        std::fs::create_dir_all(datadir_path)?;
        Ok(())
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn init_datadir() {
        let path = std::env::temp_dir().join(format!("billybot-gui-dir-{}", std::process::id()));
        let dir = BillyBotDirectory::new(path.join("nested"));
        assert!(!dir.exists());
        dir.init().unwrap();
        assert!(dir.exists());
        // Idempotent
        dir.init().unwrap();
        std::fs::remove_dir_all(path).unwrap();
    }
}
