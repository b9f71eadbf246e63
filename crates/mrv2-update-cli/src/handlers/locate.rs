//! `mrv2-update locate <version>`

use std::path::Path;

use mrv2_update_core::{PlatformStrategy, Version};

use crate::error::CliError;

pub fn execute(platform: &dyn PlatformStrategy, version: &str) -> Result<(), CliError> {
    let version = Version::parse(version).map_err(|e| CliError::Arguments(e.to_string()))?;
    let path = platform.locate_executable(version);
    println!("{}", render(&path, path.is_file()));
    Ok(())
}

pub fn render(path: &Path, exists: bool) -> String {
    if exists {
        path.display().to_string()
    } else {
        format!("{} (not installed)", path.display())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_marks_missing_path() {
        let path = Path::new("/usr/local/mrv2-v1.3.0-Linux-64/bin/mrv2.sh");
        assert_eq!(render(path, true), "/usr/local/mrv2-v1.3.0-Linux-64/bin/mrv2.sh");
        assert_eq!(
            render(path, false),
            "/usr/local/mrv2-v1.3.0-Linux-64/bin/mrv2.sh (not installed)"
        );
    }
}
