//! `mrv2-update platform`

use std::path::Path;

use mrv2_update_core::PlatformStrategy;

pub fn execute(platform: &dyn PlatformStrategy, app_root: &Path) {
    println!("{}", render(platform, app_root));
}

pub fn render(platform: &dyn PlatformStrategy, app_root: &Path) -> String {
    format!(
        "Platform:     {}\nAsset suffix: {}\nApp root:     {}",
        platform.target(),
        platform.extension(),
        app_root.display()
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use mrv2_update_core::PlatformTarget;
    use mrv2_update_runtime::platform_for;

    #[test]
    fn test_render_lists_suffix() {
        let platform = platform_for(PlatformTarget::Windows, "C:/Program Files/mrv2".into());
        let text = render(platform.as_ref(), Path::new("C:/Program Files/mrv2"));
        assert!(text.contains("Platform:     Windows"));
        assert!(text.contains("Asset suffix: .exe"));
    }
}
