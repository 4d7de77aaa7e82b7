use color_eyre::{config::HookBuilder, eyre::Result};

/// Installs the panic and error report hooks. Call once, before anything can fail.
pub fn install_hooks() -> Result<()> {
    HookBuilder::default()
        .display_env_section(false)
        .install()
}
