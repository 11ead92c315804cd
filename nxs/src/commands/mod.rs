use crate::config;
use crate::context::AppContext;
use crate::format;

/// Search command handlers and logic
pub mod search;

/// Save the resolved configuration to the config file
///
/// The password is never part of the configuration, so nothing secret is written.
pub fn handle_init_config(ctx: &AppContext) {
    let path = config::get_config_path();
    match ctx.config.save(&path) {
        Ok(()) => format::success(ctx, &format!("Configuration written to {}", path.display())),
        Err(e) => {
            format::error(ctx, &format!("Error: {}", e));
            std::process::exit(1);
        }
    }
}
