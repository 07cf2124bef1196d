use surfdock::engine::config::DockingConfig;

pub struct AppConfig {
    pub docking: DockingConfig,
    pub dry_run: bool,
}
