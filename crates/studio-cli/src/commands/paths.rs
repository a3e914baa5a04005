use colored::Colorize;
use studio_infrastructure::StudioPaths;

pub fn run(paths: &StudioPaths) {
    let rows = [
        ("config dir", paths.config_dir().to_path_buf()),
        ("config", paths.config_file()),
        ("secret", paths.secret_file()),
        ("catalog", paths.catalog_file()),
        ("logs", paths.logs_dir()),
    ];
    for (label, path) in rows {
        let marker = if path.exists() {
            "✓".green()
        } else {
            "-".bright_black()
        };
        println!("{marker} {} {}", format!("{label:<11}").bold(), path.display());
    }
}
