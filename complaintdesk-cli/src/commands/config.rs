//! Configuration management commands

use anyhow::{Context, Result};
use complaintdesk_config::{ComplaintDeskConfig, ConfigLoader};
use complaintdesk_rbac::{AccessEnforcer, RbacConfig};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{error, info};

use crate::output::{print_error, print_info, print_success};

/// Validate a configuration file, including the role table it points at
pub fn validate_command(config_file: &Path) -> Result<()> {
    info!("Validating configuration file: {:?}", config_file);

    if !config_file.exists() {
        return Err(anyhow::anyhow!(
            "Configuration file not found: {:?}",
            config_file
        ));
    }

    let result = ConfigLoader::new()
        .from_file(config_file)
        .map_err(anyhow::Error::from)
        .and_then(|config| {
            let rbac = RbacConfig::from_access_config(&config.access)?;
            AccessEnforcer::from_config(&rbac)?;
            Ok(())
        });

    match result {
        Ok(()) => {
            print_success("Configuration file is valid");
            info!("Configuration validation passed");
            Ok(())
        }
        Err(e) => {
            print_error(&format!("Configuration validation failed: {}", e));
            error!("Configuration validation failed: {}", e);
            Err(e)
        }
    }
}

/// Write a sample configuration and, optionally, the built-in role table
pub fn generate_command(output: &Path, force: bool, roles_output: Option<&PathBuf>) -> Result<()> {
    write_new_file(output, force, &ComplaintDeskConfig::generate_sample())?;
    print_success(&format!("Configuration generated at: {:?}", output));

    if let Some(roles_path) = roles_output {
        let roles = RbacConfig::default()
            .to_yaml()
            .context("Failed to serialize the built-in role table")?;
        write_new_file(roles_path, force, &roles)?;
        print_success(&format!("Role table generated at: {:?}", roles_path));
        print_info("Point access.roles_file at it to customise the role table");
    }

    print_info(&format!(
        "Validate with: complaintdesk config validate --config-file {:?}",
        output
    ));
    Ok(())
}

/// Print the effective configuration
pub fn show_command(config: &ComplaintDeskConfig, format: &str) -> Result<()> {
    let rendered = match format.to_lowercase().as_str() {
        "yaml" | "yml" => serde_yaml::to_string(config).context("Failed to serialize to YAML")?,
        "json" => serde_json::to_string_pretty(config).context("Failed to serialize to JSON")?,
        _ => {
            return Err(anyhow::anyhow!(
                "Unknown output format: {}. Valid formats: yaml, json",
                format
            ));
        }
    };
    println!("{}", rendered);
    Ok(())
}

fn write_new_file(path: &Path, force: bool, contents: &str) -> Result<()> {
    if path.exists() && !force {
        return Err(anyhow::anyhow!(
            "Output file already exists: {:?}. Use --force to overwrite.",
            path
        ));
    }

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).context("Failed to create output directory")?;
    }
    fs::write(path, contents).with_context(|| format!("Failed to write {:?}", path))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_generate_then_validate() {
        let dir = tempdir().unwrap();
        let config_path = dir.path().join("conf").join("complaintdesk.yaml");
        let roles_path = dir.path().join("roles.yaml");

        generate_command(&config_path, false, Some(&roles_path)).unwrap();
        assert!(config_path.exists());
        assert!(roles_path.exists());

        let roles = RbacConfig::from_file(&roles_path).unwrap();
        assert_eq!(roles, RbacConfig::default());

        validate_command(&config_path).unwrap();
    }

    #[test]
    fn test_generate_refuses_to_overwrite() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("complaintdesk.yaml");
        fs::write(&path, "existing").unwrap();

        assert!(generate_command(&path, false, None).is_err());
        assert_eq!(fs::read_to_string(&path).unwrap(), "existing");
        generate_command(&path, true, None).unwrap();
    }

    #[test]
    fn test_validate_rejects_incomplete_role_table() {
        let dir = tempdir().unwrap();
        let roles_path = dir.path().join("roles.yaml");
        fs::write(
            &roles_path,
            "roles:\n  admin:\n    permissions: [\"read:complaints\"]\n    accessible_regions: all\n",
        )
        .unwrap();

        let config_path = dir.path().join("complaintdesk.yaml");
        fs::write(
            &config_path,
            format!("access:\n  roles_file: \"{}\"\n", roles_path.display()),
        )
        .unwrap();

        assert!(validate_command(&config_path).is_err());
    }

    #[test]
    fn test_show_rejects_unknown_format() {
        assert!(show_command(&ComplaintDeskConfig::default(), "toml").is_err());
        assert!(show_command(&ComplaintDeskConfig::default(), "json").is_ok());
    }
}
