use std::path::Path;

use chrono::TimeDelta;
use storegate_auth::{
    auth_token::{AuthToken, encode_token},
    error::Error as AuthError,
    jwt::Keys,
};
use storegate_config::{PermissionTable, StoregateConfig};
use storegate_web::{
    ctx::{Ctx, resolver::resolve},
    gate::{GateDecision, RouteGate},
};

use crate::cli::{CheckArgs, TokenArgs};
use crate::error::{Error, Result};

pub fn load_config(path: Option<&Path>) -> Result<StoregateConfig> {
    Ok(match path {
        Some(path) => StoregateConfig::from_file(path)?,
        None => StoregateConfig::load()?,
    })
}

pub fn handle_token(args: TokenArgs) -> Result<String> {
    let lifetime = token_lifetime(args.hours)?;
    let keys = Keys::from_env()?;
    let claims = AuthToken::new(args.sub, args.role, lifetime)?;
    log::debug!("Token {} expires at {}", claims.jti, claims.exp);
    Ok(encode_token(&keys, &claims)?.access_token)
}

/// A token must outlive the moment it is minted.
fn token_lifetime(hours: i64) -> Result<TimeDelta> {
    TimeDelta::try_hours(hours)
        .filter(|lifetime| *lifetime > TimeDelta::zero())
        .ok_or(Error::Auth(AuthError::InvalidDuration))
}

pub fn handle_check(config: &StoregateConfig, args: CheckArgs) -> Result<String> {
    let ctx = match (args.role, args.token) {
        (Some(role), _) => Ok(Ctx::new("cli", role)),
        (None, token) => resolve(&Keys::from_env()?, token),
    };
    let gate = RouteGate::new(PermissionTable::from_config(config), config.gate.clone());
    Ok(render(&gate.decide(&args.path, &ctx)))
}

pub fn render(decision: &GateDecision) -> String {
    match decision {
        GateDecision::Bypass => String::from("bypass"),
        GateDecision::Allow => String::from("allow"),
        GateDecision::Redirect(target) => format!("redirect {target}"),
    }
}

/// Prints the effective configuration followed by the role table in force.
pub fn handle_validate(config: &StoregateConfig) -> Result<String> {
    let table = PermissionTable::from_config(config);
    let mut out = config.to_toml()?;
    out.push_str("\n# permission table\n");
    for role in table.roles() {
        out.push_str(&format!("# {role}: {}\n", table.allowed(role).join(", ")));
    }
    Ok(out)
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;

    fn check(config: &StoregateConfig, role: &str, path: &str) -> String {
        handle_check(
            config,
            CheckArgs {
                path: String::from(path),
                role: Some(String::from(role)),
                token: None,
            },
        )
        .unwrap()
    }

    #[test]
    fn check_default_table() {
        let config = StoregateConfig::default();
        assert_eq!(check(&config, "agent", "/dashboard/orders"), "allow");
        assert_eq!(check(&config, "agent", "/dashboard"), "redirect /forbidden");
        assert_eq!(check(&config, "nobody", "/dashboard/ads"), "redirect /forbidden");
        assert_eq!(check(&config, "nobody", "/health"), "bypass");
    }

    #[test]
    fn token_lifetime_out_of_range() {
        for hours in [i64::MAX, i64::MIN, 0, -1] {
            let args = TokenArgs {
                sub: String::from("user-1"),
                role: String::from("admin"),
                hours,
            };
            assert!(
                matches!(
                    handle_token(args),
                    Err(Error::Auth(AuthError::InvalidDuration))
                ),
                "{hours}"
            );
        }
    }

    #[test]
    fn token_lifetime_in_hours() {
        assert_eq!(token_lifetime(12).unwrap(), TimeDelta::hours(12));
    }

    #[test]
    fn validate_lists_file_roles() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[roles]\nagent = [\"orders\", \"ads\"]").unwrap();

        let config = load_config(Some(file.path())).unwrap();
        let out = handle_validate(&config).unwrap();
        assert!(out.contains("# agent: orders, ads"));
        assert!(out.contains("prefix = \"/dashboard\""));
        assert!(!out.contains("superadmin"));
    }
}
