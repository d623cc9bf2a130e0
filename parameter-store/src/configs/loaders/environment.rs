use std::env;

/// Unset and empty variables are both treated as absent.
pub fn optional_env(env_name: &str) -> Option<String> {
    env::var(env_name).ok().filter(|v| !v.trim().is_empty())
}

pub fn env_or(env_name: &str, default: &str) -> String {
    optional_env(env_name).unwrap_or_else(|| default.to_string())
}

/// Value of the first variable in `env_names` that is set.
pub fn first_env(env_names: &[&str]) -> Option<String> {
    env_names.iter().find_map(|name| optional_env(name))
}

pub fn bool_env(env_name: &str, default: bool) -> Result<bool, String> {
    match optional_env(env_name) {
        None => Ok(default),
        Some(value) => match value.trim().to_lowercase().as_str() {
            "true" | "1" | "yes" => Ok(true),
            "false" | "0" | "no" => Ok(false),
            _ => Err(format!(
                "Environment variable '{env_name}' must be a boolean, got '{value}'"
            )),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    #[test]
    #[serial]
    fn test_optional_env_ignores_empty() {
        unsafe {
            std::env::set_var("PS_EMPTY_VAR", "  ");
        }
        assert_eq!(optional_env("PS_EMPTY_VAR"), None);
        assert_eq!(env_or("PS_EMPTY_VAR", "default"), "default");

        unsafe {
            std::env::remove_var("PS_EMPTY_VAR");
        }
    }

    #[test]
    #[serial]
    fn test_first_env_takes_first_set() {
        unsafe {
            std::env::remove_var("PS_FIRST");
            std::env::set_var("PS_SECOND", "second");
        }
        assert_eq!(first_env(&["PS_FIRST", "PS_SECOND"]), Some("second".to_string()));

        unsafe {
            std::env::set_var("PS_FIRST", "first");
        }
        assert_eq!(first_env(&["PS_FIRST", "PS_SECOND"]), Some("first".to_string()));

        unsafe {
            std::env::remove_var("PS_FIRST");
            std::env::remove_var("PS_SECOND");
        }
    }

    #[test]
    #[serial]
    fn test_bool_env() {
        unsafe {
            std::env::remove_var("PS_FLAG");
        }
        assert_eq!(bool_env("PS_FLAG", true), Ok(true));

        unsafe {
            std::env::set_var("PS_FLAG", "YES");
        }
        assert_eq!(bool_env("PS_FLAG", false), Ok(true));

        unsafe {
            std::env::set_var("PS_FLAG", "nope");
        }
        assert!(bool_env("PS_FLAG", false).is_err());

        unsafe {
            std::env::remove_var("PS_FLAG");
        }
    }
}
