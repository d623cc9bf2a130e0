use super::Parameter;

/// Builds `/{env}/{service}/{key_type}/{subtype}/{name}`.
///
/// Segments are taken verbatim, nothing is escaped. The remote store enforces
/// its own naming rules and length limits.
pub fn build_key(parameter: &Parameter, env: &str) -> String {
    format!(
        "/{}/{}/{}/{}/{}",
        env,
        parameter.service_name().as_str(),
        parameter.key_type().as_str(),
        parameter.subtype(),
        parameter.parameter_name()
    )
}

pub fn last_segment(key: &str) -> &str {
    key.rsplit('/').next().unwrap_or(key)
}
